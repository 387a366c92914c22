//! Registrar
//!
//! Drives the registration lifecycle against the daemon seam:
//!
//! ```text
//! Init → AdapterPowered → ObjectsExported → Registered → Running
//!                                                          │ SIGINT
//!                                                          ▼
//!                                            Unregistering → Terminated
//! ```
//!
//! Unregistration is best-effort and happens exactly once; a second
//! interrupt or shutdown call is a no-op.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use zbus::zvariant::OwnedObjectPath;

use crate::domain::models::LifecycleState;
use crate::domain::settings::RegistrationPolicy;

use super::adapter;
use super::daemon::{Daemon, DaemonError};

/// What was registered, so shutdown knows which unregister call to make.
enum Registration {
    Application(OwnedObjectPath),
    Advertisement(OwnedObjectPath),
}

pub struct Registrar {
    daemon: Arc<dyn Daemon>,
    policy: RegistrationPolicy,
    state: LifecycleState,
    registration: Option<Registration>,
}

impl Registrar {
    pub fn new(daemon: Arc<dyn Daemon>, policy: RegistrationPolicy) -> Self {
        Self {
            daemon,
            policy,
            state: LifecycleState::Init,
            registration: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!(from = ?self.state, to = ?next, "lifecycle transition");
        self.state = next;
    }

    /// Phase 1: make sure the radio is up.
    pub async fn power_on(&mut self) -> Result<(), DaemonError> {
        adapter::ensure_powered(self.daemon.as_ref()).await?;
        self.transition(LifecycleState::AdapterPowered);
        Ok(())
    }

    /// Phase 2 marker, called once the objects are on the bus.
    pub fn objects_exported(&mut self) {
        self.transition(LifecycleState::ObjectsExported);
    }

    /// Phase 3: `RegisterApplication` with an empty options map.
    pub async fn register_application(&mut self, path: &OwnedObjectPath) -> Result<(), DaemonError> {
        let result = self.daemon.register_application(path).await;
        self.complete_registration(result, || Registration::Application(path.clone()))
    }

    /// Phase 3: `RegisterAdvertisement` with an empty options map.
    pub async fn register_advertisement(
        &mut self,
        path: &OwnedObjectPath,
    ) -> Result<(), DaemonError> {
        let result = self.daemon.register_advertisement(path).await;
        self.complete_registration(result, || Registration::Advertisement(path.clone()))
    }

    fn complete_registration(
        &mut self,
        result: Result<(), DaemonError>,
        registration: impl FnOnce() -> Registration,
    ) -> Result<(), DaemonError> {
        match result {
            Ok(()) => {
                self.registration = Some(registration());
                self.transition(LifecycleState::Registered);
                info!("registered with BlueZ");
                Ok(())
            }
            // Transport errors are always fatal; daemon rejections go
            // through the configured policy.
            Err(err @ DaemonError::Transport(_)) => Err(err),
            Err(err) => match self.policy {
                RegistrationPolicy::Fatal => Err(err),
                RegistrationPolicy::LogAndContinue => {
                    warn!(error = %err, "registration rejected, continuing unregistered");
                    self.transition(LifecycleState::Registered);
                    Ok(())
                }
            },
        }
    }

    pub fn enter_running(&mut self) {
        self.transition(LifecycleState::Running);
    }

    /// Block until the process is interrupted, then unregister and return.
    pub async fn run_until_interrupted(&mut self) {
        self.enter_running();
        info!("running, press Ctrl-C to exit");

        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to wait for interrupt signal");
        }

        info!("interrupt received, shutting down");
        self.shutdown().await;
    }

    /// Best-effort unregistration, exactly once. Errors are logged, never
    /// propagated; the process exits regardless of the outcome.
    pub async fn shutdown(&mut self) {
        if matches!(
            self.state,
            LifecycleState::Unregistering | LifecycleState::Terminated
        ) {
            return;
        }
        self.transition(LifecycleState::Unregistering);

        if let Some(registration) = self.registration.take() {
            let result = match &registration {
                Registration::Application(path) => self.daemon.unregister_application(path).await,
                Registration::Advertisement(path) => {
                    self.daemon.unregister_advertisement(path).await
                }
            };

            match result {
                Ok(()) => info!("unregistered from BlueZ"),
                Err(err) => warn!(error = %err, "unregistration failed, exiting anyway"),
            }
        }

        self.transition(LifecycleState::Terminated);
    }
}
