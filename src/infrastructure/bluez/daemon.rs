//! Daemon Call Seam
//!
//! The outbound surface to BlueZ, behind a trait so the registration flow
//! can be exercised against a stub daemon in tests.

use async_trait::async_trait;
use thiserror::Error;
use zbus::zvariant::ObjectPath;

#[derive(Debug, Error)]
pub enum DaemonError {
    /// Bus-level failure: no daemon, no permission, connection lost. Fatal
    /// at startup, no retry.
    #[error("D-Bus transport error: {0}")]
    Transport(#[from] zbus::Error),

    /// The daemon answered the call with an error reply (already
    /// registered, invalid object, unknown interface).
    #[error("daemon rejected {call} for {path}: {reason}")]
    Rejected {
        call: &'static str,
        path: String,
        reason: String,
    },
}

/// Calls this crate makes into the BlueZ daemon.
#[async_trait]
pub trait Daemon: Send + Sync {
    async fn powered(&self) -> Result<bool, DaemonError>;

    async fn set_powered(&self, powered: bool) -> Result<(), DaemonError>;

    async fn alias(&self) -> Result<String, DaemonError>;

    async fn set_alias(&self, alias: &str) -> Result<(), DaemonError>;

    /// `GattManager1.RegisterApplication` with an empty options map.
    async fn register_application(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError>;

    async fn unregister_application(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError>;

    /// `LEAdvertisingManager1.RegisterAdvertisement` with an empty options map.
    async fn register_advertisement(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError>;

    async fn unregister_advertisement(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError>;
}
