//! Adapter Control
//!
//! Makes sure the local radio is in a usable state before anything is
//! exported or registered.

use tracing::{debug, info, warn};

use super::daemon::{Daemon, DaemonError};

/// Read `Powered` and set it only when it is off. Exactly one `Set` call,
/// and none at all when the radio is already up. Transport or permission
/// errors surface to the caller as fatal startup errors.
pub async fn ensure_powered(daemon: &dyn Daemon) -> Result<(), DaemonError> {
    if daemon.powered().await? {
        debug!("adapter already powered");
        return Ok(());
    }

    info!("powering on adapter");
    daemon.set_powered(true).await
}

/// Set the adapter alias when one is configured, skipping the write when the
/// current alias already matches. The advertisement carries its own
/// LocalName, so a rejected alias is logged and swallowed.
pub async fn apply_alias(daemon: &dyn Daemon, alias: Option<&str>) {
    let Some(alias) = alias else {
        return;
    };

    match daemon.alias().await {
        Ok(current) if current == alias => {
            debug!(alias, "adapter alias already set");
            return;
        }
        Ok(_) => {}
        Err(err) => warn!(error = %err, "failed to read adapter alias"),
    }

    match daemon.set_alias(alias).await {
        Ok(()) => info!(alias, "adapter alias set"),
        Err(err) => warn!(alias, error = %err, "failed to set adapter alias"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bluez::registrar::tests::StubDaemon;

    #[tokio::test]
    async fn powers_on_only_when_off() {
        let daemon = StubDaemon::new(false);
        ensure_powered(&daemon).await.unwrap();
        assert_eq!(daemon.calls(), vec!["Get Powered", "Set Powered true"]);
    }

    #[tokio::test]
    async fn leaves_a_powered_adapter_alone() {
        let daemon = StubDaemon::new(true);
        ensure_powered(&daemon).await.unwrap();
        assert_eq!(daemon.calls(), vec!["Get Powered"]);
    }

    #[tokio::test]
    async fn alias_is_skipped_when_unset() {
        let daemon = StubDaemon::new(true);
        apply_alias(&daemon, None).await;
        assert!(daemon.calls().is_empty());
    }

    #[tokio::test]
    async fn alias_is_written_when_it_differs() {
        let daemon = StubDaemon::new(true);
        apply_alias(&daemon, Some("JetsonBLE")).await;
        assert_eq!(daemon.calls(), vec!["Get Alias", "Set Alias JetsonBLE"]);
    }

    #[tokio::test]
    async fn matching_alias_is_not_rewritten() {
        let daemon = StubDaemon::new(true).with_alias("JetsonBLE");
        apply_alias(&daemon, Some("JetsonBLE")).await;
        assert_eq!(daemon.calls(), vec!["Get Alias"]);
    }

    #[tokio::test]
    async fn alias_failure_is_not_fatal() {
        let daemon = StubDaemon::new(true).rejecting_alias();
        apply_alias(&daemon, Some("JetsonBLE")).await;
        assert_eq!(daemon.calls(), vec!["Get Alias", "Set Alias JetsonBLE"]);
    }
}
