//! BlueZ Client
//!
//! [`Daemon`] implementation over the real system bus. All three manager
//! interfaces live on the adapter object, so one adapter path is enough to
//! build every proxy.

use std::collections::HashMap;

use async_trait::async_trait;
use zbus::zvariant::ObjectPath;
use zbus::Connection;

use super::daemon::{Daemon, DaemonError};
use super::proxies::{Adapter1Proxy, GattManager1Proxy, LEAdvertisingManager1Proxy};

pub struct BluezClient {
    adapter: Adapter1Proxy<'static>,
    gatt_manager: GattManager1Proxy<'static>,
    advertising_manager: LEAdvertisingManager1Proxy<'static>,
}

impl BluezClient {
    /// Build proxies for the adapter at `adapter_path` (e.g.
    /// `/org/bluez/hci0`) on an existing bus connection.
    pub async fn connect(connection: &Connection, adapter_path: &str) -> Result<Self, DaemonError> {
        let adapter = Adapter1Proxy::builder(connection)
            .path(adapter_path.to_owned())?
            .build()
            .await?;
        let gatt_manager = GattManager1Proxy::builder(connection)
            .path(adapter_path.to_owned())?
            .build()
            .await?;
        let advertising_manager = LEAdvertisingManager1Proxy::builder(connection)
            .path(adapter_path.to_owned())?
            .build()
            .await?;

        Ok(Self {
            adapter,
            gatt_manager,
            advertising_manager,
        })
    }
}

#[async_trait]
impl Daemon for BluezClient {
    async fn powered(&self) -> Result<bool, DaemonError> {
        Ok(self.adapter.powered().await?)
    }

    async fn set_powered(&self, powered: bool) -> Result<(), DaemonError> {
        Ok(self.adapter.set_powered(powered).await?)
    }

    async fn alias(&self) -> Result<String, DaemonError> {
        Ok(self.adapter.alias().await?)
    }

    async fn set_alias(&self, alias: &str) -> Result<(), DaemonError> {
        Ok(self.adapter.set_alias(alias).await?)
    }

    async fn register_application(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError> {
        self.gatt_manager
            .register_application(path, HashMap::new())
            .await
            .map_err(|err| classify("RegisterApplication", path, err))
    }

    async fn unregister_application(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError> {
        self.gatt_manager
            .unregister_application(path)
            .await
            .map_err(|err| classify("UnregisterApplication", path, err))
    }

    async fn register_advertisement(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError> {
        self.advertising_manager
            .register_advertisement(path, HashMap::new())
            .await
            .map_err(|err| classify("RegisterAdvertisement", path, err))
    }

    async fn unregister_advertisement(&self, path: &ObjectPath<'_>) -> Result<(), DaemonError> {
        self.advertising_manager
            .unregister_advertisement(path)
            .await
            .map_err(|err| classify("UnregisterAdvertisement", path, err))
    }
}

/// Split daemon error replies from transport failures: the former are policy
/// decisions for the registrar, the latter are always fatal.
fn classify(call: &'static str, path: &ObjectPath<'_>, err: zbus::Error) -> DaemonError {
    match err {
        zbus::Error::MethodError(name, detail, _) => DaemonError::Rejected {
            call,
            path: path.to_string(),
            reason: match detail {
                Some(detail) => format!("{name}: {detail}"),
                None => name.to_string(),
            },
        },
        other => DaemonError::Transport(other),
    }
}
