//! LE Advertisement Model
//!
//! The fixed property set BlueZ reads back through `Properties.GetAll`
//! before it starts broadcasting, plus the `Release` notification it sends
//! on teardown.

use thiserror::Error;
use tracing::debug;
use zbus::zvariant::{OwnedObjectPath, Value};

use crate::domain::gatt::InterfaceProperties;
use crate::domain::settings::AdvertisingSettings;

/// The D-Bus interface BlueZ queries for advertisement properties.
pub const LE_ADVERTISEMENT_IFACE: &str = "org.bluez.LEAdvertisement1";

/// Advertisement type; this crate only ever acts as a peripheral.
pub const ADVERTISEMENT_TYPE: &str = "peripheral";

#[derive(Debug, Error)]
pub enum AdvertisementError {
    /// `GetAll` asked for an interface this object does not implement. The
    /// bus adapter reports this back to the caller as an invalid-arguments
    /// fault; it is never a process-level failure.
    #[error("GetAll called for unknown interface {0:?}")]
    InvalidInterface(String),

    #[error("invalid object path {path:?}: {source}")]
    InvalidPath {
        path: String,
        source: zbus::zvariant::Error,
    },

    #[error("property value conversion failed: {0}")]
    Value(#[from] zbus::zvariant::Error),
}

/// A peripheral advertisement descriptor.
///
/// Immutable after construction; the daemon caches the object path after
/// `RegisterAdvertisement`, so the path must stay stable for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct Advertisement {
    path: OwnedObjectPath,
    local_name: String,
    include_tx_power: bool,
}

impl Advertisement {
    pub fn new(settings: &AdvertisingSettings) -> Result<Self, AdvertisementError> {
        let path = OwnedObjectPath::try_from(settings.advertisement_path.as_str()).map_err(
            |source| AdvertisementError::InvalidPath {
                path: settings.advertisement_path.clone(),
                source,
            },
        )?;

        Ok(Self {
            path,
            local_name: settings.local_name.clone(),
            include_tx_power: settings.include_tx_power,
        })
    }

    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    pub fn advertisement_type(&self) -> &'static str {
        ADVERTISEMENT_TYPE
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn include_tx_power(&self) -> bool {
        self.include_tx_power
    }

    /// The fixed `{Type, LocalName, IncludeTxPower}` property set.
    pub fn properties(&self) -> Result<InterfaceProperties, AdvertisementError> {
        let mut props = InterfaceProperties::new();
        props.insert("Type".into(), Value::from(ADVERTISEMENT_TYPE).try_to_owned()?);
        props.insert(
            "LocalName".into(),
            Value::from(self.local_name.as_str()).try_to_owned()?,
        );
        props.insert(
            "IncludeTxPower".into(),
            Value::from(self.include_tx_power).try_to_owned()?,
        );

        Ok(props)
    }

    /// `Properties.GetAll` contract: the fixed property set for the
    /// advertisement interface, a typed invalid-interface fault for anything
    /// else (including the empty string).
    pub fn get_all(&self, interface: &str) -> Result<InterfaceProperties, AdvertisementError> {
        if interface != LE_ADVERTISEMENT_IFACE {
            return Err(AdvertisementError::InvalidInterface(interface.to_string()));
        }

        self.properties()
    }

    /// Teardown notification from the daemon (adapter reset, unregister).
    /// Deliberately a no-op: there is nothing to release on this side.
    pub fn release(&self) {
        debug!(path = %self.path, "advertisement released by daemon");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advertisement() -> Advertisement {
        Advertisement::new(&AdvertisingSettings::default()).unwrap()
    }

    #[test]
    fn properties_carry_the_fixed_values() {
        let adv = advertisement();
        let props = adv.properties().unwrap();

        assert_eq!(props.len(), 3);
        assert_eq!(String::try_from(props["Type"].clone()).unwrap(), "peripheral");
        assert_eq!(
            String::try_from(props["LocalName"].clone()).unwrap(),
            "JetsonBLE"
        );
        assert!(bool::try_from(props["IncludeTxPower"].clone()).unwrap());
    }

    #[test]
    fn get_all_accepts_only_the_advertisement_interface() {
        let adv = advertisement();

        let props = adv.get_all(LE_ADVERTISEMENT_IFACE).unwrap();
        assert_eq!(props.len(), 3);

        assert!(matches!(
            adv.get_all("org.bluez.GattService1"),
            Err(AdvertisementError::InvalidInterface(iface)) if iface == "org.bluez.GattService1"
        ));
        assert!(matches!(
            adv.get_all(""),
            Err(AdvertisementError::InvalidInterface(iface)) if iface.is_empty()
        ));
    }

    #[test]
    fn release_never_mutates_the_advertisement() {
        let adv = advertisement();
        let before = adv.properties().unwrap();

        adv.release();
        adv.release();

        let after = adv.properties().unwrap();
        assert_eq!(before.len(), after.len());
        assert_eq!(
            String::try_from(after["LocalName"].clone()).unwrap(),
            "JetsonBLE"
        );
    }

    #[test]
    fn default_path_matches_the_registered_one() {
        assert_eq!(advertisement().path().as_str(), "/org/test/advertisement");
    }
}
