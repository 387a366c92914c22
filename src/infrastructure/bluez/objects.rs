//! Exported Objects
//!
//! The objects BlueZ calls back into after registration. Interface and
//! method routing is declared in the `#[interface]` blocks, so the
//! capability set is fixed at compile time instead of dispatched through
//! reflected strings. Advertisement property reads all flow through
//! [`AdvertisementObject::get_all`], which maps a request for the wrong
//! interface to `org.freedesktop.DBus.Error.InvalidArgs`.

use tracing::{debug, info};
use zbus::zvariant::{OwnedObjectPath, OwnedValue};
use zbus::{fdo, interface, Connection};

use crate::domain::advertisement::{Advertisement, AdvertisementError, LE_ADVERTISEMENT_IFACE};
use crate::domain::gatt::{Application, InterfaceProperties, ManagedObjects};

use super::daemon::DaemonError;

/// `org.freedesktop.DBus.ObjectManager` facade over the GATT application
/// tree. BlueZ introspects the tree through this after
/// `RegisterApplication`.
pub struct GattApplicationObject {
    application: Application,
}

impl GattApplicationObject {
    pub fn new(application: Application) -> Self {
        Self { application }
    }
}

#[interface(name = "org.freedesktop.DBus.ObjectManager")]
impl GattApplicationObject {
    fn get_managed_objects(&self) -> fdo::Result<ManagedObjects> {
        debug!(
            services = self.application.services().len(),
            "GetManagedObjects"
        );
        self.application
            .managed_objects()
            .map_err(|err| fdo::Error::Failed(err.to_string()))
    }
}

/// `org.bluez.LEAdvertisement1` facade over the advertisement descriptor.
pub struct AdvertisementObject {
    advertisement: Advertisement,
}

impl AdvertisementObject {
    pub fn new(advertisement: Advertisement) -> Self {
        Self { advertisement }
    }

    /// `Properties.GetAll` contract at the bus boundary: the domain's
    /// invalid-interface fault becomes the peer-visible
    /// `org.freedesktop.DBus.Error.InvalidArgs`.
    pub fn get_all(&self, interface: &str) -> fdo::Result<InterfaceProperties> {
        self.advertisement.get_all(interface).map_err(|err| match err {
            fault @ AdvertisementError::InvalidInterface(_) => {
                fdo::Error::InvalidArgs(fault.to_string())
            }
            other => fdo::Error::Failed(other.to_string()),
        })
    }

    /// Every property read goes through [`Self::get_all`], so the fault
    /// translation has a single point.
    fn read_property<T>(&self, name: &str) -> fdo::Result<T>
    where
        T: TryFrom<OwnedValue>,
        T::Error: std::fmt::Display,
    {
        let mut props = self.get_all(LE_ADVERTISEMENT_IFACE)?;
        let value = props
            .remove(name)
            .ok_or_else(|| fdo::Error::UnknownProperty(name.to_string()))?;
        T::try_from(value).map_err(|err| fdo::Error::Failed(err.to_string()))
    }
}

#[interface(name = "org.bluez.LEAdvertisement1")]
impl AdvertisementObject {
    #[zbus(property, name = "Type")]
    fn advertisement_type(&self) -> fdo::Result<String> {
        self.read_property("Type")
    }

    #[zbus(property)]
    fn local_name(&self) -> fdo::Result<String> {
        self.read_property("LocalName")
    }

    #[zbus(property)]
    fn include_tx_power(&self) -> fdo::Result<bool> {
        self.read_property("IncludeTxPower")
    }

    /// Teardown notification; must not fail.
    fn release(&self) {
        self.advertisement.release();
    }
}

/// Serve the application tree at its root path. Returns the path to hand to
/// `RegisterApplication`.
pub async fn export_application(
    connection: &Connection,
    application: Application,
) -> Result<OwnedObjectPath, DaemonError> {
    let path = application.path().clone();
    connection
        .object_server()
        .at(path.as_str(), GattApplicationObject::new(application))
        .await?;

    info!(path = %path, "GATT application exported");
    Ok(path)
}

/// Serve the advertisement object. Returns the path to hand to
/// `RegisterAdvertisement`.
pub async fn export_advertisement(
    connection: &Connection,
    advertisement: Advertisement,
) -> Result<OwnedObjectPath, DaemonError> {
    let path = advertisement.path().clone();
    connection
        .object_server()
        .at(path.as_str(), AdvertisementObject::new(advertisement))
        .await?;

    info!(path = %path, "advertisement exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gatt::GATT_SERVICE_IFACE;
    use crate::domain::settings::{AdvertisingSettings, GattSettings};

    #[test]
    fn managed_objects_reply_has_the_bluez_shape() {
        let app = Application::new(&GattSettings::default()).unwrap();
        let object = GattApplicationObject::new(app);

        let reply = object.get_managed_objects().unwrap();
        let service_path = OwnedObjectPath::try_from("/com/example/gatt/service0").unwrap();
        let props = &reply[&service_path][GATT_SERVICE_IFACE];

        assert_eq!(String::try_from(props["UUID"].clone()).unwrap(), "180F");
        assert!(bool::try_from(props["Primary"].clone()).unwrap());
    }

    #[test]
    fn advertisement_object_exposes_the_fixed_properties() {
        let adv = Advertisement::new(&AdvertisingSettings::default()).unwrap();
        let object = AdvertisementObject::new(adv);

        assert_eq!(object.advertisement_type().unwrap(), "peripheral");
        assert_eq!(object.local_name().unwrap(), "JetsonBLE");
        assert!(object.include_tx_power().unwrap());
        object.release();
    }

    #[test]
    fn get_all_answers_the_advertisement_interface() {
        let adv = Advertisement::new(&AdvertisingSettings::default()).unwrap();
        let object = AdvertisementObject::new(adv);

        let props = object.get_all(LE_ADVERTISEMENT_IFACE).unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(
            String::try_from(props["LocalName"].clone()).unwrap(),
            "JetsonBLE"
        );
    }

    #[test]
    fn get_all_for_a_wrong_interface_is_an_invalid_args_fault() {
        let adv = Advertisement::new(&AdvertisingSettings::default()).unwrap();
        let object = AdvertisementObject::new(adv);

        for requested in ["org.bluez.GattService1", ""] {
            assert!(matches!(
                object.get_all(requested),
                Err(fdo::Error::InvalidArgs(_))
            ));
        }
    }
}
