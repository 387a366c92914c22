//! zbus proxies for the BlueZ interfaces this crate calls.
//!
//! Signatures follow the BlueZ D-Bus API documentation
//! (`doc/org.bluez.*.rst` in the BlueZ tree); names must be reproduced
//! exactly since the daemon is a fixed third party.

use std::collections::HashMap;

use zbus::{
    proxy,
    zvariant::{ObjectPath, Value},
};

/// `org.bluez.Adapter1`: the local radio/controller object.
#[proxy(interface = "org.bluez.Adapter1", default_service = "org.bluez")]
pub trait Adapter1 {
    /// Powered property
    #[zbus(property)]
    fn powered(&self) -> zbus::Result<bool>;

    #[zbus(property)]
    fn set_powered(&self, value: bool) -> zbus::Result<()>;

    /// Alias property
    #[zbus(property)]
    fn alias(&self) -> zbus::Result<String>;

    #[zbus(property)]
    fn set_alias(&self, value: &str) -> zbus::Result<()>;
}

/// `org.bluez.GattManager1`: GATT application registration.
#[proxy(interface = "org.bluez.GattManager1", default_service = "org.bluez")]
pub trait GattManager1 {
    /// RegisterApplication method
    fn register_application(
        &self,
        application: &ObjectPath<'_>,
        options: HashMap<&str, &Value<'_>>,
    ) -> zbus::Result<()>;

    /// UnregisterApplication method
    fn unregister_application(&self, application: &ObjectPath<'_>) -> zbus::Result<()>;
}

/// `org.bluez.LEAdvertisingManager1`: advertisement registration.
#[proxy(
    interface = "org.bluez.LEAdvertisingManager1",
    default_service = "org.bluez"
)]
pub trait LEAdvertisingManager1 {
    /// RegisterAdvertisement method
    fn register_advertisement(
        &self,
        advertisement: &ObjectPath<'_>,
        options: HashMap<&str, &Value<'_>>,
    ) -> zbus::Result<()>;

    /// UnregisterAdvertisement method
    fn unregister_advertisement(&self, advertisement: &ObjectPath<'_>) -> zbus::Result<()>;
}
