//! GATT Application Model
//!
//! The in-memory object tree that `GetManagedObjects` reflects back to
//! BlueZ. Services are immutable after construction and owned exclusively by
//! their [`Application`]; object paths are validated up front because BlueZ
//! caches them after registration and expects them to stay stable for the
//! process lifetime.

use std::collections::HashMap;

use thiserror::Error;
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::domain::settings::GattSettings;

/// The D-Bus interface BlueZ expects each service entry to carry.
pub const GATT_SERVICE_IFACE: &str = "org.bluez.GattService1";

/// Property map for a single D-Bus interface (`a{sv}`).
pub type InterfaceProperties = HashMap<String, OwnedValue>;

/// The `GetManagedObjects` reply shape (`a{oa{sa{sv}}}`).
pub type ManagedObjects = HashMap<OwnedObjectPath, HashMap<String, InterfaceProperties>>;

#[derive(Debug, Error)]
pub enum GattError {
    #[error("invalid object path {path:?}: {source}")]
    InvalidPath {
        path: String,
        source: zbus::zvariant::Error,
    },

    #[error("duplicate service path {0} under application root")]
    DuplicatePath(OwnedObjectPath),

    #[error("property value conversion failed: {0}")]
    Value(#[from] zbus::zvariant::Error),
}

/// A single GATT service entry.
///
/// Only the attributes BlueZ reads during registration are modeled: the
/// object path, the UUID, and the `Primary` flag (always true here).
#[derive(Debug, Clone)]
pub struct Service {
    path: OwnedObjectPath,
    uuid: String,
}

impl Service {
    /// Create a service at `path` with the given 16-bit or 128-bit UUID
    /// string. Fails if `path` is not a syntactically valid object path.
    pub fn new(path: &str, uuid: impl Into<String>) -> Result<Self, GattError> {
        let parsed = OwnedObjectPath::try_from(path).map_err(|source| GattError::InvalidPath {
            path: path.to_string(),
            source,
        })?;

        Ok(Self {
            path: parsed,
            uuid: uuid.into(),
        })
    }

    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Interface/property mapping for this service, as it appears in the
    /// `GetManagedObjects` reply.
    pub fn properties(&self) -> Result<HashMap<String, InterfaceProperties>, GattError> {
        let mut props = InterfaceProperties::new();
        props.insert("UUID".into(), Value::from(self.uuid.as_str()).try_to_owned()?);
        props.insert("Primary".into(), Value::from(true).try_to_owned()?);

        Ok(HashMap::from([(GATT_SERVICE_IFACE.to_string(), props)]))
    }
}

/// The GATT application root.
///
/// Owns an insertion-ordered sequence of services and always contains at
/// least the Battery Service required for a non-empty registration.
#[derive(Debug, Clone)]
pub struct Application {
    path: OwnedObjectPath,
    services: Vec<Service>,
}

impl Application {
    /// Build the application tree from settings: the configured root path
    /// plus the hardcoded Battery Service at `<root>/service0`.
    pub fn new(settings: &GattSettings) -> Result<Self, GattError> {
        let path = OwnedObjectPath::try_from(settings.application_path.as_str()).map_err(
            |source| GattError::InvalidPath {
                path: settings.application_path.clone(),
                source,
            },
        )?;

        let mut application = Self {
            path,
            services: Vec::new(),
        };

        let battery = Service::new(
            &format!("{}/service0", settings.application_path),
            settings.battery_service_uuid.as_str(),
        )?;
        application.add_service(battery)?;

        Ok(application)
    }

    /// Append a service. Rejects a path already present in the tree;
    /// exported paths must be unique under the application root.
    pub fn add_service(&mut self, service: Service) -> Result<(), GattError> {
        if self.services.iter().any(|s| s.path() == service.path()) {
            return Err(GattError::DuplicatePath(service.path.clone()));
        }

        self.services.push(service);
        Ok(())
    }

    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// The full `GetManagedObjects` reply.
    ///
    /// Read-only reflection of the current tree; BlueZ may call this at any
    /// time after registration, so it must stay idempotent and side-effect
    /// free.
    pub fn managed_objects(&self) -> Result<ManagedObjects, GattError> {
        let mut response = ManagedObjects::new();

        for service in &self.services {
            response.insert(service.path().clone(), service.properties()?);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GattSettings {
        GattSettings::default()
    }

    #[test]
    fn application_contains_battery_service() {
        let app = Application::new(&settings()).unwrap();

        assert_eq!(app.path().as_str(), "/com/example/gatt");
        assert_eq!(app.services().len(), 1);
        assert_eq!(app.services()[0].uuid(), "180F");
        assert_eq!(app.services()[0].path().as_str(), "/com/example/gatt/service0");
    }

    #[test]
    fn managed_objects_reflects_every_service() {
        let mut app = Application::new(&settings()).unwrap();
        app.add_service(Service::new("/com/example/gatt/service1", "180D").unwrap())
            .unwrap();

        let objects = app.managed_objects().unwrap();
        assert_eq!(objects.len(), 2);

        for service in app.services() {
            let ifaces = objects.get(service.path()).expect("service path missing");
            let props = ifaces.get(GATT_SERVICE_IFACE).expect("service iface missing");

            let uuid = String::try_from(props["UUID"].clone()).unwrap();
            let primary = bool::try_from(props["Primary"].clone()).unwrap();
            assert_eq!(uuid, service.uuid());
            assert!(primary);
        }
    }

    #[test]
    fn managed_objects_is_idempotent() {
        let app = Application::new(&settings()).unwrap();

        let first = app.managed_objects().unwrap();
        let second = app.managed_objects().unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(app.services().len(), 1);
    }

    #[test]
    fn duplicate_service_path_is_rejected() {
        let mut app = Application::new(&settings()).unwrap();
        let dup = Service::new("/com/example/gatt/service0", "180D").unwrap();

        assert!(matches!(
            app.add_service(dup),
            Err(GattError::DuplicatePath(_))
        ));
        assert_eq!(app.services().len(), 1);
    }

    #[test]
    fn malformed_path_is_rejected() {
        assert!(matches!(
            Service::new("not-a-path", "180F"),
            Err(GattError::InvalidPath { .. })
        ));
        assert!(matches!(
            Service::new("/trailing/slash/", "180F"),
            Err(GattError::InvalidPath { .. })
        ));
    }
}
