//! Domain Layer
//!
//! In-memory models of what gets exported to BlueZ: the GATT application
//! tree, the LE advertisement, the process lifecycle, and the settings that
//! configure them. Everything here is pure state and reflection; the D-Bus
//! wiring lives in [`crate::infrastructure`].

pub mod advertisement;
pub mod gatt;
pub mod models;
pub mod settings;

pub use advertisement::Advertisement;
pub use gatt::{Application, Service};
pub use models::LifecycleState;
pub use settings::Settings;
