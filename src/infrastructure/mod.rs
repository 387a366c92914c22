//! Infrastructure Layer
//!
//! D-Bus wiring (proxies, exported objects, registration flow) and process
//! plumbing (logging). Nothing in here owns domain state; it adapts the
//! types in [`crate::domain`] to the bus.

pub mod bluez;
pub mod logging;
