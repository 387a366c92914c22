//! BlueZ Module
//!
//! Everything that touches the D-Bus system bus.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Registrar                          │
//! │   (lifecycle: power on → export → register → idle →      │
//! │    unregister on interrupt)                               │
//! └───────────────┬─────────────────────────┬────────────────┘
//!                 │ outbound                │ inbound
//!                 ▼                         ▼
//! ┌───────────────────────┐   ┌───────────────────────────┐
//! │     Daemon trait      │   │     Exported objects      │
//! │                       │   │                           │
//! │ - BluezClient (zbus   │   │ - GattApplicationObject   │
//! │   proxies, real bus)  │   │   (GetManagedObjects)     │
//! │ - stub daemons (tests)│   │ - AdvertisementObject     │
//! │                       │   │   (GetAll, Release)       │
//! └───────────────────────┘   └───────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`proxies`] - zbus proxy traits for the BlueZ interfaces we call
//! - [`daemon`] - the outbound call seam and its error type
//! - [`client`] - [`Daemon`] implementation over the real system bus
//! - [`adapter`] - adapter power/alias control
//! - [`objects`] - objects BlueZ calls back into after registration
//! - [`registrar`] - registration lifecycle and the idle loop

pub mod adapter;
pub mod client;
pub mod daemon;
pub mod objects;
pub mod proxies;
pub mod registrar;

// Re-export the pieces the binaries assemble
pub use client::BluezClient;
pub use daemon::{Daemon, DaemonError};
pub use objects::{export_advertisement, export_application};
pub use registrar::Registrar;
