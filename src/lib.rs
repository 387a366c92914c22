//! BlueZ BLE peripheral registration tools.
//!
//! Two small binaries built on this library talk to the BlueZ daemon over the
//! D-Bus system bus:
//!
//! - `gatt-server` exports a minimal GATT application (one Battery Service)
//!   and registers it with `org.bluez.GattManager1`.
//! - `advertiser` exports an LE advertisement object and registers it with
//!   `org.bluez.LEAdvertisingManager1`.
//!
//! Both follow the same three-phase shape: power on the adapter, export the
//! objects, register and idle until interrupted. The Bluetooth protocol stack
//! itself is owned entirely by BlueZ; this crate is the client side of its
//! D-Bus contract.

pub mod domain;
pub mod infrastructure;
