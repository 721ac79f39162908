//! Offshore wind balance-of-system design and port logistics.

pub mod cli;
pub mod config;
/// Design phases: substation sizing and costing.
pub mod design;
pub mod io;
pub mod logging;
/// Vessel loading at the port.
pub mod logistics;
/// Shared port resource, cargo, and lookup errors.
pub mod marshalling;
