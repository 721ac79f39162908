//! Shared port resource and the cargo it stores.

/// Cargo trait, concrete components, and port entries.
pub mod cargo;
/// Category labels used for lookup.
pub mod category;
pub mod error;
/// The shared marshalling port.
pub mod port;

pub use cargo::{Cargo, Component, Entry};
pub use category::{Category, CustomLabel, EmptyCategory};
pub use error::ItemNotFound;
pub use port::{CraneGuard, Port};
