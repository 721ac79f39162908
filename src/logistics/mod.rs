//! Vessel loading at a marshalling port.

/// Set-based vessel loading and fleet loadout.
pub mod loading;
/// Fastening task durations.
pub mod tasks;
pub mod vessel;

pub use loading::{
    DeckUsage, LoadAction, LoadError, LoadEvent, LoadReport, load_fleet, load_vessel,
};
pub use tasks::FastenTimes;
pub use vessel::{Vessel, VesselStorage};
