//! Balance-of-system design phases.

use std::fmt;

/// Offshore substation design.
pub mod substation;
pub mod types;

pub use substation::OffshoreSubstationDesign;
pub use types::{DesignResult, SubstationCosts, SubstructureSpec, TopsideSpec};

/// Error returned by design result accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignError {
    /// Results were read before the phase was run.
    NotRun,
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRun => write!(f, "design phase has not been run yet"),
        }
    }
}

impl std::error::Error for DesignError {}

/// A design phase: a pure computation over project configuration whose
/// results are readable only after [`DesignPhase::run`].
pub trait DesignPhase {
    /// Computes every derived quantity. Running again recomputes the same values.
    fn run(&mut self);

    /// Returns the result mapping handed to installation phases.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NotRun`] before `run`.
    fn design_result(&self) -> Result<&DesignResult, DesignError>;

    /// Total phase cost (USD).
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NotRun`] before `run`.
    fn total_phase_cost(&self) -> Result<f64, DesignError>;

    /// Total phase duration (h). Read from configuration; never fails.
    fn total_phase_time(&self) -> f64;
}
