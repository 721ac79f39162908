//! Offshore substation sizing and cost model.

use log::debug;

use crate::config::{ProjectConfig, SubstationDesignConfig};
use crate::marshalling::Category;

use super::types::{DesignResult, SubstationCosts, SubstructureSpec, TopsideSpec};
use super::{DesignError, DesignPhase};

/// Export capacity handled by one main power transformer (MW).
const MPT_CAPACITY_MW: f64 = 250.0;
/// Oversizing applied to the plant rating when sizing MPTs.
const MPT_OVERSIZE: f64 = 1.15;
/// Deck space of a substation component on a vessel. Not yet modeled.
const COMPONENT_DECK_SPACE: f64 = 1.0;

/// Inputs read from the project configuration.
#[derive(Debug, Clone, PartialEq)]
struct Inputs {
    depth: f64,
    num_turbines: u32,
    turbine_rating: f64,
    rates: SubstationDesignConfig,
}

/// Sizes the offshore substations and prices their equipment.
///
/// Call [`DesignPhase::run`] before reading results; until then the result
/// accessors fail with [`DesignError::NotRun`]. Running is a pure function
/// of the configuration, so repeated runs produce identical results.
///
/// # Examples
///
/// ```
/// use bos_sim::config::ProjectConfig;
/// use bos_sim::design::{DesignPhase, OffshoreSubstationDesign};
///
/// let mut design = OffshoreSubstationDesign::new(&ProjectConfig::baseline());
/// assert!(design.design_result().is_err());
///
/// design.run();
/// assert_eq!(design.design_result().map(|r| r.num_substations).ok(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct OffshoreSubstationDesign {
    inputs: Inputs,
    outputs: Option<(DesignResult, SubstationCosts)>,
}

impl OffshoreSubstationDesign {
    /// Creates a design phase for `config`. Nothing is computed yet.
    pub fn new(config: &ProjectConfig) -> Self {
        Self {
            inputs: Inputs {
                depth: config.site.depth,
                num_turbines: config.plant.num_turbines,
                turbine_rating: config.turbine.turbine_rating,
                rates: config.substation_design.clone(),
            },
            outputs: None,
        }
    }

    /// Returns the intermediate quantities and costs.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NotRun`] before [`DesignPhase::run`].
    pub fn costs(&self) -> Result<&SubstationCosts, DesignError> {
        self.outputs
            .as_ref()
            .map(|(_, costs)| costs)
            .ok_or(DesignError::NotRun)
    }
}

impl DesignPhase for OffshoreSubstationDesign {
    fn run(&mut self) {
        let (result, costs) = compute(&self.inputs);
        debug!(
            target: "design",
            "substation design: {} x {} MVA MPTs, total ${:.0}",
            costs.num_mpt,
            costs.mpt_rating,
            costs.substation_cost
        );
        self.outputs = Some((result, costs));
    }

    fn design_result(&self) -> Result<&DesignResult, DesignError> {
        self.outputs
            .as_ref()
            .map(|(result, _)| result)
            .ok_or(DesignError::NotRun)
    }

    fn total_phase_cost(&self) -> Result<f64, DesignError> {
        self.costs().map(|c| c.substation_cost)
    }

    fn total_phase_time(&self) -> f64 {
        self.inputs.rates.design_time
    }
}

/// Rounds to the nearest multiple of ten, ties to even.
fn round_to_ten(x: f64) -> f64 {
    (x / 10.0).round_ties_even() * 10.0
}

fn compute(inputs: &Inputs) -> (DesignResult, SubstationCosts) {
    let r = &inputs.rates;
    let plant_mw = f64::from(inputs.num_turbines) * inputs.turbine_rating;

    let substructure_length = inputs.depth + 10.0;

    let num_mpt = (plant_mw / MPT_CAPACITY_MW).ceil();
    let mpt_rating = round_to_ten(plant_mw * MPT_OVERSIZE / num_mpt);
    let mpt_capacity = mpt_rating * num_mpt;
    let mpt_cost = mpt_capacity * r.mpt_cost_rate;

    let topside_mass = 3.85 * mpt_capacity + 285.0;
    let topside_cost = topside_mass * r.topside_fab_cost_rate + r.topside_design_cost;

    let shunt_reactor_cost = mpt_capacity * r.shunt_cost_rate * 0.5;
    let switchgear_costs = num_mpt * r.switchgear_cost;
    let ancillary_system_costs = r.backup_gen_cost + r.workspace_cost + r.other_ancillary_cost;
    let land_assembly_cost =
        (switchgear_costs + shunt_reactor_cost + ancillary_system_costs) * r.topside_assembly_factor;

    // Jacket substructure with pin piles.
    let jacket_mass = 0.4 * topside_mass;
    let pile_mass = 8.0 * jacket_mass.powf(0.5574);
    let substructure_cost =
        jacket_mass * r.substation_jacket_cost_rate + pile_mass * r.substation_pile_cost_rate;
    let substructure_mass = jacket_mass + pile_mass;

    let per_substation = mpt_cost
        + topside_cost
        + shunt_reactor_cost
        + switchgear_costs
        + ancillary_system_costs
        + land_assembly_cost
        + substructure_cost;
    let substation_cost = per_substation * f64::from(r.num_substations);

    let result = DesignResult {
        num_substations: r.num_substations,
        offshore_substation_topside: TopsideSpec {
            kind: Category::Topside,
            deck_space: COMPONENT_DECK_SPACE,
            weight: topside_mass,
        },
        // Installation only supports monopile substructures.
        offshore_substation_substructure: SubstructureSpec {
            kind: Category::Monopile,
            deck_space: COMPONENT_DECK_SPACE,
            weight: substructure_mass,
            length: substructure_length,
        },
    };

    let costs = SubstationCosts {
        num_mpt,
        mpt_rating,
        mpt_cost,
        topside_mass,
        topside_cost,
        shunt_reactor_cost,
        switchgear_costs,
        ancillary_system_costs,
        land_assembly_cost,
        substructure_mass,
        substructure_length,
        substructure_cost,
        substation_cost,
    };

    (result, costs)
}
