//! Design outputs: result mapping and cost breakdown.

use std::fmt;

use serde::Serialize;

use crate::marshalling::{Category, Component};

/// Substation topside handed to installation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopsideSpec {
    #[serde(rename = "type")]
    pub kind: Category,
    /// Deck space on an installation vessel (m^2).
    pub deck_space: f64,
    /// Mass (t).
    pub weight: f64,
}

/// Substation substructure handed to installation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstructureSpec {
    #[serde(rename = "type")]
    pub kind: Category,
    /// Deck space on an installation vessel (m^2).
    pub deck_space: f64,
    /// Mass (t).
    pub weight: f64,
    /// Length (m).
    pub length: f64,
}

/// Result mapping of the substation design phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignResult {
    pub num_substations: u32,
    pub offshore_substation_topside: TopsideSpec,
    pub offshore_substation_substructure: SubstructureSpec,
}

impl DesignResult {
    /// Builds the cargo to stage at port: one topside and one substructure
    /// per substation, topside first.
    pub fn substation_cargo(&self) -> Vec<Component> {
        let top = &self.offshore_substation_topside;
        let sub = &self.offshore_substation_substructure;
        (0..self.num_substations)
            .flat_map(|_| {
                [
                    Component::new(top.kind.clone(), top.deck_space, top.weight),
                    Component::new(sub.kind.clone(), sub.deck_space, sub.weight)
                        .with_length(sub.length),
                ]
            })
            .collect()
    }
}

/// Intermediate quantities and costs of one substation design run.
///
/// Costs are in USD; `substation_cost` covers every substation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstationCosts {
    /// Number of main power transformers per substation.
    pub num_mpt: f64,
    /// Rating of each MPT (MVA), rounded to the nearest 10.
    pub mpt_rating: f64,
    pub mpt_cost: f64,
    pub topside_mass: f64,
    pub topside_cost: f64,
    pub shunt_reactor_cost: f64,
    pub switchgear_costs: f64,
    pub ancillary_system_costs: f64,
    pub land_assembly_cost: f64,
    pub substructure_mass: f64,
    pub substructure_length: f64,
    pub substructure_cost: f64,
    pub substation_cost: f64,
}

impl fmt::Display for SubstationCosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Substation Design ---")?;
        writeln!(
            f,
            "MPTs:                  {} x {:.0} MVA",
            self.num_mpt, self.mpt_rating
        )?;
        writeln!(f, "MPT cost:              ${:.0}", self.mpt_cost)?;
        writeln!(
            f,
            "Topside:               {:.1} t, ${:.0}",
            self.topside_mass, self.topside_cost
        )?;
        writeln!(f, "Shunt reactors:        ${:.0}", self.shunt_reactor_cost)?;
        writeln!(f, "Switchgear:            ${:.0}", self.switchgear_costs)?;
        writeln!(f, "Ancillary systems:     ${:.0}", self.ancillary_system_costs)?;
        writeln!(f, "Land assembly:         ${:.0}", self.land_assembly_cost)?;
        writeln!(
            f,
            "Substructure:          {:.1} t, {:.1} m, ${:.0}",
            self.substructure_mass, self.substructure_length, self.substructure_cost
        )?;
        write!(f, "Total substation cost: ${:.0}", self.substation_cost)
    }
}
