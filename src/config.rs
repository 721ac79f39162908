//! TOML-based project configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::logistics::FastenTimes;
use crate::marshalling::Category;

/// Top-level project configuration parsed from TOML.
///
/// The `site`, `plant`, and `turbine` sections are required; every other
/// section falls back to its defaults. Load from TOML with
/// [`ProjectConfig::from_toml_file`] or start from a preset with
/// [`ProjectConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Site conditions.
    pub site: SiteConfig,
    /// Plant layout.
    pub plant: PlantConfig,
    /// Turbine parameters.
    pub turbine: TurbineConfig,
    /// Substation cost-rate overrides.
    #[serde(default)]
    pub substation_design: SubstationDesignConfig,
    /// Marshalling port parameters.
    #[serde(default)]
    pub port: PortConfig,
    /// Per-category fastening durations (h).
    #[serde(default)]
    pub fasten_times: FastenTimes,
    /// Installation vessels loading at the port.
    #[serde(default)]
    pub vessels: Vec<VesselConfig>,
    /// Run-level settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Site conditions.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Water depth (m).
    pub depth: f64,
}

/// Plant layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantConfig {
    /// Number of turbines in the plant.
    pub num_turbines: u32,
}

/// Turbine parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurbineConfig {
    /// Rated power of one turbine (MW).
    pub turbine_rating: f64,
}

/// Substation cost rates. Every field is optional in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstationDesignConfig {
    /// Main power transformer cost rate ($/MVA).
    pub mpt_cost_rate: f64,
    /// Topside fabrication cost rate ($/t).
    pub topside_fab_cost_rate: f64,
    /// Fixed topside design cost ($).
    pub topside_design_cost: f64,
    /// Shunt reactor cost rate ($/MVA).
    pub shunt_cost_rate: f64,
    /// Switchgear cost per MPT ($).
    pub switchgear_cost: f64,
    /// Backup generator cost ($).
    pub backup_gen_cost: f64,
    /// Workspace and accommodation cost ($).
    pub workspace_cost: f64,
    /// Other ancillary systems cost ($).
    pub other_ancillary_cost: f64,
    /// Onshore assembly cost as a fraction of equipment cost.
    pub topside_assembly_factor: f64,
    /// Jacket cost rate ($/t).
    pub substation_jacket_cost_rate: f64,
    /// Pile cost rate ($/t).
    pub substation_pile_cost_rate: f64,
    /// Number of offshore substations.
    pub num_substations: u32,
    /// Design phase duration (h).
    pub design_time: f64,
}

impl Default for SubstationDesignConfig {
    fn default() -> Self {
        Self {
            mpt_cost_rate: 12_500.0,
            topside_fab_cost_rate: 14_500.0,
            topside_design_cost: 4.5e6,
            shunt_cost_rate: 35_000.0,
            switchgear_cost: 1.45e6,
            backup_gen_cost: 1e6,
            workspace_cost: 2e6,
            other_ancillary_cost: 3e6,
            topside_assembly_factor: 0.075,
            substation_jacket_cost_rate: 6_250.0,
            substation_pile_cost_rate: 2_250.0,
            num_substations: 1,
            design_time: 0.0,
        }
    }
}

/// Marshalling port parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortConfig {
    /// Port name used in logs.
    pub name: String,
    /// Number of cranes available for loading (must be > 0).
    pub num_cranes: usize,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            name: "Marshalling Port".to_string(),
            num_cranes: 1,
        }
    }
}

/// One installation vessel.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VesselConfig {
    /// Vessel name used in logs and reports.
    pub name: String,
    /// Usable deck space (m^2).
    pub max_deck_space: f64,
    /// Maximum cargo weight (t).
    pub max_cargo_weight: f64,
    /// Category labels loaded together as one set.
    #[serde(default = "default_cargo_set")]
    pub cargo: Vec<String>,
}

fn default_cargo_set() -> Vec<String> {
    vec![
        Category::Topside.label().to_string(),
        Category::Monopile.label().to_string(),
    ]
}

impl VesselConfig {
    /// Parses the configured cargo labels into categories.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first empty label.
    pub fn cargo_set(&self) -> Result<Vec<Category>, ConfigError> {
        self.cargo
            .iter()
            .enumerate()
            .map(|(i, label)| {
                Category::new(label.as_str()).map_err(|e| ConfigError {
                    field: format!("vessels.{}.cargo[{i}]", self.name),
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

/// Run-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Log verbosity: `"error"`, `"warn"`, `"info"`, `"debug"`, or `"trace"`.
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"plant.num_turbines"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ProjectConfig {
    /// Returns the baseline project: 50 x 12 MW turbines in 30 m of water,
    /// one substation, one crane, one heavy-lift vessel.
    pub fn baseline() -> Self {
        Self {
            site: SiteConfig { depth: 30.0 },
            plant: PlantConfig { num_turbines: 50 },
            turbine: TurbineConfig {
                turbine_rating: 12.0,
            },
            substation_design: SubstationDesignConfig::default(),
            port: PortConfig::default(),
            fasten_times: FastenTimes::default(),
            vessels: vec![VesselConfig {
                name: "Heavy Lift Vessel".to_string(),
                max_deck_space: 100.0,
                max_cargo_weight: 8_000.0,
                cargo: default_cargo_set(),
            }],
            simulation: SimulationConfig::default(),
        }
    }

    /// Returns the twin-substation preset: a larger plant split across two
    /// substations, loaded by two vessels sharing two cranes.
    pub fn twin_substation() -> Self {
        let vessel = |name: &str| VesselConfig {
            name: name.to_string(),
            max_deck_space: 100.0,
            max_cargo_weight: 12_000.0,
            cargo: default_cargo_set(),
        };
        Self {
            site: SiteConfig { depth: 45.0 },
            plant: PlantConfig { num_turbines: 100 },
            turbine: TurbineConfig {
                turbine_rating: 15.0,
            },
            substation_design: SubstationDesignConfig {
                num_substations: 2,
                design_time: 720.0,
                ..SubstationDesignConfig::default()
            },
            port: PortConfig {
                num_cranes: 2,
                ..PortConfig::default()
            },
            fasten_times: FastenTimes::default(),
            vessels: vec![vessel("Heavy Lift Vessel A"), vessel("Heavy Lift Vessel B")],
            simulation: SimulationConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "twin_substation"];

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "twin_substation" => Ok(Self::twin_substation()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a project from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "project".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, misses a required key,
    /// or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &str, message: &str| {
            if !ok {
                errors.push(ConfigError {
                    field: field.into(),
                    message: message.into(),
                });
            }
        };

        check(self.site.depth > 0.0, "site.depth", "must be > 0");
        check(
            self.plant.num_turbines > 0,
            "plant.num_turbines",
            "must be > 0",
        );
        check(
            self.turbine.turbine_rating > 0.0,
            "turbine.turbine_rating",
            "must be > 0",
        );

        let sd = &self.substation_design;
        check(
            sd.num_substations > 0,
            "substation_design.num_substations",
            "must be > 0",
        );
        check(
            sd.design_time >= 0.0,
            "substation_design.design_time",
            "must be >= 0",
        );
        check(
            (0.0..=1.0).contains(&sd.topside_assembly_factor),
            "substation_design.topside_assembly_factor",
            "must be in [0.0, 1.0]",
        );

        check(self.port.num_cranes > 0, "port.num_cranes", "must be > 0");

        let ft = &self.fasten_times;
        check(
            ft.all().iter().all(|&h| h >= 0.0),
            "fasten_times",
            "durations must be >= 0",
        );

        let level = self.simulation.log_level.as_str();
        check(
            crate::logging::parse_level(level).is_some(),
            "simulation.log_level",
            "must be one of error, warn, info, debug, trace",
        );

        for v in &self.vessels {
            if v.max_deck_space <= 0.0 {
                errors.push(ConfigError {
                    field: format!("vessels.{}.max_deck_space", v.name),
                    message: "must be > 0".into(),
                });
            }
            if v.max_cargo_weight <= 0.0 {
                errors.push(ConfigError {
                    field: format!("vessels.{}.max_cargo_weight", v.name),
                    message: "must be > 0".into(),
                });
            }
            if v.cargo.is_empty() {
                errors.push(ConfigError {
                    field: format!("vessels.{}.cargo", v.name),
                    message: "must list at least one category".into(),
                });
            }
            match v.cargo_set() {
                Ok(set) => {
                    for c in set.iter().filter(|c| c.is_custom()) {
                        errors.push(ConfigError {
                            field: format!("vessels.{}.cargo", v.name),
                            message: format!("no fastening task for custom category \"{c}\""),
                        });
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        errors
    }
}
