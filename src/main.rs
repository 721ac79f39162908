//! bos-sim entry point: config loading, substation design, and port loadout.

use std::process;

use log::{LevelFilter, info, warn};

use bos_sim::cli::{self, CliCommand};
use bos_sim::config::ProjectConfig;
use bos_sim::design::{DesignPhase, OffshoreSubstationDesign};
use bos_sim::io::export::{export_csv, export_design_json};
use bos_sim::logging;
use bos_sim::logistics::{LoadReport, Vessel, load_fleet};
use bos_sim::marshalling::{Component, Port};

fn load_config(opts: &cli::CliOptions) -> Result<ProjectConfig, String> {
    // --scenario takes priority, then --preset
    let mut cfg = if let Some(ref path) = opts.scenario {
        ProjectConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else {
        let name = opts.preset.as_deref().unwrap_or("baseline");
        ProjectConfig::from_preset(name).map_err(|e| e.to_string())?
    };

    if let Some(ref level) = opts.log_level {
        cfg.simulation.log_level = level.clone();
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        let lines: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(lines.join("\n"));
    }
    Ok(cfg)
}

fn main() {
    let opts = match cli::parse_args() {
        Ok(CliCommand::Run(opts)) => opts,
        Ok(CliCommand::Help) => {
            cli::print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    let cfg = match load_config(&opts) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let level = logging::parse_level(&cfg.simulation.log_level).unwrap_or(LevelFilter::Info);
    if let Err(e) = logging::init(level) {
        eprintln!("warning: logger already installed: {e}");
    }

    // Design
    let mut design = OffshoreSubstationDesign::new(&cfg);
    design.run();
    let (result, costs) = match (design.design_result(), design.costs()) {
        (Ok(result), Ok(costs)) => (result, costs),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    println!("{costs}");
    println!("Design time:           {:.1} h", design.total_phase_time());

    if let Some(ref path) = opts.design_out {
        if let Err(e) = export_design_json(result, costs, design.total_phase_time(), path) {
            eprintln!("error: failed to write design JSON: {e}");
            process::exit(1);
        }
        eprintln!("Design written to {}", path.display());
    }

    // Stage substation cargo at port
    let port: Port<Component> = Port::with_cranes(cfg.port.name.as_str(), cfg.port.num_cranes);
    for item in result.substation_cargo() {
        port.put(item);
    }
    info!(
        target: "bos_sim",
        "staged {} items at {} ({} cranes)",
        port.len(),
        port.name(),
        port.num_cranes()
    );

    // Load vessels
    let mut fleet = match cfg
        .vessels
        .iter()
        .map(Vessel::from_config)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(fleet) => fleet,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let outcomes = load_fleet(&port, &mut fleet, &cfg.fasten_times);
    let mut reports: Vec<LoadReport> = Vec::with_capacity(outcomes.len());
    for (vessel, outcome) in fleet.iter().zip(outcomes) {
        match outcome {
            Ok(report) => {
                println!("\n{report}");
                reports.push(report);
            }
            Err(e) => warn!(target: "bos_sim", "{}: not loaded: {e}", vessel.name),
        }
    }
    println!("\nItems left at {}: {}", port.name(), port.len());

    if let Some(ref path) = opts.load_log_out {
        if let Err(e) = export_csv(&reports, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Load log written to {}", path.display());
    }
}
