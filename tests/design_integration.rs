//! Integration tests for the offshore substation design phase.

mod common;

use bos_sim::config::ProjectConfig;
use bos_sim::design::{DesignError, DesignPhase, OffshoreSubstationDesign};
use bos_sim::marshalling::{Cargo, Category, Port};

#[test]
fn results_are_guarded_until_run() {
    let cfg = ProjectConfig::baseline();
    let design = OffshoreSubstationDesign::new(&cfg);

    assert_eq!(design.design_result().err(), Some(DesignError::NotRun));
    assert_eq!(design.total_phase_cost(), Err(DesignError::NotRun));
    assert_eq!(design.total_phase_time(), 0.0);
}

#[test]
fn design_time_is_readable_before_run() {
    let cfg = ProjectConfig::twin_substation();
    let design = OffshoreSubstationDesign::new(&cfg);
    assert_eq!(design.total_phase_time(), 720.0);
}

#[test]
fn rerun_is_idempotent() {
    let cfg = ProjectConfig::baseline();
    let mut design = OffshoreSubstationDesign::new(&cfg);
    design.run();
    let first = design.design_result().cloned();
    let cost = design.total_phase_cost();

    design.run();
    assert_eq!(design.design_result().cloned(), first);
    assert_eq!(design.total_phase_cost(), cost);
    assert!(cost.is_ok_and(|c| c > 0.0));
}

#[test]
fn result_serializes_with_type_keys() {
    let cfg = ProjectConfig::baseline();
    let mut design = OffshoreSubstationDesign::new(&cfg);
    design.run();
    let Ok(result) = design.design_result() else {
        panic!("design should have run");
    };

    let json = serde_json::to_value(result).unwrap_or_default();
    let topside = &json["offshore_substation_topside"];
    let substructure = &json["offshore_substation_substructure"];
    assert_eq!(topside["type"], "Topside");
    assert!(topside["deck_space"].is_number());
    assert!(topside["weight"].is_number());
    assert_eq!(substructure["type"], "Monopile");
    assert_eq!(substructure["length"], 40.0);
}

#[test]
fn design_output_stages_at_port() {
    let cfg = ProjectConfig::twin_substation();
    let mut design = OffshoreSubstationDesign::new(&cfg);
    design.run();
    let Ok(result) = design.design_result() else {
        panic!("design should have run");
    };

    let port = Port::new("Marshalling Yard");
    for item in result.substation_cargo() {
        port.put(item);
    }
    assert_eq!(port.count(&Category::Topside), 2);
    assert_eq!(port.count(&Category::Monopile), 2);

    let topside = port.get_item(&Category::Topside);
    assert_eq!(
        topside.as_ref().map(|c| c.category().clone()),
        Ok(Category::Topside)
    );
    assert_eq!(
        topside.map(|c| c.weight),
        Ok(result.offshore_substation_topside.weight)
    );
}
