//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use bos_sim::marshalling::{Category, Component, Port};

/// A component with unit deck space and the given weight.
pub fn component(category: Category, weight: f64) -> Component {
    Component::new(category, 1.0, weight)
}

/// A caller-defined category.
pub fn custom(label: &str) -> Category {
    Category::new(label).expect("non-empty label")
}

/// Empty single-crane port.
pub fn empty_port() -> Port<Component> {
    Port::new("Test Port")
}

/// Port holding `sets` substation sets (topside 3000 t, monopile 1500 t).
pub fn staged_port(sets: usize, cranes: usize) -> Port<Component> {
    let port = Port::with_cranes("Test Port", cranes);
    for _ in 0..sets {
        port.put(component(Category::Topside, 3000.0));
        port.put(component(Category::Monopile, 1500.0));
    }
    port
}

/// The topside-plus-substructure set loaded by substation vessels.
pub fn substation_set() -> Vec<Category> {
    vec![Category::Topside, Category::Monopile]
}
