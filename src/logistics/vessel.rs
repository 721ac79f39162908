//! Installation vessels and their deck storage.

use crate::config::{ConfigError, VesselConfig};
use crate::marshalling::{Category, Component};

/// An installation vessel waiting to load at a port.
#[derive(Debug, Clone)]
pub struct Vessel {
    /// Vessel name used in logs and reports.
    pub name: String,
    /// Deck storage.
    pub storage: VesselStorage,
    /// Categories loaded together as one set.
    pub cargo_set: Vec<Category>,
}

impl Vessel {
    /// Builds an empty vessel from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a cargo label is empty.
    ///
    /// # Panics
    ///
    /// Panics if a capacity limit is not positive; run
    /// [`crate::config::ProjectConfig::validate`] first.
    pub fn from_config(cfg: &VesselConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            name: cfg.name.clone(),
            storage: VesselStorage::new(cfg.max_deck_space, cfg.max_cargo_weight),
            cargo_set: cfg.cargo_set()?,
        })
    }
}

/// Deck storage of an installation vessel.
///
/// Tracks used deck space and cargo weight against fixed limits.
#[derive(Debug, Clone)]
pub struct VesselStorage {
    max_deck_space: f64,
    max_cargo_weight: f64,
    current_deck_space: f64,
    current_cargo_weight: f64,
    items: Vec<Component>,
}

impl VesselStorage {
    /// Creates empty storage with the given limits.
    ///
    /// # Panics
    ///
    /// Panics if either limit is not positive.
    pub fn new(max_deck_space: f64, max_cargo_weight: f64) -> Self {
        assert!(max_deck_space > 0.0, "max_deck_space must be > 0");
        assert!(max_cargo_weight > 0.0, "max_cargo_weight must be > 0");
        Self {
            max_deck_space,
            max_cargo_weight,
            current_deck_space: 0.0,
            current_cargo_weight: 0.0,
            items: Vec::new(),
        }
    }

    pub fn max_deck_space(&self) -> f64 {
        self.max_deck_space
    }

    pub fn max_cargo_weight(&self) -> f64 {
        self.max_cargo_weight
    }

    pub fn current_deck_space(&self) -> f64 {
        self.current_deck_space
    }

    pub fn current_cargo_weight(&self) -> f64 {
        self.current_cargo_weight
    }

    /// Components currently on deck, in loading order.
    pub fn items(&self) -> &[Component] {
        &self.items
    }

    /// Returns `true` if `set` fits in the remaining deck space and weight.
    pub fn fits<'a>(&self, set: impl IntoIterator<Item = &'a Component>) -> bool {
        let (deck, weight) = set
            .into_iter()
            .fold((0.0, 0.0), |(d, w), c| (d + c.deck_space, w + c.weight));
        self.current_deck_space + deck <= self.max_deck_space
            && self.current_cargo_weight + weight <= self.max_cargo_weight
    }

    /// Stows a component on deck. Callers check [`Self::fits`] first.
    pub fn put_item(&mut self, item: Component) {
        self.current_deck_space += item.deck_space;
        self.current_cargo_weight += item.weight;
        self.items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    #[test]
    fn vessel_from_config() {
        let cfg = ProjectConfig::baseline();
        let vessel = cfg.vessels.first().map(Vessel::from_config);
        let vessel = vessel.and_then(Result::ok);
        assert_eq!(vessel.as_ref().map(|v| v.cargo_set.len()), Some(2));
        assert_eq!(
            vessel.as_ref().map(|v| v.storage.max_cargo_weight()),
            Some(8_000.0)
        );
    }

    #[test]
    fn put_item_accumulates_usage() {
        let mut storage = VesselStorage::new(10.0, 100.0);
        storage.put_item(Component::new(Category::Tower, 2.0, 30.0));
        storage.put_item(Component::new(Category::Nacelle, 3.0, 40.0));
        assert_eq!(storage.current_deck_space(), 5.0);
        assert_eq!(storage.current_cargo_weight(), 70.0);
        assert_eq!(storage.items().len(), 2);
    }

    #[test]
    fn fits_checks_both_limits() {
        let mut storage = VesselStorage::new(10.0, 100.0);
        storage.put_item(Component::new(Category::Tower, 8.0, 10.0));

        assert!(storage.fits(&[Component::new(Category::Blade, 2.0, 90.0)]));
        assert!(!storage.fits(&[Component::new(Category::Blade, 3.0, 1.0)]));
        assert!(!storage.fits(&[Component::new(Category::Blade, 1.0, 91.0)]));
    }

    #[test]
    #[should_panic]
    fn zero_deck_space_panics() {
        VesselStorage::new(0.0, 100.0);
    }
}
