//! Loading installation vessels from a shared port.

use std::fmt;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::marshalling::{Cargo, Category, Component, ItemNotFound, Port};

use super::tasks::FastenTimes;
use super::vessel::{Vessel, VesselStorage};

/// Pause between crane requests while every crane is busy.
const CRANE_RETRY: Duration = Duration::from_millis(5);

/// What happened during one loading step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadAction {
    /// An item was claimed from the port.
    ItemRetrieved,
    /// An item was secured to the deck.
    FastenItem,
    /// The next set did not fit and loading stopped.
    VesselFull,
}

impl fmt::Display for LoadAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ItemRetrieved => "ItemRetrieved",
            Self::FastenItem => "FastenItem",
            Self::VesselFull => "VesselFull",
        })
    }
}

/// One record in a vessel's loading log.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadEvent {
    /// Vessel performing the action.
    pub agent: String,
    pub action: LoadAction,
    /// Category acted on, if any.
    pub target: Option<Category>,
    /// Simulated duration of the action (h).
    pub duration_hr: f64,
    /// Port where the action took place.
    pub location: String,
}

/// Outcome of loading one vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Vessel name.
    pub vessel: String,
    /// Port name.
    pub location: String,
    /// Number of complete sets loaded.
    pub sets_loaded: usize,
    /// Ordered loading log.
    pub events: Vec<LoadEvent>,
    /// Deck usage when loading ended.
    pub deck: DeckUsage,
}

/// Deck space and cargo weight in use against the vessel's limits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeckUsage {
    /// Used deck space (m^2).
    pub deck_space: f64,
    pub max_deck_space: f64,
    /// Cargo on deck (t).
    pub cargo_weight: f64,
    pub max_cargo_weight: f64,
}

impl DeckUsage {
    fn of(storage: &VesselStorage) -> Self {
        Self {
            deck_space: storage.current_deck_space(),
            max_deck_space: storage.max_deck_space(),
            cargo_weight: storage.current_cargo_weight(),
            max_cargo_weight: storage.max_cargo_weight(),
        }
    }
}

impl LoadReport {
    fn new(vessel: &str, location: &str) -> Self {
        Self {
            vessel: vessel.to_string(),
            location: location.to_string(),
            sets_loaded: 0,
            events: Vec::new(),
            deck: DeckUsage::default(),
        }
    }

    fn record(&mut self, action: LoadAction, target: Option<Category>, duration_hr: f64) {
        self.events.push(LoadEvent {
            agent: self.vessel.clone(),
            action,
            target,
            duration_hr,
            location: self.location.clone(),
        });
    }

    /// Total time spent fastening cargo (h).
    pub fn total_fasten_hr(&self) -> f64 {
        self.events
            .iter()
            .filter(|e| e.action == LoadAction::FastenItem)
            .map(|e| e.duration_hr)
            .sum()
    }

    /// Number of items fastened to the deck.
    pub fn items_loaded(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.action == LoadAction::FastenItem)
            .count()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Load Report: {} ---", self.vessel)?;
        writeln!(f, "Port:             {}", self.location)?;
        writeln!(f, "Sets loaded:      {}", self.sets_loaded)?;
        writeln!(f, "Items loaded:     {}", self.items_loaded())?;
        writeln!(
            f,
            "Deck space:       {:.1} / {:.1} m^2",
            self.deck.deck_space, self.deck.max_deck_space
        )?;
        writeln!(
            f,
            "Cargo weight:     {:.1} / {:.1} t",
            self.deck.cargo_weight, self.deck.max_cargo_weight
        )?;
        write!(f, "Fasten time:      {:.1} h", self.total_fasten_hr())
    }
}

/// Reasons a vessel could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The port had none of a requested category and the vessel is empty.
    ItemNotFound(ItemNotFound),
    /// A single set exceeds the capacity of the empty vessel.
    VesselCapacity {
        vessel: String,
        categories: Vec<Category>,
    },
    /// Every crane at the port is busy.
    NoCraneAvailable { port: String },
    /// No fastening task is known for the category.
    UnknownFastenTask(Category),
    /// The vessel was asked to load sets with no categories in them.
    EmptyCargoSet { vessel: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemNotFound(e) => write!(f, "{e}"),
            Self::VesselCapacity { vessel, categories } => {
                let labels: Vec<&str> = categories.iter().map(Category::label).collect();
                write!(
                    f,
                    "vessel \"{vessel}\" cannot carry one set of [{}]",
                    labels.join(", ")
                )
            }
            Self::NoCraneAvailable { port } => write!(f, "no crane available at \"{port}\""),
            Self::UnknownFastenTask(c) => write!(f, "no fastening task for category \"{c}\""),
            Self::EmptyCargoSet { vessel } => {
                write!(f, "vessel \"{vessel}\" has an empty cargo set")
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<ItemNotFound> for LoadError {
    fn from(e: ItemNotFound) -> Self {
        Self::ItemNotFound(e)
    }
}

/// Loads whole sets of `cargo_set` from `port` onto `storage` until the port
/// runs out of a category or the next set does not fit.
///
/// Each set is claimed atomically, so concurrent loaders never split a set.
/// A set that does not fit is never taken from the port.
///
/// # Errors
///
/// - [`LoadError::EmptyCargoSet`] if `cargo_set` is empty.
/// - [`LoadError::NoCraneAvailable`] if every crane is in use.
/// - [`LoadError::UnknownFastenTask`] if a category has no fastening task.
///   Nothing is taken from the port.
/// - [`LoadError::ItemNotFound`] if the first set cannot be claimed.
/// - [`LoadError::VesselCapacity`] if the first set does not fit on the empty deck.
///
/// Once the deck holds cargo, a miss or a full deck ends loading normally.
pub fn load_vessel(
    port: &Port<Component>,
    vessel: &str,
    storage: &mut VesselStorage,
    cargo_set: &[Category],
    fasten_times: &FastenTimes,
) -> Result<LoadReport, LoadError> {
    if cargo_set.is_empty() {
        return Err(LoadError::EmptyCargoSet {
            vessel: vessel.to_string(),
        });
    }

    let durations = cargo_set
        .iter()
        .map(|c| {
            fasten_times
                .fasten_time(c)
                .ok_or_else(|| LoadError::UnknownFastenTask(c.clone()))
        })
        .collect::<Result<Vec<f64>, LoadError>>()?;

    let _crane = port
        .try_acquire_crane()
        .ok_or_else(|| LoadError::NoCraneAvailable {
            port: port.name().to_string(),
        })?;

    let mut report = LoadReport::new(vessel, port.name());

    loop {
        let claimed = port.get_items_if(cargo_set, |set| storage.fits(set.iter().copied()));
        let set = match claimed {
            Ok(Some(set)) => set,
            Ok(None) => {
                debug!(target: "logistics", "{vessel} is full");
                report.record(LoadAction::VesselFull, None, 0.0);
                if storage.items().is_empty() {
                    return Err(LoadError::VesselCapacity {
                        vessel: vessel.to_string(),
                        categories: cargo_set.to_vec(),
                    });
                }
                break;
            }
            Err(e) if !storage.items().is_empty() => {
                debug!(target: "logistics", "{vessel}: port has no more {}", e.category);
                break;
            }
            Err(e) => return Err(e.into()),
        };

        for (item, &duration) in set.into_iter().zip(&durations) {
            let category = item.category().clone();
            report.record(LoadAction::ItemRetrieved, Some(category.clone()), 0.0);
            storage.put_item(item);
            info!(
                target: "logistics",
                "{vessel}: fastened {category} in {duration:.1} h at {}",
                port.name()
            );
            report.record(LoadAction::FastenItem, Some(category), duration);
        }
        report.sets_loaded += 1;
    }

    report.deck = DeckUsage::of(storage);
    Ok(report)
}

/// Loads every vessel in `fleet` concurrently, one thread per vessel.
///
/// A vessel that finds every crane busy sleeps briefly and retries until
/// one frees up. Results are returned in fleet order.
pub fn load_fleet(
    port: &Port<Component>,
    fleet: &mut [Vessel],
    fasten_times: &FastenTimes,
) -> Vec<Result<LoadReport, LoadError>> {
    thread::scope(|s| {
        let handles: Vec<_> = fleet
            .iter_mut()
            .map(|vessel| {
                s.spawn(move || loop {
                    match load_vessel(
                        port,
                        &vessel.name,
                        &mut vessel.storage,
                        &vessel.cargo_set,
                        fasten_times,
                    ) {
                        Err(LoadError::NoCraneAvailable { .. }) => thread::sleep(CRANE_RETRY),
                        other => break other,
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marshalling::Entry;

    fn custom(label: &str) -> Category {
        Category::new(label).expect("non-empty label")
    }

    fn substation_set() -> Vec<Category> {
        vec![Category::Topside, Category::Monopile]
    }

    fn stage(port: &Port<Component>, sets: usize) {
        for _ in 0..sets {
            port.put(Component::new(Category::Topside, 1.0, 3000.0));
            port.put(Component::new(Category::Monopile, 1.0, 1500.0));
        }
    }

    #[test]
    fn loads_sets_until_vessel_is_full() {
        let port = Port::new("Quay");
        stage(&port, 3);
        let mut storage = VesselStorage::new(100.0, 9500.0);

        let report = load_vessel(
            &port,
            "HLV",
            &mut storage,
            &substation_set(),
            &FastenTimes::default(),
        );
        let report = report.ok();
        assert_eq!(report.as_ref().map(|r| r.sets_loaded), Some(2));
        assert_eq!(report.as_ref().map(|r| r.items_loaded()), Some(4));
        assert_eq!(report.as_ref().map(LoadReport::total_fasten_hr), Some(48.0));
        assert_eq!(storage.current_cargo_weight(), 9000.0);
        assert_eq!(
            report.map(|r| r.deck),
            Some(DeckUsage {
                deck_space: 4.0,
                max_deck_space: 100.0,
                cargo_weight: 9000.0,
                max_cargo_weight: 9500.0,
            })
        );
        // the set that did not fit stays at the port
        assert_eq!(port.len(), 2);
    }

    #[test]
    fn stops_when_port_runs_out() {
        let port = Port::new("Quay");
        stage(&port, 1);
        let mut storage = VesselStorage::new(100.0, 100_000.0);

        let report = load_vessel(
            &port,
            "HLV",
            &mut storage,
            &substation_set(),
            &FastenTimes::default(),
        );
        assert_eq!(report.map(|r| r.sets_loaded), Ok(1));
        assert!(port.is_empty());
    }

    #[test]
    fn empty_vessel_and_missing_cargo_is_item_not_found() {
        let port = Port::new("Quay");
        port.put(Component::new(Category::Topside, 1.0, 3000.0));
        let mut storage = VesselStorage::new(100.0, 100_000.0);

        let err = load_vessel(
            &port,
            "HLV",
            &mut storage,
            &substation_set(),
            &FastenTimes::default(),
        );
        assert_eq!(
            err,
            Err(LoadError::ItemNotFound(ItemNotFound {
                category: Category::Monopile
            }))
        );
        assert_eq!(port.len(), 1);
    }

    #[test]
    fn oversized_set_is_capacity_error_and_left_at_port() {
        let port = Port::new("Quay");
        stage(&port, 1);
        let mut storage = VesselStorage::new(100.0, 1000.0);

        let err = load_vessel(
            &port,
            "Barge",
            &mut storage,
            &substation_set(),
            &FastenTimes::default(),
        );
        assert!(matches!(err, Err(LoadError::VesselCapacity { .. })));
        assert_eq!(port.len(), 2);
        assert_eq!(port.count(&Category::Topside), 1);
    }

    #[test]
    fn unknown_task_takes_nothing() {
        let port = Port::new("Quay");
        port.put(Component::new(custom("Spool"), 1.0, 10.0));
        let mut storage = VesselStorage::new(100.0, 1000.0);

        let err = load_vessel(
            &port,
            "HLV",
            &mut storage,
            &[custom("Spool")],
            &FastenTimes::default(),
        );
        assert!(matches!(err, Err(LoadError::UnknownFastenTask(_))));
        assert_eq!(port.len(), 1);
    }

    #[test]
    fn busy_crane_is_reported() {
        let port = Port::new("Quay");
        stage(&port, 1);
        let _held = port.try_acquire_crane();
        let mut storage = VesselStorage::new(100.0, 100_000.0);

        let err = load_vessel(
            &port,
            "HLV",
            &mut storage,
            &substation_set(),
            &FastenTimes::default(),
        );
        assert_eq!(
            err,
            Err(LoadError::NoCraneAvailable {
                port: "Quay".to_string()
            })
        );
        assert_eq!(port.len(), 2);
    }

    #[test]
    fn untagged_entries_are_left_behind() {
        let port = Port::new("Quay");
        port.put(Entry::Untagged("dunnage".to_string()));
        stage(&port, 1);
        let mut storage = VesselStorage::new(100.0, 100_000.0);

        let report = load_vessel(
            &port,
            "HLV",
            &mut storage,
            &substation_set(),
            &FastenTimes::default(),
        );
        assert_eq!(report.map(|r| r.sets_loaded), Ok(1));
        assert_eq!(port.len(), 1);
    }

    #[test]
    fn report_display_shows_deck_usage() {
        let port = Port::new("Quay");
        stage(&port, 1);
        let mut storage = VesselStorage::new(100.0, 100_000.0);
        let report = load_vessel(
            &port,
            "HLV",
            &mut storage,
            &substation_set(),
            &FastenTimes::default(),
        );
        let s = report.map(|r| r.to_string()).unwrap_or_default();
        assert!(s.contains("HLV"));
        assert!(s.contains("Cargo weight:     4500.0 / 100000.0 t"));
    }

    #[test]
    fn empty_cargo_set_is_rejected_without_taking_a_crane() {
        let port = Port::new("Quay");
        stage(&port, 1);
        let mut storage = VesselStorage::new(100.0, 100_000.0);

        let err = load_vessel(&port, "HLV", &mut storage, &[], &FastenTimes::default());
        assert_eq!(
            err,
            Err(LoadError::EmptyCargoSet {
                vessel: "HLV".to_string()
            })
        );
        assert_eq!(port.len(), 2);
        assert!(port.try_acquire_crane().is_some());
    }

    #[test]
    fn fleet_with_empty_cargo_set_still_finishes() {
        let port = Port::new("Quay");
        stage(&port, 1);
        let mut fleet = vec![
            Vessel {
                name: "Idle".to_string(),
                storage: VesselStorage::new(100.0, 100_000.0),
                cargo_set: Vec::new(),
            },
            Vessel {
                name: "HLV".to_string(),
                storage: VesselStorage::new(100.0, 100_000.0),
                cargo_set: substation_set(),
            },
        ];

        let outcomes = load_fleet(&port, &mut fleet, &FastenTimes::default());
        assert!(matches!(outcomes[0], Err(LoadError::EmptyCargoSet { .. })));
        assert_eq!(outcomes[1].as_ref().map(|r| r.sets_loaded), Ok(1));
        assert!(port.is_empty());
    }
}
