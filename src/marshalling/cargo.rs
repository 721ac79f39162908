//! Cargo items tracked by a port.

use super::category::Category;

/// A unit of installation material that can be looked up by category.
///
/// Implementors must return the same category for the whole lifetime of the
/// value; the port relies on this when matching.
pub trait Cargo {
    /// Returns the category used for port lookup.
    fn category(&self) -> &Category;
}

/// A physical installation component awaiting transport.
///
/// This is the cargo type the simulation stages at a port: monopiles,
/// transition pieces, topsides, turbine sections, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    category: Category,
    /// Deck space the component occupies on a vessel (m^2).
    pub deck_space: f64,
    /// Component mass (t).
    pub weight: f64,
    /// Overall length (m), where it matters for the component kind.
    pub length: Option<f64>,
}

impl Component {
    /// Creates a new component.
    ///
    /// # Panics
    ///
    /// Panics if `deck_space` or `weight` is negative.
    pub fn new(category: Category, deck_space: f64, weight: f64) -> Self {
        assert!(deck_space >= 0.0, "deck_space must be >= 0");
        assert!(weight >= 0.0, "weight must be >= 0");
        Self {
            category,
            deck_space,
            weight,
            length: None,
        }
    }

    /// Sets the component length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }
}

impl Cargo for Component {
    fn category(&self) -> &Category {
        &self.category
    }
}

/// A value stored in a port.
///
/// `Untagged` entries carry no category. They occupy space in the port but
/// are never returned by a category lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    Cargo(T),
    Untagged(String),
}

impl<T: Cargo> Entry<T> {
    /// Returns the category of a cargo entry, or `None` for untagged entries.
    pub fn category(&self) -> Option<&Category> {
        match self {
            Self::Cargo(item) => Some(item.category()),
            Self::Untagged(_) => None,
        }
    }
}

impl<T> Entry<T> {
    /// Returns the cargo value, if this entry holds one.
    pub fn as_cargo(&self) -> Option<&T> {
        match self {
            Self::Cargo(item) => Some(item),
            Self::Untagged(_) => None,
        }
    }
}

impl<T: Cargo> From<T> for Entry<T> {
    fn from(item: T) -> Self {
        Self::Cargo(item)
    }
}
