//! Cargo category labels used for port lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The kind of a cargo item.
///
/// Known installation components have dedicated variants; anything else is a
/// caller-defined [`Category::Custom`] label. Two categories are equal when
/// their labels are equal: a [`CustomLabel`] can only be built through
/// [`Category::new`] or [`FromStr`], which map known labels to their
/// dedicated variant and reject empty ones.
///
/// # Examples
///
/// ```
/// use bos_sim::marshalling::Category;
///
/// let c: Category = "Transition Piece".parse().unwrap();
/// assert_eq!(c, Category::TransitionPiece);
/// assert_eq!(c.label(), "Transition Piece");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Monopile,
    TransitionPiece,
    Tower,
    Nacelle,
    Blade,
    ScourProtection,
    Topside,
    Carousel,
    /// Caller-defined kind.
    Custom(CustomLabel),
}

/// Label of a caller-defined category. Never empty and never one of the
/// known labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomLabel(String);

impl CustomLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returned when a category label is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyCategory;

impl fmt::Display for EmptyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cargo category label must not be empty")
    }
}

impl std::error::Error for EmptyCategory {}

impl Category {
    /// All known (non-custom) categories.
    pub const KNOWN: &[Category] = &[
        Category::Monopile,
        Category::TransitionPiece,
        Category::Tower,
        Category::Nacelle,
        Category::Blade,
        Category::ScourProtection,
        Category::Topside,
        Category::Carousel,
    ];

    /// Builds a category from a label, mapping known labels to their variant.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCategory`] if `label` is empty or whitespace only.
    pub fn new(label: impl Into<String>) -> Result<Self, EmptyCategory> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(EmptyCategory);
        }

        let known = Self::KNOWN.iter().find(|c| c.label() == trimmed);
        Ok(match known {
            Some(c) => c.clone(),
            None if trimmed.len() == label.len() => Self::Custom(CustomLabel(label)),
            None => Self::Custom(CustomLabel(trimmed.to_string())),
        })
    }

    /// Returns the human-readable label for this category.
    pub fn label(&self) -> &str {
        match self {
            Self::Monopile => "Monopile",
            Self::TransitionPiece => "Transition Piece",
            Self::Tower => "Tower",
            Self::Nacelle => "Nacelle",
            Self::Blade => "Blade",
            Self::ScourProtection => "Scour Protection",
            Self::Topside => "Topside",
            Self::Carousel => "Carousel",
            Self::Custom(label) => label.as_str(),
        }
    }

    /// Returns `true` for caller-defined categories.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl FromStr for Category {
    type Err = EmptyCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
