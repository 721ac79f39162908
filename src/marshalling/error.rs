use std::fmt;

use super::category::Category;

/// No item of the requested category is currently stored in the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNotFound {
    /// The category that was requested.
    pub category: Category,
}

impl fmt::Display for ItemNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no item of category \"{}\" found at port", self.category)
    }
}

impl std::error::Error for ItemNotFound {}
