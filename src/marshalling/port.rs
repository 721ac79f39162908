//! Shared marshalling port holding staged cargo.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use super::cargo::{Cargo, Entry};
use super::category::Category;
use super::error::ItemNotFound;

/// A physical marshalling point where cargo waits to be loaded onto vessels.
///
/// The port is an ordered multiset of [`Entry`] values guarded by a single
/// mutex, so it can be shared (typically behind an `Arc` or a scoped borrow)
/// between any number of vessel, crane, or feeder processes. Every operation
/// takes the lock exactly once, which makes operations on one port
/// linearizable. Items of the same category are served first-in-first-out.
///
/// The port never waits. A lookup miss is reported immediately as
/// [`ItemNotFound`]; deciding whether and when to retry belongs to the caller.
///
/// # Examples
///
/// ```
/// use bos_sim::marshalling::{Category, Component, Port};
///
/// let port = Port::new("Quay 1");
/// port.put(Component::new(Category::Monopile, 1.0, 900.0));
///
/// let pile = port.get_item(&Category::Monopile).unwrap();
/// assert_eq!(pile.weight, 900.0);
/// assert!(port.get_item(&Category::Monopile).is_err());
/// ```
#[derive(Debug)]
pub struct Port<T> {
    name: String,
    items: Mutex<Vec<Entry<T>>>,
    num_cranes: usize,
    cranes_in_use: AtomicUsize,
}

/// A crane held by a caller. The crane is released when the guard is dropped.
#[derive(Debug)]
pub struct CraneGuard<'a> {
    cranes_in_use: &'a AtomicUsize,
}

impl Drop for CraneGuard<'_> {
    fn drop(&mut self) {
        self.cranes_in_use.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<T: Cargo> Port<T> {
    /// Creates an empty port with a single crane.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_cranes(name, 1)
    }

    /// Creates an empty port with `num_cranes` cranes.
    ///
    /// # Panics
    ///
    /// Panics if `num_cranes` is zero.
    pub fn with_cranes(name: impl Into<String>, num_cranes: usize) -> Self {
        assert!(num_cranes > 0, "a port needs at least one crane");
        Self {
            name: name.into(),
            items: Mutex::new(Vec::new()),
            num_cranes,
            cranes_in_use: AtomicUsize::new(0),
        }
    }

    /// Returns the port name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an entry to the end of the port.
    ///
    /// Accepts cargo directly or an [`Entry::Untagged`] value. Never fails.
    pub fn put(&self, entry: impl Into<Entry<T>>) {
        let entry = entry.into();
        let label = entry.category().map(Category::to_string);
        let mut items = self.lock();
        items.push(entry);
        debug!(
            target: "port",
            "{}: stored {} ({} items)",
            self.name,
            label.as_deref().unwrap_or("untagged entry"),
            items.len()
        );
    }

    /// Removes and returns the oldest item of `category`.
    ///
    /// All other entries keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`ItemNotFound`] if no stored item has `category`. The port is
    /// left unchanged in that case.
    pub fn get_item(&self, category: &Category) -> Result<T, ItemNotFound> {
        let mut items = self.lock();
        let idx = items.iter().position(|e| e.category() == Some(category));
        match idx.map(|i| items.remove(i)) {
            Some(Entry::Cargo(item)) => {
                debug!(
                    target: "port",
                    "{}: released {category} ({} items)",
                    self.name,
                    items.len()
                );
                Ok(item)
            }
            _ => Err(ItemNotFound {
                category: category.clone(),
            }),
        }
    }

    /// Removes one item for every listed category, or nothing at all.
    ///
    /// Repeated categories claim distinct items. The returned items follow the
    /// order of `categories`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemNotFound`] naming the first category that could not be
    /// satisfied. The port is left unchanged in that case.
    pub fn get_items(&self, categories: &[Category]) -> Result<Vec<T>, ItemNotFound> {
        self.get_items_if(categories, |_| true)
            .map(Option::unwrap_or_default)
    }

    /// Like [`Port::get_items`], but `accept` inspects the matched set under
    /// the lock before anything is removed.
    ///
    /// Returns `Ok(None)` and leaves the port unchanged when `accept` rejects
    /// the set. Lets a loader check deck capacity without ever holding items
    /// it cannot stow.
    ///
    /// # Errors
    ///
    /// Returns [`ItemNotFound`] naming the first category that could not be
    /// satisfied.
    pub fn get_items_if<F>(
        &self,
        categories: &[Category],
        accept: F,
    ) -> Result<Option<Vec<T>>, ItemNotFound>
    where
        F: FnOnce(&[&T]) -> bool,
    {
        let mut items = self.lock();

        let mut claimed: Vec<usize> = Vec::with_capacity(categories.len());
        for category in categories {
            let idx = items
                .iter()
                .enumerate()
                .position(|(i, e)| e.category() == Some(category) && !claimed.contains(&i));
            match idx {
                Some(i) => claimed.push(i),
                None => {
                    return Err(ItemNotFound {
                        category: category.clone(),
                    });
                }
            }
        }

        let candidates: Vec<&T> = claimed
            .iter()
            .filter_map(|&i| items[i].as_cargo())
            .collect();
        if !accept(&candidates) {
            return Ok(None);
        }

        // Remove from the back so earlier indices stay valid.
        let mut order: Vec<(usize, usize)> = claimed.into_iter().enumerate().collect();
        order.sort_by(|a, b| b.1.cmp(&a.1));
        let mut out: Vec<Option<T>> = categories.iter().map(|_| None).collect();
        for (pos, idx) in order {
            if let Entry::Cargo(item) = items.remove(idx) {
                out[pos] = Some(item);
            }
        }

        debug!(
            target: "port",
            "{}: released set of {} ({} items)",
            self.name,
            categories.len(),
            items.len()
        );
        Ok(Some(out.into_iter().flatten().collect()))
    }

    /// Number of stored entries, untagged ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of stored items of `category`.
    pub fn count(&self, category: &Category) -> usize {
        self.lock()
            .iter()
            .filter(|e| e.category() == Some(category))
            .count()
    }

    /// Runs `f` over a read-only view of the stored entries.
    pub fn with_items<R>(&self, f: impl FnOnce(&[Entry<T>]) -> R) -> R {
        f(&self.lock())
    }

    /// Total number of cranes at this port.
    pub fn num_cranes(&self) -> usize {
        self.num_cranes
    }

    /// Claims a free crane without waiting.
    ///
    /// Returns `None` when every crane is in use.
    pub fn try_acquire_crane(&self) -> Option<CraneGuard<'_>> {
        self.cranes_in_use
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                (used < self.num_cranes).then_some(used + 1)
            })
            .ok()
            .map(|_| CraneGuard {
                cranes_in_use: &self.cranes_in_use,
            })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry<T>>> {
        // No mutation can panic halfway through, so a poisoned Vec is intact.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Cargo + Clone> Port<T> {
    /// Returns a snapshot of the stored entries in insertion order.
    pub fn items(&self) -> Vec<Entry<T>> {
        self.lock().clone()
    }
}
