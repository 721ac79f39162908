//! Durations of port-side vessel tasks.

use serde::Deserialize;

use crate::marshalling::Category;

/// Time to secure one item of each category to a vessel deck (h).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FastenTimes {
    pub blade: f64,
    pub nacelle: f64,
    pub tower: f64,
    pub monopile: f64,
    pub transition_piece: f64,
    /// Rock loading time for a scour protection load.
    pub scour_protection: f64,
    pub topside: f64,
    /// Lifting a cable carousel onto the deck.
    pub carousel_lift: f64,
    /// Securing a cable carousel once lifted.
    pub carousel_fasten: f64,
}

impl Default for FastenTimes {
    fn default() -> Self {
        Self {
            blade: 1.5,
            nacelle: 4.0,
            tower: 4.0,
            monopile: 12.0,
            transition_piece: 8.0,
            scour_protection: 4.0,
            topside: 12.0,
            carousel_lift: 4.0,
            carousel_fasten: 8.0,
        }
    }
}

impl FastenTimes {
    /// Returns the fastening duration for one item of `category`.
    ///
    /// Carousels take their lift time plus their fasten time. Custom
    /// categories have no known task and return `None`.
    pub fn fasten_time(&self, category: &Category) -> Option<f64> {
        match category {
            Category::Blade => Some(self.blade),
            Category::Nacelle => Some(self.nacelle),
            Category::Tower => Some(self.tower),
            Category::Monopile => Some(self.monopile),
            Category::TransitionPiece => Some(self.transition_piece),
            Category::ScourProtection => Some(self.scour_protection),
            Category::Topside => Some(self.topside),
            Category::Carousel => Some(self.carousel_lift + self.carousel_fasten),
            Category::Custom(_) => None,
        }
    }

    /// Every configured duration, for validation.
    pub fn all(&self) -> [f64; 9] {
        [
            self.blade,
            self.nacelle,
            self.tower,
            self.monopile,
            self.transition_piece,
            self.scour_protection,
            self.topside,
            self.carousel_lift,
            self.carousel_fasten,
        ]
    }
}
