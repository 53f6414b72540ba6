//! Where rendered pages end up.

use std::sync::{Mutex, PoisonError};

use eshop_router::{PageState, Route};
use eshop_views::Fragment;

/// A page ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub route: Route,
    pub state: PageState,
    /// Navigation generation that produced this screen.
    pub generation: u64,
    /// Full page, layout included.
    pub fragment: Fragment,
}

/// Host that displays screens.
///
/// `mount` replaces whatever was shown before. The storefront serializes
/// calls, so implementations only need to be thread-safe, not ordered.
pub trait Surface: Send + Sync {
    fn mount(&self, screen: Screen);

    /// New item count for the header badge.
    fn cart_badge(&self, _count: i64) {}
}

/// Surface that records everything mounted on it.
#[derive(Debug, Default)]
pub struct MemorySurface {
    history: Mutex<Vec<Screen>>,
    badge: Mutex<Option<i64>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen currently shown.
    pub fn current(&self) -> Option<Screen> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Every screen mounted so far, oldest first.
    pub fn history(&self) -> Vec<Screen> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Last badge count pushed.
    pub fn badge(&self) -> Option<i64> {
        *self.badge.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for MemorySurface {
    fn mount(&self, screen: Screen) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(screen);
    }

    fn cart_badge(&self, count: i64) {
        *self.badge.lock().unwrap_or_else(PoisonError::into_inner) = Some(count);
    }
}
