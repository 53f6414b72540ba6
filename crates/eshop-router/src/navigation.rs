//! Navigation tickets and page lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::Route;

/// Proof that a navigation was started.
///
/// Only the holder of the most recent ticket may mount its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    route: Route,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn route(&self) -> &Route {
        &self.route
    }
}

/// Lifecycle of a mounted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    /// Waiting for catalog data.
    Loading,
    /// Rendered from resolved data.
    Ready,
    /// Data could not be fetched; the error view is shown.
    Failed,
}

/// Issues navigation tickets and tells stale ones apart.
///
/// Every call to [`begin`](Self::begin) supersedes all earlier tickets,
/// whether or not their fetches have finished.
#[derive(Debug, Default)]
pub struct Navigator {
    generation: AtomicU64,
    current: Mutex<Option<Route>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start navigating to `route`.
    pub fn begin(&self, route: Route) -> Ticket {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *current = Some(route.clone());
        tracing::debug!(route = %route, generation, "navigation started");
        Ticket { generation, route }
    }

    /// Check whether `ticket` belongs to the latest navigation.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Route of the latest navigation, if any.
    pub fn current(&self) -> Option<Route> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let nav = Navigator::new();
        let bags = nav.begin(Route::Category("bags".into()));
        assert!(nav.is_current(&bags));

        let shoes = nav.begin(Route::Category("shoes".into()));
        assert!(!nav.is_current(&bags));
        assert!(nav.is_current(&shoes));
        assert_eq!(nav.current(), Some(Route::Category("shoes".into())));
    }

    #[test]
    fn test_same_route_twice_is_still_newer() {
        let nav = Navigator::new();
        let first = nav.begin(Route::Cart);
        let second = nav.begin(Route::Cart);
        assert!(second.generation() > first.generation());
        assert!(!nav.is_current(&first));
    }

    #[test]
    fn test_no_navigation_yet() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn test_concurrent_begins_issue_unique_generations() {
        let nav = std::sync::Arc::new(Navigator::new());
        let handles: Vec<_> = (0u64..8)
            .map(|i| {
                let nav = nav.clone();
                std::thread::spawn(move || nav.begin(Route::Product(i.into())).generation())
            })
            .collect();
        let mut generations: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        generations.sort();
        generations.dedup();
        assert_eq!(generations.len(), 8);
    }
}
