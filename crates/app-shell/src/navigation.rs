//! Navigation handle shared with screens.

use parking_lot::RwLock;
use tracing::debug;

/// Tracks the active route.
#[derive(Debug)]
pub struct NavigationHandle {
    history: RwLock<Vec<String>>,
}

impl Default for NavigationHandle {
    fn default() -> Self {
        Self::new("/")
    }
}

impl NavigationHandle {
    /// Start at `route`.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            history: RwLock::new(vec![route.into()]),
        }
    }

    /// Go to `route`.
    pub fn navigate(&self, route: impl Into<String>) {
        let route = route.into();
        debug!(route = %route, "Navigating");
        self.history.write().push(route);
    }

    /// Return to the previous route. The first route is never popped.
    pub fn back(&self) -> Option<String> {
        let mut history = self.history.write();
        if history.len() > 1 {
            history.pop();
        }
        history.last().cloned()
    }

    /// Active route.
    #[must_use]
    pub fn current(&self) -> String {
        self.history.read().last().cloned().unwrap_or_default()
    }
}
