//! Hash routing
//!
//! Locations live in the fragment (`#/services?tab=ia#site-web`), so every
//! navigation stays inside one loaded document. Changing the path starts a
//! [`PageTransition`]; changing only the query or anchor does not.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use crate::href::{normalize_path, Href};
use crate::transition::{PageTransition, PageTransitionPhase, TransitionEvent};

/// Known page paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    paths: Vec<String>,
}

impl RouteTable {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for path in paths {
            table.add(path.as_ref());
        }
        table
    }

    pub fn add(&mut self, path: &str) {
        let path = normalize_path(path);
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.paths.iter().any(|p| *p == path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Router location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
    pub anchor: Option<String>,
}

impl Location {
    /// Parse a router target: `"/services?tab=ia"`, `"#/contact"`, `"/portfolio#about"`
    pub fn parse(target: &str) -> Self {
        match Href::parse(target) {
            Href::Local(local) => Self {
                path: local.path.unwrap_or_else(|| "/".to_string()),
                query: local.query,
                anchor: local.anchor,
            },
            // The hash router never leaves the site
            Href::External(_) => Self::root(),
        }
    }

    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
            anchor: None,
        }
    }

    /// Value of a `key=value` pair in the query
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .as_deref()?
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    /// Hash form, as shown in the address bar
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(anchor) = &self.anchor {
            write!(f, "#{anchor}")?;
        }
        Ok(())
    }
}

/// Result of a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A page change started; the new page mounts when the exit animation ends
    Mounting { not_found: bool },
    /// Path unchanged; only the query or anchor moved
    SamePage,
}

/// The routing layer as seen by the coordinator
pub trait Router {
    /// Path of the page being displayed (or being brought in)
    fn current_path(&self) -> &str;

    fn phase(&self) -> PageTransitionPhase;

    fn routes(&self) -> &RouteTable;

    /// Go to `target` (path plus optional query)
    fn navigate(&mut self, target: &str, now: Instant) -> RouteOutcome;
}

/// Back/forward history
#[derive(Debug)]
pub struct History {
    back: VecDeque<Location>,
    forward: Vec<Location>,
    max_size: usize,
}

impl History {
    pub fn new() -> Self {
        Self {
            back: VecDeque::new(),
            forward: Vec::new(),
            max_size: 100,
        }
    }

    /// Record `previous` before moving to a new location
    pub fn push(&mut self, previous: Location) {
        self.back.push_back(previous);
        while self.back.len() > self.max_size {
            self.back.pop_front();
        }
        self.forward.clear();
    }

    pub fn go_back(&mut self, current: Location) -> Option<Location> {
        let prev = self.back.pop_back()?;
        self.forward.push(current);
        Some(prev)
    }

    pub fn go_forward(&mut self, current: Location) -> Option<Location> {
        let next = self.forward.pop()?;
        self.back.push_back(current);
        Some(next)
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Fragment-based router with animated page changes
#[derive(Debug)]
pub struct HashRouter {
    routes: RouteTable,
    location: Location,
    history: History,
    transition: PageTransition,
}

impl HashRouter {
    pub fn new(routes: RouteTable, exit: Duration, enter: Duration) -> Self {
        Self {
            routes,
            location: Location::root(),
            history: History::new(),
            transition: PageTransition::new(exit, enter),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Is the current path a known route?
    pub fn is_not_found(&self) -> bool {
        !self.routes.contains(&self.location.path)
    }

    /// Replace the anchor of the current entry
    pub fn set_anchor(&mut self, anchor: Option<&str>) {
        self.location.anchor = anchor.map(String::from);
    }

    pub fn back(&mut self, now: Instant) -> Option<RouteOutcome> {
        let prev = self.history.go_back(self.location.clone())?;
        Some(self.apply(prev, now))
    }

    pub fn forward(&mut self, now: Instant) -> Option<RouteOutcome> {
        let next = self.history.go_forward(self.location.clone())?;
        Some(self.apply(next, now))
    }

    /// Advance the page transition
    pub fn tick(&mut self, now: Instant) -> Vec<TransitionEvent> {
        self.transition.tick(now)
    }

    pub fn transition(&self) -> &PageTransition {
        &self.transition
    }

    fn apply(&mut self, location: Location, now: Instant) -> RouteOutcome {
        let path_changed = location.path != self.location.path;
        self.location = location;

        if !path_changed {
            return RouteOutcome::SamePage;
        }

        self.transition.begin(&self.location.path, now);
        let not_found = self.is_not_found();
        if not_found {
            tracing::debug!("No route for {}, showing not-found view", self.location.path);
        }
        RouteOutcome::Mounting { not_found }
    }
}

impl Router for HashRouter {
    fn current_path(&self) -> &str {
        &self.location.path
    }

    fn phase(&self) -> PageTransitionPhase {
        self.transition.phase()
    }

    fn routes(&self) -> &RouteTable {
        &self.routes
    }

    fn navigate(&mut self, target: &str, now: Instant) -> RouteOutcome {
        let next = Location::parse(target);
        if next == self.location {
            return RouteOutcome::SamePage;
        }

        tracing::debug!("Navigate {} -> {}", self.location, next);
        self.history.push(self.location.clone());
        self.apply(next, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn router() -> HashRouter {
        HashRouter::new(
            RouteTable::new(["/", "/portfolio", "/services", "/contact", "/mentions-legales"]),
            Duration::from_millis(250),
            Duration::from_millis(250),
        )
    }

    #[test]
    fn test_route_table_normalizes() {
        let table = RouteTable::new(["/portfolio/", "contact", "/portfolio"]);
        assert_eq!(table.len(), 2);
        assert!(table.contains("/portfolio"));
        assert!(table.contains("/contact/"));
        assert!(!table.contains("/blog"));
    }

    #[test]
    fn test_location_parse_and_display() {
        let loc = Location::parse("/services?tab=ia#site-web");
        assert_eq!(loc.path, "/services");
        assert_eq!(loc.query_param("tab"), Some("ia"));
        assert_eq!(loc.query_param("lang"), None);
        assert_eq!(loc.to_string(), "#/services?tab=ia#site-web");
        assert_eq!(Location::parse("#/mentions-legales").path, "/mentions-legales");
    }

    #[test]
    fn test_navigate_starts_transition() {
        let t0 = Instant::now();
        let mut router = router();

        let outcome = router.navigate("/portfolio", t0);
        assert_eq!(outcome, RouteOutcome::Mounting { not_found: false });
        assert_eq!(router.current_path(), "/portfolio");
        assert_eq!(router.phase(), PageTransitionPhase::Exiting);
    }

    #[test]
    fn test_query_change_is_same_page() {
        let t0 = Instant::now();
        let mut router = router();
        router.navigate("/services", t0);

        let outcome = router.navigate("/services?tab=ia", t0);
        assert_eq!(outcome, RouteOutcome::SamePage);
        assert_eq!(router.location().query_param("tab"), Some("ia"));
        assert!(router.history().can_go_back());
    }

    #[test]
    fn test_unknown_route() {
        let mut router = router();
        let outcome = router.navigate("/blog", Instant::now());
        assert_eq!(outcome, RouteOutcome::Mounting { not_found: true });
        assert!(router.is_not_found());
    }

    #[test]
    fn test_back_forward() {
        let t0 = Instant::now();
        let mut router = router();
        router.navigate("/portfolio", t0);
        router.navigate("/contact", t0);

        assert_eq!(router.back(t0), Some(RouteOutcome::Mounting { not_found: false }));
        assert_eq!(router.current_path(), "/portfolio");
        assert!(router.history().can_go_forward());

        router.forward(t0);
        assert_eq!(router.current_path(), "/contact");
        assert!(router.forward(t0).is_none());
    }

    #[test]
    fn test_new_navigation_clears_forward() {
        let t0 = Instant::now();
        let mut router = router();
        router.navigate("/portfolio", t0);
        router.back(t0);
        router.navigate("/services", t0);
        assert!(!router.history().can_go_forward());
    }
}
