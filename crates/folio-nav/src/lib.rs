//! Folio Navigation
//!
//! Turns "go to section X" requests coming from links and buttons into
//! in-page scrolls, page navigations, or both, in step with the router's
//! page-transition animation.
//!
//! # Pieces
//! - [`href`]: classify a raw link (`#contact`, `/portfolio#about`, `#/services?tab=x`)
//! - [`resolver`]: decide the action plan for a [`NavigationRequest`]
//! - [`locator`]: find the element an anchor names
//! - [`scroll`]: move the viewport, smooth or instant
//! - [`router`] / [`transition`]: hash routing and the exit/enter lifecycle
//! - [`attempt`] / [`cancel`] / [`task`]: bounded, cancellable scroll attempts
//! - [`coordinator`]: the per-session state tying it all together
//!
//! # Example
//! ```rust,ignore
//! let mut nav = NavCoordinator::new(NavConfig::default());
//! let request = NavigationRequest::new("/portfolio#projects", router.current_path());
//! let handled = nav.handle(&request, &mut ctx, Instant::now());
//! // later, from the host's timer loop
//! nav.tick(&mut ctx, Instant::now());
//! ```

pub mod attempt;
pub mod cancel;
pub mod config;
pub mod coordinator;
pub mod href;
pub mod locator;
pub mod resolver;
pub mod router;
pub mod scroll;
pub mod task;
pub mod transition;

pub use attempt::{AttemptId, AttemptReport, AttemptState, GateSignal, MountGate, ScrollAttempt};
pub use cancel::{CancelSource, CancelToken};
pub use config::{ConfigError, NavConfig, SyncStrategy};
pub use coordinator::{Handled, NavContext, NavCoordinator};
pub use href::{is_same_page_anchor, normalize_path, Href, LocalHref};
pub use locator::{ElementLocator, LocatedElement};
pub use resolver::{resolve, Destination, NavAction, NavigationPlan, NavigationRequest, PlanStep, ScrollGoal};
pub use router::{HashRouter, History, Location, RouteOutcome, RouteTable, Router};
pub use scroll::{ScrollBehavior, ScrollCompletion, ScrollExecutor, ScrollOptions, ScrollPosition, ScrollTarget, Viewport};
pub use task::{run_poll, PollOutcome};
pub use transition::{PageTransition, PageTransitionPhase, TransitionEvent};

use folio_dom::SelectorError;

/// Navigation failures.
///
/// None of these reach UI callers: each one degrades locally (scroll to top,
/// poll then abandon, or the not-found view).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("Invalid selector for anchor {anchor:?}: {source}")]
    InvalidSelector {
        anchor: String,
        #[source]
        source: SelectorError,
    },

    #[error("Element not found: #{0}")]
    ElementNotFound(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}
