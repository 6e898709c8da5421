//! Navigation Resolver
//!
//! Classifies a navigation request as a same-page scroll, a cross-page
//! navigation followed by a scroll, or an external link, and spells the
//! decision out as an ordered plan.

use crate::href::{normalize_path, Href};
use crate::router::RouteTable;
use crate::scroll::ScrollBehavior;

/// A click on something that links somewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Raw href as authored (`"/portfolio#projects"`, `"#contact"`)
    pub source_href: String,
    /// Path displayed when the request was made
    pub current_page_path: String,
}

impl NavigationRequest {
    pub fn new(source_href: impl Into<String>, current_page_path: impl Into<String>) -> Self {
        Self {
            source_href: source_href.into(),
            current_page_path: current_page_path.into(),
        }
    }
}

/// Logical navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Page that must be active (path plus optional `?query`)
    pub page_path: String,
    /// Section to land on; `None` is the top of the page
    pub anchor_id: Option<String>,
    pub behavior: ScrollBehavior,
}

/// Where a scroll lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollGoal {
    Anchor(String),
    Top,
}

/// Resolved action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Leave the click to the browser
    External(String),
    /// Same page, scroll to a section
    ScrollOnly(String),
    /// Same page, scroll to the top
    ScrollToTop,
    /// Change page, then scroll once the new page is mounted
    NavigateThenScroll { path: String, anchor: Option<String> },
    /// Change page to an unknown route; the not-found view has nothing to scroll to
    NavigateOnly { path: String },
}

/// One step of a plan, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    Navigate(String),
    AwaitMount,
    Scroll(ScrollGoal),
}

/// Resolver output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPlan {
    pub action: NavAction,
    /// `None` for external links
    pub destination: Option<Destination>,
}

impl NavigationPlan {
    /// Ordered steps for this plan
    pub fn steps(&self) -> Vec<PlanStep> {
        match &self.action {
            NavAction::External(_) => Vec::new(),
            NavAction::ScrollOnly(anchor) => vec![PlanStep::Scroll(ScrollGoal::Anchor(anchor.clone()))],
            NavAction::ScrollToTop => vec![PlanStep::Scroll(ScrollGoal::Top)],
            NavAction::NavigateThenScroll { path, anchor } => vec![
                PlanStep::Navigate(path.clone()),
                PlanStep::AwaitMount,
                PlanStep::Scroll(match anchor {
                    Some(a) => ScrollGoal::Anchor(a.clone()),
                    None => ScrollGoal::Top,
                }),
            ],
            NavAction::NavigateOnly { path } => vec![PlanStep::Navigate(path.clone())],
        }
    }

    /// Should the UI control suppress the default browser navigation?
    pub fn prevents_default(&self) -> bool {
        !matches!(self.action, NavAction::External(_))
    }

    pub fn navigates(&self) -> bool {
        matches!(
            self.action,
            NavAction::NavigateThenScroll { .. } | NavAction::NavigateOnly { .. }
        )
    }

    /// Scroll goal, if the plan ends with a scroll
    pub fn scroll_goal(&self) -> Option<ScrollGoal> {
        self.steps().into_iter().find_map(|step| match step {
            PlanStep::Scroll(goal) => Some(goal),
            _ => None,
        })
    }
}

/// Resolve a request into a plan.
///
/// `behavior` applies to anchor scrolls and same-page top scrolls; the top
/// of a freshly mounted page is reached with an instant jump.
pub fn resolve(request: &NavigationRequest, routes: &RouteTable, behavior: ScrollBehavior) -> NavigationPlan {
    let local = match Href::parse(&request.source_href) {
        Href::External(url) => {
            return NavigationPlan {
                action: NavAction::External(url.to_string()),
                destination: None,
            };
        }
        Href::Local(local) => local,
    };

    let current = normalize_path(&request.current_page_path);
    let same_page = local.query.is_none()
        && local.path.as_deref().is_none_or(|p| p == current);

    let plan = if same_page {
        let action = match &local.anchor {
            Some(anchor) => NavAction::ScrollOnly(anchor.clone()),
            None => NavAction::ScrollToTop,
        };
        NavigationPlan {
            action,
            destination: Some(Destination {
                page_path: current,
                anchor_id: local.anchor,
                behavior,
            }),
        }
    } else {
        let path = local.path.clone().unwrap_or_else(|| current.clone());
        let target = local.route_target(&current);

        if routes.contains(&path) {
            let behavior = if local.anchor.is_some() { behavior } else { ScrollBehavior::Instant };
            NavigationPlan {
                action: NavAction::NavigateThenScroll {
                    path: target.clone(),
                    anchor: local.anchor.clone(),
                },
                destination: Some(Destination {
                    page_path: target,
                    anchor_id: local.anchor,
                    behavior,
                }),
            }
        } else {
            tracing::warn!("{}", crate::NavError::UnknownRoute(path));
            NavigationPlan {
                action: NavAction::NavigateOnly { path: target.clone() },
                destination: Some(Destination {
                    page_path: target,
                    anchor_id: None,
                    behavior: ScrollBehavior::Instant,
                }),
            }
        }
    };

    tracing::debug!("Resolved {:?} on {} -> {:?}", request.source_href, request.current_page_path, plan.action);
    plan
}
