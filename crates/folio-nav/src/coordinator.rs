//! Anchor navigation coordinator
//!
//! Owns the per-session navigation state: the configuration, the single
//! in-flight [`ScrollAttempt`] and a short log of finished attempts. The
//! host forwards clicks to [`NavCoordinator::handle`], page lifecycle
//! signals to [`on_exit_complete`](NavCoordinator::on_exit_complete) and
//! [`on_mounted`](NavCoordinator::on_mounted), and calls
//! [`tick`](NavCoordinator::tick) from its timer loop.

use std::collections::VecDeque;
use std::time::Instant;

use crate::attempt::{AttemptId, AttemptReport, AttemptState, GateSignal, MountGate, ScrollAttempt};
use crate::config::NavConfig;
use crate::locator::ElementLocator;
use crate::resolver::{resolve, NavAction, NavigationPlan, NavigationRequest, ScrollGoal};
use crate::router::{RouteOutcome, Router};
use crate::scroll::{ScrollBehavior, ScrollExecutor, ScrollOptions};
use crate::transition::PageTransitionPhase;

/// Finished attempts kept for inspection
const REPORT_LOG_SIZE: usize = 32;

/// Borrowed view of the host the coordinator acts on
pub struct NavContext<'a> {
    pub locator: &'a dyn ElementLocator,
    pub scroller: &'a mut dyn ScrollExecutor,
    pub router: &'a mut dyn Router,
}

/// Result of handling one request
#[derive(Debug, Clone, PartialEq)]
pub struct Handled {
    pub plan: NavigationPlan,
    /// The UI control must suppress the browser's default handling
    pub prevent_default: bool,
    /// Attempt carrying the scroll, if any
    pub attempt: Option<AttemptId>,
    /// Router result when the plan navigated
    pub route: Option<RouteOutcome>,
}

/// Per-session navigation state
#[derive(Debug)]
pub struct NavCoordinator {
    config: NavConfig,
    active: Option<ScrollAttempt>,
    next_id: u64,
    reports: VecDeque<AttemptReport>,
    scrolls: u64,
    torn_down: bool,
}

impl NavCoordinator {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            active: None,
            next_id: 1,
            reports: VecDeque::with_capacity(REPORT_LOG_SIZE),
            scrolls: 0,
            torn_down: false,
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Handle a click on a link or nav control
    pub fn handle(&mut self, request: &NavigationRequest, ctx: &mut NavContext<'_>, now: Instant) -> Handled {
        let plan = resolve(request, ctx.router.routes(), self.config.behavior);
        let mut handled = Handled {
            prevent_default: plan.prevents_default(),
            plan,
            attempt: None,
            route: None,
        };

        if self.torn_down {
            tracing::debug!("Ignoring {:?} after teardown", request.source_href);
            return handled;
        }

        match handled.plan.action.clone() {
            NavAction::External(url) => {
                tracing::debug!("External link {}, leaving it to the browser", url);
            }
            NavAction::ScrollOnly(anchor) => {
                handled.attempt = self.scroll_same_page(ScrollGoal::Anchor(anchor), ctx, now);
            }
            NavAction::ScrollToTop => {
                handled.attempt = self.scroll_same_page(ScrollGoal::Top, ctx, now);
            }
            NavAction::NavigateThenScroll { path, anchor } => {
                let goal = anchor.map_or(ScrollGoal::Top, ScrollGoal::Anchor);
                let behavior = handled
                    .plan
                    .destination
                    .as_ref()
                    .map_or(self.config.behavior, |d| d.behavior);

                self.supersede_active(now);

                let outcome = ctx.router.navigate(&path, now);
                let gate = match outcome {
                    RouteOutcome::Mounting { .. } => MountGate::for_strategy(self.config.sync, now),
                    RouteOutcome::SamePage => self.same_page_gate(ctx, now),
                };
                handled.route = Some(outcome);
                handled.attempt = Some(self.start(goal, &path, behavior, gate, ctx, now));
            }
            NavAction::NavigateOnly { path } => {
                self.supersede_active(now);
                handled.route = Some(ctx.router.navigate(&path, now));
            }
        }

        handled
    }

    /// Exit animation finished for the page at `path`
    pub fn on_exit_complete(&mut self, path: &str, ctx: &mut NavContext<'_>, now: Instant) -> Option<AttemptReport> {
        self.signal(GateSignal::ExitComplete, path, ctx, now)
    }

    /// The page at `path` is in the document
    pub fn on_mounted(&mut self, path: &str, ctx: &mut NavContext<'_>, now: Instant) -> Option<AttemptReport> {
        self.signal(GateSignal::Mounted, path, ctx, now)
    }

    /// Drive the pending attempt; returns its report if it finished
    pub fn tick(&mut self, ctx: &mut NavContext<'_>, now: Instant) -> Option<AttemptReport> {
        if self.torn_down {
            return None;
        }
        self.advance(ctx, now)
    }

    /// Abandon the pending attempt, e.g. when history moves to another page
    pub fn cancel_pending(&mut self, now: Instant) {
        self.abandon_active(now);
    }

    /// Cancel anything pending; the coordinator stays inert afterwards
    pub fn teardown(&mut self, now: Instant) {
        self.abandon_active(now);
        self.torn_down = true;
        tracing::debug!("Navigation coordinator torn down");
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn active(&self) -> Option<&ScrollAttempt> {
        self.active.as_ref()
    }

    /// When the pending attempt next needs a tick
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.active.as_ref().and_then(ScrollAttempt::next_wakeup)
    }

    /// Finished attempts, oldest first
    pub fn reports(&self) -> impl Iterator<Item = &AttemptReport> {
        self.reports.iter()
    }

    pub fn last_report(&self) -> Option<&AttemptReport> {
        self.reports.back()
    }

    /// Scrolls executed over the session
    pub fn scroll_count(&self) -> u64 {
        self.scrolls
    }

    fn scroll_same_page(&mut self, goal: ScrollGoal, ctx: &mut NavContext<'_>, now: Instant) -> Option<AttemptId> {
        let path = ctx.router.current_path().to_string();
        self.supersede_active(now);

        let gate = self.same_page_gate(ctx, now);
        let behavior = self.config.behavior;
        Some(self.start(goal, &path, behavior, gate, ctx, now))
    }

    /// Same-page scrolls wait for the mount while the old page is still leaving
    fn same_page_gate(&self, ctx: &NavContext<'_>, now: Instant) -> MountGate {
        if ctx.router.phase() == PageTransitionPhase::Exiting {
            MountGate::for_strategy(self.config.sync, now)
        } else {
            MountGate::Open
        }
    }

    fn start(
        &mut self,
        goal: ScrollGoal,
        path: &str,
        behavior: ScrollBehavior,
        gate: MountGate,
        ctx: &mut NavContext<'_>,
        now: Instant,
    ) -> AttemptId {
        let id = AttemptId(self.next_id);
        self.next_id += 1;

        tracing::debug!("{} created: {:?} on {} behind {:?}", id, goal, path, gate);
        self.active = Some(ScrollAttempt::new(
            id,
            goal,
            path,
            behavior,
            gate,
            self.config.timeout(),
            self.config.poll_interval(),
            now,
        ));
        self.advance(ctx, now);
        id
    }

    fn signal(&mut self, signal: GateSignal, path: &str, ctx: &mut NavContext<'_>, now: Instant) -> Option<AttemptReport> {
        if self.torn_down {
            return None;
        }
        let opened = self
            .active
            .as_mut()
            .is_some_and(|attempt| attempt.signal(signal, path));
        if opened { self.advance(ctx, now) } else { None }
    }

    fn advance(&mut self, ctx: &mut NavContext<'_>, now: Instant) -> Option<AttemptReport> {
        let options = ScrollOptions {
            behavior: self.config.behavior,
            offset_px: self.config.offset_px,
        };

        let attempt = self.active.as_mut()?;
        let state = attempt.step(now, ctx.locator, &mut *ctx.scroller, &options);
        if !state.is_terminal() {
            return None;
        }

        let report = attempt.report();
        self.active = None;
        if state == AttemptState::Resolved {
            self.scrolls += 1;
        }
        self.archive(report.clone());
        Some(report)
    }

    fn supersede_active(&mut self, now: Instant) {
        if let Some(mut attempt) = self.active.take() {
            attempt.supersede(now);
            tracing::debug!("{} superseded", attempt.id());
            self.archive(attempt.report());
        }
    }

    fn abandon_active(&mut self, now: Instant) {
        if let Some(mut attempt) = self.active.take() {
            attempt.abandon(now);
            self.archive(attempt.report());
        }
    }

    fn archive(&mut self, report: AttemptReport) {
        if self.reports.len() == REPORT_LOG_SIZE {
            self.reports.pop_front();
        }
        self.reports.push_back(report);
    }
}

impl Default for NavCoordinator {
    fn default() -> Self {
        Self::new(NavConfig::default())
    }
}
