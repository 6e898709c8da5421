//! Scroll attempts
//!
//! One attempt per scroll request. It waits behind a [`MountGate`] until the
//! destination page is in the document, then polls the locator on a fixed
//! schedule until the anchor appears or the deadline passes:
//!
//! ```text
//! Created -> Waiting -> Polling -> Resolved
//!                              \-> Abandoned
//! (any non-terminal state)     --> Superseded
//! ```
//!
//! An attempt executes at most one scroll; once it has scrolled it is
//! terminal and further steps are no-ops.

use std::fmt;
use std::time::{Duration, Instant};

use crate::cancel::{CancelSource, CancelToken};
use crate::config::SyncStrategy;
use crate::locator::ElementLocator;
use crate::resolver::ScrollGoal;
use crate::scroll::{ScrollBehavior, ScrollCompletion, ScrollExecutor, ScrollOptions, ScrollTarget};
use crate::NavError;

/// Attempt identifier, unique per coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(pub u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempt#{}", self.0)
    }
}

/// Attempt lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Created,
    /// Behind the mount gate
    Waiting,
    /// Looking for the anchor
    Polling,
    /// Exactly one scroll executed
    Resolved,
    /// Gave up; no scroll executed
    Abandoned,
    /// Replaced by a newer request; no scroll executed
    Superseded,
}

impl AttemptState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Abandoned | Self::Superseded)
    }
}

/// What the attempt waits for before its first locate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountGate {
    /// Nothing to wait for
    Open,
    /// Opens by itself at `until`
    FixedDelay { until: Instant },
    /// Opens on the exit animation's completion callback
    ExitComplete,
    /// Opens on the page layer's mounted signal
    Mounted,
}

impl MountGate {
    /// Gate for a cross-page scroll requested at `now`
    pub fn for_strategy(strategy: SyncStrategy, now: Instant) -> Self {
        match strategy {
            SyncStrategy::FixedDelay(ms) => Self::FixedDelay {
                until: now + Duration::from_millis(ms),
            },
            SyncStrategy::ExitComplete => Self::ExitComplete,
            SyncStrategy::Mounted => Self::Mounted,
        }
    }

    pub fn is_open(&self, now: Instant) -> bool {
        match self {
            Self::Open => true,
            Self::FixedDelay { until } => now >= *until,
            Self::ExitComplete | Self::Mounted => false,
        }
    }
}

/// Page lifecycle signal delivered to a waiting attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    ExitComplete,
    Mounted,
}

/// Final record of an attempt
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptReport {
    pub id: AttemptId,
    pub goal: ScrollGoal,
    pub page_path: String,
    pub state: AttemptState,
    /// Locate calls made
    pub polls: u32,
    /// Set when a scroll executed
    pub completion: Option<ScrollCompletion>,
    /// From creation to the terminal state
    pub elapsed: Duration,
}

/// One scroll request in flight
#[derive(Debug)]
pub struct ScrollAttempt {
    id: AttemptId,
    goal: ScrollGoal,
    /// Page the goal lives on (no query)
    page_path: String,
    behavior: ScrollBehavior,
    state: AttemptState,
    gate: MountGate,
    started_at: Instant,
    /// Gate deadline while waiting, poll deadline while polling
    deadline: Instant,
    timeout: Duration,
    interval: Duration,
    next_poll: Option<Instant>,
    polls: u32,
    completion: Option<ScrollCompletion>,
    finished_at: Option<Instant>,
    cancel: CancelSource,
}

impl ScrollAttempt {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AttemptId,
        goal: ScrollGoal,
        page_path: &str,
        behavior: ScrollBehavior,
        gate: MountGate,
        timeout: Duration,
        interval: Duration,
        now: Instant,
    ) -> Self {
        let page_path = page_path
            .split_once('?')
            .map_or(page_path, |(path, _)| path)
            .to_string();
        // A fixed delay does not eat into the timeout
        let gate_deadline = match gate {
            MountGate::FixedDelay { until } => until.max(now) + timeout,
            _ => now + timeout,
        };

        Self {
            id,
            goal,
            page_path,
            behavior,
            state: AttemptState::Created,
            gate,
            started_at: now,
            deadline: gate_deadline,
            timeout,
            interval,
            next_poll: None,
            polls: 0,
            completion: None,
            finished_at: None,
            cancel: CancelSource::new(),
        }
    }

    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn goal(&self) -> &ScrollGoal {
        &self.goal
    }

    /// Anchor this attempt is after, if any
    pub fn target_anchor_id(&self) -> Option<&str> {
        match &self.goal {
            ScrollGoal::Anchor(anchor) => Some(anchor),
            ScrollGoal::Top => None,
        }
    }

    pub fn page_path(&self) -> &str {
        &self.page_path
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn gate(&self) -> MountGate {
        self.gate
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Has the single permitted scroll happened?
    pub fn resolved(&self) -> bool {
        self.state == AttemptState::Resolved
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Token for timers driving this attempt
    pub fn token(&self) -> CancelToken {
        self.cancel.token()
    }

    /// Earliest instant at which [`step`](Self::step) can make progress
    pub fn next_wakeup(&self) -> Option<Instant> {
        if self.is_terminal() {
            return None;
        }
        match (self.state, self.gate) {
            (AttemptState::Polling, _) => Some(self.next_poll.map_or(self.deadline, |t| t.min(self.deadline))),
            (_, MountGate::Open) => Some(self.started_at),
            (_, MountGate::FixedDelay { until }) => Some(until.min(self.deadline)),
            _ => Some(self.deadline),
        }
    }

    /// Deliver a page lifecycle signal. Returns true if the gate opened.
    pub fn signal(&mut self, signal: GateSignal, path: &str) -> bool {
        if self.is_terminal() || path != self.page_path {
            return false;
        }
        let opens = matches!(
            (self.gate, signal),
            (MountGate::ExitComplete, GateSignal::ExitComplete) | (MountGate::Mounted, GateSignal::Mounted)
        );
        if opens {
            tracing::debug!("{} gate opened by {:?}", self.id, signal);
            self.gate = MountGate::Open;
        }
        opens
    }

    /// Advance the attempt. Runs at most one locate and at most one scroll.
    pub fn step(
        &mut self,
        now: Instant,
        locator: &dyn ElementLocator,
        scroller: &mut dyn ScrollExecutor,
        options: &ScrollOptions,
    ) -> AttemptState {
        if self.is_terminal() {
            return self.state;
        }
        if self.cancel.is_cancelled() {
            self.finish(AttemptState::Superseded, now);
            return self.state;
        }

        if matches!(self.state, AttemptState::Created | AttemptState::Waiting) {
            if !self.gate.is_open(now) {
                if now >= self.deadline {
                    tracing::warn!("{} abandoned: page {} never mounted", self.id, self.page_path);
                    self.finish(AttemptState::Abandoned, now);
                } else {
                    self.state = AttemptState::Waiting;
                }
                return self.state;
            }

            self.state = AttemptState::Polling;
            self.deadline = now + self.timeout;
            self.next_poll = Some(now);
            tracing::debug!("{} polling for {:?}", self.id, self.goal);
        }

        if now >= self.deadline {
            tracing::warn!(
                "{} abandoned after {} polls: {:?} not found",
                self.id,
                self.polls,
                self.goal
            );
            self.finish(AttemptState::Abandoned, now);
            return self.state;
        }

        let Some(due) = self.next_poll else {
            return self.state;
        };
        if now < due {
            return self.state;
        }

        self.polls += 1;
        let options = ScrollOptions {
            behavior: self.behavior,
            ..*options
        };

        let target = match &self.goal {
            ScrollGoal::Top => Some(ScrollTarget::Top),
            ScrollGoal::Anchor(anchor) => match locator.locate(anchor) {
                Ok(found) => Some(ScrollTarget::Element(found.rect)),
                Err(err @ NavError::InvalidSelector { .. }) => {
                    tracing::warn!("{}, scrolling to top", err);
                    Some(ScrollTarget::Top)
                }
                Err(_) => None,
            },
        };

        match target {
            Some(target) => {
                self.completion = Some(scroller.scroll(target, &options));
                self.finish(AttemptState::Resolved, now);
            }
            None => {
                // Skip slots missed by a late tick
                let mut next = due + self.interval;
                while next <= now {
                    next += self.interval;
                }
                self.next_poll = Some(next);
            }
        }

        self.state
    }

    /// Stop because a newer request replaced this one
    pub fn supersede(&mut self, now: Instant) {
        if !self.is_terminal() {
            self.cancel.cancel();
            self.finish(AttemptState::Superseded, now);
        }
    }

    /// Stop without scrolling (session teardown)
    pub fn abandon(&mut self, now: Instant) {
        if !self.is_terminal() {
            self.cancel.cancel();
            self.finish(AttemptState::Abandoned, now);
        }
    }

    pub fn report(&self) -> AttemptReport {
        AttemptReport {
            id: self.id,
            goal: self.goal.clone(),
            page_path: self.page_path.clone(),
            state: self.state,
            polls: self.polls,
            completion: self.completion,
            elapsed: self
                .finished_at
                .map_or(Duration::ZERO, |t| t.saturating_duration_since(self.started_at)),
        }
    }

    fn finish(&mut self, state: AttemptState, now: Instant) {
        tracing::debug!("{} {:?} -> {:?}", self.id, self.state, state);
        self.state = state;
        self.next_poll = None;
        self.finished_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::LocatedElement;
    use crate::scroll::Viewport;
    use folio_dom::{DOMRect, Document, NodeId};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    const TIMEOUT: Duration = Duration::from_millis(1200);
    const INTERVAL: Duration = Duration::from_millis(100);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Anchor appears after a number of failed lookups
    struct LateLocator {
        misses: Cell<u32>,
        calls: Cell<u32>,
    }

    impl LateLocator {
        fn new(misses: u32) -> Self {
            Self { misses: Cell::new(misses), calls: Cell::new(0) }
        }
    }

    impl ElementLocator for LateLocator {
        fn locate(&self, anchor: &str) -> Result<LocatedElement, NavError> {
            self.calls.set(self.calls.get() + 1);
            if self.misses.get() > 0 {
                self.misses.set(self.misses.get() - 1);
                return Err(NavError::ElementNotFound(anchor.to_string()));
            }
            Ok(LocatedElement {
                node: NodeId::ROOT,
                rect: DOMRect::from_xywh(0.0, 1000.0, 1280.0, 500.0),
            })
        }
    }

    fn viewport() -> Viewport {
        let mut vp = Viewport::new(720.0);
        vp.set_content_height(4000.0);
        vp
    }

    fn instant() -> ScrollOptions {
        ScrollOptions { behavior: ScrollBehavior::Instant, offset_px: 60.0 }
    }

    fn attempt(goal: ScrollGoal, gate: MountGate, now: Instant) -> ScrollAttempt {
        ScrollAttempt::new(AttemptId(1), goal, "/portfolio", ScrollBehavior::Instant, gate, TIMEOUT, INTERVAL, now)
    }

    fn anchor(id: &str) -> ScrollGoal {
        ScrollGoal::Anchor(id.to_string())
    }

    #[test]
    fn test_open_gate_resolves_on_first_step() {
        let t0 = Instant::now();
        let locator = LateLocator::new(0);
        let mut vp = viewport();
        let mut a = attempt(anchor("projects"), MountGate::Open, t0);

        assert_eq!(a.step(t0, &locator, &mut vp, &instant()), AttemptState::Resolved);
        assert_eq!(vp.position().y, 940.0);
        assert_eq!(a.report().completion.map(|c| c.target_y), Some(940.0));
    }

    #[test]
    fn test_polls_until_found() {
        let t0 = Instant::now();
        let locator = LateLocator::new(3);
        let mut vp = viewport();
        let mut a = attempt(anchor("projects"), MountGate::Open, t0);

        for i in 0..3 {
            assert_eq!(a.step(t0 + ms(i * 100), &locator, &mut vp, &instant()), AttemptState::Polling);
        }
        // Between slots nothing happens
        a.step(t0 + ms(250), &locator, &mut vp, &instant());
        assert_eq!(locator.calls.get(), 3);

        assert_eq!(a.step(t0 + ms(300), &locator, &mut vp, &instant()), AttemptState::Resolved);
        assert_eq!(a.polls(), 4);
    }

    #[test]
    fn test_never_found_is_abandoned_after_bounded_polls() {
        let t0 = Instant::now();
        let locator = LateLocator::new(u32::MAX);
        let mut vp = viewport();
        let mut a = attempt(anchor("ghost"), MountGate::Open, t0);

        let mut now = t0;
        while !a.is_terminal() {
            a.step(now, &locator, &mut vp, &instant());
            now += INTERVAL;
        }

        assert_eq!(a.state(), AttemptState::Abandoned);
        assert_eq!(locator.calls.get(), 12);
        assert_eq!(vp.position().y, 0.0);
        assert_eq!(a.report().completion, None);
    }

    #[test]
    fn test_late_tick_skips_missed_slots() {
        let t0 = Instant::now();
        let locator = LateLocator::new(u32::MAX);
        let mut vp = viewport();
        let mut a = attempt(anchor("ghost"), MountGate::Open, t0);

        a.step(t0, &locator, &mut vp, &instant());
        a.step(t0 + ms(450), &locator, &mut vp, &instant());
        assert_eq!(locator.calls.get(), 2);
        assert_eq!(a.next_wakeup(), Some(t0 + ms(500)));
    }

    #[test]
    fn test_mounted_gate_waits_for_signal() {
        let t0 = Instant::now();
        let locator = LateLocator::new(0);
        let mut vp = viewport();
        let mut a = attempt(anchor("about"), MountGate::Mounted, t0);

        assert_eq!(a.step(t0 + ms(100), &locator, &mut vp, &instant()), AttemptState::Waiting);
        assert!(!a.signal(GateSignal::ExitComplete, "/portfolio"));
        assert!(!a.signal(GateSignal::Mounted, "/contact"));
        assert!(a.signal(GateSignal::Mounted, "/portfolio"));

        assert_eq!(a.step(t0 + ms(300), &locator, &mut vp, &instant()), AttemptState::Resolved);
        assert_eq!(locator.calls.get(), 1);
    }

    #[test]
    fn test_fixed_delay_gate() {
        let t0 = Instant::now();
        let locator = LateLocator::new(0);
        let mut vp = viewport();
        let gate = MountGate::for_strategy(SyncStrategy::FixedDelay(250), t0);
        let mut a = attempt(anchor("about"), gate, t0);

        assert_eq!(a.step(t0 + ms(200), &locator, &mut vp, &instant()), AttemptState::Waiting);
        assert_eq!(a.next_wakeup(), Some(t0 + ms(250)));
        assert_eq!(a.step(t0 + ms(250), &locator, &mut vp, &instant()), AttemptState::Resolved);
    }

    #[test]
    fn test_fixed_delay_past_timeout_keeps_full_poll_window() {
        let t0 = Instant::now();
        let locator = LateLocator::new(u32::MAX);
        let mut vp = viewport();
        let gate = MountGate::for_strategy(SyncStrategy::FixedDelay(1500), t0);
        let mut a = attempt(anchor("about"), gate, t0);
        assert_eq!(a.deadline(), t0 + ms(1500) + TIMEOUT);

        assert_eq!(a.step(t0 + ms(1300), &locator, &mut vp, &instant()), AttemptState::Waiting);
        assert_eq!(a.step(t0 + ms(1500), &locator, &mut vp, &instant()), AttemptState::Polling);

        let mut now = t0 + ms(1600);
        while !a.is_terminal() {
            a.step(now, &locator, &mut vp, &instant());
            now += INTERVAL;
        }
        assert_eq!(a.state(), AttemptState::Abandoned);
        assert_eq!(locator.calls.get(), 12);
    }

    #[test]
    fn test_gate_that_never_opens_is_abandoned() {
        let t0 = Instant::now();
        let locator = LateLocator::new(0);
        let mut vp = viewport();
        let mut a = attempt(anchor("about"), MountGate::ExitComplete, t0);

        assert_eq!(a.step(t0 + ms(1199), &locator, &mut vp, &instant()), AttemptState::Waiting);
        assert_eq!(a.step(t0 + TIMEOUT, &locator, &mut vp, &instant()), AttemptState::Abandoned);
        assert_eq!(locator.calls.get(), 0);
    }

    #[test]
    fn test_invalid_anchor_scrolls_top() {
        let t0 = Instant::now();
        let mut doc = Document::default();
        let body = doc.body();
        doc.mount_section(body, "section", "top", 3000.0).unwrap();
        doc.layout();
        let mut vp = viewport();
        vp.scroll_to(0.0, 800.0, ScrollBehavior::Instant);

        let mut a = attempt(anchor("1st"), MountGate::Open, t0);
        assert_eq!(a.step(t0, &doc, &mut vp, &instant()), AttemptState::Resolved);
        assert_eq!(vp.position().y, 0.0);
    }

    #[test]
    fn test_supersede_prevents_scroll() {
        let t0 = Instant::now();
        let locator = LateLocator::new(0);
        let mut vp = viewport();
        let mut a = attempt(anchor("about"), MountGate::Mounted, t0);
        let token = a.token();

        a.supersede(t0 + ms(50));
        assert!(token.is_cancelled());
        a.signal(GateSignal::Mounted, "/portfolio");
        assert_eq!(a.step(t0 + ms(100), &locator, &mut vp, &instant()), AttemptState::Superseded);
        assert_eq!(locator.calls.get(), 0);
        assert_eq!(a.report().elapsed, ms(50));
    }

    #[test]
    fn test_at_most_one_scroll() {
        let t0 = Instant::now();
        let locator = LateLocator::new(0);
        let mut vp = viewport();
        let mut a = attempt(ScrollGoal::Top, MountGate::Open, t0);

        a.step(t0, &locator, &mut vp, &instant());
        vp.scroll_to(0.0, 500.0, ScrollBehavior::Instant);
        a.step(t0 + ms(100), &locator, &mut vp, &instant());
        assert_eq!(vp.position().y, 500.0);
        assert_eq!(a.polls(), 1);
    }

    #[test]
    fn test_page_path_drops_query() {
        let t0 = Instant::now();
        let a = ScrollAttempt::new(
            AttemptId(7),
            anchor("service"),
            "/services?tab=ia",
            ScrollBehavior::Smooth,
            MountGate::Mounted,
            TIMEOUT,
            INTERVAL,
            t0,
        );
        assert_eq!(a.page_path(), "/services");
        assert_eq!(a.target_anchor_id(), Some("service"));
        assert_eq!(a.id().to_string(), "attempt#7");
    }
}
