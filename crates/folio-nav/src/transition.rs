//! Page transition lifecycle
//!
//! The outgoing page plays its exit animation, then the incoming page
//! mounts and plays its enter animation. Only one page is on screen at a
//! time, so the new page's sections exist from [`TransitionEvent::Mounted`]
//! onwards.

use std::time::{Duration, Instant};

/// Phase of the page transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageTransitionPhase {
    #[default]
    Idle,
    /// Old page animating out; the new page is not in the document yet
    Exiting,
    /// New page mounted and animating in
    Entering,
}

/// Lifecycle notifications, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// Exit animation finished; the host should swap the page now
    ExitComplete { path: String },
    /// The new page is in the document
    Mounted { path: String },
    /// Enter animation finished
    Settled,
}

/// Exit/enter animation clock for the routed page
#[derive(Debug)]
pub struct PageTransition {
    phase: PageTransitionPhase,
    /// Page being brought in
    target: Option<String>,
    phase_started: Option<Instant>,
    exit: Duration,
    enter: Duration,
    /// Mounted is emitted on the tick after ExitComplete
    mount_pending: bool,
}

impl PageTransition {
    pub fn new(exit: Duration, enter: Duration) -> Self {
        Self {
            phase: PageTransitionPhase::Idle,
            target: None,
            phase_started: None,
            exit,
            enter,
            mount_pending: false,
        }
    }

    pub fn phase(&self) -> PageTransitionPhase {
        self.phase
    }

    /// Path of the page currently being transitioned to
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == PageTransitionPhase::Idle && !self.mount_pending
    }

    /// Start moving to `path`.
    ///
    /// While already exiting, the running exit animation is kept and only
    /// the destination changes.
    pub fn begin(&mut self, path: &str, now: Instant) {
        match self.phase {
            PageTransitionPhase::Exiting => {
                tracing::debug!("Transition retargeted to {}", path);
            }
            PageTransitionPhase::Idle | PageTransitionPhase::Entering => {
                self.phase = PageTransitionPhase::Exiting;
                self.phase_started = Some(now);
                tracing::debug!("Transition to {} started", path);
            }
        }
        self.target = Some(path.to_string());
        self.mount_pending = false;
    }

    /// Advance the clock, returning the events that fired
    pub fn tick(&mut self, now: Instant) -> Vec<TransitionEvent> {
        let mut events = Vec::new();

        if self.mount_pending {
            self.mount_pending = false;
            if let Some(path) = &self.target {
                events.push(TransitionEvent::Mounted { path: path.clone() });
            }
        }

        let Some(started) = self.phase_started else {
            return events;
        };

        match self.phase {
            PageTransitionPhase::Exiting if now >= started + self.exit => {
                let path = self.target.clone().unwrap_or_default();
                self.phase = PageTransitionPhase::Entering;
                self.phase_started = Some(started + self.exit);
                self.mount_pending = true;
                events.push(TransitionEvent::ExitComplete { path });
            }
            PageTransitionPhase::Entering if now >= started + self.enter => {
                self.phase = PageTransitionPhase::Idle;
                self.phase_started = None;
                events.push(TransitionEvent::Settled);
            }
            _ => {}
        }

        events
    }
}

impl Default for PageTransition {
    fn default() -> Self {
        Self::new(Duration::from_millis(250), Duration::from_millis(250))
    }
}
