//! Scroll Behavior API
//!
//! The viewport is the only owner of the document scroll position; every
//! scroll goes through [`ScrollExecutor::scroll`].

use folio_dom::DOMRect;
use serde::Deserialize;

/// Scroll behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
    Instant,
}

/// Scroll position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

/// Options for one scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    /// Pixels kept free above the landed element (fixed header height)
    pub offset_px: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            offset_px: 0.0,
        }
    }
}

/// What to scroll to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    /// Document origin
    Top,
    /// An element's document-relative box
    Element(DOMRect),
}

/// Completion signal for one scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCompletion {
    /// Final vertical position once any animation finishes
    pub target_y: f64,
    /// Behavior actually used (smooth may degrade to instant)
    pub behavior: ScrollBehavior,
}

/// Performs viewport scrolls
pub trait ScrollExecutor {
    /// Perform exactly one scroll. Never fails.
    fn scroll(&mut self, target: ScrollTarget, options: &ScrollOptions) -> ScrollCompletion;

    /// Current scroll position
    fn position(&self) -> ScrollPosition;
}

/// Viewport scroll state
#[derive(Debug)]
pub struct Viewport {
    position: ScrollPosition,
    /// Visible height
    height: f64,
    /// Document height (from layout)
    content_height: f64,
    smooth_from: ScrollPosition,
    smooth_target: Option<ScrollPosition>,
    animation_progress: f64,
    smooth_duration_ms: f64,
    supports_smooth: bool,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Self {
            position: ScrollPosition::default(),
            height,
            content_height: height,
            smooth_from: ScrollPosition::default(),
            smooth_target: None,
            animation_progress: 0.0,
            smooth_duration_ms: 300.0,
            supports_smooth: true,
        }
    }

    /// Smooth scroll duration in milliseconds
    pub fn with_smooth_duration(mut self, ms: f64) -> Self {
        self.smooth_duration_ms = ms.max(0.0);
        self
    }

    /// Platforms without smooth scrolling jump instead
    pub fn with_smooth_support(mut self, supported: bool) -> Self {
        self.supports_smooth = supported;
        self
    }

    pub fn supports_smooth(&self) -> bool {
        self.supports_smooth
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Update the document height after layout; clamps the position
    pub fn set_content_height(&mut self, content_height: f64) {
        self.content_height = content_height.max(0.0);
        let max = self.max_scroll_y();
        if self.position.y > max {
            self.position.y = max;
        }
        if let Some(target) = self.smooth_target.as_mut() {
            target.y = target.y.min(max);
        }
    }

    /// Largest reachable vertical position
    pub fn max_scroll_y(&self) -> f64 {
        (self.content_height - self.height).max(0.0)
    }

    /// Scroll to an absolute position
    pub fn scroll_to(&mut self, x: f64, y: f64, behavior: ScrollBehavior) -> ScrollBehavior {
        let target = ScrollPosition {
            x: x.max(0.0),
            y: y.clamp(0.0, self.max_scroll_y()),
        };

        let effective = match behavior {
            ScrollBehavior::Smooth if self.supports_smooth && self.smooth_duration_ms > 0.0 => {
                ScrollBehavior::Smooth
            }
            ScrollBehavior::Smooth => ScrollBehavior::Instant,
            other => other,
        };

        match effective {
            ScrollBehavior::Smooth => {
                self.smooth_from = self.position;
                self.smooth_target = Some(target);
                self.animation_progress = 0.0;
            }
            ScrollBehavior::Instant | ScrollBehavior::Auto => {
                self.position = target;
                self.smooth_target = None;
            }
        }
        effective
    }

    /// Advance the smooth scroll animation; returns true while animating
    pub fn update(&mut self, delta_ms: f64) -> bool {
        let Some(target) = self.smooth_target else {
            return false;
        };

        self.animation_progress += delta_ms / self.smooth_duration_ms;
        if self.animation_progress >= 1.0 {
            self.position = target;
            self.smooth_target = None;
            return false;
        }

        // Ease-out cubic between the start and the target
        let t = 1.0 - (1.0 - self.animation_progress).powi(3);
        self.position.x = self.smooth_from.x + (target.x - self.smooth_from.x) * t;
        self.position.y = self.smooth_from.y + (target.y - self.smooth_from.y) * t;
        true
    }

    /// Check if smooth scrolling
    pub fn is_scrolling(&self) -> bool {
        self.smooth_target.is_some()
    }
}

impl ScrollExecutor for Viewport {
    fn scroll(&mut self, target: ScrollTarget, options: &ScrollOptions) -> ScrollCompletion {
        let (x, y) = match target {
            ScrollTarget::Top => (0.0, 0.0),
            ScrollTarget::Element(rect) => (self.position.x, rect.top() - options.offset_px),
        };

        let behavior = self.scroll_to(x, y, options.behavior);
        let target_y = self.smooth_target.map_or(self.position.y, |t| t.y);
        tracing::debug!("Viewport scroll to y={} ({:?})", target_y, behavior);

        ScrollCompletion { target_y, behavior }
    }

    fn position(&self) -> ScrollPosition {
        self.position
    }
}
