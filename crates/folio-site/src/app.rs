//! Page session
//!
//! One [`Site`] is one open tab: a document, a viewport, the hash router
//! and the navigation coordinator, plus the UI state that follows the
//! location (navbar, tab strips). All time comes in through `now`, so the
//! same session runs under the demo binary's timers and under tests.

use std::time::Instant;

use folio_dom::Document;
use folio_nav::{
    AttemptReport, Handled, HashRouter, Location, NavContext, NavCoordinator, NavigationRequest, Router,
    ScrollBehavior, ScrollExecutor, ScrollOptions, ScrollTarget, TransitionEvent, Viewport,
};

use crate::config::SiteConfig;
use crate::footer;
use crate::navbar::{self, NavbarState};
use crate::pages;
use crate::routes::{self, PageKind};
use crate::tabs::{PortfolioTabs, ServicesTabs};
use crate::SiteError;

/// Origin the hash locations are appended to
pub const SITE_ORIGIN: &str = "https://folio.local/";

/// A headless portfolio page session
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    doc: Document,
    viewport: Viewport,
    router: HashRouter,
    nav: NavCoordinator,
    page: PageKind,
    portfolio_tabs: PortfolioTabs,
    services_tabs: ServicesTabs,
    last_frame: Option<Instant>,
}

impl Site {
    /// Open the home page
    pub fn new(config: SiteConfig) -> Result<Self, SiteError> {
        config.validate()?;

        let mut doc = Document::new(SITE_ORIGIN);
        doc.set_width(config.viewport_width);
        let height = pages::mount_page(&mut doc, PageKind::Home, &config.services)?;

        let mut viewport = Viewport::new(config.viewport_height)
            .with_smooth_duration(config.nav.smooth_duration_ms as f64)
            .with_smooth_support(config.smooth_scroll);
        viewport.set_content_height(height);

        let router = HashRouter::new(
            routes::route_table(),
            config.nav.exit_duration(),
            config.nav.enter_duration(),
        );

        let mut site = Self {
            nav: NavCoordinator::new(config.nav.clone()),
            services_tabs: ServicesTabs::new(config.services.clone()),
            portfolio_tabs: PortfolioTabs::new(),
            page: PageKind::Home,
            config,
            doc,
            viewport,
            router,
            last_frame: None,
        };
        site.update_url();
        log::info!("Opened {}", site.url());
        Ok(site)
    }

    /// Click on any link or control carrying `href`
    pub fn click(&mut self, href: &str, now: Instant) -> Handled {
        let request = NavigationRequest::new(href, self.router.current_path());
        let handled = {
            let (nav, mut ctx) = self.split();
            nav.handle(&request, &mut ctx, now)
        };
        // The address bar keeps the anchor the way a fragment link would
        if let Some(dest) = handled.plan.destination.as_ref().filter(|_| handled.prevent_default) {
            self.router.set_anchor(dest.anchor_id.as_deref());
        }

        log::info!(
            "Click {:?} on {}: {:?}{}",
            href,
            request.current_page_path,
            handled.plan.action,
            handled.attempt.map(|id| format!(" ({id})")).unwrap_or_default()
        );

        self.sync_tabs();
        self.update_url();
        handled
    }

    /// Click a navbar entry by label
    pub fn click_nav_item(&mut self, label: &str, now: Instant) -> Option<Handled> {
        let item = navbar::find(label)?;
        Some(self.click(&item.href(), now))
    }

    /// Click a portfolio tab: the location anchor follows, then the section is scrolled to
    pub fn click_portfolio_tab(&mut self, id: &str, now: Instant) -> Option<Handled> {
        if self.page != PageKind::Portfolio {
            return None;
        }
        let href = self.portfolio_tabs.select(id)?;
        Some(self.click(&href, now))
    }

    /// Click a service tab; switches the panel without scrolling
    pub fn select_service(&mut self, id: &str) -> bool {
        self.page == PageKind::Services && self.services_tabs.select(id)
    }

    /// Footer back-to-top button
    pub fn back_to_top(&mut self, now: Instant) -> Handled {
        self.click(footer::BACK_TO_TOP_HREF, now)
    }

    /// Browser back button
    pub fn back(&mut self, now: Instant) -> bool {
        self.nav.cancel_pending(now);
        let moved = self.router.back(now).is_some();
        self.sync_tabs();
        self.update_url();
        moved
    }

    /// Browser forward button
    pub fn forward(&mut self, now: Instant) -> bool {
        self.nav.cancel_pending(now);
        let moved = self.router.forward(now).is_some();
        self.sync_tabs();
        self.update_url();
        moved
    }

    /// Run one frame: smooth scrolling, the page transition, then any
    /// pending scroll attempt. Returns the attempts that finished.
    pub fn advance(&mut self, now: Instant) -> Result<Vec<AttemptReport>, SiteError> {
        let delta_ms = self
            .last_frame
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f64() * 1000.0);
        self.last_frame = Some(now);
        self.viewport.update(delta_ms);

        let mut finished = Vec::new();
        for event in self.router.tick(now) {
            match event {
                TransitionEvent::ExitComplete { path } => {
                    let (nav, mut ctx) = self.split();
                    finished.extend(nav.on_exit_complete(&path, &mut ctx, now));
                    self.mount(&path)?;
                }
                TransitionEvent::Mounted { path } => {
                    let (nav, mut ctx) = self.split();
                    finished.extend(nav.on_mounted(&path, &mut ctx, now));
                }
                TransitionEvent::Settled => {
                    log::debug!("Transition to {} settled", self.router.location());
                }
            }
        }

        let (nav, mut ctx) = self.split();
        finished.extend(nav.tick(&mut ctx, now));

        for report in &finished {
            log::info!(
                "{} {:?} for {:?} on {} after {} polls ({:?})",
                report.id,
                report.state,
                report.goal,
                report.page_path,
                report.polls,
                report.elapsed
            );
        }
        Ok(finished)
    }

    /// Nothing left to animate or poll
    pub fn is_idle(&self) -> bool {
        self.nav.is_idle() && self.router.transition().is_idle() && !self.viewport.is_scrolling()
    }

    /// Close the session; pending attempts are dropped without scrolling
    pub fn teardown(&mut self, now: Instant) {
        self.nav.teardown(now);
        log::info!("Closed {}", self.url());
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    pub fn location(&self) -> &Location {
        self.router.location()
    }

    pub fn url(&self) -> &str {
        self.doc.url()
    }

    pub fn scroll_y(&self) -> f64 {
        self.viewport.position().y
    }

    pub fn navbar(&self) -> NavbarState {
        NavbarState::for_path(self.router.current_path())
    }

    pub fn portfolio_tab(&self) -> &'static str {
        self.portfolio_tabs.active()
    }

    pub fn active_service(&self) -> Option<&str> {
        self.services_tabs.active()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn router(&self) -> &HashRouter {
        &self.router
    }

    pub fn nav(&self) -> &NavCoordinator {
        &self.nav
    }

    /// Document-relative top of an element, if mounted
    pub fn section_top(&self, id: &str) -> Option<f64> {
        let node = self.doc.get_element_by_id(id)?;
        self.doc.bounding_rect(node).map(|rect| rect.top())
    }

    fn split(&mut self) -> (&mut NavCoordinator, NavContext<'_>) {
        (
            &mut self.nav,
            NavContext {
                locator: &self.doc,
                scroller: &mut self.viewport,
                router: &mut self.router,
            },
        )
    }

    /// Swap in the page for `path` and reset the viewport to its top
    fn mount(&mut self, path: &str) -> Result<(), SiteError> {
        let kind = PageKind::from_path(path);
        let height = pages::mount_page(&mut self.doc, kind, &self.config.services)?;
        self.page = kind;
        self.viewport.set_content_height(height);

        let reset = ScrollOptions {
            behavior: ScrollBehavior::Instant,
            offset_px: 0.0,
        };
        self.viewport.scroll(ScrollTarget::Top, &reset);

        self.sync_tabs();
        log::info!("Mounted {} ({:?}, {} px)", path, kind, height);
        Ok(())
    }

    fn sync_tabs(&mut self) {
        let location = self.router.location();
        match self.page {
            PageKind::Portfolio => self.portfolio_tabs.sync(location),
            PageKind::Services => self.services_tabs.sync(location),
            _ => {}
        }
    }

    fn update_url(&mut self) {
        let url = format!("{}{}", SITE_ORIGIN, self.router.location());
        self.doc.set_url(&url);
    }
}
