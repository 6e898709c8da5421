//! End-to-end navigation scenarios

use std::time::{Duration, Instant};

use folio_dom::Document;
use folio_nav::{
    AttemptState, HashRouter, NavAction, NavConfig, NavContext, NavCoordinator, NavigationRequest, Router, ScrollBehavior,
    ScrollCompletion, ScrollExecutor, ScrollOptions, ScrollPosition, ScrollTarget, TransitionEvent, Viewport,
};
use folio_site::{pages, routes, PageKind, Site, SiteConfig};
use pretty_assertions::assert_eq;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Viewport that records every scroll call
struct Recorder {
    viewport: Viewport,
    calls: Vec<(ScrollTarget, ScrollBehavior)>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            viewport: Viewport::new(720.0),
            calls: Vec::new(),
        }
    }
}

impl ScrollExecutor for Recorder {
    fn scroll(&mut self, target: ScrollTarget, options: &ScrollOptions) -> ScrollCompletion {
        self.calls.push((target, options.behavior));
        self.viewport.scroll(target, options)
    }

    fn position(&self) -> ScrollPosition {
        self.viewport.position()
    }
}

/// Coordinator host whose page mounting can be sabotaged
struct Harness {
    doc: Document,
    scroller: Recorder,
    router: HashRouter,
    nav: NavCoordinator,
    /// Section ids that never make it into the document
    missing: Vec<&'static str>,
}

impl Harness {
    /// Open `start` with its transition settled; returns the harness and a
    /// clock reading after it went idle
    fn new(start: &str) -> (Self, Instant) {
        let config = NavConfig::default();
        let mut harness = Self {
            doc: Document::default(),
            scroller: Recorder::new(),
            router: HashRouter::new(routes::route_table(), config.exit_duration(), config.enter_duration()),
            nav: NavCoordinator::new(config),
            missing: Vec::new(),
        };
        harness.mount(start);

        let base = Instant::now();
        if start != routes::HOME {
            // Settle the initial transition without the coordinator
            harness.router.navigate(start, base);
            harness.router.tick(base + ms(250));
            harness.router.tick(base + ms(250));
            harness.router.tick(base + ms(500));
        }
        assert!(harness.router.transition().is_idle());
        (harness, base + ms(1000))
    }

    /// Mount the top-level sections of a page, minus the missing ones
    fn mount(&mut self, path: &str) {
        let services = vec!["site-web".to_string()];
        let mut sections = pages::sections(PageKind::from_path(path), &services);
        sections.retain(|s| !self.missing.contains(&s.id.as_str()));

        self.doc.clear_body().unwrap();
        let body = self.doc.body();
        for spec in &sections {
            self.doc.mount_section(body, spec.tag, &spec.id, spec.height).unwrap();
        }
        let height = self.doc.layout();
        self.scroller.viewport.set_content_height(height);
    }

    fn ctx(&mut self) -> (&mut NavCoordinator, NavContext<'_>) {
        (
            &mut self.nav,
            NavContext {
                locator: &self.doc,
                scroller: &mut self.scroller,
                router: &mut self.router,
            },
        )
    }

    fn click(&mut self, href: &str, now: Instant) -> folio_nav::Handled {
        let request = NavigationRequest::new(href, self.router.location().path.clone());
        let (nav, mut ctx) = self.ctx();
        nav.handle(&request, &mut ctx, now)
    }

    fn run(&mut self, from: Instant, until: Instant) {
        let mut now = from;
        while now <= until {
            for event in self.router.tick(now) {
                match event {
                    TransitionEvent::ExitComplete { path } => self.mount(&path),
                    TransitionEvent::Mounted { path } => {
                        let (nav, mut ctx) = self.ctx();
                        nav.on_mounted(&path, &mut ctx, now);
                    }
                    TransitionEvent::Settled => {}
                }
            }
            let (nav, mut ctx) = self.ctx();
            nav.tick(&mut ctx, now);
            now += ms(10);
        }
    }
}

#[test]
fn scenario_same_page_anchor_scrolls_once_smoothly() {
    let (mut h, t0) = Harness::new(routes::CONTACT);

    let handled = h.click("#contact", t0);
    assert_eq!(handled.plan.action, NavAction::ScrollOnly("contact".into()));
    assert!(handled.route.is_none());

    h.run(t0, t0 + ms(500));
    assert_eq!(h.scroller.calls.len(), 1);
    assert!(matches!(h.scroller.calls[0], (ScrollTarget::Element(_), ScrollBehavior::Smooth)));
    assert_eq!(h.nav.last_report().map(|r| r.polls), Some(1));
}

#[test]
fn scenario_cross_page_navigates_then_scrolls() {
    let (mut h, t0) = Harness::new(routes::HOME);

    let handled = h.click("/portfolio#about", t0);
    assert_eq!(
        handled.plan.action,
        NavAction::NavigateThenScroll { path: "/portfolio".into(), anchor: Some("about".into()) }
    );
    assert_eq!(h.router.location().path, "/portfolio");
    assert!(h.scroller.calls.is_empty());

    h.run(t0, t0 + ms(800));
    assert_eq!(h.scroller.calls.len(), 1);
    let report = h.nav.last_report().cloned().unwrap();
    assert_eq!(report.state, AttemptState::Resolved);
    assert_eq!(report.completion.map(|c| c.target_y), Some(640.0 - 60.0));
}

#[test]
fn scenario_anchor_never_mounts_is_abandoned() {
    let (mut h, t0) = Harness::new(routes::HOME);
    h.missing.push("about");

    h.click("/portfolio#about", t0);
    h.run(t0, t0 + ms(2000));

    assert_eq!(h.router.location().path, "/portfolio");
    assert!(h.doc.get_element_by_id("projects").is_some());
    assert!(h.scroller.calls.is_empty());
    let report = h.nav.last_report().cloned().unwrap();
    assert_eq!(report.state, AttemptState::Abandoned);
    assert_eq!(report.polls, 12);
    assert!(h.nav.is_idle());
}

#[test]
fn scenario_rapid_clicks_scroll_only_to_the_last() {
    let t0 = Instant::now();
    let mut site = Site::new(SiteConfig::default()).unwrap();

    let first = site.click_nav_item("Portfolio", t0).unwrap();
    let second = site.click_nav_item("Contact", t0 + ms(40)).unwrap();
    assert_ne!(first.attempt, second.attempt);

    let mut now = t0 + ms(40);
    while now <= t0 + ms(1000) {
        site.advance(now).unwrap();
        now += ms(16);
    }

    let states: Vec<_> = site.nav().reports().map(|r| (r.page_path.clone(), r.state)).collect();
    assert_eq!(
        states,
        vec![
            ("/portfolio".to_string(), AttemptState::Superseded),
            ("/contact".to_string(), AttemptState::Resolved),
        ]
    );
    assert_eq!(site.page(), PageKind::Contact);
    assert_eq!(site.nav().scroll_count(), 1);
}

#[test]
fn legal_link_from_footer() {
    let t0 = Instant::now();
    let mut site = Site::new(SiteConfig::default()).unwrap();
    site.click("/contact", t0);

    let mut now = t0;
    while now <= t0 + ms(600) {
        site.advance(now).unwrap();
        now += ms(16);
    }

    let t1 = now;
    site.click(&folio_site::footer::legal_href(), t1);
    let mut now = t1;
    while !site.is_idle() && now <= t1 + ms(3000) {
        site.advance(now).unwrap();
        now += ms(16);
    }

    assert_eq!(site.page(), PageKind::Legal);
    assert_eq!(site.url(), "https://folio.local/#/mentions-legales");
    assert_eq!(site.scroll_y(), 0.0);
}

#[test]
fn teardown_drops_pending_scroll() {
    let t0 = Instant::now();
    let mut site = Site::new(SiteConfig::default()).unwrap();
    site.click("/portfolio#projects", t0);
    site.teardown(t0 + ms(100));

    let mut now = t0 + ms(100);
    while now <= t0 + ms(2000) {
        site.advance(now).unwrap();
        now += ms(16);
    }

    assert_eq!(site.scroll_y(), 0.0);
    assert_eq!(site.nav().last_report().map(|r| r.state), Some(AttemptState::Abandoned));
    assert_eq!(site.nav().scroll_count(), 0);
}
