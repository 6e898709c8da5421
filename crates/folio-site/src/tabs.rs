//! Tabbed sections
//!
//! The portfolio tabs follow the location anchor; the services tabs follow
//! `?tab=<id>` or the last `#<id>` of the location.

use folio_nav::Location;

pub const PORTFOLIO_TABS: [&str; 6] = ["about", "skills", "experiences", "projects", "education", "certifications"];

pub const DEFAULT_SERVICES: [&str; 4] = ["site-web", "application", "ia-optimisation", "conseil-accompagnement"];

/// Portfolio tab strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioTabs {
    active: &'static str,
}

impl PortfolioTabs {
    pub fn new() -> Self {
        Self { active: PORTFOLIO_TABS[0] }
    }

    pub fn active(&self) -> &'static str {
        self.active
    }

    /// Follow the location anchor; unknown or missing anchors select the first tab
    pub fn sync(&mut self, location: &Location) {
        self.active = location
            .anchor
            .as_deref()
            .and_then(|anchor| PORTFOLIO_TABS.iter().find(|t| **t == anchor))
            .copied()
            .unwrap_or(PORTFOLIO_TABS[0]);
    }

    /// Select a tab by id; returns the same-page href to scroll to it
    pub fn select(&mut self, id: &str) -> Option<String> {
        let tab = *PORTFOLIO_TABS.iter().find(|t| **t == id)?;
        self.active = tab;
        Some(format!("#{tab}"))
    }
}

impl Default for PortfolioTabs {
    fn default() -> Self {
        Self::new()
    }
}

/// Services tab strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesTabs {
    ids: Vec<String>,
    active: usize,
}

impl ServicesTabs {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids, active: 0 }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn active(&self) -> Option<&str> {
        self.ids.get(self.active).map(String::as_str)
    }

    /// The anchor wins over `?tab=<id>`; otherwise the first service
    pub fn sync(&mut self, location: &Location) {
        let from_query = location.query_param("tab").and_then(|id| self.position(id));
        let from_anchor = location.anchor.as_deref().and_then(|id| self.position(id));
        self.active = from_anchor.or(from_query).unwrap_or(0);
    }

    /// Click on a service tab. Only switches the panel.
    pub fn select(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }
}

impl Default for ServicesTabs {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect())
    }
}
