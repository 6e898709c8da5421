//! Folio Site
//!
//! The portfolio as a headless page session: routes and page skeletons,
//! the navbar, tab strips and footer, all wired to the anchor navigation
//! coordinator from `folio-nav`.
//!
//! ```rust,ignore
//! let mut site = Site::new(SiteConfig::default())?;
//! site.click("/portfolio#projects", Instant::now());
//! while !site.is_idle() {
//!     site.advance(Instant::now())?;
//! }
//! ```

pub mod app;
pub mod config;
pub mod footer;
pub mod navbar;
pub mod pages;
pub mod routes;
pub mod tabs;

pub use app::{Site, SITE_ORIGIN};
pub use config::SiteConfig;
pub use navbar::{NavItem, NavbarState};
pub use routes::PageKind;
pub use tabs::{PortfolioTabs, ServicesTabs};

use folio_dom::DomError;
use folio_nav::ConfigError;

/// Site session errors
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
