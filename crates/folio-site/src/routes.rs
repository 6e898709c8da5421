//! Site routes

use folio_nav::{normalize_path, RouteTable};

pub const HOME: &str = "/";
pub const PORTFOLIO: &str = "/portfolio";
pub const SERVICES: &str = "/services";
pub const CONTACT: &str = "/contact";
pub const LEGAL: &str = "/mentions-legales";

/// Which page view a path renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Portfolio,
    Services,
    Contact,
    Legal,
    NotFound,
}

impl PageKind {
    /// Anything unrecognised renders the not-found view
    pub fn from_path(path: &str) -> Self {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        match normalize_path(path).as_str() {
            HOME => Self::Home,
            PORTFOLIO => Self::Portfolio,
            SERVICES => Self::Services,
            CONTACT => Self::Contact,
            LEGAL => Self::Legal,
            _ => Self::NotFound,
        }
    }

    pub fn path(self) -> Option<&'static str> {
        match self {
            Self::Home => Some(HOME),
            Self::Portfolio => Some(PORTFOLIO),
            Self::Services => Some(SERVICES),
            Self::Contact => Some(CONTACT),
            Self::Legal => Some(LEGAL),
            Self::NotFound => None,
        }
    }

    /// Pages that end with the site footer
    pub fn has_footer(self) -> bool {
        !matches!(self, Self::Home | Self::NotFound)
    }
}

/// The site's route table
pub fn route_table() -> RouteTable {
    RouteTable::new([HOME, PORTFOLIO, SERVICES, CONTACT, LEGAL])
}
