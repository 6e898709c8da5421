//! Top navigation bar

use folio_nav::normalize_path;

use crate::routes::{CONTACT, HOME, PORTFOLIO, SERVICES};

/// One navbar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    /// Section the item lands on
    pub hash: &'static str,
}

impl NavItem {
    /// Href handed to the coordinator on click
    pub fn href(&self) -> String {
        format!("{}{}", self.path, self.hash)
    }
}

pub const ITEMS: [NavItem; 4] = [
    NavItem { path: HOME, label: "Accueil", hash: "#header" },
    NavItem { path: PORTFOLIO, label: "Portfolio", hash: "#about" },
    NavItem { path: SERVICES, label: "Services", hash: "#services" },
    NavItem { path: CONTACT, label: "Contact", hash: "#contact" },
];

/// Navbar state derived from the current path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarState {
    /// Index into [`ITEMS`]
    pub active: Option<usize>,
    /// Dark text everywhere except over the home hero
    pub dark_text: bool,
}

impl NavbarState {
    pub fn for_path(path: &str) -> Self {
        let path = normalize_path(path);
        Self {
            active: ITEMS.iter().position(|item| item.path == path),
            dark_text: path != HOME,
        }
    }

    pub fn active_item(&self) -> Option<&'static NavItem> {
        self.active.and_then(|i| ITEMS.get(i))
    }
}

/// Item whose label matches, ignoring case
pub fn find(label: &str) -> Option<&'static NavItem> {
    ITEMS.iter().find(|item| item.label.eq_ignore_ascii_case(label))
}
