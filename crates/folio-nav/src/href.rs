//! Link classification
//!
//! Hrefs are authored by hand in markup, so parsing never fails: anything
//! that is not an absolute URL is read as a site-local path and/or anchor.

use url::Url;

/// A classified href
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    /// Absolute URL (`https://…`, `mailto:…`, `tel:…`); the browser handles it
    External(Url),
    /// Site-local link
    Local(LocalHref),
}

/// Site-local link parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalHref {
    /// Normalized page path; `None` means "the current page"
    pub path: Option<String>,
    /// Query string without the `?`
    pub query: Option<String>,
    /// Anchor id without the `#`
    pub anchor: Option<String>,
}

impl LocalHref {
    /// Path plus query, as handed to the router; no path means `current`
    pub fn route_target(&self, current: &str) -> String {
        let path = self.path.as_deref().unwrap_or(current);
        match &self.query {
            Some(q) => format!("{path}?{q}"),
            None => path.to_string(),
        }
    }
}

impl Href {
    /// Classify a raw href
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Ok(url) = Url::parse(raw) {
            // "c:..." style strings parse as URLs too; only real schemes count
            if url.scheme().len() > 1 {
                return Href::External(url);
            }
        }

        // Hash-router location: "#/services?tab=x#site-web"
        if let Some(route) = raw.strip_prefix("#/") {
            return Href::Local(parse_path_form(&format!("/{route}")));
        }

        if let Some(anchor) = raw.strip_prefix('#') {
            return Href::Local(LocalHref {
                path: None,
                query: None,
                anchor: non_empty(anchor),
            });
        }

        Href::Local(parse_path_form(raw))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Href::External(_))
    }
}

fn parse_path_form(raw: &str) -> LocalHref {
    let (before_hash, anchor) = match raw.split_once('#') {
        Some((before, anchor)) => (before, non_empty(anchor)),
        None => (raw, None),
    };
    let (path, query) = match before_hash.split_once('?') {
        Some((path, query)) => (path, non_empty(query)),
        None => (before_hash, None),
    };

    LocalHref {
        path: if path.is_empty() { None } else { Some(normalize_path(path)) },
        query,
        anchor,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Leading `/` added, trailing `/` dropped (except for the root)
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Does `href` only move within the page at `current_path`?
pub fn is_same_page_anchor(href: &str, current_path: &str) -> bool {
    match Href::parse(href) {
        Href::External(_) => false,
        Href::Local(local) => {
            local.anchor.is_some()
                && local.query.is_none()
                && local
                    .path
                    .as_deref()
                    .is_none_or(|p| p == normalize_path(current_path))
        }
    }
}
