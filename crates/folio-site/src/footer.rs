//! Site footer

use crate::routes::LEGAL;

pub const FOOTER_ID: &str = "footer";
pub const FOOTER_HEIGHT: f64 = 320.0;

/// Back-to-top button: a same-page request without an anchor
pub const BACK_TO_TOP_HREF: &str = "#";

/// Footer links, as authored
pub fn links() -> Vec<String> {
    vec![
        BACK_TO_TOP_HREF.to_string(),
        legal_href(),
        "mailto:hello@folio.example".to_string(),
        "https://github.com/folio".to_string(),
    ]
}

/// Legal notice link in hash-router form
pub fn legal_href() -> String {
    format!("#{LEGAL}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_nav::Href;

    #[test]
    fn test_legal_href_is_a_route() {
        assert_eq!(legal_href(), "#/mentions-legales");
        let Href::Local(local) = Href::parse(&legal_href()) else {
            panic!("expected a local href");
        };
        assert_eq!(local.path.as_deref(), Some(LEGAL));
    }

    #[test]
    fn test_external_links() {
        let external = links().iter().filter(|l| Href::parse(l).is_external()).count();
        assert_eq!(external, 2);
    }
}
