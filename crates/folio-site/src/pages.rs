//! Page mounting
//!
//! Each route renders a fixed stack of sections. Heights stand in for the
//! rendered content so that block layout yields realistic anchor offsets.

use folio_dom::{Document, DomResult, NodeId};

use crate::footer;
use crate::routes::PageKind;

/// One element of a page skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub tag: &'static str,
    pub id: String,
    /// Declared height; children can only grow it
    pub height: f64,
    pub children: Vec<SectionSpec>,
}

impl SectionSpec {
    fn new(tag: &'static str, id: &str, height: f64) -> Self {
        Self {
            tag,
            id: id.to_string(),
            height,
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<SectionSpec>) -> Self {
        self.children = children;
        self
    }
}

/// Section skeleton for a page
pub fn sections(kind: PageKind, service_ids: &[String]) -> Vec<SectionSpec> {
    let mut page = match kind {
        PageKind::Home => vec![
            SectionSpec::new("section", "accueil", 0.0)
                .with_children(vec![SectionSpec::new("header", "header", 900.0)]),
        ],
        PageKind::Portfolio => vec![
            SectionSpec::new("section", "portfolio", 640.0),
            SectionSpec::new("section", "about", 900.0),
            SectionSpec::new("section", "education", 900.0),
            SectionSpec::new("section", "skills", 800.0),
            SectionSpec::new("section", "experiences", 1100.0),
            SectionSpec::new("section", "projects", 1300.0),
            SectionSpec::new("section", "certifications", 600.0),
        ],
        PageKind::Services => {
            // Zero-height anchors, one per service, at the top of the listing
            let anchors = service_ids
                .iter()
                .map(|id| SectionSpec::new("div", id, 0.0))
                .collect();
            vec![
                SectionSpec::new("main", "services", 700.0).with_children(vec![
                    SectionSpec::new("div", "services-anchors", 0.0).with_children(anchors),
                    SectionSpec::new("nav", "services-nav", 120.0),
                ]),
                SectionSpec::new("section", "service", 1100.0),
            ]
        }
        PageKind::Contact => vec![SectionSpec::new("section", "contact", 1000.0)],
        PageKind::Legal => vec![SectionSpec::new("section", "mentions-legales", 1400.0)],
        PageKind::NotFound => vec![SectionSpec::new("section", "not-found", 720.0)],
    };

    if kind.has_footer() {
        page.push(SectionSpec::new("footer", footer::FOOTER_ID, footer::FOOTER_HEIGHT));
    }
    page
}

/// Replace the body content with the page for `kind`; returns the new document height
pub fn mount_page(doc: &mut Document, kind: PageKind, service_ids: &[String]) -> DomResult<f64> {
    doc.clear_body()?;
    let body = doc.body();
    for spec in sections(kind, service_ids) {
        mount_spec(doc, body, &spec)?;
    }
    let height = doc.layout();
    log::debug!("Mounted {:?} ({} px)", kind, height);
    Ok(height)
}

fn mount_spec(doc: &mut Document, parent: NodeId, spec: &SectionSpec) -> DomResult<()> {
    let node = doc.mount_section(parent, spec.tag, &spec.id, spec.height)?;
    for child in &spec.children {
        mount_spec(doc, node, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> Vec<String> {
        ["site-web", "application"].iter().map(|s| s.to_string()).collect()
    }

    fn top_of(doc: &Document, id: &str) -> f64 {
        let node = doc.get_element_by_id(id).unwrap();
        doc.bounding_rect(node).unwrap().top()
    }

    #[test]
    fn test_portfolio_layout() {
        let mut doc = Document::default();
        let height = mount_page(&mut doc, PageKind::Portfolio, &services()).unwrap();

        assert_eq!(top_of(&doc, "about"), 640.0);
        assert_eq!(top_of(&doc, "projects"), 640.0 + 900.0 + 900.0 + 800.0 + 1100.0);
        assert_eq!(height, 640.0 + 900.0 + 900.0 + 800.0 + 1100.0 + 1300.0 + 600.0 + footer::FOOTER_HEIGHT);
    }

    #[test]
    fn test_home_header_nested_in_accueil() {
        let mut doc = Document::default();
        mount_page(&mut doc, PageKind::Home, &services()).unwrap();
        let accueil = doc.get_element_by_id("accueil").unwrap();
        let header = doc.get_element_by_id("header").unwrap();
        assert!(doc.tree().is_ancestor(accueil, header));
        assert!(doc.get_element_by_id(footer::FOOTER_ID).is_none());
    }

    #[test]
    fn test_service_anchors_mounted() {
        let mut doc = Document::default();
        mount_page(&mut doc, PageKind::Services, &services()).unwrap();
        assert_eq!(top_of(&doc, "site-web"), 0.0);
        assert_eq!(top_of(&doc, "service"), 700.0);
    }

    #[test]
    fn test_remount_replaces_previous_page() {
        let mut doc = Document::default();
        mount_page(&mut doc, PageKind::Portfolio, &services()).unwrap();
        mount_page(&mut doc, PageKind::Contact, &services()).unwrap();

        assert!(doc.get_element_by_id("about").is_none());
        assert_eq!(top_of(&doc, "contact"), 0.0);
    }
}
