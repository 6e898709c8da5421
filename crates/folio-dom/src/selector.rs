//! Selectors
//!
//! Compound simple selectors only (`section`, `#about`, `.card`,
//! `section#about.card`). Combinators and attribute selectors are rejected
//! rather than silently matching nothing.

use crate::{DomTree, ElementData};

/// Selector parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Invalid identifier {ident:?}")]
    InvalidIdentifier { ident: String },

    #[error("Unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Combinators are not supported")]
    UnsupportedCombinator,
}

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

/// Compound selector: every part must match the same element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<SimpleSelector>,
}

impl Selector {
    /// Parse a compound selector
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(SelectorError::Empty);
        }
        if s.chars().any(char::is_whitespace) || s.contains(['>', '+', '~']) {
            return Err(SelectorError::UnsupportedCombinator);
        }

        let mut parts = Vec::new();
        let mut rest = s;
        let mut pos = 0;

        // Optional leading type or universal selector
        if let Some(tail) = rest.strip_prefix('*') {
            parts.push(SimpleSelector::Universal);
            rest = tail;
            pos += 1;
        } else if !rest.starts_with(['#', '.']) {
            let len = ident_len(rest);
            let tag = &rest[..len];
            validate_ident(tag)?;
            parts.push(SimpleSelector::Tag(tag.to_ascii_lowercase()));
            rest = &rest[len..];
            pos += len;
        }

        while let Some(ch) = rest.chars().next() {
            let body = &rest[ch.len_utf8()..];
            let len = ident_len(body);
            let ident = &body[..len];
            match ch {
                '#' => {
                    validate_ident(ident)?;
                    parts.push(SimpleSelector::Id(ident.to_string()));
                }
                '.' => {
                    validate_ident(ident)?;
                    parts.push(SimpleSelector::Class(ident.to_string()));
                }
                _ => return Err(SelectorError::UnexpectedChar { ch, pos }),
            }
            rest = &body[len..];
            pos += ch.len_utf8() + len;
        }

        Ok(Self { parts })
    }

    /// Selector for an element id, validated like any `#id` selector
    pub fn id(anchor: &str) -> Result<Self, SelectorError> {
        let anchor = anchor.trim_start_matches('#');
        if anchor.is_empty() {
            return Err(SelectorError::Empty);
        }
        Self::parse(&format!("#{anchor}"))
    }

    pub fn parts(&self) -> &[SimpleSelector] {
        &self.parts
    }

    /// The id part, if any
    pub fn id_part(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            SimpleSelector::Id(id) => Some(id.as_str()),
            _ => None,
        })
    }

    /// Check if element matches every part
    pub fn matches(&self, tree: &DomTree, elem: &ElementData) -> bool {
        self.parts.iter().all(|part| match part {
            SimpleSelector::Universal => true,
            SimpleSelector::Tag(tag) => tree.resolve(elem.tag) == tag,
            SimpleSelector::Id(id) => elem.id.map(|i| tree.resolve(i)) == Some(id.as_str()),
            SimpleSelector::Class(class) => tree
                .lookup(class)
                .is_some_and(|c| elem.has_class(c)),
        })
    }
}

/// Length in bytes of the identifier run at the start of `s`
fn ident_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// CSS identifier rules: no leading digit, no `-` followed by a digit
fn validate_ident(ident: &str) -> Result<(), SelectorError> {
    let invalid = || SelectorError::InvalidIdentifier { ident: ident.to_string() };
    let mut chars = ident.chars();
    match chars.next() {
        None => return Err(invalid()),
        Some(c) if c.is_ascii_digit() => return Err(invalid()),
        Some('-') => {
            if matches!(chars.next(), Some(c) if c.is_ascii_digit()) || ident == "-" {
                return Err(invalid());
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_selector_parse() {
        assert_eq!(Selector::parse("div").unwrap().parts(), &[SimpleSelector::Tag("div".into())]);
        assert_eq!(Selector::parse(".card").unwrap().parts(), &[SimpleSelector::Class("card".into())]);
        assert_eq!(Selector::parse("#about").unwrap().parts(), &[SimpleSelector::Id("about".into())]);
        assert_eq!(Selector::parse("*").unwrap().parts(), &[SimpleSelector::Universal]);
    }

    #[test]
    fn test_compound_selector() {
        let sel = Selector::parse("section#projects.dark").unwrap();
        assert_eq!(
            sel.parts(),
            &[
                SimpleSelector::Tag("section".into()),
                SimpleSelector::Id("projects".into()),
                SimpleSelector::Class("dark".into()),
            ]
        );
        assert_eq!(sel.id_part(), Some("projects"));
    }

    #[test]
    fn test_invalid_selectors() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(Selector::id(""), Err(SelectorError::Empty));
        assert!(matches!(Selector::parse("#1st"), Err(SelectorError::InvalidIdentifier { .. })));
        assert!(matches!(Selector::parse("#-2"), Err(SelectorError::InvalidIdentifier { .. })));
        assert!(matches!(Selector::parse("#"), Err(SelectorError::InvalidIdentifier { .. })));
        assert!(matches!(Selector::id("/mentions-legales"), Err(SelectorError::InvalidIdentifier { .. })));
        assert_eq!(Selector::parse("#about/x"), Err(SelectorError::UnexpectedChar { ch: '/', pos: 6 }));
        assert_eq!(Selector::parse("main section"), Err(SelectorError::UnsupportedCombinator));
    }

    #[test]
    fn test_id_accepts_hash_prefix() {
        assert_eq!(Selector::id("#contact").unwrap(), Selector::parse("#contact").unwrap());
        assert_eq!(Selector::id("site-web").unwrap().id_part(), Some("site-web"));
    }
}
