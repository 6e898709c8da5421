//! String Interner - Deduplicate strings to save memory
//!
//! Tag names, ids and class names repeat on every mount of a page, so they
//! are stored once and referenced by ID.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for deduplicating strings
#[derive(Debug)]
pub struct StringInterner {
    /// Map from string content to index
    map: HashMap<Box<str>, u32>,
    /// Strings by index
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the site's common markup pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            map: HashMap::with_capacity(64),
            strings: Vec::with_capacity(64),
        };

        // Index 0 is always the empty string
        interner.intern("");

        const COMMON: &[&str] = &[
            "html", "head", "body", "div", "span", "p", "a", "button",
            "header", "footer", "nav", "main", "section", "article",
            "h1", "h2", "h3", "ul", "li", "form", "input", "textarea",
            "id", "class", "href", "role", "aria-current", "aria-label",
        ];
        for s in COMMON {
            interner.intern(s);
        }

        interner
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }

        let idx = self.strings.len() as u32;
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Resolve an ID back to its string
    pub fn resolve(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let mut interner = StringInterner::new();
        let a = interner.intern("projects");
        let b = interner.intern("projects");
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a), "projects");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let interner = StringInterner::new();
        let before = interner.len();
        assert!(interner.lookup("certifications").is_none());
        assert_eq!(interner.len(), before);
        assert_eq!(interner.lookup(""), Some(InternedString::EMPTY));
    }
}
