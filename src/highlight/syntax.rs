//! Style tag to label registry.

use std::collections::HashMap;

/// Maps overlay tags to caller-facing style labels (e.g. CSS class names).
///
/// Tag `0` is reserved for "no style" and can never be registered.
#[derive(Clone, Debug)]
pub struct StyleRegistry {
    labels: HashMap<u8, String>,
    by_label: HashMap<String, u8>,
    next_tag: u8,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self {
            labels: HashMap::new(),
            by_label: HashMap::new(),
            next_tag: 1,
        }
    }
}

impl StyleRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label with the next free tag.
    ///
    /// Returns `None` once all 255 tags are taken.
    pub fn register(&mut self, label: impl Into<String>) -> Option<u8> {
        let label = label.into();
        if let Some(&tag) = self.by_label.get(&label) {
            return Some(tag);
        }
        let tag = (self.next_tag..=u8::MAX).find(|t| !self.labels.contains_key(t))?;
        self.insert(tag, label);
        self.next_tag = tag.saturating_add(1);
        Some(tag)
    }

    /// Register a label under a specific tag. Tag `0` is ignored.
    pub fn register_with_tag(&mut self, tag: u8, label: impl Into<String>) {
        if tag == 0 {
            return;
        }
        if let Some(old) = self.labels.remove(&tag) {
            self.by_label.remove(&old);
        }
        self.insert(tag, label.into());
    }

    /// Label for a tag. Tag `0` always maps to `None`.
    #[must_use]
    pub fn label(&self, tag: u8) -> Option<&str> {
        if tag == 0 {
            return None;
        }
        self.labels.get(&tag).map(String::as_str)
    }

    /// Tag registered for a label.
    #[must_use]
    pub fn tag_for(&self, label: &str) -> Option<u8> {
        self.by_label.get(label).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Clear all labels.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.by_label.clear();
        self.next_tag = 1;
    }

    fn insert(&mut self, tag: u8, label: String) {
        self.by_label.insert(label.clone(), tag);
        self.labels.insert(tag, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_basic() {
        let mut registry = StyleRegistry::new();
        let tag = registry.register("keyword").unwrap();
        assert_eq!(tag, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.label(tag), Some("keyword"));
        assert_eq!(registry.tag_for("keyword"), Some(1));
    }

    #[test]
    fn test_register_same_label_reuses_tag() {
        let mut registry = StyleRegistry::new();
        let a = registry.register("ident");
        let b = registry.register("ident");
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tag_zero_is_no_style() {
        let mut registry = StyleRegistry::new();
        registry.register_with_tag(0, "never");
        assert!(registry.is_empty());
        assert_eq!(registry.label(0), None);
    }

    #[test]
    fn test_register_with_tag_skips_taken_tags() {
        let mut registry = StyleRegistry::new();
        registry.register_with_tag(1, "comment");
        assert_eq!(registry.register("string"), Some(2));

        registry.register_with_tag(1, "doc-comment");
        assert_eq!(registry.tag_for("comment"), None);
        assert_eq!(registry.label(1), Some("doc-comment"));
    }

    #[test]
    fn test_registry_exhaustion() {
        let mut registry = StyleRegistry::new();
        for i in 0..255 {
            assert!(registry.register(format!("s{i}")).is_some());
        }
        assert_eq!(registry.register("overflow"), None);
        registry.clear();
        assert_eq!(registry.register("again"), Some(1));
    }
}
