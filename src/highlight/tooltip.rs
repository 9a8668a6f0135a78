//! Point-lookup annotation ranges.

/// An annotated range `[start, end)` with an opaque caller key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipEntry {
    pub start: usize,
    pub end: usize,
    /// Caller-defined category byte.
    pub kind: u8,
    /// Lookup key into caller-owned data.
    pub key: u64,
}

impl TooltipEntry {
    #[must_use]
    pub fn new(start: usize, end: usize, kind: u8, key: u64) -> Self {
        Self {
            start,
            end,
            kind,
            key,
        }
    }

    /// Half-open containment test.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Unordered bag of tooltip ranges, searched linearly.
#[derive(Clone, Debug, Default)]
pub struct TooltipRegistry {
    entries: Vec<TooltipEntry>,
}

impl TooltipRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: TooltipEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// First registered entry containing `offset`.
    #[must_use]
    pub fn find_at(&self, offset: usize) -> Option<&TooltipEntry> {
        self.entries.iter().find(|entry| entry.contains(offset))
    }

    #[must_use]
    pub fn entries(&self) -> &[TooltipEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
