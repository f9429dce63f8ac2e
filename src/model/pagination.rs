use std::ops::Range;

/// Number of questions on a full page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number, as requested through the `page` query parameter.
///
/// Any integer is accepted. Pages before the first or after the last simply
/// select nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// The index range this page covers within a collection of `len` items,
    /// clipped to `0..len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        let size = QUESTIONS_PER_PAGE as i64;
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let start = self.0.saturating_sub(1).saturating_mul(size);
        let end = start.saturating_add(size);
        // Both bounds are within `0..=len` after clamping.
        let clip = |index: i64| index.clamp(0, len) as usize;
        clip(start)..clip(end)
    }

    /// Take this page out of an ordered collection.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let range = self.range(items.len());
        items
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

/// An absent or unparsable `page` parameter means the first page.
impl From<Option<i64>> for Page {
    fn from(number: Option<i64>) -> Self {
        number.map(Page::new).unwrap_or_default()
    }
}
