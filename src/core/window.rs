use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_INITIAL_WINDOW, DEFAULT_PAGE_STEP};

/// Rendered-prefix length of the contact list.
///
/// The whole collection always stays in memory; only the number of leading
/// contacts shown grows. There is no upper bound: growing past
/// the collection length is a no-op for the visible slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    size: usize,
    step: usize,
    loading: bool,
}

impl ListWindow {
    /// Window starting at `initial` rows, growing by `step`.
    pub fn new(initial: usize, step: usize) -> Self {
        Self {
            size: initial,
            step,
            loading: false,
        }
    }

    /// Nominal window size; may exceed the collection.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a simulated fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rows rendered for a collection of `total`.
    pub fn visible_len(&self, total: usize) -> usize {
        self.size.min(total)
    }

    /// Marks a simulated fetch as in flight. Returns false if one already is.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Completes the in-flight fetch, returning the new window size.
    pub fn finish_load(&mut self) -> usize {
        self.size = self.size.saturating_add(self.step);
        self.loading = false;
        self.size
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_WINDOW, DEFAULT_PAGE_STEP)
    }
}

/// Scroll position reported by the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: f64,
    /// Visible height of the list.
    pub viewport_len: f64,
    /// Total height of the rendered content.
    pub content_len: f64,
}

impl ScrollMetrics {
    fn distance_from_end(&self) -> f64 {
        self.content_len - (self.offset + self.viewport_len)
    }
}

/// How close to the end a scroll must come to count as "end reached".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EndReachedPolicy {
    /// Within this many viewport lengths of the end.
    Fraction(f64),
    /// Within this many pixels of the end.
    Pixels(f64),
}

impl EndReachedPolicy {
    /// Whether `metrics` is close enough to the end to load more.
    pub fn is_end_reached(&self, metrics: &ScrollMetrics) -> bool {
        let remaining = metrics.distance_from_end();
        match *self {
            Self::Fraction(f) => remaining <= f * metrics.viewport_len,
            Self::Pixels(p) => remaining <= p,
        }
    }
}

impl Default for EndReachedPolicy {
    fn default() -> Self {
        Self::Fraction(0.5)
    }
}
