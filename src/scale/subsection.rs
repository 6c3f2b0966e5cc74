use std::collections::BTreeSet;

use super::precision::CursorPrecision;

/// A domain sub-range with its own tick interval hierarchy.
///
/// `tick_intervals` runs from the coarsest tier (index 0) to the finest. A
/// zero entry marks a skipped tier: no ticks are drawn for it, but the
/// tier still counts when assigning tick lengths and labels.
///
/// ```rust
/// use rulescale::{CursorPrecision, ScaleSubsection};
///
/// let sub = ScaleSubsection::new(1.0, [1.0, 0.1, 0.05, 0.01])
///     .with_label_levels([0, 1])
///     .with_precision(CursorPrecision::Fixed(2));
///
/// assert!(sub.is_labeled(1));
/// assert!(!sub.is_labeled(2));
/// assert_eq!(sub.decimal_places(1.0), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSubsection {
    /// Domain value where this subsection takes over.
    pub start_value: f64,
    /// Tick spacing per tier, coarsest first.
    pub tick_intervals: Vec<f64>,
    /// Tiers whose ticks carry a label.
    pub label_levels: BTreeSet<usize>,
    /// Cursor decimal place policy.
    pub cursor_precision: CursorPrecision,
}

impl ScaleSubsection {
    /// Create a subsection labeling only its coarsest tier.
    pub fn new(start_value: f64, tick_intervals: impl Into<Vec<f64>>) -> Self {
        Self {
            start_value,
            tick_intervals: tick_intervals.into(),
            label_levels: BTreeSet::from([0]),
            cursor_precision: CursorPrecision::Automatic,
        }
    }

    pub fn with_label_levels(mut self, levels: impl IntoIterator<Item = usize>) -> Self {
        self.label_levels = levels.into_iter().collect();
        self
    }

    pub fn with_precision(mut self, precision: CursorPrecision) -> Self {
        self.cursor_precision = precision;
        self
    }

    pub fn is_labeled(&self, tier: usize) -> bool {
        self.label_levels.contains(&tier)
    }

    /// Whether at least one tier actually produces ticks.
    pub fn has_positive_interval(&self) -> bool {
        self.tick_intervals.iter().any(|interval| *interval > 0.0)
    }

    /// Finest positive interval, if any.
    pub fn finest_interval(&self) -> Option<f64> {
        self.tick_intervals
            .iter()
            .copied()
            .filter(|interval| *interval > 0.0)
            .reduce(f64::min)
    }

    /// Cursor decimal places for readings inside this subsection.
    ///
    /// `zoom_level` is accepted for magnification-aware precision and does
    /// not change the result yet.
    pub fn decimal_places(&self, zoom_level: f64) -> usize {
        let _ = zoom_level;
        self.cursor_precision.decimal_places(&self.tick_intervals)
    }
}
