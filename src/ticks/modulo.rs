use serde::{Deserialize, Serialize};

use super::{SubsectionSpan, TickCandidate, DEFAULT_BOUNDARY_TOLERANCE};

/// Settings for [`TickAlgorithm::Modulo`](super::TickAlgorithm::Modulo).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuloConfig {
    /// Fraction of an interval by which a tick may overshoot the subsection
    /// end (or the domain bounds) and still count as on the boundary.
    pub boundary_tolerance: f64,
}

impl Default for ModuloConfig {
    fn default() -> Self {
        Self {
            boundary_tolerance: DEFAULT_BOUNDARY_TOLERANCE,
        }
    }
}

/// Direct enumeration: `value = anchor + k * interval` for every `k` whose
/// value falls in the span's window.
///
/// No value depends on a previous one, so there is nothing to drift, and
/// the first in-window index is computed rather than walked to.
pub struct ModuloTickIter {
    span: SubsectionSpan,
    tolerance: f64,
    tier: usize,
    sweep: Option<Sweep>,
}

struct Sweep {
    interval: f64,
    current_index: i64,
    last_index: i64,
}

impl ModuloTickIter {
    pub fn new(span: SubsectionSpan, config: ModuloConfig) -> Self {
        Self {
            span,
            tolerance: config.boundary_tolerance,
            tier: 0,
            sweep: None,
        }
    }

    /// Sweep for one tier, or `None` when the tier produces nothing.
    fn sweep_for(&self, interval: f64) -> Option<Sweep> {
        let (first, last) = self.span.index_range(interval, self.tolerance)?;
        Some(Sweep {
            interval,
            current_index: first,
            last_index: last,
        })
    }
}

impl Iterator for ModuloTickIter {
    type Item = TickCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let interval = *self.span.intervals.get(self.tier)?;

            if self.sweep.is_none() {
                self.sweep = self.sweep_for(interval);
                if self.sweep.is_none() {
                    self.tier += 1;
                    continue;
                }
            }

            let Some(sweep) = self.sweep.as_mut() else {
                continue;
            };

            if sweep.current_index > sweep.last_index {
                self.sweep = None;
                self.tier += 1;
                continue;
            }

            let index = sweep.current_index;
            sweep.current_index += 1;

            return Some(TickCandidate {
                value: self.span.anchor + sweep.interval * index as f64,
                tier: self.tier,
                interval: sweep.interval,
                subsection: self.span.index,
            });
        }
    }
}
