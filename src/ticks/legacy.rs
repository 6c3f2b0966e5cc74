use super::{SubsectionSpan, TickCandidate, DEFAULT_BOUNDARY_TOLERANCE};

/// Accumulated values are recomputed from the step count this often, so
/// drift from repeated addition never builds up past a few ulps.
pub const RESNAP_STEPS: u64 = 64;

/// Sequential accumulation: `value += interval` from the first grid point
/// of the span's window.
///
/// Tiers are walked coarsest first. Zero intervals are skipped.
pub struct LegacyTickIter {
    span: SubsectionSpan,
    tier: usize,
    state: Option<Accumulator>,
}

struct Accumulator {
    interval: f64,
    limit: f64,
    origin: f64,
    value: f64,
    steps: u64,
}

impl LegacyTickIter {
    pub fn new(span: SubsectionSpan) -> Self {
        Self {
            span,
            tier: 0,
            state: None,
        }
    }

    /// Fast-forward to the first grid point at or above the window start.
    fn accumulator(&self, interval: f64) -> Option<Accumulator> {
        let (first, _) = self
            .span
            .index_range(interval, DEFAULT_BOUNDARY_TOLERANCE)?;
        let origin = self.span.anchor + interval * first as f64;
        Some(Accumulator {
            interval,
            limit: self.span.end + interval * DEFAULT_BOUNDARY_TOLERANCE,
            origin,
            value: origin,
            steps: 0,
        })
    }
}

impl Iterator for LegacyTickIter {
    type Item = TickCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let interval = *self.span.intervals.get(self.tier)?;

            if self.state.is_none() {
                self.state = self.accumulator(interval);
                if self.state.is_none() {
                    self.tier += 1;
                    continue;
                }
            }

            let Some(acc) = self.state.as_mut() else {
                continue;
            };

            if acc.value > acc.limit {
                self.state = None;
                self.tier += 1;
                continue;
            }

            let candidate = TickCandidate {
                value: acc.value,
                tier: self.tier,
                interval: acc.interval,
                subsection: self.span.index,
            };

            acc.steps += 1;
            acc.value += acc.interval;
            if acc.steps % RESNAP_STEPS == 0 {
                acc.value = acc.origin + acc.steps as f64 * acc.interval;
            }

            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: f64, end: f64, intervals: &[f64]) -> SubsectionSpan {
        SubsectionSpan {
            index: 0,
            anchor: start,
            start,
            end,
            intervals: intervals.to_vec(),
        }
    }

    #[test]
    fn accumulates_each_tier() {
        let values: Vec<(f64, usize)> = LegacyTickIter::new(span(1.0, 2.0, &[1.0, 0.5]))
            .map(|c| (c.value, c.tier))
            .collect();
        assert_eq!(values, vec![(1.0, 0), (2.0, 0), (1.0, 1), (1.5, 1), (2.0, 1)]);
    }

    #[test]
    fn zero_interval_tier_is_skipped() {
        let tiers: Vec<usize> = LegacyTickIter::new(span(3.0, 4.0, &[1.0, 0.0, 0.5]))
            .map(|c| c.tier)
            .collect();
        assert!(!tiers.contains(&1));
        assert_eq!(tiers.iter().filter(|&&t| t == 2).count(), 3);
    }

    #[test]
    fn reaches_subsection_end_despite_drift() {
        let last = LegacyTickIter::new(span(1.0, 2.0, &[0.01]))
            .last()
            .expect("ticks");
        assert!((last.value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn resnap_keeps_long_runs_on_grid() {
        let count = LegacyTickIter::new(span(0.0, 100.0, &[0.01])).count();
        assert_eq!(count, 10_001);
    }

    #[test]
    fn fast_forwards_to_window() {
        let span = SubsectionSpan {
            index: 0,
            anchor: 0.0,
            start: 999_000.0,
            end: 999_001.0,
            intervals: vec![0.1],
        };
        let values: Vec<f64> = LegacyTickIter::new(span).map(|c| c.value).collect();
        assert_eq!(values.len(), 11);
        assert!((values[10] - 999_001.0).abs() < 1e-6);
    }

    #[test]
    fn counts_back_from_anchor() {
        let span = SubsectionSpan {
            index: 0,
            anchor: 20.0,
            start: 0.0,
            end: 10.0,
            intervals: vec![5.0, 0.0, 1.0],
        };
        let ticks: Vec<(f64, usize)> = LegacyTickIter::new(span)
            .map(|c| (c.value, c.tier))
            .filter(|&(_, tier)| tier == 0)
            .collect();
        assert_eq!(ticks, vec![(0.0, 0), (5.0, 0), (10.0, 0)]);
    }
}
