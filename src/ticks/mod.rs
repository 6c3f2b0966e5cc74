//! Tick generation.
//!
//! Each subsection of a scale is handed to an enumeration strategy which
//! yields raw [`TickCandidate`]s tier by tier. The engine then drops
//! candidates outside the domain, positions the rest, merges coincident
//! ticks (the coarser tier wins) and attaches labels.
//!
//! Two strategies exist and are expected to agree:
//!
//! - [`TickAlgorithm::Legacy`]: sequential accumulation, re-snapped to the
//!   grid every [`legacy::RESNAP_STEPS`] steps.
//! - [`TickAlgorithm::Modulo`]: direct computation of `anchor + k·interval`.
//!
//! Each tier's grid is anchored at its subsection's start value and only
//! the grid points inside the subsection's window are visited, so values far
//! outside the domain never reach the budget.
//!
//! Every run shares one candidate budget across all subsections (see
//! [`GenerationLimits::tick_cap`]). Once the budget is spent enumeration
//! stops and whatever was produced is returned, so a misconfigured scale
//! yields a truncated result instead of an endless loop.

pub mod legacy;
pub mod modulo;
mod tick_iter;

use serde::{Deserialize, Serialize};

pub use legacy::LegacyTickIter;
pub use modulo::{ModuloConfig, ModuloTickIter};
pub use tick_iter::TickIter;

use crate::calculator::Projection;
use crate::config::GenerationLimits;
use crate::scale::{util, ScaleDefinition};

/// Fraction of an interval by which a tick may overshoot a boundary and
/// still be kept (snapped onto the boundary).
pub const DEFAULT_BOUNDARY_TOLERANCE: f64 = 1e-6;

/// Relative tick lengths for the first tiers; deeper tiers use
/// [`MIN_RELATIVE_LENGTH`].
const TIER_LENGTHS: [f64; 4] = [1.0, 0.75, 0.6, 0.5];

/// Relative length of ticks below the listed tiers.
pub const MIN_RELATIVE_LENGTH: f64 = 0.4;

/// A tick value as enumerated, before clipping and deduplication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickCandidate {
    pub value: f64,
    /// Tier index, 0 is the coarsest.
    pub tier: usize,
    /// Interval of the tier that produced this candidate.
    pub interval: f64,
    /// Index of the producing subsection in its definition.
    pub subsection: usize,
}

/// The stretch of domain one subsection covers.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsectionSpan {
    pub index: usize,
    /// Grid origin: the subsection's start value. May lie outside
    /// `[start, end]`.
    pub anchor: f64,
    /// Window within the domain, inclusive.
    pub start: f64,
    pub end: f64,
    pub intervals: Vec<f64>,
}

impl SubsectionSpan {
    /// First and last grid index `k` with `anchor + k·interval` inside the
    /// window, each end widened by `tolerance` intervals.
    ///
    /// `None` for skip tiers and for windows holding no grid point.
    pub fn index_range(&self, interval: f64, tolerance: f64) -> Option<(i64, i64)> {
        if !(interval.is_finite() && interval > 0.0) || self.end < self.start {
            return None;
        }
        let first = ((self.start - self.anchor) / interval - tolerance).ceil();
        let last = ((self.end - self.anchor) / interval + tolerance).floor();
        if !first.is_finite() || !last.is_finite() || first > last {
            return None;
        }
        // `as` saturates; the engine's budget bounds the walk anyway.
        Some((first as i64, last as i64))
    }

    /// Whether any tier yields a grid point in the window.
    pub fn has_ticks(&self, tolerance: f64) -> bool {
        self.intervals
            .iter()
            .any(|&interval| self.index_range(interval, tolerance).is_some())
    }
}

/// Tick enumeration strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickAlgorithm {
    /// Sequential accumulation.
    Legacy,
    /// Direct index computation.
    Modulo(ModuloConfig),
}

impl Default for TickAlgorithm {
    fn default() -> Self {
        Self::Modulo(ModuloConfig::default())
    }
}

impl TickAlgorithm {
    /// Candidate iterator for one subsection span.
    pub fn enumerate(&self, span: SubsectionSpan) -> TickIter {
        if !span.has_ticks(self.boundary_tolerance()) {
            return TickIter::empty();
        }
        match self {
            Self::Legacy => TickIter::from_legacy(LegacyTickIter::new(span)),
            Self::Modulo(config) => TickIter::from_modulo(ModuloTickIter::new(span, *config)),
        }
    }

    fn boundary_tolerance(&self) -> f64 {
        match self {
            Self::Legacy => DEFAULT_BOUNDARY_TOLERANCE,
            Self::Modulo(config) => config.boundary_tolerance,
        }
    }
}

/// Visual weight of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStyle {
    /// Length relative to a major tick (1.0).
    pub relative_length: f64,
}

impl TickStyle {
    pub fn for_tier(tier: usize) -> Self {
        Self {
            relative_length: TIER_LENGTHS.get(tier).copied().unwrap_or(MIN_RELATIVE_LENGTH),
        }
    }
}

/// A positioned, styled and possibly labeled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub value: f64,
    /// Position along the scale in `[0, 1]`.
    pub normalized_position: f64,
    pub tier: usize,
    pub style: TickStyle,
    pub label: Option<String>,
}

/// Result of one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedTicks {
    /// Tick marks ascending by normalized position.
    pub marks: Vec<TickMark>,
    /// Candidates drawn from the strategies, including discarded ones.
    pub enumerated: usize,
    /// Whether the candidate budget ran out.
    pub truncated: bool,
}

/// Global candidate counter shared by all subsections of one run.
struct TickBudget {
    remaining: usize,
}

impl TickBudget {
    fn new(cap: usize) -> Self {
        Self { remaining: cap }
    }

    fn take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

struct Positioned {
    candidate: TickCandidate,
    position: f64,
}

/// Split a definition's domain among its subsections.
///
/// Subsection `i` owns the window from its start to the next subsection's
/// start, clipped to the domain. The first subsection also owns everything
/// below its start, matching
/// [`ScaleDefinition::active_subsection`]. Empty windows are left out.
pub fn subsection_spans(definition: &ScaleDefinition) -> Vec<SubsectionSpan> {
    let (lo, hi) = definition.domain_bounds();
    let subsections = definition.subsections();

    subsections
        .iter()
        .enumerate()
        .filter_map(|(index, subsection)| {
            let start = if index == 0 {
                lo
            } else {
                subsection.start_value.max(lo)
            };
            let end = subsections
                .get(index + 1)
                .map_or(hi, |next| next.start_value.min(hi));
            if start > end {
                return None;
            }
            Some(SubsectionSpan {
                index,
                anchor: subsection.start_value,
                start,
                end,
                intervals: subsection.tick_intervals.clone(),
            })
        })
        .collect()
}

/// Enumerate, position, merge and label the ticks of `definition`.
///
/// Definitions violating `limits` produce an empty result.
pub fn generate(
    definition: &ScaleDefinition,
    algorithm: &TickAlgorithm,
    limits: &GenerationLimits,
) -> GeneratedTicks {
    if let Err(err) = definition.validate(limits) {
        tracing::warn!("Skipping tick generation: {}", err);
        return GeneratedTicks::default();
    }

    let projection = Projection::new(definition);
    let (lo, hi) = definition.domain_bounds();
    let tolerance = algorithm.boundary_tolerance();

    let mut budget = TickBudget::new(limits.tick_cap());
    let mut enumerated = 0;
    let mut truncated = false;
    let mut positioned = Vec::new();

    'spans: for span in subsection_spans(definition) {
        for candidate in algorithm.enumerate(span) {
            if !budget.take() {
                truncated = true;
                break 'spans;
            }
            enumerated += 1;

            let slack = candidate.interval * tolerance;
            let value = if candidate.value < lo {
                if lo - candidate.value > slack {
                    continue;
                }
                lo
            } else if candidate.value > hi {
                if candidate.value - hi > slack {
                    continue;
                }
                hi
            } else {
                candidate.value
            };

            let position = projection.normalize(value);
            if !position.is_finite() {
                continue;
            }

            positioned.push(Positioned {
                candidate: TickCandidate { value, ..candidate },
                position: position.clamp(0.0, 1.0),
            });
        }
    }

    if truncated {
        tracing::warn!(
            "Tick generation for scale '{}' stopped at the cap of {} candidates",
            definition.name(),
            limits.tick_cap()
        );
    }

    let merged = merge_coincident(positioned);
    let marks: Vec<TickMark> = merged
        .into_iter()
        .map(|Positioned { candidate, position }| TickMark {
            value: candidate.value,
            normalized_position: position,
            tier: candidate.tier,
            style: TickStyle::for_tier(candidate.tier),
            label: label_for(definition, &candidate),
        })
        .collect();

    tracing::debug!(
        "Generated {} tick marks for scale '{}' from {} candidates",
        marks.len(),
        definition.name(),
        enumerated
    );

    GeneratedTicks {
        marks,
        enumerated,
        truncated,
    }
}

/// Sort by position and collapse ticks sharing a value.
///
/// Of two coincident ticks the coarser tier survives; on equal tiers the
/// later subsection, which owns the value as its start, survives.
fn merge_coincident(mut ticks: Vec<Positioned>) -> Vec<Positioned> {
    ticks.sort_by(|a, b| {
        a.position
            .total_cmp(&b.position)
            .then(a.candidate.tier.cmp(&b.candidate.tier))
    });

    let mut merged: Vec<Positioned> = Vec::with_capacity(ticks.len());
    for tick in ticks {
        if let Some(last) = merged.last_mut() {
            let step = last.candidate.interval.min(tick.candidate.interval);
            let gap = (tick.candidate.value - last.candidate.value).abs();
            let coincident = gap <= util::epsilon_from_step(step);
            if coincident {
                let coarser = tick.candidate.tier < last.candidate.tier;
                let owns = tick.candidate.tier == last.candidate.tier
                    && tick.candidate.subsection > last.candidate.subsection;
                if coarser || owns {
                    *last = tick;
                }
                continue;
            }
        }
        merged.push(tick);
    }
    merged
}

fn label_for(definition: &ScaleDefinition, candidate: &TickCandidate) -> Option<String> {
    let subsection = definition.subsections().get(candidate.subsection)?;
    subsection
        .is_labeled(candidate.tier)
        .then(|| definition.format_label(candidate.value, candidate.subsection))
}
