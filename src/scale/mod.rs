//! Scale definitions.
//!
//! A [`ScaleDefinition`] names a [`ScaleFunction`], a domain, a physical
//! length and layout, and the [`ScaleSubsection`]s that say how densely the
//! domain is ticked. Definitions are immutable; they are assembled with
//! [`ScaleDefinition::builder`], which validates them.
//!
//! # Examples
//!
//! ```rust
//! use rulescale::{ScaleCalculator, ScaleDefinition, ScaleFunction, ScaleSubsection};
//!
//! let c = ScaleDefinition::builder("C", ScaleFunction::Logarithmic, 1.0, 10.0)
//!     .length(250.0)
//!     .subsection(ScaleSubsection::new(1.0, [1.0, 0.1, 0.05, 0.01]))
//!     .subsection(ScaleSubsection::new(2.0, [1.0, 0.5, 0.1, 0.02]))
//!     .subsection(ScaleSubsection::new(4.0, [1.0, 0.5, 0.1, 0.05]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(ScaleCalculator::normalized_position(1.0, &c), 0.0);
//! assert_eq!(c.cursor_decimal_places(0.1, 1.0), 3);
//! assert_eq!(c.format_for_cursor(f64::NAN, 0.5, 1.0), "—");
//! ```

pub mod precision;
mod subsection;
pub mod util;

pub use precision::{CursorPrecision, NON_FINITE_DISPLAY};
pub use subsection::ScaleSubsection;

use crate::calculator::ScaleCalculator;
use crate::config::GenerationLimits;
use crate::error::{Error, Result};
use crate::function::ScaleFunction;

/// Scale length used when the builder is not given one, in points.
pub const DEFAULT_SCALE_LENGTH: f64 = 250.0;

/// Values this close (relative) to an integer get integer labels.
const INTEGRAL_TOLERANCE: f64 = 1e-9;

/// Produces label text from a tick value and the decimal places resolved
/// for its subsection.
pub type LabelFormatter = fn(value: f64, decimal_places: usize) -> String;

/// How the scale is laid out physically.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ScaleLayout {
    #[default]
    Linear,
    Circular { diameter: f64, radius: f64 },
}

impl ScaleLayout {
    /// Radius of a circular layout: `radius` when positive, otherwise half
    /// the `diameter`. `None` for linear layouts.
    pub fn circle_radius(&self) -> Option<f64> {
        match *self {
            Self::Linear => None,
            Self::Circular { diameter, radius } => {
                Some(if radius > 0.0 { radius } else { diameter / 2.0 })
            }
        }
    }
}

/// Side of the baseline the ticks grow towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TickDirection {
    #[default]
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// A specially marked value such as π or e.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConstant {
    pub label: String,
    pub value: f64,
}

/// A complete, validated scale.
#[derive(Debug, Clone)]
pub struct ScaleDefinition {
    name: String,
    function: ScaleFunction,
    begin_value: f64,
    end_value: f64,
    scale_length_in_points: f64,
    layout: ScaleLayout,
    tick_direction: TickDirection,
    subsections: Vec<ScaleSubsection>,
    label_color: Option<LabelColor>,
    label_formatter: Option<LabelFormatter>,
    constants: Vec<ScaleConstant>,
}

/// Default tick label: integer form for integral values, otherwise the
/// value at `decimal_places` with trailing zeros removed.
///
/// ```rust
/// use rulescale::scale::default_label;
///
/// assert_eq!(default_label(3.0, 3), "3");
/// assert_eq!(default_label(1.5, 3), "1.5");
/// assert_eq!(default_label(0.1 + 0.2, 3), "0.3");
/// ```
pub fn default_label(value: f64, decimal_places: usize) -> String {
    let rounded = value.round();
    if (value - rounded).abs() <= INTEGRAL_TOLERANCE * value.abs().max(1.0) {
        return precision::format_value(rounded, 0);
    }
    let text = precision::format_value(value, decimal_places);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

impl ScaleDefinition {
    /// Start building a definition over `[begin_value, end_value]`.
    pub fn builder(
        name: impl Into<String>,
        function: ScaleFunction,
        begin_value: f64,
        end_value: f64,
    ) -> ScaleDefinitionBuilder {
        ScaleDefinitionBuilder {
            definition: Self {
                name: name.into(),
                function,
                begin_value,
                end_value,
                scale_length_in_points: DEFAULT_SCALE_LENGTH,
                layout: ScaleLayout::Linear,
                tick_direction: TickDirection::Up,
                subsections: Vec::new(),
                label_color: None,
                label_formatter: None,
                constants: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn function(&self) -> &ScaleFunction {
        &self.function
    }

    pub const fn begin_value(&self) -> f64 {
        self.begin_value
    }

    pub const fn end_value(&self) -> f64 {
        self.end_value
    }

    pub const fn scale_length_in_points(&self) -> f64 {
        self.scale_length_in_points
    }

    pub const fn layout(&self) -> ScaleLayout {
        self.layout
    }

    pub const fn tick_direction(&self) -> TickDirection {
        self.tick_direction
    }

    /// Subsections in ascending order of start value.
    pub fn subsections(&self) -> &[ScaleSubsection] {
        &self.subsections
    }

    pub const fn label_color(&self) -> Option<LabelColor> {
        self.label_color
    }

    pub fn constants(&self) -> &[ScaleConstant] {
        &self.constants
    }

    /// Whether values decrease along the scale.
    pub fn is_inverted(&self) -> bool {
        self.begin_value > self.end_value
    }

    /// `|end - begin|`.
    pub fn span(&self) -> f64 {
        (self.end_value - self.begin_value).abs()
    }

    /// `(min, max)` of the domain regardless of direction.
    pub fn domain_bounds(&self) -> (f64, f64) {
        util::sorted_pair(self.begin_value, self.end_value)
    }

    /// Index of the subsection governing `value`: the last one starting at
    /// or below `value`, else the first.
    pub fn active_subsection_index(&self, value: f64) -> Option<usize> {
        self.subsections
            .iter()
            .rposition(|subsection| subsection.start_value <= value)
            .or_else(|| (!self.subsections.is_empty()).then_some(0))
    }

    pub fn active_subsection(&self, value: f64) -> Option<&ScaleSubsection> {
        self.active_subsection_index(value)
            .and_then(|index| self.subsections.get(index))
    }

    /// Cursor decimal places for a domain value.
    pub fn decimal_places(&self, value: f64, zoom_level: f64) -> usize {
        self.active_subsection(value)
            .map_or(precision::FALLBACK_DECIMAL_PLACES, |subsection| {
                subsection.decimal_places(zoom_level)
            })
    }

    /// Cursor decimal places at a normalized position.
    pub fn cursor_decimal_places(&self, position: f64, zoom_level: f64) -> usize {
        let value = ScaleCalculator::value(position, self);
        self.decimal_places(value, zoom_level)
    }

    /// Cursor readout for `value` with the precision in force at `position`.
    ///
    /// NaN and infinite values render as [`NON_FINITE_DISPLAY`].
    pub fn format_for_cursor(&self, value: f64, position: f64, zoom_level: f64) -> String {
        if !value.is_finite() {
            return NON_FINITE_DISPLAY.to_string();
        }
        precision::format_value(value, self.cursor_decimal_places(position, zoom_level))
    }

    /// Label text for a tick value belonging to subsection `subsection`.
    pub fn format_label(&self, value: f64, subsection: usize) -> String {
        let places = self
            .subsections
            .get(subsection)
            .map_or(precision::FALLBACK_DECIMAL_PLACES, |s| {
                s.cursor_precision.decimal_places(&s.tick_intervals)
            });
        let formatter = self.label_formatter.unwrap_or(default_label);
        formatter(value, places)
    }

    /// Check the definition against `limits`.
    pub fn validate(&self, limits: &GenerationLimits) -> Result<()> {
        let name = || self.name.clone();
        let (begin, end) = (self.begin_value, self.end_value);

        if !begin.is_finite() || !end.is_finite() {
            return Err(Error::NonFiniteDomain {
                name: name(),
                begin,
                end,
            });
        }
        if begin == end {
            return Err(Error::EmptyDomain {
                name: name(),
                value: begin,
            });
        }
        let length = self.scale_length_in_points;
        if !(length.is_finite() && length > 0.0) {
            return Err(Error::InvalidLength {
                name: name(),
                length,
            });
        }
        if let Some(radius) = self.layout.circle_radius() {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(Error::InvalidLayout { name: name() });
            }
        }
        self.function
            .validate()
            .map_err(|reason| Error::InvalidFunction {
                name: name(),
                reason,
            })?;

        let span = self.span();
        let multi_cycle_limit = limits.multi_cycle_span_cap();
        if self.function.is_multi_cycle() && !(span <= multi_cycle_limit) {
            return Err(Error::MultiCycleSpan {
                name: name(),
                span,
                limit: multi_cycle_limit,
            });
        }
        let domain_limit = limits.domain_span_cap();
        if !(span <= domain_limit) {
            return Err(Error::ExcessiveSpan {
                name: name(),
                span,
                limit: domain_limit,
            });
        }

        let (f_begin, f_end) = (self.function.transform(begin), self.function.transform(end));
        if !f_begin.is_finite() || !f_end.is_finite() || f_begin == f_end {
            return Err(Error::DegenerateTransform {
                name: name(),
                begin,
                end,
            });
        }

        for (index, subsection) in self.subsections.iter().enumerate() {
            if !subsection.start_value.is_finite() {
                return Err(Error::NonFiniteSubsectionStart {
                    name: name(),
                    index,
                });
            }
            if let Some(&interval) = subsection
                .tick_intervals
                .iter()
                .find(|interval| !(interval.is_finite() && **interval >= 0.0))
            {
                return Err(Error::InvalidInterval {
                    name: name(),
                    index,
                    interval,
                });
            }
            if !subsection.has_positive_interval() {
                return Err(Error::NoTickIntervals {
                    name: name(),
                    index,
                });
            }
            let mut tiers = subsection.tick_intervals.iter().filter(|&&i| i > 0.0);
            if let Some(&first) = tiers.next() {
                let mut previous = first;
                for &interval in tiers {
                    if interval >= previous {
                        return Err(Error::UnorderedIntervals {
                            name: name(),
                            index,
                            previous,
                            interval,
                        });
                    }
                    previous = interval;
                }
            }
        }

        Ok(())
    }
}

/// Assembles and validates a [`ScaleDefinition`].
#[derive(Debug, Clone)]
pub struct ScaleDefinitionBuilder {
    definition: ScaleDefinition,
}

impl ScaleDefinitionBuilder {
    /// Physical length in points.
    pub fn length(mut self, points: f64) -> Self {
        self.definition.scale_length_in_points = points;
        self
    }

    pub fn layout(mut self, layout: ScaleLayout) -> Self {
        self.definition.layout = layout;
        self
    }

    pub fn tick_direction(mut self, direction: TickDirection) -> Self {
        self.definition.tick_direction = direction;
        self
    }

    pub fn subsection(mut self, subsection: ScaleSubsection) -> Self {
        self.definition.subsections.push(subsection);
        self
    }

    pub fn subsections(mut self, subsections: impl IntoIterator<Item = ScaleSubsection>) -> Self {
        self.definition.subsections.extend(subsections);
        self
    }

    pub fn label_color(mut self, color: LabelColor) -> Self {
        self.definition.label_color = Some(color);
        self
    }

    pub fn label_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.definition.label_formatter = Some(formatter);
        self
    }

    pub fn constant(mut self, label: impl Into<String>, value: f64) -> Self {
        self.definition.constants.push(ScaleConstant {
            label: label.into(),
            value,
        });
        self
    }

    /// Validate against the default [`GenerationLimits`].
    pub fn build(self) -> Result<ScaleDefinition> {
        self.build_with(&GenerationLimits::default())
    }

    /// Sort subsections by start value and validate against `limits`.
    pub fn build_with(mut self, limits: &GenerationLimits) -> Result<ScaleDefinition> {
        self.definition
            .subsections
            .sort_by(|a, b| a.start_value.total_cmp(&b.start_value));
        self.definition.validate(limits)?;
        Ok(self.definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::ParameterError;

    fn builder() -> ScaleDefinitionBuilder {
        ScaleDefinition::builder("C", ScaleFunction::Logarithmic, 1.0, 10.0)
            .subsection(ScaleSubsection::new(4.0, [1.0, 0.5, 0.1, 0.05]))
            .subsection(ScaleSubsection::new(1.0, [1.0, 0.1, 0.05, 0.01]))
            .subsection(ScaleSubsection::new(2.0, [1.0, 0.5, 0.1, 0.02]))
    }

    #[test]
    fn builder_sorts_subsections() {
        let def = builder().build().expect("valid scale");
        let starts: Vec<f64> = def.subsections().iter().map(|s| s.start_value).collect();
        assert_eq!(starts, vec![1.0, 2.0, 4.0]);
        assert_eq!(def.scale_length_in_points(), DEFAULT_SCALE_LENGTH);
    }

    #[test]
    fn active_subsection_picks_greatest_start() {
        let def = builder().build().expect("valid scale");
        assert_eq!(def.active_subsection_index(1.0), Some(0));
        assert_eq!(def.active_subsection_index(1.99), Some(0));
        assert_eq!(def.active_subsection_index(2.0), Some(1));
        assert_eq!(def.active_subsection_index(9.5), Some(2));
        assert_eq!(def.active_subsection_index(0.5), Some(0));
    }

    #[test]
    fn decimal_places_follow_active_subsection() {
        let def = builder().build().expect("valid scale");
        assert_eq!(def.decimal_places(1.5, 1.0), 3);
        assert_eq!(def.decimal_places(3.0, 1.0), 2);
        assert_eq!(def.decimal_places(5.0, 1.0), 2);
    }

    #[test]
    fn cursor_formatting() {
        let def = builder().build().expect("valid scale");
        // position 0.1 -> value 10^0.1 ≈ 1.259, first subsection, 3 places
        assert_eq!(def.format_for_cursor(1.2589, 0.1, 1.0), "1.259");
        // position 0.5 -> value ≈ 3.162, second subsection, 2 places
        assert_eq!(def.format_for_cursor(3.16227, 0.5, 1.0), "3.16");
        assert_eq!(def.format_for_cursor(f64::INFINITY, 0.5, 1.0), "—");
        assert_eq!(def.format_for_cursor(f64::NAN, 0.5, 1.0), "—");
    }

    #[test]
    fn no_subsections_use_fallback_precision() {
        let def = ScaleDefinition::builder("bare", ScaleFunction::Linear, 0.0, 1.0)
            .build()
            .expect("valid scale");
        assert_eq!(def.active_subsection(0.5), None);
        assert_eq!(def.cursor_decimal_places(0.5, 1.0), 2);
    }

    #[test]
    fn rejects_empty_domain() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Logarithmic, 2.0, 2.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::EmptyDomain { .. }));
    }

    #[test]
    fn rejects_non_finite_domain() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Linear, 0.0, f64::INFINITY)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::NonFiniteDomain { .. }));
    }

    #[test]
    fn rejects_excessive_span() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Logarithmic, 1.0, 1e7)
            .subsection(ScaleSubsection::new(1.0, [1.0]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ExcessiveSpan { .. }));
    }

    #[test]
    fn rejects_wide_multi_cycle_domain() {
        let function = ScaleFunction::MultiCycle {
            cycles: 12,
            offset: 0.0,
        };
        let err = ScaleDefinition::builder("XL", function, 1.0, 1e12)
            .subsection(ScaleSubsection::new(1.0, [1.0, 0.5, 0.1]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MultiCycleSpan { .. }));

        let err = ScaleDefinition::builder("XL", function, 1.0, 10_000.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MultiCycleSpan { .. }));

        assert!(ScaleDefinition::builder("XL", function, 1.0, 1000.0)
            .build()
            .is_ok());
    }

    #[test]
    fn raised_span_limits_are_clamped() {
        let limits = GenerationLimits {
            max_domain_span: 1e13,
            max_multi_cycle_span: 1e13,
            ..GenerationLimits::default()
        };
        let function = ScaleFunction::MultiCycle {
            cycles: 12,
            offset: 0.0,
        };
        let err = ScaleDefinition::builder("XL", function, 1.0, 1e12)
            .subsection(ScaleSubsection::new(1.0, [1.0, 0.5, 0.1]))
            .build_with(&limits)
            .unwrap_err();
        assert!(matches!(err, Error::MultiCycleSpan { limit, .. } if limit == 1e3));

        let err = ScaleDefinition::builder("x", ScaleFunction::Logarithmic, 1.0, 1e7)
            .subsection(ScaleSubsection::new(1.0, [1.0]))
            .build_with(&limits)
            .unwrap_err();
        assert!(matches!(err, Error::ExcessiveSpan { limit, .. } if limit == 1e6));
    }

    #[test]
    fn rejects_all_zero_intervals() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Linear, 0.0, 1.0)
            .subsection(ScaleSubsection::new(0.0, [0.0, 0.0]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::NoTickIntervals { index: 0, .. }));
    }

    #[test]
    fn rejects_negative_interval() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Linear, 0.0, 1.0)
            .subsection(ScaleSubsection::new(0.0, [0.1, -0.05]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { .. }));
    }

    #[test]
    fn rejects_tiers_out_of_order() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Linear, 0.0, 10.0)
            .subsection(ScaleSubsection::new(0.0, [1.0, 0.5, 0.1]))
            .subsection(ScaleSubsection::new(5.0, [0.1, 0.0, 1.0]))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnorderedIntervals {
                index: 1,
                previous,
                interval,
                ..
            } if previous == 0.1 && interval == 1.0
        ));

        let err = ScaleDefinition::builder("x", ScaleFunction::Linear, 0.0, 10.0)
            .subsection(ScaleSubsection::new(0.0, [1.0, 1.0]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnorderedIntervals { index: 0, .. }));

        // skipped tiers between descending ones are fine
        assert!(ScaleDefinition::builder("x", ScaleFunction::Linear, 0.0, 10.0)
            .subsection(ScaleSubsection::new(0.0, [1.0, 0.0, 0.0, 0.2]))
            .build()
            .is_ok());
    }

    #[test]
    fn rejects_circle_without_size() {
        let sizes = [(0.0, 0.0), (-10.0, -1.0), (f64::NAN, 0.0), (10.0, f64::INFINITY)];
        for (diameter, radius) in sizes {
            let err = ScaleDefinition::builder("C", ScaleFunction::Logarithmic, 1.0, 10.0)
                .layout(ScaleLayout::Circular { diameter, radius })
                .build()
                .unwrap_err();
            assert!(matches!(err, Error::InvalidLayout { .. }), "{diameter}/{radius}");
        }

        let def = ScaleDefinition::builder("C", ScaleFunction::Logarithmic, 1.0, 10.0)
            .layout(ScaleLayout::Circular {
                diameter: 100.0,
                radius: -1.0,
            })
            .build()
            .expect("diameter alone is enough");
        assert_eq!(def.layout().circle_radius(), Some(50.0));
        assert_eq!(ScaleLayout::Linear.circle_radius(), None);
    }

    #[test]
    fn rejects_domain_outside_function() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Logarithmic, 0.0, 10.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateTransform { .. }));
    }

    #[test]
    fn rejects_bad_length_and_parameters() {
        let err = ScaleDefinition::builder("x", ScaleFunction::Linear, 0.0, 1.0)
            .length(0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLength { .. }));

        let err = ScaleDefinition::builder("x", ScaleFunction::Power { exponent: 0.0 }, 1.0, 2.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFunction {
                reason: ParameterError::ZeroOrNonFinite {
                    parameter: "exponent",
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn custom_label_formatter_is_used() {
        fn percent(value: f64, _places: usize) -> String {
            format!("{:.0}%", value * 100.0)
        }
        let def = ScaleDefinition::builder("pct", ScaleFunction::Linear, 0.0, 1.0)
            .subsection(ScaleSubsection::new(0.0, [0.1]))
            .label_formatter(percent)
            .build()
            .expect("valid scale");
        assert_eq!(def.format_label(0.25, 0), "25%");
    }

    #[test]
    fn inverted_scale_is_accepted() {
        let def = ScaleDefinition::builder("CI", ScaleFunction::Logarithmic, 10.0, 1.0)
            .build()
            .expect("valid scale");
        assert!(def.is_inverted());
        assert_eq!(def.domain_bounds(), (1.0, 10.0));
        assert_eq!(def.span(), 9.0);
    }

    #[test]
    fn default_label_trims_and_rounds() {
        assert_eq!(default_label(2.0000000000000004, 3), "2");
        assert_eq!(default_label(0.00005, 5), "0.00005");
        assert_eq!(default_label(-0.5, 2), "-0.5");
        assert_eq!(default_label(1000.0, 1), "1000");
    }
}
