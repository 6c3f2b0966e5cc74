//! Position and value mapping.
//!
//! Positions are affine in the transform value:
//!
//! ```text
//! p = (F(v) - F(begin)) / (F(end) - F(begin))
//! ```
//!
//! and the inverse goes back through [`ScaleFunction::inverse_transform`].
//! The bounds map exactly: `begin ↔ 0.0` and `end ↔ 1.0`. Values outside the
//! domain are not clamped, they extrapolate along the same formula.

use crate::config::GenerationLimits;
use crate::function::ScaleFunction;
use crate::scale::{ScaleDefinition, ScaleLayout};
use crate::ticks::{self, GeneratedTicks, TickAlgorithm, TickMark, TickStyle};

/// Cached transform of a definition's bounds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Projection {
    function: ScaleFunction,
    begin: f64,
    end: f64,
    f_begin: f64,
    f_span: f64,
}

impl Projection {
    pub(crate) fn new(definition: &ScaleDefinition) -> Self {
        let function = *definition.function();
        let begin = definition.begin_value();
        let end = definition.end_value();
        let f_begin = function.transform(begin);
        Self {
            function,
            begin,
            end,
            f_begin,
            f_span: function.transform(end) - f_begin,
        }
    }

    pub(crate) fn normalize(&self, value: f64) -> f64 {
        if value == self.begin {
            return 0.0;
        }
        if value == self.end {
            return 1.0;
        }
        (self.function.transform(value) - self.f_begin) / self.f_span
    }

    pub(crate) fn denormalize(&self, position: f64) -> f64 {
        if position == 0.0 {
            return self.begin;
        }
        if position == 1.0 {
            return self.end;
        }
        self.function
            .inverse_transform(self.f_begin + position * self.f_span)
    }
}

/// A point in the scale's own coordinate frame, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Stateless mapping between domain values and positions.
pub struct ScaleCalculator;

impl ScaleCalculator {
    /// Position of `value` in `[0, 1]` for in-domain values.
    ///
    /// ```rust
    /// use rulescale::{catalog, ScaleCalculator};
    ///
    /// let c = catalog::c(250.0).unwrap();
    /// assert_eq!(ScaleCalculator::normalized_position(10.0, &c), 1.0);
    /// assert!((ScaleCalculator::normalized_position(2.0, &c) - 2f64.log10()).abs() < 1e-10);
    /// ```
    pub fn normalized_position(value: f64, definition: &ScaleDefinition) -> f64 {
        Projection::new(definition).normalize(value)
    }

    /// Domain value at normalized `position`.
    pub fn value(position: f64, definition: &ScaleDefinition) -> f64 {
        Projection::new(definition).denormalize(position)
    }

    /// Distance from the scale start in points.
    pub fn absolute_position(value: f64, definition: &ScaleDefinition) -> f64 {
        Self::normalized_position(value, definition) * definition.scale_length_in_points()
    }

    /// Angle in degrees for circular rules.
    pub fn angular_position(value: f64, definition: &ScaleDefinition) -> f64 {
        Self::normalized_position(value, definition) * 360.0
    }

    /// Inclusive domain membership, direction agnostic.
    pub fn is_in_domain(value: f64, definition: &ScaleDefinition) -> bool {
        let (lo, hi) = definition.domain_bounds();
        value >= lo && value <= hi
    }

    /// Where `value` lands in the layout's frame.
    ///
    /// Linear layouts run along the x axis. Circular layouts put the point
    /// on the scale's circle, angles clockwise from twelve o'clock.
    pub fn projected_point(value: f64, definition: &ScaleDefinition) -> ProjectedPoint {
        match definition.layout() {
            ScaleLayout::Linear => ProjectedPoint {
                x: Self::absolute_position(value, definition),
                y: 0.0,
            },
            layout @ ScaleLayout::Circular { .. } => {
                let r = layout.circle_radius().unwrap_or_default();
                let theta = Self::angular_position(value, definition).to_radians();
                ProjectedPoint {
                    x: r * theta.sin(),
                    y: r * theta.cos(),
                }
            }
        }
    }

    /// Tick marks under the default [`GenerationLimits`].
    pub fn generate_tick_marks(
        definition: &ScaleDefinition,
        algorithm: &TickAlgorithm,
    ) -> Vec<TickMark> {
        Self::generate_tick_marks_with(definition, algorithm, &GenerationLimits::default()).marks
    }

    /// Full generation result under explicit limits.
    pub fn generate_tick_marks_with(
        definition: &ScaleDefinition,
        algorithm: &TickAlgorithm,
        limits: &GenerationLimits,
    ) -> GeneratedTicks {
        ticks::generate(definition, algorithm, limits)
    }

    /// In-domain constants as labeled major marks, ascending by position.
    pub fn constant_marks(definition: &ScaleDefinition) -> Vec<TickMark> {
        let projection = Projection::new(definition);
        let mut marks: Vec<TickMark> = definition
            .constants()
            .iter()
            .filter(|constant| Self::is_in_domain(constant.value, definition))
            .map(|constant| TickMark {
                value: constant.value,
                normalized_position: projection.normalize(constant.value),
                tier: 0,
                style: TickStyle::for_tier(0),
                label: Some(constant.label.clone()),
            })
            .filter(|mark| mark.normalized_position.is_finite())
            .collect();
        marks.sort_by(|a, b| a.normalized_position.total_cmp(&b.normalized_position));
        marks
    }
}
