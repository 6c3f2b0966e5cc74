//! Scale functions: the monotonic transforms behind every scale family.
//!
//! A [`ScaleFunction`] maps a domain value (a number printed on the rule) to
//! a transform value `t`. Positions along the rule are affine in `t`, so any
//! constant offset or multiplier that only shifts `t` cancels out once the
//! scale is normalized against its begin and end values. Those parameters
//! are still kept so that `transform` reproduces the textbook formula.
//!
//! # Examples
//!
//! ```rust
//! use rulescale::ScaleFunction;
//!
//! let c = ScaleFunction::Logarithmic;
//! assert_eq!(c.transform(100.0), 2.0);
//! assert_eq!(c.inverse_transform(1.0), 10.0);
//!
//! // S scale: log10(10 · sin(v°))
//! let s = ScaleFunction::Sine { multiplier: 10.0 };
//! assert!((s.transform(30.0) - 5.0f64.log10()).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use thiserror::Error;

use crate::scale::util;

/// A forward transform without a closed-form inverse.
pub type ForwardFn = fn(f64) -> f64;

/// Bracket tolerance for the numeric inverse, kept well inside
/// [`ToleranceClass::Transcendental`].
const NUMERIC_INVERSE_TOLERANCE: f64 = 1e-12;

/// How closely `inverse_transform(transform(x))` must reproduce `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToleranceClass {
    /// Linear, power and single logarithm transforms.
    Algebraic,
    /// Trigonometric, hyperbolic and Pythagorean transforms.
    Transcendental,
    /// Nested compositions such as log-log transforms.
    NestedTranscendental,
}

impl ToleranceClass {
    /// Relative tolerance: a round trip of `x` must land within
    /// `tolerance * max(1, |x|)`.
    pub const fn tolerance(self) -> f64 {
        match self {
            Self::Algebraic => 1e-12,
            Self::Transcendental => 1e-9,
            Self::NestedTranscendental => 1e-6,
        }
    }

    /// Whether `recovered` reproduces `original` within this class.
    pub fn accepts(self, original: f64, recovered: f64) -> bool {
        util::approx_eq_relative(recovered, original, self.tolerance())
    }
}

/// The transform families used by slide rule scales.
///
/// Angles are in degrees. `m` is a multiplier and `o` an argument offset.
#[derive(Debug, Clone, Copy)]
pub enum ScaleFunction {
    /// `t = v`
    Linear,
    /// `t = v / denominator`
    LinearDegree { denominator: f64 },
    /// `t = v^exponent`
    Power { exponent: f64 },
    /// `t = log10(v)`
    Logarithmic,
    /// `t = log10(v) - log10(modulus)`; the fold is carried by a domain
    /// starting at `modulus` (for example π for CF/DF).
    Folded { modulus: f64 },
    /// `t = (log10(v) + offset) / cycles`: one declared decade stands for
    /// `cycles` decades of the underlying quantity.
    MultiCycle { cycles: u32, offset: f64 },
    /// `t = log10(m · sin(v))`
    Sine { multiplier: f64 },
    /// `t = log10(m · tan(v))`
    Tangent { multiplier: f64 },
    /// `t = log10(m · v_rad)`, the small angle (ST) approximation.
    SmallAngle { multiplier: f64 },
    /// `t = log10(m · sinh(v - o))`
    HyperbolicSine { multiplier: f64, offset: f64 },
    /// `t = log10(m · tanh(v - o))`
    HyperbolicTangent { multiplier: f64, offset: f64 },
    /// `t = log10(m · sqrt(v² - 1))`
    PythagoreanH { multiplier: f64 },
    /// `t = log10(m · sqrt(1 - v²))`
    PythagoreanP { multiplier: f64 },
    /// `t = atan(v / 100) / denominator`, grade percent to angle.
    PercentAngle { denominator: f64 },
    /// `t = log10(m · log10(v))` for `v > 1`.
    LogLog { multiplier: f64 },
    /// `t = log10(-m · log10(v))` for `0 < v < 1`.
    LogLogNegative { multiplier: f64 },
    /// Arbitrary strictly monotonic `forward` on `[lower, upper]`; the
    /// inverse is solved by bisection.
    Numeric {
        forward: ForwardFn,
        lower: f64,
        upper: f64,
    },
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

fn pow10(t: f64) -> f64 {
    10f64.powf(t)
}

/// Why a [`ScaleFunction`]'s parameters were rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("{parameter} must be positive and finite, got {value}")]
    NotPositive { parameter: &'static str, value: f64 },

    #[error("{parameter} must be finite and nonzero, got {value}")]
    ZeroOrNonFinite { parameter: &'static str, value: f64 },

    #[error("{parameter} must be finite, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("cycles must be at least 1")]
    NoCycles,

    #[error("numeric bracket [{lower}, {upper}] is not a finite interval")]
    EmptyBracket { lower: f64, upper: f64 },
}

fn positive_finite(parameter: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive { parameter, value })
    }
}

fn nonzero_finite(parameter: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value != 0.0 {
        Ok(())
    } else {
        Err(ParameterError::ZeroOrNonFinite { parameter, value })
    }
}

fn finite(parameter: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { parameter, value })
    }
}

impl ScaleFunction {
    /// Forward transform. Values outside [`is_valid`](Self::is_valid) yield
    /// whatever the formula yields (often NaN or an infinity).
    pub fn transform(&self, value: f64) -> f64 {
        match *self {
            Self::Linear => value,
            Self::LinearDegree { denominator } => value / denominator,
            Self::Power { exponent } => value.powf(exponent),
            Self::Logarithmic => value.log10(),
            Self::Folded { modulus } => value.log10() - modulus.log10(),
            Self::MultiCycle { cycles, offset } => (value.log10() + offset) / f64::from(cycles),
            Self::Sine { multiplier } => (multiplier * to_radians(value).sin()).log10(),
            Self::Tangent { multiplier } => (multiplier * to_radians(value).tan()).log10(),
            Self::SmallAngle { multiplier } => (multiplier * to_radians(value)).log10(),
            Self::HyperbolicSine { multiplier, offset } => {
                (multiplier * (value - offset).sinh()).log10()
            }
            Self::HyperbolicTangent { multiplier, offset } => {
                (multiplier * (value - offset).tanh()).log10()
            }
            Self::PythagoreanH { multiplier } => {
                (multiplier * (value * value - 1.0).sqrt()).log10()
            }
            Self::PythagoreanP { multiplier } => {
                (multiplier * ((1.0 - value) * (1.0 + value)).sqrt()).log10()
            }
            Self::PercentAngle { denominator } => to_degrees((value / 100.0).atan()) / denominator,
            Self::LogLog { multiplier } => (multiplier * value.log10()).log10(),
            Self::LogLogNegative { multiplier } => (-multiplier * value.log10()).log10(),
            Self::Numeric { forward, .. } => forward(value),
        }
    }

    /// Inverse transform, `inverse_transform(transform(v)) ≈ v` within
    /// [`tolerance_class`](Self::tolerance_class).
    pub fn inverse_transform(&self, t: f64) -> f64 {
        match *self {
            Self::Linear => t,
            Self::LinearDegree { denominator } => t * denominator,
            Self::Power { exponent } => t.powf(exponent.recip()),
            Self::Logarithmic => pow10(t),
            Self::Folded { modulus } => modulus * pow10(t),
            Self::MultiCycle { cycles, offset } => pow10(t * f64::from(cycles) - offset),
            Self::Sine { multiplier } => to_degrees((pow10(t) / multiplier).asin()),
            Self::Tangent { multiplier } => to_degrees((pow10(t) / multiplier).atan()),
            Self::SmallAngle { multiplier } => to_degrees(pow10(t) / multiplier),
            Self::HyperbolicSine { multiplier, offset } => (pow10(t) / multiplier).asinh() + offset,
            Self::HyperbolicTangent { multiplier, offset } => {
                (pow10(t) / multiplier).atanh() + offset
            }
            Self::PythagoreanH { multiplier } => {
                let leg = pow10(t) / multiplier;
                (1.0 + leg * leg).sqrt()
            }
            Self::PythagoreanP { multiplier } => {
                let leg = pow10(t) / multiplier;
                ((1.0 - leg) * (1.0 + leg)).sqrt()
            }
            Self::PercentAngle { denominator } => 100.0 * to_radians(t * denominator).tan(),
            Self::LogLog { multiplier } => pow10(pow10(t) / multiplier),
            Self::LogLogNegative { multiplier } => pow10(-pow10(t) / multiplier),
            Self::Numeric {
                forward,
                lower,
                upper,
            } => util::bisect(forward, t, lower, upper, NUMERIC_INVERSE_TOLERANCE),
        }
    }

    /// Whether `value` lies in the region where the transform is finite and
    /// strictly monotonic.
    pub fn is_valid(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match *self {
            Self::Linear | Self::LinearDegree { .. } | Self::PercentAngle { .. } => true,
            Self::Power { exponent } => value > 0.0 || (value == 0.0 && exponent > 0.0),
            Self::Logarithmic | Self::Folded { .. } | Self::MultiCycle { .. } => value > 0.0,
            Self::Sine { .. } => value > 0.0 && value <= 90.0,
            Self::Tangent { .. } => value > 0.0 && value < 90.0,
            Self::SmallAngle { .. } => value > 0.0,
            Self::HyperbolicSine { offset, .. } | Self::HyperbolicTangent { offset, .. } => {
                value > offset
            }
            Self::PythagoreanH { .. } => value > 1.0,
            Self::PythagoreanP { .. } => (0.0..1.0).contains(&value),
            Self::LogLog { .. } => value > 1.0,
            Self::LogLogNegative { .. } => value > 0.0 && value < 1.0,
            Self::Numeric { lower, upper, .. } => value >= lower && value <= upper,
        }
    }

    /// Round-trip tolerance class of this family.
    pub const fn tolerance_class(&self) -> ToleranceClass {
        match self {
            Self::Linear
            | Self::LinearDegree { .. }
            | Self::Power { .. }
            | Self::Logarithmic
            | Self::Folded { .. }
            | Self::MultiCycle { .. } => ToleranceClass::Algebraic,
            Self::LogLog { .. } | Self::LogLogNegative { .. } => {
                ToleranceClass::NestedTranscendental
            }
            Self::Sine { .. }
            | Self::Tangent { .. }
            | Self::SmallAngle { .. }
            | Self::HyperbolicSine { .. }
            | Self::HyperbolicTangent { .. }
            | Self::PythagoreanH { .. }
            | Self::PythagoreanP { .. }
            | Self::PercentAngle { .. }
            | Self::Numeric { .. } => ToleranceClass::Transcendental,
        }
    }

    /// Whether the function packs several decades into its own cycle count.
    ///
    /// Such scales must keep their declared domain narrow; see
    /// [`GenerationLimits::max_multi_cycle_span`](crate::GenerationLimits).
    pub const fn is_multi_cycle(&self) -> bool {
        matches!(self, Self::MultiCycle { cycles, .. } if *cycles > 1)
    }

    /// Check the variant's parameters.
    pub fn validate(&self) -> Result<(), ParameterError> {
        match *self {
            Self::Linear | Self::Logarithmic => Ok(()),
            Self::LinearDegree { denominator } | Self::PercentAngle { denominator } => {
                nonzero_finite("denominator", denominator)
            }
            Self::Power { exponent } => nonzero_finite("exponent", exponent),
            Self::Folded { modulus } => positive_finite("modulus", modulus),
            Self::MultiCycle { cycles, offset } => {
                if cycles == 0 {
                    return Err(ParameterError::NoCycles);
                }
                finite("offset", offset)
            }
            Self::Sine { multiplier }
            | Self::Tangent { multiplier }
            | Self::SmallAngle { multiplier }
            | Self::PythagoreanH { multiplier }
            | Self::PythagoreanP { multiplier }
            | Self::LogLog { multiplier }
            | Self::LogLogNegative { multiplier } => positive_finite("multiplier", multiplier),
            Self::HyperbolicSine { multiplier, offset }
            | Self::HyperbolicTangent { multiplier, offset } => {
                positive_finite("multiplier", multiplier)?;
                finite("offset", offset)
            }
            Self::Numeric { lower, upper, .. } => {
                if lower.is_finite() && upper.is_finite() && lower < upper {
                    Ok(())
                } else {
                    Err(ParameterError::EmptyBracket { lower, upper })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{E, LN_10};

    fn assert_round_trip(function: ScaleFunction, values: &[f64]) {
        let class = function.tolerance_class();
        for &value in values {
            assert!(function.is_valid(value), "{value} invalid for {function:?}");
            let recovered = function.inverse_transform(function.transform(value));
            assert!(
                class.accepts(value, recovered),
                "{function:?}: {value} came back as {recovered}"
            );
        }
    }

    #[test]
    fn logarithmic_matches_log10() {
        let f = ScaleFunction::Logarithmic;
        assert_eq!(f.transform(1.0), 0.0);
        assert_eq!(f.transform(10.0), 1.0);
        assert_eq!(f.transform(1000.0), 3.0);
        assert_eq!(f.inverse_transform(2.0), 100.0);
    }

    #[test]
    fn hyperbolic_sine_with_offset() {
        let f = ScaleFunction::HyperbolicSine {
            multiplier: 10.0,
            offset: 0.5,
        };
        let expected = (10.0 * (1.5f64 - 0.5).sinh()).log10();
        assert_eq!(f.transform(1.5), expected);
        assert_round_trip(f, &[0.6, 1.0, 1.5, 2.7]);
    }

    #[test]
    fn pythagorean_h_formula() {
        let f = ScaleFunction::PythagoreanH { multiplier: 10.0 };
        let expected = (10.0 * (2.0f64 * 2.0 - 1.0).sqrt()).log10();
        assert_eq!(f.transform(2.0), expected);
        assert_round_trip(f, &[1.005, 1.1, 1.414, 3.0]);
    }

    #[test]
    fn linear_degree_divides() {
        let f = ScaleFunction::LinearDegree { denominator: 360.0 };
        assert_eq!(f.transform(90.0), 0.25);
        assert_eq!(f.inverse_transform(0.5), 180.0);
    }

    #[test]
    fn trig_families_round_trip() {
        assert_round_trip(ScaleFunction::Sine { multiplier: 10.0 }, &[5.74, 30.0, 60.0, 89.0]);
        assert_round_trip(ScaleFunction::Tangent { multiplier: 10.0 }, &[5.72, 20.0, 45.0]);
        assert_round_trip(ScaleFunction::SmallAngle { multiplier: 100.0 }, &[0.6, 2.0, 5.7]);
        assert_round_trip(
            ScaleFunction::HyperbolicTangent {
                multiplier: 10.0,
                offset: 0.0,
            },
            &[0.1, 0.5, 1.0, 2.9],
        );
        assert_round_trip(ScaleFunction::PythagoreanP { multiplier: 10.0 }, &[0.1, 0.5, 0.99]);
        assert_round_trip(ScaleFunction::PercentAngle { denominator: 45.0 }, &[0.0, 12.5, 100.0]);
    }

    #[test]
    fn log_log_families_round_trip() {
        let ll3 = ScaleFunction::LogLog { multiplier: LN_10 };
        assert!((ll3.transform(E) - 0.0).abs() < 1e-12);
        assert!((ll3.transform(E.powi(10)) - 1.0).abs() < 1e-12);
        assert_round_trip(ll3, &[E, 10.0, 1000.0, 22_000.0]);

        let ll03 = ScaleFunction::LogLogNegative { multiplier: LN_10 };
        assert!((ll03.transform(E.recip()) - 0.0).abs() < 1e-12);
        assert_round_trip(ll03, &[0.0001, 0.01, 0.3]);
    }

    #[test]
    fn multi_cycle_round_trip() {
        let f = ScaleFunction::MultiCycle {
            cycles: 12,
            offset: 0.0,
        };
        assert!(f.is_multi_cycle());
        assert_round_trip(f, &[1.0, 7.5, 999.0]);
        assert!(!ScaleFunction::MultiCycle {
            cycles: 1,
            offset: 0.0
        }
        .is_multi_cycle());
    }

    #[test]
    fn numeric_inverse_converges() {
        let f = ScaleFunction::Numeric {
            forward: |v| v * v * v + v,
            lower: -10.0,
            upper: 10.0,
        };
        assert_round_trip(f, &[-9.5, -1.0, 0.0, 0.001, 3.3, 10.0]);
    }

    #[test]
    fn validity_regions() {
        assert!(!ScaleFunction::Logarithmic.is_valid(0.0));
        assert!(!ScaleFunction::Logarithmic.is_valid(f64::NAN));
        assert!(ScaleFunction::Sine { multiplier: 10.0 }.is_valid(90.0));
        assert!(!ScaleFunction::Tangent { multiplier: 10.0 }.is_valid(90.0));
        assert!(!ScaleFunction::LogLog { multiplier: 1.0 }.is_valid(1.0));
        assert!(ScaleFunction::LogLogNegative { multiplier: 1.0 }.is_valid(0.5));
    }

    #[test]
    fn parameter_validation() {
        assert_eq!(
            ScaleFunction::LinearDegree { denominator: 0.0 }.validate(),
            Err(ParameterError::ZeroOrNonFinite {
                parameter: "denominator",
                value: 0.0
            })
        );
        assert_eq!(
            ScaleFunction::Sine { multiplier: -1.0 }.validate(),
            Err(ParameterError::NotPositive {
                parameter: "multiplier",
                value: -1.0
            })
        );
        assert_eq!(
            ScaleFunction::MultiCycle {
                cycles: 0,
                offset: 0.0
            }
            .validate(),
            Err(ParameterError::NoCycles)
        );
        assert_eq!(
            ScaleFunction::Numeric {
                forward: |v| v,
                lower: 1.0,
                upper: 1.0
            }
            .validate(),
            Err(ParameterError::EmptyBracket {
                lower: 1.0,
                upper: 1.0
            })
        );
        assert!(ScaleFunction::HyperbolicSine {
            multiplier: 1.0,
            offset: f64::NAN
        }
        .validate()
        .is_err_and(|e| matches!(e, ParameterError::NonFinite { parameter: "offset", .. })));
        assert_eq!(ScaleFunction::Logarithmic.validate(), Ok(()));
        assert_eq!(ParameterError::NoCycles.to_string(), "cycles must be at least 1");
    }
}
