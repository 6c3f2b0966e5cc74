//! Standard scales.
//!
//! Each factory builds a fresh [`ScaleDefinition`] of the given length.
//! Subsection tables follow the usual layout of a duplex rule: fine
//! graduations where the scale is stretched, coarse ones where it is
//! crowded. A `0.0` interval marks a tier that is skipped in that stretch,
//! so tier indices (and tick lengths) stay aligned across subsections.

use std::f64::consts::{LN_10, PI};

use crate::error::{Error, Result};
use crate::function::ScaleFunction;
use crate::scale::{
    LabelColor, ScaleDefinition, ScaleDefinitionBuilder, ScaleSubsection, TickDirection,
};

/// Canonical names accepted by [`standard`].
pub const STANDARD_SCALES: &[&str] = &[
    "C", "D", "CI", "CF", "DF", "A", "B", "K", "L", "S", "T", "ST", "LL1", "LL2", "LL3", "LL00",
    "LL02", "LL03", "Sh", "Th", "H", "P", "Deg", "Grade", "XL",
];

const INVERTED_COLOR: LabelColor = LabelColor {
    red: 200,
    green: 0,
    blue: 0,
};

/// Build a standard scale by name (case-insensitive).
///
/// ```rust
/// use rulescale::catalog;
///
/// let k = catalog::standard("k", 250.0).unwrap();
/// assert_eq!(k.name(), "K");
/// assert!(catalog::standard("Q", 250.0).is_err());
/// ```
pub fn standard(name: &str, length: f64) -> Result<ScaleDefinition> {
    let canonical = STANDARD_SCALES
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownScale(name.to_string()))?;

    match *canonical {
        "C" => c(length),
        "D" => d(length),
        "CI" => ci(length),
        "CF" => cf(length),
        "DF" => df(length),
        "A" => a(length),
        "B" => b(length),
        "K" => k(length),
        "L" => l(length),
        "S" => s(length),
        "T" => t(length),
        "ST" => st(length),
        "LL1" => ll1(length),
        "LL2" => ll2(length),
        "LL3" => ll3(length),
        "LL00" => ll00(length),
        "LL02" => ll02(length),
        "LL03" => ll03(length),
        "Sh" => sh(length),
        "Th" => th(length),
        "H" => h(length),
        "P" => p(length),
        "Deg" => deg(length),
        "Grade" => grade(length),
        "XL" => xl(length),
        other => Err(Error::UnknownScale(other.to_string())),
    }
}

fn single_decade() -> [ScaleSubsection; 3] {
    [
        ScaleSubsection::new(1.0, [1.0, 0.1, 0.05, 0.01]).with_label_levels([0, 1]),
        ScaleSubsection::new(2.0, [1.0, 0.5, 0.1, 0.02]),
        ScaleSubsection::new(4.0, [1.0, 0.5, 0.1, 0.05]),
    ]
}

fn single_decade_scale(name: &str, begin: f64, end: f64, length: f64) -> ScaleDefinitionBuilder {
    ScaleDefinition::builder(name, ScaleFunction::Logarithmic, begin, end)
        .length(length)
        .subsections(single_decade())
}

pub fn c(length: f64) -> Result<ScaleDefinition> {
    single_decade_scale("C", 1.0, 10.0, length)
        .constant("π", PI)
        .build()
}

pub fn d(length: f64) -> Result<ScaleDefinition> {
    single_decade_scale("D", 1.0, 10.0, length)
        .tick_direction(TickDirection::Down)
        .constant("π", PI)
        .build()
}

pub fn ci(length: f64) -> Result<ScaleDefinition> {
    single_decade_scale("CI", 10.0, 1.0, length)
        .label_color(INVERTED_COLOR)
        .build()
}

fn folded(name: &str, direction: TickDirection, length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(name, ScaleFunction::Folded { modulus: PI }, PI, 10.0 * PI)
        .length(length)
        .tick_direction(direction)
        .subsection(ScaleSubsection::new(3.0, [1.0, 0.5, 0.1, 0.02]))
        .subsection(ScaleSubsection::new(4.0, [1.0, 0.5, 0.1, 0.05]))
        .subsection(ScaleSubsection::new(10.0, [10.0, 1.0, 0.5, 0.1]).with_label_levels([0, 1]))
        .subsection(ScaleSubsection::new(20.0, [10.0, 5.0, 1.0, 0.5]))
        .constant("π", PI)
        .build()
}

pub fn cf(length: f64) -> Result<ScaleDefinition> {
    folded("CF", TickDirection::Up, length)
}

pub fn df(length: f64) -> Result<ScaleDefinition> {
    folded("DF", TickDirection::Down, length)
}

fn two_decades(name: &str, length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(name, ScaleFunction::Logarithmic, 1.0, 100.0)
        .length(length)
        .subsection(ScaleSubsection::new(1.0, [1.0, 0.5, 0.1, 0.02]))
        .subsection(ScaleSubsection::new(2.0, [1.0, 0.5, 0.1, 0.05]))
        .subsection(ScaleSubsection::new(5.0, [1.0, 0.5, 0.1]))
        .subsection(ScaleSubsection::new(10.0, [10.0, 5.0, 1.0, 0.2]))
        .subsection(ScaleSubsection::new(20.0, [10.0, 5.0, 1.0, 0.5]))
        .subsection(ScaleSubsection::new(50.0, [10.0, 5.0, 1.0]))
        .constant("π", PI)
        .build()
}

pub fn a(length: f64) -> Result<ScaleDefinition> {
    two_decades("A", length)
}

pub fn b(length: f64) -> Result<ScaleDefinition> {
    two_decades("B", length)
}

/// Three decades; finer tiers drop out towards the end of each decade.
pub fn k(length: f64) -> Result<ScaleDefinition> {
    let mut builder = ScaleDefinition::builder("K", ScaleFunction::Logarithmic, 1.0, 1000.0)
        .length(length);
    for decade in [1.0, 10.0, 100.0] {
        builder = builder
            .subsection(ScaleSubsection::new(
                decade,
                [decade, decade * 0.5, decade * 0.1, decade * 0.05],
            ))
            .subsection(ScaleSubsection::new(
                3.0 * decade,
                [decade, 0.0, decade * 0.5, decade * 0.1],
            ))
            .subsection(ScaleSubsection::new(
                6.0 * decade,
                [decade, 0.0, 0.0, decade * 0.2],
            ));
    }
    builder
        .subsection(ScaleSubsection::new(1000.0, [1000.0, 500.0, 100.0, 50.0]))
        .build()
}

pub fn l(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder("L", ScaleFunction::Linear, 0.0, 1.0)
        .length(length)
        .subsection(ScaleSubsection::new(0.0, [0.1, 0.05, 0.01, 0.002]))
        .build()
}

/// Sine, 5.74° to 90°.
pub fn s(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "S",
        ScaleFunction::Sine { multiplier: 10.0 },
        0.1f64.asin().to_degrees(),
        90.0,
    )
    .length(length)
    .subsection(ScaleSubsection::new(5.0, [1.0, 0.5, 0.1, 0.05]))
    .subsection(ScaleSubsection::new(10.0, [5.0, 1.0, 0.5, 0.1]))
    .subsection(ScaleSubsection::new(20.0, [10.0, 5.0, 1.0, 0.5]))
    .subsection(ScaleSubsection::new(40.0, [10.0, 5.0, 1.0]))
    .subsection(ScaleSubsection::new(70.0, [10.0, 5.0]))
    .subsection(ScaleSubsection::new(80.0, [10.0]))
    .build()
}

/// Tangent, 5.71° to 45°.
pub fn t(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "T",
        ScaleFunction::Tangent { multiplier: 10.0 },
        0.1f64.atan().to_degrees(),
        45.0,
    )
    .length(length)
    .subsection(ScaleSubsection::new(5.0, [1.0, 0.5, 0.1, 0.05]))
    .subsection(ScaleSubsection::new(10.0, [5.0, 1.0, 0.5, 0.1]))
    .build()
}

/// Small angles, 0.57° to 5.73°.
pub fn st(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "ST",
        ScaleFunction::SmallAngle { multiplier: 100.0 },
        0.01f64.to_degrees(),
        0.1f64.to_degrees(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.5, [0.1, 0.05, 0.01]))
    .subsection(ScaleSubsection::new(1.0, [0.5, 0.1, 0.05, 0.01]))
    .subsection(ScaleSubsection::new(2.0, [1.0, 0.5, 0.1, 0.02]))
    .subsection(ScaleSubsection::new(4.0, [1.0, 0.5, 0.1, 0.05]))
    .build()
}

/// e^0.01 to e^0.1.
pub fn ll1(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "LL1",
        ScaleFunction::LogLog {
            multiplier: 100.0 * LN_10,
        },
        0.01f64.exp(),
        0.1f64.exp(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(1.01, [0.005, 0.001, 0.0005, 0.0001]))
    .subsection(ScaleSubsection::new(1.05, [0.01, 0.005, 0.001, 0.0002]))
    .build()
}

/// e^0.1 to e.
pub fn ll2(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "LL2",
        ScaleFunction::LogLog {
            multiplier: 10.0 * LN_10,
        },
        0.1f64.exp(),
        1f64.exp(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(1.1, [0.05, 0.01, 0.005, 0.001]))
    .subsection(ScaleSubsection::new(1.2, [0.1, 0.05, 0.01, 0.002]))
    .subsection(ScaleSubsection::new(1.5, [0.5, 0.1, 0.05, 0.01]))
    .subsection(ScaleSubsection::new(2.0, [1.0, 0.5, 0.1, 0.02]))
    .build()
}

/// e to e^10.
pub fn ll3(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "LL3",
        ScaleFunction::LogLog { multiplier: LN_10 },
        1f64.exp(),
        10f64.exp(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(2.5, [0.5, 0.1, 0.05, 0.01]))
    .subsection(ScaleSubsection::new(4.0, [1.0, 0.5, 0.1, 0.05]))
    .subsection(ScaleSubsection::new(10.0, [10.0, 5.0, 1.0, 0.5]))
    .subsection(ScaleSubsection::new(20.0, [10.0, 5.0, 1.0]))
    .subsection(ScaleSubsection::new(50.0, [50.0, 10.0, 5.0]))
    .subsection(ScaleSubsection::new(100.0, [100.0, 50.0, 10.0]))
    .subsection(ScaleSubsection::new(500.0, [500.0, 100.0, 50.0]))
    .subsection(ScaleSubsection::new(1000.0, [1000.0, 500.0, 100.0]))
    .subsection(ScaleSubsection::new(5000.0, [5000.0, 1000.0, 500.0]))
    .build()
}

/// 0.990 to 0.999, the finest reading on the rule.
pub fn ll00(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "LL00",
        ScaleFunction::LogLogNegative {
            multiplier: 1000.0 * LN_10,
        },
        0.990,
        0.999,
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.990, [0.001, 0.0005, 0.0001, 0.00005]))
    .subsection(ScaleSubsection::new(0.995, [0.001, 0.0005, 0.0001, 0.00002]))
    .subsection(ScaleSubsection::new(0.998, [0.0005, 0.0001, 0.00005, 0.00001]))
    .build()
}

/// e^-0.1 down to e^-1.
pub fn ll02(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "LL02",
        ScaleFunction::LogLogNegative {
            multiplier: 10.0 * LN_10,
        },
        (-0.1f64).exp(),
        (-1f64).exp(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.35, [0.05, 0.01, 0.005]))
    .subsection(ScaleSubsection::new(0.6, [0.05, 0.01, 0.005, 0.001]))
    .subsection(ScaleSubsection::new(0.8, [0.01, 0.005, 0.001]))
    .build()
}

/// e^-1 down to e^-10.
pub fn ll03(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "LL03",
        ScaleFunction::LogLogNegative { multiplier: LN_10 },
        (-1f64).exp(),
        (-10f64).exp(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.00004, [0.00001, 0.000005]))
    .subsection(ScaleSubsection::new(0.0001, [0.0001, 0.00005]))
    .subsection(ScaleSubsection::new(0.001, [0.001, 0.0005]))
    .subsection(ScaleSubsection::new(0.01, [0.01, 0.005, 0.001]))
    .subsection(ScaleSubsection::new(0.1, [0.1, 0.05, 0.01, 0.005]))
    .build()
}

pub fn sh(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "Sh",
        ScaleFunction::HyperbolicSine {
            multiplier: 10.0,
            offset: 0.0,
        },
        0.1f64.asinh(),
        1f64.asinh(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.0, [0.1, 0.05, 0.01, 0.005]))
    .subsection(ScaleSubsection::new(0.3, [0.1, 0.05, 0.01]))
    .build()
}

pub fn th(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "Th",
        ScaleFunction::HyperbolicTangent {
            multiplier: 10.0,
            offset: 0.0,
        },
        0.1f64.atanh(),
        3.0,
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.1, [0.1, 0.05, 0.01]))
    .subsection(ScaleSubsection::new(0.5, [0.5, 0.1, 0.05]))
    .subsection(ScaleSubsection::new(1.5, [0.5, 0.1]))
    .build()
}

/// √1.01 to √2.
pub fn h(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "H",
        ScaleFunction::PythagoreanH { multiplier: 10.0 },
        1.01f64.sqrt(),
        2f64.sqrt(),
    )
    .length(length)
    .subsection(ScaleSubsection::new(1.0, [0.01, 0.005, 0.001]))
    .subsection(ScaleSubsection::new(1.1, [0.05, 0.01, 0.005]))
    .build()
}

/// √0.99 down to 0.
pub fn p(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "P",
        ScaleFunction::PythagoreanP { multiplier: 10.0 },
        0.99f64.sqrt(),
        0.0,
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.0, [0.1, 0.05, 0.01]))
    .subsection(ScaleSubsection::new(0.9, [0.01, 0.005, 0.001]))
    .build()
}

/// Full circle in degrees.
pub fn deg(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "Deg",
        ScaleFunction::LinearDegree { denominator: 360.0 },
        0.0,
        360.0,
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.0, [10.0, 5.0, 1.0]))
    .build()
}

/// Road grade in percent, 0% to 100% (45°).
pub fn grade(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "Grade",
        ScaleFunction::PercentAngle { denominator: 45.0 },
        0.0,
        100.0,
    )
    .length(length)
    .subsection(ScaleSubsection::new(0.0, [10.0, 5.0, 1.0]))
    .build()
}

/// Reactance scale: three declared decades stand for twelve.
pub fn xl(length: f64) -> Result<ScaleDefinition> {
    ScaleDefinition::builder(
        "XL",
        ScaleFunction::MultiCycle {
            cycles: 12,
            offset: 0.0,
        },
        1.0,
        1000.0,
    )
    .length(length)
    .subsection(ScaleSubsection::new(1.0, [1.0, 0.5, 0.1]))
    .subsection(ScaleSubsection::new(10.0, [10.0, 5.0, 1.0]))
    .subsection(ScaleSubsection::new(100.0, [100.0, 50.0, 10.0]))
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in STANDARD_SCALES {
            let def = standard(name, 250.0).expect("standard scale");
            assert_eq!(def.name(), *name);
            assert_eq!(def.scale_length_in_points(), 250.0);
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(
            standard("ZZ", 250.0),
            Err(Error::UnknownScale(name)) if name == "ZZ"
        ));
    }

    #[test]
    fn k_scale_keeps_skip_tiers() {
        let k = k(250.0).expect("K");
        let starts: Vec<f64> = k.subsections().iter().map(|s| s.start_value).collect();
        assert_eq!(
            starts,
            vec![1.0, 3.0, 6.0, 10.0, 30.0, 60.0, 100.0, 300.0, 600.0, 1000.0]
        );
        assert_eq!(k.subsections()[1].tick_intervals, vec![1.0, 0.0, 0.5, 0.1]);
        assert_eq!(k.subsections()[8].tick_intervals, vec![100.0, 0.0, 0.0, 20.0]);
        assert_eq!(k.decimal_places(7.0, 1.0), 1);
        assert_eq!(k.decimal_places(2.0, 1.0), 2);
    }

    #[test]
    fn inverted_and_down_scales() {
        assert!(ci(250.0).expect("CI").is_inverted());
        assert!(ll02(250.0).expect("LL02").is_inverted());
        assert_eq!(d(250.0).expect("D").tick_direction(), TickDirection::Down);
        assert_eq!(ci(250.0).expect("CI").label_color(), Some(INVERTED_COLOR));
    }

    #[test]
    fn ll00_reads_to_five_places() {
        let ll00 = ll00(250.0).expect("LL00");
        assert_eq!(ll00.domain_bounds(), (0.990, 0.999));
        assert_eq!(ll00.subsections().len(), 3);
        for value in [0.990, 0.993, 0.996, 0.9985, 0.999] {
            assert_eq!(ll00.decimal_places(value, 1.0), 5, "{value}");
        }
    }

    #[test]
    fn multi_cycle_scale_stays_narrow() {
        let xl = xl(250.0).expect("XL");
        assert!(xl.function().is_multi_cycle());
        assert!(xl.span() <= 1000.0);
    }

    #[test]
    fn factories_return_fresh_values() {
        let first = c(250.0).expect("C");
        let second = c(100.0).expect("C");
        assert_eq!(first.scale_length_in_points(), 250.0);
        assert_eq!(second.scale_length_in_points(), 100.0);
    }
}
