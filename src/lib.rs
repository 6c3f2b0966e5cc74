//! Slide rule scale geometry
//!
//! `rulescale` computes where values sit on the scales of a slide rule and
//! which tick marks a scale carries. It covers the mathematical side only:
//! mapping domain values to positions along the rule and back, and
//! enumerating graduations. Drawing is left to the caller.
//!
//! # Core Concepts
//!
//! ## Scale functions
//!
//! A [`ScaleFunction`] is the monotonic transform behind a scale family:
//! logarithmic (C/D), powers (A/K), trigonometric (S/T/ST), hyperbolic
//! (Sh/Th), Pythagorean (H/P), log-log (LL) and folded or multi-cycle
//! variants. Every family has a forward transform and an inverse that agree
//! within its [`ToleranceClass`].
//!
//! ## Definitions
//!
//! A [`ScaleDefinition`] combines a function with a domain, physical length,
//! layout and [`ScaleSubsection`]s. Each subsection carries a hierarchy of
//! tick intervals (tiers) for its stretch of the domain.
//!
//! ## Positions
//!
//! [`ScaleCalculator`] maps values to normalized positions in `[0, 1]`,
//! absolute positions in points, and angles for circular rules.
//!
//! ## Ticks
//!
//! [`ScaleCalculator::generate_tick_marks`] enumerates ticks with either
//! [`TickAlgorithm::Legacy`] or [`TickAlgorithm::Modulo`]. A global cap
//! bounds every run. [`GeneratedScale`] keeps the result for lookups.
//!
//! # Examples
//!
//! ## Mapping values
//!
//! ```rust
//! use rulescale::{catalog, ScaleCalculator};
//!
//! let c = catalog::c(250.0).unwrap();
//!
//! assert_eq!(ScaleCalculator::value(0.0, &c), 1.0);
//! assert_eq!(ScaleCalculator::value(1.0, &c), 10.0);
//! assert!((ScaleCalculator::value(0.5, &c) - 10f64.sqrt()).abs() < 1e-6);
//! ```
//!
//! ## Generating ticks
//!
//! ```rust
//! use rulescale::{catalog, GeneratedScale, TickAlgorithm};
//!
//! let scale = GeneratedScale::with_algorithm(catalog::k(250.0).unwrap(), TickAlgorithm::Legacy);
//!
//! for tick in scale.tick_marks() {
//!     if let Some(label) = &tick.label {
//!         assert_eq!(tick.tier, 0);
//!         assert!(!label.is_empty());
//!     }
//! }
//! ```
//!
//! ## Cursor readout
//!
//! ```rust
//! use rulescale::catalog;
//!
//! let d = catalog::d(250.0).unwrap();
//! assert_eq!(d.format_for_cursor(1.23456, 0.09, 1.0), "1.235");
//! assert_eq!(d.format_for_cursor(f64::INFINITY, 0.5, 1.0), "—");
//! ```

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod function;
pub mod generated;
pub mod scale;
pub mod ticks;

pub use calculator::{ProjectedPoint, ScaleCalculator};
pub use config::{EngineConfig, GenerationLimits};
pub use error::{Error, Result};
pub use function::{ParameterError, ScaleFunction, ToleranceClass};
pub use generated::GeneratedScale;
pub use scale::{
    CursorPrecision, LabelColor, ScaleConstant, ScaleDefinition, ScaleDefinitionBuilder,
    ScaleLayout, ScaleSubsection, TickDirection,
};
pub use ticks::{GeneratedTicks, ModuloConfig, TickAlgorithm, TickMark, TickStyle};
