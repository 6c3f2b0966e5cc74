use thiserror::Error;

use crate::function::ParameterError;

/// Errors raised while building scale definitions or loading configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("scale '{name}': begin and end values are both {value}")]
    EmptyDomain { name: String, value: f64 },

    #[error("scale '{name}': domain bounds must be finite (begin {begin}, end {end})")]
    NonFiniteDomain { name: String, begin: f64, end: f64 },

    #[error("scale '{name}': domain span {span} exceeds the limit of {limit}")]
    ExcessiveSpan { name: String, span: f64, limit: f64 },

    #[error(
        "scale '{name}': multi-cycle domain span {span} exceeds {limit}; \
         move additional decades into the function's cycle count"
    )]
    MultiCycleSpan { name: String, span: f64, limit: f64 },

    #[error("scale '{name}': length must be positive and finite, got {length}")]
    InvalidLength { name: String, length: f64 },

    #[error("scale '{name}': invalid function parameters: {reason}")]
    InvalidFunction {
        name: String,
        #[source]
        reason: ParameterError,
    },

    #[error(
        "scale '{name}': transform is not finite or not distinct \
         at the domain ends ({begin}, {end})"
    )]
    DegenerateTransform { name: String, begin: f64, end: f64 },

    #[error("scale '{name}': subsection {index} has a non-finite start value")]
    NonFiniteSubsectionStart { name: String, index: usize },

    #[error("scale '{name}': subsection {index} has invalid tick interval {interval}")]
    InvalidInterval {
        name: String,
        index: usize,
        interval: f64,
    },

    #[error("scale '{name}': subsection {index} has no positive tick interval")]
    NoTickIntervals { name: String, index: usize },

    #[error(
        "scale '{name}': subsection {index} tick intervals must run coarsest to finest, \
         but {interval} follows {previous}"
    )]
    UnorderedIntervals {
        name: String,
        index: usize,
        previous: f64,
        interval: f64,
    },

    #[error("scale '{name}': circular layout needs a positive finite radius or diameter")]
    InvalidLayout { name: String },

    #[error("unknown standard scale: {0}")]
    UnknownScale(String),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
