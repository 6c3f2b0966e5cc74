//! Cursor precision: how many decimals a cursor readout shows.

/// Shown instead of a number when the value is NaN or infinite.
pub const NON_FINITE_DISPLAY: &str = "—";

/// Decimal places used when no positive tick interval is known.
pub const FALLBACK_DECIMAL_PLACES: usize = 2;

/// Smallest number of decimal places a readout uses.
pub const MIN_DECIMAL_PLACES: usize = 1;

/// Largest number of decimal places a readout uses.
pub const MAX_DECIMAL_PLACES: usize = 5;

/// Slack when rounding `-log10(interval)` up, so that an interval such as
/// `0.01` whose logarithm lands a hair past an integer is not pushed a
/// whole digit further.
const LOG_SLACK: f64 = 1e-9;

/// Decimal place policy of a subsection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CursorPrecision {
    /// Derive the places from the subsection's finest tick interval.
    #[default]
    Automatic,
    /// Always use this many places (clamped to 1..=5).
    Fixed(u8),
}

impl CursorPrecision {
    /// Resolve the policy against a tick interval hierarchy.
    ///
    /// ```rust
    /// use rulescale::CursorPrecision;
    ///
    /// assert_eq!(CursorPrecision::Automatic.decimal_places(&[1.0, 0.1, 0.05, 0.01]), 3);
    /// assert_eq!(CursorPrecision::Fixed(9).decimal_places(&[1.0]), 5);
    /// ```
    pub fn decimal_places(self, tick_intervals: &[f64]) -> usize {
        match self {
            Self::Fixed(places) => {
                usize::from(places).clamp(MIN_DECIMAL_PLACES, MAX_DECIMAL_PLACES)
            }
            Self::Automatic => Self::calculate_from_intervals(tick_intervals),
        }
    }

    /// Decimal places implied by a tick interval hierarchy.
    ///
    /// Zero (skip) entries are ignored. With no positive interval the
    /// result is [`FALLBACK_DECIMAL_PLACES`]. Otherwise, for the smallest
    /// positive interval `s`:
    ///
    /// - `s >= 1` gives one place;
    /// - `s < 1` gives `ceil(-log10(s))` places, plus one more when `s` is an
    ///   exact power of ten;
    ///
    /// and the result is clamped to `1..=5`.
    pub fn calculate_from_intervals(tick_intervals: &[f64]) -> usize {
        let smallest = tick_intervals
            .iter()
            .copied()
            .filter(|interval| interval.is_finite() && *interval > 0.0)
            .reduce(f64::min);

        let Some(smallest) = smallest else {
            return FALLBACK_DECIMAL_PLACES;
        };

        let places = if smallest >= 1.0 {
            1
        } else {
            let mut places = (-smallest.log10() - LOG_SLACK).ceil() as usize;
            if is_power_of_ten(smallest) {
                places += 1;
            }
            places
        };

        places.clamp(MIN_DECIMAL_PLACES, MAX_DECIMAL_PLACES)
    }
}

fn is_power_of_ten(value: f64) -> bool {
    let exponent = value.log10().round();
    let mantissa = value / 10f64.powi(exponent as i32);
    (mantissa - 1.0).abs() < 1e-9
}

/// Render `value` with exactly `places` decimals.
///
/// Uses Rust's fixed precision formatting, which rounds the exact binary
/// value and breaks exact ties to even. NaN and infinities render as
/// [`NON_FINITE_DISPLAY`]; a result that rounds to zero never carries a
/// minus sign.
pub fn format_value(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return NON_FINITE_DISPLAY.to_string();
    }
    let text = format!("{value:.places$}");
    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => text,
    }
}
