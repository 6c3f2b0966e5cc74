use crate::config::EngineConfig;
use crate::scale::ScaleDefinition;
use crate::ticks::{self, TickAlgorithm, TickMark};

/// A definition together with its tick marks, generated once.
///
/// Immutable after construction and safe to share across threads.
///
/// # Examples
///
/// ```rust
/// use rulescale::{catalog, GeneratedScale};
///
/// let scale = GeneratedScale::new(catalog::c(250.0).unwrap());
/// let tick = scale.nearest_tick(0.301).unwrap();
/// assert!((tick.value - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratedScale {
    definition: ScaleDefinition,
    tick_marks: Vec<TickMark>,
    truncated: bool,
}

impl GeneratedScale {
    /// Generate with [`TickAlgorithm::default`] under default limits.
    pub fn new(definition: ScaleDefinition) -> Self {
        Self::with_config(definition, &EngineConfig::default())
    }

    pub fn with_algorithm(definition: ScaleDefinition, algorithm: TickAlgorithm) -> Self {
        let config = EngineConfig {
            algorithm,
            ..EngineConfig::default()
        };
        Self::with_config(definition, &config)
    }

    pub fn with_config(definition: ScaleDefinition, config: &EngineConfig) -> Self {
        let generated = ticks::generate(&definition, &config.algorithm, &config.limits);
        Self {
            definition,
            tick_marks: generated.marks,
            truncated: generated.truncated,
        }
    }

    pub fn definition(&self) -> &ScaleDefinition {
        &self.definition
    }

    /// Marks ascending by normalized position.
    pub fn tick_marks(&self) -> &[TickMark] {
        &self.tick_marks
    }

    /// Whether generation hit the tick cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Tick closest to normalized `position`; ties go to the lower tick.
    pub fn nearest_tick(&self, position: f64) -> Option<&TickMark> {
        if position.is_nan() {
            return None;
        }
        let index = self
            .tick_marks
            .partition_point(|mark| mark.normalized_position < position);
        let after = self.tick_marks.get(index);
        let before = index.checked_sub(1).and_then(|i| self.tick_marks.get(i));
        match (before, after) {
            (Some(b), Some(a)) => {
                if position - b.normalized_position <= a.normalized_position - position {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (b, a) => b.or(a),
        }
    }

    /// Tick closest to an angle in degrees, measured around the circle.
    pub fn nearest_tick_by_angle(&self, degrees: f64) -> Option<&TickMark> {
        if !degrees.is_finite() || self.tick_marks.is_empty() {
            return None;
        }
        let angle = degrees.rem_euclid(360.0);
        let position = angle / 360.0;
        let index = self
            .tick_marks
            .partition_point(|mark| mark.normalized_position < position);
        let len = self.tick_marks.len();

        // Neighbours on either side, wrapping past 0°/360°.
        let after = &self.tick_marks[index % len];
        let before = &self.tick_marks[(index + len - 1) % len];

        let distance = |mark: &TickMark| {
            let delta = (mark.normalized_position * 360.0 - angle).abs();
            delta.min(360.0 - delta)
        };
        if distance(before) <= distance(after) {
            Some(before)
        } else {
            Some(after)
        }
    }

    /// Tick closest to a distance in points from the scale start.
    pub fn nearest_tick_at_absolute(&self, points: f64) -> Option<&TickMark> {
        let length = self.definition.scale_length_in_points();
        self.nearest_tick(points / length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::ScaleFunction;
    use crate::scale::ScaleSubsection;

    fn linear_scale() -> ScaleDefinition {
        ScaleDefinition::builder("L", ScaleFunction::Linear, 0.0, 1.0)
            .length(200.0)
            .subsection(ScaleSubsection::new(0.0, [0.5, 0.1]))
            .build()
            .expect("linear scale")
    }

    #[test]
    fn ticks_are_sorted() {
        let scale = GeneratedScale::new(linear_scale());
        let values: Vec<f64> = scale.tick_marks().iter().map(|m| m.value).collect();
        assert_eq!(values.len(), 11);
        for pair in scale.tick_marks().windows(2) {
            assert!(pair[0].normalized_position < pair[1].normalized_position);
        }
        assert!(!scale.is_truncated());
    }

    #[test]
    fn nearest_tick_by_position() {
        let scale = GeneratedScale::new(linear_scale());
        let tick = scale.nearest_tick(0.33).expect("tick");
        assert!((tick.value - 0.3).abs() < 1e-12);
        assert_eq!(scale.nearest_tick(-5.0).map(|m| m.value), Some(0.0));
        assert_eq!(scale.nearest_tick(5.0).map(|m| m.value), Some(1.0));
        assert!(scale.nearest_tick(f64::NAN).is_none());
    }

    #[test]
    fn nearest_tick_by_absolute_points() {
        let scale = GeneratedScale::new(linear_scale());
        let tick = scale.nearest_tick_at_absolute(101.0).expect("tick");
        assert_eq!(tick.value, 0.5);
    }

    #[test]
    fn angle_lookup_wraps_around() {
        let def = ScaleDefinition::builder("dial", ScaleFunction::Linear, 0.0, 10.0)
            .subsection(ScaleSubsection::new(0.0, [1.0]))
            .build()
            .expect("dial");
        let scale = GeneratedScale::with_algorithm(def, TickAlgorithm::Legacy);

        // 358° sits 2° from the 360° mark and far from 324°.
        assert_eq!(scale.nearest_tick_by_angle(358.0).map(|m| m.value), Some(10.0));
        assert_eq!(scale.nearest_tick_by_angle(-1.0).map(|m| m.value), Some(10.0));
        assert_eq!(scale.nearest_tick_by_angle(37.0).map(|m| m.value), Some(1.0));
        assert_eq!(scale.nearest_tick_by_angle(720.0 + 71.0).map(|m| m.value), Some(2.0));
    }

    #[test]
    fn invalid_definition_yields_no_ticks() {
        let config = EngineConfig::from_toml_str("[limits]\nmax_domain_span = 0.5\n")
            .expect("config");
        let scale = GeneratedScale::with_config(linear_scale(), &config);
        assert!(scale.tick_marks().is_empty());
        assert!(scale.nearest_tick(0.5).is_none());
        assert!(scale.nearest_tick_by_angle(10.0).is_none());
    }

    #[test]
    fn shared_between_threads() {
        let scale = std::sync::Arc::new(GeneratedScale::new(linear_scale()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let scale = std::sync::Arc::clone(&scale);
                std::thread::spawn(move || {
                    let position = f64::from(i) / 4.0;
                    scale.nearest_tick(position).map(|m| m.value)
                })
            })
            .collect();
        let found: Vec<Option<f64>> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(Option::is_some));
    }
}
