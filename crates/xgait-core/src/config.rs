use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SettingsError};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_stance_length() -> f64 {
    1.0
}
const fn default_stance_width() -> f64 {
    0.25
}
const fn default_step_ground_clearance() -> f64 {
    0.1
}
const fn default_step_duration() -> f64 {
    0.25
}
const fn default_end_phase_shift() -> f64 {
    90.0
}

// ---------------------------------------------------------------------------
// GaitSettings
// ---------------------------------------------------------------------------

/// Stance geometry and timing of the periodic X-gait.
///
/// Immutable for the duration of a planning call. Durations are in seconds,
/// lengths in meters, the phase shift in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaitSettings {
    /// Front-to-hind separation of the nominal footprint.
    #[serde(default = "default_stance_length")]
    pub stance_length: f64,

    /// Left-to-right separation of the nominal footprint.
    #[serde(default = "default_stance_width")]
    pub stance_width: f64,

    /// Swing apex height of every planned step.
    #[serde(default = "default_step_ground_clearance")]
    pub step_ground_clearance: f64,

    /// Swing duration of a single leg. Must be > 0.
    #[serde(default = "default_step_duration")]
    pub step_duration: f64,

    /// Pause appended to every half cycle (all four feet down).
    #[serde(default)]
    pub end_double_support_duration: f64,

    /// Liftoff delay of a front leg after its same-side hind leg, as a
    /// fraction of the full cycle in degrees. Valid range is [0, 360)
    /// excluding 0 and 180.
    #[serde(default = "default_end_phase_shift")]
    pub end_phase_shift: f64,
}

impl Default for GaitSettings {
    fn default() -> Self {
        Self {
            stance_length: default_stance_length(),
            stance_width: default_stance_width(),
            step_ground_clearance: default_step_ground_clearance(),
            step_duration: default_step_duration(),
            end_double_support_duration: 0.0,
            end_phase_shift: default_end_phase_shift(),
        }
    }
}

impl GaitSettings {
    /// Validate settings. Returns Err on values that would produce a
    /// degenerate or non-causal stepping cadence.
    #[allow(clippy::float_cmp)]
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("stance_length", self.stance_length),
            ("stance_width", self.stance_width),
            ("step_ground_clearance", self.step_ground_clearance),
            ("step_duration", self.step_duration),
            ("end_double_support_duration", self.end_double_support_duration),
            ("end_phase_shift", self.end_phase_shift),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field });
            }
        }
        for &(field, value) in &fields[..3] {
            if value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }
        if self.step_duration <= 0.0 {
            return Err(SettingsError::NonPositiveStepDuration(self.step_duration));
        }
        if self.end_double_support_duration < 0.0 {
            return Err(SettingsError::Negative {
                field: "end_double_support_duration",
                value: self.end_double_support_duration,
            });
        }
        // 0 and 180 collapse two liftoffs onto the same instant.
        let phase = self.end_phase_shift;
        if !(0.0..360.0).contains(&phase) || phase == 0.0 || phase == 180.0 {
            return Err(SettingsError::PhaseShiftOutOfRange(self.end_phase_shift));
        }
        Ok(())
    }

    /// Duration of half a gait cycle: one swing plus the end double support.
    pub fn half_cycle_duration(&self) -> f64 {
        self.step_duration + self.end_double_support_duration
    }

    /// Duration of a full gait cycle (every leg steps once).
    pub fn cycle_duration(&self) -> f64 {
        2.0 * self.half_cycle_duration()
    }

    /// Phase shift as a fraction of the full cycle.
    pub fn phase_shift_fraction(&self) -> f64 {
        self.end_phase_shift / 360.0
    }

    /// Parse from TOML text and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from TOML file and validate.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- defaults ----

    #[test]
    fn default_values() {
        let s = GaitSettings::default();
        assert!((s.stance_length - 1.0).abs() < f64::EPSILON);
        assert!((s.stance_width - 0.25).abs() < f64::EPSILON);
        assert!((s.step_ground_clearance - 0.1).abs() < f64::EPSILON);
        assert!((s.step_duration - 0.25).abs() < f64::EPSILON);
        assert!(s.end_double_support_duration.abs() < f64::EPSILON);
        assert!((s.end_phase_shift - 90.0).abs() < f64::EPSILON);
        assert!(s.validate().is_ok());
    }

    // ---- derived quantities ----

    #[test]
    fn cycle_durations() {
        let s = GaitSettings {
            step_duration: 0.3,
            end_double_support_duration: 0.1,
            ..GaitSettings::default()
        };
        assert!((s.half_cycle_duration() - 0.4).abs() < 1e-12);
        assert!((s.cycle_duration() - 0.8).abs() < 1e-12);
        assert!((s.phase_shift_fraction() - 0.25).abs() < 1e-12);
    }

    // ---- validate ----

    #[test]
    fn validate_rejects_zero_step_duration() {
        let s = GaitSettings {
            step_duration: 0.0,
            ..GaitSettings::default()
        };
        assert_eq!(
            s.validate().unwrap_err(),
            SettingsError::NonPositiveStepDuration(0.0)
        );
    }

    #[test]
    fn validate_rejects_negative_double_support() {
        let s = GaitSettings {
            end_double_support_duration: -0.1,
            ..GaitSettings::default()
        };
        assert!(matches!(
            s.validate().unwrap_err(),
            SettingsError::Negative {
                field: "end_double_support_duration",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_negative_stance() {
        let s = GaitSettings {
            stance_width: -0.2,
            ..GaitSettings::default()
        };
        assert!(matches!(
            s.validate().unwrap_err(),
            SettingsError::Negative {
                field: "stance_width",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_nan() {
        let s = GaitSettings {
            step_ground_clearance: f64::NAN,
            ..GaitSettings::default()
        };
        assert_eq!(
            s.validate().unwrap_err(),
            SettingsError::NonFinite {
                field: "step_ground_clearance"
            }
        );
    }

    #[test]
    fn validate_phase_shift_bounds() {
        for bad in [0.0, 180.0, 360.0, 400.0, -10.0] {
            let s = GaitSettings {
                end_phase_shift: bad,
                ..GaitSettings::default()
            };
            assert_eq!(
                s.validate().unwrap_err(),
                SettingsError::PhaseShiftOutOfRange(bad),
                "phase shift {bad} should be rejected"
            );
        }
        for good in [1.0, 45.0, 90.0, 179.0, 181.0, 200.0, 270.0, 359.0] {
            let s = GaitSettings {
                end_phase_shift: good,
                ..GaitSettings::default()
            };
            assert!(s.validate().is_ok(), "phase shift {good} should pass");
        }
    }

    // ---- TOML ----

    #[test]
    fn from_toml_uses_defaults_for_missing_fields() {
        let s = GaitSettings::from_toml_str("step_duration = 0.4\n").unwrap();
        assert!((s.step_duration - 0.4).abs() < f64::EPSILON);
        assert!((s.stance_length - 1.0).abs() < f64::EPSILON);
        assert!((s.end_phase_shift - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_toml_validates() {
        let err = GaitSettings::from_toml_str("end_phase_shift = 180.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Settings(SettingsError::PhaseShiftOutOfRange(_))
        ));
    }

    #[test]
    fn from_toml_reports_parse_errors() {
        let err = GaitSettings::from_toml_str("step_duration = \"fast\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn toml_round_trip() {
        let s = GaitSettings {
            stance_length: 0.8,
            end_double_support_duration: 0.05,
            end_phase_shift: 60.0,
            ..GaitSettings::default()
        };
        let text = s.to_toml_string().unwrap();
        assert_eq!(GaitSettings::from_toml_str(&text).unwrap(), s);
    }

    #[test]
    fn bundled_configs_are_valid() {
        let trot = GaitSettings::from_toml_str(include_str!("../../../configs/trot.toml")).unwrap();
        assert_eq!(trot, GaitSettings::default());

        let crawl =
            GaitSettings::from_toml_str(include_str!("../../../configs/crawl.toml")).unwrap();
        assert!((crawl.cycle_duration() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = GaitSettings::from_file("/nonexistent/xgait.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
