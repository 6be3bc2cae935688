use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Layout constants of a [`crate::HeartProgress`].
///
/// Every widget owns its own copy, changing the metrics of one widget never
/// affects another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HeartMetrics {
    /// Ceiling for the resolved height, default: 60
    pub max_height: f32,
    /// Reserved width of each lobe, also the lobe half-width, default: 30
    pub horizontal_padding: f32,
    /// Vertical position of the notch as a fraction of the height, default: 0.25
    pub notch_offset: f32,
    /// Stroke width of the lines and the heart outline, default: 5
    pub line_width: f32,
    /// Distance between the notch and the bottom end of each lobe, default: 6
    pub bottom_gap: f32,
    /// How much wider the end caps are than the line, default: 12
    pub cap_extra: f32,
}

impl Default for HeartMetrics {
    fn default() -> Self {
        Self {
            max_height: 60.,
            horizontal_padding: 30.,
            notch_offset: 0.25,
            line_width: 5.,
            bottom_gap: 6.,
            cap_extra: 12.,
        }
    }
}

impl HeartMetrics {
    /// Radius of the filled end caps.
    #[inline]
    pub fn point_radius(&self) -> f32 {
        (self.line_width + self.cap_extra) / 2.
    }

    /// Width available to the value label inside the heart.
    #[inline]
    pub fn label_width(&self) -> f32 {
        self.horizontal_padding * 2. - self.line_width * 2.
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_height", self.max_height),
            ("horizontal_padding", self.horizontal_padding),
            ("line_width", self.line_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0. {
                return Err(ConfigError::Invalid(format!(
                    "metrics.{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("bottom_gap", self.bottom_gap),
            ("cap_extra", self.cap_extra),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0. {
                return Err(ConfigError::Invalid(format!(
                    "metrics.{name} must not be negative, got {value}"
                )));
            }
        }

        if self.label_width() <= 0. {
            return Err(ConfigError::Invalid(format!(
                "metrics.line_width ({}) must be less than metrics.horizontal_padding ({})",
                self.line_width, self.horizontal_padding
            )));
        }

        if !(0.0..=1.0).contains(&self.notch_offset) {
            return Err(ConfigError::Invalid(format!(
                "metrics.notch_offset must be within 0..=1, got {}",
                self.notch_offset
            )));
        }

        Ok(())
    }
}
