use serde::{Deserialize, Serialize};

use crate::burst::sync::synchronize;

/// Identifier of a slider expression in the graphing engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliderRef(pub String);

impl std::fmt::Display for SliderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which pair of burst fields the user is editing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// `step` and `interval` are authoritative; `fps` and `duration` are derived.
    #[default]
    ManualStep,
    /// `fps` and `duration` are authoritative; `step` and `interval` are derived.
    AutoStep,
}

/// Named field of a [`BurstRecord`], used for edits and for validation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstField {
    /// The slider reference.
    Slider,
    /// Lower sweep bound.
    Min,
    /// Upper sweep bound.
    Max,
    /// Slider increment between captures.
    Step,
    /// Playback interval per frame, in milliseconds.
    Interval,
    /// Target playback rate.
    Fps,
    /// Target playback duration, in milliseconds.
    Duration,
    /// Steepness of the preview ease curve.
    EaseSlope,
    /// Balance point of the preview ease curve, 0..1.
    EasePosition,
}

impl BurstField {
    /// Every field holding a number, in declaration order.
    pub const NUMERIC: [Self; 8] = [
        Self::Min,
        Self::Max,
        Self::Step,
        Self::Interval,
        Self::Fps,
        Self::Duration,
        Self::EaseSlope,
        Self::EasePosition,
    ];

    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slider => "slider",
            Self::Min => "min",
            Self::Max => "max",
            Self::Step => "step",
            Self::Interval => "interval",
            Self::Fps => "fps",
            Self::Duration => "duration",
            Self::EaseSlope => "ease_slope",
            Self::EasePosition => "ease_position",
        }
    }
}

impl std::fmt::Display for BurstField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Range and timing of one capture sweep.
///
/// Numeric fields are `f64` so partially entered input (`NaN`) is representable. Only the pair
/// selected by `mode` is input; the other pair and `frame_count` are recomputed by
/// [`synchronize`] on every edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstRecord {
    /// Slider being swept, if one is selected.
    pub slider: Option<SliderRef>,
    /// Lower sweep bound.
    pub min: f64,
    /// Upper sweep bound.
    pub max: f64,
    /// Active parameterization.
    pub mode: StepMode,
    /// Slider increment between captures.
    pub step: f64,
    /// Playback interval per frame, in milliseconds.
    pub interval: f64,
    /// Playback frames per second.
    pub fps: f64,
    /// Playback duration, in milliseconds.
    pub duration: f64,
    /// Derived number of frames.
    pub frame_count: f64,
    /// Steepness of the preview ease curve.
    pub ease_slope: f64,
    /// Balance point of the preview ease curve.
    pub ease_position: f64,
}

impl Default for BurstRecord {
    fn default() -> Self {
        synchronize(&Self {
            slider: None,
            min: -10.0,
            max: 10.0,
            mode: StepMode::ManualStep,
            step: 1.0,
            interval: 30.0,
            fps: 0.0,
            duration: 0.0,
            frame_count: 0.0,
            ease_slope: 0.01,
            ease_position: 0.5,
        })
    }
}

impl BurstRecord {
    /// Read a numeric field. `Slider` has no numeric value and returns `NaN`.
    pub fn get(&self, field: BurstField) -> f64 {
        match field {
            BurstField::Slider => f64::NAN,
            BurstField::Min => self.min,
            BurstField::Max => self.max,
            BurstField::Step => self.step,
            BurstField::Interval => self.interval,
            BurstField::Fps => self.fps,
            BurstField::Duration => self.duration,
            BurstField::EaseSlope => self.ease_slope,
            BurstField::EasePosition => self.ease_position,
        }
    }

    pub(crate) fn field_mut(&mut self, field: BurstField) -> Option<&mut f64> {
        match field {
            BurstField::Slider => None,
            BurstField::Min => Some(&mut self.min),
            BurstField::Max => Some(&mut self.max),
            BurstField::Step => Some(&mut self.step),
            BurstField::Interval => Some(&mut self.interval),
            BurstField::Fps => Some(&mut self.fps),
            BurstField::Duration => Some(&mut self.duration),
            BurstField::EaseSlope => Some(&mut self.ease_slope),
            BurstField::EasePosition => Some(&mut self.ease_position),
        }
    }

    /// Width of the sweep range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
#[path = "../../tests/unit/burst/record.rs"]
mod tests;
