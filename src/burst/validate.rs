use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::burst::record::{BurstField, BurstRecord, StepMode};
use crate::foundation::math::{is_positive, is_positive_integer};

/// Fields of `record` that are currently unusable for a capture sweep.
///
/// An empty set means a sweep may start. The record is never modified.
pub fn validate(record: &BurstRecord) -> BTreeSet<BurstField> {
    let mut invalid = BTreeSet::new();

    if record.slider.is_none() {
        invalid.insert(BurstField::Slider);
    }
    if !record.min.is_finite() {
        invalid.insert(BurstField::Min);
    }
    if !record.max.is_finite() {
        invalid.insert(BurstField::Max);
    }
    if record.min >= record.max {
        invalid.insert(BurstField::Min);
        invalid.insert(BurstField::Max);
    }

    if !is_positive(record.step) || record.step > record.span() {
        invalid.insert(BurstField::Step);
    }

    match record.mode {
        StepMode::ManualStep => {
            if !is_positive(record.interval) {
                invalid.insert(BurstField::Interval);
            }
        }
        StepMode::AutoStep => {
            if !is_positive(record.fps) {
                invalid.insert(BurstField::Fps);
            }
            if !is_positive(record.duration) {
                invalid.insert(BurstField::Duration);
            }
        }
    }

    invalid
}

/// Capture and playback settings shared by single captures and sweeps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Capture width in pixels.
    pub width: f64,
    /// Capture height in pixels.
    pub height: f64,
    /// Playback interval per frame, in milliseconds.
    pub interval_ms: f64,
    /// Capture at twice the pixel ratio.
    pub oversample: bool,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            interval_ms: 100.0,
            oversample: false,
        }
    }
}

impl ImageSettings {
    /// Playback interval in seconds.
    pub fn interval_secs(&self) -> f64 {
        self.interval_ms / 1000.0
    }
}

/// Named field of [`ImageSettings`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    /// Capture width.
    Width,
    /// Capture height.
    Height,
    /// Playback interval.
    Interval,
}

impl std::fmt::Display for SettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Interval => "interval",
        })
    }
}

/// Which of `fields` in `settings` are not positive integers.
pub fn validate_settings(settings: &ImageSettings, fields: &[SettingField]) -> BTreeSet<SettingField> {
    fields
        .iter()
        .copied()
        .filter(|field| {
            let value = match field {
                SettingField::Width => settings.width,
                SettingField::Height => settings.height,
                SettingField::Interval => settings.interval_ms,
            };
            !is_positive_integer(value)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/burst/validate.rs"]
mod tests;
