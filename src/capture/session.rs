use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::burst::record::{BurstField, BurstRecord, SliderRef, StepMode};
use crate::burst::validate::{ImageSettings, SettingField, validate, validate_settings};
use crate::capture::engine::{CaptureOpts, GraphEngine, SliderError};
use crate::capture::messages::{bad_burst_input, bad_settings_input};
use crate::capture::normalize::normalize_capture;
use crate::foundation::error::SvgBurstError;
use crate::foundation::math::is_positive;
use crate::frames::collection::{CollectionCheckpoint, FrameCollection, FrameKey, FrameSnapshot};

/// How long a flashed error stays visible.
pub const ERROR_FLASH_DURATION: Duration = Duration::from_secs(3);

/// Why a capture did not (fully) happen.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    /// The burst record failed validation; nothing was captured.
    #[error("{message}")]
    InvalidBurst {
        /// Offending fields.
        fields: BTreeSet<BurstField>,
        /// Flashed notice.
        message: String,
    },
    /// Image settings failed validation; nothing was captured.
    #[error("{message}")]
    InvalidSettings {
        /// Offending fields.
        fields: BTreeSet<SettingField>,
        /// Flashed notice.
        message: String,
    },
    /// The engine refused a slider value mid-sweep. Frames captured before it are kept.
    #[error("{source}")]
    Slider {
        /// Value that could not be set.
        value: f64,
        /// Frames captured before the failure.
        captured: usize,
        /// Engine error.
        #[source]
        source: SliderError,
    },
    /// The engine failed to render or returned an unusable document.
    #[error(transparent)]
    Engine(#[from] SvgBurstError),
}

/// Frames added by a completed burst.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurstReport {
    /// Keys of the new frames, in capture order.
    pub keys: Vec<FrameKey>,
}

#[derive(Clone, Debug)]
struct ErrorFlash {
    message: String,
    until: Instant,
}

struct BurstUndo<S> {
    frames: CollectionCheckpoint,
    engine: S,
}

/// Session state around one graphing engine: captured frames, the burst record, image settings,
/// the pending burst undo and the flashed error.
///
/// Time is never read from the clock; operations that flash take `now` explicitly.
pub struct CaptureSession<E: GraphEngine> {
    engine: E,
    frames: FrameCollection,
    burst: BurstRecord,
    burst_errors: BTreeSet<BurstField>,
    settings: ImageSettings,
    undo: Option<BurstUndo<E::State>>,
    flash: Option<ErrorFlash>,
}

impl<E: GraphEngine> CaptureSession<E> {
    /// Start an empty session with default burst and image settings.
    pub fn new(engine: E) -> Self {
        let burst = BurstRecord::default();
        let burst_errors = validate(&burst);
        Self {
            engine,
            frames: FrameCollection::new(),
            burst,
            burst_errors,
            settings: ImageSettings::default(),
            undo: None,
            flash: None,
        }
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to edit the graph between captures.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Captured frames.
    pub fn frames(&self) -> &FrameCollection {
        &self.frames
    }

    /// Immutable copy of the frames for generation.
    pub fn snapshot(&self) -> FrameSnapshot {
        self.frames.snapshot()
    }

    /// Current burst record.
    pub fn burst(&self) -> &BurstRecord {
        &self.burst
    }

    /// Fields of the burst record that currently block a sweep.
    pub fn burst_errors(&self) -> &BTreeSet<BurstField> {
        &self.burst_errors
    }

    /// Current image settings.
    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Replace the burst record wholesale (e.g. loaded from config).
    ///
    /// Inputs are rounded and synchronized, see [`BurstRecord::normalized`].
    pub fn set_burst(&mut self, record: BurstRecord) {
        self.burst = record.normalized();
        self.after_burst_edit();
    }

    /// Edit one burst field.
    ///
    /// A valid playback interval is copied into the image settings so previews and exports play at
    /// the rate the burst was planned for.
    pub fn update_burst(&mut self, field: BurstField, value: f64) {
        self.burst.set(field, value);
        self.after_burst_edit();
    }

    /// Switch the burst parameterization.
    pub fn set_step_mode(&mut self, mode: StepMode) {
        self.burst.set_mode(mode);
        self.after_burst_edit();
    }

    /// Select the slider to sweep.
    pub fn select_slider(&mut self, slider: Option<SliderRef>) {
        self.burst.select_slider(slider);
        self.after_burst_edit();
    }

    fn after_burst_edit(&mut self) {
        self.burst_errors = validate(&self.burst);
        if !self.burst_errors.contains(&BurstField::Interval) && is_positive(self.burst.interval) {
            self.settings.interval_ms = self.burst.interval;
        }
    }

    /// Edit one image setting. Values are stored as entered and validated on use.
    pub fn update_setting(&mut self, field: SettingField, value: f64) {
        match field {
            SettingField::Width => self.settings.width = value,
            SettingField::Height => self.settings.height = value,
            SettingField::Interval => self.settings.interval_ms = value,
        }
    }

    /// Toggle double pixel ratio captures.
    pub fn set_oversample(&mut self, oversample: bool) {
        self.settings.oversample = oversample;
    }

    /// Make sure the burst points at an existing slider.
    ///
    /// Keeps the current selection if the engine still lists it, otherwise selects the first
    /// slider expression (or none).
    pub fn slider_choice(&mut self) -> Option<SliderRef> {
        let sliders: Vec<SliderRef> = self
            .engine
            .slider_expressions()
            .into_iter()
            .filter(|e| e.is_slider())
            .map(|e| e.slider)
            .collect();

        let keep = self
            .burst
            .slider
            .as_ref()
            .is_some_and(|current| sliders.contains(current));
        if !keep {
            self.select_slider(sliders.into_iter().next());
        }
        self.burst.slider.clone()
    }

    /// Show `message` until [`ERROR_FLASH_DURATION`] after `now`, replacing any current one.
    pub fn flash_error(&mut self, message: impl Into<String>, now: Instant) {
        self.flash = Some(ErrorFlash {
            message: message.into(),
            until: now + ERROR_FLASH_DURATION,
        });
    }

    /// The flashed message, if it has not expired at `now`.
    pub fn current_error(&self, now: Instant) -> Option<&str> {
        self.flash
            .as_ref()
            .filter(|f| now < f.until)
            .map(|f| f.message.as_str())
    }

    /// Drop the flashed message.
    pub fn clear_error(&mut self) {
        self.flash = None;
    }

    fn capture_opts(&mut self, now: Instant) -> Result<CaptureOpts, CaptureError> {
        let fields = validate_settings(&self.settings, &[SettingField::Width, SettingField::Height]);
        if !fields.is_empty() {
            let message = bad_settings_input(&fields);
            self.flash_error(message.clone(), now);
            return Err(CaptureError::InvalidSettings { fields, message });
        }
        Ok(CaptureOpts::from_settings(&self.settings)?)
    }

    fn capture_one(&mut self, opts: &CaptureOpts) -> Result<FrameKey, CaptureError> {
        let raw = self.engine.capture_svg(opts)?;
        let document = normalize_capture(&raw)?;
        Ok(self.frames.append(document))
    }

    /// Capture the graph as it is now and append it.
    #[tracing::instrument(skip(self, now))]
    pub fn capture_frame(&mut self, now: Instant) -> Result<FrameKey, CaptureError> {
        let opts = self.capture_opts(now)?;
        let key = self.capture_one(&opts)?;
        self.undo = None;
        Ok(key)
    }

    /// Sweep the selected slider over [`BurstRecord::sweep_values`], capturing one frame per value.
    ///
    /// Validation failures flash a notice and capture nothing. A slider failure mid-sweep flashes
    /// the engine's message and stops; frames captured so far stay and no undo is offered. A
    /// completed sweep can be reverted with [`CaptureSession::undo_burst`].
    #[tracing::instrument(skip(self, now), fields(frames = self.burst.frame_count))]
    pub fn capture_burst(&mut self, now: Instant) -> Result<BurstReport, CaptureError> {
        if !self.burst_errors.is_empty() {
            let fields = self.burst_errors.clone();
            let message = bad_burst_input(&fields);
            self.flash_error(message.clone(), now);
            return Err(CaptureError::InvalidBurst { fields, message });
        }
        let opts = self.capture_opts(now)?;
        let Some(slider) = self.burst.slider.clone() else {
            let fields = BTreeSet::from([BurstField::Slider]);
            let message = bad_burst_input(&fields);
            self.flash_error(message.clone(), now);
            return Err(CaptureError::InvalidBurst { fields, message });
        };

        let checkpoint = BurstUndo {
            frames: self.frames.checkpoint(),
            engine: self.engine.save_state(),
        };
        self.undo = None;

        let mut keys = Vec::new();
        for value in self.burst.sweep_values() {
            if let Err(source) = self.engine.set_slider(&slider, value) {
                tracing::warn!(%slider, value, captured = keys.len(), "burst interrupted");
                self.flash_error(source.to_string(), now);
                return Err(CaptureError::Slider {
                    value,
                    captured: keys.len(),
                    source,
                });
            }
            keys.push(self.capture_one(&opts)?);
        }

        tracing::debug!(captured = keys.len(), "burst complete");
        self.undo = Some(checkpoint);
        Ok(BurstReport { keys })
    }

    /// Returns `true` when the last burst can be reverted.
    pub fn can_undo_burst(&self) -> bool {
        self.undo.is_some()
    }

    /// Revert the last completed burst: its frames go and the graph returns to its prior state.
    pub fn undo_burst(&mut self) -> bool {
        let Some(BurstUndo { frames, engine }) = self.undo.take() else {
            return false;
        };
        self.frames.restore(frames);
        self.engine.restore_state(engine);
        true
    }

    /// Delete the frame at `position`. See [`FrameCollection::delete_at`].
    pub fn delete_frame(&mut self, position: usize) -> Option<FrameKey> {
        let key = self.frames.delete_at(position)?;
        self.undo = None;
        Some(key)
    }

    /// Bring back the most recently deleted frame.
    pub fn undo_delete(&mut self) -> Option<FrameKey> {
        let key = self.frames.undo_delete()?;
        self.undo = None;
        Some(key)
    }

    /// Drop every frame, the pending undo and the flashed error. Burst and image settings stay.
    pub fn reset(&mut self) {
        self.frames.reset();
        self.undo = None;
        self.flash = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
