use crate::burst::record::{BurstField, BurstRecord, SliderRef, StepMode};
use crate::foundation::math::{is_positive, non_negative_or_zero, round_to_decimals};

/// Decimal places kept on `step`.
pub const STEP_DECIMALS: i32 = 4;

/// Recompute every derived field of `record` from its authoritative pair.
///
/// Pure: the input is not touched and the same input always yields the same output. Derived
/// values that come out non-finite or negative are reported as `0`.
pub fn synchronize(record: &BurstRecord) -> BurstRecord {
    let mut out = record.clone();
    let span = record.span();

    match record.mode {
        StepMode::ManualStep => {
            out.fps = non_negative_or_zero((1000.0 / record.interval).round());
            out.frame_count = non_negative_or_zero((span / record.step).round());
            out.duration = non_negative_or_zero((out.frame_count * record.interval).round());
        }
        StepMode::AutoStep => {
            out.interval = non_negative_or_zero((1000.0 / record.fps).round());
            out.frame_count = non_negative_or_zero((record.duration / out.interval).round());
            out.step = non_negative_or_zero(round_to_decimals(
                span / out.frame_count,
                STEP_DECIMALS,
            ));
        }
    }

    out
}

/// Apply the same rounding a user edit of `field` receives.
///
/// Timing fields are whole milliseconds or whole frames per second, `step` keeps
/// [`STEP_DECIMALS`] decimals, everything else is stored as entered.
pub fn normalize_input(field: BurstField, value: f64) -> f64 {
    match field {
        BurstField::Interval | BurstField::Fps | BurstField::Duration => value.round(),
        BurstField::Step => round_to_decimals(value, STEP_DECIMALS),
        _ => value,
    }
}

/// Switch the active parameterization without moving the frame count.
///
/// The newly authoritative pair is rebuilt from the last synchronized `frame_count` and the
/// current range, then the record is synchronized again.
pub fn switch_mode(record: &BurstRecord, mode: StepMode) -> BurstRecord {
    let mut out = record.clone();
    if out.mode == mode {
        return synchronize(&out);
    }
    out.mode = mode;

    let frame_count = record.frame_count;
    if is_positive(frame_count) {
        match mode {
            StepMode::AutoStep => {
                if is_positive(out.fps) {
                    let interval = (1000.0 / out.fps).round();
                    out.duration = non_negative_or_zero((frame_count * interval).round());
                }
            }
            StepMode::ManualStep => {
                let step = round_to_decimals(record.span() / frame_count, STEP_DECIMALS);
                if is_positive(step) {
                    out.step = step;
                }
                if is_positive(out.fps) {
                    out.interval = (1000.0 / out.fps).round();
                }
            }
        }
    }

    synchronize(&out)
}

impl BurstRecord {
    /// Edit one numeric field and resynchronize.
    ///
    /// Editing `Slider` is a no-op here; use [`BurstRecord::select_slider`].
    pub fn set(&mut self, field: BurstField, value: f64) {
        if let Some(slot) = self.field_mut(field) {
            *slot = normalize_input(field, value);
        }
        *self = synchronize(self);
    }

    /// The record with every numeric field rounded as if the user had typed it, synchronized.
    ///
    /// Records that did not come through [`BurstRecord::set`] (config files, wholesale
    /// replacement) go through this so e.g. a `step` below the kept precision reads as `0` and
    /// fails validation instead of producing an unbounded sweep.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        for field in BurstField::NUMERIC {
            if let Some(slot) = out.field_mut(field) {
                *slot = normalize_input(field, *slot);
            }
        }
        synchronize(&out)
    }

    /// Select (or clear) the slider being swept.
    pub fn select_slider(&mut self, slider: Option<SliderRef>) {
        self.slider = slider;
    }

    /// Switch mode in place. See [`switch_mode`].
    pub fn set_mode(&mut self, mode: StepMode) {
        *self = switch_mode(self, mode);
    }

    /// Slider values a sweep captures, from `min` upward in steps of `step`.
    ///
    /// Values are `min + k * step` for `k = 0..=floor((max - min) / step)`, so `max` is included
    /// when it lies on the grid. An unusable range or step yields no values. The iterator is lazy
    /// and does not borrow the record.
    pub fn sweep_values(&self) -> impl Iterator<Item = f64> + use<> {
        let (min, step, span) = (self.min, self.step, self.span());
        let usable = is_positive(step) && min.is_finite() && span.is_finite() && span >= 0.0;

        // Tolerate representation error so e.g. 0.1 steps still land on `max`.
        let count = if usable {
            Some((span / step + 1e-9).floor() as u64)
        } else {
            None
        };
        count
            .into_iter()
            .flat_map(|last| 0..=last)
            .map(move |k| min + (k as f64) * step)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/burst/sync.rs"]
mod tests;
