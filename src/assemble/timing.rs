use std::fmt::Write as _;

use crate::assemble::ids::group_id;
use crate::foundation::error::{SvgBurstError, SvgBurstResult};
use crate::foundation::math::is_positive;

/// Name of the shared `@keyframes` rule.
pub const KEYFRAMES_NAME: &str = "_k";

/// Nudge added to the hide breakpoint, in percent-seconds.
///
/// The hide breakpoint sits at `(100 + SEAM_NUDGE / T) / N` percent of an `N * T` cycle, which
/// keeps each frame visible for `SEAM_NUDGE / 100` seconds past its slot regardless of `N` and
/// `T`.
pub const SEAM_NUDGE: f64 = 0.0001;

/// Overlap between consecutive frames at each seam, in seconds.
pub const SEAM_OVERLAP_SECS: f64 = SEAM_NUDGE / 100.0;

/// CSS timing for `frame_count` groups shown for `interval_secs` each, in order, forever.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTiming {
    frame_count: usize,
    interval_secs: f64,
}

impl FrameTiming {
    /// Fails with [`SvgBurstError::Validation`] for zero frames or a non-positive interval.
    pub fn new(frame_count: usize, interval_secs: f64) -> SvgBurstResult<Self> {
        if frame_count == 0 {
            return Err(SvgBurstError::validation("animation needs at least one frame"));
        }
        if !is_positive(interval_secs) {
            return Err(SvgBurstError::validation(format!(
                "frame interval must be positive, got {interval_secs}s"
            )));
        }
        Ok(Self {
            frame_count,
            interval_secs,
        })
    }

    /// Number of groups.
    pub fn frame_count(self) -> usize {
        self.frame_count
    }

    /// Seconds each frame is shown.
    pub fn interval_secs(self) -> f64 {
        self.interval_secs
    }

    /// Length of one full cycle.
    pub fn cycle_secs(self) -> f64 {
        self.interval_secs * self.frame_count as f64
    }

    /// Keyframe percentage where a frame stops being visible.
    pub fn visible_until_percent(self) -> f64 {
        100.0 / self.frame_count as f64
    }

    /// Keyframe percentage where a frame is hidden again.
    pub fn hidden_from_percent(self) -> f64 {
        (100.0 + SEAM_NUDGE / self.interval_secs) / self.frame_count as f64
    }

    fn selector_list(self) -> String {
        let mut out = String::new();
        for i in 0..self.frame_count {
            if i > 0 {
                out.push(',');
            }
            out.push('#');
            out.push_str(&group_id(i));
        }
        out
    }

    /// Style block hiding every group. Must precede all frame content.
    pub fn hide_rule(self) -> String {
        format!(
            r#"<defs><style type="text/css">{}{{visibility:hidden}}</style></defs>"#,
            self.selector_list()
        )
    }

    /// Style block with the shared animation, the per-group delays and the keyframes.
    pub fn animation_rules(self) -> String {
        let mut css = String::new();
        let _ = write!(
            css,
            "{}{{animation:{}s linear {KEYFRAMES_NAME} infinite}}",
            self.selector_list(),
            self.cycle_secs()
        );
        for i in 0..self.frame_count {
            let _ = write!(
                css,
                "#{}{{animation-delay:{}s}}",
                group_id(i),
                self.interval_secs * i as f64
            );
        }
        let _ = write!(
            css,
            "@keyframes {KEYFRAMES_NAME}{{0%,{}%{{visibility:visible}}{}%,100%{{visibility:hidden}}}}",
            self.visible_until_percent(),
            self.hidden_from_percent()
        );
        format!(r#"<defs><style type="text/css">{css}</style></defs>"#)
    }

    /// Half-open window `[start, end)` within a cycle where group `index` is visible.
    ///
    /// `end` may exceed [`FrameTiming::cycle_secs`] for the last group; the excess wraps to the
    /// start of the next cycle.
    pub fn visible_window(self, index: usize) -> (f64, f64) {
        let start = self.interval_secs * index as f64;
        let end = start + self.hidden_from_percent() / 100.0 * self.cycle_secs();
        (start, end)
    }

    /// Groups visible at time `t` once every group's animation has started.
    pub fn visible_at(self, t: f64) -> Vec<usize> {
        let cycle = self.cycle_secs();
        let t = t.rem_euclid(cycle);
        (0..self.frame_count)
            .filter(|&i| {
                let (start, end) = self.visible_window(i);
                (start <= t && t < end) || (end > cycle && t < end - cycle)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/timing.rs"]
mod tests;
