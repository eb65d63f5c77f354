use crate::export::raster::FrameRGBA;
use crate::foundation::error::{SvgBurstError, SvgBurstResult};

/// Playback rate as a rational number of frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, never zero.
    pub den: u32,
}

impl Fps {
    /// Rate at which each frame is shown for `interval_ms` milliseconds.
    pub fn from_interval_ms(interval_ms: u32) -> SvgBurstResult<Self> {
        if interval_ms == 0 {
            return Err(SvgBurstError::validation("frame interval must be non-zero"));
        }
        Ok(Self {
            num: 1000,
            den: interval_ms,
        })
    }

    /// Approximate frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Playback rate.
    pub fps: Fps,
}

/// Consumer of rasterized frames.
///
/// `push_frame` is called with indices `0, 1, 2, ...` in playback order, between one `begin` and
/// one `end`. A run that fails after `begin` ends with `abort` instead of `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SvgBurstResult<()>;
    /// Push the next frame.
    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> SvgBurstResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> SvgBurstResult<()>;
    /// Discard the run, including anything already written. Must be safe to call in any state.
    fn abort(&mut self) {}
}

/// Sink that keeps frames in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(usize, FrameRGBA)>,
    finished: bool,
    aborted: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration received in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames received so far, in order.
    pub fn frames(&self) -> &[(usize, FrameRGBA)] {
        &self.frames
    }

    /// Returns `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` when the last run was aborted.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SvgBurstResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> SvgBurstResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SvgBurstResult<()> {
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
        self.finished = false;
        self.aborted = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
