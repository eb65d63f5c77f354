use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assemble::animated::{AnimationSpec, assemble, in_frame};
use crate::assemble::background::with_background;
use crate::assemble::document::FrameDocument;
use crate::burst::validate::SettingField;
use crate::capture::messages::bad_settings_input;
use crate::export::raster::{Rasterizer, encode_png};
use crate::export::sink::{FrameSink, Fps, SinkConfig};
use crate::foundation::core::{Background, Canvas};
use crate::foundation::error::{SvgBurstError, SvgBurstResult};
use crate::foundation::math::is_positive_integer;
use crate::foundation::progress::Progress;
use crate::frames::collection::FrameSnapshot;

/// Share of the progress range spent rasterizing; the sink's finish takes the rest.
const RASTER_PROGRESS_SHARE: f64 = 0.99;

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Milliseconds each frame is shown. Must be a positive integer.
    pub interval_ms: f64,
    /// Fill painted beneath every frame.
    pub background: Background,
    /// Raster width; defaults to the first frame's `viewBox` width.
    pub width: Option<u32>,
    /// Raster height; defaults to the first frame's `viewBox` height.
    pub height: Option<u32>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            interval_ms: 100.0,
            background: Background::default(),
            width: None,
            height: None,
        }
    }
}

impl ExportSettings {
    /// Parse settings from JSON text.
    pub fn from_json_str(json: &str) -> SvgBurstResult<Self> {
        serde_json::from_str(json).map_err(|e| SvgBurstError::serde(e.to_string()))
    }

    /// Load settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SvgBurstResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read export settings from '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Frame interval in seconds.
    pub fn interval_secs(&self) -> f64 {
        self.interval_ms / 1000.0
    }

    fn canvas_for(&self, first: &FrameDocument<'_>) -> SvgBurstResult<Canvas> {
        let view_box = Canvas::from_view_box(first.view_box());
        match (self.width, self.height) {
            (Some(w), Some(h)) => Canvas::new(w, h),
            (Some(w), None) => Canvas::new(w, view_box?.height),
            (None, Some(h)) => Canvas::new(view_box?.width, h),
            (None, None) => view_box,
        }
    }
}

/// Where generated output goes.
pub enum ExportTarget<'s> {
    /// One SVG document (animated when there are several frames).
    Svg,
    /// Rasterized frames: a PNG for one frame, otherwise every frame through the sink.
    Raster(&'s mut dyn FrameSink),
}

impl std::fmt::Debug for ExportTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Svg => f.write_str("Svg"),
            Self::Raster(_) => f.write_str("Raster"),
        }
    }
}

/// Result of [`generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generated {
    /// SVG text.
    Svg(String),
    /// PNG bytes of a single frame.
    Png(Vec<u8>),
    /// Number of frames handed to the sink.
    Sequence {
        /// Frames pushed.
        frames: usize,
    },
}

/// File name offered for the output of `target` with `frame_count` frames.
pub fn default_file_name(target: &ExportTarget<'_>, frame_count: usize) -> &'static str {
    match (target, frame_count) {
        (ExportTarget::Svg, _) => "animation.svg",
        (ExportTarget::Raster(_), 0 | 1) => "animation.png",
        (ExportTarget::Raster(_), _) => "animation.mov",
    }
}

/// Produce the final output for `snapshot`.
///
/// The interval is validated before any work, and every frame is parsed before anything is
/// assembled or handed to a sink. Progress ends at exactly `1.0` on success. Any malformed frame
/// or collaborator failure fails the run; a sink that was already started is aborted so it leaves
/// no partial output. [`SvgBurstError::user_message`] gives the notice to show.
#[tracing::instrument(skip(snapshot, settings, target, progress), fields(frames = snapshot.len()))]
pub fn generate(
    snapshot: &FrameSnapshot,
    settings: &ExportSettings,
    target: ExportTarget<'_>,
    progress: impl FnMut(f64),
) -> SvgBurstResult<Generated> {
    if !is_positive_integer(settings.interval_ms) {
        return Err(SvgBurstError::validation(bad_settings_input(
            &BTreeSet::from([SettingField::Interval]),
        )));
    }
    if snapshot.is_empty() {
        return Err(SvgBurstError::validation("there are no frames to export"));
    }

    match target {
        ExportTarget::Svg => {
            let spec = AnimationSpec {
                frames: snapshot.clone(),
                interval_secs: settings.interval_secs(),
                background: settings.background,
            };
            assemble(&spec, progress).map(Generated::Svg)
        }
        ExportTarget::Raster(sink) => {
            // Every frame is checked before the sink sees anything.
            let documents = snapshot
                .iter()
                .enumerate()
                .map(|(i, (_, source))| {
                    FrameDocument::parse(source).map_err(|e| in_frame(i, e))
                })
                .collect::<SvgBurstResult<Vec<_>>>()?;
            let Some(first) = documents.first() else {
                return Err(SvgBurstError::validation("there are no frames to export"));
            };
            let canvas = settings.canvas_for(first)?;

            let mut progress = Progress::new(progress);
            let rasterizer = Rasterizer::new();
            let out = if documents.len() == 1 {
                let svg = with_background(first, settings.background);
                Generated::Png(encode_png(&rasterizer.render(&svg, canvas)?)?)
            } else {
                let cfg = SinkConfig {
                    width: canvas.width,
                    height: canvas.height,
                    fps: Fps::from_interval_ms(settings.interval_ms as u32)?,
                };
                sink.begin(cfg)?;
                let streamed = stream_frames(
                    &documents,
                    settings.background,
                    canvas,
                    &rasterizer,
                    sink,
                    &mut progress,
                )
                .and_then(|frames| sink.end().map(|()| frames));
                match streamed {
                    Ok(frames) => Generated::Sequence { frames },
                    Err(err) => {
                        tracing::warn!(error = %err, "raster sequence failed, aborting sink");
                        sink.abort();
                        return Err(err);
                    }
                }
            };
            progress.finish();
            Ok(out)
        }
    }
}

fn stream_frames<F: FnMut(f64)>(
    documents: &[FrameDocument<'_>],
    background: Background,
    canvas: Canvas,
    rasterizer: &Rasterizer,
    sink: &mut dyn FrameSink,
    progress: &mut Progress<F>,
) -> SvgBurstResult<usize> {
    let n = documents.len();
    for (i, doc) in documents.iter().enumerate() {
        let svg = with_background(doc, background);
        let frame = rasterizer
            .render(&svg, canvas)
            .map_err(|e| SvgBurstError::export(format!("frame {i}: {e}")))?;
        sink.push_frame(i, &frame)?;
        progress.report(RASTER_PROGRESS_SHARE * i as f64 / n as f64);
    }
    tracing::debug!(frames = n, "raster sequence written");
    Ok(n)
}

#[cfg(test)]
#[path = "../../tests/unit/export/generate.rs"]
mod tests;
