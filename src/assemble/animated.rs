use crate::assemble::background::{background_element, with_background};
use crate::assemble::document::FrameDocument;
use crate::assemble::ids::{group_id, prefix_ids};
use crate::assemble::timing::FrameTiming;
use crate::foundation::core::Background;
use crate::foundation::error::{SvgBurstError, SvgBurstResult};
use crate::foundation::progress::Progress;
use crate::frames::collection::FrameSnapshot;

/// Everything needed to build one animated document.
///
/// The composite has no pixel size of its own: it keeps frame 0's root attributes and
/// `viewBox`, and the background covers that `viewBox`. Raster sizes live in
/// [`crate::ExportSettings`].
#[derive(Clone, Debug)]
pub struct AnimationSpec {
    /// Frames in playback order.
    pub frames: FrameSnapshot,
    /// Seconds each frame is shown.
    pub interval_secs: f64,
    /// Fill painted beneath every frame.
    pub background: Background,
}

/// Assemble the frames of `spec` into one SVG document.
///
/// One frame is returned as-is with the background inserted. Two or more frames become a
/// composite whose groups `_0.._N-1` take turns being visible for `interval_secs` each, driven by
/// CSS animations only.
///
/// `progress` receives non-decreasing values in `[0, 1]`; the last call is always `1.0` on
/// success. Any malformed frame fails the whole batch and nothing is returned.
#[tracing::instrument(skip(spec, progress), fields(frames = spec.frames.len()))]
pub fn assemble(spec: &AnimationSpec, progress: impl FnMut(f64)) -> SvgBurstResult<String> {
    let mut progress = Progress::new(progress);

    let documents = spec.frames.documents();
    let parsed = documents
        .iter()
        .enumerate()
        .map(|(i, source)| FrameDocument::parse(source).map_err(|e| in_frame(i, e)))
        .collect::<SvgBurstResult<Vec<_>>>()?;

    let Some(first) = parsed.first() else {
        return Err(SvgBurstError::validation("no frames to assemble"));
    };

    if parsed.len() == 1 {
        let out = with_background(first, spec.background).into_owned();
        progress.finish();
        return Ok(out);
    }

    let timing = FrameTiming::new(parsed.len(), spec.interval_secs)?;
    let n = parsed.len();

    let mut out = String::with_capacity(documents.iter().map(|d| d.len() + 32).sum::<usize>());
    out.push_str(first.prolog());
    out.push_str(&first.opening_tag_with_namespace());
    if let Background::Opaque(color) = spec.background {
        out.push_str(&background_element(color, first.view_box()));
    }
    out.push_str(&timing.hide_rule());

    for (i, doc) in parsed.iter().enumerate() {
        let group = group_id(i);
        let content = prefix_ids(doc.inner(), &group).map_err(|e| in_frame(i, e))?;
        out.push_str(r#"<g id=""#);
        out.push_str(&group);
        out.push_str(r#"">"#);
        out.push_str(&content);
        out.push_str("</g>");
        progress.report(i as f64 / n as f64);
    }

    out.push_str(&timing.animation_rules());
    out.push_str(&first.closing());

    tracing::debug!(frames = n, bytes = out.len(), "assembled animated svg");
    progress.finish();
    Ok(out)
}

/// Prefix a malformed-frame message with the frame index.
pub(crate) fn in_frame(index: usize, err: SvgBurstError) -> SvgBurstError {
    match err {
        SvgBurstError::MalformedFrame(msg) => {
            SvgBurstError::malformed_frame(format!("frame {index}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/animated.rs"]
mod tests;
