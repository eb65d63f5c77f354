use anyhow::Context;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::assemble::ids::push_attr;
use crate::foundation::error::{SvgBurstError, SvgBurstResult};

/// Turn a raw engine screenshot into a frame document.
///
/// The root's pixel `width`/`height` become a `viewBox="0 0 W H"` and both are set to `100%`, so
/// frames scale with their container. The first `<rect>` (the engine's own background, painted
/// again later if requested) is dropped along with its children. A root without a pixel size
/// (missing, or relative like `100%`) that already carries a `viewBox` is kept as is.
pub fn normalize_capture(raw: &str) -> SvgBurstResult<String> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(raw.len()));

    let mut depth = 0usize;
    let mut seen_root = false;
    let mut rect_removed = false;
    let mut skipping: Option<usize> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            SvgBurstError::malformed_frame(format!(
                "capture xml error at byte {}: {e}",
                reader.error_position()
            ))
        })?;

        if let Some(level) = skipping {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == level {
                        skipping = None;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        let event = match event {
            Event::Start(e) if !seen_root => {
                seen_root = true;
                depth += 1;
                Event::Start(normalize_root(&e)?)
            }
            Event::Empty(e) if !seen_root => {
                seen_root = true;
                Event::Empty(normalize_root(&e)?)
            }
            Event::Start(e) if !rect_removed && e.local_name().as_ref() == b"rect" => {
                rect_removed = true;
                skipping = Some(depth);
                depth += 1;
                continue;
            }
            Event::Empty(e) if !rect_removed && e.local_name().as_ref() == b"rect" => {
                rect_removed = true;
                continue;
            }
            Event::Start(e) => {
                depth += 1;
                Event::Start(e)
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                Event::End(e)
            }
            Event::Eof => break,
            other => other,
        };
        writer.write_event(event).context("write normalized capture")?;
    }

    if !seen_root {
        return Err(SvgBurstError::malformed_frame("capture has no root element"));
    }
    let out = String::from_utf8(writer.into_inner()).context("normalized capture is not utf-8")?;
    Ok(out)
}

fn normalize_root(e: &BytesStart<'_>) -> SvgBurstResult<BytesStart<'static>> {
    if e.local_name().as_ref() != b"svg" {
        return Err(SvgBurstError::malformed_frame(format!(
            "capture root is <{}>, expected <svg>",
            String::from_utf8_lossy(e.name().as_ref())
        )));
    }

    let mut attrs = Vec::new();
    let (mut width, mut height, mut has_view_box) = (None, None, false);
    for attr in e.attributes() {
        let attr = attr
            .map_err(|err| SvgBurstError::malformed_frame(format!("bad root attribute: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| SvgBurstError::malformed_frame(format!("bad root attribute: {err}")))?
            .into_owned();
        match key.as_str() {
            "width" => width = pixel_size(&value),
            "height" => height = pixel_size(&value),
            "viewBox" => has_view_box = true,
            _ => {}
        }
        attrs.push((key, value));
    }

    let (Some(width), Some(height)) = (width, height) else {
        if has_view_box {
            return Ok(e.clone().into_owned());
        }
        return Err(SvgBurstError::malformed_frame(
            "capture root has neither a pixel size nor a viewBox",
        ));
    };

    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);
    for (key, value) in &attrs {
        match key.as_str() {
            "width" | "height" => push_attr(&mut out, key, "100%"),
            "viewBox" => {}
            _ => push_attr(&mut out, key, value),
        }
    }
    push_attr(&mut out, "viewBox", &format!("0 0 {width} {height}"));
    Ok(out)
}

fn pixel_size(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/normalize.rs"]
mod tests;
