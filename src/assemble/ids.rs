use std::borrow::Cow;
use std::collections::HashSet;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::foundation::error::{SvgBurstError, SvgBurstResult};

/// Id of the group wrapping frame `index` in a composite, and the prefix of that frame's ids.
pub fn group_id(index: usize) -> String {
    format!("_{index}")
}

/// Prefix every element id in `fragment` with `prefix` and retarget the local references to them.
///
/// Rewritten attributes:
/// - `id="X"` becomes `id="{prefix}X"`;
/// - `href="#X"` and `xlink:href="#X"` become `#{prefix}X`;
/// - `url(#X)`, `url('#X')` and `url("#X")` inside any other attribute value (`fill`,
///   `clip-path`, `mask`, `filter`, `style`, ...) become `url(#{prefix}X)` with the same quoting.
///
/// Text content, comments and `<style>` bodies are copied untouched, and elements with nothing to
/// rewrite are copied byte for byte.
///
/// Ids must be unique within the fragment, non-empty and must not start with an ASCII digit;
/// otherwise two frames could produce the same prefixed id. Violations fail with
/// [`SvgBurstError::MalformedFrame`].
pub fn prefix_ids(fragment: &str, prefix: &str) -> SvgBurstResult<String> {
    let mut reader = Reader::from_str(fragment);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(fragment.len() + fragment.len() / 8));
    let mut seen = HashSet::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            SvgBurstError::malformed_frame(format!(
                "xml error at byte {}: {e}",
                reader.error_position()
            ))
        })?;
        let event = match event {
            Event::Start(e) => match rewrite_element(&e, prefix, &mut seen)? {
                Some(rewritten) => Event::Start(rewritten),
                None => Event::Start(e),
            },
            Event::Empty(e) => match rewrite_element(&e, prefix, &mut seen)? {
                Some(rewritten) => Event::Empty(rewritten),
                None => Event::Empty(e),
            },
            Event::Eof => break,
            other => other,
        };
        writer
            .write_event(event)
            .map_err(|e| SvgBurstError::assembly(format!("write rewritten frame content: {e}")))?;
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| SvgBurstError::assembly(format!("rewritten frame is not utf-8: {e}")))
}

/// Prefix the fragment of every `url(#...)` reference in an attribute value.
///
/// Returns `None` when `value` holds no local `url()` reference.
pub fn prefix_url_refs(value: &str, prefix: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len() + prefix.len());
    let mut rest = value;
    let mut changed = false;

    while let Some(pos) = rest.find("url(") {
        let mut cut = pos + "url(".len();
        if rest[cut..].starts_with(['\'', '"']) {
            cut += 1;
        }
        out.push_str(&rest[..cut]);
        rest = &rest[cut..];
        if let Some(target) = rest.strip_prefix('#') {
            out.push('#');
            out.push_str(prefix);
            rest = target;
            changed = true;
        }
    }

    if !changed {
        return None;
    }
    out.push_str(rest);
    Some(out)
}

fn prefix_href(value: &str, prefix: &str) -> Option<String> {
    value
        .strip_prefix('#')
        .filter(|target| !target.is_empty())
        .map(|target| format!("#{prefix}{target}"))
}

fn check_id(id: &str, seen: &mut HashSet<String>) -> SvgBurstResult<()> {
    if id.is_empty() {
        return Err(SvgBurstError::malformed_frame("element has an empty id"));
    }
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(SvgBurstError::malformed_frame(format!(
            "id \"{id}\" starts with a digit"
        )));
    }
    if !seen.insert(id.to_owned()) {
        return Err(SvgBurstError::malformed_frame(format!(
            "id \"{id}\" is used more than once"
        )));
    }
    Ok(())
}

/// Rebuild `e` with rewritten attributes, or `None` when no attribute changes.
fn rewrite_element(
    e: &BytesStart<'_>,
    prefix: &str,
    seen: &mut HashSet<String>,
) -> SvgBurstResult<Option<BytesStart<'static>>> {
    let mut attrs: Vec<(String, Cow<'_, str>)> = Vec::new();
    let mut changed = false;

    for attr in e.attributes() {
        let attr = attr
            .map_err(|err| SvgBurstError::malformed_frame(format!("bad attribute: {err}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| SvgBurstError::malformed_frame(format!("bad attribute name: {err}")))?
            .to_owned();
        let value = attr.unescape_value().map_err(|err| {
            SvgBurstError::malformed_frame(format!("bad value for attribute {key}: {err}"))
        })?;

        let rewritten = match key.as_str() {
            "id" => {
                check_id(&value, seen)?;
                Some(format!("{prefix}{value}"))
            }
            "href" | "xlink:href" => prefix_href(&value, prefix),
            _ => prefix_url_refs(&value, prefix),
        };

        match rewritten {
            Some(v) => {
                changed = true;
                attrs.push((key, Cow::Owned(v)));
            }
            None => attrs.push((key, value)),
        }
    }

    if !changed {
        return Ok(None);
    }

    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| SvgBurstError::malformed_frame(format!("bad element name: {err}")))?
        .to_owned();
    let mut out = BytesStart::new(name);
    for (key, value) in &attrs {
        push_attr(&mut out, key, value);
    }
    Ok(Some(out))
}

/// Append `key="value"`, escaping only what a double-quoted attribute requires.
pub(crate) fn push_attr(element: &mut BytesStart<'_>, key: &str, value: &str) {
    let value: Cow<'_, str> = if value.contains(['&', '<', '"']) {
        Cow::Owned(
            value
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('"', "&quot;"),
        )
    } else {
        Cow::Borrowed(value)
    };
    element.push_attribute((key.as_bytes(), value.as_bytes()));
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/ids.rs"]
mod tests;
