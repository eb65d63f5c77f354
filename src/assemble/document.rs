use std::borrow::Cow;
use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::foundation::core::ViewBox;
use crate::foundation::error::{SvgBurstError, SvgBurstResult};

/// Default SVG namespace injected into composite roots that lack one.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A frame document split around its single `<svg>` root element.
///
/// Splitting is done on a full XML event walk, so the pieces are exact byte ranges of the source:
/// `prolog + opening_tag + inner + closing` reproduces the input (self-closing roots are expanded
/// into an explicit open/close pair).
#[derive(Clone, Debug)]
pub struct FrameDocument<'a> {
    source: &'a str,
    open_tag: Range<usize>,
    inner: Range<usize>,
    closing_start: usize,
    self_closing: bool,
    root_name: String,
    has_namespace: bool,
    view_box: ViewBox,
}

impl<'a> FrameDocument<'a> {
    /// Parse and split `source`.
    ///
    /// Fails with [`SvgBurstError::MalformedFrame`] when the XML is not well formed, when there
    /// is no root element or more than one, when the root is not `<svg>`, or when the root has no
    /// usable `viewBox`.
    pub fn parse(source: &'a str) -> SvgBurstResult<Self> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(false);

        let mut depth = 0usize;
        let mut root: Option<RootInfo> = None;
        let mut open_tag = 0..0;
        let mut inner = 0..0;
        let mut closing_start = None;
        let mut self_closing = false;

        loop {
            let before = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|e| {
                SvgBurstError::malformed_frame(format!(
                    "xml error at byte {}: {e}",
                    reader.error_position()
                ))
            })?;
            let after = reader.buffer_position() as usize;

            match event {
                Event::Start(e) => {
                    if depth == 0 {
                        if root.is_some() {
                            return Err(SvgBurstError::malformed_frame(
                                "document has more than one root element",
                            ));
                        }
                        root = Some(RootInfo::inspect(&e)?);
                        open_tag = before..after;
                        inner = after..after;
                    }
                    depth += 1;
                }
                Event::Empty(e) if depth == 0 => {
                    if root.is_some() {
                        return Err(SvgBurstError::malformed_frame(
                            "document has more than one root element",
                        ));
                    }
                    root = Some(RootInfo::inspect(&e)?);
                    open_tag = before..after;
                    inner = after..after;
                    closing_start = Some(after);
                    self_closing = true;
                }
                Event::End(_) => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        SvgBurstError::malformed_frame("unexpected closing tag outside the root")
                    })?;
                    if depth == 0 {
                        inner.end = before;
                        closing_start = Some(before);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(SvgBurstError::malformed_frame("root element is not closed"));
        }
        let (Some(root), Some(closing_start)) = (root, closing_start) else {
            return Err(SvgBurstError::malformed_frame("document has no root element"));
        };

        Ok(Self {
            source,
            open_tag,
            inner,
            closing_start,
            self_closing,
            root_name: root.name,
            has_namespace: root.has_namespace,
            view_box: root.view_box,
        })
    }

    /// The full source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Everything before the root element (XML declaration, doctype, comments).
    pub fn prolog(&self) -> &'a str {
        &self.source[..self.open_tag.start]
    }

    /// Content between the root's opening and closing tags.
    pub fn inner(&self) -> &'a str {
        &self.source[self.inner.clone()]
    }

    /// Root opening tag as written, always ending in `>`.
    pub fn opening_tag(&self) -> Cow<'a, str> {
        let tag = &self.source[self.open_tag.clone()];
        if self.self_closing {
            let base = tag.strip_suffix("/>").unwrap_or(tag).trim_end();
            Cow::Owned(format!("{base}>"))
        } else {
            Cow::Borrowed(tag)
        }
    }

    /// Root opening tag with the default SVG namespace declared.
    ///
    /// Tags that already declare a default namespace are returned unchanged.
    pub fn opening_tag_with_namespace(&self) -> Cow<'a, str> {
        let tag = self.opening_tag();
        if self.has_namespace {
            return tag;
        }
        let base = tag.strip_suffix('>').unwrap_or(&tag);
        Cow::Owned(format!(r#"{base} xmlns="{SVG_NAMESPACE}">"#))
    }

    /// Root closing tag plus whatever follows the root element.
    pub fn closing(&self) -> Cow<'a, str> {
        let tail = &self.source[self.closing_start..];
        if self.self_closing {
            Cow::Owned(format!("</{}>{tail}", self.root_name))
        } else {
            Cow::Borrowed(tail)
        }
    }

    /// Returns `true` when the root declares `xmlns`.
    pub fn has_namespace(&self) -> bool {
        self.has_namespace
    }

    /// Parsed root `viewBox`.
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Rebuild the document with `insert` placed right after the root opening tag.
    pub fn with_inserted(&self, insert: &str) -> String {
        let opening = self.opening_tag();
        let closing = self.closing();
        let mut out = String::with_capacity(self.source.len() + insert.len() + 8);
        out.push_str(self.prolog());
        out.push_str(&opening);
        out.push_str(insert);
        out.push_str(self.inner());
        out.push_str(&closing);
        out
    }
}

struct RootInfo {
    name: String,
    has_namespace: bool,
    view_box: ViewBox,
}

impl RootInfo {
    fn inspect(e: &BytesStart<'_>) -> SvgBurstResult<Self> {
        if e.local_name().as_ref() != b"svg" {
            return Err(SvgBurstError::malformed_frame(format!(
                "root element is <{}>, expected <svg>",
                String::from_utf8_lossy(e.name().as_ref())
            )));
        }

        let mut has_namespace = false;
        let mut view_box = None;
        for attr in e.attributes() {
            let attr = attr.map_err(|err| {
                SvgBurstError::malformed_frame(format!("bad root attribute: {err}"))
            })?;
            match attr.key.as_ref() {
                b"xmlns" => has_namespace = true,
                b"viewBox" => {
                    let value = attr.unescape_value().map_err(|err| {
                        SvgBurstError::malformed_frame(format!("bad viewBox value: {err}"))
                    })?;
                    view_box = Some(ViewBox::parse(&value)?);
                }
                _ => {}
            }
        }

        let view_box = view_box
            .ok_or_else(|| SvgBurstError::malformed_frame("root <svg> has no viewBox"))?;

        Ok(Self {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            has_namespace,
            view_box,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/document.rs"]
mod tests;
