use std::borrow::Cow;

use crate::assemble::document::FrameDocument;
use crate::foundation::core::{Background, Rgba8, ViewBox};
use crate::foundation::error::SvgBurstResult;
use crate::foundation::math::round_to_decimals;

/// Class carried by inserted background shapes.
pub const BACKGROUND_CLASS: &str = "svgburst-background";

/// A `<path>` filling `view_box` with `color`.
pub fn background_element(color: Rgba8, view_box: ViewBox) -> String {
    let ViewBox {
        min_x,
        min_y,
        width,
        height,
    } = view_box;
    let opacity = if color.is_opaque() {
        String::new()
    } else {
        format!(
            r#" fill-opacity="{}""#,
            round_to_decimals(color.opacity(), 3)
        )
    };
    format!(
        r#"<path fill="{fill}"{opacity} class="{BACKGROUND_CLASS}" d="M{min_x} {min_y}h{width}v{height}H{min_x}z"/>"#,
        fill = color.to_hex_rgb(),
    )
}

/// Insert a full-canvas background shape right after the root opening tag of `document`.
///
/// A transparent background returns the input untouched (and does not parse it).
pub fn add_background(document: &str, background: Background) -> SvgBurstResult<Cow<'_, str>> {
    if background.is_transparent() {
        return Ok(Cow::Borrowed(document));
    }
    let doc = FrameDocument::parse(document)?;
    Ok(with_background(&doc, background))
}

pub(crate) fn with_background<'a>(doc: &FrameDocument<'a>, background: Background) -> Cow<'a, str> {
    match background {
        Background::Transparent => Cow::Borrowed(doc.source()),
        Background::Opaque(color) => {
            Cow::Owned(doc.with_inserted(&background_element(color, doc.view_box())))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/background.rs"]
mod tests;
