use serde::{Deserialize, Serialize};

use crate::foundation::error::{SvgBurstError, SvgBurstResult};

/// Output canvas dimensions in user units (pixels for raster output).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> SvgBurstResult<Self> {
        if width == 0 || height == 0 {
            return Err(SvgBurstError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Canvas covering a `viewBox`, truncating fractional sizes.
    pub fn from_view_box(view_box: ViewBox) -> SvgBurstResult<Self> {
        Self::new(view_box.width as u32, view_box.height as u32)
    }
}

/// Parsed value of an SVG `viewBox` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Width, always > 0.
    pub width: f64,
    /// Height, always > 0.
    pub height: f64,
}

impl ViewBox {
    /// Parse `"min-x min-y width height"` (whitespace and/or comma separated).
    pub fn parse(value: &str) -> SvgBurstResult<Self> {
        let parts = value
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                SvgBurstError::malformed_frame(format!("viewBox \"{value}\" is not numeric"))
            })?;

        let [min_x, min_y, width, height] = parts[..] else {
            return Err(SvgBurstError::malformed_frame(format!(
                "viewBox \"{value}\" must have exactly four numbers"
            )));
        };
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SvgBurstError::malformed_frame(format!(
                "viewBox \"{value}\" must have a positive width and height"
            )));
        }

        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }
}

/// Straight-alpha RGBA8 color.
///
/// Serializes as `#rrggbb` (or `#rrggbbaa` when not opaque). Deserializes from a hex string
/// (`#rgb`, `#rrggbb`, `#rrggbbaa`), an `{r, g, b, a?}` object of 0..1 floats, or a 3/4 element
/// array of 0..1 floats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the default animation background.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS hex color.
    pub fn parse_hex(s: &str) -> SvgBurstResult<Self> {
        parse_hex(s).map_err(SvgBurstError::validation)
    }

    fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }

    /// `#rrggbb` form used for SVG `fill` attributes.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as an SVG opacity in 0..1.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Returns `true` when the alpha channel is 255.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.is_opaque() {
            serializer.serialize_str(&self.to_hex_rgb())
        } else {
            serializer.serialize_str(&format!("{}{:02x}", self.to_hex_rgb(), self.a))
        }
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::from_unit(r, g, b, a)),
            Repr::Arr(v) => match v[..] {
                [r, g, b] => Ok(Self::from_unit(r, g, b, 1.0)),
                [r, g, b, a] => Ok(Self::from_unit(r, g, b, a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    match s.len() {
        3 => {
            // `#abc` is shorthand for `#aabbcc`.
            let nibble = |i: usize| hex_byte(&s[i..i + 1]).map(|v| v * 17);
            Ok(Rgba8::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

/// What is painted beneath all frame content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    /// Nothing is painted; the output keeps its alpha channel.
    Transparent,
    /// One full-canvas shape filled with this color.
    Opaque(Rgba8),
}

impl Default for Background {
    fn default() -> Self {
        Self::Opaque(Rgba8::WHITE)
    }
}

impl Background {
    /// Returns `true` for [`Background::Transparent`].
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }
}

impl Serialize for Background {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Transparent => serializer.serialize_str("transparent"),
            Self::Opaque(color) => color.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_str().is_some_and(|s| s.eq_ignore_ascii_case("transparent")) {
            return Ok(Self::Transparent);
        }
        Rgba8::deserialize(value)
            .map(Self::Opaque)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
