/// Replace non-finite or negative values with `0.0`.
///
/// Derived burst fields go through this before they are surfaced so a half-typed record
/// (`NaN` min, zero step) still renders as plain numbers.
pub(crate) fn non_negative_or_zero(v: f64) -> f64 {
    if v.is_finite() && v >= 0.0 { v } else { 0.0 }
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to_decimals(v: f64, decimals: i32) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

/// `true` for finite values strictly greater than zero.
pub(crate) fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// `true` for positive values with no fractional part.
pub(crate) fn is_positive_integer(v: f64) -> bool {
    is_positive(v) && v.fract() == 0.0
}

/// Convert premultiplied RGBA8 pixels to straight alpha.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
