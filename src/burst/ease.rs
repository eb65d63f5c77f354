use crate::burst::record::BurstRecord;

/// Sigmoid ease curve drawn on the burst preview plot.
///
/// `slope` controls steepness and `position` in 0..1 shifts the curve from ease-out (0) through
/// ease-in-out (0.5) to ease-in (1). Input and output are both on 0..1. This curve is display-only;
/// [`BurstRecord::sweep_values`] stays linear.
pub fn ease_preview(x: f64, slope: f64, position: f64) -> f64 {
    let sigmoid = |v: f64| 1.0 / (1.0 + (slope / 2.0 - v).exp());
    let span = sigmoid(slope) - sigmoid(0.0);
    if !(span.is_finite() && span.abs() > f64::EPSILON) {
        return x;
    }

    let ease_in_out = |v: f64| (sigmoid(slope * v) - sigmoid(0.0)) / span;
    let ease_in = |v: f64| 2.0 * ease_in_out(v / 2.0);
    let ease_out = |v: f64| 2.0 * (ease_in_out(0.5 + v / 2.0) - 0.5);
    let lerp = |t: f64, a: f64, b: f64| a + t * (b - a);

    if position < 0.5 {
        ease_in_out(lerp(position / 0.5, ease_out(x), x))
    } else if position > 0.5 {
        ease_in_out(lerp((position - 0.5) / 0.5, x, ease_in(x)))
    } else {
        ease_in_out(x)
    }
}

/// Sample the preview curve of `record` at `samples` evenly spaced points on 0..=1.
pub fn preview_curve(record: &BurstRecord, samples: usize) -> Vec<(f64, f64)> {
    if samples < 2 {
        return vec![(0.0, ease_preview(0.0, record.ease_slope, record.ease_position))];
    }
    let last = (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            let x = i as f64 / last;
            (x, ease_preview(x, record.ease_slope, record.ease_position))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/burst/ease.rs"]
mod tests;
