/// Forwards progress values to a caller callback, keeping them in `[0, 1]` and non-decreasing.
///
/// Values that would move backwards, or that are `NaN`, are not forwarded.
pub(crate) struct Progress<F: FnMut(f64)> {
    callback: F,
    last: f64,
}

impl<F: FnMut(f64)> Progress<F> {
    pub(crate) fn new(callback: F) -> Self {
        Self {
            callback,
            last: 0.0,
        }
    }

    pub(crate) fn report(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        let value = value.clamp(0.0, 1.0);
        if value < self.last {
            return;
        }
        self.last = value;
        (self.callback)(value);
    }

    /// Report exactly `1.0`.
    pub(crate) fn finish(&mut self) {
        self.last = 1.0;
        (self.callback)(1.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/progress.rs"]
mod tests;
