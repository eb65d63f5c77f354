use crate::burst::record::SliderRef;
use crate::burst::validate::ImageSettings;
use crate::capture::messages::{no_such_expression, not_a_slider};
use crate::foundation::error::{SvgBurstError, SvgBurstResult};

/// Why a slider could not be set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SliderError {
    /// No expression has this id.
    #[error("{}", no_such_expression(.0))]
    NoSuchExpression(SliderRef),
    /// The expression exists but is not an assignment to a single variable.
    #[error("{}", not_a_slider(.0))]
    NotASlider(SliderRef),
}

/// One expression of the graph as listed by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliderExpression {
    /// Id used to address the expression.
    pub slider: SliderRef,
    /// Expression source, e.g. `a=3`.
    pub latex: String,
}

impl SliderExpression {
    /// `true` when the source mentions exactly one ASCII letter, the shape of `a=3`.
    pub fn is_slider(&self) -> bool {
        self.latex
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .count()
            == 1
    }

    /// The source rewritten to assign `value`, keeping everything left of the last `=`.
    pub fn assignment(&self, value: f64) -> Result<String, SliderError> {
        match self.latex.rsplit_once('=') {
            Some((identifier, _)) if !identifier.is_empty() => Ok(format!("{identifier}={value}")),
            _ => Err(SliderError::NotASlider(self.slider.clone())),
        }
    }
}

/// Image request passed to [`GraphEngine::capture_svg`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOpts {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Device pixel ratio to render at.
    pub target_pixel_ratio: f64,
}

impl CaptureOpts {
    /// Build capture options from image settings.
    ///
    /// Fails with [`SvgBurstError::Validation`] if width or height is not a positive integer.
    pub fn from_settings(settings: &ImageSettings) -> SvgBurstResult<Self> {
        let dim = |name: &str, v: f64| -> SvgBurstResult<u32> {
            if v.is_finite() && v >= 1.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
                Ok(v as u32)
            } else {
                Err(SvgBurstError::validation(format!(
                    "image {name} must be a positive integer, got {v}"
                )))
            }
        };
        Ok(Self {
            width: dim("width", settings.width)?,
            height: dim("height", settings.height)?,
            target_pixel_ratio: if settings.oversample { 2.0 } else { 1.0 },
        })
    }
}

/// The graphing engine that renders frames and owns the slider values.
///
/// Implementations render synchronously; a host that renders asynchronously blocks inside
/// [`GraphEngine::capture_svg`].
pub trait GraphEngine {
    /// Opaque snapshot of the whole graph, used to undo a burst.
    type State;

    /// Expressions that look like sliders, in display order.
    fn slider_expressions(&self) -> Vec<SliderExpression>;

    /// Set `slider` to `value`.
    fn set_slider(&mut self, slider: &SliderRef, value: f64) -> Result<(), SliderError>;

    /// Render the current graph as standalone SVG text.
    fn capture_svg(&mut self, opts: &CaptureOpts) -> SvgBurstResult<String>;

    /// Snapshot the current graph.
    fn save_state(&self) -> Self::State;

    /// Put back a snapshot taken by [`GraphEngine::save_state`].
    fn restore_state(&mut self, state: Self::State);
}

#[cfg(test)]
#[path = "../../tests/unit/capture/engine.rs"]
mod tests;
