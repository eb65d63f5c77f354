//! svgburst turns a slider sweep of a graphing engine into one animated SVG.
//!
//! A burst captures one static SVG per slider value. The frames are then either merged into a
//! single self-contained SVG whose CSS animations show each frame in turn, or rasterized and
//! handed to an encoder.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: edit a [`BurstRecord`]; [`synchronize`] keeps the manual (step + interval) and
//!    automatic (fps + duration) descriptions consistent, [`validate`] reports unusable fields.
//! 2. **Capture**: a [`CaptureSession`] drives a [`GraphEngine`] over
//!    [`BurstRecord::sweep_values`] and stores the normalized frames in a [`FrameCollection`].
//! 3. **Assemble**: [`assemble`] merges a [`FrameSnapshot`] into one document with per-frame id
//!    prefixes (`_0`, `_1`, ...) and looping CSS visibility timing.
//! 4. **Export** (optional): [`generate`] picks between the SVG path and rasterizing through a
//!    [`FrameSink`] such as [`MovSink`] (system `ffmpeg`).
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: synchronization and assembly are pure functions of their inputs.
//! - **Snapshots, not live state**: assembly and export read an immutable [`FrameSnapshot`], so
//!   later edits to the collection cannot affect a run in flight.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assemble;
mod burst;
mod capture;
mod export;
mod foundation;
mod frames;

pub use assemble::animated::{AnimationSpec, assemble};
pub use assemble::background::{BACKGROUND_CLASS, add_background, background_element};
pub use assemble::document::{FrameDocument, SVG_NAMESPACE};
pub use assemble::ids::{group_id, prefix_ids, prefix_url_refs};
pub use assemble::timing::{FrameTiming, KEYFRAMES_NAME, SEAM_NUDGE, SEAM_OVERLAP_SECS};
pub use burst::ease::{ease_preview, preview_curve};
pub use burst::record::{BurstField, BurstRecord, SliderRef, StepMode};
pub use burst::sync::{STEP_DECIMALS, normalize_input, switch_mode, synchronize};
pub use burst::validate::{ImageSettings, SettingField, validate, validate_settings};
pub use capture::engine::{CaptureOpts, GraphEngine, SliderError, SliderExpression};
pub use capture::messages;
pub use capture::normalize::normalize_capture;
pub use capture::session::{BurstReport, CaptureError, CaptureSession, ERROR_FLASH_DURATION};
pub use export::ffmpeg::{MovSink, MovSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use export::generate::{
    ExportSettings, ExportTarget, Generated, default_file_name, generate,
};
pub use export::raster::{FrameRGBA, MAX_RASTER_DIM, Rasterizer, encode_png, rasterize};
pub use export::sink::{FrameSink, Fps, InMemorySink, SinkConfig};
pub use foundation::core::{Background, Canvas, Rgba8, ViewBox};
pub use foundation::error::{CREATION_PROBLEM, SvgBurstError, SvgBurstResult};
pub use frames::collection::{CollectionCheckpoint, Frame, FrameCollection, FrameKey, FrameSnapshot};
