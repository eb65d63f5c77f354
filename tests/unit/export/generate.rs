use super::*;
use crate::export::raster::FrameRGBA;
use crate::export::sink::InMemorySink;
use crate::foundation::core::Rgba8;

fn frame(fill: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><rect width="2" height="4" fill="{fill}"/></svg>"#
    )
}

fn transparent() -> ExportSettings {
    ExportSettings {
        background: Background::Transparent,
        ..ExportSettings::default()
    }
}

#[test]
fn settings_load_from_json() {
    let s = ExportSettings::from_json_str(
        r#"{"interval_ms": 40, "background": "transparent", "width": 8}"#,
    )
    .unwrap();
    assert_eq!(s.interval_ms, 40.0);
    assert!(s.background.is_transparent());
    assert_eq!((s.width, s.height), (Some(8), None));

    let err = ExportSettings::from_json_str("{\"interval_ms\": \"x\"}").unwrap_err();
    assert!(matches!(err, SvgBurstError::Serde(_)));
}

#[test]
fn rejects_fractional_interval_before_any_work() {
    let snapshot = FrameSnapshot::from_documents(vec!["not even xml"]);
    let settings = ExportSettings {
        interval_ms: 12.5,
        ..ExportSettings::default()
    };
    let err = generate(&snapshot, &settings, ExportTarget::Svg, |_| {}).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation error: The Interval setting must be a positive integer."
    );
}

#[test]
fn empty_snapshot_is_a_validation_error() {
    let err = generate(
        &FrameSnapshot::default(),
        &ExportSettings::default(),
        ExportTarget::Svg,
        |_| {},
    )
    .unwrap_err();
    assert!(matches!(err, SvgBurstError::Validation(_)));
}

#[test]
fn single_frame_svg_gets_background_and_full_progress() {
    let snapshot = FrameSnapshot::from_documents(vec![frame("red")]);
    let mut seen = Vec::new();
    let out = generate(
        &snapshot,
        &ExportSettings::default(),
        ExportTarget::Svg,
        |p| seen.push(p),
    )
    .unwrap();

    let Generated::Svg(svg) = out else {
        panic!("expected svg");
    };
    assert!(svg.contains("svgburst-background"));
    assert!(!svg.contains("@keyframes"));
    assert_eq!(seen, vec![1.0]);
}

#[test]
fn multi_frame_svg_is_animated() {
    let snapshot = FrameSnapshot::from_documents(vec![frame("red"), frame("blue")]);
    let out = generate(&snapshot, &transparent(), ExportTarget::Svg, |_| {}).unwrap();
    let Generated::Svg(svg) = out else {
        panic!("expected svg");
    };
    assert!(svg.contains("animation:0.2s linear _k infinite"));
}

#[test]
fn single_frame_raster_is_a_png() {
    let snapshot = FrameSnapshot::from_documents(vec![frame("red")]);
    let mut sink = InMemorySink::new();
    let mut seen = Vec::new();
    let out = generate(
        &snapshot,
        &ExportSettings::default(),
        ExportTarget::Raster(&mut sink),
        |p| seen.push(p),
    )
    .unwrap();

    let Generated::Png(png) = out else {
        panic!("expected png");
    };
    assert_eq!(&png[..4], b"\x89PNG");
    assert!(sink.frames().is_empty());
    assert_eq!(seen, vec![1.0]);
}

#[test]
fn multi_frame_raster_streams_through_the_sink() {
    let snapshot = FrameSnapshot::from_documents(vec![frame("red"), frame("lime"), frame("blue")]);
    let settings = ExportSettings {
        interval_ms: 50.0,
        background: Background::Opaque(Rgba8::WHITE),
        width: Some(8),
        height: Some(8),
    };
    let mut sink = InMemorySink::new();
    let mut seen = Vec::new();
    let out = generate(
        &snapshot,
        &settings,
        ExportTarget::Raster(&mut sink),
        |p| seen.push(p),
    )
    .unwrap();

    assert_eq!(out, Generated::Sequence { frames: 3 });
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (8, 8));
    assert_eq!(cfg.fps, Fps { num: 1000, den: 50 });
    assert_eq!(sink.frames().len(), 3);
    assert!(sink.is_finished());

    let (_, first) = &sink.frames()[0];
    // Left half red, right half the white background.
    assert_eq!(&first.data[..4], &[255, 0, 0, 255]);
    assert_eq!(&first.data[7 * 4..8 * 4], &[255, 255, 255, 255]);

    assert_eq!(seen.last(), Some(&1.0));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert!(seen[..seen.len() - 1].iter().all(|&p| p < 0.99));
}

#[test]
fn canvas_defaults_to_the_view_box() {
    let snapshot = FrameSnapshot::from_documents(vec![frame("red"), frame("blue")]);
    let mut sink = InMemorySink::new();
    generate(&snapshot, &transparent(), ExportTarget::Raster(&mut sink), |_| {}).unwrap();
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (4, 4));
}

#[test]
fn file_names_follow_target_and_count() {
    let mut sink = InMemorySink::new();
    assert_eq!(default_file_name(&ExportTarget::Svg, 3), "animation.svg");
    let raster = ExportTarget::Raster(&mut sink);
    assert_eq!(default_file_name(&raster, 1), "animation.png");
    assert_eq!(default_file_name(&raster, 2), "animation.mov");
}

#[test]
fn svg_path_accepts_sub_unit_view_box() {
    let doc =
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 0.5 0.5"><circle r="0.2"/></svg>"#;
    let snapshot = FrameSnapshot::from_documents(vec![doc, doc]);
    let out = generate(&snapshot, &ExportSettings::default(), ExportTarget::Svg, |_| {}).unwrap();
    let Generated::Svg(svg) = out else {
        panic!("expected svg");
    };
    assert!(svg.contains(r#"d="M0 0h0.5v0.5H0z""#));
}

#[test]
fn raster_checks_every_frame_before_starting_the_sink() {
    let no_view_box = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="2" height="2"/></svg>"#;
    let unclosed = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><g></svg>"#;

    for (bad, settings) in [
        (no_view_box, transparent()),
        (unclosed, ExportSettings::default()),
    ] {
        let snapshot =
            FrameSnapshot::from_documents(vec![frame("red"), frame("blue"), bad.to_owned()]);
        let mut sink = InMemorySink::new();
        let mut seen = Vec::new();
        let err = generate(
            &snapshot,
            &settings,
            ExportTarget::Raster(&mut sink),
            |p| seen.push(p),
        )
        .unwrap_err();

        assert!(matches!(&err, SvgBurstError::MalformedFrame(msg) if msg.starts_with("frame 2:")));
        assert_eq!(sink.config(), None);
        assert!(sink.frames().is_empty());
        assert!(seen.is_empty());
    }
}

/// Accepts frames until `fail_at`, then refuses.
struct RefusingSink {
    inner: InMemorySink,
    fail_at: usize,
}

impl FrameSink for RefusingSink {
    fn begin(&mut self, cfg: SinkConfig) -> SvgBurstResult<()> {
        self.inner.begin(cfg)
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> SvgBurstResult<()> {
        if idx == self.fail_at {
            return Err(SvgBurstError::export("disk full"));
        }
        self.inner.push_frame(idx, frame)
    }

    fn end(&mut self) -> SvgBurstResult<()> {
        self.inner.end()
    }

    fn abort(&mut self) {
        self.inner.abort();
    }
}

#[test]
fn sink_failure_mid_stream_aborts_the_sink() {
    let snapshot = FrameSnapshot::from_documents(vec![frame("red"), frame("lime"), frame("blue")]);
    let mut sink = RefusingSink {
        inner: InMemorySink::new(),
        fail_at: 2,
    };
    let mut seen = Vec::new();
    let err = generate(
        &snapshot,
        &transparent(),
        ExportTarget::Raster(&mut sink),
        |p| seen.push(p),
    )
    .unwrap_err();

    assert!(matches!(err, SvgBurstError::Export(_)));
    assert!(sink.inner.is_aborted());
    assert!(!sink.inner.is_finished());
    assert!(sink.inner.frames().is_empty());
    assert_ne!(seen.last(), Some(&1.0));
}
