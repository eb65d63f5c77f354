use super::*;

#[test]
fn fps_is_exact_for_any_interval() {
    let fps = Fps::from_interval_ms(30).unwrap();
    assert_eq!(fps, Fps { num: 1000, den: 30 });
    assert!((fps.as_f64() - 33.333).abs() < 1e-3);
    assert!(Fps::from_interval_ms(0).is_err());
}

#[test]
fn in_memory_sink_records_the_run() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::from_interval_ms(100).unwrap(),
    };
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 0],
    };

    sink.begin(cfg).unwrap();
    sink.push_frame(0, &frame).unwrap();
    sink.push_frame(1, &frame).unwrap();
    assert!(!sink.is_finished());
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg));
    assert_eq!(sink.frames().len(), 2);
    assert!(sink.is_finished());
}

#[test]
fn abort_discards_the_run() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::from_interval_ms(100).unwrap(),
    };
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 0],
    };

    sink.begin(cfg).unwrap();
    sink.push_frame(0, &frame).unwrap();
    sink.abort();
    assert!(sink.is_aborted());
    assert!(!sink.is_finished());
    assert!(sink.frames().is_empty());

    sink.begin(cfg).unwrap();
    assert!(!sink.is_aborted());
}
