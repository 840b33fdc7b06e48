use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Rgba8;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::new(10, 1).unwrap(),
        background: Rgba8::BLACK,
    }
}

fn pixel(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![v, v, v, 255],
        premultiplied: true,
    }
}

#[test]
fn full_range_uses_ceil_of_duration() {
    let r = full_range(1.05, Fps::new(10, 1).unwrap());
    assert_eq!(r.len_frames(), 11);
    assert_eq!(r.start, FrameIndex(0));
}

#[test]
fn frames_are_sampled_at_index_over_fps() {
    let mut sink = InMemorySink::new();
    let mut times = Vec::new();
    let range = FrameRange::new(FrameIndex(3), FrameIndex(6)).unwrap();
    let stats = sample_range(range, cfg(), &mut sink, |idx, t| {
        times.push(t);
        Ok(pixel(idx.0 as u8))
    })
    .unwrap();
    assert_eq!(stats.frames_pushed, 3);
    assert_eq!(times.len(), 3);
    for (t, expected) in times.iter().zip([0.3, 0.4, 0.5]) {
        assert!((t - expected).abs() < 1e-12);
    }
    assert_eq!(sink.frames()[2].1.data[0], 5);
    assert!(sink.is_finished());
}

#[test]
fn render_failure_closes_the_sink_and_reports_the_error() {
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(4)).unwrap();
    let err = sample_range(range, cfg(), &mut sink, |idx, _| {
        if idx.0 == 2 {
            Err(ReelError::render("boom"))
        } else {
            Ok(pixel(0))
        }
    })
    .unwrap_err();
    assert!(matches!(err, ReelError::Render(_)));
    assert!(sink.is_finished());
    assert_eq!(sink.frames().len(), 2);
}

#[test]
fn empty_range_is_rejected() {
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(1), FrameIndex(1)).unwrap();
    assert!(sample_range(range, cfg(), &mut sink, |_, _| Ok(pixel(0))).is_err());
}
