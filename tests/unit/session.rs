use super::*;
use crate::content::data::SignEntry;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::layout::measure::ApproxMeasure;

fn content() -> ContentData {
    let entry = |name: &str| SignEntry {
        name: name.to_owned(),
        vibe: "bright".to_owned(),
        love: "Say it.".to_owned(),
        career: "Build it.".to_owned(),
        money: "Invest wisely.".to_owned(),
        soul_message: "Rest.".to_owned(),
    };
    ContentData {
        date: "2026-02-17".to_owned(),
        zodiacs: vec![entry("Leo"), entry("Taurus"), entry("Aquarius")],
    }
}

fn small_config() -> ReelConfig {
    let mut cfg = ReelConfig::default();
    cfg.surface.canvas = Canvas {
        width: 108,
        height: 192,
    };
    cfg
}

fn session(cfg: ReelConfig) -> ReelSession {
    ReelSession::new(&content(), cfg, ReelAssets::empty())
        .unwrap()
        .with_measure(ApproxMeasure::default())
}

#[test]
fn render_at_fills_the_surface_with_the_background() {
    let mut s = session(small_config());
    let frame = s.render_at(0.0).unwrap();
    assert_eq!((frame.width, frame.height), (108, 192));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn frame_count_is_ceil_of_duration_times_fps() {
    let s = session(small_config());
    let expected = (s.total_duration() * 30.0).ceil() as u64;
    assert_eq!(s.frame_count(), expected);
}

#[test]
fn render_range_pushes_each_frame_once_in_order() {
    let mut s = session(small_config());
    let mut sink = InMemorySink::new();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap();
    let stats = s.render_range(range, &mut sink).unwrap();
    assert_eq!(stats.frames_pushed, 3);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2]);
    assert_eq!(sink.config().map(|c| c.width), Some(108));
}

#[test]
fn rendering_is_reproducible_after_other_seeks() {
    let mut s = session(small_config());
    let a = s.render_at(40.0).unwrap();
    s.render_at(3.0).unwrap();
    let b = s.render_at(40.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn capture_failures_leave_the_session_usable() {
    let mut s = session(small_config());
    let count = s.frame_count();
    let mut sink = InMemorySink::new();
    let past_end = FrameRange::new(FrameIndex(count - 1), FrameIndex(count + 1)).unwrap();
    assert!(matches!(
        s.render_range(past_end, &mut sink),
        Err(ReelError::Validation(_))
    ));

    let mut broken = FfmpegSink::new(
        FfmpegSinkOpts::new(std::env::temp_dir().join("zodiac-reel-unit/x.mp4"))
            .with_program("definitely-not-an-ffmpeg-binary"),
    );
    let range = FrameRange::new(FrameIndex(0), FrameIndex(1)).unwrap();
    assert!(matches!(
        s.render_range(range, &mut broken),
        Err(ReelError::Capture(_))
    ));

    let stats = s.render_range(range, &mut sink).unwrap();
    assert_eq!(stats.frames_pushed, 1);
}

#[test]
fn live_recording_stops_at_the_ceiling() {
    let mut cfg = small_config();
    cfg.capture.live_ceiling_secs = 0.3;
    let mut s = session(cfg);
    let (report, sink) = s.record_live(InMemorySink::new()).unwrap();
    assert!(report.hit_ceiling);
    assert!(report.frames >= 1);
    assert_eq!(sink.frames().len() as u64, report.frames);
    assert_eq!(sink.frames()[0].0, FrameIndex(0));
    assert!(sink.is_finished());
    assert!(!s.reel().timeline().is_running());
}

#[test]
fn schedule_matches_the_reel() {
    let mut s = session(small_config());
    let dump = s.schedule().unwrap();
    assert_eq!(dump.segments.len(), 5);
    assert!((dump.total_duration - s.total_duration()).abs() < 1e-12);
}
