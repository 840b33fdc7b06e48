use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Fps, Rgba8};

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::default(),
        background: Rgba8::BLACK,
    }
}

fn pixel() -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 255],
        premultiplied: true,
    }
}

#[test]
fn artifact_names_are_timestamped_mp4s() {
    let path = live_artifact_path(Path::new("out"));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("zodiac-reel-"));
    assert!(name.ends_with(".mp4"));
    let digits = &name["zodiac-reel-".len()..name.len() - ".mp4".len()];
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(path.parent(), Some(Path::new("out")));
}

#[test]
fn frames_reach_the_sink_in_order_and_finish_returns_it() {
    let enc = LiveEncoder::spawn(InMemorySink::new(), cfg(), Duration::from_secs(60), 2).unwrap();
    for i in 0..5 {
        assert!(enc.send(FrameIndex(i), pixel()));
    }
    let (report, sink) = enc.finish().unwrap();
    assert_eq!(report.frames, 5);
    assert!(!report.hit_ceiling);
    assert!(sink.is_finished());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
}

#[test]
fn ceiling_stops_the_encoder_without_producer_help() {
    let enc =
        LiveEncoder::spawn(InMemorySink::new(), cfg(), Duration::from_millis(20), 2).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while !enc.is_stopped() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(enc.is_stopped());
    assert!(!enc.send(FrameIndex(0), pixel()));
    let (report, sink) = enc.finish().unwrap();
    assert!(report.hit_ceiling);
    assert_eq!(report.frames, 0);
    assert!(sink.is_finished());
}

#[test]
fn sink_errors_surface_from_finish() {
    let enc = LiveEncoder::spawn(InMemorySink::new(), cfg(), Duration::from_secs(60), 1).unwrap();
    enc.send(FrameIndex(1), pixel());
    enc.send(FrameIndex(1), pixel());
    let err = enc.finish().unwrap_err();
    assert!(matches!(err, ReelError::Capture(_)));
}
