use super::*;
use crate::foundation::core::Rgba8;

fn out_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit-png")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn frame(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: px.repeat(4),
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::default(),
        background: Rgba8::BLACK,
    }
}

#[test]
fn names_are_six_digit_zero_padded() {
    assert_eq!(png_sequence_name(FrameIndex(0)), "frame_000000.png");
    assert_eq!(png_sequence_name(FrameIndex(1234)), "frame_001234.png");
}

#[test]
fn sink_writes_decodable_pngs() {
    let dir = out_dir("sink");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([255, 0, 0, 255])).unwrap();
    sink.push_frame(FrameIndex(1), &frame([0, 0, 255, 255])).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.written(), 2);

    let img = image::open(dir.join("frame_000001.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(1, 1).0, [0, 0, 255, 255]);
}

#[test]
fn png_output_is_unpremultiplied() {
    let dir = out_dir("straight");
    let path = dir.join("half.png");
    write_png(&path, &frame([64, 0, 0, 128])).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
}

#[test]
fn push_requires_begin_and_order() {
    let dir = out_dir("order");
    let mut sink = PngSequenceSink::new(&dir);
    assert!(sink.push_frame(FrameIndex(0), &frame([0; 4])).is_err());
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(1), &frame([0; 4])).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame([0; 4])).is_err());
}

#[test]
fn mux_without_frames_is_an_actionable_error() {
    let dir = out_dir("empty");
    std::fs::create_dir_all(&dir).unwrap();
    let err = mux_png_sequence(
        &dir,
        Fps::default(),
        (1080, 1920),
        &dir.join("out.mp4"),
        Path::new("ffmpeg"),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Capture(_)));
    assert!(err.to_string().contains("frame_000000.png"));
}
