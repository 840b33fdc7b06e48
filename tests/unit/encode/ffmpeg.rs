use super::*;

#[test]
fn flatten_alpha_0_returns_background() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_opaque_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &src, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg(&mut dst, &[0; 4], Rgba8::BLACK).is_err());
}

#[test]
fn odd_sizes_are_rejected_before_spawning() {
    assert!(check_even_size(1080, 1920).is_ok());
    let err = check_even_size(1081, 1920).unwrap_err();
    assert!(matches!(err, ReelError::Capture(_)));
    assert!(check_even_size(0, 2).is_err());
}

#[test]
fn missing_encoder_is_an_actionable_capture_error() {
    let opts = FfmpegSinkOpts::new(std::env::temp_dir().join("zodiac-reel-unit/never.mp4"))
        .with_program("definitely-not-an-ffmpeg-binary");
    let mut sink = FfmpegSink::new(opts);
    let err = sink
        .begin(SinkConfig {
            width: 2,
            height: 2,
            fps: Fps::default(),
            background: Rgba8::BLACK,
        })
        .unwrap_err();
    assert!(matches!(err, ReelError::Capture(_)));
    assert!(err.to_string().contains("ffmpeg"));
    assert!(!is_ffmpeg_available(Path::new("definitely-not-an-ffmpeg-binary")));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("out.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
