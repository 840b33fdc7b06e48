use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::encode::ffmpeg::{
    check_even_size, ensure_parent_dir, push_h264_output, push_input_fps, spawn_error,
    wait_ffmpeg,
};
use crate::encode::sink::{FrameSink, SinkConfig, check_order};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// `printf`-style pattern of sequence file names, as understood by `ffmpeg`.
pub const PNG_SEQUENCE_PATTERN: &str = "frame_%06d.png";

/// File name of frame `idx` in a PNG sequence.
pub fn png_sequence_name(idx: FrameIndex) -> String {
    format!("frame_{:06}.png", idx.0)
}

/// Write one frame as a straight-alpha PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> ReelResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Sink writing `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    started: bool,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            started: false,
            last_idx: None,
            written: 0,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.started = true;
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        if !self.started {
            return Err(ReelError::capture("png sequence sink not started"));
        }
        check_order(&mut self.last_idx, idx)?;
        write_png(&self.dir.join(png_sequence_name(idx)), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.started = false;
        tracing::info!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        Ok(())
    }
}

/// Mux a directory of `frame_%06d.png` files into an H.264 MP4 at `fps`.
pub fn mux_png_sequence(
    dir: &Path,
    fps: Fps,
    (width, height): (u32, u32),
    out: &Path,
    program: &Path,
) -> ReelResult<()> {
    check_even_size(width, height)?;
    if !dir.join(png_sequence_name(FrameIndex(0))).is_file() {
        return Err(ReelError::capture(format!(
            "no '{}' found in '{}'; render a PNG sequence first",
            png_sequence_name(FrameIndex(0)),
            dir.display()
        )));
    }
    ensure_parent_dir(out)?;

    let mut cmd = Command::new(program);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    cmd.args(["-y", "-loglevel", "error"]);
    push_input_fps(&mut cmd, fps);
    cmd.arg("-i").arg(dir.join(PNG_SEQUENCE_PATTERN));
    push_h264_output(&mut cmd);
    cmd.arg(out);

    let mut child = cmd.spawn().map_err(|e| spawn_error(program, &e))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| ReelError::capture("failed to open ffmpeg stderr"))?;
    let drain = std::thread::spawn(move || {
        let mut bytes = Vec::new();
        stderr.read_to_end(&mut bytes)?;
        Ok(bytes)
    });
    wait_ffmpeg(child, Some(drain))?;
    tracing::info!(dir = %dir.display(), out = %out.display(), "png sequence muxed");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png_seq.rs"]
mod tests;
