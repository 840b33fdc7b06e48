use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Range capture statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CaptureStats {
    /// Frames in the requested range.
    pub frames_total: u64,
    /// Frames pushed to the sink.
    pub frames_pushed: u64,
}

/// All frames of a clip lasting `total_secs`: `0..ceil(total_secs * fps)`.
pub fn full_range(total_secs: f64, fps: Fps) -> FrameRange {
    FrameRange {
        start: FrameIndex(0),
        end: FrameIndex(fps.sample_count(total_secs)),
    }
}

/// Drive `sink` through `range`, rendering frame `i` at `i / fps` seconds.
///
/// On failure the sink is still closed so it can be reused; the first error wins.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn sample_range(
    range: FrameRange,
    cfg: SinkConfig,
    sink: &mut dyn FrameSink,
    mut render: impl FnMut(FrameIndex, f64) -> ReelResult<FrameRGBA>,
) -> ReelResult<CaptureStats> {
    if range.is_empty() {
        return Err(ReelError::capture("capture range must be non-empty"));
    }
    let fps = cfg.fps;
    sink.begin(cfg)?;

    let mut stats = CaptureStats {
        frames_total: range.len_frames(),
        frames_pushed: 0,
    };
    let produced = range.iter().try_for_each(|idx| {
        let frame = render(idx, fps.frame_to_secs(idx))?;
        sink.push_frame(idx, &frame)?;
        stats.frames_pushed += 1;
        Ok::<(), ReelError>(())
    });
    let ended = sink.end();

    produced?;
    ended?;
    tracing::info!(frames = stats.frames_pushed, "range captured");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sampling.rs"]
mod tests;
