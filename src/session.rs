//! A composed reel bound to its assets, configuration and a CPU backend.

use std::time::{Duration, Instant};

use crate::assets::store::ReelAssets;
use crate::capture::live::{LiveEncoder, LiveReport};
use crate::capture::sampling::{CaptureStats, full_range, sample_range};
use crate::compose::sequence::{Reel, ReelSchedule};
use crate::config::ReelConfig;
use crate::content::data::ContentData;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::measure::{ParleyMeasure, TextMeasure};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;
use crate::render::plan::{FramePlan, RenderCtx};

/// Session-oriented renderer for one reel.
///
/// Composition happens once in [`ReelSession::new`]; afterwards single frames, frame ranges
/// and live recordings can be produced repeatedly. A failed capture leaves the session usable.
pub struct ReelSession {
    config: ReelConfig,
    assets: ReelAssets,
    reel: Reel,
    backend: CpuBackend,
    measure: Box<dyn TextMeasure>,
}

impl std::fmt::Debug for ReelSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReelSession")
            .field("reel", &self.reel)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl ReelSession {
    /// Compose `content` and prepare the backend.
    pub fn new(content: &ContentData, config: ReelConfig, assets: ReelAssets) -> ReelResult<Self> {
        config.validate()?;
        let reel = Reel::compose(content, &config, &assets)?;
        let measure = ParleyMeasure::new(assets.font())?;
        let backend = CpuBackend::new(config.surface.canvas, assets.font())?;
        Ok(Self {
            config,
            assets,
            reel,
            backend,
            measure: Box::new(measure),
        })
    }

    /// Replace the text measurer used for layout.
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// The composed reel.
    pub fn reel(&self) -> &Reel {
        &self.reel
    }

    /// The composed reel, for clock control.
    pub fn reel_mut(&mut self) -> &mut Reel {
        &mut self.reel
    }

    /// Active configuration.
    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    /// Loaded assets.
    pub fn assets(&self) -> &ReelAssets {
        &self.assets
    }

    /// Reel length in seconds.
    pub fn total_duration(&self) -> f64 {
        self.reel.total_duration()
    }

    /// Frames sampled by a full deterministic capture.
    pub fn frame_count(&self) -> u64 {
        full_range(self.total_duration(), self.config.surface.fps).len_frames()
    }

    /// Sink configuration matching the surface.
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.config.surface.canvas.width,
            height: self.config.surface.canvas.height,
            fps: self.config.surface.fps,
            background: self.config.surface.background,
        }
    }

    /// Resolved schedule dump.
    pub fn schedule(&mut self) -> ReelResult<ReelSchedule> {
        self.reel.schedule()
    }

    /// Seek to `t` and plan the active card.
    pub fn plan_at(&mut self, t: f64) -> ReelResult<FramePlan> {
        let ctx = RenderCtx {
            config: &self.config,
            assets: &self.assets,
        };
        self.reel.plan_at(t, &ctx, self.measure.as_mut())
    }

    /// Seek to `t` and render the active card.
    pub fn render_at(&mut self, t: f64) -> ReelResult<FrameRGBA> {
        let plan = self.plan_at(t)?;
        self.backend.render_plan(&plan, &self.assets)
    }

    /// Render the state the live clock currently holds.
    fn render_current(&mut self) -> ReelResult<FrameRGBA> {
        let ctx = RenderCtx {
            config: &self.config,
            assets: &self.assets,
        };
        let timeline = self.reel.timeline();
        let plan = self.reel.plan_state(
            timeline.time(),
            timeline.state(),
            &ctx,
            self.measure.as_mut(),
        )?;
        self.backend.render_plan(&plan, &self.assets)
    }

    /// Deterministically render `range` into `sink`, seeking to `i / fps` for frame `i`.
    #[tracing::instrument(skip(self, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<CaptureStats> {
        let count = self.frame_count();
        if range.end.0 > count {
            return Err(ReelError::validation(format!(
                "frame range ends at {} but the reel has {count} frames",
                range.end.0
            )));
        }
        let cfg = self.sink_config();
        sample_range(range, cfg, sink, |_, t| self.render_at(t))
    }

    /// Deterministically render every frame of the reel into `sink`.
    pub fn render_all(&mut self, sink: &mut dyn FrameSink) -> ReelResult<CaptureStats> {
        let range = full_range(self.total_duration(), self.config.surface.fps);
        self.render_range(range, sink)
    }

    /// Play the reel against the wall clock and stream frames to an encoder thread.
    ///
    /// Stops at the end of the reel or at the configured ceiling, whichever comes first.
    #[tracing::instrument(skip_all)]
    pub fn record_live<S: FrameSink + 'static>(&mut self, sink: S) -> ReelResult<(LiveReport, S)> {
        let cfg = self.sink_config();
        let frame_dt = Duration::from_secs_f64(cfg.fps.frame_duration_secs());
        let capture = &self.config.capture;
        let ceiling = Duration::try_from_secs_f64(capture.live_ceiling_secs).map_err(|e| {
            ReelError::validation(format!(
                "capture.live_ceiling_secs {} is not a valid duration: {e}",
                capture.live_ceiling_secs
            ))
        })?;
        let total = self.total_duration();
        if capture.live_ceiling_secs < total {
            tracing::warn!(
                ceiling_secs = capture.live_ceiling_secs,
                reel_secs = total,
                "live ceiling is shorter than the reel; the recording will be cut"
            );
        }
        let encoder = LiveEncoder::spawn(sink, cfg, ceiling, capture.channel_capacity)?;

        let produced = self.run_live_clock(&encoder, frame_dt);
        let finished = encoder.finish();
        self.reel.timeline_mut().pause();
        produced?;
        finished
    }

    fn run_live_clock<S: FrameSink + 'static>(
        &mut self,
        encoder: &LiveEncoder<S>,
        frame_dt: Duration,
    ) -> ReelResult<()> {
        self.reel.timeline_mut().restart()?;
        let mut last = Instant::now();
        let mut next = last;
        let mut idx = 0u64;
        loop {
            let frame = self.render_current()?;
            if !encoder.send(FrameIndex(idx), frame) {
                break;
            }
            idx += 1;
            if !self.reel.timeline().is_running() {
                break;
            }

            next += frame_dt;
            if let Some(wait) = next.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;
            self.reel.timeline_mut().tick(dt)?;
        }
        tracing::debug!(frames = idx, "live clock stopped");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
