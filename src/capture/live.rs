use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, SyncSender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Timestamped artifact path `<dir>/zodiac-reel-<unix-ms>.mp4`.
pub fn live_artifact_path(dir: &Path) -> PathBuf {
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    dir.join(format!("zodiac-reel-{ms}.mp4"))
}

/// Outcome of a live recording.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LiveReport {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Wall-clock time between the encoder start and finalization.
    pub elapsed_secs: f64,
    /// Whether the wall-clock ceiling stopped the recording.
    pub hit_ceiling: bool,
}

enum LiveMsg {
    Frame(FrameIndex, FrameRGBA),
    Stop,
}

/// Encoder thread fed through a bounded channel.
///
/// The thread owns the sink and enforces the wall-clock `ceiling` on its own: once it passes,
/// later frames are dropped and the sink is finalized even if the producer keeps sending.
pub struct LiveEncoder<S: FrameSink + 'static> {
    tx: Option<SyncSender<LiveMsg>>,
    handle: Option<JoinHandle<(ReelResult<LiveReport>, S)>>,
    stopped: Arc<AtomicBool>,
}

impl<S: FrameSink + 'static> std::fmt::Debug for LiveEncoder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveEncoder")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl<S: FrameSink + 'static> LiveEncoder<S> {
    /// Begin `sink` on a new encoder thread.
    pub fn spawn(
        mut sink: S,
        cfg: SinkConfig,
        ceiling: Duration,
        capacity: usize,
    ) -> ReelResult<Self> {
        let (tx, rx) = mpsc::sync_channel::<LiveMsg>(capacity.max(1));
        let stopped = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stopped);

        let handle = std::thread::Builder::new()
            .name("zodiac-reel-encoder".to_owned())
            .spawn(move || {
                let started = Instant::now();
                if let Err(e) = sink.begin(cfg) {
                    stop_flag.store(true, Ordering::SeqCst);
                    return (Err(e), sink);
                }
                tracing::info!(ceiling_secs = ceiling.as_secs_f64(), "live capture started");

                let mut frames = 0u64;
                let mut hit_ceiling = false;
                let mut failure = None;
                loop {
                    let Some(left) = ceiling.checked_sub(started.elapsed()) else {
                        hit_ceiling = true;
                        break;
                    };
                    match rx.recv_timeout(left) {
                        Ok(LiveMsg::Frame(idx, frame)) => {
                            if started.elapsed() >= ceiling {
                                hit_ceiling = true;
                                break;
                            }
                            if let Err(e) = sink.push_frame(idx, &frame) {
                                failure = Some(e);
                                break;
                            }
                            frames += 1;
                        }
                        Ok(LiveMsg::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {
                            hit_ceiling = true;
                            break;
                        }
                    }
                }
                stop_flag.store(true, Ordering::SeqCst);
                if hit_ceiling {
                    tracing::warn!(
                        ceiling_secs = ceiling.as_secs_f64(),
                        "live capture hit its wall-clock ceiling"
                    );
                }

                let ended = sink.end();
                let report = LiveReport {
                    frames,
                    elapsed_secs: started.elapsed().as_secs_f64(),
                    hit_ceiling,
                };
                tracing::info!(frames, elapsed_secs = report.elapsed_secs, "live capture stopped");
                let result = match (failure, ended) {
                    (Some(e), _) | (None, Err(e)) => Err(e),
                    (None, Ok(())) => Ok(report),
                };
                (result, sink)
            })
            .map_err(|e| ReelError::capture(format!("failed to spawn encoder thread: {e}")))?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
            stopped,
        })
    }

    /// Whether the encoder has stopped accepting frames.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Hand a frame to the encoder, blocking while the channel is full.
    ///
    /// Returns `false` once the encoder has stopped; the frame is then dropped.
    pub fn send(&self, idx: FrameIndex, frame: FrameRGBA) -> bool {
        if self.is_stopped() {
            return false;
        }
        match &self.tx {
            Some(tx) => tx.send(LiveMsg::Frame(idx, frame)).is_ok(),
            None => false,
        }
    }

    /// Stop the recording, wait for the encoder to finalize and hand the sink back.
    pub fn finish(mut self) -> ReelResult<(LiveReport, S)> {
        if let Some(tx) = self.tx.take() {
            // The encoder may already be gone after hitting its ceiling.
            let _ = tx.send(LiveMsg::Stop);
        }
        let handle = self
            .handle
            .take()
            .ok_or_else(|| ReelError::capture("live encoder already finished"))?;
        let (result, sink) = handle
            .join()
            .map_err(|_| ReelError::capture("live encoder thread panicked"))?;
        result.map(|report| (report, sink))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/live.rs"]
mod tests;
