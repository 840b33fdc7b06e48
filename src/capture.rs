//! Turning a reel into frames: deterministic sampling and wall-clock live capture.

/// Encoder thread with a wall-clock ceiling.
pub mod live;
/// Seek-per-frame sampling into a sink.
pub mod sampling;
