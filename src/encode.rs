//! Frame sinks.
//!
//! Sinks consume rendered frames in capture order and are driven by the sampling and live
//! capture loops.

/// `ffmpeg`-based MP4 output.
pub mod ffmpeg;
/// Numbered PNG files plus an `ffmpeg` mux step.
pub mod png_seq;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
