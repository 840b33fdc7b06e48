//! zodiac-reel renders a daily horoscope reel: an intro title card, one card per featured
//! sign and an outro call to action, on a 1080×1920 surface.
//!
//! The public API is session-oriented:
//!
//! - Load [`ContentData`], a [`ReelConfig`] and [`ReelAssets`]
//! - Create a [`ReelSession`], which composes the master [`Timeline`]
//! - Render single frames, stream a deterministic range into a [`FrameSink`], or record live
//!
//! Every frame is a pure function of the timeline state at a time offset, so sampled captures
//! are reproducible regardless of wall-clock jitter.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
/// Deterministic sampling and live capture.
pub mod capture;
pub(crate) mod compose;
pub(crate) mod config;
pub(crate) mod content;
/// Frame sinks.
pub mod encode;
pub(crate) mod layout;
pub(crate) mod render;
/// Session-oriented rendering API.
pub mod session;

pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::state::{
    DecorField, DecorState, Field, FieldKind, INTRO_LINES, IntroField, IntroState, OutroField,
    OutroState, ReelState, SectionField, SectionKind, SectionState, SignField, SignState,
    TypedText, Value,
};
pub use crate::animation::timeline::{
    Anchor, ScheduledTarget, ScheduledTween, Timeline, TweenId, TweenSpec, typewriter,
};
pub use crate::assets::decode::PreparedImage;
pub use crate::assets::store::{DecorIcon, ReelAssets};
pub use crate::capture::live::{LiveEncoder, LiveReport, live_artifact_path};
pub use crate::capture::sampling::{CaptureStats, full_range};
pub use crate::compose::sequence::{FrameKind, FrameSegment, Reel, ReelSchedule, initial_state};
pub use crate::config::{
    CaptureConfig, IntroLook, MAX_LIVE_CEILING_SECS, OutroLook, Palette, ReelConfig, RingConfig,
    SignLook, SurfaceConfig, TimingConfig,
};
pub use crate::content::data::{ContentData, FEATURED_SIGNS, SignEntry};
pub use crate::content::date::format_display_date;
pub use crate::content::sign::Sign;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_available};
pub use crate::encode::png_seq::{PngSequenceSink, mux_png_sequence, png_sequence_name, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::layout::measure::{ApproxMeasure, FontWeight, ParleyMeasure, TextMeasure, TextStyle};
pub use crate::layout::wrap::{BoxMetrics, ContentBox, content_box, reveal_clip, wrap_text};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::intro::plan_intro;
pub use crate::render::outro::{cta_box, headline_lines, plan_outro};
pub use crate::render::plan::{DrawOp, FramePlan, ImageRef, RenderCtx, TextAlign, TextBaseline};
pub use crate::render::ring::{RingAlpha, RingIcon, highlight_factor, ring_layout};
pub use crate::render::sign::{SectionLayout, plan_sign, section_layouts};
pub use crate::session::ReelSession;
