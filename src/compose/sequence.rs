//! Master reel: intro, sign cards and outro joined by cross-fades.

use crate::animation::ease::Ease;
use crate::animation::state::{
    Field, IntroField, IntroState, OutroField, OutroState, ReelState, SignField, SignState,
};
use crate::animation::timeline::{Anchor, ScheduledTween, Timeline, TweenSpec};
use crate::assets::store::ReelAssets;
use crate::compose::intro::intro_timeline;
use crate::compose::outro::outro_timeline;
use crate::compose::sign::{SignPosition, sign_timeline};
use crate::config::ReelConfig;
use crate::content::data::ContentData;
use crate::content::sign::Sign;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::measure::TextMeasure;
use crate::render::intro::plan_intro;
use crate::render::outro::plan_outro;
use crate::render::plan::{FramePlan, RenderCtx};
use crate::render::sign::plan_sign;

/// Which card a segment shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameKind {
    /// Intro title card.
    Intro,
    /// Sign card `index` (content order).
    Sign {
        /// Position in the content list.
        index: usize,
    },
    /// Outro call to action.
    Outro,
}

impl FrameKind {
    /// Timeline label of the card's start.
    pub fn label(self) -> String {
        match self {
            Self::Intro => "intro".to_owned(),
            Self::Sign { index } => format!("sign-{index}"),
            Self::Outro => "outro".to_owned(),
        }
    }

    fn fade_field(self) -> Field {
        match self {
            Self::Intro => Field::Intro(IntroField::Fade),
            Self::Sign { index } => Field::sign(index, SignField::Fade),
            Self::Outro => Field::Outro(OutroField::Fade),
        }
    }
}

/// Time window in which one card's planner is active.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameSegment {
    /// Card shown.
    #[serde(flatten)]
    pub kind: FrameKind,
    /// Start in seconds.
    pub start: f64,
    /// End in seconds, including the outgoing cross-fade.
    pub end: f64,
}

impl FrameSegment {
    /// Segment length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Serializable dump of a composed reel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReelSchedule {
    /// Whole reel length in seconds.
    pub total_duration: f64,
    /// Frame segments in play order.
    pub segments: Vec<FrameSegment>,
    /// Named time points.
    pub labels: std::collections::BTreeMap<String, f64>,
    /// Resolved tweens in start order.
    pub tweens: Vec<ScheduledTween>,
}

/// A composed reel: master timeline, frame segments and resolved sign icons.
#[derive(Debug)]
pub struct Reel {
    timeline: Timeline,
    segments: Vec<FrameSegment>,
    icons: Vec<Sign>,
    highlighted: Vec<Sign>,
    missing_icons: Vec<Sign>,
}

/// Initial state of a reel built from `content`.
pub fn initial_state(content: &ContentData, config: &ReelConfig) -> ReelState {
    let names = content
        .zodiacs
        .iter()
        .map(|z| z.name.trim().to_uppercase())
        .collect::<Vec<_>>()
        .join(", ");
    let intro = IntroState::new([
        "DAILY".to_owned(),
        "HOROSCOPE".to_owned(),
        "FOR".to_owned(),
        names,
        content.display_date(),
    ]);
    let signs = content
        .zodiacs
        .iter()
        .map(|z| {
            SignState::new(
                z.name.trim().to_uppercase(),
                format!("Vibe: {}", z.vibe.trim()),
                z.section_texts(),
            )
        })
        .collect();
    ReelState::new(intro, signs, OutroState::new(config.outro.headline.as_str()))
}

impl Reel {
    /// Build the master timeline for `content`.
    ///
    /// `content` is expected to have passed [`ContentData::validate`]; only the "at least one
    /// sign" precondition is enforced here.
    #[tracing::instrument(skip_all, fields(signs = content.zodiacs.len()))]
    pub fn compose(
        content: &ContentData,
        config: &ReelConfig,
        assets: &ReelAssets,
    ) -> ReelResult<Self> {
        if content.zodiacs.is_empty() {
            return Err(ReelError::timeline("a reel needs at least one sign"));
        }
        let missing_icons = assets.missing_signs();
        if !missing_icons.is_empty() {
            tracing::warn!(?missing_icons, "sign icons missing; they will be skipped");
        }

        let icons: Vec<Sign> = content
            .zodiacs
            .iter()
            .map(|z| {
                Sign::from_name(&z.name).unwrap_or_else(|| {
                    tracing::warn!(name = %z.name, fallback = %Sign::FALLBACK, "unknown sign name");
                    Sign::FALLBACK
                })
            })
            .collect();
        let highlighted = content
            .zodiacs
            .iter()
            .filter_map(|z| Sign::from_name(&z.name))
            .collect();

        let initial = initial_state(content, config);
        let count = content.zodiacs.len();
        let mut frames = Vec::with_capacity(count + 2);
        frames.push((FrameKind::Intro, intro_timeline(&initial, config)?));
        for index in 0..count {
            let child = sign_timeline(&initial, index, SignPosition::of(index, count), config)?;
            frames.push((FrameKind::Sign { index }, child));
        }
        frames.push((FrameKind::Outro, outro_timeline(&initial, config)?));

        let crossfade = config.timing.crossfade;
        let mut master = Timeline::new(initial);
        let mut segments = Vec::with_capacity(frames.len());
        let last = frames.len() - 1;
        for (i, (kind, child)) in frames.into_iter().enumerate() {
            let label = kind.label();
            let start = master.add_label(label.as_str(), Anchor::AfterPrevious(0.0))?;
            master.add(child, Anchor::AfterLabel(label, 0.0))?;
            if i < last {
                master.append(
                    TweenSpec::to(crossfade)
                        .field(kind.fade_field(), 0.0)
                        .ease(Ease::Linear),
                )?;
            }
            let end = master.cursor();
            tracing::debug!(?kind, start, end, "frame segment");
            segments.push(FrameSegment { kind, start, end });
        }

        Ok(Self {
            timeline: master,
            segments,
            icons,
            highlighted,
            missing_icons,
        })
    }

    /// Master timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Master timeline, for seeking and clock control.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// Frame segments in play order.
    pub fn segments(&self) -> &[FrameSegment] {
        &self.segments
    }

    /// Whole reel length in seconds.
    pub fn total_duration(&self) -> f64 {
        self.timeline.total_duration()
    }

    /// Segment active at `t`. Boundaries belong to the incoming card.
    pub fn segment_at(&self, t: f64) -> Option<&FrameSegment> {
        self.segments
            .iter()
            .find(|s| t < s.end)
            .or_else(|| self.segments.last())
    }

    /// Icon drawn for sign `index` (the fallback for unknown names).
    pub fn icon(&self, index: usize) -> Sign {
        self.icons.get(index).copied().unwrap_or(Sign::FALLBACK)
    }

    /// Recognized featured signs, highlighted on the intro ring.
    pub fn highlighted(&self) -> &[Sign] {
        &self.highlighted
    }

    /// Canonical icons that were not loaded.
    pub fn missing_icons(&self) -> &[Sign] {
        &self.missing_icons
    }

    /// Resolved schedule with segments and labels.
    pub fn schedule(&mut self) -> ReelResult<ReelSchedule> {
        Ok(ReelSchedule {
            total_duration: self.total_duration(),
            segments: self.segments.clone(),
            labels: self
                .timeline
                .labels()
                .map(|(name, at)| (name.to_owned(), at))
                .collect(),
            tweens: self.timeline.schedule()?,
        })
    }

    /// Plan the card active at `t` for `state`.
    pub fn plan_state(
        &self,
        t: f64,
        state: &ReelState,
        ctx: &RenderCtx<'_>,
        measure: &mut dyn TextMeasure,
    ) -> ReelResult<FramePlan> {
        let segment = self
            .segment_at(t)
            .ok_or_else(|| ReelError::render("reel has no frame segments"))?;
        Ok(match segment.kind {
            FrameKind::Intro => plan_intro(&state.intro, &self.highlighted, ctx),
            FrameKind::Sign { index } => {
                let sign = state.signs.get(index).ok_or_else(|| {
                    ReelError::render(format!("sign segment {index} has no sign state"))
                })?;
                plan_sign(sign, &state.decor, self.icon(index), ctx, measure)
            }
            FrameKind::Outro => plan_outro(&state.outro, ctx, measure),
        })
    }

    /// Seek to `t` and plan the active card.
    pub fn plan_at(
        &mut self,
        t: f64,
        ctx: &RenderCtx<'_>,
        measure: &mut dyn TextMeasure,
    ) -> ReelResult<FramePlan> {
        self.timeline.seek(t)?;
        self.plan_state(t, self.timeline.state(), ctx, measure)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/sequence.rs"]
mod tests;
