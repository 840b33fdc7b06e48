use crate::animation::ease::Ease;
use crate::animation::state::{DecorField, Field, ReelState, SectionField, SectionKind, SignField};
use crate::animation::timeline::{Anchor, Timeline, TweenSpec, typewriter};
use crate::config::ReelConfig;
use crate::foundation::error::ReelResult;

const ENTER: f64 = 1.5;
const DECOR_OPACITY: f64 = 0.4;
const PHASE_GAP: f64 = 0.3;
const SECTION_STAGGER: f64 = 0.8;
const LABEL_FADE: f64 = 0.8;
const MASK_DELAY: f64 = 0.4;
const MASK_REVEAL: f64 = 1.2;

/// Where a sign card sits in the sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignPosition {
    /// First sign: animates the shared decorative row in.
    pub first: bool,
    /// Last sign: longer exit that also clears the decorative row.
    pub last: bool,
}

impl SignPosition {
    /// Position of sign `index` among `count` signs.
    pub fn of(index: usize, count: usize) -> Self {
        Self {
            first: index == 0,
            last: index + 1 == count,
        }
    }
}

/// Durations of the exit phase.
struct Exit {
    icon: f64,
    labels: f64,
    decor: Option<f64>,
    clear_text_after: Option<f64>,
}

impl Exit {
    fn for_position(pos: SignPosition) -> Self {
        if pos.last {
            Self {
                icon: 2.0,
                labels: 1.0,
                decor: Some(2.0),
                clear_text_after: Some(1.0),
            }
        } else {
            Self {
                icon: 1.0,
                labels: 0.8,
                decor: None,
                clear_text_after: None,
            }
        }
    }
}

/// Sign card child timeline for sign `index`.
///
/// Entrance, hold until `hold_duration` after the card starts, then exit. Section masks are
/// never reset by the exit.
pub fn sign_timeline(
    initial: &ReelState,
    index: usize,
    pos: SignPosition,
    config: &ReelConfig,
) -> ReelResult<Timeline> {
    let sign = |f| Field::sign(index, f);
    let section = |k, f| Field::section(index, k, f);
    let state = initial.signs.get(index);
    let name_len = state.map_or(0, |s| s.name.char_len());
    let vibe_len = state.map_or(0, |s| s.vibe.char_len());

    let mut tl = Timeline::new(initial.clone());

    if pos.first {
        tl.append(
            TweenSpec::to(ENTER)
                .field(Field::Decor(DecorField::YOffset), 0.0)
                .field(Field::Decor(DecorField::Opacity), DECOR_OPACITY)
                .ease(Ease::OutCubic),
        )?;
    }
    tl.append(
        TweenSpec::to(ENTER)
            .field(sign(SignField::IconX), 0.0)
            .field(sign(SignField::IconRotation), 0.0)
            .field(sign(SignField::IconOpacity), 1.0)
            .ease(Ease::OutCubic)
            .at(Anchor::Absolute(0.0)),
    )?;

    tl.append(TweenSpec::set().field(sign(SignField::ShowName), true))?;
    tl.append(typewriter(
        sign(SignField::NameChars),
        name_len,
        config.timing.name_per_char,
    ))?;

    tl.append(
        TweenSpec::set()
            .field(sign(SignField::ShowVibe), true)
            .at(Anchor::AfterPrevious(PHASE_GAP)),
    )?;
    tl.append(typewriter(
        sign(SignField::VibeChars),
        vibe_len,
        config.timing.type_per_char,
    ))?;

    let sections = format!("sign-{index}-sections");
    tl.add_label(sections.as_str(), Anchor::AfterPrevious(PHASE_GAP))?;
    for (k, kind) in SectionKind::ALL.into_iter().enumerate() {
        let label_at = Anchor::AfterLabel(sections.clone(), SECTION_STAGGER * k as f64);
        tl.append(
            TweenSpec::set()
                .field(section(kind, SectionField::ShowLabel), true)
                .at(label_at.clone()),
        )?;
        tl.append(
            TweenSpec::to(LABEL_FADE)
                .field(section(kind, SectionField::LabelOpacity), 1.0)
                .field(section(kind, SectionField::LabelYOffset), 0.0)
                .ease(Ease::OutCubic)
                .at(label_at),
        )?;
        tl.append(
            TweenSpec::set()
                .field(section(kind, SectionField::ShowContent), true)
                .at(Anchor::WithPrevious(MASK_DELAY)),
        )?;
        tl.append(
            TweenSpec::to(MASK_REVEAL)
                .field(section(kind, SectionField::Mask), 1.0)
                .ease(Ease::InOutQuad)
                .at(Anchor::WithPrevious(0.0)),
        )?;
    }

    let entrance = tl.total_duration();
    let exit_at = entrance.max(config.timing.hold_duration);
    tracing::debug!(index, entrance, exit_at, "sign card phases");

    let exit = Exit::for_position(pos);
    let mut first_exit = Anchor::Absolute(exit_at);
    if let Some(d) = exit.decor {
        tl.append(
            TweenSpec::to(d)
                .field(Field::Decor(DecorField::Opacity), 0.0)
                .ease(Ease::InOutCubic)
                .at(first_exit),
        )?;
        first_exit = Anchor::WithPrevious(0.0);
    }
    tl.append(
        TweenSpec::to(exit.icon)
            .field(sign(SignField::IconOpacity), 0.0)
            .ease(Ease::InCubic)
            .at(first_exit),
    )?;
    let mut labels = TweenSpec::to(exit.labels)
        .ease(Ease::InCubic)
        .at(Anchor::WithPrevious(0.0));
    for kind in SectionKind::ALL {
        labels = labels.field(section(kind, SectionField::LabelOpacity), 0.0);
    }
    tl.append(labels)?;
    if let Some(after) = exit.clear_text_after {
        tl.append(
            TweenSpec::set()
                .field(sign(SignField::ShowName), false)
                .field(sign(SignField::ShowVibe), false)
                .at(Anchor::WithPrevious(after)),
        )?;
    }
    Ok(tl)
}
