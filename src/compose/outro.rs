use crate::animation::ease::Ease;
use crate::animation::state::{Field, OutroField, ReelState};
use crate::animation::timeline::{Anchor, Timeline, TweenSpec, typewriter};
use crate::config::ReelConfig;
use crate::foundation::error::ReelResult;

const FADE_IN: f64 = 1.0;
const SPIN: f64 = 4.0;
const BOX_REVEAL: f64 = 1.5;
const HOLD: f64 = 3.0;
const FADE_OUT: f64 = 1.0;

/// Outro child timeline: fade in while spinning, typed headline, box reveal, hold, fade out.
pub fn outro_timeline(initial: &ReelState, config: &ReelConfig) -> ReelResult<Timeline> {
    let mut tl = Timeline::new(initial.clone());
    tl.append(
        TweenSpec::to(FADE_IN)
            .field(Field::Outro(OutroField::Opacity), 1.0)
            .ease(Ease::OutQuad),
    )?;
    tl.append(
        TweenSpec::to(SPIN)
            .field(Field::Outro(OutroField::Rotation), 360.0)
            .ease(Ease::OutCubic)
            .at(Anchor::WithPrevious(0.0)),
    )?;
    tl.append(typewriter(
        Field::Outro(OutroField::HeadlineChars),
        initial.outro.headline.char_len(),
        config.timing.type_per_char,
    ))?;
    tl.append(
        TweenSpec::to(BOX_REVEAL)
            .field(Field::Outro(OutroField::BoxReveal), 1.0)
            .ease(Ease::OutCubic),
    )?;
    // hold
    tl.append(TweenSpec::to(HOLD))?;
    tl.append(
        TweenSpec::to(FADE_OUT)
            .field(Field::Outro(OutroField::Opacity), 0.0)
            .ease(Ease::OutQuad),
    )?;
    Ok(tl)
}
