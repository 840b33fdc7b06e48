use crate::animation::ease::Ease;
use crate::animation::state::{Field, INTRO_LINES, IntroField, ReelState};
use crate::animation::timeline::{Anchor, Timeline, TweenSpec, typewriter};
use crate::config::ReelConfig;
use crate::foundation::error::ReelResult;

/// Gap before each intro line's typewriter, after the previous one ends.
const LINE_GAPS: [f64; INTRO_LINES] = [0.0, 0.1, 0.1, 0.1, 0.2];

const RING_ENTER: f64 = 3.5;
const HOLD: f64 = 3.0;
const EXIT: f64 = 1.5;

/// Intro child timeline: ring entrance, typed title block, hold, fade out.
pub fn intro_timeline(initial: &ReelState, config: &ReelConfig) -> ReelResult<Timeline> {
    let mut tl = Timeline::new(initial.clone());
    tl.append(
        TweenSpec::to(RING_ENTER)
            .field(Field::Intro(IntroField::Scale), 1.0)
            .field(Field::Intro(IntroField::Opacity), 1.0)
            .field(Field::Intro(IntroField::Rotation), 120.0)
            .ease(Ease::OutCubic),
    )?;
    tl.append(TweenSpec::set().field(Field::Intro(IntroField::ShowText), true))?;

    for (i, gap) in LINE_GAPS.iter().enumerate() {
        let len = initial.intro.lines[i].char_len();
        tl.append(
            typewriter(
                Field::Intro(IntroField::Line(i)),
                len,
                config.timing.type_per_char,
            )
            .at(Anchor::AfterPrevious(*gap)),
        )?;
    }

    tl.append(
        TweenSpec::to(EXIT)
            .field(Field::Intro(IntroField::Opacity), 0.0)
            .field(Field::Intro(IntroField::TextOpacity), 0.0)
            .ease(Ease::InOutCubic)
            .at(Anchor::AfterPrevious(HOLD)),
    )?;
    Ok(tl)
}
