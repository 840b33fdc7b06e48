//! Plain-value animation state for one play-through of a reel.
//!
//! `ReelState` holds only numbers, flags and immutable strings. Tweens address its scalars
//! through [`Field`]; renderers read it through immutable borrows.

use crate::foundation::error::{ReelError, ReelResult};

/// Number of typewriter lines on the intro title card.
pub const INTRO_LINES: usize = 5;

/// Content section of a sign card, in reveal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SectionKind {
    /// Love forecast.
    Love,
    /// Career forecast.
    Career,
    /// Money forecast.
    Money,
    /// Closing soul message.
    SoulMessage,
}

impl SectionKind {
    /// All sections in fixed reveal order.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Love,
        SectionKind::Career,
        SectionKind::Money,
        SectionKind::SoulMessage,
    ];

    /// Label drawn above the content box.
    pub fn title(self) -> &'static str {
        match self {
            Self::Love => "LOVE",
            Self::Career => "CAREER",
            Self::Money => "MONEY",
            Self::SoulMessage => "SOUL MESSAGE",
        }
    }

    /// Position in reveal order.
    pub fn index(self) -> usize {
        match self {
            Self::Love => 0,
            Self::Career => 1,
            Self::Money => 2,
            Self::SoulMessage => 3,
        }
    }
}

/// Immutable string revealed by a numeric character counter.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedText {
    full: String,
    /// Typewriter counter in characters; the visible prefix has `ceil(shown)` characters.
    pub shown: f64,
}

impl TypedText {
    /// Hidden text (counter at 0).
    pub fn new(full: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            shown: 0.0,
        }
    }

    /// Full string once typing completes.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Length in characters (the counter's end value).
    pub fn char_len(&self) -> usize {
        self.full.chars().count()
    }

    /// Currently visible prefix.
    pub fn visible(&self) -> &str {
        let n = if self.shown.is_nan() || self.shown <= 0.0 {
            0
        } else {
            self.shown.ceil() as usize
        };
        match self.full.char_indices().nth(n) {
            Some((byte, _)) => &self.full[..byte],
            None => &self.full,
        }
    }
}

/// Intro title card: orbiting ring plus five typed lines.
#[derive(Clone, Debug, PartialEq)]
pub struct IntroState {
    /// Ring scale around the surface centre.
    pub scale: f64,
    /// Ring rotation in degrees.
    pub rotation: f64,
    /// Ring group opacity.
    pub opacity: f64,
    /// Text block opacity.
    pub text_opacity: f64,
    /// Text block gate.
    pub show_text: bool,
    /// "DAILY", "HOROSCOPE", "FOR", featured names, date.
    pub lines: [TypedText; INTRO_LINES],
    /// Frame-level fade used by cross-fades.
    pub fade: f64,
}

impl IntroState {
    /// Intro state before the ring enters.
    pub fn new(lines: [String; INTRO_LINES]) -> Self {
        Self {
            scale: 0.0,
            rotation: -60.0,
            opacity: 0.0,
            text_opacity: 1.0,
            show_text: false,
            lines: lines.map(TypedText::new),
            fade: 1.0,
        }
    }
}

/// Decorative icon row shared by every sign card.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorState {
    /// Vertical offset from the resting position.
    pub y_offset: f64,
    /// Group opacity.
    pub opacity: f64,
}

impl Default for DecorState {
    fn default() -> Self {
        Self {
            y_offset: 100.0,
            opacity: 0.0,
        }
    }
}

/// One content section (label + masked content box).
#[derive(Clone, Debug, PartialEq)]
pub struct SectionState {
    /// Which section this is.
    pub kind: SectionKind,
    text: String,
    /// Label opacity.
    pub label_opacity: f64,
    /// Label vertical offset (fades up to 0).
    pub label_y_offset: f64,
    /// Content reveal progress in `[0, 1]`.
    pub mask: f64,
    /// Label gate.
    pub show_label: bool,
    /// Content gate.
    pub show_content: bool,
}

impl SectionState {
    /// Hidden section with immutable source text.
    pub fn new(kind: SectionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            label_opacity: 0.0,
            label_y_offset: 20.0,
            mask: 0.0,
            show_label: false,
            show_content: false,
        }
    }

    /// Fixed section title.
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Source text supplied by content data.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One sign card.
#[derive(Clone, Debug, PartialEq)]
pub struct SignState {
    /// Icon horizontal offset from its centred position.
    pub icon_x: f64,
    /// Icon rotation in degrees.
    pub icon_rotation: f64,
    /// Icon (and name) opacity.
    pub icon_opacity: f64,
    /// Uppercased sign name.
    pub name: TypedText,
    /// Name gate.
    pub show_name: bool,
    /// "Vibe: ..." line.
    pub vibe: TypedText,
    /// Vibe gate.
    pub show_vibe: bool,
    /// Sections in [`SectionKind::ALL`] order.
    pub sections: [SectionState; 4],
    /// Frame-level fade used by cross-fades.
    pub fade: f64,
}

impl SignState {
    /// Sign card before its entrance.
    pub fn new(name: impl Into<String>, vibe: impl Into<String>, texts: [String; 4]) -> Self {
        let [love, career, money, soul] = texts;
        Self {
            icon_x: -300.0,
            icon_rotation: -360.0,
            icon_opacity: 0.0,
            name: TypedText::new(name),
            show_name: false,
            vibe: TypedText::new(vibe),
            show_vibe: false,
            sections: [
                SectionState::new(SectionKind::Love, love),
                SectionState::new(SectionKind::Career, career),
                SectionState::new(SectionKind::Money, money),
                SectionState::new(SectionKind::SoulMessage, soul),
            ],
            fade: 1.0,
        }
    }

    /// Borrow one section.
    pub fn section(&self, kind: SectionKind) -> &SectionState {
        &self.sections[kind.index()]
    }
}

/// Outro call-to-action card.
#[derive(Clone, Debug, PartialEq)]
pub struct OutroState {
    /// Whole-card opacity.
    pub opacity: f64,
    /// Ring rotation in degrees.
    pub rotation: f64,
    /// Typed headline.
    pub headline: TypedText,
    /// Reveal-box width fraction in `[0, 1]`.
    pub box_reveal: f64,
    /// Frame-level fade used by cross-fades.
    pub fade: f64,
}

impl OutroState {
    /// Outro state before it fades in.
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            opacity: 0.0,
            rotation: 0.0,
            headline: TypedText::new(headline),
            box_reveal: 0.0,
            fade: 1.0,
        }
    }
}

/// Complete animation state of one reel play-through.
#[derive(Clone, Debug, PartialEq)]
pub struct ReelState {
    /// Intro card.
    pub intro: IntroState,
    /// Shared decorative row.
    pub decor: DecorState,
    /// Sign cards in content order.
    pub signs: Vec<SignState>,
    /// Outro card.
    pub outro: OutroState,
}

/// Intro scalar addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum IntroField {
    /// [`IntroState::scale`].
    Scale,
    /// [`IntroState::rotation`].
    Rotation,
    /// [`IntroState::opacity`].
    Opacity,
    /// [`IntroState::text_opacity`].
    TextOpacity,
    /// [`IntroState::show_text`].
    ShowText,
    /// Typewriter counter of line `n`.
    Line(usize),
    /// [`IntroState::fade`].
    Fade,
}

/// Decorative row scalar addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DecorField {
    /// [`DecorState::y_offset`].
    YOffset,
    /// [`DecorState::opacity`].
    Opacity,
}

/// Sign card scalar addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SignField {
    /// [`SignState::icon_x`].
    IconX,
    /// [`SignState::icon_rotation`].
    IconRotation,
    /// [`SignState::icon_opacity`].
    IconOpacity,
    /// Name typewriter counter.
    NameChars,
    /// [`SignState::show_name`].
    ShowName,
    /// Vibe typewriter counter.
    VibeChars,
    /// [`SignState::show_vibe`].
    ShowVibe,
    /// [`SignState::fade`].
    Fade,
}

/// Section scalar addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SectionField {
    /// [`SectionState::label_opacity`].
    LabelOpacity,
    /// [`SectionState::label_y_offset`].
    LabelYOffset,
    /// [`SectionState::mask`].
    Mask,
    /// [`SectionState::show_label`].
    ShowLabel,
    /// [`SectionState::show_content`].
    ShowContent,
}

/// Outro scalar addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum OutroField {
    /// [`OutroState::opacity`].
    Opacity,
    /// [`OutroState::rotation`].
    Rotation,
    /// Headline typewriter counter.
    HeadlineChars,
    /// [`OutroState::box_reveal`].
    BoxReveal,
    /// [`OutroState::fade`].
    Fade,
}

/// Typed address of one animatable scalar in [`ReelState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Field {
    /// Intro card scalar.
    Intro(IntroField),
    /// Decorative row scalar.
    Decor(DecorField),
    /// Sign card scalar.
    Sign {
        /// Sign index in content order.
        sign: usize,
        /// Scalar within the sign card.
        field: SignField,
    },
    /// Section scalar.
    Section {
        /// Sign index in content order.
        sign: usize,
        /// Section within the sign card.
        section: SectionKind,
        /// Scalar within the section.
        field: SectionField,
    },
    /// Outro card scalar.
    Outro(OutroField),
}

/// Value kind of a [`Field`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Interpolated number.
    Number,
    /// Boolean gate, only written by zero-duration sets.
    Flag,
}

/// Value written into a [`Field`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Value {
    /// Numeric value.
    Num(f64),
    /// Boolean value.
    Flag(bool),
}

impl Value {
    /// Kind of this value.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Num(_) => FieldKind::Number,
            Self::Flag(_) => FieldKind::Flag,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl Field {
    /// Shorthand for a sign card field.
    pub fn sign(sign: usize, field: SignField) -> Self {
        Self::Sign { sign, field }
    }

    /// Shorthand for a section field.
    pub fn section(sign: usize, section: SectionKind, field: SectionField) -> Self {
        Self::Section {
            sign,
            section,
            field,
        }
    }

    /// Value kind stored at this address.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Intro(IntroField::ShowText)
            | Self::Sign {
                field: SignField::ShowName | SignField::ShowVibe,
                ..
            }
            | Self::Section {
                field: SectionField::ShowLabel | SectionField::ShowContent,
                ..
            } => FieldKind::Flag,
            _ => FieldKind::Number,
        }
    }

    /// Opacity fields may carry deliberately overlapping cross-fade tweens.
    pub fn is_opacity(self) -> bool {
        matches!(
            self,
            Self::Intro(IntroField::Opacity | IntroField::TextOpacity | IntroField::Fade)
                | Self::Decor(DecorField::Opacity)
                | Self::Sign {
                    field: SignField::IconOpacity | SignField::Fade,
                    ..
                }
                | Self::Section {
                    field: SectionField::LabelOpacity,
                    ..
                }
                | Self::Outro(OutroField::Opacity | OutroField::Fade)
        )
    }
}

impl ReelState {
    /// Assemble a state from its parts.
    pub fn new(intro: IntroState, signs: Vec<SignState>, outro: OutroState) -> Self {
        Self {
            intro,
            decor: DecorState::default(),
            signs,
            outro,
        }
    }

    fn sign_ref(&self, sign: usize) -> ReelResult<&SignState> {
        self.signs.get(sign).ok_or_else(|| {
            ReelError::timeline(format!(
                "field references sign {sign}, but the reel has {} sign(s)",
                self.signs.len()
            ))
        })
    }

    fn sign_mut(&mut self, sign: usize) -> ReelResult<&mut SignState> {
        let n = self.signs.len();
        self.signs.get_mut(sign).ok_or_else(|| {
            ReelError::timeline(format!(
                "field references sign {sign}, but the reel has {n} sign(s)"
            ))
        })
    }

    fn intro_line(&self, n: usize) -> ReelResult<&TypedText> {
        self.intro.lines.get(n).ok_or_else(|| {
            ReelError::timeline(format!(
                "intro line {n} does not exist (lines 0..{INTRO_LINES})"
            ))
        })
    }

    /// Read the value at `field`.
    pub fn get(&self, field: Field) -> ReelResult<Value> {
        let v = match field {
            Field::Intro(f) => match f {
                IntroField::Scale => Value::Num(self.intro.scale),
                IntroField::Rotation => Value::Num(self.intro.rotation),
                IntroField::Opacity => Value::Num(self.intro.opacity),
                IntroField::TextOpacity => Value::Num(self.intro.text_opacity),
                IntroField::ShowText => Value::Flag(self.intro.show_text),
                IntroField::Line(n) => Value::Num(self.intro_line(n)?.shown),
                IntroField::Fade => Value::Num(self.intro.fade),
            },
            Field::Decor(f) => match f {
                DecorField::YOffset => Value::Num(self.decor.y_offset),
                DecorField::Opacity => Value::Num(self.decor.opacity),
            },
            Field::Sign { sign, field } => {
                let s = self.sign_ref(sign)?;
                match field {
                    SignField::IconX => Value::Num(s.icon_x),
                    SignField::IconRotation => Value::Num(s.icon_rotation),
                    SignField::IconOpacity => Value::Num(s.icon_opacity),
                    SignField::NameChars => Value::Num(s.name.shown),
                    SignField::ShowName => Value::Flag(s.show_name),
                    SignField::VibeChars => Value::Num(s.vibe.shown),
                    SignField::ShowVibe => Value::Flag(s.show_vibe),
                    SignField::Fade => Value::Num(s.fade),
                }
            }
            Field::Section {
                sign,
                section,
                field,
            } => {
                let s = self.sign_ref(sign)?.section(section);
                match field {
                    SectionField::LabelOpacity => Value::Num(s.label_opacity),
                    SectionField::LabelYOffset => Value::Num(s.label_y_offset),
                    SectionField::Mask => Value::Num(s.mask),
                    SectionField::ShowLabel => Value::Flag(s.show_label),
                    SectionField::ShowContent => Value::Flag(s.show_content),
                }
            }
            Field::Outro(f) => match f {
                OutroField::Opacity => Value::Num(self.outro.opacity),
                OutroField::Rotation => Value::Num(self.outro.rotation),
                OutroField::HeadlineChars => Value::Num(self.outro.headline.shown),
                OutroField::BoxReveal => Value::Num(self.outro.box_reveal),
                OutroField::Fade => Value::Num(self.outro.fade),
            },
        };
        Ok(v)
    }

    /// Write `value` at `field`; the value kind must match the field kind.
    pub fn set(&mut self, field: Field, value: Value) -> ReelResult<()> {
        fn num(field: Field, value: Value) -> ReelResult<f64> {
            match value {
                Value::Num(v) => Ok(v),
                Value::Flag(_) => Err(ReelError::timeline(format!(
                    "field {field:?} is numeric but a flag value was supplied"
                ))),
            }
        }
        fn flag(field: Field, value: Value) -> ReelResult<bool> {
            match value {
                Value::Flag(v) => Ok(v),
                Value::Num(_) => Err(ReelError::timeline(format!(
                    "field {field:?} is a flag but a numeric value was supplied"
                ))),
            }
        }

        match field {
            Field::Intro(f) => match f {
                IntroField::Scale => self.intro.scale = num(field, value)?,
                IntroField::Rotation => self.intro.rotation = num(field, value)?,
                IntroField::Opacity => self.intro.opacity = num(field, value)?,
                IntroField::TextOpacity => self.intro.text_opacity = num(field, value)?,
                IntroField::ShowText => self.intro.show_text = flag(field, value)?,
                IntroField::Line(n) => {
                    let v = num(field, value)?;
                    self.intro_line(n)?;
                    self.intro.lines[n].shown = v;
                }
                IntroField::Fade => self.intro.fade = num(field, value)?,
            },
            Field::Decor(f) => match f {
                DecorField::YOffset => self.decor.y_offset = num(field, value)?,
                DecorField::Opacity => self.decor.opacity = num(field, value)?,
            },
            Field::Sign { sign, field: f } => {
                let s = self.sign_mut(sign)?;
                match f {
                    SignField::IconX => s.icon_x = num(field, value)?,
                    SignField::IconRotation => s.icon_rotation = num(field, value)?,
                    SignField::IconOpacity => s.icon_opacity = num(field, value)?,
                    SignField::NameChars => s.name.shown = num(field, value)?,
                    SignField::ShowName => s.show_name = flag(field, value)?,
                    SignField::VibeChars => s.vibe.shown = num(field, value)?,
                    SignField::ShowVibe => s.show_vibe = flag(field, value)?,
                    SignField::Fade => s.fade = num(field, value)?,
                }
            }
            Field::Section {
                sign,
                section,
                field: f,
            } => {
                let s = &mut self.sign_mut(sign)?.sections[section.index()];
                match f {
                    SectionField::LabelOpacity => s.label_opacity = num(field, value)?,
                    SectionField::LabelYOffset => s.label_y_offset = num(field, value)?,
                    SectionField::Mask => s.mask = num(field, value)?,
                    SectionField::ShowLabel => s.show_label = flag(field, value)?,
                    SectionField::ShowContent => s.show_content = flag(field, value)?,
                }
            }
            Field::Outro(f) => match f {
                OutroField::Opacity => self.outro.opacity = num(field, value)?,
                OutroField::Rotation => self.outro.rotation = num(field, value)?,
                OutroField::HeadlineChars => self.outro.headline.shown = num(field, value)?,
                OutroField::BoxReveal => self.outro.box_reveal = num(field, value)?,
                OutroField::Fade => self.outro.fade = num(field, value)?,
            },
        }
        Ok(())
    }

    /// Fail if `field` does not exist in this state.
    pub fn check_field(&self, field: Field) -> ReelResult<()> {
        self.get(field).map(|_| ())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
