/// The twelve zodiac signs in canonical ring order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Sign {
    /// Aries.
    Aries,
    /// Taurus.
    Taurus,
    /// Gemini.
    Gemini,
    /// Cancer.
    Cancer,
    /// Leo.
    Leo,
    /// Virgo.
    Virgo,
    /// Libra.
    Libra,
    /// Scorpio.
    Scorpio,
    /// Sagittarius.
    Sagittarius,
    /// Capricorn.
    Capricorn,
    /// Aquarius.
    Aquarius,
    /// Pisces.
    Pisces,
}

impl Sign {
    /// All signs in canonical order.
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Icon used for names that match no sign.
    pub const FALLBACK: Sign = Sign::Leo;

    /// Canonical display name (also the icon file stem).
    pub fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Position in canonical order (ring slot and icon index).
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn from_name(name: &str) -> Option<Sign> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/sign.rs"]
mod tests;
