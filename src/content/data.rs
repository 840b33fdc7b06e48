use std::path::Path;

use anyhow::Context;

use crate::content::date::format_display_date;
use crate::foundation::error::{ReelError, ReelResult};

/// Number of signs featured in one daily reel.
pub const FEATURED_SIGNS: usize = 3;

/// One featured sign's reading.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SignEntry {
    /// Sign name as authored (looked up case-insensitively).
    pub name: String,
    /// One-line vibe.
    pub vibe: String,
    /// Love section text.
    pub love: String,
    /// Career section text.
    pub career: String,
    /// Money section text.
    pub money: String,
    /// Soul message section text.
    #[serde(rename = "soulMessage")]
    pub soul_message: String,
}

impl SignEntry {
    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("name", &self.name),
            ("vibe", &self.vibe),
            ("love", &self.love),
            ("career", &self.career),
            ("money", &self.money),
            ("soulMessage", &self.soul_message),
        ]
    }

    /// Section texts in reveal order (love, career, money, soul message).
    pub fn section_texts(&self) -> [String; 4] {
        [
            self.love.clone(),
            self.career.clone(),
            self.money.clone(),
            self.soul_message.clone(),
        ]
    }
}

/// Daily content: a date plus the featured signs.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContentData {
    /// Date as authored; ISO dates are reformatted for display.
    #[serde(default)]
    pub date: String,
    /// Featured signs in presentation order.
    pub zodiacs: Vec<SignEntry>,
}

impl ContentData {
    /// Parse JSON content without validating it.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ReelError::serde(format!("content JSON is malformed: {e}")))
    }

    /// Read, parse and validate a content file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read content file \"{}\"", path.display()))?;
        let data = Self::from_json_str(&json)?;
        data.validate()?;
        tracing::debug!(path = %path.display(), signs = data.zodiacs.len(), "content loaded");
        Ok(data)
    }

    /// Loader contract: exactly three entries, every field non-empty after trimming.
    pub fn validate(&self) -> ReelResult<()> {
        if self.zodiacs.len() != FEATURED_SIGNS {
            return Err(ReelError::validation(format!(
                "expected exactly {FEATURED_SIGNS} zodiacs, found {}",
                self.zodiacs.len()
            )));
        }
        for (i, entry) in self.zodiacs.iter().enumerate() {
            if let Some((field, _)) = entry.fields().into_iter().find(|(_, v)| v.trim().is_empty()) {
                return Err(ReelError::validation(format!(
                    "zodiac #{} is missing required field \"{field}\" (must be a non-empty string)",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Date as shown on the intro card.
    pub fn display_date(&self) -> String {
        format_display_date(&self.date)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/data.rs"]
mod tests;
