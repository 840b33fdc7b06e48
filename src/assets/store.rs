//! Decoded reel assets: twelve sign icons, four decorative icons and an optional font.
//!
//! Everything is decoded up front; renderers only ever see [`ReelAssets`] and never touch
//! the filesystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, SVG_RASTER_EDGE, decode_image, decode_svg};
use crate::content::sign::Sign;
use crate::foundation::error::{ReelError, ReelResult};

/// Extensions probed for every icon, in order.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "svg"];

/// Decorative icons of the sign cards, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DecorIcon {
    /// Heart (love).
    Heart,
    /// Trophy (career).
    Trophy,
    /// Money bag (money).
    MoneyBag,
    /// Crystal ball (soul message).
    CrystalBall,
}

impl DecorIcon {
    /// All decorative icons in row order.
    pub const ALL: [DecorIcon; 4] = [
        DecorIcon::Heart,
        DecorIcon::Trophy,
        DecorIcon::MoneyBag,
        DecorIcon::CrystalBall,
    ];

    /// File stem under `decor/`.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Trophy => "trophy",
            Self::MoneyBag => "money-bag",
            Self::CrystalBall => "crystal-ball",
        }
    }

    /// Position in the row.
    pub fn index(self) -> usize {
        match self {
            Self::Heart => 0,
            Self::Trophy => 1,
            Self::MoneyBag => 2,
            Self::CrystalBall => 3,
        }
    }
}

/// Fully decoded assets for one session.
#[derive(Clone, Debug, Default)]
pub struct ReelAssets {
    signs: [Option<PreparedImage>; 12],
    decor: [Option<PreparedImage>; 4],
    font: Option<Arc<Vec<u8>>>,
}

fn find_with_extension(dir: &Path, stem: &str) -> Option<PathBuf> {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}

fn load_image(path: &Path) -> ReelResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| ReelError::asset(format!("read \"{}\": {e}", path.display())))?;
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        decode_svg(&bytes, SVG_RASTER_EDGE)
    } else {
        decode_image(&bytes)
    }
}

/// Locate and decode one icon; missing or broken files are logged and skipped.
fn load_optional(dir: &Path, stem: &str) -> Option<PreparedImage> {
    let Some(path) = find_with_extension(dir, stem) else {
        tracing::warn!(dir = %dir.display(), stem, "icon not found, it will be skipped");
        return None;
    };
    match load_image(&path) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "icon failed to decode, it will be skipped");
            None
        }
    }
}

impl ReelAssets {
    /// No images and no font.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode `signs/<Sign>.*` and `decor/<stem>.*` under `dir`, plus an optional font file.
    ///
    /// Missing icons are tolerated. An explicitly requested font that cannot be read is an
    /// error.
    #[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>, font: Option<&Path>) -> ReelResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ReelError::asset(format!(
                "assets directory \"{}\" does not exist",
                dir.display()
            )));
        }
        let signs_dir = dir.join("signs");
        let decor_dir = dir.join("decor");

        let signs = Sign::ALL.map(|s| load_optional(&signs_dir, s.name()));
        let decor = DecorIcon::ALL.map(|d| load_optional(&decor_dir, d.file_stem()));
        let font = font
            .map(|p| {
                std::fs::read(p)
                    .map(Arc::new)
                    .map_err(|e| ReelError::asset(format!("read font \"{}\": {e}", p.display())))
            })
            .transpose()?;

        let out = Self { signs, decor, font };
        tracing::debug!(
            signs = out.signs.iter().flatten().count(),
            decor = out.decor_count(),
            font = out.font.is_some(),
            "assets decoded"
        );
        Ok(out)
    }

    /// Replace one sign icon.
    pub fn with_sign(mut self, sign: Sign, image: PreparedImage) -> Self {
        self.signs[sign.index()] = Some(image);
        self
    }

    /// Replace one decorative icon.
    pub fn with_decor(mut self, icon: DecorIcon, image: PreparedImage) -> Self {
        self.decor[icon.index()] = Some(image);
        self
    }

    /// Use the given font bytes.
    pub fn with_font(mut self, bytes: Vec<u8>) -> Self {
        self.font = Some(Arc::new(bytes));
        self
    }

    /// Icon of `sign`, if loaded.
    pub fn sign(&self, sign: Sign) -> Option<&PreparedImage> {
        self.signs[sign.index()].as_ref()
    }

    /// Decorative icon, if loaded.
    pub fn decor(&self, icon: DecorIcon) -> Option<&PreparedImage> {
        self.decor[icon.index()].as_ref()
    }

    /// Number of decorative icons loaded.
    pub fn decor_count(&self) -> usize {
        self.decor.iter().flatten().count()
    }

    /// Canonical signs without a loaded icon.
    pub fn missing_signs(&self) -> Vec<Sign> {
        Sign::ALL
            .into_iter()
            .filter(|s| self.signs[s.index()].is_none())
            .collect()
    }

    /// Font bytes, if a font was loaded.
    pub fn font(&self) -> Option<&[u8]> {
        self.font.as_deref().map(Vec::as_slice)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
