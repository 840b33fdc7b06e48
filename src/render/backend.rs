use crate::assets::store::ReelAssets;
use crate::foundation::error::ReelResult;
use crate::render::plan::FramePlan;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. Reel frames are cleared to an opaque background, so
/// in practice the bytes equal their straight-alpha form.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Pixels as straight (non-premultiplied) RGBA8.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Executes a [`FramePlan`] into pixels.
pub trait RenderBackend {
    /// Paint `plan` and read back the final frame.
    fn render_plan(&mut self, plan: &FramePlan, assets: &ReelAssets) -> ReelResult<FrameRGBA>;
}
