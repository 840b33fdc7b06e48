//! `vello_cpu` execution of frame plans.

use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::kurbo::Shape;

use crate::assets::decode::PreparedImage;
use crate::assets::store::ReelAssets;
use crate::foundation::core::{Affine, Canvas, Rect, Rgba8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::unit;
use crate::layout::text::TextLayoutEngine;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::plan::{DrawOp, FramePlan, ImageRef, TextAlign, TextBaseline};

struct FontFace {
    engine: TextLayoutEngine,
    data: vello_cpu::peniko::FontData,
}

/// Paint built from one slot's pixels; holding the source keeps the entry tied to it.
struct CachedImage {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    width: u16,
    height: u16,
    ctx: Option<vello_cpu::RenderContext>,
    font: Option<FontFace>,
    image_cache: HashMap<ImageRef, CachedImage>,
    warned_no_font: bool,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("font", &self.font.as_ref().map(|f| f.engine.family_name()))
            .finish()
    }
}

impl CpuBackend {
    /// Backend for `canvas`, drawing text with `font` when given.
    pub fn new(canvas: Canvas, font: Option<&[u8]>) -> ReelResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ReelError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ReelError::render("surface height exceeds u16"))?;
        let font = font
            .map(|bytes| {
                Ok::<_, ReelError>(FontFace {
                    engine: TextLayoutEngine::new(bytes)?,
                    data: vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(bytes.to_vec()),
                        0,
                    ),
                })
            })
            .transpose()?;
        Ok(Self {
            width,
            height,
            ctx: None,
            font,
            image_cache: HashMap::new(),
            warned_no_font: false,
        })
    }

    fn image_paint_for(
        &mut self,
        slot: ImageRef,
        img: &PreparedImage,
    ) -> ReelResult<vello_cpu::Image> {
        if let Some(cached) = self.image_cache.get(&slot)
            && Arc::ptr_eq(&cached.source, &img.rgba8_premul)
        {
            return Ok(cached.paint.clone());
        }
        let pixmap = image_premul_bytes_to_pixmap(&img.rgba8_premul, img.width, img.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(
            slot,
            CachedImage {
                source: Arc::clone(&img.rgba8_premul),
                paint: paint.clone(),
            },
        );
        Ok(paint)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        assets: &ReelAssets,
        clip_depth: &mut usize,
    ) -> ReelResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match op {
            DrawOp::Clear(color) => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(self.width),
                    f64::from(self.height),
                ));
            }
            DrawOp::FillRect {
                rect,
                color,
                opacity,
            } => {
                with_opacity(ctx, *opacity, |ctx| {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(color_to_cpu(*color));
                    ctx.fill_rect(&rect_to_cpu(*rect));
                });
            }
            DrawOp::Image {
                image,
                rect,
                rotation_deg,
                opacity,
            } => {
                let prepared = match image {
                    ImageRef::Sign(s) => assets.sign(*s),
                    ImageRef::Decor(d) => assets.decor(*d),
                };
                let Some(prepared) = prepared else {
                    tracing::debug!(?image, "image not loaded, skipping draw");
                    return Ok(());
                };
                if prepared.width == 0 || prepared.height == 0 {
                    return Ok(());
                }
                let paint = self.image_paint_for(*image, prepared)?;
                let (iw, ih) = (f64::from(prepared.width), f64::from(prepared.height));
                let tr = Affine::translate(rect.center().to_vec2())
                    * Affine::rotate(rotation_deg.to_radians())
                    * Affine::translate(Vec2::new(-rect.width() / 2.0, -rect.height() / 2.0))
                    * Affine::scale_non_uniform(rect.width() / iw, rect.height() / ih);
                with_opacity(ctx, *opacity, |ctx| {
                    ctx.set_transform(affine_to_cpu(tr));
                    ctx.set_paint(paint);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
                });
            }
            DrawOp::Text {
                text,
                style,
                pos,
                align,
                baseline,
                max_width,
                opacity,
            } => {
                let Some(face) = self.font.as_mut() else {
                    if !self.warned_no_font {
                        tracing::warn!("no font loaded, text ops are skipped");
                        self.warned_no_font = true;
                    }
                    return Ok(());
                };
                let layout = face.engine.layout_plain(text, style)?;
                let (w, h) = (f64::from(layout.width()), f64::from(layout.height()));
                let sx = match max_width {
                    Some(m) if w > *m && w > 0.0 => m / w,
                    _ => 1.0,
                };
                let dx = match align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => -w / 2.0,
                };
                let dy = match baseline {
                    TextBaseline::Top => 0.0,
                    TextBaseline::Middle => -h / 2.0,
                };
                let tr = Affine::translate(pos.to_vec2())
                    * Affine::scale_non_uniform(sx, 1.0)
                    * Affine::translate(Vec2::new(dx, dy));
                let font = face.data.clone();
                with_opacity(ctx, *opacity, |ctx| {
                    ctx.set_transform(affine_to_cpu(tr));
                    for line in layout.lines() {
                        for item in line.items() {
                            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                                continue;
                            };
                            let brush = run.style().brush;
                            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                                brush.r, brush.g, brush.b, brush.a,
                            ));
                            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            });
                            ctx.glyph_run(&font)
                                .font_size(run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                });
            }
            DrawOp::PushClip(rect) => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.push_clip_layer(&rect_to_cpu(*rect).to_path(0.1));
                *clip_depth += 1;
            }
            DrawOp::PopClip => {
                if *clip_depth == 0 {
                    return Err(ReelError::render("PopClip without matching PushClip"));
                }
                ctx.pop_layer();
                *clip_depth -= 1;
            }
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &FramePlan, assets: &ReelAssets) -> ReelResult<FrameRGBA> {
        let mut ctx = self
            .ctx
            .take()
            .unwrap_or_else(|| vello_cpu::RenderContext::new(self.width, self.height));
        ctx.reset();

        let mut clip_depth = 0usize;
        let mut result = Ok(());
        for op in &plan.ops {
            result = self.draw_op(&mut ctx, op, assets, &mut clip_depth);
            if result.is_err() {
                break;
            }
        }
        for _ in 0..clip_depth {
            ctx.pop_layer();
        }

        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        result?;

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f64,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    let opacity = unit(opacity) as f32;
    if opacity <= 0.0 {
        return;
    }
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    draw(ctx);
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ReelError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ReelError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ReelError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
