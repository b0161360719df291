use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::{
    assets::store::AssetStore,
    assets::text::{TextBrushRgba8, TextLayoutEngine},
    card::layout::{MaskShape, MaskSource, TextAnchor},
    compile::plan::{
        DrawOp, ImageInput, PasteMode, PastePass, PasteSource, ScenePass, SurfaceDesc, SurfaceId,
        TextOp,
    },
    foundation::core::{Rect, Rgba8Premul},
    foundation::error::{RankCardError, RankCardResult},
    render::frame::{Blend, FrameRGBA, MaskPlane},
    render::passes::{CardInputs, PassBackend},
};

const PATH_TOLERANCE: f64 = 0.1;

/// CPU backend: `vello_cpu` rasterizes shapes and glyphs, everything else is plain pixel work on
/// premultiplied RGBA8 frames.
pub struct CpuBackend<'a> {
    assets: &'a AssetStore,
    surfaces: HashMap<SurfaceId, FrameRGBA>,
    fonts: HashMap<String, Arc<Vec<u8>>>,
    text: TextLayoutEngine,
}

impl<'a> CpuBackend<'a> {
    pub fn new(assets: &'a AssetStore) -> Self {
        Self {
            assets,
            surfaces: HashMap::new(),
            fonts: HashMap::new(),
            text: TextLayoutEngine::new(),
        }
    }

    fn surface(&self, id: SurfaceId) -> RankCardResult<&FrameRGBA> {
        self.surfaces
            .get(&id)
            .ok_or_else(|| RankCardError::render(format!("surface {} was not initialized", id.0)))
    }

    fn surface_mut(&mut self, id: SurfaceId) -> RankCardResult<&mut FrameRGBA> {
        self.surfaces
            .get_mut(&id)
            .ok_or_else(|| RankCardError::render(format!("surface {} was not initialized", id.0)))
    }

    fn font(&mut self, rel: &str) -> RankCardResult<Arc<Vec<u8>>> {
        if let Some(bytes) = self.fonts.get(rel) {
            return Ok(Arc::clone(bytes));
        }
        let bytes = self.assets.font(rel)?;
        self.fonts.insert(rel.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    fn mask_plane(&self, mask: &MaskSource, width: u32, height: u32) -> RankCardResult<MaskPlane> {
        match mask {
            MaskSource::Shape { shape } => {
                Ok(MaskPlane::from_alpha(&rasterize_shape(*shape, width, height)?))
            }
            MaskSource::Asset { path } => {
                let art = FrameRGBA::from_prepared(&self.assets.image(path)?);
                Ok(MaskPlane::from_luma(&art.resized(width, height)?))
            }
        }
    }

    /// Source frame for a paste and whether it carries an alpha channel.
    fn paste_source(
        &self,
        source: &PasteSource,
        inputs: &CardInputs,
    ) -> RankCardResult<(FrameRGBA, bool)> {
        match source {
            PasteSource::Input(ImageInput::Background) => {
                let img = inputs.background.as_ref().ok_or_else(|| {
                    RankCardError::validation("this layout needs a background image")
                })?;
                Ok((FrameRGBA::from_prepared(img), img.has_alpha))
            }
            PasteSource::Input(ImageInput::Avatar) => Ok((
                FrameRGBA::from_prepared(&inputs.avatar),
                inputs.avatar.has_alpha,
            )),
            PasteSource::Surface(id) => Ok((self.surface(*id)?.clone(), true)),
            PasteSource::Asset { path, recolor } => {
                let img = self.assets.image(path)?;
                let mut frame = FrameRGBA::from_prepared(&img);
                if let Some(to) = recolor {
                    frame.recolor(Rgba8Premul::opaque_black(), *to);
                }
                Ok((frame, img.has_alpha))
            }
        }
    }

    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> RankCardResult<()> {
        match op {
            DrawOp::FillRoundedRect {
                rect, radius, color, ..
            } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(paint(*color));
                fill_rounded_rect(ctx, *rect, *radius);
                Ok(())
            }
            DrawOp::Text(t) => self.draw_text(ctx, t),
        }
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, t: &TextOp) -> RankCardResult<()> {
        let font_bytes = self.font(&t.font)?;
        let [r, g, b, a] = t.color;
        let line = self
            .text
            .shape_line(&t.text, &font_bytes, t.size_px, TextBrushRgba8 { r, g, b, a })?;

        let x = match t.anchor {
            TextAnchor::Start => t.x,
            TextAnchor::End => t.x - f64::from(line.width()),
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, t.y)));

        for layout_line in line.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();

                // Outline first so the fill keeps the full glyph shape.
                if let Some((width_px, color)) = t.stroke {
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(width_px) * 2.0));
                    ctx.set_paint(paint(color));
                    ctx.glyph_run(&line.font)
                        .font_size(line.size_px)
                        .stroke_glyphs(glyphs.iter().copied());
                }

                let brush = run.style().brush;
                ctx.set_paint(paint([brush.r, brush.g, brush.b, brush.a]));
                ctx.glyph_run(&line.font)
                    .font_size(line.size_px)
                    .fill_glyphs(glyphs.into_iter());
            }
        }
        Ok(())
    }
}

impl PassBackend for CpuBackend<'_> {
    fn ensure_surface(&mut self, id: SurfaceId, desc: SurfaceDesc) -> RankCardResult<()> {
        dims_u16(desc.width, desc.height)?;
        let fresh = match self.surfaces.get(&id) {
            Some(s) => s.width != desc.width || s.height != desc.height,
            None => true,
        };
        if fresh {
            self.surfaces
                .insert(id, FrameRGBA::new(desc.width, desc.height));
        }
        Ok(())
    }

    fn exec_clear(&mut self, target: SurfaceId, color: Rgba8Premul) -> RankCardResult<()> {
        self.surface_mut(target)?.fill(color);
        Ok(())
    }

    fn exec_paste(&mut self, pass: &PastePass, inputs: &CardInputs) -> RankCardResult<()> {
        let (src, has_alpha) = self.paste_source(&pass.source, inputs)?;
        let mut src = src.resized(pass.width, pass.height)?;

        if let Some(backdrop) = pass.flatten {
            if has_alpha {
                src.flatten_onto(backdrop);
            } else {
                tracing::debug!(source = ?pass.source, "source has no alpha channel, pasting as is");
            }
        }

        let mask = match &pass.mode {
            PasteMode::Mask(m) => Some(self.mask_plane(m, pass.width, pass.height)?),
            PasteMode::Replace | PasteMode::SourceAlpha => None,
        };
        let blend = match (&pass.mode, &mask) {
            (PasteMode::Replace, _) => Blend::Replace,
            (PasteMode::SourceAlpha, _) => Blend::Over,
            (PasteMode::Mask(_), Some(m)) => Blend::Lerp(m),
            (PasteMode::Mask(_), None) => {
                return Err(RankCardError::render("mask plane missing for masked paste"));
            }
        };

        self.surface_mut(pass.target)?
            .paste(&src, pass.x, pass.y, blend)
    }

    fn exec_scene(&mut self, pass: &ScenePass) -> RankCardResult<()> {
        let (width, height) = {
            let s = self.surface(pass.target)?;
            (s.width, s.height)
        };
        let (w16, h16) = dims_u16(width, height)?;

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        for op in &pass.ops {
            self.draw_op(&mut ctx, op)?;
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);

        let layer =
            FrameRGBA::from_premul_bytes(width, height, pixmap.data_as_u8_slice().to_vec())?;
        self.surface_mut(pass.target)?.over_in_place(&layer)
    }

    fn exec_clip(&mut self, target: SurfaceId, mask: &MaskSource) -> RankCardResult<()> {
        let (width, height) = {
            let s = self.surface(target)?;
            (s.width, s.height)
        };
        let plane = self.mask_plane(mask, width, height)?;
        self.surface_mut(target)?.apply_mask(&plane)
    }

    fn readback_rgba8(&mut self, surface: SurfaceId) -> RankCardResult<FrameRGBA> {
        Ok(self.surface(surface)?.clone())
    }
}

fn dims_u16(width: u32, height: u32) -> RankCardResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RankCardError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RankCardError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn paint([r, g, b, a]: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn rect_to_cpu(rect: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1)
}

fn fill_rounded_rect(ctx: &mut vello_cpu::RenderContext, rect: Rect, radius: f64) {
    let rect = rect_to_cpu(rect);
    let radius = radius.min(rect.width().min(rect.height()) / 2.0).max(0.0);
    if radius == 0.0 {
        ctx.fill_rect(&rect);
    } else {
        let path = vello_cpu::kurbo::RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE);
        ctx.fill_path(&path);
    }
}

/// Coverage of `shape` spanning a `width`x`height` area, as opaque white.
fn rasterize_shape(shape: MaskShape, width: u32, height: u32) -> RankCardResult<FrameRGBA> {
    let (w16, h16) = dims_u16(width, height)?;
    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint(paint([255, 255, 255, 255]));

    let bounds = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
    match shape {
        MaskShape::Rect => ctx.fill_rect(&rect_to_cpu(bounds)),
        MaskShape::Ellipse => {
            let path =
                vello_cpu::kurbo::Ellipse::from_rect(rect_to_cpu(bounds)).to_path(PATH_TOLERANCE);
            ctx.fill_path(&path);
        }
        MaskShape::RoundedRect { radius } => fill_rounded_rect(&mut ctx, bounds, radius),
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);
    FrameRGBA::from_premul_bytes(width, height, pixmap.data_as_u8_slice().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
