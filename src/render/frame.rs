use crate::assets::decode::PreparedImage;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{RankCardError, RankCardResult};

/// Premultiplied RGBA8 pixel buffer, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Per-pixel 8-bit weights (255 = fully selected).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MaskPlane {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) weights: Vec<u8>,
}

/// Blend rule for [`FrameRGBA::paste`].
#[derive(Clone, Copy, Debug)]
pub(crate) enum Blend<'a> {
    Replace,
    Over,
    Lerp(&'a MaskPlane),
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    pub(crate) fn from_prepared(img: &PreparedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            data: img.rgba8_premul.as_ref().clone(),
        }
    }

    pub(crate) fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> RankCardResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(RankCardError::render(format!(
                "rgba8 buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some(Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        })
    }

    pub(crate) fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Resample to `width`x`height` (Catmull-Rom), returning a clone when the size already matches.
    pub(crate) fn resized(&self, width: u32, height: u32) -> RankCardResult<Self> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        let src = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| RankCardError::render("frame buffer size mismatch"))?;
        let out = image::imageops::resize(
            &src,
            width,
            height,
            image::imageops::FilterType::CatmullRom,
        );
        let mut data = out.into_raw();
        // Cubic overshoot can leave color above alpha, which is not valid premultiplied data.
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = px[0].min(a);
            px[1] = px[1].min(a);
            px[2] = px[2].min(a);
        }
        Self::from_premul_bytes(width, height, data)
    }

    /// Composite every pixel over an opaque `backdrop`, leaving a fully opaque frame.
    pub(crate) fn flatten_onto(&mut self, backdrop: Rgba8Premul) {
        let bg = backdrop.to_array();
        for px in self.data.chunks_exact_mut(4) {
            let inv = 255u16 - u16::from(px[3]);
            for c in 0..3 {
                px[c] = add_sat_u8(px[c], mul_div255(u16::from(bg[c]), inv));
            }
            px[3] = 255;
        }
    }

    /// Replace every pixel equal to `from` with `to`.
    pub(crate) fn recolor(&mut self, from: Rgba8Premul, to: Rgba8Premul) {
        let from = from.to_array();
        let to = to.to_array();
        for px in self.data.chunks_exact_mut(4) {
            if *px == from {
                px.copy_from_slice(&to);
            }
        }
    }

    /// Source-over a same-sized frame onto this one.
    pub(crate) fn over_in_place(&mut self, src: &FrameRGBA) -> RankCardResult<()> {
        if self.width != src.width || self.height != src.height {
            return Err(RankCardError::render(
                "over_in_place expects equal-size frames",
            ));
        }
        for (d, s) in self.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
            over_px(d, s);
        }
        Ok(())
    }

    /// Place `src` with its top-left corner at (`x`, `y`), clipped to this frame.
    pub(crate) fn paste(
        &mut self,
        src: &FrameRGBA,
        x: i32,
        y: i32,
        blend: Blend<'_>,
    ) -> RankCardResult<()> {
        if let Blend::Lerp(mask) = blend {
            if mask.width != src.width || mask.height != src.height {
                return Err(RankCardError::render(
                    "paste mask must match the pasted image size",
                ));
            }
        }

        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(src.width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(src.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let dst_w = self.width as usize;
        let src_w = src.width as usize;
        for dy in y0..y1 {
            let sy = (dy - i64::from(y)) as usize;
            for dx in x0..x1 {
                let sx = (dx - i64::from(x)) as usize;
                let si = sy * src_w + sx;
                let di = (dy as usize) * dst_w + (dx as usize);
                let s = &src.data[si * 4..si * 4 + 4];
                let d = &mut self.data[di * 4..di * 4 + 4];
                match blend {
                    Blend::Replace => d.copy_from_slice(s),
                    Blend::Over => over_px(d, s),
                    Blend::Lerp(mask) => lerp_px(d, s, mask.weights[si]),
                }
            }
        }
        Ok(())
    }

    /// Multiply every channel by the mask weight at the same pixel.
    pub(crate) fn apply_mask(&mut self, mask: &MaskPlane) -> RankCardResult<()> {
        if mask.width != self.width || mask.height != self.height {
            return Err(RankCardError::render("clip mask must match the surface size"));
        }
        for (px, &w) in self.data.chunks_exact_mut(4).zip(mask.weights.iter()) {
            let w = u16::from(w);
            for c in px.iter_mut() {
                *c = mul_div255(u16::from(*c), w);
            }
        }
        Ok(())
    }

    /// Straight-alpha copy of the pixels, as encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let c = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            };
            out.extend_from_slice(&c.to_straight_rgba());
        }
        out
    }
}

impl MaskPlane {
    /// Weights from coverage (alpha).
    pub(crate) fn from_alpha(frame: &FrameRGBA) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            weights: frame.data.chunks_exact(4).map(|px| px[3]).collect(),
        }
    }

    /// Weights from ITU-R 601 luminance of the straight color, ignoring alpha.
    pub(crate) fn from_luma(frame: &FrameRGBA) -> Self {
        let weights = frame
            .data
            .chunks_exact(4)
            .map(|px| {
                let [r, g, b, _] = Rgba8Premul {
                    r: px[0],
                    g: px[1],
                    b: px[2],
                    a: px[3],
                }
                .to_straight_rgba();
                ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000)
                    as u8
            })
            .collect();
        Self {
            width: frame.width,
            height: frame.height,
            weights,
        }
    }
}

fn over_px(d: &mut [u8], s: &[u8]) {
    let sa = s[3];
    if sa == 0 {
        return;
    }
    if sa == 255 {
        d.copy_from_slice(s);
        return;
    }
    let inv = 255u16 - u16::from(sa);
    for c in 0..4 {
        d[c] = add_sat_u8(s[c], mul_div255(u16::from(d[c]), inv));
    }
}

fn lerp_px(d: &mut [u8], s: &[u8], w: u8) {
    match w {
        0 => {}
        255 => d.copy_from_slice(s),
        _ => {
            let w = u16::from(w);
            let inv = 255 - w;
            for c in 0..4 {
                d[c] = add_sat_u8(
                    mul_div255(u16::from(s[c]), w),
                    mul_div255(u16::from(d[c]), inv),
                );
            }
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
