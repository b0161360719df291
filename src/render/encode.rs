use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{RankCardError, RankCardResult};
use crate::render::frame::FrameRGBA;

/// Encode a premultiplied frame as a straight-alpha RGBA8 PNG.
///
/// The `image` PNG encoder writes no timestamps or other ambient metadata, so equal frames give
/// byte-identical output.
pub fn encode_png(frame: &FrameRGBA) -> RankCardResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| RankCardError::render("frame buffer does not match its dimensions"))?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .with_context(|| format!("encode {}x{} png", frame.width, frame.height))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
