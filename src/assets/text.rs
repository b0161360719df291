use std::sync::Arc;

use crate::foundation::error::{RankCardError, RankCardResult};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// A single shaped line plus the font needed to rasterize its glyphs.
pub(crate) struct ShapedLine {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
    pub(crate) size_px: f32,
}

impl ShapedLine {
    /// Advance width of the line in pixels.
    pub(crate) fn width(&self) -> f32 {
        self.layout.width()
    }
}

/// Builds Parley layouts from raw font bytes.
///
/// Fonts are registered on first use and keyed by the address of their shared buffer, so one
/// engine can shape every label of a card without re-registering the same face.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: Vec<(Arc<Vec<u8>>, String)>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            // Only registered card fonts take part in shaping, so glyph ids always belong to the
            // face the backend rasterizes with and output never depends on installed fonts.
            font_ctx: parley::FontContext {
                collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                    shared: false,
                    system_fonts: false,
                }),
                source_cache: parley::fontique::SourceCache::default(),
            },
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
        }
    }

    fn family_for(&mut self, font_bytes: &Arc<Vec<u8>>) -> RankCardResult<String> {
        if let Some((_, name)) = self
            .families
            .iter()
            .find(|(bytes, _)| Arc::ptr_eq(bytes, font_bytes))
        {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font_bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            RankCardError::invalid_asset("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RankCardError::invalid_asset("registered font family has no name"))?
            .to_string();

        self.families
            .push((Arc::clone(font_bytes), family_name.clone()));
        Ok(family_name)
    }

    /// Shape `text` as one unwrapped line.
    pub(crate) fn shape_line(
        &mut self,
        text: &str,
        font_bytes: &Arc<Vec<u8>>,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> RankCardResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RankCardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
            0,
        );
        Ok(ShapedLine {
            layout,
            font,
            size_px,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
