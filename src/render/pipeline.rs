use crate::{
    assets::decode::decode_image,
    assets::source::RasterSource,
    assets::store::AssetStore,
    card::layout::{CardStyle, LayoutConfig},
    card::model::{CardSettings, RankCard},
    compile::plan::{RenderOpts, compile_card},
    foundation::error::{RankCardError, RankCardResult},
    render::cpu::CpuBackend,
    render::encode::encode_png,
    render::frame::FrameRGBA,
    render::passes::{CardInputs, execute_plan},
};

/// Encoded caller rasters for one render.
#[derive(Clone, Copy, Debug)]
pub struct CardImages<'a> {
    /// Required when the layout has an image backdrop, ignored otherwise.
    pub background: Option<&'a [u8]>,
    pub avatar: &'a [u8],
}

/// Renders rank cards for one layout and color scheme.
///
/// Each call to [`CardRenderer::render`] owns its canvas from start to finish; the renderer holds
/// only immutable configuration, so one instance can serve any number of cards.
///
/// Pipeline:
/// 1. decode the caller's rasters
/// 2. [`compile_card`](crate::compile_card)
/// 3. [`execute_plan`](crate::execute_plan) on a [`CpuBackend`](crate::CpuBackend)
/// 4. [`encode_png`](crate::encode_png)
#[derive(Clone, Debug)]
pub struct CardRenderer {
    assets: AssetStore,
    layout: LayoutConfig,
    settings: CardSettings,
}

impl CardRenderer {
    pub fn new(
        assets: AssetStore,
        layout: LayoutConfig,
        settings: CardSettings,
    ) -> RankCardResult<Self> {
        layout.validate()?;
        Ok(Self {
            assets,
            layout,
            settings,
        })
    }

    /// Renderer for a built-in design.
    pub fn with_style(
        assets: AssetStore,
        style: CardStyle,
        settings: CardSettings,
    ) -> RankCardResult<Self> {
        Self::new(assets, LayoutConfig::preset(style), settings)
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn settings(&self) -> &CardSettings {
        &self.settings
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Render `card` to PNG bytes.
    #[tracing::instrument(skip_all, fields(username = %card.username, resize = opts.resize_percent))]
    pub fn render(
        &self,
        card: &RankCard,
        images: CardImages<'_>,
        opts: RenderOpts,
    ) -> RankCardResult<Vec<u8>> {
        let frame = self.render_frame(card, images, opts)?;
        let png = encode_png(&frame)?;
        tracing::debug!(
            width = frame.width,
            height = frame.height,
            bytes = png.len(),
            "encoded card"
        );
        Ok(png)
    }

    /// Render `card` without encoding. Pixels are premultiplied RGBA8.
    pub fn render_frame(
        &self,
        card: &RankCard,
        images: CardImages<'_>,
        opts: RenderOpts,
    ) -> RankCardResult<FrameRGBA> {
        let background = if self.layout.needs_background() {
            let bytes = images.background.ok_or_else(|| {
                RankCardError::validation("this layout needs a background image")
            })?;
            Some(decode_image(bytes)?)
        } else {
            None
        };
        let avatar = decode_image(images.avatar)?;

        let plan = compile_card(card, &self.settings, &self.layout, opts)?;
        let inputs = CardInputs { background, avatar };
        let mut backend = CpuBackend::new(&self.assets);
        execute_plan(&mut backend, &plan, &inputs)
    }

    /// Fetch the rasters through `source`, then [`render`](Self::render).
    pub fn render_from_source(
        &self,
        source: &dyn RasterSource,
        card: &RankCard,
        background: Option<&str>,
        avatar: &str,
        opts: RenderOpts,
    ) -> RankCardResult<Vec<u8>> {
        let background = match background {
            Some(loc) if self.layout.needs_background() => Some(source.fetch(loc)?),
            _ => None,
        };
        let avatar = source.fetch(avatar)?;
        self.render(
            card,
            CardImages {
                background: background.as_deref(),
                avatar: &avatar,
            },
            opts,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
