//! Rankcard composes "rank cards": raster images showing a user's avatar, name, level, rank and
//! an experience bar, ready to embed in a chat message.
//!
//! # Pipeline overview
//!
//! 1. **Compile**: `RankCard + CardSettings + LayoutConfig -> CardPlan` (passes over explicit surfaces)
//! 2. **Execute**: `CardPlan -> FrameRGBA` through a [`PassBackend`] (the CPU backend rasterizes
//!    shapes and glyphs with `vello_cpu`)
//! 3. **Encode**: `FrameRGBA -> PNG bytes`
//!
//! [`CardRenderer`] runs all three steps for one layout.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs and asset files give byte-identical PNGs.
//! - **No network IO**: rasters arrive as bytes, or through a caller-supplied [`RasterSource`].
//! - **Premultiplied RGBA8** internally; encoded output is straight alpha.
#![forbid(unsafe_code)]

mod assets;
mod card;
mod compile;
mod foundation;
mod render;

pub use assets::color::ColorDef;
pub use assets::decode::{PreparedImage, decode_image};
pub use assets::source::{FsSource, MemorySource, RasterSource};
pub use assets::store::{AssetStore, normalize_rel_path};
pub use card::layout::{
    AvatarSlot, Backdrop, BarComposite, BarSlot, CardStyle, DEFAULT_FONT, Fill, FrameSpec,
    LayoutConfig, LevelLabel, MaskShape, MaskSource, Overlay, Panel, TextAnchor, TextSlot,
    TextStroke,
};
pub use card::model::{CardSettings, RankCard};
pub use card::number::abbreviate;
pub use card::progress::{MIN_FILL_PX, ProgressFraction};
pub use compile::plan::{
    CardPlan, DrawOp, DrawRole, ImageInput, Pass, PasteMode, PastePass, PasteSource, RenderOpts,
    ScenePass, SurfaceDesc, SurfaceId, TextOp, compile_card,
};
pub use foundation::core::{Canvas, Point, Rect, Rgba8Premul};
pub use foundation::error::{RankCardError, RankCardResult};
pub use render::cpu::CpuBackend;
pub use render::encode::encode_png;
pub use render::frame::FrameRGBA;
pub use render::passes::{CardInputs, PassBackend, execute_plan};
pub use render::pipeline::{CardImages, CardRenderer};
