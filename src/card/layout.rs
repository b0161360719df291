use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assets::color::ColorDef;
use crate::card::progress::MIN_FILL_PX;
use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{RankCardError, RankCardResult};

/// Built-in card designs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStyle {
    /// Background banner over a recolorable panel, circular avatar, rounded frame.
    Classic,
    /// Solid background color with an inset dark panel.
    Solid,
    /// Background image under a translucent dark panel.
    Shade,
}

impl CardStyle {
    pub const ALL: [CardStyle; 3] = [CardStyle::Classic, CardStyle::Solid, CardStyle::Shade];

    pub fn name(self) -> &'static str {
        match self {
            CardStyle::Classic => "classic",
            CardStyle::Solid => "solid",
            CardStyle::Shade => "shade",
        }
    }
}

impl FromStr for CardStyle {
    type Err = RankCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RankCardError::validation(format!(
                    "unknown card style \"{s}\" (expected classic, solid or shade)"
                ))
            })
    }
}

/// Generated mask geometry, filling the whole mask area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaskShape {
    Rect,
    Ellipse,
    RoundedRect { radius: f64 },
}

/// Where a mask comes from. Asset masks are read as luminance, shapes as coverage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaskSource {
    Shape { shape: MaskShape },
    Asset { path: String },
}

impl MaskSource {
    pub fn ellipse() -> Self {
        Self::Shape {
            shape: MaskShape::Ellipse,
        }
    }

    pub fn rounded(radius: f64) -> Self {
        Self::Shape {
            shape: MaskShape::RoundedRect { radius },
        }
    }
}

/// How the backdrop of the canvas is produced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backdrop {
    /// Resize the background raster into a band at the top-left of a transparent canvas.
    Image { width: u32, height: u32 },
    /// Fill the canvas with [`CardSettings::background_color`](crate::CardSettings).
    Color,
}

/// Color that either follows a settings field or is fixed by the layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Fill {
    CardColor,
    Fixed(ColorDef),
    Transparent,
}

/// Rectangle drawn over the backdrop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub rect: Rect,
    #[serde(default)]
    pub radius: f64,
    pub fill: Fill,
}

/// Decorative image art composited over the backdrop using its own alpha.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub path: String,
    /// Replace opaque black pixels of the art with the card color.
    #[serde(default)]
    pub recolor: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarSlot {
    pub x: i32,
    pub y: i32,
    pub size: u32,
    pub mask: MaskSource,
}

/// Horizontal anchoring of a label relative to its `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// `x` is the left edge.
    Start,
    /// `x` is the right edge.
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSlot {
    pub x: f64,
    pub y: f64,
    pub size_px: f32,
    pub anchor: TextAnchor,
}

/// Which wording the level label uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelLabel {
    /// `LEVEL - 12`
    Dashed,
    /// `LEVEL: 12       RANK: 3`
    WithRank,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStroke {
    /// Outline thickness on each side of the glyph edge.
    pub width_px: f32,
    pub color: ColorDef,
}

/// How the bar surface lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarComposite {
    /// Overwrite the covered pixels, backing included.
    Replace,
    /// Blend using the bar surface's own alpha.
    SourceAlpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarSlot {
    pub x: i32,
    pub y: i32,
    /// Size of the offscreen bar surface.
    pub surface: Canvas,
    pub backing: Fill,
    pub track_width: f64,
    pub track_height: f64,
    pub radius: f64,
    pub track_color: ColorDef,
    #[serde(default = "default_min_fill")]
    pub min_fill_px: f64,
    pub composite: BarComposite,
}

fn default_min_fill() -> f64 {
    MIN_FILL_PX
}

/// Final clip and downscale applied to the composed canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub mask: MaskSource,
    pub output: Canvas,
}

/// Immutable geometry, font and mask configuration of one card design.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub canvas: Canvas,
    pub backdrop: Backdrop,
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(default)]
    pub overlay: Option<Overlay>,
    pub avatar: AvatarSlot,
    /// Font path relative to the asset root.
    pub font: String,
    pub username: TextSlot,
    pub level: TextSlot,
    pub level_label: LevelLabel,
    pub exp: TextSlot,
    pub stroke: Option<TextStroke>,
    pub bar: BarSlot,
    #[serde(default)]
    pub frame: Option<FrameSpec>,
}

/// Font every preset points at.
pub const DEFAULT_FONT: &str = "levelfont.otf";

const SLATE: ColorDef = ColorDef::rgba(47.0 / 255.0, 49.0 / 255.0, 54.0 / 255.0, 1.0);

fn black_outline() -> Option<TextStroke> {
    Some(TextStroke {
        width_px: 1.0,
        color: ColorDef::BLACK,
    })
}

impl LayoutConfig {
    pub fn preset(style: CardStyle) -> Self {
        match style {
            CardStyle::Classic => Self::classic(),
            CardStyle::Solid => Self::solid(),
            CardStyle::Shade => Self::shade(),
        }
    }

    /// 638x327 working canvas, downscaled to 505x259 through a rounded frame.
    pub fn classic() -> Self {
        let half = 327.0 / 2.0;
        Self {
            canvas: Canvas {
                width: 638,
                height: 327,
            },
            backdrop: Backdrop::Image {
                width: 638,
                height: 159,
            },
            panels: vec![Panel {
                rect: Rect::new(0.0, 159.0, 638.0, 327.0),
                radius: 0.0,
                fill: Fill::CardColor,
            }],
            overlay: None,
            avatar: AvatarSlot {
                x: 13,
                y: 65,
                size: 170,
                mask: MaskSource::ellipse(),
            },
            font: DEFAULT_FONT.to_string(),
            username: TextSlot {
                x: 205.0,
                y: half + 20.0,
                size_px: 40.0,
                anchor: TextAnchor::Start,
            },
            level: TextSlot {
                x: 197.0,
                y: half + 125.0,
                size_px: 30.0,
                anchor: TextAnchor::Start,
            },
            level_label: LevelLabel::Dashed,
            exp: TextSlot {
                x: 638.0 - 50.0,
                y: half + 125.0,
                size_px: 30.0,
                anchor: TextAnchor::End,
            },
            stroke: black_outline(),
            bar: BarSlot {
                x: 190,
                y: 235,
                surface: Canvas {
                    width: 490,
                    height: 51,
                },
                backing: Fill::CardColor,
                track_width: 420.0,
                track_height: 50.0,
                radius: 30.0,
                track_color: ColorDef::from_rgba8(255, 255, 255, 50),
                min_fill_px: MIN_FILL_PX,
                composite: BarComposite::Replace,
            },
            frame: Some(FrameSpec {
                mask: MaskSource::rounded(30.0),
                output: Canvas {
                    width: 505,
                    height: 259,
                },
            }),
        }
    }

    /// 1000x333 card on a solid background color.
    pub fn solid() -> Self {
        Self {
            canvas: Canvas {
                width: 1000,
                height: 333,
            },
            backdrop: Backdrop::Color,
            panels: vec![Panel {
                rect: Rect::new(25.0, 25.0, 975.0, 308.0),
                radius: 0.0,
                fill: Fill::Fixed(SLATE),
            }],
            overlay: None,
            avatar: AvatarSlot {
                x: 53,
                y: 73 / 2,
                size: 260,
                mask: MaskSource::rounded(40.0),
            },
            font: DEFAULT_FONT.to_string(),
            username: TextSlot {
                x: 330.0,
                y: 130.0,
                size_px: 50.0,
                anchor: TextAnchor::Start,
            },
            level: TextSlot {
                x: 950.0,
                y: 40.0,
                size_px: 50.0,
                anchor: TextAnchor::End,
            },
            level_label: LevelLabel::WithRank,
            exp: TextSlot {
                x: 950.0,
                y: 130.0,
                size_px: 50.0,
                anchor: TextAnchor::End,
            },
            stroke: black_outline(),
            bar: BarSlot {
                x: 330,
                y: 235,
                surface: Canvas {
                    width: 620,
                    height: 51,
                },
                backing: Fill::Fixed(SLATE),
                track_width: 619.0,
                track_height: 50.0,
                radius: 30.0,
                track_color: ColorDef::from_rgba8(255, 255, 255, 50),
                min_fill_px: MIN_FILL_PX,
                composite: BarComposite::Replace,
            },
            frame: None,
        }
    }

    /// 1000x333 card over the background image with a translucent panel.
    pub fn shade() -> Self {
        let mut layout = Self::solid();
        layout.backdrop = Backdrop::Image {
            width: 1000,
            height: 333,
        };
        layout.panels = vec![Panel {
            rect: Rect::new(25.0, 25.0, 975.0, 308.0),
            radius: 0.0,
            fill: Fill::Fixed(ColorDef::from_rgba8(0, 0, 0, 200)),
        }];
        layout.bar.backing = Fill::Transparent;
        layout.bar.track_color = ColorDef::from_rgba8(255, 255, 255, 225);
        layout.bar.composite = BarComposite::SourceAlpha;
        layout
    }

    /// `true` when rendering needs a background raster.
    pub fn needs_background(&self) -> bool {
        matches!(self.backdrop, Backdrop::Image { .. })
    }

    /// Size of the image the plan produces before any percentage rescale.
    pub fn output_canvas(&self) -> Canvas {
        self.frame
            .as_ref()
            .map(|f| f.output)
            .unwrap_or(self.canvas)
    }

    pub fn validate(&self) -> RankCardResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if let Backdrop::Image { width, height } = self.backdrop {
            Canvas::new(width, height)?;
        }
        if self.avatar.size == 0 {
            return Err(RankCardError::validation("avatar size must be > 0"));
        }
        for slot in [&self.username, &self.level, &self.exp] {
            if !slot.size_px.is_finite() || slot.size_px <= 0.0 {
                return Err(RankCardError::validation(
                    "label size_px must be finite and > 0",
                ));
            }
        }
        if let Some(stroke) = self.stroke {
            if !stroke.width_px.is_finite() || stroke.width_px < 0.0 {
                return Err(RankCardError::validation(
                    "stroke width must be finite and >= 0",
                ));
            }
        }
        Canvas::new(self.bar.surface.width, self.bar.surface.height)?;
        if !(self.bar.track_width > 0.0 && self.bar.track_height > 0.0) {
            return Err(RankCardError::validation(
                "bar track must have positive size",
            ));
        }
        if !(self.bar.min_fill_px.is_finite() && self.bar.min_fill_px >= 0.0) {
            return Err(RankCardError::validation("bar min_fill_px must be >= 0"));
        }
        if let Some(frame) = &self.frame {
            Canvas::new(frame.output.width, frame.output.height)?;
        }
        if self.font.trim().is_empty() {
            return Err(RankCardError::validation("layout font must be set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/layout.rs"]
mod tests;
