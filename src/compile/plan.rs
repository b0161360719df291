use crate::{
    assets::color::ColorDef,
    card::layout::{
        Backdrop, BarComposite, Fill, LayoutConfig, LevelLabel, MaskSource, TextAnchor, TextSlot,
    },
    card::model::{CardSettings, RankCard},
    foundation::core::{Canvas, Rect, Rgba8Premul},
    foundation::error::{RankCardError, RankCardResult},
};

/// Options applied after the layout has been composed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Percentage rescale of the finished card; `100` keeps the layout size.
    pub resize_percent: u32,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            resize_percent: 100,
        }
    }
}

#[derive(Clone, Debug)]
/// Backend-agnostic compositing plan for one card.
///
/// A plan consists of:
/// - surface declarations (`surfaces`), all starting fully transparent
/// - a sequence of passes (`passes`) executed in order
/// - a declared final surface (`final_surface`)
pub struct CardPlan {
    pub surfaces: Vec<SurfaceDesc>,
    pub passes: Vec<Pass>,
    pub final_surface: SurfaceId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Identifier for a surface declared in [`CardPlan::surfaces`].
pub struct SurfaceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Surface declaration; every surface is premultiplied RGBA8.
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
}

impl SurfaceDesc {
    pub fn canvas(self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Clone, Debug)]
/// A single pass in a [`CardPlan`].
pub enum Pass {
    /// Overwrite every pixel of `target` with `color`.
    Clear {
        target: SurfaceId,
        color: Rgba8Premul,
    },
    Paste(PastePass),
    Scene(ScenePass),
    /// Multiply every pixel of `target` by the mask weight at that pixel.
    Clip { target: SurfaceId, mask: MaskSource },
}

/// Decoded caller rasters a plan may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageInput {
    Background,
    Avatar,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PasteSource {
    Input(ImageInput),
    Surface(SurfaceId),
    /// Image art from the asset store, optionally with opaque black replaced by a color.
    Asset {
        path: String,
        recolor: Option<Rgba8Premul>,
    },
}

#[derive(Clone, Debug, PartialEq)]
/// How pasted pixels combine with the destination.
pub enum PasteMode {
    /// Destination pixels under the pasted rect are overwritten.
    Replace,
    /// Source-over using the source alpha.
    SourceAlpha,
    /// Per-pixel interpolation between destination and source by the mask weight.
    Mask(MaskSource),
}

#[derive(Clone, Debug)]
/// Resize `source` to `width`x`height` and place it at (`x`, `y`) on `target`.
pub struct PastePass {
    pub target: SurfaceId,
    pub source: PasteSource,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub mode: PasteMode,
    /// Composite the source over this opaque color before pasting. Sources without an alpha
    /// channel skip this step.
    pub flatten: Option<Rgba8Premul>,
}

#[derive(Clone, Debug)]
/// Vector draw operations, source-over onto `target`.
pub struct ScenePass {
    pub target: SurfaceId,
    pub ops: Vec<DrawOp>,
}

/// What a draw op represents on the card. Backends ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawRole {
    Panel,
    BarTrack,
    BarFill,
    Username,
    Level,
    Exp,
}

#[derive(Clone, Debug)]
pub enum DrawOp {
    FillRoundedRect {
        role: DrawRole,
        rect: Rect,
        radius: f64,
        /// Straight (non-premultiplied) RGBA8.
        color: [u8; 4],
    },
    Text(TextOp),
}

impl DrawOp {
    pub fn role(&self) -> DrawRole {
        match self {
            DrawOp::FillRoundedRect { role, .. } => *role,
            DrawOp::Text(t) => t.role,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TextOp {
    pub role: DrawRole,
    pub text: String,
    /// Font path relative to the asset root.
    pub font: String,
    /// Anchor point; `y` is the top of the line box.
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub size_px: f32,
    /// Straight (non-premultiplied) RGBA8.
    pub color: [u8; 4],
    /// Outline drawn under the fill: (width on each side, straight RGBA8).
    pub stroke: Option<(f32, [u8; 4])>,
}

impl CardPlan {
    pub fn desc(&self, id: SurfaceId) -> RankCardResult<SurfaceDesc> {
        self.surfaces
            .get(id.0 as usize)
            .copied()
            .ok_or_else(|| RankCardError::render(format!("undeclared surface {}", id.0)))
    }

    /// All scene draw ops in execution order.
    pub fn draw_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.passes
            .iter()
            .filter_map(|p| match p {
                Pass::Scene(s) => Some(s.ops.iter()),
                _ => None,
            })
            .flatten()
    }

    /// `true` when any scene pass draws an op with this role.
    pub fn draws(&self, role: DrawRole) -> bool {
        self.draw_ops().any(|op| op.role() == role)
    }

    /// Width of the experience fill rectangle, when one is drawn.
    pub fn bar_fill_width(&self) -> Option<f64> {
        self.draw_ops().find_map(|op| match op {
            DrawOp::FillRoundedRect {
                role: DrawRole::BarFill,
                rect,
                ..
            } => Some(rect.width()),
            _ => None,
        })
    }

    pub fn output_canvas(&self) -> RankCardResult<Canvas> {
        Ok(self.desc(self.final_surface)?.canvas())
    }
}

struct PlanBuilder {
    surfaces: Vec<SurfaceDesc>,
    passes: Vec<Pass>,
}

impl PlanBuilder {
    fn surface(&mut self, canvas: Canvas) -> RankCardResult<SurfaceId> {
        let id = u32::try_from(self.surfaces.len())
            .map_err(|_| RankCardError::render("surface id overflow"))?;
        self.surfaces.push(SurfaceDesc {
            width: canvas.width,
            height: canvas.height,
        });
        Ok(SurfaceId(id))
    }

    fn push(&mut self, pass: Pass) {
        self.passes.push(pass);
    }

    /// Copy `src` into a new surface of size `to`.
    fn resized(&mut self, src: SurfaceId, to: Canvas) -> RankCardResult<SurfaceId> {
        let dst = self.surface(to)?;
        self.push(Pass::Paste(PastePass {
            target: dst,
            source: PasteSource::Surface(src),
            x: 0,
            y: 0,
            width: to.width,
            height: to.height,
            mode: PasteMode::Replace,
            flatten: None,
        }));
        Ok(dst)
    }
}

fn resolve_fill(fill: Fill, settings: &CardSettings) -> Option<ColorDef> {
    match fill {
        Fill::CardColor => Some(settings.card_color),
        Fill::Fixed(c) => Some(c),
        Fill::Transparent => None,
    }
}

fn text_op(
    role: DrawRole,
    text: String,
    slot: &TextSlot,
    layout: &LayoutConfig,
    settings: &CardSettings,
) -> DrawOp {
    DrawOp::Text(TextOp {
        role,
        text,
        font: layout.font.clone(),
        x: slot.x,
        y: slot.y,
        anchor: slot.anchor,
        size_px: slot.size_px,
        color: settings.text_color.to_rgba8(),
        stroke: layout
            .stroke
            .filter(|s| s.width_px > 0.0)
            .map(|s| (s.width_px, s.color.to_rgba8())),
    })
}

/// Compile a card into a [`CardPlan`]. Pure; touches no pixels and no files.
#[tracing::instrument(skip_all, fields(username = %card.username, level = card.level))]
pub fn compile_card(
    card: &RankCard,
    settings: &CardSettings,
    layout: &LayoutConfig,
    opts: RenderOpts,
) -> RankCardResult<CardPlan> {
    layout.validate()?;
    let progress = card.progress()?;
    if opts.resize_percent == 0 {
        return Err(RankCardError::validation("resize_percent must be > 0"));
    }

    let mut b = PlanBuilder {
        surfaces: Vec::new(),
        passes: Vec::new(),
    };
    let main = b.surface(layout.canvas)?;

    match layout.backdrop {
        Backdrop::Image { width, height } => b.push(Pass::Paste(PastePass {
            target: main,
            source: PasteSource::Input(ImageInput::Background),
            x: 0,
            y: 0,
            width,
            height,
            mode: PasteMode::Replace,
            flatten: None,
        })),
        Backdrop::Color => b.push(Pass::Clear {
            target: main,
            color: settings.background_color.to_rgba8_premul(),
        }),
    }

    let panel_ops: Vec<DrawOp> = layout
        .panels
        .iter()
        .filter_map(|panel| {
            resolve_fill(panel.fill, settings).map(|c| DrawOp::FillRoundedRect {
                role: DrawRole::Panel,
                rect: panel.rect,
                radius: panel.radius,
                color: c.to_rgba8(),
            })
        })
        .collect();
    if !panel_ops.is_empty() {
        b.push(Pass::Scene(ScenePass {
            target: main,
            ops: panel_ops,
        }));
    }

    if let Some(overlay) = &layout.overlay {
        b.push(Pass::Paste(PastePass {
            target: main,
            source: PasteSource::Asset {
                path: overlay.path.clone(),
                recolor: overlay
                    .recolor
                    .then(|| settings.card_color.to_rgba8_premul()),
            },
            x: 0,
            y: 0,
            width: layout.canvas.width,
            height: layout.canvas.height,
            mode: PasteMode::SourceAlpha,
            flatten: None,
        }));
    }

    let level_text = match layout.level_label {
        LevelLabel::Dashed => card.dashed_level_label(),
        LevelLabel::WithRank => card.level_rank_label(),
    };
    b.push(Pass::Scene(ScenePass {
        target: main,
        ops: vec![
            text_op(
                DrawRole::Username,
                card.username.clone(),
                &layout.username,
                layout,
                settings,
            ),
            text_op(DrawRole::Level, level_text, &layout.level, layout, settings),
            text_op(DrawRole::Exp, card.exp_label(), &layout.exp, layout, settings),
        ],
    }));

    // Labels that reach into the avatar slot end up underneath the avatar.
    b.push(Pass::Paste(PastePass {
        target: main,
        source: PasteSource::Input(ImageInput::Avatar),
        x: layout.avatar.x,
        y: layout.avatar.y,
        width: layout.avatar.size,
        height: layout.avatar.size,
        mode: PasteMode::Mask(layout.avatar.mask.clone()),
        flatten: Some(Rgba8Premul::opaque_black()),
    }));

    let bar = &layout.bar;
    let bar_surface = b.surface(bar.surface)?;
    if let Some(backing) = resolve_fill(bar.backing, settings) {
        b.push(Pass::Clear {
            target: bar_surface,
            color: backing.to_rgba8_premul(),
        });
    }
    let mut bar_ops = vec![DrawOp::FillRoundedRect {
        role: DrawRole::BarTrack,
        rect: Rect::new(0.0, 0.0, bar.track_width, bar.track_height),
        radius: bar.radius,
        color: bar.track_color.to_rgba8(),
    }];
    if progress.is_empty() {
        tracing::debug!("no experience yet, skipping bar fill");
    } else {
        let fill_w = progress.fill_width(bar.track_width, bar.min_fill_px);
        bar_ops.push(DrawOp::FillRoundedRect {
            role: DrawRole::BarFill,
            rect: Rect::new(0.0, 0.0, fill_w, bar.track_height),
            radius: bar.radius,
            color: settings.bar_color.to_rgba8(),
        });
    }
    b.push(Pass::Scene(ScenePass {
        target: bar_surface,
        ops: bar_ops,
    }));
    b.push(Pass::Paste(PastePass {
        target: main,
        source: PasteSource::Surface(bar_surface),
        x: bar.x,
        y: bar.y,
        width: bar.surface.width,
        height: bar.surface.height,
        mode: match bar.composite {
            BarComposite::Replace => PasteMode::Replace,
            BarComposite::SourceAlpha => PasteMode::SourceAlpha,
        },
        flatten: None,
    }));

    let mut out = main;
    if let Some(frame) = &layout.frame {
        b.push(Pass::Clip {
            target: main,
            mask: frame.mask.clone(),
        });
        out = b.resized(main, frame.output)?;
    }

    if opts.resize_percent != 100 {
        let current = b.surfaces[out.0 as usize].canvas();
        out = b.resized(out, current.scaled_percent(opts.resize_percent)?)?;
    }

    tracing::debug!(
        passes = b.passes.len(),
        surfaces = b.surfaces.len(),
        "compiled card plan"
    );
    Ok(CardPlan {
        surfaces: b.surfaces,
        passes: b.passes,
        final_surface: out,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
