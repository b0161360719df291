use crate::{
    assets::decode::PreparedImage,
    card::layout::MaskSource,
    compile::plan::{CardPlan, Pass, PastePass, ScenePass, SurfaceDesc, SurfaceId},
    foundation::core::Rgba8Premul,
    foundation::error::{RankCardError, RankCardResult},
    render::frame::FrameRGBA,
};

/// Decoded caller rasters available to a plan.
#[derive(Clone, Debug)]
pub struct CardInputs {
    pub background: Option<PreparedImage>,
    pub avatar: PreparedImage,
}

/// Executes the passes of a [`CardPlan`] against concrete surfaces.
pub trait PassBackend {
    fn ensure_surface(&mut self, id: SurfaceId, desc: SurfaceDesc) -> RankCardResult<()>;

    fn exec_clear(&mut self, target: SurfaceId, color: Rgba8Premul) -> RankCardResult<()>;

    fn exec_paste(&mut self, pass: &PastePass, inputs: &CardInputs) -> RankCardResult<()>;

    fn exec_scene(&mut self, pass: &ScenePass) -> RankCardResult<()>;

    fn exec_clip(&mut self, target: SurfaceId, mask: &MaskSource) -> RankCardResult<()>;

    fn readback_rgba8(&mut self, surface: SurfaceId) -> RankCardResult<FrameRGBA>;
}

pub fn execute_plan<B: PassBackend + ?Sized>(
    backend: &mut B,
    plan: &CardPlan,
    inputs: &CardInputs,
) -> RankCardResult<FrameRGBA> {
    for (idx, desc) in plan.surfaces.iter().enumerate() {
        let id = SurfaceId(
            idx.try_into()
                .map_err(|_| RankCardError::render("surface id overflow"))?,
        );
        backend.ensure_surface(id, *desc)?;
    }

    for pass in &plan.passes {
        match pass {
            Pass::Clear { target, color } => backend.exec_clear(*target, *color)?,
            Pass::Paste(p) => backend.exec_paste(p, inputs)?,
            Pass::Scene(p) => backend.exec_scene(p)?,
            Pass::Clip { target, mask } => backend.exec_clip(*target, mask)?,
        }
    }

    backend.readback_rgba8(plan.final_surface)
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
