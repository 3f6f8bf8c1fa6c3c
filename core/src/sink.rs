//! Host render sink adapter
//!
//! Views hand finished lists to the host through [`RenderSink`], after
//! selecting render state with [`emit_poly_setup`] or [`emit_line_setup`].

use std::sync::atomic::{Ordering, fence};

use colview_shared::SurfaceMode;

use crate::gfx::{
    BlendMode, CombineMode, Command, CoverageDest, CycleType, DisplayList, GeometryMode, ListRef,
    MTX_WORDS, MatrixFlags, Mtx, RenderFlags, RenderMode, Rgba, TEXTURE_SCALE_HALF, ZMode,
};

/// Words [`emit_poly_setup`] adds to a list
pub const POLY_SETUP_WORDS: usize = 8 + MTX_WORDS;
/// Words [`emit_line_setup`] adds to a list
pub const LINE_SETUP_WORDS: usize = 8 + MTX_WORDS;

/// Host draw pass a list is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    Opaque,
    Translucent,
}

impl RenderPass {
    pub fn select(translucent: bool) -> Self {
        if translucent {
            RenderPass::Translucent
        } else {
            RenderPass::Opaque
        }
    }
}

/// Host command stream the views append to
pub trait RenderSink {
    fn pass_mut(&mut self, pass: RenderPass) -> &mut DisplayList;
}

/// Opaque and translucent frame lists owned by the caller
#[derive(Debug)]
pub struct FrameLists {
    opaque: DisplayList,
    translucent: DisplayList,
}

impl FrameLists {
    /// Both passes get `capacity` words
    pub fn new(capacity: usize) -> Self {
        Self {
            opaque: DisplayList::new("frame.opaque", capacity),
            translucent: DisplayList::new("frame.translucent", capacity),
        }
    }

    pub fn pass(&self, pass: RenderPass) -> &DisplayList {
        match pass {
            RenderPass::Opaque => &self.opaque,
            RenderPass::Translucent => &self.translucent,
        }
    }

    pub fn opaque(&self) -> &DisplayList {
        &self.opaque
    }

    pub fn translucent(&self) -> &DisplayList {
        &self.translucent
    }

    /// Start a new frame, dropping references to last frame's lists
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.translucent.clear();
    }
}

impl RenderSink for FrameLists {
    fn pass_mut(&mut self, pass: RenderPass) -> &mut DisplayList {
        match pass {
            RenderPass::Opaque => &mut self.opaque,
            RenderPass::Translucent => &mut self.translucent,
        }
    }
}

/// Publish a finished list: terminate it and fence its writes
pub fn writeback(mut list: DisplayList) -> ListRef {
    list.end();
    fence(Ordering::Release);
    tracing::trace!(
        list = list.name(),
        commands = list.len(),
        words = list.used(),
        "list finalized"
    );
    ListRef::new(list)
}

/// Texture off, identity model-view, one-cycle pipeline
fn emit_common_setup(list: &mut DisplayList, geometry: GeometryMode) {
    let identity = list.alloc_data(&[Mtx::IDENTITY]);
    list.push(Command::LoadGeometryMode(geometry));
    list.push(Command::Texture {
        scale_s: TEXTURE_SCALE_HALF,
        scale_t: TEXTURE_SCALE_HALF,
        on: false,
    });
    list.push(Command::Matrix {
        data: identity,
        flags: MatrixFlags::LOAD,
    });
    list.push(Command::PipeSync);
    list.push(Command::SetCycleType(CycleType::One));
}

/// Render mode for solid debug geometry
pub fn poly_render_mode(mode: SurfaceMode, translucent: bool) -> RenderMode {
    let z_mode = if mode.is_decal() {
        ZMode::Dec
    } else if translucent {
        ZMode::Xlu
    } else {
        ZMode::Opa
    };
    if translucent {
        RenderMode {
            flags: RenderFlags::Z_CMP | RenderFlags::IM_RD | RenderFlags::FORCE_BL,
            coverage: CoverageDest::Full,
            z_mode,
            blend: BlendMode::Alpha,
        }
    } else {
        RenderMode {
            flags: RenderFlags::Z_CMP
                | RenderFlags::Z_UPD
                | RenderFlags::IM_RD
                | RenderFlags::FORCE_BL,
            coverage: CoverageDest::Clamp,
            z_mode,
            blend: BlendMode::Passthrough,
        }
    }
}

/// Select render state for primitive-colored polygons
///
/// Shaded geometry modulates the primitive color by vertex lighting; flat
/// geometry uses the primitive color as is. Translucent output takes half
/// alpha from the environment color.
pub fn emit_poly_setup(list: &mut DisplayList, mode: SurfaceMode, translucent: bool, shade: bool) {
    let (combine, geometry) = if shade {
        (
            CombineMode::ModulatePrimShadeEnvAlpha,
            GeometryMode::ZBUFFER | GeometryMode::SHADE | GeometryMode::LIGHTING,
        )
    } else {
        (CombineMode::PrimitiveEnvAlpha, GeometryMode::ZBUFFER)
    };
    let alpha = if translucent { 0x80 } else { 0xFF };

    emit_common_setup(list, geometry);
    list.push(Command::SetRenderMode(poly_render_mode(mode, translucent)));
    list.push(Command::SetCombine(combine));
    list.push(Command::SetEnvColor(Rgba::new(0xFF, 0xFF, 0xFF, alpha)));
}

/// Select render state for black antialiased lines
pub fn emit_line_setup(list: &mut DisplayList, translucent: bool) {
    let (render_mode, alpha) = if translucent {
        (RenderMode::AA_ZB_XLU_LINE, 0x80)
    } else {
        (RenderMode::AA_ZB_DEC_LINE, 0xFF)
    };

    emit_common_setup(list, GeometryMode::ZBUFFER);
    list.push(Command::SetRenderMode(render_mode));
    list.push(Command::SetCombine(CombineMode::Primitive));
    list.push(Command::SetPrimColor(Rgba::new(0, 0, 0, alpha)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poly_setup_sequence() {
        let mut list = DisplayList::new("test", POLY_SETUP_WORDS);
        emit_poly_setup(&mut list, SurfaceMode::Surface, true, true);
        assert_eq!(list.remaining(), 0);

        let cmds = list.commands();
        assert_eq!(
            cmds[0],
            Command::LoadGeometryMode(
                GeometryMode::ZBUFFER | GeometryMode::SHADE | GeometryMode::LIGHTING
            )
        );
        let Command::Matrix { data, flags } = &cmds[2] else {
            panic!("expected matrix, got {:?}", cmds[2]);
        };
        assert_eq!(*flags, MatrixFlags::LOAD);
        assert_eq!(list.matrix(*data), Mtx::IDENTITY);
        assert_eq!(cmds[3], Command::PipeSync);
        assert_eq!(cmds[4], Command::SetCycleType(CycleType::One));
        assert_eq!(cmds[6], Command::SetCombine(CombineMode::ModulatePrimShadeEnvAlpha));
        assert_eq!(cmds[7], Command::SetEnvColor(Rgba::new(0xFF, 0xFF, 0xFF, 0x80)));
    }

    #[test]
    fn test_poly_render_modes() {
        let xlu = poly_render_mode(SurfaceMode::Surface, true);
        assert_eq!(xlu.z_mode, ZMode::Xlu);
        assert_eq!(xlu.coverage, CoverageDest::Full);
        assert!(!xlu.flags.contains(RenderFlags::Z_UPD));
        assert_eq!(xlu.blend, BlendMode::Alpha);

        let opa = poly_render_mode(SurfaceMode::Surface, false);
        assert_eq!(opa.z_mode, ZMode::Opa);
        assert!(opa.flags.contains(RenderFlags::Z_UPD));
        assert_eq!(opa.blend, BlendMode::Passthrough);

        // Decal wins over the translucency-derived depth mode
        assert_eq!(poly_render_mode(SurfaceMode::Decal, true).z_mode, ZMode::Dec);
        assert_eq!(poly_render_mode(SurfaceMode::Decal, false).z_mode, ZMode::Dec);
    }

    #[test]
    fn test_flat_setup() {
        let mut list = DisplayList::new("test", POLY_SETUP_WORDS);
        emit_poly_setup(&mut list, SurfaceMode::Surface, false, false);
        let cmds = list.commands();
        assert_eq!(cmds[0], Command::LoadGeometryMode(GeometryMode::ZBUFFER));
        assert_eq!(cmds[6], Command::SetCombine(CombineMode::PrimitiveEnvAlpha));
        assert_eq!(cmds[7], Command::SetEnvColor(Rgba::WHITE));
    }

    #[test]
    fn test_line_setup() {
        let mut list = DisplayList::new("test", LINE_SETUP_WORDS);
        emit_line_setup(&mut list, false);
        assert_eq!(list.remaining(), 0);
        let cmds = list.commands();
        assert_eq!(cmds[5], Command::SetRenderMode(RenderMode::AA_ZB_DEC_LINE));
        assert_eq!(cmds[6], Command::SetCombine(CombineMode::Primitive));
        assert_eq!(cmds[7], Command::SetPrimColor(Rgba::BLACK));

        list.clear();
        emit_line_setup(&mut list, true);
        assert_eq!(
            list.commands()[5],
            Command::SetRenderMode(RenderMode::AA_ZB_XLU_LINE)
        );
        assert_eq!(list.commands()[7], Command::SetPrimColor(Rgba::new(0, 0, 0, 0x80)));
    }

    #[test]
    fn test_writeback_terminates() {
        let mut list = DisplayList::new("test", 2);
        list.push(Command::PipeSync);
        let list = writeback(list);
        assert_eq!(list.commands().last(), Some(&Command::EndDisplayList));
        assert_eq!(list.remaining(), 0);
    }

    #[test]
    fn test_frame_lists_route_passes() {
        let mut frame = FrameLists::new(4);
        frame.pass_mut(RenderPass::select(true)).push(Command::PipeSync);
        assert_eq!(frame.translucent().len(), 1);
        assert!(frame.opaque().is_empty());
        frame.clear();
        assert!(frame.pass(RenderPass::Translucent).is_empty());
    }
}
