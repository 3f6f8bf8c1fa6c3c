//! Render state vocabulary
//!
//! Geometry-mode bits, the blender/depth render mode and the color combiner
//! presets used by the debug views. Bit values follow the rasterizer's
//! command encoding so a sink can forward them untouched.

use bitflags::bitflags;

bitflags! {
    /// Vertex pipeline state toggled by geometry-mode commands
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GeometryMode: u32 {
        const ZBUFFER = 0x0000_0001;
        const SHADE = 0x0000_0004;
        const CULL_FRONT = 0x0000_0200;
        const CULL_BACK = 0x0000_0400;
        const FOG = 0x0001_0000;
        const LIGHTING = 0x0002_0000;
        const SHADING_SMOOTH = 0x0020_0000;
    }
}

bitflags! {
    /// Blender and depth flags of a render mode
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderFlags: u32 {
        const AA_EN = 0x0008;
        const Z_CMP = 0x0010;
        const Z_UPD = 0x0020;
        const IM_RD = 0x0040;
        const CVG_X_ALPHA = 0x1000;
        const ALPHA_CVG_SEL = 0x2000;
        const FORCE_BL = 0x4000;
    }
}

/// Coverage destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum CoverageDest {
    #[default]
    Clamp = 0x0000,
    Wrap = 0x0100,
    Full = 0x0200,
    Save = 0x0300,
}

/// Depth comparison mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ZMode {
    /// Opaque surfaces
    #[default]
    Opa = 0x0000,
    /// Interpenetrating surfaces
    Inter = 0x0400,
    /// Translucent surfaces
    Xlu = 0x0800,
    /// Decals on coplanar surfaces
    Dec = 0x0C00,
}

/// Blender equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Output the incoming color unchanged
    #[default]
    Passthrough,
    /// `in * a + mem * (1 - a)`
    Alpha,
}

impl BlendMode {
    /// Blender selector bits for both cycles
    pub fn cycle_bits(self) -> (u32, u32) {
        // (p, a, m, b) selectors: p/m 0 = input color, 1 = memory color;
        // a 0 = input alpha, 3 = zero; b 0 = 1 - a, 2 = one.
        let (p, a, m, b): (u32, u32, u32, u32) = match self {
            BlendMode::Passthrough => (0, 3, 0, 2),
            BlendMode::Alpha => (0, 0, 1, 0),
        };
        (
            p << 30 | a << 26 | m << 22 | b << 18,
            p << 28 | a << 24 | m << 20 | b << 16,
        )
    }
}

/// Complete blender/depth render mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderMode {
    pub flags: RenderFlags,
    pub coverage: CoverageDest,
    pub z_mode: ZMode,
    pub blend: BlendMode,
}

impl RenderMode {
    /// Antialiased, depth-tested translucent lines
    pub const AA_ZB_XLU_LINE: Self = Self {
        flags: RenderFlags::AA_EN
            .union(RenderFlags::Z_CMP)
            .union(RenderFlags::IM_RD)
            .union(RenderFlags::CVG_X_ALPHA)
            .union(RenderFlags::ALPHA_CVG_SEL)
            .union(RenderFlags::FORCE_BL),
        coverage: CoverageDest::Clamp,
        z_mode: ZMode::Xlu,
        blend: BlendMode::Alpha,
    };

    /// Antialiased, depth-tested decal lines
    pub const AA_ZB_DEC_LINE: Self = Self {
        flags: RenderFlags::AA_EN
            .union(RenderFlags::Z_CMP)
            .union(RenderFlags::IM_RD)
            .union(RenderFlags::CVG_X_ALPHA)
            .union(RenderFlags::ALPHA_CVG_SEL)
            .union(RenderFlags::FORCE_BL),
        coverage: CoverageDest::Save,
        z_mode: ZMode::Dec,
        blend: BlendMode::Alpha,
    };

    /// Encoded render mode words for cycle 1 and cycle 2
    pub fn cycle_bits(&self) -> (u32, u32) {
        let base = self.flags.bits() | self.coverage as u32 | self.z_mode as u32;
        let (c1, c2) = self.blend.cycle_bits();
        (base | c1, base | c2)
    }
}

/// Pipeline cycle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CycleType {
    #[default]
    One,
    Two,
    Copy,
    Fill,
}

/// Color combiner presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// rgb = primitive * shade, alpha = environment
    ModulatePrimShadeEnvAlpha,
    /// rgb = primitive, alpha = environment
    PrimitiveEnvAlpha,
    /// rgba = primitive
    Primitive,
}
