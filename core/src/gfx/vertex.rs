//! Vertex record and color type
//!
//! `Vtx` is the 16-byte record the rasterizer consumes. The last four bytes
//! are either a signed normal plus alpha (lit geometry) or an RGBA color
//! (unlit geometry); which one is decided by the geometry mode at draw time.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 0xFF);
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack `0xRRGGBBAA`
    pub const fn from_rgba32(color: u32) -> Self {
        Self::new(
            (color >> 24) as u8,
            (color >> 16) as u8,
            (color >> 8) as u8,
            color as u8,
        )
    }

    /// Unpack `0xRRGGBB` with an explicit alpha
    pub const fn from_rgb24(color: u32, a: u8) -> Self {
        Self::new((color >> 16) as u8, (color >> 8) as u8, color as u8, a)
    }
}

/// Rasterizer vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Vtx {
    /// Object-space position
    pub ob: [i16; 3],
    pub flag: u16,
    /// Texture coordinates (unused, always zero)
    pub tc: [i16; 2],
    /// Normal xyz + alpha, or RGBA
    pub cn: [u8; 4],
}

impl Vtx {
    /// Lit vertex with a signed normal
    pub const fn with_normal(ob: [i16; 3], n: [i8; 3], alpha: u8) -> Self {
        Self {
            ob,
            flag: 0,
            tc: [0, 0],
            cn: [n[0] as u8, n[1] as u8, n[2] as u8, alpha],
        }
    }

    /// Unlit vertex with a flat color
    pub const fn with_color(ob: [i16; 3], color: Rgba) -> Self {
        Self {
            ob,
            flag: 0,
            tc: [0, 0],
            cn: [color.r, color.g, color.b, color.a],
        }
    }

    /// Normal stored in the color/normal tail
    pub fn normal(&self) -> [i8; 3] {
        [self.cn[0] as i8, self.cn[1] as i8, self.cn[2] as i8]
    }

    pub fn color(&self) -> Rgba {
        Rgba::new(self.cn[0], self.cn[1], self.cn[2], self.cn[3])
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.ob[0] as f32, self.ob[1] as f32, self.ob[2] as f32)
    }
}

/// Round a unit-space coordinate to 1/128 fixed point
pub fn unit_position(v: Vec3) -> [i16; 3] {
    let p = (v * 128.0 + 0.5).floor();
    [p.x as i16, p.y as i16, p.z as i16]
}

/// Truncate a unit vector to a signed 8-bit normal
pub fn unit_normal(v: Vec3) -> [i8; 3] {
    let n = v * 127.0;
    [n.x as i8, n.y as i8, n.z as i8]
}

/// Truncate world coordinates to a vertex position
pub fn world_position(v: Vec3) -> [i16; 3] {
    [v.x as i16, v.y as i16, v.z as i16]
}
