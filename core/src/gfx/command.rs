//! Display list commands
//!
//! One `Command` occupies one word of list capacity. Bulk data (vertex arrays,
//! matrices) lives in the list's auxiliary region and is referenced through a
//! [`DataRef`].

use bitflags::bitflags;

use super::display_list::ListRef;
use super::render_mode::{CombineMode, CycleType, GeometryMode, RenderMode};
use super::vertex::Rgba;

/// Maximum vertices a single vertex-load command may upload
pub const MAX_VERTEX_LOAD: usize = 32;

/// `0.5` in unsigned 0.16 fixed point
pub const TEXTURE_SCALE_HALF: u16 = 0x8000;

bitflags! {
    /// Matrix load behavior
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatrixFlags: u8 {
        /// Replace the current matrix instead of multiplying onto it
        const LOAD = 0x02;
        /// Push the current matrix before loading
        const PUSH = 0x01;
        /// Target the projection stack instead of model-view
        const PROJECTION = 0x04;
    }
}

/// Location of a blob in a list's auxiliary region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataRef {
    /// Start, in 8-byte words
    pub offset: u32,
    /// Length in bytes
    pub len: u32,
}

/// Rasterizer command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Placeholder written by `reserve_slot`
    NoOp,

    SetGeometryMode(GeometryMode),
    ClearGeometryMode(GeometryMode),
    /// Replace the whole geometry mode
    LoadGeometryMode(GeometryMode),
    Texture {
        scale_s: u16,
        scale_t: u16,
        on: bool,
    },
    Matrix {
        data: DataRef,
        flags: MatrixFlags,
    },
    /// Pop the model-view stack
    PopMatrix,

    PipeSync,
    SetCycleType(CycleType),
    SetRenderMode(RenderMode),
    SetCombine(CombineMode),
    SetPrimColor(Rgba),
    SetEnvColor(Rgba),

    /// Upload `count` vertices into vertex cache slots `v0..v0 + count`
    Vertex {
        data: DataRef,
        count: u8,
        v0: u8,
    },
    Triangle1([u8; 3]),
    Triangle2([u8; 3], [u8; 3]),
    Line3d(u8, u8),

    /// Call another list, then continue with the next command
    DisplayList(ListRef),
    EndDisplayList,

    /// Swap in the line-drawing microcode
    LoadLineMicrocode,
    /// Swap the polygon microcode back in
    UnloadLineMicrocode,
    /// Restore the host's scene lighting after a view changed it
    RestoreLighting,
}
