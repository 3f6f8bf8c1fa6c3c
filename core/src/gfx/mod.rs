//! Display list encoding
//!
//! The command vocabulary, vertex and matrix formats, and the fixed-capacity
//! [`DisplayList`] every view writes into.

mod command;
mod display_list;
mod matrix;
mod render_mode;
mod vertex;

pub use command::{Command, DataRef, MAX_VERTEX_LOAD, MatrixFlags, TEXTURE_SCALE_HALF};
pub use display_list::{DisplayList, ListCursor, ListRef, Slot};
pub use matrix::Mtx;
pub use render_mode::{
    BlendMode, CombineMode, CoverageDest, CycleType, GeometryMode, RenderFlags, RenderMode, ZMode,
};
pub use vertex::{Rgba, Vtx, unit_normal, unit_position, world_position};

/// Words taken by one vertex record in a list's data region
pub const VTX_WORDS: usize = std::mem::size_of::<Vtx>() / 8;

/// Words taken by one matrix in a list's data region
pub const MTX_WORDS: usize = std::mem::size_of::<Mtx>() / 8;
