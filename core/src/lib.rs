//! Colview Core - debug-view display list generation
//!
//! Turns host game data (collision meshes, actor hitboxes, waypoint paths and
//! water boxes) into display lists the host appends to its render passes.
//!
//! # Architecture
//!
//! - [`gfx`] - Command vocabulary, vertex and matrix records, fixed-capacity lists
//! - [`writer`] - Batch writers that pack triangles and lines into few commands
//! - [`mesh`] - Cached unit cylinder and icosphere
//! - [`view`] - Per-feature views and their start/stop lifecycle
//! - [`sink`] - Render state setup and the [`RenderSink`] seam to the host

pub mod classify;
pub mod edge_set;
pub mod gfx;
pub mod mesh;
pub mod primitives;
pub mod sink;
pub mod view;
pub mod writer;

pub use classify::{Classification, classify};
pub use edge_set::EdgeSet;
pub use gfx::{Command, DisplayList, ListRef, Rgba, Vtx};
pub use sink::{FrameLists, RenderPass, RenderSink};
pub use view::{
    CollisionView, DebugView, HitboxView, PathView, ViewSet, ViewState, WaterView,
};
pub use writer::{LineWriter, PolyWriter};
