//! Batched vertex and primitive writers
//!
//! Both writers collect vertices locally and upload them in one vertex-load
//! command per batch. The load command is reserved in the list before the
//! primitives that use it and filled in when the batch is flushed, so the
//! list reads in execution order without a second pass.

mod line;
mod poly;

pub use line::{LINE_BATCH, LineWriter};
pub use poly::{POLY_BATCH, PolyWriter};
