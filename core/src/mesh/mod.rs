//! Procedural mesh cache
//!
//! The cylinder and icosphere are built into display lists on first use and
//! shared for the rest of the process. Drawing one costs a matrix push, a
//! list call and a pop in the caller's list.

mod cylinder;
mod icosphere;

use std::sync::OnceLock;

use glam::Vec3;

use crate::gfx::{Command, DisplayList, ListRef, MTX_WORDS, MatrixFlags, Mtx};

/// Size of the unit meshes in vertex units
pub const MESH_UNIT: f32 = 128.0;

/// Words one [`draw_cylinder`] or [`draw_icosphere`] call adds to a list
pub const MESH_DRAW_WORDS: usize = 3 + MTX_WORDS;

static CYLINDER: OnceLock<ListRef> = OnceLock::new();
static ICOSPHERE: OnceLock<ListRef> = OnceLock::new();

/// Cached unit cylinder list
pub fn cylinder_mesh() -> ListRef {
    CYLINDER
        .get_or_init(|| {
            tracing::debug!("building cylinder mesh");
            ListRef::new(cylinder::build())
        })
        .clone()
}

/// Cached unit icosphere list
pub fn icosphere_mesh() -> ListRef {
    ICOSPHERE
        .get_or_init(|| {
            tracing::debug!("building icosphere mesh");
            ListRef::new(icosphere::build())
        })
        .clone()
}

fn draw_mesh(list: &mut DisplayList, mesh: ListRef, pos: Vec3, scale: Vec3) {
    let m = Mtx::scale_translate(pos, scale / MESH_UNIT);
    let data = list.alloc_data(&[m]);
    list.push(Command::Matrix {
        data,
        flags: MatrixFlags::LOAD | MatrixFlags::PUSH,
    });
    list.push(Command::DisplayList(mesh));
    list.push(Command::PopMatrix);
}

/// Upright cylinder with its base center at `pos`
pub fn draw_cylinder(list: &mut DisplayList, pos: Vec3, radius: f32, height: f32) {
    draw_mesh(
        list,
        cylinder_mesh(),
        pos,
        Vec3::new(radius, height, radius),
    );
}

/// Sphere centered at `pos`
pub fn draw_icosphere(list: &mut DisplayList, pos: Vec3, radius: f32) {
    draw_mesh(list, icosphere_mesh(), pos, Vec3::splat(radius));
}
