//! Unit cylinder mesh
//!
//! Radius and height 128 units, base at the origin. Side faces are smooth
//! shaded, caps are flat.

use std::f64::consts::TAU;

use crate::gfx::{Command, DisplayList, GeometryMode, VTX_WORDS, Vtx};

/// Divisions around the axis
pub const DIVISIONS: usize = 12;

/// Two cap centers plus a bottom/top pair per division
pub const VERTEX_COUNT: usize = 2 + DIVISIONS * 2;

/// Commands in the finished list, including the terminator
pub const COMMAND_COUNT: usize = 5 + DIVISIONS * 2;

pub(super) fn vertices() -> [Vtx; VERTEX_COUNT] {
    let mut vtx = [Vtx::default(); VERTEX_COUNT];
    vtx[0] = Vtx::with_normal([0, 0, 0], [0, -127, 0], 0xFF);
    vtx[1] = Vtx::with_normal([0, 128, 0], [0, 127, 0], 0xFF);

    for i in 0..DIVISIONS {
        let angle = TAU * i as f64 / DIVISIONS as f64;
        let (sin, cos) = angle.sin_cos();
        let x = (0.5 + cos * 128.0).floor() as i16;
        let z = (0.5 - sin * 128.0).floor() as i16;
        let n = [(cos * 127.0) as i8, 0, (-sin * 127.0) as i8];
        vtx[2 + i * 2] = Vtx::with_normal([x, 0, z], n, 0xFF);
        vtx[3 + i * 2] = Vtx::with_normal([x, 128, z], n, 0xFF);
    }
    vtx
}

/// Bottom and top vertex of division `i` and the one before it
fn side(i: usize) -> [u8; 4] {
    let p = (i + DIVISIONS - 1) % DIVISIONS;
    [
        (2 + p * 2) as u8,
        (2 + i * 2) as u8,
        (3 + i * 2) as u8,
        (3 + p * 2) as u8,
    ]
}

pub(super) fn build() -> DisplayList {
    let mut list = DisplayList::new(
        "mesh.cylinder",
        COMMAND_COUNT + VERTEX_COUNT * VTX_WORDS,
    );
    let vtx = vertices();

    list.push(Command::SetGeometryMode(
        GeometryMode::CULL_BACK | GeometryMode::SHADING_SMOOTH,
    ));
    let data = list.alloc_data(&vtx);
    list.push(Command::Vertex {
        data,
        count: VERTEX_COUNT as u8,
        v0: 0,
    });
    for i in 0..DIVISIONS {
        let v = side(i);
        list.push(Command::Triangle2([v[0], v[1], v[2]], [v[0], v[2], v[3]]));
    }

    list.push(Command::ClearGeometryMode(GeometryMode::SHADING_SMOOTH));
    for i in 0..DIVISIONS {
        let v = side(i);
        list.push(Command::Triangle2([0, v[1], v[0]], [1, v[3], v[2]]));
    }

    list.push(Command::ClearGeometryMode(GeometryMode::CULL_BACK));
    list.end();
    list
}
