//! Unit icosphere mesh
//!
//! An icosahedron subdivided once: 42 vertices on seven latitude rings of
//! 1, 5, 10, 10, 10, 5 and 1 vertices, 80 faces. Radius is 128 units.
//!
//! The vertex cache only holds 32 entries, so the sphere is drawn in two
//! halves: rings 0-3 are loaded first, then rings 4-6 are loaded over the
//! start of the cache while ring 3 stays resident for the seam.

use glam::Vec3;

use crate::gfx::{Command, DisplayList, GeometryMode, VTX_WORDS, Vtx, unit_normal, unit_position};

pub const VERTEX_COUNT: usize = 42;

/// Commands in the finished list, including the terminator
pub const COMMAND_COUNT: usize = 45;

/// Vertices in the first load (rings 0-3)
const UPPER_COUNT: usize = 26;

/// One latitude ring; `step` is how far one fifth of a turn moves along it
#[derive(Clone, Copy)]
struct Ring {
    start: usize,
    len: usize,
    step: usize,
}

impl Ring {
    const fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            len,
            step: len / 5,
        }
    }

    /// Cache index of the vertex `off` places past the `i`th fifth of a turn
    fn at(self, i: usize, off: usize) -> usize {
        self.start + (i * self.step + off) % self.len
    }

    /// Same ring reloaded at a different cache position
    const fn rebased(self, start: usize) -> Self {
        Self { start, ..self }
    }
}

const RINGS: [Ring; 7] = [
    Ring::new(0, 1),
    Ring::new(1, 5),
    Ring::new(6, 10),
    Ring::new(16, 10),
    Ring::new(26, 10),
    Ring::new(36, 5),
    Ring::new(41, 1),
];

fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    (a + b).normalize()
}

/// Unit-length vertex positions, indexed by ring layout
fn unit_vertices() -> [Vec3; VERTEX_COUNT] {
    let [r0, r1, r2, r3, r4, r5, r6] = RINGS;
    let mut v = [Vec3::ZERO; VERTEX_COUNT];

    v[r0.at(0, 0)] = Vec3::Y;
    v[r6.at(0, 0)] = Vec3::NEG_Y;

    // Icosahedron pentagons: upper at even tenths of a turn, lower at odd
    let a_xz = std::f64::consts::TAU / 10.0;
    let a_y = 0.5f64.atan();
    let ring_point = |k: usize, lat: f64| {
        let a = a_xz * k as f64;
        Vec3::new(
            (a.cos() * lat.cos()) as f32,
            lat.sin() as f32,
            (-a.sin() * lat.cos()) as f32,
        )
    };
    for i in 0..5 {
        v[r2.at(i, 0)] = ring_point(i * r2.step, a_y);
        v[r4.at(i, 0)] = ring_point(i * r4.step + 1, -a_y);
    }

    for i in 0..5 {
        v[r1.at(i, 0)] = midpoint(v[r0.at(i, 0)], v[r2.at(i, 0)]);
        v[r2.at(i, 1)] = midpoint(v[r2.at(i, 0)], v[r2.at(i, 2)]);
        v[r3.at(i, 0)] = midpoint(v[r2.at(i, 0)], v[r4.at(i, 0)]);
        v[r3.at(i, 1)] = midpoint(v[r4.at(i, 0)], v[r2.at(i, 2)]);
        v[r4.at(i, 1)] = midpoint(v[r4.at(i, 0)], v[r4.at(i, 2)]);
        v[r5.at(i, 0)] = midpoint(v[r4.at(i, 0)], v[r6.at(i, 0)]);
    }
    v
}

/// Eight faces of the `i`th fifth of the upper half (rings 0-3)
fn upper_faces(i: usize) -> [[usize; 3]; 8] {
    let [r0, r1, r2, r3, ..] = RINGS;
    [
        [r0.at(i, 0), r1.at(i, 0), r1.at(i, 1)],
        [r1.at(i, 0), r2.at(i, 0), r2.at(i, 1)],
        [r1.at(i, 0), r2.at(i, 1), r1.at(i, 1)],
        [r1.at(i, 1), r2.at(i, 1), r2.at(i, 2)],
        [r2.at(i, 0), r3.at(i, 0), r2.at(i, 1)],
        [r2.at(i, 1), r3.at(i, 0), r3.at(i, 1)],
        [r2.at(i, 1), r3.at(i, 1), r2.at(i, 2)],
        [r2.at(i, 2), r3.at(i, 1), r3.at(i, 2)],
    ]
}

/// Eight faces of the `i`th fifth of the lower half, in second-load cache
/// positions (ring 3 still at 16, rings 4-6 from 0)
fn lower_faces(i: usize) -> [[usize; 3]; 8] {
    let r3 = RINGS[3];
    let r4 = RINGS[4].rebased(0);
    let r5 = RINGS[5].rebased(10);
    let r6 = RINGS[6].rebased(15);
    [
        [r3.at(i, 1), r4.at(i, 0), r4.at(i, 1)],
        [r3.at(i, 1), r4.at(i, 1), r3.at(i, 2)],
        [r3.at(i, 2), r4.at(i, 1), r4.at(i, 2)],
        [r3.at(i, 2), r4.at(i, 2), r3.at(i, 3)],
        [r4.at(i, 0), r5.at(i, 0), r4.at(i, 1)],
        [r4.at(i, 1), r5.at(i, 0), r5.at(i, 1)],
        [r4.at(i, 1), r5.at(i, 1), r4.at(i, 2)],
        [r5.at(i, 0), r6.at(i, 0), r5.at(i, 1)],
    ]
}

fn push_faces(list: &mut DisplayList, faces: &[[usize; 3]]) {
    let tri = |f: [usize; 3]| [f[0] as u8, f[1] as u8, f[2] as u8];
    for pair in faces.chunks_exact(2) {
        list.push(Command::Triangle2(tri(pair[0]), tri(pair[1])));
    }
}

pub(super) fn build() -> DisplayList {
    let mut list = DisplayList::new(
        "mesh.icosphere",
        COMMAND_COUNT + VERTEX_COUNT * VTX_WORDS,
    );
    let vtx = unit_vertices().map(|v| Vtx::with_normal(unit_position(v), unit_normal(v), 0xFF));
    let smooth_cull = GeometryMode::CULL_BACK | GeometryMode::SHADING_SMOOTH;

    list.push(Command::SetGeometryMode(smooth_cull));

    let upper = list.alloc_data(&vtx[..UPPER_COUNT]);
    list.push(Command::Vertex {
        data: upper,
        count: UPPER_COUNT as u8,
        v0: 0,
    });
    for i in 0..5 {
        push_faces(&mut list, &upper_faces(i));
    }

    let lower = list.alloc_data(&vtx[UPPER_COUNT..]);
    list.push(Command::Vertex {
        data: lower,
        count: (VERTEX_COUNT - UPPER_COUNT) as u8,
        v0: 0,
    });
    for i in 0..5 {
        push_faces(&mut list, &lower_faces(i));
    }

    list.push(Command::ClearGeometryMode(smooth_cull));
    list.end();
    list
}
