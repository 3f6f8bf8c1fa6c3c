//! Unbatched primitive emitters
//!
//! Each call uploads its own vertices and draws from cache slot 0. Used where
//! shapes are few and colors are set per group (hitboxes, paths, water).

use colview_shared::{Vec3f, Vec3s};
use glam::Vec3;

use crate::gfx::{Command, DisplayList, Rgba, VTX_WORDS, Vtx, world_position};

/// Words one [`draw_line`] call adds
pub const LINE_WORDS: usize = 2 + 2 * VTX_WORDS;
/// Words one [`draw_tri`] call adds
pub const TRI_WORDS: usize = 2 + 3 * VTX_WORDS;
/// Words one [`draw_quad`] call adds
pub const QUAD_WORDS: usize = 2 + 4 * VTX_WORDS;

/// Host integer coordinates as a `glam` vector
pub fn vec3_from_s(v: Vec3s) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Host float coordinates as a `glam` vector
pub fn vec3_from_f(v: Vec3f) -> Vec3 {
    Vec3::from(v.to_array())
}

/// Face normal of `v1 v2 v3`, scaled to length 127
///
/// Degenerate triangles give a zero vector.
pub fn tri_norm(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    let n = (v2 - v1).cross(v3 - v1);
    let len = n.length();
    if len != 0.0 { n * (127.0 / len) } else { n }
}

fn normal_bytes(n: Vec3) -> [i8; 3] {
    [n.x as i8, n.y as i8, n.z as i8]
}

/// Black line segment between two world points
pub fn draw_line(list: &mut DisplayList, a: Vec3s, b: Vec3s) {
    let v = [
        Vtx::with_color(a.to_array(), Rgba::BLACK),
        Vtx::with_color(b.to_array(), Rgba::BLACK),
    ];
    let data = list.alloc_data(&v);
    list.push(Command::Vertex {
        data,
        count: 2,
        v0: 0,
    });
    list.push(Command::Line3d(0, 1));
}

/// Single flat-normal triangle
pub fn draw_tri(list: &mut DisplayList, v: [Vec3; 3]) {
    let n = normal_bytes(tri_norm(v[0], v[1], v[2]));
    let vtx = v.map(|p| Vtx::with_normal(world_position(p), n, 0xFF));
    let data = list.alloc_data(&vtx);
    list.push(Command::Vertex {
        data,
        count: 3,
        v0: 0,
    });
    list.push(Command::Triangle1([0, 1, 2]));
}

/// Flat-normal quad `v1 v2 v3 v4`, split along `v1 v3`
///
/// The normal is taken from `v1 v2 v4`.
pub fn draw_quad(list: &mut DisplayList, v: [Vec3; 4]) {
    let n = normal_bytes(tri_norm(v[0], v[1], v[3]));
    let vtx = v.map(|p| Vtx::with_normal(world_position(p), n, 0xFF));
    let data = list.alloc_data(&vtx);
    list.push(Command::Vertex {
        data,
        count: 4,
        v0: 0,
    });
    list.push(Command::Triangle2([0, 1, 2], [0, 2, 3]));
}
