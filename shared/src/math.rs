//! Math types for host data
//!
//! Plain coordinate records as the host stores them. They carry no behavior
//! beyond conversions so the shared crate stays free of a math library;
//! the renderer converts to `glam` types at its boundary.

/// Integer world-space coordinate triple (host collision and actor positions)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3s {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vec3s {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}

/// Floating-point coordinate triple (hitbox triangle and quad corners)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3f {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3f {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<[i16; 3]> for Vec3s {
    fn from(v: [i16; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}
