//! s15.16 fixed-point matrix

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

const FIXED_ONE: f32 = 65536.0;

/// 4x4 fixed-point matrix: all integer halves, then all fractional halves
///
/// Element `[i][j]` is column `i`, row `j` of the equivalent column-major
/// `glam::Mat4`, so the translation lives in `[3][0..3]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Mtx {
    pub int_part: [[i16; 4]; 4],
    pub frac_part: [[u16; 4]; 4],
}

impl Mtx {
    pub const IDENTITY: Self = Self {
        int_part: [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]],
        frac_part: [[0; 4]; 4],
    };

    /// Convert from floating point, truncating each element toward zero
    pub fn from_mat4(m: &Mat4) -> Self {
        let cols = m.to_cols_array_2d();
        let mut out = Self::zeroed();
        for (i, col) in cols.iter().enumerate() {
            for (j, &value) in col.iter().enumerate() {
                let fixed = (value * FIXED_ONE) as i32;
                out.int_part[i][j] = (fixed >> 16) as i16;
                out.frac_part[i][j] = fixed as u16;
            }
        }
        out
    }

    pub fn to_mat4(&self) -> Mat4 {
        let mut cols = [[0.0f32; 4]; 4];
        for (i, col) in cols.iter_mut().enumerate() {
            for (j, value) in col.iter_mut().enumerate() {
                let fixed = ((self.int_part[i][j] as i32) << 16) | self.frac_part[i][j] as i32;
                *value = fixed as f32 / FIXED_ONE;
            }
        }
        Mat4::from_cols_array_2d(&cols)
    }

    /// `translate(pos) * scale(scale)`: scales first, then moves into place
    pub fn scale_translate(pos: Vec3, scale: Vec3) -> Self {
        Self::from_mat4(&(Mat4::from_translation(pos) * Mat4::from_scale(scale)))
    }
}

impl Default for Mtx {
    fn default() -> Self {
        Self::IDENTITY
    }
}
