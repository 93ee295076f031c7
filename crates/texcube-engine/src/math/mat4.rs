use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

use super::Vec3;

/// 4x4 `f32` matrix, row-major, row-vector convention.
///
/// The memory layout is exactly 64 bytes so a `Mat4` can be copied straight into
/// a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub rows: [[f32; 4]; 4],
}

impl Mat4 {
    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { rows: [[0.0; 4]; 4] }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the X axis by `radians`.
    pub fn rotation_x(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the Y axis by `radians`.
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(offset: Vec3) -> Self {
        let mut m = Self::identity();
        m.rows[3] = [offset.x, offset.y, offset.z, 1.0];
        m
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zero();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                out.rows[c][r] = *v;
            }
        }
        out
    }

    /// Returns entry `Mij` (1-based row `i`, column `j`).
    #[inline]
    pub fn m(&self, i: usize, j: usize) -> f32 {
        self.rows[i - 1][j - 1]
    }

    /// Transforms the point `(p, 1)` and returns the homogeneous result.
    pub fn transform_point(&self, p: Vec3) -> [f32; 4] {
        let v = [p.x, p.y, p.z, 1.0];
        let mut out = [0.0; 4];
        for (c, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|k| v[k] * self.rows[k][c]).sum();
        }
        out
    }

    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = Mat4::zero();
        for r in 0..4 {
            for c in 0..4 {
                out.rows[r][c] = (0..4).map(|k| self.rows[r][k] * rhs.rows[k][c]).sum();
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn approx_mat(a: &Mat4, b: &Mat4) -> bool {
        a.rows
            .iter()
            .flatten()
            .zip(b.rows.iter().flatten())
            .all(|(x, y)| approx(*x, *y))
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::rotation_y(0.7) * Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(approx_mat(&(m * Mat4::identity()), &m));
        assert!(approx_mat(&(Mat4::identity() * m), &m));
    }

    #[test]
    fn translation_moves_points() {
        let p = Mat4::translation(Vec3::new(0.0, 0.0, 5.0)).transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, [1.0, 1.0, 6.0, 1.0]);
    }

    #[test]
    fn rotation_y_quarter_turn() {
        // Row-vector convention: +X rotates towards -Z.
        let p = Mat4::rotation_y(core::f32::consts::FRAC_PI_2).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p[0], 0.0));
        assert!(approx(p[2], -1.0));
    }

    #[test]
    fn rotation_x_quarter_turn() {
        let p = Mat4::rotation_x(core::f32::consts::FRAC_PI_2).transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!(approx(p[1], 0.0));
        assert!(approx(p[2], 1.0));
    }

    #[test]
    fn transpose_twice_is_identity_op() {
        let m = Mat4::rotation_x(0.3) * Mat4::translation(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().m(4, 3), 0.0);
        assert_eq!(m.transpose().m(3, 4), m.m(4, 3));
    }

    #[test]
    fn layout_is_64_bytes() {
        assert_eq!(std::mem::size_of::<Mat4>(), 64);
        assert_eq!(bytemuck::bytes_of(&Mat4::identity()).len(), 64);
    }
}
