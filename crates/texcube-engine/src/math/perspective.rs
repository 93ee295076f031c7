use crate::error::{Error, Result};

use super::Mat4;

/// Clip-space depth range targeted by a projection matrix.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DepthConvention {
    /// OpenGL-style: depth maps to `[-1, 1]`.
    NegativeOneToOne,
    /// Direct3D / Vulkan / wgpu: depth maps to `[0, 1]`.
    ZeroToOne,
}

/// Left-handed perspective projection from a vertical field of view.
///
/// `fov` is in radians and must lie in `(0, pi)`; `near` and `far` must be
/// positive with `near < far`; `aspect_ratio` must be positive and finite.
/// Returns [`Error::InvalidArgument`] naming the offending parameter.
pub fn perspective_fov(
    fov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
    convention: DepthConvention,
) -> Result<Mat4> {
    if !(fov > 0.0 && fov < core::f32::consts::PI) {
        return Err(Error::invalid_argument("fov", format!("{fov} is outside (0, pi)")));
    }
    if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
        return Err(Error::invalid_argument(
            "aspect_ratio",
            format!("{aspect_ratio} is not a positive finite number"),
        ));
    }
    if !(near > 0.0) {
        return Err(Error::invalid_argument("near", format!("{near} is not positive")));
    }
    if !(far > 0.0) {
        return Err(Error::invalid_argument("far", format!("{far} is not positive")));
    }
    if near >= far {
        return Err(Error::invalid_argument(
            "near",
            format!("near plane {near} is not closer than far plane {far}"),
        ));
    }

    let y_scale = 1.0 / (fov * 0.5).tan();
    let x_scale = y_scale / aspect_ratio;

    let (m33, m43) = match convention {
        DepthConvention::NegativeOneToOne => (
            (far + near) / (far - near),
            -2.0 * near * far / (far - near),
        ),
        DepthConvention::ZeroToOne => (far / (far - near), -near * far / (far - near)),
    };

    Ok(Mat4::from_rows([
        [x_scale, 0.0, 0.0, 0.0],
        [0.0, y_scale, 0.0, 0.0],
        [0.0, 0.0, m33, 1.0],
        [0.0, 0.0, m43, 0.0],
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_4, PI};

    const BOTH: [DepthConvention; 2] = [DepthConvention::NegativeOneToOne, DepthConvention::ZeroToOne];

    fn assert_rejects(name: &str, r: Result<Mat4>) {
        match r {
            Err(Error::InvalidArgument { name: n, .. }) => assert_eq!(n, name),
            other => panic!("expected InvalidArgument({name}), got {other:?}"),
        }
    }

    #[test]
    fn depth_range_reference_values() {
        let m = perspective_fov(FRAC_PI_4, 1024.0 / 720.0, 0.01, 100.0, DepthConvention::ZeroToOne).unwrap();
        assert!((m.m(3, 3) - 1.0001).abs() < 1e-4);
        assert!((m.m(4, 3) + 0.010001).abs() < 1e-6);
        assert_eq!(m.m(3, 4), 1.0);
        assert_eq!(m.m(4, 4), 0.0);
    }

    #[test]
    fn clip_symmetric_reference_values() {
        let (n, f) = (0.01f32, 100.0f32);
        let m = perspective_fov(FRAC_PI_4, 1.0, n, f, DepthConvention::NegativeOneToOne).unwrap();
        assert!((m.m(3, 3) - (f + n) / (f - n)).abs() < 1e-6);
        assert!((m.m(4, 3) - (-2.0 * n * f / (f - n))).abs() < 1e-6);
        assert_eq!(m.m(3, 4), 1.0);
    }

    #[test]
    fn x_scale_follows_aspect() {
        for conv in BOTH {
            for aspect in [0.25f32, 1.0, 1024.0 / 720.0, 3.0] {
                let m = perspective_fov(1.0, aspect, 0.1, 10.0, conv).unwrap();
                assert!((m.m(1, 1) - m.m(2, 2) * (1.0 / aspect)).abs() < 1e-5);
                assert_eq!(m.m(3, 4), 1.0);
            }
        }
    }

    #[test]
    fn off_diagonal_entries_are_zero() {
        let m = perspective_fov(1.2, 1.5, 0.5, 50.0, DepthConvention::ZeroToOne).unwrap();
        for (i, j) in [(1, 2), (1, 3), (1, 4), (2, 1), (2, 3), (2, 4), (3, 1), (3, 2), (4, 1), (4, 2), (4, 4)] {
            assert_eq!(m.m(i, j), 0.0, "M{i}{j}");
        }
    }

    #[test]
    fn near_and_far_planes_map_to_range_ends() {
        let (n, f) = (0.5f32, 20.0f32);
        for (conv, lo) in [(DepthConvention::ZeroToOne, 0.0), (DepthConvention::NegativeOneToOne, -1.0)] {
            let m = perspective_fov(1.0, 1.0, n, f, conv).unwrap();
            let near = m.transform_point(crate::math::Vec3::new(0.0, 0.0, n));
            let far = m.transform_point(crate::math::Vec3::new(0.0, 0.0, f));
            assert!((near[2] / near[3] - lo).abs() < 1e-5);
            assert!((far[2] / far[3] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        for conv in BOTH {
            assert_rejects("fov", perspective_fov(0.0, 1.0, 0.1, 10.0, conv));
            assert_rejects("fov", perspective_fov(PI, 1.0, 0.1, 10.0, conv));
            assert_rejects("fov", perspective_fov(-1.0, 1.0, 0.1, 10.0, conv));
            assert_rejects("near", perspective_fov(1.0, 1.0, 0.0, 10.0, conv));
            assert_rejects("far", perspective_fov(1.0, 1.0, 0.1, 0.0, conv));
            assert_rejects("near", perspective_fov(1.0, 1.0, 10.0, 10.0, conv));
            assert_rejects("near", perspective_fov(1.0, 1.0, 20.0, 10.0, conv));
        }
    }

    #[test]
    fn rejects_degenerate_aspect() {
        assert_rejects("aspect_ratio", perspective_fov(1.0, 0.0, 0.1, 10.0, DepthConvention::ZeroToOne));
        assert_rejects("aspect_ratio", perspective_fov(1.0, f32::INFINITY, 0.1, 10.0, DepthConvention::ZeroToOne));
        assert_rejects("aspect_ratio", perspective_fov(1.0, f32::NAN, 0.1, 10.0, DepthConvention::ZeroToOne));
    }

    #[test]
    fn rejects_nan_fov() {
        assert_rejects("fov", perspective_fov(f32::NAN, 1.0, 0.1, 10.0, DepthConvention::ZeroToOne));
    }
}
