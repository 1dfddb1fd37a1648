//! The per-frame model-view-projection matrix.

use glam::{Mat4, Vec3};

/// Uniform scale applied to every vertex before projection.
pub const MODEL_SCALE: f32 = 0.1;

/// Width over height of the framebuffer.
///
/// Not guarded: a zero height gives `inf` (or `NaN` for `0 × 0`).
pub fn aspect_ratio([width, height]: [u32; 2]) -> f32 {
    width as f32 / height as f32
}

/// Arguments of the orthographic projection, in `glOrtho` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    /// `x` spans `±ratio`, `y` spans `±1`.
    ///
    /// Near and far are `1` and `-1`, in that order, which flips the depth axis
    /// compared to the usual `(-1, 1)`.
    pub fn from_aspect_ratio(ratio: f32) -> Self {
        Self {
            left: -ratio,
            right: ratio,
            bottom: -1.0,
            top: 1.0,
            near: 1.0,
            far: -1.0,
        }
    }

    /// OpenGL-convention orthographic projection (same as `glm::ortho`).
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// `projection × scale`, ready for `glUniformMatrix4fv` (column-major).
pub fn mvp(ratio: f32) -> Mat4 {
    let model = Mat4::from_scale(Vec3::splat(MODEL_SCALE));
    OrthoBounds::from_aspect_ratio(ratio).projection() * model
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn ratio_is_plain_division() {
        assert_eq!(aspect_ratio([640, 480]), 640.0_f32 / 480.0_f32);
        assert_eq!(aspect_ratio([300, 300]), 1.0);
        assert_eq!(aspect_ratio([1, 0]), f32::INFINITY);
        assert!(aspect_ratio([0, 0]).is_nan());
    }

    #[test]
    fn bounds_for_640_by_480() {
        let bounds = OrthoBounds::from_aspect_ratio(aspect_ratio([640, 480]));
        assert!((bounds.left + 1.333_333).abs() < 1e-5);
        assert!((bounds.right - 1.333_333).abs() < 1e-5);
        assert_eq!((bounds.bottom, bounds.top), (-1.0, 1.0));
        assert_eq!((bounds.near, bounds.far), (1.0, -1.0));
    }

    #[test]
    fn square_mvp_matches_hand_written_matrices() {
        // glOrtho(-1, 1, -1, 1, 1, -1): z scale is -2 / (far - near) = 1.
        let ortho = Mat4::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::W);
        let scale = Mat4::from_diagonal(Vec4::new(0.1, 0.1, 0.1, 1.0));
        let expected = ortho * scale;

        assert!(mvp(1.0).abs_diff_eq(expected, 1e-6));
        assert!(mvp(1.0).abs_diff_eq(
            OrthoBounds::from_aspect_ratio(1.0).projection()
                * Mat4::from_scale(Vec3::splat(MODEL_SCALE)),
            1e-6
        ));
    }

    #[test]
    fn wide_mvp_squeezes_x() {
        let ratio = 2.0;
        let expected = Mat4::from_diagonal(Vec4::new(0.1 / ratio, 0.1, 0.1, 1.0));
        assert!(mvp(ratio).abs_diff_eq(expected, 1e-6));

        // The rightmost zigzag vertex lands inside clip space.
        let clip = mvp(ratio) * Vec4::new(6.0, -5.0, 0.0, 1.0);
        assert!((clip.x - 0.3).abs() < 1e-6);
        assert!((clip.y + 0.5).abs() < 1e-6);
    }
}
