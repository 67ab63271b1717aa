//! Perspective orbit camera.
//!
//! Dragging orbits the camera around its target. Pan and zoom are fixed;
//! the polar angle is clamped so the rose is never seen from straight
//! above or below.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// A point mapped onto the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixels from the top-left corner of the viewport.
    pub screen: Vec2,
    /// Distance in front of the camera along its view axis.
    pub depth: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation about the vertical axis; 0 looks down -z.
    pub azimuth: f32,
    /// Angle from the +y axis.
    pub polar: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    /// Five units in front of the origin, 45° field of view.
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            azimuth: 0.0,
            polar: PI / 2.0,
            min_polar: PI / 3.0,
            max_polar: PI / 1.5,
            fov_y: 45.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }

    /// Orbits by a pointer drag of `delta` pixels over a viewport `viewport_height` tall.
    ///
    /// A drag across the full height turns the camera a full circle.
    pub fn orbit(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.azimuth = (self.azimuth - TAU * delta.x / viewport_height).rem_euclid(TAU);
        self.polar = (self.polar - TAU * delta.y / viewport_height).clamp(self.min_polar, self.max_polar);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(f32::EPSILON), self.near, self.far)
    }

    /// View-space depth of `point`; positive in front of the camera.
    pub fn depth(&self, point: Vec3) -> f32 {
        -self.view().transform_point3(point).z
    }

    /// Projects a world-space point onto a viewport of `size` pixels.
    ///
    /// Returns `None` for points behind the near plane.
    pub fn project(&self, point: Vec3, size: Vec2) -> Option<Projected> {
        let view = self.view().transform_point3(point);
        let depth = -view.z;
        if depth < self.near {
            return None;
        }

        let clip = self.projection(size.x / size.y) * view.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        Some(Projected {
            screen: Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y),
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn default_eye_is_five_units_out_on_z() {
        let cam = OrbitCamera::default();
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 5.0)).length() < EPS);
    }

    #[test]
    fn target_projects_to_viewport_centre() {
        let cam = OrbitCamera::default();
        let p = cam.project(Vec3::ZERO, Vec2::new(800.0, 600.0)).unwrap();
        assert!((p.screen - Vec2::new(400.0, 300.0)).length() < 1e-2);
        assert!((p.depth - 5.0).abs() < EPS);
    }

    #[test]
    fn up_is_up_on_screen() {
        let cam = OrbitCamera::default();
        let size = Vec2::new(800.0, 600.0);
        let above = cam.project(Vec3::new(0.0, 1.0, 0.0), size).unwrap();
        let right = cam.project(Vec3::new(1.0, 0.0, 0.0), size).unwrap();
        assert!(above.screen.y < 300.0);
        assert!(right.screen.x > 400.0);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let cam = OrbitCamera::default();
        assert!(cam.project(Vec3::new(0.0, 0.0, 10.0), Vec2::new(800.0, 600.0)).is_none());
    }

    #[test]
    fn orbit_clamps_polar_angle() {
        let mut cam = OrbitCamera::default();
        cam.orbit(Vec2::new(0.0, 10_000.0), 600.0);
        assert!((cam.polar - PI / 3.0).abs() < EPS);
        cam.orbit(Vec2::new(0.0, -10_000.0), 600.0);
        assert!((cam.polar - PI / 1.5).abs() < EPS);
    }

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut cam = OrbitCamera::default();
        cam.orbit(Vec2::new(150.0, 40.0), 600.0);
        assert!((cam.eye().length() - 5.0).abs() < EPS);
        assert!((cam.depth(Vec3::ZERO) - 5.0).abs() < EPS);
    }
}
