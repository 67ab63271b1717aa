//! The rose assembly and its continuous motion.
//!
//! A frame is built in three layers:
//! 1. [`Scene::advance_frame`] — the only per-frame mutation: a constant
//!    yaw increment for the whole assembly, kept within one turn.
//! 2. [`Scene::petal_rotation`] / [`Scene::hover`] — pure functions of the
//!    elapsed time that perturb the static descriptors.
//! 3. [`Scene::triangles`] — composes everything into world-space
//!    triangles for a rasterizer.

use std::f32::consts::{PI, TAU};

use crate::{
    bloom::{Bloom, PetalDescriptor},
    config::{BloomConfig, MotionConfig},
    mesh::Mesh,
    types::{Rgb, wrap_angle},
};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// A world-space triangle ready for shading.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
    pub color: Rgb,
    pub alpha: f32,
    pub double_sided: bool,
}

impl Triangle {
    pub fn centroid(&self) -> Vec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }
}

/// Surface look of a shape.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub color: Rgb,
    pub alpha: f32,
    pub double_sided: bool,
}

impl Material {
    const fn solid(hex: u32) -> Self {
        Self {
            color: Rgb::from_hex(hex),
            alpha: 1.0,
            double_sided: false,
        }
    }

    const fn sheet(hex: u32) -> Self {
        Self {
            color: Rgb::from_hex(hex),
            alpha: 1.0,
            double_sided: true,
        }
    }
}

/// A fixed shape attached to the assembly: stem, core or leaf.
#[derive(Clone, Debug)]
pub struct Part {
    pub name: &'static str,
    pub mesh: Mesh,
    /// Placement relative to the assembly.
    pub transform: Mat4,
    pub material: Material,
}

/// Gentle floating offset applied around the whole assembly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hover {
    pub rotation: Vec3,
    pub lift: f32,
}

/// Centre of the rose head inside the assembly.
pub const HEAD_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);
/// Height-to-width stretch of every petal.
pub const PETAL_STRETCH: f32 = 1.5;
pub const PETAL_ALPHA: f32 = 0.95;

/// The rose: generated petals plus the fixed auxiliary parts.
#[derive(Clone, Debug)]
pub struct Scene {
    pub bloom: Bloom,
    pub parts: Vec<Part>,
    pub motion: MotionConfig,
    petal_mesh: Mesh,
    yaw: f32,
}

impl Scene {
    pub fn new(bloom_cfg: &BloomConfig, motion: MotionConfig) -> Self {
        Self::with_bloom(Bloom::generate(bloom_cfg), motion)
    }

    pub fn with_bloom(bloom: Bloom, motion: MotionConfig) -> Self {
        let parts = vec![
            Part {
                name: "stem",
                mesh: Mesh::cylinder(0.08, 0.06, 4.0, 12),
                transform: Mat4::from_translation(Vec3::new(0.0, -2.5, 0.0)),
                material: Material::solid(0x2d5a27),
            },
            Part {
                name: "core",
                mesh: Mesh::sphere(0.3, 12, 8),
                transform: Mat4::from_translation(HEAD_OFFSET),
                material: Material::solid(0x8b0000),
            },
            Part {
                name: "upper leaf",
                mesh: Mesh::sphere_segment(0.4, 12, 2, PI * 0.1),
                transform: Mat4::from_rotation_translation(
                    Quat::from_rotation_z(PI / 4.0),
                    Vec3::new(0.3, -1.8, 0.0),
                ),
                material: Material::sheet(0x3a6b35),
            },
            Part {
                name: "lower leaf",
                mesh: Mesh::sphere_segment(0.5, 12, 2, PI * 0.1),
                transform: Mat4::from_rotation_translation(
                    Quat::from_rotation_z(-PI / 3.0),
                    Vec3::new(-0.3, -2.5, 0.0),
                ),
                material: Material::sheet(0x3a6b35),
            },
        ];

        Self {
            bloom,
            parts,
            motion,
            petal_mesh: Mesh::sphere_segment(1.0, 12, 5, PI / 2.0),
            yaw: 0.0,
        }
    }

    /// Current rotation of the assembly about the vertical axis.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Called once per rendered frame: spins the assembly a little further.
    #[inline]
    pub fn advance_frame(&mut self) {
        self.yaw = (self.yaw + self.motion.spin_per_frame).rem_euclid(TAU);
    }

    /// Rotation of `petal` at `elapsed` seconds: its rest pose plus a sine
    /// wave on the tilt and a half-frequency cosine wave on the roll, both
    /// shifted by the petal's phase.
    pub fn petal_rotation(&self, petal: &PetalDescriptor, elapsed: f64) -> Vec3 {
        let m = &self.motion;
        let phase = f64::from(petal.phase);
        let tilt = wrap_angle(elapsed + phase);
        let roll = wrap_angle(elapsed * f64::from(m.roll_frequency) + phase);
        Vec3::new(
            petal.rotation.x + tilt.sin() * m.wave_tilt,
            petal.rotation.y,
            petal.rotation.z + roll.cos() * m.wave_roll,
        )
    }

    pub fn hover(&self, elapsed: f64) -> Hover {
        let m = &self.motion;
        let tau = wrap_angle(elapsed / 4.0 * f64::from(m.hover_speed));
        Hover {
            rotation: Vec3::new(tau.cos() / 8.0, tau.sin() / 8.0, tau.sin() / 20.0) * m.hover_rotation,
            lift: tau.sin() / 10.0 * m.hover_lift,
        }
    }

    /// Transform from assembly space to world space.
    pub fn assembly_transform(&self, elapsed: f64) -> Mat4 {
        let hover = self.hover(elapsed);
        let float = Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, hover.rotation.x, hover.rotation.y, hover.rotation.z),
            Vec3::new(0.0, hover.lift, 0.0),
        );
        float * Mat4::from_rotation_y(self.yaw)
    }

    /// Transform of one petal's unit dome into assembly space.
    pub fn petal_transform(&self, petal: &PetalDescriptor, elapsed: f64) -> Mat4 {
        let r = self.petal_rotation(petal, elapsed);
        Mat4::from_translation(HEAD_OFFSET)
            * Mat4::from_scale_rotation_translation(
                Vec3::new(petal.scale, petal.scale * PETAL_STRETCH, petal.scale),
                Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
                petal.position,
            )
    }

    /// World-space triangles of the whole rose at `elapsed` seconds.
    pub fn triangles(&self, elapsed: f64) -> Vec<Triangle> {
        let world = self.assembly_transform(elapsed);
        let petal_facets = self.bloom.len() * self.petal_mesh.len();
        let part_facets: usize = self.parts.iter().map(|p| p.mesh.len()).sum();
        let mut out = Vec::with_capacity(petal_facets + part_facets);

        for part in &self.parts {
            emit(&mut out, &part.mesh, world * part.transform, part.material);
        }
        for petal in &self.bloom.petals {
            let material = Material {
                color: petal.color,
                alpha: PETAL_ALPHA,
                double_sided: true,
            };
            emit(&mut out, &self.petal_mesh, world * self.petal_transform(petal, elapsed), material);
        }
        out
    }
}

fn emit(out: &mut Vec<Triangle>, mesh: &Mesh, transform: Mat4, material: Material) {
    for facet in &mesh.facets {
        let vertices = facet.vertices.map(|v| transform.transform_point3(v));
        let hint = transform.transform_vector3(facet.normal);

        // Non-uniform scale skews normals, so take the face normal and only
        // borrow the orientation from the mesh.
        let mut normal = (vertices[1] - vertices[0])
            .cross(vertices[2] - vertices[0])
            .normalize_or(hint.normalize_or(Vec3::Y));
        if normal.dot(hint) < 0.0 {
            normal = -normal;
        }

        out.push(Triangle {
            vertices,
            normal,
            color: material.color,
            alpha: material.alpha,
            double_sided: material.double_sided,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn scene() -> Scene {
        Scene::new(&BloomConfig::default(), MotionConfig::default())
    }

    #[test]
    fn advance_frame_adds_constant_yaw() {
        let mut s = scene();
        assert_eq!(s.yaw(), 0.0);
        for _ in 0..200 {
            s.advance_frame();
        }
        assert!((s.yaw() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn advance_frame_leaves_descriptors_alone() {
        let mut s = scene();
        let before = s.bloom.clone();
        s.advance_frame();
        assert_eq!(s.bloom, before);
    }

    #[test]
    fn petal_rotation_matches_closed_form() {
        let s = scene();
        let petal = s.bloom.petals[7];

        for elapsed in [0.0_f64, 0.5, 3.25, 10.0] {
            let r = s.petal_rotation(&petal, elapsed);
            let t = elapsed as f32;
            let x = petal.rotation.x + (t + petal.phase).sin() * 0.05;
            let z = (t * 0.5 + petal.phase).cos() * 0.03;
            assert!((r.x - x).abs() < EPS);
            assert_eq!(r.y, petal.rotation.y);
            assert!((r.z - z).abs() < EPS);
        }
    }

    #[test]
    fn neighbouring_petals_wave_out_of_step() {
        let s = scene();
        let a = s.petal_rotation(&s.bloom.petals[3], 1.0) - s.bloom.petals[3].rotation;
        let b = s.petal_rotation(&s.bloom.petals[4], 1.0) - s.bloom.petals[4].rotation;
        assert!((a.x - b.x).abs() > 1e-4);
    }

    #[test]
    fn hover_is_periodic_and_small() {
        let s = scene();
        // τ = elapsed / 4 * 2, so the period is 4π seconds.
        let period = 4.0 * std::f64::consts::PI;
        let a = s.hover(1.3);
        let b = s.hover(1.3 + period);
        assert!((a.lift - b.lift).abs() < 1e-4);
        assert!((a.rotation - b.rotation).length() < 1e-4);

        for i in 0..50 {
            let h = s.hover(f64::from(i) * 0.37);
            assert!(h.lift.abs() <= 0.05 + EPS);
            assert!(h.rotation.x.abs() <= 0.0625 + EPS);
        }
    }

    #[test]
    fn triangles_cover_every_petal_and_part() {
        let s = scene();
        let tris = s.triangles(0.0);
        let expected = s.bloom.len() * s.petal_mesh.len()
            + s.parts.iter().map(|p| p.mesh.len()).sum::<usize>();
        assert_eq!(tris.len(), expected);

        let petals = tris.iter().filter(|t| t.alpha == PETAL_ALPHA).count();
        assert_eq!(petals, s.bloom.len() * s.petal_mesh.len());
        assert!(tris.iter().all(|t| (t.normal.length() - 1.0).abs() < 1e-3));
    }

    #[test]
    fn petal_transform_places_dome_at_descriptor() {
        let s = scene();
        let petal = s.bloom.petals[20];
        let origin = s.petal_transform(&petal, 2.0).transform_point3(Vec3::ZERO);
        assert!((origin - (petal.position + HEAD_OFFSET)).length() < EPS);
    }

    #[test]
    fn spin_turns_the_assembly_about_y() {
        let still = MotionConfig {
            hover_rotation: 0.0,
            hover_lift: 0.0,
            ..MotionConfig::default()
        };
        let mut s = Scene::new(&BloomConfig::default(), still);
        let stem_before = s.triangles(0.0)[0].vertices[0];
        for _ in 0..100 {
            s.advance_frame();
        }
        let stem_after = s.triangles(0.0)[0].vertices[0];

        // Same height and distance from the axis, different bearing.
        assert!((stem_before.y - stem_after.y).abs() < 1e-3);
        let r0 = (stem_before.x * stem_before.x + stem_before.z * stem_before.z).sqrt();
        let r1 = (stem_after.x * stem_after.x + stem_after.z * stem_after.z).sqrt();
        assert!((r0 - r1).abs() < 1e-3);
        assert!((stem_before - stem_after).length() > 1e-3);
    }

    #[test]
    fn yaw_wraps_to_one_turn() {
        let mut s = scene();
        s.yaw = TAU - 0.001;
        s.advance_frame();
        assert!((s.yaw() - 0.004).abs() < 1e-5);
    }

    #[test]
    fn spin_step_holds_over_a_long_session() {
        let mut s = scene();
        for _ in 0..2_000_000 {
            s.advance_frame();
        }
        assert!((0.0..TAU).contains(&s.yaw()));

        let before = s.yaw();
        s.advance_frame();
        let step = (s.yaw() - before).rem_euclid(TAU);
        assert!((step - 0.005).abs() < 1e-5, "step {step}");
    }

    #[test]
    fn wave_keeps_moving_after_days() {
        let s = scene();
        let petal = s.bloom.petals[7];
        // Five days in; an f32 clock would have a step of 1/32 s here.
        let t = 432_000.0_f64;

        let r = s.petal_rotation(&petal, t);
        let expected = petal.rotation.x
            + ((t + f64::from(petal.phase)) % std::f64::consts::TAU).sin() as f32 * 0.05;
        assert!((r.x - expected).abs() < 1e-4);

        let later = s.petal_rotation(&petal, t + 1.0 / 60.0);
        assert!((later.x - r.x).abs() > 1e-6);
        assert_ne!(s.hover(t), s.hover(t + 1.0 / 60.0));
    }
}
