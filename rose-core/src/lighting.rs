//! Light rig and fog for the rose scene.
//!
//! Shading is flat Lambert per triangle: an ambient term plus a point
//! light and a spot light, then linear fog on view depth.

use crate::{scene::Triangle, types::Rgb};
use glam::Vec3;

#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    /// Half-angle of the cone, in radians.
    pub angle: f32,
    /// Fraction of the cone that fades out, `0..=1`.
    pub penumbra: f32,
    pub color: Rgb,
    pub intensity: f32,
}

impl SpotLight {
    /// Cone falloff for a point lit by this spot: 1 on the axis, 0 outside the cone.
    pub fn attenuation(&self, point: Vec3) -> f32 {
        let axis = (self.target - self.position).normalize_or_zero();
        let to_point = (point - self.position).normalize_or_zero();
        let cos = axis.dot(to_point);

        let cone = self.angle.cos();
        let inner = (self.angle * (1.0 - self.penumbra)).cos();
        smoothstep(cone, inner, cos)
    }
}

/// Linear fog between `near` and `far` view depth.
#[derive(Clone, Copy, Debug)]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    /// 0 = untouched, 1 = fully fogged.
    pub fn factor(&self, depth: f32) -> f32 {
        smoothstep(self.near, self.far, depth)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LightRig {
    pub background: Rgb,
    pub fog: Fog,
    pub ambient: AmbientLight,
    pub point: PointLight,
    pub spot: SpotLight,
}

impl Default for LightRig {
    fn default() -> Self {
        let night = Rgb::from_hex(0x050002);
        Self {
            background: night,
            fog: Fog {
                color: night,
                near: 5.0,
                far: 15.0,
            },
            ambient: AmbientLight {
                color: Rgb::from_hex(0xffffff),
                intensity: 0.5,
            },
            point: PointLight {
                position: Vec3::new(10.0, 10.0, 10.0),
                color: Rgb::from_hex(0xff4d6d),
                intensity: 1.5,
            },
            spot: SpotLight {
                position: Vec3::new(-10.0, 10.0, 10.0),
                target: Vec3::ZERO,
                angle: 0.15,
                penumbra: 1.0,
                color: Rgb::from_hex(0xffffff),
                intensity: 2.0,
            },
        }
    }
}

impl LightRig {
    /// Final colour of `tri` seen from `eye` at view depth `depth`.
    pub fn shade(&self, tri: &Triangle, eye: Vec3, depth: f32) -> Rgb {
        let p = tri.centroid();
        let mut n = tri.normal;
        if tri.double_sided && n.dot(eye - p) < 0.0 {
            n = -n;
        }

        let mut light = self.ambient.color.to_unit() * self.ambient.intensity;

        let to_point_light = (self.point.position - p).normalize_or_zero();
        light += self.point.color.to_unit() * self.point.intensity * n.dot(to_point_light).max(0.0);

        let to_spot = (self.spot.position - p).normalize_or_zero();
        light += self.spot.color.to_unit()
            * self.spot.intensity
            * n.dot(to_spot).max(0.0)
            * self.spot.attenuation(p);

        let lit = tri.color.to_unit() * light;
        let fogged = lit.lerp(self.fog.color.to_unit(), self.fog.factor(depth));
        Rgb::from_unit(fogged)
    }
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
