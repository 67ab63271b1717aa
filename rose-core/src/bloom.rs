//! Golden-angle petal placement for the rose head.

use std::f32::consts::TAU;

use crate::{
    config::BloomConfig,
    types::{PetalId, Rgb},
};
use glam::Vec3;

/// Placement of one petal, relative to the rose head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetalDescriptor {
    pub index: PetalId,
    pub position: Vec3,
    /// Euler angles `(tilt, spin, 0)`, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Rgb,
    /// Offset into the waving animation, so neighbours do not move in lockstep.
    pub phase: f32,
}

/// The full set of petals of one rose.
#[derive(Clone, Debug, PartialEq)]
pub struct Bloom {
    pub petals: Vec<PetalDescriptor>,
}

/// The golden ratio `(√5 + 1) / 2`.
pub fn golden_ratio() -> f32 {
    (5.0_f32.sqrt() + 1.0) / 2.0
}

/// Angular step between consecutive petals, reduced to `[0, 2π)`.
pub fn golden_angle() -> f32 {
    (TAU * golden_ratio()).rem_euclid(TAU)
}

/// Normalized position of petal `index` along the spiral: 0 at the centre, 1 at the edge.
///
/// A single-petal bloom has only a centre.
pub fn spiral_t(index: PetalId, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    }
}

impl PetalDescriptor {
    /// Computes petal `index` out of `cfg.petal_count`.
    ///
    /// - angle = 2π·φ·i, so no two petals share a direction;
    /// - radius = √t·R_max, which keeps petal density even over the disc;
    /// - height rises linearly with `t`;
    /// - colour runs from `inner_color` to `outer_color`;
    /// - tilt grows with `t` and spin is `-angle`, turning each petal away
    ///   from the centre;
    /// - scale shrinks from the centre towards the outer edge.
    pub fn at(index: PetalId, cfg: &BloomConfig) -> Self {
        let t = spiral_t(index, cfg.petal_count);
        let angle = TAU * golden_ratio() * index as f32;
        let radius = t.sqrt() * cfg.max_radius;

        let position = Vec3::new(
            angle.cos() * radius,
            t * cfg.rise + cfg.base_height,
            angle.sin() * radius,
        );

        Self {
            index,
            position,
            rotation: Vec3::new(cfg.base_tilt + t * cfg.tilt_sweep, -angle, 0.0),
            scale: cfg.min_scale + (1.0 - t) * cfg.scale_sweep,
            color: cfg.inner_color.lerp(cfg.outer_color, t),
            phase: index as f32 * cfg.phase_step,
        }
    }
}

impl Bloom {
    /// Generates all petals. Pure: the same config always yields the same bloom.
    pub fn generate(cfg: &BloomConfig) -> Self {
        let petals: Vec<PetalDescriptor> = (0..cfg.petal_count)
            .map(|i| PetalDescriptor::at(i, cfg))
            .collect();

        tracing::debug!(count = petals.len(), "generated bloom");
        Self { petals }
    }

    pub fn len(&self) -> usize {
        self.petals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.petals.is_empty()
    }
}
