//! Falling petal overlay: one-shot randomized descriptors plus a
//! closed-form keyframe sampler.

use crate::{config::ParticleConfig, types::ParticleId};
use glam::Vec2;
use rand::Rng;

/// Static parameters of one falling petal.
///
/// Positions are in percent of the viewport, sizes in pixels, times in
/// seconds and angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleDescriptor {
    pub id: ParticleId,
    /// Left edge, percent of viewport width.
    pub x: f32,
    /// Top edge, percent of viewport height. Always negative.
    pub y: f32,
    pub size: f32,
    pub duration: f32,
    pub delay: f32,
    pub rotation: f32,
}

/// Where a petal is drawn at a given instant, relative to its resting place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFrame {
    /// Offset in pixels (positive y is down).
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    pub particles: Vec<ParticleDescriptor>,
    cfg: ParticleConfig,
}

impl ParticleField {
    /// Draws `cfg.count` particles from `rng`.
    ///
    /// Call once at startup and keep the result; redrawing would make every
    /// petal jump.
    pub fn random(cfg: &ParticleConfig, rng: &mut impl Rng) -> Self {
        let particles = (0..cfg.count)
            .map(|id| ParticleDescriptor {
                id,
                x: rng.random::<f32>() * cfg.x_spread,
                y: cfg.y_base - rng.random::<f32>() * cfg.y_spread,
                size: cfg.size_base + rng.random::<f32>() * cfg.size_spread,
                duration: cfg.duration_base + rng.random::<f32>() * cfg.duration_spread,
                delay: rng.random::<f32>() * cfg.delay_spread,
                rotation: rng.random::<f32>() * cfg.rotation_spread,
            })
            .collect();

        Self::from_particles(particles, *cfg)
    }

    pub fn from_particles(particles: Vec<ParticleDescriptor>, cfg: ParticleConfig) -> Self {
        tracing::debug!(count = particles.len(), "initialized particle field");
        Self { particles, cfg }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.cfg
    }

    /// Samples `particle` at `elapsed` seconds since the field appeared.
    ///
    /// Before its delay a petal rests at its initial rotation. Afterwards
    /// it loops linearly: it falls `fall_distance` percent of the viewport,
    /// spins `spin` degrees and drifts `drift` pixels along its own rotated
    /// x axis, fading in over the first `fade_fraction` of the cycle and
    /// out over the last.
    pub fn frame_at(&self, particle: &ParticleDescriptor, elapsed: f64, viewport_height: f32) -> ParticleFrame {
        let cfg = &self.cfg;
        let since = elapsed - f64::from(particle.delay);
        if since < 0.0 || particle.duration <= 0.0 {
            return ParticleFrame {
                offset: Vec2::ZERO,
                rotation: particle.rotation,
                opacity: cfg.peak_opacity,
            };
        }

        let progress = (since / f64::from(particle.duration)).fract() as f32;
        let rotation = progress * cfg.spin;
        let fall = progress * cfg.fall_distance / 100.0 * viewport_height;

        // translateY, then rotate, then translateX in the rotated frame
        let drift = Vec2::from_angle(rotation.to_radians()).rotate(Vec2::new(progress * cfg.drift, 0.0));

        ParticleFrame {
            offset: Vec2::new(0.0, fall) + drift,
            rotation,
            opacity: fade(progress, cfg.fade_fraction) * cfg.peak_opacity,
        }
    }
}

/// Trapezoid envelope: 0 → 1 over `[0, edge]`, 1 until `1 - edge`, → 0 at 1.
fn fade(progress: f32, edge: f32) -> f32 {
    if edge <= 0.0 {
        return 1.0;
    }
    if progress < edge {
        progress / edge
    } else if progress > 1.0 - edge {
        ((1.0 - progress) / edge).max(0.0)
    } else {
        1.0
    }
}
