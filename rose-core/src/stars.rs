//! Background star shell behind the rose.

use std::f32::consts::TAU;

use crate::types::{Rgb, wrap_angle};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Base point size before perspective and twinkle.
    pub size: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct StarConfig {
    pub count: usize,
    /// Inner radius of the shell.
    pub radius: f32,
    /// Thickness of the shell.
    pub depth: f32,
    pub size_factor: f32,
    /// Twinkle rate.
    pub speed: f32,
    pub color: Rgb,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            radius: 100.0,
            depth: 50.0,
            size_factor: 4.0,
            speed: 1.0,
            // saturation 0, lightness 0.9
            color: Rgb::new(229.5, 229.5, 229.5),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StarField {
    pub stars: Vec<Star>,
    pub cfg: StarConfig,
}

impl StarField {
    /// Scatters stars over a spherical shell.
    ///
    /// The shell radius starts at `radius + depth` and shrinks by a random
    /// fraction of `depth / count` per star, so stars end up between the
    /// two radii. Directions are uniform over the sphere.
    pub fn random(cfg: &StarConfig, rng: &mut impl Rng) -> Self {
        let mut r = cfg.radius + cfg.depth;
        let increment = if cfg.count == 0 { 0.0 } else { cfg.depth / cfg.count as f32 };

        let stars = (0..cfg.count)
            .map(|_| {
                r -= increment * rng.random::<f32>();
                let polar = (1.0 - rng.random::<f32>() * 2.0).acos();
                let azimuth = rng.random::<f32>() * TAU;
                let (sin_p, cos_p) = polar.sin_cos();
                let (sin_a, cos_a) = azimuth.sin_cos();

                Star {
                    position: Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * r,
                    size: (0.5 + 0.5 * rng.random::<f32>()) * cfg.size_factor,
                }
            })
            .collect();

        tracing::debug!(count = cfg.count, "scattered star field");
        Self { stars, cfg: *cfg }
    }

    /// Size multiplier shared by every star at `elapsed` seconds, in `[2, 4]`.
    pub fn twinkle(&self, elapsed: f64) -> f32 {
        3.0 + wrap_angle(elapsed * f64::from(self.cfg.speed) + 100.0).sin()
    }

    /// On-screen diameter of `star` at view depth `depth`.
    pub fn point_size(&self, star: &Star, depth: f32, elapsed: f64) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        star.size * (30.0 / depth) * self.twinkle(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn stars_lie_inside_the_shell() {
        let cfg = StarConfig {
            count: 500,
            ..StarConfig::default()
        };
        let field = StarField::random(&cfg, &mut StdRng::seed_from_u64(3));

        assert_eq!(field.stars.len(), 500);
        for s in &field.stars {
            let r = s.position.length();
            assert!(r >= cfg.radius - 1e-2 && r <= cfg.radius + cfg.depth + 1e-2, "r = {r}");
            assert!(s.size >= 2.0 && s.size <= 4.0);
        }
    }

    #[test]
    fn twinkle_stays_in_range() {
        let field = StarField::random(&StarConfig { count: 1, ..StarConfig::default() }, &mut StdRng::seed_from_u64(0));
        for i in 0..100 {
            let k = field.twinkle(f64::from(i) * 0.21);
            assert!((2.0..=4.0).contains(&k));
        }
    }

    #[test]
    fn nearer_stars_draw_larger() {
        let field = StarField::random(&StarConfig { count: 1, ..StarConfig::default() }, &mut StdRng::seed_from_u64(0));
        let star = field.stars[0];
        assert!(field.point_size(&star, 100.0, 0.0) > field.point_size(&star, 150.0, 0.0));
        assert_eq!(field.point_size(&star, -1.0, 0.0), 0.0);
    }
}
