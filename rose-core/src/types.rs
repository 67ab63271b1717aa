use glam::Vec3;

/// Identifier for a petal in a [`crate::bloom::Bloom`].
///
/// This is an index into `Bloom::petals` and equals the petal's position
/// along the spiral (0 at the centre).
pub type PetalId = usize;

/// Identifier for a falling petal in a [`crate::particle::ParticleField`].
pub type ParticleId = usize;

/// Reduces an angle in radians to `[0, 2π)` and narrows it to `f32`.
///
/// Session time is kept in `f64` seconds; phases built from it must be
/// wrapped before narrowing or they lose their fractional part.
pub fn wrap_angle(radians: f64) -> f32 {
    radians.rem_euclid(std::f64::consts::TAU) as f32
}

/// An sRGB colour with channels in `0.0..=255.0`.
///
/// Channels stay fractional so interpolated colours are not rounded until
/// they reach the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32,
            g: ((hex >> 8) & 0xff) as f32,
            b: (hex & 0xff) as f32,
        }
    }

    /// Linear interpolation per channel; `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b) / 255.0
    }

    /// Inverse of [`Rgb::to_unit`], clamping out-of-range light sums.
    pub fn from_unit(v: Vec3) -> Rgb {
        let v = v.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
        Rgb::new(v.x, v.y, v.z)
    }

    /// Rounded 8-bit channels, ready for a rasterizer.
    pub fn to_u8(self) -> [u8; 3] {
        [
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_splits_channels() {
        let c = Rgb::from_hex(0xff4d6d);
        assert_eq!(c, Rgb::new(255.0, 77.0, 109.0));
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = Rgb::new(180.0, 20.0, 40.0);
        let b = Rgb::new(255.0, 60.0, 100.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(217.5, 40.0, 70.0));
    }

    #[test]
    fn unit_conversion_clamps_overexposed_light() {
        let c = Rgb::from_unit(Vec3::new(2.0, 0.5, -1.0));
        assert_eq!(c.to_u8(), [255, 128, 0]);
    }

    #[test]
    fn wrapped_angle_keeps_its_fraction_after_days() {
        // Five days in seconds.
        let t = 432_000.25_f64;
        let expected = (t % std::f64::consts::TAU) as f32;
        assert!((wrap_angle(t) - expected).abs() < 1e-5);
        assert!(wrap_angle(-0.5) > 0.0);
    }
}
