//! Design-time constants for the card.
//!
//! Every count and numeric range used by the generators lives here so the
//! generators themselves stay total functions of their configuration.

use std::f32::consts::PI;
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::Rgb;

/// Parameters of the golden-angle petal spiral.
#[derive(Clone, Copy, Debug)]
pub struct BloomConfig {
    pub petal_count: usize,
    /// Radius of the outermost petal.
    pub max_radius: f32,
    /// Height gained between the centre petal and the outermost one.
    pub rise: f32,
    /// Vertical offset applied to every petal.
    pub base_height: f32,
    pub inner_color: Rgb,
    pub outer_color: Rgb,
    /// Tilt of the centre petal about the x axis.
    pub base_tilt: f32,
    /// Extra tilt reached at the outer edge.
    pub tilt_sweep: f32,
    /// Scale of the centre petal.
    pub min_scale: f32,
    /// Extra scale reached at the outer edge.
    pub scale_sweep: f32,
    /// Wave phase offset between consecutive petals.
    pub phase_step: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            petal_count: 45,
            max_radius: 1.5,
            rise: 1.2,
            base_height: -1.0,
            inner_color: Rgb::new(180.0, 20.0, 40.0),
            outer_color: Rgb::new(255.0, 60.0, 100.0),
            base_tilt: -PI / 4.0,
            tilt_sweep: -PI / 3.0,
            min_scale: 0.3,
            scale_sweep: 0.7,
            phase_step: 0.1,
        }
    }
}

/// Ranges for the falling petal overlay.
///
/// Each randomized field is `base + r * spread` with `r` uniform in `[0, 1)`.
#[derive(Clone, Copy, Debug)]
pub struct ParticleConfig {
    pub count: usize,
    /// Horizontal spread in percent of the viewport width.
    pub x_spread: f32,
    /// Start height in percent of the viewport height (negative is above the top edge).
    pub y_base: f32,
    /// How much further above `y_base` a petal may start.
    pub y_spread: f32,
    pub size_base: f32,
    pub size_spread: f32,
    pub duration_base: f32,
    pub duration_spread: f32,
    pub delay_spread: f32,
    pub rotation_spread: f32,
    /// Fall distance per cycle in percent of the viewport height.
    pub fall_distance: f32,
    /// Sideways drift per cycle in pixels, applied in the petal's rotated frame.
    pub drift: f32,
    /// Degrees turned per cycle.
    pub spin: f32,
    pub peak_opacity: f32,
    /// Fraction of the cycle spent fading in, and again fading out.
    pub fade_fraction: f32,
    /// Height of a petal relative to its width.
    pub aspect: f32,
    pub color: Rgb,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 15,
            x_spread: 100.0,
            y_base: -10.0,
            y_spread: 20.0,
            size_base: 10.0,
            size_spread: 20.0,
            duration_base: 5.0,
            duration_spread: 10.0,
            delay_spread: 10.0,
            rotation_spread: 360.0,
            fall_distance: 110.0,
            drift: 50.0,
            spin: 720.0,
            peak_opacity: 0.6,
            fade_fraction: 0.1,
            aspect: 1.2,
            color: Rgb::from_hex(0xff4d6d),
        }
    }
}

/// Continuous motion applied on top of the static geometry.
#[derive(Clone, Copy, Debug)]
pub struct MotionConfig {
    /// Yaw added to the whole rose every rendered frame, in radians.
    pub spin_per_frame: f32,
    /// Amplitude of the per-petal tilt wave.
    pub wave_tilt: f32,
    /// Amplitude of the per-petal roll wave.
    pub wave_roll: f32,
    /// Frequency of the roll wave relative to the tilt wave.
    pub roll_frequency: f32,
    pub hover_speed: f32,
    pub hover_rotation: f32,
    pub hover_lift: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spin_per_frame: 0.005,
            wave_tilt: 0.05,
            wave_roll: 0.03,
            roll_frequency: 0.5,
            hover_speed: 2.0,
            hover_rotation: 0.5,
            hover_lift: 0.5,
        }
    }
}

/// Connection settings for the text-generation service.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GeneratorConfig {
    pub const API_KEY_VAR: &'static str = "API_KEY";
    pub const MODEL_VAR: &'static str = "ROSE_MODEL";
    pub const BASE_URL_VAR: &'static str = "ROSE_API_BASE";
    pub const TIMEOUT_VAR: &'static str = "ROSE_TIMEOUT_SECS";

    /// Reads overrides from the process environment.
    ///
    /// A missing API key is not an error: the request is still issued and
    /// fails at the service, which the panel treats like any other failure.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GeneratorConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(key) = lookup(Self::API_KEY_VAR) {
            cfg.api_key = key;
        }
        if let Some(model) = lookup(Self::MODEL_VAR).filter(|m| !m.trim().is_empty()) {
            cfg.model = model.trim().to_string();
        }
        if let Some(base) = lookup(Self::BASE_URL_VAR).filter(|b| !b.trim().is_empty()) {
            cfg.base_url = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(Self::TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: Self::TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: Self::TIMEOUT_VAR,
                    value: raw,
                });
            }
            cfg.timeout = Duration::from_secs(secs);
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = GeneratorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.model, "gemini-3-flash-preview");
        assert!(cfg.api_key.is_empty());
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_applied_and_trimmed() {
        let cfg = GeneratorConfig::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("ROSE_MODEL", " other-model "),
            ("ROSE_API_BASE", "http://localhost:9000/"),
            ("ROSE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.model, "other-model");
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = GeneratorConfig::from_lookup(lookup_from(&[("ROSE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var: "ROSE_TIMEOUT_SECS", .. }
        ));

        assert!(GeneratorConfig::from_lookup(lookup_from(&[("ROSE_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn default_ranges_keep_particles_above_the_top_edge() {
        let cfg = ParticleConfig::default();
        assert!(cfg.y_base < 0.0);
        assert!(cfg.y_spread >= 0.0);
    }
}
