use std::num::ParseFloatError;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("canvas must be at least 1x1 pixels, got {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("region size must be positive")]
    InvalidRegionSize,
    #[error("altitude range is empty: min ({min}) >= max ({max})")]
    InvalidAltitudeRange { min: f64, max: f64 },
    #[error("palette needs at least 2 color stops, got {0}")]
    PaletteTooShort(usize),
    #[error("noise scale must be positive and keep sample coordinates in range, got {0}")]
    InvalidScale(f64),
    #[error("noise octaves must be between 1 and {}, got {0}", crate::sampling::MAX_OCTAVES)]
    InvalidOctaves(u32),
    #[error("noise falloff must lie strictly between 0 and 1, got {0}")]
    InvalidFalloff(f64),
}

/// Noise seed. Anything a user can type into a seed box maps to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub u32);

impl Seed {
    /// Integral values in `u32` range are used as is; any other real is folded
    /// from its bit pattern.
    pub fn from_real(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
            return Seed(value as u32);
        }
        let bits = value.to_bits();
        Seed((bits >> 32) as u32 ^ bits as u32)
    }

    pub fn random() -> Self {
        Seed(rand::thread_rng().gen_range(0..1_000_000))
    }
}

impl FromStr for Seed {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<f64>().map(Seed::from_real)
    }
}

/// One primitive for the external renderer. Coordinates are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    ClearCanvas(Color),
    DrawPoint { x: u32, y: u32, color: Color },
    DrawLine { x0: u32, y0: u32, x1: u32, y1: u32, color: Color, weight: f32 },
}

/// Coherent noise over the plane, normalized to `[0, 1]`.
///
/// Implementations are deterministic for a fixed seed and detail setting.
/// Coordinate scaling is the caller's job.
pub trait NoiseField: Send + Sync {
    fn seed(&self) -> Seed;
    fn sample(&self, x: f64, y: f64) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_reals_keep_their_value() {
        assert_eq!(Seed::from_real(0.0), Seed(0));
        assert_eq!(Seed::from_real(483_211.0), Seed(483_211));
        assert_eq!("  42 ".parse::<Seed>().unwrap(), Seed(42));
    }

    #[test]
    fn fractional_and_negative_reals_still_give_stable_seeds() {
        assert_eq!(Seed::from_real(1.5), Seed::from_real(1.5));
        assert_ne!(Seed::from_real(1.5), Seed::from_real(2.5));
        assert_eq!(Seed::from_real(-7.0), Seed::from_real(-7.0));
        assert!("abc".parse::<Seed>().is_err());
    }

    #[test]
    fn random_seeds_stay_below_a_million() {
        for _ in 0..100 {
            assert!(Seed::random().0 < 1_000_000);
        }
    }
}
