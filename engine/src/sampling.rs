use crate::api::*;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// More octaves than this add nothing visible and push sample coordinates
/// out of range.
pub const MAX_OCTAVES: u32 = 32;
/// Largest scaled coordinate any octave may see (2^53). Past this `f64` has no
/// fractional bits left and the `noise` crate's lattice lookup overflows.
pub const MAX_SAMPLE_COORDINATE: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseBackend {
    /// `noise` crate Perlin, octaves summed here.
    #[default]
    Perlin,
    /// `fastnoise-lite` Perlin with its own FBm fractal.
    FastNoise,
}

/// Seed, coordinate scale and detail for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: Seed,
    pub scale: f64,
    pub octaves: u32,
    pub falloff: f64,
    pub backend: NoiseBackend,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: Seed(0),
            scale: 0.005,
            octaves: 8,
            falloff: 0.35,
            backend: NoiseBackend::Perlin,
        }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if !(1..=MAX_OCTAVES).contains(&self.octaves) {
            return Err(ConfigError::InvalidOctaves(self.octaves));
        }
        if !(self.falloff > 0.0 && self.falloff < 1.0) {
            return Err(ConfigError::InvalidFalloff(self.falloff));
        }
        Ok(())
    }

    /// Like [`Self::validate`], and also checks that pixel coordinates up to
    /// `extent` stay samplable at the highest octave.
    pub fn validate_for_extent(&self, extent: u32) -> Result<(), ConfigError> {
        self.validate()?;
        if !(self.max_coordinate(extent) <= MAX_SAMPLE_COORDINATE) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Largest coordinate handed to the underlying noise for pixels in `0..=extent`.
    pub fn max_coordinate(&self, extent: u32) -> f64 {
        let top_frequency = 2f64.powi(self.octaves.saturating_sub(1).min(MAX_OCTAVES) as i32);
        extent as f64 * self.scale * top_frequency + 1.0
    }

    pub fn build_field(&self) -> Box<dyn NoiseField> {
        match self.backend {
            NoiseBackend::Perlin => Box::new(PerlinField::new(self.seed, self.octaves, self.falloff)),
            NoiseBackend::FastNoise => Box::new(FastNoiseField::new(self.seed, self.octaves, self.falloff)),
        }
    }
}

/// Seed-derived shift in `(0.1, 0.9)` per axis. Perlin is exactly 0 on integer
/// lattice points, so unshifted fields would share those values across seeds.
fn lattice_offset(seed: Seed) -> (f64, f64) {
    let h = seed.0.wrapping_mul(0x9E37_79B9) ^ 0x85EB_CA6B;
    let fx = (h & 0xFFFF) as f64 / 65_536.0;
    let fy = (h >> 16) as f64 / 65_536.0;
    (0.1 + 0.8 * fx, 0.1 + 0.8 * fy)
}

pub struct PerlinField {
    perlin: Perlin,
    seed: Seed,
    octaves: u32,
    falloff: f64,
    offset: (f64, f64),
}

impl PerlinField {
    pub fn new(seed: Seed, octaves: u32, falloff: f64) -> Self {
        Self {
            perlin: Perlin::new(seed.0),
            seed,
            octaves: octaves.clamp(1, MAX_OCTAVES),
            falloff,
            offset: lattice_offset(seed),
        }
    }
}

impl NoiseField for PerlinField {
    fn seed(&self) -> Seed { self.seed }

    fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        let (dx, dy) = self.offset;
        for _ in 0..self.octaves {
            total += self.perlin.get([x * frequency + dx, y * frequency + dy]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.falloff;
            frequency *= 2.0;
        }

        to_unit(total / max_amplitude)
    }
}

pub struct FastNoiseField {
    noise: FastNoiseLite,
    seed: Seed,
    offset: (f64, f64),
}

impl FastNoiseField {
    pub fn new(seed: Seed, octaves: u32, falloff: f64) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed.0 as i32);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        noise.set_fractal_type(Some(FractalType::FBm));
        let octaves = i32::try_from(octaves.clamp(1, MAX_OCTAVES)).unwrap_or(1);
        noise.set_fractal_octaves(Some(octaves));
        noise.set_fractal_gain(Some(falloff as f32));
        noise.set_fractal_lacunarity(Some(2.0));
        Self { noise, seed, offset: lattice_offset(seed) }
    }
}

impl NoiseField for FastNoiseField {
    fn seed(&self) -> Seed { self.seed }

    fn sample(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = self.offset;
        to_unit(self.noise.get_noise_2d((x + dx) as f32, (y + dy) as f32) as f64)
    }
}

/// [-1,1] -> [0,1]. Non-finite input lands on the midpoint.
fn to_unit(v: f64) -> f64 {
    if v.is_nan() {
        return 0.5;
    }
    ((v + 1.0) * 0.5).clamp(0.0, 1.0)
}
