use serde::{Deserialize, Serialize};

use crate::api::ConfigError;
use crate::color::Color;

/// Marker color for contour lines, independent of the palette.
pub const CONTOUR_COLOR: Color = Color::BLACK;
/// Contours fall on multiples of this step in palette-index space.
pub const CONTOUR_STEP: f64 = 0.25;
pub const CONTOUR_TOLERANCE: f64 = 0.01;

/// Linear range that normalized noise output is stretched over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AltitudeRange {
    fn default() -> Self {
        Self { min: -250.0, max: 500.0 }
    }
}

impl AltitudeRange {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // also rejects NaN bounds
        if !(self.min < self.max) {
            return Err(ConfigError::InvalidAltitudeRange { min: self.min, max: self.max });
        }
        Ok(())
    }

    /// Maps a normalized `[0, 1]` sample into this range.
    pub fn altitude_at(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendSpace {
    #[default]
    Rgb,
    Hsb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub interpolate_colors: bool,
    pub show_contours: bool,
    pub show_grid: bool,
    pub blend_space: BlendSpace,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            interpolate_colors: false,
            show_contours: false,
            show_grid: true,
            blend_space: BlendSpace::Rgb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStop {
    pub name: String,
    pub color: Color,
}

impl ColorStop {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self { name: name.into(), color }
    }
}

/// Color stops ordered from lowest to highest altitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    stops: Vec<ColorStop>,
}

impl Default for Palette {
    fn default() -> Self {
        let stops = [
            ("DEEP_SEA", Color::rgb(0x12, 0x18, 0xc7)),
            ("SEA", Color::rgb(0x00, 0x66, 0x91)),
            ("SHALLOW_SEA", Color::rgb(0x00, 0xc9, 0xc3)),
            ("BEACH", Color::rgb(0xff, 0xed, 0x78)),
            ("THICK_GRASS", Color::rgb(0x04, 0x7d, 0x06)),
            ("GRASS", Color::rgb(0x36, 0xa3, 0x38)),
            ("SPARSE_GRASS", Color::rgb(0x8f, 0xbf, 0x77)),
            ("MOUNTAIN_SIDE", Color::rgb(0x8f, 0x8f, 0x8f)),
            ("MOUNTAIN_PEAK", Color::rgb(0xd9, 0xd9, 0xd9)),
        ];
        Self { stops: stops.into_iter().map(|(name, color)| ColorStop::new(name, color)).collect() }
    }
}

impl Palette {
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ConfigError> {
        let palette = Self { stops };
        palette.validate()?;
        Ok(palette)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stops.len() < 2 {
            return Err(ConfigError::PaletteTooShort(self.stops.len()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.stops.get(index).map(|s| s.color)
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.stops.iter().find(|s| s.name == name).map(|s| s.color)
    }
}

/// Altitude -> color classification over a validated palette.
#[derive(Debug, Clone)]
pub struct AltitudeColorMapper {
    palette: Palette,
}

impl AltitudeColorMapper {
    pub fn new(palette: Palette) -> Result<Self, ConfigError> {
        palette.validate()?;
        Ok(Self { palette })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Position of `altitude` in palette-index space `[0, N-1]`. Unclamped.
    pub fn scaled_value(&self, altitude: f64, range: &AltitudeRange) -> f64 {
        let top = (self.palette.len() - 1) as f64;
        (altitude - range.min) / (range.max - range.min) * top
    }

    pub fn classify(&self, altitude: f64, range: &AltitudeRange, options: &DisplayOptions) -> Color {
        let stops = &self.palette.stops;
        let top = (stops.len() - 1) as f64;
        let scaled = self.scaled_value(altitude, range);

        if options.show_contours && is_contour(scaled) {
            return CONTOUR_COLOR;
        }

        let clamped = scaled.clamp(0.0, top);
        let index = (clamped.floor() as usize).min(stops.len() - 1);

        // strict bounds keep index + 1 inside the palette
        let blend = options.interpolate_colors && scaled > 0.0 && scaled < top;
        if !blend {
            return stops[index].color;
        }

        let from = stops[index].color;
        let to = stops[index + 1].color;
        let t = scaled - index as f64;
        match options.blend_space {
            BlendSpace::Rgb => from.lerp(to, t),
            BlendSpace::Hsb => from.lerp_hsb(to, t),
        }
    }
}

/// Truncated remainder, so negative values mark contours symmetrically.
fn is_contour(scaled: f64) -> bool {
    (scaled % CONTOUR_STEP).abs() < CONTOUR_TOLERANCE
}
