pub mod api;
pub mod canvas;
pub mod color;
pub mod config;
pub mod export;
pub mod palette;
pub mod pipeline;
pub mod region;
pub mod sampling;

pub use api::*;
pub use canvas::Canvas;
pub use color::{Color, ColorParseError};
pub use config::{LoadError, RenderConfig};
pub use export::{export_image, ExportError, DEFAULT_EXPORT_NAME};
pub use palette::{AltitudeColorMapper, AltitudeRange, BlendSpace, ColorStop, DisplayOptions, Palette};
pub use pipeline::{Phase, RenderPipeline, RenderState};
pub use region::{Region, RegionGrid};
pub use sampling::{NoiseBackend, NoiseConfig};
