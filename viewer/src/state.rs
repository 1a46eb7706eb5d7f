use bevy::prelude::*;
use bevy_egui::egui;
use terrain_engine::{export_image, Canvas, RenderConfig, RenderPipeline, Seed, DEFAULT_EXPORT_NAME};

use crate::ui_strings::UiStrings;

#[derive(Resource)]
pub struct ViewerState {
    pub pipeline: RenderPipeline,
    pub canvas: Canvas,
    pub texture: Option<egui::TextureHandle>,
    pub canvas_dirty: bool,
    pub seed_input: String,
    pub scale_input: String,
    pub status: Option<String>,
    pub ui: UiStrings,
}

impl ViewerState {
    pub fn new(config: RenderConfig, ui: UiStrings) -> anyhow::Result<Self> {
        let seed_input = config.noise.seed.0.to_string();
        let scale_input = config.noise.scale.to_string();
        let canvas = Canvas::new(config.width, config.height);
        let pipeline = RenderPipeline::new(config)?;
        Ok(Self {
            pipeline,
            canvas,
            texture: None,
            canvas_dirty: true,
            seed_input,
            scale_input,
            status: None,
            ui,
        })
    }

    /// Runs one pipeline step and paints its output.
    pub fn advance(&mut self) {
        if self.pipeline.is_complete() {
            return;
        }
        let commands = self.pipeline.tick();
        self.canvas.apply_all(&commands);
        self.canvas_dirty = true;
    }

    /// Restarts generation with the seed and scale typed into the panel.
    /// Unparseable inputs keep their previous values.
    pub fn redraw(&mut self) {
        let mut config = self.pipeline.config().clone();

        match self.seed_input.parse::<Seed>() {
            Ok(seed) => config.noise.seed = seed,
            Err(e) => warn!("Ignoring seed input {:?}: {}", self.seed_input, e),
        }
        match self.scale_input.trim().parse::<f64>() {
            Ok(scale) => config.noise.scale = scale,
            Err(e) => warn!("Ignoring scale input {:?}: {}", self.scale_input, e),
        }

        let (seed, scale) = (config.noise.seed.0, config.noise.scale);
        match self.pipeline.restart(Some(config)) {
            Ok(()) => {
                info!("Redrawing map with seed {} and scale {}", seed, scale);
                self.status = None;
            }
            Err(e) => {
                error!("Refusing to redraw: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn save(&mut self) {
        match export_image(&self.canvas, DEFAULT_EXPORT_NAME, self.pipeline.is_complete()) {
            Ok(()) => self.status = Some(format!("{} {}", self.ui.controls.saved, DEFAULT_EXPORT_NAME)),
            Err(e) => {
                error!("Failed to save map image: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }
}
