use log::{debug, info};

use crate::api::*;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::palette::{AltitudeColorMapper, DisplayOptions};
use crate::region::{Region, RegionGrid};

pub const BACKGROUND_COLOR: Color = Color::BLACK;
pub const DIVIDER_COLOR: Color = Color::BLACK;
pub const DIVIDER_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Configured, nothing emitted yet.
    Idle,
    InProgress,
    /// All regions drawn, grid overlay still pending.
    FinalizingOverlay,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub current_region: usize,
    pub total_regions: usize,
    pub phase: Phase,
}

impl RenderState {
    fn fresh(total_regions: usize) -> Self {
        Self { current_region: 0, total_regions, phase: Phase::Idle }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }
}

/// Incremental terrain renderer. Each [`tick`](Self::tick) covers one region.
pub struct RenderPipeline {
    config: RenderConfig,
    grid: RegionGrid,
    field: Box<dyn NoiseField>,
    mapper: AltitudeColorMapper,
    state: RenderState,
}

impl RenderPipeline {
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        let field = config.noise.build_field();
        let mapper = AltitudeColorMapper::new(config.palette.clone())?;
        info!(
            "Terrain pipeline ready: {}x{} canvas, {} regions of {}px, seed {}",
            grid.width(),
            grid.height(),
            grid.total_regions(),
            grid.region_size(),
            config.noise.seed.0
        );
        Ok(Self { state: RenderState::fresh(grid.total_regions()), config, grid, field, mapper })
    }

    /// Abandons the current run and starts over from region 0.
    ///
    /// With `Some(config)` the new configuration replaces the old one, but only
    /// if it validates; on error nothing changes.
    pub fn restart(&mut self, config: Option<RenderConfig>) -> Result<(), ConfigError> {
        match config {
            Some(config) => *self = Self::new(config)?,
            None => {
                self.state = RenderState::fresh(self.grid.total_regions());
                info!("Terrain pipeline restarted");
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn grid(&self) -> &RegionGrid {
        &self.grid
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn progress_fraction(&self) -> f64 {
        (self.state.current_region as f64 / self.state.total_regions as f64).min(1.0)
    }

    pub fn display_options(&self) -> DisplayOptions {
        self.config.display
    }

    /// Applies from the next tick on; pixels already drawn keep their colors.
    pub fn set_display_options(&mut self, display: DisplayOptions) {
        self.config.display = display;
    }

    pub fn tick(&mut self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        match self.state.phase {
            Phase::Idle => {
                out.push(DrawCommand::ClearCanvas(BACKGROUND_COLOR));
                self.state.phase = Phase::InProgress;
                self.render_current_region(&mut out);
            }
            Phase::InProgress => self.render_current_region(&mut out),
            Phase::FinalizingOverlay => {
                if self.config.display.show_grid {
                    self.push_grid_lines(&mut out);
                }
                self.state.phase = Phase::Done;
                info!("Terrain render complete ({} regions)", self.state.total_regions);
            }
            Phase::Done => {}
        }
        out
    }

    fn render_current_region(&mut self, out: &mut Vec<DrawCommand>) {
        let region = self.grid.clipped_bounds(self.state.current_region);
        out.reserve(region.pixel_count());
        self.render_region(&region, out);
        debug!("Rendered region {} / {}", region.index + 1, self.state.total_regions);

        self.state.current_region += 1;
        if self.state.current_region >= self.state.total_regions {
            self.state.phase = Phase::FinalizingOverlay;
        }
    }

    fn render_region(&self, region: &Region, out: &mut Vec<DrawCommand>) {
        let scale = self.config.noise.scale;
        let range = &self.config.range;
        let display = &self.config.display;
        for x in region.x.clone() {
            for y in region.y.clone() {
                let sample = self.field.sample(x as f64 * scale, y as f64 * scale);
                let altitude = range.altitude_at(sample);
                let color = self.mapper.classify(altitude, range, display);
                out.push(DrawCommand::DrawPoint { x, y, color });
            }
        }
    }

    fn push_grid_lines(&self, out: &mut Vec<DrawCommand>) {
        let size = self.grid.region_size();
        let (width, height) = (self.grid.width(), self.grid.height());
        for k in 0..self.grid.region_count_x() {
            let x = k * size;
            out.push(DrawCommand::DrawLine { x0: x, y0: 0, x1: x, y1: height, color: DIVIDER_COLOR, weight: DIVIDER_WEIGHT });
        }
        for k in 0..self.grid.region_count_y() {
            let y = k * size;
            out.push(DrawCommand::DrawLine { x0: 0, y0: y, x1: width, y1: y, color: DIVIDER_COLOR, weight: DIVIDER_WEIGHT });
        }
    }
}
