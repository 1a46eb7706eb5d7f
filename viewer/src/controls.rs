use bevy::prelude::*;
use bevy_egui::egui;
use terrain_engine::BlendSpace;

use crate::ViewerState;

pub fn controls_ui(ui: &mut egui::Ui, state: &mut ViewerState) {
    let text = state.ui.controls.clone();
    ui.heading(&text.title);

    ui.label(&text.seed);
    ui.text_edit_singleline(&mut state.seed_input);
    ui.label(&text.scale);
    ui.text_edit_singleline(&mut state.scale_input);

    ui.separator();

    // Toggles reach the pipeline right away but only affect regions not yet drawn.
    let mut display = state.pipeline.display_options();
    let mut changed = false;
    changed |= ui.checkbox(&mut display.interpolate_colors, &text.blending).changed();
    changed |= ui.checkbox(&mut display.show_contours, &text.topography).changed();
    changed |= ui.checkbox(&mut display.show_grid, &text.grid).changed();
    ui.horizontal(|ui| {
        ui.label(&text.blend_space);
        changed |= ui.radio_value(&mut display.blend_space, BlendSpace::Rgb, &text.blend_rgb).changed();
        changed |= ui.radio_value(&mut display.blend_space, BlendSpace::Hsb, &text.blend_hsb).changed();
    });
    if changed {
        // Bind first: tracing's macro expansion imports a `display` fn that shadows the local.
        let (blending, topography, grid) = (display.interpolate_colors, display.show_contours, display.show_grid);
        info!("Display set to blending: {}, topography: {}, grid: {}", blending, topography, grid);
        state.pipeline.set_display_options(display);
    }

    ui.separator();

    if ui.button(&text.redraw).clicked() {
        state.redraw();
    }
    let complete = state.pipeline.is_complete();
    if ui.add_enabled(complete, egui::Button::new(&text.save)).clicked() {
        state.save();
    }

    if let Some(status) = &state.status {
        ui.separator();
        ui.label(status);
    }
}
