use bevy_egui::egui;

use crate::ViewerState;

pub fn preview_ui(ui: &mut egui::Ui, state: &mut ViewerState) {
    let text = state.ui.preview.clone();

    ui.horizontal(|ui| {
        ui.heading(&text.title);
        ui.label(&text.progress);
        ui.add(egui::ProgressBar::new(state.pipeline.progress_fraction() as f32).show_percentage());
    });

    ui.separator();

    if state.canvas_dirty || state.texture.is_none() {
        let size = [state.canvas.width() as usize, state.canvas.height() as usize];
        let img = egui::ColorImage::from_rgba_unmultiplied(size, state.canvas.as_raw());
        if let Some(tex) = state.texture.as_mut() {
            tex.set(img, egui::TextureOptions::NEAREST);
        } else {
            state.texture = Some(ui.ctx().load_texture("terrain", img, egui::TextureOptions::NEAREST));
        }
        state.canvas_dirty = false;
    }

    if let Some(tex) = &state.texture {
        let tex_size = tex.size_vec2();
        let available = ui.available_size_before_wrap();
        let scale = (available.x / tex_size.x).min(available.y / tex_size.y).min(1.0);
        let draw_size = tex_size * scale;
        ui.image(egui::load::SizedTexture::new(tex.id(), draw_size));
    }
}
