use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, egui};
use std::env;
use terrain_engine::{NoiseConfig, RenderConfig, Seed};
mod ui_strings; mod controls; mod preview; mod state;
use ui_strings::UiStrings;
pub use state::ViewerState;

fn setup(mut commands: Commands) { commands.spawn(Camera2dBundle::default()); }

/// One region per frame.
fn tick_system(mut state: ResMut<ViewerState>) {
    state.advance();
}

fn ui_system(mut contexts: EguiContexts, mut state: ResMut<ViewerState>) {
    let ctx = contexts.ctx_mut().clone();
    egui::SidePanel::left("controls").resizable(false).show(&ctx, |ui| {
        controls::controls_ui(ui, &mut state);
    });
    egui::CentralPanel::default().show(&ctx, |ui| {
        preview::preview_ui(ui, &mut state);
    });
}

/// Usage: `terrain_viewer [config.ron|config.json] [ui_strings.json]`
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => RenderConfig::load_from_file(path)?,
        None => RenderConfig {
            noise: NoiseConfig { seed: Seed::random(), ..Default::default() },
            ..Default::default()
        },
    };
    let strings = match args.get(2) {
        Some(path) => ui_strings::load_from_file(path)?,
        None => UiStrings::default(),
    };
    let title = strings.app.window_title.clone();
    let resolution = ((config.width + 260) as f32, (config.height + 60) as f32);
    let state = ViewerState::new(config, strings)?;

    App::new()
        .insert_resource(state)
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title,
                    resolution: resolution.into(),
                    ..default()
                }),
                ..default()
            }),
            EguiPlugin,
        ))
        .add_systems(Startup, setup)
        .add_systems(Update, (tick_system, ui_system).chain())
        .run();
    Ok(())
}
