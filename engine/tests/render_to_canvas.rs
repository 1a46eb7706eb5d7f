use terrain_engine::*;

fn render(config: RenderConfig) -> (Canvas, usize) {
    let mut pipeline = RenderPipeline::new(config.clone()).unwrap();
    let mut canvas = Canvas::new(config.width, config.height);
    let mut ticks = 0;
    while !pipeline.is_complete() {
        canvas.apply_all(&pipeline.tick());
        ticks += 1;
    }
    (canvas, ticks)
}

#[test]
fn four_regions_plus_overlay() {
    let config = RenderConfig { width: 100, height: 100, region_size: 50, ..Default::default() };
    let (canvas, ticks) = render(config);
    assert_eq!(ticks, 5);
    // dividers at x = 0 / 50 and y = 0 / 50
    assert_eq!(canvas.pixel(50, 73), Some(Color::BLACK));
    assert_eq!(canvas.pixel(12, 50), Some(Color::BLACK));
    assert_eq!(canvas.pixel(0, 99), Some(Color::BLACK));
}

#[test]
fn every_pixel_gets_a_palette_color_without_blending() {
    let mut config = RenderConfig { width: 73, height: 41, region_size: 16, ..Default::default() };
    config.noise.seed = Seed(77);
    config.display.show_grid = false;
    let stops: Vec<Color> = config.palette.stops().iter().map(|s| s.color).collect();

    let (canvas, ticks) = render(config);
    assert_eq!(ticks, 5 * 3 + 1);
    for y in 0..41 {
        for x in 0..73 {
            let c = canvas.pixel(x, y).unwrap();
            assert!(stops.contains(&c), "({x},{y}) = {c}");
        }
    }
}

#[test]
fn deterministic_for_both_backends() {
    let mut config = RenderConfig { width: 48, height: 48, region_size: 20, ..Default::default() };
    config.noise.seed = Seed(5);
    config.noise.scale = 0.05;
    config.display.interpolate_colors = true;

    let (a, _) = render(config.clone());
    let (b, _) = render(config.clone());
    assert_eq!(a.as_raw(), b.as_raw());

    config.noise.backend = NoiseBackend::FastNoise;
    let (c, _) = render(config.clone());
    let (d, _) = render(config);
    assert_eq!(c.as_raw(), d.as_raw());
}

#[test]
fn restart_mid_run_from_loaded_config() {
    let config = RenderConfig::from_ron_str("(width: 30, height: 20, region_size: 10, noise: (seed: 3))").unwrap();
    let mut pipeline = RenderPipeline::new(config.clone()).unwrap();
    pipeline.tick();
    pipeline.tick();
    assert!((pipeline.progress_fraction() - 2.0 / 6.0).abs() < 1e-12);

    pipeline.restart(Some(RenderConfig { noise: NoiseConfig { seed: Seed(4), ..config.noise.clone() }, ..config })).unwrap();
    assert_eq!(pipeline.progress_fraction(), 0.0);
    assert_eq!(pipeline.tick()[0], DrawCommand::ClearCanvas(Color::BLACK));
}

#[test]
fn export_only_after_completion() {
    let config = RenderConfig { width: 20, height: 20, region_size: 10, ..Default::default() };
    let mut pipeline = RenderPipeline::new(config).unwrap();
    let mut canvas = Canvas::new(20, 20);
    canvas.apply_all(&pipeline.tick());

    let path = std::env::temp_dir().join(format!("terrain_engine_it_{}.png", std::process::id()));
    assert!(matches!(export_image(&canvas, &path, pipeline.is_complete()), Err(ExportError::Incomplete)));

    while !pipeline.is_complete() {
        canvas.apply_all(&pipeline.tick());
    }
    export_image(&canvas, &path, pipeline.is_complete()).unwrap();
    assert!(path.exists());
    std::fs::remove_file(&path).ok();
}

#[test]
fn sample_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../configs/islands.ron");
    let config = RenderConfig::load_from_file(path).unwrap();
    assert_eq!(config.palette.len(), 6);
    assert_eq!(config.grid().unwrap().total_regions(), 20 * 15);
    assert!(config.display.interpolate_colors);
}
