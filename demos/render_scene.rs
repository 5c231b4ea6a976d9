//! Render a small scene at several sample rates and write each frame as PNG.
//!
//! Run: RUST_LOG=debug cargo run --example render_scene -- [output-dir]

use std::path::PathBuf;

use trueno_raster::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);

    let mut checker = Texture::checkerboard(256, 256, 2, Rgba::BLACK, Rgba::WHITE)?;
    checker.generate_mips(0)?;

    let star: Vec<Point> = (0..10)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::PI / 5.0 - std::f32::consts::FRAC_PI_2;
            let radius = if i % 2 == 0 { 40.0 } else { 16.0 };
            Point::new(190.0 + radius * angle.cos(), 60.0 + radius * angle.sin())
        })
        .collect();

    let scene = [
        Primitive::textured_quad(Point::new(8.0, 8.0), Point::new(120.0, 120.0), &checker),
        Primitive::triangle(
            Point::new(20.0, 230.0),
            Point::new(120.0, 140.0),
            Point::new(150.0, 250.0),
            Color::new(0.1, 0.4, 0.9, 0.8),
        ),
        Primitive::triangle(
            Point::new(90.0, 150.0),
            Point::new(240.0, 170.0),
            Point::new(140.0, 245.0),
            Color::new(0.9, 0.2, 0.1, 0.6),
        ),
        Primitive::Polyline {
            points: &star,
            color: Color::BLACK,
            closed: true,
        },
        Primitive::line(0.0, 255.0, 255.0, 128.0, Rgba::GREEN),
        Primitive::point(250.0, 250.0, Rgba::RED),
    ];

    let mut renderer = SoftwareRenderer::new(RenderConfig::new(256, 256))?;
    let mut frame = renderer.new_framebuffer()?;

    for rate in [1, 2, 4] {
        renderer.set_sample_rate(rate)?;
        renderer.draw_frame(&scene, &mut frame)?;

        let path = out_dir.join(format!("scene_rate{rate}.png"));
        PngEncoder::write_to_file(&frame, &path)?;
        log::info!(
            "rate {rate}: wrote {} (mean color {:?})",
            path.display(),
            frame.mean_color()
        );
    }

    Ok(())
}
