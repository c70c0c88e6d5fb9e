//! Native entry point: replays the demo script headlessly and builds a Vello scene.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting ShapeToy (headless)");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(feature = "native")]
fn run() -> Result<(), shapetoy_app::AppError> {
    use shapetoy_app::{AppConfig, headless};

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let session = headless::replay(&config, &headless::demo_script());
    let mut renderer = shapetoy_render::VelloRenderer::new();
    headless::render(&session, &config, &mut renderer)?;

    for shape in session.canvas().shapes() {
        let anchor = shape.anchor();
        println!("{} {} at ({}, {})", shape.kind().name(), shape.id(), anchor.x, anchor.y);
    }
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
