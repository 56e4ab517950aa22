mod config;
mod sensor;

use {
    crate::config::Config,
    bodyview::{
        Anchor, BodyRoot, Clocks, Engine, FrameSynchronizer, Global3, HandPositions,
        SceneSystem, SystemContext,
    },
    color_eyre::Report,
    nalgebra as na,
};

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    install_tracing();

    tracing::info!("Running at {}", std::env::current_dir()?.display());
    let config = Config::load_default()?;
    tracing::info!("Config loaded: {:?}", config);

    let mut engine = Engine::new();
    engine.world.spawn((
        Anchor,
        Global3::from_position(na::Point3::from(config.demo.anchor)),
    ));

    let (source, sensor) = sensor::spawn(config.demo.clone());
    let sync = FrameSynchronizer::from_config(source, &config.engine.skeleton, &engine.world);

    let report_every = config.demo.frame_rate() as u64;
    engine
        .add_system(sync)
        .add_system(SceneSystem)
        .add_system(move |ctx: SystemContext<'_>| {
            if ctx.clocks.frame % report_every != 0 {
                return;
            }

            let bodies = ctx.world.query::<&BodyRoot>().iter().count();
            let hands = ctx.resources.get_or_default::<HandPositions>();
            tracing::info!(
                bodies,
                right = ?hands.right,
                left = ?hands.left,
                "Frame {}",
                ctx.clocks.frame
            );
        });

    let period = config.demo.period();
    let mut clocks = Clocks::new();

    for _ in 0..config.demo.frames {
        let clock = clocks.step();
        engine.advance(clock);
        std::thread::sleep(period.saturating_sub(clock.step.elapsed()));
    }

    // Dropping the engine drops the receiver and stops the sensor.
    drop(engine);
    sensor
        .join()
        .map_err(|_| eyre::eyre!("Sensor thread panicked"))?;

    Ok(())
}

fn install_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(tracing_error::ErrorLayer::default())
        .init();
}
