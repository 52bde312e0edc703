use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use clap_serde_derive::{clap::Parser, ClapSerde};
use log::{debug, info};
use shoal_lib::{
    birdwatcher::Birdwatcher,
    collaborators::EatenCounter,
    flock::BoidManager,
    glam::Vec2,
    options::{SaveOptions, SimOptions, TrackerType, WorldSize},
    predator::Shark,
};

mod cliargs;
use cliargs::{Args, Config};

fn main() -> Result<()> {
    let mut args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = load_config(&mut args)?;
    debug!("effective configuration:\n{}", serde_yaml::to_string(&config)?);

    let options = sim_options(&config);
    let save_options = SaveOptions {
        save_locations: config.save,
        save_locations_path: Some(config.save_path.clone()),
        save_locations_timestamp: config.save_timestamp,
    };
    let world = options.world;

    let shark = Shark::new(
        Vec2::new(world.width / 2., options.water_surface_height + 100.),
        Vec2::new(config.shark_speed, config.shark_speed / 3.),
        Vec2::new(60., 25.),
    );

    let mut manager = BoidManager::new(options, shark, EatenCounter::default())
        .context("Invalid simulation options")?;
    let mut bird_watcher = Birdwatcher::new(config.sample_rate);

    info!("running {} ticks", config.ticks);
    let progress_every = (config.ticks / 10).max(1);

    for tick in 1..=config.ticks {
        manager.predator_mut().patrol(&world);
        manager.tick();
        bird_watcher.watch(&mut manager);

        if tick % progress_every == 0 {
            info!(
                "tick {}: {} boids, {} alive, {} eaten",
                tick,
                manager.len(),
                manager.live_count(),
                manager.eaten()
            );
        }
    }

    let data = bird_watcher
        .pop_data_save(&save_options)
        .context("Failed to save recorded locations")?;

    info!(
        "done, the shark ate {} fish, {} samples recorded",
        manager.score().count,
        data.len()
    );

    Ok(())
}

/// Defaults, overridden by the config file if there is one, overridden by the
/// command line.
fn load_config(args: &mut Args) -> Result<Config> {
    let path = args.config_path.clone();

    if !path.exists() {
        debug!("no config file at {}, using defaults", path.display());
        return Ok(Config::from(&mut args.config));
    }

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let from_file = parse_config(&path, &text)
        .with_context(|| format!("Error in configuration file {}", path.display()))?;

    info!("loaded configuration from {}", path.display());
    Ok(Config::from(from_file).merge(&mut args.config))
}

fn parse_config(path: &Path, text: &str) -> Result<<Config as ClapSerde>::Opt> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(toml::from_str(text)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(text)?),
        other => bail!("unsupported config format {:?}, expected toml or yaml", other),
    }
}

fn sim_options(config: &Config) -> SimOptions {
    let defaults = SimOptions::default();

    SimOptions {
        init_boids: config.no_boids,
        max_boids: config.max_boids,
        world: WorldSize::new(config.world_width, config.world_height),
        water_surface_height: config.water_surface,
        ticks_per_second: config.ticks_per_second,
        alignment_radius: config.alignment_radius,
        cohesion_radius: config.cohesion_radius,
        separation_radius: config.separation_radius,
        collision_radius: config.collision_radius,
        max_speed: config.max_speed,
        max_force: config.max_force,
        tracker: if config.grid {
            TrackerType::Grid
        } else {
            TrackerType::Naive
        },
        seed: match config.seed {
            0 => None,
            seed => Some(seed),
        },
        ..defaults
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use shoal_lib::options::TrackerType;

    use super::{parse_config, sim_options, Config};

    #[test]
    fn toml_overrides_defaults() {
        let opt = parse_config(Path::new("shoal.toml"), "no_boids = 12\ngrid = true\nseed = 5\n").unwrap();
        let options = sim_options(&Config::from(opt));

        assert_eq!(options.init_boids, 12);
        assert_eq!(options.tracker, TrackerType::Grid);
        assert_eq!(options.seed, Some(5));
        assert_eq!(options.max_speed, 2.);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn yaml_is_accepted() {
        let opt = parse_config(Path::new("shoal.yml"), "world_height: 900.0\n").unwrap();
        let options = sim_options(&Config::from(opt));

        assert_eq!(options.world.height, 900.);
        assert_eq!(options.seed, None);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(parse_config(Path::new("shoal.ini"), "no_boids = 3").is_err());
    }
}
