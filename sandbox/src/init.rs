//! App assembly for the headless water sandbox.

use std::fs;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_app::ScheduleRunnerPlugin;
use bevy_log::{error, info};
use bevy_rapier2d::prelude::*;
use ron::de::from_str;
use ron::ser::PrettyConfig;
use surface::{DecayJitter, SurfaceConfig, SurfacePlugin, SurfaceSet, WaterSurface};

use crate::bridge::forward_sensor_contacts;
use crate::droplets::{despawn_sunk_droplets, spawn_droplets, DropletSpawner};

/// Step rate of the headless runner.
pub const TICKS_PER_SECOND: u64 = 60;

/// Half-width of the pool in world units.
pub const POOL_HALF_WIDTH: f32 = 4.5;
/// Depth of the pool below the waterline.
pub const POOL_DEPTH: f32 = 3.0;

/// Loads the surface tunables from a RON file.
///
/// A missing file is not an error: the defaults are used and logged.
pub fn load_surface_config(path: &str) -> Result<SurfaceConfig, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        info!("Surface config file not found: {path}. Using defaults.");
        return Ok(SurfaceConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: SurfaceConfig = from_str(&contents)?;

    info!("Loaded surface config from {path}");

    Ok(config)
}

/// Writes the default tunables to `path` as pretty RON.
pub fn write_default_config(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pretty_config = PrettyConfig::new().with_depth_limit(2);
    let serialized = ron::ser::to_string_pretty(&SurfaceConfig::default(), pretty_config)?;
    fs::write(path, serialized)?;
    Ok(())
}

pub fn run(config_path: Option<String>, seed: Option<u64>, drop_interval: f32) {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICKS_PER_SECOND as f64,
        ))),
    );
    app.add_plugins(bevy_log::LogPlugin::default());
    app.add_plugins(TransformPlugin);
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());

    let config = match config_path.as_deref() {
        Some(path) => match load_surface_config(path) {
            Ok(config) => config,
            Err(err) => {
                error!("Failed to load surface config {path}: {err}");
                panic!()
            }
        },
        None => SurfaceConfig::default(),
    };

    if let Err(err) = config.validate() {
        error!("Invalid surface config: {err}");
        panic!()
    }

    info!("Starting water sandbox: {config:?}");

    app.insert_resource(config);
    app.insert_resource(match seed {
        Some(seed) => DecayJitter::seeded(seed),
        None => DecayJitter::default(),
    });
    app.add_plugins(SurfacePlugin);

    app.insert_resource(DropletSpawner::new(drop_interval));
    app.add_systems(Startup, spawn_pool);
    app.add_systems(
        Update,
        (
            spawn_droplets,
            despawn_sunk_droplets,
            forward_sensor_contacts.before(SurfaceSet::Waves),
        ),
    );

    app.run();
}

/// Spawns the water body: the simulated surface plus the sensor volume the
/// droplets fall through.
fn spawn_pool(mut commands: Commands) {
    commands.spawn((
        WaterSurface::new(Vec2::new(-POOL_HALF_WIDTH, -POOL_DEPTH), 1.0),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Collider::compound(vec![(
            Vec2::new(0.0, -POOL_DEPTH / 2.0),
            0.0,
            Collider::cuboid(POOL_HALF_WIDTH, POOL_DEPTH / 2.0),
        )]),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_ron_round_trip() {
        let config = SurfaceConfig::default();
        let serialized = ron::ser::to_string(&config).unwrap();
        let parsed: SurfaceConfig = from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let config = load_surface_config("does-not-exist.ron").unwrap();
        assert_eq!(config, SurfaceConfig::default());
    }
}
