//! Droplet rain for the sandbox.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use log::info;
use rand::Rng;

use crate::init::POOL_HALF_WIDTH;

/// Height droplets are released from.
const DROP_HEIGHT: f32 = 4.0;
/// Droplets below this have sunk out of the world and are removed.
const SINK_FLOOR: f32 = -8.0;
const DROPLET_RADIUS: f32 = 0.12;

#[derive(Component)]
pub struct Droplet;

/// Spawn cadence for the droplet rain.
#[derive(Resource)]
pub struct DropletSpawner {
    timer: Timer,
}

impl DropletSpawner {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
        }
    }
}

/// Drops a ball somewhere over the pool whenever the timer fires.
pub fn spawn_droplets(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<DropletSpawner>,
) {
    if !spawner.timer.tick(time.delta()).just_finished() {
        return;
    }

    let x = rand::thread_rng().gen_range(-POOL_HALF_WIDTH * 0.9..POOL_HALF_WIDTH * 0.9);
    info!("Dropping a droplet at x = {x:.2}");

    commands.spawn((
        Droplet,
        RigidBody::Dynamic,
        Collider::ball(DROPLET_RADIUS),
        Velocity::zero(),
        Transform::from_xyz(x, DROP_HEIGHT, 0.0),
    ));
}

/// Removes droplets that have sunk past the bottom of the world.
pub fn despawn_sunk_droplets(
    mut commands: Commands,
    droplets: Query<(Entity, &Transform), With<Droplet>>,
) {
    for (entity, transform) in droplets.iter() {
        if transform.translation.y < SINK_FLOOR {
            commands.entity(entity).despawn();
        }
    }
}
