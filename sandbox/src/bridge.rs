//! Rapier-to-surface trigger bridge.
//!
//! Sensor intersection events are the trigger source: both the start and the
//! end of an intersection disturb the surface, since a departing body drags
//! the waterline too. Bodies without a velocity are ignored, since there is
//! nothing to derive an impulse from.

use bevy::prelude::*;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_rapier2d::prelude::*;
use surface::{SurfaceContactEvent, WaterSurface};

/// Forwards sensor intersections involving a water surface as contact events.
pub fn forward_sensor_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut contacts: EventWriter<SurfaceContactEvent>,
    surfaces: Query<(), With<WaterSurface>>,
    bodies: Query<(&Transform, &Velocity)>,
) {
    for event in collisions.read() {
        let (first, second) = match event {
            CollisionEvent::Started(first, second, _) => (*first, *second),
            CollisionEvent::Stopped(first, second, _) => (*first, *second),
        };

        let (surface, body) = if surfaces.contains(first) {
            (first, second)
        } else if surfaces.contains(second) {
            (second, first)
        } else {
            continue;
        };

        let Ok((transform, velocity)) = bodies.get(body) else {
            continue;
        };

        contacts.write(SurfaceContactEvent {
            surface,
            position: transform.translation.truncate(),
            vertical_velocity: velocity.linvel.y,
        });
    }
}
