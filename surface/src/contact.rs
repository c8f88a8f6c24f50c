//! Contact-to-impulse translation.
//!
//! A trigger source reports bodies entering or leaving a surface; both kinds
//! of contact disturb the waterline the same way. Each event punches a
//! clamped displacement into the nearest waterline vertex and seeds a ripple
//! there. Rapid repeated contacts are not deduplicated: every event spawns
//! its own ripple, and same-vertex writes within a tick resolve to the last
//! one.

use bevy::prelude::*;
use bevy_log::debug;

use crate::config::SurfaceConfig;
use crate::layout::WaterSurface;
use crate::ripple::{DecayJitter, Ripple};
use crate::spline::Spline;

/// A body touched or left a water surface.
#[derive(Event, Debug, Clone, Copy)]
pub struct SurfaceContactEvent {
    /// The surface the body intersected.
    pub surface: Entity,
    /// Body world position at the time of the trigger.
    pub position: Vec2,
    /// Body vertical velocity at the time of the trigger.
    pub vertical_velocity: f32,
}

/// Maps a world x-coordinate onto a waterline vertex index.
///
/// Contacts beyond either end of the waterline clamp to the nearest dynamic
/// vertex; out-of-range positions are expected, not an error.
pub fn contact_index(
    world_x: f32,
    surface_origin_x: f32,
    base_point_x: f32,
    scale: f32,
    spacing: f32,
    vertex_count: usize,
) -> usize {
    let offset = world_x - surface_origin_x - base_point_x * scale;
    let raw = (offset / spacing).round() as i64 + 1;
    raw.clamp(2, vertex_count as i64 - 1) as usize
}

/// Writes the impulse displacement at `index` and returns it.
///
/// The displacement is clamped to `±max_amplitude` and the vertex height is
/// always written as baseline plus that clamped displacement.
pub fn apply_impulse(
    spline: &mut Spline,
    index: usize,
    vertical_velocity: f32,
    config: &SurfaceConfig,
) -> f32 {
    let position = spline.position(index);
    let raw = position.y + config.impulse_gain * vertical_velocity;
    let displacement =
        (raw - config.baseline).clamp(-config.max_amplitude, config.max_amplitude);

    spline.set_position(index, Vec2::new(position.x, config.baseline + displacement));
    displacement
}

/// Turns each contact event into an impulse and a seeded ripple.
pub fn handle_surface_contacts(
    mut commands: Commands,
    config: Res<SurfaceConfig>,
    mut jitter: ResMut<DecayJitter>,
    mut events: EventReader<SurfaceContactEvent>,
    mut surfaces: Query<(&Transform, &WaterSurface, &mut Spline)>,
) {
    for event in events.read() {
        let Ok((transform, surface, mut spline)) = surfaces.get_mut(event.surface) else {
            continue;
        };
        if surface.vertex_count < 3 {
            // No dynamic vertices to disturb (outline not built, or degenerate).
            continue;
        }

        let index = contact_index(
            event.position.x,
            transform.translation.x,
            surface.base_point.x,
            surface.scale,
            config.spacing,
            surface.vertex_count,
        );
        let displacement = apply_impulse(&mut spline, index, event.vertical_velocity, &config);

        // A full-strength impulse seeds its ripple undecayed; anything milder
        // starts already one decay step down.
        let mut amplitude = displacement;
        if amplitude * amplitude != config.max_amplitude * config.max_amplitude {
            amplitude *= config.decay_rate * jitter.sample();
        }

        debug!(
            "Contact at vertex {index} of {}: displacement {displacement:.3}, ripple seed {amplitude:.3}",
            event.surface
        );
        commands.spawn(Ripple::new(event.surface, index, amplitude));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_outline;

    fn pool() -> (Spline, SurfaceConfig) {
        let config = SurfaceConfig {
            spacing: 0.5,
            ..Default::default()
        };
        let mut spline = Spline::new();
        let n = build_outline(&mut spline, Vec2::new(-2.5, -3.0), 1.0, &config);
        assert_eq!(n, 11);
        (spline, config)
    }

    #[test]
    fn test_contact_maps_to_nearest_vertex() {
        // Vertex i sits at x = -2.5 + (i - 1) * 0.5 for a surface at the origin.
        assert_eq!(contact_index(-2.0, 0.0, -2.5, 1.0, 0.5, 11), 2);
        assert_eq!(contact_index(0.0, 0.0, -2.5, 1.0, 0.5, 11), 6);
        assert_eq!(contact_index(0.1, 0.0, -2.5, 1.0, 0.5, 11), 6);
        assert_eq!(contact_index(2.0, 0.0, -2.5, 1.0, 0.5, 11), 10);
    }

    #[test]
    fn test_contact_beyond_edges_clamps() {
        assert_eq!(contact_index(100.0, 0.0, -2.5, 1.0, 0.5, 11), 10);
        assert_eq!(contact_index(-100.0, 0.0, -2.5, 1.0, 0.5, 11), 2);
        // The left anchor column itself still maps to the first dynamic vertex.
        assert_eq!(contact_index(-2.5, 0.0, -2.5, 1.0, 0.5, 11), 2);
    }

    #[test]
    fn test_contact_respects_surface_origin() {
        // Same world x, surface shifted right by 1: maps two vertices left.
        assert_eq!(contact_index(0.0, 1.0, -2.5, 1.0, 0.5, 11), 4);
    }

    #[test]
    fn test_impulse_is_clamped() {
        let (mut spline, config) = pool();

        let displacement = apply_impulse(&mut spline, 5, -100.0, &config);
        assert_eq!(displacement, -config.max_amplitude);
        assert_eq!(spline.position(5).y, config.baseline - config.max_amplitude);

        let displacement = apply_impulse(&mut spline, 6, 100.0, &config);
        assert_eq!(displacement, config.max_amplitude);
        assert_eq!(spline.position(6).y, config.baseline + config.max_amplitude);
    }

    #[test]
    fn test_mild_impulse_scales_with_velocity() {
        let (mut spline, config) = pool();

        let displacement = apply_impulse(&mut spline, 5, -2.0, &config);
        assert!((displacement - config.impulse_gain * -2.0).abs() < 1e-6);
        assert_eq!(spline.position(5).y, config.baseline + displacement);
    }

    #[test]
    fn test_second_contact_wins() {
        let (mut spline, config) = pool();

        apply_impulse(&mut spline, 5, -4.0, &config);
        let second = apply_impulse(&mut spline, 5, -1.0, &config);

        // Not a sum or average: the later write defines the height, on top of
        // whatever the first impulse left there.
        assert_eq!(spline.position(5).y, config.baseline + second);
    }
}
