//! Per-tick spring relaxation of the waterline.
//!
//! Each waterline vertex is an independent 1-D damped spring: there is no
//! force coupling between neighbours, so the apparent wave motion comes
//! entirely from ripple propagation writing neighbouring heights over time.

use bevy::prelude::*;

use crate::config::SurfaceConfig;
use crate::layout::{SurfaceVelocities, WaterSurface};
use crate::spline::Spline;

/// One explicit-Euler relaxation sweep over a surface's dynamic vertices.
///
/// Processing order is irrelevant: no vertex reads another vertex's state.
pub fn relax_columns(
    spline: &mut Spline,
    velocities: &mut [f32],
    baseline: f32,
    spring_constant: f32,
    damping: f32,
) {
    for (slot, velocity) in velocities.iter_mut().enumerate() {
        let index = slot + 2;
        let position = spline.position(index);

        let displacement = position.y - baseline;
        *velocity -= spring_constant * displacement;
        *velocity *= damping;

        spline.set_position(index, Vec2::new(position.x, position.y + *velocity));
    }
}

/// Fixed-tick system: one relaxation sweep per surface, every tick,
/// regardless of ripple activity.
pub fn relax_surface_springs(
    config: Res<SurfaceConfig>,
    mut surfaces: Query<(&WaterSurface, &mut Spline, &mut SurfaceVelocities)>,
) {
    for (_surface, mut spline, mut velocities) in surfaces.iter_mut() {
        relax_columns(
            &mut spline,
            &mut velocities.0,
            config.baseline,
            config.spring_constant,
            config.damping,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_outline;

    fn displaced_surface(displacement: f32) -> (Spline, Vec<f32>, SurfaceConfig) {
        let config = SurfaceConfig {
            spacing: 0.5,
            ..Default::default()
        };
        let mut spline = Spline::new();
        let n = build_outline(&mut spline, Vec2::new(-2.5, -3.0), 1.0, &config);

        let position = spline.position(5);
        spline.set_position(5, Vec2::new(position.x, config.baseline + displacement));

        (spline, vec![0.0; n - 2], config)
    }

    fn displacement_at(spline: &Spline, baseline: f32, index: usize) -> f32 {
        spline.position(index).y - baseline
    }

    #[test]
    fn test_displaced_vertex_settles_to_baseline() {
        let (mut spline, mut velocities, config) = displaced_surface(0.3);

        for _ in 0..500 {
            relax_columns(&mut spline, &mut velocities, config.baseline, 0.09, 0.95);
        }

        assert!(displacement_at(&spline, config.baseline, 5).abs() < 1e-3);
    }

    #[test]
    fn test_oscillation_envelope_decays() {
        let (mut spline, mut velocities, config) = displaced_surface(0.3);

        // Peak |displacement| over consecutive windows of one period each.
        let mut peaks = Vec::new();
        for _ in 0..5 {
            let mut peak: f32 = 0.0;
            for _ in 0..25 {
                relax_columns(&mut spline, &mut velocities, config.baseline, 0.09, 0.95);
                peak = peak.max(displacement_at(&spline, config.baseline, 5).abs());
            }
            peaks.push(peak);
        }

        for pair in peaks.windows(2) {
            assert!(pair[1] <= pair[0], "envelope grew: {peaks:?}");
        }
    }

    #[test]
    fn test_zero_spring_constant_leaves_surface_static() {
        let (mut spline, mut velocities, config) = displaced_surface(0.3);

        for _ in 0..100 {
            relax_columns(&mut spline, &mut velocities, config.baseline, 0.0, 0.9);
        }

        assert_eq!(displacement_at(&spline, config.baseline, 5), 0.3);
    }

    #[test]
    fn test_resting_surface_stays_at_baseline() {
        // damping = 1 must not make a resting surface drift.
        let (mut spline, mut velocities, config) = displaced_surface(0.0);

        for _ in 0..100 {
            relax_columns(&mut spline, &mut velocities, config.baseline, 0.09, 1.0);
        }

        for index in 2..spline.len() {
            assert_eq!(displacement_at(&spline, config.baseline, index), 0.0);
        }
    }

    #[test]
    fn test_anchor_points_never_move() {
        let (mut spline, mut velocities, config) = displaced_surface(0.3);
        let anchors = [spline.position(0), spline.position(1)];

        for _ in 0..100 {
            relax_columns(&mut spline, &mut velocities, config.baseline, 0.09, 0.9);
        }

        assert_eq!(spline.position(0), anchors[0]);
        assert_eq!(spline.position(1), anchors[1]);
    }
}
