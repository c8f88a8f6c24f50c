//! Outline construction for newly added water surfaces.
//!
//! A surface outline is built exactly once: two zero-handle anchors at the
//! base corners, then the waterline points between them, left to right at the
//! baseline height. After construction only the heights of the waterline
//! points change.

use bevy::prelude::*;
use bevy_log::{error, info};

use crate::config::SurfaceConfig;
use crate::spline::{Spline, TangentMode};

/// One simulated water body.
///
/// `vertex_count` is zero until the outline has been built; contacts against
/// a surface without an outline are ignored.
#[derive(Component, Debug, Clone)]
pub struct WaterSurface {
    /// Bottom-left corner of the body in surface-local space.
    pub base_point: Vec2,
    /// Horizontal scale applied by the surface's transform.
    pub scale: f32,
    /// Total number of outline control points, fixed at construction.
    pub vertex_count: usize,
}

impl WaterSurface {
    /// A surface whose outline is still to be built.
    pub fn new(base_point: Vec2, scale: f32) -> Self {
        Self {
            base_point,
            scale,
            vertex_count: 0,
        }
    }
}

/// Vertical velocity of each dynamic vertex; slot 0 belongs to vertex 2.
///
/// Owned by the relaxation sweep; nothing else writes it.
#[derive(Component, Debug, Clone, Default)]
pub struct SurfaceVelocities(pub Vec<f32>);

/// Number of outline points for a body of the given geometry.
pub fn vertex_count(base_point_x: f32, scale: f32, spacing: f32) -> usize {
    (-base_point_x * scale * 2.0 / spacing) as usize + 1
}

/// Builds the outline control points into an empty spline.
/// Returns the vertex count.
pub fn build_outline(
    spline: &mut Spline,
    base_point: Vec2,
    scale: f32,
    config: &SurfaceConfig,
) -> usize {
    debug_assert!(spline.is_empty(), "outline is built exactly once");

    let n = vertex_count(base_point.x, scale, config.spacing);

    // Base corner anchors: mirrored right corner first, then the base point.
    spline.insert_point(0, Vec2::new(-base_point.x, base_point.y));
    spline.insert_point(1, base_point);

    let step = config.spacing / scale;
    let handle = config.handle_scale * step;
    let mut x = base_point.x;
    for i in 2..n {
        x += step;
        spline.insert_point(i, Vec2::new(x, config.baseline));
        spline.set_tangent_mode(i, TangentMode::Continuous);
        spline.set_left_tangent(i, Vec2::new(-handle, 0.0));
        spline.set_right_tangent(i, Vec2::new(handle, 0.0));
        spline.set_height(i, config.point_height);
    }

    // Zero-curvature handles where the waterline meets the boundary.
    for i in [0, 1, n.saturating_sub(1)] {
        spline.set_tangent_mode(i, TangentMode::Continuous);
        spline.set_left_tangent(i, Vec2::ZERO);
        spline.set_right_tangent(i, Vec2::ZERO);
    }

    n
}

/// Builds the outline of every surface added since the last run.
pub fn initialize_surfaces(
    mut commands: Commands,
    config: Res<SurfaceConfig>,
    mut surfaces: Query<(Entity, &mut WaterSurface), Added<WaterSurface>>,
) {
    for (entity, mut surface) in surfaces.iter_mut() {
        if let Err(err) = config.validate() {
            error!("Refusing to lay out water surface {entity}: {err}");
            continue;
        }

        let mut spline = Spline::new();
        let n = build_outline(&mut spline, surface.base_point, surface.scale, &config);
        surface.vertex_count = n;

        commands
            .entity(entity)
            .insert((spline, SurfaceVelocities(vec![0.0; n.saturating_sub(2)])));

        info!("Laid out water surface {entity} with {n} control points");
    }
}
