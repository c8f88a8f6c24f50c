//! Control-point outline of a water body.
//!
//! The simulation owns only the outline *data*: an ordered list of control
//! points with bezier tangent handles, the same shape a sprite-shape renderer
//! consumes. Vertex x-coordinates are fixed once the outline is built; only
//! the heights change at runtime, and every height read or write goes through
//! the accessors here.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// How the two tangent handles of a control point relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TangentMode {
    /// Handles are independent; the outline may kink at this point.
    #[default]
    Broken,
    /// Both handles lie on one smooth curve through the point.
    Continuous,
}

/// One control point of the outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Vec2,
    pub left_tangent: Vec2,
    pub right_tangent: Vec2,
    pub tangent_mode: TangentMode,
    /// Edge height attribute consumed by outline renderers.
    pub height: f32,
}

impl ControlPoint {
    /// A sharp corner point with zero-length handles.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            left_tangent: Vec2::ZERO,
            right_tangent: Vec2::ZERO,
            tangent_mode: TangentMode::Broken,
            height: 1.0,
        }
    }
}

/// Ordered control points forming the outline of one water body.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spline {
    points: Vec<ControlPoint>,
}

impl Spline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of control points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the outline has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All control points, for renderers.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Position of the control point at `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Vec2 {
        self.points[index].position
    }

    /// Moves the control point at `index`.
    #[inline]
    pub fn set_position(&mut self, index: usize, position: Vec2) {
        self.points[index].position = position;
    }

    /// Inserts a new corner point at `index`, shifting later points right.
    pub fn insert_point(&mut self, index: usize, position: Vec2) {
        self.points.insert(index, ControlPoint::new(position));
    }

    pub fn set_tangent_mode(&mut self, index: usize, mode: TangentMode) {
        self.points[index].tangent_mode = mode;
    }

    pub fn set_left_tangent(&mut self, index: usize, tangent: Vec2) {
        self.points[index].left_tangent = tangent;
    }

    pub fn set_right_tangent(&mut self, index: usize, tangent: Vec2) {
        self.points[index].right_tangent = tangent;
    }

    pub fn set_height(&mut self, index: usize, height: f32) {
        self.points[index].height = height;
    }
}
