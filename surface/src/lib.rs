//! Deformable 2D water surface simulation.
//!
//! A water body is an entity whose outline is a row of spline control points.
//! The waterline between the two base anchors is dynamic: every fixed tick a
//! damped spring pulls each vertex back toward its resting height, and each
//! contact with a moving body punches a displacement into the waterline that
//! fans outward as a decaying ripple.

pub mod config;
pub mod contact;
pub mod layout;
pub mod plugin;
pub mod ripple;
pub mod spline;
pub mod spring;

pub use config::*;
pub use contact::*;
pub use layout::*;
pub use plugin::*;
pub use ripple::*;
pub use spline::*;
pub use spring::*;
