//! Bevy plugin wiring for the surface simulation.

use bevy::prelude::*;

use crate::config::SurfaceConfig;
use crate::contact::{handle_surface_contacts, SurfaceContactEvent};
use crate::layout::initialize_surfaces;
use crate::ripple::{propagate_ripples, DecayJitter};
use crate::spring::relax_surface_springs;

/// System sets of the surface simulation, split by driving clock.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceSet {
    /// Outline construction for newly added surfaces.
    Layout,
    /// Contact intake and ripple propagation, on the wall clock.
    Waves,
    /// Spring relaxation, on the fixed simulation clock.
    Relax,
}

/// Plugin that adds the deformable water surface simulation.
///
/// This plugin:
/// - Builds the outline of every `WaterSurface` once, when it appears
/// - Relaxes the waterline toward the baseline every fixed tick
/// - Turns `SurfaceContactEvent`s into impulses and in-flight ripples
///
/// The trigger source is external: anything that writes
/// `SurfaceContactEvent`s drives the surface.
pub struct SurfacePlugin;

impl Plugin for SurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceConfig>()
            .init_resource::<DecayJitter>()
            .register_type::<SurfaceConfig>()
            .add_event::<SurfaceContactEvent>()
            .configure_sets(Update, (SurfaceSet::Layout, SurfaceSet::Waves).chain())
            .add_systems(Update, initialize_surfaces.in_set(SurfaceSet::Layout))
            .add_systems(
                Update,
                (handle_surface_contacts, propagate_ripples)
                    .chain()
                    .in_set(SurfaceSet::Waves),
            )
            .add_systems(
                FixedUpdate,
                relax_surface_springs.in_set(SurfaceSet::Relax),
            );
    }
}
