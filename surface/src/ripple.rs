//! Outward ripple propagation.
//!
//! Every contact spawns one `Ripple` entity. The ripple fans out from its
//! origin, writing one more vertex on each side per step, with a wall-clock
//! delay between steps and a randomised decay of the written amplitude. The
//! fixed-tick relaxation keeps pulling the written heights back toward the
//! baseline, which is what turns these sparse writes into a travelling wave.
//!
//! Ripples are cooperative and unbounded: any number may be alive at once,
//! and overlapping ripples overwrite each other's vertices; last write wins.

use bevy::prelude::*;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SurfaceConfig;
use crate::layout::WaterSurface;
use crate::spline::Spline;

const JITTER_MIN: f32 = 0.8;
const JITTER_MAX: f32 = 1.2;

/// Injected randomness for the per-step decay jitter.
///
/// Entropy-seeded by default. Seed it for reproducible propagation, or
/// disable it to pin the jitter factor at exactly 1.0.
#[derive(Resource)]
pub struct DecayJitter {
    rng: Option<StdRng>,
}

impl Default for DecayJitter {
    fn default() -> Self {
        Self {
            rng: Some(StdRng::from_entropy()),
        }
    }
}

impl DecayJitter {
    /// Reproducible jitter from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// No jitter; every sample is exactly 1.0.
    pub fn disabled() -> Self {
        Self { rng: None }
    }

    /// Next jitter factor, uniform in `[0.8, 1.2)`.
    pub fn sample(&mut self) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.gen_range(JITTER_MIN..JITTER_MAX),
            None => 1.0,
        }
    }
}

/// One in-flight propagation run.
///
/// Spawned per contact, despawned on termination. There is no external
/// cancellation: a ripple always runs until it decays below the minimum
/// amplitude or reaches both edges, unless its surface disappears first.
#[derive(Component, Debug)]
pub struct Ripple {
    /// Surface whose waterline this ripple writes into.
    pub surface: Entity,
    /// Leftward cursor; starts at the origin vertex.
    pub left: i32,
    /// Rightward cursor; starts at the origin vertex.
    pub right: i32,
    /// Current signed displacement from the baseline.
    pub amplitude: f32,
    /// Wall-clock delay until the next propagation step.
    pub timer: Timer,
}

impl Ripple {
    /// A ripple seeded at `origin` with the given post-impulse amplitude.
    ///
    /// The timer starts elapsed so the first step runs on the spawn frame;
    /// every later step waits the configured delay.
    pub fn new(surface: Entity, origin: usize, amplitude: f32) -> Self {
        Self {
            surface,
            left: origin as i32,
            right: origin as i32,
            amplitude,
            timer: Timer::from_seconds(0.0, TimerMode::Once),
        }
    }
}

/// Outcome of a single propagation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RippleStep {
    /// Keep propagating after the next delay.
    Continue,
    /// Decayed below the minimum amplitude or reached both edges.
    Finished,
}

/// Advances a ripple by one step against its surface's waterline.
///
/// The amplitude decay happens only on `Continue`, so a terminating step
/// consumes no jitter sample.
pub fn step_ripple(
    ripple: &mut Ripple,
    spline: &mut Spline,
    vertex_count: usize,
    config: &SurfaceConfig,
    jitter: &mut DecayJitter,
) -> RippleStep {
    let n = vertex_count as i32;

    if ripple.amplitude * ripple.amplitude < config.min_amplitude * config.min_amplitude {
        return RippleStep::Finished;
    }

    ripple.left -= 1;
    if ripple.left > 1 {
        let index = ripple.left as usize;
        let position = spline.position(index);
        spline.set_position(index, Vec2::new(position.x, config.baseline + ripple.amplitude));
    }

    ripple.right += 1;
    if ripple.right < n {
        let index = ripple.right as usize;
        let position = spline.position(index);
        spline.set_position(index, Vec2::new(position.x, config.baseline + ripple.amplitude));
    }

    if ripple.left <= 1 && ripple.right >= n {
        return RippleStep::Finished;
    }

    ripple.amplitude *= config.decay_rate * jitter.sample();
    RippleStep::Continue
}

/// Wall-clock system stepping every in-flight ripple on its own timer.
///
/// A ripple whose surface entity no longer exists is dropped before it can
/// write into it.
pub fn propagate_ripples(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<SurfaceConfig>,
    mut jitter: ResMut<DecayJitter>,
    mut ripples: Query<(Entity, &mut Ripple)>,
    mut surfaces: Query<(&WaterSurface, &mut Spline)>,
) {
    for (entity, mut ripple) in ripples.iter_mut() {
        ripple.timer.tick(time.delta());
        if !ripple.timer.finished() {
            continue;
        }

        let Ok((surface, mut spline)) = surfaces.get_mut(ripple.surface) else {
            debug!("Dropping ripple {entity}: its surface is gone");
            commands.entity(entity).despawn();
            continue;
        };

        match step_ripple(
            &mut ripple,
            &mut spline,
            surface.vertex_count,
            &config,
            &mut jitter,
        ) {
            RippleStep::Finished => {
                commands.entity(entity).despawn();
            }
            RippleStep::Continue => {
                ripple.timer = Timer::from_seconds(config.step_delay, TimerMode::Once);
            }
        }
    }
}
