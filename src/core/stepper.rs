use log::trace;
use rand::Rng;

use crate::core::boundary::BoundaryReflector;
use crate::core::collision::{CollisionReport, PairwiseCollisionResolver};
use crate::core::config::{Capabilities, SimulationParameters, VesselBounds};
use crate::core::motion::StochasticMotionGenerator;
use crate::core::particle::{Particle, DIM};

/// Outcome of one completed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based index of the step that produced this report.
    pub step: u64,
    pub collisions: CollisionReport,
}

/// Runs one time step: noise, wall reflection, overlap correction and, for
/// inertial ensembles, velocity integration. Holds no state between calls.
///
/// Overlap correction and integration may push a particle past a wall, so the
/// reflector runs once more at the end. Every completed step therefore leaves
/// all centres inside the band.
#[derive(Debug, Clone, Copy)]
pub struct SimulationStepper {
    motion: StochasticMotionGenerator,
    reflector: BoundaryReflector,
    resolver: PairwiseCollisionResolver,
    integrate_velocity: bool,
}

impl SimulationStepper {
    /// Build the stages for one ensemble; `caps` decides which optional ones run.
    pub fn new(
        bounds: VesselBounds,
        radius: f64,
        params: &SimulationParameters,
        caps: Capabilities,
    ) -> Self {
        Self {
            motion: StochasticMotionGenerator::new(params, caps),
            reflector: BoundaryReflector::new(bounds, radius),
            resolver: PairwiseCollisionResolver::new(caps.has_velocity_damping),
            integrate_velocity: caps.has_velocity_damping,
        }
    }

    /// Advance `particles` by `dt`. `dt` must already be validated.
    pub fn step<R: Rng>(
        &self,
        particles: &mut [Particle],
        dt: f64,
        rng: &mut R,
    ) -> CollisionReport {
        self.motion.apply(particles, dt, rng);
        self.reflector.apply(particles);
        let report = self.resolver.resolve(particles, rng);
        if self.integrate_velocity {
            for p in particles.iter_mut() {
                for k in 0..DIM {
                    p.r[k] += p.v[k] * dt;
                }
            }
        }
        self.reflector.apply(particles);
        trace!(
            "step dt={dt}: {} contacts, {} degenerate",
            report.contacts,
            report.degenerate
        );
        report
    }

    /// The wall stage, shared with containment checks.
    #[inline]
    pub fn reflector(&self) -> &BoundaryReflector {
        &self.reflector
    }

    /// Whether velocities are integrated into positions each step.
    #[inline]
    pub fn integrates_velocity(&self) -> bool {
        self.integrate_velocity
    }
}
