use log::debug;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

use crate::core::collision::residual_overlap;
use crate::core::config::{validate_dt, Capabilities, EnsembleConfig, VesselBounds};
use crate::core::particle::{Particle, DIM};
use crate::core::snapshot::ParticleSnapshot;
use crate::core::stepper::{SimulationStepper, StepReport};
use crate::error::{Error, Result};

/// N Brownian particles in a reflecting vessel, together with the random
/// source that drives them.
///
/// The ensemble is the caller-owned handle: state can be read at any time but
/// only changes through [`advance`](Self::advance) or [`step`](Self::step),
/// which take `&mut self` so no reader can observe a half-finished step.
#[derive(Debug)]
pub struct ParticleEnsemble {
    config: EnsembleConfig,
    particles: Vec<Particle>,
    stepper: SimulationStepper,
    rng: StdRng,
    steps: u64,
    time: f64,
    last_report: StepReport,
}

impl ParticleEnsemble {
    /// Build an ensemble with positions drawn uniformly from the inset
    /// rectangle `[r, W - r] x [r, H - r]`, zero velocities and, for oriented
    /// ensembles, angles uniform in [0, 360).
    ///
    /// Errors:
    /// - `Error::InvalidConfiguration` for any parameter rejected by [`EnsembleConfig::validate`].
    pub fn new(config: EnsembleConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let radius = config.effective_radius();

        let mut particles = Vec::with_capacity(config.num_particles);
        for id in 0..config.num_particles {
            let mut r = [0.0_f64; DIM];
            for (k, r_k) in r.iter_mut().enumerate() {
                let lo = radius;
                let hi = config.vessel.extent(k) - radius;
                *r_k = rng.random_range(lo..=hi);
            }
            let angle = if config.capabilities.has_orientation {
                rng.random_range(0.0..360.0)
            } else {
                0.0
            };
            particles.push(Particle::new(id, r, angle, radius)?);
        }

        Ok(Self::assemble(config, particles, rng))
    }

    /// Build an ensemble from explicit initial centres (angles start at 0).
    ///
    /// Errors:
    /// - `Error::InvalidConfiguration` if the config is invalid, the number of
    ///   positions differs from `config.num_particles`, or a centre lies outside
    ///   the inset rectangle.
    pub fn from_positions(config: EnsembleConfig, positions: &[[f64; DIM]]) -> Result<Self> {
        config.validate()?;
        if positions.len() != config.num_particles {
            return Err(Error::config(format!(
                "expected {} positions, got {}",
                config.num_particles,
                positions.len()
            )));
        }
        let radius = config.effective_radius();
        let mut particles = Vec::with_capacity(positions.len());
        for (id, &r) in positions.iter().enumerate() {
            let p = Particle::new(id, r, 0.0, radius)?;
            for (k, &x) in r.iter().enumerate() {
                let hi = config.vessel.extent(k) - radius;
                if x < radius || x > hi {
                    return Err(Error::config(format!(
                        "particle {id} lies outside [{radius}, {hi}] on axis {k}"
                    )));
                }
            }
            particles.push(p);
        }
        let rng = seeded_rng(config.seed);
        Ok(Self::assemble(config, particles, rng))
    }

    fn assemble(config: EnsembleConfig, particles: Vec<Particle>, rng: StdRng) -> Self {
        let stepper = SimulationStepper::new(
            config.vessel,
            config.effective_radius(),
            &config.params,
            config.capabilities,
        );
        debug!(
            "ensemble of {} particles (r = {}) in {} x {} vessel, {:?}",
            particles.len(),
            config.effective_radius(),
            config.vessel.width,
            config.vessel.height,
            config.capabilities
        );
        Self {
            config,
            particles,
            stepper,
            rng,
            steps: 0,
            time: 0.0,
            last_report: StepReport::default(),
        }
    }

    /// Advance by one step of length `dt`.
    ///
    /// Errors:
    /// - `Error::InvalidConfiguration` if `dt` is not finite and > 0; the
    ///   ensemble is left unchanged.
    pub fn advance(&mut self, dt: f64) -> Result<&StepReport> {
        validate_dt(dt)?;
        self.advance_unchecked(dt);
        Ok(&self.last_report)
    }

    /// Advance by the configured `dt` and return the new state.
    pub fn step(&mut self) -> ParticleSnapshot {
        self.advance_unchecked(self.config.params.dt);
        self.snapshot()
    }

    fn advance_unchecked(&mut self, dt: f64) {
        let collisions = self.stepper.step(&mut self.particles, dt, &mut self.rng);
        self.steps += 1;
        self.time += dt;
        self.last_report = StepReport {
            step: self.steps,
            collisions,
        };
    }

    /// Advance `n` steps with the configured `dt`.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Current state for a renderer.
    pub fn snapshot(&self) -> ParticleSnapshot {
        ParticleSnapshot::capture(
            self.steps,
            self.time,
            &self.particles,
            self.config.capabilities.has_orientation,
        )
    }

    /// Particles in index order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Vessel the particles are confined to.
    pub fn bounds(&self) -> VesselBounds {
        self.config.vessel
    }

    /// Radius used for contacts and wall insets.
    pub fn effective_radius(&self) -> f64 {
        self.config.effective_radius()
    }

    /// Optional stages this ensemble runs.
    pub fn capabilities(&self) -> Capabilities {
        self.config.capabilities
    }

    /// Configuration the ensemble was built from.
    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// Completed steps.
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Accumulated simulated time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Report of the most recent step; all zero before the first.
    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    /// Pairs still closer than their contact distance.
    pub fn residual_overlaps(&self) -> usize {
        residual_overlap(&self.particles).0
    }

    /// Largest remaining overlap, 0 if none.
    pub fn max_overlap(&self) -> f64 {
        residual_overlap(&self.particles).1
    }

    /// Whether every centre lies inside `[r, dim - r]` on both axes.
    pub fn is_contained(&self) -> bool {
        let reflector = self.stepper.reflector();
        self.particles.iter().all(|p| reflector.contains(&p.r))
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    }
}
