use rand::Rng;
use rand_distr::StandardNormal;

use crate::core::config::{translational_sigma, Capabilities, SimulationParameters};
use crate::core::particle::Particle;

/// Brownian noise source: translation for every particle, rotation and
/// velocity damping when the ensemble enables them.
///
/// Draw order per particle (index order): x, y, then the angle if oriented.
/// A fixed seed therefore reproduces a run exactly.
#[derive(Debug, Clone, Copy)]
pub struct StochasticMotionGenerator {
    rotational_sigma_deg: Option<f64>,
    damping: Option<f64>,
}

impl StochasticMotionGenerator {
    /// Rotation and damping are only active when `caps` enables them.
    pub fn new(params: &SimulationParameters, caps: Capabilities) -> Self {
        Self {
            rotational_sigma_deg: caps.has_orientation.then_some(params.rotational_sigma_deg),
            damping: caps.has_velocity_damping.then_some(params.damping),
        }
    }

    /// Apply one step of noise with time step `dt`.
    pub fn apply<R: Rng>(&self, particles: &mut [Particle], dt: f64, rng: &mut R) {
        let sigma = translational_sigma(dt);
        for p in particles.iter_mut() {
            if let Some(f) = self.damping {
                p.v[0] *= f;
                p.v[1] *= f;
            }
            p.r[0] += sigma * gaussian(rng);
            p.r[1] += sigma * gaussian(rng);
            if let Some(s) = self.rotational_sigma_deg {
                p.angle += s * gaussian(rng);
            }
        }
    }

    /// Angles diffuse.
    #[inline]
    pub fn rotates(&self) -> bool {
        self.rotational_sigma_deg.is_some()
    }

    /// Velocities are damped.
    #[inline]
    pub fn damps(&self) -> bool {
        self.damping.is_some()
    }
}

#[inline]
fn gaussian<R: Rng>(rng: &mut R) -> f64 {
    rng.sample(StandardNormal)
}
