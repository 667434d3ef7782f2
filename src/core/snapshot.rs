use serde::{Deserialize, Serialize};

use crate::core::particle::{Particle, DIM};

/// Renderer-facing state of one particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub position: [f64; DIM],
    /// Orientation in [0, 360) degrees; `None` for unoriented ensembles.
    pub angle: Option<f64>,
}

/// Read-only view of the ensemble between two steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    /// Number of completed steps.
    pub step: u64,
    /// Accumulated simulated time.
    pub time: f64,
    pub particles: Vec<ParticleState>,
}

impl ParticleSnapshot {
    pub(crate) fn capture(step: u64, time: f64, particles: &[Particle], oriented: bool) -> Self {
        Self {
            step,
            time,
            particles: particles
                .iter()
                .map(|p| ParticleState {
                    position: p.r,
                    angle: oriented.then(|| p.wrapped_angle()),
                })
                .collect(),
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the snapshot holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Positions in ensemble order.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|s| s.position).collect()
    }
}
