use std::f64::consts::TAU;

use log::warn;
use rand::Rng;

use crate::core::particle::{Particle, DIM};
use crate::error::{Error, Result};

/// Counters from one resolver pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Unordered pairs visited (N(N-1)/2).
    pub pairs_checked: usize,
    /// Pairs that overlapped and were pushed apart.
    pub contacts: usize,
    /// Contacts whose centres coincided exactly.
    pub degenerate: usize,
}

/// Single-pass positional overlap correction.
///
/// Pairs are visited in ascending `(i, j)` order with `i < j` and each
/// correction is applied before the next pair is examined. Later pairs see
/// earlier corrections, so the pass must stay sequential to be reproducible.
/// Overlap left after the pass (three or more bodies in contact) is carried
/// into the next step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseCollisionResolver {
    nudge_velocity: bool,
}

impl PairwiseCollisionResolver {
    /// `nudge_velocity` adds the positional correction to velocities as well.
    pub fn new(nudge_velocity: bool) -> Self {
        Self { nudge_velocity }
    }

    /// Whether contacts also kick velocities.
    #[inline]
    pub fn nudges_velocity(&self) -> bool {
        self.nudge_velocity
    }

    /// Run one pass over all pairs. `rng` is only drawn from when two centres coincide.
    pub fn resolve<R: Rng>(&self, particles: &mut [Particle], rng: &mut R) -> CollisionReport {
        let n = particles.len();
        let mut report = CollisionReport::default();
        for i in 0..n {
            for j in (i + 1)..n {
                report.pairs_checked += 1;

                let (head, tail) = particles.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);

                let contact = a.contact_distance(b);
                let dist = a.distance_to(b);
                if dist >= contact {
                    continue;
                }

                let direction = match contact_normal(a, b, dist) {
                    Ok(u) => u,
                    Err(err) => {
                        warn!("{err}; separating along a random direction");
                        report.degenerate += 1;
                        random_unit(rng)
                    }
                };

                let shift = 0.5 * (contact - dist);
                for k in 0..DIM {
                    let d = shift * direction[k];
                    a.r[k] += d;
                    b.r[k] -= d;
                    if self.nudge_velocity {
                        a.v[k] += d;
                        b.v[k] -= d;
                    }
                }
                report.contacts += 1;
            }
        }
        report
    }
}

/// Unit vector from `b` towards `a`, given their centre distance.
///
/// Errors:
/// - `Error::DegenerateCollision` if the centres coincide.
pub fn contact_normal(a: &Particle, b: &Particle, dist: f64) -> Result<[f64; DIM]> {
    if dist == 0.0 {
        return Err(Error::DegenerateCollision { i: a.id, j: b.id });
    }
    Ok([(a.r[0] - b.r[0]) / dist, (a.r[1] - b.r[1]) / dist])
}

fn random_unit<R: Rng>(rng: &mut R) -> [f64; DIM] {
    let theta: f64 = rng.random_range(0.0..TAU);
    [theta.cos(), theta.sin()]
}

/// Number of pairs closer than their contact distance, and the largest overlap.
pub fn residual_overlap(particles: &[Particle]) -> (usize, f64) {
    let mut count = 0usize;
    let mut worst = 0.0_f64;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let overlap = a.contact_distance(b) - a.distance_to(b);
            if overlap > 0.0 {
                count += 1;
                worst = worst.max(overlap);
            }
        }
    }
    (count, worst)
}
