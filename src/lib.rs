//! Overdamped Brownian dynamics of rigid 2-D particles in a reflecting vessel.
//!
//! The caller owns a [`ParticleEnsemble`] and advances it one step per frame:
//!
//! ```
//! use brownsim::core::VesselBounds;
//!
//! let vessel = VesselBounds::square(150.0)?;
//! let mut ensemble = brownsim::create_ensemble(13, vessel, 2.0, Some(7))?;
//! let snapshot = brownsim::step(&mut ensemble, 0.1)?;
//! assert_eq!(snapshot.len(), 13);
//! # Ok::<(), brownsim::error::Error>(())
//! ```

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

use crate::core::{EnsembleConfig, ParticleEnsemble, ParticleShape, ParticleSnapshot, VesselBounds};
use crate::error::Result;

/// Build a disc ensemble of `n` particles with effective radius
/// `effective_radius` and default motion parameters.
///
/// Errors: `InvalidConfiguration` if `n` is 0, the radius is not positive, or
/// the radius is not smaller than half of either vessel side.
pub fn create_ensemble(
    n: usize,
    vessel_bounds: VesselBounds,
    effective_radius: f64,
    seed: Option<u64>,
) -> Result<ParticleEnsemble> {
    let config = EnsembleConfig {
        num_particles: n,
        vessel: vessel_bounds,
        shape: ParticleShape::Disc {
            radius: effective_radius,
        },
        seed,
        ..EnsembleConfig::disc()
    };
    ParticleEnsemble::new(config)
}

/// Advance `ensemble` by `dt` and return the resulting snapshot.
///
/// Errors: `InvalidConfiguration` if `dt` is not finite and > 0 (checked
/// before any state changes).
pub fn step(ensemble: &mut ParticleEnsemble, dt: f64) -> Result<ParticleSnapshot> {
    ensemble.advance(dt)?;
    Ok(ensemble.snapshot())
}
