#![allow(missing_docs)]

//! Core data structures and the per-step physics of brownsim.
//!
//! One step runs noise, wall reflection, pairwise overlap correction and (for
//! inertial ensembles) velocity integration, in that order.

pub mod boundary;
pub mod collision;
pub mod config;
pub mod ensemble;
pub mod motion;
pub mod particle;
pub mod snapshot;
pub mod stepper;

pub use boundary::BoundaryReflector;
pub use collision::{CollisionReport, PairwiseCollisionResolver};
pub use config::{Capabilities, EnsembleConfig, ParticleShape, SimulationParameters, VesselBounds};
pub use ensemble::ParticleEnsemble;
pub use motion::StochasticMotionGenerator;
pub use particle::Particle;
pub use snapshot::{ParticleSnapshot, ParticleState};
pub use stepper::{SimulationStepper, StepReport};
