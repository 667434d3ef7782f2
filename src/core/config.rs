//! Simulation configuration.
//!
//! Typed parameters for building an ensemble: vessel size, particle shape,
//! time stepping and the capability flags that select which optional
//! pipeline stages run. Defaults describe 13 discs of radius 2 in a 150 x 150 vessel.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of particles.
pub const DEFAULT_NUM_PARTICLES: usize = 13;
/// Default vessel edge length (square vessel).
pub const DEFAULT_VESSEL_SIZE: f64 = 150.0;
/// Default time step.
pub const DEFAULT_DT: f64 = 0.1;
/// Default disc radius.
pub const DEFAULT_RADIUS: f64 = 2.0;
/// Default rotational standard deviation, in degrees per step.
pub const DEFAULT_ROTATIONAL_SIGMA_DEG: f64 = 5.0;
/// Default velocity damping factor for inertial ensembles.
pub const DEFAULT_DAMPING: f64 = 0.01;

/// The reflecting rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselBounds {
    pub width: f64,
    pub height: f64,
}

impl VesselBounds {
    /// Create validated bounds; both sides must be finite and > 0.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let b = Self { width, height };
        b.validate()?;
        Ok(b)
    }

    /// Square vessel with edge `size`.
    pub fn square(size: f64) -> Result<Self> {
        Self::new(size, size)
    }

    /// Both sides must be finite and > 0.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(Error::config("vessel width must be finite and > 0"));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::config("vessel height must be finite and > 0"));
        }
        Ok(())
    }

    /// Extent along `axis` (0 = width, 1 = height).
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        if axis == 0 {
            self.width
        } else {
            self.height
        }
    }

    /// Whether `radius` leaves room to place a particle on both axes.
    pub fn fits_radius(&self, radius: f64) -> bool {
        radius < 0.5 * self.width && radius < 0.5 * self.height
    }
}

impl Default for VesselBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_VESSEL_SIZE,
            height: DEFAULT_VESSEL_SIZE,
        }
    }
}

/// Particle shape; only its effective radius takes part in the physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticleShape {
    Disc { radius: f64 },
    /// A thin rod; contact is judged by its length.
    Rod { length: f64, width: f64 },
    Square { side: f64 },
}

impl ParticleShape {
    /// Half the characteristic size of the shape.
    pub fn effective_radius(&self) -> f64 {
        match *self {
            ParticleShape::Disc { radius } => radius,
            ParticleShape::Rod { length, .. } => 0.5 * length,
            ParticleShape::Square { side } => 0.5 * side,
        }
    }

    /// Same shape with its characteristic size (disc radius, rod length,
    /// square side) set to `size`. A rod keeps its aspect ratio.
    pub fn resized(&self, size: f64) -> Self {
        match *self {
            ParticleShape::Disc { .. } => ParticleShape::Disc { radius: size },
            ParticleShape::Rod { length, width } => ParticleShape::Rod {
                length: size,
                width: width * size / length,
            },
            ParticleShape::Square { .. } => ParticleShape::Square { side: size },
        }
    }

    /// Every dimension must be finite and > 0, and a rod no wider than long.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, x: f64| {
            if x.is_finite() && x > 0.0 {
                Ok(())
            } else {
                Err(Error::config(format!("{name} must be finite and > 0")))
            }
        };
        match *self {
            ParticleShape::Disc { radius } => positive("effective radius", radius),
            ParticleShape::Rod { length, width } => {
                positive("rod length", length)?;
                positive("rod width", width)?;
                if width > length {
                    return Err(Error::config("rod width must not exceed rod length"));
                }
                Ok(())
            }
            ParticleShape::Square { side } => positive("square side", side),
        }
    }
}

impl Default for ParticleShape {
    fn default() -> Self {
        ParticleShape::Disc {
            radius: DEFAULT_RADIUS,
        }
    }
}

/// Optional pipeline stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Angles diffuse each step.
    pub has_orientation: bool,
    /// Velocities are damped, kicked by collisions and integrated into positions.
    pub has_velocity_damping: bool,
}

/// Time stepping and noise parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Time step (> 0).
    pub dt: f64,
    /// Standard deviation of the per-step angular increment, in degrees.
    pub rotational_sigma_deg: f64,
    /// Factor applied to velocities at the start of each step, in [0, 1).
    pub damping: f64,
}

impl SimulationParameters {
    /// Check `dt`, plus the rotation and damping settings that `caps` enables.
    pub fn validate(&self, caps: Capabilities) -> Result<()> {
        validate_dt(self.dt)?;
        if caps.has_orientation
            && (!self.rotational_sigma_deg.is_finite() || self.rotational_sigma_deg < 0.0)
        {
            return Err(Error::config("rotational sigma must be finite and >= 0"));
        }
        if caps.has_velocity_damping && !(0.0..1.0).contains(&self.damping) {
            return Err(Error::config("damping factor must lie in [0, 1)"));
        }
        Ok(())
    }

    /// Per-axis standard deviation of the Brownian displacement, `sqrt(2 dt)`.
    #[inline]
    pub fn translational_sigma(&self) -> f64 {
        translational_sigma(self.dt)
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            rotational_sigma_deg: DEFAULT_ROTATIONAL_SIGMA_DEG,
            damping: DEFAULT_DAMPING,
        }
    }
}

/// `sqrt(2 dt)`: Euler-Maruyama increment scale for unit diffusion.
#[inline]
pub fn translational_sigma(dt: f64) -> f64 {
    (2.0 * dt).sqrt()
}

pub(crate) fn validate_dt(dt: f64) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::config("dt must be finite and > 0"));
    }
    Ok(())
}

/// Everything needed to build a [`ParticleEnsemble`](crate::core::ParticleEnsemble).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    pub num_particles: usize,
    pub vessel: VesselBounds,
    pub shape: ParticleShape,
    pub params: SimulationParameters,
    pub capabilities: Capabilities,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self::disc()
    }
}

impl EnsembleConfig {
    /// Discs without rotation or inertia.
    pub fn disc() -> Self {
        Self {
            num_particles: DEFAULT_NUM_PARTICLES,
            vessel: VesselBounds::default(),
            shape: ParticleShape::Disc {
                radius: DEFAULT_RADIUS,
            },
            params: SimulationParameters::default(),
            capabilities: Capabilities::default(),
            seed: None,
        }
    }

    /// Rods that rotate and carry damped velocities.
    pub fn rod() -> Self {
        Self {
            shape: ParticleShape::Rod {
                length: 8.0,
                width: 2.0,
            },
            capabilities: Capabilities {
                has_orientation: true,
                has_velocity_damping: true,
            },
            ..Self::disc()
        }
    }

    /// Squares that rotate but have no inertia.
    pub fn square() -> Self {
        Self {
            shape: ParticleShape::Square { side: 4.0 },
            capabilities: Capabilities {
                has_orientation: true,
                has_velocity_damping: false,
            },
            ..Self::disc()
        }
    }

    /// Set the particle count.
    pub fn with_num_particles(mut self, n: usize) -> Self {
        self.num_particles = n;
        self
    }

    /// Set the vessel.
    pub fn with_vessel(mut self, vessel: VesselBounds) -> Self {
        self.vessel = vessel;
        self
    }

    /// Set the particle shape.
    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the time step.
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.params.dt = dt;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective radius derived from the shape.
    #[inline]
    pub fn effective_radius(&self) -> f64 {
        self.shape.effective_radius()
    }

    /// Check every construction-time constraint.
    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(Error::config("num_particles must be > 0"));
        }
        self.vessel.validate()?;
        self.shape.validate()?;
        let radius = self.effective_radius();
        if !self.vessel.fits_radius(radius) {
            return Err(Error::config(format!(
                "effective radius {radius} must be smaller than half of each vessel dimension ({} x {})",
                self.vessel.width, self.vessel.height
            )));
        }
        self.params.validate(self.capabilities)
    }
}
