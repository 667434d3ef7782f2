use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// A rigid Brownian particle in D=2.
///
/// Fields:
/// - `id`: stable identifier, equal to the particle's index in its ensemble
/// - `r`: position vector [x, y] in vessel-local coordinates
/// - `v`: velocity vector [vx, vy]; stays zero unless the ensemble is inertial
/// - `angle`: orientation in degrees; not wrapped, may grow without bound
/// - `radius`: effective collision radius (> 0)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Stable particle identifier.
    pub id: usize,
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Orientation in degrees.
    pub angle: f64,
    /// Effective collision radius (> 0).
    pub radius: f64,
}

impl Particle {
    /// Create a resting particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidConfiguration` if `radius` is non-positive or any component is NaN/inf.
    pub fn new(id: usize, r: [f64; DIM], angle: f64, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::config("effective radius must be finite and > 0"));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::config(format!("position of particle {id} must be finite")));
        }
        if !angle.is_finite() {
            return Err(Error::config(format!("angle of particle {id} must be finite")));
        }
        Ok(Self {
            id,
            r,
            v: [0.0; DIM],
            angle,
            radius,
        })
    }

    /// Euclidean distance between the centres of `self` and `other`.
    #[inline]
    pub fn distance_to(&self, other: &Particle) -> f64 {
        let dx = self.r[0] - other.r[0];
        let dy = self.r[1] - other.r[1];
        dx.hypot(dy)
    }

    /// Distance at which `self` and `other` touch.
    #[inline]
    pub fn contact_distance(&self, other: &Particle) -> f64 {
        self.radius + other.radius
    }

    /// Orientation folded into [0, 360).
    #[inline]
    pub fn wrapped_angle(&self) -> f64 {
        self.angle.rem_euclid(360.0)
    }

    /// Speed |v|.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.v[0].hypot(self.v[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_ok() -> Result<()> {
        let p = Particle::new(1, [3.0, 4.0], 45.0, 2.0)?;
        assert_eq!(p.id, 1);
        assert_eq!(p.r, [3.0, 4.0]);
        assert_eq!(p.v, [0.0, 0.0]);
        assert_eq!(p.angle, 45.0);
        assert_eq!(p.radius, 2.0);
        Ok(())
    }

    #[test]
    fn invalid_radius_rejected() {
        let err = Particle::new(0, [0.0, 0.0], 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn non_finite_position_rejected() {
        let err = Particle::new(4, [f64::NAN, 1.0], 0.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("position"));
    }

    #[test]
    fn distance_and_contact() -> Result<()> {
        let a = Particle::new(0, [0.0, 0.0], 0.0, 2.0)?;
        let b = Particle::new(1, [3.0, 4.0], 0.0, 2.0)?;
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.contact_distance(&b), 4.0);
        Ok(())
    }

    #[test]
    fn wrapped_angle_handles_negative_and_large() -> Result<()> {
        let mut p = Particle::new(0, [0.0, 0.0], -30.0, 1.0)?;
        assert!((p.wrapped_angle() - 330.0).abs() < 1e-12);
        p.angle = 725.0;
        assert!((p.wrapped_angle() - 5.0).abs() < 1e-12);
        Ok(())
    }
}
