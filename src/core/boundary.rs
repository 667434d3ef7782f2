use crate::core::config::VesselBounds;
use crate::core::particle::{Particle, DIM};

/// Folds particles that left the vessel back across the wall they crossed.
///
/// Only positions are reflected; velocities keep their sign. Axis `k` uses the
/// vessel extent along `k`, so rectangular vessels are handled per side.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryReflector {
    bounds: VesselBounds,
    radius: f64,
}

impl BoundaryReflector {
    /// Reflector for particles of `radius` in `bounds`.
    pub fn new(bounds: VesselBounds, radius: f64) -> Self {
        Self { bounds, radius }
    }

    /// Reflect every particle into `[r, W - r] x [r, H - r]`.
    pub fn apply(&self, particles: &mut [Particle]) {
        for p in particles.iter_mut() {
            for k in 0..DIM {
                p.r[k] = reflect_coordinate(p.r[k], self.radius, self.bounds.extent(k));
            }
        }
    }

    /// The admissible band `[lo, hi]` on `axis`.
    #[inline]
    pub fn band(&self, axis: usize) -> (f64, f64) {
        (self.radius, self.bounds.extent(axis) - self.radius)
    }

    /// Whether `r` already lies inside the admissible rectangle.
    pub fn contains(&self, r: &[f64; DIM]) -> bool {
        (0..DIM).all(|k| {
            let (lo, hi) = self.band(k);
            r[k] >= lo && r[k] <= hi
        })
    }
}

/// Reflect one coordinate into `[radius, extent - radius]`.
///
/// Lower wall, upper wall, then lower wall again. A coordinate that is still
/// outside after that (a jump larger than the band) is folded exactly.
pub fn reflect_coordinate(x: f64, radius: f64, extent: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let lo = radius;
    let hi = extent - radius;

    let mut x = x;
    if x < lo {
        x = 2.0 * lo - x;
    }
    if x > hi {
        x = 2.0 * hi - x;
    }
    if x < lo {
        x = 2.0 * lo - x;
    }
    if x < lo || x > hi {
        x = fold_into_band(x, lo, hi);
    }
    x
}

/// Repeated mirror reflection between `lo` and `hi` (triangle wave).
fn fold_into_band(x: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span <= 0.0 {
        return 0.5 * (lo + hi);
    }
    let mut t = (x - lo).rem_euclid(2.0 * span);
    if t > span {
        t = 2.0 * span - t;
    }
    (lo + t).clamp(lo, hi)
}
