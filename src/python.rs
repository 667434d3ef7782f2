use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::particle::DIM;
use crate::core::{EnsembleConfig, ParticleEnsemble, VesselBounds};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around [`ParticleEnsemble`].
///
/// API:
/// - __new__(variant="disc", num_particles=13, vessel=(150, 150), size=None, dt=0.1, seed=None)
/// - step() / run(n)
/// - get_positions() -> np.ndarray, shape (N, 2)
/// - get_angles() -> np.ndarray, shape (N,), degrees in [0, 360)
#[pyclass]
pub struct BrownianSim {
    ensemble: ParticleEnsemble,
}

#[pymethods]
impl BrownianSim {
    /// Build an ensemble.
    ///
    /// Parameters
    /// - variant: "disc", "rod" or "square"
    /// - num_particles: N (> 0)
    /// - vessel: (width, height)
    /// - size: disc radius, rod length or square side; rods keep their 4:1 aspect.
    ///   None keeps the variant default
    /// - dt: time step (> 0)
    /// - seed: RNG seed; None for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (variant="disc", num_particles=13, vessel=(150.0, 150.0), size=None, dt=0.1, seed=None))]
    fn new(
        variant: &str,
        num_particles: usize,
        vessel: (f64, f64),
        size: Option<f64>,
        dt: f64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let mut config = match variant {
            "disc" => EnsembleConfig::disc(),
            "rod" => EnsembleConfig::rod(),
            "square" => EnsembleConfig::square(),
            other => {
                return Err(py_err(format!(
                    "unknown variant {other:?}; expected \"disc\", \"rod\" or \"square\""
                )))
            }
        };
        if let Some(s) = size {
            config.shape = config.shape.resized(s);
        }
        config.num_particles = num_particles;
        config.vessel = VesselBounds::new(vessel.0, vessel.1).map_err(py_err)?;
        config.params.dt = dt;
        config.seed = seed;
        let ensemble = ParticleEnsemble::new(config).map_err(py_err)?;
        Ok(Self { ensemble })
    }

    /// Advance one step with the configured dt (releases the GIL).
    fn step(&mut self, py: Python<'_>) {
        py.detach(|| {
            self.ensemble.step();
        });
    }

    /// Advance `n` steps (releases the GIL).
    fn run(&mut self, py: Python<'_>, n: u64) {
        py.detach(|| self.ensemble.run(n));
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        let n = self.ensemble.num_particles();
        let mut arr = Array2::<f64>::zeros((n, DIM));
        for (i, p) in self.ensemble.particles().iter().enumerate() {
            for k in 0..DIM {
                arr[[i, k]] = p.r[k];
            }
        }
        arr.into_pyarray(py)
    }

    /// Return orientations in degrees, folded into [0, 360), shape (N,).
    fn get_angles<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        let angles: Array1<f64> = self
            .ensemble
            .particles()
            .iter()
            .map(|p| p.wrapped_angle())
            .collect();
        angles.into_pyarray(py)
    }

    /// (width, height) of the vessel.
    fn vessel_bounds(&self) -> (f64, f64) {
        let b = self.ensemble.bounds();
        (b.width, b.height)
    }

    fn num_particles(&self) -> usize {
        self.ensemble.num_particles()
    }

    fn effective_radius(&self) -> f64 {
        self.ensemble.effective_radius()
    }

    fn steps_taken(&self) -> u64 {
        self.ensemble.steps_taken()
    }
}

/// The brownsim Python module entry point.
#[pymodule]
fn brownsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BrownianSim>()?;
    Ok(())
}
