use brownsim::core::{
    EnsembleConfig, ParticleEnsemble, ParticleShape, ParticleSnapshot, VesselBounds,
};
use brownsim::error::{Error, Result};
use brownsim::{create_ensemble, step};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run_snapshots(config: EnsembleConfig, steps: usize) -> Result<Vec<ParticleSnapshot>> {
    let mut ens = ParticleEnsemble::new(config)?;
    Ok((0..steps).map(|_| ens.step()).collect())
}

/// Same seed, same snapshots, bit for bit, for every variant.
#[test]
fn seeded_runs_are_reproducible() -> Result<()> {
    init_logging();
    for config in [EnsembleConfig::disc(), EnsembleConfig::rod(), EnsembleConfig::square()] {
        let a = run_snapshots(config.clone().with_seed(2024), 100)?;
        let b = run_snapshots(config.clone().with_seed(2024), 100)?;
        assert_eq!(a, b);
        let c = run_snapshots(config.with_seed(2025), 100)?;
        assert_ne!(a, c);
    }
    Ok(())
}

/// The preset setups stay inside the vessel and finite for a full 1000-step run.
#[test]
fn long_runs_stay_contained() -> Result<()> {
    init_logging();
    for config in [EnsembleConfig::disc(), EnsembleConfig::rod(), EnsembleConfig::square()] {
        let mut ens = ParticleEnsemble::new(config.with_seed(99))?;
        for _ in 0..1000 {
            let snap = ens.step();
            assert_eq!(snap.len(), 13);
            assert!(ens.is_contained(), "left the vessel at step {}", snap.step);
            for s in &snap.particles {
                assert!(s.position.iter().all(|x| x.is_finite()));
            }
        }
        assert_eq!(ens.steps_taken(), 1000);
        assert!((ens.time() - 100.0).abs() < 1e-9);
    }
    Ok(())
}

/// A crowded non-square vessel keeps x within the width band and y within the height band.
#[test]
fn crowded_rectangular_vessel() -> Result<()> {
    let config = EnsembleConfig::disc()
        .with_num_particles(40)
        .with_vessel(VesselBounds::new(60.0, 12.0)?)
        .with_shape(ParticleShape::Disc { radius: 2.0 })
        .with_dt(0.5)
        .with_seed(5);
    let mut ens = ParticleEnsemble::new(config)?;
    for _ in 0..300 {
        ens.step();
        for p in ens.particles() {
            assert!((2.0..=58.0).contains(&p.r[0]), "x = {}", p.r[0]);
            assert!((2.0..=10.0).contains(&p.r[1]), "y = {}", p.r[1]);
        }
    }
    // Residual overlap is expected in a crowded vessel and is not an error.
    assert!(ens.residual_overlaps() <= 40 * 39 / 2);
    assert!(ens.max_overlap().is_finite());
    Ok(())
}

#[test]
fn create_ensemble_validates() -> Result<()> {
    let vessel = VesselBounds::square(150.0)?;
    let bad = [
        create_ensemble(0, vessel, 2.0, Some(1)),
        create_ensemble(13, vessel, 0.0, Some(1)),
        create_ensemble(13, vessel, -1.0, Some(1)),
        create_ensemble(13, vessel, 75.0, Some(1)),
        create_ensemble(13, VesselBounds::new(150.0, 40.0)?, 20.0, Some(1)),
    ];
    for res in bad {
        assert!(matches!(res, Err(Error::InvalidConfiguration(_))));
    }
    assert!(VesselBounds::new(0.0, 10.0).is_err());

    let ens = create_ensemble(13, vessel, 2.0, Some(1))?;
    assert_eq!(ens.num_particles(), 13);
    assert_eq!(ens.bounds(), vessel);
    assert_eq!(ens.effective_radius(), 2.0);
    Ok(())
}

/// `step` advances by the given dt and returns the new state.
#[test]
fn step_returns_snapshot() -> Result<()> {
    let mut ens = create_ensemble(13, VesselBounds::square(150.0)?, 2.0, Some(42))?;
    let snap = step(&mut ens, 0.25)?;
    assert_eq!(snap.step, 1);
    assert!((snap.time - 0.25).abs() < 1e-12);
    assert_eq!(snap.positions().len(), 13);
    assert_eq!(snap, ens.snapshot());

    assert!(matches!(
        step(&mut ens, 0.0),
        Err(Error::InvalidConfiguration(_))
    ));
    assert_eq!(ens.steps_taken(), 1);
    Ok(())
}

/// Oriented snapshots report angles folded into [0, 360) while the internal
/// angle drifts freely.
#[test]
fn snapshot_angles_are_wrapped() -> Result<()> {
    let mut ens = ParticleEnsemble::new(EnsembleConfig::square().with_seed(17))?;
    ens.run(500);
    let snap = ens.snapshot();
    for (state, p) in snap.particles.iter().zip(ens.particles()) {
        let angle = state.angle.expect("square ensembles are oriented");
        assert!((0.0..360.0).contains(&angle));
        assert!((angle - p.angle.rem_euclid(360.0)).abs() < 1e-12);
    }
    Ok(())
}

/// Damped velocities stay small: the kick is at most half the contact distance
/// and damping removes 99% of it the next step.
#[test]
fn rod_velocities_stay_bounded() -> Result<()> {
    let mut ens = ParticleEnsemble::new(EnsembleConfig::rod().with_num_particles(30).with_seed(8))?;
    for _ in 0..200 {
        ens.step();
        for p in ens.particles() {
            assert!(p.speed().is_finite());
            assert!(p.speed() < 100.0, "speed {}", p.speed());
        }
    }
    Ok(())
}

/// Snapshots serialize for shipping to an external renderer.
#[test]
fn snapshot_serializes() -> Result<()> {
    let mut ens = ParticleEnsemble::new(EnsembleConfig::rod().with_seed(3))?;
    let snap = ens.step();
    let json =
        serde_json::to_string(&snap).map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
    assert!(json.contains("\"position\""));
    let back: ParticleSnapshot =
        serde_json::from_str(&json).map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
    assert_eq!(back.len(), snap.len());
    assert_eq!(back.step, 1);
    Ok(())
}

/// Explicit placements let a harness script a scenario.
#[test]
fn scripted_overlap_is_resolved_on_first_step() -> Result<()> {
    let config = EnsembleConfig::disc()
        .with_num_particles(2)
        .with_dt(1e-12)
        .with_seed(1);
    let mut ens = ParticleEnsemble::from_positions(config, &[[10.0, 10.0], [12.0, 10.0]])?;
    assert_eq!(ens.residual_overlaps(), 1);
    ens.step();
    assert_eq!(ens.last_report().collisions.contacts, 1);
    let d = ens.particles()[0].distance_to(&ens.particles()[1]);
    assert!((d - 4.0).abs() < 1e-4, "distance {d}");
    Ok(())
}
