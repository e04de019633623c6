//! Depth-vector conversion for the external optimizer.
//!
//! The optimizer parameterizes each optimizable landmark by the inverse of
//! its anchor-frame depth. All four routines traverse the store in
//! insertion order restricted to the optimizable set, so the vector layout
//! is deterministic and shared between reads and writes.

use anyhow::{ensure, Result};
use nalgebra::DVector;

use crate::config::Config;
use crate::landmark::{LandmarkStore, SolveStatus};

/// Number of landmarks currently exposed to the optimizer. Also the length
/// of the depth vector.
pub fn optimizable_count(store: &LandmarkStore, config: &Config) -> usize {
    store
        .iter()
        .filter(|l| l.is_optimizable(config.window_size))
        .count()
}

/// Inverse-depth vector over the optimizable set, in store order.
///
/// Landmarks without a triangulated depth contribute the reciprocal of the
/// default depth; with the documented calling order (triangulation before
/// any depth read) that path stays unexercised.
pub fn depth_vector(store: &LandmarkStore, config: &Config) -> DVector<f64> {
    let values: Vec<f64> = store
        .iter()
        .filter(|l| l.is_optimizable(config.window_size))
        .map(|l| 1.0 / l.estimated_depth.unwrap_or(config.default_depth))
        .collect();
    DVector::from_vec(values)
}

/// Write optimizer results back into the store.
///
/// `x` must have exactly [`optimizable_count`] entries in the same order
/// [`depth_vector`] produced them. Each landmark receives
/// `estimated_depth = 1 / x[i]`; a negative result marks the solve as
/// failed (the landmark is deleted by the next failure-removal pass),
/// otherwise as solved.
pub fn set_depth(store: &mut LandmarkStore, config: &Config, x: &DVector<f64>) -> Result<()> {
    write_depths(store, config, x, true)
}

/// Re-seed depths from `x` without touching solve status.
pub fn clear_depth(store: &mut LandmarkStore, config: &Config, x: &DVector<f64>) -> Result<()> {
    write_depths(store, config, x, false)
}

fn write_depths(
    store: &mut LandmarkStore,
    config: &Config,
    x: &DVector<f64>,
    update_status: bool,
) -> Result<()> {
    let mut index = 0usize;
    for landmark in store.iter_mut() {
        if !landmark.is_optimizable(config.window_size) {
            continue;
        }
        ensure!(
            index < x.len(),
            "depth vector has {} entries but the optimizable set is larger",
            x.len()
        );

        let depth = 1.0 / x[index];
        index += 1;
        landmark.estimated_depth = Some(depth);
        if update_status {
            landmark.solve_status = if depth < 0.0 {
                SolveStatus::Failed
            } else {
                SolveStatus::Solved
            };
        }
    }
    ensure!(
        index == x.len(),
        "depth vector has {} entries, expected {}",
        x.len(),
        index
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{CameraMeasurement, Landmark, LandmarkId, Observation};
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector3};

    fn obs() -> Observation {
        Observation::new(
            &CameraMeasurement {
                ray: Vector3::new(0.1, 0.1, 1.0),
                uv: Vector2::zeros(),
                velocity: Vector2::zeros(),
            },
            0.0,
        )
    }

    /// Store with three optimizable landmarks (depths 2, 4, 8) and one
    /// too-recent landmark that must be ignored by every routine.
    fn seeded_store(config: &Config) -> LandmarkStore {
        let mut store = LandmarkStore::new();
        for (id, depth) in [(1u64, 2.0), (2, 4.0), (3, 8.0)] {
            let mut landmark = Landmark::new(LandmarkId::new(id), 0, obs());
            landmark.observations.push(obs());
            landmark.estimated_depth = Some(depth);
            store.insert(landmark);
        }

        let mut late = Landmark::new(LandmarkId::new(99), config.window_size - 1, obs());
        late.observations.push(obs());
        store.insert(late);
        store
    }

    #[test]
    fn test_optimizable_count_excludes_late_starters() {
        let config = Config::default();
        let store = seeded_store(&config);
        assert_eq!(optimizable_count(&store, &config), 3);
    }

    #[test]
    fn test_depth_vector_is_inverse_depth_in_store_order() {
        let config = Config::default();
        let store = seeded_store(&config);

        let x = depth_vector(&store, &config);
        assert_eq!(x.len(), 3);
        assert_relative_eq!(x[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(x[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(x[2], 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_roundtrip_preserves_depths_and_marks_solved() {
        let config = Config::default();
        let mut store = seeded_store(&config);

        let x = depth_vector(&store, &config);
        set_depth(&mut store, &config, &x).unwrap();

        for (id, depth) in [(1u64, 2.0), (2, 4.0), (3, 8.0)] {
            let landmark = store.get(LandmarkId::new(id)).unwrap();
            assert_relative_eq!(landmark.estimated_depth.unwrap(), depth, epsilon = 1e-12);
            assert_eq!(landmark.solve_status, SolveStatus::Solved);
        }
        // The non-optimizable landmark is untouched.
        let late = store.get(LandmarkId::new(99)).unwrap();
        assert!(late.estimated_depth.is_none());
        assert_eq!(late.solve_status, SolveStatus::Unsolved);
    }

    #[test]
    fn test_negative_depth_marks_failed() {
        let config = Config::default();
        let mut store = seeded_store(&config);

        let x = DVector::from_vec(vec![0.5, -0.25, 0.125]);
        set_depth(&mut store, &config, &x).unwrap();

        assert_eq!(
            store.get(LandmarkId::new(1)).unwrap().solve_status,
            SolveStatus::Solved
        );
        let failed = store.get(LandmarkId::new(2)).unwrap();
        assert_eq!(failed.solve_status, SolveStatus::Failed);
        assert_relative_eq!(failed.estimated_depth.unwrap(), -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clear_depth_skips_status_bookkeeping() {
        let config = Config::default();
        let mut store = seeded_store(&config);

        let x = DVector::from_vec(vec![1.0, -1.0, 1.0]);
        clear_depth(&mut store, &config, &x).unwrap();

        let landmark = store.get(LandmarkId::new(2)).unwrap();
        assert_relative_eq!(landmark.estimated_depth.unwrap(), -1.0, epsilon = 1e-12);
        assert_eq!(landmark.solve_status, SolveStatus::Unsolved);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let config = Config::default();
        let mut store = seeded_store(&config);

        let short = DVector::from_vec(vec![0.5, 0.25]);
        assert!(set_depth(&mut store, &config, &short).is_err());

        let long = DVector::from_vec(vec![0.5, 0.25, 0.125, 0.0625]);
        assert!(set_depth(&mut store, &config, &long).is_err());
    }
}
