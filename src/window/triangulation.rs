//! Multi-view depth triangulation for untriangulated landmarks.

use anyhow::{ensure, Result};
use nalgebra::{DMatrix, SMatrix};

use crate::config::Config;
use crate::geometry::SE3;
use crate::landmark::LandmarkStore;

/// Depths below this are treated as degenerate and replaced by the
/// configured default depth.
const MIN_TRIANGULATED_DEPTH: f64 = 0.1;

/// Triangulate every optimizable landmark that has no positive depth yet.
///
/// `poses` are world-from-IMU transforms, one per window slot (they must
/// cover every observed slot); `extrinsics` are IMU-from-camera
/// transforms, one per camera. Both are borrowed for this call only.
///
/// For each landmark a DLT system is stacked in the camera frame of its
/// first observation: two rows per observing frame, built from the
/// relative projection `[Rᵀ | -Rᵀt]` of that frame's camera pose. The
/// depth is read off the right-singular vector of the smallest singular
/// value as `z / w`. Near-degenerate baselines yield unreliable depths,
/// so anything below `MIN_TRIANGULATED_DEPTH` is replaced by
/// `config.default_depth` rather than rejected. Landmarks that already
/// carry a positive depth are skipped, making the pass idempotent.
pub fn triangulate_window(
    store: &mut LandmarkStore,
    config: &Config,
    poses: &[SE3],
    extrinsics: &[SE3],
) -> Result<()> {
    ensure!(
        extrinsics.len() == config.num_cameras,
        "got {} camera extrinsics, configured for {}",
        extrinsics.len(),
        config.num_cameras
    );
    ensure!(
        config.num_cameras == 1,
        "triangulation supports single-camera configurations only"
    );

    for landmark in store.iter_mut() {
        if !landmark.is_optimizable(config.window_size) {
            continue;
        }
        if matches!(landmark.estimated_depth, Some(d) if d > 0.0) {
            continue;
        }

        let frame_i = landmark.start_frame;
        ensure!(
            landmark.end_frame() < poses.len(),
            "landmark {} ends at slot {} but only {} window poses were supplied",
            landmark.id,
            landmark.end_frame(),
            poses.len()
        );

        let cam_i = poses[frame_i].compose(&extrinsics[0]);

        let mut rows = DMatrix::<f64>::zeros(2 * landmark.observations.len(), 4);
        for (k, observation) in landmark.observations.iter().enumerate() {
            let cam_j = poses[frame_i + k].compose(&extrinsics[0]);
            let p = relative_projection(&cam_i, &cam_j);
            let f = observation.ray.normalize();
            for c in 0..4 {
                rows[(2 * k, c)] = f.x * p[(2, c)] - f.z * p[(0, c)];
                rows[(2 * k + 1, c)] = f.y * p[(2, c)] - f.z * p[(1, c)];
            }
        }

        let svd = rows.svd(false, true);
        let (min_index, _) = svd.singular_values.argmin();
        let depth = svd
            .v_t
            .as_ref()
            .map(|v_t| v_t[(min_index, 2)] / v_t[(min_index, 3)]);

        landmark.estimated_depth = Some(match depth {
            Some(d) if d.is_finite() && d >= MIN_TRIANGULATED_DEPTH => d,
            _ => config.default_depth,
        });
    }

    Ok(())
}

/// Projection of camera pose `cam_j` relative to the anchor pose `cam_i`,
/// as the 3×4 matrix `[Rᵀ | -Rᵀt]` with `R = R_iᵀ R_j` and
/// `t = R_iᵀ (t_j - t_i)`.
fn relative_projection(cam_i: &SE3, cam_j: &SE3) -> SMatrix<f64, 3, 4> {
    let r0_t = cam_i.rotation_matrix().transpose();
    let t = r0_t * (cam_j.translation - cam_i.translation);
    let r = r0_t * cam_j.rotation_matrix();

    let r_t = r.transpose();
    let mut p = SMatrix::<f64, 3, 4>::zeros();
    p.fixed_view_mut::<3, 3>(0, 0).copy_from(&r_t);
    p.fixed_view_mut::<3, 1>(0, 3).copy_from(&(-r_t * t));
    p
}
