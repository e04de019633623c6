//! Window maintenance: landmark bookkeeping when frames leave the window.
//!
//! The outer marginalization controller calls exactly one of the shift
//! variants per frame, depending on which frame was dropped: the oldest
//! ([`remove_back`] / [`remove_back_shift_depth`]) or the second-newest
//! ([`remove_front`]). Failure and outlier removal run after the external
//! optimizer has written depths back. Every pass visits each landmark
//! exactly once and deletes in place via the store's retain traversal.

use crate::config::Config;
use crate::geometry::SE3;
use crate::landmark::{LandmarkStore, SolveStatus};

/// The oldest frame (slot 0) left the window: re-base every landmark one
/// slot down. Landmarks anchored at slot 0 lose their first observation
/// and are deleted once no observations remain.
pub fn remove_back(store: &mut LandmarkStore) {
    store.retain_mut(|landmark| {
        if landmark.start_frame != 0 {
            landmark.start_frame -= 1;
            return true;
        }
        landmark.observations.remove(0);
        !landmark.observations.is_empty()
    });
}

/// Like [`remove_back`], but carries triangulated depth across the
/// marginalization.
///
/// `marg_pose` and `new_pose` are the world-from-camera poses of the
/// dropped oldest frame and of the frame that becomes the new slot 0. A
/// landmark anchored at the dropped frame has its depth re-projected
/// through world coordinates into the new anchor frame; a non-positive
/// re-projected depth falls back to `config.default_depth`. Landmarks left
/// with fewer than two observations are deleted outright.
pub fn remove_back_shift_depth(
    store: &mut LandmarkStore,
    config: &Config,
    marg_pose: &SE3,
    new_pose: &SE3,
) {
    store.retain_mut(|landmark| {
        if landmark.start_frame != 0 {
            landmark.start_frame -= 1;
            return true;
        }

        let anchor_ray = landmark.observations[0].ray;
        landmark.observations.remove(0);
        if landmark.observations.len() < 2 {
            return false;
        }

        if let Some(depth) = landmark.estimated_depth {
            let p_marg = anchor_ray * depth;
            let p_world = marg_pose.transform_point(&p_marg);
            let p_new = new_pose.inverse().transform_point(&p_world);
            landmark.estimated_depth = Some(if p_new.z > 0.0 {
                p_new.z
            } else {
                config.default_depth
            });
        }
        true
    });
}

/// The second-newest frame was marginalized while the newest is kept.
///
/// `frame_count` is the newest slot index (equal to `config.window_size`
/// in the steady state). Landmarks first seen in the newest frame slide
/// down one slot; landmarks whose track already ended before the
/// marginalized frame are untouched; the rest lose the observation made
/// in the marginalized frame and are deleted once empty.
pub fn remove_front(store: &mut LandmarkStore, config: &Config, frame_count: usize) {
    store.retain_mut(|landmark| {
        if landmark.start_frame == frame_count {
            landmark.start_frame -= 1;
            return true;
        }
        if landmark.end_frame() + 1 < frame_count {
            return true;
        }
        let offset = config.window_size - 1 - landmark.start_frame;
        landmark.observations.remove(offset);
        !landmark.observations.is_empty()
    });
}

/// Delete every landmark flagged as an outlier by the outer estimator.
///
/// Landmarks without used observations are kept even when flagged, so an
/// id that was never fed into the optimizer cannot be deleted here.
pub fn remove_outliers(store: &mut LandmarkStore) {
    store.retain(|landmark| !(landmark.used_count() != 0 && landmark.is_outlier));
}

/// Delete every landmark whose external depth solve failed.
pub fn remove_failures(store: &mut LandmarkStore) {
    store.retain(|landmark| landmark.solve_status != SolveStatus::Failed);
}
