//! Correspondence queries between two window slots.

use nalgebra::Vector3;

use crate::landmark::LandmarkStore;

/// Normalized-ray pairs of every landmark observed in both `frame_l` and
/// `frame_r` (with `frame_l <= frame_r`), in store order.
///
/// Used externally for relative-pose estimation between two window slots.
/// Empty when no landmark spans both frames.
pub fn corresponding_points(
    store: &LandmarkStore,
    frame_l: usize,
    frame_r: usize,
) -> Vec<(Vector3<f64>, Vector3<f64>)> {
    let mut corres = Vec::new();
    for landmark in store.iter() {
        if landmark.start_frame <= frame_l && landmark.end_frame() >= frame_r {
            let idx_l = frame_l - landmark.start_frame;
            let idx_r = frame_r - landmark.start_frame;
            corres.push((
                landmark.observations[idx_l].ray,
                landmark.observations[idx_r].ray,
            ));
        }
    }
    corres
}
