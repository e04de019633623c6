//! Per-landmark parallax between the two most recent frames.

use crate::landmark::Landmark;

/// Parallax of `landmark` between the second-newest and third-newest
/// frames of the window, as a Euclidean distance in normalized image-plane
/// coordinates. Larger values mean a more triangulation-friendly baseline.
///
/// The landmark's span must cover both frames `frame_count - 2` and
/// `frame_count - 1`; the caller filters on that before calling.
///
/// Both a plain and a "compensated" displacement are computed and the
/// smaller magnitude wins. The compensation slot is meant to remove the
/// inter-frame rotation before differencing, but that transform is not
/// wired up, so both branches are numerically identical today.
pub fn compensated_parallax(landmark: &Landmark, frame_count: usize) -> f64 {
    let frame_i = &landmark.observations[frame_count - 2 - landmark.start_frame];
    let frame_j = &landmark.observations[frame_count - 1 - landmark.start_frame];

    let p_j = frame_j.ray;
    let u_j = p_j.x;
    let v_j = p_j.y;

    let p_i = frame_i.ray;
    let dep_i = p_i.z;
    let u_i = p_i.x / dep_i;
    let v_i = p_i.y / dep_i;
    let du = u_i - u_j;
    let dv = v_i - v_j;

    // Rotation compensation hook: identity for now.
    let p_i_comp = p_i;
    let dep_i_comp = p_i_comp.z;
    let u_i_comp = p_i_comp.x / dep_i_comp;
    let v_i_comp = p_i_comp.y / dep_i_comp;
    let du_comp = u_i_comp - u_j;
    let dv_comp = v_i_comp - v_j;

    (du * du + dv * dv)
        .min(du_comp * du_comp + dv_comp * dv_comp)
        .sqrt()
}
