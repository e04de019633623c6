//! Frame ingestion and the keyframe decision.

use std::collections::BTreeMap;

use anyhow::{ensure, Result};
use tracing::debug;

use crate::config::Config;
use crate::landmark::{CameraMeasurement, Landmark, LandmarkId, LandmarkStore, Observation};
use crate::window::parallax::compensated_parallax;

/// Per-frame input: every landmark id seen this frame, with one
/// measurement per camera. Only the first camera's entry is consumed
/// (single-camera configuration); supplying further cameras is accepted
/// but ignored. A `BTreeMap` keeps the iteration - and therefore the
/// insertion order of new landmarks - deterministic.
pub type FrameObservations = BTreeMap<LandmarkId, Vec<CameraMeasurement>>;

/// Ingest one frame of tracked features and decide whether it is a
/// keyframe.
///
/// New ids create landmarks starting at `frame_count`; known ids gain one
/// observation. The frame is a keyframe when the window is still
/// bootstrapping, when too few known ids were re-tracked, or when the
/// average parallax between the two most recent frames reaches the
/// configured threshold (no spanning landmark to compare also means
/// keyframe).
pub fn ingest_frame(
    store: &mut LandmarkStore,
    config: &Config,
    frame_count: usize,
    frame: &FrameObservations,
    time_offset: f64,
) -> Result<bool> {
    debug!("input features: {}", frame.len());

    let mut tracked = 0usize;
    for (&id, measurements) in frame {
        ensure!(
            !measurements.is_empty(),
            "landmark {} carries no camera measurement",
            id
        );
        let observation = Observation::new(&measurements[0], time_offset);
        match store.get_mut(id) {
            Some(landmark) => {
                landmark.observations.push(observation);
                tracked += 1;
            }
            None => {
                store.insert(Landmark::new(id, frame_count, observation));
            }
        }
    }
    store.set_last_track_count(tracked);

    // Bootstrap / low-overlap rule: with this little shared history the
    // new frame cannot be treated as a redundant non-keyframe.
    if frame_count < config.bootstrap_frames || tracked < config.min_track_count {
        return Ok(true);
    }

    let mut parallax_sum = 0.0;
    let mut parallax_num = 0usize;
    for landmark in store.iter() {
        if landmark.start_frame + 2 <= frame_count && landmark.end_frame() + 1 >= frame_count {
            parallax_sum += compensated_parallax(landmark, frame_count);
            parallax_num += 1;
        }
    }

    if parallax_num == 0 {
        return Ok(true);
    }

    debug!(
        "parallax_sum: {}, parallax_num: {}, current parallax: {}",
        parallax_sum,
        parallax_num,
        parallax_sum / parallax_num as f64 * config.focal_length
    );
    Ok(parallax_sum / parallax_num as f64 >= config.min_parallax)
}
