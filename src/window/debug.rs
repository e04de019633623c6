//! Store diagnostics.

use anyhow::{ensure, Result};
use tracing::debug;

use crate::config::Config;
use crate::landmark::LandmarkStore;

/// Log every landmark's span and usage and verify the store invariants a
/// healthy window must satisfy: no landmark without observations, and no
/// span reaching past the newest window slot.
pub fn debug_dump(store: &LandmarkStore, config: &Config) -> Result<()> {
    debug!("store holds {} landmarks", store.len());
    for landmark in store.iter() {
        ensure!(
            !landmark.observations.is_empty(),
            "landmark {} has no observations",
            landmark.id
        );
        ensure!(
            landmark.end_frame() <= config.window_size,
            "landmark {} spans {}..={}, past the newest slot {}",
            landmark.id,
            landmark.start_frame,
            landmark.end_frame(),
            config.window_size
        );
        debug!(
            "{}: start_frame={} observations={} used={} depth={:?}",
            landmark.id,
            landmark.start_frame,
            landmark.observations.len(),
            landmark.used_count(),
            landmark.estimated_depth
        );
    }
    Ok(())
}
