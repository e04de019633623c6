//! Sliding-window estimator configuration.

use anyhow::{ensure, Result};
use serde::Deserialize;

/// Configuration constants for the landmark manager.
///
/// `window_size` follows the estimator convention that slot indices run
/// `0..=window_size`: the newest incoming frame occupies a provisional slot
/// at index `window_size` until marginalization decides its fate, so
/// caller-owned pose arrays span `window_size + 1` entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of keyframes jointly optimized in the sliding window.
    pub window_size: usize,
    /// Average-parallax keyframe threshold, in normalized image-plane units.
    pub min_parallax: f64,
    /// Fallback depth (meters) for degenerate or failed triangulation.
    pub default_depth: f64,
    /// Focal length in pixels. Only scales parallax diagnostics, never
    /// control flow.
    pub focal_length: f64,
    /// Below this many re-tracked features, a frame is always a keyframe.
    pub min_track_count: usize,
    /// Frames with index below this are always keyframes.
    pub bootstrap_frames: usize,
    /// Cameras per frame. Only single-camera setups are supported.
    pub num_cameras: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: 10,
            min_parallax: 10.0 / 460.0,
            default_depth: 5.0,
            focal_length: 460.0,
            min_track_count: 20,
            bootstrap_frames: 2,
            num_cameras: 1,
        }
    }
}

impl Config {
    /// Check the configuration invariants the rest of the crate relies on.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window_size >= 3,
            "window_size must be at least 3, got {}",
            self.window_size
        );
        ensure!(
            self.num_cameras == 1,
            "only single-camera configurations are supported, got {}",
            self.num_cameras
        );
        ensure!(
            self.default_depth > 0.0,
            "default_depth must be positive, got {}",
            self.default_depth
        );
        ensure!(
            self.min_parallax > 0.0,
            "min_parallax must be positive, got {}",
            self.min_parallax
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_multi_camera_rejected() {
        let config = Config {
            num_cameras: 2,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tiny_window_rejected() {
        let config = Config {
            window_size: 2,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
