//! Landmark - a tracked feature across contiguous window frames.

use super::observation::Observation;
use super::types::{LandmarkId, SolveStatus};

/// One tracked feature across contiguous frames in the sliding window.
///
/// A landmark owns one [`Observation`] per frame from `start_frame` to
/// `end_frame()` inclusive; the sequence is contiguous and never empty
/// while the landmark is stored. Depth lives on the ray of the first
/// observing frame and is seeded by triangulation, then refined by the
/// external optimizer through the depth-vector conversion.
#[derive(Debug, Clone)]
pub struct Landmark {
    /// Stable tracker-assigned identifier.
    pub id: LandmarkId,

    /// Window slot of the first observation (0 = oldest slot).
    pub start_frame: usize,

    /// One observation per frame, oldest first.
    pub observations: Vec<Observation>,

    /// Estimated depth along the first observation's ray, in the camera
    /// frame of `start_frame`. `None` until triangulation seeds it. The
    /// optimizer exchanges the reciprocal of this value.
    pub estimated_depth: Option<f64>,

    /// Outcome of the last external depth solve.
    pub solve_status: SolveStatus,

    /// Flagged as an outlier by the outer estimator.
    pub is_outlier: bool,

    /// Marked for marginalization by the outer estimator.
    pub is_marginalized: bool,
}

impl Landmark {
    /// Create a landmark first seen at `start_frame` with its initial
    /// observation.
    pub fn new(id: LandmarkId, start_frame: usize, first: Observation) -> Self {
        Self {
            id,
            start_frame,
            observations: vec![first],
            estimated_depth: None,
            solve_status: SolveStatus::Unsolved,
            is_outlier: false,
            is_marginalized: false,
        }
    }

    /// Window slot of the last observation.
    pub fn end_frame(&self) -> usize {
        self.start_frame + self.observations.len() - 1
    }

    /// Number of observations participating in depth estimation.
    pub fn used_count(&self) -> usize {
        self.observations.iter().filter(|o| o.is_used).count()
    }

    /// Whether the landmark is exposed to the external optimizer: observed
    /// at least twice, and first observed early enough in the window that
    /// its depth is constrained by more than the newest frames.
    pub fn is_optimizable(&self, window_size: usize) -> bool {
        self.used_count() >= 2 && self.start_frame + 2 < window_size
    }

    /// The observation at a given window slot, if the span covers it.
    pub fn observation_at(&self, frame: usize) -> Option<&Observation> {
        frame
            .checked_sub(self.start_frame)
            .and_then(|offset| self.observations.get(offset))
    }
}
