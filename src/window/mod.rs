//! Per-frame operations over the landmark store.
//!
//! Control flow within one frame of the outer estimator loop:
//! 1. [`ingestion::ingest_frame`] adds the tracked features and decides
//!    keyframe-ness via [`parallax`].
//! 2. The external optimizer may call [`triangulation::triangulate_window`]
//!    and read state through [`depth`] and [`correspondence`].
//! 3. The optimizer writes depths back via [`depth::set_depth`].
//! 4. [`maintenance`] removes failed landmarks and shifts the store for
//!    whichever frame was marginalized.

pub mod correspondence;
pub mod debug;
pub mod depth;
pub mod ingestion;
pub mod maintenance;
pub mod parallax;
pub mod triangulation;

pub use correspondence::corresponding_points;
pub use debug::debug_dump;
pub use depth::{clear_depth, depth_vector, optimizable_count, set_depth};
pub use ingestion::{ingest_frame, FrameObservations};
pub use maintenance::{
    remove_back, remove_back_shift_depth, remove_failures, remove_front, remove_outliers,
};
pub use parallax::compensated_parallax;
pub use triangulation::triangulate_window;
