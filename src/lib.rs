//! Landmark lifecycle management for a sliding-window visual-inertial
//! odometry estimator.
//!
//! For every incoming camera frame this crate ingests the tracked 2D
//! feature correspondences, decides whether the frame is a keyframe from
//! the average parallax against the previous frames, maintains per-landmark
//! observation histories across the fixed-size window, triangulates depth
//! via multi-view geometry, and reshuffles or deletes landmark state when
//! frames are marginalized out of the window.
//!
//! The surrounding estimator - IMU preintegration, the nonlinear
//! optimizer, feature detection/tracking - lives outside this crate and
//! talks to it through [`window::ingest_frame`], the depth-vector
//! conversion in [`window::depth`] and the maintenance passes in
//! [`window::maintenance`]. Everything here is synchronous and
//! single-threaded; camera poses are borrowed per call and never retained.

pub mod config;
pub mod geometry;
pub mod landmark;
pub mod window;
