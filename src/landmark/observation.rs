//! Per-frame landmark measurements.

use nalgebra::{Vector2, Vector3};

/// Raw per-camera measurement of a landmark in one frame, as produced by
/// the upstream feature tracker.
#[derive(Debug, Clone, Copy)]
pub struct CameraMeasurement {
    /// Normalized camera-plane ray (z ≈ 1 for a calibrated pixel).
    pub ray: Vector3<f64>,
    /// Pixel location.
    pub uv: Vector2<f64>,
    /// Pixel velocity from optical flow.
    pub velocity: Vector2<f64>,
}

impl CameraMeasurement {
    /// Build from the wire 7-tuple `(x, y, z, u, v, vx, vy)`.
    pub fn from_array(m: &[f64; 7]) -> Self {
        Self {
            ray: Vector3::new(m[0], m[1], m[2]),
            uv: Vector2::new(m[3], m[4]),
            velocity: Vector2::new(m[5], m[6]),
        }
    }
}

/// One landmark's measurement in one frame. Immutable once created.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    /// Normalized camera-plane ray, used for triangulation and parallax.
    pub ray: Vector3<f64>,
    /// Pixel location.
    pub uv: Vector2<f64>,
    /// Pixel velocity.
    pub velocity: Vector2<f64>,
    /// Camera/IMU clock skew at capture (seconds).
    pub time_offset: f64,
    /// Whether the observation participates in depth estimation. Ingestion
    /// only ever inserts used observations.
    pub is_used: bool,
}

impl Observation {
    pub fn new(measurement: &CameraMeasurement, time_offset: f64) -> Self {
        Self {
            ray: measurement.ray,
            uv: measurement.uv,
            velocity: measurement.velocity,
            time_offset,
            is_used: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_measurement_from_array_field_order() {
        let m = CameraMeasurement::from_array(&[0.1, 0.2, 1.0, 320.0, 240.0, -1.5, 2.5]);

        assert_relative_eq!(m.ray, Vector3::new(0.1, 0.2, 1.0), epsilon = 1e-12);
        assert_relative_eq!(m.uv, Vector2::new(320.0, 240.0), epsilon = 1e-12);
        assert_relative_eq!(m.velocity, Vector2::new(-1.5, 2.5), epsilon = 1e-12);
    }

    #[test]
    fn test_observation_is_used_at_construction() {
        let m = CameraMeasurement::from_array(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let obs = Observation::new(&m, 0.003);

        assert!(obs.is_used);
        assert_relative_eq!(obs.time_offset, 0.003, epsilon = 1e-12);
    }
}
