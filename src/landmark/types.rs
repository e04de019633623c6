//! Core ID and status types for the landmark store.

/// Unique identifier for a tracked landmark.
///
/// Ids are assigned by the upstream feature tracker and stay stable for the
/// lifetime of the track. They serve as lightweight handles for
/// cross-referencing without needing Arc/Rc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LandmarkId(pub u64);

impl LandmarkId {
    /// Create a new LandmarkId with the given value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Outcome of the external depth optimization for one landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveStatus {
    /// The optimizer has not produced a depth for this landmark yet.
    #[default]
    Unsolved,
    /// The optimizer returned a positive depth.
    Solved,
    /// The optimizer returned a negative depth; the landmark is deleted by
    /// the next failure-removal pass.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_id_equality() {
        let id1 = LandmarkId::new(42);
        let id2 = LandmarkId::new(42);
        let id3 = LandmarkId::new(43);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_landmark_id_display() {
        assert_eq!(format!("{}", LandmarkId::new(123)), "L123");
    }

    #[test]
    fn test_id_as_btreemap_key() {
        use std::collections::BTreeMap;

        let mut map: BTreeMap<LandmarkId, &str> = BTreeMap::new();
        map.insert(LandmarkId::new(2), "second");
        map.insert(LandmarkId::new(1), "first");

        assert_eq!(map.keys().next(), Some(&LandmarkId::new(1)));
        assert_eq!(map.get(&LandmarkId::new(3)), None);
    }

    #[test]
    fn test_solve_status_default() {
        assert_eq!(SolveStatus::default(), SolveStatus::Unsolved);
    }
}
