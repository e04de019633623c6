//! LandmarkStore - the aggregate root owning all tracked landmarks.

use super::landmark::Landmark;
use super::types::LandmarkId;

/// Insertion-ordered collection of landmarks.
///
/// Insertion order is the deterministic traversal order the depth-vector
/// conversion relies on, so the store is a `Vec` with id lookup by linear
/// scan (the active set is small, on the order of the tracker's feature
/// budget). Removal during maintenance passes goes through
/// [`retain`](Self::retain)/[`retain_mut`](Self::retain_mut), which visit
/// every landmark exactly once.
#[derive(Debug, Default)]
pub struct LandmarkStore {
    landmarks: Vec<Landmark>,
    last_track_count: usize,
}

impl LandmarkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of landmarks currently stored.
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Whether a landmark with this id is stored.
    pub fn contains(&self, id: LandmarkId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a landmark by id.
    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.id == id)
    }

    /// Look up a landmark by id, mutably.
    pub fn get_mut(&mut self, id: LandmarkId) -> Option<&mut Landmark> {
        self.landmarks.iter_mut().find(|l| l.id == id)
    }

    /// Append a landmark. The caller guarantees the id is not present.
    pub fn insert(&mut self, landmark: Landmark) {
        self.landmarks.push(landmark);
    }

    /// Iterate landmarks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    /// Iterate landmarks in insertion order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Landmark> {
        self.landmarks.iter_mut()
    }

    /// Keep only the landmarks for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Landmark) -> bool) {
        self.landmarks.retain(keep);
    }

    /// Keep only the landmarks for which `keep` returns true, allowing the
    /// predicate to mutate each landmark before deciding.
    pub fn retain_mut(&mut self, keep: impl FnMut(&mut Landmark) -> bool) {
        self.landmarks.retain_mut(keep);
    }

    /// Drop all landmark state.
    pub fn clear(&mut self) {
        self.landmarks.clear();
        self.last_track_count = 0;
    }

    /// Number of already-known landmarks re-observed by the last ingested
    /// frame. The outer estimator reads this for failure detection.
    pub fn last_track_count(&self) -> usize {
        self.last_track_count
    }

    pub(crate) fn set_last_track_count(&mut self, count: usize) {
        self.last_track_count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::observation::{CameraMeasurement, Observation};
    use nalgebra::{Vector2, Vector3};

    fn landmark(id: u64, start_frame: usize) -> Landmark {
        let obs = Observation::new(
            &CameraMeasurement {
                ray: Vector3::new(0.1, 0.1, 1.0),
                uv: Vector2::zeros(),
                velocity: Vector2::zeros(),
            },
            0.0,
        );
        Landmark::new(LandmarkId::new(id), start_frame, obs)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = LandmarkStore::new();
        store.insert(landmark(5, 0));
        store.insert(landmark(3, 1));

        assert_eq!(store.len(), 2);
        assert!(store.contains(LandmarkId::new(5)));
        assert!(!store.contains(LandmarkId::new(4)));
        assert_eq!(store.get(LandmarkId::new(3)).unwrap().start_frame, 1);
    }

    #[test]
    fn test_iteration_is_insertion_ordered() {
        let mut store = LandmarkStore::new();
        for id in [9, 2, 7] {
            store.insert(landmark(id, 0));
        }

        let ids: Vec<u64> = store.iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![9, 2, 7]);
    }

    #[test]
    fn test_retain_removes_without_skipping() {
        let mut store = LandmarkStore::new();
        for id in 0..6 {
            store.insert(landmark(id, 0));
        }

        // Drop every even id, including adjacent removals.
        store.retain(|l| l.id.0 % 2 == 1);

        let ids: Vec<u64> = store.iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_clear_resets_track_count() {
        let mut store = LandmarkStore::new();
        store.insert(landmark(1, 0));
        store.set_last_track_count(7);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.last_track_count(), 0);
    }
}
