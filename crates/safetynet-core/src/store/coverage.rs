//! Coverage assignment operations.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::{RecordStore, StoreResult};
use crate::models::{CoverageAssignment, CoveragePatch};

impl RecordStore {
    /// All coverage assignments in insertion order.
    pub fn list_coverage(&self) -> &[CoverageAssignment] {
        &self.data.firestations
    }

    /// Get an assignment by surrogate id.
    pub fn get_coverage(&self, id: &str) -> Option<&CoverageAssignment> {
        self.data.firestations.iter().find(|c| c.id == id)
    }

    /// Append an assignment. Duplicates are not detected.
    pub fn add_coverage(&mut self, assignment: CoverageAssignment) -> StoreResult<()> {
        info!(
            id = %assignment.id,
            "Adding coverage of {} by station {}", assignment.address, assignment.station
        );
        self.data.firestations.push(assignment);
        self.persist()
    }

    /// Patch an existing assignment.
    pub fn update_coverage(&mut self, id: &str, patch: &CoveragePatch) -> StoreResult<bool> {
        let Some(assignment) = self.data.firestations.iter_mut().find(|c| c.id == id) else {
            warn!("No coverage assignment found to update with id {}", id);
            return Ok(false);
        };

        if !assignment.apply_patch(patch) {
            debug!(id, "No changes for coverage assignment");
            return Ok(false);
        }

        info!(id, "Coverage assignment updated");
        self.persist()?;
        Ok(true)
    }

    /// Remove an assignment by surrogate id.
    pub fn delete_coverage(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.data.firestations.iter().position(|c| c.id == id) else {
            warn!("No coverage assignment found to delete with id {}", id);
            return Ok(false);
        };

        self.data.firestations.remove(index);
        info!(id, "Coverage assignment deleted");
        self.persist()?;
        Ok(true)
    }

    /// Assignments of one station.
    pub fn coverage_by_station(&self, station: u32) -> Vec<&CoverageAssignment> {
        let found: Vec<&CoverageAssignment> = self
            .data
            .firestations
            .iter()
            .filter(|c| c.station == station)
            .collect();
        debug!("Found {} assignments for station {}", found.len(), station);
        found
    }

    /// Assignments of any of the given stations.
    pub fn coverage_by_stations(&self, stations: &BTreeSet<u32>) -> Vec<&CoverageAssignment> {
        self.data
            .firestations
            .iter()
            .filter(|c| stations.contains(&c.station))
            .collect()
    }

    /// First assignment for an address.
    pub fn coverage_by_address(&self, address: &str) -> Option<&CoverageAssignment> {
        let found = self.data.firestations.iter().find(|c| c.address == address);
        if found.is_none() {
            debug!("No station covers address: {}", address);
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryPersistence, Snapshot};

    fn setup_store() -> (RecordStore, MemoryPersistence) {
        let backend = MemoryPersistence::default();
        let mut store = RecordStore::new(Snapshot::default(), Box::new(backend.clone()));
        store.add_coverage(CoverageAssignment::new("1509 Culver St", 3)).unwrap();
        store.add_coverage(CoverageAssignment::new("29 15th St", 2)).unwrap();
        store.add_coverage(CoverageAssignment::new("834 Binoc Ave", 3)).unwrap();
        store.add_coverage(CoverageAssignment::new("644 Gershwin Cir", 1)).unwrap();
        (store, backend)
    }

    #[test]
    fn test_finders() {
        let (store, _) = setup_store();

        assert_eq!(store.coverage_by_station(3).len(), 2);
        assert!(store.coverage_by_station(9).is_empty());
        assert_eq!(store.coverage_by_stations(&BTreeSet::from([1, 2])).len(), 2);
        assert_eq!(store.coverage_by_address("29 15th St").unwrap().station, 2);
        assert!(store.coverage_by_address("nowhere").is_none());
    }

    #[test]
    fn test_update_coverage() {
        let (mut store, backend) = setup_store();
        let id = store.list_coverage()[1].id.clone();

        let unchanged = CoveragePatch {
            address: None,
            station: Some(2),
        };
        assert!(!store.update_coverage(&id, &unchanged).unwrap());
        assert_eq!(backend.save_count(), 4);

        let moved = CoveragePatch {
            address: None,
            station: Some(4),
        };
        assert!(store.update_coverage(&id, &moved).unwrap());
        assert_eq!(store.get_coverage(&id).unwrap().station, 4);
        assert_eq!(backend.save_count(), 5);

        assert!(!store.update_coverage("missing", &moved).unwrap());
    }

    #[test]
    fn test_delete_coverage() {
        let (mut store, _) = setup_store();
        let id = store.list_coverage()[0].id.clone();

        assert!(store.delete_coverage(&id).unwrap());
        assert!(!store.delete_coverage(&id).unwrap());
        assert_eq!(store.coverage_count(), 3);
        assert_eq!(store.coverage_by_station(3).len(), 1);
    }
}
