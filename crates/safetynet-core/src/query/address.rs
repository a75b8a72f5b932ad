//! Address and station resolution.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::models::Person;
use crate::store::RecordStore;

/// Resolves residents by address and by covering station.
pub struct AddressResolver<'a> {
    store: &'a RecordStore,
}

impl<'a> AddressResolver<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn people_at_address(&self, address: &str) -> Vec<&'a Person> {
        self.store.people_at_address(address)
    }

    pub fn people_at_addresses(&self, addresses: &BTreeSet<String>) -> Vec<&'a Person> {
        self.store.people_at_addresses(addresses)
    }

    /// Station number serving an address, if any.
    pub fn station_for_address(&self, address: &str) -> Option<u32> {
        self.store.coverage_by_address(address).map(|c| c.station)
    }

    /// Everyone at an address covered by the station.
    ///
    /// Residents are collected per assignment, so an address assigned twice to the same
    /// station contributes its residents twice.
    pub fn people_covered_by_station(&self, station: u32) -> Vec<&'a Person> {
        self.store
            .coverage_by_station(station)
            .into_iter()
            .flat_map(|assignment| self.store.people_at_address(&assignment.address))
            .collect()
    }

    /// Residents of every distinct address covered by any of the stations, keyed by address.
    ///
    /// Covered addresses without residents map to an empty list.
    pub fn households_covered_by_stations(
        &self,
        stations: &BTreeSet<u32>,
    ) -> BTreeMap<String, Vec<&'a Person>> {
        let mut households: BTreeMap<String, Vec<&'a Person>> = self
            .store
            .coverage_by_stations(stations)
            .into_iter()
            .map(|assignment| (assignment.address.clone(), Vec::new()))
            .collect();

        let addresses: BTreeSet<String> = households.keys().cloned().collect();
        for person in self.store.people_at_addresses(&addresses) {
            if let Some(members) = households.get_mut(&person.address) {
                members.push(person);
            }
        }

        debug!(
            "Grouped {} households for stations {:?}",
            households.len(),
            stations
        );
        households
    }
}
