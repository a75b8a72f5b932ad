//! Person operations.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::{RecordStore, StoreResult};
use crate::models::{Locator, Person, PersonPatch};

impl RecordStore {
    /// All people in insertion order.
    pub fn list_people(&self) -> &[Person] {
        &self.data.persons
    }

    /// Get a person by surrogate id.
    pub fn get_person(&self, id: &str) -> Option<&Person> {
        self.data.persons.iter().find(|p| p.id == id)
    }

    /// First person matching the locator.
    pub fn find_person(&self, locator: &Locator) -> Option<&Person> {
        self.data
            .persons
            .iter()
            .find(|p| locator.matches(&p.id, p.natural_key()))
    }

    /// Append a person. Duplicates are not detected.
    pub fn add_person(&mut self, person: Person) -> StoreResult<()> {
        info!(id = %person.id, "Adding person {} {}", person.first_name, person.last_name);
        self.data.persons.push(person);
        self.persist()
    }

    /// Patch an existing person.
    ///
    /// Returns `Ok(false)` when the target is absent or nothing changed; the snapshot is only
    /// written on an actual change.
    pub fn update_person(&mut self, target: &Locator, patch: &PersonPatch) -> StoreResult<bool> {
        let Some(person) = self
            .data
            .persons
            .iter_mut()
            .find(|p| target.matches(&p.id, p.natural_key()))
        else {
            warn!("No person found to update with {}", target);
            return Ok(false);
        };

        if !person.apply_patch(patch) {
            debug!(id = %person.id, "No changes for person");
            return Ok(false);
        }

        info!(id = %person.id, "Person updated");
        self.persist()?;
        Ok(true)
    }

    /// Remove the first person matching the locator.
    pub fn delete_person(&mut self, target: &Locator) -> StoreResult<bool> {
        let Some(index) = self
            .data
            .persons
            .iter()
            .position(|p| target.matches(&p.id, p.natural_key()))
        else {
            warn!("No person found to delete with {}", target);
            return Ok(false);
        };

        let removed = self.data.persons.remove(index);
        info!(id = %removed.id, "Person deleted");
        self.persist()?;
        Ok(true)
    }

    /// People at an address (exact match).
    pub fn people_at_address(&self, address: &str) -> Vec<&Person> {
        let found: Vec<&Person> = self
            .data
            .persons
            .iter()
            .filter(|p| p.address == address)
            .collect();
        debug!("Found {} persons at address: {}", found.len(), address);
        found
    }

    /// People living at any of the given addresses.
    pub fn people_at_addresses(&self, addresses: &BTreeSet<String>) -> Vec<&Person> {
        self.data
            .persons
            .iter()
            .filter(|p| addresses.contains(&p.address))
            .collect()
    }

    /// People in a city (exact match).
    pub fn people_in_city(&self, city: &str) -> Vec<&Person> {
        let found: Vec<&Person> = self.data.persons.iter().filter(|p| p.city == city).collect();
        debug!("Found {} persons in city: {}", found.len(), city);
        found
    }

    /// People with a last name.
    pub fn people_by_last_name(&self, last_name: &str) -> Vec<&Person> {
        self.data
            .persons
            .iter()
            .filter(|p| p.last_name == last_name)
            .collect()
    }
}
