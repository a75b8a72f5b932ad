//! Medical profile operations.

use tracing::{debug, info, warn};

use super::{RecordStore, StoreResult};
use crate::models::{Locator, MedicalProfile, MedicalProfilePatch, NaturalKey};

impl RecordStore {
    /// All medical profiles in insertion order.
    pub fn list_profiles(&self) -> &[MedicalProfile] {
        &self.data.medicalrecords
    }

    /// Get a profile by surrogate id.
    pub fn get_profile(&self, id: &str) -> Option<&MedicalProfile> {
        self.data.medicalrecords.iter().find(|m| m.id == id)
    }

    /// First profile with the given first and last name.
    pub fn profile_by_name(&self, key: NaturalKey<'_>) -> Option<&MedicalProfile> {
        let found = self
            .data
            .medicalrecords
            .iter()
            .find(|m| m.natural_key() == key);
        if found.is_none() {
            debug!(
                "No medical record found for {} {}",
                key.first_name, key.last_name
            );
        }
        found
    }

    /// Append a profile. Duplicates are not detected.
    pub fn add_profile(&mut self, profile: MedicalProfile) -> StoreResult<()> {
        info!(
            id = %profile.id,
            "Adding medical record for {} {}", profile.first_name, profile.last_name
        );
        self.data.medicalrecords.push(profile);
        self.persist()
    }

    /// Patch an existing profile.
    pub fn update_profile(
        &mut self,
        target: &Locator,
        patch: &MedicalProfilePatch,
    ) -> StoreResult<bool> {
        let Some(profile) = self
            .data
            .medicalrecords
            .iter_mut()
            .find(|m| target.matches(&m.id, m.natural_key()))
        else {
            warn!("No medical record found to update with {}", target);
            return Ok(false);
        };

        if !profile.apply_patch(patch) {
            debug!(id = %profile.id, "No changes for medical record");
            return Ok(false);
        }

        info!(id = %profile.id, "Medical record updated");
        self.persist()?;
        Ok(true)
    }

    /// Remove the first profile matching the locator.
    pub fn delete_profile(&mut self, target: &Locator) -> StoreResult<bool> {
        let Some(index) = self
            .data
            .medicalrecords
            .iter()
            .position(|m| target.matches(&m.id, m.natural_key()))
        else {
            warn!("No medical record found to delete with {}", target);
            return Ok(false);
        };

        let removed = self.data.medicalrecords.remove(index);
        info!(id = %removed.id, "Medical record deleted");
        self.persist()?;
        Ok(true)
    }
}
