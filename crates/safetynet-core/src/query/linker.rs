//! Person to medical profile linking.

use chrono::NaiveDate;
use tracing::debug;

use super::age::{calculate_age_on, AgeResult};
use crate::models::{MedicalProfile, NaturalKey, Person};
use crate::store::RecordStore;

/// Oldest age still counted as a child.
pub const CHILD_AGE_LIMIT: u32 = 18;

/// Resolves medical profiles by natural key and derives ages from them.
pub struct ProfileLinker<'a> {
    store: &'a RecordStore,
    today: NaiveDate,
}

impl<'a> ProfileLinker<'a> {
    pub fn new(store: &'a RecordStore, today: NaiveDate) -> Self {
        Self { store, today }
    }

    /// Profile for a first and last name.
    pub fn find_profile(&self, first_name: &str, last_name: &str) -> Option<&'a MedicalProfile> {
        self.store
            .profile_by_name(NaturalKey::new(first_name, last_name))
    }

    /// Profile linked to a person.
    pub fn profile_of(&self, person: &Person) -> Option<&'a MedicalProfile> {
        self.store.profile_by_name(person.natural_key())
    }

    /// Age of a profile holder as of the reference date.
    pub fn profile_age(&self, profile: &MedicalProfile) -> AgeResult<u32> {
        calculate_age_on(&profile.birthdate, self.today)
    }

    /// Age of a person, 0 when no profile is linked.
    pub fn age_of(&self, person: &Person) -> AgeResult<u32> {
        match self.profile_of(person) {
            Some(profile) => self.profile_age(profile),
            None => Ok(0),
        }
    }

    /// A person without a profile is never a child.
    pub fn is_child(&self, person: &Person) -> AgeResult<bool> {
        let Some(profile) = self.profile_of(person) else {
            debug!(
                "No medical record for {} {}, counted as adult",
                person.first_name, person.last_name
            );
            return Ok(false);
        };
        Ok(self.profile_age(profile)? <= CHILD_AGE_LIMIT)
    }
}
