//! Medical profile models.

use serde::{Deserialize, Serialize};

use super::patch::{merge_list, merge_text};
use super::person::NaturalKey;

/// Birth date format of the data document.
pub const BIRTHDATE_FORMAT: &str = "%m/%d/%Y";

/// A resident's medical profile, linked to a person by first and last name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalProfile {
    #[serde(default = "super::new_record_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// "MM/DD/YYYY"
    pub birthdate: String,
    /// Medication names, order preserving, duplicates allowed
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl MedicalProfile {
    /// Create a new profile with a fresh surrogate id.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: impl Into<String>,
        medications: Vec<String>,
        allergies: Vec<String>,
    ) -> Self {
        Self {
            id: super::new_record_id(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthdate: birthdate.into(),
            medications,
            allergies,
        }
    }

    pub fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey::new(&self.first_name, &self.last_name)
    }

    /// Apply a patch, returning whether any field changed.
    pub fn apply_patch(&mut self, patch: &MedicalProfilePatch) -> bool {
        merge_text(&mut self.first_name, patch.first_name.as_deref())
            | merge_text(&mut self.last_name, patch.last_name.as_deref())
            | merge_text(&mut self.birthdate, patch.birthdate.as_deref())
            | merge_list(&mut self.medications, patch.medications.as_deref())
            | merge_list(&mut self.allergies, patch.allergies.as_deref())
    }
}

/// Incoming medical profile changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<String>,
    pub medications: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
}
