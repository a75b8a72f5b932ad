//! Person models.

use serde::{Deserialize, Serialize};

use super::patch::merge_text;

/// Identity formed from first and last name.
///
/// Medical profiles are joined to people through this key, never through the
/// surrogate id. Uniqueness is not enforced: on a collision the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalKey<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

impl<'a> NaturalKey<'a> {
    pub fn new(first_name: &'a str, last_name: &'a str) -> Self {
        Self {
            first_name,
            last_name,
        }
    }
}

/// Selects a person or medical profile for update/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Surrogate identifier
    Id(String),
    /// First and last name
    Name { first_name: String, last_name: String },
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn name(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Locator::Name {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Check whether a record with the given id and natural key is targeted.
    pub(crate) fn matches(&self, id: &str, key: NaturalKey<'_>) -> bool {
        match self {
            Locator::Id(target) => target == id,
            Locator::Name {
                first_name,
                last_name,
            } => key == NaturalKey::new(first_name, last_name),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "id {}", id),
            Locator::Name {
                first_name,
                last_name,
            } => write!(f, "{} {}", first_name, last_name),
        }
    }
}

/// A resident record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Surrogate identifier used for CRUD addressing
    #[serde(default = "super::new_record_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Street address, matched exactly against coverage assignments
    pub address: String,
    pub city: String,
    pub zip: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Person {
    /// Create a new person with a fresh surrogate id.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: super::new_record_id(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            zip: zip.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey::new(&self.first_name, &self.last_name)
    }

    /// Same stored record (surrogate id equality).
    pub fn is_same_record(&self, other: &Person) -> bool {
        self.id == other.id
    }

    /// Apply a patch, returning whether any field changed.
    pub fn apply_patch(&mut self, patch: &PersonPatch) -> bool {
        merge_text(&mut self.first_name, patch.first_name.as_deref())
            | merge_text(&mut self.last_name, patch.last_name.as_deref())
            | merge_text(&mut self.address, patch.address.as_deref())
            | merge_text(&mut self.city, patch.city.as_deref())
            | merge_text(&mut self.zip, patch.zip.as_deref())
            | merge_text(&mut self.phone, patch.phone.as_deref())
            | merge_text(&mut self.email, patch.email.as_deref())
    }
}

/// Incoming person changes. Absent or empty fields keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
