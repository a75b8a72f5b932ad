//! SafetyNet Alerts Core Library
//!
//! Emergency-dispatch lookups over residents, fire station coverage and medical records.
//!
//! # Architecture
//!
//! ```text
//!   data.json ──load──▶ RecordStore ◀──add/update/delete── API layer
//!                        │   persons ─────────┐
//!                        │   firestations ────┤ (persist after each change)
//!                        │   medicalrecords ──┘
//!                        ▼
//!             ┌──────────────────────┐
//!             │     ViewBuilder      │
//!             │  AddressResolver     │  address / station → residents
//!             │  ProfileLinker + age │  (first, last) → medical profile
//!             └──────────┬───────────┘
//!                        │
//!     ┌─────────┬────────┼─────────┬──────────┬──────────┐
//!     ▼         ▼        ▼         ▼          ▼          ▼
//!  Station    Fire     Flood     Child     Person    Community
//!  Coverage   Alert   Stations   Alert      Info      Emails
//! ```
//!
//! # Core Principle
//!
//! **Profiles are joined by name, never by id.** A person's medical profile is the first
//! profile with the same first and last name. Name collisions are not detected.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Person, CoverageAssignment, MedicalProfile, views)
//! - [`store`]: Record store and snapshot persistence
//! - [`query`]: Age calculator, profile linker, address resolver, view builder
//! - [`render`]: Text and JSON rendering of views
//! - [`config`]: Startup configuration

pub mod config;
pub mod models;
pub mod query;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use config::CoreConfig;
pub use models::{
    ChildAlert, CoverageAssignment, CoveragePatch, FireAlert, FloodHousehold, Locator,
    MedicalProfile, MedicalProfilePatch, NaturalKey, Person, PersonInfo, PersonPatch,
    PersonSummary, ResidentInfo, StationCoverage,
};
pub use query::{ViewBuilder, ViewError};
pub use store::{JsonFilePersistence, MemoryPersistence, Persistence, RecordStore, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum SafetyNetError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for SafetyNetError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Json(_) => SafetyNetError::Serialization(e.to_string()),
            _ => SafetyNetError::Persistence(e.to_string()),
        }
    }
}

impl From<ViewError> for SafetyNetError {
    fn from(e: ViewError) -> Self {
        SafetyNetError::MalformedInput(e.to_string())
    }
}

impl From<config::ConfigError> for SafetyNetError {
    fn from(e: config::ConfigError) -> Self {
        SafetyNetError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for SafetyNetError {
    fn from(e: serde_json::Error) -> Self {
        SafetyNetError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for SafetyNetError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        SafetyNetError::Persistence(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the JSON data file at the given path. The file must exist.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<SafetyNetCore>, SafetyNetError> {
    let config = CoreConfig::new(path.into())?;
    let store = RecordStore::open(config.data_file())?;
    Ok(Arc::new(SafetyNetCore::new(store)))
}

/// Create an empty in-memory store (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Arc<SafetyNetCore> {
    Arc::new(SafetyNetCore::new(RecordStore::open_in_memory()))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
///
/// Each call holds the lock for its whole duration: a view never observes a half-applied
/// mutation, and a mutation and its snapshot write happen under the same lock.
#[derive(uniffi::Object)]
pub struct SafetyNetCore {
    store: Arc<Mutex<RecordStore>>,
}

impl SafetyNetCore {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[uniffi::export]
impl SafetyNetCore {
    // =========================================================================
    // Person Operations
    // =========================================================================

    /// Add a person. An empty id is replaced by a fresh one.
    pub fn add_person(&self, person: FfiPerson) -> Result<FfiPerson, SafetyNetError> {
        let mut store = self.store.lock()?;
        let person: Person = person.into();
        store.add_person(person.clone())?;
        Ok(person.into())
    }

    /// Get a person by id.
    pub fn get_person(&self, id: String) -> Result<Option<FfiPerson>, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(store.get_person(&id).cloned().map(Into::into))
    }

    /// List all people.
    pub fn list_people(&self) -> Result<Vec<FfiPerson>, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(store.list_people().iter().cloned().map(Into::into).collect())
    }

    /// Patch a person. Returns false when absent or unchanged.
    pub fn update_person(&self, id: String, patch: FfiPersonPatch) -> Result<bool, SafetyNetError> {
        let mut store = self.store.lock()?;
        Ok(store.update_person(&Locator::Id(id), &patch.into())?)
    }

    /// Delete a person by id.
    pub fn delete_person(&self, id: String) -> Result<bool, SafetyNetError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_person(&Locator::Id(id))?)
    }

    // =========================================================================
    // Coverage Operations
    // =========================================================================

    /// Assign an address to a station.
    pub fn add_coverage(
        &self,
        address: String,
        station: u32,
    ) -> Result<FfiCoverageAssignment, SafetyNetError> {
        if address.is_empty() {
            return Err(SafetyNetError::InvalidInput("address cannot be empty".into()));
        }
        if station == 0 {
            return Err(SafetyNetError::InvalidInput(
                "station number must be positive".into(),
            ));
        }
        let mut store = self.store.lock()?;
        let assignment = CoverageAssignment::new(address, station);
        store.add_coverage(assignment.clone())?;
        Ok(assignment.into())
    }

    /// List all coverage assignments.
    pub fn list_coverage(&self) -> Result<Vec<FfiCoverageAssignment>, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(store.list_coverage().iter().cloned().map(Into::into).collect())
    }

    /// Get a coverage assignment by id.
    pub fn get_coverage(&self, id: String) -> Result<FfiCoverageAssignment, SafetyNetError> {
        let store = self.store.lock()?;
        store
            .get_coverage(&id)
            .cloned()
            .map(Into::into)
            .ok_or_else(|| SafetyNetError::NotFound(format!("coverage assignment {}", id)))
    }

    /// Patch a coverage assignment.
    pub fn update_coverage(
        &self,
        id: String,
        address: Option<String>,
        station: Option<u32>,
    ) -> Result<bool, SafetyNetError> {
        let mut store = self.store.lock()?;
        Ok(store.update_coverage(&id, &CoveragePatch { address, station })?)
    }

    /// Delete a coverage assignment by id.
    pub fn delete_coverage(&self, id: String) -> Result<bool, SafetyNetError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_coverage(&id)?)
    }

    // =========================================================================
    // Medical Profile Operations
    // =========================================================================

    /// Add a medical profile. The birth date must be "MM/DD/YYYY".
    pub fn add_medical_profile(
        &self,
        profile: FfiMedicalProfile,
    ) -> Result<FfiMedicalProfile, SafetyNetError> {
        query::age::parse_birthdate(&profile.birthdate).map_err(ViewError::from)?;
        let mut store = self.store.lock()?;
        let profile: MedicalProfile = profile.into();
        store.add_profile(profile.clone())?;
        Ok(profile.into())
    }

    /// Get the medical profile linked to a first and last name.
    pub fn find_medical_profile(
        &self,
        first_name: String,
        last_name: String,
    ) -> Result<Option<FfiMedicalProfile>, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(store
            .profile_by_name(NaturalKey::new(&first_name, &last_name))
            .cloned()
            .map(Into::into))
    }

    /// Patch a medical profile.
    pub fn update_medical_profile(
        &self,
        id: String,
        patch: FfiMedicalProfilePatch,
    ) -> Result<bool, SafetyNetError> {
        if let Some(birthdate) = patch.birthdate.as_deref().filter(|b| !b.is_empty()) {
            query::age::parse_birthdate(birthdate).map_err(ViewError::from)?;
        }
        let mut store = self.store.lock()?;
        Ok(store.update_profile(&Locator::Id(id), &patch.into())?)
    }

    /// Delete a medical profile by id.
    pub fn delete_medical_profile(&self, id: String) -> Result<bool, SafetyNetError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_profile(&Locator::Id(id))?)
    }

    // =========================================================================
    // View Operations
    // =========================================================================

    /// People covered by a station.
    pub fn station_coverage(&self, station: u32) -> Result<FfiStationCoverage, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(ViewBuilder::new(&store).station_coverage(station)?.into())
    }

    /// Residents of an address with their medical details.
    pub fn fire_alert(&self, address: String) -> Result<FfiFireAlert, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(ViewBuilder::new(&store).fire_alert(&address)?.into())
    }

    /// Households covered by any of the stations.
    pub fn flood_stations(
        &self,
        stations: Vec<u32>,
    ) -> Result<Vec<FfiFloodHousehold>, SafetyNetError> {
        let stations: BTreeSet<u32> = stations.into_iter().collect();
        let store = self.store.lock()?;
        let households = ViewBuilder::new(&store).flood_stations(&stations)?;
        Ok(households.into_iter().map(Into::into).collect())
    }

    /// Children at an address.
    pub fn child_alert(&self, address: String) -> Result<Vec<FfiChildAlert>, SafetyNetError> {
        let store = self.store.lock()?;
        let children = ViewBuilder::new(&store).child_alert(&address)?;
        Ok(children.into_iter().map(Into::into).collect())
    }

    /// Phone numbers of everyone covered by a station.
    pub fn phone_alert(&self, station: u32) -> Result<Vec<String>, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(ViewBuilder::new(&store)
            .phone_alert(station)
            .into_iter()
            .collect())
    }

    /// Contact and medical details by last name.
    pub fn person_info(&self, last_name: String) -> Result<Vec<FfiPersonInfo>, SafetyNetError> {
        let store = self.store.lock()?;
        let infos = ViewBuilder::new(&store).person_info(&last_name)?;
        Ok(infos.into_iter().map(Into::into).collect())
    }

    /// Email addresses of everyone in a city.
    pub fn community_emails(&self, city: String) -> Result<Vec<String>, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(ViewBuilder::new(&store)
            .community_emails(&city)
            .into_iter()
            .collect())
    }

    /// Export the whole data document as JSON.
    pub fn export_json(&self) -> Result<String, SafetyNetError> {
        let store = self.store.lock()?;
        Ok(render::to_json(store.snapshot())?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe person.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPerson {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl From<Person> for FfiPerson {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name,
            last_name: person.last_name,
            address: person.address,
            city: person.city,
            zip: person.zip,
            phone: person.phone,
            email: person.email,
        }
    }
}

impl From<FfiPerson> for Person {
    fn from(person: FfiPerson) -> Self {
        let mut converted = Person::new(
            person.first_name,
            person.last_name,
            person.address,
            person.city,
            person.zip,
            person.phone,
            person.email,
        );
        if !person.id.is_empty() {
            converted.id = person.id;
        }
        converted
    }
}

/// FFI-safe person patch.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<FfiPersonPatch> for PersonPatch {
    fn from(patch: FfiPersonPatch) -> Self {
        PersonPatch {
            first_name: patch.first_name,
            last_name: patch.last_name,
            address: patch.address,
            city: patch.city,
            zip: patch.zip,
            phone: patch.phone,
            email: patch.email,
        }
    }
}

/// FFI-safe coverage assignment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCoverageAssignment {
    pub id: String,
    pub address: String,
    pub station: u32,
}

impl From<CoverageAssignment> for FfiCoverageAssignment {
    fn from(assignment: CoverageAssignment) -> Self {
        Self {
            id: assignment.id,
            address: assignment.address,
            station: assignment.station,
        }
    }
}

/// FFI-safe medical profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: String,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl From<MedicalProfile> for FfiMedicalProfile {
    fn from(profile: MedicalProfile) -> Self {
        Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            birthdate: profile.birthdate,
            medications: profile.medications,
            allergies: profile.allergies,
        }
    }
}

impl From<FfiMedicalProfile> for MedicalProfile {
    fn from(profile: FfiMedicalProfile) -> Self {
        let mut converted = MedicalProfile::new(
            profile.first_name,
            profile.last_name,
            profile.birthdate,
            profile.medications,
            profile.allergies,
        );
        if !profile.id.is_empty() {
            converted.id = profile.id;
        }
        converted
    }
}

/// FFI-safe medical profile patch.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiMedicalProfilePatch {
    pub birthdate: Option<String>,
    pub medications: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
}

impl From<FfiMedicalProfilePatch> for MedicalProfilePatch {
    fn from(patch: FfiMedicalProfilePatch) -> Self {
        MedicalProfilePatch {
            first_name: None,
            last_name: None,
            birthdate: patch.birthdate,
            medications: patch.medications,
            allergies: patch.allergies,
        }
    }
}

/// FFI-safe person summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPersonSummary {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

impl From<PersonSummary> for FfiPersonSummary {
    fn from(summary: PersonSummary) -> Self {
        Self {
            first_name: summary.first_name,
            last_name: summary.last_name,
            address: summary.address,
            phone: summary.phone,
        }
    }
}

/// FFI-safe resident entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiResidentInfo {
    pub last_name: String,
    pub phone: String,
    pub age: u32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl From<ResidentInfo> for FfiResidentInfo {
    fn from(resident: ResidentInfo) -> Self {
        Self {
            last_name: resident.last_name,
            phone: resident.phone,
            age: resident.age,
            medications: resident.medications,
            allergies: resident.allergies,
        }
    }
}

/// FFI-safe station coverage.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStationCoverage {
    pub persons: Vec<FfiPersonSummary>,
    pub number_of_adults: u32,
    pub number_of_children: u32,
}

impl From<StationCoverage> for FfiStationCoverage {
    fn from(coverage: StationCoverage) -> Self {
        Self {
            persons: coverage.persons.into_iter().map(Into::into).collect(),
            number_of_adults: coverage.number_of_adults as u32,
            number_of_children: coverage.number_of_children as u32,
        }
    }
}

/// FFI-safe fire alert.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFireAlert {
    pub station_number: u32,
    pub residents: Vec<FfiResidentInfo>,
}

impl From<FireAlert> for FfiFireAlert {
    fn from(alert: FireAlert) -> Self {
        Self {
            station_number: alert.station_number,
            residents: alert.residents.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe flood household.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFloodHousehold {
    pub address: String,
    pub residents: Vec<FfiResidentInfo>,
}

impl From<FloodHousehold> for FfiFloodHousehold {
    fn from(household: FloodHousehold) -> Self {
        Self {
            address: household.address,
            residents: household.residents.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe child alert entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChildAlert {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub household_members: Vec<FfiPersonSummary>,
}

impl From<ChildAlert> for FfiChildAlert {
    fn from(alert: ChildAlert) -> Self {
        Self {
            first_name: alert.first_name,
            last_name: alert.last_name,
            age: alert.age,
            household_members: alert.household_members.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe person info.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPersonInfo {
    pub last_name: String,
    pub address: String,
    pub age: u32,
    pub email: String,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl From<PersonInfo> for FfiPersonInfo {
    fn from(info: PersonInfo) -> Self {
        Self {
            last_name: info.last_name,
            address: info.address,
            age: info.age,
            email: info.email,
            medications: info.medications,
            allergies: info.allergies,
        }
    }
}
