//! Derived views over the record store.
//!
//! Pipeline: Address Resolver → Profile Linker (+ Age) → View assembly
//!
//! Every view is recomputed from the store on each call; nothing is cached between queries.

pub mod age;
mod address;
mod linker;

pub use address::*;
pub use linker::*;

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{
    ChildAlert, FireAlert, FloodHousehold, Person, PersonInfo, PersonSummary, ResidentInfo,
    StationCoverage,
};
use crate::store::RecordStore;

/// View errors.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Age(#[from] age::AgeError),
}

pub type ViewResult<T> = Result<T, ViewError>;

/// Builds the alert and coverage views.
pub struct ViewBuilder<'a> {
    store: &'a RecordStore,
    resolver: AddressResolver<'a>,
    linker: ProfileLinker<'a>,
}

impl<'a> ViewBuilder<'a> {
    /// Create a view builder computing ages as of today.
    pub fn new(store: &'a RecordStore) -> Self {
        Self::on(store, Local::now().date_naive())
    }

    /// Create a view builder computing ages as of `today`.
    pub fn on(store: &'a RecordStore, today: NaiveDate) -> Self {
        Self {
            store,
            resolver: AddressResolver::new(store),
            linker: ProfileLinker::new(store, today),
        }
    }

    /// People covered by a station with the adult/child breakdown.
    ///
    /// One summary per covered resident, so the counts always add up to `persons.len()`.
    pub fn station_coverage(&self, station: u32) -> ViewResult<StationCoverage> {
        let covered = self.resolver.people_covered_by_station(station);

        let mut number_of_children = 0;
        for person in &covered {
            if self.linker.is_child(person)? {
                number_of_children += 1;
            }
        }

        let coverage = StationCoverage {
            persons: covered.iter().map(|p| PersonSummary::from(*p)).collect(),
            number_of_adults: covered.len() - number_of_children,
            number_of_children,
        };
        info!(
            station,
            adults = coverage.number_of_adults,
            children = coverage.number_of_children,
            "Station coverage computed"
        );
        Ok(coverage)
    }

    /// Residents of an address and the station serving it (0 when unassigned).
    pub fn fire_alert(&self, address: &str) -> ViewResult<FireAlert> {
        let station_number = self.resolver.station_for_address(address).unwrap_or(0);
        let residents = self.resident_infos(&self.resolver.people_at_address(address))?;

        debug!(
            "Fire alert for {}: station {}, {} residents",
            address,
            station_number,
            residents.len()
        );
        Ok(FireAlert {
            station_number,
            residents,
        })
    }

    /// One household per distinct address covered by any of the stations.
    pub fn flood_stations(&self, stations: &BTreeSet<u32>) -> ViewResult<Vec<FloodHousehold>> {
        let households = self
            .resolver
            .households_covered_by_stations(stations)
            .into_iter()
            .map(|(address, members)| {
                Ok(FloodHousehold {
                    residents: self.resident_infos(&members)?,
                    address,
                })
            })
            .collect::<ViewResult<Vec<_>>>()?;

        info!(
            "Retrieved {} households for stations {:?}",
            households.len(),
            stations
        );
        Ok(households)
    }

    /// Children at an address, each with the other members of the household.
    pub fn child_alert(&self, address: &str) -> ViewResult<Vec<ChildAlert>> {
        let household = self.resolver.people_at_address(address);
        let mut alerts = Vec::new();

        for child in &household {
            // is_child only holds for linked profiles
            let Some(profile) = self.linker.profile_of(child) else {
                continue;
            };
            let age = self.linker.profile_age(profile)?;
            if age > CHILD_AGE_LIMIT {
                continue;
            }

            alerts.push(ChildAlert {
                first_name: child.first_name.clone(),
                last_name: child.last_name.clone(),
                age,
                household_members: household
                    .iter()
                    .filter(|member| !member.is_same_record(child))
                    .map(|member| PersonSummary::from(*member))
                    .collect(),
            });
        }

        debug!("Found {} children at {}", alerts.len(), address);
        Ok(alerts)
    }

    /// Phone numbers of everyone covered by a station.
    pub fn phone_alert(&self, station: u32) -> BTreeSet<String> {
        self.resolver
            .people_covered_by_station(station)
            .into_iter()
            .filter(|p| !p.phone.is_empty())
            .map(|p| p.phone.clone())
            .collect()
    }

    /// Contact and medical details of everyone with a last name.
    pub fn person_info(&self, last_name: &str) -> ViewResult<Vec<PersonInfo>> {
        self.store
            .people_by_last_name(last_name)
            .into_iter()
            .map(|person| {
                let profile = self.linker.profile_of(person);
                Ok(PersonInfo {
                    last_name: person.last_name.clone(),
                    address: person.address.clone(),
                    age: self.linker.age_of(person)?,
                    email: person.email.clone(),
                    medications: profile.map(|m| m.medications.clone()).unwrap_or_default(),
                    allergies: profile.map(|m| m.allergies.clone()).unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Non-empty email addresses of everyone in a city.
    pub fn community_emails(&self, city: &str) -> BTreeSet<String> {
        self.store
            .people_in_city(city)
            .into_iter()
            .filter(|p| !p.email.is_empty())
            .map(|p| p.email.clone())
            .collect()
    }

    /// Resident summary with medical details, defaults when no profile is linked.
    pub fn resident_info(&self, person: &Person) -> ViewResult<ResidentInfo> {
        let profile = self.linker.profile_of(person);
        let age = match profile {
            Some(profile) => self.linker.profile_age(profile)?,
            None => 0,
        };

        Ok(ResidentInfo {
            last_name: person.last_name.clone(),
            phone: person.phone.clone(),
            age,
            medications: profile.map(|m| m.medications.clone()).unwrap_or_default(),
            allergies: profile.map(|m| m.allergies.clone()).unwrap_or_default(),
        })
    }

    fn resident_infos(&self, people: &[&Person]) -> ViewResult<Vec<ResidentInfo>> {
        people.iter().map(|p| self.resident_info(p)).collect()
    }

    /// Get the profile linker for direct access.
    pub fn linker(&self) -> &ProfileLinker<'a> {
        &self.linker
    }

    /// Get the address resolver for direct access.
    pub fn resolver(&self) -> &AddressResolver<'a> {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoverageAssignment, MedicalProfile};

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn setup_store() -> RecordStore {
        let mut store = RecordStore::open_in_memory();
        store
            .add_person(Person::new(
                "John", "Doe", "5 Oak St", "Culver", "97451", "555-0100", "john@email.com",
            ))
            .unwrap();
        store
            .add_profile(MedicalProfile::new(
                "John",
                "Doe",
                "01/01/2010",
                vec!["med1".into()],
                vec!["peanut".into()],
            ))
            .unwrap();
        store.add_coverage(CoverageAssignment::new("5 Oak St", 3)).unwrap();
        store
    }

    fn add_jane(store: &mut RecordStore) {
        store
            .add_person(Person::new(
                "Jane", "Doe", "5 Oak St", "Culver", "97451", "555-0101", "",
            ))
            .unwrap();
    }

    #[test]
    fn test_single_child_household() {
        let store = setup_store();
        let views = ViewBuilder::on(&store, reference_date());

        let coverage = views.station_coverage(3).unwrap();
        assert_eq!(coverage.number_of_children, 1);
        assert_eq!(coverage.number_of_adults, 0);

        let fire = views.fire_alert("5 Oak St").unwrap();
        assert_eq!(fire.station_number, 3);
        let resident = &fire.residents[0];
        assert_eq!(resident.last_name, "Doe");
        assert_eq!(resident.age, 14);
        assert_eq!(resident.medications, vec!["med1"]);
        assert_eq!(resident.allergies, vec!["peanut"]);

        let children = views.child_alert("5 Oak St").unwrap();
        assert_eq!(children.len(), 1);
        let child = &children[0];
        assert_eq!((child.first_name.as_str(), child.age), ("John", 14));
        assert!(child.household_members.is_empty());
    }

    #[test]
    fn test_unlinked_adult_gets_defaults() {
        let mut store = setup_store();
        add_jane(&mut store);
        let views = ViewBuilder::on(&store, reference_date());

        let fire = views.fire_alert("5 Oak St").unwrap();
        assert_eq!(fire.residents.len(), 2);
        let jane = fire.residents.iter().find(|r| r.phone == "555-0101").unwrap();
        assert_eq!(jane.age, 0);
        assert!(jane.medications.is_empty());
        assert!(jane.allergies.is_empty());

        let coverage = views.station_coverage(3).unwrap();
        assert_eq!(coverage.number_of_adults, 1);
        assert_eq!(coverage.number_of_children, 1);

        let children = views.child_alert("5 Oak St").unwrap();
        let members = &children[0].household_members;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].first_name, "Jane");
    }

    #[test]
    fn test_fire_alert_without_station() {
        let mut store = setup_store();
        store
            .add_person(Person::new("Ron", "Peters", "112 Steppes Pl", "Culver", "97451", "555", ""))
            .unwrap();
        let views = ViewBuilder::on(&store, reference_date());

        let fire = views.fire_alert("112 Steppes Pl").unwrap();
        assert_eq!(fire.station_number, 0);
        assert_eq!(fire.residents.len(), 1);

        let empty = views.fire_alert("nowhere").unwrap();
        assert_eq!(empty.station_number, 0);
        assert!(empty.residents.is_empty());
    }

    #[test]
    fn test_person_info_and_emails() {
        let mut store = setup_store();
        add_jane(&mut store);
        let views = ViewBuilder::on(&store, reference_date());

        let infos = views.person_info("Doe").unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].age, 14);
        assert_eq!(infos[0].email, "john@email.com");
        assert_eq!(infos[1].age, 0);

        let emails = views.community_emails("Culver");
        assert_eq!(emails, BTreeSet::from(["john@email.com".to_string()]));
        assert!(views.community_emails("Springfield").is_empty());
    }

    #[test]
    fn test_phone_alert() {
        let mut store = setup_store();
        add_jane(&mut store);
        let views = ViewBuilder::on(&store, reference_date());

        assert_eq!(views.phone_alert(3).len(), 2);
        assert!(views.phone_alert(1).is_empty());
    }

    #[test]
    fn test_identical_residents_are_kept_apart() {
        let mut store = RecordStore::open_in_memory();
        for first in ["Ann", "Bob"] {
            store
                .add_person(Person::new(first, "Doe", "5 Oak St", "Culver", "97451", "555-0100", ""))
                .unwrap();
        }
        store
            .add_person(Person::new("Cal", "Doe", "5 Oak St", "Culver", "97451", "555-0100", ""))
            .unwrap();
        store
            .add_profile(MedicalProfile::new("Cal", "Doe", "01/01/2015", vec![], vec![]))
            .unwrap();
        store.add_coverage(CoverageAssignment::new("5 Oak St", 3)).unwrap();
        let views = ViewBuilder::on(&store, reference_date());

        let fire = views.fire_alert("5 Oak St").unwrap();
        assert_eq!(fire.residents.len(), 3);
        assert_eq!(fire.residents[0], fire.residents[1]);

        let flood = views.flood_stations(&BTreeSet::from([3])).unwrap();
        assert_eq!(flood[0].residents.len(), 3);

        let coverage = views.station_coverage(3).unwrap();
        assert_eq!(coverage.persons.len(), 3);
        assert_eq!(coverage.number_of_adults, 2);
        assert_eq!(coverage.number_of_children, 1);

        let children = views.child_alert("5 Oak St").unwrap();
        assert_eq!(children.len(), 1);
        let members: Vec<&str> = children[0]
            .household_members
            .iter()
            .map(|m| m.first_name.as_str())
            .collect();
        assert_eq!(members, vec!["Ann", "Bob"]);
    }

    #[test]
    fn test_malformed_birthdate_fails_view() {
        let mut store = setup_store();
        store
            .add_person(Person::new("Kid", "Bad", "5 Oak St", "Culver", "97451", "555", ""))
            .unwrap();
        store
            .add_profile(MedicalProfile::new("Kid", "Bad", "June 2010", vec![], vec![]))
            .unwrap();
        let views = ViewBuilder::on(&store, reference_date());

        assert!(matches!(views.fire_alert("5 Oak St"), Err(ViewError::Age(_))));
        assert!(views.station_coverage(3).is_err());
        // Views that never derive an age are unaffected
        assert_eq!(views.phone_alert(3).len(), 2);
    }
}
