//! Derived view records.
//!
//! Field declaration order is the stable serialisation order of each view. Collections of
//! people hold one entry per stored person, in store order.

use serde::{Deserialize, Serialize};

use super::person::Person;

/// Contact summary of a person (coverage and household listings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        Self {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            address: person.address.clone(),
            phone: person.phone.clone(),
        }
    }
}

/// Resident entry of the fire and flood views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentInfo {
    pub last_name: String,
    pub phone: String,
    /// Whole years, 0 when no profile is linked
    pub age: u32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

/// People covered by one station, with an adult/child breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCoverage {
    pub persons: Vec<PersonSummary>,
    pub number_of_adults: usize,
    pub number_of_children: usize,
}

/// Residents of one address and the station serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireAlert {
    /// 0 when no station covers the address
    pub station_number: u32,
    pub residents: Vec<ResidentInfo>,
}

/// One household of the flood view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodHousehold {
    pub address: String,
    pub residents: Vec<ResidentInfo>,
}

/// A child living at an address and the other members of the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildAlert {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub household_members: Vec<PersonSummary>,
}

/// Person info by last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInfo {
    pub last_name: String,
    pub address: String,
    pub age: u32,
    pub email: String,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}
