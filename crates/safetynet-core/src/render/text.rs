//! Multi-line text blocks with a fixed field order per view.

use std::fmt::{self, Display, Formatter};

use crate::models::{
    ChildAlert, FireAlert, FloodHousehold, PersonInfo, PersonSummary, ResidentInfo,
    StationCoverage,
};

fn list(values: &[String]) -> String {
    values.join(", ")
}

/// Each item on its own tab-indented line, comma separated.
fn indented<'a, T: Display + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    items
        .into_iter()
        .map(|item| format!("\n\t{}", item))
        .collect::<Vec<_>>()
        .join(",")
}

impl Display for PersonSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person {{ firstName: '{}', lastName: '{}', address: '{}', phone: '{}' }}",
            self.first_name, self.last_name, self.address, self.phone
        )
    }
}

impl Display for ResidentInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Resident {{ lastName: '{}', phone: '{}', age: {}, medications: [{}], allergies: [{}] }}",
            self.last_name,
            self.phone,
            self.age,
            list(&self.medications),
            list(&self.allergies)
        )
    }
}

impl Display for StationCoverage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "StationCoverage {{")?;
        writeln!(f, "  numberOfAdults: {},", self.number_of_adults)?;
        writeln!(f, "  numberOfChildren: {},", self.number_of_children)?;
        writeln!(f, "  persons: [")?;
        for person in &self.persons {
            writeln!(f, "    {},", person)?;
        }
        writeln!(f, "  ]")?;
        write!(f, "}}")
    }
}

impl Display for FireAlert {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FireAlert {{ stationNumber: {}, residents: [{}\n] }}",
            self.station_number,
            indented(&self.residents)
        )
    }
}

impl Display for FloodHousehold {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Household {{ address: '{}', residents: [{}\n] }}",
            self.address,
            indented(&self.residents)
        )
    }
}

impl Display for ChildAlert {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Child {{ firstName: '{}', lastName: '{}', age: {}, householdMembers: [{}] }}",
            self.first_name,
            self.last_name,
            self.age,
            indented(&self.household_members)
        )
    }
}

impl Display for PersonInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PersonInfo {{ lastName: '{}', address: '{}', age: {}, email: '{}', medications: [{}], allergies: [{}] }}",
            self.last_name,
            self.address,
            self.age,
            self.email,
            list(&self.medications),
            list(&self.allergies)
        )
    }
}

/// Render a sequence of views, one block per line.
pub fn render_all<'a, T: Display + 'a>(views: impl IntoIterator<Item = &'a T>) -> String {
    views
        .into_iter()
        .map(|view| view.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident() -> ResidentInfo {
        ResidentInfo {
            last_name: "Doe".into(),
            phone: "555-0100".into(),
            age: 14,
            medications: vec!["med1".into(), "med2".into()],
            allergies: vec!["peanut".into()],
        }
    }

    #[test]
    fn test_resident_line() {
        assert_eq!(
            resident().to_string(),
            "Resident { lastName: 'Doe', phone: '555-0100', age: 14, medications: [med1, med2], allergies: [peanut] }"
        );
    }

    #[test]
    fn test_fire_alert_block() {
        let alert = FireAlert {
            station_number: 3,
            residents: vec![resident()],
        };
        assert_eq!(
            alert.to_string(),
            "FireAlert { stationNumber: 3, residents: [\n\tResident { lastName: 'Doe', phone: '555-0100', age: 14, medications: [med1, med2], allergies: [peanut] }\n] }"
        );
    }

    #[test]
    fn test_station_coverage_block() {
        let coverage = StationCoverage {
            persons: vec![PersonSummary {
                first_name: "John".into(),
                last_name: "Doe".into(),
                address: "5 Oak St".into(),
                phone: "555-0100".into(),
            }],
            number_of_adults: 0,
            number_of_children: 1,
        };
        let text = coverage.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "StationCoverage {");
        assert_eq!(lines[1], "  numberOfAdults: 0,");
        assert_eq!(lines[2], "  numberOfChildren: 1,");
        assert!(lines[4].contains("firstName: 'John'"));
        assert_eq!(lines.last(), Some(&"}"));
    }

    #[test]
    fn test_render_all_joins_lines() {
        let emails = ["a@email.com".to_string(), "b@email.com".to_string()];
        assert_eq!(render_all(&emails), "a@email.com\nb@email.com");
        let none: Vec<String> = Vec::new();
        assert_eq!(render_all(&none), "");
    }
}
