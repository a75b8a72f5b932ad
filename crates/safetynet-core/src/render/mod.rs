//! Text and JSON rendering of views for the API layer.

mod text;

pub use text::*;

use serde::Serialize;

/// Render any view as pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(view: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

/// Placeholder messages shown when a view is empty.
pub mod empty {
    pub const NO_RESIDENTS: &str = "No residents found at the specified address.";
    pub const NO_HOUSEHOLDS: &str = "No households found for the specified stations.";
    pub const NO_CHILDREN: &str = "No children found at the specified address.";
    pub const NO_PHONE_NUMBERS: &str = "No phone numbers found for the specified firestation.";
    pub const NO_EMAILS: &str = "No email addresses found for the specified city.";

    pub fn no_persons_with_last_name(last_name: &str) -> String {
        format!("No persons found with the last name {}", last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonSummary;

    #[test]
    fn test_to_json() {
        let summary = PersonSummary {
            first_name: "John".into(),
            last_name: "Boyd".into(),
            address: "1509 Culver St".into(),
            phone: "841-874-6512".into(),
        };
        let json = to_json(&summary).unwrap();
        assert!(json.contains("\"firstName\": \"John\""));
    }
}
