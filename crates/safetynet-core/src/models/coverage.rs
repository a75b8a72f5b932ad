//! Fire station coverage models.

use serde::{Deserialize, Serialize};

use super::patch::{merge_station, merge_text};

/// "This street address is served by this station number."
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageAssignment {
    #[serde(default = "super::new_record_id")]
    pub id: String,
    /// Street address (exact match)
    pub address: String,
    /// Station number, positive when set
    #[serde(with = "station_number")]
    pub station: u32,
}

impl CoverageAssignment {
    /// Create a new assignment with a fresh surrogate id.
    pub fn new(address: impl Into<String>, station: u32) -> Self {
        Self {
            id: super::new_record_id(),
            address: address.into(),
            station,
        }
    }

    /// Apply a patch, returning whether any field changed.
    pub fn apply_patch(&mut self, patch: &CoveragePatch) -> bool {
        merge_station(&mut self.station, patch.station)
            | merge_text(&mut self.address, patch.address.as_deref())
    }
}

/// Incoming coverage changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoveragePatch {
    pub address: Option<String>,
    pub station: Option<u32>,
}

/// Station numbers are stored as strings in the data document but may arrive as integers.
mod station_number {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(station: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&station.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(station) => Ok(station),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid station number: {:?}", text))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_accepts_string_or_number() {
        let text: CoverageAssignment =
            serde_json::from_str(r#"{"address": "1509 Culver St", "station": "3"}"#).unwrap();
        let number: CoverageAssignment =
            serde_json::from_str(r#"{"address": "1509 Culver St", "station": 3}"#).unwrap();
        assert_eq!(text.station, 3);
        assert_eq!(number.station, 3);

        let bad = serde_json::from_str::<CoverageAssignment>(
            r#"{"address": "1509 Culver St", "station": "three"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_station_serialized_as_string() {
        let assignment = CoverageAssignment::new("29 15th St", 2);
        let json = serde_json::to_value(&assignment).unwrap();
        assert_eq!(json["station"], "2");
    }

    #[test]
    fn test_apply_patch() {
        let mut assignment = CoverageAssignment::new("29 15th St", 2);
        assert!(!assignment.apply_patch(&CoveragePatch {
            address: Some(String::new()),
            station: Some(0),
        }));
        assert!(assignment.apply_patch(&CoveragePatch {
            address: None,
            station: Some(4),
        }));
        assert_eq!(assignment.station, 4);
        assert_eq!(assignment.address, "29 15th St");
    }
}
