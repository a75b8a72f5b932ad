//! Field merge helpers for patch-style updates.
//!
//! Each helper overwrites the target only when the incoming value is present,
//! non-empty (or positive) and different, and reports whether it changed anything.
//! Callers combine the results with `|` so every field is visited.

/// Merge an optional text field.
pub fn merge_text(target: &mut String, incoming: Option<&str>) -> bool {
    match incoming {
        Some(value) if !value.is_empty() && target != value => {
            *target = value.to_string();
            true
        }
        _ => false,
    }
}

/// Merge an optional list field. An empty incoming list never clears the target.
pub fn merge_list(target: &mut Vec<String>, incoming: Option<&[String]>) -> bool {
    match incoming {
        Some(values) if !values.is_empty() && target.as_slice() != values => {
            *target = values.to_vec();
            true
        }
        _ => false,
    }
}

/// Merge an optional station number. Zero is treated as "not provided".
pub fn merge_station(target: &mut u32, incoming: Option<u32>) -> bool {
    match incoming {
        Some(station) if station > 0 && *target != station => {
            *target = station;
            true
        }
        _ => false,
    }
}
