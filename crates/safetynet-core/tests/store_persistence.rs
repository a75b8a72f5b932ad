//! Snapshot persistence integration tests.

use std::io;
use std::path::PathBuf;

use safetynet_core::models::{
    CoverageAssignment, Locator, MedicalProfile, MedicalProfilePatch, Person, PersonPatch,
};
use safetynet_core::store::{
    MemoryPersistence, Persistence, RecordStore, Snapshot, StoreError, StoreResult,
};

/// Backend whose every write fails.
struct FailingPersistence;

impl Persistence for FailingPersistence {
    fn load(&self) -> StoreResult<Snapshot> {
        Ok(Snapshot::default())
    }

    fn save(&self, _snapshot: &Snapshot) -> StoreResult<()> {
        Err(StoreError::Write {
            path: PathBuf::from("/unwritable/data.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

fn boyd() -> Person {
    Person::new(
        "John",
        "Boyd",
        "1509 Culver St",
        "Culver",
        "97451",
        "841-874-6512",
        "jaboyd@email.com",
    )
}

#[test]
fn test_json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"{"persons": [], "firestations": [{"address": "1509 Culver St", "station": "3"}], "medicalrecords": []}"#,
    )
    .unwrap();

    let person = boyd();
    {
        let mut store = RecordStore::open(&path).unwrap();
        assert_eq!(store.coverage_count(), 1);
        store.add_person(person.clone()).unwrap();
        store
            .add_profile(MedicalProfile::new(
                "John",
                "Boyd",
                "03/06/1984",
                vec!["aznol:350mg".to_string()],
                vec!["nillacilan".to_string()],
            ))
            .unwrap();
    }

    let store = RecordStore::open(&path).unwrap();
    assert_eq!(store.get_person(&person.id), Some(&person));
    assert_eq!(store.profile_count(), 1);
    assert_eq!(store.list_coverage()[0].station, 3);

    // Station numbers are written back as strings
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"station\": \"3\""));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = RecordStore::open(dir.path().join("absent.json"));
    assert!(matches!(result, Err(StoreError::Read { .. })));
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(RecordStore::open(&path), Err(StoreError::Json(_))));
}

#[test]
fn test_failed_write_leaves_memory_ahead() {
    let mut store = RecordStore::load(Box::new(FailingPersistence)).unwrap();

    let person = boyd();
    let result = store.add_person(person.clone());
    assert!(matches!(result, Err(StoreError::Write { .. })));
    assert_eq!(store.get_person(&person.id), Some(&person));

    let result = store.add_coverage(CoverageAssignment::new("1509 Culver St", 3));
    assert!(result.is_err());
    assert_eq!(store.coverage_count(), 1);
}

#[test]
fn test_noop_update_skips_persistence() {
    let backend = MemoryPersistence::default();
    let mut store = RecordStore::new(Snapshot::default(), Box::new(backend.clone()));

    let person = boyd();
    store.add_person(person.clone()).unwrap();
    assert_eq!(backend.save_count(), 1);

    let changed = store
        .update_person(&Locator::id(&person.id), &PersonPatch::default())
        .unwrap();
    assert!(!changed);
    assert_eq!(backend.save_count(), 1);

    let patch = PersonPatch {
        city: Some("Culver".to_string()),
        ..Default::default()
    };
    assert!(!store.update_person(&Locator::id(&person.id), &patch).unwrap());
    assert_eq!(backend.save_count(), 1);

    let patch = PersonPatch {
        phone: Some("841-874-0000".to_string()),
        ..Default::default()
    };
    assert!(store.update_person(&Locator::name("John", "Boyd"), &patch).unwrap());
    assert_eq!(backend.save_count(), 2);
    let saved = backend.last_saved().unwrap();
    assert_eq!(saved.persons[0].phone, "841-874-0000");
}

#[test]
fn test_missing_targets_return_false() {
    let backend = MemoryPersistence::default();
    let mut store = RecordStore::new(Snapshot::default(), Box::new(backend.clone()));

    assert!(!store.delete_person(&Locator::id("missing")).unwrap());
    assert!(!store.delete_coverage("missing").unwrap());
    assert!(!store
        .update_profile(
            &Locator::name("No", "Body"),
            &MedicalProfilePatch {
                birthdate: Some("01/01/2000".to_string()),
                ..Default::default()
            },
        )
        .unwrap());
    assert_eq!(backend.save_count(), 0);
}
