//! Pet profile records and their storage.
//!
//! Profiles persist as one JSON array under a single key, read, modified,
//! and written back wholesale on every mutation. The store is generic
//! over a [`StorageBackend`] so the logic runs against browser local
//! storage in the app and an in-memory map in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local storage key holding the profile collection.
pub const PET_PROFILES_KEY: &str = "petProfiles";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allergies {
    pub food: String,
    pub medicine: String,
    pub environment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vaccination {
    #[serde(rename = "type")]
    pub vaccine: String,
    pub date: String,
    pub next_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deworming {
    #[serde(rename = "type")]
    pub treatment: String,
    pub medicine: String,
    pub date: String,
    pub cycle_days: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalRecord {
    pub disease: String,
    pub date: String,
    pub result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetProfile {
    pub id: String,
    pub name: String,
    pub species: String,
    pub gender: String,
    pub neutered: String,
    pub birthday: String,
    pub age: String,
    pub weight: String,
    pub notes: String,
    /// Data-URL photo; empty when the pet has no photo.
    pub avatar: String,
    pub allergies: Allergies,
    pub vaccinations: Vec<Vaccination>,
    pub dewormings: Vec<Deworming>,
    pub medical_history: Vec<MedicalRecord>,
    pub created_at: String,
    pub updated_at: String,
}

/// A wall-clock reading captured once at the call site, so store
/// operations stay deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub millis: u64,
    pub iso: String,
}

impl Timestamp {
    /// Current time from the browser clock.
    pub fn now() -> Self {
        let date = js_sys::Date::new_0();
        Timestamp {
            millis: date.get_time() as u64,
            iso: String::from(date.to_iso_string()),
        }
    }

    #[cfg(test)]
    pub fn fixed(millis: u64, iso: &str) -> Self {
        Timestamp {
            millis,
            iso: iso.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("could not encode profiles: {0}")]
    Serialize(String),
}

/// How a save landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: String },
    /// The full write failed (typically quota); every avatar was stripped
    /// and the reduced collection persisted instead.
    SavedWithoutMedia { id: String },
}

impl SaveOutcome {
    pub fn id(&self) -> &str {
        match self {
            SaveOutcome::Saved { id } | SaveOutcome::SavedWithoutMedia { id } => id,
        }
    }
}

pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Browser `localStorage` backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StoreError::Backend("local storage unavailable".to_string()))
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}

/// CRUD over the persisted profile collection.
pub struct ProfileStore<B> {
    backend: B,
}

impl<B: StorageBackend> ProfileStore<B> {
    pub fn new(backend: B) -> Self {
        ProfileStore { backend }
    }

    /// All records in insertion order. An empty, missing, or unparsable
    /// store reads as an empty collection rather than an error.
    pub fn list(&self) -> Vec<PetProfile> {
        match self.backend.read(PET_PROFILES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Insert or update one profile.
    ///
    /// An empty `id` means insert: a fresh time-based unique id is
    /// assigned and `created_at` stamped. A known `id` replaces the
    /// matching record in place, preserving its `created_at` and, when
    /// the incoming avatar is empty, its previous avatar. `updated_at`
    /// is always stamped.
    pub fn save(&mut self, profile: PetProfile, now: &Timestamp) -> Result<SaveOutcome, StoreError> {
        let mut profiles = self.list();
        let mut record = profile;
        record.updated_at = now.iso.clone();

        if record.id.is_empty() {
            record.id = unique_id(&profiles, now.millis);
            record.created_at = now.iso.clone();
            profiles.push(record.clone());
        } else if let Some(index) = profiles.iter().position(|p| p.id == record.id) {
            record.created_at = profiles[index].created_at.clone();
            if record.avatar.is_empty() && !profiles[index].avatar.is_empty() {
                record.avatar = profiles[index].avatar.clone();
            }
            profiles[index] = record.clone();
        } else {
            // Caller supplied an id that is no longer present (deleted in
            // another tab); treat it as a fresh insert.
            record.created_at = now.iso.clone();
            profiles.push(record.clone());
        }

        match self.persist(&profiles) {
            Ok(()) => Ok(SaveOutcome::Saved { id: record.id }),
            Err(_) => {
                for p in &mut profiles {
                    p.avatar.clear();
                }
                self.persist(&profiles)?;
                Ok(SaveOutcome::SavedWithoutMedia { id: record.id })
            }
        }
    }

    /// Remove the first record with the given id; no-op when absent.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut profiles = self.list();
        match profiles.iter().position(|p| p.id == id) {
            Some(index) => {
                profiles.remove(index);
                self.persist(&profiles)
            }
            None => Ok(()),
        }
    }

    fn persist(&mut self, profiles: &[PetProfile]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(profiles)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.backend.write(PET_PROFILES_KEY, &encoded)
    }
}

/// Time-based id, bumped until unique so two saves in the same
/// millisecond still get distinct ids.
fn unique_id(profiles: &[PetProfile], millis: u64) -> String {
    let mut candidate = millis;
    loop {
        let id = candidate.to_string();
        if !profiles.iter().any(|p| p.id == id) {
            return id;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryBackend {
        map: HashMap<String, String>,
        /// Writes larger than this fail, mimicking a quota error.
        quota: Option<usize>,
    }

    impl StorageBackend for MemoryBackend {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.map.get(key).cloned())
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if let Some(quota) = self.quota {
                if value.len() > quota {
                    return Err(StoreError::Backend("quota exceeded".to_string()));
                }
            }
            self.map.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn store() -> ProfileStore<MemoryBackend> {
        ProfileStore::new(MemoryBackend::default())
    }

    fn profile(name: &str) -> PetProfile {
        PetProfile {
            name: name.to_string(),
            species: "dog".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        assert!(store().list().is_empty());
    }

    #[test]
    fn corrupt_json_reads_as_empty() {
        let mut backend = MemoryBackend::default();
        backend
            .map
            .insert(PET_PROFILES_KEY.to_string(), "{not json".to_string());
        let store = ProfileStore::new(backend);
        assert!(store.list().is_empty());
    }

    #[test]
    fn inserting_twice_at_the_same_time_yields_distinct_ids() {
        let mut store = store();
        let now = Timestamp::fixed(1_700_000_000_000, "2023-11-14T22:13:20.000Z");

        let first = store.save(profile("Momo"), &now).unwrap();
        let second = store.save(profile("Bella"), &now).unwrap();

        assert_ne!(first.id(), second.id());
        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Momo");
        assert_eq!(listed[1].name, "Bella");
    }

    #[test]
    fn update_replaces_in_place_and_preserves_created_at() {
        let mut store = store();
        let created = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");
        let outcome = store.save(profile("Momo"), &created).unwrap();
        let id = outcome.id().to_string();

        let mut edited = store.list()[0].clone();
        edited.name = "Momo II".to_string();
        let later = Timestamp::fixed(2_000, "2026-01-02T00:00:00.000Z");
        store.save(edited, &later).unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].name, "Momo II");
        assert_eq!(listed[0].created_at, "2026-01-01T00:00:00.000Z");
        assert_eq!(listed[0].updated_at, "2026-01-02T00:00:00.000Z");
    }

    #[test]
    fn update_with_empty_avatar_keeps_previous_photo() {
        let mut store = store();
        let now = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");
        let mut with_photo = profile("Momo");
        with_photo.avatar = "data:image/png;base64,abc".to_string();
        store.save(with_photo, &now).unwrap();

        let mut edited = store.list()[0].clone();
        edited.avatar.clear();
        edited.weight = "4.2".to_string();
        store
            .save(edited, &Timestamp::fixed(2_000, "2026-01-02T00:00:00.000Z"))
            .unwrap();

        assert_eq!(store.list()[0].avatar, "data:image/png;base64,abc");
    }

    #[test]
    fn update_with_new_avatar_replaces_photo() {
        let mut store = store();
        let now = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");
        let mut with_photo = profile("Momo");
        with_photo.avatar = "data:image/png;base64,old".to_string();
        store.save(with_photo, &now).unwrap();

        let mut edited = store.list()[0].clone();
        edited.avatar = "data:image/png;base64,new".to_string();
        store
            .save(edited, &Timestamp::fixed(2_000, "2026-01-02T00:00:00.000Z"))
            .unwrap();

        assert_eq!(store.list()[0].avatar, "data:image/png;base64,new");
    }

    #[test]
    fn delete_missing_id_leaves_collection_unchanged() {
        let mut store = store();
        let now = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");
        store.save(profile("Momo"), &now).unwrap();
        let before = store.list();

        store.delete("does-not-exist").unwrap();
        assert_eq!(store.list(), before);
    }

    #[test]
    fn delete_removes_only_the_matching_record() {
        let mut store = store();
        let now = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");
        let first = store.save(profile("Momo"), &now).unwrap();
        store.save(profile("Bella"), &now).unwrap();

        store.delete(first.id()).unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Bella");
    }

    #[test]
    fn quota_failure_strips_avatars_and_retries() {
        let mut store = ProfileStore::new(MemoryBackend {
            map: HashMap::new(),
            quota: Some(600),
        });
        let now = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");

        let mut big = profile("Momo");
        big.avatar = format!("data:image/png;base64,{}", "A".repeat(1_000));
        let outcome = store.save(big, &now).unwrap();

        assert!(matches!(outcome, SaveOutcome::SavedWithoutMedia { .. }));
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].avatar.is_empty());
        assert_eq!(listed[0].name, "Momo");
    }

    #[test]
    fn quota_failure_on_retry_is_reported() {
        let mut store = ProfileStore::new(MemoryBackend {
            map: HashMap::new(),
            quota: Some(10),
        });
        let now = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");

        let err = store.save(profile("Momo"), &now).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        // Nothing was persisted.
        assert!(store.list().is_empty());
    }

    #[test]
    fn storage_format_round_trips_field_names() {
        let mut store = store();
        let now = Timestamp::fixed(1_000, "2026-01-01T00:00:00.000Z");
        let mut full = profile("Momo");
        full.vaccinations.push(Vaccination {
            vaccine: "rabies".to_string(),
            date: "2026-03-01".to_string(),
            next_date: "2027-03-01".to_string(),
        });
        full.dewormings.push(Deworming {
            treatment: "internal".to_string(),
            medicine: "milbemycin".to_string(),
            date: "2026-05-01".to_string(),
            cycle_days: "90".to_string(),
        });
        store.save(full, &now).unwrap();

        let raw = store.backend.map.get(PET_PROFILES_KEY).unwrap();
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"medicalHistory\""));
        assert!(raw.contains("\"nextDate\""));
        assert!(raw.contains("\"cycleDays\""));
        assert!(raw.contains("\"type\":\"rabies\""));
    }
}
