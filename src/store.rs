use anyhow::{Context, Result};
use chrono::Utc;
use log::*;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{Medication, NewMedication};

const STORE_PATH: &str = "~/.config/remedio/medications.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error reading medication list: {0}")]
    Read(#[source] std::io::Error),
    #[error("Stored medication list is not valid JSON: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("Error serialising medication list: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Error writing medication list: {0}")]
    Write(#[source] std::io::Error),
}

/// Owns the medication list and keeps it mirrored in a JSON file. The whole
/// list is rewritten on every change.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    medications: Vec<Medication>,
}

impl Store {
    // Missing file means nothing saved yet, not an error
    pub fn load(path: &Path) -> Result<Store, StoreError> {
        let medications = match read_if_found(path)? {
            Some(contents) => serde_json::from_str(&contents).map_err(StoreError::Deserialize)?,
            None => Vec::new(),
        };
        debug!("Loaded {} medication(s) from {:?}", medications.len(), path);
        Ok(Store {
            path: path.to_owned(),
            medications,
        })
    }

    /// Assigns an id, appends, and writes the full list back out. A failed
    /// write rolls the append back so memory and disk stay in step.
    pub fn add(&mut self, new: NewMedication) -> Result<&Medication, StoreError> {
        let id = next_id(Utc::now().timestamp_millis(), self.medications.last().map(|m| m.id));
        self.medications.push(Medication {
            id,
            name: new.name,
            kind: new.kind,
            frequency: new.frequency,
            unit: new.unit,
            patients: new.patients,
        });
        if let Err(e) = self.persist() {
            self.medications.pop();
            return Err(e);
        }
        // Just pushed above
        Ok(self.medications.last().unwrap())
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        let contents = serde_json::to_string(&self.medications).map_err(StoreError::Serialize)?;
        std::fs::write(&self.path, contents).map_err(StoreError::Write)
    }
}

// Ids come from the wall clock, but two adds can land in the same millisecond
fn next_id(now_millis: i64, last_id: Option<i64>) -> i64 {
    match last_id {
        Some(last) if last >= now_millis => last + 1,
        _ => now_millis,
    }
}

fn read_if_found(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Read(e)),
    }
}

pub fn default_path() -> Result<PathBuf> {
    let path = shellexpand::full(STORE_PATH)
        .with_context(|| format!("Store path {} is invalid", STORE_PATH))?;
    Ok(Path::new(path.as_ref()).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MedicationKind, Unit};

    fn sample(name: &str) -> NewMedication {
        NewMedication {
            name: name.to_string(),
            kind: MedicationKind::Pills,
            frequency: 8.0,
            unit: Unit::Hours,
            patients: vec!["Ana".to_string(), "Luis".to_string()],
        }
    }

    #[test]
    fn missing_file_loads_as_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::load(&dir.path().join("medications.json")).unwrap();
        assert!(store.medications().is_empty());
    }

    #[test]
    fn garbage_contents_fail_to_deserialise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medications.json");
        std::fs::write(&path, "not json").unwrap();
        match Store::load(&path) {
            Err(StoreError::Deserialize(_)) => (),
            other => panic!("expected Deserialize error, got {:?}", other),
        }
    }

    #[test]
    fn add_appends_and_keeps_input_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medications.json");
        let mut store = Store::load(&path).unwrap();

        let added = store.add(sample("Paracetamol")).unwrap();
        assert_eq!(added.name, "Paracetamol");
        assert_eq!(added.kind, MedicationKind::Pills);
        assert_eq!(added.frequency, 8.0);
        assert_eq!(added.unit, Unit::Hours);
        assert_eq!(added.patients, vec!["Ana".to_string(), "Luis".to_string()]);
        assert_eq!(store.medications().len(), 1);
    }

    #[test]
    fn list_round_trips_through_disk() {
        for n in &[0usize, 1, 10] {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("medications.json");
            let mut store = Store::load(&path).unwrap();
            for i in 0..*n {
                store.add(sample(&format!("Med{}", i))).unwrap();
            }
            let saved = store.medications().to_vec();

            let reloaded = Store::load(&path).unwrap();
            assert_eq!(reloaded.medications(), saved.as_slice());
        }
    }

    #[test]
    fn ids_are_strictly_increasing_and_unique() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medications.json");
        let mut store = Store::load(&path).unwrap();

        // Fast enough that several land in the same millisecond
        for i in 0..20 {
            store.add(sample(&format!("Med{}", i))).unwrap();
        }
        let ids: Vec<i64> = store.medications().iter().map(|m| m.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0], "ids not strictly increasing: {:?}", ids);
        }
    }

    #[test]
    fn next_id_skips_past_a_clock_that_stood_still() {
        assert_eq!(next_id(1000, None), 1000);
        assert_eq!(next_id(1000, Some(999)), 1000);
        assert_eq!(next_id(1000, Some(1000)), 1001);
        assert_eq!(next_id(1000, Some(1005)), 1006);
    }

    #[test]
    fn failed_write_rolls_back_the_append() {
        let dir = tempfile::tempdir().unwrap();
        // The store path is a directory, so the write itself must fail
        let mut store = Store {
            path: dir.path().to_owned(),
            medications: Vec::new(),
        };
        match store.add(sample("Paracetamol")) {
            Err(StoreError::Write(_)) => (),
            other => panic!("expected Write error, got {:?}", other),
        }
        assert!(store.medications().is_empty());
    }
}
