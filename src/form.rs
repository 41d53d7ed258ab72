use thiserror::Error;

use crate::model::{MedicationKind, NewMedication, Unit};

pub const MAX_PATIENTS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Name or frequency left blank on submit.
    #[error("Por favor, complete los campos requeridos")]
    MissingFields { name: bool, frequency: bool },
    #[error("La frecuencia debe ser un número positivo")]
    BadFrequency,
    #[error("El campo paciente está vacío")]
    EmptyPatient,
}

/// Draft state of the add-medication flow. Fields stay raw text until
/// `submit` validates them; a successful submit resets to the defaults.
#[derive(Debug)]
pub struct MedicationForm {
    name: String,
    kind: MedicationKind,
    frequency: String,
    unit: Unit,
    patients: Vec<String>,
}

impl Default for MedicationForm {
    fn default() -> Self {
        MedicationForm {
            name: String::new(),
            kind: MedicationKind::Pills,
            frequency: "8".to_string(),
            unit: Unit::Hours,
            patients: Vec::new(),
        }
    }
}

impl MedicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub fn set_kind(&mut self, kind: MedicationKind) {
        self.kind = kind;
    }

    pub fn set_frequency(&mut self, frequency: &str) {
        self.frequency = frequency.trim().to_string();
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    /// Adds a patient to the draft. Empty names and additions past the cap
    /// of five are ignored; returns whether the name was taken.
    pub fn add_patient(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.patients.len() >= MAX_PATIENTS {
            return false;
        }
        self.patients.push(name.to_string());
        true
    }

    pub fn remove_patient(&mut self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyPatient);
        }
        self.patients.retain(|patient| patient != name);
        Ok(())
    }

    pub fn patients(&self) -> &[String] {
        &self.patients
    }

    pub fn submit(&mut self) -> Result<NewMedication, ValidationError> {
        if self.name.is_empty() || self.frequency.is_empty() {
            return Err(ValidationError::MissingFields {
                name: self.name.is_empty(),
                frequency: self.frequency.is_empty(),
            });
        }
        let frequency: f64 = self
            .frequency
            .parse()
            .map_err(|_| ValidationError::BadFrequency)?;
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ValidationError::BadFrequency);
        }
        let new = NewMedication {
            name: self.name.clone(),
            kind: self.kind,
            frequency,
            unit: self.unit,
            patients: self.patients.clone(),
        };
        *self = MedicationForm::default();
        Ok(new)
    }
}
