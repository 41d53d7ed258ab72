use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use anyhow::Error;

// Storage model. Wire values match the original stored lists, so an existing
// medications.json keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MedicationKind,
    pub frequency: f64,
    pub unit: Unit,
    pub patients: Vec<String>,
}

/// A validated entry that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedication {
    pub name: String,
    pub kind: MedicationKind,
    pub frequency: f64,
    pub unit: Unit,
    pub patients: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicationKind {
    #[serde(rename = "pastillas")]
    Pills,
    #[serde(rename = "gotas")]
    Drops,
    #[serde(rename = "inyeccion")]
    Injection,
}

impl FromStr for MedicationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pastillas" | "pills" => Ok(MedicationKind::Pills),
            "gotas" | "drops" => Ok(MedicationKind::Drops),
            "inyeccion" | "injection" => Ok(MedicationKind::Injection),
            other => Err(Error::msg(format!(
                "Unknown medication type '{}', expected pastillas, gotas or inyeccion", other
            ))),
        }
    }
}

impl fmt::Display for MedicationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            MedicationKind::Pills => "pastillas",
            MedicationKind::Drops => "gotas",
            MedicationKind::Injection => "inyeccion",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Minutes,
    Hours,
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minutes" | "minutos" => Ok(Unit::Minutes),
            "hours" | "horas" => Ok(Unit::Hours),
            other => Err(Error::msg(format!(
                "Unknown unit '{}', expected minutes or hours", other
            ))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
        })
    }
}
