use itertools::Itertools;
use log::*;
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::model::Unit;

const TITLE: &str = "Medicación";

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Failed to launch the platform scheduler: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("{0}")]
    Rejected(String),
}

pub fn interval_seconds(frequency: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Hours => frequency * 3600.0,
        Unit::Minutes => frequency * 60.0,
    }
}

pub fn reminder_body(name: &str, patients: &[String]) -> String {
    format!("Es hora de tomar {}. Pacientes: {}", name, patients.iter().join(", "))
}

/// Registers a repeating desktop notification via a transient systemd user
/// timer. The unit is fire-and-forget: nothing here can cancel or list it
/// later, and entering the same medication twice schedules it twice.
pub fn schedule_reminder(
    name: &str,
    frequency: f64,
    unit: Unit,
    patients: &[String],
) -> Result<(), ScheduleError> {
    let seconds = interval_seconds(frequency, unit);
    let body = reminder_body(name, patients);

    let mut process = Command::new("systemd-run");
    process
        .arg("--user")
        .arg("--collect")
        .arg(format!("--on-active={}s", seconds))
        .arg(format!("--on-unit-active={}s", seconds))
        .arg("--")
        .arg("notify-send")
        .arg(TITLE)
        .arg(&body)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    debug!("Command {:?}", process);
    let process = process.spawn().map_err(ScheduleError::Spawn)?;
    let output = process.wait_with_output().map_err(ScheduleError::Spawn)?;
    if !output.status.success() {
        return Err(ScheduleError::Rejected(format!(
            "{}: {}",
            match output.status.code() {
                None => "systemd-run terminated by signal".to_owned(),
                Some(c) => format!("systemd-run failed with exit code {}", c),
            },
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    info!("Scheduled reminder for {} every {} {}", name, frequency, unit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_convert_to_seconds() {
        assert_eq!(interval_seconds(8.0, Unit::Hours), 28800.0);
        assert_eq!(interval_seconds(1.0, Unit::Hours), 3600.0);
    }

    #[test]
    fn minutes_convert_to_seconds() {
        assert_eq!(interval_seconds(30.0, Unit::Minutes), 1800.0);
        assert_eq!(interval_seconds(1.5, Unit::Minutes), 90.0);
    }

    #[test]
    fn body_names_the_medication_and_patients() {
        let patients = vec!["Ana".to_string(), "Luis".to_string()];
        assert_eq!(
            reminder_body("Paracetamol", &patients),
            "Es hora de tomar Paracetamol. Pacientes: Ana, Luis"
        );
    }

    #[test]
    fn body_with_no_patients_leaves_the_segment_empty() {
        assert_eq!(
            reminder_body("Ibuprofeno", &[]),
            "Es hora de tomar Ibuprofeno. Pacientes: "
        );
    }
}
