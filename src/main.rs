use anyhow::Result;
use log::*;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

use remedio::form::MedicationForm;
use remedio::model::{MedicationKind, Unit};
use remedio::{schedule, store, suggest, Store, MAX_PATIENTS};

#[derive(Debug, StructOpt)]
#[structopt(name = "remedio", about = "Medication list with repeating desktop reminders")]
struct Opt {
    /// Medication list location (defaults to ~/.config/remedio/medications.json)
    #[structopt(long, parse(from_os_str))]
    store: Option<PathBuf>,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Record a medication and schedule its repeating reminder
    Add {
        /// Medication name
        name: String,
        /// pastillas, gotas or inyeccion
        #[structopt(long, default_value = "pastillas")]
        kind: MedicationKind,
        /// How often to remind, in the given unit
        #[structopt(long, default_value = "8")]
        frequency: String,
        /// minutes or hours
        #[structopt(long, default_value = "hours")]
        unit: Unit,
        /// Patient taking the medication, repeatable up to five times
        #[structopt(long = "patient")]
        patients: Vec<String>,
    },
    /// Show the recorded medications
    List,
    /// Search the bundled list of known medication names
    Suggest {
        query: String,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    let path = match opt.store {
        Some(path) => path,
        None => store::default_path()?,
    };
    match opt.command {
        Command::Add { name, kind, frequency, unit, patients } => {
            add(&path, &name, kind, &frequency, unit, &patients)
        }
        Command::List => list(&path),
        Command::Suggest { query } => print_suggestions(&query),
    }
}

// The add flow is one linear sequence: validate, append and persist, then
// hand the reminder off to the platform scheduler
fn add(
    path: &Path,
    name: &str,
    kind: MedicationKind,
    frequency: &str,
    unit: Unit,
    patients: &[String],
) -> Result<()> {
    let mut store = Store::load(path)?;

    let mut form = MedicationForm::new();
    form.set_name(name);
    form.set_kind(kind);
    form.set_frequency(frequency);
    form.set_unit(unit);
    for patient in patients {
        if !form.add_patient(patient) {
            warn!("Ignoring patient '{}': empty name or cap of {} reached", patient, MAX_PATIENTS);
        }
    }
    let new = form.submit()?;

    let med = store.add(new)?;
    println!(
        "Added {} ({}), reminding every {} {}",
        med.name, med.kind, med.frequency, med.unit
    );

    // The entry is already persisted; a scheduler refusal should not undo it
    if let Err(e) = schedule::schedule_reminder(&med.name, med.frequency, med.unit, &med.patients) {
        warn!("Reminder was not scheduled: {}", e);
    }
    Ok(())
}

fn list(path: &Path) -> Result<()> {
    let store = Store::load(path)?;
    if store.medications().is_empty() {
        println!("No medications recorded yet");
        return Ok(());
    }
    for med in store.medications() {
        println!(
            "{} ({}) every {} {}, patients: {}",
            med.name,
            med.kind,
            med.frequency,
            med.unit,
            med.patients.join(", ")
        );
    }
    Ok(())
}

fn print_suggestions(query: &str) -> Result<()> {
    let names = suggest::reference_list()?;
    for name in suggest::filter(query, &names) {
        println!("{}", name);
    }
    Ok(())
}
