pub mod form;
pub mod model;
pub mod schedule;
pub mod store;
pub mod suggest;

pub use form::{MedicationForm, ValidationError, MAX_PATIENTS};
pub use model::{Medication, MedicationKind, NewMedication, Unit};
pub use schedule::{interval_seconds, schedule_reminder, ScheduleError};
pub use store::{Store, StoreError};
