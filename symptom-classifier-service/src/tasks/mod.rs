// Symptom triage workflow tasks
pub mod classify_symptom;
pub mod emergency_care;
pub mod general_ward;
pub mod mental_health;
mod referral;

pub use classify_symptom::ClassifySymptomTask;
pub use emergency_care::EmergencyCareTask;
pub use general_ward::GeneralWardTask;
pub use mental_health::MentalHealthTask;
