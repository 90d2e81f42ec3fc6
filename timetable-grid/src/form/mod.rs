pub mod submission;

pub use submission::{AssignmentForm, SaveKind, SaveOutcome, save_assignment, validate_form};
