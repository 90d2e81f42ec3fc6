use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Catalog;
use crate::error::GridError;
use crate::schedule::{Assignment, GridStore, SlotCoordinate};

/// Assignment form as submitted by the add/edit dialog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentForm {
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub class_id: String,
}

/// Whether a save created a new entry or replaced one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveKind {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub kind: SaveKind,
    pub previous: Option<Assignment>,
}

/// Validates an assignment form against the catalog
pub fn validate_form(form: &AssignmentForm, catalog: &Catalog) -> Result<Assignment, String> {
    let course_id = form.course_id.trim();
    let teacher_id = form.teacher_id.trim();
    let class_id = form.class_id.trim();

    if course_id.is_empty() {
        return Err("Course selection is required".to_string());
    }
    if teacher_id.is_empty() {
        return Err("Teacher selection is required".to_string());
    }
    if class_id.is_empty() {
        return Err("Class selection is required".to_string());
    }

    if catalog.course(course_id).is_none() {
        return Err(format!("Unknown course: {}", course_id));
    }
    if catalog.teacher(teacher_id).is_none() {
        return Err(format!("Unknown teacher: {}", teacher_id));
    }
    if catalog.class(class_id).is_none() {
        return Err(format!("Unknown class: {}", class_id));
    }

    Ok(Assignment::new(course_id, teacher_id, class_id))
}

/// Writes a validated assignment into the slot, creating or replacing
pub fn save_assignment(
    store: &mut GridStore,
    coord: SlotCoordinate,
    assignment: Assignment,
) -> Result<SaveOutcome, GridError> {
    let previous = store.set(coord, assignment)?;
    let kind = if previous.is_some() { SaveKind::Updated } else { SaveKind::Created };
    info!(%coord, ?kind, "assignment saved");
    Ok(SaveOutcome { kind, previous })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::GridDimensions;

    fn form(course: &str, teacher: &str, class: &str) -> AssignmentForm {
        AssignmentForm {
            course_id: course.to_string(),
            teacher_id: teacher.to_string(),
            class_id: class.to_string(),
        }
    }

    #[test]
    fn accepts_known_ids() {
        let catalog = Catalog::builtin();
        let assignment = validate_form(&form(" 1 ", "1", "2"), &catalog).unwrap();
        assert_eq!(assignment, Assignment::new("1", "1", "2"));
    }

    #[test]
    fn requires_every_field() {
        let catalog = Catalog::builtin();
        assert_eq!(
            validate_form(&form("", "1", "1"), &catalog).unwrap_err(),
            "Course selection is required"
        );
        assert_eq!(
            validate_form(&form("1", "  ", "1"), &catalog).unwrap_err(),
            "Teacher selection is required"
        );
        assert_eq!(
            validate_form(&form("1", "1", ""), &catalog).unwrap_err(),
            "Class selection is required"
        );
    }

    #[test]
    fn rejects_unknown_ids() {
        let catalog = Catalog::builtin();
        assert_eq!(
            validate_form(&form("42", "1", "1"), &catalog).unwrap_err(),
            "Unknown course: 42"
        );
        assert_eq!(
            validate_form(&form("1", "1", "9"), &catalog).unwrap_err(),
            "Unknown class: 9"
        );
    }

    #[test]
    fn save_reports_create_then_update() {
        let mut store = GridStore::new(GridDimensions::default());
        let coord = SlotCoordinate::new(1, 2);

        let first = save_assignment(&mut store, coord, Assignment::new("1", "1", "1")).unwrap();
        assert_eq!(first.kind, SaveKind::Created);

        let second = save_assignment(&mut store, coord, Assignment::new("2", "2", "1")).unwrap();
        assert_eq!(second.kind, SaveKind::Updated);
        assert_eq!(second.previous, Some(Assignment::new("1", "1", "1")));
        assert_eq!(store.len(), 1);
    }
}
