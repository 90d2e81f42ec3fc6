use serde::{Serialize, Deserialize};

use crate::schedule::Assignment;

/// Shown when a slot's course id doesn't resolve
pub const UNASSIGNED_COURSE: &str = "未安排";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub hours: u32,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub code: String,
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: String,
    pub name: String,
    pub grade: String,
    pub head_teacher: String,
    pub student_count: u32,
}

/// Already-validated reference data supplied by the data providers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub teachers: Vec<Teacher>,
    pub classes: Vec<SchoolClass>,
}

/// Display names for one assignment, with fallbacks for unknown ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAssignment {
    pub course: String,
    pub teacher: String,
    pub class: String,
}

impl Catalog {
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn class(&self, id: &str) -> Option<&SchoolClass> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn course_name(&self, id: &str) -> &str {
        self.course(id).map(|c| c.name.as_str()).unwrap_or(UNASSIGNED_COURSE)
    }

    pub fn teacher_name(&self, id: &str) -> &str {
        self.teacher(id).map(|t| t.name.as_str()).unwrap_or("")
    }

    pub fn class_name(&self, id: &str) -> &str {
        self.class(id).map(|c| c.name.as_str()).unwrap_or("")
    }

    pub fn resolve(&self, assignment: &Assignment) -> ResolvedAssignment {
        ResolvedAssignment {
            course: self.course_name(&assignment.course_id).to_string(),
            teacher: self.teacher_name(&assignment.teacher_id).to_string(),
            class: self.class_name(&assignment.class_id).to_string(),
        }
    }

    /// Built-in senior-one catalog used when no provider is wired in
    pub fn builtin() -> Self {
        let subjects = [
            ("语文", "YW", 5, "张老师"),
            ("数学", "SX", 5, "李老师"),
            ("英语", "YY", 4, "王老师"),
            ("物理", "WL", 3, "赵老师"),
            ("化学", "HX", 3, "刘老师"),
            ("生物", "SW", 2, "陈老师"),
            ("历史", "LS", 2, "杨老师"),
            ("地理", "DL", 2, "周老师"),
            ("政治", "ZZ", 2, "吴老师"),
        ];

        let mut courses = Vec::new();
        let mut teachers = Vec::new();
        for (i, (subject, code, hours, teacher)) in subjects.iter().enumerate() {
            let id = (i + 1).to_string();
            courses.push(Course {
                id: id.clone(),
                name: subject.to_string(),
                code: code.to_string(),
                hours: *hours,
                grade: "高一".to_string(),
            });
            teachers.push(Teacher {
                id,
                name: teacher.to_string(),
                code: format!("T{:03}", i + 1),
                courses: vec![subject.to_string()],
            });
        }

        let classes = [("张老师", 45), ("李老师", 42), ("王老师", 40), ("赵老师", 43), ("刘老师", 41)]
            .iter()
            .enumerate()
            .map(|(i, (head, count))| SchoolClass {
                id: (i + 1).to_string(),
                name: format!("高一({})班", i + 1),
                grade: "高一".to_string(),
                head_teacher: head.to_string(),
                student_count: *count,
            })
            .collect();

        Self { courses, teachers, classes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.courses.len(), 9);
        assert_eq!(catalog.teachers.len(), 9);
        assert_eq!(catalog.classes.len(), 5);
        assert_eq!(catalog.teacher("9").unwrap().code, "T009");
        assert_eq!(catalog.class_name("1"), "高一(1)班");
    }

    #[test]
    fn unresolved_ids_fall_back() {
        let catalog = Catalog::builtin();
        let resolved = catalog.resolve(&Assignment::new("99", "99", "99"));
        assert_eq!(resolved.course, UNASSIGNED_COURSE);
        assert_eq!(resolved.teacher, "");
        assert_eq!(resolved.class, "");

        let known = catalog.resolve(&Assignment::new("2", "2", "1"));
        assert_eq!(known.course, "数学");
        assert_eq!(known.teacher, "李老师");
    }
}
