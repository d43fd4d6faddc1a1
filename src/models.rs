use serde::{Deserialize, Serialize};

/// A student record as returned by the store.
///
/// `gpa` and `courses` are derived views computed server-side; the client
/// only ever displays them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gpa: f64,
    #[serde(default)]
    pub courses: Vec<CourseSummary>,
}

/// A course summary nested inside a [`Student`].
///
/// The store emits a null `gradeLetter` for ungraded courses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub name: String,
    #[serde(rename = "gradeLetter")]
    pub grade_letter: Option<String>,
    #[serde(rename = "gradeScore", default)]
    pub grade_score: f64,
}

/// Payload for registering a new student.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

/// Reference to a store record by id.
///
/// A `None` id serializes as JSON null. Non-numeric user input produces a
/// null reference that is still forwarded; the store is the sole validator
/// and rejects references it cannot resolve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: Option<i64>,
}

impl EntityRef {
    pub fn parse(input: &str) -> Self {
        EntityRef {
            id: input.trim().parse().ok(),
        }
    }
}

/// Payload for submitting a course enrollment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub name: String,
    pub student: EntityRef,
    pub grade: EntityRef,
}

/// The store's fixed grade scale.
///
/// Closed enumeration known at build time: ids 1-5 map to letter/point
/// pairs. Shown as a reference table next to the enrollment form; never
/// fetched from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeLevel {
    A,
    B,
    C,
    D,
    F,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 5] = [
        GradeLevel::A,
        GradeLevel::B,
        GradeLevel::C,
        GradeLevel::D,
        GradeLevel::F,
    ];

    pub fn id(&self) -> i64 {
        match self {
            GradeLevel::A => 1,
            GradeLevel::B => 2,
            GradeLevel::C => 3,
            GradeLevel::D => 4,
            GradeLevel::F => 5,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            GradeLevel::A => "A",
            GradeLevel::B => "B",
            GradeLevel::C => "C",
            GradeLevel::D => "D",
            GradeLevel::F => "F",
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            GradeLevel::A => 4.0,
            GradeLevel::B => 3.0,
            GradeLevel::C => 2.0,
            GradeLevel::D => 1.0,
            GradeLevel::F => 0.0,
        }
    }

    pub fn from_id(id: i64) -> Option<GradeLevel> {
        Self::ALL.iter().copied().find(|g| g.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_scale_is_closed() {
        assert_eq!(GradeLevel::ALL.len(), 5);
        for grade in GradeLevel::ALL {
            assert_eq!(GradeLevel::from_id(grade.id()), Some(grade));
        }
        assert_eq!(GradeLevel::from_id(0), None);
        assert_eq!(GradeLevel::from_id(6), None);
    }

    #[test]
    fn test_grade_letter_point_pairs() {
        assert_eq!(GradeLevel::A.letter(), "A");
        assert_eq!(GradeLevel::A.points(), 4.0);
        assert_eq!(GradeLevel::F.id(), 5);
        assert_eq!(GradeLevel::F.points(), 0.0);
    }

    #[test]
    fn test_entity_ref_parses_numeric_input() {
        assert_eq!(EntityRef::parse("7"), EntityRef { id: Some(7) });
        assert_eq!(EntityRef::parse("  42 "), EntityRef { id: Some(42) });
    }

    #[test]
    fn test_entity_ref_forwards_invalid_input_as_null() {
        assert_eq!(EntityRef::parse("abc"), EntityRef { id: None });
        assert_eq!(EntityRef::parse(""), EntityRef { id: None });
        assert_eq!(EntityRef::parse("3.5"), EntityRef { id: None });
    }

    #[test]
    fn test_enrollment_wire_shape() {
        let enrollment = NewEnrollment {
            name: String::from("CS101"),
            student: EntityRef::parse("7"),
            grade: EntityRef::parse("x"),
        };
        let json = serde_json::to_string(&enrollment).unwrap();
        assert_eq!(
            json,
            r#"{"name":"CS101","student":{"id":7},"grade":{"id":null}}"#
        );
    }

    #[test]
    fn test_student_deserializes_store_payload() {
        let body = r#"{
            "id": 1,
            "name": "Ada",
            "email": "ada@x.com",
            "gpa": 3.666,
            "courses": [
                {"name": "Algorithms", "gradeLetter": "A", "gradeScore": 4.0},
                {"name": "Databases", "gradeLetter": null, "gradeScore": 0.0}
            ]
        }"#;
        let student: Student = serde_json::from_str(body).unwrap();
        assert_eq!(student.name, "Ada");
        assert_eq!(student.courses.len(), 2);
        assert_eq!(student.courses[0].grade_letter.as_deref(), Some("A"));
        assert_eq!(student.courses[1].grade_letter, None);
    }
}
