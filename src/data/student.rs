use serde::{Deserialize, Serialize};

pub type StudentId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

/// What clients send. `id` is accepted so it can be rejected or ignored explicitly.
#[derive(Deserialize, Debug)]
pub struct StudentForm {
    #[serde(default)]
    pub id: Option<StudentId>,
    pub name: String,
}

/// Argument to `StudentStore::save`: no id means a fresh row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: Option<StudentId>,
    pub name: String,
}

/// One row of `public.students`.
#[derive(sqlx::FromRow, Debug)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
}

impl StudentRecord {
    pub const fn new(name: String) -> Self {
        Self { id: None, name }
    }
}

impl Student {
    pub fn renamed(self, name: String) -> StudentRecord {
        StudentRecord {
            id: Some(self.id),
            name,
        }
    }
}

impl From<StudentRow> for Student {
    fn from(StudentRow { id, name }: StudentRow) -> Self {
        Self { id, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_id_is_optional() {
        let form: StudentForm = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(form.id, None);
        assert_eq!(form.name, "Ana");

        let form: StudentForm = serde_json::from_str(r#"{"id":null,"name":"Ana"}"#).unwrap();
        assert_eq!(form.id, None);

        let form: StudentForm = serde_json::from_str(r#"{"id":3,"name":"Ana"}"#).unwrap();
        assert_eq!(form.id, Some(3));
    }

    #[test]
    fn renaming_keeps_the_id() {
        let student = Student {
            id: 9,
            name: "Ana".into(),
        };
        assert_eq!(
            student.renamed("Bea".into()),
            StudentRecord {
                id: Some(9),
                name: "Bea".into()
            }
        );
    }

    #[test]
    fn serialises_to_wire_shape() {
        let student = Student {
            id: 1,
            name: "Ana".into(),
        };
        assert_eq!(
            serde_json::to_value(&student).unwrap(),
            serde_json::json!({"id": 1, "name": "Ana"})
        );
    }
}
