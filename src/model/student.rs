use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// School-issued identifier (e.g. "S001"), distinct from the row id.
    pub student_id: String,
    pub teacher_id: i64,
}

impl Student {
    /// Copy the editable fields from `details`. The owning teacher is left unchanged.
    pub fn apply(&mut self, details: &StudentInput) {
        self.name = details.name.clone();
        self.email = details.email.clone();
        self.student_id = details.student_id.clone();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub student_id: String,
}
