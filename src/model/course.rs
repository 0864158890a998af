use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub course_code: String,
    pub credits: i32,
    pub teacher_id: i64,
}

impl Course {
    pub fn apply(&mut self, details: &CourseInput) {
        self.title = details.title.clone();
        self.course_code = details.course_code.clone();
        if let Some(credits) = details.credits {
            self.credits = credits;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub course_code: String,
    /// Required. `None` means the client left it out.
    #[serde(default)]
    pub credits: Option<i32>,
}
