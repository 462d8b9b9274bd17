use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A student as the list endpoint returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub course: String,
    pub regid: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Text fields of the add/edit form. Also the request body of create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentForm {
    pub name: String,
    pub age: String,
    pub course: String,
    pub regid: String,
}

impl StudentForm {
    /// All four fields hold something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.age, &self.course, &self.regid]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

impl From<&StudentRecord> for StudentForm {
    fn from(s: &StudentRecord) -> Self {
        StudentForm {
            name: s.name.clone(),
            age: s.age.to_string(),
            course: s.course.clone(),
            regid: s.regid.clone(),
        }
    }
}
