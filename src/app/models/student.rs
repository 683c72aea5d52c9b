//! Student records.

use super::form::{FormError, FormField, FormSnapshot, FormState};
use super::resource::{RecordId, Resource, ResourceKind};
use crate::app::views::list_renderer::Card;
use serde::{Deserialize, Deserializer, Serialize};

/// Shown on cards when a student has no grade
pub const GRADE_NOT_ASSIGNED: &str = "Not assigned";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub course: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub grade: Option<String>,
}

/// Creatable/replaceable student fields. `grade: None` goes over the wire as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub course: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub grade: Option<String>,
}

/// The server reports a missing grade as `""`
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let grade = Option::<String>::deserialize(deserializer)?;
    Ok(grade.filter(|grade| !grade.is_empty()))
}

impl Student {
    pub fn grade_label(&self) -> &str {
        self.grade.as_deref().unwrap_or(GRADE_NOT_ASSIGNED)
    }

    fn form(title: &str) -> FormState {
        FormState::new(
            title,
            vec![
                FormField::text("name", "Name"),
                FormField::integer("age", "Age", 1, None),
                FormField::email("email", "Email"),
                FormField::text("course", "Course"),
                FormField::text("grade", "Grade").optional(),
            ],
        )
    }
}

impl Resource for Student {
    const KIND: ResourceKind = ResourceKind::Student;

    type Fields = StudentFields;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            age: self.age,
            email: self.email.clone(),
            course: self.course.clone(),
            grade: self.grade.clone(),
        }
    }

    fn card(&self) -> Card {
        Card::new(self.id.clone(), format!("{} {}", Self::KIND.icon(), self.name))
            .detail("Age", self.age.to_string())
            .detail("Email", &self.email)
            .detail("Course", &self.course)
            .detail("Grade", self.grade_label())
    }

    fn blank_form() -> FormState {
        Self::form("Add Student")
    }

    fn edit_form(&self) -> FormState {
        let mut form = Self::form("Edit Student");
        form.set_text("name", &self.name);
        form.set_text("age", self.age.to_string());
        form.set_text("email", &self.email);
        form.set_text("course", &self.course);
        form.set_text("grade", self.grade.clone().unwrap_or_default());
        form
    }

    fn fields_from_snapshot(snapshot: &FormSnapshot) -> Result<StudentFields, FormError> {
        snapshot.validate()?;
        let age = snapshot.integer("age")?;
        Ok(StudentFields {
            name: snapshot.text("name")?,
            age: u32::try_from(age).map_err(|_| FormError::TooLarge {
                label: "Age".to_string(),
                max: i64::from(u32::MAX),
            })?,
            email: snapshot.text("email")?,
            course: snapshot.text("course")?,
            grade: snapshot.optional_text("grade")?,
        })
    }
}
