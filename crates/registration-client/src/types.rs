//! Registration form and API types.

use crate::error::UnknownField;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Courses offered on the registration form.
pub const COURSES: [&str; 3] = ["Children Piano", "Adult Piano", "Others"];

/// Grade options, "1" through "12".
pub const GRADES: [&str; 12] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

pub const SUCCESS_MESSAGE: &str = "Registration successful! We will contact you soon.";

/// Named fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    StudentName,
    ParentName,
    Email,
    Phone,
    Course,
    Grade,
    ExperienceYears,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::StudentName,
        FormField::ParentName,
        FormField::Email,
        FormField::Phone,
        FormField::Course,
        FormField::Grade,
        FormField::ExperienceYears,
    ];

    /// Input name as used by the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::StudentName => "student_name",
            FormField::ParentName => "parent_name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Course => "course",
            FormField::Grade => "grade",
            FormField::ExperienceYears => "experience_years",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::StudentName => "Student Name",
            FormField::ParentName => "Parent Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Course => "Course",
            FormField::Grade => "Grade",
            FormField::ExperienceYears => "Years of Experience",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::StudentName | FormField::Email | FormField::Course
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Registration form state. All fields are free text until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub student_name: String,
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub grade: String,
    pub experience_years: String,
}

impl RegistrationForm {
    /// Set a single field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Read a single field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::StudentName => &self.student_name,
            FormField::ParentName => &self.parent_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Course => &self.course,
            FormField::Grade => &self.grade,
            FormField::ExperienceYears => &self.experience_years,
        }
    }

    /// True when every field is an empty string.
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::StudentName => &mut self.student_name,
            FormField::ParentName => &mut self.parent_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Course => &mut self.course,
            FormField::Grade => &mut self.grade,
            FormField::ExperienceYears => &mut self.experience_years,
        }
    }
}

/// Registration request body sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub instrument: String,
    pub experience_level: String,
}

impl From<&RegistrationForm> for RegistrationRequest {
    fn from(form: &RegistrationForm) -> Self {
        let experience_level = if form.grade.is_empty() {
            "Beginner".to_string()
        } else {
            format!("Grade {}", form.grade)
        };

        Self {
            full_name: form.student_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            instrument: form.course.clone(),
            experience_level,
        }
    }
}

/// A registration as stored by the backend.
///
/// The server owns this schema, so every field is optional on the wire and
/// defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub student_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub parent_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grade: String,
}

impl StudentRecord {
    /// Stable row key: the id when present, else the email, else the row index.
    ///
    /// An empty or zero id counts as absent.
    pub fn row_key(&self, index: usize) -> String {
        match &self.id {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
            _ if !self.email.is_empty() => self.email.clone(),
            _ => index.to_string(),
        }
    }
}

/// Accepts strings, numbers and null for text columns.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Result of the most recent submission attempt, shown in the feedback banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    #[default]
    None,
    Success(String),
    Error(String),
}

impl SubmissionOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        SubmissionOutcome::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        SubmissionOutcome::Success(message.into())
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::None => None,
            SubmissionOutcome::Success(m) | SubmissionOutcome::Error(m) => Some(m),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SubmissionOutcome::Error(_))
    }
}
