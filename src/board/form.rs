use std::fmt;

use crate::domain::{NewJob, Submission};

/// Fields of the create form that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Role,
    Company,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Role => "role",
            FormField::Company => "company",
        }
    }
}

/// Per-field validation messages. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub role: Option<String>,
    pub company: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.company.is_none()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Role => self.role.as_deref(),
            FormField::Company => self.company.as_deref(),
        }
    }

    /// Drop the message for a field, as happens when the user edits it.
    pub fn clear(&mut self, field: FormField) {
        match field {
            FormField::Role => self.role = None,
            FormField::Company => self.company = None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        [FormField::Role, FormField::Company]
            .into_iter()
            .filter_map(|field| self.get(field).map(|message| (field, message)))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(_, message)| message).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Contents of the "add job" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    pub role: String,
    pub company: String,
    pub status: Submission,
    pub location: String,
    pub salary: String,
    pub description: String,
}

impl JobForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        if self.role.trim().is_empty() {
            errors.role = Some("Role is required".to_string());
        }
        if self.company.trim().is_empty() {
            errors.company = Some("Company is required".to_string());
        }
        errors
    }

    /// Request body for the form. Blank optional fields are omitted.
    pub fn to_new_job(&self) -> NewJob {
        NewJob {
            role: self.role.trim().to_string(),
            company: self.company.trim().to_string(),
            status: self.status.status(),
            location: non_blank(&self.location),
            salary: non_blank(&self.salary),
            description: non_blank(&self.description),
        }
    }

    pub fn clear(&mut self) {
        *self = JobForm::default();
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
