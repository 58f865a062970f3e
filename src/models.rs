use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SUCCESS_MESSAGE, HEALTHY_STATUS, SUBMIT_FAILURE_MESSAGE};

/// A field of the contact form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }

    /// Placeholder shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "Your Name",
            FormField::Email => "Your Email",
            FormField::Subject => "Subject",
            FormField::Message => "Your Message",
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Subject,
            FormField::Subject => FormField::Message,
            FormField::Message => FormField::Name,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Name => FormField::Message,
            FormField::Email => FormField::Name,
            FormField::Subject => FormField::Email,
            FormField::Message => FormField::Subject,
        }
    }
}

/// Contact form contents; also the JSON body of a submission
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ContactForm {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        }
    }

    /// Replace a single field, leaving the others untouched
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Local checks run before anything is sent: every field must be
    /// non-blank and the email must look like an address.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<FormField> = FormField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let email = self.email.trim();
        if !email.contains('@') || !email.contains('.') {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

/// Rejection raised by [`ContactForm::validate`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide: {}", field_list(.0))]
    MissingFields(Vec<FormField>),

    #[error("Please provide a valid email address")]
    InvalidEmail,
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(FormField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome kind of a submission attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Success,
    Error,
}

/// Most recent submission outcome shown under the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub kind: ResultKind,
    pub message: String,
}

impl SubmissionResult {
    /// Success carrying the server's message, or the default text
    pub fn success(message: Option<String>) -> Self {
        SubmissionResult {
            kind: ResultKind::Success,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
        }
    }

    /// The fixed fallback shown for any delivery failure
    pub fn failure() -> Self {
        SubmissionResult::error(SUBMIT_FAILURE_MESSAGE)
    }

    pub fn error(message: impl Into<String>) -> Self {
        SubmissionResult {
            kind: ResultKind::Error,
            message: message.into(),
        }
    }
}

/// Reachability of the contact API, decided once at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl BackendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendStatus::Checking => "checking",
            BackendStatus::Online => "online",
            BackendStatus::Offline => "offline",
        }
    }

    /// Map a resolved health status onto online/offline
    pub fn from_health(status: &str) -> Self {
        if status == HEALTHY_STATUS {
            BackendStatus::Online
        } else {
            BackendStatus::Offline
        }
    }
}

/// Body of `GET /api/health`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a successful `POST /api/contact`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body the API sends alongside a 4xx/5xx status
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
