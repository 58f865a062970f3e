//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use crate::models::ContactForm;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Probe the contact API once
    CheckHealth { id: u64 },
    /// Deliver the contact form
    SubmitContact { id: u64, form: ContactForm },
    /// Save the CV locally, or open it if saving fails
    DownloadCv { id: u64 },
    /// Abort everything in flight and stop the actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// Health endpoint answered with this status value
    Health { id: u64, status: String },
    HealthFailed { id: u64, error: String },

    ContactSent { id: u64, message: Option<String> },
    ContactFailed { id: u64, error: String },

    CvSaved { id: u64, path: PathBuf },
    CvOpened { id: u64, path: PathBuf },
    CvFailed { id: u64, error: String },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Health { id, .. } => *id,
            NetworkResponse::HealthFailed { id, .. } => *id,
            NetworkResponse::ContactSent { id, .. } => *id,
            NetworkResponse::ContactFailed { id, .. } => *id,
            NetworkResponse::CvSaved { id, .. } => *id,
            NetworkResponse::CvOpened { id, .. } => *id,
            NetworkResponse::CvFailed { id, .. } => *id,
        }
    }
}
