//! Application constants
//!
//! Centralized location for magic strings, endpoints and timing defaults.

use std::time::Duration;

/// Default base URL of the contact API
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Health endpoint, relative to the API base URL
pub const HEALTH_PATH: &str = "/api/health";

/// Contact submission endpoint, relative to the API base URL
pub const CONTACT_PATH: &str = "/api/contact";

/// The only health status value treated as online
pub const HEALTHY_STATUS: &str = "healthy";

/// Transport timeout applied to every API request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Artificial loading gate shown at startup
pub const LOADING_DELAY: Duration = Duration::from_secs(2);

/// How long a successful submission message stays visible
pub const RESULT_CLEAR_DELAY: Duration = Duration::from_secs(5);

/// How long the CV button shows its "Downloading..." label
pub const CV_LABEL_DELAY: Duration = Duration::from_secs(1);

/// Shown on success when the API response carries no message
pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "Message sent successfully! I will get back to you soon.";

/// Shown on any submission failure
pub const SUBMIT_FAILURE_MESSAGE: &str =
    "Failed to send message. Please try again or email me directly at ayanahamed266a@gmail.com";

/// Shown under the form while the backend is unreachable; nothing is queued
pub const OFFLINE_NOTE: &str = "Note: Currently in demo mode. Messages won't be saved.";

/// File name the CV is saved under
pub const CV_FILE_NAME: &str = "Ayan_Ahamed_Resume.pdf";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "folio.log";

/// Directory under $HOME holding config.yaml and content.yaml
pub const CONFIG_DIR_NAME: &str = ".folio";

/// Application name
pub const APP_NAME: &str = "Folio TUI";
