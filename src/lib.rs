//! # Folio TUI
//!
//! A terminal portfolio for Ayan Ahamed with a working contact form.
//!
//! ## Features
//! - Home, About, Resume, Services, Skills, Projects, Certifications and Contact sections
//! - Backend health check with a live connection indicator
//! - Contact form with local validation, submitted to `POST /api/contact`
//! - CV download into the user's downloads directory
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine + timers)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod content;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{BackendStatus, ContactForm, FormField, SubmissionResult, ValidationError};
pub use config::Config;
pub use content::Content;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
