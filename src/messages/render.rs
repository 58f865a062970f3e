//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, Section};
use crate::models::{BackendStatus, ContactForm, FormField, SubmissionResult};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    // Navigation
    pub active_section: Section,
    pub scroll: u16,
    pub menu_open: bool,
    pub menu_cursor: usize,

    // Startup
    pub is_loading: bool,
    pub backend_status: BackendStatus,

    // Contact form
    pub form: ContactForm,
    pub focused_field: FormField,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub is_submitting: bool,
    pub submission_result: Option<SubmissionResult>,

    // Resume
    pub cv_downloading: bool,
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_section: Section::Home,
            scroll: 0,
            menu_open: false,
            menu_cursor: 0,
            is_loading: true,
            backend_status: BackendStatus::Checking,
            form: ContactForm::default(),
            focused_field: FormField::Name,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            is_submitting: false,
            submission_result: None,
            cv_downloading: false,
            notice: None,
            show_help: false,
        }
    }
}
