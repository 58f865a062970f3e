//! App state - pure data structure with no I/O logic

use std::time::Duration;

use serde::Serialize;

use crate::app::timers::{TimerKind, TimerSlot};
use crate::messages::ui_events::{InputMode, Section};
use crate::messages::{NetworkCommand, RenderState};
use crate::models::{BackendStatus, ContactForm, FormField, SubmissionResult};

/// Side effect requested by a state transition, executed by the App actor
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Send(NetworkCommand),
    Schedule(TimerKind, Duration),
    Cancel(TimerSlot),
}

/// Main application state - pure data, no I/O
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
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
    /// Identifies the visible result so a late auto-clear can't remove a newer one
    pub result_ticket: u64,

    // Resume
    pub cv_downloading: bool,
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,

    // Request bookkeeping
    pub next_request_id: u64,
    pub pending_health_id: Option<u64>,
    pub pending_submit_id: Option<u64>,
    pub pending_cv_id: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
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
            result_ticket: 0,
            cv_downloading: false,
            notice: None,
            show_help: false,
            next_request_id: 1,
            pending_health_id: None,
            pending_submit_id: None,
            pending_cv_id: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Value of the focused form field
    pub fn current_input(&self) -> &str {
        self.form.get(self.focused_field)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_section: self.active_section,
            scroll: self.scroll,
            menu_open: self.menu_open,
            menu_cursor: self.menu_cursor,
            is_loading: self.is_loading,
            backend_status: self.backend_status,
            form: self.form.clone(),
            focused_field: self.focused_field,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            is_submitting: self.is_submitting,
            submission_result: self.submission_result.clone(),
            cv_downloading: self.cv_downloading,
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
