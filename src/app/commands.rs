//! Command handlers - state transitions for UI events, network responses and timers
//!
//! Every handler mutates `AppState` only and returns the effects the App
//! actor has to carry out.

use crate::app::state::{AppState, Effect};
use crate::app::timers::{TimerKind, TimerSlot};
use crate::constants::{CV_LABEL_DELAY, LOADING_DELAY, RESULT_CLEAR_DELAY};
use crate::messages::ui_events::{InputMode, Section};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{BackendStatus, ContactForm, FormField, SubmissionResult};

/// Menu rows: every section plus the "Download CV" entry
pub const MENU_LEN: usize = Section::ALL.len() + 1;

impl AppState {
    // ========================
    // Lifecycle
    // ========================

    /// Start the health check and the loading gate; they run independently
    pub fn mount(&mut self) -> Vec<Effect> {
        let id = self.next_id();
        self.is_loading = true;
        self.backend_status = BackendStatus::Checking;
        self.pending_health_id = Some(id);

        vec![
            Effect::Send(NetworkCommand::CheckHealth { id }),
            Effect::Schedule(TimerKind::LoadingGate, LOADING_DELAY),
        ]
    }

    /// Drop all pending work; late results are discarded
    pub fn teardown(&mut self) -> Vec<Effect> {
        self.pending_health_id = None;
        self.pending_submit_id = None;
        self.pending_cv_id = None;

        vec![
            Effect::Cancel(TimerSlot::LoadingGate),
            Effect::Cancel(TimerSlot::ClearResult),
            Effect::Cancel(TimerSlot::CvLabelReset),
            Effect::Send(NetworkCommand::Shutdown),
        ]
    }

    pub fn handle_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::LoadingGate => self.is_loading = false,
            TimerKind::ClearResult(ticket) => {
                if ticket == self.result_ticket {
                    self.submission_result = None;
                }
            }
            TimerKind::CvLabelReset => self.cv_downloading = false,
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn select_section(&mut self, section: Section) {
        if section != self.active_section {
            self.scroll = 0;
        }
        self.active_section = section;
        self.menu_open = false;
        if section != Section::Contact {
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn next_section(&mut self) {
        self.select_section(self.active_section.next());
    }

    pub fn prev_section(&mut self) {
        self.select_section(self.active_section.prev());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        if self.menu_open {
            self.menu_cursor = self.active_section.index();
        }
    }

    pub fn menu_up(&mut self) {
        self.menu_cursor = (self.menu_cursor + MENU_LEN - 1) % MENU_LEN;
    }

    pub fn menu_down(&mut self) {
        self.menu_cursor = (self.menu_cursor + 1) % MENU_LEN;
    }

    pub fn menu_confirm(&mut self) -> Vec<Effect> {
        match Section::from_index(self.menu_cursor) {
            Some(section) => {
                self.select_section(section);
                Vec::new()
            }
            None => {
                self.menu_open = false;
                self.download_cv()
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Contact form editing
    // ========================

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.cursor_position = self.current_input().len();
    }

    pub fn start_editing(&mut self) {
        if self.is_submitting {
            return;
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let mut value = self.current_input().to_string();
        if cursor_pos <= value.len() && !self.is_submitting {
            value.insert(cursor_pos, c);
            self.update_field(self.focused_field, value);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 && !self.is_submitting {
            let cursor_pos = self.cursor_position;
            let mut value = self.current_input().to_string();
            let prev_pos = value[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            value.remove(prev_pos);
            self.update_field(self.focused_field, value);
            self.cursor_position = prev_pos;
        }
    }

    /// Replace one field; the form is read-only while a submission is pending
    pub fn update_field(&mut self, field: FormField, value: String) {
        if self.is_submitting {
            return;
        }
        self.form.set(field, value);

        if field == self.focused_field {
            let input = self.current_input();
            let len = input.len();
            let on_boundary = input.is_char_boundary(self.cursor_position.min(len));
            if self.cursor_position > len || !on_boundary {
                self.cursor_position = len;
            }
        }
    }

    // ========================
    // Submission
    // ========================

    pub fn submit_contact(&mut self) -> Vec<Effect> {
        if self.is_submitting {
            return Vec::new();
        }
        self.stop_editing();

        let mut effects = vec![Effect::Cancel(TimerSlot::ClearResult)];
        self.submission_result = None;

        if let Err(e) = self.form.validate() {
            tracing::debug!(error = %e, "Contact form rejected locally");
            self.set_result(SubmissionResult::error(e.to_string()));
            return effects;
        }

        let id = self.next_id();
        self.is_submitting = true;
        self.pending_submit_id = Some(id);
        effects.push(Effect::Send(NetworkCommand::SubmitContact {
            id,
            form: self.form.clone(),
        }));
        effects
    }

    fn set_result(&mut self, result: SubmissionResult) -> u64 {
        self.result_ticket += 1;
        self.submission_result = Some(result);
        self.result_ticket
    }

    // ========================
    // CV download
    // ========================

    pub fn download_cv(&mut self) -> Vec<Effect> {
        if self.cv_downloading {
            return Vec::new();
        }
        let id = self.next_id();
        self.cv_downloading = true;
        self.pending_cv_id = Some(id);

        vec![
            Effect::Schedule(TimerKind::CvLabelReset, CV_LABEL_DELAY),
            Effect::Send(NetworkCommand::DownloadCv { id }),
        ]
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<Effect> {
        let id = response.id();

        match response {
            NetworkResponse::Health { status, .. } => {
                if self.pending_health_id == Some(id) {
                    self.pending_health_id = None;
                    self.backend_status = BackendStatus::from_health(&status);
                    tracing::info!(%status, backend = self.backend_status.as_str(), "Health check resolved");
                }
            }
            NetworkResponse::HealthFailed { error, .. } => {
                if self.pending_health_id == Some(id) {
                    self.pending_health_id = None;
                    self.backend_status = BackendStatus::Offline;
                    tracing::info!(%error, "Backend not available, running in demo mode");
                }
            }
            NetworkResponse::ContactSent { message, .. } => {
                if self.pending_submit_id == Some(id) {
                    self.pending_submit_id = None;
                    self.is_submitting = false;
                    let ticket = self.set_result(SubmissionResult::success(message));
                    self.form = ContactForm::default();
                    self.cursor_position = 0;
                    return vec![Effect::Schedule(
                        TimerKind::ClearResult(ticket),
                        RESULT_CLEAR_DELAY,
                    )];
                }
            }
            NetworkResponse::ContactFailed { error, .. } => {
                if self.pending_submit_id == Some(id) {
                    self.pending_submit_id = None;
                    self.is_submitting = false;
                    self.set_result(SubmissionResult::failure());
                    tracing::warn!(id, %error, "Contact submission failed");
                }
            }
            NetworkResponse::CvSaved { path, .. } => {
                if self.pending_cv_id == Some(id) {
                    self.pending_cv_id = None;
                    self.notice = Some(format!(
                        "[{}] Resume saved to {}",
                        chrono::Local::now().format("%H:%M:%S"),
                        path.display()
                    ));
                }
            }
            NetworkResponse::CvOpened { path, .. } => {
                if self.pending_cv_id == Some(id) {
                    self.pending_cv_id = None;
                    self.notice = Some(format!(
                        "[{}] Opening resume {}",
                        chrono::Local::now().format("%H:%M:%S"),
                        path.display()
                    ));
                }
            }
            NetworkResponse::CvFailed { error, .. } => {
                if self.pending_cv_id == Some(id) {
                    self.pending_cv_id = None;
                    self.notice = Some(format!("Resume unavailable: {}", error));
                }
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SUBMIT_FAILURE_MESSAGE;
    use crate::models::ResultKind;
    use std::path::PathBuf;

    fn filled_state() -> AppState {
        let mut state = AppState::new();
        state.form = ContactForm::new("A", "a@x.com", "S", "M");
        state
    }

    fn submit_id(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Send(NetworkCommand::SubmitContact { id, .. }) => Some(*id),
                _ => None,
            })
            .expect("submit command")
    }

    #[test]
    fn test_mount_checks_health_and_starts_loading_gate() {
        let mut state = AppState::new();
        let effects = state.mount();

        assert!(state.is_loading);
        assert_eq!(state.backend_status, BackendStatus::Checking);
        assert_eq!(
            effects,
            vec![
                Effect::Send(NetworkCommand::CheckHealth { id: 1 }),
                Effect::Schedule(TimerKind::LoadingGate, LOADING_DELAY),
            ]
        );

        state.handle_timer(TimerKind::LoadingGate);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_healthy_status_goes_online() {
        let mut state = AppState::new();
        state.mount();
        state.handle_response(NetworkResponse::Health { id: 1, status: "healthy".into() });
        assert_eq!(state.backend_status, BackendStatus::Online);
    }

    #[test]
    fn test_other_status_or_failure_goes_offline() {
        let mut state = AppState::new();
        state.mount();
        state.handle_response(NetworkResponse::Health { id: 1, status: "degraded".into() });
        assert_eq!(state.backend_status, BackendStatus::Offline);

        let mut state = AppState::new();
        state.mount();
        state.handle_response(NetworkResponse::HealthFailed { id: 1, error: "refused".into() });
        assert_eq!(state.backend_status, BackendStatus::Offline);
    }

    #[test]
    fn test_backend_status_is_terminal_after_first_check() {
        let mut state = AppState::new();
        state.mount();
        state.handle_response(NetworkResponse::HealthFailed { id: 1, error: "timeout".into() });
        state.handle_response(NetworkResponse::Health { id: 1, status: "healthy".into() });
        assert_eq!(state.backend_status, BackendStatus::Offline);
    }

    #[test]
    fn test_field_updates_keep_last_value_per_field() {
        let mut a = AppState::new();
        a.update_field(FormField::Name, "first".into());
        a.update_field(FormField::Email, "e@x.com".into());
        a.update_field(FormField::Name, "A".into());
        a.update_field(FormField::Message, "M".into());

        let mut b = AppState::new();
        b.update_field(FormField::Message, "M".into());
        b.update_field(FormField::Name, "A".into());
        b.update_field(FormField::Email, "e@x.com".into());

        assert_eq!(a.form, b.form);
        assert_eq!(a.form, ContactForm::new("A", "e@x.com", "", "M"));
    }

    #[test]
    fn test_typing_edits_focused_field_at_cursor() {
        let mut state = AppState::new();
        state.next_field();
        state.start_editing();
        for c in "ax.com".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        state.enter_char('@');
        assert_eq!(state.form.email, "a@x.com");

        state.delete_char();
        assert_eq!(state.form.email, "ax.com");
        assert!(state.form.name.is_empty());
    }

    #[test]
    fn test_submit_sends_form_and_sets_submitting() {
        let mut state = filled_state();
        state.submission_result = Some(SubmissionResult::error("old"));
        let effects = state.submit_contact();

        assert!(state.is_submitting);
        assert_eq!(state.submission_result, None);
        assert_eq!(effects[0], Effect::Cancel(TimerSlot::ClearResult));
        assert_eq!(
            effects[1],
            Effect::Send(NetworkCommand::SubmitContact {
                id: 1,
                form: ContactForm::new("A", "a@x.com", "S", "M"),
            })
        );
    }

    #[test]
    fn test_resubmit_while_pending_is_ignored() {
        let mut state = filled_state();
        state.submit_contact();
        let before = state.clone();

        let effects = state.submit_contact();
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_success_resets_form_and_schedules_clear() {
        let mut state = filled_state();
        let id = submit_id(&state.submit_contact());

        let effects = state.handle_response(NetworkResponse::ContactSent {
            id,
            message: Some("Thanks!".into()),
        });

        assert!(!state.is_submitting);
        assert_eq!(state.form, ContactForm::default());
        assert_eq!(
            state.submission_result,
            Some(SubmissionResult { kind: ResultKind::Success, message: "Thanks!".into() })
        );
        let ticket = state.result_ticket;
        assert_eq!(
            effects,
            vec![Effect::Schedule(TimerKind::ClearResult(ticket), RESULT_CLEAR_DELAY)]
        );

        state.handle_timer(TimerKind::ClearResult(ticket));
        assert_eq!(state.submission_result, None);
    }

    #[test]
    fn test_failure_keeps_form_and_shows_fallback() {
        let mut state = filled_state();
        let id = submit_id(&state.submit_contact());

        let effects = state.handle_response(NetworkResponse::ContactFailed {
            id,
            error: "Connection failed".into(),
        });

        assert!(effects.is_empty());
        assert!(!state.is_submitting);
        assert_eq!(state.form, ContactForm::new("A", "a@x.com", "S", "M"));
        let result = state.submission_result.unwrap();
        assert_eq!(result.kind, ResultKind::Error);
        assert_eq!(result.message, SUBMIT_FAILURE_MESSAGE);
        assert!(result.message.contains("ayanahamed266a@gmail.com"));
    }

    #[test]
    fn test_stale_clear_does_not_remove_newer_result() {
        let mut state = filled_state();
        let id = submit_id(&state.submit_contact());
        state.handle_response(NetworkResponse::ContactSent { id, message: None });
        let old_ticket = state.result_ticket;

        state.form = ContactForm::new("B", "b@x.com", "S2", "M2");
        let id = submit_id(&state.submit_contact());
        state.handle_response(NetworkResponse::ContactFailed { id, error: "500".into() });

        state.handle_timer(TimerKind::ClearResult(old_ticket));
        assert_eq!(
            state.submission_result.map(|r| r.kind),
            Some(ResultKind::Error)
        );
    }

    #[test]
    fn test_invalid_form_is_rejected_without_request() {
        let mut state = AppState::new();
        state.form = ContactForm::new("A", "", "S", "");
        let effects = state.submit_contact();

        assert_eq!(effects, vec![Effect::Cancel(TimerSlot::ClearResult)]);
        assert!(!state.is_submitting);
        let result = state.submission_result.unwrap();
        assert_eq!(result.kind, ResultKind::Error);
        assert_eq!(result.message, "Please provide: email, message");
    }

    #[test]
    fn test_responses_for_unknown_ids_are_ignored() {
        let mut state = filled_state();
        let id = submit_id(&state.submit_contact());
        state.handle_response(NetworkResponse::ContactSent { id: id + 40, message: None });
        assert!(state.is_submitting);
        assert_eq!(state.form.name, "A");
    }

    #[test]
    fn test_form_is_read_only_while_submitting() {
        let mut state = filled_state();
        state.submit_contact();
        state.update_field(FormField::Name, "Z".into());
        state.start_editing();
        assert_eq!(state.form.name, "A");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_cv_download_shows_label_then_notice() {
        let mut state = AppState::new();
        let effects = state.download_cv();
        assert!(state.cv_downloading);
        assert_eq!(
            effects,
            vec![
                Effect::Schedule(TimerKind::CvLabelReset, CV_LABEL_DELAY),
                Effect::Send(NetworkCommand::DownloadCv { id: 1 }),
            ]
        );
        assert!(state.download_cv().is_empty());

        state.handle_response(NetworkResponse::CvSaved {
            id: 1,
            path: PathBuf::from("/tmp/Ayan_Ahamed_Resume.pdf"),
        });
        assert!(state
            .notice
            .as_deref()
            .is_some_and(|n| n.contains("Ayan_Ahamed_Resume.pdf")));

        state.handle_timer(TimerKind::CvLabelReset);
        assert!(!state.cv_downloading);
    }

    #[test]
    fn test_menu_selects_section_or_downloads() {
        let mut state = AppState::new();
        state.toggle_menu();
        state.menu_down();
        state.menu_down();
        assert!(state.menu_confirm().is_empty());
        assert_eq!(state.active_section, Section::Resume);
        assert!(!state.menu_open);

        state.toggle_menu();
        state.menu_cursor = MENU_LEN - 1;
        let effects = state.menu_confirm();
        assert!(!state.menu_open);
        assert!(effects.contains(&Effect::Send(NetworkCommand::DownloadCv { id: 1 })));
    }

    #[test]
    fn test_teardown_cancels_timers_and_shuts_down_network() {
        let mut state = filled_state();
        state.mount();
        state.submit_contact();
        let effects = state.teardown();

        assert_eq!(effects.last(), Some(&Effect::Send(NetworkCommand::Shutdown)));
        assert!(effects.contains(&Effect::Cancel(TimerSlot::ClearResult)));
        assert_eq!(state.pending_submit_id, None);
        assert_eq!(state.pending_health_id, None);
    }

    #[test]
    fn test_state_serializes() {
        let state = filled_state();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["backend_status"], "checking");
        assert_eq!(json["form"]["email"], "a@x.com");
        assert_eq!(json["active_section"], "home");
    }
}
