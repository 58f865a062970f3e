//! App actor - message loop processing UI events, network responses and timers

use tokio::sync::mpsc;

use crate::app::state::{AppState, Effect};
use crate::app::timers::{TimerKind, Timers};
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns the portfolio state and its timers
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    timers: Timers,
    timer_rx: mpsc::UnboundedReceiver<TimerKind>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
            timers: Timers::new(timer_tx),
            timer_rx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let effects = self.state.mount();
        self.execute(effects);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                event = ui_rx.recv() => {
                    let Some(event) = event else { break };
                    if self.handle_ui_event(event) {
                        break;
                    }
                }
                Some(response) = net_rx.recv() => {
                    let effects = self.state.handle_response(response);
                    self.execute(effects);
                }
                Some(kind) = self.timer_rx.recv() => {
                    self.state.handle_timer(kind);
                }
            }
            let _ = self.render_tx.send(self.state.to_render_state());
        }

        let effects = self.state.teardown();
        self.execute(effects);
        self.timers.cancel_all();
        tracing::info!("App actor stopped");
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let effects = match event {
            // Navigation
            UiEvent::SelectSection(section) => {
                self.state.select_section(section);
                Vec::new()
            }
            UiEvent::NextSection => {
                self.state.next_section();
                Vec::new()
            }
            UiEvent::PrevSection => {
                self.state.prev_section();
                Vec::new()
            }
            UiEvent::ScrollUp => {
                self.state.scroll_up();
                Vec::new()
            }
            UiEvent::ScrollDown => {
                self.state.scroll_down();
                Vec::new()
            }

            // Menu
            UiEvent::ToggleMenu => {
                self.state.toggle_menu();
                Vec::new()
            }
            UiEvent::MenuUp => {
                self.state.menu_up();
                Vec::new()
            }
            UiEvent::MenuDown => {
                self.state.menu_down();
                Vec::new()
            }
            UiEvent::MenuConfirm => self.state.menu_confirm(),

            // Contact form
            UiEvent::NextField => {
                self.state.next_field();
                Vec::new()
            }
            UiEvent::PrevField => {
                self.state.prev_field();
                Vec::new()
            }
            UiEvent::StartEditing => {
                self.state.start_editing();
                Vec::new()
            }
            UiEvent::StopEditing => {
                self.state.stop_editing();
                Vec::new()
            }
            UiEvent::CharInput(c) => {
                self.state.enter_char(c);
                Vec::new()
            }
            UiEvent::Backspace => {
                self.state.delete_char();
                Vec::new()
            }
            UiEvent::CursorLeft => {
                self.state.move_cursor_left();
                Vec::new()
            }
            UiEvent::CursorRight => {
                self.state.move_cursor_right();
                Vec::new()
            }
            UiEvent::UpdateField { field, value } => {
                self.state.update_field(field, value);
                Vec::new()
            }
            UiEvent::SubmitContact => self.state.submit_contact(),

            // Resume
            UiEvent::DownloadCv => self.state.download_cv(),

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                Vec::new()
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                Vec::new()
            }

            // System
            UiEvent::Quit => return true,
        };

        self.execute(effects);
        false
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Send(cmd) => {
                    tracing::debug!(?cmd, "Dispatching network command");
                    let _ = self.network_tx.send(cmd);
                }
                Effect::Schedule(kind, delay) => self.timers.schedule(kind, delay),
                Effect::Cancel(slot) => self.timers.cancel(slot),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::Section;
    use crate::models::{BackendStatus, ContactForm, FormField, ResultKind};
    use crate::network::client::ApiClient;
    use crate::network::cv::CvDownloader;
    use crate::network::test_server::{unreachable_url, StubServer};
    use crate::network::NetworkActor;
    use std::time::Duration;

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
        _cv_dir: tempfile::TempDir,
    }

    impl Harness {
        fn start(api_url: &str) -> Self {
            let cv_dir = tempfile::tempdir().unwrap();
            let (ui_tx, ui_rx) = mpsc::unbounded_channel();
            let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
            let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
            let (render_tx, render_rx) = mpsc::unbounded_channel();

            let downloader =
                CvDownloader::with_target_dir(Some(cv_dir.path().join("missing.pdf")), cv_dir.path());
            let network = NetworkActor::new(ApiClient::new(api_url), downloader, net_resp_tx);
            tokio::spawn(network.run(net_cmd_rx));
            tokio::spawn(AppActor::new(net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

            Harness { ui_tx, render_rx, _cv_dir: cv_dir }
        }

        fn send(&self, event: UiEvent) {
            self.ui_tx.send(event).unwrap();
        }

        fn fill(&self, form: &ContactForm) {
            for field in FormField::ALL {
                self.send(UiEvent::UpdateField {
                    field,
                    value: form.get(field).to_string(),
                });
            }
        }

        async fn wait_for(&mut self, pred: impl Fn(&RenderState) -> bool) -> RenderState {
            tokio::time::timeout(Duration::from_secs(5), async {
                loop {
                    let state = self.render_rx.recv().await.expect("app actor alive");
                    if pred(&state) {
                        return state;
                    }
                }
            })
            .await
            .expect("state reached in time")
        }
    }

    fn sample_form() -> ContactForm {
        ContactForm::new("A", "a@x.com", "S", "M")
    }

    #[tokio::test]
    async fn test_healthy_mount_shows_content_online() {
        let server = StubServer::start()
            .await
            .route("GET", "/api/health", 200, r#"{"status":"healthy","service":"contact-form-api"}"#);
        let mut harness = Harness::start(&server.url());

        let first = harness.wait_for(|_| true).await;
        assert!(first.is_loading);

        let ready = harness
            .wait_for(|s| !s.is_loading && s.backend_status != BackendStatus::Checking)
            .await;
        assert_eq!(ready.backend_status, BackendStatus::Online);
    }

    #[tokio::test]
    async fn test_submit_against_live_backend_resets_form() {
        let server = StubServer::start()
            .await
            .route("GET", "/api/health", 200, r#"{"status":"healthy"}"#)
            .route("POST", "/api/contact", 201, r#"{"success":true,"message":"Thanks!"}"#);
        let mut harness = Harness::start(&server.url());

        harness.send(UiEvent::SelectSection(Section::Contact));
        harness.fill(&sample_form());
        harness.wait_for(|s| s.form == sample_form()).await;
        harness.send(UiEvent::SubmitContact);

        let done = harness
            .wait_for(|s| !s.is_submitting && s.submission_result.is_some())
            .await;
        let result = done.submission_result.unwrap();
        assert_eq!(result.kind, ResultKind::Success);
        assert_eq!(result.message, "Thanks!");
        assert_eq!(done.form, ContactForm::default());

        let sent = server.requests_to("/api/contact");
        assert_eq!(sent.len(), 1);
        let body: ContactForm = serde_json::from_str(&sent[0].body).unwrap();
        assert_eq!(body, sample_form());
    }

    #[tokio::test]
    async fn test_unreachable_backend_goes_offline_and_keeps_form() {
        let mut harness = Harness::start(&unreachable_url().await);

        harness
            .wait_for(|s| s.backend_status == BackendStatus::Offline)
            .await;

        harness.fill(&sample_form());
        harness.send(UiEvent::SubmitContact);

        let done = harness
            .wait_for(|s| !s.is_submitting && s.submission_result.is_some())
            .await;
        let result = done.submission_result.unwrap();
        assert_eq!(result.kind, ResultKind::Error);
        assert_eq!(
            result.message,
            "Failed to send message. Please try again or email me directly at ayanahamed266a@gmail.com"
        );
        assert_eq!(done.form, sample_form());
    }

    #[tokio::test]
    async fn test_missing_cv_reports_notice() {
        let mut harness = Harness::start(&unreachable_url().await);
        harness.send(UiEvent::DownloadCv);

        let state = harness.wait_for(|s| s.notice.is_some()).await;
        assert!(state.notice.unwrap().starts_with("Resume unavailable"));
    }
}
