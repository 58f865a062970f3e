//! Folio TUI - terminal portfolio with a live contact form
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events and timers
//! - Network Layer (Tokio) - contact API calls and the CV download

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use folio_tui::app::commands::MENU_LEN;
use folio_tui::constants::APP_NAME;
use folio_tui::content::Content;
use folio_tui::messages::ui_events::{key_to_ui_event, InputMode, Section};
use folio_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use folio_tui::models::{BackendStatus, FormField};
use folio_tui::network::client::ApiClient;
use folio_tui::network::cv::CvDownloader;
use folio_tui::ui::{
    backend_banner, backend_status_color, centered_rect, cursor_column, progress_bar, render_input,
    render_tabs, result_color, skill_color,
};
use folio_tui::{AppActor, Config, NetworkActor};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "folio.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    if let Some(e) = config_err {
        tracing::warn!(error = %e, "Ignoring config file, using defaults");
    }

    let content = match Content::load(&Config::config_dir()) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring content override, using built-in content");
            Content::builtin()?
        }
    };

    tracing::info!(api_url = %config.api_url, cv = ?config.cv_path, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(
        ApiClient::new(&config.api_url),
        CvDownloader::new(config.cv_path.clone()),
        net_resp_tx,
    );
    let network_handle = tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, &content, ui_tx, &mut render_rx).await?;

    // App actor tears down on Quit, which shuts the network actor down
    let _ = app_handle.await;
    let _ = network_handle.await;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    content: &Content,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut tick: usize = 0;

    loop {
        tick = tick.wrapping_add(1);
        terminal.draw(|f| draw_ui(f, &current_state, content, tick))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_section,
                    current_state.input_mode,
                    current_state.is_loading,
                    current_state.menu_open,
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, content: &Content, tick: usize) {
    let area = f.area();

    if state.is_loading {
        draw_loading(f, content, tick, area);
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Nav bar
            Constraint::Min(0),    // Section
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_nav_bar(f, state, content, main_chunks[0]);

    let body = main_chunks[1];
    match state.active_section {
        Section::Home => draw_home(f, state, content, body),
        Section::About => draw_about(f, state, content, body),
        Section::Resume => draw_resume(f, state, content, body),
        Section::Services => draw_services(f, state, content, body),
        Section::Skills => draw_skills(f, state, content, body),
        Section::Projects => draw_projects(f, state, content, body),
        Section::Certifications => draw_certifications(f, state, content, body),
        Section::Contact => draw_contact(f, state, content, body),
    }

    draw_footer(f, state, content, main_chunks[2]);

    if state.menu_open {
        draw_menu_popup(f, state, area);
    }
    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_loading(f: &mut Frame, content: &Content, tick: usize, area: Rect) {
    let spinner = SPINNER[(tick / 4) % SPINNER.len()];
    let lines = vec![
        Line::from(Span::styled(
            content.profile.name.as_str(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from(format!("{} Loading...", spinner)),
    ];

    let popup = centered_rect(40, 30, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), popup);
}

fn cv_label(state: &RenderState) -> &'static str {
    if state.cv_downloading {
        "Downloading..."
    } else {
        "Download CV"
    }
}

fn draw_nav_bar(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let mut header = vec![
        Span::styled(
            format!(" {} ", content.profile.name),
            Style::default().fg(Color::Black).bg(Color::Yellow).bold(),
        ),
        Span::raw(" "),
    ];
    if state.backend_status == BackendStatus::Online {
        header.push(Span::styled(
            "● Backend Connected",
            Style::default().fg(Color::Green),
        ));
    }
    header.push(Span::raw("  "));
    header.push(Span::styled(
        format!("[d] {}", cv_label(state)),
        Style::default().fg(Color::Cyan),
    ));
    f.render_widget(Paragraph::new(Line::from(header)), rows[0]);

    let titles: Vec<&str> = Section::ALL.iter().map(|s| s.title()).collect();
    let tabs = render_tabs(&titles, state.active_section.index());
    f.render_widget(tabs, rows[1]);
}

fn section_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
}

fn draw_scrolled(f: &mut Frame, state: &RenderState, title: &str, lines: Vec<Line>, area: Rect) {
    let paragraph = Paragraph::new(lines)
        .block(section_block(title))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(paragraph, area);
}

fn draw_home(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let profile = &content.profile;
    let lines = vec![
        Line::from(""),
        Line::from("Hello!"),
        Line::from(vec![
            Span::raw("I'm "),
            Span::styled(profile.full_name.as_str(), Style::default().fg(Color::Yellow).bold()),
        ]),
        Line::from(Span::styled(profile.role.as_str(), Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "Press 8 to get in touch, d to download my CV",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    draw_scrolled(f, state, Section::Home.title(), lines, area);
}

fn draw_about(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let profile = &content.profile;
    let mut lines = vec![
        Line::from(Span::styled("About Me", Style::default().bold())),
        Line::from(""),
        Line::from(profile.about.as_str()),
        Line::from(""),
    ];
    for item in &profile.info {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", item.label), Style::default().fg(Color::DarkGray)),
            Span::raw(item.value.as_str()),
        ]));
    }
    if !profile.projects_completed.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                profile.projects_completed.as_str(),
                Style::default().fg(Color::Yellow).bold(),
            ),
            Span::raw(" Projects completed"),
        ]));
    }
    draw_scrolled(f, state, Section::About.title(), lines, area);
}

fn draw_resume(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(content.profile.full_name.as_str(), Style::default().bold())),
        Line::from(content.profile.role.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" {} ", cv_label(state)),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::styled("  press d", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    if let Some(notice) = &state.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(notice.as_str(), Style::default().fg(Color::Cyan))));
    }
    draw_scrolled(f, state, Section::Resume.title(), lines, area);
}

fn draw_services(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let mut lines = vec![Line::from(content.services_intro.as_str()), Line::from("")];
    for service in &content.services {
        lines.push(Line::from(Span::styled(
            format!("{} {}", service.icon, service.name),
            Style::default().fg(Color::Yellow).bold(),
        )));
        lines.push(Line::from(format!("  {}", service.description)));
        for feature in &service.features {
            lines.push(Line::from(Span::styled(
                format!("  ✓ {}", feature),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(""));
    }
    draw_scrolled(f, state, Section::Services.title(), lines, area);
}

fn draw_skills(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let lines: Vec<Line> = content
        .skills
        .iter()
        .map(|skill| {
            Line::from(vec![
                Span::raw(format!("{:<12}", skill.name)),
                Span::styled(
                    progress_bar(skill.percentage, 30),
                    Style::default().fg(skill_color(&skill.color)),
                ),
            ])
        })
        .collect();
    draw_scrolled(f, state, Section::Skills.title(), lines, area);
}

fn draw_projects(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let mut lines = Vec::new();
    for project in &content.projects {
        lines.push(Line::from(vec![
            Span::styled(project.name.as_str(), Style::default().bold()),
            Span::styled(
                format!("  ({})", project.category),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", project.tech.join(" · ")),
            Style::default().fg(Color::Cyan),
        )));
    }
    draw_scrolled(f, state, Section::Projects.title(), lines, area);
}

fn draw_certifications(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let lines: Vec<Line> = content
        .certifications
        .iter()
        .map(|cert| {
            Line::from(vec![
                Span::raw(format!("{} ", cert.icon)),
                Span::styled(cert.name.as_str(), Style::default().bold()),
                Span::styled(
                    format!("  {} · {}", cert.issuer, cert.year),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    draw_scrolled(f, state, Section::Certifications.title(), lines, area);
}

fn draw_contact(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    // Contact details
    let mut details = Vec::new();
    for detail in &content.contact {
        details.push(Line::from(Span::styled(
            format!("{} {}", detail.icon, detail.label),
            Style::default().fg(Color::DarkGray),
        )));
        details.push(Line::from(detail.value.as_str()));
        details.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(details)
            .block(section_block("Get In Touch"))
            .wrap(Wrap { trim: false }),
        columns[0],
    );

    // Form
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Backend status
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Length(3), // Subject
            Constraint::Min(3),    // Message
            Constraint::Length(1), // Send button
            Constraint::Length(2), // Result
            Constraint::Length(1), // Demo note
        ])
        .split(columns[1]);

    let (status_text, offline_note) = backend_banner(state.backend_status);
    f.render_widget(
        Paragraph::new(Span::styled(
            status_text,
            Style::default().fg(backend_status_color(state.backend_status)),
        )),
        rows[0],
    );

    let editing = state.input_mode == InputMode::Editing;
    for (i, field) in FormField::ALL.into_iter().enumerate() {
        let focused = state.focused_field == field;
        let widget = render_input(
            state.form.get(field),
            field.placeholder(),
            field.as_str(),
            focused,
            focused && editing,
        )
        .wrap(Wrap { trim: false });
        let slot = rows[i + 1];
        f.render_widget(widget, slot);

        if focused && editing {
            let max_x = slot.x.saturating_add(slot.width.saturating_sub(2));
            let cursor_x = slot
                .x
                .saturating_add(cursor_column(state.form.get(field), state.cursor_position))
                .saturating_add(1)
                .min(max_x);
            f.set_cursor_position(Position::new(cursor_x, slot.y.saturating_add(1)));
        }
    }

    let button = if state.is_submitting {
        Span::styled(" Sending... ", Style::default().fg(Color::Black).bg(Color::DarkGray))
    } else {
        Span::styled(" Send Message ", Style::default().fg(Color::Black).bg(Color::Yellow))
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            button,
            Span::styled("  s / Ctrl+S", Style::default().fg(Color::DarkGray)),
        ])),
        rows[5],
    );

    if let Some(result) = &state.submission_result {
        f.render_widget(
            Paragraph::new(Span::styled(
                result.message.as_str(),
                Style::default().fg(result_color(result.kind)),
            ))
            .wrap(Wrap { trim: true }),
            rows[6],
        );
    }

    if let Some(note) = offline_note {
        f.render_widget(
            Paragraph::new(Span::styled(note, Style::default().fg(Color::DarkGray))),
            rows[7],
        );
    }
}

fn draw_footer(f: &mut Frame, state: &RenderState, content: &Content, area: Rect) {
    let mut spans = vec![
        Span::raw(format!(" © 2025 {}. All rights reserved. | Backend: ", content.profile.name)),
        Span::styled(
            state.backend_status.as_str(),
            Style::default().fg(backend_status_color(state.backend_status)),
        ),
    ];
    if let Some(notice) = &state.notice {
        spans.push(Span::raw(format!(" | {}", notice)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_menu_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(30, 50, area);

    let mut entries: Vec<String> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {}", i + 1, s.title()))
        .collect();
    entries.push(format!("d {}", cv_label(state)));
    debug_assert_eq!(entries.len(), MENU_LEN);

    let items: Vec<ListItem> = entries.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Menu ")
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.menu_cursor));

    f.render_widget(Clear, popup_area);
    f.render_stateful_widget(list, popup_area, &mut list_state);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 FOLIO TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Next / previous section
   1-8                Jump to section
   ↑ / ↓              Scroll
   m                  Toggle menu

 CONTACT FORM
   ↑ / ↓              Move between fields
   e / Enter          Edit field
   Esc                Stop editing
   s / Ctrl+S         Send message

 RESUME
   d                  Download CV

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
