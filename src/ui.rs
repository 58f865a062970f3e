use ratatui::{prelude::*, widgets::*};

use crate::constants::OFFLINE_NOTE;
use crate::models::{BackendStatus, ResultKind};

/// Renders the section tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Renders a labelled form input, highlighted when focused
pub fn render_input<'a>(
    content: &'a str,
    placeholder: &'a str,
    title: &'a str,
    is_focused: bool,
    is_editing: bool,
) -> Paragraph<'a> {
    let border = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if content.is_empty() && !is_editing {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(content)
    };

    Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    )
}

/// Horizontal percentage bar, e.g. `██████░░░░ 60%`
pub fn progress_bar(percentage: u8, width: usize) -> String {
    let pct = percentage.min(100) as usize;
    let filled = pct * width / 100;
    format!("{}{} {}%", "█".repeat(filled), "░".repeat(width - filled), pct)
}

/// Backend status color
pub fn backend_status_color(status: BackendStatus) -> Color {
    match status {
        BackendStatus::Online => Color::Green,
        BackendStatus::Offline => Color::Red,
        BackendStatus::Checking => Color::Yellow,
    }
}

/// Status line above the contact form, plus the note shown under it while offline
pub fn backend_banner(status: BackendStatus) -> (&'static str, Option<&'static str>) {
    match status {
        BackendStatus::Online => ("Backend Connected ✓", None),
        BackendStatus::Offline => ("Backend Offline (Using Demo Mode)", Some(OFFLINE_NOTE)),
        BackendStatus::Checking => ("Checking backend...", None),
    }
}

/// Screen column of a byte cursor inside `input`
pub fn cursor_column(input: &str, cursor: usize) -> u16 {
    let before = input.get(..cursor).unwrap_or(input);
    u16::try_from(before.chars().count()).unwrap_or(u16::MAX)
}

/// Submission result color
pub fn result_color(kind: ResultKind) -> Color {
    match kind {
        ResultKind::Success => Color::Green,
        ResultKind::Error => Color::Red,
    }
}

/// Parse a `#rrggbb` skill color, falling back to cyan
pub fn skill_color(hex: &str) -> Color {
    hex.parse::<Color>().unwrap_or(Color::Cyan)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
