//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;

use crate::models::FormField;

/// Portfolio sections, in navigation order
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    About,
    Resume,
    Services,
    Skills,
    Projects,
    Certifications,
    Contact,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Home,
        Section::About,
        Section::Resume,
        Section::Services,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Contact,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Resume => "Resume",
            Section::Services => "Services",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
            Section::Contact => "Contact",
        }
    }

    pub fn index(&self) -> usize {
        Section::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Section> {
        Section::ALL.get(index).copied()
    }

    pub fn next(&self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    pub fn prev(&self) -> Section {
        let len = Section::ALL.len();
        Section::ALL[(self.index() + len - 1) % len]
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    SelectSection(Section),
    NextSection,
    PrevSection,
    ScrollUp,
    ScrollDown,

    // Navigation menu
    ToggleMenu,
    MenuUp,
    MenuDown,
    MenuConfirm,

    // Contact form
    NextField,
    PrevField,
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    /// Replace a single field with a new value
    UpdateField { field: FormField, value: String },
    SubmitContact,

    // Resume
    DownloadCv,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_section: Section,
    input_mode: InputMode,
    is_loading: bool,
    menu_open: bool,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') if active_section == Section::Contact && !is_loading => {
                return Some(UiEvent::SubmitContact)
            }
            _ => {}
        }
    }

    // Nothing but quitting while the loading screen is up
    if is_loading {
        return match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if menu_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('m') => Some(UiEvent::ToggleMenu),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::MenuUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::MenuDown),
            KeyCode::Enter => Some(UiEvent::MenuConfirm),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => handle_normal_keys(key, active_section),
        InputMode::Editing => handle_editing_keys(key),
    }
}

/// Handle keys while browsing
fn handle_normal_keys(key: KeyEvent, active_section: Section) -> Option<UiEvent> {
    let in_contact = active_section == Section::Contact;

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('m') => Some(UiEvent::ToggleMenu),
        KeyCode::Char('d') => Some(UiEvent::DownloadCv),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::NextSection),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevSection),
        KeyCode::Char(c @ '1'..='8') => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Section::from_index(index).map(UiEvent::SelectSection)
        }
        KeyCode::Up if in_contact => Some(UiEvent::PrevField),
        KeyCode::Down if in_contact => Some(UiEvent::NextField),
        KeyCode::Char('e') | KeyCode::Enter if in_contact => Some(UiEvent::StartEditing),
        KeyCode::Char('s') if in_contact => Some(UiEvent::SubmitContact),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
        _ => None,
    }
}

/// Handle keys while a form field is being edited
fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
