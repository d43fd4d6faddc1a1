//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextField,

    // Store operations
    Refresh,
    Submit,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissNotice,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Panel {
    #[default]
    Roster,
    Lookup,
    Enrollment,
    Registration,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Roster => Panel::Lookup,
            Panel::Lookup => Panel::Enrollment,
            Panel::Enrollment => Panel::Registration,
            Panel::Registration => Panel::Roster,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Roster => Panel::Registration,
            Panel::Lookup => Panel::Roster,
            Panel::Enrollment => Panel::Lookup,
            Panel::Registration => Panel::Enrollment,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Grade Lookup input fields
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum LookupField {
    #[default]
    StudentId,
    CourseName,
}

impl LookupField {
    pub fn next(&self) -> LookupField {
        match self {
            LookupField::StudentId => LookupField::CourseName,
            LookupField::CourseName => LookupField::StudentId,
        }
    }
}

/// Course Enrollment form fields
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum EnrollmentField {
    #[default]
    CourseName,
    StudentId,
    GradeId,
}

impl EnrollmentField {
    pub fn next(&self) -> EnrollmentField {
        match self {
            EnrollmentField::CourseName => EnrollmentField::StudentId,
            EnrollmentField::StudentId => EnrollmentField::GradeId,
            EnrollmentField::GradeId => EnrollmentField::CourseName,
        }
    }
}

/// Student Registration form fields
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum RegistrationField {
    #[default]
    Name,
    Email,
}

impl RegistrationField {
    pub fn next(&self) -> RegistrationField {
        match self {
            RegistrationField::Name => RegistrationField::Email,
            RegistrationField::Email => RegistrationField::Name,
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    notice_shown: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    // Blocking confirmation popup: any key dismisses it
    if notice_shown {
        return Some(UiEvent::DismissNotice);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('r') if active_panel == Panel::Roster => Some(UiEvent::Refresh),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Roster => Some(UiEvent::Refresh),
                _ => Some(UiEvent::StartEditing),
            },
            KeyCode::Char('s') if active_panel != Panel::Roster => Some(UiEvent::Submit),
            KeyCode::Up => Some(UiEvent::ScrollUp),
            KeyCode::Down => Some(UiEvent::ScrollDown),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Enter => Some(UiEvent::Submit),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_refresh_only_in_roster_panel() {
        let event = key_to_ui_event(
            press(KeyCode::Char('r')),
            Panel::Roster,
            InputMode::Normal,
            false,
            false,
        );
        assert!(matches!(event, Some(UiEvent::Refresh)));

        let event = key_to_ui_event(
            press(KeyCode::Char('r')),
            Panel::Lookup,
            InputMode::Normal,
            false,
            false,
        );
        assert!(event.is_none());
    }

    #[test]
    fn test_enter_submits_while_editing() {
        let event = key_to_ui_event(
            press(KeyCode::Enter),
            Panel::Registration,
            InputMode::Editing,
            false,
            false,
        );
        assert!(matches!(event, Some(UiEvent::Submit)));
    }

    #[test]
    fn test_any_key_dismisses_notice() {
        let event = key_to_ui_event(
            press(KeyCode::Char('z')),
            Panel::Enrollment,
            InputMode::Normal,
            false,
            true,
        );
        assert!(matches!(event, Some(UiEvent::DismissNotice)));
    }
}
