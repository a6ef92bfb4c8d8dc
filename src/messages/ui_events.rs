//! UI events - messages from the terminal input loop to the store

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Active screen. `Welcome` is the one-time onboarding gate; once the
/// visited flag has been persisted the client always starts on `Home`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Home,
}

/// Input focus on the home screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    AddForm,
}

/// Field focus inside the add-code form
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AddField {
    #[default]
    Code,
    Price,
}

impl AddField {
    pub fn next(&self) -> AddField {
        match self {
            AddField::Code => AddField::Price,
            AddField::Price => AddField::Code,
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Welcome screen
    CompleteWelcome,

    // List navigation
    SelectNext,
    SelectPrev,

    // Store actions
    Refresh,
    ToggleSort,
    UseSelected,

    // Add form
    OpenAddForm,
    AddFormChar(char),
    AddFormBackspace,
    AddFormNextField,
    SubmitAddForm,
    CancelAddForm,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    screen: Screen,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    // Any key dismisses the help popup
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if screen == Screen::Welcome {
        return match key.code {
            KeyCode::Enter => Some(UiEvent::CompleteWelcome),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('s') => Some(UiEvent::ToggleSort),
            KeyCode::Char('r') => Some(UiEvent::Refresh),
            KeyCode::Char('a') => Some(UiEvent::OpenAddForm),
            KeyCode::Char('u') | KeyCode::Enter => Some(UiEvent::UseSelected),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            _ => None,
        },
        InputMode::AddForm => match key.code {
            KeyCode::Esc => Some(UiEvent::CancelAddForm),
            KeyCode::Enter => Some(UiEvent::SubmitAddForm),
            KeyCode::Tab => Some(UiEvent::AddFormNextField),
            KeyCode::Backspace => Some(UiEvent::AddFormBackspace),
            KeyCode::Char(c) => Some(UiEvent::AddFormChar(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(key_to_ui_event(key, Screen::Home, InputMode::Normal, false).is_none());
    }

    #[test]
    fn quit_only_outside_add_form() {
        let event = key_to_ui_event(
            press(KeyCode::Char('q')),
            Screen::Home,
            InputMode::Normal,
            false,
        );
        assert!(matches!(event, Some(UiEvent::Quit)));

        // Inside the form, 'q' is text
        let event = key_to_ui_event(
            press(KeyCode::Char('q')),
            Screen::Home,
            InputMode::AddForm,
            false,
        );
        assert!(matches!(event, Some(UiEvent::AddFormChar('q'))));
    }

    #[test]
    fn welcome_screen_only_advances_or_quits() {
        let event = key_to_ui_event(
            press(KeyCode::Enter),
            Screen::Welcome,
            InputMode::Normal,
            false,
        );
        assert!(matches!(event, Some(UiEvent::CompleteWelcome)));

        let event = key_to_ui_event(
            press(KeyCode::Char('s')),
            Screen::Welcome,
            InputMode::Normal,
            false,
        );
        assert!(event.is_none());
    }

    #[test]
    fn help_swallows_all_keys() {
        let event = key_to_ui_event(
            press(KeyCode::Char('s')),
            Screen::Home,
            InputMode::Normal,
            true,
        );
        assert!(matches!(event, Some(UiEvent::CloseHelp)));
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let event = key_to_ui_event(key, Screen::Home, InputMode::AddForm, false);
        assert!(matches!(event, Some(UiEvent::Quit)));
    }
}
