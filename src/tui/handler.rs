use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    Reload,
    NewRecipe,
    EditRecipe,
    DeleteRecipe,
    ShowHelp,
    HideHelp,
    // Form actions
    FormChar(char),
    FormBackspace,
    FormNewline,
    FormNextField,
    FormPreviousField,
    FormSubmit,
    FormCancel,
    // Delete confirmation
    ConfirmDelete,
    CancelDelete,
}

pub fn handle_key_event(key: KeyEvent, mode: &Mode, show_help: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    match mode {
        Mode::Create | Mode::Edit(_) => handle_form_key(key),
        Mode::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(AppAction::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(AppAction::CancelDelete)
            }
            _ => None,
        },
        Mode::Browse => handle_browse_key(key),
    }
}

fn handle_form_key(key: KeyEvent) -> Option<AppAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(AppAction::FormSubmit),
        (KeyCode::Esc, _) => Some(AppAction::FormCancel),
        (KeyCode::Tab, _) => Some(AppAction::FormNextField),
        (KeyCode::BackTab, _) => Some(AppAction::FormPreviousField),
        (KeyCode::Enter, _) => Some(AppAction::FormNewline),
        (KeyCode::Backspace, _) => Some(AppAction::FormBackspace),
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            Some(AppAction::FormChar(c))
        }
        _ => None,
    }
}

fn handle_browse_key(key: KeyEvent) -> Option<AppAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),
        (KeyCode::Char('<'), _) => Some(AppAction::MoveToTop),
        (KeyCode::Char('>'), _) => Some(AppAction::MoveToBottom),

        (KeyCode::Char('r'), _) => Some(AppAction::Reload),
        (KeyCode::Char('n'), _) => Some(AppAction::NewRecipe),
        (KeyCode::Char('e'), _) | (KeyCode::Enter, _) => Some(AppAction::EditRecipe),
        (KeyCode::Char('d'), _) => Some(AppAction::DeleteRecipe),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn browse_keys_map_to_actions() {
        let mode = Mode::Browse;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('n')), &mode, false),
            Some(AppAction::NewRecipe)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d')), &mode, false),
            Some(AppAction::DeleteRecipe)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Down), &mode, false),
            Some(AppAction::MoveDown)
        );
    }

    #[test]
    fn form_captures_letters_as_input() {
        let mode = Mode::Create;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &mode, false),
            Some(AppAction::FormChar('q'))
        );
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
                &Mode::Edit(1),
                false
            ),
            Some(AppAction::FormSubmit)
        );
    }

    #[test]
    fn confirm_delete_accepts_only_yes_or_no() {
        let mode = Mode::ConfirmDelete(4);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('y')), &mode, false),
            Some(AppAction::ConfirmDelete)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc), &mode, false),
            Some(AppAction::CancelDelete)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &mode, false), None);
    }

    #[test]
    fn help_closes_on_any_key() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x')), &Mode::Create, true),
            Some(AppAction::HideHelp)
        );
    }
}
