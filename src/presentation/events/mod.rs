//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::Route;

/// App-wide bindings, consulted after the current screen declines a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalKey {
    Back,
    Navigate(Route),
    /// `l`: log out when signed in, otherwise open the login screen.
    ToggleSession,
}

/// Checks if key quits the application from any screen.
#[must_use]
pub fn is_quit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

#[must_use]
pub fn global_key(key: &KeyEvent) -> Option<GlobalKey> {
    if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        return None;
    }

    let route = match key.code {
        KeyCode::Esc => return Some(GlobalKey::Back),
        KeyCode::Char('l') => return Some(GlobalKey::ToggleSession),
        KeyCode::Char('1') => Route::Home,
        KeyCode::Char('2') => Route::Cart,
        KeyCode::Char('3') => Route::Orders,
        KeyCode::Char('4') => Route::Prescriptions,
        KeyCode::Char('5') => Route::Payments,
        KeyCode::Char('6') => Route::Dashboard,
        KeyCode::Char('7') => Route::Profile,
        _ => return None,
    };
    Some(GlobalKey::Navigate(route))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(!is_quit_event(&make_key_event(KeyCode::Esc, KeyModifiers::NONE)));
    }

    #[test_case(KeyCode::Char('1'), Some(GlobalKey::Navigate(Route::Home)) ; "home")]
    #[test_case(KeyCode::Char('2'), Some(GlobalKey::Navigate(Route::Cart)) ; "cart")]
    #[test_case(KeyCode::Char('3'), Some(GlobalKey::Navigate(Route::Orders)) ; "orders")]
    #[test_case(KeyCode::Char('4'), Some(GlobalKey::Navigate(Route::Prescriptions)) ; "prescriptions")]
    #[test_case(KeyCode::Char('5'), Some(GlobalKey::Navigate(Route::Payments)) ; "payments")]
    #[test_case(KeyCode::Char('6'), Some(GlobalKey::Navigate(Route::Dashboard)) ; "dashboard")]
    #[test_case(KeyCode::Char('7'), Some(GlobalKey::Navigate(Route::Profile)) ; "profile")]
    #[test_case(KeyCode::Char('l'), Some(GlobalKey::ToggleSession) ; "session")]
    #[test_case(KeyCode::Esc, Some(GlobalKey::Back) ; "back")]
    #[test_case(KeyCode::Char('8'), None ; "unbound digit")]
    #[test_case(KeyCode::Enter, None ; "enter")]
    fn test_global_key(code: KeyCode, expected: Option<GlobalKey>) {
        assert_eq!(
            global_key(&make_key_event(code, KeyModifiers::NONE)),
            expected
        );
    }

    #[test]
    fn test_chords_are_not_global() {
        assert_eq!(
            global_key(&make_key_event(KeyCode::Char('1'), KeyModifiers::ALT)),
            None
        );
    }
}
