use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::*;
use crossterm::event::KeyCode;

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            open_submission: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('a')),
                Key::new(KeyCode::Char('n')),
            ]),
        }
    }
}

impl Default for FormKeybindings {
    fn default() -> Self {
        Self {
            next_field: KeyBinding::multiple(vec![
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Down),
            ]),
            prev_field: KeyBinding::multiple(vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Up),
            ]),
            submit: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            close: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for ToastKeybindings {
    fn default() -> Self {
        Self {
            dismiss: KeyBinding::multiple(vec![
                Key::new(KeyCode::Char('x')),
                Key::new(KeyCode::Esc),
            ]),
        }
    }
}
