use crate::config::actions::*;
use crate::config::keybindings::KeybindingsConfig;
use crossterm::event::KeyEvent;
use std::sync::Arc;

pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    // Global actions
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::OpenSubmission => kb.open_submission.matches(event),
        }
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::OpenSubmission => kb.open_submission.display(),
        }
    }

    // Form actions
    pub fn matches_form(&self, event: &KeyEvent, action: FormAction) -> bool {
        let kb = &self.keybindings.form;
        match action {
            FormAction::NextField => kb.next_field.matches(event),
            FormAction::PrevField => kb.prev_field.matches(event),
            FormAction::Submit => kb.submit.matches(event),
        }
    }

    pub fn display_form(&self, action: FormAction) -> String {
        let kb = &self.keybindings.form;
        match action {
            FormAction::NextField => kb.next_field.display(),
            FormAction::PrevField => kb.prev_field.display(),
            FormAction::Submit => kb.submit.display(),
        }
    }

    // Dialog actions
    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Close => kb.close.matches(event),
        }
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Close => kb.close.display(),
        }
    }

    // Toast actions
    pub fn matches_toast(&self, event: &KeyEvent, action: ToastAction) -> bool {
        let kb = &self.keybindings.toast;
        match action {
            ToastAction::Dismiss => kb.dismiss.matches(event),
        }
    }

    pub fn display_toast(&self, action: ToastAction) -> String {
        let kb = &self.keybindings.toast;
        match action {
            ToastAction::Dismiss => kb.dismiss.first_key().display(),
        }
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}
