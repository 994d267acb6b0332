use crate::model::{RuleDraft, RuleField};
use crossterm::event::{KeyCode, KeyEvent};

/// What the form wants the app to do after a key press
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    None,
    Submit(RuleDraft),
    Cancel,
}

/// State of the add-rule dialog
#[derive(Debug, Clone, Default)]
pub struct RuleForm {
    pub draft: RuleDraft,
    pub selected: usize,
    /// Set while the create request is in flight.
    pub submitting: bool,
}

impl RuleForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_field(&self) -> RuleField {
        RuleField::FORM_ORDER[self.selected]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if self.submitting {
            return match key.code {
                KeyCode::Esc => FormAction::Cancel,
                _ => FormAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit(self.draft.clone()),
            KeyCode::Up | KeyCode::BackTab => self.previous_field(),
            KeyCode::Down | KeyCode::Tab => self.next_field(),
            code if self.current_field() == RuleField::LogAction => self.edit_log_action(code),
            KeyCode::Char(c) => self.edit(|value| value.push(c)),
            KeyCode::Backspace => self.edit(|value| {
                value.pop();
            }),
            _ => {}
        }

        FormAction::None
    }

    fn next_field(&mut self) {
        self.selected = (self.selected + 1) % RuleField::FORM_ORDER.len();
    }

    fn previous_field(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = RuleField::FORM_ORDER.len() - 1;
        }
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) {
        let field = self.current_field();
        let mut value = self.draft.get(field);
        change(&mut value);
        self.draft.set_field(field, value);
    }

    /// Log action is a three-state choice: unset, true, false.
    fn edit_log_action(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                self.draft.log_action = match self.draft.log_action {
                    None => Some(true),
                    Some(true) => Some(false),
                    Some(false) => None,
                };
            }
            KeyCode::Char('t') => self.draft.set_field(RuleField::LogAction, "true"),
            KeyCode::Char('f') => self.draft.set_field(RuleField::LogAction, "false"),
            KeyCode::Backspace => self.draft.log_action = None,
            _ => {}
        }
    }
}
