use super::form::{FormAction, RuleForm};
use crate::console::Console;
use crate::error::Result as ConsoleResult;
use crate::notify::NotificationState;
use crossterm::event::{KeyCode, KeyEvent};
use futures::FutureExt;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use tokio::task::JoinHandle;
use tracing::debug;

pub const TAB_TITLES: [&str; 3] = ["Rules", "Logs", "Help"];

#[derive(Debug, Clone, PartialEq)]
pub enum BackendStatus {
    Connected,
    Loading,
    Failing(String),
}

pub struct App {
    pub current_tab: usize,
    pub console: Console,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub form: Option<RuleForm>,
    /// Set while the delete confirmation is shown.
    pub confirm_delete: bool,
    pending_create: Option<JoinHandle<ConsoleResult<()>>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(console: Console) -> Self {
        Self {
            current_tab: 0,
            console,
            cursor: 0,
            scroll_offset: 0,
            form: None,
            confirm_delete: false,
            pending_create: None,
            should_quit: false,
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % TAB_TITLES.len();
        self.scroll_offset = 0;
    }

    pub fn previous_tab(&mut self) {
        if self.current_tab > 0 {
            self.current_tab -= 1;
        } else {
            self.current_tab = TAB_TITLES.len() - 1;
        }
        self.scroll_offset = 0;
    }

    pub fn backend_status(&self) -> BackendStatus {
        let state = self.console.rules.snapshot();
        if let Some(error) = state.error {
            BackendStatus::Failing(error)
        } else if state.loading {
            BackendStatus::Loading
        } else {
            BackendStatus::Connected
        }
    }

    /// Called once per loop turn to collect finished background work.
    pub fn tick(&mut self) {
        let finished = match self.pending_create.as_mut() {
            Some(handle) => handle.now_or_never(),
            None => return,
        };

        if let Some(result) = finished {
            self.pending_create = None;
            match result {
                // The dialog closes only once the rule is accepted.
                Ok(Ok(())) => self.form = None,
                Ok(Err(e)) => {
                    debug!(error = %e, "create failed, keeping form open");
                    if let Some(form) = self.form.as_mut() {
                        form.submitting = false;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "create task aborted");
                    self.form = None;
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.confirm_delete {
            self.confirm_delete = false;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter) {
                let engine = self.console.rules.clone();
                tokio::spawn(async move {
                    let _ = engine.delete_selected().await;
                });
            }
            return;
        }

        if let Some(form) = self.form.as_mut() {
            match form.handle_key(key) {
                FormAction::None => {}
                FormAction::Cancel => {
                    self.form = None;
                    self.pending_create = None;
                }
                FormAction::Submit(draft) => {
                    form.submitting = true;
                    let rules = self.console.rules.clone();
                    self.pending_create =
                        Some(tokio::spawn(async move { rules.create(&draft).await }));
                }
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.next_tab(),
            KeyCode::BackTab | KeyCode::Left => self.previous_tab(),
            KeyCode::Char('x') => self.console.banner.dismiss(),
            _ => match self.current_tab {
                0 => self.handle_rules_key(key),
                1 => self.handle_logs_key(key),
                _ => {}
            },
        }
    }

    fn handle_rules_key(&mut self, key: KeyEvent) {
        let rules = self.console.rules.rules();

        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.cursor + 1 < rules.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(rule) = rules.get(self.cursor) {
                    self.console.rules.toggle_selected(&rule.id);
                }
            }
            KeyCode::Char('a') => self.console.rules.toggle_all(),
            KeyCode::Char('n') => self.form = Some(RuleForm::new()),
            KeyCode::Char('r') => {
                let engine = self.console.rules.clone();
                tokio::spawn(async move {
                    let _ = engine.fetch_all().await;
                });
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                // Destructive actions wait for the collection to settle.
                if self.console.rules.is_loading() || self.console.rules.selection().is_empty() {
                    return;
                }
                self.confirm_delete = true;
            }
            _ => {}
        }
    }

    fn handle_logs_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::Down => self.scroll_offset += 1,
            KeyCode::Home => self.scroll_offset = 0,
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let banner = self.console.banner.current();
        let rules = self.console.rules.snapshot();
        if self.cursor >= rules.rules.len() {
            self.cursor = rules.rules.len().saturating_sub(1);
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),      // Tab bar
                    Constraint::Min(0),          // Content
                    Constraint::Length(if banner.is_visible() { 3 } else { 0 }), // Banner
                ]
                .as_ref(),
            )
            .split(f.size());

        super::tabs::render_tab_bar(f, chunks[0], self.current_tab, &self.backend_status());

        match self.current_tab {
            0 => super::tabs::rules::render(f, chunks[1], &rules, self.cursor),
            1 => super::tabs::logs::render(f, chunks[1], &self.console.logs.snapshot(), self.scroll_offset),
            _ => super::tabs::help::render(f, chunks[1]),
        }

        if let NotificationState::Visible(ref notification) = banner {
            super::tabs::render_banner(f, chunks[2], notification);
        }

        if let Some(ref form) = self.form {
            let area = f.size();
            super::tabs::rules::render_form(f, area, form);
        }

        if self.confirm_delete {
            let area = f.size();
            super::tabs::rules::render_delete_confirm(f, area, rules.selection.len());
        }
    }
}
