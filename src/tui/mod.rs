//! Ratatui-based terminal UI.
//!
//! Steps 1-3 show the fields of the current step for editing; step 4 shows the
//! review summary until a prediction arrives and the assessment afterwards.
//! The prediction call runs on a worker thread so the UI keeps drawing while
//! it is outstanding.

use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::AppConfig;
use crate::data::{PredictionClient, Predictor, RequestError};
use crate::domain::{FieldDescriptor, PredictionResult, ValueType, WizardStep, fields_for_step};
use crate::error::AppError;
use crate::io::{AssessmentRecord, default_export_path, write_assessment_json};
use crate::wizard::{FormSession, SessionError, SubmitOutcome, SubmitTicket};

mod views;

/// Start the TUI.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let client = PredictionClient::from_config(config)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(client, config.api_base_url.clone());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

type PredictionReply = Result<PredictionResult, RequestError>;

struct PendingSubmit {
    ticket: SubmitTicket,
    reply: Receiver<PredictionReply>,
}

struct App {
    session: FormSession,
    client: PredictionClient,
    base_url: String,
    selected_field: usize,
    editing: bool,
    edit_buffer: String,
    status: String,
    pending: Option<PendingSubmit>,
}

impl App {
    fn new(client: PredictionClient, base_url: String) -> Self {
        Self {
            session: FormSession::new(),
            client,
            base_url,
            selected_field: 0,
            editing: false,
            edit_buffer: String::new(),
            status: "Fill in what you know; empty fields are sent as unknown.".to_string(),
            pending: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.poll_pending() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| views::draw(f, self))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn step_fields(&self) -> Vec<&'static FieldDescriptor> {
        fields_for_step(self.session.step()).collect()
    }

    fn selected(&self) -> Option<&'static FieldDescriptor> {
        self.step_fields().get(self.selected_field).copied()
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                let count = self.step_fields().len();
                if self.selected_field + 1 < count {
                    self.selected_field += 1;
                }
            }
            KeyCode::Right | KeyCode::Tab => {
                self.session.next();
                self.selected_field = 0;
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.session.prev();
                self.selected_field = 0;
            }
            KeyCode::Enter => {
                if self.session.step() == WizardStep::Review {
                    self.submit();
                } else {
                    self.activate_selected();
                }
            }
            KeyCode::Char('s') => self.submit(),
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(field) = self.selected() {
                    self.set_field(field.key, String::new());
                }
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.pending = None;
                self.selected_field = 0;
                self.status = "Form cleared.".to_string();
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    /// Enter on a field: start editing a number, or cycle a yes/no answer.
    fn activate_selected(&mut self) {
        let Some(field) = self.selected() else {
            return;
        };
        match field.value_type {
            ValueType::Boolean => {
                let next = match self.session.form().value(field.key) {
                    "" => "yes",
                    "yes" => "no",
                    _ => "",
                };
                self.set_field(field.key, next.to_string());
            }
            ValueType::Number => {
                self.edit_buffer = self.session.form().value(field.key).to_string();
                self.editing = true;
                self.status = format!("Editing {}. Enter to apply, Esc to cancel.", field.label);
            }
        }
    }

    fn handle_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = false;
                if let Some(field) = self.selected() {
                    let value = std::mem::take(&mut self.edit_buffer);
                    self.set_field(field.key, value);
                }
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(c) => self.edit_buffer.push(c),
            _ => {}
        }
    }

    fn set_field(&mut self, key: &str, value: String) {
        match self.session.set_field(key, value) {
            Ok(()) => self.status = format!("{} data points entered.", self.session.form().filled_count()),
            Err(err) => self.status = err.to_string(),
        }
    }

    fn submit(&mut self) {
        let ticket = match self.session.begin_submit() {
            Ok(ticket) => ticket,
            Err(SessionError::SubmitInFlight) => {
                self.status = "Still waiting for the previous request.".to_string();
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        let payload = ticket.payload.clone();
        thread::spawn(move || {
            // The receiver may be gone if the user quit; nothing to do then.
            let _ = tx.send(client.predict(&payload));
        });

        self.status = format!("Submitting to {}...", self.client.endpoint());
        self.pending = Some(PendingSubmit { ticket, reply: rx });
    }

    /// Returns `true` when something changed.
    fn poll_pending(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let reply = match pending.reply.try_recv() {
            Ok(reply) => reply,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(RequestError::new("Prediction worker exited without a reply")),
        };

        let Some(pending) = self.pending.take() else {
            return false;
        };
        match self.session.complete_submit(&pending.ticket, reply) {
            SubmitOutcome::Succeeded => {
                self.selected_field = 0;
                self.status = "Assessment ready. e export, r start over.".to_string();
            }
            SubmitOutcome::Failed => {
                self.status = "Request failed; your answers are kept.".to_string();
            }
            SubmitOutcome::Stale => {}
        }
        true
    }

    fn export(&mut self) {
        let Some(record) = AssessmentRecord::from_session(&self.base_url, &self.session) else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        let path = default_export_path(Utc::now());
        self.status = match write_assessment_json(&path, &record) {
            Ok(()) => format!("Wrote {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn app() -> App {
        // Nothing listens on port 9; submissions fail fast.
        let client = PredictionClient::new("http://127.0.0.1:9").unwrap();
        App::new(client, "http://127.0.0.1:9".to_string())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn editing_a_number_field_commits_on_enter() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert!(app.editing);
        type_text(&mut app, "37");
        app.handle_key(KeyCode::Enter);
        assert!(!app.editing);
        assert_eq!(app.session.form().value("age"), "37");
    }

    #[test]
    fn escape_cancels_an_edit() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "99");
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.session.form().value("age"), "");
        // Esc outside editing quits.
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn enter_cycles_yes_no_fields() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.session.step(), WizardStep::CreditHistory);
        assert_eq!(app.selected().map(|f| f.key), Some("high_credit_util_75"));

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.form().value("high_credit_util_75"), "yes");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.form().value("high_credit_util_75"), "no");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.form().value("high_credit_util_75"), "");
    }

    #[test]
    fn selection_stays_within_step() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected_field, 0, "step 1 has a single field");
        app.handle_key(KeyCode::Right);
        for _ in 0..20 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected_field, app.step_fields().len() - 1);
    }

    #[test]
    fn failed_submit_keeps_answers_and_step() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "40");
        app.handle_key(KeyCode::Enter);
        for _ in 0..3 {
            app.handle_key(KeyCode::Right);
        }
        app.handle_key(KeyCode::Enter);
        assert!(app.session.is_in_flight());

        // A second submit while the first is outstanding is refused.
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.status, "Still waiting for the previous request.");

        let deadline = Instant::now() + Duration::from_secs(10);
        while !app.poll_pending() {
            assert!(Instant::now() < deadline, "no reply from worker");
            thread::sleep(Duration::from_millis(10));
        }
        assert!(app.session.error().is_some());
        assert_eq!(app.session.step(), WizardStep::Review);
        assert_eq!(app.session.form().value("age"), "40");
    }

    #[test]
    fn reset_drops_pending_request() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        assert!(app.pending.is_some());
        app.handle_key(KeyCode::Char('r'));
        assert!(app.pending.is_none());
        assert!(!app.session.is_in_flight());
    }
}
