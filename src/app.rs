//! Application state and core logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use signup_form::form::{FieldName, SubmissionController, SubmitAttempt};
use signup_form::transport::{Transport, TransportError};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Events delivered to the app from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// The transport answered the submission in flight
    SubmissionFinished(std::result::Result<(), TransportError>),
}

/// Which element of the form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldName),
    SubmitButton,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldName::Name)
    }
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Field(FieldName::Password) => Focus::SubmitButton,
            Focus::Field(field) => Focus::Field(field.next()),
            Focus::SubmitButton => Focus::Field(FieldName::Name),
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Focus::Field(FieldName::Name) => Focus::SubmitButton,
            Focus::Field(field) => Focus::Field(field.prev()),
            Focus::SubmitButton => Focus::Field(FieldName::Password),
        }
    }

    pub fn field(&self) -> Option<FieldName> {
        match self {
            Focus::Field(field) => Some(*field),
            Focus::SubmitButton => None,
        }
    }
}

/// Main application struct
pub struct App {
    /// Form and submission lifecycle
    pub controller: SubmissionController,
    /// Focused element
    pub focus: Focus,
    /// Frame counter driving the progress indicator
    pub tick: usize,
    /// Transport used for submissions
    transport: Arc<dyn Transport>,
    /// Sender handed to background submission tasks
    events_tx: mpsc::UnboundedSender<AppEvent>,
    /// Completion queue; every form mutation goes through the event loop
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(controller: SubmissionController, transport: Arc<dyn Transport>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            focus: Focus::default(),
            tick: 0,
            transport,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance animation state
    pub fn on_tick(&mut self) {
        if self.controller.is_submitting() {
            self.tick = self.tick.wrapping_add(1);
        }
    }

    /// Move focus, marking the field being left as touched
    fn move_focus(&mut self, to: Focus) {
        if let Some(field) = self.focus.field() {
            self.controller.touch(field);
        }
        self.focus = to;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.move_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focus.prev()),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                if let Some(field) = self.focus.field() {
                    self.controller.push_char(field, c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focus.field() {
                    self.controller.pop_char(field);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Start a submission; the transport runs on a background task and
    /// reports back through the event queue.
    pub fn submit(&mut self) {
        match self.controller.begin_submit() {
            SubmitAttempt::Dispatch(payload) => {
                let transport = Arc::clone(&self.transport);
                let tx = self.events_tx.clone();
                self.tick = 0;
                tokio::spawn(async move {
                    let result = transport.submit(payload).await;
                    if tx.send(AppEvent::SubmissionFinished(result)).is_err() {
                        tracing::debug!("app closed before submission finished");
                    }
                });
            }
            SubmitAttempt::Invalid(errors) => {
                if let Some((field, _)) = errors.iter().next() {
                    self.focus = Focus::Field(field);
                }
            }
            SubmitAttempt::Rejected => {}
        }
    }

    /// Apply one event from the queue
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SubmissionFinished(result) => {
                let succeeded = result.is_ok();
                self.controller.complete(result);
                if succeeded {
                    self.focus = Focus::default();
                }
            }
        }
    }

    /// Drain pending events without blocking
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next event. Returns `false` when no sender is left.
    #[cfg(test)]
    async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }
}
