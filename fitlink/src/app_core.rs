use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};

/// Trait for handling command execution (production = auth context + tasks, test = mock)
///
/// This trait abstracts the side effects of command execution, allowing tests
/// to inject a mock implementation that doesn't open a browser or call the API.
pub trait DataEventHandler {
    /// Execute a command with access to mutable state
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Testable application core without terminal dependencies
///
/// Generic over H (handler). In production the handler launches the browser
/// and spawns fetch tasks, in tests it updates state synchronously.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self {
            ui_state: AppState::new(),
            handler,
        }
    }

    /// Translate a key press to an AppCommand and execute it
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            tracing::info!("Executing command: {:?}", command);
            self.execute(command);
        }
    }

    /// Reduce a data event and run whatever command it asks for next
    ///
    /// A completed authorization, for instance, fetches today's steps.
    pub fn handle_data_event(&mut self, event: DataEvent) {
        if let Some(follow_up) = reducer::reduce_data_event(&mut self.ui_state, event) {
            tracing::debug!("Data event requested follow-up: {:?}", follow_up);
            self.execute(follow_up);
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        self.handler
            .execute_with_context(command, &mut self.ui_state);
    }

    /// Advance animations
    pub fn tick(&mut self) {
        self.ui_state.tick();
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
