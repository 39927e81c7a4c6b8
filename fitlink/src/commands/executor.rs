use crate::app_core::DataEventHandler;
use crate::background::{steps_loader::StepsLoader, BackgroundTaskManager};
use crate::events::{AppCommand, DataEvent};
use crate::state::{reducer, AppState, LoadingState};
use fitlink_auth::AuthContext;
use throbber_widgets_tui::ThrobberState;

const STEPS_TASK: &str = "steps";

/// Execute a command by launching the browser or spawning background tasks
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    auth: &AuthContext,
    task_manager: &mut BackgroundTaskManager,
    steps_loader: &StepsLoader,
) {
    match command {
        AppCommand::Quit => state.should_quit = true,

        AppCommand::BeginAuthorization => {
            if !auth.is_listening() {
                tracing::warn!("Starting authorization without a callback listener");
            }
            state.begin_authorization();

            let event = match auth.begin_authorization() {
                Ok(url) => DataEvent::AuthorizationStarted {
                    authorization_url: url.to_string(),
                },
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build authorization request");
                    DataEvent::AuthorizationLaunchFailed {
                        error: e.to_string(),
                    }
                }
            };
            reducer::reduce_data_event(state, event);
        }

        AppCommand::FetchTodaySteps => {
            state.steps_loading = LoadingState::Loading(ThrobberState::default());

            let loader = steps_loader.clone();
            task_manager.spawn_load_task(STEPS_TASK, async move {
                loader.load_today_steps().await;
            });
        }
    }
}

/// Synchronous version for tests. Opens no browser and spawns nothing.
///
/// `BeginAuthorization` stops at `AwaitingBrowserAuth`: the live path's
/// follow-up `AuthorizationStarted` (or `AuthorizationLaunchFailed`) carries
/// the launcher's result, so tests inject that event themselves.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    match command {
        AppCommand::Quit => state.should_quit = true,
        AppCommand::BeginAuthorization => state.begin_authorization(),
        AppCommand::FetchTodaySteps => {
            state.steps_loading = LoadingState::Loading(ThrobberState::default());
        }
    }
}

/// Production handler: owns the auth context and the fetch tasks
pub struct LiveHandler {
    auth: AuthContext,
    steps_loader: StepsLoader,
    task_manager: BackgroundTaskManager,
}

impl LiveHandler {
    pub fn new(auth: AuthContext, steps_loader: StepsLoader) -> Self {
        Self {
            auth,
            steps_loader,
            task_manager: BackgroundTaskManager::new(),
        }
    }

    /// Bind the callback listener, reporting the outcome as a data event
    pub async fn start_listener(&mut self) -> DataEvent {
        match self.auth.start().await {
            Ok(addr) => DataEvent::CallbackListenerStarted {
                addr: addr.to_string(),
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to start callback listener");
                DataEvent::CallbackListenerFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn has_stored_token(&self) -> bool {
        match self.auth.token_store().load_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored tokens");
                false
            }
        }
    }

    pub async fn shutdown(&mut self) {
        self.task_manager.cancel_all();
        if let Err(e) = self.auth.stop().await {
            tracing::warn!(error = %e, "Callback listener did not stop cleanly");
        }
    }
}

impl DataEventHandler for LiveHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        execute_command(
            command,
            state,
            &self.auth,
            &mut self.task_manager,
            &self.steps_loader,
        );
    }
}
