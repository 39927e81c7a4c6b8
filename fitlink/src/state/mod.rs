pub mod reducer;

use chrono::NaiveDate;
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

/// Where the account-linking flow stands.
///
/// Strictly forward except that `BeginAuthorization` may restart from any
/// phase. Nothing cancels a flow the user abandons in the browser.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    #[default]
    Idle,
    AwaitingBrowserAuth,
    AwaitingCallback,
    TokensStored,
    Ready,
}

impl FlowPhase {
    pub fn is_authorizing(&self) -> bool {
        matches!(self, Self::AwaitingBrowserAuth | Self::AwaitingCallback)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Not connected",
            Self::AwaitingBrowserAuth => "Opening browser…",
            Self::AwaitingCallback => "Waiting for authorization in browser…",
            Self::TokensStored => "Connected",
            Self::Ready => "Connected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepsToday {
    pub date: NaiveDate,
    pub steps: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub phase: FlowPhase,
    /// Phase to fall back to if the current authorization attempt fails
    pub resume_phase: FlowPhase,
    pub steps: Option<StepsToday>,
    pub steps_loading: LoadingState,
    pub authorization_url: Option<String>,
    pub listener_addr: Option<String>,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the browser step, remembering where to return on failure.
    ///
    /// Pressing connect again mid-flow keeps the original fallback.
    pub fn begin_authorization(&mut self) {
        if !self.phase.is_authorizing() {
            self.resume_phase = self.phase;
        }
        self.phase = FlowPhase::AwaitingBrowserAuth;
    }

    pub fn is_loading_steps(&self) -> bool {
        matches!(self.steps_loading, LoadingState::Loading(_))
    }

    /// Advance the loading throbber, if one is showing
    pub fn tick(&mut self) {
        if let LoadingState::Loading(throbber_state) = &mut self.steps_loading {
            throbber_state.calc_next();
        }
    }
}
