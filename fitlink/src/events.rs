use chrono::NaiveDate;
use fitlink_auth::AuthEvent;

/// Commands to execute (user actions → background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    BeginAuthorization,
    FetchTodaySteps,
    Quit,
}

/// Events from background tasks and the callback listener
#[derive(Debug, Clone, PartialEq)]
pub enum DataEvent {
    // Callback listener lifecycle
    CallbackListenerStarted {
        addr: String,
    },
    CallbackListenerFailed {
        error: String,
    },

    // Authorization flow
    AuthorizationStarted {
        authorization_url: String,
    },
    AuthorizationLaunchFailed {
        error: String,
    },
    AuthorizationCompleted,
    AuthorizationFailed {
        error: String,
    },

    // Steps
    /// `linked` is false when no tokens were stored and the count is the 0 fallback
    StepsLoaded {
        date: NaiveDate,
        steps: u64,
        linked: bool,
    },
    StepsLoadFailed {
        error: String,
    },
}

impl From<AuthEvent> for DataEvent {
    fn from(event: AuthEvent) -> Self {
        match event {
            AuthEvent::AuthorizationCompleted { .. } => DataEvent::AuthorizationCompleted,
            AuthEvent::AuthorizationFailed { error } => DataEvent::AuthorizationFailed { error },
        }
    }
}
