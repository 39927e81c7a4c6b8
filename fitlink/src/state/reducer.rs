use super::{AppState, FlowPhase, LoadingState, StatusMessage, StepsToday};
use crate::events::{AppCommand, DataEvent};

/// Pure state transition function for data events.
///
/// Returns a follow-up command when the event should trigger more work, e.g. a
/// completed authorization fetches today's steps.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) -> Option<AppCommand> {
    match event {
        DataEvent::CallbackListenerStarted { addr } => {
            state.listener_addr = Some(addr);
            None
        }
        DataEvent::CallbackListenerFailed { error } => {
            state.listener_addr = None;
            state.status = Some(StatusMessage::Error(format!(
                "Callback listener unavailable: {}",
                error
            )));
            None
        }

        DataEvent::AuthorizationStarted { authorization_url } => {
            state.phase = FlowPhase::AwaitingCallback;
            state.authorization_url = Some(authorization_url);
            state.status = Some(StatusMessage::Info(
                "Authorize fitlink in your browser".to_string(),
            ));
            None
        }
        DataEvent::AuthorizationLaunchFailed { error } => {
            state.phase = state.resume_phase;
            state.status = Some(StatusMessage::Error(format!(
                "Could not start authorization: {}",
                error
            )));
            None
        }
        DataEvent::AuthorizationCompleted => {
            state.phase = FlowPhase::TokensStored;
            state.resume_phase = FlowPhase::TokensStored;
            state.authorization_url = None;
            state.status = Some(StatusMessage::Info("Fitbit connected".to_string()));
            Some(AppCommand::FetchTodaySteps)
        }
        DataEvent::AuthorizationFailed { error } => {
            // An earlier link is still stored and usable
            state.phase = state.resume_phase;
            state.authorization_url = None;
            state.status = Some(StatusMessage::Error(format!(
                "Authorization failed: {}",
                error
            )));
            None
        }

        DataEvent::StepsLoaded {
            date,
            steps,
            linked,
        } => {
            state.steps = Some(StepsToday { date, steps });
            state.steps_loading = LoadingState::Loaded;

            // Idle only advances for a stored token found at startup
            let next = match (linked, state.phase) {
                (true, FlowPhase::Idle | FlowPhase::TokensStored) => Some(FlowPhase::Ready),
                // Tokens vanished from disk
                (false, FlowPhase::TokensStored | FlowPhase::Ready) => Some(FlowPhase::Idle),
                _ => None,
            };
            if let Some(phase) = next {
                state.phase = phase;
            }
            if !state.phase.is_authorizing() {
                state.resume_phase = state.phase;
            }
            None
        }
        DataEvent::StepsLoadFailed { error } => {
            state.steps_loading = LoadingState::Error(error.clone());
            state.status = Some(StatusMessage::Error(format!(
                "Failed to load steps: {}",
                error
            )));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn completion_requests_steps() {
        let mut state = AppState::new();
        state.phase = FlowPhase::AwaitingCallback;

        let follow_up = reduce_data_event(&mut state, DataEvent::AuthorizationCompleted);

        assert_eq!(follow_up, Some(AppCommand::FetchTodaySteps));
        assert_eq!(state.phase, FlowPhase::TokensStored);
    }

    #[test]
    fn steps_loaded_moves_to_ready() {
        let mut state = AppState::new();
        state.phase = FlowPhase::TokensStored;
        let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();

        reduce_data_event(
            &mut state,
            DataEvent::StepsLoaded {
                date,
                steps: 4321,
                linked: true,
            },
        );

        assert_eq!(state.phase, FlowPhase::Ready);
        assert_eq!(state.steps, Some(StepsToday { date, steps: 4321 }));
        assert_eq!(state.steps_loading, LoadingState::Loaded);
    }

    #[test]
    fn steps_loaded_mid_flow_keeps_phase() {
        let mut state = AppState::new();
        state.phase = FlowPhase::AwaitingCallback;
        let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();

        reduce_data_event(
            &mut state,
            DataEvent::StepsLoaded {
                date,
                steps: 0,
                linked: true,
            },
        );

        assert_eq!(state.phase, FlowPhase::AwaitingCallback);
    }

    #[test]
    fn stored_token_at_startup_moves_idle_to_ready() {
        let mut state = AppState::new();
        let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();

        reduce_data_event(
            &mut state,
            DataEvent::StepsLoaded {
                date,
                steps: 812,
                linked: true,
            },
        );

        assert_eq!(state.phase, FlowPhase::Ready);
        assert_eq!(state.resume_phase, FlowPhase::Ready);
    }

    #[test]
    fn unlinked_zero_keeps_idle() {
        let mut state = AppState::new();
        let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();

        reduce_data_event(
            &mut state,
            DataEvent::StepsLoaded {
                date,
                steps: 0,
                linked: false,
            },
        );

        assert_eq!(state.phase, FlowPhase::Idle);
        assert_eq!(state.phase.label(), "Not connected");
        assert_eq!(state.steps.map(|s| s.steps), Some(0));
    }

    #[test]
    fn unlinked_result_after_link_drops_back_to_idle() {
        let mut state = AppState::new();
        state.phase = FlowPhase::Ready;
        let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();

        reduce_data_event(
            &mut state,
            DataEvent::StepsLoaded {
                date,
                steps: 0,
                linked: false,
            },
        );

        assert_eq!(state.phase, FlowPhase::Idle);
    }

    #[test]
    fn denied_reauthorization_returns_to_previous_phase() {
        let mut state = AppState::new();
        state.phase = FlowPhase::Ready;
        state.begin_authorization();
        reduce_data_event(
            &mut state,
            DataEvent::AuthorizationStarted {
                authorization_url: "https://www.fitbit.com/oauth2/authorize".to_string(),
            },
        );

        reduce_data_event(
            &mut state,
            DataEvent::AuthorizationFailed {
                error: "access_denied".to_string(),
            },
        );

        assert_eq!(state.phase, FlowPhase::Ready);
        assert_eq!(state.authorization_url, None);
    }

    #[test]
    fn failed_first_authorization_returns_to_idle() {
        let mut state = AppState::new();
        state.begin_authorization();
        // A second press mid-flow must not overwrite the fallback
        state.begin_authorization();

        reduce_data_event(
            &mut state,
            DataEvent::AuthorizationLaunchFailed {
                error: "invalid authorize URL".to_string(),
            },
        );

        assert_eq!(state.phase, FlowPhase::Idle);
    }

    #[test]
    fn listener_failure_is_shown() {
        let mut state = AppState::new();

        reduce_data_event(
            &mut state,
            DataEvent::CallbackListenerFailed {
                error: "address in use".to_string(),
            },
        );

        assert!(matches!(
            state.status,
            Some(StatusMessage::Error(ref msg)) if msg.contains("address in use")
        ));
    }
}
