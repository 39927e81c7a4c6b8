use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use fitlink_auth::{AuthContext, Settings, TokenStore};

use crate::app_core::AppCore;
use crate::background::steps_loader::StepsLoader;
use crate::commands::executor::LiveHandler;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::logging::init_logging;

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(self) -> Result<()> {
        let (log_path, _log_guard) = init_logging()?;
        tracing::info!("fitlink starting, logging to {}", log_path.display());

        let token_store = TokenStore::from_settings(&self.settings)?;
        let api_base_url = self.settings.api_base_url.clone();

        let (auth_tx, mut auth_rx) = mpsc::unbounded_channel();
        let (data_tx, mut data_rx) = mpsc::unbounded_channel::<DataEvent>();

        let auth = AuthContext::new(self.settings, token_store.clone())?.with_notifier(auth_tx);
        let steps_loader = StepsLoader::new(token_store, api_base_url, data_tx);
        let mut core = AppCore::new(LiveHandler::new(auth, steps_loader));

        let listener_event = core.handler_mut().start_listener().await;
        core.handle_data_event(listener_event);

        if core.handler_mut().has_stored_token() {
            tracing::info!("Found stored tokens, loading today's steps");
            core.execute(AppCommand::FetchTodaySteps);
        }

        let mut terminal = init_terminal()?;
        let mut event_stream = EventStream::new();

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        let outcome: Result<()> = loop {
            if let Err(e) = terminal.draw(|f| crate::ui::render_app(f, core.state())) {
                break Err(e.into());
            }

            tokio::select! {
                _ = interval.tick() => core.tick(),
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            tracing::debug!("Key press: {:?}", key);
                            core.handle_key(KeyEvent::from(key));
                        }
                    }
                }
                Some(auth_event) = auth_rx.recv() => {
                    tracing::info!("Received auth event: {:?}", auth_event);
                    core.handle_data_event(auth_event.into());
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    core.handle_data_event(data_event);
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break Ok(());
            }
        };

        tracing::info!("Cleaning up application");

        // Restore the terminal before anything else can fail
        let restored = restore_terminal(terminal);
        core.handler_mut().shutdown().await;

        outcome?;
        restored?;
        Ok(())
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(
    mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
) -> Result<(), std::io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
