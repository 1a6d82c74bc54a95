use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_core::{AppCore, DataEventHandler};
use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::logging::init_logging;
use crate::state::{AppState, Location, UiConfig};
use academy_auth::{SessionClient, SessionStore, Settings};

/// Production handler: commands spawn background tasks on the data loader.
struct TaskHandler {
    task_manager: BackgroundTaskManager,
    data_loader: DataLoader,
}

impl DataEventHandler for TaskHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState, now: Instant) {
        executor::execute_command(
            command,
            state,
            &mut self.task_manager,
            &self.data_loader,
            now,
        );
    }
}

pub struct App {
    settings: Settings,
    landing_url: String,
}

impl App {
    pub fn new(settings: Settings, landing_url: String) -> Self {
        Self {
            settings,
            landing_url,
        }
    }

    pub async fn run(&self) -> Result<()> {
        // Held until run returns so buffered log lines are flushed on exit.
        let log_guard = init_logging()?;
        tracing::info!(log = %log_guard.path.display(), "academy starting");

        let location = Location::parse(&self.landing_url)
            .with_context(|| format!("Invalid landing URL: {}", self.landing_url))?;

        let session = Arc::new(SessionStore::open(self.settings.storage_path.as_deref())?);
        let client = Arc::new(SessionClient::from_settings(&self.settings, session.clone())?);
        let mut session_rx = session.subscribe();

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let data_loader = DataLoader::new(client, data_tx);

        let mut task_manager = BackgroundTaskManager::new();
        let bootstrap = data_loader.clone();
        task_manager.spawn_load_task("fetch_csrf", async move {
            bootstrap.bootstrap().await;
        });

        let mut terminal = self.init()?;

        let handler = TaskHandler {
            task_manager,
            data_loader,
        };
        let mut core = AppCore::new(
            handler,
            session,
            location,
            UiConfig::from(&self.settings),
            Instant::now(),
        );

        let mut event_stream = EventStream::new();
        let mut interval = tokio::time::interval(Duration::from_millis(100));

        tracing::info!("Entering main event loop");
        loop {
            terminal.draw(|f| {
                crate::ui::render_app(f, core.state(), Instant::now());
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    core.tick(Instant::now());
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            core.handle_key(KeyEvent::from(key), Instant::now());
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    core.handle_data_event(data_event, Instant::now());
                }
                Ok(()) = session_rx.changed() => {
                    let authenticated = *session_rx.borrow_and_update();
                    core.handle_data_event(DataEvent::SessionChanged { authenticated }, Instant::now());
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");
        core.handler_mut().task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
