use crate::commands::Services;
use crate::refresh::RefreshTimer;
use crate::ui::app::{App, LocalSnapshot};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::Worker;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Runs the interactive UI until the user quits. Backend calls and refresh
/// timers run on `handle`; this thread only draws and handles input.
pub fn run(services: Services, handle: Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(TICK_RATE);
    let mut app = App::new(&services.config);

    let worker = Worker {
        client: services.client.clone(),
        runner: services.scrape_runner(),
        store: services.store.clone(),
    };
    app.set_command_sender(worker.spawn(&handle, events.sender()));

    let store = services.store.clone();
    app.set_local_state_provider(Arc::new(move || {
        let store = store.lock();
        LocalSnapshot {
            last_scraped: store.last_scraped().map(str::to_string),
            activities: store.activities().to_vec(),
        }
    }));

    let ui = services.config.ui.clone();
    let sender = events.sender();
    app.set_refresh_spawner(Arc::new(move |view| {
        let interval = view.refresh_interval(&ui)?;
        let sender = sender.clone();
        Some(RefreshTimer::spawn(&handle, interval, move || {
            let _ = sender.send(AppEvent::Refresh(view));
        }))
    }));

    if let Ok(dir) = std::env::current_dir() {
        app.set_export_dir(dir);
    }
    app.start();
    tracing::info!("ui started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            // The next draw picks up the new size.
            Ok(AppEvent::Resize) => {}
            Ok(AppEvent::Api(event)) => app.on_api_event(event),
            Ok(AppEvent::Refresh(view)) => app.on_refresh(view),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    tracing::info!("ui stopped");
    Ok(())
}
