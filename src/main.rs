mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use cricket_api::client::CricketApi;
use log::error;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let settings = AppSettings::load();
    let client = CricketApi::new(settings.api_url.clone());
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic live refresh thread (every 30s)
    let periodic_updater = PeriodicRefresher::new(ui_event_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Trigger health check and first match load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("crictui {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "crictui - live cricket scores terminal UI

Usage:
  crictui
  crictui --help
  crictui --version

Environment:
  CRICKET_API_URL   Base URL of the cricket scores backend
                    (default http://localhost:5000)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &network_requests, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let filter = app.lock().await.state.matches.filter;
            let _ = network_requests.send(NetworkRequest::CheckHealth).await;
            let _ = network_requests
                .send(NetworkRequest::LoadMatches { filter })
                .await;
            let _ = network_requests.send(NetworkRequest::LoadLiveTicker).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::RefreshTick => {
            let sync = {
                let mut guard = app.lock().await;
                if guard.wants_auto_sync() {
                    guard.begin_sync(false)
                } else {
                    None
                }
            };
            let _ = network_requests.send(NetworkRequest::LoadLiveTicker).await;
            if let Some((match_id, seq)) = sync {
                let _ = network_requests
                    .send(NetworkRequest::SyncMatch { match_id, seq, manual: false })
                    .await;
            }
            true
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::MatchesLoaded { filter, matches } => {
            let mut guard = app.lock().await;
            guard.on_matches_loaded(filter, matches);
        }
        NetworkResponse::MatchesFailed { filter, message } => {
            let mut guard = app.lock().await;
            guard.on_matches_failed(filter, message);
        }
        NetworkResponse::LiveTickerLoaded { matches } => {
            let mut guard = app.lock().await;
            guard.on_live_ticker_loaded(matches);
        }
        NetworkResponse::LiveTickerFailed { message } => {
            let mut guard = app.lock().await;
            guard.on_live_ticker_failed(message);
        }
        NetworkResponse::MatchResolved { id, source, raw } => {
            let mut guard = app.lock().await;
            if guard.on_match_resolved(&id, source, &raw) {
                // Resolution seeds the page; fetch the visible sections and
                // kick off one background sync for freshness.
                let active = guard.state.detail.active_tab;
                let wanted = guard.state.detail.activate_section(active);
                let sync = if !guard.state.detail.upcoming_fixture {
                    guard.begin_sync(false)
                } else {
                    None
                };
                drop(guard);
                for tab in wanted {
                    let _ = network_requests
                        .send(NetworkRequest::LoadSection { match_id: id.clone(), tab })
                        .await;
                }
                if let Some((match_id, seq)) = sync {
                    let _ = network_requests
                        .send(NetworkRequest::SyncMatch { match_id, seq, manual: false })
                        .await;
                }
            }
        }
        NetworkResponse::MatchNotFound { id } => {
            let mut guard = app.lock().await;
            guard.on_match_not_found(&id);
        }
        NetworkResponse::SectionLoaded { match_id, tab, data } => {
            let mut guard = app.lock().await;
            guard.on_section_loaded(&match_id, tab, data);
        }
        NetworkResponse::SectionFailed { match_id, tab, message } => {
            let mut guard = app.lock().await;
            guard.on_section_failed(&match_id, tab, message);
        }
        NetworkResponse::SyncCompleted { match_id, seq, manual, raw, message } => {
            let mut guard = app.lock().await;
            guard.on_sync_completed(&match_id, seq, manual, raw.as_deref(), message);
        }
        NetworkResponse::SyncFailed { match_id, manual, message } => {
            let mut guard = app.lock().await;
            guard.on_sync_failed(&match_id, manual, message);
        }
        NetworkResponse::HealthChecked { healthy, detail } => {
            let mut guard = app.lock().await;
            guard.on_health_checked(healthy, detail);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
