use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cricket_api::DetailTab;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    // A sync notice blocks input until acknowledged; any key dismisses it.
    if guard.state.detail.notice.is_some() {
        match (key_event.code, key_event.modifiers) {
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            _ => guard.dismiss_notice(),
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Matches),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Live),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Detail),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Match list navigation
        (MenuItem::Matches, Char('j') | KeyCode::Down, _) => guard.state.matches.navigate_down(),
        (MenuItem::Matches, Char('k') | KeyCode::Up, _) => guard.state.matches.navigate_up(),
        (MenuItem::Matches, Char('f'), _) => {
            let filter = guard.cycle_filter();
            drop(guard);
            let _ = network_requests
                .send(NetworkRequest::LoadMatches { filter })
                .await;
            return;
        }
        (MenuItem::Matches, KeyCode::Enter, _) => {
            if let Some(id) = guard.state.matches.selected_match().map(|m| m.id.clone()) {
                let id = guard.open_match(id);
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::ResolveMatch { id })
                    .await;
                return;
            }
        }

        // Live ticker navigation
        (MenuItem::Live, Char('j') | KeyCode::Down, _) => guard.state.ticker.navigate_down(),
        (MenuItem::Live, Char('k') | KeyCode::Up, _) => guard.state.ticker.navigate_up(),
        (MenuItem::Live, KeyCode::Enter, _) => {
            if let Some(id) = guard.state.ticker.selected_match().map(|m| m.id.clone()) {
                let id = guard.open_match(id);
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::ResolveMatch { id })
                    .await;
                return;
            }
        }

        // Detail navigation
        (MenuItem::Detail, Char('j') | KeyCode::Down, _) => {
            guard.state.detail.scroll_offset = guard.state.detail.scroll_offset.saturating_add(1);
        }
        (MenuItem::Detail, Char('k') | KeyCode::Up, _) => {
            guard.state.detail.scroll_offset = guard.state.detail.scroll_offset.saturating_sub(1);
        }
        (MenuItem::Detail, Char('s'), _) => {
            activate_section(guard, network_requests, DetailTab::Scorecard).await;
            return;
        }
        (MenuItem::Detail, Char('h'), _) => {
            activate_section(guard, network_requests, DetailTab::HistoricalScorecard).await;
            return;
        }
        (MenuItem::Detail, Char('c'), KeyModifiers::NONE) => {
            activate_section(guard, network_requests, DetailTab::Commentary).await;
            return;
        }
        (MenuItem::Detail, Char('o'), _) => {
            activate_section(guard, network_requests, DetailTab::Overs).await;
            return;
        }
        (MenuItem::Detail, Char('r'), _) => {
            if let Some((match_id, seq)) = guard.begin_sync(true) {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::SyncMatch { match_id, seq, manual: true })
                    .await;
                return;
            }
        }
        (MenuItem::Detail, KeyCode::Esc, _) => guard.close_detail(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

/// Switch the detail sub-tab and fetch whichever of its sections are not
/// already cached or in flight.
async fn activate_section(
    mut guard: tokio::sync::MutexGuard<'_, App>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    tab: DetailTab,
) {
    if !guard.state.detail.is_open() {
        return;
    }
    let match_id = match guard.state.detail.match_id.clone() {
        Some(id) => id,
        None => return,
    };
    let wanted = guard.state.detail.activate_section(tab);
    drop(guard);
    for tab in wanted {
        let _ = network_requests
            .send(NetworkRequest::LoadSection { match_id: match_id.clone(), tab })
            .await;
    }
}
