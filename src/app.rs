use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, MatchFilter};
use chrono::Local;
use cricket_api::wire::RawMatch;
use cricket_api::{DetailTab, MatchSource, PhaseHint, extract};
use log::{debug, warn};
use serde_json::Value;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Matches,
    Live,
    Detail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self { state: AppState::new(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_health_checked(&mut self, healthy: bool, detail: String) {
        self.state.backend = crate::state::app_state::BackendStatus {
            checked: true,
            healthy,
            detail,
        };
    }

    pub fn on_matches_loaded(&mut self, filter: MatchFilter, raws: Vec<RawMatch>) {
        // The user may have cycled the filter while this load was in flight.
        if filter != self.state.matches.filter {
            debug!("discarding stale {} list", filter.label());
            return;
        }
        let hint = filter.hint();
        let matches = raws
            .iter()
            .map(|r| extract::extract_with_hint(r, hint))
            .collect();
        self.state
            .matches
            .load(matches, Local::now().format("%H:%M:%S").to_string());
    }

    pub fn on_matches_failed(&mut self, filter: MatchFilter, message: String) {
        if filter != self.state.matches.filter {
            return;
        }
        warn!("{} list load failed: {message}", filter.label());
        self.state.matches.error = Some(message);
    }

    pub fn on_live_ticker_loaded(&mut self, raws: Vec<RawMatch>) {
        let matches = raws
            .iter()
            .map(|r| extract::extract_with_hint(r, Some(PhaseHint::Live)))
            .collect();
        self.state.ticker.load(matches);
    }

    pub fn on_live_ticker_failed(&mut self, message: String) {
        warn!("live ticker refresh failed: {message}");
        self.state.ticker.load(Vec::new());
    }

    /// Apply a resolved match document. Returns false when the detail view
    /// has moved on to another match in the meantime.
    pub fn on_match_resolved(&mut self, id: &str, source: MatchSource, raw: &RawMatch) -> bool {
        if !self.state.detail.shows(id) {
            debug!("discarding resolution for {id}: detail view moved on");
            return false;
        }
        self.state.last_error = None;

        let detail = &mut self.state.detail;
        detail.source = Some(source);
        detail.not_found = false;
        detail.upcoming_fixture = source == MatchSource::Upcoming && raw.scorecard.is_none();
        detail.seed_sections(raw);
        detail.summary = Some(extract::extract_with_hint(raw, source_hint(source)));
        true
    }

    pub fn on_match_not_found(&mut self, id: &str) {
        if self.state.detail.shows(id) {
            self.state.detail.not_found = true;
        }
    }

    pub fn on_section_loaded(&mut self, match_id: &str, tab: DetailTab, data: Value) {
        if self.state.detail.shows(match_id) {
            self.state.detail.store_section(tab, data);
        }
    }

    pub fn on_section_failed(&mut self, match_id: &str, tab: DetailTab, message: String) {
        if self.state.detail.shows(match_id) {
            warn!("{} load failed for {match_id}: {message}", tab.path());
            self.state.detail.fail_section(tab, message);
        }
    }

    /// Start a sync for the open match: bumps the fence sequence and, for
    /// manual syncs, raises the blocking notice.
    pub fn begin_sync(&mut self, manual: bool) -> Option<(String, u64)> {
        let id = self.state.detail.match_id.clone()?;
        let seq = self.state.detail.next_seq();
        self.state.detail.syncing = true;
        if manual {
            self.state.detail.notice = Some("Refreshing match data...".into());
        }
        Some((id, seq))
    }

    pub fn on_sync_completed(
        &mut self,
        id: &str,
        seq: u64,
        manual: bool,
        raw: Option<&RawMatch>,
        message: Option<String>,
    ) -> bool {
        if !self.state.detail.should_apply_sync(id, seq) {
            debug!("discarding sync #{seq} for {id}: stale or foreign");
            return false;
        }
        self.state.detail.mark_sync_applied(seq);

        if let Some(raw) = raw {
            let hint = self.state.detail.source.and_then(source_hint);
            self.state.detail.seed_sections(raw);
            self.state.detail.summary = Some(extract::extract_with_hint(raw, hint));
        }
        self.state.detail.last_synced = Some(Local::now().format("%H:%M:%S").to_string());

        if manual {
            self.state.detail.notice =
                Some(message.unwrap_or_else(|| "Match data refreshed".into()));
        }
        true
    }

    pub fn on_sync_failed(&mut self, id: &str, manual: bool, message: String) -> bool {
        if !self.state.detail.shows(id) {
            return false;
        }
        self.state.detail.syncing = false;
        if manual {
            self.state.detail.notice = Some(format!("Sync failed: {message}"));
        } else {
            warn!("background sync failed for {id}: {message}");
        }
        true
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Detail page lifecycle
    // -----------------------------------------------------------------------

    /// Open the detail view for a match and return its id for resolution.
    pub fn open_match(&mut self, id: String) -> String {
        self.update_tab(MenuItem::Detail);
        self.state.detail.open(id.clone());
        id
    }

    /// Esc from the detail view: drop all detail state (which also stops the
    /// refresher from auto-syncing) and go back to the match list.
    pub fn close_detail(&mut self) {
        self.state.detail.close();
        self.update_tab(MenuItem::Matches);
    }

    pub fn cycle_filter(&mut self) -> MatchFilter {
        let next = self.state.matches.filter.next();
        self.state.matches.filter = next;
        self.state.matches.error = None;
        self.state.matches.selected = 0;
        next
    }

    /// True when the periodic refresher should auto-sync the open match.
    pub fn wants_auto_sync(&self) -> bool {
        self.state.detail.is_open()
            && self
                .state
                .detail
                .summary
                .as_ref()
                .is_some_and(|s| s.is_live())
    }

    pub fn dismiss_notice(&mut self) {
        self.state.detail.notice = None;
    }
}

fn source_hint(source: MatchSource) -> Option<PhaseHint> {
    match source {
        MatchSource::Main => None,
        MatchSource::Upcoming => Some(PhaseHint::Upcoming),
        MatchSource::Live => Some(PhaseHint::Live),
        MatchSource::Recent => Some(PhaseHint::Completed),
    }
}
