use crate::app::MenuItem;
use cricket_api::wire::RawMatch;
use cricket_api::{DetailTab, MatchSource, MatchSummary, PhaseHint};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Filter cycled with `f` on the Matches tab. The first three map to the
/// list endpoints (and carry a trusted phase hint); the rest use the
/// format-filtered matches endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchFilter {
    #[default]
    Live,
    Upcoming,
    Recent,
    T20,
    Odi,
    Test,
}

impl MatchFilter {
    pub fn label(&self) -> &'static str {
        match self {
            MatchFilter::Live => "Live",
            MatchFilter::Upcoming => "Upcoming",
            MatchFilter::Recent => "Recent",
            MatchFilter::T20 => "T20",
            MatchFilter::Odi => "ODI",
            MatchFilter::Test => "Test",
        }
    }

    pub fn format_param(&self) -> &'static str {
        match self {
            MatchFilter::T20 => "T20",
            MatchFilter::Odi => "ODI",
            MatchFilter::Test => "TEST",
            // List filters never hit the format endpoint.
            _ => "",
        }
    }

    /// Phase implied by the endpoint itself.
    pub fn hint(&self) -> Option<PhaseHint> {
        match self {
            MatchFilter::Live => Some(PhaseHint::Live),
            MatchFilter::Upcoming => Some(PhaseHint::Upcoming),
            MatchFilter::Recent => Some(PhaseHint::Completed),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            MatchFilter::Live => MatchFilter::Upcoming,
            MatchFilter::Upcoming => MatchFilter::Recent,
            MatchFilter::Recent => MatchFilter::T20,
            MatchFilter::T20 => MatchFilter::Odi,
            MatchFilter::Odi => MatchFilter::Test,
            MatchFilter::Test => MatchFilter::Live,
        }
    }
}

#[derive(Debug, Default)]
pub struct MatchListState {
    pub filter: MatchFilter,
    pub matches: Vec<MatchSummary>,
    pub selected: usize,
    pub error: Option<String>,
    pub loaded_at: Option<String>,
}

impl MatchListState {
    pub fn load(&mut self, matches: Vec<MatchSummary>, loaded_at: String) {
        self.matches = matches;
        self.error = None;
        self.loaded_at = Some(loaded_at);
        if self.selected >= self.matches.len() {
            self.selected = self.matches.len().saturating_sub(1);
        }
    }

    pub fn navigate_down(&mut self) {
        if self.selected + 1 < self.matches.len() {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_match(&self) -> Option<&MatchSummary> {
        self.matches.get(self.selected)
    }
}

#[derive(Debug, Default)]
pub struct TickerState {
    pub matches: Vec<MatchSummary>,
    pub selected: usize,
    pub loaded: bool,
}

impl TickerState {
    pub fn load(&mut self, matches: Vec<MatchSummary>) {
        self.matches = matches;
        self.loaded = true;
        if self.selected >= self.matches.len() {
            self.selected = self.matches.len().saturating_sub(1);
        }
    }

    pub fn navigate_down(&mut self) {
        if self.selected + 1 < self.matches.len() {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_match(&self) -> Option<&MatchSummary> {
        self.matches.get(self.selected)
    }
}

#[derive(Debug, Default)]
pub struct BackendStatus {
    pub checked: bool,
    pub healthy: bool,
    pub detail: String,
}

/// State behind the Match Detail tab: resolved summary, lazily-fetched
/// sections, and the sync fence.
#[derive(Debug, Default)]
pub struct DetailState {
    pub match_id: Option<String>,
    pub source: Option<MatchSource>,
    pub summary: Option<MatchSummary>,
    pub not_found: bool,
    /// Resolved from the upcoming list with no scorecard: render a fixture
    /// card rather than empty score panels.
    pub upcoming_fixture: bool,
    pub active_tab: DetailTab,
    pub scroll_offset: u16,
    pub syncing: bool,
    pub last_synced: Option<String>,
    /// Modal message for manual syncs; dismissed by the next keypress.
    pub notice: Option<String>,
    sections: HashMap<DetailTab, Value>,
    section_errors: HashMap<DetailTab, String>,
    pending: HashSet<DetailTab>,
    next_seq: u64,
    applied_seq: u64,
}

impl DetailState {
    /// Opening always starts from scratch, even for the id already shown;
    /// match documents go stale quickly enough that a fresh resolve is the
    /// right default. The sync counters survive the reset: `applied_seq`
    /// jumps to the last issued sequence, so a response still in flight
    /// from a previous viewing can never apply after a reopen.
    pub fn open(&mut self, id: String) {
        *self = DetailState {
            match_id: Some(id),
            next_seq: self.next_seq,
            applied_seq: self.next_seq,
            ..Default::default()
        };
    }

    pub fn close(&mut self) {
        *self = DetailState {
            next_seq: self.next_seq,
            applied_seq: self.next_seq,
            ..Default::default()
        };
    }

    pub fn is_open(&self) -> bool {
        self.match_id.is_some()
    }

    pub fn shows(&self, id: &str) -> bool {
        self.match_id.as_deref() == Some(id)
    }

    pub fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// A sync response may be applied only when the detail view still shows
    /// the same match and no newer response has already landed.
    pub fn should_apply_sync(&self, id: &str, seq: u64) -> bool {
        self.shows(id) && seq > self.applied_seq
    }

    pub fn mark_sync_applied(&mut self, seq: u64) {
        self.applied_seq = seq;
        self.syncing = false;
    }

    /// Pull section payloads the resolved document already carries, so tab
    /// activation doesn't refetch what we were just handed.
    pub fn seed_sections(&mut self, raw: &RawMatch) {
        for (tab, value) in [
            (DetailTab::HistoricalScorecard, &raw.historical_scorecard),
            (DetailTab::Commentary, &raw.commentary),
            (DetailTab::Overs, &raw.overs),
        ] {
            if let Some(v) = value {
                self.sections.insert(tab, v.clone());
            }
        }
    }

    pub fn section(&self, tab: DetailTab) -> Option<&Value> {
        self.sections.get(&tab)
    }

    pub fn section_error(&self, tab: DetailTab) -> Option<&str> {
        self.section_errors.get(&tab).map(String::as_str)
    }

    pub fn section_pending(&self, tab: DetailTab) -> bool {
        self.pending.contains(&tab)
    }

    pub fn store_section(&mut self, tab: DetailTab, data: Value) {
        self.pending.remove(&tab);
        self.section_errors.remove(&tab);
        self.sections.insert(tab, data);
    }

    pub fn fail_section(&mut self, tab: DetailTab, message: String) {
        self.pending.remove(&tab);
        self.section_errors.insert(tab, message);
    }

    /// Activate a section tab and return what needs fetching: nothing when
    /// cached or already in flight. Opening the scorecard also pulls the
    /// historical scorecard as a companion.
    pub fn activate_section(&mut self, tab: DetailTab) -> Vec<DetailTab> {
        self.active_tab = tab;
        self.scroll_offset = 0;
        if self.match_id.is_none() {
            return Vec::new();
        }

        let mut wanted = vec![tab];
        if tab == DetailTab::Scorecard {
            wanted.push(DetailTab::HistoricalScorecard);
        }
        wanted.retain(|t| !self.sections.contains_key(t) && !self.pending.contains(t));
        for t in &wanted {
            self.pending.insert(*t);
        }
        wanted
    }
}

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub backend: BackendStatus,
    pub matches: MatchListState,
    pub ticker: TickerState,
    pub detail: DetailState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            backend: BackendStatus::default(),
            matches: MatchListState::default(),
            ticker: TickerState::default(),
            detail: DetailState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_cycle_covers_all_and_wraps() {
        let mut filter = MatchFilter::Live;
        let mut seen = vec![filter];
        for _ in 0..5 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(filter.next(), MatchFilter::Live);
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn sync_fence_rejects_older_and_foreign_sequences() {
        let mut detail = DetailState::default();
        detail.open("m1".into());
        let first = detail.next_seq();
        let second = detail.next_seq();

        assert!(detail.should_apply_sync("m1", second));
        detail.mark_sync_applied(second);

        // The older in-flight sync lands afterwards: discarded.
        assert!(!detail.should_apply_sync("m1", first));
        // A response for a different match never applies.
        let third = detail.next_seq();
        assert!(!detail.should_apply_sync("m2", third));
    }

    #[test]
    fn reopening_clears_sections_but_keeps_the_fence_monotonic() {
        let mut detail = DetailState::default();
        detail.open("m1".into());
        detail.store_section(DetailTab::Commentary, json!({"lines": []}));
        let seq = detail.next_seq();
        detail.mark_sync_applied(seq);

        detail.open("m1".into());
        assert!(detail.section(DetailTab::Commentary).is_none());
        // Pre-reopen sequences are fenced off; new syncs start above them.
        assert!(!detail.should_apply_sync("m1", seq));
        let fresh = detail.next_seq();
        assert!(detail.should_apply_sync("m1", fresh));
    }

    #[test]
    fn sync_from_a_previous_viewing_cannot_apply_after_reopen() {
        let mut detail = DetailState::default();
        detail.open("m1".into());
        let mut in_flight = 0;
        for _ in 0..5 {
            in_flight = detail.next_seq();
        }

        detail.close();
        detail.open("m1".into());

        // The slow pre-reopen response lands now: same id, stale viewing.
        assert!(!detail.should_apply_sync("m1", in_flight));

        // A sync issued after the reopen outranks everything before it.
        let fresh = detail.next_seq();
        assert!(detail.should_apply_sync("m1", fresh));
        detail.mark_sync_applied(fresh);
        assert!(!detail.should_apply_sync("m1", in_flight));
    }

    #[test]
    fn scorecard_activation_requests_historical_companion() {
        let mut detail = DetailState::default();
        detail.open("m1".into());
        let wanted = detail.activate_section(DetailTab::Scorecard);
        assert_eq!(wanted, vec![DetailTab::Scorecard, DetailTab::HistoricalScorecard]);
    }

    #[test]
    fn activation_skips_cached_and_inflight_sections() {
        let mut detail = DetailState::default();
        detail.open("m1".into());

        // First activation marks both in flight; a second asks for nothing.
        assert_eq!(detail.activate_section(DetailTab::Scorecard).len(), 2);
        assert!(detail.activate_section(DetailTab::Scorecard).is_empty());

        detail.store_section(DetailTab::Overs, json!([{"over": 1}]));
        assert!(detail.activate_section(DetailTab::Overs).is_empty());
    }

    #[test]
    fn seeded_sections_are_not_refetched() {
        let mut detail = DetailState::default();
        detail.open("m1".into());
        let raw: RawMatch =
            serde_json::from_value(json!({ "matchId": "m1", "commentary": [{"text": "Four!"}] }))
                .unwrap();
        detail.seed_sections(&raw);
        assert!(detail.activate_section(DetailTab::Commentary).is_empty());
    }

    #[test]
    fn section_failure_is_retryable() {
        let mut detail = DetailState::default();
        detail.open("m1".into());
        assert_eq!(detail.activate_section(DetailTab::Commentary).len(), 1);
        detail.fail_section(DetailTab::Commentary, "boom".into());
        assert_eq!(detail.section_error(DetailTab::Commentary), Some("boom"));
        // No longer pending, so activating again refetches.
        assert_eq!(detail.activate_section(DetailTab::Commentary).len(), 1);
    }

    #[test]
    fn list_selection_clamps_when_results_shrink() {
        let mut list = MatchListState::default();
        list.load(vec![MatchSummary::default(); 5], "10:00:00".into());
        list.selected = 4;
        list.load(vec![MatchSummary::default(); 2], "10:00:30".into());
        assert_eq!(list.selected, 1);
    }
}
