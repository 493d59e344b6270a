use crate::state::app_state::MatchFilter;
use crate::state::network::LoadingState;
use cricket_api::wire::RawMatch;
use cricket_api::{DetailTab, MatchSource};
use crossterm::event::KeyEvent;
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadMatches { filter: MatchFilter },
    LoadLiveTicker,
    ResolveMatch { id: String },
    LoadSection { match_id: String, tab: DetailTab },
    /// `seq` fences concurrent syncs: the app applies a response only when
    /// its sequence is newer than the last one applied for this match.
    SyncMatch { match_id: String, seq: u64, manual: bool },
    CheckHealth,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    MatchesLoaded { filter: MatchFilter, matches: Vec<RawMatch> },
    MatchesFailed { filter: MatchFilter, message: String },
    LiveTickerLoaded { matches: Vec<RawMatch> },
    LiveTickerFailed { message: String },
    MatchResolved { id: String, source: MatchSource, raw: Box<RawMatch> },
    MatchNotFound { id: String },
    SectionLoaded { match_id: String, tab: DetailTab, data: Value },
    SectionFailed { match_id: String, tab: DetailTab, message: String },
    SyncCompleted {
        match_id: String,
        seq: u64,
        manual: bool,
        raw: Option<Box<RawMatch>>,
        message: Option<String>,
    },
    SyncFailed { match_id: String, manual: bool, message: String },
    HealthChecked { healthy: bool, detail: String },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshTick,
}
