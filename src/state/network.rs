use crate::state::app_state::MatchFilter;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use cricket_api::DetailTab;
use cricket_api::client::{ApiError, CricketApi};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

/// How many matches the live ticker asks for.
const TICKER_LIMIT: usize = 5;

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: CricketApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: CricketApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request.clone() {
                NetworkRequest::LoadMatches { filter } => self.handle_load_matches(filter).await,
                NetworkRequest::LoadLiveTicker => self.handle_load_ticker().await,
                NetworkRequest::ResolveMatch { id } => self.handle_resolve_match(id).await,
                NetworkRequest::LoadSection { match_id, tab } => {
                    self.handle_load_section(match_id, tab).await
                }
                NetworkRequest::SyncMatch { match_id, seq, manual } => {
                    self.handle_sync_match(match_id, seq, manual).await
                }
                NetworkRequest::CheckHealth => self.handle_check_health().await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| failure_response(request, err));

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_matches(&self, filter: MatchFilter) -> Result<NetworkResponse, ApiError> {
        debug!("loading {} matches", filter.label());
        let matches = match filter {
            MatchFilter::Live => self.client.fetch_live_matches(None).await?,
            MatchFilter::Upcoming => self.client.fetch_upcoming_matches().await?,
            MatchFilter::Recent => self.client.fetch_recent_matches().await?,
            MatchFilter::T20 | MatchFilter::Odi | MatchFilter::Test => {
                self.client.fetch_matches(filter.format_param()).await?
            }
        };
        Ok(NetworkResponse::MatchesLoaded { filter, matches })
    }

    async fn handle_load_ticker(&self) -> Result<NetworkResponse, ApiError> {
        debug!("refreshing live ticker");
        let matches = self.client.fetch_live_matches(Some(TICKER_LIMIT)).await?;
        Ok(NetworkResponse::LiveTickerLoaded { matches })
    }

    async fn handle_resolve_match(&self, id: String) -> Result<NetworkResponse, ApiError> {
        debug!("resolving match {id}");
        let (raw, source) = self.client.resolve_match(&id).await?;
        Ok(NetworkResponse::MatchResolved { id, source, raw: Box::new(raw) })
    }

    async fn handle_load_section(
        &self,
        match_id: String,
        tab: DetailTab,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("loading {} for match {match_id}", tab.path());
        let data = self.client.fetch_section(&match_id, tab.path()).await?;
        Ok(NetworkResponse::SectionLoaded { match_id, tab, data })
    }

    async fn handle_sync_match(
        &self,
        match_id: String,
        seq: u64,
        manual: bool,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("sync #{seq} for match {match_id} (manual: {manual})");
        let synced = self.client.sync_details(&match_id).await?;
        Ok(NetworkResponse::SyncCompleted {
            match_id,
            seq,
            manual,
            raw: synced.match_data,
            message: synced.message,
        })
    }

    async fn handle_check_health(&self) -> Result<NetworkResponse, ApiError> {
        debug!("checking backend health");
        let health = self.client.fetch_health().await?;
        let healthy = health
            .status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("ok") || s.eq_ignore_ascii_case("healthy"))
            .unwrap_or(false);
        let detail = health.environment.unwrap_or_default();
        Ok(NetworkResponse::HealthChecked { healthy, detail })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// Route a failure back to the piece of state that asked for the work, so a
/// broken list load or section fetch shows up in its own pane instead of a
/// global error banner.
fn failure_response(request: NetworkRequest, err: ApiError) -> NetworkResponse {
    match request {
        NetworkRequest::LoadMatches { filter } => {
            NetworkResponse::MatchesFailed { filter, message: err.to_string() }
        }
        NetworkRequest::LoadLiveTicker => {
            NetworkResponse::LiveTickerFailed { message: err.to_string() }
        }
        NetworkRequest::ResolveMatch { id } => match err {
            ApiError::NotFound(_) => NetworkResponse::MatchNotFound { id },
            other => NetworkResponse::Error { message: other.to_string() },
        },
        NetworkRequest::LoadSection { match_id, tab } => {
            NetworkResponse::SectionFailed { match_id, tab, message: err.to_string() }
        }
        NetworkRequest::SyncMatch { match_id, manual, .. } => {
            NetworkResponse::SyncFailed { match_id, manual, message: err.to_string() }
        }
        NetworkRequest::CheckHealth => {
            NetworkResponse::HealthChecked { healthy: false, detail: err.to_string() }
        }
    }
}
