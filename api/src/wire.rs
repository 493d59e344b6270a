//! Wire types for the cricket scores API.
//!
//! The backend aggregates several upstream providers and payload generations,
//! so every field is optional and anything that has been observed as either
//! an object or a bare scalar is an untagged enum. Extraction into the clean
//! domain model lives in `extract`.

use serde::Deserialize;
use serde_json::Value;

/// One match as any endpoint returns it. Identifiers vary by generation:
/// `matchId` (provider id), `id`, or Mongo's `_id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatch {
    pub match_id: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,

    pub title: Option<String>,
    pub short_title: Option<String>,
    pub name: Option<String>,

    #[serde(default)]
    pub teams: Vec<WireTeam>,
    pub team1: Option<WireTeam>,
    pub team2: Option<WireTeam>,

    pub status: Option<String>,
    pub match_status: Option<String>,
    pub is_live: Option<bool>,

    pub format: Option<String>,
    pub match_format: Option<String>,

    pub venue: Option<VenueField>,
    pub start_date: Option<StartDate>,

    pub series: Option<SeriesField>,
    pub series_name: Option<String>,
    pub tournament: Option<String>,

    pub result: Option<WireResult>,

    pub scorecard: Option<ScorecardField>,
    pub historical_scorecard: Option<Value>,
    pub commentary: Option<Value>,
    pub overs: Option<Value>,

    /// Unprocessed upstream blob kept verbatim by the backend.
    pub raw: Option<WireLegacy>,
}

impl RawMatch {
    pub fn has_id(&self, id: &str) -> bool {
        self.match_id.as_deref() == Some(id)
            || self.id.as_deref() == Some(id)
            || self.mongo_id.as_deref() == Some(id)
    }

    pub fn any_id(&self) -> Option<&str> {
        self.match_id
            .as_deref()
            .or(self.id.as_deref())
            .or(self.mongo_id.as_deref())
    }
}

/// Team descriptor. Older payloads use lowercase `teamname`; the structured
/// ones use `teamName`/`teamSName`; Mongo documents use `name`/`shortName`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    #[serde(alias = "teamname")]
    pub team_name: Option<String>,
    pub team_s_name: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub team_short_name: Option<String>,
    pub score: Option<ScoreField>,
    pub image_id: Option<Value>,
}

/// Score slot on a team entry: a structured object, or the legacy
/// `"runs=245; wickets=6; overs=43.2; runRate=5.66"` string encoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScoreField {
    Structured(WireScore),
    Text(String),
    Other(Value),
}

/// Numeric field that upstream sometimes sends as a string or null.
/// Anything non-numeric coerces to zero at extraction time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireNum {
    Num(f64),
    Other(Value),
}

impl WireNum {
    pub fn as_f64(&self) -> f64 {
        match self {
            WireNum::Num(n) => *n,
            WireNum::Other(v) => v.as_str().and_then(|s| s.trim().parse().ok()).unwrap_or(0.0),
        }
    }
}

/// Structured score. The compact legacy form abbreviates to `r`/`w`/`o`/`rr`;
/// scorecard innings entries may carry `score` instead of `runs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireScore {
    #[serde(alias = "r")]
    pub runs: Option<WireNum>,
    #[serde(alias = "w")]
    pub wickets: Option<WireNum>,
    #[serde(alias = "o")]
    pub overs: Option<WireNum>,
    #[serde(alias = "rr")]
    pub run_rate: Option<WireNum>,
    pub score: Option<WireNum>,
}

/// `scorecard` is `{ "scorecard": [innings, ...] }` when the backend has
/// processed the match, and arbitrary provider JSON otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScorecardField {
    Innings(WireScorecard),
    Other(Value),
}

impl ScorecardField {
    pub fn innings(&self) -> &[WireScore] {
        match self {
            ScorecardField::Innings(sc) => &sc.scorecard,
            ScorecardField::Other(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireScorecard {
    #[serde(default)]
    pub scorecard: Vec<WireScore>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VenueField {
    Object(WireVenue),
    Text(String),
    Other(Value),
}

impl VenueField {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            VenueField::Object(v) => v.name.as_deref().or(v.ground.as_deref()),
            VenueField::Text(s) => Some(s.as_str()),
            VenueField::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVenue {
    pub name: Option<String>,
    pub ground: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SeriesField {
    Object(WireSeries),
    Text(String),
    Other(Value),
}

impl SeriesField {
    pub fn name(&self) -> Option<&str> {
        match self {
            SeriesField::Object(s) => s.name.as_deref(),
            SeriesField::Text(s) => Some(s.as_str()),
            SeriesField::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireSeries {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResult {
    pub result_text: Option<String>,
    pub winning_team: Option<String>,
}

/// Start timestamp: RFC 3339 string or epoch milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StartDate {
    Millis(i64),
    Text(String),
    Other(Value),
}

/// The verbatim upstream blob under `raw`. Key casing here predates the
/// backend's camelCase normalisation, hence the lowercase aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLegacy {
    pub match_info: Option<WireLegacyInfo>,
    pub match_score: Option<WireMatchScore>,
    #[serde(alias = "venueinfo")]
    pub venue_info: Option<WireVenue>,
    #[serde(alias = "matchformat")]
    pub match_format: Option<String>,
    pub venue: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "shortstatus")]
    pub short_status: Option<String>,
    #[serde(alias = "tossstatus")]
    pub toss_status: Option<String>,
    pub team1: Option<WireTeam>,
    pub team2: Option<WireTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLegacyInfo {
    pub team1: Option<WireTeam>,
    pub team2: Option<WireTeam>,
    pub match_format: Option<String>,
    pub match_type: Option<String>,
    pub venue_info: Option<WireVenue>,
    pub venue: Option<String>,
    pub status: Option<String>,
    pub state: Option<String>,
    pub series_name: Option<String>,
    pub tour: Option<String>,
    pub match_desc: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMatchScore {
    #[serde(alias = "t1s")]
    pub team1_score: Option<WireScore>,
    #[serde(alias = "t2s")]
    pub team2_score: Option<WireScore>,
}

/// Match list endpoints return either a bare array or `{ "matches": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MatchListResponse {
    List(Vec<RawMatch>),
    Wrapped {
        #[serde(default)]
        matches: Vec<RawMatch>,
    },
}

impl MatchListResponse {
    pub fn into_vec(self) -> Vec<RawMatch> {
        match self {
            MatchListResponse::List(matches) => matches,
            MatchListResponse::Wrapped { matches } => matches,
        }
    }
}

/// `POST /api/matches/{id}/sync-details` response. `match` is the refreshed
/// document when the backend managed to pull fresh data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncResponse {
    #[serde(rename = "match")]
    pub match_data: Option<Box<RawMatch>>,
    pub message: Option<String>,
}

/// `GET /api/health` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: Option<String>,
    pub timestamp: Option<String>,
    pub environment: Option<String>,
    pub api_url: Option<String>,
    pub message: Option<String>,
}
