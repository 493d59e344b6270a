pub mod client;
pub mod extract;
pub mod wire;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the upstream wire format
// ---------------------------------------------------------------------------

/// One team's innings line. `0/0` is also the "no data yet" state; the
/// extraction waterfall treats an all-zero score as unresolved and lets a
/// later source fill it in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Score {
    pub runs: u32,
    pub wickets: u32,
    pub overs: f64,
    pub run_rate: f64,
}

impl Score {
    pub fn is_unresolved(&self) -> bool {
        self.runs == 0 && self.wickets == 0
    }

    /// "245/6" line as shown on every card.
    pub fn line(&self) -> String {
        format!("{}/{}", self.runs, self.wickets)
    }

    pub fn overs_line(&self) -> String {
        format!("({:.1} ov)", self.overs)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSide {
    pub name: String,
    pub short_name: String,
    pub score: Score,
    pub image_id: Option<String>,
}

impl TeamSide {
    /// Up to three uppercase initials, used in place of a team flag image.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(3)
            .collect::<String>()
            .to_uppercase()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPhase {
    Live,
    Upcoming,
    Completed,
    #[default]
    Unknown,
}

/// Result of the single classification pass over a match payload. `label` is
/// what gets printed; `phase` drives colours, polling and score visibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusInfo {
    pub phase: MatchPhase,
    pub label: String,
}

/// Trusted phase carried by the endpoint a match came from. A hint beats any
/// amount of status-text sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseHint {
    Live,
    Upcoming,
    Completed,
}

/// Which endpoint the detail page resolved a match from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Main,
    Upcoming,
    Live,
    Recent,
}

impl MatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchSource::Main => "main",
            MatchSource::Upcoming => "upcoming",
            MatchSource::Live => "live",
            MatchSource::Recent => "recent",
        }
    }
}

/// Lazily-loaded detail sections. `HistoricalScorecard` is fetched as a
/// companion whenever the scorecard section is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DetailTab {
    #[default]
    Scorecard,
    HistoricalScorecard,
    Commentary,
    Overs,
}

impl DetailTab {
    pub fn path(&self) -> &'static str {
        match self {
            DetailTab::Scorecard => "scorecard",
            DetailTab::HistoricalScorecard => "historical-scorecard",
            DetailTab::Commentary => "commentary",
            DetailTab::Overs => "overs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Scorecard => "Scorecard",
            DetailTab::HistoricalScorecard => "Historical",
            DetailTab::Commentary => "Commentary",
            DetailTab::Overs => "Overs",
        }
    }
}

/// Normalised view of one match, produced by `extract::extract` regardless of
/// which endpoint or payload generation it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSummary {
    pub id: String,
    pub title: String,
    pub series: String,
    pub team1: TeamSide,
    pub team2: TeamSide,
    pub status: StatusInfo,
    pub format: String,
    pub venue: String,
    pub date: String,
    pub time: String,
    pub start_time: Option<DateTime<Utc>>,
    pub result_text: Option<String>,
    pub toss_status: Option<String>,
}

impl MatchSummary {
    pub fn is_live(&self) -> bool {
        self.status.phase == MatchPhase::Live
    }

    /// Single gate for score visibility: live and completed matches always
    /// show scores, and a resolved score is shown even when classification
    /// came back Unknown.
    pub fn should_show_scores(&self) -> bool {
        matches!(
            self.status.phase,
            MatchPhase::Live | MatchPhase::Completed
        ) || !self.team1.score.is_unresolved()
            || !self.team2.score.is_unresolved()
    }
}
