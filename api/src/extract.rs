//! Field extraction and status classification.
//!
//! Match payloads arrive in at least three generations of shape (structured
//! `teams[]`, Mongo documents, and the verbatim upstream blob under `raw`).
//! Everything here is a pure waterfall over `RawMatch`: try the best source
//! first and fall through until something yields a usable value. Extraction
//! never fails; a payload with nothing usable produces placeholders.

use crate::wire::{RawMatch, ScoreField, StartDate, WireScore, WireTeam};
use crate::{MatchPhase, MatchSummary, PhaseHint, Score, StatusInfo, TeamSide};
use chrono::{DateTime, TimeZone, Utc};

const COMPLETED_WORDS: &[&str] = &[
    "complete", "finished", "won", "abandon", "cancel", "no result", "tied",
];
const LIVE_WORDS: &[&str] = &[
    "live",
    "in progress",
    "innings break",
    "rain delay",
    "tea break",
    "lunch break",
    "drinks break",
];
const UPCOMING_WORDS: &[&str] = &["upcoming", "scheduled", "starts at", "match starts"];

/// Normalise one raw match into the domain model.
pub fn extract(raw: &RawMatch) -> MatchSummary {
    extract_with_hint(raw, None)
}

/// Total variant of [`extract`] for call sites holding an optional document:
/// a missing match yields the all-placeholder summary.
pub fn extract_or_default(raw: Option<&RawMatch>) -> MatchSummary {
    match raw {
        Some(raw) => extract(raw),
        None => extract(&RawMatch::default()),
    }
}

/// Like [`extract`], with a phase hint from the endpoint the match came from
/// (the live list only carries live matches, etc).
pub fn extract_with_hint(raw: &RawMatch, hint: Option<PhaseHint>) -> MatchSummary {
    let team1 = team_side(raw, 0);
    let team2 = team_side(raw, 1);
    let start_time = start_time(raw);

    MatchSummary {
        id: raw.any_id().unwrap_or_default().to_owned(),
        title: title(raw, &team1.name, &team2.name),
        series: series(raw),
        status: classify(raw, hint),
        format: format_name(raw),
        venue: venue(raw),
        date: start_time
            .map(|t| t.format("%d %b %Y").to_string())
            .unwrap_or_else(|| "TBA".into()),
        time: start_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "TBA".into()),
        start_time,
        result_text: result_text(raw),
        toss_status: raw.raw.as_ref().and_then(|r| r.toss_status.clone()),
        team1,
        team2,
    }
}

/// Single classification pass. Priority: endpoint hint, then completed
/// vocabulary, then live vocabulary (or the `isLive` flag), then upcoming
/// vocabulary. Completed is checked first so "Match abandoned due to rain"
/// never reads as live off the word "rain".
pub fn classify(raw: &RawMatch, hint: Option<PhaseHint>) -> StatusInfo {
    if let Some(hint) = hint {
        let (phase, label) = match hint {
            PhaseHint::Live => (MatchPhase::Live, "LIVE"),
            PhaseHint::Upcoming => (MatchPhase::Upcoming, "UPCOMING"),
            PhaseHint::Completed => (MatchPhase::Completed, "COMPLETED"),
        };
        return StatusInfo { phase, label: label.into() };
    }

    let text = status_text(raw).unwrap_or_default();
    let lower = text.to_lowercase();

    if COMPLETED_WORDS.iter().any(|w| lower.contains(w)) {
        let label = if lower.contains("abandon") {
            "ABANDONED"
        } else if lower.contains("cancel") {
            "CANCELLED"
        } else if lower.contains("no result") {
            "NO RESULT"
        } else if lower.contains("tied") {
            "TIED"
        } else {
            "COMPLETED"
        };
        return StatusInfo { phase: MatchPhase::Completed, label: label.into() };
    }

    if raw.is_live == Some(true) || LIVE_WORDS.iter().any(|w| lower.contains(w)) {
        return StatusInfo { phase: MatchPhase::Live, label: "LIVE".into() };
    }

    if UPCOMING_WORDS.iter().any(|w| lower.contains(w)) {
        return StatusInfo { phase: MatchPhase::Upcoming, label: "UPCOMING".into() };
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        StatusInfo { phase: MatchPhase::Unknown, label: "UPCOMING".into() }
    } else {
        StatusInfo { phase: MatchPhase::Unknown, label: trimmed.to_owned() }
    }
}

fn status_text(raw: &RawMatch) -> Option<String> {
    raw.status
        .clone()
        .or_else(|| raw.match_status.clone())
        .or_else(|| raw.raw.as_ref().and_then(|r| r.status.clone()))
        .or_else(|| {
            raw.raw
                .as_ref()
                .and_then(|r| r.match_info.as_ref())
                .and_then(|mi| mi.status.clone().or_else(|| mi.state.clone()))
        })
        .filter(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

fn team_side(raw: &RawMatch, idx: usize) -> TeamSide {
    let name = team_name(raw, idx);
    let mut side = TeamSide {
        short_name: team_short_name(raw, idx),
        score: team_score(raw, idx),
        image_id: team_image_id(raw, idx),
        name,
    };
    if side.short_name.is_empty() {
        side.short_name = side.initials();
    }
    side
}

fn descriptor_name(t: &WireTeam) -> Option<String> {
    t.team_name
        .clone()
        .or_else(|| t.team_s_name.clone())
        .or_else(|| t.name.clone())
        .or_else(|| t.short_name.clone())
        .filter(|s| !s.trim().is_empty())
}

fn descriptor_short(t: &WireTeam) -> Option<String> {
    t.team_s_name
        .clone()
        .or_else(|| t.team_short_name.clone())
        .or_else(|| t.short_name.clone())
        .filter(|s| !s.trim().is_empty())
}

fn flat_team(raw: &RawMatch, idx: usize) -> Option<&WireTeam> {
    if idx == 0 { raw.team1.as_ref() } else { raw.team2.as_ref() }
}

fn legacy_team(raw: &RawMatch, idx: usize) -> Option<&WireTeam> {
    let legacy = raw.raw.as_ref()?;
    let info = legacy.match_info.as_ref();
    let from_info = info.and_then(|mi| if idx == 0 { mi.team1.as_ref() } else { mi.team2.as_ref() });
    from_info.or(if idx == 0 { legacy.team1.as_ref() } else { legacy.team2.as_ref() })
}

fn team_name(raw: &RawMatch, idx: usize) -> String {
    let placeholder = format!("Team {}", idx + 1);
    [
        raw.teams.get(idx).and_then(descriptor_name),
        legacy_team(raw, idx).and_then(descriptor_name),
        flat_team(raw, idx).and_then(descriptor_name),
        title_segment(raw, idx),
    ]
    .into_iter()
    .flatten()
    .map(|n| n.trim().to_owned())
    // Sources sometimes echo the placeholder back; keep falling through.
    .find(|n| !n.is_empty() && *n != placeholder)
    .unwrap_or(placeholder)
}

fn team_short_name(raw: &RawMatch, idx: usize) -> String {
    raw.teams
        .get(idx)
        .and_then(descriptor_short)
        .or_else(|| legacy_team(raw, idx).and_then(descriptor_short))
        .or_else(|| flat_team(raw, idx).and_then(descriptor_short))
        .unwrap_or_default()
}

/// Split "India vs Australia" (or "... v ...") out of the title when no team
/// descriptor exists anywhere.
fn title_segment(raw: &RawMatch, idx: usize) -> Option<String> {
    let title = raw.title.as_deref().or(raw.short_title.as_deref())?;
    for sep in [" vs ", " v "] {
        if title.contains(sep) {
            return title
                .split(sep)
                .nth(idx)
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty());
        }
    }
    None
}

fn team_image_id(raw: &RawMatch, idx: usize) -> Option<String> {
    let v = raw
        .teams
        .get(idx)
        .and_then(|t| t.image_id.as_ref())
        .or_else(|| flat_team(raw, idx).and_then(|t| t.image_id.as_ref()))?;
    v.as_str()
        .map(str::to_owned)
        .or_else(|| v.as_i64().map(|n| n.to_string()))
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Score waterfall. Each later source is consulted only while the score is
/// still all-zero, and only replaces it when it has something non-zero, so a
/// yet-to-bat side stays 0/0 no matter how many sources describe it.
fn team_score(raw: &RawMatch, idx: usize) -> Score {
    let slot = raw
        .teams
        .get(idx)
        .and_then(|t| t.score.as_ref())
        .or_else(|| flat_team(raw, idx).and_then(|t| t.score.as_ref()));

    let mut score = match slot {
        Some(ScoreField::Structured(ws)) => score_from_wire(ws),
        Some(ScoreField::Text(s)) => parse_score_string(s),
        _ => Score::default(),
    };

    if score.is_unresolved()
        && let Some(entry) = raw.scorecard.as_ref().and_then(|sc| sc.innings().get(idx))
    {
        let parsed = score_from_innings(entry);
        if !parsed.is_unresolved() {
            score = parsed;
        }
    }

    if score.is_unresolved()
        && let Some(ms) = raw.raw.as_ref().and_then(|r| r.match_score.as_ref())
    {
        let side = if idx == 0 { ms.team1_score.as_ref() } else { ms.team2_score.as_ref() };
        if let Some(ws) = side {
            let parsed = score_from_wire(ws);
            if !parsed.is_unresolved() {
                score = parsed;
            }
        }
    }

    score
}

fn score_from_wire(ws: &WireScore) -> Score {
    Score {
        runs: num(&ws.runs) as u32,
        wickets: num(&ws.wickets) as u32,
        overs: num(&ws.overs),
        run_rate: num(&ws.run_rate),
    }
}

/// Innings entries from `scorecard.scorecard[]` carry `score` when `runs` is
/// absent.
fn score_from_innings(ws: &WireScore) -> Score {
    let runs = ws
        .runs
        .as_ref()
        .or(ws.score.as_ref())
        .map(|n| n.as_f64())
        .unwrap_or(0.0);
    Score {
        runs: clamp(runs) as u32,
        wickets: num(&ws.wickets) as u32,
        overs: num(&ws.overs),
        run_rate: num(&ws.run_rate),
    }
}

fn num(n: &Option<crate::wire::WireNum>) -> f64 {
    clamp(n.as_ref().map(|n| n.as_f64()).unwrap_or(0.0))
}

fn clamp(n: f64) -> f64 {
    if n.is_finite() && n > 0.0 { n } else { 0.0 }
}

/// Parse the legacy `"runs=245; wickets=6; overs=43.2; runRate=5.66"` string
/// encoding. A string without a `runs=` token yields an unresolved score.
fn parse_score_string(s: &str) -> Score {
    if !s.contains("runs=") {
        return Score::default();
    }
    Score {
        runs: field_num(s, "runs") as u32,
        wickets: field_num(s, "wickets") as u32,
        overs: field_num(s, "overs"),
        run_rate: field_num(s, "runRate"),
    }
}

fn field_num(s: &str, key: &str) -> f64 {
    let pattern = format!("{key}=");
    let Some(pos) = s.find(&pattern) else {
        return 0.0;
    };
    let rest = &s[pos + pattern.len()..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    clamp(rest[..end].parse().unwrap_or(0.0))
}

// ---------------------------------------------------------------------------
// Everything else
// ---------------------------------------------------------------------------

fn title(raw: &RawMatch, team1: &str, team2: &str) -> String {
    raw.title
        .clone()
        .or_else(|| raw.short_title.clone())
        .or_else(|| raw.name.clone())
        .or_else(|| {
            let mi = raw.raw.as_ref()?.match_info.as_ref()?;
            mi.match_desc
                .clone()
                .or_else(|| mi.title.clone())
                .or_else(|| mi.name.clone())
        })
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("{team1} vs {team2}"))
}

fn series(raw: &RawMatch) -> String {
    raw.series
        .as_ref()
        .and_then(|s| s.name())
        .map(str::to_owned)
        .or_else(|| {
            let mi = raw.raw.as_ref()?.match_info.as_ref()?;
            mi.series_name.clone().or_else(|| mi.tour.clone())
        })
        .or_else(|| raw.series_name.clone())
        .or_else(|| raw.tournament.clone())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Cricket Match".into())
}

fn format_name(raw: &RawMatch) -> String {
    raw.format
        .clone()
        .or_else(|| raw.match_format.clone())
        .or_else(|| raw.raw.as_ref().and_then(|r| r.match_format.clone()))
        .or_else(|| {
            let mi = raw.raw.as_ref()?.match_info.as_ref()?;
            mi.match_format.clone().or_else(|| mi.match_type.clone())
        })
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "T20".into())
}

fn venue(raw: &RawMatch) -> String {
    raw.venue
        .as_ref()
        .and_then(|v| v.display_name())
        .map(str::to_owned)
        .or_else(|| {
            let legacy = raw.raw.as_ref()?;
            legacy
                .venue_info
                .as_ref()
                .and_then(|v| v.ground.clone().or_else(|| v.name.clone()))
                .or_else(|| {
                    let mi = legacy.match_info.as_ref()?;
                    mi.venue_info
                        .as_ref()
                        .and_then(|v| v.ground.clone().or_else(|| v.name.clone()))
                        .or_else(|| mi.venue.clone())
                })
                .or_else(|| legacy.venue.clone())
        })
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Venue TBA".into())
}

fn result_text(raw: &RawMatch) -> Option<String> {
    raw.raw
        .as_ref()
        .and_then(|r| r.short_status.clone())
        .or_else(|| raw.result.as_ref().and_then(|r| r.result_text.clone()))
        .or_else(|| raw.raw.as_ref().and_then(|r| r.status.clone()))
        .or_else(|| {
            raw.result
                .as_ref()
                .and_then(|r| r.winning_team.clone())
                .map(|t| format!("{t} won"))
        })
        .filter(|s| !s.trim().is_empty())
}

fn start_time(raw: &RawMatch) -> Option<DateTime<Utc>> {
    match raw.start_date.as_ref()? {
        StartDate::Millis(ms) => Utc.timestamp_millis_opt(*ms).single(),
        StartDate::Text(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            // Some payloads carry epoch millis as a string.
            .or_else(|| s.parse::<i64>().ok().and_then(|ms| Utc.timestamp_millis_opt(ms).single())),
        StartDate::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: serde_json::Value) -> RawMatch {
        serde_json::from_value(v).expect("payload should deserialize")
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    #[test]
    fn abandoned_status_classifies_completed() {
        let m = raw(json!({ "status": "Match abandoned due to rain" }));
        let status = classify(&m, None);
        assert_eq!(status.phase, MatchPhase::Completed);
        assert_eq!(status.label, "ABANDONED");
    }

    #[test]
    fn completed_vocabulary_beats_live_vocabulary() {
        // "won" outranks "live"-adjacent words in the same sentence.
        let m = raw(json!({ "status": "India won the live thriller" }));
        assert_eq!(classify(&m, None).phase, MatchPhase::Completed);
    }

    #[test]
    fn innings_break_is_live() {
        let m = raw(json!({ "status": "Innings Break" }));
        let status = classify(&m, None);
        assert_eq!(status.phase, MatchPhase::Live);
        assert_eq!(status.label, "LIVE");
    }

    #[test]
    fn is_live_flag_wins_without_status_text() {
        let m = raw(json!({ "isLive": true }));
        assert_eq!(classify(&m, None).phase, MatchPhase::Live);
    }

    #[test]
    fn starts_at_is_upcoming() {
        let m = raw(json!({ "status": "Match starts at 19:30 local" }));
        assert_eq!(classify(&m, None).phase, MatchPhase::Upcoming);
    }

    #[test]
    fn hint_overrides_status_text() {
        let m = raw(json!({ "status": "Australia won by 5 wickets" }));
        let status = classify(&m, Some(PhaseHint::Live));
        assert_eq!(status.phase, MatchPhase::Live);
    }

    #[test]
    fn unrecognised_status_keeps_text_as_label() {
        let m = raw(json!({ "status": "Stumps, day 3" }));
        let status = classify(&m, None);
        assert_eq!(status.phase, MatchPhase::Unknown);
        assert_eq!(status.label, "Stumps, day 3");
    }

    #[test]
    fn empty_payload_defaults_to_upcoming_label() {
        let status = classify(&RawMatch::default(), None);
        assert_eq!(status.phase, MatchPhase::Unknown);
        assert_eq!(status.label, "UPCOMING");
    }

    #[test]
    fn legacy_match_info_state_is_read() {
        let m = raw(json!({ "raw": { "matchInfo": { "state": "In Progress" } } }));
        assert_eq!(classify(&m, None).phase, MatchPhase::Live);
    }

    // -----------------------------------------------------------------------
    // Team names
    // -----------------------------------------------------------------------

    #[test]
    fn structured_teams_array_wins() {
        let m = raw(json!({
            "title": "Wrong vs AlsoWrong",
            "teams": [
                { "teamName": "India", "teamSName": "IND" },
                { "teamName": "Australia", "teamSName": "AUS" },
            ],
        }));
        let s = extract(&m);
        assert_eq!(s.team1.name, "India");
        assert_eq!(s.team2.name, "Australia");
        assert_eq!(s.team1.short_name, "IND");
    }

    #[test]
    fn legacy_lowercase_teamname_is_read() {
        let m = raw(json!({
            "raw": { "matchInfo": { "team1": { "teamname": "England" }, "team2": { "teamname": "Pakistan" } } }
        }));
        let s = extract(&m);
        assert_eq!(s.team1.name, "England");
        assert_eq!(s.team2.name, "Pakistan");
    }

    #[test]
    fn title_split_on_vs_is_the_last_resort() {
        let m = raw(json!({ "title": "New Zealand vs Sri Lanka, 2nd ODI" }));
        let s = extract(&m);
        assert_eq!(s.team1.name, "New Zealand");
        assert_eq!(s.team2.name, "Sri Lanka, 2nd ODI");
    }

    #[test]
    fn title_split_supports_single_v() {
        let m = raw(json!({ "title": "Ireland v Scotland" }));
        let s = extract(&m);
        assert_eq!(s.team1.name, "Ireland");
        assert_eq!(s.team2.name, "Scotland");
    }

    #[test]
    fn placeholder_echoed_by_a_source_falls_through() {
        let m = raw(json!({
            "teams": [{ "teamName": "Team 1" }, { "teamName": "Team 2" }],
            "title": "Bangladesh vs Zimbabwe",
        }));
        let s = extract(&m);
        assert_eq!(s.team1.name, "Bangladesh");
        assert_eq!(s.team2.name, "Zimbabwe");
    }

    #[test]
    fn no_source_at_all_yields_placeholders() {
        let s = extract(&RawMatch::default());
        assert_eq!(s.team1.name, "Team 1");
        assert_eq!(s.team2.name, "Team 2");
        assert_eq!(s.title, "Team 1 vs Team 2");
    }

    #[test]
    fn short_name_falls_back_to_initials() {
        let m = raw(json!({ "teams": [{ "name": "West Indies" }, { "name": "South Africa" }] }));
        let s = extract(&m);
        assert_eq!(s.team1.short_name, "WI");
        assert_eq!(s.team2.short_name, "SA");
    }

    // -----------------------------------------------------------------------
    // Scores
    // -----------------------------------------------------------------------

    #[test]
    fn structured_score_object_is_read() {
        let m = raw(json!({
            "teams": [
                { "teamName": "India", "score": { "runs": 245, "wickets": 6, "overs": 43.2, "runRate": 5.66 } },
                { "teamName": "Australia" },
            ],
        }));
        let s = extract(&m);
        assert_eq!(s.team1.score, Score { runs: 245, wickets: 6, overs: 43.2, run_rate: 5.66 });
        assert!(s.team2.score.is_unresolved());
    }

    #[test]
    fn string_score_encoding_is_parsed() {
        let m = raw(json!({
            "teams": [{ "teamName": "India", "score": "runs=245; wickets=6; overs=43.2; runRate=5.66" }],
        }));
        let score = extract(&m).team1.score;
        assert_eq!(score.runs, 245);
        assert_eq!(score.wickets, 6);
        assert_eq!(score.overs, 43.2);
        assert_eq!(score.run_rate, 5.66);
    }

    #[test]
    fn string_without_runs_token_is_unresolved() {
        let m = raw(json!({ "teams": [{ "teamName": "India", "score": "245/6" }] }));
        assert!(extract(&m).team1.score.is_unresolved());
    }

    #[test]
    fn scorecard_innings_fills_missing_team_score() {
        let m = raw(json!({
            "teams": [{ "teamName": "India" }, { "teamName": "Australia" }],
            "scorecard": { "scorecard": [
                { "score": 188, "wickets": 4, "overs": 36.0 },
                { "runs": 91, "wickets": 2, "overs": 18.3 },
            ]},
        }));
        let s = extract(&m);
        assert_eq!(s.team1.score.runs, 188);
        assert_eq!(s.team2.score.runs, 91);
    }

    #[test]
    fn legacy_match_score_compact_keys_fill_missing_score() {
        let m = raw(json!({
            "teams": [{ "teamName": "India" }, { "teamName": "Australia" }],
            "raw": { "matchScore": {
                "t1s": { "r": 312, "w": 8, "o": 50, "rr": 6.24 },
                "team2Score": { "runs": 120, "wickets": 3 },
            }},
        }));
        let s = extract(&m);
        assert_eq!(s.team1.score.runs, 312);
        assert_eq!(s.team1.score.wickets, 8);
        assert_eq!(s.team2.score.runs, 120);
    }

    #[test]
    fn zero_structured_score_falls_through_to_scorecard() {
        let m = raw(json!({
            "teams": [{ "teamName": "India", "score": { "runs": 0, "wickets": 0 } }],
            "scorecard": { "scorecard": [{ "runs": 57, "wickets": 1 }] },
        }));
        assert_eq!(extract(&m).team1.score.runs, 57);
    }

    #[test]
    fn string_numbers_and_garbage_coerce_safely() {
        let m = raw(json!({
            "teams": [{ "teamName": "India", "score": { "runs": "187", "wickets": null, "overs": {"weird": true} } }],
        }));
        let score = extract(&m).team1.score;
        assert_eq!(score.runs, 187);
        assert_eq!(score.wickets, 0);
        assert_eq!(score.overs, 0.0);
    }

    // -----------------------------------------------------------------------
    // Score visibility
    // -----------------------------------------------------------------------

    #[test]
    fn upcoming_match_without_scores_hides_scores() {
        let m = raw(json!({ "status": "Upcoming", "teams": [{ "teamName": "A" }, { "teamName": "B" }] }));
        assert!(!extract(&m).should_show_scores());
    }

    #[test]
    fn unknown_phase_with_resolved_score_shows_scores() {
        let m = raw(json!({
            "status": "Stumps, day 3",
            "teams": [{ "teamName": "A", "score": { "runs": 301, "wickets": 7 } }, { "teamName": "B" }],
        }));
        assert!(extract(&m).should_show_scores());
    }

    #[test]
    fn live_match_shows_scores_even_when_unresolved() {
        let m = raw(json!({ "status": "Live" }));
        assert!(extract(&m).should_show_scores());
    }

    // -----------------------------------------------------------------------
    // Start time, venue, series, format
    // -----------------------------------------------------------------------

    #[test]
    fn start_date_accepts_millis_and_rfc3339_and_millis_string() {
        let a = raw(json!({ "startDate": 1767182400000_i64 }));
        let b = raw(json!({ "startDate": "2025-12-31T12:00:00Z" }));
        let c = raw(json!({ "startDate": "1767182400000" }));
        assert_eq!(extract(&a).start_time, extract(&c).start_time);
        assert_eq!(extract(&b).date, "31 Dec 2025");
        assert!(extract(&a).start_time.is_some());
    }

    #[test]
    fn venue_waterfall_reaches_legacy_ground() {
        let m = raw(json!({ "raw": { "venueinfo": { "ground": "Eden Gardens", "city": "Kolkata" } } }));
        assert_eq!(extract(&m).venue, "Eden Gardens");
    }

    #[test]
    fn venue_as_bare_string_is_used() {
        let m = raw(json!({ "venue": "Lord's" }));
        assert_eq!(extract(&m).venue, "Lord's");
    }

    #[test]
    fn series_falls_back_through_legacy_and_default() {
        let named = raw(json!({ "series": { "name": "Border-Gavaskar Trophy" } }));
        let legacy = raw(json!({ "raw": { "matchInfo": { "seriesName": "The Ashes" } } }));
        assert_eq!(extract(&named).series, "Border-Gavaskar Trophy");
        assert_eq!(extract(&legacy).series, "The Ashes");
        assert_eq!(extract(&RawMatch::default()).series, "Cricket Match");
    }

    #[test]
    fn format_defaults_to_t20() {
        let m = raw(json!({ "raw": { "matchformat": "TEST" } }));
        assert_eq!(extract(&m).format, "TEST");
        assert_eq!(extract(&RawMatch::default()).format, "T20");
    }

    #[test]
    fn toss_and_result_come_from_the_legacy_blob() {
        let m = raw(json!({
            "raw": {
                "tossstatus": "India opt to bowl",
                "shortstatus": "AUS won by 21 runs",
            }
        }));
        let s = extract(&m);
        assert_eq!(s.toss_status.as_deref(), Some("India opt to bowl"));
        assert_eq!(s.result_text.as_deref(), Some("AUS won by 21 runs"));
    }

    #[test]
    fn winning_team_backfills_a_missing_result_text() {
        let m = raw(json!({ "result": { "winningTeam": "Australia" } }));
        assert_eq!(extract(&m).result_text.as_deref(), Some("Australia won"));

        // An explicit result text still wins over the derived one.
        let m = raw(json!({
            "result": { "resultText": "Australia won by 5 wickets", "winningTeam": "Australia" }
        }));
        assert_eq!(
            extract(&m).result_text.as_deref(),
            Some("Australia won by 5 wickets")
        );
    }

    #[test]
    fn missing_document_extracts_to_placeholders() {
        let s = extract_or_default(None);
        assert_eq!(s.title, "Cricket Match");
        assert_eq!(s.team1.name, "Team 1");
        assert_eq!(s.team2.name, "Team 2");
        assert!(s.team1.score.is_unresolved());
        assert_eq!(s, extract_or_default(Some(&RawMatch::default())));
    }
}
