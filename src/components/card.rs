use cricket_api::{MatchPhase, MatchSummary, TeamSide};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

/// Rows per match card: header, two team lines, context line, spacer.
pub const CARD_HEIGHT: u16 = 5;

pub fn phase_color(phase: MatchPhase) -> Color {
    match phase {
        MatchPhase::Live => Color::Red,
        MatchPhase::Upcoming => Color::Blue,
        MatchPhase::Completed => Color::Green,
        MatchPhase::Unknown => Color::DarkGray,
    }
}

/// One match in the scrolling list. Renders into a CARD_HEIGHT-row slot:
///
/// ```text
/// ▶ [LIVE] T20 · India vs Australia, 3rd T20I
///     IND  India                245/6 (43.2 ov)
///     AUS  Australia            198/4 (38.0 ov)
///     Melbourne Cricket Ground · India won the toss
/// ```
pub struct MatchCardView<'a> {
    pub summary: &'a MatchSummary,
    pub selected: bool,
}

impl<'a> Widget for MatchCardView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height == 0 {
            return;
        }
        let width = area.width as usize;
        let m = self.summary;
        let accent = phase_color(m.status.phase);

        let base_style = if self.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let marker = if self.selected { "▶ " } else { "  " };
        let header = format!("{marker}[{}] {} · {}", m.status.label, m.format, m.title);
        buf.set_stringn(
            area.x,
            area.y,
            &header,
            width,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        );

        let show_scores = m.should_show_scores();
        for (row, team) in [(1u16, &m.team1), (2, &m.team2)] {
            if row >= area.height {
                return;
            }
            let line = format_team_row(team, show_scores);
            buf.set_stringn(area.x, area.y + row, &line, width, base_style);
        }

        if area.height > 3 {
            let context = match m.status.phase {
                MatchPhase::Completed => m
                    .result_text
                    .clone()
                    .unwrap_or_else(|| m.status.label.clone()),
                MatchPhase::Upcoming => format!("{} · {} {}", m.venue, m.date, m.time),
                _ => match &m.toss_status {
                    Some(toss) => format!("{} · {}", m.venue, toss),
                    None => m.venue.clone(),
                },
            };
            buf.set_stringn(
                area.x + 4,
                area.y + 3,
                &context,
                width.saturating_sub(4),
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

/// Format one team line: `"    IND  India                245/6 (43.2 ov)"`.
/// Scores are omitted for fixtures that have not produced any yet.
fn format_team_row(team: &TeamSide, show_scores: bool) -> String {
    let short: String = team.short_name.chars().take(4).collect();
    let name: String = team.name.chars().take(20).collect();
    if show_scores && !team.score.is_unresolved() {
        format!(
            "    {:<4} {:<20} {} {}",
            short,
            name,
            team.score.line(),
            team.score.overs_line()
        )
    } else {
        format!("    {:<4} {:<20}", short, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_api::{Score, StatusInfo};

    fn side(name: &str, short: &str, score: Score) -> TeamSide {
        TeamSide {
            name: name.into(),
            short_name: short.into(),
            score,
            image_id: None,
        }
    }

    fn batting(runs: u32, wickets: u32, overs: f64) -> Score {
        Score {
            runs,
            wickets,
            overs,
            run_rate: 0.0,
        }
    }

    #[test]
    fn test_team_row_includes_score_and_overs() {
        let team = side("India", "IND", batting(245, 6, 43.2));
        let line = format_team_row(&team, true);
        assert!(line.contains("245/6"), "line: {line:?}");
        assert!(line.contains("(43.2 ov)"), "line: {line:?}");
    }

    #[test]
    fn test_team_row_hides_unresolved_score() {
        let team = side("India", "IND", Score::default());
        let line = format_team_row(&team, true);
        assert!(!line.contains('/'), "line: {line:?}");
    }

    #[test]
    fn test_team_row_hides_score_for_fixtures() {
        let team = side("India", "IND", batting(245, 6, 43.2));
        let line = format_team_row(&team, false);
        assert!(!line.contains("245"), "line: {line:?}");
    }

    #[test]
    fn test_phase_colors_are_distinct() {
        let colors = [
            phase_color(MatchPhase::Live),
            phase_color(MatchPhase::Upcoming),
            phase_color(MatchPhase::Completed),
            phase_color(MatchPhase::Unknown),
        ];
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
    }

    #[test]
    fn test_card_render_clips_to_area() {
        let summary = MatchSummary {
            id: "m1".into(),
            title: "India vs Australia".into(),
            status: StatusInfo {
                phase: MatchPhase::Live,
                label: "LIVE".into(),
            },
            team1: side("India", "IND", batting(245, 6, 43.2)),
            team2: side("Australia", "AUS", batting(198, 4, 38.0)),
            ..MatchSummary::default()
        };
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        MatchCardView {
            summary: &summary,
            selected: true,
        }
        .render(area, &mut buf);

        let top: String = (0..40)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol().chars().next().unwrap_or(' ')).unwrap_or(' '))
            .collect();
        assert!(top.starts_with("▶ [LIVE]"), "top row: {top:?}");
    }
}
