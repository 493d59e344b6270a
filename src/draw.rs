use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::card::{CARD_HEIGHT, MatchCardView, phase_color};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::{LayoutAreas, centered};
use cricket_api::{DetailTab, MatchSummary};

static TABS: &[&str; 3] = &["Matches", "Live Ticker", "Match Detail"];

const DETAIL_TABS: [DetailTab; 4] = [
    DetailTab::Scorecard,
    DetailTab::HistoricalScorecard,
    DetailTab::Commentary,
    DetailTab::Overs,
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            let mut main = layout.main;
            if app.state.show_logs && main.height > 12 {
                let [top, logs] =
                    Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(main);
                main = top;
                draw_logs(f, logs);
            }

            match app.state.active_tab {
                MenuItem::Matches => draw_matches(f, main, app),
                MenuItem::Live => draw_live_ticker(f, main, app),
                MenuItem::Detail => draw_detail(f, main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    main,
                    "Help: q=quit  1=Matches  2=Live  3=Detail  j/k=move  f=filter  Enter=open\n\
                     Detail: s=scorecard  h=historical  c=commentary  o=overs  r=refresh  Esc=back",
                ),
            }

            draw_loading_spinner(f, f.area(), app, loading);
            draw_notice(f, f.area(), app);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Matches => 0,
        MenuItem::Live => 1,
        MenuItem::Detail => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    // Backend health dot from the startup probe.
    let dot = if !app.state.backend.checked {
        Span::styled("● ", Style::default().fg(Color::DarkGray))
    } else if app.state.backend.healthy {
        Span::styled("● ", Style::default().fg(Color::Green))
    } else {
        Span::styled("● ", Style::default().fg(Color::Red))
    };
    let help = Paragraph::new(Line::from(vec![dot, Span::raw("Help: ? ")]))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_matches(f: &mut Frame, area: Rect, app: &App) {
    let list = &app.state.matches;
    let block = default_border(Color::White).title(format!(" Matches · {} ", list.filter.label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height < 3 {
        return;
    }

    let [header, key_legend, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let header_text = match &list.loaded_at {
        Some(at) => format!("{} matches | updated {at}", list.matches.len()),
        None => "Loading matches...".to_string(),
    };
    f.render_widget(Paragraph::new(header_text), header);
    f.render_widget(
        Paragraph::new("Keys: j/k=move  f=filter  Enter=open  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if let Some(err) = list.error.as_deref() {
        f.render_widget(
            Paragraph::new(format!("Match list load failed:\n{err}"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    if list.matches.is_empty() {
        if list.loaded_at.is_some() {
            f.render_widget(
                Paragraph::new(format!("No {} matches right now", list.filter.label()))
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                content,
            );
        }
        return;
    }

    draw_card_list(f, content, &list.matches, list.selected);
}

fn draw_live_ticker(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Live Ticker ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height < 3 {
        return;
    }

    let ticker = &app.state.ticker;
    if !ticker.loaded {
        f.render_widget(
            Paragraph::new("Loading live matches...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }
    if ticker.matches.is_empty() {
        f.render_widget(
            Paragraph::new("No live matches right now")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Refreshes every 30s. j/k=move  Enter=open")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );
    draw_card_list(f, content, &ticker.matches, ticker.selected);
}

/// Scrolling window of match cards with the selected card kept visible.
fn draw_card_list(f: &mut Frame, area: Rect, matches: &[MatchSummary], selected: usize) {
    let visible = (area.height / CARD_HEIGHT).max(1) as usize;
    let start = if selected >= visible {
        selected + 1 - visible
    } else {
        0
    };

    for (slot, (idx, summary)) in matches
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .enumerate()
    {
        let slot_area = Rect::new(
            area.x,
            area.y + slot as u16 * CARD_HEIGHT,
            area.width,
            CARD_HEIGHT.min(area.height.saturating_sub(slot as u16 * CARD_HEIGHT)),
        );
        f.render_widget(
            MatchCardView {
                summary,
                selected: idx == selected,
            },
            slot_area,
        );
    }
}

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
    let detail = &app.state.detail;
    let block = default_border(Color::White).title(" Match Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !detail.is_open() {
        f.render_widget(
            Paragraph::new("Select a match in Matches or Live Ticker and press Enter")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    if detail.not_found {
        let id = detail.match_id.as_deref().unwrap_or("?");
        f.render_widget(
            Paragraph::new(format!(
                "Match {id} was not found on any source.\nIt may have been removed. Esc to go back."
            ))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let Some(summary) = detail.summary.as_ref() else {
        f.render_widget(
            Paragraph::new("Resolving match...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let header_height = 6u16.min(inner.height);
    let [header, rest] =
        Layout::vertical([Constraint::Length(header_height), Constraint::Fill(1)]).areas(inner);
    draw_detail_header(f, header, app, summary);

    if detail.upcoming_fixture {
        // Fixture without a scorecard yet: no sections to offer.
        f.render_widget(
            Paragraph::new(format!(
                "Starts {} at {}\n{}\n\nScorecard will appear once the match begins.",
                summary.date, summary.time, summary.venue
            ))
            .style(Style::default().fg(Color::Blue))
            .alignment(Alignment::Center),
            rest,
        );
        return;
    }

    if rest.height < 4 {
        return;
    }
    let [sub_tabs, section] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(rest);
    draw_section_tabs(f, sub_tabs, detail.active_tab);
    draw_section(f, section, app);
}

fn draw_detail_header(f: &mut Frame, area: Rect, app: &App, summary: &MatchSummary) {
    let detail = &app.state.detail;
    let accent = phase_color(summary.status.phase);
    let show_scores = summary.should_show_scores();

    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}] ", summary.status.label),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(summary.title.clone(), Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(Span::styled(
        format!("{} · {} · {}", summary.series, summary.format, summary.venue),
        Style::default().fg(Color::Gray),
    )));

    for team in [&summary.team1, &summary.team2] {
        let score = if show_scores && !team.score.is_unresolved() {
            format!("{} {}", team.score.line(), team.score.overs_line())
        } else {
            String::new()
        };
        lines.push(Line::from(format!(
            "  {:<4} {:<24} {score}",
            team.initials(),
            team.name
        )));
    }

    let context = match summary.result_text.as_deref() {
        Some(result) => result.to_string(),
        None => match summary.toss_status.as_deref() {
            Some(toss) => toss.to_string(),
            None => format!("{} {}", summary.date, summary.time),
        },
    };
    lines.push(Line::from(Span::styled(
        context,
        Style::default().fg(Color::DarkGray),
    )));

    let mut footer = vec![Span::styled(
        "s/h/c/o=sections  r=refresh  j/k=scroll  Esc=back",
        Style::default().fg(Color::DarkGray),
    )];
    if detail.syncing {
        footer.push(Span::styled("  syncing...", Style::default().fg(Color::Yellow)));
    } else if let Some(at) = detail.last_synced.as_deref() {
        footer.push(Span::styled(
            format!("  synced {at}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(source) = detail.source {
        footer.push(Span::styled(
            format!("  via {}", source.as_str()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(footer));

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_section_tabs(f: &mut Frame, area: Rect, active: DetailTab) {
    let index = DETAIL_TABS
        .iter()
        .position(|t| *t == active)
        .unwrap_or_default();
    let titles: Vec<Line> = DETAIL_TABS.iter().map(|t| Line::from(t.label())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(index)
        .style(Style::default().fg(Color::White));
    f.render_widget(tabs, area);
}

fn draw_section(f: &mut Frame, area: Rect, app: &App) {
    let detail = &app.state.detail;
    let tab = detail.active_tab;

    if let Some(err) = detail.section_error(tab) {
        f.render_widget(
            Paragraph::new(format!("{} load failed:\n{err}", tab.label()))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let Some(data) = detail.section(tab) else {
        let msg = if detail.section_pending(tab) {
            format!("Loading {}...", tab.label().to_lowercase())
        } else {
            format!("No {} data for this match", tab.label().to_lowercase())
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            area,
        );
        return;
    };

    let rendered = serde_json::to_string_pretty(data).unwrap_or_default();
    let offset = detail.scroll_offset as usize;
    let visible = area.height as usize;
    let window: Vec<&str> = rendered.lines().skip(offset).take(visible).collect();
    f.render_widget(
        Paragraph::new(window.join("\n")).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

fn draw_notice(f: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = app.state.detail.notice.as_deref() else {
        return;
    };
    let popup = centered(area, 46.min(area.width), 5);
    f.render_widget(Clear, popup);
    let block = default_border(Color::Yellow).title(" Sync ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(
        Paragraph::new(format!("{notice}\n\nPress any key to continue"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center),
        inner,
    );
}
