use anyhow::{Context, Result};
use chrono::Datelike;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Paragraph, Wrap},
};
use std::io::{self, Stdout};

use momentum_core::{CITIES, HABITS, MonthGrid, SeverityBand, calc_achievement, month_back};

use crate::auth::AuthState;
use crate::config::Config;
use crate::generate::{self, GenerateOutcome};
use crate::state::Session;

pub fn run_checkin(session: Session, cfg: Config, auth: AuthState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = checkin_loop(&mut terminal, session, cfg, auth);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn checkin_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut session: Session,
    cfg: Config,
    auth: AuthState,
) -> Result<()> {
    let mut outcome: Option<GenerateOutcome> = None;
    let mut status: Option<String> = None;
    let mut show_help = true;
    let mut back = 0u32;
    let mut pending_generate = false;

    loop {
        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(12),
                    Constraint::Length(11),
                    Constraint::Length(3),
                ])
                .split(size);

            // Header
            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Momentum",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    ">_ momentum checkin",
                    Style::default().fg(Color::Cyan),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            // Body: check-in panel | chart + calendar
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
                .split(chunks[1]);

            f.render_widget(checkin_panel(&session, show_help), body[0]);

            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(9), Constraint::Min(3)])
                .split(body[1]);

            let series = session.chart_series();
            let bars: Vec<(String, u64)> = series
                .iter()
                .map(|e| (e.date.format("%m-%d").to_string(), e.pct.round() as u64))
                .collect();
            let bar_data: Vec<(&str, u64)> =
                bars.iter().map(|(l, v)| (l.as_str(), *v)).collect();
            let chart = BarChart::default()
                .block(Block::default().borders(Borders::ALL).title("최근 7일 달성률(%)"))
                .bar_width(5)
                .bar_gap(1)
                .max(100)
                .data(bar_data.as_slice());
            f.render_widget(chart, right[0]);

            let (cal_year, cal_month) =
                month_back(session.today.date.year(), session.today.date.month(), back);
            f.render_widget(calendar_panel(&session, cal_year, cal_month), right[1]);

            // Report area
            f.render_widget(report_panel(outcome.as_ref(), status.as_deref()), chunks[2]);

            // Footer
            let footer = Paragraph::new(
                "1-5=습관 토글  ←/→=기분  c=도시  p=코치  m=달력 이동  g=리포트 생성  ?=도움말  q=종료",
            )
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(footer, chunks[3]);
        })?;

        if pending_generate {
            pending_generate = false;
            match generate_blocking(&mut session, &cfg, &auth) {
                Ok(out) => {
                    status = Some(match (&out.report, out.missing_openai_key) {
                        (Some(_), _) => "리포트 생성 완료".to_string(),
                        (None, true) => {
                            "OpenAI API Key가 필요합니다. momentum auth paste-openai-api-key"
                                .to_string()
                        }
                        (None, false) => {
                            "AI 리포트 생성에 실패했습니다. 키/네트워크/모델 설정을 확인하세요."
                                .to_string()
                        }
                    });
                    outcome = Some(out);
                }
                Err(err) => {
                    status = Some(format!("오류: {err}"));
                }
            }
            continue;
        }

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('?') => show_help = !show_help,
                    KeyCode::Char(c @ '1'..='5') => {
                        let idx = (c as usize) - ('1' as usize);
                        session.today.habits.toggle(HABITS[idx].key);
                    }
                    KeyCode::Left => {
                        session.today.mood = session.today.clamped_mood().saturating_sub(1).max(1);
                    }
                    KeyCode::Right => {
                        session.today.mood = (session.today.clamped_mood() + 1).min(10);
                    }
                    KeyCode::Char('c') => {
                        let i = CITIES
                            .iter()
                            .position(|c| *c == session.today.city())
                            .unwrap_or(0);
                        session.today.city = CITIES[(i + 1) % CITIES.len()].to_string();
                    }
                    KeyCode::Char('p') => {
                        session.today.persona = session.today.persona.next();
                    }
                    KeyCode::Char('m') => {
                        back = (back + 1) % 3;
                    }
                    KeyCode::Char('g') => {
                        status = Some(
                            "날씨/강아지 데이터를 불러오고 AI 리포트를 생성합니다...".to_string(),
                        );
                        pending_generate = true;
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Bridge into the async generate flow from the sync event loop.
/// The CLI uses #[tokio::main], so a runtime is usually already running.
fn generate_blocking(
    session: &mut Session,
    cfg: &Config,
    auth: &AuthState,
) -> Result<GenerateOutcome> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        tokio::task::block_in_place(|| {
            handle.block_on(generate::run_generate(session, cfg, auth))
        })
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        rt.block_on(generate::run_generate(session, cfg, auth))
    }
}

fn checkin_panel(session: &Session, show_help: bool) -> Paragraph<'static> {
    let record = &session.today;
    let (done, pct) = calc_achievement(&record.habits);

    let mut lines: Vec<Line> = Vec::new();
    for (i, h) in HABITS.iter().enumerate() {
        let checked = record.habits.get(h.key);
        let mark = if checked { "[x]" } else { "[ ]" };
        let style = if checked {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{mark} "), style),
            Span::raw(format!("{} {}", h.emoji, h.label)),
            Span::styled(format!("  ({})", i + 1), Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!("🙂 기분: {}/10", record.clamped_mood())));
    lines.push(Line::raw(format!("🌍 도시: {}", record.city())));
    lines.push(Line::from(vec![
        Span::raw(format!("🧑‍🏫 코치: {}", record.persona.label())),
    ]));
    if show_help {
        lines.push(Line::from(Span::styled(
            format!("   {}", record.persona.blurb()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!("달성률 {pct:.0}% ({done}/5) · 스트릭 {}일", session.streak()),
        Style::default().fg(Color::Yellow),
    )));

    Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("오늘의 체크인"))
        .wrap(Wrap { trim: false })
}

fn band_color(band: SeverityBand) -> Color {
    match band {
        SeverityBand::None => Color::DarkGray,
        SeverityBand::Low => Color::Red,
        SeverityBand::Medium => Color::Yellow,
        SeverityBand::High => Color::Green,
        SeverityBand::VeryHigh => Color::Cyan,
    }
}

fn calendar_panel(session: &Session, year: i32, month: u32) -> Paragraph<'static> {
    let series = session.chart_series();
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        " 월  화  수  목  금  토  일",
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(grid) = MonthGrid::build(&series, year, month) {
        for week in grid.weeks() {
            let mut spans: Vec<Span> = Vec::new();
            for cell in week {
                match cell {
                    Some(c) => spans.push(Span::styled(
                        format!("{:>3} ", c.day),
                        Style::default().fg(band_color(c.band())),
                    )),
                    None => spans.push(Span::raw("  · ")),
                }
            }
            lines.push(Line::from(spans));
        }
    }

    Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{year}-{month:02} 달력 (m)")),
    )
}

fn report_panel(outcome: Option<&GenerateOutcome>, status: Option<&str>) -> Paragraph<'static> {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(s) = status {
        lines.push(Line::from(Span::styled(
            s.to_string(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::raw(""));
    }

    match outcome {
        None => {
            lines.push(Line::from(Span::styled(
                "g 키를 눌러 컨디션 리포트를 생성하세요.",
                Style::default().fg(Color::Gray),
            )));
        }
        Some(out) => {
            match &out.weather {
                Some(w) => lines.push(Line::raw(format!(
                    "🌦️ {} {}°C (체감 {}°C) · 습도 {}% · 바람 {} m/s",
                    w.description, w.temp_c, w.feels_like_c, w.humidity, w.wind_ms
                ))),
                None => lines.push(Line::from(Span::styled(
                    "날씨 정보를 가져오지 못했습니다(키/도시/네트워크 확인).",
                    Style::default().fg(Color::DarkGray),
                ))),
            }
            match &out.dog {
                Some(d) => lines.push(Line::raw(format!("🐶 {} · {}", d.breed, d.url))),
                None => lines.push(Line::from(Span::styled(
                    "강아지 이미지를 가져오지 못했습니다(네트워크 확인).",
                    Style::default().fg(Color::DarkGray),
                ))),
            }
            lines.push(Line::raw(""));
            match &out.report {
                Some(report) => {
                    for l in report.lines() {
                        lines.push(Line::raw(l.to_string()));
                    }
                }
                None => lines.push(Line::from(Span::styled(
                    "리포트가 비어있습니다. 설정을 확인 후 다시 시도하세요.",
                    Style::default().fg(Color::Gray),
                ))),
            }
        }
    }

    Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("컨디션 리포트"))
        .wrap(Wrap { trim: false })
}
