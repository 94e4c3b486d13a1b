use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::celebration::WinCelebration;
use crate::game::{Game, GameStatus, MAX_ERRORS};
use crate::util::win_percentage;
use crate::{App, ConfirmAction, Screen};

const HORIZONTAL_MARGIN: u16 = 5;
const GRID_ROW_LEN: usize = 7;

/// Terminal color for a stored background class token.
fn theme_color(class: &str) -> Color {
    match class {
        "chrome-bg" => Color::Yellow,
        "firefox-bg" => Color::LightRed,
        "safari-bg" => Color::LightBlue,
        "edge-bg" => Color::Cyan,
        _ => Color::DarkGray,
    }
}

/// The balloon, drawn from the error count. It starts as a wide oval and
/// deflates one guess at a time; the ninth error pops it.
fn balloon_lines(errors: u32) -> Vec<String> {
    if errors >= MAX_ERRORS {
        return vec![
            r"   \ ' /   ".to_string(),
            r"  -     -  ".to_string(),
            r"   / . \   ".to_string(),
        ];
    }

    let d = (MAX_ERRORS - errors) as f64;
    let mut lines = Vec::new();
    let mut y = -d;
    while y <= d {
        let half = (d * d - y * y).sqrt().round() as usize;
        let pad = " ".repeat((d as usize).saturating_sub(half));
        lines.push(format!("{pad}({}){pad}", " ".repeat(half * 2)));
        y += 2.0;
    }
    lines.push(format!("{}><", " ".repeat(d as usize)));
    lines
}

fn balloon_color(errors: u32) -> Color {
    if errors <= 3 {
        Color::Green
    } else if errors <= 6 {
        Color::Yellow
    } else {
        Color::Red
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_title(self, chunks[0], buf);
        match self.screen {
            Screen::Landing => render_landing(self, chunks[1], buf),
            Screen::Entry => render_entry(self, chunks[1], buf),
            Screen::Playing => render_playing(self, chunks[1], buf),
            Screen::Results => render_results(self, chunks[1], buf),
        }
        render_status(self, chunks[2], buf);
        render_legend(self, chunks[3], buf);

        if self.celebration.is_active {
            render_celebration(&self.celebration, area, buf);
        }
        if let Some(action) = &self.confirm {
            render_confirm(self, action, area, buf);
        }
    }
}

/// Title bar tinted with the browser identity from the session snapshot.
fn render_title(app: &App, area: Rect, buf: &mut Buffer) {
    let class = app
        .snapshot
        .as_ref()
        .map(|s| s.bg_color_class.clone())
        .unwrap_or_else(|| app.probe.browser().bg_class().to_string());

    let text = if app.player.is_empty() {
        " penjat".to_string()
    } else {
        format!(" penjat - {}", app.player)
    };

    let bar = Paragraph::new(Span::styled(
        text,
        Style::default()
            .fg(Color::Black)
            .bg(theme_color(&class))
            .add_modifier(Modifier::BOLD),
    ));
    bar.render(area, buf);
}

fn label_span(label: &str) -> Span<'static> {
    Span::styled(
        format!("{:<12}", label),
        Style::default().add_modifier(Modifier::DIM),
    )
}

fn records_lines(app: &App) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let high_line = match &app.high_score {
        Some(high) => Line::from(vec![
            label_span("Record:"),
            Span::styled(
                format!("{} - {} - {}", high.name, high.points, high.when),
                bold,
            ),
        ]),
        None => Line::from(vec![
            label_span("Record:"),
            Span::styled(
                app.config.messages.no_high_score.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]),
    };

    let totals = &app.totals;
    let pct = win_percentage(totals.won, totals.total)
        .map(|p| format!("{p}%"))
        .unwrap_or_else(|| "-".to_string());
    let best = totals
        .best
        .as_ref()
        .map(|b| format!("{} ({})", b.points, b.when))
        .unwrap_or_else(|| "-".to_string());
    let totals_line = Line::from(vec![
        label_span("Partides:"),
        Span::styled(
            format!(
                "{}   guanyades: {} ({})   millor: {}",
                totals.total, totals.won, pct, best
            ),
            bold,
        ),
    ]);

    vec![high_line, totals_line]
}

fn render_landing(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let info = vec![
        Line::from(vec![
            label_span("Navegador:"),
            Span::raw(app.probe.browser().to_string()),
        ]),
        Line::from(vec![
            label_span("Llengua:"),
            Span::raw(app.probe.language.clone()),
        ]),
        Line::from(vec![
            label_span("Origen:"),
            Span::raw(app.probe.url.origin.clone()),
        ]),
        Line::from(vec![
            label_span("Adreca:"),
            Span::raw(app.probe.url.href.clone()),
        ]),
    ];
    Paragraph::new(info).render(chunks[1], buf);

    Paragraph::new(records_lines(app)).render(chunks[3], buf);

    let input_line = Line::from(vec![
        label_span("Jugador:"),
        Span::styled(
            app.player_input.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("_", Style::default().add_modifier(Modifier::DIM)),
    ]);
    Paragraph::new(input_line).render(chunks[5], buf);
}

fn render_entry(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let shown = if app.reveal_secret {
        app.secret_input.clone()
    } else {
        "*".repeat(app.secret_input.chars().count())
    };

    let input_line = Line::from(vec![
        label_span("Paraula:"),
        Span::styled(shown, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("_", Style::default().add_modifier(Modifier::DIM)),
    ]);
    Paragraph::new(input_line).render(chunks[1], buf);
}

fn letter_grid(game: &Game) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    for chunk in &('A'..='Z').chunks(GRID_ROW_LEN) {
        let spans: Vec<Span> = chunk
            .map(|c| {
                let style = if game.is_used(c) {
                    if game.secret.contains(&c) {
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
                    }
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Span::styled(format!("{c} "), style)
            })
            .collect();
        rows.push(Line::from(spans));
    }
    rows
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(game) = &app.game else {
        return;
    };

    let balloon = balloon_lines(game.errors);
    let balloon_width = balloon.iter().map(|l| l.width()).max().unwrap_or(0) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(balloon.len() as u16),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(balloon_width.max(22)),
            Constraint::Min(1),
        ])
        .split(chunks[0]);

    let art: Vec<Line> = balloon.into_iter().map(Line::from).collect();
    Paragraph::new(art)
        .style(Style::default().fg(balloon_color(game.errors)))
        .alignment(Alignment::Center)
        .render(columns[0], buf);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .split(columns[1]);

    let counters = Line::from(vec![
        label_span("Punts:"),
        Span::styled(
            game.score.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("ratxa: {}", game.streak),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::raw("   "),
        Span::styled(
            format!("errors: {} / {}", game.errors, MAX_ERRORS),
            Style::default().fg(balloon_color(game.errors)),
        ),
    ]);
    Paragraph::new(counters).render(side[0], buf);
    Paragraph::new(letter_grid(game)).render(side[2], buf);

    let word = Paragraph::new(Span::styled(
        game.masked_view(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    word.render(chunks[2], buf);

    Paragraph::new(records_lines(app)).render(chunks[3], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(game) = &app.game else {
        return;
    };
    let won = game.status == GameStatus::Won;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let (banner, color) = if won {
        (app.config.messages.won_banner.clone(), Color::Green)
    } else {
        (app.config.messages.lost_banner.clone(), Color::Red)
    };
    Paragraph::new(Span::styled(
        banner,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    if !won {
        let reveal = format!(
            "{}{}",
            app.config.messages.reveal_prefix,
            game.secret_word()
        );
        Paragraph::new(Span::styled(
            reveal,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(
        format!("punts: {}   errors: {} / {}", game.score, game.errors, MAX_ERRORS),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(records_lines(app)).render(chunks[5], buf);
}

fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    if let Some(message) = &app.status {
        Paragraph::new(Span::styled(
            message.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
    }
}

fn render_legend(app: &App, area: Rect, buf: &mut Buffer) {
    let text = match app.screen {
        Screen::Landing => "(enter) continua / (supr) esborra el record / (esc) surt",
        Screen::Entry => "(enter) comenca / (tab) mostra / (esc) enrere",
        Screen::Playing => "(a-z) prova una lletra / (esc) abandona",
        Screen::Results => "(enter) nova paraula / (esc) inici",
    };
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(area, buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_confirm(app: &App, action: &ConfirmAction, area: Rect, buf: &mut Buffer) {
    let question = match action {
        ConfirmAction::LeaveGame => app.config.messages.confirm_leave.clone(),
        ConfirmAction::ClearHighScore => app.config.messages.confirm_clear.clone(),
    };

    let width = (question.width() as u16 + 6).max(24).min(area.width);
    let overlay = centered_rect(width, 5, area);

    Clear.render(overlay, buf);
    let body = vec![
        Line::from(Span::styled(
            question,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "(y) si / (n) no",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    Paragraph::new(body)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(overlay, buf);
}

/// Confetti drawn over whatever screen is underneath.
fn render_celebration(celebration: &WinCelebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for piece in &celebration.particles {
        let x = piece.x as u16;
        let y = piece.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[piece.color_index % colors.len()];
        let alpha = 1.0 - (piece.age / piece.max_age);
        let style = if alpha > 0.7 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if alpha > 0.3 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&piece.symbol.to_string());
            cell.set_style(style);
        }
    }
}
