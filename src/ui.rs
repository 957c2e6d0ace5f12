use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::pair::{Side, WordPair};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const COLUMN_GAP: u16 = 6;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        match self.state {
            AppState::Waiting => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(area);

                let text = self.message.as_deref().unwrap_or("no word pairs loaded");
                Paragraph::new(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[0], buf);

                Paragraph::new(Span::styled("(esc)ape", italic_style)).render(chunks[1], buf);
            }
            AppState::Playing => {
                let rows = self.board.rows() as u16;
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .constraints([
                        Constraint::Length(area.height.saturating_sub(rows + 3) / 2),
                        Constraint::Length(2), // timer + progress
                        Constraint::Length(rows),
                        Constraint::Min(0),
                        Constraint::Length(1), // legend
                    ])
                    .split(area);

                let session = &self.session;
                let status = format!(
                    "{}   {}/{} matched",
                    session.remaining_secs(),
                    session.matched_count(),
                    session.deck_size()
                );
                Paragraph::new(Span::styled(status, dim_bold_style))
                    .alignment(Alignment::Center)
                    .render(chunks[1], buf);

                let [left, right] = column_areas(self, chunks[2]);
                Paragraph::new(column_lines(self, Side::Source))
                    .alignment(Alignment::Right)
                    .render(left, buf);
                Paragraph::new(column_lines(self, Side::Target))
                    .alignment(Alignment::Left)
                    .render(right, buf);

                Paragraph::new(Span::styled(
                    "↑/↓ move / ←/→ switch / (enter) pick / (esc)ape",
                    italic_style,
                ))
                .render(chunks[4], buf);
            }
            AppState::Results => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints([
                        Constraint::Min(1),
                        Constraint::Length(1), // end message
                        Constraint::Length(1), // stats
                        Constraint::Min(1),
                        Constraint::Length(1), // legend
                    ])
                    .split(area);

                if let Some(message) = &self.message {
                    Paragraph::new(Span::styled(
                        message.as_str(),
                        Style::default().patch(bold_style).fg(Color::Cyan),
                    ))
                    .alignment(Alignment::Center)
                    .render(chunks[1], buf);
                }

                if let Some(report) = self.report() {
                    let stats = format!(
                        "{}% acc   {}/{} correct   {}/{} pairs",
                        report.accuracy,
                        report.correct,
                        report.attempts,
                        report.matched,
                        report.total
                    );
                    Paragraph::new(Span::styled(stats, bold_style))
                        .alignment(Alignment::Center)
                        .render(chunks[2], buf);
                }

                Paragraph::new(Span::styled("(r)etry / (esc)ape", italic_style))
                    .render(chunks[4], buf);
            }
        }
    }
}

/// Splits `area` into two columns sized to their widest term, centered as a pair
fn column_areas(app: &App, area: Rect) -> [Rect; 2] {
    let left = column_width(&app.board.sources, Side::Source);
    let right = column_width(&app.board.targets, Side::Target);
    let used = left + right + COLUMN_GAP;
    let pad = area.width.saturating_sub(used) / 2;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(left),
            Constraint::Length(COLUMN_GAP),
            Constraint::Length(right),
            Constraint::Min(0),
        ])
        .split(area);

    [chunks[1], chunks[3]]
}

fn column_width(pairs: &[WordPair], side: Side) -> u16 {
    pairs
        .iter()
        .map(|p| term(p, side).width() as u16 + 2)
        .max()
        .unwrap_or(0)
}

fn term(pair: &WordPair, side: Side) -> &str {
    match side {
        Side::Source => pair.source(),
        Side::Target => pair.target(),
    }
}

fn column_lines(app: &App, side: Side) -> Vec<Line<'_>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    app.board
        .column(side)
        .iter()
        .enumerate()
        .map(|(row, pair)| {
            let id = pair.id();
            let mut style = if app.board.matched.contains(&id) {
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
            } else if app.is_wrong(side, id) {
                Style::default().patch(bold_style).fg(Color::Red)
            } else if app.is_selected(side, id) {
                Style::default().patch(bold_style).fg(Color::Yellow)
            } else {
                bold_style
            };

            let focused = app.focus.side == side && app.focus.row == row;
            if focused {
                style = style.add_modifier(Modifier::REVERSED);
            }

            Line::from(Span::styled(format!(" {} ", term(pair, side)), style))
        })
        .collect()
}
