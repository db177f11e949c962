pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, AppState},
    session::Session,
    tracker::Mark,
};
use charting::{render_comparison, PERSONA_COLOR};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_width = session.sentence_text().width();
        let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
            1
        } else {
            ((prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(1), // padding
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(1), // padding
                Constraint::Min(3),    // overlay, chart or status
                Constraint::Length(2), // summary
                Constraint::Length(1), // legend
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled("ghosttype", bold_style),
            Span::raw(format!(
                "   profile {}   {} words",
                self.controller.profile_id(),
                self.controller.word_count()
            )),
        ]))
        .alignment(Alignment::Center);
        header.render(chunks[0], buf);

        Paragraph::new(sentence_line(session, self.state))
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        match self.state {
            AppState::Overlay => {
                let text = vec![
                    Line::from(Span::styled("press enter to start", bold_style)),
                    Line::from(format!(
                        "(←/→) profile {}   (↑/↓) words {}",
                        self.controller.profile_id(),
                        self.controller.word_count()
                    )),
                ];
                Paragraph::new(text)
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center)
                    .render(centered(chunks[4], 4), buf);
            }
            AppState::Typing => {
                let ghost_progress = session.ghost().caret().unwrap_or(0);
                Paragraph::new(Span::styled(
                    format!(
                        "you {}/{}   persona {}/{}",
                        session.tracker().caret(),
                        session.sentence().len(),
                        ghost_progress,
                        session.sentence().len()
                    ),
                    Style::default().add_modifier(Modifier::DIM),
                ))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
            }
            AppState::Results => {
                if session.is_chart_visible() {
                    render_comparison(&session.chart(), chunks[4], buf);
                }
                let summary = session.summary();
                Paragraph::new(vec![
                    Line::from(Span::styled(summary.describe(), bold_style)),
                    Line::from(summary.describe_spread()),
                ])
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
            }
        }

        let legend = match self.state {
            AppState::Overlay => "(enter) start / (esc)ape",
            AppState::Typing => "(tab) new sentence / (esc)ape",
            AppState::Results => "(r)etry / (p)rofile / (+/-) words / (esc)ape",
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[6], buf);
    }
}

/// Sentence with correctness marks, the live caret and the ghost caret
fn sentence_line(session: &Session, state: AppState) -> Line<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let ghost_style = Style::default().bg(PERSONA_COLOR).fg(Color::Black);

    if state == AppState::Overlay {
        return Line::from(Span::styled(session.sentence_text(), dim_bold_style));
    }

    let live_caret = session.tracker().caret();
    let ghost_caret = session.ghost().caret();
    let cells = session.tracker().cells();

    let mut spans: Vec<Span> = cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let mut style = match cell.mark {
                Mark::Pending => dim_bold_style,
                Mark::Correct => bold_style.fg(Color::Green),
                Mark::Incorrect => bold_style.fg(Color::Red),
            };
            if state == AppState::Typing && idx == live_caret {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if ghost_caret == Some(idx) {
                style = style.patch(ghost_style);
            }
            Span::styled(cell.glyph.to_string(), style)
        })
        .collect();

    if ghost_caret == Some(cells.len()) {
        spans.push(Span::styled(" ", ghost_style));
    }

    Line::from(spans)
}

fn centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SessionController;
    use crate::profile::ProfileTable;
    use crate::words::WordList;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn app(words: &str) -> App {
        App::new(
            SessionController::new(
                WordList::parse(words).unwrap(),
                ProfileTable::builtin().unwrap(),
                "8TEUUGQBYB",
                2,
                StdRng::seed_from_u64(3),
            )
            .unwrap(),
        )
    }

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(app, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    fn press(app: &mut App, c: char, at: u64) {
        app.on_key(
            KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
            Duration::from_millis(at),
        );
    }

    #[test]
    fn test_overlay_render() {
        let a = app("test");
        let content = draw(&a);
        assert!(content.contains("test test"));
        assert!(content.contains("press enter to start"));
        assert!(content.contains("8TEUUGQBYB"));
    }

    #[test]
    fn test_typing_render() {
        let mut a = app("test");
        a.on_key(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Duration::ZERO,
        );
        press(&mut a, 't', 0);
        let content = draw(&a);
        assert!(content.contains("test test"));
        assert!(content.contains("you 1/9"));
    }

    #[test]
    fn test_missed_space_shows_underscore() {
        let mut a = app("ab");
        a.on_key(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Duration::ZERO,
        );
        for (i, c) in "abx".chars().enumerate() {
            press(&mut a, c, i as u64 * 100);
        }
        assert!(draw(&a).contains("ab_ab"));
    }

    #[test]
    fn test_results_render_chart() {
        let mut a = app("hi");
        a.on_key(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Duration::ZERO,
        );
        for (i, c) in "hi hi".chars().enumerate() {
            press(&mut a, c, i as u64 * 200);
        }
        assert_eq!(a.state, AppState::Results);
        a.on_tick(Duration::from_secs(30));

        let content = draw(&a);
        assert!(content.contains("persona"));
        assert!(content.contains("ms avg"));
        assert!(content.contains("median you"));
        assert!(content.contains("sd you"));
        assert!(content.contains("(r)etry"));
    }

    #[test]
    fn test_ghost_caret_cell_is_highlighted() {
        let mut a = app("abc");
        a.on_key(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Duration::ZERO,
        );
        press(&mut a, 'a', 0);
        let line = sentence_line(a.session(), a.state);
        let ghost_cell = a.session().ghost().caret().unwrap();
        assert_eq!(line.spans[ghost_cell].style.bg, Some(PERSONA_COLOR));
    }
}
