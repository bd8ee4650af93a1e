use blockfall_engine::SessionResult;
use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Padding, Widget},
};

use super::{format_time, style};

const TITLE: &str = "B L O C K F A L L";

/// Title screen, with the outcome of the previous game if there was one.
#[derive(Debug)]
pub struct MenuDisplay<'a> {
    results: &'a [SessionResult],
}

impl<'a> MenuDisplay<'a> {
    pub fn new(results: &'a [SessionResult]) -> Self {
        Self { results }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled(TITLE, style::TITLE),
            Line::default(),
            Line::from("Press Enter to start"),
        ];
        if let Some(last) = self.results.last() {
            lines.push(Line::default());
            lines.push(Line::from(format!(
                "Last game: {} ({})",
                last.stats.score(),
                last.reason
            )));
            lines.push(Line::from(format!(
                "{} lines, level {}, {}",
                last.stats.total_cleared_lines(),
                last.stats.level(),
                format_time(last.elapsed)
            )));
        }
        if let Some(best) = self.results.iter().map(|r| r.stats.score()).max()
            && self.results.len() > 1
        {
            lines.push(Line::from(format!("Best: {best}")));
        }
        lines
    }
}

impl Widget for MenuDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
        let area = area.centered(Constraint::Length(40), Constraint::Length(height));
        let block = Block::bordered()
            .padding(Padding::horizontal(1))
            .style(style::DEFAULT);
        let inner = block.inner(area);
        block.render(area, buf);
        Text::from(lines).centered().render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{BagSeed, GameStats, Termination};

    use super::*;

    fn result(score_lines: usize) -> SessionResult {
        let mut stats = GameStats::new(1, 10);
        stats.complete_piece_drop(score_lines);
        SessionResult {
            seed: BagSeed::from_u64(0),
            reason: Termination::TopOut,
            stats,
            elapsed: 61.0,
        }
    }

    fn text(display: &MenuDisplay<'_>) -> Vec<String> {
        display.lines().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_first_visit_shows_only_the_prompt() {
        let lines = text(&MenuDisplay::new(&[]));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Press Enter to start");
    }

    #[test]
    fn test_previous_results_are_summarized() {
        let results = [result(4), result(1)];
        let lines = text(&MenuDisplay::new(&results));
        assert!(lines.contains(&"Last game: 100 (topped out)".to_owned()));
        assert!(lines.contains(&"1 lines, level 1, 1:01.00".to_owned()));
        assert!(lines.contains(&"Best: 800".to_owned()));
    }
}
