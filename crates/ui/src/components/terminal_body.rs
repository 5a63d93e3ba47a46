use crate::theme::Theme;

use greemls_core::{LineClass, PlaybackState};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

pub const CURSOR_GLYPH: &str = "█";

/// Scrolling terminal body showing the typed script
pub struct TerminalBody<'a> {
    playback: &'a PlaybackState,
}

impl<'a> TerminalBody<'a> {
    pub fn new(playback: &'a PlaybackState) -> Self {
        Self { playback }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let lines = self.lines();
        let skip = lines.len().saturating_sub(area.height as usize);
        let visible: Vec<Line<'_>> = lines.into_iter().skip(skip).collect();
        frame.render_widget(Paragraph::new(visible).style(Theme::base()), area);
    }

    /// Completed lines followed by the line being typed.
    ///
    /// Once every line is done the cursor sits on a fresh prompt.
    pub fn lines(&self) -> Vec<Line<'a>> {
        let mut lines: Vec<Line<'a>> = self
            .playback
            .completed_lines
            .iter()
            .map(|line| Self::prompt_line(&line.text, line.class))
            .collect();

        let mut active = match self.playback.active_line() {
            Some(line) => Self::prompt_line(self.playback.revealed_text().unwrap_or_default(), line.class),
            None => Line::from(Theme::prompt()),
        };
        if self.playback.cursor_visible {
            active.spans.push(Span::styled(CURSOR_GLYPH, Theme::cursor()));
        }
        lines.push(active);

        lines
    }

    fn prompt_line(text: &'a str, class: LineClass) -> Line<'a> {
        Line::from(vec![Theme::prompt(), Span::styled(text, Theme::line_class_style(class))])
    }
}
