use crate::{state::IntroState, theme::Theme};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = " greemls@usb: boot terminal";
const SKIP_HINT: &str = "[s] skip ";

/// Header bar: terminal title on the left, plan and skip hint on the right
pub struct Header<'a> {
    state: &'a IntroState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a IntroState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::BOTTOM).border_style(Theme::border()).style(Theme::panel());
        let line = self.line(block.inner(area).width);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    /// Build the header line for a given inner width.
    ///
    /// The right-hand side is dropped when it does not fit next to the title.
    pub fn line(&self, width: u16) -> Line<'static> {
        let title = Span::styled(TITLE, Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD));

        let mut right = vec![Span::styled("plan: ", Theme::muted()), Theme::plan_span(self.state.plan), Span::raw(" ")];
        if self.state.can_skip() && self.state.is_playing() {
            right.push(Span::styled(SKIP_HINT, Style::default().fg(Theme::YELLOW)));
        }

        let right_width: usize = right.iter().map(|span| span.content.width()).sum();
        let used = TITLE.width() + right_width;
        let width = width as usize;
        if used > width {
            return Line::from(title);
        }

        let mut spans = vec![title, Span::raw(" ".repeat(width - used))];
        spans.extend(right);
        Line::from(spans)
    }
}
