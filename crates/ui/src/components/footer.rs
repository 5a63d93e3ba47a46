use crate::{state::IntroState, theme::Theme};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Footer bar with the keys that do something right now
pub struct Footer<'a> {
    state: &'a IntroState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a IntroState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::TOP).border_style(Theme::border()).style(Theme::panel());
        let hints = Paragraph::new(Line::from(self.hints())).alignment(Alignment::Center).block(block);
        frame.render_widget(hints, area);
    }

    /// Key/label pairs for the current phase
    pub fn bindings(&self) -> Vec<(&'static str, &'static str)> {
        if self.state.is_playing() {
            let mut bindings = vec![("enter", "finish"), ("esc", "exit")];
            if self.state.can_skip() {
                bindings.push(("s", "skip"));
            }
            bindings
        } else {
            vec![("enter", "continue"), ("esc/q", "exit")]
        }
    }

    fn hints(&self) -> Vec<Span<'static>> {
        let key = Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD);
        let mut spans = Vec::new();
        for (index, (binding, label)) in self.bindings().into_iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled("  ·  ", Theme::muted()));
            }
            spans.push(Span::styled(binding, key));
            spans.push(Span::styled(format!(" {label}"), Theme::muted()));
        }
        spans
    }
}
