use crate::theme::Theme;

use greemls_core::Plan;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Panel shown once the intro has been typed out
pub struct ReadyPanel {
    plan: Plan,
}

impl ReadyPanel {
    pub fn new(plan: Plan) -> Self {
        Self { plan }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::GREEN))
            .title(Span::styled(" SYSTEM READY ", Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD)));

        frame.render_widget(Paragraph::new(self.lines()).style(Theme::base()).block(block), area);
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Theme::GREEN)),
            Span::styled("GREEMLS armed on plan ", Theme::base()),
            Theme::plan_span(self.plan),
            Span::styled(". Press ENTER to continue.", Theme::base()),
        ])];

        if self.plan == Plan::Free {
            lines.push(Line::from(Span::styled(
                "Upgrade to Premium to skip the intro and unlock the hardened kernel.",
                Style::default().fg(Theme::ORANGE),
            )));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_free_plan_shows_upgrade_hint() {
        let lines = ReadyPanel::new(Plan::Free).lines();
        assert_eq!(lines.len(), 2);
        assert!(text(&lines).contains("Upgrade to Premium"));
    }

    #[test]
    fn test_paid_plan_has_no_upgrade_hint() {
        let lines = ReadyPanel::new(Plan::PremiumPlus).lines();
        assert_eq!(lines.len(), 1);
        assert!(text(&lines).contains("premium-plus"));
        assert!(!text(&lines).contains("Upgrade"));
    }
}
