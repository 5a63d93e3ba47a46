use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout breakpoints for the intro overlay
///
/// - >= 80 cols: Full layout with padded body
/// - < 80 cols: Compact layout, no body padding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Padded body (>= 80 columns)
    Full,
    /// Compact layout (<= 79 columns)
    Compact,
}

impl From<u16> for LayoutMode {
    fn from(width: u16) -> Self {
        match width {
            w if w >= 80 => Self::Full,
            _ => Self::Compact,
        }
    }
}

impl LayoutMode {
    /// Horizontal padding around the body text
    pub fn body_padding(&self) -> u16 {
        match self {
            Self::Full => 3,
            Self::Compact => 1,
        }
    }
}

/// Calculated layout for the intro overlay
#[derive(Debug, Clone)]
pub struct IntroLayout {
    /// Layout mode based on terminal width
    pub mode: LayoutMode,
    /// Header bar (3 lines with border)
    pub header: Rect,
    /// Scrolling terminal body
    pub body: Rect,
    /// Footer bar (3 lines with border)
    pub footer: Rect,
}

impl IntroLayout {
    pub fn calculate(area: Rect) -> Self {
        let mode = LayoutMode::from(area.width);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let padding = mode.body_padding();
        let body = Rect {
            x: chunks[1].x + padding,
            y: chunks[1].y + 1,
            width: chunks[1].width.saturating_sub(padding * 2),
            height: chunks[1].height.saturating_sub(1),
        };

        Self { mode, header: chunks[0], body, footer: chunks[2] }
    }

    /// Height reserved at the bottom of the body for the ready panel
    pub const READY_PANEL_HEIGHT: u16 = 5;

    /// Split the body into (lines, ready panel)
    pub fn body_with_ready_panel(&self) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(Self::READY_PANEL_HEIGHT)])
            .split(self.body);

        (chunks[0], chunks[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mode_breakpoints() {
        assert_eq!(LayoutMode::from(120), LayoutMode::Full);
        assert_eq!(LayoutMode::from(80), LayoutMode::Full);
        assert_eq!(LayoutMode::from(79), LayoutMode::Compact);
        assert_eq!(LayoutMode::from(20), LayoutMode::Compact);
    }

    #[test]
    fn test_layout_full() {
        let layout = IntroLayout::calculate(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.mode, LayoutMode::Full);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.footer.height, 3);
        assert_eq!(layout.body.x, 3);
        assert_eq!(layout.body.width, 94);
        assert_eq!(layout.body.y, 4);
        assert_eq!(layout.body.height, 23);
    }

    #[test]
    fn test_layout_compact() {
        let layout = IntroLayout::calculate(Rect::new(0, 0, 60, 20));
        assert_eq!(layout.mode, LayoutMode::Compact);
        assert_eq!(layout.body.x, 1);
        assert_eq!(layout.body.width, 58);
    }

    #[test]
    fn test_layout_tiny_terminal() {
        let layout = IntroLayout::calculate(Rect::new(0, 0, 1, 4));
        assert_eq!(layout.body.width, 0);
    }

    #[test]
    fn test_ready_panel_split() {
        let layout = IntroLayout::calculate(Rect::new(0, 0, 100, 30));
        let (lines, panel) = layout.body_with_ready_panel();
        assert_eq!(panel.height, IntroLayout::READY_PANEL_HEIGHT);
        assert_eq!(lines.height + panel.height, layout.body.height);
    }
}
