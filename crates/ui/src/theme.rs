use greemls_core::{LineClass, Plan};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Phosphor terminal theme for the GREEMLS intro
///
/// Green-on-black, with a handful of accents for headings, commands and
/// plan information.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Background: pure black (fills terminal)
    pub const BG: Color = Color::Rgb(0, 0, 0);

    /// Foreground: light gray (plain text)
    pub const FG: Color = Color::Rgb(209, 213, 219);

    /// Header and footer bars
    pub const PANEL_BG: Color = Color::Rgb(17, 24, 39);

    /// Primary accent: terminal green
    pub const GREEN: Color = Color::Rgb(74, 222, 128);

    /// Author and upsell accent
    pub const ORANGE: Color = Color::Rgb(251, 146, 60);

    /// Headings and pricing
    pub const YELLOW: Color = Color::Rgb(250, 204, 21);

    /// Commands
    pub const CYAN: Color = Color::Rgb(34, 211, 238);

    /// Current plan
    pub const PURPLE: Color = Color::Rgb(192, 132, 252);

    /// Bullets
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Prompt glyph and hints
    pub const MUTED: Color = Color::Rgb(107, 114, 128);

    /// Border color: dimmed green
    pub const BORDER: Color = Color::Rgb(22, 101, 52);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Panel style
    pub fn panel() -> Style {
        Style::default().fg(Self::GREEN).bg(Self::PANEL_BG)
    }

    /// Border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Muted style (for secondary text)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Prompt glyph shown before every line
    pub fn prompt() -> Span<'static> {
        Span::styled("$ ", Self::muted())
    }

    /// Block cursor, inverted green
    pub fn cursor() -> Style {
        Style::default().fg(Self::BG).bg(Self::GREEN)
    }

    /// Get the text color of a script line class
    pub fn line_class_color(class: LineClass) -> Color {
        match class {
            LineClass::Title | LineClass::Rule => Self::GREEN,
            LineClass::Author | LineClass::Upsell => Self::ORANGE,
            LineClass::Heading | LineClass::Pricing => Self::YELLOW,
            LineClass::Command => Self::CYAN,
            LineClass::Bullet => Self::WHITE,
            LineClass::Plan => Self::PURPLE,
            LineClass::Plain => Self::FG,
        }
    }

    /// Get the full style of a script line class
    pub fn line_class_style(class: LineClass) -> Style {
        let style = Style::default().fg(Self::line_class_color(class));
        match class {
            LineClass::Title
            | LineClass::Author
            | LineClass::Heading
            | LineClass::Command
            | LineClass::Plan
            | LineClass::Upsell => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }

    /// Get plan color
    pub fn plan_color(plan: Plan) -> Color {
        match plan {
            Plan::Free => Self::MUTED,
            Plan::Premium => Self::YELLOW,
            Plan::PremiumPlus => Self::PURPLE,
        }
    }

    /// Get span with plan styling
    pub fn plan_span(plan: Plan) -> Span<'static> {
        Span::styled(plan.as_str(), Style::default().fg(Self::plan_color(plan)))
    }
}
