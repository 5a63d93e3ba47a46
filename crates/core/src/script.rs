//! Intro scripts: ordered, immutable lines tagged with a display class.

use crate::config::Plan;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const PRODUCT_NAME: &str = "GREEMLS";
const AUTHOR_CREDIT: &str = "César Sánchez";

/// Semantic category of a script line, used by hosts to pick a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineClass {
    /// Product banner
    Title,
    /// Author credit
    Author,
    /// Horizontal rule
    Rule,
    /// Section heading
    Heading,
    /// Command reference
    Command,
    /// Bullet point
    Bullet,
    /// Current subscription plan
    Plan,
    /// Upgrade or active-features banner
    Upsell,
    /// Price or premium mention
    Pricing,
    #[default]
    Plain,
}

impl LineClass {
    /// Derive a class from the line text.
    ///
    /// Checks run in a fixed precedence order, so a bullet that mentions a
    /// command is still a `Command`.
    pub fn classify(text: &str) -> Self {
        if text.contains(PRODUCT_NAME) {
            LineClass::Title
        } else if text.contains(AUTHOR_CREDIT) {
            LineClass::Author
        } else if text.contains('═') {
            LineClass::Rule
        } else if ["INSTRUCTIONS", "COMMANDS", "TIPS"].iter().any(|h| text.contains(h)) {
            LineClass::Heading
        } else if text.contains("greemls-") {
            LineClass::Command
        } else if text.contains('•') {
            LineClass::Bullet
        } else if text.contains("CURRENT PLAN") {
            LineClass::Plan
        } else if text.contains("UPGRADE") || text.contains("PREMIUM FEATURES") {
            LineClass::Upsell
        } else if text.contains("Premium") || text.contains('$') {
            LineClass::Pricing
        } else {
            LineClass::Plain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineClass::Title => "title",
            LineClass::Author => "author",
            LineClass::Rule => "rule",
            LineClass::Heading => "heading",
            LineClass::Command => "command",
            LineClass::Bullet => "bullet",
            LineClass::Plan => "plan",
            LineClass::Upsell => "upsell",
            LineClass::Pricing => "pricing",
            LineClass::Plain => "plain",
        }
    }
}

/// A single line of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub text: String,
    pub class: LineClass,
}

impl ScriptLine {
    /// Create a line with an explicit class
    pub fn new(text: impl Into<String>, class: LineClass) -> Self {
        Self { text: text.into(), class }
    }

    /// Create a line classified from its text
    pub fn classified(text: impl Into<String>) -> Self {
        let text = text.into();
        let class = LineClass::classify(&text);
        Self { text, class }
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The first `count` characters of the line, clamped to its length
    pub fn prefix(&self, count: usize) -> &str {
        match self.text.char_indices().nth(count) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

/// Ordered, immutable sequence of lines
///
/// Clones share the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    lines: Arc<[ScriptLine]>,
}

impl Script {
    pub fn new(lines: Vec<ScriptLine>) -> Self {
        Self { lines: lines.into() }
    }

    /// Build a script from plain strings, classifying each line
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(ScriptLine::classified).collect())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScriptLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    /// Total number of characters across all lines
    pub fn total_chars(&self) -> usize {
        self.lines.iter().map(ScriptLine::char_len).sum()
    }
}

impl<S: Into<String>> FromIterator<S> for Script {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_texts(iter)
    }
}

/// The GREEMLS boot terminal intro for the given plan.
///
/// Blank separator lines are dropped so every line has something to type.
pub fn intro_script(plan: Plan) -> Script {
    let plan_line = match plan {
        Plan::Free => "CURRENT PLAN: FREE (Basic features)",
        Plan::Premium => "CURRENT PLAN: PREMIUM (Hardened kernel + BusyBox)",
        Plan::PremiumPlus => "CURRENT PLAN: PREMIUM PLUS (RAM logging + Full forensics)",
    };

    let feature_lines: [&str; 5] = match plan {
        Plan::Free => [
            "UPGRADE AVAILABLE:",
            "• Premium ($29/month): Hardened kernel, offline scripts",
            "• Premium Plus ($59/month): RAM logging, 24/7 support",
            "",
            "",
        ],
        Plan::Premium => [
            "PREMIUM FEATURES ACTIVE:",
            "• Hardened Linux kernel enabled",
            "• BusyBox tools available",
            "",
            "",
        ],
        Plan::PremiumPlus => [
            "PREMIUM FEATURES ACTIVE:",
            "• Hardened Linux kernel enabled",
            "• BusyBox tools available",
            "• RAM-only logging active",
            "• Full forensic mode",
        ],
    };

    let lines = [
        "GREEMLS v1.0.0 - The Human Immunity System",
        "Developed by César Sánchez - Human Antivirus",
        "═══════════════════════════════════════════════════════════════",
        "",
        "USAGE INSTRUCTIONS:",
        "",
        "1. PREPARATION:",
        "   • Plug your USB into the infected machine",
        "   • Reboot and boot from USB (F12/F2/DEL in BIOS)",
        "   • Select 'GREEMLS Boot Menu'",
        "",
        "2. MAIN COMMANDS:",
        "   greemls-scan     → Full forensic scan (read-only)",
        "   greemls-clean    → Aggressive rootkit/bootkit cleanup",
        "   greemls-status   → System status and detected threats",
        "   greemls-export   → Export forensic logs to USB",
        "",
        "3. HUMAN ANTIVIRUS TIPS:",
        "   • 'Don't panic' - Stay calm to think clearly",
        "   • 'Watch its behavior' - Study how the malware acts",
        "   • 'Check your phone' - Malware is cross-platform",
        "   • 'Where you type a password, never type it twice'",
        "",
        plan_line,
        "",
    ]
    .into_iter()
    .chain(feature_lines)
    .chain(["", "Press ENTER to continue or ESC to exit...", ""]);

    lines.filter(|line| !line.is_empty()).collect()
}
