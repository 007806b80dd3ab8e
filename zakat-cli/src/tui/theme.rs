//! Gold/Emerald dashboard theme on a dark slate background.

use ratatui::style::{Color, Modifier, Style};

use zakat_calc::WealthType;

/// The main theme struct containing all colors and pre-computed styles.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Metallic gold - primary accent color
    pub gold: Color,
    /// Islamic emerald green - success and positive values
    pub emerald: Color,
    /// Dark slate - main background
    pub slate: Color,
    /// Light slate - panel/card borders
    pub slate_light: Color,

    pub text_primary: Color,
    pub text_muted: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            gold: Color::Rgb(212, 175, 55),
            emerald: Color::Rgb(16, 185, 129),
            slate: Color::Rgb(15, 23, 42),
            slate_light: Color::Rgb(30, 41, 59),
            text_primary: Color::Rgb(248, 250, 252),
            text_muted: Color::Rgb(148, 163, 184),
            error: Color::Rgb(239, 68, 68),
            accent: Color::Cyan,
        }
    }
}

impl Theme {
    /// Title style - bold gold text
    pub fn title(&self) -> Style {
        Style::default().fg(self.gold).add_modifier(Modifier::BOLD)
    }

    /// Subtitle/label style - muted text
    pub fn subtitle(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn border_active(&self) -> Style {
        Style::default().fg(self.gold)
    }

    pub fn border_inactive(&self) -> Style {
        Style::default().fg(self.slate_light)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.emerald).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn bg(&self) -> Style {
        Style::default().bg(self.slate)
    }

    /// Bar color for a wealth category.
    pub fn wealth_color(&self, wealth_type: WealthType) -> Color {
        match wealth_type {
            WealthType::Gold => self.gold,
            WealthType::Silver => Color::Rgb(192, 192, 192),
            WealthType::Cash => self.emerald,
            WealthType::OtherAssets => self.accent,
        }
    }
}

/// Global theme instance.
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

pub fn theme() -> &'static Theme {
    &THEME
}

pub mod icons {
    pub const MOON: &str = "☾";
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const BULLET: &str = "•";
    pub const SEPARATOR: &str = "│";
}
