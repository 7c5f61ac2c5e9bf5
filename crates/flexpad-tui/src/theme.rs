//! Color palettes for the two appearances.

use flexpad_core::config::Appearance;
use ratatui::style::{Color, Modifier, Style};

/// Colors used across the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub warning: Color,
}

impl Theme {
    pub const DARK: Theme = Theme {
        background: Color::Black,
        text: Color::White,
        muted: Color::DarkGray,
        accent: Color::Cyan,
        border: Color::DarkGray,
        selection_bg: Color::Cyan,
        selection_fg: Color::Black,
        warning: Color::Yellow,
    };

    pub const LIGHT: Theme = Theme {
        background: Color::White,
        text: Color::Black,
        muted: Color::Gray,
        accent: Color::Blue,
        border: Color::Gray,
        selection_bg: Color::Blue,
        selection_fg: Color::White,
        warning: Color::Red,
    };

    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Self::DARK,
            Appearance::Light => Self::LIGHT,
        }
    }

    /// Base style: text on background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.background)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appearances_map_to_distinct_palettes() {
        assert_eq!(Theme::for_appearance(Appearance::Dark), Theme::DARK);
        assert_eq!(Theme::for_appearance(Appearance::Light), Theme::LIGHT);
        assert_ne!(Theme::DARK.background, Theme::LIGHT.background);
    }
}
