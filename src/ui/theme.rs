use crate::layout::diagram::StyleToken;
use ratatui::style::Color;

pub struct Theme {
    pub sa_blue: Color,
    pub sa_white: Color,
    pub print_background: Color,
    pub hovered: Color,
    pub comment: Color,       // Grey
    pub primary: Color,       // Blue
    pub secondary: Color,     // Orange
    pub error: Color,         // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    sa_blue: Color::Rgb(22, 42, 78),
    sa_white: Color::Rgb(235, 240, 250),
    print_background: Color::Rgb(255, 255, 255),
    hovered: Color::Rgb(249, 226, 175),        // Yellow highlight
    comment: Color::Rgb(108, 112, 134),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    status_bg: Color::Rgb(50, 50, 70),
};

impl Theme {
    /// Concrete colour for a diagram style token
    pub fn token(&self, token: StyleToken) -> Color {
        match token {
            StyleToken::SaBlue => self.sa_blue,
            StyleToken::SaWhite => self.sa_white,
            StyleToken::PrintBackground => self.print_background,
            StyleToken::Hovered => self.hovered,
        }
    }
}
