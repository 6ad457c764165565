// src/theme.rs
use ratatui::style::{Color, Modifier, Style};

/// Spacing and sizes, in terminal cells.
#[derive(Debug, Clone, Copy)]
pub struct Dimensions {
    pub spacing_small: u16,
    pub spacing_medium: u16,
    pub spacing_large: u16,

    pub padding_small: u16,
    pub padding_medium: u16,
    pub padding_large: u16,

    pub header_height: u16,
    pub hint_height: u16,
    /// Title line, publisher line and one spacer line.
    pub card_height: u16,
    pub back_button_width: u16,
    pub favourite_button_width: u16,
    pub button_height: u16,
}

pub const DIMENSIONS: Dimensions = Dimensions {
    spacing_small: 1,
    spacing_medium: 1,
    spacing_large: 2,

    padding_small: 1,
    padding_medium: 2,
    padding_large: 4,

    header_height: 3,
    hint_height: 1,
    card_height: 3,
    back_button_width: 10,
    favourite_button_width: 16,
    button_height: 3,
};

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Style,
    pub header: Style,
    pub card_title: Style,
    pub card_publisher: Style,
    pub selected_card: Style,
    pub muted: Style,
    pub error: Style,
    pub button: Style,
    pub favourite_button: Style,
    pub favourited_button: Style,
    pub scrollbar: Style,
}

pub const PALETTE: Palette = Palette {
    text: Style::new().fg(Color::White),
    header: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
    card_title: Style::new().add_modifier(Modifier::BOLD),
    card_publisher: Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    selected_card: Style::new().fg(Color::Yellow),
    muted: Style::new().fg(Color::DarkGray),
    error: Style::new().fg(Color::LightRed),
    button: Style::new().fg(Color::White),
    favourite_button: Style::new().fg(Color::Black).bg(Color::LightMagenta),
    favourited_button: Style::new().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
    scrollbar: Style::new().fg(Color::Gray),
};
