// src/screens/details_screen.rs
use crate::event::AppAction;
use crate::podcast::Podcast;
use crate::screens::{area_contains, centered_horizontally};
use crate::strings;
use crate::text::{strip_markup, truncate_to_width};
use crate::theme::{DIMENSIONS, PALETTE};
use crate::widgets::scrollable_paragraph::ScrollableParagraphState;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use log::debug;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{
        Block, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
};
use std::rc::Rc;

/// Detail view for one podcast. Owns its copy of the podcast; the favourite flag
/// lives and dies with this instance.
pub struct PodcastDetailsScreen {
    podcast: Podcast,
    is_favourited: bool,
    back_clicked: bool,
    description: ScrollableParagraphState,
    back_button_area: Rect,
    favourite_button_area: Rect,
}

impl PodcastDetailsScreen {
    pub fn new(podcast: Podcast) -> Self {
        let description = match strip_markup(podcast.description()) {
            text if text.is_empty() => strings::NO_DESCRIPTION.to_string(),
            text => text,
        };
        Self {
            podcast,
            is_favourited: false,
            back_clicked: false,
            description: ScrollableParagraphState::new(description),
            back_button_area: Rect::default(),
            favourite_button_area: Rect::default(),
        }
    }

    pub fn podcast(&self) -> &Podcast {
        &self.podcast
    }

    pub fn is_favourited(&self) -> bool {
        self.is_favourited
    }

    pub fn description_text(&self) -> &str {
        &self.description.content
    }

    pub fn favourite_label(&self) -> &'static str {
        if self.is_favourited { strings::FAVOURITED } else { strings::FAVOURITE }
    }

    /// Yields `Back` the first time only, so a burst of presses pops one screen.
    pub fn back(&mut self) -> Option<AppAction> {
        if self.back_clicked {
            debug!("back already requested, ignoring");
            return None;
        }
        self.back_clicked = true;
        Some(AppAction::Back)
    }

    pub fn toggle_favourite(&mut self) {
        self.is_favourited = !self.is_favourited;
        debug!("podcast {} favourited: {}", self.podcast.id(), self.is_favourited);
    }

    pub fn on_key(&mut self, key: KeyCode) -> Option<AppAction> {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                return self.back();
            }
            KeyCode::Char('f') | KeyCode::Char(' ') => self.toggle_favourite(),
            KeyCode::Down | KeyCode::Char('j') => self.description.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.description.scroll_up(1),
            KeyCode::PageDown => self.description.scroll_down(self.description.page_size()),
            KeyCode::PageUp => self.description.scroll_up(self.description.page_size()),
            KeyCode::Char('q') => return Some(AppAction::Quit),
            _ => {}
        }
        None
    }

    pub fn on_mouse(&mut self, mouse_event: MouseEvent) -> Option<AppAction> {
        let (column, row) = (mouse_event.column, mouse_event.row);
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if area_contains(self.back_button_area, column, row) {
                    return self.back();
                }
                if area_contains(self.favourite_button_area, column, row) {
                    self.toggle_favourite();
                }
            }
            MouseEventKind::ScrollDown => self.description.scroll_down(1),
            MouseEventKind::ScrollUp => self.description.scroll_up(1),
            _ => {}
        }
        None
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks: Rc<[Rect]> = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(DIMENSIONS.spacing_small),
                Constraint::Length(DIMENSIONS.button_height), // back
                Constraint::Length(DIMENSIONS.spacing_medium),
                Constraint::Length(1), // title
                Constraint::Length(1), // publisher
                Constraint::Length(DIMENSIONS.spacing_medium),
                Constraint::Length(1), // artwork
                Constraint::Length(DIMENSIONS.spacing_medium),
                Constraint::Length(DIMENSIONS.button_height), // favourite
                Constraint::Length(DIMENSIONS.spacing_medium),
                Constraint::Min(0), // description
                Constraint::Length(DIMENSIONS.hint_height),
            ])
            .split(area);
        let text_width = usize::from(area.width.saturating_sub(2 * DIMENSIONS.padding_large));

        // === Back ===
        self.back_button_area = Rect {
            x: chunks[1].x + DIMENSIONS.padding_small,
            width: DIMENSIONS.back_button_width,
            ..chunks[1]
        }
        .intersection(chunks[1]);
        let back_button = Paragraph::new(format!("< {}", strings::BACK))
            .style(PALETTE.button)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(back_button, self.back_button_area);

        // === Title / publisher ===
        let title = truncate_to_width(self.podcast.title(), text_width);
        f.render_widget(
            Paragraph::new(Span::styled(title, PALETTE.header)).alignment(Alignment::Center),
            chunks[3],
        );
        let publisher = truncate_to_width(self.podcast.publisher(), text_width);
        f.render_widget(
            Paragraph::new(Span::styled(publisher, PALETTE.card_publisher))
                .alignment(Alignment::Center),
            chunks[4],
        );

        // === Artwork ===
        let artwork_line = if self.podcast.image().is_empty() {
            Line::from(Span::styled(strings::NO_ARTWORK, PALETTE.muted))
        } else {
            let url = truncate_to_width(self.podcast.image(), text_width);
            Line::from(Span::styled(url, PALETTE.muted))
        };
        f.render_widget(Paragraph::new(artwork_line).alignment(Alignment::Center), chunks[6]);

        // === Favourite ===
        self.favourite_button_area =
            centered_horizontally(chunks[8], DIMENSIONS.favourite_button_width);
        let favourite_style =
            if self.is_favourited { PALETTE.favourited_button } else { PALETTE.favourite_button };
        let favourite_button = Paragraph::new(self.favourite_label())
            .style(favourite_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(favourite_style));
        f.render_widget(favourite_button, self.favourite_button_area);

        // === Description ===
        let description_block =
            Block::default().padding(Padding::horizontal(DIMENSIONS.padding_large));
        let inner = description_block.inner(chunks[10]);
        self.description.set_dimensions(inner.width, inner.height);

        let description = Paragraph::new(self.description.content.as_str())
            .style(PALETTE.text)
            .wrap(Wrap { trim: true })
            .block(description_block)
            .scroll((self.description.scroll_offset_vertical, 0));
        f.render_widget(description, chunks[10]);

        if self.description.max_scroll() > 0 {
            let mut scrollbar_state = ScrollbarState::new(usize::from(self.description.max_scroll()))
                .position(usize::from(self.description.scroll_offset_vertical));
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(PALETTE.scrollbar);
            f.render_stateful_widget(scrollbar, chunks[10], &mut scrollbar_state);
        }

        // === Hint ===
        let hint =
            Paragraph::new(strings::DETAILS_HINT).style(PALETTE.muted).alignment(Alignment::Center);
        f.render_widget(hint, chunks[11]);
    }
}
