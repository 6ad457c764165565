// src/screens/list_screen.rs
use crate::debounce::ClickDebouncer;
use crate::event::AppAction;
use crate::podcast::Podcast;
use crate::screens::area_contains;
use crate::strings;
use crate::text::truncate_to_width;
use crate::theme::{DIMENSIONS, PALETTE};
use crate::view_model::{LoadStatus, PodcastListState, PodcastListViewModel};
use chrono::Local;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::rc::Rc;
use std::time::Instant;
use tokio::sync::watch;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const HIGHLIGHT_SYMBOL: &str = "> ";

pub struct PodcastListScreen {
    view_model: PodcastListViewModel,
    state_rx: watch::Receiver<PodcastListState>,
    snapshot: PodcastListState,
    debouncer: ClickDebouncer,
    list_ui_state: ListState,
    mounted: bool,
    /// Inner area of the card list as last drawn; used to hit-test clicks.
    cards_area: Rect,
    tick: usize,
}

impl PodcastListScreen {
    pub fn new(view_model: PodcastListViewModel, debouncer: ClickDebouncer) -> Self {
        let state_rx = view_model.subscribe();
        let snapshot = state_rx.borrow().clone();
        Self {
            view_model,
            state_rx,
            snapshot,
            debouncer,
            list_ui_state: ListState::default(),
            mounted: false,
            cards_area: Rect::default(),
            tick: 0,
        }
    }

    /// First display of the screen. Only the first call starts a fetch.
    pub fn on_mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.view_model.fetch();
    }

    pub fn refresh(&mut self) -> bool {
        self.view_model.fetch()
    }

    /// Pulls the latest published state. Returns `true` when it changed.
    pub fn sync_state(&mut self) -> bool {
        if !self.state_rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.snapshot = self.state_rx.borrow_and_update().clone();
        self.clamp_selection();
        true
    }

    pub fn state(&self) -> &PodcastListState {
        &self.snapshot
    }

    pub fn podcasts(&self) -> &[Podcast] {
        self.snapshot.podcasts()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.list_ui_state.selected()
    }

    pub fn selected_podcast(&self) -> Option<&Podcast> {
        self.selected_index().and_then(|i| self.podcasts().get(i))
    }

    fn clamp_selection(&mut self) {
        let len = self.podcasts().len();
        let selected = match self.list_ui_state.selected() {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) => Some(i.min(len - 1)),
        };
        self.list_ui_state.select(selected);
    }

    // =================================== Selection ===============================================
    pub fn select_next(&mut self) {
        let len = self.podcasts().len();
        if len == 0 {
            return;
        }
        let new_index = self.list_ui_state.selected().map_or(0, |i| (i + 1) % len);
        self.list_ui_state.select(Some(new_index));
    }

    pub fn select_prev(&mut self) {
        let len = self.podcasts().len();
        if len == 0 {
            return;
        }
        let new_index = self.list_ui_state.selected().map_or(len - 1, |i| (i + len - 1) % len);
        self.list_ui_state.select(Some(new_index));
    }

    // ===================================== Taps ==================================================

    /// A tap on card `index`. Forwarded as `ShowDetails` only if the debouncer accepts it.
    pub fn tap(&mut self, index: usize, now: Instant) -> Option<AppAction> {
        let podcast = self.podcasts().get(index)?.clone();
        if !self.debouncer.accept_at(now) {
            debug!("tap on '{}' dropped by debounce", podcast.title());
            return None;
        }
        info!("opening details for podcast {}", podcast.id());
        self.list_ui_state.select(Some(index));
        Some(AppAction::ShowDetails(podcast))
    }

    pub fn on_key(&mut self, key: KeyCode, now: Instant) -> Option<AppAction> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home => {
                let first = (!self.podcasts().is_empty()).then_some(0);
                self.list_ui_state.select(first);
            }
            KeyCode::End => {
                let last = self.podcasts().len().checked_sub(1);
                self.list_ui_state.select(last);
            }
            KeyCode::Enter => {
                let index = self.list_ui_state.selected()?;
                return self.tap(index, now);
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            KeyCode::Char('q') => return Some(AppAction::Quit),
            _ => {}
        }
        None
    }

    pub fn on_mouse(&mut self, mouse_event: MouseEvent, now: Instant) -> Option<AppAction> {
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let index = self.card_at(mouse_event.column, mouse_event.row)?;
                self.tap(index, now)
            }
            MouseEventKind::ScrollDown => {
                self.select_next();
                None
            }
            MouseEventKind::ScrollUp => {
                self.select_prev();
                None
            }
            _ => None,
        }
    }

    fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.cards_area;
        if !area_contains(area, column, row) {
            return None;
        }
        let index =
            self.list_ui_state.offset() + usize::from((row - area.y) / DIMENSIONS.card_height);
        (index < self.podcasts().len()).then_some(index)
    }

    // ==================================== Rendering ==============================================
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.tick = self.tick.wrapping_add(1);

        let chunks: Rc<[Rect]> = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(DIMENSIONS.header_height),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(DIMENSIONS.hint_height),
            ])
            .split(area);

        let header = Paragraph::new(Span::styled(strings::PODCASTS, PALETTE.header)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .padding(Padding::horizontal(DIMENSIONS.padding_medium)),
        );
        f.render_widget(header, chunks[0]);

        f.render_widget(self.status_line(), chunks[1]);

        if self.podcasts().is_empty() {
            self.cards_area = Rect::default();
            f.render_widget(self.empty_content(), chunks[2]);
        } else {
            self.render_cards(f, chunks[2]);
        }

        let hint =
            Paragraph::new(strings::LIST_HINT).style(PALETTE.muted).alignment(Alignment::Center);
        f.render_widget(hint, chunks[3]);
    }

    fn status_line(&self) -> Paragraph<'static> {
        let line = match (self.snapshot.status(), self.podcasts().is_empty()) {
            (LoadStatus::Failed(msg), false) => Line::from(Span::styled(
                format!("{}: {} ({})", strings::LOAD_FAILED, msg, strings::RETRY_HINT),
                PALETTE.error,
            )),
            (LoadStatus::Loading, false) => {
                Line::from(Span::styled(format!("{} Refreshing", self.spinner()), PALETTE.muted))
            }
            (LoadStatus::Loaded, false) => match self.snapshot.last_updated() {
                Some(at) => Line::from(Span::styled(
                    format!(
                        "{} podcasts, updated {}",
                        self.podcasts().len(),
                        at.with_timezone(&Local).format("%H:%M:%S")
                    ),
                    PALETTE.muted,
                )),
                None => Line::default(),
            },
            _ => Line::default(),
        };
        Paragraph::new(line)
            .block(Block::default().padding(Padding::horizontal(DIMENSIONS.padding_medium)))
    }

    fn empty_content(&self) -> Paragraph<'static> {
        let lines: Vec<Line> = match self.snapshot.status() {
            LoadStatus::Loading => {
                vec![Line::from(format!("{} {}", self.spinner(), strings::LOADING))]
            }
            LoadStatus::Loaded => {
                vec![Line::from(Span::styled(strings::NO_PODCASTS, PALETTE.muted))]
            }
            LoadStatus::Failed(msg) => vec![
                Line::from(Span::styled(strings::LOAD_FAILED, PALETTE.error)),
                Line::from(Span::styled(msg.clone(), PALETTE.muted)),
                Line::default(),
                Line::from(strings::RETRY_HINT),
            ],
        };
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::vertical(DIMENSIONS.spacing_large)))
    }

    fn render_cards(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default().padding(Padding::horizontal(DIMENSIONS.padding_medium));
        let inner = block.inner(area);
        self.cards_area = inner;

        let text_width = usize::from(inner.width).saturating_sub(HIGHLIGHT_SYMBOL.len());
        let items: Vec<ListItem> = self
            .podcasts()
            .iter()
            .map(|podcast| {
                let title = truncate_to_width(podcast.title(), text_width);
                let publisher = truncate_to_width(podcast.publisher(), text_width);
                ListItem::new(Text::from(vec![
                    Line::from(Span::styled(title, PALETTE.card_title)),
                    Line::from(Span::styled(publisher, PALETTE.card_publisher)),
                    Line::default(),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .style(PALETTE.text)
            .highlight_style(PALETTE.selected_card)
            .highlight_symbol(HIGHLIGHT_SYMBOL);
        f.render_stateful_widget(list, area, &mut self.list_ui_state);
    }

    fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast_repository::FakeRepository;
    use crate::test_support::{buffer_lines, podcast};
    use crate::view_model::DEFAULT_FETCH_TIMEOUT;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use std::time::Duration;

    fn screen_with(repository: FakeRepository) -> (PodcastListScreen, Arc<FakeRepository>) {
        let repository = Arc::new(repository);
        let view_model = PodcastListViewModel::new(repository.clone(), DEFAULT_FETCH_TIMEOUT);
        (PodcastListScreen::new(view_model, ClickDebouncer::default()), repository)
    }

    async fn mount_and_settle(screen: &mut PodcastListScreen) {
        let mut rx = screen.view_model.subscribe();
        screen.on_mount();
        rx.wait_for(|state| !state.is_loading()).await.unwrap();
        assert!(screen.sync_state());
    }

    fn draw(screen: &mut PodcastListScreen) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| screen.render(f, f.size())).unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    fn row_of(lines: &[String], needle: &str) -> Option<usize> {
        lines.iter().position(|line| line.contains(needle))
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let (mut screen, repository) = screen_with(FakeRepository::with_podcasts(vec![podcast("1", "A", "P1")]));

        mount_and_settle(&mut screen).await;
        screen.on_mount();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(repository.calls(), 1);
        assert_eq!(screen.selected_index(), Some(0));
    }

    #[tokio::test]
    async fn test_loading_indicator_while_empty() {
        let (mut screen, _) = screen_with(
            FakeRepository::with_podcasts(vec![podcast("1", "A", "P1")]).with_delay(Duration::from_secs(5)),
        );
        screen.on_mount();

        let lines = draw(&mut screen);
        assert!(row_of(&lines, strings::LOADING).is_some());
        assert!(row_of(&lines, strings::PODCASTS).is_some());
    }

    #[tokio::test]
    async fn test_cards_render_in_published_order() {
        let (mut screen, _) = screen_with(FakeRepository::with_podcasts(vec![
            podcast("2", "Second Show", "Pub Two"),
            podcast("1", "First Show", "Pub One"),
        ]));
        mount_and_settle(&mut screen).await;

        let lines = draw(&mut screen);
        let second = row_of(&lines, "Second Show").unwrap();
        let first = row_of(&lines, "First Show").unwrap();
        assert!(second < first);
        assert_eq!(row_of(&lines, "Pub Two"), Some(second + 1));
        assert!(row_of(&lines, strings::LOADING).is_none());
    }

    #[tokio::test]
    async fn test_empty_catalog_is_not_loading() {
        let (mut screen, _) = screen_with(FakeRepository::with_podcasts(vec![]));
        mount_and_settle(&mut screen).await;

        let lines = draw(&mut screen);
        assert!(row_of(&lines, strings::NO_PODCASTS).is_some());
        assert!(row_of(&lines, strings::LOADING).is_none());
        assert_eq!(screen.selected_index(), None);
    }

    #[tokio::test]
    async fn test_enter_taps_are_debounced() {
        let (mut screen, _) = screen_with(FakeRepository::with_podcasts(vec![
            podcast("1", "A", "P1"),
            podcast("2", "B", "P2"),
        ]));
        mount_and_settle(&mut screen).await;
        let t0 = Instant::now();

        let action = screen.on_key(KeyCode::Enter, t0);
        assert!(matches!(action, Some(AppAction::ShowDetails(p)) if p.id().as_str() == "1"));

        screen.on_key(KeyCode::Down, t0);
        assert_eq!(screen.on_key(KeyCode::Enter, t0 + Duration::from_millis(500)), None);

        let action = screen.on_key(KeyCode::Enter, t0 + Duration::from_millis(1500));
        assert!(matches!(action, Some(AppAction::ShowDetails(p)) if p.id().as_str() == "2"));
    }

    #[tokio::test]
    async fn test_click_on_card_taps_it() {
        let (mut screen, _) = screen_with(FakeRepository::with_podcasts(vec![
            podcast("1", "A", "P1"),
            podcast("2", "B", "P2"),
        ]));
        mount_and_settle(&mut screen).await;
        let lines = draw(&mut screen);
        let row = row_of(&lines, "P2").unwrap() as u16;

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        let action = screen.on_mouse(click, Instant::now());
        assert!(matches!(action, Some(AppAction::ShowDetails(p)) if p.id().as_str() == "2"));
        assert_eq!(screen.selected_index(), Some(1));

        // The header is not a card.
        let header_click = MouseEvent { row: 0, ..click };
        assert_eq!(screen.on_mouse(header_click, Instant::now() + Duration::from_secs(5)), None);
    }

    #[tokio::test]
    async fn test_selection_wraps() {
        let (mut screen, _) = screen_with(FakeRepository::with_podcasts(vec![
            podcast("1", "A", "P1"),
            podcast("2", "B", "P2"),
            podcast("3", "C", "P3"),
        ]));
        mount_and_settle(&mut screen).await;

        screen.on_key(KeyCode::Up, Instant::now());
        assert_eq!(screen.selected_podcast().map(|p| p.id().as_str()), Some("3"));
        screen.on_key(KeyCode::Down, Instant::now());
        assert_eq!(screen.selected_index(), Some(0));
        screen.on_key(KeyCode::End, Instant::now());
        assert_eq!(screen.selected_index(), Some(2));
        screen.on_key(KeyCode::Home, Instant::now());
        assert_eq!(screen.selected_index(), Some(0));
    }

    // SAD PATHS

    #[tokio::test]
    async fn test_failure_is_shown_instead_of_cards() {
        let (mut screen, repository) = screen_with(FakeRepository::failing(502));
        mount_and_settle(&mut screen).await;

        assert!(screen.podcasts().is_empty());
        assert!(matches!(screen.state().status(), LoadStatus::Failed(_)));
        let lines = draw(&mut screen);
        assert!(row_of(&lines, strings::LOAD_FAILED).is_some());
        assert!(row_of(&lines, strings::LOADING).is_none());
        assert_eq!(screen.on_key(KeyCode::Enter, Instant::now()), None);

        // Manual retry hits the repository again.
        assert!(screen.refresh());
        let mut rx = screen.view_model.subscribe();
        rx.wait_for(|state| !state.is_loading()).await.unwrap();
        assert_eq!(repository.calls(), 2);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let (mut screen, _) = screen_with(FakeRepository::with_podcasts(vec![]));
        assert_eq!(screen.on_key(KeyCode::Char('q'), Instant::now()), Some(AppAction::Quit));
    }
}
