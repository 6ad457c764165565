use crate::debounce::ClickDebouncer;
use crate::event::AppAction;
use crate::navigation::{NavHost, Route};
use crate::screens::details_screen::PodcastDetailsScreen;
use crate::screens::list_screen::PodcastListScreen;
use crate::view_model::PodcastListViewModel;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info, warn};
use ratatui::{Frame, Terminal, backend::Backend};
use std::io;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// App shell: the navigation host plus the screens mounted for its routes.
/// The list screen lives for the whole session; a details screen exists only
/// while its route is on top of the back stack.
pub struct App {
    pub should_quit: bool,
    nav_host: NavHost,
    list_screen: PodcastListScreen,
    details_screen: Option<PodcastDetailsScreen>,
}

impl App {
    pub fn new(view_model: PodcastListViewModel, debouncer: ClickDebouncer) -> App {
        App {
            should_quit: false,
            nav_host: NavHost::new(),
            list_screen: PodcastListScreen::new(view_model, debouncer),
            details_screen: None,
        }
    }

    /// Mounts the start destination. Needs a tokio runtime for the first fetch.
    pub fn on_mount(&mut self) {
        self.list_screen.on_mount();
    }

    pub fn sync_state(&mut self) -> bool {
        self.list_screen.sync_state()
    }

    pub fn list_screen(&self) -> &PodcastListScreen {
        &self.list_screen
    }

    pub fn details_screen(&self) -> Option<&PodcastDetailsScreen> {
        self.details_screen.as_ref()
    }

    pub fn nav_host(&self) -> &NavHost {
        &self.nav_host
    }

    // --- Input ---
    pub fn on_key(&mut self, key: KeyCode, now: Instant) {
        let action = match self.details_screen.as_mut() {
            Some(details) => details.on_key(key),
            None => self.list_screen.on_key(key, now),
        };
        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    pub fn on_mouse(&mut self, mouse_event: MouseEvent, now: Instant) {
        let action = match self.details_screen.as_mut() {
            Some(details) => details.on_mouse(mouse_event),
            None => self.list_screen.on_mouse(mouse_event, now),
        };
        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::ShowDetails(podcast) => {
                match self.nav_host.navigate(&Route::PodcastDetails { podcast }) {
                    Ok(()) => self.mount_current_route(),
                    Err(e) => error!("Failed to open podcast details: {}", e),
                }
            }
            AppAction::Back => {
                if self.nav_host.pop_back_stack() {
                    self.mount_current_route();
                } else {
                    warn!("back requested on the start destination");
                }
            }
            AppAction::Quit => self.should_quit = true,
        }
    }

    fn mount_current_route(&mut self) {
        match self.nav_host.current_route() {
            Ok(Route::PodcastList) => self.details_screen = None,
            Ok(Route::PodcastDetails { podcast }) => {
                self.details_screen = Some(PodcastDetailsScreen::new(podcast));
            }
            Err(e) => {
                error!("Cannot mount route: {}", e);
                self.nav_host.pop_back_stack();
                self.details_screen = None;
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.size();
        match self.details_screen.as_mut() {
            Some(details) => details.render(f, area),
            None => self.list_screen.render(f, area),
        }
    }
}

pub fn start_ui(mut app: App) -> Result<()> {
    // Set up the terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_loop(&mut terminal, &mut app);

    // Restore the terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!("UI loop failed: {:#}", e);
    }
    info!("UI closed");

    res
}

pub fn run_app_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    app.on_mount();

    while !app.should_quit {
        app.sync_state();
        terminal.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            // A result published while polling is drawn before the input is handled.
            if app.sync_state() {
                terminal.draw(|f| app.render(f))?;
            }
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    app.on_key(key_event.code, Instant::now());
                }
                Event::Mouse(mouse_event) => app.on_mouse(mouse_event, Instant::now()),
                _ => {}
            }
        }
    }

    Ok(())
}
