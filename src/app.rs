// App state and main event loop.
// Maps keys to commands, runs fetches on spawned tasks, and applies their results.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::client::ItemSource;
use crate::config::ClientConfig;
use crate::model::{Item, Stats};
use crate::state::{
    ActiveFlag, DetailController, FetchOutcome, ItemsController, LoadingState, NavigationStack,
    SearchInput, ViewLevel, fetch_item, fetch_page,
};
use crate::ui;

/// Network work requested by the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the current page and filtered total.
    FetchPage,
    /// Load one item for the detail view.
    LoadItem(u64),
    FetchStats,
}

/// Results reported back by spawned fetch tasks.
#[derive(Debug)]
pub enum AppEvent {
    Page {
        flag: ActiveFlag,
        outcome: FetchOutcome,
    },
    Detail {
        flag: ActiveFlag,
        result: Result<Item, String>,
    },
    Stats(Result<Stats, String>),
}

/// Everything the views render from. Holds no network handles.
#[derive(Debug)]
pub struct BrowserState {
    pub items: ItemsController,
    pub detail: DetailController,
    pub search: SearchInput,
    pub nav: NavigationStack,
    pub stats: LoadingState<Stats>,
    /// One-shot message shown in the status bar until the next key press.
    pub notice: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub backend_url: String,
}

impl BrowserState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            items: ItemsController::new(config.page_size, config.retry),
            detail: DetailController::new(),
            search: SearchInput::default(),
            nav: NavigationStack::default(),
            stats: LoadingState::Idle,
            notice: None,
            show_help: false,
            should_quit: false,
            backend_url: config.base_url.clone(),
        }
    }

    pub fn in_detail(&self) -> bool {
        matches!(self.nav.current(), ViewLevel::Detail { .. })
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }
        self.notice = None;

        if self.search.editing {
            return self.handle_search_key(key.code, now);
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Vec::new()
            }
            _ if self.in_detail() => self.handle_detail_key(key.code),
            _ => self.handle_list_key(key.code),
        }
    }

    fn handle_search_key(&mut self, code: KeyCode, now: Instant) -> Vec<Command> {
        match code {
            KeyCode::Char(c) => self.search.push(c, now),
            KeyCode::Backspace => self.search.pop(now),
            KeyCode::Enter => {
                self.search.stop_editing();
                if let Some(text) = self.search.flush() {
                    return self.apply_search(text);
                }
            }
            KeyCode::Esc => self.search.stop_editing(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_list_key(&mut self, code: KeyCode) -> Vec<Command> {
        match code {
            KeyCode::Char('/') => self.search.start_editing(),
            KeyCode::Up | KeyCode::Char('k') => self.items.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.items.select_next(),
            KeyCode::Left | KeyCode::Char('h') => {
                if self.items.prev_page() {
                    return vec![Command::FetchPage];
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.items.next_page() {
                    return vec![Command::FetchPage];
                }
            }
            KeyCode::Enter => {
                if let Some(item) = self.items.selected_item() {
                    let id = item.id;
                    self.nav.push(ViewLevel::Detail {
                        id,
                        name: item.name.clone(),
                    });
                    return vec![Command::LoadItem(id)];
                }
            }
            KeyCode::Char('r') => return vec![Command::FetchPage, Command::FetchStats],
            _ => {}
        }
        Vec::new()
    }

    fn handle_detail_key(&mut self, code: KeyCode) -> Vec<Command> {
        match code {
            KeyCode::Esc | KeyCode::Backspace => self.go_back(),
            KeyCode::Char('r') => {
                if let ViewLevel::Detail { id, .. } = self.nav.current() {
                    return vec![Command::LoadItem(*id)];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    /// Drop in-flight fetches and any uncommitted search on exit.
    pub fn shutdown(&mut self) {
        self.items.cancel();
        self.detail.cancel();
        self.search.cancel();
    }

    fn go_back(&mut self) {
        self.detail.cancel();
        self.nav.pop();
    }

    fn apply_search(&mut self, text: String) -> Vec<Command> {
        if self.items.set_search(text) {
            vec![Command::FetchPage]
        } else {
            Vec::new()
        }
    }

    /// Commit the search once typing has paused.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        match self.search.take_due(now) {
            Some(text) => self.apply_search(text),
            None => Vec::new(),
        }
    }

    /// Apply a result from a fetch task.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Page { flag, outcome } => {
                if !self.items.apply(&flag, outcome) {
                    debug!("dropped stale page result");
                }
            }
            AppEvent::Detail { flag, result } => {
                if !self.detail.apply(&flag, result) {
                    debug!("dropped stale item result");
                    return;
                }
                if let Some(error) = self.detail.item.error().map(str::to_string) {
                    self.go_back();
                    self.notice = Some(error);
                }
            }
            AppEvent::Stats(Ok(stats)) => self.stats = LoadingState::Loaded(stats),
            AppEvent::Stats(Err(e)) => self.stats = LoadingState::Error(e),
        }
    }
}

/// Main application: view state plus the tasks feeding it.
pub struct App<S> {
    pub state: BrowserState,
    source: S,
    runtime: Handle,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl<S: ItemSource + Clone + 'static> App<S> {
    pub fn new(source: S, config: &ClientConfig, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: BrowserState::new(config),
            source,
            runtime,
            tx,
            rx,
        }
    }

    /// Kick off the initial page and stats fetches.
    pub fn start(&mut self) {
        self.execute(Command::FetchPage);
        self.execute(Command::FetchStats);
    }

    pub fn execute(&mut self, command: Command) {
        let source = self.source.clone();
        let tx = self.tx.clone();

        match command {
            Command::FetchPage => {
                let (query, flag) = self.state.items.begin_fetch();
                let retry = self.state.items.retry_policy();
                self.runtime.spawn(async move {
                    let outcome = fetch_page(&source, &query, &retry, &flag).await;
                    // Receiver is gone once the app has exited
                    let _ = tx.send(AppEvent::Page { flag, outcome });
                });
            }
            Command::LoadItem(id) => {
                let flag = self.state.detail.begin(id);
                self.runtime.spawn(async move {
                    let result = fetch_item(&source, id).await;
                    let _ = tx.send(AppEvent::Detail { flag, result });
                });
            }
            Command::FetchStats => {
                if !self.state.stats.is_loaded() {
                    self.state.stats = LoadingState::Loading;
                }
                self.runtime.spawn(async move {
                    let result = source.stats().await.map_err(|e| {
                        warn!(error = %e, "stats fetch failed");
                        format!("Failed to fetch stats: {e}")
                    });
                    let _ = tx.send(AppEvent::Stats(result));
                });
            }
        }
    }

    fn execute_all(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.execute(command);
        }
    }

    /// Apply every result reported so far. Returns how many were applied.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.state.apply(event);
            applied += 1;
        }
        applied
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        info!(backend = %self.state.backend_url, "browser started");
        self.start();

        while !self.state.should_quit {
            self.drain_events();
            let commands = self.state.tick(Instant::now());
            self.execute_all(commands);

            terminal.draw(|frame| ui::draw(frame, &mut self.state))?;
            self.handle_events()?;
        }

        self.state.shutdown();
        info!("browser stopped");
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let commands = self.state.handle_key(key, Instant::now());
                    self.execute_all(commands);
                }
            }
        }
        Ok(())
    }
}
