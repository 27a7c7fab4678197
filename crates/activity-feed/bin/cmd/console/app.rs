use activity_feed::{
    render_entry_lenient, spawn_fetch, ActivityFeed, Debouncer, FeedConfig, FeedError, LoadOutcome,
    LoadState, RenderedEntry, SessionStore, TypeSelection,
};
use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use eyre::Result;
use ratatui::{
    layout::{Constraint, Layout},
    widgets::TableState,
    DefaultTerminal, Frame,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::state::Focus;
use super::views::bottom_bar::render_bottom_bar;
use super::views::filters::render_filters_bar;
use super::views::main_view::render_main_view;
use crate::cmd::source_args::SourceArgs;

#[derive(Debug, Parser)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub(crate) struct App {
    args: SourceArgs,
    config: FeedConfig,
    store: SessionStore,
    feed: ActivityFeed,
    rendered: Vec<RenderedEntry>,
    loaded_generation: u64,
    pending: Option<Receiver<LoadOutcome>>,
    search_input: String,
    debouncer: Debouncer<String>,
    focus: Focus,
    table_state: TableState,
    inspected: Option<RenderedEntry>,
    list_height: usize,
    #[cfg(feature = "dev")]
    last_render_duration: Duration,
    tick: usize,
    exit: bool,
}

impl ConsoleArgs {
    pub fn run(&self) -> Result<()> {
        let config = self.source.config();
        let store = self.source.session_store(&config);

        let mut app = App {
            args: self.source.clone(),
            feed: ActivityFeed::from_config(&config),
            debouncer: Debouncer::new(config.debounce),
            loaded_generation: store.generation(),
            config,
            store,
            rendered: Vec::new(),
            pending: None,
            search_input: String::new(),
            focus: Focus::List,
            table_state: TableState::default(),
            inspected: None,
            list_height: 0,
            #[cfg(feature = "dev")]
            last_render_duration: Duration::from_millis(0),
            tick: 0,
            exit: false,
        };

        let mut terminal = ratatui::init();
        let app_result = app.run(&mut terminal);
        ratatui::restore();
        app_result.map_err(|e| eyre::eyre!("TUI error: {}", e))
    }
}

impl App {
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        self.start_load();

        while !self.exit {
            self.sync_session();
            self.poll_load();
            self.poll_search(Instant::now());

            #[cfg(feature = "dev")]
            let render_start = Instant::now();
            terminal.draw(|frame| self.draw(frame))?;
            #[cfg(feature = "dev")]
            {
                self.last_render_duration = render_start.elapsed();
            }

            self.handle_events()?;
            self.tick = self.tick.wrapping_add(1);
        }
        Ok(())
    }

    fn start_load(&mut self) {
        let ticket = self.feed.begin_load();
        let source = self.args.source(&self.config, &self.store);
        info!(
            source = %self.args.describe(&self.store),
            ticket = ticket.0,
            "loading activity log"
        );

        match spawn_fetch(source, ticket) {
            Ok(rx) => self.pending = Some(rx),
            Err(e) => {
                self.pending = None;
                self.feed.finish_load(ticket, Err(e));
            }
        }
        self.loaded_generation = self.store.generation();
        self.refresh_rendered();
    }

    /// Drops everything loaded for a previous team or cookie and starts over.
    fn sync_session(&mut self) {
        if self.store.generation() != self.loaded_generation {
            self.feed.invalidate();
            self.close_inspect();
            self.table_state.select(None);
            self.start_load();
        }
    }

    fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };

        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                if self.feed.finish_load(outcome.ticket, outcome.result) {
                    self.reset_selection();
                    self.refresh_rendered();
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                let ticket = self.feed.current_ticket();
                self.feed.finish_load(
                    ticket,
                    Err(FeedError::Io(io::Error::other("log loader exited unexpectedly"))),
                );
            }
        }
    }

    fn poll_search(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.apply_search(&query);
        }
    }

    fn apply_search(&mut self, query: &str) {
        self.feed.set_search(query);
        self.reset_selection();
        self.refresh_rendered();
    }

    fn set_type_filter(&mut self, selection: TypeSelection) {
        self.feed.set_type_filter(selection);
        self.reset_selection();
        self.refresh_rendered();
    }

    fn refresh_rendered(&mut self) {
        self.rendered = self
            .feed
            .window_entries()
            .map(render_entry_lenient)
            .collect();
    }

    fn reset_selection(&mut self) {
        *self.table_state.offset_mut() = 0;
        if self.feed.view_len() > 0 {
            self.table_state.select(Some(0));
        } else {
            self.table_state.select(None);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

        render_filters_bar(
            frame,
            chunks[0],
            &self.search_input,
            self.focus == Focus::Search,
            self.debouncer.is_pending(),
            self.feed.type_selection(),
            !matches!(self.feed.state(), LoadState::Ready),
        );

        // borders and the header row
        self.list_height = chunks[1].height.saturating_sub(3) as usize;

        let title = self.title();
        let source_label = self.args.describe(&self.store);
        render_main_view(
            frame,
            chunks[1],
            &self.feed,
            &self.rendered,
            &title,
            &source_label,
            &mut self.table_state,
            self.focus,
            self.inspected.as_ref(),
            self.tick,
        );

        render_bottom_bar(frame, chunks[2], self.focus, self.store.teams().len() > 1);
    }

    fn title(&self) -> String {
        let title = match self.store.team() {
            Some(team) => format!("Project Logs · team {}", team),
            None => "Project Logs".to_string(),
        };

        #[cfg(feature = "dev")]
        let title = format!("{} · {}ms", title, self.last_render_duration.as_millis());

        title
    }

    fn handle_events(&mut self) -> io::Result<()> {
        const IDLE_POLL: Duration = Duration::from_millis(100);

        let timeout = self
            .debouncer
            .time_left(Instant::now())
            .map(|left| left.min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    self.handle_key_event(key_event);
                }
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match self.focus {
            Focus::Search => self.handle_search_key(key_event),
            Focus::Inspect => match key_event.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.exit(),
                KeyCode::Char('i') | KeyCode::Esc | KeyCode::Enter => self.close_inspect(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.select_previous();
                    self.inspect_selected();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.select_next();
                    self.inspect_selected();
                }
                _ => {}
            },
            Focus::List => match key_event.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.exit(),
                KeyCode::Char('/') => self.focus = Focus::Search,
                KeyCode::Char('f') => self.set_type_filter(self.feed.type_selection().next()),
                KeyCode::Char('F') => self.set_type_filter(self.feed.type_selection().prev()),
                KeyCode::Char('a') => self.set_type_filter(TypeSelection::All),
                KeyCode::Char('c') => self.clear_search(),
                KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::PageDown => self.select_page_down(),
                KeyCode::PageUp => self.select_page_up(),
                KeyCode::Home | KeyCode::Char('g') => self.select_first(),
                KeyCode::End | KeyCode::Char('G') => self.select_last(),
                KeyCode::Char('i') | KeyCode::Enter => self.inspect_selected(),
                KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    if let Some(team) = self.store.next_team() {
                        info!(team = %team, "switching team");
                    }
                }
                _ => {}
            },
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Enter => {
                if let Some(query) = self.debouncer.flush() {
                    self.apply_search(&query);
                }
                self.focus = Focus::List;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.schedule_search();
            }
            KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.clear();
                self.schedule_search();
            }
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.push(c);
                self.schedule_search();
            }
            _ => {}
        }
    }

    fn schedule_search(&mut self) {
        self.debouncer
            .schedule(self.search_input.clone(), Instant::now());
    }

    fn clear_search(&mut self) {
        self.search_input.clear();
        self.debouncer.cancel();
        self.apply_search("");
    }

    fn reload(&mut self) {
        if self.pending.is_some() {
            warn!("reload requested while a load is in flight, restarting it");
        }
        self.close_inspect();
        self.start_load();
    }

    fn select_previous(&mut self) {
        if !self.rendered.is_empty() {
            let i = match self.table_state.selected() {
                Some(i) => i.saturating_sub(1),
                None => 0,
            };
            self.table_state.select(Some(i));
        }
    }

    fn select_next(&mut self) {
        self.select_by(1);
    }

    fn select_page_down(&mut self) {
        self.select_by(self.list_height.max(1));
    }

    fn select_page_up(&mut self) {
        if !self.rendered.is_empty() {
            let i = self
                .table_state
                .selected()
                .unwrap_or(0)
                .saturating_sub(self.list_height.max(1));
            self.table_state.select(Some(i));
        }
    }

    fn select_first(&mut self) {
        if !self.rendered.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.rendered.is_empty() {
            self.table_state.select(Some(self.rendered.len() - 1));
            self.track_scrolling();
        }
    }

    fn select_by(&mut self, step: usize) {
        if !self.rendered.is_empty() {
            let last = self.rendered.len() - 1;
            let i = match self.table_state.selected() {
                Some(i) => (i + step).min(last),
                None => 0,
            };
            self.table_state.select(Some(i));
            self.track_scrolling();
        }
    }

    /// Treats downward movement as a scroll event: when the end of the
    /// rendered rows is within the viewport, the next page is revealed.
    fn track_scrolling(&mut self) {
        let selected = self.table_state.selected().unwrap_or(0);
        let offset = self
            .table_state
            .offset()
            .max((selected + 1).saturating_sub(self.list_height));
        let content_bottom = self.rendered.len().saturating_sub(offset);

        if self.feed.on_scroll(content_bottom, self.list_height) {
            self.refresh_rendered();
        }
    }

    fn inspect_selected(&mut self) {
        if let Some(entry) = self
            .table_state
            .selected()
            .and_then(|i| self.rendered.get(i))
        {
            self.inspected = Some(entry.clone());
            self.focus = Focus::Inspect;
        }
    }

    fn close_inspect(&mut self) {
        self.inspected = None;
        if self.focus == Focus::Inspect {
            self.focus = Focus::List;
        }
    }

    fn exit(&mut self) {
        self.exit = true;
    }
}
