use tracing::{debug, error, info};

use crate::config::FeedConfig;
use crate::entry::{normalize, LogEntry, RawLogRecord};
use crate::error::{FeedError, Result};
use crate::filter::{search_exclusions, type_exclusions, visible, ExclusionSet, TypeSelection};
use crate::source::LogSource;
use crate::window::{reached_bottom, Window, PAGE_SIZE, SCROLL_TOLERANCE};

/// Identifies one load. Results carrying an older ticket are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

/// Where the feed is in its load cycle.
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(FeedError),
}

/// Client-side activity log feed.
///
/// Holds the loaded entries (`backup`, most recent first), the two exclusion
/// sets, the derived view and the window of it that is rendered.
#[derive(Debug)]
pub struct ActivityFeed {
    backup: Vec<LogEntry>,
    state: LoadState,
    ticket: LoadTicket,
    search: String,
    selection: TypeSelection,
    search_excluded: ExclusionSet,
    type_excluded: ExclusionSet,
    /// Indices into `backup` of the entries passing both filters.
    view: Vec<usize>,
    window: Window,
    scroll_tolerance: usize,
}

impl ActivityFeed {
    pub fn new(page_size: usize) -> Self {
        Self {
            backup: Vec::new(),
            state: LoadState::Loading,
            ticket: LoadTicket(0),
            search: String::new(),
            selection: TypeSelection::All,
            search_excluded: ExclusionSet::new(),
            type_excluded: ExclusionSet::new(),
            view: Vec::new(),
            window: Window::new(page_size),
            scroll_tolerance: SCROLL_TOLERANCE,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        let mut feed = Self::new(config.page_size);
        feed.scroll_tolerance = config.scroll_tolerance;
        feed
    }

    /// Starts a new load and returns its ticket. Results of earlier loads
    /// are discarded from now on.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.ticket = LoadTicket(self.ticket.0 + 1);
        self.state = LoadState::Loading;
        debug!(ticket = self.ticket.0, "load started");
        self.ticket
    }

    /// Drops all loaded entries, e.g. after the team changed. Any load in
    /// flight becomes stale.
    pub fn invalidate(&mut self) {
        self.ticket = LoadTicket(self.ticket.0 + 1);
        self.state = LoadState::Loading;
        self.backup.clear();
        self.search_excluded.clear();
        self.type_excluded.clear();
        self.refresh_view();
    }

    /// Applies the records fetched for `ticket`. Returns false when the
    /// ticket is stale and nothing changed.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<RawLogRecord>>) -> bool {
        self.finish_load_entries(ticket, result.map(normalize))
    }

    /// Like [`ActivityFeed::finish_load`] for entries that were already
    /// normalized (most recent first).
    pub fn finish_load_entries(&mut self, ticket: LoadTicket, result: Result<Vec<LogEntry>>) -> bool {
        if ticket != self.ticket {
            debug!(
                ticket = ticket.0,
                current = self.ticket.0,
                "discarding stale load"
            );
            return false;
        }

        match result {
            Ok(entries) => {
                info!(count = entries.len(), "activity log loaded");
                self.backup = entries;
                self.search_excluded = search_exclusions(&self.backup, &self.search);
                self.type_excluded = type_exclusions(&self.backup, self.selection);
                self.refresh_view();
                self.state = LoadState::Ready;
            }
            Err(e) => {
                error!(error = %e, "failed to load activity log");
                self.state = LoadState::Failed(e);
            }
        }
        true
    }

    /// Fetches from `source` on the calling thread and applies the result.
    pub fn load_from(&mut self, source: &dyn LogSource) -> bool {
        let ticket = self.begin_load();
        let result = source.fetch_logs();
        self.finish_load(ticket, result)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&FeedError> {
        match &self.state {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn current_ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn backup(&self) -> &[LogEntry] {
        &self.backup
    }

    /// Applies a search query. An empty query clears the search filter.
    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
        self.search_excluded = search_exclusions(&self.backup, query);
        debug!(
            query = query,
            excluded = self.search_excluded.len(),
            "search filter applied"
        );
        self.refresh_view();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_type_filter(&mut self, selection: TypeSelection) {
        self.selection = selection;
        self.type_excluded = type_exclusions(&self.backup, selection);
        debug!(
            selection = %selection,
            excluded = self.type_excluded.len(),
            "type filter applied"
        );
        self.refresh_view();
    }

    pub fn type_selection(&self) -> TypeSelection {
        self.selection
    }

    pub fn filters_active(&self) -> bool {
        !self.search.is_empty() || !self.selection.is_all()
    }

    fn refresh_view(&mut self) {
        let (search_excluded, type_excluded) = (&self.search_excluded, &self.type_excluded);
        self.view = self
            .backup
            .iter()
            .enumerate()
            .filter(|(_, entry)| visible(entry, search_excluded, type_excluded))
            .map(|(index, _)| index)
            .collect();
        self.window.reset(self.view.len());
    }

    /// Entries passing all active filters, before pagination.
    pub fn view(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.view.iter().map(move |index| &self.backup[*index])
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// The rendered prefix of the view.
    pub fn window_entries(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.view().take(self.window.shown())
    }

    pub fn shown(&self) -> usize {
        self.window.shown()
    }

    pub fn page_size(&self) -> usize {
        self.window.page_size()
    }

    pub fn has_more(&self) -> bool {
        !self.window.is_exhausted(self.view.len())
    }

    /// Handles a scroll event. `content_bottom` is where the rendered list
    /// ends and `viewport_bottom` where the visible area ends, both measured
    /// from the top of the viewport. Returns true when a page was added.
    pub fn on_scroll(&mut self, content_bottom: usize, viewport_bottom: usize) -> bool {
        if reached_bottom(content_bottom, viewport_bottom, self.scroll_tolerance) {
            self.scroll_to_bottom()
        } else {
            false
        }
    }

    /// Reveals the next page, as if the bottom of the list was reached.
    pub fn scroll_to_bottom(&mut self) -> bool {
        if !matches!(self.state, LoadState::Ready) {
            return false;
        }
        let grew = self.window.extend(self.view.len());
        if grew {
            debug!(shown = self.window.shown(), total = self.view.len(), "window extended");
        }
        grew
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
