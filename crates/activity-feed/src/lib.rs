//! Client-side activity log feed.
//!
//! Fetches the flat list of activity log entries of a team once, then serves
//! it through two independent filters (free-text search and category) and a
//! paginated, infinite-scroll window.
//!
//! ```
//! use activity_feed::{ActivityFeed, Category, EntryId, RawLogRecord, TypeSelection};
//!
//! let records: Vec<RawLogRecord> = (0..45)
//!     .map(|i| RawLogRecord {
//!         id: EntryId::Int(i),
//!         kind: (i % 3) as u32,
//!         description: format!("event {}", i),
//!         object: String::new(),
//!         issue_id: None,
//!         date: "2021-06-01 09:00:00".to_string(),
//!     })
//!     .collect();
//!
//! let mut feed = ActivityFeed::default();
//! let ticket = feed.begin_load();
//! feed.finish_load(ticket, Ok(records));
//! assert_eq!(feed.shown(), 30);
//!
//! feed.scroll_to_bottom();
//! assert_eq!(feed.shown(), 45);
//!
//! feed.set_type_filter(TypeSelection::Only(Category::IssueDeleted));
//! assert_eq!(feed.view_len(), 15);
//! ```

pub mod category;
pub mod config;
pub mod debounce;
pub mod entry;
pub mod error;
pub mod feed;
pub mod filter;
pub mod render;
pub mod replay;
pub mod report;
pub mod session;
pub mod source;
pub mod window;

pub use category::{Category, Icon, NavTarget, Presentation, Rgb, Route};
pub use config::FeedConfig;
pub use debounce::Debouncer;
pub use entry::{normalize, EntryId, LogEntry, RawLogRecord};
pub use error::FeedError;
pub use feed::{ActivityFeed, LoadState, LoadTicket};
pub use filter::{ExclusionSet, TypeSelection};
pub use render::{render_entry, render_entry_lenient, RenderedEntry, Segment, SegmentStyle};
pub use replay::{ReplayHandle, ReplayServer};
pub use report::{format_window, FeedReport, Format};
pub use session::{Session, SessionStore, TeamId};
pub use source::{spawn_fetch, FileLogSource, HttpLogSource, LoadOutcome, LogSource};
pub use window::{Window, PAGE_SIZE};
