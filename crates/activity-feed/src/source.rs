//! Where log records come from.

use crossbeam_channel::{bounded, Receiver};
use std::path::{Path, PathBuf};

use crate::config::FeedConfig;
use crate::entry::RawLogRecord;
use crate::error::{FeedError, Result};
use crate::feed::LoadTicket;
use crate::session::Session;

/// Header carrying the selected team to the backend.
pub const TEAM_HEADER: &str = "X-Team-Id";

/// Something that can produce the complete log collection of the current scope.
pub trait LogSource {
    fn fetch_logs(&self) -> Result<Vec<RawLogRecord>>;
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    fn fetch_logs(&self) -> Result<Vec<RawLogRecord>> {
        (**self).fetch_logs()
    }
}

/// Fetches `GET {api_base}/logs` for the session's team.
pub struct HttpLogSource {
    agent: ureq::Agent,
    session: Session,
}

impl HttpLogSource {
    pub fn new(config: &FeedConfig, session: Session) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_connect(Some(config.connect_timeout))
            .timeout_recv_response(Some(config.read_timeout))
            .timeout_recv_body(Some(config.read_timeout))
            .build()
            .into();
        Self { agent, session }
    }

    pub fn url(&self) -> String {
        self.session.endpoint("logs")
    }
}

impl LogSource for HttpLogSource {
    fn fetch_logs(&self) -> Result<Vec<RawLogRecord>> {
        let url = self.url();
        let mut request = self.agent.get(&url);
        if let Some(cookie) = &self.session.cookie {
            request = request.header("Cookie", cookie);
        }
        if let Some(team) = self.session.team {
            request = request.header(TEAM_HEADER, team.to_string());
        }

        tracing::debug!(url = %url, "fetching logs");
        let mut response = request.call().map_err(|e| FeedError::http(&url, e))?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FeedError::http(&url, e))?;
        let records: Vec<RawLogRecord> = serde_json::from_str(&body)?;
        tracing::debug!(count = records.len(), "fetched logs");
        Ok(records)
    }
}

/// Reads records from a JSON file holding the body of a `GET /logs` response.
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLogSource {
    fn fetch_logs(&self) -> Result<Vec<RawLogRecord>> {
        read_records(&self.path)
    }
}

pub fn read_records(path: &Path) -> Result<Vec<RawLogRecord>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Result of one background load, tagged with the ticket it was started for.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<Vec<RawLogRecord>>,
}

/// Runs `source.fetch_logs()` on a worker thread. The outcome arrives on the
/// returned receiver exactly once; dropping the receiver discards it.
pub fn spawn_fetch<S>(source: S, ticket: LoadTicket) -> Result<Receiver<LoadOutcome>>
where
    S: LogSource + Send + 'static,
{
    let (tx, rx) = bounded(1);
    std::thread::Builder::new()
        .name("activity-feed-loader".into())
        .spawn(move || {
            let result = source.fetch_logs();
            // The receiver is gone when the load was abandoned.
            let _ = tx.send(LoadOutcome { ticket, result });
        })?;
    Ok(rx)
}
