use activity_feed::{FeedConfig, FileLogSource, HttpLogSource, LogSource, SessionStore, TeamId};
use clap::Args;
use std::path::PathBuf;

/// Where the feed reads its records from.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Base URL of the backend API [env: ACTIVITY_FEED_API]
    #[arg(long)]
    pub api: Option<String>,

    /// Read records from a JSON file instead of the API
    #[arg(long, conflicts_with = "api")]
    pub file: Option<PathBuf>,

    /// Team to load; repeat to be able to switch between teams
    #[arg(long = "team")]
    pub teams: Vec<i64>,

    /// Session cookie forwarded to the API
    #[arg(long, env = "ACTIVITY_FEED_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Entries revealed per page [env: ACTIVITY_FEED_PAGE_SIZE]
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl SourceArgs {
    pub(crate) fn config(&self) -> FeedConfig {
        let mut config = FeedConfig::from_env();
        if let Some(api) = &self.api {
            config.api_base = api.clone();
        }
        if let Some(page_size) = self.page_size.filter(|size| *size > 0) {
            config.page_size = page_size;
        }
        config
    }

    pub(crate) fn session_store(&self, config: &FeedConfig) -> SessionStore {
        SessionStore::new(config.api_base.clone())
            .with_teams(self.teams.iter().copied().map(TeamId).collect())
            .with_cookie(self.cookie.clone())
    }

    /// Source for the store's current session.
    pub(crate) fn source(
        &self,
        config: &FeedConfig,
        store: &SessionStore,
    ) -> Box<dyn LogSource + Send> {
        match &self.file {
            Some(path) => Box::new(FileLogSource::new(path.clone())),
            None => Box::new(HttpLogSource::new(config, store.session().clone())),
        }
    }

    pub(crate) fn describe(&self, store: &SessionStore) -> String {
        match &self.file {
            Some(path) => path.display().to_string(),
            None => store.session().endpoint("logs"),
        }
    }
}
