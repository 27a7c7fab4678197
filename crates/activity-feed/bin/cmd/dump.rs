use activity_feed::{format_window, ActivityFeed, Format, TypeSelection};
use clap::Parser;
use eyre::Result;

use super::source_args::SourceArgs;

#[derive(Debug, Parser)]
pub struct DumpArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Free-text filter over description, object, date and time
    #[arg(long, default_value = "")]
    pub search: String,

    /// Type selector value: 0 is all logs, 1-14 select one category
    #[arg(long = "type", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..15))]
    pub type_filter: u8,

    /// Number of pages to reveal
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Output format: table, json or json-pretty
    #[arg(long, default_value = "table")]
    pub format: Format,
}

impl DumpArgs {
    pub fn run(&self) -> Result<()> {
        let config = self.source.config();
        let store = self.source.session_store(&config);
        let source = self.source.source(&config, &store);

        let mut feed = ActivityFeed::from_config(&config);
        feed.load_from(source.as_ref());
        if let Some(e) = feed.error() {
            return Err(eyre::eyre!(
                "Failed to load logs from {}: {}",
                self.source.describe(&store),
                e
            ));
        }

        feed.set_type_filter(TypeSelection::from_ui_value(self.type_filter));
        feed.set_search(&self.search);
        for _ in 1..self.pages.max(1) {
            if !feed.scroll_to_bottom() {
                break;
            }
        }

        let output = format_window(&feed, self.format)
            .map_err(|e| eyre::eyre!("Failed to format feed: {}", e))?;
        println!("{}", output);
        Ok(())
    }
}
