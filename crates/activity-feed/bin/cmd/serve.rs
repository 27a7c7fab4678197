use activity_feed::{source::read_records, ReplayServer};
use clap::Parser;
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// JSON file holding the body of a `GET /logs` response
    #[arg(long)]
    pub file: PathBuf,

    /// Port to listen on
    #[arg(long, default_value = "6780")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

impl ServeArgs {
    pub fn run(&self) -> Result<()> {
        let records = read_records(&self.file)
            .map_err(|e| eyre::eyre!("Failed to read {}: {}", self.file.display(), e))?;
        let addr = format!("{}:{}", self.host, self.port);
        let server = ReplayServer::bind(&addr, &records)?;

        println!(
            "{} {} records on {}",
            "Replaying".green().bold(),
            records.len(),
            format!("http://{}/logs", addr).underline()
        );
        tracing::info!(addr = %addr, count = records.len(), "replay server started");

        server.serve();
        Ok(())
    }
}
