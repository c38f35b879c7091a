use std::path::PathBuf;

use clap::Parser;

mod api;
mod app;
mod history;

use api::RelayClient;
use history::HistoryStore;

#[derive(Parser, Debug)]
#[command(name = "kanga", about = "Terminal client for the Kanga math quiz relay")]
struct Cli {
    /// Base URL of the relay service
    #[arg(long, default_value = "http://localhost:3001", env = "KANGA_SERVER")]
    server: String,

    /// Attempt history file (defaults to the per-user data directory)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Print raw request/response bodies for every relay call
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let client = RelayClient::new(&cli.server, cli.debug)?;
    let store = HistoryStore::new(cli.history.unwrap_or_else(HistoryStore::default_path));

    app::run(&client, &store)
}
