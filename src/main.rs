//! Pokédex CLI - look up Pokémon from the terminal
//!
//! An interactive prompt that fetches Pokémon from PokeAPI, caches them as
//! JSON files under `./pokedex/`, and prints a short summary.

use std::io;

use clap::Parser;
use crossterm::tty::IsTty;
use tokio::io::BufReader;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pokedex::app::App;
use pokedex::cache::JsonFileStore;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::data::PokeApiClient;
use pokedex::presenter::Presenter;
use pokedex::resolver::Resolver;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never interleave with the prompt
    FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = StartupConfig::from_cli(&cli).with_color(io::stdout().is_tty());

    let remote = PokeApiClient::with_config(config.api_base_url.clone(), config.timeout)?;
    let store = JsonFileStore::new(config.cache_dir.clone());
    let app = App::new(Resolver::new(store, remote), Presenter::new(config.theme()));

    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    app.run(input, &mut stdout).await?;

    Ok(())
}
