//! Command-line interface parsing for the Pokédex CLI
//!
//! The tool is interactive and takes no behavioral flags; clap provides
//! `--help` and `--version`. [`StartupConfig`] gathers the fixed settings the
//! rest of the program is built from.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_DIR;
use crate::data::pokeapi::{POKEAPI_BASE_URL, REQUEST_TIMEOUT};
use crate::presenter::Theme;

/// Pokédex CLI - look up Pokémon on PokeAPI and keep them in a local Pokédex
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokédex backed by PokeAPI with a local JSON cache")]
#[command(
    after_help = "Type a Pokémon name at the prompt, or 'salir' to quit.\nLooked-up Pokémon are saved as JSON files under ./pokedex/."
)]
#[command(version)]
pub struct Cli {}

/// Settings the application is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Directory holding one `{name}.json` per cached Pokémon
    pub cache_dir: PathBuf,
    /// Base URL of the pokemon endpoint, without trailing name
    pub api_base_url: String,
    /// Upper bound on a single API request
    pub timeout: Duration,
    /// Whether output is colored
    pub color: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            api_base_url: POKEAPI_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            color: true,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(_cli: &Cli) -> Self {
        Self::default()
    }

    /// Enables or disables colored output, typically from a tty check
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn theme(&self) -> Theme {
        if self.color {
            Theme::colored()
        } else {
            Theme::plain()
        }
    }
}
