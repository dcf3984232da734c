//! Text rendering for the Pokédex CLI
//!
//! The presenter turns records and status messages into display text. Color is
//! decided by the [`Theme`] it is built with; nothing here touches global
//! terminal state.

use crossterm::style::{style, Color, Stylize};

use crate::data::Record;

/// Output styling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Emit ANSI color sequences
    pub color: bool,
}

impl Theme {
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

/// Uppercases the first character and lowercases the rest
///
/// `"lightning-rod"` becomes `"Lightning-rod"`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn join_capitalized(words: &[String]) -> String {
    words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders records and messages as text
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    theme: Theme,
}

impl Presenter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.theme.color {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Renders the summary card for a record
    pub fn render(&self, record: &Record) -> String {
        let name = capitalize(&record.name);
        let mut lines = vec![
            String::new(),
            self.paint(&format!("--- {} ---", name), Color::Magenta),
            self.paint(&format!("Name: {}", name), Color::Yellow),
            self.paint(&format!("Weight: {:.1} kg", record.weight_kg), Color::Yellow),
            self.paint(&format!("Height: {:.1} m", record.height_m), Color::Yellow),
            self.paint(&format!("Types: {}", join_capitalized(&record.types)), Color::Yellow),
            self.paint(
                &format!("Abilities: {}", join_capitalized(&record.abilities)),
                Color::Yellow,
            ),
        ];

        match &record.image_url {
            Some(url) => {
                lines.push(self.paint(&format!("Image: {}", url), Color::Yellow));
                lines.push(String::new());
                lines.push(self.paint("Copy this link to view the image:", Color::Cyan));
                lines.push(url.clone());
            }
            None => lines.push(self.paint("Image: not available for this Pokémon.", Color::Red)),
        }

        lines.join("\n")
    }

    pub fn welcome(&self) -> String {
        self.paint("Welcome to the Pokédex", Color::Blue)
    }

    pub fn prompt(&self) -> String {
        self.paint(
            "\nEnter a Pokémon name (or 'salir' to quit): ",
            Color::Blue,
        )
    }

    pub fn farewell(&self) -> String {
        self.paint("Thanks for using the Pokédex! See you soon!", Color::Green)
    }

    pub fn loading_local(&self, name: &str) -> String {
        self.paint(
            &format!("Loading {} from the local Pokédex...", capitalize(name)),
            Color::Yellow,
        )
    }

    pub fn fetched_remote(&self, name: &str) -> String {
        self.paint(
            &format!("Fetched {} from PokeAPI.", capitalize(name)),
            Color::Cyan,
        )
    }

    pub fn saved(&self, name: &str, location: &str) -> String {
        self.paint(
            &format!("Saved '{}' to {}.", name, location),
            Color::Green,
        )
    }

    pub fn warning(&self, message: &str) -> String {
        self.paint(&format!("Warning: {}", message), Color::DarkYellow)
    }

    pub fn error(&self, message: &str) -> String {
        self.paint(&format!("Error: {}", message), Color::Red)
    }
}
