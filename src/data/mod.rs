//! Core data models for the Pokédex CLI
//!
//! This module contains the canonical record persisted to the local cache and
//! the validated name used as its lookup key.

pub mod pokeapi;

pub use pokeapi::{FetchError, PokeApiClient, RemoteSource};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Canonical attributes of one Pokémon, as persisted to disk
///
/// Field names are the on-disk format. The aliases accept cache files written
/// by the earlier Python tool, which used `weight`, `height` and `image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Pokémon name as reported by the API (lowercase)
    pub name: String,
    /// Weight in kilograms
    #[serde(alias = "weight")]
    pub weight_kg: f64,
    /// Height in meters
    #[serde(alias = "height")]
    pub height_m: f64,
    /// Type names in API slot order
    pub types: Vec<String>,
    /// Ability names in API slot order
    pub abilities: Vec<String>,
    /// Default front sprite, if the API has one
    #[serde(alias = "image")]
    pub image_url: Option<String>,
}

/// Errors produced when validating user input as a Pokémon name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Nothing was typed
    #[error("Please type the name of a Pokémon.")]
    Empty,

    /// The input contains digits, spaces, punctuation or symbols
    #[error("The Pokémon name must contain only letters: '{0}'")]
    NonAlphabetic(String),
}

/// A validated, lowercase-normalized Pokémon name
///
/// This is the lookup key for both the local store and the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonName(String);

impl PokemonName {
    /// Validates raw input and normalizes it to lowercase.
    ///
    /// Surrounding whitespace is ignored. Every remaining character must be
    /// alphabetic.
    ///
    /// # Arguments
    /// * `input` - The text typed at the prompt
    ///
    /// # Returns
    /// * `Ok(PokemonName)` holding the lowercase name
    /// * `Err(NameError::Empty)` if only whitespace was typed
    /// * `Err(NameError::NonAlphabetic)` if any other character is present
    pub fn parse(input: &str) -> Result<Self, NameError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if !trimmed.chars().all(char::is_alphabetic) {
            return Err(NameError::NonAlphabetic(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PokemonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PokemonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
