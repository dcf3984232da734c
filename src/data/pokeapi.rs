//! PokeAPI client
//!
//! This module fetches a Pokémon from PokeAPI and shapes the loosely-typed
//! response into a canonical [`Record`]. All trust in the external shape is
//! confined to [`PokemonResponse::into_record`].

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::{PokemonName, Record};

/// Base URL for the PokeAPI pokemon endpoint
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// How long a single request may take before it is abandoned
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching a Pokémon
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered 404 for this name
    #[error("The Pokémon '{0}' does not exist in the Pokédex.")]
    NotFound(String),

    /// The API answered with some other client or server error status
    #[error("PokeAPI answered with HTTP status {0}")]
    UpstreamStatus(StatusCode),

    /// DNS, connection, timeout or body transfer failure
    #[error("Error connecting to the API: {}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// The body was not JSON or lacked a required field
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

/// Renders an error followed by its chain of causes
fn error_chain(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// A source of Pokémon records that lives somewhere other than the local store
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    /// Fetches the record for `name`, which is already validated and lowercase
    async fn fetch(&self, name: &PokemonName) -> Result<Record, FetchError>;
}

/// Raw `/pokemon/{name}` response, reduced to the fields we read
///
/// Every field is optional here so that absence is reported as a
/// [`FetchError::MalformedResponse`] naming the field, not a generic serde error.
#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: Option<String>,
    /// Hectograms
    weight: Option<f64>,
    /// Decimeters
    height: Option<f64>,
    types: Option<Vec<TypeSlot>>,
    abilities: Option<Vec<AbilitySlot>>,
    sprites: Option<Sprites>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

fn missing(field: &str) -> FetchError {
    FetchError::MalformedResponse(format!("missing field '{}'", field))
}

impl PokemonResponse {
    /// Converts the raw response into a canonical record
    ///
    /// Weight and height arrive in tenths of the target unit.
    fn into_record(self) -> Result<Record, FetchError> {
        let name = self.name.ok_or_else(|| missing("name"))?;
        let weight = self.weight.ok_or_else(|| missing("weight"))?;
        let height = self.height.ok_or_else(|| missing("height"))?;

        let types = self
            .types
            .ok_or_else(|| missing("types"))?
            .into_iter()
            .map(|slot| {
                slot.kind
                    .and_then(|resource| resource.name)
                    .ok_or_else(|| missing("types[].type.name"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let abilities = self
            .abilities
            .ok_or_else(|| missing("abilities"))?
            .into_iter()
            .map(|slot| {
                slot.ability
                    .and_then(|resource| resource.name)
                    .ok_or_else(|| missing("abilities[].ability.name"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sprites = self.sprites.ok_or_else(|| missing("sprites"))?;

        Ok(Record {
            name,
            weight_kg: weight / 10.0,
            height_m: height / 10.0,
            types,
            abilities,
            image_url: sprites.front_default,
        })
    }
}

/// Parses a `/pokemon/{name}` response body into a record
pub fn parse_pokemon(body: &str) -> Result<Record, FetchError> {
    let response: PokemonResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
    response.into_record()
}

/// Maps an error status to the matching fetch error, or `None` to proceed
fn classify_status(name: &PokemonName, status: StatusCode) -> Option<FetchError> {
    if status == StatusCode::NOT_FOUND {
        Some(FetchError::NotFound(name.to_string()))
    } else if status.is_client_error() || status.is_server_error() {
        Some(FetchError::UpstreamStatus(status))
    } else {
        None
    }
}

/// Client for fetching Pokémon from PokeAPI
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for the given base URL and request timeout
    ///
    /// # Arguments
    /// * `base_url` - Pokemon endpoint without the trailing name, e.g. [`POKEAPI_BASE_URL`]
    /// * `timeout` - Upper bound on each request, e.g. [`REQUEST_TIMEOUT`]
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn pokemon_url(&self, name: &PokemonName) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }

    /// Fetch a single Pokémon by name
    ///
    /// # Returns
    /// * `Ok(Record)` - The canonical record
    /// * `Err(FetchError::NotFound)` - The API answered 404
    /// * `Err(FetchError)` - Any other status, transport or shape failure
    pub async fn fetch_pokemon(&self, name: &PokemonName) -> Result<Record, FetchError> {
        let url = self.pokemon_url(name);
        debug!(%url, "requesting pokemon");

        let response = self.client.get(&url).send().await?;
        if let Some(err) = classify_status(name, response.status()) {
            return Err(err);
        }

        let text = response.text().await?;
        parse_pokemon(&text)
    }
}

impl RemoteSource for PokeApiClient {
    async fn fetch(&self, name: &PokemonName) -> Result<Record, FetchError> {
        self.fetch_pokemon(name).await
    }
}
