//! Cache-or-fetch resolution of Pokémon names
//!
//! The resolver answers from the local store when it can and otherwise asks the
//! remote source, writing the fresh record through to the store. The write is
//! best effort: a failed write is handed back alongside the record.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{RecordStore, StoreError};
use crate::data::{FetchError, PokemonName, Record, RemoteSource};

/// Errors that stop a lookup from producing a record
#[derive(Debug, Error)]
pub enum LookupError {
    /// The remote source failed or rejected the name
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A cached file exists but could not be read
    #[error("Could not read the local Pokédex: {0}")]
    CacheRead(#[source] StoreError),
}

impl LookupError {
    /// True when the remote source reported that the name does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::Fetch(FetchError::NotFound(_)))
    }
}

/// Where a resolved record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from the local store, no network involved
    Cache,
    /// Fetched from the remote source on this call
    Remote,
}

/// A successfully resolved record
#[derive(Debug)]
pub struct Resolution {
    pub record: Record,
    pub origin: Origin,
    /// Set when the record was fetched but could not be persisted
    pub persist_error: Option<StoreError>,
}

/// Decides between the local store and the remote source
#[derive(Debug)]
pub struct Resolver<S, R> {
    store: S,
    remote: R,
}

impl<S: RecordStore, R: RemoteSource> Resolver<S, R> {
    pub fn new(store: S, remote: R) -> Self {
        Self { store, remote }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Resolves `name` to a record
    ///
    /// A stored record is returned unchanged, without a freshness check. On a
    /// miss the record is fetched, written once, and returned even if the write
    /// failed.
    ///
    /// # Arguments
    /// * `name` - Validated, lowercase Pokémon name
    ///
    /// # Returns
    /// * `Ok(Resolution)` with `origin` and any failed write in `persist_error`
    /// * `Err(LookupError::Fetch)` if the remote source failed or rejected the name
    /// * `Err(LookupError::CacheRead)` if a stored entry exists but is unreadable
    pub async fn resolve(&self, name: &PokemonName) -> Result<Resolution, LookupError> {
        let key = name.as_str();

        if let Some(record) = self.store.get(key).map_err(LookupError::CacheRead)? {
            debug!(name = key, "cache hit");
            return Ok(Resolution {
                record,
                origin: Origin::Cache,
                persist_error: None,
            });
        }

        debug!(name = key, "cache miss, fetching");
        let record = self.remote.fetch(name).await?;

        let persist_error = match self.store.put(key, &record) {
            Ok(()) => {
                info!(name = key, "stored record");
                None
            }
            Err(e) => {
                warn!(name = key, error = %e, "failed to store record");
                Some(e)
            }
        };

        Ok(Resolution {
            record,
            origin: Origin::Remote,
            persist_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{JsonFileStore, MemoryStore};
    use reqwest::StatusCode;
    use std::cell::Cell;
    use std::io;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn pikachu() -> Record {
        Record {
            name: "pikachu".to_string(),
            weight_kg: 6.0,
            height_m: 0.4,
            types: vec!["electric".to_string()],
            abilities: vec!["static".to_string(), "lightning-rod".to_string()],
            image_url: None,
        }
    }

    /// Answers from a fixed result and counts calls
    struct FakeRemote {
        calls: Cell<usize>,
        answer: fn(&PokemonName) -> Result<Record, FetchError>,
    }

    impl FakeRemote {
        fn new(answer: fn(&PokemonName) -> Result<Record, FetchError>) -> Self {
            Self {
                calls: Cell::new(0),
                answer,
            }
        }

        fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl RemoteSource for FakeRemote {
        async fn fetch(&self, name: &PokemonName) -> Result<Record, FetchError> {
            self.calls.set(self.calls.get() + 1);
            (self.answer)(name)
        }
    }

    /// A store whose writes always fail
    struct ReadOnlyStore;

    impl RecordStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<Record>, StoreError> {
            Ok(None)
        }

        fn put(&self, key: &str, _record: &Record) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: PathBuf::from(format!("pokedex/{}.json", key)),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn name(raw: &str) -> PokemonName {
        PokemonName::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_cache_hit_skips_remote() {
        let store = MemoryStore::new();
        store.put("pikachu", &pikachu()).unwrap();
        let resolver = Resolver::new(store, FakeRemote::new(|_| Ok(pikachu())));

        let resolution = resolver.resolve(&name("Pikachu")).await.unwrap();

        assert_eq!(resolution.origin, Origin::Cache);
        assert_eq!(resolution.record, pikachu());
        assert_eq!(resolver.remote().calls(), 0);
    }

    #[tokio::test]
    async fn test_miss_fetches_and_persists() {
        let resolver = Resolver::new(MemoryStore::new(), FakeRemote::new(|_| Ok(pikachu())));

        let resolution = resolver.resolve(&name("pikachu")).await.unwrap();

        assert_eq!(resolution.origin, Origin::Remote);
        assert!(resolution.persist_error.is_none());
        assert_eq!(resolver.remote().calls(), 1);
        assert_eq!(resolver.store().get("pikachu").unwrap(), Some(pikachu()));
    }

    #[tokio::test]
    async fn test_second_resolve_is_served_from_store() {
        let resolver = Resolver::new(MemoryStore::new(), FakeRemote::new(|_| Ok(pikachu())));

        let first = resolver.resolve(&name("pikachu")).await.unwrap();
        let second = resolver.resolve(&name("PIKACHU")).await.unwrap();

        assert_eq!(first.record, second.record);
        assert_eq!(second.origin, Origin::Cache);
        assert_eq!(resolver.remote().calls(), 1);
    }

    #[tokio::test]
    async fn test_not_found_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("pokedex"));
        let resolver = Resolver::new(
            store,
            FakeRemote::new(|n| Err(FetchError::NotFound(n.to_string()))),
        );

        let err = resolver.resolve(&name("agumon")).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(!temp_dir.path().join("pokedex").join("agumon.json").exists());
    }

    #[tokio::test]
    async fn test_upstream_status_is_not_not_found() {
        let resolver = Resolver::new(
            MemoryStore::new(),
            FakeRemote::new(|_| Err(FetchError::UpstreamStatus(StatusCode::TOO_MANY_REQUESTS))),
        );

        let err = resolver.resolve(&name("pikachu")).await.unwrap_err();

        assert!(!err.is_not_found());
        assert!(err.to_string().contains("429"));
        assert!(resolver.store().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_response_is_reported() {
        let resolver = Resolver::new(
            MemoryStore::new(),
            FakeRemote::new(|_| Err(FetchError::MalformedResponse("missing field 'weight'".to_string()))),
        );

        let err = resolver.resolve(&name("pikachu")).await.unwrap_err();

        assert!(matches!(err, LookupError::Fetch(FetchError::MalformedResponse(_))));
        assert!(resolver.store().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_still_returns_record() {
        let resolver = Resolver::new(ReadOnlyStore, FakeRemote::new(|_| Ok(pikachu())));

        let resolution = resolver.resolve(&name("pikachu")).await.unwrap();

        assert_eq!(resolution.record, pikachu());
        assert_eq!(resolution.origin, Origin::Remote);
        let warning = resolution.persist_error.expect("write failure should be reported");
        assert!(warning.to_string().contains("read-only"));
    }

    #[tokio::test]
    async fn test_corrupt_cache_file_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ditto.json");
        std::fs::write(&path, "{ not json").unwrap();
        let resolver = Resolver::new(
            JsonFileStore::new(temp_dir.path()),
            FakeRemote::new(|_| Ok(pikachu())),
        );

        let err = resolver.resolve(&name("ditto")).await.unwrap_err();

        assert!(matches!(err, LookupError::CacheRead(_)));
        assert_eq!(resolver.remote().calls(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
