//! # Key-Value Store
//!
//! Flat key-value persistence: one JSON document per key, tagged with a
//! schema version.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    On-Disk Layout                                       │
//! │                                                                         │
//! │  <data_dir>/                                                            │
//! │    stockmate_products.json   { "version": 1, "records": [Product...] } │
//! │    stockmate_sales.json      { "version": 1, "records": [Sale...] }    │
//! │                                                                         │
//! │  Writes go to <key>.json.tmp first and are renamed into place, so a    │
//! │  reader never observes a torn payload.                                 │
//! │                                                                         │
//! │  Loads probe the version field BEFORE deserializing the records, so a  │
//! │  format change surfaces as SchemaVersion - never as a confusing        │
//! │  field-level parse error.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Well-Known Keys & Version
// =============================================================================

/// Current schema version written into every envelope.
pub const SCHEMA_VERSION: u32 = 1;

/// Key under which the product catalog is persisted.
pub const PRODUCTS_KEY: &str = "stockmate_products";

/// Key under which the sales ledger is persisted.
pub const SALES_KEY: &str = "stockmate_sales";

// =============================================================================
// Envelope
// =============================================================================

/// Serialized payload wrapper: `{ "version": 1, "records": ... }`.
#[derive(Debug, Serialize)]
struct EnvelopeOut<'a, T> {
    version: u32,
    records: &'a T,
}

#[derive(Debug, Deserialize)]
struct EnvelopeIn<T> {
    #[allow(dead_code)]
    version: u32,
    records: T,
}

/// Minimal probe parsed before the full payload.
#[derive(Debug, Deserialize)]
struct VersionProbe {
    version: u32,
}

// =============================================================================
// Configuration
// =============================================================================

/// Key-value store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./stockmate_data");
/// let store = JsonStore::open(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one `<key>.json` file per key.
    pub data_dir: PathBuf,

    /// Whether to create the data directory if it doesn't exist.
    /// Default: true
    pub create_if_missing: bool,
}

impl StoreConfig {
    /// Creates a new store configuration with the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            create_if_missing: true,
        }
    }

    /// Sets whether to create the data directory on open.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Creates a configuration pointing at a fresh unique temp directory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = StoreConfig::ephemeral();
    /// let store = JsonStore::open(config).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn ephemeral() -> Self {
        let dir = std::env::temp_dir().join(format!("stockmate-{}", uuid::Uuid::new_v4()));
        StoreConfig {
            data_dir: dir,
            create_if_missing: true,
        }
    }
}

// =============================================================================
// JsonStore
// =============================================================================

/// Filesystem-backed key-value store of versioned JSON documents.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Opens the store, creating the data directory if configured to.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening key-value store");

        if config.create_if_missing {
            tokio::fs::create_dir_all(&config.data_dir)
                .await
                .map_err(|e| StoreError::io(config.data_dir.display().to_string(), e))?;
        } else {
            let exists = tokio::fs::try_exists(&config.data_dir)
                .await
                .map_err(|e| StoreError::io(config.data_dir.display().to_string(), e))?;
            if !exists {
                return Err(StoreError::io(
                    config.data_dir.display().to_string(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "data directory missing"),
                ));
            }
        }

        Ok(JsonStore {
            data_dir: config.data_dir,
        })
    }

    /// Returns the file path backing a key.
    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Loads the raw serialized value for a key.
    ///
    /// ## Returns
    /// * `Ok(Some(text))` - key present
    /// * `Ok(None)` - key absent (first run, or never saved)
    pub async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    /// Saves a raw serialized value under a key.
    ///
    /// The value is written to a sibling `.tmp` file and renamed into place;
    /// a crash mid-write leaves the previous payload intact.
    pub async fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = self.data_dir.join(format!("{}.json.tmp", key));

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| StoreError::io(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(key, e))?;

        debug!(key = %key, bytes = value.len(), "Saved key");
        Ok(())
    }

    /// Loads and unwraps a versioned record payload.
    ///
    /// ## Errors
    /// * [`StoreError::SchemaVersion`] when the stored version differs from
    ///   [`SCHEMA_VERSION`]
    /// * [`StoreError::Serialization`] when the payload doesn't parse
    pub async fn load_records<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(text) = self.load(key).await? else {
            return Ok(None);
        };

        // Probe the version before committing to the full record shape
        let probe: VersionProbe = serde_json::from_str(&text)?;
        if probe.version != SCHEMA_VERSION {
            return Err(StoreError::SchemaVersion {
                key: key.to_string(),
                found: probe.version,
                expected: SCHEMA_VERSION,
            });
        }

        let envelope: EnvelopeIn<T> = serde_json::from_str(&text)?;
        Ok(Some(envelope.records))
    }

    /// Wraps records in a versioned envelope and saves them.
    pub async fn save_records<T: Serialize>(&self, key: &str, records: &T) -> StoreResult<()> {
        let envelope = EnvelopeOut {
            version: SCHEMA_VERSION,
            records,
        };
        let text = serde_json::to_string_pretty(&envelope)?;
        self.save(key, &text).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
