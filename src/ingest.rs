//! Catalog ingestion driver.
//!
//! Catalogs are ingested one after another into a single [`StarCatalog`]; each record
//! is decoded, derived and then inserted or merged before the next one is read.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::catalogs::bright::BrightStarReader;
use crate::catalogs::gliese::GlieseReader;
use crate::catalogs::CatalogReader;
use crate::derive::Derivation;
use crate::starcatalog::{MergeOutcome, StarCatalog};

/// Sub-directory of [`IngestConfig::catalog_dir`] holding `gliese3.dat`.
pub const GLIESE_DIR: &str = "gliese";
/// Sub-directory of [`IngestConfig::catalog_dir`] holding `catalog.dat` and `notes.dat`.
pub const BRIGHT_DIR: &str = "bright";

/// Parameters controlling catalog ingestion.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Root directory with one sub-directory per catalog.
    pub catalog_dir: PathBuf,
    /// Height of the Sun above the galactic plane (parsecs), added to every position.
    pub sun_height_pc: f64,
    /// Keep stars without a usable parallax as direction-only entries.
    /// If false, such records are dropped.
    pub keep_direction_only: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("data"),
            sun_height_pc: 0.0,
            keep_direction_only: true,
        }
    }
}

/// Per-catalog ingestion counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Records decoded from the stream.
    pub read: usize,
    /// Records that could not be placed.
    pub dropped: usize,
    /// Records appended as new stars.
    pub inserted: usize,
    /// Records folded into an existing star.
    pub merged: usize,
    /// Names left out of merges because they belong to another star.
    pub skipped_names: usize,
}

/// Read every record of `reader` into `catalog`.
pub fn ingest_catalog(
    reader: &mut dyn CatalogReader,
    config: &IngestConfig,
    catalog: &mut StarCatalog,
) -> IngestStats {
    let mut stats = IngestStats::default();
    if !reader.is_ok() {
        warn!("{} is not readable, skipping", reader.catalog_name());
        return stats;
    }

    info!("Loading {}...", reader.catalog_name());
    let derivation = Derivation::new(reader.epoch(), config);
    while let Some(rec) = reader.read_next() {
        stats.read += 1;
        let Some(star) = derivation.derive(rec) else {
            stats.dropped += 1;
            continue;
        };
        match catalog.insert_or_merge(star) {
            MergeOutcome::Inserted(_) => stats.inserted += 1,
            MergeOutcome::Merged { skipped_names, .. } => {
                stats.merged += 1;
                stats.skipped_names += skipped_names;
            }
        }
    }

    info!(
        "Loaded {}: {} records, {} dropped, {} new stars, {} merged, {} names skipped",
        reader.catalog_name(),
        stats.read,
        stats.dropped,
        stats.inserted,
        stats.merged,
        stats.skipped_names
    );
    stats
}

/// Ingest the Gliese catalog, then the Bright Star catalog, from `config.catalog_dir`.
///
/// A catalog that cannot be opened is logged and contributes no stars.
pub fn ingest_all(config: &IngestConfig) -> StarCatalog {
    let mut catalog = StarCatalog::new();

    let gliese_dir = config.catalog_dir.join(GLIESE_DIR);
    match GlieseReader::open(&gliese_dir) {
        Ok(mut reader) => {
            ingest_catalog(&mut reader, config, &mut catalog);
        }
        Err(e) => warn!("Skipping Gliese catalog: {:#}", e),
    }

    let bright_dir = config.catalog_dir.join(BRIGHT_DIR);
    match BrightStarReader::open(&bright_dir) {
        Ok(mut reader) => {
            ingest_catalog(&mut reader, config, &mut catalog);
        }
        Err(e) => warn!("Skipping Bright Star catalog: {:#}", e),
    }

    debug!("{} stars, {} names", catalog.len(), catalog.registry().len());
    catalog
}
