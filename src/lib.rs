//! # starmap
//!
//! Builds a deduplicated, three-dimensional list of nearby and bright stars from two
//! classic fixed-width catalogs:
//!
//! - the **Gliese Catalogue of Nearby Stars** (3rd edition, `gliese3.dat`, B1950), and
//! - the **Yale Bright Star Catalogue** (5th edition, `catalog.dat` + `notes.dat`, J2000).
//!
//! Each catalog line is decoded into a [`DecodedRecord`], its free-text designations are
//! normalized into a priority-ranked list of [`StarName`]s, physical attributes
//! (galactic position, proper motion, effective temperature, display color) are derived,
//! and the result is folded into a [`StarCatalog`] that merges duplicate entries of the
//! same physical star, both within a catalog and across the two catalogs.
//!
//! ## Example
//!
//! ```no_run
//! use starmap::{ingest_all, IngestConfig};
//!
//! let config = IngestConfig {
//!     catalog_dir: "data".into(),
//!     ..Default::default()
//! };
//! let catalog = ingest_all(&config);
//! for star in catalog.stars().iter().filter(|s| s.is_3d).take(10) {
//!     println!("{} at {:.2} pc", star.primary_name(), star.position.norm());
//! }
//! ```
//!
//! ## Pipeline overview
//!
//! 1. **Decoding**: a [`CatalogReader`] splits each line into fixed-width fields and runs
//!    that catalog's designation grammar (Bayer, Flamsteed, Durchmusterung, Giclas,
//!    Luyten, Gliese, HD, SAO, HR, ADS, FK5 and a long tail of minor systems)
//! 2. **Derivation**: [`Derivation`] converts RA/Dec, parallax, proper motion and radial
//!    velocity into galactic Cartesian vectors, and estimates temperature and color from
//!    the [`SpectralType`] and B−V index
//! 3. **Identity resolution**: [`StarCatalog::insert_or_merge`] looks up the candidate's
//!    names in a component-aware [`NameRegistry`], merging into an existing star when the
//!    match is unambiguous, and registering a new star otherwise
//!
//! Incorrect merges are considered worse than missed merges: ambiguous matches degrade to
//! inserting a separate star, and conflicting names are left out of a merge.

/// Raw catalog readers; currently Gliese & Yale Bright Star
pub mod catalogs;
pub mod color;
pub mod derive;
pub mod geometry;
pub mod ingest;
pub mod names;
pub mod registry;
pub mod spectral;
pub mod star;
pub mod starcatalog;
pub mod temperature;

pub use catalogs::bright::BrightStarReader;
pub use catalogs::gliese::GlieseReader;
pub use catalogs::{CatalogReader, DecodedRecord};
pub use color::{magnitude_brightness, Color, DisplayColor};
pub use derive::Derivation;
pub use geometry::{Epoch, EpochFrame};
pub use ingest::{ingest_all, ingest_catalog, IngestConfig, IngestStats};
pub use names::NamingSystem;
pub use registry::{NameRegistry, NameSlot, StarId};
pub use spectral::SpectralType;
pub use star::*;
pub use starcatalog::*;
pub use temperature::{estimate_temperature, temperature_from_bv};

// Commonly used types
// Positions are kept in 64-bit floats: parallax-derived distances span several
// orders of magnitude and motion vectors are tiny compared to positions.
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;
