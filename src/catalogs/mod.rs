pub mod bright;
pub mod gliese;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use crate::geometry::Epoch;
use crate::names::NamingSystem;
use crate::StarName;

/// One catalog line decoded into raw astrometric, photometric and naming fields.
///
/// Numeric fields are `None` when the catalog column is blank or unparsable, so that
/// "no data" stays distinguishable from zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRecord {
    /// Right ascension (radians)
    pub ra: Option<f64>,
    /// Declination (radians)
    pub dec: Option<f64>,
    /// Parallax (milliarcseconds)
    pub parallax_mas: Option<f64>,
    /// Proper motion in RA, already multiplied by `cos(dec)` (mas/yr)
    pub pm_ra_mas: Option<f64>,
    /// Proper motion in declination (mas/yr)
    pub pm_dec_mas: Option<f64>,
    /// Radial velocity (km/s)
    pub radial_velocity: Option<f64>,
    /// Apparent visual magnitude
    pub vmag: Option<f64>,
    /// Absolute visual magnitude, when the catalog publishes one
    pub absolute_vmag: Option<f64>,
    pub b_v: Option<f64>,
    pub u_b: Option<f64>,
    pub r_i: Option<f64>,
    pub spectral_type: String,
    /// The catalog's own designation for this record.
    pub name: StarName,
    pub other_names: Vec<StarName>,
    /// Component letters covered by this record (`"A"`, `"AB"`, ...), trimmed.
    pub components: String,
    pub remarks: String,
    /// The record describes the observer's own position (the Sun).
    pub at_origin: bool,
}

impl DecodedRecord {
    pub fn set_name(&mut self, name: impl Into<String>, system: NamingSystem) {
        self.name = StarName::new(name, system);
    }

    pub fn add_name(&mut self, name: impl Into<String>, system: NamingSystem) {
        self.other_names.push(StarName::new(name, system));
    }

    /// Append to the remarks, space-separated.
    pub fn add_remark(&mut self, remark: &str) {
        let remark = remark.trim();
        if remark.is_empty() {
            return;
        }
        if !self.remarks.is_empty() {
            self.remarks.push(' ');
        }
        self.remarks.push_str(remark);
    }

    /// Component index: `A` → 1, `B` → 2, ... and 0 when no component letter is given.
    pub fn component_index(&self) -> u32 {
        match self.components.chars().next() {
            Some(c) if c.is_ascii_uppercase() => c as u32 - 'A' as u32 + 1,
            _ => 0,
        }
    }

    /// The primary name followed by the other names, in catalog order.
    pub fn all_names(&self) -> impl Iterator<Item = &StarName> {
        std::iter::once(&self.name).chain(self.other_names.iter())
    }
}

/// A streaming reader over one star catalog.
pub trait CatalogReader {
    /// Whether the underlying stream opened successfully.
    fn is_ok(&self) -> bool;

    /// Human readable catalog name, for logging.
    fn catalog_name(&self) -> &'static str;

    /// Equatorial epoch of the catalog's coordinates.
    fn epoch(&self) -> Epoch;

    /// Decode the next record, or `None` at end of stream.
    fn read_next(&mut self) -> Option<DecodedRecord>;
}

/// Open `dir/name`, or failing that `dir/name.gz` through a gzip decoder.
pub fn open_stream(dir: &Path, name: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let path = dir.join(name);
    if path.is_file() {
        let file =
            File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        return Ok(Box::new(BufReader::new(file)));
    }

    let gz_path = dir.join(format!("{}.gz", name));
    if gz_path.is_file() {
        let file = File::open(&gz_path)
            .with_context(|| format!("Failed to open {}", gz_path.display()))?;
        debug!("Reading compressed catalog {}", gz_path.display());
        let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
        return Ok(Box::new(BufReader::new(decoder)));
    }

    anyhow::bail!("{} not found (also tried {})", path.display(), gz_path.display())
}

/// Line-at-a-time access to a catalog stream.
///
/// A read error ends the stream; it is logged rather than propagated so that one bad
/// file cannot abort an ingestion run.
pub(crate) struct LineSource {
    inner: Option<Box<dyn BufRead>>,
    buf: Vec<u8>,
}

impl LineSource {
    pub fn new(inner: Box<dyn BufRead>) -> Self {
        Self {
            inner: Some(inner),
            buf: Vec::new(),
        }
    }

    pub fn closed() -> Self {
        Self {
            inner: None,
            buf: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    pub fn next_line(&mut self) -> Option<String> {
        let reader = self.inner.as_mut()?;
        self.buf.clear();
        match reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.inner = None;
                None
            }
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                Some(String::from_utf8_lossy(&self.buf).into_owned())
            }
            Err(e) => {
                warn!("Error reading catalog stream: {}", e);
                self.inner = None;
                None
            }
        }
    }
}

/// Fixed-width column `start..end` of `line`, clipped to the line length.
pub(crate) fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

/// Parse a numeric column, `None` when blank, malformed or non-finite.
pub(crate) fn parse_f64(line: &str, start: usize, end: usize) -> Option<f64> {
    column(line, start, end)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub(crate) fn parse_u32(line: &str, start: usize, end: usize) -> Option<u32> {
    column(line, start, end).trim().parse().ok()
}
