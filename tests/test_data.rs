//! Shared fixture builders for the integration tests.
//!
//! Catalog lines are assembled column by column so that each fixture states only the
//! fields it cares about. Files are written into a temporary catalog root laid out the
//! way `ingest_all` expects (`gliese/`, `bright/`).

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

/// A fixed-width catalog line under construction.
#[derive(Default)]
pub struct Line(String);

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` starting at byte column `start`, padding with spaces as needed.
    pub fn put(mut self, start: usize, text: &str) -> Self {
        if self.0.len() < start + text.len() {
            let pad = start + text.len() - self.0.len();
            self.0.extend(std::iter::repeat(' ').take(pad));
        }
        self.0.replace_range(start..start + text.len(), text);
        self
    }

    pub fn build(self) -> String {
        self.0
    }
}

/// Gliese entry for Sirius A. `parallax` is in mas, right-justified in six columns,
/// or blank.
pub fn gliese_sirius(parallax: &str) -> String {
    Line::new()
        .put(0, "Gl")
        .put(2, "   244")
        .put(8, "A ")
        .put(12, "06 42 57 -16 38.7")
        .put(30, " 1.339 204.1  -7.6")
        .put(54, "A1 V")
        .put(67, " -1.44  0.01")
        .put(108, parallax)
        .put(121, " 1.47")
        .put(146, " 48915 BD-16  1591")
        .build()
}

/// Gliese entry for Wolf 359, named only through the remarks column.
pub fn gliese_wolf_359() -> String {
    Line::new()
        .put(0, "Gl")
        .put(2, "   406")
        .put(12, "10 54  6 +07 19.2")
        .put(30, " 4.696 235.1  19.0")
        .put(54, "M6  e")
        .put(67, " 13.45  2.01")
        .put(108, " 419.1")
        .put(121, "16.57")
        .put(188, "Wolf 359  CN Leo")
        .build()
}

/// The Sun's entry: no prefix, no coordinates, only an absolute magnitude.
pub fn gliese_sun() -> String {
    Line::new()
        .put(2, "Sun")
        .put(54, "G2 V")
        .put(67, "-26.72  0.65")
        .put(121, " 4.85")
        .build()
}

/// An `NN` entry, numbered `GJ 3001` and up in file order.
pub fn gliese_unnumbered(ra: &str) -> String {
    Line::new()
        .put(0, "NN")
        .put(2, "  1234")
        .put(12, ra)
        .put(21, "+12 00.0")
        .put(54, "M3")
        .put(108, "  40.0")
        .build()
}

/// Bright Star entry for Sirius. `parallax` is in arcsec (`+.375`) or blank.
pub fn bright_sirius(parallax: &str) -> String {
    Line::new()
        .put(0, "2491")
        .put(4, "  9Alp CMa")
        .put(14, "BD-16 1591 ")
        .put(25, " 48915")
        .put(31, "151881")
        .put(37, " 257")
        .put(44, " 5423")
        .put(49, "A ")
        .put(75, "064508.9-164258")
        .put(102, "-1.46")
        .put(109, " 0.00")
        .put(127, "A1Vm")
        .put(148, "-0.553-1.205 ")
        .put(161, parallax)
        .put(166, "-008")
        .build()
}

/// A Bright Star entry without coordinates (a nova or a removed object).
pub fn bright_without_position(hr: &str) -> String {
    Line::new()
        .put(0, hr)
        .put(4, " NOVA 1983")
        .put(102, " 4.00")
        .build()
}

/// A plain Bright Star entry with only HR, HD and a position.
pub fn bright_plain(hr: &str, hd: &str, ra: &str) -> String {
    Line::new()
        .put(0, hr)
        .put(25, hd)
        .put(75, ra)
        .put(83, "+452000")
        .put(102, " 5.00")
        .put(127, "K0III")
        .build()
}

/// Notes for Sirius: the common name plus a remark.
pub fn bright_sirius_notes() -> String {
    " 2491 1N:   SIRIUS; the Dog Star.\n".to_string()
}

/// Write `lines` to `root/sub/name`, creating directories.
pub fn write_catalog(root: &Path, sub: &str, name: &str, lines: &[String]) {
    let dir = root.join(sub);
    fs::create_dir_all(&dir).unwrap();
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(dir.join(name), text).unwrap();
}

/// Like [`write_catalog`] but gzip-compressed to `root/sub/name.gz`.
pub fn write_catalog_gz(root: &Path, sub: &str, name: &str, lines: &[String]) {
    let dir = root.join(sub);
    fs::create_dir_all(&dir).unwrap();
    let file = fs::File::create(dir.join(format!("{}.gz", name))).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    for line in lines {
        encoder.write_all(line.as_bytes()).unwrap();
        encoder.write_all(b"\n").unwrap();
    }
    encoder.finish().unwrap();
}
