//! Reader for the Yale Bright Star Catalogue, 5th revised edition (Hoffleit & Warren 1991).
//!
//! The catalog (CDS V/50) consists of `catalog.dat`, one line per HR number with
//! J2000 coordinates, and `notes.dat`, free-text notes keyed by HR number. Both can
//! be downloaded from <https://cdsarc.cds.unistra.fr/ftp/V/50/>.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, warn};

use super::{column, parse_f64, parse_u32, CatalogReader, DecodedRecord, LineSource};
use crate::geometry::{dms_to_rad, hms_to_rad, Epoch};
use crate::names::{self, greek, Cursor, NamingSystem};

pub const FILE_NAME: &str = "catalog.dat";
pub const NOTES_FILE_NAME: &str = "notes.dat";

/// One line of `notes.dat`.
#[derive(Debug, Clone, PartialEq)]
struct Note {
    hr: u32,
    /// Line number within this star's note of this category.
    count: u32,
    category: String,
    text: String,
}

impl Note {
    fn parse(line: &str) -> Option<Note> {
        Some(Note {
            hr: parse_u32(line, 1, 5)?,
            count: parse_u32(line, 5, 7)?,
            category: column(line, 7, 11).trim().to_string(),
            text: column(line, 12, line.len()).trim().to_string(),
        })
    }
}

/// Streaming reader over `catalog.dat`, with notes merged in from `notes.dat`.
pub struct BrightStarReader {
    catalog: LineSource,
    notes: LineSource,
    pending_note: Option<Note>,
}

impl BrightStarReader {
    /// Open `catalog.dat` and `notes.dat` (plain or `.gz`) in `dir`.
    ///
    /// A missing notes file only loses the common names and remarks.
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        let catalog = super::open_stream(dir, FILE_NAME)?;
        let notes = match super::open_stream(dir, NOTES_FILE_NAME) {
            Ok(notes) => Some(notes),
            Err(e) => {
                warn!("Bright star notes unavailable: {:#}", e);
                None
            }
        };
        Ok(Self::from_readers(catalog, notes))
    }

    pub fn from_readers(catalog: Box<dyn BufRead>, notes: Option<Box<dyn BufRead>>) -> Self {
        let mut reader = Self {
            catalog: LineSource::new(catalog),
            notes: notes.map(LineSource::new).unwrap_or_else(LineSource::closed),
            pending_note: None,
        };
        reader.next_note();
        reader
    }

    fn next_note(&mut self) {
        self.pending_note = None;
        while let Some(line) = self.notes.next_line() {
            match Note::parse(&line) {
                Some(note) => {
                    self.pending_note = Some(note);
                    return;
                }
                None => debug!("Skipping malformed note line {:?}", line),
            }
        }
    }

    /// Merge the notes for `hr` into `rec`.
    ///
    /// Notes are sorted by HR number; notes for HR numbers that have no catalog
    /// line are discarded on the way.
    fn read_notes(&mut self, hr: u32, rec: &mut DecodedRecord) {
        while let Some(note) = self.pending_note.take_if(|note| note.hr <= hr) {
            if note.hr == hr {
                apply_note(&note, rec);
            } else {
                debug!("Discarding note for HR {} without a catalog entry", note.hr);
            }
            self.next_note();
        }
    }

    fn decode(&mut self, hr: u32, line: &str) -> DecodedRecord {
        let mut rec = DecodedRecord::default();
        rec.set_name(format!("HR {}", hr), NamingSystem::Harvard);

        if let Some(dm) = names::durchmusterung_field(column(line, 14, 25)) {
            rec.add_name(dm, NamingSystem::Durchmusterung);
        }
        let numbered = [
            ("HD ", 25, 31, NamingSystem::HenryDraper),
            ("SAO ", 31, 37, NamingSystem::Sao),
            ("FK ", 37, 41, NamingSystem::Fk5),
            ("ADS ", 44, 49, NamingSystem::Ads),
        ];
        for (prefix, start, end, system) in numbered {
            if let Some(name) = names::prefixed(prefix, column(line, start, end)) {
                rec.add_name(name, system);
            }
        }
        rec.components = column(line, 49, 51).trim().to_string();

        let has_bayer = read_variable_star_name(column(line, 51, 60), &mut rec);
        read_general_name(column(line, 4, 14), has_bayer, &mut rec);
        self.read_notes(hr, &mut rec);

        rec.ra = match (
            parse_f64(line, 75, 77),
            parse_f64(line, 77, 79),
            parse_f64(line, 79, 83),
        ) {
            (Some(h), Some(m), Some(s)) => Some(hms_to_rad(h, m, s)),
            _ => None,
        };
        rec.dec = match (
            parse_f64(line, 84, 86),
            parse_f64(line, 86, 88),
            parse_f64(line, 88, 90),
        ) {
            (Some(d), Some(m), Some(s)) => Some(dms_to_rad(column(line, 83, 84) == "-", d, m, s)),
            _ => None,
        };

        rec.vmag = parse_f64(line, 102, 107);
        rec.b_v = parse_f64(line, 109, 114);
        rec.u_b = parse_f64(line, 115, 120);
        rec.r_i = parse_f64(line, 121, 126);
        rec.spectral_type = column(line, 127, 147).trim().to_string();

        // arcsec/yr; the RA rate is per unit of RA, so it needs the cos(dec) factor
        rec.pm_ra_mas = match (parse_f64(line, 148, 154), rec.dec) {
            (Some(pm), Some(dec)) => Some(pm * 1000.0 * dec.cos()),
            _ => None,
        };
        rec.pm_dec_mas = parse_f64(line, 154, 160).map(|pm| pm * 1000.0);
        rec.parallax_mas = parse_f64(line, 161, 166).map(|plx| plx * 1000.0);
        rec.radial_velocity = parse_f64(line, 166, 170);

        rec
    }
}

impl CatalogReader for BrightStarReader {
    fn is_ok(&self) -> bool {
        self.catalog.is_open()
    }

    fn catalog_name(&self) -> &'static str {
        "Yale bright star catalog"
    }

    fn epoch(&self) -> Epoch {
        Epoch::J2000
    }

    fn read_next(&mut self) -> Option<DecodedRecord> {
        loop {
            let line = self.catalog.next_line()?;
            let Some(hr) = parse_u32(&line, 0, 4) else {
                if !line.trim().is_empty() {
                    debug!("Skipping bright star line without HR number: {:?}", line);
                }
                continue;
            };
            return Some(self.decode(hr, &line));
        }
    }
}

/// Fold one note line into the record.
///
/// Only name notes (category `N`) are used. When the first line starts with an
/// all-caps name, that name becomes the star's common name; everything else is
/// kept as remarks.
fn apply_note(note: &Note, rec: &mut DecodedRecord) {
    if !note.category.starts_with('N') {
        return;
    }
    if note.count != 1 {
        rec.add_remark(&note.text);
        return;
    }

    let text = note.text.as_str();
    let Some(sep) = text.find(';').or_else(|| text.find('.')) else {
        rec.add_remark(text);
        return;
    };
    let name = text[..sep].trim();
    match names::title_case_from_upper(name).filter(|n| !n.is_empty()) {
        Some(common) => {
            rec.add_name(common, NamingSystem::Common);
            rec.add_remark(&text[sep + 1..]);
        }
        None => rec.add_remark(text),
    }
}

/// The variable star column: `V335 Ori`, `Alp Ori`, `Tau8 Eri`, `UV Cet`.
///
/// Returns whether a Bayer name was found.
fn read_variable_star_name(field: &str, rec: &mut DecodedRecord) -> bool {
    let mut cur = Cursor::new(field);
    cur.skip_whitespace();
    // blank, or a number from the Catalogue of Suspected Variable Stars
    match cur.peek() {
        None => return false,
        Some(c) if c.is_ascii_digit() => return false,
        Some(_) => {}
    }

    let letters = cur.take_while(|c| c.is_ascii_alphabetic());
    if letters.is_empty() || letters == "Var" {
        return false;
    }

    let (label, is_bayer) = if letters == "V" && cur.peek().is_some_and(|c| c.is_ascii_digit()) {
        let digits = cur.take_while(|c| c.is_ascii_digit());
        (format!("V{}", digits), false)
    } else {
        let (label, is_bayer) = match greek::from_title_abbreviation(letters) {
            Some(letter) => (letter, true),
            None => (letters, false),
        };
        cur.skip_whitespace();
        let index = cur.take_while(|c| c.is_ascii_digit());
        (format!("{}{}", label, names::superscript(index)), is_bayer)
    };

    let Some(constellation) = names::genitive(cur.word()) else {
        warn!("Unrecognized variable star name: {}", field.trim());
        return false;
    };
    let system = if is_bayer {
        NamingSystem::Bayer
    } else {
        NamingSystem::Variable
    };
    rec.add_name(format!("{} {}", label, constellation), system);
    is_bayer
}

/// The name column: Flamsteed number, Bayer letter with superscript, constellation.
fn read_general_name(field: &str, has_bayer: bool, rec: &mut DecodedRecord) {
    let mut cur = Cursor::new(field);
    cur.skip_whitespace();
    if cur.is_at_end() {
        return;
    }

    let flamsteed = cur.take_while(|c| c.is_ascii_digit());
    cur.skip_whitespace();
    // "Del" may be Delta or Delphini; decided by whether a constellation follows
    let mut bayer = cur.take_while(|c| c.is_ascii_alphabetic());
    cur.skip_whitespace();
    let index = cur.take_while(|c| c.is_ascii_digit());

    if bayer == "M" && !index.is_empty() {
        // Messier objects; M31 also carries a constellation, which Messier names don't use
        rec.add_name(format!("M{}", index), NamingSystem::Simple);
        return;
    }

    let mut constellation = cur.word();
    if constellation.is_empty() {
        constellation = bayer;
        bayer = "";
    }

    let Some(genitive) = names::genitive(constellation) else {
        // a handful of novae and galaxies
        rec.add_name(field.trim(), NamingSystem::Simple);
        return;
    };

    if !bayer.is_empty() && !has_bayer {
        let letter = greek::from_title_abbreviation(bayer).unwrap_or(bayer);
        rec.add_name(
            format!("{}{} {}", letter, names::superscript(index), genitive),
            NamingSystem::Bayer,
        );
    }
    if !flamsteed.is_empty() {
        rec.add_name(format!("{} {}", flamsteed, genitive), NamingSystem::Flamsteed);
    }
}
