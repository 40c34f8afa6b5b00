//! Reader for the Gliese Catalogue of Nearby Stars, 3rd edition (Gliese & Jahreiß 1991).
//!
//! The catalog (CDS V/70A, `gliese3.dat`) can be downloaded from
//! <https://cdsarc.cds.unistra.fr/ftp/V/70A/>. Coordinates are equinox B1950.
//!
//! Besides the dedicated HD, DM, Giclas and LHS columns, most of the cross
//! identifications live in a free-text column at the end of each line. That column
//! is a space-separated token stream in which a double space ends the list of
//! names; see [`RemarkTokens`].

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use super::{column, parse_f64, CatalogReader, DecodedRecord, LineSource};
use crate::geometry::{dms_to_rad, hms_to_rad, Epoch};
use crate::names::{self, greek, NamingSystem};

pub const FILE_NAME: &str = "gliese3.dat";

/// Unofficial numbering for the `NN` entries starts here.
const FIRST_NN_NUMBER: u32 = 3001;

/// A designation system identified by a literal prefix followed by a number.
struct SimpleDesignation {
    prefix: &'static str,
    system: NamingSystem,
    /// Prefix to write instead, when the catalog's spelling differs from the usual one.
    replacement: Option<&'static str>,
}

const fn simple(prefix: &'static str, system: NamingSystem) -> SimpleDesignation {
    SimpleDesignation {
        prefix,
        system,
        replacement: None,
    }
}

const fn renamed(
    prefix: &'static str,
    system: NamingSystem,
    replacement: &'static str,
) -> SimpleDesignation {
    SimpleDesignation {
        prefix,
        system,
        replacement: Some(replacement),
    }
}

static SIMPLE_DESIGNATIONS: &[SimpleDesignation] = &[
    simple("ADS", NamingSystem::Ads),
    simple("BDS", NamingSystem::Simple),
    simple("BPM", NamingSystem::Bpm),
    renamed("BS", NamingSystem::Harvard, "HR"),
    simple("CAZ", NamingSystem::Simple),
    simple("CBS", NamingSystem::Simple),
    simple("CF", NamingSystem::Simple),
    renamed("CFS", NamingSystem::Simple, "CF"),
    simple("COU", NamingSystem::Simple),
    renamed("CVS", NamingSystem::Simple, "CSV"),
    simple("DON", NamingSystem::Simple),
    simple("ER", NamingSystem::Simple),
    simple("FK", NamingSystem::Fk5),
    simple("Feige", NamingSystem::Simple),
    simple("Fin", NamingSystem::Simple),
    simple("GD", NamingSystem::Simple),
    simple("GJ", NamingSystem::Gliese),
    renamed("GH", NamingSystem::Simple, "HG"),
    renamed("GR", NamingSystem::Simple, "GR*"),
    simple("Hei", NamingSystem::Simple),
    simple("HZ", NamingSystem::Simple),
    simple("Hy", NamingSystem::Simple),
    renamed("Kpr", NamingSystem::Simple, "Kui"),
    simple("Kr", NamingSystem::Simple),
    simple("Kui", NamingSystem::Simple),
    simple("L", NamingSystem::Luyten),
    simple("LB", NamingSystem::Simple),
    simple("LDS", NamingSystem::Simple),
    simple("LE", NamingSystem::Simple),
    simple("LFT", NamingSystem::Lft),
    simple("LOWNE", NamingSystem::Simple),
    simple("LP", NamingSystem::Lpm),
    simple("LTT", NamingSystem::Ltt),
    simple("MW", NamingSystem::Simple),
    simple("MWC", NamingSystem::Simple),
    simple("NSV", NamingSystem::Simple),
    simple("Oo", NamingSystem::Simple),
    simple("PS", NamingSystem::Simple),
    simple("Pulk", NamingSystem::Simple),
    simple("RGO", NamingSystem::Simple),
    simple("RST", NamingSystem::Simple),
    simple("Rob", NamingSystem::Simple),
    simple("Ross", NamingSystem::Simple),
    simple("S", NamingSystem::Simple),
    simple("SAO", NamingSystem::Sao),
    renamed("SM", NamingSystem::Simple, "Smethells"),
    simple("San", NamingSystem::Simple),
    renamed("Sm", NamingSystem::Simple, "Smethells"),
    simple("Stein", NamingSystem::Simple),
    simple("Steph", NamingSystem::Simple),
    simple("TR", NamingSystem::Simple),
    simple("TS", NamingSystem::Simple),
    renamed("U", NamingSystem::Ugpmf, "UGP"),
    renamed("USN", NamingSystem::Simple, "USNO"),
    simple("USNO", NamingSystem::Simple),
    simple("VA", NamingSystem::Simple),
    simple("VB", NamingSystem::Simple),
    renamed("VV", NamingSystem::Simple, "VVO"),
    simple("VVO", NamingSystem::Simple),
    renamed("WOR", NamingSystem::Simple, "Wor"),
    renamed("Wo", NamingSystem::Gliese, "GJ"),
    simple("Wor", NamingSystem::Simple),
    simple("Wolf", NamingSystem::Simple),
    simple("van Maanen", NamingSystem::Simple),
];

impl SimpleDesignation {
    fn name(&self, number: &str) -> String {
        format!("{} {}", self.replacement.unwrap_or(self.prefix), number)
    }
}

/// Streaming reader over `gliese3.dat`.
pub struct GlieseReader {
    lines: LineSource,
    nn_count: u32,
}

impl GlieseReader {
    /// Open `gliese3.dat` (or `gliese3.dat.gz`) in `dir`.
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        Ok(Self::from_reader(super::open_stream(dir, FILE_NAME)?))
    }

    pub fn from_reader(reader: Box<dyn BufRead>) -> Self {
        Self {
            lines: LineSource::new(reader),
            nn_count: FIRST_NN_NUMBER,
        }
    }

    fn decode(&mut self, line: &str) -> DecodedRecord {
        let mut rec = DecodedRecord {
            components: column(line, 8, 10).trim().to_string(),
            ..Default::default()
        };

        let prefix = column(line, 0, 2);
        let number = column(line, 2, 8).trim();
        if prefix.trim().is_empty() {
            // the Sun
            rec.set_name(number, NamingSystem::Common);
        } else if prefix == "NN" {
            // never numbered by Gliese; the usual unofficial numbering starts at 3001
            rec.set_name(format!("GJ {}", self.nn_count), NamingSystem::Gliese);
            self.nn_count += 1;
        } else {
            // Wo numbers are deprecated in favor of GJ
            let prefix = if prefix == "Gl" { "Gl" } else { "GJ" };
            let name = if rec.components.is_empty() {
                format!("{} {}", prefix, number)
            } else {
                format!("{} {} {}", prefix, number, rec.components)
            };
            rec.set_name(name, NamingSystem::Gliese);
        }

        if let Some(hd) = names::prefixed("HD ", column(line, 146, 152)) {
            rec.add_name(hd, NamingSystem::HenryDraper);
        }
        if let Some(dm) = names::durchmusterung_field(column(line, 153, 165)) {
            rec.add_name(dm, NamingSystem::Durchmusterung);
        }
        if let Some(g) = names::giclas(column(line, 166, 175)) {
            rec.add_name(g, NamingSystem::Giclas);
        }
        // A spurious left-justified "6" sometimes appears in the LHS column,
        // so only right-justified numbers are accepted.
        if line.as_bytes().get(180).is_some_and(|&b| b != b' ') {
            if let Some(lhs) = names::prefixed("LHS ", column(line, 176, 181)) {
                rec.add_name(lhs, NamingSystem::Lhs);
            }
        }
        read_extra_name(column(line, 182, 187), &mut rec);
        RemarkTokens::new(column(line, 188, line.len())).read_designations(&mut rec);

        rec.ra = match (
            parse_f64(line, 12, 14),
            parse_f64(line, 15, 17),
            parse_f64(line, 18, 20),
        ) {
            (Some(h), Some(m), Some(s)) => Some(hms_to_rad(h, m, s)),
            _ => None,
        };
        rec.dec = match (parse_f64(line, 22, 24), parse_f64(line, 25, 29)) {
            (Some(d), Some(m)) => Some(dms_to_rad(column(line, 21, 22) == "-", d, m, 0.0)),
            _ => None,
        };

        // total proper motion (arcsec/yr) and its position angle
        if let (Some(mu), Some(theta)) = (parse_f64(line, 30, 36), parse_f64(line, 37, 42)) {
            let (sin_t, cos_t) = theta.to_radians().sin_cos();
            rec.pm_ra_mas = Some(mu * sin_t * 1000.0);
            rec.pm_dec_mas = Some(mu * cos_t * 1000.0);
        }
        rec.radial_velocity = parse_f64(line, 43, 49);
        rec.spectral_type = column(line, 54, 66).trim().to_string();
        rec.vmag = parse_f64(line, 67, 73);
        rec.b_v = parse_f64(line, 75, 80);
        rec.u_b = parse_f64(line, 82, 87);
        rec.r_i = parse_f64(line, 89, 94);
        rec.parallax_mas = parse_f64(line, 108, 114);
        rec.absolute_vmag = parse_f64(line, 121, 126);

        // The Sun is the only entry without coordinates.
        rec.at_origin = prefix.trim().is_empty() && rec.ra.is_none();

        rec
    }
}

impl CatalogReader for GlieseReader {
    fn is_ok(&self) -> bool {
        self.lines.is_open()
    }

    fn catalog_name(&self) -> &'static str {
        "Gliese star catalog"
    }

    fn epoch(&self) -> Epoch {
        Epoch::B1950
    }

    fn read_next(&mut self) -> Option<DecodedRecord> {
        loop {
            let line = self.lines.next_line()?;
            if line.trim().is_empty() {
                continue;
            }
            return Some(self.decode(&line));
        }
    }
}

/// The single-letter-coded extra designation column (Vyssotsky, UGPMF, EGGR).
fn read_extra_name(field: &str, rec: &mut DecodedRecord) -> bool {
    let Some(code) = field.chars().next().filter(|c| *c != ' ') else {
        return false;
    };
    let Some(number) = field.get(1..4).and_then(|n| n.trim().parse::<u32>().ok()) else {
        return false;
    };
    let suffix = field.get(4..).unwrap_or("").trim_end();

    match code {
        'V' => rec.add_name(format!("Vys {:03}{}", number, suffix), NamingSystem::Vyssotsky),
        'U' => rec.add_name(format!("UGP {}{}", number, suffix), NamingSystem::Ugpmf),
        'W' => rec.add_name(format!("EGGR {}{}", number, suffix), NamingSystem::Eggr),
        _ => return false,
    }
    true
}

/// Whether a designation rule consumed its tokens.
enum Rule {
    Matched,
    NoMatch,
}

/// Token stream over the free-text name column.
///
/// Tokens are separated by single spaces. A token only continues the stream if it
/// starts with an alphanumeric character right after the separating space, so a
/// double space (or trailing punctuation) ends the list of names. Some rules know
/// that a name needs a second token and force the stream past extra spaces.
pub struct RemarkTokens<'a> {
    cursor: names::Cursor<'a>,
    token: &'a str,
    ended: bool,
}

impl<'a> RemarkTokens<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokens = Self {
            cursor: names::Cursor::new(text),
            token: "",
            ended: false,
        };
        tokens.advance(false);
        tokens
    }

    fn advance(&mut self, force: bool) {
        self.token = "";
        if self.ended {
            return;
        }
        if force || self.cursor.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.token = self.cursor.word();
            // the separating space
            self.cursor.bump();
            self.ended = self.token.is_empty();
        } else {
            self.ended = true;
        }
    }

    /// Decode every recognized designation into `rec`.
    pub fn read_designations(mut self, rec: &mut DecodedRecord) {
        while !self.token.is_empty() {
            let mut tok = self.token.to_string();
            let mut flamsteed = None;

            if tok.starts_with(|c: char| c.is_ascii_digit()) {
                flamsteed = Some(tok);
                self.advance(false);
                tok = self.token.to_string();
                self.advance(false);
            } else {
                if let Rule::Matched = self.single_token_rules(&mut tok, rec) {
                    continue;
                }
                // Everything left needs a second token, even past extra spaces.
                self.advance(true);
                if let Rule::Matched = self.two_token_rules(&mut tok, rec) {
                    continue;
                }
            }

            if let Rule::NoMatch = self.bayer_flamsteed(&tok, flamsteed.as_deref(), rec) {
                debug!("Unrecognized token {:?} in remarks of {}", tok, rec.name.name);
                break;
            }
        }
    }

    fn single_token_rules(&mut self, tok: &mut String, rec: &mut DecodedRecord) -> Rule {
        if tok == "no" {
            // "no ...: name" comments; skip to the name after the colon
            self.cursor.skip_past(':');
            self.advance(true);
            return Rule::Matched;
        }

        // Astrographic Catalogue, AC+82:1111 (sometimes split at the colon)
        if tok.len() >= 4 && (tok.starts_with("AC+") || tok.starts_with("AC-")) {
            if !tok[3..].contains(':') {
                self.advance(true);
                tok.push(':');
                tok.push_str(self.token);
            }
            rec.add_name(tok.as_str(), NamingSystem::Astrographic);
            self.advance(false);
            return Rule::Matched;
        }

        // CD, CP and AG Durchmusterung (BD has its own column)
        if ["CD", "Cd", "CP", "Cp", "AG"].iter().any(|p| tok.starts_with(p)) {
            let sign = match tok.as_bytes().get(2) {
                Some(&b) => Some(b as char),
                None => self.cursor.peek(),
            };
            if matches!(sign, Some('+' | '-')) {
                if tok.len() == 2 {
                    self.advance(true);
                    tok.push_str(self.token);
                }
                if let Some(colon) = tok.get(3..).and_then(|t| t.find(':')).map(|i| i + 3) {
                    let catalog = tok[..2].to_ascii_uppercase();
                    let mut number = tok[colon + 1..].to_string();
                    if number.is_empty() {
                        self.advance(true);
                        number = self.token.to_string();
                    }
                    if let Some(dm) = names::durchmusterung(&catalog, &tok[2..colon], &number) {
                        rec.add_name(dm, NamingSystem::Durchmusterung);
                        self.advance(false);
                        return Rule::Matched;
                    }
                }
            }
        }

        if tok.len() == 8 && tok.starts_with('G') && tok.as_bytes()[4] == b'-' {
            if let Some(g) = names::giclas(tok) {
                rec.add_name(g, NamingSystem::Giclas);
                self.advance(false);
                return Rule::Matched;
            }
        }

        // white dwarfs
        if tok.len() >= 4 && tok.starts_with("WD") {
            rec.add_name(format!("WD {}", &tok[2..]), NamingSystem::Simple);
            self.advance(false);
            return Rule::Matched;
        }

        if tok.len() >= 4 && tok.starts_with("FI") && tok[2..].contains('-') {
            rec.add_name(format!("Furuhjelm {}", &tok[1..]), NamingSystem::Simple);
            self.advance(false);
            return Rule::Matched;
        }

        // PG identifiers in this catalog never match anything in SIMBAD
        if tok.starts_with("PG") || tok == "LHS." {
            self.advance(false);
            return Rule::Matched;
        }

        // broken token followed by two spaces and a real name
        if tok == "LP." {
            self.advance(true);
            return Rule::Matched;
        }

        // prefix and number without the separating space
        for desig in SIMPLE_DESIGNATIONS {
            if let Some(number) = tok.strip_prefix(desig.prefix) {
                if number.starts_with(|c: char| c.is_ascii_digit()) {
                    rec.add_name(desig.name(number), desig.system);
                    self.advance(false);
                    return Rule::Matched;
                }
            }
        }

        Rule::NoMatch
    }

    fn two_token_rules(&mut self, tok: &mut String, rec: &mut DecodedRecord) -> Rule {
        // variable star with a spurious space, "V 1581"
        if tok == "V" && self.token.starts_with(|c: char| c.is_ascii_digit()) {
            tok.push_str(self.token);
            self.advance(false);
        }

        // "vB 170 Hyades" is Hy 170
        if tok == "vB" {
            let number = self.token;
            self.advance(false);
            if self.token == "Hyades" {
                *tok = "Hy".to_string();
            }
            self.token = number;
        }

        if tok == "van" {
            tok.push(' ');
            tok.push_str(self.token);
            self.advance(false);
        }

        let number = self.token;
        if number.starts_with(|c: char| c.is_ascii_digit()) {
            if let Some(desig) = SIMPLE_DESIGNATIONS.iter().find(|d| d.prefix == tok.as_str()) {
                rec.add_name(desig.name(number), desig.system);
                self.advance(false);
                return Rule::Matched;
            }

            match tok.as_str() {
                // Selected Area
                "SA" => {
                    let mut id = number.replacen(':', "-", 1);
                    if id.ends_with('-') {
                        self.advance(true);
                        id.push_str(self.token);
                    }
                    rec.add_name(format!("SA {}", id), NamingSystem::Other);
                }
                "GSC" => rec.add_name(format!("GSC {}", number), NamingSystem::Other),
                // Einstein catalog, written IE and sometimes missing its period
                "IE" => {
                    let mut id = number.to_string();
                    if id.as_bytes().get(4).is_some_and(|b| b.is_ascii_digit()) {
                        id.insert(4, '.');
                    }
                    rec.add_name(format!("1E {}", id), NamingSystem::Other);
                }
                // Toulouse; the "23." zone prefix is redundant
                "Tou" => {
                    let id = number.strip_prefix("23.").unwrap_or(number);
                    rec.add_name(format!("Tou {}", id), NamingSystem::Simple);
                }
                _ => return self.possessive(tok, rec),
            }
            self.advance(false);
            return Rule::Matched;
        }

        self.possessive(tok, rec)
    }

    /// "Barnard's star", "Riepe's double"
    fn possessive(&mut self, tok: &str, rec: &mut DecodedRecord) -> Rule {
        if tok.ends_with("'s") && self.token.starts_with(|c: char| c.is_ascii_alphabetic()) {
            rec.add_name(format!("{} {}", tok, self.token), NamingSystem::Common);
            self.advance(false);
            return Rule::Matched;
        }
        Rule::NoMatch
    }

    /// Bayer (`ALF Cen`, `PI(1) UMa`) and Flamsteed (`61 Cyg`) names, optionally
    /// followed by an `A`/`B` component letter.
    fn bayer_flamsteed(
        &mut self,
        tok: &str,
        flamsteed: Option<&str>,
        rec: &mut DecodedRecord,
    ) -> Rule {
        let mut bayer = None;
        let constellation = match flamsteed.and_then(|_| names::genitive(tok)) {
            Some(genitive) => genitive,
            None => {
                let Some(genitive) = names::genitive(self.token) else {
                    return Rule::NoMatch;
                };
                let (letter, index) = match (tok.find('('), tok.ends_with(')')) {
                    (Some(open), true) => (&tok[..open], &tok[open + 1..tok.len() - 1]),
                    _ => (tok, ""),
                };
                let letter = greek::from_upper_abbreviation(letter).unwrap_or(letter);
                bayer = Some(format!("{}{}", letter, names::superscript(index)));
                self.advance(false);
                genitive
            }
        };

        let mut constellation = constellation.to_string();
        if self.token == "A" || self.token == "B" {
            constellation.push(' ');
            constellation.push_str(self.token);
            self.advance(false);
        }

        if let Some(bayer) = bayer {
            rec.add_name(format!("{} {}", bayer, constellation), NamingSystem::Bayer);
        }
        if let Some(number) = flamsteed {
            rec.add_name(format!("{} {}", number, constellation), NamingSystem::Flamsteed);
        }
        Rule::Matched
    }
}
