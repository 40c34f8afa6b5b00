//! Star designation systems and the shared formatting rules for composed names.
//!
//! Every name a catalog reader recognizes is tagged with the [`NamingSystem`] it
//! belongs to. The system's priority decides display order (lower first) and, for
//! Henry Draper numbers, which names the merge engine trusts most.

pub mod constellation;
pub mod cursor;
pub mod greek;

pub use constellation::genitive;
pub use cursor::Cursor;

/// Designation systems, ordered roughly from most to least human-recognizable.
///
/// The discriminant is the priority stored with each [`crate::StarName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum NamingSystem {
    /// Sirius, Barnard's Star
    Common = 0,
    /// Alpha Centauri
    Bayer = 1,
    /// UV Ceti
    Variable = 2,
    /// 61 Cygni
    Flamsteed = 3,
    /// Ross 128, Wolf 359
    Simple = 4,
    Other = 5,
    /// BD+36°2147
    Durchmusterung = 6,
    /// AC+82:1111 (Astrographic Catalogue)
    Astrographic = 7,
    /// G 267-25
    Giclas = 8,

    /// L 1154-29
    Luyten = 10,
    /// Bruce Proper Motion survey
    Bpm = 11,
    /// Luyten Five-Tenth
    Lft = 12,
    /// Luyten Half-Second
    Lhs = 13,
    /// Luyten Proper Motion
    Lpm = 14,
    /// Luyten Two-Tenth
    Ltt = 15,

    Gliese = 16,

    /// Henry Draper
    HenryDraper = 20,
    /// Aitken Double Star
    Ads = 30,
    Vyssotsky = 40,
    /// Smithsonian Astrophysical Observatory
    Sao = 45,
    Fk5 = 50,
    /// Harvard Revised (Bright Star number)
    Harvard = 51,
    Ugpmf = 52,
    Eggr = 53,
}

impl NamingSystem {
    pub fn priority(self) -> i32 {
        self as i32
    }
}

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Replace ASCII digits with their Unicode superscript forms.
pub fn superscript(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => SUPERSCRIPT_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Compose a Durchmusterung designation such as `BD+36°2147`.
///
/// `zone` starts with the sign; blanks in the rest of the zone become zeros. A blank
/// catalog prefix means Bonner Durchmusterung. Returns `None` for a blank number.
pub fn durchmusterung(catalog: &str, zone: &str, number: &str) -> Option<String> {
    let number = number.trim();
    if number.is_empty() {
        return None;
    }
    let mut chars = zone.chars();
    let mut name = String::new();
    if catalog.starts_with(' ') || catalog.is_empty() {
        name.push_str("BD");
    } else {
        name.push_str(catalog);
    }
    if let Some(sign) = chars.next() {
        name.push(sign);
    }
    name.extend(chars.map(|c| if c == ' ' { '0' } else { c }));
    name.push('°');
    name.push_str(number);
    Some(name)
}

/// Decode a fixed-width Durchmusterung field laid out as `CCsZZ NNNNN`.
pub fn durchmusterung_field(field: &str) -> Option<String> {
    let catalog = field.get(0..2)?;
    let zone = field.get(2..5)?;
    let number = field.get(6..)?;
    durchmusterung(catalog, zone, number)
}

/// Decode a Giclas designation laid out as `Gnnn-nnn` (either part may be space padded).
pub fn giclas(field: &str) -> Option<String> {
    if !field.starts_with('G') {
        return None;
    }
    let first: u32 = field.get(1..4)?.trim().parse().ok()?;
    let second: u32 = field.get(5..8)?.trim().parse().ok()?;
    Some(format!("G {}-{}", first, second))
}

/// `prefix` followed by the trimmed field, or `None` for a blank field.
pub fn prefixed(prefix: &str, field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty() {
        None
    } else {
        Some(format!("{}{}", prefix, field))
    }
}

/// Recase an all-caps name to title case (`"BARNARD'S STAR"` → `"Barnard's Star"`).
///
/// Returns `None` if the name contains lowercase letters.
pub fn title_case_from_upper(name: &str) -> Option<String> {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars() {
        if c == ' ' {
            word_start = true;
            out.push(c);
        } else if c.is_lowercase() {
            return None;
        } else if word_start {
            word_start = false;
            out.push(c);
        } else {
            out.extend(c.to_lowercase());
        }
    }
    Some(out)
}
