//! Decoding of Harvard / Yerkes (MK) spectral classification strings.
//!
//! A classification such as `"gK0"`, `"G2V"`, `"M3III:"` or `"sdB9"` is split
//! positionally into:
//!
//! | Field | Example | Notes |
//! |-------|---------|-------|
//! | Mount Wilson prefix | `g`, `c`, `sd` | leading lowercase letters |
//! | class | `G`, `WN`, `DA` | uppercase letters |
//! | subdivision | `2`, `9.5` | one digit, optionally one decimal |
//! | luminosity class | `V`, `III`, `Iab` → `I` | `I` run, `V` + `I` run, or `0` |
//! | peculiarity | `e`, `pec`, `h` | everything left over |
//!
//! Parsing never fails; malformed input simply leaves fields empty.

/// A spectral classification decoded into its positional fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectralType {
    /// Mount Wilson luminosity prefix (lowercase letters, e.g. `"c"`, `"g"`, `"sd"`).
    pub mount_wilson: String,
    /// Spectral class letters (uppercase, e.g. `"G"`, `"WN"`, `"DA"`).
    pub class: String,
    /// Subdivision within the class. `None` when no digit follows the class.
    pub subdivision: Option<f32>,
    /// Luminosity class (`"I"`, `"III"`, `"IV"`, `"V"`, `"0"`, ...).
    pub luminosity: String,
    /// Trailing peculiarity codes.
    pub peculiarity: String,
}

impl SpectralType {
    /// Decode a spectral classification string. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Self {
        let chars: Vec<char> = text.trim().chars().collect();
        let at = |i: usize| chars.get(i).copied();
        let mut pos = 0;
        let mut spec = SpectralType::default();

        while let Some(c) = at(pos).filter(|c| c.is_ascii_lowercase()) {
            spec.mount_wilson.push(c);
            pos += 1;
        }
        if at(pos) == Some(':') {
            pos += 1;
        }

        while let Some(c) = at(pos).filter(|c| c.is_ascii_uppercase()) {
            spec.class.push(c);
            pos += 1;
        }

        if let Some(d) = at(pos).and_then(|c| c.to_digit(10)) {
            let mut sub = d as f32;
            pos += 1;
            // one decimal place at most
            if at(pos) == Some('.') {
                if let Some(frac) = at(pos + 1).and_then(|c| c.to_digit(10)) {
                    sub += frac as f32 * 0.1;
                    pos += 2;
                }
            }
            spec.subdivision = Some(sub);
        }

        while at(pos) == Some('I') {
            spec.luminosity.push('I');
            pos += 1;
        }
        if at(pos) == Some('V') {
            spec.luminosity.push('V');
            pos += 1;
            while at(pos) == Some('I') {
                spec.luminosity.push('I');
                pos += 1;
            }
        }
        if spec.luminosity.is_empty() && at(pos) == Some('0') {
            spec.luminosity.push('0');
            pos += 1;
        }
        if at(pos) == Some(':') {
            pos += 1;
        }

        spec.peculiarity = chars.get(pos..).unwrap_or_default().iter().collect();

        // Something like "pec" is not a Mount Wilson prefix.
        if spec.class.is_empty() && spec.subdivision.is_none() && spec.luminosity.is_empty() {
            spec.peculiarity = std::mem::take(&mut spec.mount_wilson) + &spec.peculiarity;
        }

        spec
    }

    /// Luminosity class 0 or I, or Mount Wilson "c".
    pub fn is_supergiant(&self) -> bool {
        self.luminosity == "0" || self.luminosity == "I" || self.mount_wilson == "c"
    }

    /// Luminosity class II or III, or Mount Wilson "g".
    pub fn is_giant(&self) -> bool {
        self.luminosity == "II" || self.luminosity == "III" || self.mount_wilson == "g"
    }
}

impl std::str::FromStr for SpectralType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
