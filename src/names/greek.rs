//! Greek letters as abbreviated in the catalogs.
//!
//! The Bright Star Catalogue writes them in title case (`Alp`), the Gliese
//! catalog in upper case (`ALF`, note the different spelling for alpha).

static LETTERS: [(&str, &str, &str); 24] = [
    ("Alp", "ALF", "Alpha"),
    ("Bet", "BET", "Beta"),
    ("Gam", "GAM", "Gamma"),
    ("Del", "DEL", "Delta"),
    ("Eps", "EPS", "Epsilon"),
    ("Zet", "ZET", "Zeta"),
    ("Eta", "ETA", "Eta"),
    ("The", "THE", "Theta"),
    ("Iot", "IOT", "Iota"),
    ("Kap", "KAP", "Kappa"),
    ("Lam", "LAM", "Lambda"),
    ("Mu", "MU", "Mu"),
    ("Nu", "NU", "Nu"),
    ("Xi", "XI", "Xi"),
    ("Omi", "OMI", "Omicron"),
    ("Pi", "PI", "Pi"),
    ("Rho", "RHO", "Rho"),
    ("Sig", "SIG", "Sigma"),
    ("Tau", "TAU", "Tau"),
    ("Ups", "UPS", "Upsilon"),
    ("Phi", "PHI", "Phi"),
    ("Chi", "CHI", "Chi"),
    ("Psi", "PSI", "Psi"),
    ("Ome", "OME", "Omega"),
];

/// Bright Star style (`"Alp"` → `"Alpha"`).
pub fn from_title_abbreviation(token: &str) -> Option<&'static str> {
    LETTERS
        .iter()
        .find(|(abb, _, _)| *abb == token)
        .map(|(_, _, name)| *name)
}

/// Gliese style (`"ALF"` → `"Alpha"`).
pub fn from_upper_abbreviation(token: &str) -> Option<&'static str> {
    LETTERS
        .iter()
        .find(|(_, abb, _)| *abb == token)
        .map(|(_, _, name)| *name)
}
