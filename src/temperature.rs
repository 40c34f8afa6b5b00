//! Effective temperature estimation from spectral type and B−V color index.
//!
//! The spectral class and subdivision select a point in one of several temperature
//! tables (main sequence, giants, supergiants, carbon stars, Wolf-Rayet stars).
//! Between table entries the temperature is interpolated linearly in subdivision,
//! where crossing into the next class counts as 10 subdivisions (subdivisions run
//! 0–9 within each class). Below 10000 K the table estimate is blended with the
//! Ballesteros B−V formula, which tracks the photosphere better for cool stars.

use tracing::debug;

use crate::spectral::SpectralType;

/// White dwarf classes encode temperature as `50400 / subdivision`.
const WHITE_DWARF_CONSTANT: f64 = 50400.0;
/// Subdivision assumed when a class has none.
const DEFAULT_SUBDIVISION: f64 = 5.0;
/// Above this, B−V estimates are not used at all.
const BV_UPPER_LIMIT: f64 = 10000.0;
/// Below this, B−V estimates replace table values entirely.
const BV_REPLACE_LIMIT: f64 = 7500.0;

#[derive(Debug, Clone, Copy)]
struct TableEntry {
    class: char,
    subdivision: f64,
    kelvin: f64,
}

const fn e(class: char, subdivision: u8, kelvin: f64) -> TableEntry {
    TableEntry {
        class,
        subdivision: subdivision as f64,
        kelvin,
    }
}

// ── Temperature tables ──────────────────────────────────────────────────────

static MAIN_SEQUENCE: &[TableEntry] = &[
    e('O', 3, 44900.0), e('O', 4, 42900.0), e('O', 5, 41400.0), e('O', 6, 39500.0),
    e('O', 7, 37100.0), e('O', 8, 35100.0), e('O', 9, 33300.0),
    e('B', 0, 31400.0), e('B', 1, 26000.0), e('B', 2, 20600.0), e('B', 3, 17000.0),
    e('B', 4, 16400.0), e('B', 5, 15700.0), e('B', 6, 14500.0), e('B', 7, 14000.0),
    e('B', 8, 12300.0), e('B', 9, 10700.0),
    e('A', 0, 9700.0), e('A', 1, 9300.0), e('A', 2, 8800.0), e('A', 3, 8600.0),
    e('A', 4, 8250.0), e('A', 5, 8100.0), e('A', 6, 7910.0), e('A', 7, 7760.0),
    e('A', 8, 7590.0), e('A', 9, 7400.0),
    e('F', 0, 7220.0), e('F', 1, 7020.0), e('F', 2, 6820.0), e('F', 3, 6750.0),
    e('F', 4, 6670.0), e('F', 5, 6550.0), e('F', 6, 6350.0), e('F', 7, 6280.0),
    e('F', 8, 6180.0), e('F', 9, 6050.0),
    e('G', 0, 5930.0), e('G', 1, 5860.0), e('G', 2, 5770.0), e('G', 3, 5720.0),
    e('G', 4, 5680.0), e('G', 5, 5660.0), e('G', 6, 5600.0), e('G', 7, 5550.0),
    e('G', 8, 5480.0), e('G', 9, 5380.0),
    e('K', 0, 5270.0), e('K', 1, 5170.0), e('K', 2, 5100.0), e('K', 3, 4830.0),
    e('K', 4, 4800.0), e('K', 5, 4440.0), e('K', 6, 4300.0), e('K', 7, 4100.0),
    e('K', 8, 3990.0), e('K', 9, 3930.0),
    e('M', 0, 3850.0), e('M', 1, 3660.0), e('M', 2, 3560.0), e('M', 3, 3430.0),
    e('M', 4, 3210.0), e('M', 5, 3060.0), e('M', 6, 2810.0), e('M', 7, 2680.0),
    e('M', 8, 2570.0), e('M', 9, 2380.0),
];

static GIANT: &[TableEntry] = &[
    e('G', 5, 5010.0), e('G', 8, 4870.0),
    e('K', 0, 4720.0), e('K', 1, 4580.0), e('K', 2, 4460.0), e('K', 3, 4210.0),
    e('K', 4, 4010.0), e('K', 5, 3780.0),
    e('M', 0, 3660.0), e('M', 1, 3600.0), e('M', 2, 3500.0), e('M', 3, 3300.0),
    e('M', 4, 3100.0), e('M', 5, 2950.0), e('M', 6, 2800.0),
];

static SUPERGIANT: &[TableEntry] = &[
    e('B', 0, 21000.0), e('B', 1, 16000.0), e('B', 2, 14000.0), e('B', 3, 12800.0),
    e('B', 5, 11500.0), e('B', 6, 11000.0), e('B', 7, 10500.0), e('B', 8, 10000.0),
    e('B', 9, 9700.0),
    e('A', 0, 9400.0), e('A', 1, 9100.0), e('A', 2, 8900.0), e('A', 5, 8300.0),
    e('F', 0, 7500.0), e('F', 2, 7200.0), e('F', 5, 6800.0), e('F', 8, 6150.0),
    e('G', 0, 5800.0), e('G', 2, 5500.0), e('G', 5, 5100.0), e('G', 8, 5050.0),
    e('K', 0, 4900.0), e('K', 1, 4700.0), e('K', 2, 4500.0), e('K', 3, 4300.0),
    e('K', 4, 4100.0), e('K', 5, 3750.0),
    e('M', 0, 3660.0), e('M', 1, 3600.0), e('M', 2, 3500.0), e('M', 3, 3300.0),
    e('M', 4, 3100.0), e('M', 5, 2950.0),
];

static CARBON_C: &[TableEntry] = &[
    e('C', 0, 4500.0), e('C', 1, 4300.0), e('C', 2, 4100.0), e('C', 3, 3900.0),
    e('C', 4, 3650.0), e('C', 5, 3450.0),
];

static CARBON_R: &[TableEntry] = &[
    e('R', 0, 4300.0), e('R', 3, 3900.0), e('R', 5, 3700.0), e('R', 8, 3450.0),
];

static WOLF_RAYET_N: &[TableEntry] = &[
    e('N', 2, 141000.0), e('N', 3, 85000.0), e('N', 4, 70000.0), e('N', 5, 60000.0),
    e('N', 6, 56000.0), e('N', 7, 50000.0), e('N', 8, 45000.0),
];

static WOLF_RAYET_NH: &[TableEntry] = &[
    e('N', 5, 50000.0), e('N', 6, 45000.0), e('N', 7, 45000.0), e('N', 8, 40000.0),
    e('N', 9, 35000.0),
];

static WOLF_RAYET_C: &[TableEntry] = &[
    e('O', 2, 200000.0),
    e('C', 4, 117000.0), e('C', 5, 83000.0), e('C', 6, 78000.0), e('C', 7, 71000.0),
    e('C', 8, 60000.0), e('C', 9, 44000.0),
];

// ── Estimation ──────────────────────────────────────────────────────────────

/// Estimate the effective temperature (Kelvin) of a star.
///
/// `spectral_type` is the raw classification string; `b_v` the Johnson B−V index, if known.
/// Returns `None` only when neither a usable spectral class nor a B−V index is available.
pub fn estimate_temperature(spectral_type: &str, b_v: Option<f64>) -> Option<f64> {
    let b_v = b_v.filter(|bv| bv.is_finite());
    let spec = SpectralType::parse(spectral_type);

    let mut classes = spec.class.chars();
    let Some(mut cls) = classes.next() else {
        // No spectral class (probably a variable star)
        return b_v.map(temperature_from_bv);
    };

    let uncertain = spec.subdivision.is_none();
    let mut subdiv = spec
        .subdivision
        .map(f64::from)
        .unwrap_or(DEFAULT_SUBDIVISION);

    match cls {
        'D' => {
            let kelvin = WHITE_DWARF_CONSTANT / subdiv.max(0.5);
            return Some(blend_with_bv(kelvin, b_v, uncertain));
        }
        // S-type stars have roughly the temperature of M-type stars.
        'S' => cls = 'M',
        // N0 maps roughly to C6.
        'N' => {
            cls = 'C';
            subdiv += 6.0;
        }
        _ => {}
    }

    let (table, fallback): (&[TableEntry], Option<&[TableEntry]>) = match cls {
        'C' => (CARBON_C, None),
        'R' => (CARBON_R, None),
        'W' => {
            let Some(second) = classes.next() else {
                debug!("Unrecognized spectral class {}", spectral_type);
                return b_v.map(temperature_from_bv);
            };
            cls = second;
            if cls == 'N' {
                if spec.peculiarity.starts_with('h') {
                    (WOLF_RAYET_NH, None)
                } else {
                    (WOLF_RAYET_N, None)
                }
            } else {
                (WOLF_RAYET_C, None)
            }
        }
        _ if spec.is_supergiant() => (SUPERGIANT, Some(MAIN_SEQUENCE)),
        _ if spec.is_giant() => (GIANT, Some(MAIN_SEQUENCE)),
        _ => (MAIN_SEQUENCE, None),
    };

    let kelvin = match fallback {
        Some(main_sequence) => {
            lookup(table, cls, subdiv, true).or_else(|| lookup(main_sequence, cls, subdiv, false))
        }
        None => lookup(table, cls, subdiv, false),
    };

    match kelvin {
        Some(kelvin) => Some(blend_with_bv(kelvin, b_v, uncertain)),
        None => {
            debug!("Unrecognized spectral class {}", spectral_type);
            b_v.map(temperature_from_bv)
        }
    }
}

/// Ballesteros' formula for blackbody temperature from B−V.
pub fn temperature_from_bv(b_v: f64) -> f64 {
    4600.0 * (1.0 / (0.92 * b_v + 1.7) + 1.0 / (0.92 * b_v + 0.62))
}

fn blend_with_bv(kelvin: f64, b_v: Option<f64>, uncertain: bool) -> f64 {
    match b_v {
        Some(bv) if kelvin < BV_UPPER_LIMIT => {
            let bv_kelvin = temperature_from_bv(bv);
            if kelvin < BV_REPLACE_LIMIT || uncertain {
                bv_kelvin
            } else {
                // class A: fade from the table value at 10000 K to B−V at 7500 K
                let factor = (kelvin - BV_REPLACE_LIMIT) / (BV_UPPER_LIMIT - BV_REPLACE_LIMIT);
                kelvin * factor + bv_kelvin * (1.0 - factor)
            }
        }
        _ => kelvin,
    }
}

/// Subdivision distance between two table entries, counting a class change as 10.
fn span(lo: &TableEntry, hi: &TableEntry) -> f64 {
    let boundary = if lo.class == hi.class { 0.0 } else { 10.0 };
    boundary + hi.subdivision - lo.subdivision
}

/// Look up `cls`/`subdiv` in `table`.
///
/// With `strict`, a table whose first entry for the class lies above the queried
/// subdivision is treated as not covering the class at all, so that the caller can
/// fall back to a more general table.
fn lookup(table: &[TableEntry], cls: char, subdiv: f64, strict: bool) -> Option<f64> {
    let start = table.iter().position(|t| t.class == cls)?;
    let end = start + table[start..].iter().take_while(|t| t.class == cls).count();
    let first = &table[start];

    if subdiv < first.subdivision {
        if strict {
            return None;
        }
        // before the first entry of the class: extrapolate
        return Some(match table.get(start + 1) {
            Some(next) => first.kelvin + (first.kelvin - next.kelvin) * (first.subdivision - subdiv) / span(first, next),
            None => first.kelvin,
        });
    }

    match table[start..end].iter().position(|t| t.subdivision >= subdiv) {
        Some(i) => {
            let hit = &table[start + i];
            if hit.subdivision == subdiv {
                return Some(hit.kelvin);
            }
            // i > 0 since subdiv >= first.subdivision
            let lo = &table[start + i - 1];
            Some(lo.kelvin - (lo.kelvin - hit.kelvin) * (subdiv - lo.subdivision) / span(lo, hit))
        }
        None => {
            let lo = &table[end - 1];
            if let Some(hi) = table.get(end) {
                // between the last entry of this class and the first of the next
                Some(lo.kelvin - (lo.kelvin - hi.kelvin) * (subdiv - lo.subdivision) / span(lo, hi))
            } else if end >= 2 {
                // past the end of the table: extrapolate
                let prev = &table[end - 2];
                Some(lo.kelvin - (prev.kelvin - lo.kelvin) * (subdiv - lo.subdivision) / span(prev, lo))
            } else {
                Some(lo.kelvin)
            }
        }
    }
}
