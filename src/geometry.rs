//! Equatorial → galactic coordinate frames and spherical helpers.
//!
//! Each supported catalog epoch is described by the equatorial direction of the
//! galactic core and of the galactic north pole at that epoch. From those two unit
//! vectors an orthonormal basis is built:
//!
//! - `x` points at the galactic core,
//! - `y` is `north × core`, normalized (the pole measurements are not exactly
//!   perpendicular to the core direction),
//! - `z` is `x × y`, the corrected north pole.
//!
//! The rows of the rotation matrix are these basis vectors, so `R · v` expresses an
//! equatorial vector in galactic coordinates.

use std::f64::consts::PI;

use crate::{Matrix3, Vector3};

/// Unit vector for right ascension / declination (radians).
pub fn radec_to_uvec(ra_rad: f64, dec_rad: f64) -> Vector3 {
    let (sin_ra, cos_ra) = ra_rad.sin_cos();
    let (sin_dec, cos_dec) = dec_rad.sin_cos();
    Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Derivative of [`radec_to_uvec`] with respect to RA, without the `cos(dec)` factor.
///
/// Proper motion in RA is usually published already multiplied by `cos(dec)`,
/// so the caller supplies that scaling.
pub fn d_ra_unscaled(ra_rad: f64) -> Vector3 {
    let (sin_ra, cos_ra) = ra_rad.sin_cos();
    Vector3::new(-sin_ra, cos_ra, 0.0)
}

/// Derivative of [`radec_to_uvec`] with respect to declination.
pub fn d_dec(ra_rad: f64, dec_rad: f64) -> Vector3 {
    let (sin_ra, cos_ra) = ra_rad.sin_cos();
    let (sin_dec, cos_dec) = dec_rad.sin_cos();
    Vector3::new(-sin_dec * cos_ra, -sin_dec * sin_ra, cos_dec)
}

/// Hours, minutes and seconds of right ascension to radians.
pub fn hms_to_rad(hours: f64, minutes: f64, seconds: f64) -> f64 {
    (hours * 3600.0 + minutes * 60.0 + seconds) * PI / (12.0 * 3600.0)
}

/// Degrees, arcminutes and arcseconds of declination to radians.
///
/// The sign is passed separately because catalogs write `-00 30` with the sign in
/// its own column.
pub fn dms_to_rad(negative: bool, degrees: f64, arcmin: f64, arcsec: f64) -> f64 {
    let rad = (degrees * 3600.0 + arcmin * 60.0 + arcsec) * PI / (180.0 * 3600.0);
    if negative {
        -rad
    } else {
        rad
    }
}

/// A rigid equatorial → galactic transform: rotation followed by translation.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochFrame {
    pub rotation: Matrix3,
    /// Offset added to positions after rotation (parsecs).
    pub translation: Vector3,
}

impl EpochFrame {
    /// Build the frame from the equatorial directions of the galactic core and north pole.
    pub fn from_galactic_reference(core: Vector3, north: Vector3) -> Self {
        let vx = core.normalize();
        let vy = north.cross(&vx).normalize();
        let vu = vx.cross(&vy);
        Self {
            rotation: Matrix3::from_rows(&[vx.transpose(), vy.transpose(), vu.transpose()]),
            translation: Vector3::zeros(),
        }
    }

    pub fn with_translation(mut self, translation: Vector3) -> Self {
        self.translation = translation;
        self
    }

    /// Rotate a direction or velocity. Translation is not applied.
    pub fn rotate(&self, v: &Vector3) -> Vector3 {
        self.rotation * v
    }

    /// Rotate and translate a position.
    pub fn apply(&self, v: &Vector3) -> Vector3 {
        self.rotation * v + self.translation
    }
}

/// Equatorial coordinate epochs used by the supported catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Epoch {
    B1950,
    J2000,
}

impl Epoch {
    pub fn year(&self) -> f64 {
        match self {
            Epoch::B1950 => 1950.0,
            Epoch::J2000 => 2000.0,
        }
    }

    /// The equatorial → galactic rotation for this epoch.
    pub fn galactic_frame(&self) -> EpochFrame {
        match self {
            Epoch::B1950 => EpochFrame::from_galactic_reference(
                // galactic core: RA 17h 42m 4s, DE -28° 55'
                radec_to_uvec(hms_to_rad(17.0, 42.0, 4.0), dms_to_rad(true, 28.0, 55.0, 0.0)),
                // galactic north pole: RA 12h 49m, DE +27° 24'
                radec_to_uvec(hms_to_rad(12.0, 49.0, 0.0), dms_to_rad(false, 27.0, 24.0, 0.0)),
            ),
            Epoch::J2000 => EpochFrame::from_galactic_reference(
                // galactic core: RA 17h 45.6m, DE -28° 56.3'
                radec_to_uvec(hms_to_rad(17.0, 45.6, 0.0), dms_to_rad(true, 28.0, 56.3, 0.0)),
                // galactic north pole: RA 12h 51.4m, DE +27° 7.7'
                radec_to_uvec(hms_to_rad(12.0, 51.4, 0.0), dms_to_rad(false, 27.0, 7.7, 0.0)),
            ),
        }
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Epoch::B1950 => write!(f, "B1950"),
            Epoch::J2000 => write!(f, "J2000"),
        }
    }
}
