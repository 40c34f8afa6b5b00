//! Derivation of canonical stars from decoded catalog records.
//!
//! Positions and motions are rotated from the catalog's equatorial frame into the
//! heliocentric galactic frame. Records with a positive parallax become 3-D stars
//! in parsecs; the rest keep only a unit direction.

use tracing::debug;

use crate::catalogs::DecodedRecord;
use crate::color::{Color, DisplayColor};
use crate::geometry::{d_dec, d_ra_unscaled, radec_to_uvec, Epoch, EpochFrame};
use crate::ingest::IngestConfig;
use crate::temperature::estimate_temperature;
use crate::{Star, Vector3};

/// Milliarcseconds to radians.
const MAS_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0 * 1000.0);

/// km/s per pc/yr: 1 pc = 30856775814913.673 km, 1 yr = 31556952 s.
const KM_S_PER_PC_PER_YEAR: f64 = 977812.2999621;

/// Converts decoded records of one catalog into stars.
#[derive(Debug, Clone)]
pub struct Derivation {
    frame: EpochFrame,
    epoch: Epoch,
    keep_direction_only: bool,
}

impl Derivation {
    pub fn new(epoch: Epoch, config: &IngestConfig) -> Self {
        Self {
            frame: epoch
                .galactic_frame()
                .with_translation(Vector3::new(0.0, 0.0, config.sun_height_pc)),
            epoch,
            keep_direction_only: config.keep_direction_only,
        }
    }

    /// Build a star from `rec`, or `None` if it cannot be placed.
    pub fn derive(&self, rec: DecodedRecord) -> Option<Star> {
        let temperature = estimate_temperature(&rec.spectral_type, rec.b_v);
        let color = temperature
            .map(|kelvin| Color::from_temperature(kelvin).to_display())
            .unwrap_or(DisplayColor::WHITE);
        let component = rec.component_index();

        let mut star = Star {
            epoch_year: self.epoch.year(),
            temperature,
            color,
            component,
            ..Default::default()
        };

        if rec.at_origin {
            star.is_3d = true;
            star.position = self.frame.apply(&Vector3::zeros());
            star.vmag = rec.absolute_vmag.or(rec.vmag);
        } else {
            let (Some(ra), Some(dec)) = (rec.ra, rec.dec) else {
                debug!("Dropping {}: no coordinates", rec.name.name);
                return None;
            };
            let dir = radec_to_uvec(ra, dec);

            let distance = rec.parallax_mas.filter(|plx| *plx > 0.0).map(|plx| 1000.0 / plx);
            if distance.is_none() && !self.keep_direction_only {
                debug!("Dropping {}: no parallax", rec.name.name);
                return None;
            }

            star.is_3d = distance.is_some();
            let scale = distance.unwrap_or(1.0);
            match distance {
                Some(dist) => {
                    star.position = self.frame.apply(&(dir * dist));
                    star.vmag = rec.vmag.map(|v| v - 5.0 * (dist.log10() - 1.0));
                }
                None => {
                    star.position = self.frame.rotate(&dir);
                    star.vmag = rec.vmag;
                }
            }

            if let Some(pm) = rec.pm_ra_mas {
                star.motion += self.frame.rotate(&d_ra_unscaled(ra)) * (pm * MAS_TO_RAD * scale);
            }
            if let Some(pm) = rec.pm_dec_mas {
                star.motion += self.frame.rotate(&d_dec(ra, dec)) * (pm * MAS_TO_RAD * scale);
            }
            if let (true, Some(rv)) = (star.is_3d, rec.radial_velocity) {
                star.motion += self.frame.rotate(&dir) * (rv / KM_S_PER_PC_PER_YEAR);
            }
        }

        star.spectral_type = rec.spectral_type;
        star.remarks = rec.remarks;
        star.names = std::iter::once(rec.name).chain(rec.other_names).collect();
        star.sort_names();
        Some(star)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{dms_to_rad, hms_to_rad};
    use crate::names::NamingSystem;

    /// Equatorial RA/Dec of the J2000 galactic core reference.
    fn core_radec() -> (f64, f64) {
        (
            hms_to_rad(17.0, 45.6, 0.0),
            dms_to_rad(true, 28.0, 56.3, 0.0),
        )
    }

    fn record(parallax_mas: Option<f64>) -> DecodedRecord {
        let (ra, dec) = core_radec();
        let mut rec = DecodedRecord {
            ra: Some(ra),
            dec: Some(dec),
            parallax_mas,
            vmag: Some(5.0),
            spectral_type: "G2V".to_string(),
            components: "B".to_string(),
            remarks: "test".to_string(),
            ..Default::default()
        };
        rec.set_name("HR 1", NamingSystem::Harvard);
        rec.add_name("Sirius", NamingSystem::Common);
        rec
    }

    fn derivation() -> Derivation {
        Derivation::new(Epoch::J2000, &IngestConfig::default())
    }

    #[test]
    fn parallax_gives_3d_position_and_absolute_magnitude() {
        let star = derivation().derive(record(Some(100.0))).unwrap();
        assert!(star.is_3d);
        assert!((star.position - Vector3::new(10.0, 0.0, 0.0)).norm() < 1e-9);
        // at 10 pc absolute and apparent magnitudes agree
        assert!((star.vmag.unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(star.component, 2);
        assert_eq!(star.primary_name(), "Sirius");
        assert_eq!(star.names.len(), 2);
        assert_eq!(star.remarks, "test");
        assert_eq!(star.epoch_year, 2000.0);
        assert!((star.temperature.unwrap() - 5770.0).abs() < 1e-9);

        let far = derivation().derive(record(Some(10.0))).unwrap();
        assert!((far.vmag.unwrap() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn missing_parallax_keeps_direction() {
        let star = derivation().derive(record(None)).unwrap();
        assert!(!star.is_3d);
        assert!((star.position.norm() - 1.0).abs() < 1e-12);
        assert_eq!(star.vmag, Some(5.0));

        let star = derivation().derive(record(Some(-3.0))).unwrap();
        assert!(!star.is_3d);

        let strict = Derivation::new(
            Epoch::J2000,
            &IngestConfig {
                keep_direction_only: false,
                ..Default::default()
            },
        );
        assert!(strict.derive(record(None)).is_none());
        assert!(strict.derive(record(Some(100.0))).is_some());
    }

    #[test]
    fn records_without_coordinates_are_dropped() {
        let mut rec = record(Some(100.0));
        rec.dec = None;
        assert!(derivation().derive(rec).is_none());
    }

    #[test]
    fn observer_record_sits_at_origin() {
        let mut rec = DecodedRecord {
            at_origin: true,
            vmag: Some(-26.7),
            absolute_vmag: Some(4.85),
            spectral_type: "G2 V".to_string(),
            ..Default::default()
        };
        rec.set_name("Sun", NamingSystem::Common);
        let star = derivation().derive(rec.clone()).unwrap();
        assert!(star.is_3d);
        assert_eq!(star.position, Vector3::zeros());
        assert_eq!(star.motion, Vector3::zeros());
        assert_eq!(star.vmag, Some(4.85));

        let raised = Derivation::new(
            Epoch::J2000,
            &IngestConfig {
                sun_height_pc: 20.0,
                ..Default::default()
            },
        );
        let star = raised.derive(rec).unwrap();
        assert!((star.position - Vector3::new(0.0, 0.0, 20.0)).norm() < 1e-12);
    }

    #[test]
    fn motion_from_proper_motion_and_radial_velocity() {
        let (ra, dec) = core_radec();
        let mut rec = record(Some(100.0));
        rec.pm_dec_mas = Some(1000.0);
        let star = derivation().derive(rec.clone()).unwrap();
        // 1 arcsec/yr at 10 pc
        let expected = 10.0 * MAS_TO_RAD * 1000.0;
        assert!((star.motion.norm() - expected).abs() < 1e-15);
        // perpendicular to the line of sight
        assert!(star.motion.dot(&star.direction()).abs() < 1e-15);
        let frame = Epoch::J2000.galactic_frame();
        let along = frame.rotate(&d_dec(ra, dec));
        assert!((star.motion.normalize() - along).norm() < 1e-9);

        rec.pm_dec_mas = None;
        rec.radial_velocity = Some(KM_S_PER_PC_PER_YEAR);
        let star = derivation().derive(rec.clone()).unwrap();
        assert!((star.motion - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-9);

        // radial velocity is ignored without a distance
        rec.parallax_mas = None;
        let star = derivation().derive(rec).unwrap();
        assert_eq!(star.motion, Vector3::zeros());
    }

    #[test]
    fn unknown_spectral_type_is_white() {
        let mut rec = record(Some(100.0));
        rec.spectral_type.clear();
        rec.b_v = None;
        let star = derivation().derive(rec).unwrap();
        assert_eq!(star.temperature, None);
        assert_eq!(star.color, DisplayColor::WHITE);
    }
}
