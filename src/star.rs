use crate::color::{magnitude_brightness, Color, DisplayColor};
use crate::names::NamingSystem;
use crate::Vector3;

/// A designation together with its display priority (lower is preferred).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StarName {
    pub name: String,
    pub priority: i32,
}

impl StarName {
    pub fn new(name: impl Into<String>, system: NamingSystem) -> Self {
        Self {
            name: name.into(),
            priority: system.priority(),
        }
    }
}

/// A canonical star, possibly assembled from several catalog records.
///
/// With `is_3d` set, `position` is in parsecs in the heliocentric galactic frame
/// (x toward the galactic core, z toward the galactic north pole) and `vmag` is the
/// absolute magnitude. Otherwise `position` is a unit direction in the same frame and
/// `vmag` is the apparent magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub is_3d: bool,
    pub position: Vector3,
    /// Rate of change of `position` per year.
    pub motion: Vector3,
    /// Year at which `position` applies.
    pub epoch_year: f64,
    pub vmag: Option<f64>,
    pub spectral_type: String,
    /// Effective temperature (Kelvin)
    pub temperature: Option<f64>,
    /// Display color ignoring brightness.
    pub color: DisplayColor,
    /// Names sorted by priority, most preferred first.
    pub names: Vec<StarName>,
    /// 0 for a whole system or unknown component, 1 for A, 2 for B, ...
    pub component: u32,
    pub remarks: String,
}

impl Default for Star {
    fn default() -> Self {
        Self {
            is_3d: false,
            position: Vector3::zeros(),
            motion: Vector3::zeros(),
            epoch_year: 2000.0,
            vmag: None,
            spectral_type: String::new(),
            temperature: None,
            color: DisplayColor::WHITE,
            names: Vec::new(),
            component: 0,
            remarks: String::new(),
        }
    }
}

impl Star {
    /// Stable sort by priority; equal priorities keep their insertion order.
    pub fn sort_names(&mut self) {
        self.names.sort_by_key(|n| n.priority);
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.name == name)
    }

    /// The most preferred name, or an empty string for an unnamed star.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(|n| n.name.as_str()).unwrap_or("")
    }

    /// Append a remark, space-separated.
    pub fn add_remark(&mut self, remark: &str) {
        if remark.is_empty() {
            return;
        }
        if !self.remarks.is_empty() {
            self.remarks.push(' ');
        }
        self.remarks.push_str(remark);
    }

    /// Unit vector from the Sun toward the star.
    pub fn direction(&self) -> Vector3 {
        let n = self.position.norm();
        if n > 0.0 {
            self.position / n
        } else {
            Vector3::zeros()
        }
    }

    /// Display color dimmed according to magnitude.
    pub fn shaded_color(&self) -> DisplayColor {
        let Some(kelvin) = self.temperature else {
            return self.color;
        };
        let brightness = self.vmag.map(magnitude_brightness).unwrap_or(1.0);
        Color::from_temperature(kelvin)
            .scaled(brightness)
            .to_display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_sort_is_stable() {
        let mut star = Star {
            names: vec![
                StarName::new("HD 1", NamingSystem::HenryDraper),
                StarName::new("Ross 1", NamingSystem::Simple),
                StarName::new("Wolf 1", NamingSystem::Simple),
                StarName::new("Sirius", NamingSystem::Common),
            ],
            ..Default::default()
        };
        star.sort_names();
        let order: Vec<&str> = star.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(order, vec!["Sirius", "Ross 1", "Wolf 1", "HD 1"]);
        assert_eq!(star.primary_name(), "Sirius");
        assert!(star.has_name("Wolf 1"));
        assert!(!star.has_name("Wolf"));
    }

    #[test]
    fn remarks_and_direction() {
        let mut star = Star {
            position: Vector3::new(0.0, 3.0, 4.0),
            ..Default::default()
        };
        star.add_remark("one");
        star.add_remark("");
        star.add_remark("two");
        assert_eq!(star.remarks, "one two");
        assert!((star.direction() - Vector3::new(0.0, 0.6, 0.8)).norm() < 1e-12);
        assert_eq!(Star::default().direction(), Vector3::zeros());
        assert_eq!(Star::default().primary_name(), "");
    }

    #[test]
    fn faint_stars_are_dimmer() {
        let bright = Star {
            temperature: Some(5800.0),
            vmag: Some(-3.0),
            ..Default::default()
        };
        let faint = Star {
            vmag: Some(8.0),
            ..bright.clone()
        };
        let b = bright.shaded_color();
        let f = faint.shaded_color();
        assert!(f.r < b.r && f.g < b.g);
        assert_eq!(Star::default().shaded_color(), DisplayColor::WHITE);
    }
}
