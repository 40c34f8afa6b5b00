//! Owning star container with name-based identity resolution.
//!
//! `StarCatalog` accumulates stars from several catalogs. Every candidate is first
//! matched against the names already known; a match folds the candidate into the
//! existing star, otherwise it is appended as a new star.
//!
//! Matching flow:
//! 1. Look up the candidate's Henry Draper names only, least preferred name first.
//! 2. If nothing matched, look up all of its names in the same order.
//! 3. A lookup honors the candidate's component index (see [`NameSlot::resolve`]).
//!
//! Ambiguity never merges: wrongly conflating two stars is worse than leaving one
//! star listed twice. A name that already belongs to a different star is not copied
//! onto the merge partner.
//!
//! [`NameSlot::resolve`]: crate::NameSlot::resolve

use tracing::{debug, warn};

use crate::names::NamingSystem;
use crate::registry::{NameRegistry, StarId};
use crate::{Star, StarName};

/// What [`StarCatalog::insert_or_merge`] did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Appended as a new star.
    Inserted(StarId),
    /// Folded into an existing star; `skipped_names` names were left out because
    /// they already belong to other stars.
    Merged { into: StarId, skipped_names: usize },
}

#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    stars: Vec<Star>,
    registry: NameRegistry,
}

impl StarCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the total number of stars in the catalog.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Return `true` when the catalog contains no stars.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Return all stars in insertion order.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Hand the stars over, dropping the name registry.
    pub fn into_stars(self) -> Vec<Star> {
        self.stars
    }

    pub fn get(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id)
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Look up a star by exact name.
    ///
    /// When the name is shared by several components, the whole-system entry wins,
    /// then the first registered component.
    pub fn find_by_name(&self, name: &str) -> Option<&Star> {
        let slot = self.registry.get(name)?;
        let id = slot.resolve(0).or_else(|| slot.stars().next())?;
        self.stars.get(id)
    }

    /// Return the first star, in insertion order, with a name containing `fragment`.
    pub fn search(&self, fragment: &str) -> Option<&Star> {
        self.stars
            .iter()
            .find(|star| star.names.iter().any(|n| n.name.contains(fragment)))
    }

    /// Merge `candidate` into a matching star, or append it.
    pub fn insert_or_merge(&mut self, candidate: Star) -> MergeOutcome {
        match self.find_partner(&candidate) {
            Some((id, via)) => {
                debug!(
                    "Merging {} into {} via {}",
                    candidate.primary_name(),
                    self.stars[id].primary_name(),
                    via
                );
                let skipped_names = self.merge_into(id, candidate);
                MergeOutcome::Merged {
                    into: id,
                    skipped_names,
                }
            }
            None => MergeOutcome::Inserted(self.insert(candidate)),
        }
    }

    fn find_partner<'a>(&self, candidate: &'a Star) -> Option<(StarId, &'a str)> {
        let comp = candidate.component;
        let lookup = |n: &'a StarName| {
            self.registry
                .resolve(&n.name, comp)
                .map(|id| (id, n.name.as_str()))
        };
        let hd = NamingSystem::HenryDraper.priority();
        candidate
            .names
            .iter()
            .rev()
            .filter(|n| n.priority == hd)
            .find_map(lookup)
            .or_else(|| candidate.names.iter().rev().find_map(lookup))
    }

    fn merge_into(&mut self, id: StarId, candidate: Star) -> usize {
        let comp = candidate.component;
        let mut skipped = 0;
        for name in candidate.names {
            if self.stars[id].has_name(&name.name) {
                continue;
            }
            let taken = self
                .registry
                .get(&name.name)
                .is_some_and(|slot| slot.references_other_than(id));
            if taken {
                warn!(
                    "Not adding {} to {}: the name belongs to another star",
                    name.name,
                    self.stars[id].primary_name()
                );
                skipped += 1;
                continue;
            }
            self.registry.register(&name.name, comp, id);
            self.stars[id].names.push(name);
        }

        let partner = &mut self.stars[id];
        partner.sort_names();
        partner.add_remark(&candidate.remarks);
        if partner.component == 0 {
            partner.component = comp;
        }
        if candidate.is_3d && !partner.is_3d {
            partner.is_3d = true;
            partner.position = candidate.position;
            partner.motion = candidate.motion;
            partner.epoch_year = candidate.epoch_year;
            partner.vmag = candidate.vmag;
            partner.spectral_type = candidate.spectral_type;
            partner.temperature = candidate.temperature;
            partner.color = candidate.color;
        }
        skipped
    }

    fn insert(&mut self, candidate: Star) -> StarId {
        let id = self.stars.len();
        for name in &candidate.names {
            self.registry.register(&name.name, candidate.component, id);
        }
        self.stars.push(candidate);
        id
    }
}

impl Extend<Star> for StarCatalog {
    fn extend<I: IntoIterator<Item = Star>>(&mut self, iter: I) {
        for star in iter {
            self.insert_or_merge(star);
        }
    }
}

impl FromIterator<Star> for StarCatalog {
    fn from_iter<I: IntoIterator<Item = Star>>(iter: I) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DisplayColor;
    use crate::Vector3;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn star(names: &[(&str, NamingSystem)], component: u32) -> Star {
        let mut star = Star {
            names: names.iter().map(|(n, s)| StarName::new(*n, *s)).collect(),
            component,
            position: Vector3::new(0.0, 0.0, 1.0),
            ..Default::default()
        };
        star.sort_names();
        star
    }

    fn with_distance(mut star: Star, x: f64) -> Star {
        star.is_3d = true;
        star.position = Vector3::new(x, 1.0, 0.0);
        star.motion = Vector3::new(0.0, 1e-5, 0.0);
        star.vmag = Some(1.4);
        star.spectral_type = "A1V".to_string();
        star.temperature = Some(9500.0);
        star.color = DisplayColor { r: 200, g: 210, b: 255 };
        star.epoch_year = 1950.0;
        star
    }

    fn gliese_sirius() -> Star {
        with_distance(
            star(
                &[
                    ("Gl 244", NamingSystem::Gliese),
                    ("HD 48915", NamingSystem::HenryDraper),
                ],
                0,
            ),
            2.64,
        )
    }

    fn bright_sirius() -> Star {
        let mut star = star(
            &[
                ("HR 2491", NamingSystem::Harvard),
                ("Sirius", NamingSystem::Common),
                ("α CMa", NamingSystem::Bayer),
                ("HD 48915", NamingSystem::HenryDraper),
            ],
            0,
        );
        star.remarks = "Dog star".to_string();
        star
    }

    /// Order-independent summary of the catalog contents.
    fn snapshot(catalog: &StarCatalog) -> Vec<(Vec<String>, u32, bool, Vector3)> {
        let mut out: Vec<_> = catalog
            .stars()
            .iter()
            .map(|s| {
                let mut names: Vec<String> = s.names.iter().map(|n| n.name.clone()).collect();
                names.sort();
                (names, s.component, s.is_3d, s.position)
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    fn assert_names_sorted(catalog: &StarCatalog) {
        for s in catalog.stars() {
            assert!(
                s.names.windows(2).all(|w| w[0].priority <= w[1].priority),
                "names out of order: {:?}",
                s.names
            );
        }
    }

    #[test]
    fn parallax_record_promotes_direction_only_star() {
        let mut catalog = StarCatalog::new();
        assert_eq!(
            catalog.insert_or_merge(bright_sirius()),
            MergeOutcome::Inserted(0)
        );
        assert_eq!(
            catalog.insert_or_merge(gliese_sirius()),
            MergeOutcome::Merged {
                into: 0,
                skipped_names: 0
            }
        );
        assert_eq!(catalog.len(), 1);

        let sirius = &catalog.stars()[0];
        assert!(sirius.is_3d);
        assert_eq!(sirius.position, Vector3::new(2.64, 1.0, 0.0));
        assert_eq!(sirius.temperature, Some(9500.0));
        assert_eq!(sirius.color, DisplayColor { r: 200, g: 210, b: 255 });
        assert_eq!(sirius.epoch_year, 1950.0);
        assert_eq!(sirius.primary_name(), "Sirius");
        assert_eq!(sirius.names.len(), 5);
        assert!(sirius.has_name("Gl 244"));
        assert_eq!(sirius.remarks, "Dog star");
        assert_names_sorted(&catalog);

        assert_eq!(catalog.find_by_name("Gl 244").map(|s| s.primary_name()), Some("Sirius"));
        assert_eq!(catalog.search("CMa").map(|s| s.primary_name()), Some("Sirius"));
        assert!(catalog.find_by_name("Gl 245").is_none());
    }

    #[test]
    fn merge_order_does_not_matter_for_pairs() {
        let forward: StarCatalog = [gliese_sirius(), bright_sirius()].into_iter().collect();
        let backward: StarCatalog = [bright_sirius(), gliese_sirius()].into_iter().collect();
        assert_eq!(forward.len(), 1);
        assert_eq!(snapshot(&forward), snapshot(&backward));
    }

    #[test]
    fn merge_order_does_not_matter_for_shuffled_groups() {
        let records = vec![
            gliese_sirius(),
            bright_sirius(),
            star(
                &[
                    ("ADS 5423", NamingSystem::Ads),
                    ("HD 48915", NamingSystem::HenryDraper),
                ],
                0,
            ),
            with_distance(
                star(
                    &[
                        ("Gl 559", NamingSystem::Gliese),
                        ("HD 128620", NamingSystem::HenryDraper),
                    ],
                    1,
                ),
                1.3,
            ),
            star(
                &[
                    ("HR 5459", NamingSystem::Harvard),
                    ("HD 128620", NamingSystem::HenryDraper),
                ],
                1,
            ),
            star(&[("Wolf 359", NamingSystem::Simple)], 0),
            star(&[("HR 1", NamingSystem::Harvard)], 0),
        ];

        let reference: StarCatalog = records.clone().into_iter().collect();
        assert_eq!(reference.len(), 4);
        let expected = snapshot(&reference);

        for seed in 0..20 {
            let mut shuffled = records.clone();
            shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
            let catalog: StarCatalog = shuffled.into_iter().collect();
            assert_eq!(snapshot(&catalog), expected, "seed {}", seed);
            assert_names_sorted(&catalog);
        }
    }

    #[test]
    fn foreign_name_is_not_imported() {
        let mut catalog = StarCatalog::new();
        catalog.insert_or_merge(star(
            &[
                ("HD 100", NamingSystem::HenryDraper),
                ("LP 5", NamingSystem::Lpm),
            ],
            0,
        ));
        catalog.insert_or_merge(star(
            &[
                ("HD 200", NamingSystem::HenryDraper),
                ("G 1-1", NamingSystem::Giclas),
            ],
            0,
        ));
        // matches the second star through HD 200, but LP 5 is the first star's
        let outcome = catalog.insert_or_merge(star(
            &[
                ("HD 200", NamingSystem::HenryDraper),
                ("LP 5", NamingSystem::Lpm),
                ("Ross 7", NamingSystem::Simple),
            ],
            0,
        ));
        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                into: 1,
                skipped_names: 1
            }
        );
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.stars()[1].has_name("LP 5"));
        assert!(catalog.stars()[1].has_name("Ross 7"));
        assert_eq!(catalog.find_by_name("LP 5").map(|s| s.has_name("HD 100")), Some(true));
    }

    #[test]
    fn henry_draper_names_are_tried_first() {
        let mut catalog = StarCatalog::new();
        catalog.insert_or_merge(star(&[("Ross 7", NamingSystem::Simple)], 0));
        catalog.insert_or_merge(star(&[("HD 300", NamingSystem::HenryDraper)], 0));
        let outcome = catalog.insert_or_merge(star(
            &[
                ("Ross 7", NamingSystem::Simple),
                ("HD 300", NamingSystem::HenryDraper),
            ],
            0,
        ));
        assert!(matches!(outcome, MergeOutcome::Merged { into: 1, skipped_names: 1 }));
    }

    #[test]
    fn promotion_is_not_undone() {
        let mut catalog = StarCatalog::new();
        catalog.insert_or_merge(bright_sirius());
        catalog.insert_or_merge(gliese_sirius());
        let before = catalog.stars()[0].clone();

        let mut late = bright_sirius();
        late.remarks.clear();
        late.position = Vector3::new(0.0, 1.0, 0.0);
        catalog.insert_or_merge(late);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stars()[0], before);
    }

    #[test]
    fn components_are_kept_apart() {
        let mut catalog = StarCatalog::new();
        let a = catalog.insert_or_merge(star(&[("ADS 5423", NamingSystem::Ads)], 1));
        let b = catalog.insert_or_merge(star(&[("ADS 5423", NamingSystem::Ads)], 2));
        assert_eq!(a, MergeOutcome::Inserted(0));
        assert_eq!(b, MergeOutcome::Inserted(1));

        // two components registered: the whole system is ambiguous
        let whole = catalog.insert_or_merge(star(&[("ADS 5423", NamingSystem::Ads)], 0));
        assert_eq!(whole, MergeOutcome::Inserted(2));

        // a known component still matches
        let again = catalog.insert_or_merge(star(
            &[
                ("ADS 5423", NamingSystem::Ads),
                ("HR 2491", NamingSystem::Harvard),
            ],
            2,
        ));
        assert_eq!(
            again,
            MergeOutcome::Merged {
                into: 1,
                skipped_names: 0
            }
        );
        assert_eq!(catalog.find_by_name("ADS 5423").map(|s| s.component), Some(0));
    }

    #[test]
    fn component_is_adopted_once() {
        let mut catalog = StarCatalog::new();
        catalog.insert_or_merge(star(&[("Gl 65", NamingSystem::Gliese)], 0));
        catalog.insert_or_merge(star(
            &[
                ("Gl 65", NamingSystem::Gliese),
                ("Luyten 726-8", NamingSystem::Luyten),
            ],
            2,
        ));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stars()[0].component, 2);

        // a single component entry resolves a whole-system lookup
        catalog.insert_or_merge(star(
            &[
                ("Luyten 726-8", NamingSystem::Luyten),
                ("UV Cet", NamingSystem::Variable),
            ],
            0,
        ));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stars()[0].component, 2);
        assert_eq!(catalog.stars()[0].primary_name(), "UV Cet");
    }
}
