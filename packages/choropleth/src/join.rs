//! Attaches disasters to the county whose name they reference.
//!
//! Both sides are compared by normalized name (trimmed, lowercased).
//! When several counties share a normalized name the first one wins.
//! Disasters that match no county are counted but otherwise left alone;
//! they stay in the raw collection and its indexes.

use std::collections::{BTreeMap, BTreeSet};

use disaster_map_disaster_models::Disaster;
use disaster_map_geography_models::{County, normalize_county_name};

/// Outcome of a join run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    /// Disasters appended to some county.
    pub attached: usize,
    /// Disasters that matched no county.
    pub unmatched: usize,
    /// Distinct raw county names among the unmatched disasters.
    pub unmatched_names: BTreeSet<String>,
}

impl JoinReport {
    /// Total disasters considered.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.attached + self.unmatched
    }
}

/// Appends every disaster to its matching county's list.
///
/// Counties are mutated in place; disasters are cloned, never modified.
pub fn join_disasters(counties: &mut [County], disasters: &[Disaster]) -> JoinReport {
    let mut lookup: BTreeMap<String, usize> = BTreeMap::new();
    for (index, county) in counties.iter().enumerate() {
        lookup.entry(county.normalized_name()).or_insert(index);
    }

    let mut report = JoinReport::default();

    for disaster in disasters {
        let key = normalize_county_name(&disaster.county_name);
        if let Some(&index) = lookup.get(&key) {
            counties[index].attach_disaster(disaster.clone());
            report.attached += 1;
        } else {
            log::debug!("No county matches disaster county {:?}", disaster.county_name);
            report.unmatched += 1;
            report
                .unmatched_names
                .insert(disaster.county_name.clone());
        }
    }

    log::info!(
        "Joined {} of {} disasters to counties ({} unmatched)",
        report.attached,
        report.total(),
        report.unmatched
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use disaster_map_disaster_models::DamageAmount;
    use geo::MultiPolygon;

    fn county(name: &str) -> County {
        County::new(name, MultiPolygon::new(vec![]), serde_json::Map::new())
    }

    fn disaster(name: &str, damage: f64) -> Disaster {
        Disaster::new(name, DamageAmount::Amount(damage), None)
    }

    #[test]
    fn matches_ignoring_case_and_whitespace() {
        let mut counties = vec![county("Fulton"), county(" DeKalb ")];
        let disasters = vec![
            disaster("Fulton", 1.0),
            disaster("fulton ", 2.0),
            disaster("DEKALB", 3.0),
        ];

        let report = join_disasters(&mut counties, &disasters);

        assert_eq!(report.attached, 3);
        assert_eq!(report.unmatched, 0);
        assert_eq!(counties[0].disasters().len(), 2);
        assert_eq!(counties[1].disasters().len(), 1);
    }

    #[test]
    fn unmatched_disasters_are_counted_not_attached() {
        let mut counties = vec![county("Fulton")];
        let disasters = vec![disaster("Fulton", 1.0), disaster("Atlantis", 2.0)];

        let report = join_disasters(&mut counties, &disasters);

        assert_eq!(report.attached, 1);
        assert_eq!(report.unmatched, 1);
        assert!(report.unmatched_names.contains("Atlantis"));
        assert_eq!(report.total(), disasters.len());
    }

    #[test]
    fn first_county_wins_on_duplicate_names() {
        let mut counties = vec![county("Fulton"), county("FULTON")];
        let disasters = vec![disaster("fulton", 1.0)];

        join_disasters(&mut counties, &disasters);

        assert_eq!(counties[0].disasters().len(), 1);
        assert!(counties[1].disasters.is_none());
    }

    #[test]
    fn counties_without_matches_keep_no_list() {
        let mut counties = vec![county("Fulton"), county("Cobb")];
        join_disasters(&mut counties, &[disaster("Fulton", 1.0)]);
        assert!(counties[1].disasters.is_none());
    }

    #[test]
    fn every_matched_disaster_is_attached_exactly_once() {
        let mut counties = vec![county("A"), county("B"), county("C")];
        let disasters: Vec<_> = ["a", " B", "c ", "d", "A", "b"]
            .iter()
            .zip([0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
            .map(|(name, damage)| disaster(name, damage))
            .collect();

        let report = join_disasters(&mut counties, &disasters);

        let attached: usize = counties.iter().map(|c| c.disasters().len()).sum();
        assert_eq!(attached, report.attached);
        assert_eq!(report.attached + report.unmatched, disasters.len());

        let mut amounts: Vec<f64> = counties
            .iter()
            .flat_map(County::disasters)
            .map(|d| d.property_damage.value())
            .collect();
        amounts.sort_by(f64::total_cmp);
        assert_eq!(amounts, vec![0.0, 1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn leaves_disasters_untouched() {
        let mut counties = vec![county("Fulton")];
        let disasters = vec![disaster("fulton ", 1.0)];
        let before = disasters.clone();

        join_disasters(&mut counties, &disasters);

        assert_eq!(disasters, before);
        assert_eq!(counties[0].disasters()[0].county_name, "fulton ");
    }
}
