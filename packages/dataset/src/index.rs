//! Per-county indexes over the raw disaster collection.
//!
//! Grouping here is keyed by the dataset's `NAME` field verbatim, with no
//! trimming or case folding. This differs from the county join, which
//! matches on normalized names, so `"Fulton"` and `"fulton "` are separate
//! groups here even though both attach to the same county.

use std::collections::{BTreeMap, BTreeSet};

use disaster_map_disaster_models::Disaster;

/// Groupings derived once from the raw collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisasterIndex {
    /// Raw county name -> disasters in dataset order.
    pub by_county: BTreeMap<String, Vec<Disaster>>,
    /// Raw county name -> start month -> disasters in dataset order.
    pub by_county_by_month: BTreeMap<String, BTreeMap<String, Vec<Disaster>>>,
    /// Smallest per-county disaster count, `None` for an empty dataset.
    pub min_by_county: Option<usize>,
    /// Largest per-county disaster count, `None` for an empty dataset.
    pub max_by_county: Option<usize>,
}

impl DisasterIndex {
    /// Groups `disasters`, which must already have their start months
    /// attached.
    #[must_use]
    pub fn build(disasters: &[Disaster]) -> Self {
        let mut by_county: BTreeMap<String, Vec<Disaster>> = BTreeMap::new();
        for disaster in disasters {
            by_county
                .entry(disaster.county_name.clone())
                .or_default()
                .push(disaster.clone());
        }

        let by_county_by_month = by_county
            .iter()
            .map(|(name, county_disasters)| {
                let mut by_month: BTreeMap<String, Vec<Disaster>> = BTreeMap::new();
                for disaster in county_disasters {
                    let month = disaster
                        .start
                        .clone()
                        .unwrap_or_else(|| disaster.start_month());
                    by_month.entry(month).or_default().push(disaster.clone());
                }
                (name.clone(), by_month)
            })
            .collect();

        let counts = by_county.values().map(Vec::len);
        let min_by_county = counts.clone().min();
        let max_by_county = counts.max();

        Self {
            by_county,
            by_county_by_month,
            min_by_county,
            max_by_county,
        }
    }

    /// Distinct start months across all counties, in ascending order.
    #[must_use]
    pub fn months(&self) -> BTreeSet<&str> {
        self.by_county_by_month
            .values()
            .flat_map(BTreeMap::keys)
            .map(String::as_str)
            .collect()
    }
}

/// The raw disaster collection together with its indexes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisasterDataset {
    /// Every record in dataset order, start months attached.
    pub raw: Vec<Disaster>,
    /// Groupings over [`Self::raw`].
    pub index: DisasterIndex,
}

impl DisasterDataset {
    /// Attaches each record's start month and builds the indexes.
    #[must_use]
    pub fn build(mut raw: Vec<Disaster>) -> Self {
        for disaster in &mut raw {
            disaster.attach_start_month();
        }

        let index = DisasterIndex::build(&raw);

        log::info!(
            "Indexed {} disasters across {} county names (min {:?}, max {:?} per county)",
            raw.len(),
            index.by_county.len(),
            index.min_by_county,
            index.max_by_county
        );

        Self { raw, index }
    }
}
