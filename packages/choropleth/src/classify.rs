//! Quantizes a county's total damage into an ordinal cost class.
//!
//! The domain is split into equal-width buckets. Costs below the domain
//! land in the first bucket and costs at or above its upper edge land in
//! the last one.

use disaster_map_disaster_models::{DamageSummary, InvalidDamagePolicy};
use disaster_map_geography_models::County;
use serde::{Deserialize, Serialize};

/// Class label used for counties whose total damage is NaN.
pub const UNCLASSIFIED_LABEL: &str = "unclassified";

/// One of the ordinal cost buckets, displayed as `q0`, `q1`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CostClass(pub u8);

impl std::fmt::Display for CostClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Linear quantization over a fixed cost domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostScale {
    /// Lower edge of the domain in dollars.
    pub min: f64,
    /// Upper edge of the domain in dollars.
    pub max: f64,
    /// Number of buckets.
    pub buckets: u8,
}

impl Default for CostScale {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 25_000_000.0,
            buckets: 8,
        }
    }
}

impl CostScale {
    /// Maps a cost to its bucket: `floor(buckets * (cost - min) / (max - min))`
    /// clamped to the valid range.
    ///
    /// Returns `None` when `cost` is NaN or the scale is degenerate.
    #[must_use]
    pub fn classify(&self, cost: f64) -> Option<CostClass> {
        if self.buckets == 0 {
            return None;
        }

        let buckets = f64::from(self.buckets);
        let position = ((cost - self.min) / (self.max - self.min) * buckets).floor();
        if position.is_nan() {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bucket = position.clamp(0.0, buckets - 1.0) as u8;

        Some(CostClass(bucket))
    }

    /// The class label for `cost`, or [`UNCLASSIFIED_LABEL`].
    #[must_use]
    pub fn label(&self, cost: f64) -> String {
        self.classify(cost)
            .map_or_else(|| UNCLASSIFIED_LABEL.to_string(), |class| class.to_string())
    }
}

/// Sum of the property damage attached to `county`, 0 if none.
#[must_use]
pub fn county_total_damage(county: &County, policy: InvalidDamagePolicy) -> f64 {
    DamageSummary::from_disasters(county.disasters(), policy).total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(cost: f64) -> String {
        CostScale::default().label(cost)
    }

    #[test]
    fn classifies_domain_edges() {
        assert_eq!(classify(0.0), "q0");
        assert_eq!(classify(25_000_000.0), "q7");
        assert_eq!(classify(25_000_001.0), "q7");
    }

    #[test]
    fn classifies_midpoint() {
        assert_eq!(classify(12_500_000.0), "q4");
    }

    #[test]
    fn classifies_bucket_boundaries() {
        assert_eq!(classify(3_124_999.0), "q0");
        assert_eq!(classify(3_125_000.0), "q1");
        assert_eq!(classify(24_999_999.0), "q7");
        assert_eq!(classify(450_000.0), "q0");
    }

    #[test]
    fn clamps_below_domain() {
        assert_eq!(classify(-5.0), "q0");
        assert_eq!(classify(f64::NEG_INFINITY), "q0");
        assert_eq!(classify(f64::INFINITY), "q7");
    }

    #[test]
    fn nan_is_unclassified() {
        assert_eq!(classify(f64::NAN), UNCLASSIFIED_LABEL);
        assert_eq!(CostScale::default().classify(f64::NAN), None);
    }

    #[test]
    fn degenerate_scale_classifies_nothing_at_min() {
        let scale = CostScale {
            min: 10.0,
            max: 10.0,
            buckets: 8,
        };
        assert_eq!(scale.classify(10.0), None);
        assert_eq!(scale.classify(11.0), Some(CostClass(7)));
        assert_eq!(CostScale { buckets: 0, ..scale }.classify(1.0), None);
    }

    #[test]
    fn is_deterministic() {
        let scale = CostScale::default();
        for cost in [0.0, 1.0, 7_777_777.0, 30_000_000.0] {
            assert_eq!(scale.classify(cost), scale.classify(cost));
        }
    }
}
