//! Per-metric chart styling, resolved once by metric identity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const VIRAL_LOAD_THRESHOLD: f64 = 30.0;
pub const URIC_ACID_LOW: f64 = 208.0;
pub const URIC_ACID_HIGH: f64 = 428.0;
pub const TRIGLYCERIDE_BOUND: f64 = 1.7;

/// Below-threshold readings plot at `threshold / CLAMP_DIVISOR`.
pub const CLAMP_DIVISOR: f64 = 6.0;
/// Uric-acid axis top is at least this multiple of the high bound.
pub const HAZARD_HEADROOM: f64 = 1.5;
/// Triglyceride axis top is fixed at this multiple of the bound.
pub const UPPER_BOUND_AXIS_MULTIPLE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PresentationPolicy {
    /// Linear axis, auto range with margin, no overlays.
    #[default]
    Default,
    /// Scientific tick labels; readings below detection compress to a fixed low height.
    ScientificClamp { threshold: f64 },
    /// Hazard bands below `low` and above `high`.
    HazardBand { low: f64, high: f64 },
    /// Hazard band above `bound` with a fixed axis top.
    UpperBound { bound: f64 },
}

/// Lookup from metric identity (case-insensitive alias) to policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPolicyTable {
    entries: IndexMap<String, PresentationPolicy>,
}

impl Default for MetricPolicyTable {
    fn default() -> Self {
        let viral = PresentationPolicy::ScientificClamp {
            threshold: VIRAL_LOAD_THRESHOLD,
        };
        let uric = PresentationPolicy::HazardBand {
            low: URIC_ACID_LOW,
            high: URIC_ACID_HIGH,
        };
        let triglyceride = PresentationPolicy::UpperBound {
            bound: TRIGLYCERIDE_BOUND,
        };

        Self::empty()
            .with_aliases(
                &["dna", "hbv_dna", "hbv-dna", "HBV-DNA定量", "乙肝病毒DNA"],
                viral,
            )
            .with_aliases(&["ua", "uric_acid", "尿酸", "尿酸（UA）"], uric)
            .with_aliases(
                &["tg", "triglycerides", "甘油三酯", "甘油三酯（TG）"],
                triglyceride,
            )
    }
}

impl MetricPolicyTable {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, metric: &str, policy: PresentationPolicy) -> Self {
        self.entries.insert(identity_key(metric), policy);
        self
    }

    #[must_use]
    pub fn with_aliases(self, metrics: &[&str], policy: PresentationPolicy) -> Self {
        metrics
            .iter()
            .fold(self, |table, metric| table.with_policy(metric, policy))
    }

    /// Policy for `metric`; unknown metrics get [`PresentationPolicy::Default`].
    #[must_use]
    pub fn resolve(&self, metric: &str) -> PresentationPolicy {
        self.entries
            .get(&identity_key(metric))
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn identity_key(metric: &str) -> String {
    metric.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliases_case_insensitively() {
        let table = MetricPolicyTable::default();
        assert_eq!(
            table.resolve("HBV_DNA"),
            PresentationPolicy::ScientificClamp { threshold: 30.0 }
        );
        assert_eq!(
            table.resolve(" 尿酸（UA） "),
            PresentationPolicy::HazardBand {
                low: 208.0,
                high: 428.0
            }
        );
        assert_eq!(table.resolve("ALT"), PresentationPolicy::Default);
    }

    #[test]
    fn host_entries_override_defaults() {
        let table = MetricPolicyTable::default()
            .with_policy("tg", PresentationPolicy::UpperBound { bound: 2.3 });
        assert_eq!(
            table.resolve("TG"),
            PresentationPolicy::UpperBound { bound: 2.3 }
        );
    }
}
