use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Stage;
use crate::opportunity::{Opportunity, Priority};
use crate::policy::{PolicyRecord, PolicyStatus};

/// Coarse temperature buckets exposed as a filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemperatureBand {
    /// 80–100.
    Hot,
    /// 60–79.
    Warm,
    /// 0–59.
    Cold,
}

impl TemperatureBand {
    pub fn of(score: f64) -> TemperatureBand {
        if score >= 80.0 {
            TemperatureBand::Hot
        } else if score >= 60.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Cold
        }
    }
}

/// Conjunctive filter over the opportunity book. `None`/empty-set fields
/// match everything, mirroring the dashboard's "All …" defaults. No
/// combination is invalid; an empty result is a valid state.
#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    pub created_from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub created_to: Option<NaiveDate>,
    pub rep_name: Option<String>,
    pub stages: Vec<Stage>,
    pub products: Vec<String>,
    pub temperature_bands: Vec<TemperatureBand>,
    pub priorities: Vec<Priority>,
    pub min_value: Option<u64>,
    pub max_value: Option<u64>,
}

impl OpportunityFilter {
    pub fn matches(&self, opp: &Opportunity) -> bool {
        if let Some(from) = self.created_from
            && opp.created_date < from
        {
            return false;
        }
        if let Some(to) = self.created_to
            && opp.created_date > to
        {
            return false;
        }
        if let Some(ref rep) = self.rep_name
            && opp.rep.name != rep.as_str()
        {
            return false;
        }
        if !self.stages.is_empty() && !self.stages.contains(&opp.stage) {
            return false;
        }
        if !self.products.is_empty() && !self.products.iter().any(|p| p == opp.product_line) {
            return false;
        }
        if !self.temperature_bands.is_empty()
            && !self.temperature_bands.contains(&TemperatureBand::of(opp.temperature_score))
        {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&opp.priority) {
            return false;
        }
        if let Some(min) = self.min_value
            && opp.value < min
        {
            return false;
        }
        if let Some(max) = self.max_value
            && opp.value > max
        {
            return false;
        }
        true
    }

    /// Borrowed view of the matching rows; the book itself is never mutated.
    pub fn apply<'a>(&self, book: &'a [Opportunity]) -> Vec<&'a Opportunity> {
        book.iter().filter(|o| self.matches(o)).collect()
    }
}

/// Conjunctive filter over the policy book.
#[derive(Debug, Clone, Default)]
pub struct PolicyFilter {
    pub producer_name: Option<String>,
    pub policy_type: Option<String>,
    pub status: Option<PolicyStatus>,
    pub region: Option<String>,
    pub carrier: Option<String>,
    pub created_from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub created_to: Option<NaiveDate>,
}

impl PolicyFilter {
    pub fn matches(&self, policy: &PolicyRecord) -> bool {
        if let Some(ref producer) = self.producer_name
            && policy.producer_name != producer.as_str()
        {
            return false;
        }
        if let Some(ref pt) = self.policy_type
            && policy.policy_type != pt.as_str()
        {
            return false;
        }
        if let Some(status) = self.status
            && policy.status != status
        {
            return false;
        }
        if let Some(ref region) = self.region
            && policy.producer_region != region.as_str()
        {
            return false;
        }
        if let Some(ref carrier) = self.carrier
            && policy.carrier != carrier.as_str()
        {
            return false;
        }
        if let Some(from) = self.created_from
            && policy.created_date < from
        {
            return false;
        }
        if let Some(to) = self.created_to
            && policy.created_date > to
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, book: &'a [PolicyRecord]) -> Vec<&'a PolicyRecord> {
        book.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::{opportunity, policy};

    fn opportunity_book() -> Vec<Opportunity> {
        let config = GeneratorConfig { opportunity_count: 1_000, ..GeneratorConfig::canonical() };
        opportunity::generate(&config)
    }

    #[test]
    fn default_filter_matches_everything() {
        let book = opportunity_book();
        let view = OpportunityFilter::default().apply(&book);
        assert_eq!(view.len(), book.len());
    }

    #[test]
    fn temperature_bands_partition_scores() {
        assert_eq!(TemperatureBand::of(80.0), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::of(79.9), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(60.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(59.9), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(0.0), TemperatureBand::Cold);
    }

    #[test]
    fn stage_filter_is_exact() {
        let book = opportunity_book();
        let filter =
            OpportunityFilter { stages: vec![Stage::ClosedWon], ..OpportunityFilter::default() };
        let view = filter.apply(&book);
        assert!(!view.is_empty());
        for opp in view {
            assert_eq!(opp.stage, Stage::ClosedWon);
            assert_eq!(opp.weighted_value, opp.value);
        }
    }

    #[test]
    fn filters_apply_conjunctively() {
        let book = opportunity_book();
        let filter = OpportunityFilter {
            rep_name: Some("Zoe Williams".to_string()),
            temperature_bands: vec![TemperatureBand::Hot],
            min_value: Some(100_000),
            ..OpportunityFilter::default()
        };
        for opp in filter.apply(&book) {
            assert_eq!(opp.rep.name, "Zoe Williams");
            assert!(opp.temperature_score >= 80.0);
            assert!(opp.value >= 100_000);
        }
    }

    #[test]
    fn impossible_value_range_yields_empty_view() {
        let book = opportunity_book();
        let filter = OpportunityFilter {
            min_value: Some(u64::MAX),
            ..OpportunityFilter::default()
        };
        assert!(filter.apply(&book).is_empty());
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let book = opportunity_book();
        let anchor = book[0].created_date;
        let filter = OpportunityFilter {
            created_from: Some(anchor),
            created_to: Some(anchor),
            ..OpportunityFilter::default()
        };
        let view = filter.apply(&book);
        assert!(view.iter().any(|o| o.id == book[0].id));
        for opp in view {
            assert_eq!(opp.created_date, anchor);
        }
    }

    #[test]
    fn policy_filter_narrows_by_status_and_carrier() {
        let config = GeneratorConfig { policy_count: 1_000, ..GeneratorConfig::canonical() };
        let book = policy::generate(&config);
        let filter = PolicyFilter {
            status: Some(PolicyStatus::Active),
            carrier: Some("Chubb".to_string()),
            ..PolicyFilter::default()
        };
        let view = filter.apply(&book);
        for policy in &view {
            assert_eq!(policy.status, PolicyStatus::Active);
            assert_eq!(policy.carrier, "Chubb");
        }
        // Sanity: the conjunction is stricter than either predicate alone.
        let by_status = PolicyFilter {
            status: Some(PolicyStatus::Active),
            ..PolicyFilter::default()
        };
        assert!(view.len() <= by_status.apply(&book).len());
    }
}
