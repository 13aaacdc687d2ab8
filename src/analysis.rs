use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{Stage, sales_stages};
use crate::opportunity::Opportunity;
use crate::policy::{PolicyRecord, PolicyStatus};
use crate::team::Tier;

/// Headline aggregates over a (possibly filtered) opportunity view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub count: usize,
    pub total_value: u64,
    pub weighted_value: u64,
    /// Rows with temperature ≥ 80.
    pub hot_count: usize,
    pub won_count: usize,
    pub lost_count: usize,
}

impl PipelineSummary {
    /// Mean opportunity value. Zero for an empty view.
    pub fn avg_value(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.total_value as f64 / self.count as f64 }
    }

    /// Won / decided. Zero when nothing has closed yet.
    pub fn win_rate(&self) -> f64 {
        let decided = self.won_count + self.lost_count;
        if decided == 0 { 0.0 } else { self.won_count as f64 / decided as f64 }
    }
}

pub fn summarize(view: &[&Opportunity]) -> PipelineSummary {
    PipelineSummary {
        count: view.len(),
        total_value: view.iter().map(|o| o.value).sum(),
        weighted_value: view.iter().map(|o| o.weighted_value).sum(),
        hot_count: view.iter().filter(|o| o.temperature_score >= 80.0).count(),
        won_count: view.iter().filter(|o| o.stage == Stage::ClosedWon).count(),
        lost_count: view.iter().filter(|o| o.stage == Stage::ClosedLost).count(),
    }
}

/// One funnel row. Every stage appears even when the view holds no rows for
/// it, so an empty filter result still renders a complete (all-zero) funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSlice {
    pub stage: Stage,
    pub order: u8,
    pub count: usize,
    pub total_value: u64,
    pub weighted_value: u64,
}

pub fn stage_funnel(view: &[&Opportunity]) -> Vec<StageSlice> {
    let mut slices: Vec<StageSlice> = sales_stages()
        .iter()
        .map(|profile| StageSlice {
            stage: profile.stage,
            order: profile.order,
            count: 0,
            total_value: 0,
            weighted_value: 0,
        })
        .collect();
    for opp in view {
        if let Some(slice) = slices.iter_mut().find(|s| s.stage == opp.stage) {
            slice.count += 1;
            slice.total_value += opp.value;
            slice.weighted_value += opp.weighted_value;
        }
    }
    slices.sort_by_key(|s| s.order);
    slices
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepTotals {
    pub rep_name: &'static str,
    pub count: usize,
    pub total_value: u64,
    pub weighted_value: u64,
    pub won_count: usize,
}

/// Per-rep totals, ranked by total pipeline value (descending).
pub fn rep_leaderboard(view: &[&Opportunity]) -> Vec<RepTotals> {
    let mut by_rep: HashMap<&'static str, RepTotals> = HashMap::new();
    for opp in view {
        let entry = by_rep.entry(opp.rep.name).or_insert(RepTotals {
            rep_name: opp.rep.name,
            count: 0,
            total_value: 0,
            weighted_value: 0,
            won_count: 0,
        });
        entry.count += 1;
        entry.total_value += opp.value;
        entry.weighted_value += opp.weighted_value;
        if opp.stage == Stage::ClosedWon {
            entry.won_count += 1;
        }
    }
    let mut leaderboard: Vec<RepTotals> = by_rep.into_values().collect();
    leaderboard.sort_by(|a, b| b.total_value.cmp(&a.total_value).then(a.rep_name.cmp(b.rep_name)));
    leaderboard
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSlice {
    pub product_line: &'static str,
    pub count: usize,
    pub total_value: u64,
}

/// Value mix by product line, largest first.
pub fn product_mix(view: &[&Opportunity]) -> Vec<ProductSlice> {
    let mut by_product: HashMap<&'static str, ProductSlice> = HashMap::new();
    for opp in view {
        let entry = by_product.entry(opp.product_line).or_insert(ProductSlice {
            product_line: opp.product_line,
            count: 0,
            total_value: 0,
        });
        entry.count += 1;
        entry.total_value += opp.value;
    }
    let mut mix: Vec<ProductSlice> = by_product.into_values().collect();
    mix.sort_by(|a, b| {
        b.total_value.cmp(&a.total_value).then(a.product_line.cmp(b.product_line))
    });
    mix
}

/// Distribution statistics for a continuous metric over the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistStats {
    pub n: usize,
    pub min: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

fn percentile_stats(values: &mut Vec<f64>) -> Option<DistStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();

    let interp = |p: f64| -> f64 {
        let h = p * (n - 1) as f64;
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = h - lo as f64;
        values[lo] * (1.0 - frac) + values[hi] * frac
    };

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Some(DistStats {
        n,
        min: values[0],
        p5: interp(0.05),
        p25: interp(0.25),
        p50: interp(0.50),
        p75: interp(0.75),
        p95: interp(0.95),
        max: values[n - 1],
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Percentile spread of opportunity values. `None` for an empty view — the
/// caller renders "N/A" rather than dividing by zero.
pub fn value_distribution(view: &[&Opportunity]) -> Option<DistStats> {
    let mut values: Vec<f64> = view.iter().map(|o| o.value as f64).collect();
    percentile_stats(&mut values)
}

/// Spread of one metric sampled across independently seeded runs.
pub fn run_distribution(samples: &[f64]) -> Option<DistStats> {
    let mut values = samples.to_vec();
    percentile_stats(&mut values)
}

// ── Policy book aggregates ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub policy_count: usize,
    pub total_premium: u64,
    pub total_commission: u64,
    pub active_count: usize,
}

impl BookSummary {
    pub fn avg_premium(&self) -> f64 {
        if self.policy_count == 0 {
            0.0
        } else {
            self.total_premium as f64 / self.policy_count as f64
        }
    }

    /// Fraction of the view that is Active. Zero for an empty view.
    pub fn bind_rate(&self) -> f64 {
        if self.policy_count == 0 {
            0.0
        } else {
            self.active_count as f64 / self.policy_count as f64
        }
    }
}

pub fn summarize_book(view: &[&PolicyRecord]) -> BookSummary {
    BookSummary {
        policy_count: view.len(),
        total_premium: view.iter().map(|p| p.premium).sum(),
        total_commission: view.iter().map(|p| p.commission).sum(),
        active_count: view.iter().filter(|p| p.status == PolicyStatus::Active).count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducerScorecard {
    pub producer_name: &'static str,
    pub tier: Tier,
    pub region: &'static str,
    pub policy_count: usize,
    pub total_premium: u64,
    pub total_commission: u64,
    pub active_count: usize,
    pub satisfaction_sum: u32,
}

impl ProducerScorecard {
    pub fn avg_satisfaction(&self) -> f64 {
        if self.policy_count == 0 {
            0.0
        } else {
            self.satisfaction_sum as f64 / self.policy_count as f64
        }
    }
}

/// Per-producer rollup, ranked by written premium. A producer with no rows in
/// the view simply does not appear; looking one up by name yields zeros via
/// the summary default, never an error.
pub fn producer_scorecards(view: &[&PolicyRecord]) -> Vec<ProducerScorecard> {
    let mut by_producer: HashMap<&'static str, ProducerScorecard> = HashMap::new();
    for policy in view {
        let entry = by_producer.entry(policy.producer_name).or_insert(ProducerScorecard {
            producer_name: policy.producer_name,
            tier: policy.producer_tier,
            region: policy.producer_region,
            policy_count: 0,
            total_premium: 0,
            total_commission: 0,
            active_count: 0,
            satisfaction_sum: 0,
        });
        entry.policy_count += 1;
        entry.total_premium += policy.premium;
        entry.total_commission += policy.commission;
        if policy.status == PolicyStatus::Active {
            entry.active_count += 1;
        }
        entry.satisfaction_sum += policy.customer_satisfaction;
    }
    let mut scorecards: Vec<ProducerScorecard> = by_producer.into_values().collect();
    scorecards.sort_by(|a, b| {
        b.total_premium.cmp(&a.total_premium).then(a.producer_name.cmp(b.producer_name))
    });
    scorecards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::filter::OpportunityFilter;
    use crate::{opportunity, policy};

    fn opportunity_view(count: usize) -> Vec<Opportunity> {
        let config =
            GeneratorConfig { opportunity_count: count, ..GeneratorConfig::canonical() };
        opportunity::generate(&config)
    }

    #[test]
    fn empty_view_aggregates_to_defined_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_value, 0);
        assert_eq!(summary.avg_value(), 0.0);
        assert_eq!(summary.win_rate(), 0.0);
        assert!(value_distribution(&[]).is_none());
        assert!(rep_leaderboard(&[]).is_empty());
        assert!(product_mix(&[]).is_empty());
    }

    #[test]
    fn empty_view_still_renders_a_complete_funnel() {
        let funnel = stage_funnel(&[]);
        assert_eq!(funnel.len(), 8);
        for slice in &funnel {
            assert_eq!(slice.count, 0);
            assert_eq!(slice.total_value, 0);
        }
    }

    #[test]
    fn funnel_counts_and_values_reconcile_with_summary() {
        let book = opportunity_view(1_000);
        let view: Vec<&Opportunity> = book.iter().collect();
        let summary = summarize(&view);
        let funnel = stage_funnel(&view);
        assert_eq!(funnel.iter().map(|s| s.count).sum::<usize>(), summary.count);
        assert_eq!(funnel.iter().map(|s| s.total_value).sum::<u64>(), summary.total_value);
        assert_eq!(
            funnel.iter().map(|s| s.weighted_value).sum::<u64>(),
            summary.weighted_value
        );
    }

    #[test]
    fn funnel_is_ordered_by_stage_order() {
        let book = opportunity_view(500);
        let view: Vec<&Opportunity> = book.iter().collect();
        let orders: Vec<u8> = stage_funnel(&view).iter().map(|s| s.order).collect();
        assert_eq!(orders, (1..=8).collect::<Vec<u8>>());
    }

    #[test]
    fn leaderboard_is_ranked_by_total_value() {
        let book = opportunity_view(2_000);
        let view: Vec<&Opportunity> = book.iter().collect();
        let leaderboard = rep_leaderboard(&view);
        assert_eq!(leaderboard.len(), 10, "every rep should appear in a 2k book");
        for pair in leaderboard.windows(2) {
            assert!(pair[0].total_value >= pair[1].total_value);
        }
        assert_eq!(
            leaderboard.iter().map(|r| r.count).sum::<usize>(),
            view.len()
        );
    }

    #[test]
    fn excluding_filter_produces_zero_aggregates_not_errors() {
        let book = opportunity_view(500);
        let filter = OpportunityFilter {
            min_value: Some(u64::MAX),
            ..OpportunityFilter::default()
        };
        let view = filter.apply(&book);
        assert!(view.is_empty());
        let summary = summarize(&view);
        assert_eq!(summary.total_value, 0);
        assert_eq!(summary.avg_value(), 0.0);
        assert_eq!(summary.win_rate(), 0.0);
    }

    #[test]
    fn value_distribution_is_ordered_and_bounded() {
        let book = opportunity_view(1_000);
        let view: Vec<&Opportunity> = book.iter().collect();
        let dist = value_distribution(&view).unwrap();
        assert_eq!(dist.n, 1_000);
        assert!(dist.min <= dist.p5);
        assert!(dist.p5 <= dist.p25);
        assert!(dist.p25 <= dist.p50);
        assert!(dist.p50 <= dist.p75);
        assert!(dist.p75 <= dist.p95);
        assert!(dist.p95 <= dist.max);
        assert!(dist.min >= 10_000.0 && dist.max <= 5_000_000.0);
    }

    #[test]
    fn book_summary_and_scorecards_reconcile() {
        let config = GeneratorConfig { policy_count: 1_000, ..GeneratorConfig::canonical() };
        let book = policy::generate(&config);
        let view: Vec<&PolicyRecord> = book.iter().collect();
        let summary = summarize_book(&view);
        let scorecards = producer_scorecards(&view);
        assert_eq!(
            scorecards.iter().map(|s| s.total_premium).sum::<u64>(),
            summary.total_premium
        );
        assert_eq!(
            scorecards.iter().map(|s| s.policy_count).sum::<usize>(),
            summary.policy_count
        );
        for card in &scorecards {
            let sat = card.avg_satisfaction();
            assert!((3.0..=5.0).contains(&sat), "{}: satisfaction {sat}", card.producer_name);
        }
    }

    #[test]
    fn empty_policy_view_has_zero_bind_rate() {
        let summary = summarize_book(&[]);
        assert_eq!(summary.bind_rate(), 0.0);
        assert_eq!(summary.avg_premium(), 0.0);
        assert!(producer_scorecards(&[]).is_empty());
    }
}
