use serde::Serialize;

use crate::opportunity::Opportunity;
use crate::team::{RepPattern, SalesRep, Tier};

/// Behavioral metrics compared between the top-performer and underperformer
/// cohorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternMetric {
    ActivitiesPerWeek,
    ResponseTimeHours,
    DecisionMakerAccessRate,
    ProposalWinRate,
    AvgDealSize,
    LeadConversionRate,
    CrossSellRate,
    LinkedinConnections,
    ClientSatisfaction,
}

impl PatternMetric {
    pub const ALL: [PatternMetric; 9] = [
        PatternMetric::ActivitiesPerWeek,
        PatternMetric::ResponseTimeHours,
        PatternMetric::DecisionMakerAccessRate,
        PatternMetric::ProposalWinRate,
        PatternMetric::AvgDealSize,
        PatternMetric::LeadConversionRate,
        PatternMetric::CrossSellRate,
        PatternMetric::LinkedinConnections,
        PatternMetric::ClientSatisfaction,
    ];

    pub fn extract(self, pattern: &RepPattern) -> f64 {
        match self {
            PatternMetric::ActivitiesPerWeek => pattern.avg_activities_per_week as f64,
            PatternMetric::ResponseTimeHours => pattern.avg_response_time_hours,
            PatternMetric::DecisionMakerAccessRate => pattern.decision_maker_access_rate,
            PatternMetric::ProposalWinRate => pattern.proposal_win_rate,
            PatternMetric::AvgDealSize => pattern.avg_deal_size as f64,
            PatternMetric::LeadConversionRate => pattern.lead_conversion_rate,
            PatternMetric::CrossSellRate => pattern.cross_sell_rate,
            PatternMetric::LinkedinConnections => pattern.linkedin_connections as f64,
            PatternMetric::ClientSatisfaction => pattern.client_satisfaction,
        }
    }

    /// Response time is the one metric where lower means better.
    pub fn higher_is_better(self) -> bool {
        !matches!(self, PatternMetric::ResponseTimeHours)
    }

    pub fn label(self) -> &'static str {
        match self {
            PatternMetric::ActivitiesPerWeek => "Activities / week",
            PatternMetric::ResponseTimeHours => "Response time (h)",
            PatternMetric::DecisionMakerAccessRate => "Decision-maker access",
            PatternMetric::ProposalWinRate => "Proposal win rate",
            PatternMetric::AvgDealSize => "Avg deal size",
            PatternMetric::LeadConversionRate => "Lead conversion",
            PatternMetric::CrossSellRate => "Cross-sell rate",
            PatternMetric::LinkedinConnections => "LinkedIn connections",
            PatternMetric::ClientSatisfaction => "Client satisfaction",
        }
    }
}

/// Per-metric spread between the cohort means. `gap_percent` is relative to
/// the top-performer mean; 0 when that mean is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternGap {
    pub metric: PatternMetric,
    pub top_performer_avg: f64,
    pub underperformer_avg: f64,
    pub gap_absolute: f64,
    pub gap_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternInsights {
    pub top_performers: Vec<&'static str>,
    pub underperformers: Vec<&'static str>,
    pub gaps: Vec<PatternGap>,
}

/// Elite tier with a performance score of at least 90.
pub fn top_performer_names(team: &[SalesRep]) -> Vec<&'static str> {
    team.iter()
        .filter(|r| r.tier == Tier::Elite && r.performance_score >= 90)
        .map(|r| r.name)
        .collect()
}

/// Anyone below 85, plus everyone outside the Elite tier.
pub fn underperformer_names(team: &[SalesRep]) -> Vec<&'static str> {
    team.iter()
        .filter(|r| r.performance_score < 85 || r.tier != Tier::Elite)
        .map(|r| r.name)
        .collect()
}

fn cohort_mean(rows: &[&Opportunity], metric: PatternMetric) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let sum: f64 = rows.iter().map(|o| metric.extract(&o.rep.pattern)).sum();
    sum / rows.len() as f64
}

/// Success-DNA analysis: split the book by rep cohort and compare the mean of
/// each behavioral metric. Pure aggregation; an empty cohort yields zero
/// means and zero gaps rather than an error.
pub fn pattern_insights(opportunities: &[Opportunity], team: &[SalesRep]) -> PatternInsights {
    let top_performers = top_performer_names(team);
    let underperformers = underperformer_names(team);

    let top_rows: Vec<&Opportunity> =
        opportunities.iter().filter(|o| top_performers.contains(&o.rep.name)).collect();
    let under_rows: Vec<&Opportunity> =
        opportunities.iter().filter(|o| underperformers.contains(&o.rep.name)).collect();

    let gaps = PatternMetric::ALL
        .iter()
        .map(|&metric| {
            let top_avg = cohort_mean(&top_rows, metric);
            let under_avg = cohort_mean(&under_rows, metric);
            let gap = top_avg - under_avg;
            let gap_percent = if top_avg != 0.0 { gap / top_avg * 100.0 } else { 0.0 };
            PatternGap {
                metric,
                top_performer_avg: top_avg,
                underperformer_avg: under_avg,
                gap_absolute: gap,
                gap_percent,
            }
        })
        .collect();

    PatternInsights { top_performers, underperformers, gaps }
}
