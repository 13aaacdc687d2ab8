use std::fmt;

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Beta, Distribution};
use serde::Serialize;

use crate::catalog::{
    COMPETITIVE_ADVANTAGES, COMPETITOR_CARRIERS, Complexity, DECISION_MAKER_TITLES, LeadSource,
    ProductLine, Stage, StageProfile, lead_sources, product_lines, sales_stages,
};
use crate::company::{Company, RiskProfile, contact_name, generate_companies};
use crate::config::{
    DEAL_SIZE_NORMALIZATION, GeneratorConfig, MAX_OPPORTUNITY_VALUE, MIN_OPPORTUNITY_VALUE,
};
use crate::team::{SalesRep, sales_team};
use crate::types::{CompanyId, OpportunityId};

/// Prospect universe size backing the opportunity book.
pub const PROSPECT_COMPANY_COUNT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskFactor {
    /// No stage movement in over 60 days.
    Stalled,
    /// The prospect carries a High risk profile.
    HighRiskClient,
    /// Engagement temperature below 40.
    LowTemperature,
    /// A proposal has been out for more than 30 days without a decision.
    ProposalPending,
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskFactor::Stalled => "Stalled - No activity in 60+ days",
            RiskFactor::HighRiskClient => "High-risk client profile",
            RiskFactor::LowTemperature => "Low engagement temperature",
            RiskFactor::ProposalPending => "Proposal pending decision",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ForecastCategory {
    Commit,
    BestCase,
    Pipeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NextAction {
    ScheduleClosingMeeting,
    FollowUpOnProposal,
    ReEngage,
    ConductNeedsAnalysis,
    AddressPricing,
    AdvanceToNextStage,
}

/// Denormalized prospect fields carried on each opportunity. A value copy at
/// generation time, not a live reference into the company universe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRef {
    pub id: CompanyId,
    pub name: String,
    pub industry: &'static str,
    pub size: crate::catalog::CompanySize,
    pub employees: u32,
    pub annual_revenue: u64,
    pub risk_profile: RiskProfile,
    pub credit_rating: &'static str,
    pub growth_rate: f64,
}

impl CompanyRef {
    fn snapshot(company: &Company) -> Self {
        CompanyRef {
            id: company.id,
            name: company.name.clone(),
            industry: company.industry,
            size: company.size,
            employees: company.employees,
            annual_revenue: company.annual_revenue,
            risk_profile: company.risk_profile,
            credit_rating: company.credit_rating,
            growth_rate: company.growth_rate,
        }
    }
}

/// One synthesized sales opportunity. Immutable after generation; filtering
/// produces borrowed views, never mutated rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub name: String,

    pub rep: SalesRep,
    pub company: CompanyRef,

    pub product_line: &'static str,
    pub product_complexity: Complexity,
    pub product_margin: f64,

    pub stage: Stage,
    pub stage_probability: f64,
    pub stage_order: u8,

    pub lead_source: &'static str,
    pub lead_quality_score: u32,
    pub source_conversion_rate: f64,

    pub value: u64,
    /// Invariant: `weighted_value == round(value × stage_probability)`.
    pub weighted_value: u64,

    pub created_date: NaiveDate,
    pub expected_close_date: NaiveDate,
    pub days_in_stage: i64,
    pub days_to_close: i64,

    pub temperature_score: f64,
    pub health_score: u32,
    pub win_probability_ai: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub priority: Priority,
    pub next_best_action: NextAction,
    pub forecast_category: ForecastCategory,

    pub last_activity_date: NaiveDate,
    pub next_activity_date: NaiveDate,
    pub activities_count: u32,
    pub meetings_count: u32,
    pub emails_count: u32,
    pub calls_count: u32,

    pub decision_maker: String,
    pub decision_maker_title: &'static str,
    pub budget_confirmed: bool,
    pub authority_confirmed: bool,
    pub need_confirmed: bool,
    pub timeline_confirmed: bool,

    pub competitors: Vec<&'static str>,
    pub competitive_advantage: Option<&'static str>,
    pub proposal_sent_date: Option<NaiveDate>,
    pub contract_sent_date: Option<NaiveDate>,

    pub multi_year_potential: bool,
    pub cross_sell_potential: u32,
    pub upsell_potential: u32,
    pub renewal_probability: Option<u32>,
}

// ── Scoring formulas ─────────────────────────────────────────────────────────
// The weighting constants below are part of the demo-data contract and are
// kept exactly as shipped.

/// Engagement temperature in [0, 100]: a uniform base draw shifted by the
/// rep's performance, activity volume, and responsiveness.
pub fn temperature_score(rep: &SalesRep, rng: &mut impl Rng) -> f64 {
    let base = rng.random_range(30..=90) as f64;
    let performance_boost = if rep.performance_score > 80 {
        (rep.performance_score as f64 - 80.0) * 0.5
    } else {
        0.0
    };
    let activity_boost = if rep.pattern.avg_activities_per_week > 15 {
        (rep.pattern.avg_activities_per_week as f64 - 15.0).min(20.0)
    } else {
        0.0
    };
    let response_penalty = if rep.pattern.avg_response_time_hours > 3.0 {
        ((rep.pattern.avg_response_time_hours - 3.0) * -2.0).max(-15.0)
    } else {
        0.0
    };
    (base + performance_boost + activity_boost + response_penalty).clamp(0.0, 100.0)
}

/// Relationship/engagement health in [0, 100]: five bounded components
/// (relationship strength, engagement, budget, decision-maker access,
/// competitive position).
pub fn health_score(rng: &mut impl Rng) -> u32 {
    let components = [
        rng.random_range(15..=25),
        rng.random_range(10..=20),
        rng.random_range(10..=20),
        rng.random_range(10..=20),
        rng.random_range(5..=15),
    ];
    components.iter().sum::<u32>().min(100)
}

/// Blended win estimate: 70 % temperature, 30 % health, ±15 noise.
pub fn win_probability(temperature: f64, health: u32, rng: &mut impl Rng) -> f64 {
    let noise = rng.random_range(-15..=15) as f64;
    (temperature * 0.7 + health as f64 * 0.3 + noise).clamp(0.0, 100.0)
}

/// Threshold rules over elapsed time, client profile, and temperature.
/// Three or more factors escalate to High; any factor means at least Medium.
pub fn assess_risk(
    days_in_stage: i64,
    client_risk: RiskProfile,
    temperature: f64,
    stage: Stage,
) -> (Vec<RiskFactor>, RiskLevel) {
    let mut factors = Vec::new();
    if days_in_stage > 60 {
        factors.push(RiskFactor::Stalled);
    }
    if client_risk == RiskProfile::High {
        factors.push(RiskFactor::HighRiskClient);
    }
    if temperature < 40.0 {
        factors.push(RiskFactor::LowTemperature);
    }
    if stage == Stage::Proposal && days_in_stage > 30 {
        factors.push(RiskFactor::ProposalPending);
    }
    let level = match factors.len() {
        n if n >= 3 => RiskLevel::High,
        n if n >= 1 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    };
    (factors, level)
}

/// Priority ladder over (value, temperature).
pub fn priority_for(value: u64, temperature: f64) -> Priority {
    if value > 500_000 && temperature > 70.0 {
        Priority::Critical
    } else if value > 200_000 && temperature > 60.0 {
        Priority::High
    } else if temperature > 50.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// First matching rule wins; the order encodes urgency.
pub fn next_best_action(temperature: f64, stage: Stage, days_in_stage: i64) -> NextAction {
    if temperature >= 80.0 {
        NextAction::ScheduleClosingMeeting
    } else if stage == Stage::Proposal && days_in_stage > 21 {
        NextAction::FollowUpOnProposal
    } else if days_in_stage > 45 {
        NextAction::ReEngage
    } else if stage == Stage::Qualified {
        NextAction::ConductNeedsAnalysis
    } else if stage == Stage::Negotiation {
        NextAction::AddressPricing
    } else {
        NextAction::AdvanceToNextStage
    }
}

/// Opportunity value: product base premium scaled by the uniform variation,
/// rep experience, company size, and the rep's deal-size norm, then clamped
/// to [10k, 5M].
pub fn opportunity_value(
    product: &ProductLine,
    rep: &SalesRep,
    size_factor: f64,
    variation: f64,
) -> u64 {
    let deal_size_factor = rep.pattern.avg_deal_size as f64 / DEAL_SIZE_NORMALIZATION;
    let raw =
        product.base_premium as f64 * variation * rep.experience_factor() * size_factor * deal_size_factor;
    (raw as u64).clamp(MIN_OPPORTUNITY_VALUE, MAX_OPPORTUNITY_VALUE)
}

/// Expected close date. Terminal stages closed within the product's typical
/// cycle; open stages project the rep's average cycle with jitter.
pub fn expected_close_date(
    created: NaiveDate,
    stage: Stage,
    product: &ProductLine,
    rep: &SalesRep,
    rng: &mut impl Rng,
) -> NaiveDate {
    if stage.is_terminal() {
        created + Duration::days(rng.random_range(5..=product.sales_cycle_days as i64))
    } else {
        let projected = created + Duration::days(rep.pattern.avg_sales_cycle_days as i64);
        projected + Duration::days(rng.random_range(-14..=30))
    }
}

// ── Generation ───────────────────────────────────────────────────────────────

/// Generate the full opportunity book from the config's seed. Pure: same
/// config, byte-identical output. Callers own the returned rows.
pub fn generate(config: &GeneratorConfig) -> Vec<Opportunity> {
    let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
    generate_with_rng(config, &mut rng)
}

/// Generation against an explicit RNG handle, for callers composing several
/// books from one stream.
pub fn generate_with_rng(config: &GeneratorConfig, rng: &mut impl Rng) -> Vec<Opportunity> {
    let team = sales_team();
    let companies = generate_companies(PROSPECT_COMPANY_COUNT, rng);
    let products = product_lines();
    let stages = sales_stages();
    let sources = lead_sources();

    // Left-skewed creation dates: most of the book is older pipeline.
    let created_dist = Beta::new(2.0, 5.0).expect("valid Beta parameters");
    let window_days = config.window_days();

    (0..config.opportunity_count)
        .map(|i| {
            generate_one(
                OpportunityId(i as u32 + 1),
                config,
                &team,
                &companies,
                &products,
                &stages,
                &sources,
                &created_dist,
                window_days,
                rng,
            )
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn generate_one(
    id: OpportunityId,
    config: &GeneratorConfig,
    team: &[SalesRep],
    companies: &[Company],
    products: &[ProductLine],
    stages: &[StageProfile],
    sources: &[LeadSource],
    created_dist: &Beta<f64>,
    window_days: i64,
    rng: &mut impl Rng,
) -> Opportunity {
    let rep = team.choose(rng).expect("non-empty roster").clone();
    let company = companies.choose(rng).expect("non-empty universe");
    let product = products.choose(rng).expect("non-empty catalog");
    let stage_profile = *stages.choose(rng).expect("non-empty stages");
    let source = sources.choose(rng).expect("non-empty sources");
    let stage = stage_profile.stage;

    let created_offset = (created_dist.sample(rng) * window_days as f64) as i64;
    let created_date = config.window_start + Duration::days(created_offset);

    let size_factor = company.size.value_factor();
    let variation = rng.random_range(0.4..3.2);
    let value = opportunity_value(product, &rep, size_factor, variation);
    let weighted_value = (value as f64 * stage_profile.probability).round() as u64;

    let close_date = expected_close_date(created_date, stage, product, &rep, rng);

    let days_in_stage = if stage.is_terminal() {
        0
    } else {
        (config.today - created_date).num_days()
    };
    let days_to_close = (close_date - config.today).num_days();

    let temperature = temperature_score(&rep, rng);
    let health = health_score(rng);
    let (risk_factors, risk_level) =
        assess_risk(days_in_stage, company.risk_profile, temperature, stage);
    let action = next_best_action(temperature, stage, days_in_stage);
    let priority = priority_for(value, temperature);

    let competitor_count = rng.random_range(0..=3);
    let competitors: Vec<&'static str> = COMPETITOR_CARRIERS
        .choose_multiple(rng, competitor_count)
        .copied()
        .collect();

    let last_activity_date = if days_in_stage > 0 {
        created_date + Duration::days(rng.random_range(0..=days_in_stage))
    } else {
        created_date
    };
    let next_activity_date = config.today + Duration::days(rng.random_range(1..=14));

    let proposal_sent_date = (stage_profile.order >= 4)
        .then(|| created_date + Duration::days(rng.random_range(10..=40)));
    let contract_sent_date = (stage_profile.order >= 5)
        .then(|| created_date + Duration::days(rng.random_range(30..=60)));

    let win_probability_ai = win_probability(temperature, health, rng);
    let forecast_category = *[
        ForecastCategory::Commit,
        ForecastCategory::BestCase,
        ForecastCategory::Pipeline,
    ]
    .choose(rng)
    .expect("non-empty list");

    let renewal_probability = (stage == Stage::ClosedWon).then(|| rng.random_range(60..=95));

    Opportunity {
        id,
        name: format!("{} - {}", company.name, product.name),
        company: CompanyRef::snapshot(company),
        product_line: product.name,
        product_complexity: product.complexity,
        product_margin: product.margin,
        stage,
        stage_probability: stage_profile.probability,
        stage_order: stage_profile.order,
        lead_source: source.name,
        lead_quality_score: source.quality_score,
        source_conversion_rate: source.conversion_rate,
        value,
        weighted_value,
        created_date,
        expected_close_date: close_date,
        days_in_stage,
        days_to_close,
        temperature_score: temperature,
        health_score: health,
        win_probability_ai,
        risk_level,
        risk_factors,
        priority,
        next_best_action: action,
        forecast_category,
        last_activity_date,
        next_activity_date,
        activities_count: rng.random_range(1..=25),
        meetings_count: rng.random_range(0..=8),
        emails_count: rng.random_range(2..=35),
        calls_count: rng.random_range(1..=15),
        decision_maker: contact_name(rng),
        decision_maker_title: *DECISION_MAKER_TITLES.choose(rng).expect("non-empty list"),
        budget_confirmed: rng.random_bool(0.5),
        authority_confirmed: rng.random_bool(0.5),
        need_confirmed: rng.random_bool(0.5),
        timeline_confirmed: rng.random_bool(0.5),
        competitors,
        competitive_advantage: (rng.random::<f64>() > 0.3)
            .then(|| *COMPETITIVE_ADVANTAGES.choose(rng).expect("non-empty list")),
        proposal_sent_date,
        contract_sent_date,
        multi_year_potential: rng.random_bool(0.5),
        cross_sell_potential: rng.random_range(20..=95),
        upsell_potential: rng.random_range(15..=80),
        renewal_probability,
        rep,
    }
}
