use std::fmt;

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::catalog::{CARRIERS, CompanySize, PolicyType, REFERRAL_SOURCES, policy_types};
use crate::company::{ClientCompany, client_roster};
use crate::config::GeneratorConfig;
use crate::team::{Producer, Tier, producers};
use crate::types::{PolicyId, ProducerId};

/// Fixed policy term: expiration is always effective date + 365 days.
pub const POLICY_TERM_DAYS: i64 = 365;

/// Records older than this are settled into a terminal-ish status mix;
/// younger records are still in the quote/bind funnel.
const SETTLED_AGE_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
    Renewed,
    Pending,
    Quoted,
}

impl PolicyStatus {
    /// Weighted status mixes, keyed on record age.
    const SETTLED: [(PolicyStatus, u32); 4] = [
        (PolicyStatus::Active, 60),
        (PolicyStatus::Expired, 15),
        (PolicyStatus::Cancelled, 10),
        (PolicyStatus::Renewed, 15),
    ];
    const RECENT: [(PolicyStatus, u32); 3] = [
        (PolicyStatus::Active, 40),
        (PolicyStatus::Pending, 35),
        (PolicyStatus::Quoted, 25),
    ];

    fn sample(created: NaiveDate, today: NaiveDate, rng: &mut impl Rng) -> PolicyStatus {
        let mix: &[(PolicyStatus, u32)] =
            if created < today - Duration::days(SETTLED_AGE_DAYS) {
                &Self::SETTLED
            } else {
                &Self::RECENT
            };
        mix.choose_weighted(rng, |(_, w)| *w).expect("non-empty weighted mix").0
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Expired => "Expired",
            PolicyStatus::Cancelled => "Cancelled",
            PolicyStatus::Renewed => "Renewed",
            PolicyStatus::Pending => "Pending",
            PolicyStatus::Quoted => "Quoted",
        };
        f.write_str(s)
    }
}

/// One synthesized policy row. Producer and client fields are value copies
/// made at generation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRecord {
    pub id: PolicyId,
    pub producer_id: ProducerId,
    pub producer_name: &'static str,
    pub producer_region: &'static str,
    pub producer_tier: Tier,
    pub producer_specialty: &'static str,

    pub company_name: &'static str,
    pub company_industry: &'static str,
    pub company_size: CompanySize,
    pub company_revenue: u64,

    pub policy_type: &'static str,
    pub carrier: &'static str,
    pub referral_source: &'static str,

    pub premium: u64,
    pub commission: u64,
    pub commission_rate: f64,

    pub status: PolicyStatus,
    pub created_date: NaiveDate,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,

    /// 100 unless the policy is still Pending.
    pub probability: u32,
    /// 0 unless the policy is still Pending.
    pub days_to_close: u32,
    pub customer_satisfaction: u32,
    pub risk_score: u32,
    /// 0 unless the policy is Active.
    pub renewal_probability: u32,
    pub bind_ratio: f64,
    pub quote_to_bind_days: u32,
    pub claims_history: u32,
    pub policy_limit: u64,
    pub deductible: u64,
}

const POLICY_LIMITS: [u64; 4] = [1_000_000, 2_000_000, 5_000_000, 10_000_000];
const DEDUCTIBLES: [u64; 5] = [1_000, 2_500, 5_000, 10_000, 25_000];

/// Generate the policy book from the config's seed. Pure and deterministic,
/// like the opportunity generator.
pub fn generate(config: &GeneratorConfig) -> Vec<PolicyRecord> {
    let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
    generate_with_rng(config, &mut rng)
}

pub fn generate_with_rng(config: &GeneratorConfig, rng: &mut impl Rng) -> Vec<PolicyRecord> {
    let roster = producers();
    let clients = client_roster();
    let types = policy_types();

    (0..config.policy_count)
        .map(|i| generate_one(PolicyId(i as u32 + 1), config, &roster, &clients, &types, rng))
        .collect()
}

fn generate_one(
    id: PolicyId,
    config: &GeneratorConfig,
    roster: &[Producer],
    clients: &[ClientCompany],
    types: &[PolicyType],
    rng: &mut impl Rng,
) -> PolicyRecord {
    let producer = roster.choose(rng).expect("non-empty roster");
    let client = clients.choose(rng).expect("non-empty roster");
    let policy_type = types.choose(rng).expect("non-empty catalog");
    let carrier = *CARRIERS.choose(rng).expect("non-empty list");
    let referral = *REFERRAL_SOURCES.choose(rng).expect("non-empty list");

    // 70 %–180 % of the line's average premium.
    let premium = (policy_type.avg_premium as f64 * rng.random_range(0.7..1.8)) as u64;
    let commission = (premium as f64 * policy_type.commission_rate) as u64;

    let lookback = (config.today - config.policy_window_start()).num_days();
    let created_date = config.policy_window_start() + Duration::days(rng.random_range(0..=lookback));
    let effective_date = created_date + Duration::days(rng.random_range(1..=60));
    let expiration_date = effective_date + Duration::days(POLICY_TERM_DAYS);

    let status = PolicyStatus::sample(created_date, config.today, rng);

    let probability =
        if status == PolicyStatus::Pending { rng.random_range(60..=95) } else { 100 };
    let days_to_close =
        if status == PolicyStatus::Pending { rng.random_range(15..=120) } else { 0 };
    let renewal_probability =
        if status == PolicyStatus::Active { rng.random_range(70..=95) } else { 0 };

    PolicyRecord {
        id,
        producer_id: producer.id,
        producer_name: producer.name,
        producer_region: producer.region,
        producer_tier: producer.tier,
        producer_specialty: producer.specialty,
        company_name: client.name,
        company_industry: client.industry,
        company_size: client.size,
        company_revenue: client.revenue,
        policy_type: policy_type.name,
        carrier,
        referral_source: referral,
        premium,
        commission,
        commission_rate: policy_type.commission_rate,
        status,
        created_date,
        effective_date,
        expiration_date,
        probability,
        days_to_close,
        customer_satisfaction: rng.random_range(3..=5),
        risk_score: rng.random_range(1..=100),
        renewal_probability,
        bind_ratio: rng.random_range(0.65..0.95),
        quote_to_bind_days: rng.random_range(5..=45),
        claims_history: rng.random_range(0..=3),
        policy_limit: *POLICY_LIMITS.choose(rng).expect("non-empty list"),
        deductible: *DEDUCTIBLES.choose(rng).expect("non-empty list"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(count: usize) -> GeneratorConfig {
        GeneratorConfig { policy_count: count, ..GeneratorConfig::canonical() }
    }

    #[test]
    fn same_seed_produces_identical_books() {
        let config = small_config(300);
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn effective_and_expiration_dates_follow_creation() {
        for policy in generate(&small_config(500)) {
            let binding_lag = (policy.effective_date - policy.created_date).num_days();
            assert!((1..=60).contains(&binding_lag), "{}", policy.id);
            assert_eq!(
                (policy.expiration_date - policy.effective_date).num_days(),
                POLICY_TERM_DAYS
            );
        }
    }

    #[test]
    fn premium_variation_stays_in_band() {
        let types = policy_types();
        for policy in generate(&small_config(500)) {
            let base =
                types.iter().find(|t| t.name == policy.policy_type).unwrap().avg_premium as f64;
            let ratio = policy.premium as f64 / base;
            assert!((0.7..1.8).contains(&ratio), "{}: ratio {ratio:.3}", policy.id);
        }
    }

    #[test]
    fn commission_is_rate_times_premium() {
        for policy in generate(&small_config(500)) {
            let expected = (policy.premium as f64 * policy.commission_rate) as u64;
            assert_eq!(policy.commission, expected, "{}", policy.id);
        }
    }

    #[test]
    fn status_dependent_fields_hold() {
        for policy in generate(&small_config(1_000)) {
            match policy.status {
                PolicyStatus::Pending => {
                    assert!((60..=95).contains(&policy.probability), "{}", policy.id);
                    assert!((15..=120).contains(&policy.days_to_close));
                }
                _ => {
                    assert_eq!(policy.probability, 100);
                    assert_eq!(policy.days_to_close, 0);
                }
            }
            match policy.status {
                PolicyStatus::Active => {
                    assert!((70..=95).contains(&policy.renewal_probability));
                }
                _ => assert_eq!(policy.renewal_probability, 0),
            }
        }
    }

    #[test]
    fn recent_records_never_carry_settled_statuses() {
        let config = small_config(1_000);
        let cutoff = config.today - Duration::days(30);
        for policy in generate(&config) {
            if policy.created_date >= cutoff {
                assert!(
                    matches!(
                        policy.status,
                        PolicyStatus::Active | PolicyStatus::Pending | PolicyStatus::Quoted
                    ),
                    "{}: recent record with status {}",
                    policy.id,
                    policy.status
                );
            } else {
                assert!(
                    !matches!(policy.status, PolicyStatus::Pending | PolicyStatus::Quoted),
                    "{}: settled record still {}",
                    policy.id,
                    policy.status
                );
            }
        }
    }

    #[test]
    fn created_dates_stay_inside_the_lookback_window() {
        let config = small_config(1_000);
        for policy in generate(&config) {
            assert!(policy.created_date >= config.policy_window_start());
            assert!(policy.created_date <= config.today);
        }
    }
}
