use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// A commercial line the organization sells. `sales_cycle_days` is the
/// typical quote-to-close span for the line and bounds the close date of
/// terminal-stage opportunities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLine {
    pub name: &'static str,
    pub base_premium: u64,
    pub margin: f64,
    pub complexity: Complexity,
    pub sales_cycle_days: u32,
    pub win_rate: f64,
}

pub fn product_lines() -> Vec<ProductLine> {
    use Complexity::*;
    vec![
        ProductLine { name: "Commercial Property", base_premium: 45_000, margin: 0.25, complexity: Medium, sales_cycle_days: 35, win_rate: 0.68 },
        ProductLine { name: "General Liability", base_premium: 28_000, margin: 0.22, complexity: Low, sales_cycle_days: 25, win_rate: 0.72 },
        ProductLine { name: "Cyber Security", base_premium: 85_000, margin: 0.35, complexity: High, sales_cycle_days: 55, win_rate: 0.58 },
        ProductLine { name: "Workers Compensation", base_premium: 35_000, margin: 0.20, complexity: Medium, sales_cycle_days: 30, win_rate: 0.75 },
        ProductLine { name: "Professional Liability", base_premium: 65_000, margin: 0.30, complexity: High, sales_cycle_days: 45, win_rate: 0.62 },
        ProductLine { name: "Directors & Officers", base_premium: 120_000, margin: 0.40, complexity: High, sales_cycle_days: 65, win_rate: 0.55 },
        ProductLine { name: "Employment Practices", base_premium: 38_000, margin: 0.25, complexity: Medium, sales_cycle_days: 35, win_rate: 0.65 },
        ProductLine { name: "Commercial Auto", base_premium: 22_000, margin: 0.18, complexity: Low, sales_cycle_days: 20, win_rate: 0.78 },
        ProductLine { name: "Umbrella Policy", base_premium: 18_000, margin: 0.28, complexity: Medium, sales_cycle_days: 25, win_rate: 0.70 },
        ProductLine { name: "Product Liability", base_premium: 95_000, margin: 0.38, complexity: High, sales_cycle_days: 60, win_rate: 0.52 },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    Lead,
    Qualified,
    NeedsAnalysis,
    Proposal,
    Negotiation,
    VerbalCommitment,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    /// Closed stages no longer accrue days-in-stage and their close date is
    /// bounded by the product's sales cycle rather than the rep's.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::ClosedWon | Stage::ClosedLost)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Lead => "Lead",
            Stage::Qualified => "Qualified",
            Stage::NeedsAnalysis => "Needs Analysis",
            Stage::Proposal => "Proposal",
            Stage::Negotiation => "Negotiation",
            Stage::VerbalCommitment => "Verbal Commitment",
            Stage::ClosedWon => "Closed Won",
            Stage::ClosedLost => "Closed Lost",
        };
        f.write_str(s)
    }
}

/// Pipeline position with its fixed win probability. The probability is a
/// property of the stage, assigned at generation time — stages never
/// transition within a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageProfile {
    pub stage: Stage,
    pub probability: f64,
    pub order: u8,
}

pub fn sales_stages() -> Vec<StageProfile> {
    vec![
        StageProfile { stage: Stage::Lead, probability: 0.10, order: 1 },
        StageProfile { stage: Stage::Qualified, probability: 0.25, order: 2 },
        StageProfile { stage: Stage::NeedsAnalysis, probability: 0.40, order: 3 },
        StageProfile { stage: Stage::Proposal, probability: 0.60, order: 4 },
        StageProfile { stage: Stage::Negotiation, probability: 0.80, order: 5 },
        StageProfile { stage: Stage::VerbalCommitment, probability: 0.90, order: 6 },
        StageProfile { stage: Stage::ClosedWon, probability: 1.00, order: 7 },
        StageProfile { stage: Stage::ClosedLost, probability: 0.00, order: 8 },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSource {
    pub name: &'static str,
    pub quality_score: u32,
    pub conversion_rate: f64,
    pub avg_deal_size: u64,
}

pub fn lead_sources() -> Vec<LeadSource> {
    vec![
        LeadSource { name: "Referral Partner", quality_score: 95, conversion_rate: 0.45, avg_deal_size: 120_000 },
        LeadSource { name: "Client Referral", quality_score: 92, conversion_rate: 0.65, avg_deal_size: 85_000 },
        LeadSource { name: "Industry Conference", quality_score: 88, conversion_rate: 0.35, avg_deal_size: 95_000 },
        LeadSource { name: "LinkedIn Outreach", quality_score: 82, conversion_rate: 0.28, avg_deal_size: 65_000 },
        LeadSource { name: "Trade Association", quality_score: 85, conversion_rate: 0.32, avg_deal_size: 75_000 },
        LeadSource { name: "Webinar", quality_score: 78, conversion_rate: 0.22, avg_deal_size: 55_000 },
        LeadSource { name: "Cold Outreach", quality_score: 65, conversion_rate: 0.12, avg_deal_size: 45_000 },
        LeadSource { name: "Website Inquiry", quality_score: 72, conversion_rate: 0.18, avg_deal_size: 50_000 },
        LeadSource { name: "Marketing Campaign", quality_score: 75, conversion_rate: 0.20, avg_deal_size: 60_000 },
        LeadSource { name: "Broker Introduction", quality_score: 90, conversion_rate: 0.42, avg_deal_size: 110_000 },
    ]
}

// ── Company size tiers ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompanySize {
    Startup,
    SmallBusiness,
    MidMarket,
    Enterprise,
    Fortune500,
}

impl CompanySize {
    pub const ALL: [CompanySize; 5] = [
        CompanySize::Startup,
        CompanySize::SmallBusiness,
        CompanySize::MidMarket,
        CompanySize::Enterprise,
        CompanySize::Fortune500,
    ];

    /// Multiplier applied to opportunity values for companies of this size.
    pub fn value_factor(self) -> f64 {
        match self {
            CompanySize::Startup => 0.5,
            CompanySize::SmallBusiness => 0.8,
            CompanySize::MidMarket => 1.2,
            CompanySize::Enterprise => 2.0,
            CompanySize::Fortune500 => 3.5,
        }
    }

    /// Inclusive headcount range for a company of this size.
    pub fn employee_range(self) -> (u32, u32) {
        match self {
            CompanySize::Startup => (10, 100),
            CompanySize::SmallBusiness => (100, 500),
            CompanySize::MidMarket => (500, 2_000),
            CompanySize::Enterprise => (2_000, 10_000),
            CompanySize::Fortune500 => (10_000, 100_000),
        }
    }

    /// Inclusive annual-revenue range (USD).
    pub fn revenue_range(self) -> (u64, u64) {
        match self {
            CompanySize::Startup => (500_000, 10_000_000),
            CompanySize::SmallBusiness => (10_000_000, 50_000_000),
            CompanySize::MidMarket => (50_000_000, 500_000_000),
            CompanySize::Enterprise => (500_000_000, 5_000_000_000),
            CompanySize::Fortune500 => (5_000_000_000, 50_000_000_000),
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompanySize::Startup => "Startup",
            CompanySize::SmallBusiness => "Small Business",
            CompanySize::MidMarket => "Mid-Market",
            CompanySize::Enterprise => "Enterprise",
            CompanySize::Fortune500 => "Fortune 500",
        };
        f.write_str(s)
    }
}

pub const INDUSTRIES: [&str; 15] = [
    "Technology",
    "Manufacturing",
    "Healthcare",
    "Financial Services",
    "Energy",
    "Logistics",
    "Retail",
    "Construction",
    "Real Estate",
    "Aerospace",
    "Pharmaceuticals",
    "Telecommunications",
    "Media",
    "Education",
    "Government",
];

/// Carriers that show up both as policy counterparties and as competitors on
/// open opportunities.
pub const COMPETITOR_CARRIERS: [&str; 5] = ["AIG", "Zurich", "Travelers", "Liberty Mutual", "Chubb"];

pub const CARRIERS: [&str; 20] = [
    "AIG",
    "Zurich",
    "Liberty Mutual",
    "Travelers",
    "Hartford",
    "Chubb",
    "Allianz",
    "Marsh",
    "Willis Towers Watson",
    "Aon",
    "Berkshire Hathaway",
    "CNA",
    "Nationwide",
    "Progressive Commercial",
    "State Farm Commercial",
    "Allstate Commercial",
    "USAA",
    "Farmers Commercial",
    "MetLife",
    "Prudential",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyType {
    pub name: &'static str,
    pub avg_premium: u64,
    pub commission_rate: f64,
}

pub fn policy_types() -> Vec<PolicyType> {
    vec![
        PolicyType { name: "Commercial Property", avg_premium: 45_000, commission_rate: 0.12 },
        PolicyType { name: "General Liability", avg_premium: 25_000, commission_rate: 0.10 },
        PolicyType { name: "Cyber Security", avg_premium: 35_000, commission_rate: 0.15 },
        PolicyType { name: "Workers Compensation", avg_premium: 30_000, commission_rate: 0.08 },
        PolicyType { name: "Professional Liability", avg_premium: 40_000, commission_rate: 0.14 },
        PolicyType { name: "Directors & Officers", avg_premium: 60_000, commission_rate: 0.16 },
        PolicyType { name: "Employment Practices", avg_premium: 28_000, commission_rate: 0.11 },
        PolicyType { name: "Commercial Auto", avg_premium: 20_000, commission_rate: 0.09 },
        PolicyType { name: "Umbrella Policy", avg_premium: 15_000, commission_rate: 0.13 },
        PolicyType { name: "Product Liability", avg_premium: 50_000, commission_rate: 0.17 },
    ]
}

pub const REFERRAL_SOURCES: [&str; 10] = [
    "LinkedIn",
    "Industry Conference",
    "Client Referral",
    "Broker Network",
    "Cold Outreach",
    "Trade Association",
    "Chamber of Commerce",
    "Online Lead",
    "Partner Referral",
    "Renewal",
];

pub const DECISION_MAKER_TITLES: [&str; 6] =
    ["CEO", "CFO", "COO", "VP Operations", "Director", "Manager"];

pub const COMPETITIVE_ADVANTAGES: [&str; 6] = [
    "Better pricing",
    "Superior coverage",
    "Industry expertise",
    "Relationship strength",
    "Technology platform",
    "Service quality",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_probabilities_cover_full_funnel() {
        let stages = sales_stages();
        assert_eq!(stages.len(), 8);
        let won = stages.iter().find(|s| s.stage == Stage::ClosedWon).unwrap();
        assert_eq!(won.probability, 1.00);
        let lost = stages.iter().find(|s| s.stage == Stage::ClosedLost).unwrap();
        assert_eq!(lost.probability, 0.00);
        // Orders are 1..=8 and unique.
        let mut orders: Vec<u8> = stages.iter().map(|s| s.order).collect();
        orders.sort_unstable();
        assert_eq!(orders, (1..=8).collect::<Vec<u8>>());
    }

    #[test]
    fn only_closed_stages_are_terminal() {
        for profile in sales_stages() {
            let expect = matches!(profile.stage, Stage::ClosedWon | Stage::ClosedLost);
            assert_eq!(profile.stage.is_terminal(), expect, "{}", profile.stage);
        }
    }

    #[test]
    fn stage_display_matches_book_labels() {
        assert_eq!(Stage::NeedsAnalysis.to_string(), "Needs Analysis");
        assert_eq!(Stage::ClosedWon.to_string(), "Closed Won");
    }

    #[test]
    fn size_tiers_have_ascending_value_factors() {
        let factors: Vec<f64> = CompanySize::ALL.iter().map(|s| s.value_factor()).collect();
        for pair in factors.windows(2) {
            assert!(pair[0] < pair[1], "value factors must ascend with size");
        }
    }

    #[test]
    fn every_product_has_positive_cycle_and_bounded_win_rate() {
        for product in product_lines() {
            assert!(product.sales_cycle_days >= 20);
            assert!(product.win_rate > 0.0 && product.win_rate < 1.0, "{}", product.name);
        }
    }

    #[test]
    fn policy_commission_rates_are_fractions() {
        for pt in policy_types() {
            assert!(pt.commission_rate > 0.0 && pt.commission_rate < 0.2, "{}", pt.name);
        }
    }
}
