use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{ProducerId, RepId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    Elite,
    Senior,
    Standard,
    // Producer-book tiers.
    Platinum,
    Gold,
}

/// Behavioral metrics attached to each rep. These feed both the per-row
/// intelligence scores and the success-DNA gap analysis, so they are
/// denormalized into every generated opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepPattern {
    pub avg_activities_per_week: u32,
    pub emails_per_opp: u32,
    pub calls_per_opp: u32,
    pub meetings_per_opp: u32,
    pub avg_response_time_hours: f64,
    pub decision_maker_access_rate: f64,
    pub proposal_win_rate: f64,
    pub avg_deal_size: u64,
    pub avg_sales_cycle_days: u32,
    pub lead_conversion_rate: f64,
    pub cross_sell_rate: f64,
    pub referral_generation_rate: f64,
    pub linkedin_connections: u32,
    pub industry_expertise_score: u32,
    pub negotiation_success_rate: f64,
    pub client_satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRep {
    pub id: RepId,
    pub name: &'static str,
    pub email: &'static str,
    pub region: &'static str,
    pub specialty: &'static str,
    pub experience_years: u32,
    pub quota_annual: u64,
    pub tier: Tier,
    pub performance_score: u32,
    pub pattern: RepPattern,
}

impl SalesRep {
    /// Experience factor applied to opportunity values: +5 % per year of
    /// experience, capped at 1.8.
    pub fn experience_factor(&self) -> f64 {
        (1.0 + self.experience_years as f64 * 0.05).min(1.8)
    }
}

/// The ten-rep roster the opportunity book is generated against. Attribute
/// values are part of the demo-data contract; the elite/standard contrast is
/// deliberate — it is what the success-DNA analysis surfaces.
pub fn sales_team() -> Vec<SalesRep> {
    vec![
        SalesRep {
            id: RepId(1),
            name: "Sarah Chen",
            email: "sarah.chen@nexusinsure.com",
            region: "West Coast",
            specialty: "Commercial Property",
            experience_years: 8,
            quota_annual: 4_500_000,
            tier: Tier::Elite,
            performance_score: 94,
            pattern: RepPattern {
                avg_activities_per_week: 32,
                emails_per_opp: 18,
                calls_per_opp: 8,
                meetings_per_opp: 4,
                avg_response_time_hours: 2.1,
                decision_maker_access_rate: 0.85,
                proposal_win_rate: 0.72,
                avg_deal_size: 285_000,
                avg_sales_cycle_days: 38,
                lead_conversion_rate: 0.45,
                cross_sell_rate: 0.35,
                referral_generation_rate: 0.28,
                linkedin_connections: 2_850,
                industry_expertise_score: 92,
                negotiation_success_rate: 0.78,
                client_satisfaction: 4.7,
            },
        },
        SalesRep {
            id: RepId(2),
            name: "Marcus Rodriguez",
            email: "marcus.r@nexusinsure.com",
            region: "Southwest",
            specialty: "Cyber Security",
            experience_years: 12,
            quota_annual: 5_200_000,
            tier: Tier::Elite,
            performance_score: 98,
            pattern: RepPattern {
                avg_activities_per_week: 28,
                emails_per_opp: 15,
                calls_per_opp: 10,
                meetings_per_opp: 5,
                avg_response_time_hours: 1.8,
                decision_maker_access_rate: 0.88,
                proposal_win_rate: 0.75,
                avg_deal_size: 320_000,
                avg_sales_cycle_days: 42,
                lead_conversion_rate: 0.52,
                cross_sell_rate: 0.42,
                referral_generation_rate: 0.35,
                linkedin_connections: 3_200,
                industry_expertise_score: 96,
                negotiation_success_rate: 0.82,
                client_satisfaction: 4.8,
            },
        },
        SalesRep {
            id: RepId(3),
            name: "Elena Volkov",
            email: "elena.v@nexusinsure.com",
            region: "Northeast",
            specialty: "Professional Liability",
            experience_years: 15,
            quota_annual: 6_000_000,
            tier: Tier::Elite,
            performance_score: 96,
            pattern: RepPattern {
                avg_activities_per_week: 35,
                emails_per_opp: 22,
                calls_per_opp: 12,
                meetings_per_opp: 6,
                avg_response_time_hours: 1.5,
                decision_maker_access_rate: 0.92,
                proposal_win_rate: 0.78,
                avg_deal_size: 380_000,
                avg_sales_cycle_days: 45,
                lead_conversion_rate: 0.48,
                cross_sell_rate: 0.38,
                referral_generation_rate: 0.32,
                linkedin_connections: 4_100,
                industry_expertise_score: 98,
                negotiation_success_rate: 0.85,
                client_satisfaction: 4.9,
            },
        },
        SalesRep {
            id: RepId(4),
            name: "James Kim",
            email: "james.kim@nexusinsure.com",
            region: "Southeast",
            specialty: "General Liability",
            experience_years: 6,
            quota_annual: 3_200_000,
            tier: Tier::Senior,
            performance_score: 87,
            pattern: RepPattern {
                avg_activities_per_week: 18,
                emails_per_opp: 8,
                calls_per_opp: 4,
                meetings_per_opp: 2,
                avg_response_time_hours: 6.2,
                decision_maker_access_rate: 0.52,
                proposal_win_rate: 0.45,
                avg_deal_size: 125_000,
                avg_sales_cycle_days: 65,
                lead_conversion_rate: 0.22,
                cross_sell_rate: 0.15,
                referral_generation_rate: 0.08,
                linkedin_connections: 850,
                industry_expertise_score: 72,
                negotiation_success_rate: 0.58,
                client_satisfaction: 4.1,
            },
        },
        SalesRep {
            id: RepId(5),
            name: "Isabella Foster",
            email: "isabella.f@nexusinsure.com",
            region: "Midwest",
            specialty: "Directors & Officers",
            experience_years: 9,
            quota_annual: 4_800_000,
            tier: Tier::Elite,
            performance_score: 91,
            pattern: RepPattern {
                avg_activities_per_week: 26,
                emails_per_opp: 14,
                calls_per_opp: 7,
                meetings_per_opp: 3,
                avg_response_time_hours: 3.2,
                decision_maker_access_rate: 0.78,
                proposal_win_rate: 0.68,
                avg_deal_size: 245_000,
                avg_sales_cycle_days: 48,
                lead_conversion_rate: 0.38,
                cross_sell_rate: 0.28,
                referral_generation_rate: 0.22,
                linkedin_connections: 2_200,
                industry_expertise_score: 88,
                negotiation_success_rate: 0.72,
                client_satisfaction: 4.5,
            },
        },
        SalesRep {
            id: RepId(6),
            name: "David Park",
            email: "david.park@nexusinsure.com",
            region: "West Coast",
            specialty: "Workers Compensation",
            experience_years: 4,
            quota_annual: 2_800_000,
            tier: Tier::Standard,
            performance_score: 78,
            pattern: RepPattern {
                avg_activities_per_week: 15,
                emails_per_opp: 6,
                calls_per_opp: 3,
                meetings_per_opp: 1,
                avg_response_time_hours: 8.5,
                decision_maker_access_rate: 0.48,
                proposal_win_rate: 0.38,
                avg_deal_size: 95_000,
                avg_sales_cycle_days: 78,
                lead_conversion_rate: 0.18,
                cross_sell_rate: 0.12,
                referral_generation_rate: 0.05,
                linkedin_connections: 620,
                industry_expertise_score: 65,
                negotiation_success_rate: 0.52,
                client_satisfaction: 3.9,
            },
        },
        SalesRep {
            id: RepId(7),
            name: "Zoe Williams",
            email: "zoe.w@nexusinsure.com",
            region: "Northeast",
            specialty: "Commercial Property",
            experience_years: 18,
            quota_annual: 7_500_000,
            tier: Tier::Elite,
            performance_score: 99,
            pattern: RepPattern {
                avg_activities_per_week: 38,
                emails_per_opp: 25,
                calls_per_opp: 14,
                meetings_per_opp: 7,
                avg_response_time_hours: 1.2,
                decision_maker_access_rate: 0.95,
                proposal_win_rate: 0.82,
                avg_deal_size: 425_000,
                avg_sales_cycle_days: 35,
                lead_conversion_rate: 0.58,
                cross_sell_rate: 0.48,
                referral_generation_rate: 0.42,
                linkedin_connections: 5_200,
                industry_expertise_score: 99,
                negotiation_success_rate: 0.88,
                client_satisfaction: 4.9,
            },
        },
        SalesRep {
            id: RepId(8),
            name: "Ahmed Hassan",
            email: "ahmed.h@nexusinsure.com",
            region: "Southeast",
            specialty: "Cyber Security",
            experience_years: 11,
            quota_annual: 4_900_000,
            tier: Tier::Elite,
            performance_score: 93,
            pattern: RepPattern {
                avg_activities_per_week: 24,
                emails_per_opp: 16,
                calls_per_opp: 9,
                meetings_per_opp: 4,
                avg_response_time_hours: 2.8,
                decision_maker_access_rate: 0.82,
                proposal_win_rate: 0.70,
                avg_deal_size: 265_000,
                avg_sales_cycle_days: 44,
                lead_conversion_rate: 0.42,
                cross_sell_rate: 0.32,
                referral_generation_rate: 0.25,
                linkedin_connections: 2_800,
                industry_expertise_score: 90,
                negotiation_success_rate: 0.75,
                client_satisfaction: 4.6,
            },
        },
        SalesRep {
            id: RepId(9),
            name: "Sophie Turner",
            email: "sophie.t@nexusinsure.com",
            region: "Midwest",
            specialty: "Professional Liability",
            experience_years: 5,
            quota_annual: 2_900_000,
            tier: Tier::Standard,
            performance_score: 82,
            pattern: RepPattern {
                avg_activities_per_week: 16,
                emails_per_opp: 7,
                calls_per_opp: 3,
                meetings_per_opp: 2,
                avg_response_time_hours: 7.1,
                decision_maker_access_rate: 0.45,
                proposal_win_rate: 0.42,
                avg_deal_size: 110_000,
                avg_sales_cycle_days: 72,
                lead_conversion_rate: 0.20,
                cross_sell_rate: 0.14,
                referral_generation_rate: 0.06,
                linkedin_connections: 750,
                industry_expertise_score: 68,
                negotiation_success_rate: 0.55,
                client_satisfaction: 4.0,
            },
        },
        SalesRep {
            id: RepId(10),
            name: "Ryan O'Connor",
            email: "ryan.o@nexusinsure.com",
            region: "West Coast",
            specialty: "General Liability",
            experience_years: 7,
            quota_annual: 3_600_000,
            tier: Tier::Senior,
            performance_score: 89,
            pattern: RepPattern {
                avg_activities_per_week: 20,
                emails_per_opp: 12,
                calls_per_opp: 6,
                meetings_per_opp: 3,
                avg_response_time_hours: 4.5,
                decision_maker_access_rate: 0.65,
                proposal_win_rate: 0.58,
                avg_deal_size: 180_000,
                avg_sales_cycle_days: 55,
                lead_conversion_rate: 0.32,
                cross_sell_rate: 0.22,
                referral_generation_rate: 0.15,
                linkedin_connections: 1_450,
                industry_expertise_score: 82,
                negotiation_success_rate: 0.68,
                client_satisfaction: 4.3,
            },
        },
    ]
}

/// Producer roster for the policy book. Same people, different book: tiers
/// follow the producer-performance scheme (Elite/Platinum/Gold).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Producer {
    pub id: ProducerId,
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub region: &'static str,
    pub hire_date: NaiveDate,
    pub tier: Tier,
    pub specialty: &'static str,
}

pub fn producers() -> Vec<Producer> {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).expect("valid date");
    vec![
        Producer { id: ProducerId(1), name: "Sarah Chen", email: "sarah.chen@nexusinsure.com", phone: "(555) 123-4567", region: "West Coast", hire_date: d(2020, 3, 15), tier: Tier::Elite, specialty: "Commercial Property" },
        Producer { id: ProducerId(2), name: "Marcus Rodriguez", email: "marcus.r@nexusinsure.com", phone: "(555) 234-5678", region: "Southwest", hire_date: d(2019, 7, 22), tier: Tier::Elite, specialty: "Cyber Security" },
        Producer { id: ProducerId(3), name: "Elena Volkov", email: "elena.v@nexusinsure.com", phone: "(555) 345-6789", region: "Northeast", hire_date: d(2018, 1, 10), tier: Tier::Elite, specialty: "Professional Liability" },
        Producer { id: ProducerId(4), name: "James Kim", email: "james.kim@nexusinsure.com", phone: "(555) 456-7890", region: "Southeast", hire_date: d(2021, 5, 3), tier: Tier::Platinum, specialty: "General Liability" },
        Producer { id: ProducerId(5), name: "Isabella Foster", email: "isabella.f@nexusinsure.com", phone: "(555) 567-8901", region: "Midwest", hire_date: d(2020, 9, 18), tier: Tier::Elite, specialty: "Directors & Officers" },
        Producer { id: ProducerId(6), name: "David Park", email: "david.park@nexusinsure.com", phone: "(555) 678-9012", region: "West Coast", hire_date: d(2022, 2, 14), tier: Tier::Gold, specialty: "Workers Compensation" },
        Producer { id: ProducerId(7), name: "Zoe Williams", email: "zoe.w@nexusinsure.com", phone: "(555) 789-0123", region: "Northeast", hire_date: d(2017, 11, 30), tier: Tier::Elite, specialty: "Commercial Property" },
        Producer { id: ProducerId(8), name: "Ahmed Hassan", email: "ahmed.h@nexusinsure.com", phone: "(555) 890-1234", region: "Southeast", hire_date: d(2019, 4, 12), tier: Tier::Elite, specialty: "Cyber Security" },
        Producer { id: ProducerId(9), name: "Sophie Turner", email: "sophie.t@nexusinsure.com", phone: "(555) 901-2345", region: "Midwest", hire_date: d(2021, 8, 7), tier: Tier::Platinum, specialty: "Professional Liability" },
        Producer { id: ProducerId(10), name: "Ryan O'Connor", email: "ryan.o@nexusinsure.com", phone: "(555) 012-3456", region: "West Coast", hire_date: d(2020, 12, 1), tier: Tier::Gold, specialty: "General Liability" },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_ten_reps_with_unique_ids() {
        let team = sales_team();
        assert_eq!(team.len(), 10);
        let mut ids: Vec<u32> = team.iter().map(|r| r.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn experience_factor_is_capped_at_1_8() {
        let team = sales_team();
        let veteran = team.iter().find(|r| r.name == "Zoe Williams").unwrap();
        // 18 years would give 1.9 uncapped.
        assert_eq!(veteran.experience_factor(), 1.8);
        let junior = team.iter().find(|r| r.name == "David Park").unwrap();
        assert!((junior.experience_factor() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn roster_contains_both_elite_and_standard_tiers() {
        // The success-DNA analysis needs a populated cohort on each side.
        let team = sales_team();
        assert!(team.iter().any(|r| r.tier == Tier::Elite && r.performance_score >= 90));
        assert!(team.iter().any(|r| r.performance_score < 85));
    }

    #[test]
    fn producer_roster_mirrors_team_names() {
        let team = sales_team();
        let book = producers();
        assert_eq!(book.len(), 10);
        for (rep, producer) in team.iter().zip(&book) {
            assert_eq!(rep.name, producer.name);
        }
    }
}
