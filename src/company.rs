use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::catalog::{CompanySize, INDUSTRIES};
use crate::types::CompanyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskProfile {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: &'static str,
    pub size: CompanySize,
    pub employees: u32,
    pub annual_revenue: u64,
    pub founded: u32,
    pub headquarters: String,
    pub risk_profile: RiskProfile,
    pub credit_rating: &'static str,
    pub previous_claims: u32,
    pub market_position: &'static str,
    pub growth_rate: f64,
    pub technology_adoption: &'static str,
}

const CREDIT_RATINGS: [&str; 6] = ["A+", "A", "A-", "B+", "B", "B-"];
const MARKET_POSITIONS: [&str; 4] = ["Leader", "Challenger", "Follower", "Niche"];
const TECHNOLOGY_ADOPTION: [&str; 3] = ["Early Adopter", "Mainstream", "Late Adopter"];
const RISK_PROFILES: [RiskProfile; 3] = [RiskProfile::Low, RiskProfile::Medium, RiskProfile::High];

// Curated word lists for deterministic name synthesis. Pair counts are large
// enough that 500 draws rarely collide, and collisions are harmless — two
// prospects can share a trading name.
const NAME_PREFIXES: [&str; 28] = [
    "Apex", "Summit", "Pinnacle", "Vanguard", "Meridian", "Sterling", "Cascade", "Horizon",
    "Keystone", "Beacon", "Atlas", "Nova", "Quantum", "Stellar", "Titan", "Vertex", "Zenith",
    "Crestline", "Ironwood", "Lakeshore", "Northgate", "Redstone", "Silverline", "Granite",
    "Bluepeak", "Clearwater", "Eastbrook", "Westfield",
];

const NAME_STEMS: [&str; 20] = [
    "Dynamics", "Systems", "Industries", "Logistics", "Technologies", "Manufacturing",
    "Analytics", "Materials", "Networks", "Solutions", "Robotics", "Energy", "Biosciences",
    "Fabrication", "Distribution", "Engineering", "Capital", "Properties", "Aerospace",
    "Research",
];

const NAME_SUFFIXES: [&str; 8] =
    ["Inc", "Corp", "Group", "Holdings", "Partners", "LLC", "Co", "Ventures"];

const HQ_CITIES: [&str; 20] = [
    "Austin, TX", "Denver, CO", "Seattle, WA", "Atlanta, GA", "Chicago, IL", "Boston, MA",
    "Phoenix, AZ", "Portland, OR", "Nashville, TN", "Charlotte, NC", "Columbus, OH",
    "San Diego, CA", "Minneapolis, MN", "Tampa, FL", "Salt Lake City, UT", "Raleigh, NC",
    "Kansas City, MO", "Pittsburgh, PA", "Indianapolis, IN", "Sacramento, CA",
];

fn company_name(rng: &mut impl Rng) -> String {
    let prefix = NAME_PREFIXES.choose(rng).expect("non-empty list");
    let stem = NAME_STEMS.choose(rng).expect("non-empty list");
    // Roughly half the names carry a corporate suffix.
    if rng.random_bool(0.5) {
        let suffix = NAME_SUFFIXES.choose(rng).expect("non-empty list");
        format!("{prefix} {stem} {suffix}")
    } else {
        format!("{prefix} {stem}")
    }
}

/// Synthesize the prospect universe: `n` companies with size-conditioned
/// headcount and revenue. Same RNG state, same companies.
pub fn generate_companies(n: usize, rng: &mut impl Rng) -> Vec<Company> {
    (0..n)
        .map(|i| {
            let industry = *INDUSTRIES.choose(rng).expect("non-empty list");
            let size = *CompanySize::ALL.choose(rng).expect("non-empty list");
            let (emp_lo, emp_hi) = size.employee_range();
            let (rev_lo, rev_hi) = size.revenue_range();

            Company {
                id: CompanyId(i as u32 + 1),
                name: company_name(rng),
                industry,
                size,
                employees: rng.random_range(emp_lo..=emp_hi),
                annual_revenue: rng.random_range(rev_lo..=rev_hi),
                founded: rng.random_range(2000..=2022),
                headquarters: HQ_CITIES.choose(rng).expect("non-empty list").to_string(),
                risk_profile: *RISK_PROFILES.choose(rng).expect("non-empty list"),
                credit_rating: *CREDIT_RATINGS.choose(rng).expect("non-empty list"),
                previous_claims: rng.random_range(0..=8),
                market_position: *MARKET_POSITIONS.choose(rng).expect("non-empty list"),
                growth_rate: (rng.random_range(-0.1f64..0.4) * 1000.0).round() / 1000.0,
                technology_adoption: *TECHNOLOGY_ADOPTION.choose(rng).expect("non-empty list"),
            }
        })
        .collect()
}

/// The policy book writes against a fixed client roster rather than the
/// synthesized prospect universe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientCompany {
    pub name: &'static str,
    pub industry: &'static str,
    pub size: CompanySize,
    pub revenue: u64,
}

pub fn client_roster() -> Vec<ClientCompany> {
    use CompanySize::*;
    vec![
        ClientCompany { name: "TechNova Solutions", industry: "Technology", size: Enterprise, revenue: 50_000_000 },
        ClientCompany { name: "Quantum Dynamics Corp", industry: "Manufacturing", size: Fortune500, revenue: 200_000_000 },
        ClientCompany { name: "Stellar Manufacturing", industry: "Manufacturing", size: MidMarket, revenue: 25_000_000 },
        ClientCompany { name: "EcoFlow Industries", industry: "Energy", size: Enterprise, revenue: 75_000_000 },
        ClientCompany { name: "CyberShield Security", industry: "Technology", size: MidMarket, revenue: 30_000_000 },
        ClientCompany { name: "NextGen Robotics", industry: "Technology", size: Startup, revenue: 5_000_000 },
        ClientCompany { name: "BioTech Innovations", industry: "Healthcare", size: Enterprise, revenue: 100_000_000 },
        ClientCompany { name: "CloudFirst Systems", industry: "Technology", size: MidMarket, revenue: 20_000_000 },
        ClientCompany { name: "DataStream Analytics", industry: "Technology", size: SmallBusiness, revenue: 8_000_000 },
        ClientCompany { name: "GreenTech Ventures", industry: "Energy", size: MidMarket, revenue: 35_000_000 },
        ClientCompany { name: "Digital Frontier Inc", industry: "Technology", size: Enterprise, revenue: 60_000_000 },
        ClientCompany { name: "SmartGrid Technologies", industry: "Energy", size: Enterprise, revenue: 80_000_000 },
        ClientCompany { name: "FusionPoint Energy", industry: "Energy", size: Fortune500, revenue: 300_000_000 },
        ClientCompany { name: "NanoTech Materials", industry: "Manufacturing", size: MidMarket, revenue: 40_000_000 },
        ClientCompany { name: "AeroSpace Dynamics", industry: "Aerospace", size: Enterprise, revenue: 120_000_000 },
        ClientCompany { name: "PharmaCore Research", industry: "Healthcare", size: Enterprise, revenue: 90_000_000 },
        ClientCompany { name: "AgriTech Solutions", industry: "Agriculture", size: MidMarket, revenue: 22_000_000 },
        ClientCompany { name: "MetaVerse Industries", industry: "Technology", size: Startup, revenue: 12_000_000 },
        ClientCompany { name: "BlockChain Systems", industry: "Technology", size: MidMarket, revenue: 28_000_000 },
        ClientCompany { name: "AI-Powered Logistics", industry: "Logistics", size: Enterprise, revenue: 65_000_000 },
    ]
}

/// Contact names for the decision-maker field. Built from the same curated
/// list approach as company names.
const FIRST_NAMES: [&str; 24] = [
    "Alice", "Brian", "Carmen", "Derek", "Elaine", "Felix", "Grace", "Hector", "Irene", "Jonas",
    "Karen", "Liam", "Maya", "Nolan", "Olivia", "Patrick", "Quinn", "Rosa", "Stefan", "Tara",
    "Umar", "Vera", "Wesley", "Yvonne",
];

const LAST_NAMES: [&str; 24] = [
    "Anderson", "Bennett", "Castillo", "Donovan", "Ellis", "Ferreira", "Grant", "Huang",
    "Ibrahim", "Jensen", "Kowalski", "Lindgren", "Moreau", "Novak", "Okafor", "Petrov",
    "Quintana", "Reyes", "Sandoval", "Takahashi", "Ueda", "Vargas", "Whitfield", "Zimmerman",
];

pub fn contact_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).expect("non-empty list");
    let last = LAST_NAMES.choose(rng).expect("non-empty list");
    format!("{first} {last}")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    #[test]
    fn same_seed_produces_identical_universe() {
        let a = generate_companies(100, &mut rng());
        let b = generate_companies(100, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn headcount_and_revenue_respect_size_tier() {
        for company in generate_companies(500, &mut rng()) {
            let (emp_lo, emp_hi) = company.size.employee_range();
            let (rev_lo, rev_hi) = company.size.revenue_range();
            assert!(
                (emp_lo..=emp_hi).contains(&company.employees),
                "{}: {} employees outside tier range",
                company.name,
                company.employees
            );
            assert!((rev_lo..=rev_hi).contains(&company.annual_revenue));
        }
    }

    #[test]
    fn growth_rate_is_bounded_and_rounded() {
        for company in generate_companies(500, &mut rng()) {
            assert!(company.growth_rate >= -0.1 && company.growth_rate <= 0.4);
            let scaled = company.growth_rate * 1000.0;
            assert!((scaled - scaled.round()).abs() < 1e-6, "not rounded to 3 dp");
        }
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let companies = generate_companies(10, &mut rng());
        let ids: Vec<u32> = companies.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn client_roster_has_twenty_fixed_entries() {
        assert_eq!(client_roster().len(), 20);
    }
}
