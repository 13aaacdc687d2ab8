//! Deterministic synthetic data for insurance sales analytics.
//!
//! Two seeded generators back the crate: an opportunity pipeline book
//! ([`opportunity::generate`]) and a bound-policy book
//! ([`policy::generate`]). Everything downstream — filtering, funnel and
//! leaderboard rollups, success-pattern insights — is pure aggregation over
//! those rows.

pub mod analysis;
pub mod catalog;
pub mod company;
pub mod config;
pub mod filter;
pub mod insights;
pub mod opportunity;
pub mod policy;
pub mod team;
pub mod types;
