use chrono::NaiveDate;

/// Floor for a generated opportunity value (USD).
pub const MIN_OPPORTUNITY_VALUE: u64 = 10_000;
/// Cap for a generated opportunity value (USD).
pub const MAX_OPPORTUNITY_VALUE: u64 = 5_000_000;

/// Average deal size the per-rep deal-size factor is normalized against (USD).
pub const DEAL_SIZE_NORMALIZATION: f64 = 200_000.0;

/// Opportunities may be created up to this many days past `today`.
pub const FUTURE_WINDOW_DAYS: i64 = 180;

/// How far back the policy book reaches (two 365-day years).
pub const POLICY_LOOKBACK_DAYS: i64 = 730;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub opportunity_count: usize,
    pub policy_count: usize,
    /// First day an opportunity or policy may be created.
    pub window_start: NaiveDate,
    /// Fixed "as of" anchor. Every elapsed-time field (days in stage, days to
    /// close, record age) is measured against this date, never the wall
    /// clock, so regeneration is byte-identical regardless of when it runs.
    pub today: NaiveDate,
}

impl GeneratorConfig {
    /// The canonical demo book: the constants the original dashboards shipped
    /// with, plus a pinned `today`.
    pub fn canonical() -> Self {
        GeneratorConfig {
            seed: 42,
            opportunity_count: 15_000,
            policy_count: 2_000,
            window_start: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
            today: NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
        }
    }

    /// Last day an opportunity may be created (`today` + 180 days — the book
    /// includes deals logged for future quarters).
    pub fn window_end(&self) -> NaiveDate {
        self.today + chrono::Duration::days(FUTURE_WINDOW_DAYS)
    }

    /// Width of the creation window in days.
    pub fn window_days(&self) -> i64 {
        (self.window_end() - self.window_start).num_days()
    }

    /// Earliest creation date for the policy book.
    pub fn policy_window_start(&self) -> NaiveDate {
        self.today - chrono::Duration::days(POLICY_LOOKBACK_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_window_spans_start_to_today_plus_180() {
        let config = GeneratorConfig::canonical();
        assert_eq!(config.window_start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(
            config.window_end(),
            config.today + chrono::Duration::days(180)
        );
        assert!(config.window_days() > 365);
    }

    #[test]
    fn policy_window_reaches_back_two_years() {
        let config = GeneratorConfig::canonical();
        assert_eq!(
            (config.today - config.policy_window_start()).num_days(),
            730
        );
    }
}
