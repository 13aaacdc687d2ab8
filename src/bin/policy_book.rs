use std::env;

use opphub::analysis::{producer_scorecards, summarize_book};
use opphub::config::GeneratorConfig;
use opphub::policy::{PolicyRecord, generate};

fn main() {
    let mut config = GeneratorConfig::canonical();

    if let Some(n) = env::args().nth(1).and_then(|s| s.parse().ok()) {
        config.policy_count = n;
    }

    let book = generate(&config);

    // Write NDJSON to stdout.
    for policy in &book {
        println!("{}", serde_json::to_string(policy).expect("serialisation failed"));
    }

    // Book and per-producer summary to stderr.
    let view: Vec<&PolicyRecord> = book.iter().collect();
    let summary = summarize_book(&view);
    eprintln!(
        "policy_book: {} policies, ${:.2}M premium, ${:.2}M commission, bind rate {:.1}%",
        summary.policy_count,
        summary.total_premium as f64 / 1_000_000.0,
        summary.total_commission as f64 / 1_000_000.0,
        summary.bind_rate() * 100.0,
    );

    for card in producer_scorecards(&view) {
        eprintln!(
            "  producer={:<18} region={:<9} policies={:>4}  premium=${:>6.2}M  commission=${:>5.2}M  active={:>4}  csat={:.2}",
            card.producer_name,
            card.region,
            card.policy_count,
            card.total_premium as f64 / 1_000_000.0,
            card.total_commission as f64 / 1_000_000.0,
            card.active_count,
            card.avg_satisfaction(),
        );
    }
}
