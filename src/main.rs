use std::fs::File;
use std::io::{BufWriter, Write};

use opphub::analysis::{self, DistStats, PipelineSummary};
use opphub::catalog::Stage;
use opphub::config::GeneratorConfig;
use opphub::filter::OpportunityFilter;
use opphub::insights::pattern_insights;
use opphub::opportunity::{self, Opportunity};
use opphub::team::sales_team;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut seed_override: Option<u64> = None;
    let mut count_override: Option<usize> = None;
    let mut output_path = "opportunities.ndjson".to_string();
    let mut quiet = false;
    let mut runs: Option<u64> = None;
    let mut output_dir_opt: Option<String> = None;

    let mut filter = OpportunityFilter::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed_override = Some(args[i].parse().expect("--seed requires a u64"));
            }
            "--count" => {
                i += 1;
                count_override =
                    Some(args[i].parse().expect("--count requires a positive integer"));
            }
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--rep" => {
                i += 1;
                filter.rep_name = Some(args[i].clone());
            }
            "--stage" => {
                i += 1;
                let stage = parse_stage(&args[i])
                    .unwrap_or_else(|| panic!("unknown stage: {}", args[i]));
                filter.stages.push(stage);
            }
            "--min-value" => {
                i += 1;
                filter.min_value = Some(args[i].parse().expect("--min-value requires a u64"));
            }
            "--max-value" => {
                i += 1;
                filter.max_value = Some(args[i].parse().expect("--max-value requires a u64"));
            }
            "--quiet" => quiet = true,
            "--runs" => {
                i += 1;
                runs = Some(args[i].parse().expect("--runs requires a positive integer"));
            }
            "--output-dir" => {
                i += 1;
                output_dir_opt = Some(args[i].clone());
            }
            _ => {}
        }
        i += 1;
    }

    let mut base_config = GeneratorConfig::canonical();
    let start_seed = seed_override.unwrap_or(base_config.seed);
    if let Some(n) = count_override {
        base_config.opportunity_count = n;
    }

    if let Some(n) = runs {
        use rayon::prelude::*;

        if let Some(ref dir) = output_dir_opt {
            std::fs::create_dir_all(dir).expect("failed to create output directory");
        }

        let summaries: Vec<PipelineSummary> = (0u64..n)
            .into_par_iter()
            .map(|i| {
                let seed = start_seed + i;
                let mut config = base_config.clone();
                config.seed = seed;
                let book = opportunity::generate(&config);
                let view = filter.apply(&book);

                if let Some(ref dir) = output_dir_opt {
                    let path = format!("{dir}/opportunities_seed_{seed}.ndjson");
                    write_ndjson(&view, &path);
                    if !quiet {
                        println!("Seed {seed}: {} rows → {path}", view.len());
                    }
                }

                analysis::summarize(&view)
            })
            .collect();

        if !quiet {
            print_run_table(&summaries, start_seed);
            if n < 2 {
                eprintln!("Warning: Distribution requires >= 2 runs");
            } else {
                print_run_distributions(&summaries, n);
            }
        }
    } else {
        let mut config = base_config;
        config.seed = start_seed;

        let book = opportunity::generate(&config);
        let view = filter.apply(&book);
        write_ndjson(&view, &output_path);

        if !quiet {
            println!("Rows written: {} of {} generated", view.len(), book.len());
            print_analysis(&book, &view);
        }
    }
}

fn parse_stage(s: &str) -> Option<Stage> {
    match s {
        "Lead" => Some(Stage::Lead),
        "Qualified" => Some(Stage::Qualified),
        "Needs Analysis" => Some(Stage::NeedsAnalysis),
        "Proposal" => Some(Stage::Proposal),
        "Negotiation" => Some(Stage::Negotiation),
        "Verbal Commitment" => Some(Stage::VerbalCommitment),
        "Closed Won" => Some(Stage::ClosedWon),
        "Closed Lost" => Some(Stage::ClosedLost),
        _ => None,
    }
}

fn write_ndjson(view: &[&Opportunity], path: &str) {
    let file =
        File::create(path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
    let mut writer = BufWriter::new(file);
    for opp in view {
        serde_json::to_writer(&mut writer, opp).expect("failed to serialize row");
        writeln!(writer).expect("failed to write newline");
    }
}

fn print_analysis(book: &[Opportunity], view: &[&Opportunity]) {
    const USD_PER_MUSD: f64 = 1_000_000.0;

    let summary = analysis::summarize(view);

    println!("\n=== Pipeline summary ===");
    println!("  Opportunities:    {}", summary.count);
    println!("  Total value:      ${:.2}M", summary.total_value as f64 / USD_PER_MUSD);
    println!("  Weighted value:   ${:.2}M", summary.weighted_value as f64 / USD_PER_MUSD);
    println!("  Avg value:        ${:.0}", summary.avg_value());
    println!("  Hot (temp ≥ 80):  {}", summary.hot_count);
    println!("  Win rate:         {:.1}%", summary.win_rate() * 100.0);

    // ── Stage funnel ─────────────────────────────────────────────────────────
    println!("\n=== Stage funnel ===");
    println!(
        "{:>20} | {:>6} | {:>10} | {:>12}",
        "Stage", "Count", "Value(M)", "Weighted(M)"
    );
    println!("{}", "-".repeat(20 + 3 + 6 + 3 + 10 + 3 + 12));
    for slice in analysis::stage_funnel(view) {
        println!(
            "{:>20} | {:>6} | {:>10.2} | {:>12.2}",
            slice.stage.to_string(),
            slice.count,
            slice.total_value as f64 / USD_PER_MUSD,
            slice.weighted_value as f64 / USD_PER_MUSD,
        );
    }

    // ── Rep leaderboard ──────────────────────────────────────────────────────
    println!("\n=== Rep leaderboard ===");
    println!(
        "{:>4} | {:<18} | {:>6} | {:>10} | {:>12} | {:>4}",
        "Rank", "Rep", "Count", "Value(M)", "Weighted(M)", "Won"
    );
    for (rank, rep) in analysis::rep_leaderboard(view).iter().enumerate() {
        println!(
            "{:>4} | {:<18} | {:>6} | {:>10.2} | {:>12.2} | {:>4}",
            rank + 1,
            rep.rep_name,
            rep.count,
            rep.total_value as f64 / USD_PER_MUSD,
            rep.weighted_value as f64 / USD_PER_MUSD,
            rep.won_count,
        );
    }

    // ── Product mix ──────────────────────────────────────────────────────────
    println!("\n=== Product mix ===");
    for slice in analysis::product_mix(view) {
        println!(
            "  {:<24} {:>6} rows  ${:>8.2}M",
            slice.product_line,
            slice.count,
            slice.total_value as f64 / USD_PER_MUSD,
        );
    }

    if let Some(dist) = analysis::value_distribution(view) {
        println!("\n=== Value distribution ($K) ===");
        print_dist_row(&dist, 0.001);
    }

    // Insights always run over the full book, not the filtered view, so the
    // cohort comparison stays representative.
    let insights = pattern_insights(book, &sales_team());
    println!("\n=== Success patterns ===");
    println!("  Top performers:  {}", insights.top_performers.join(", "));
    println!("  Underperformers: {}", insights.underperformers.join(", "));
    println!(
        "\n{:<24} | {:>12} | {:>12} | {:>9} | {:>7}",
        "Metric", "Top avg", "Under avg", "Gap", "Gap%"
    );
    println!("{}", "-".repeat(24 + 3 + 12 + 3 + 12 + 3 + 9 + 3 + 7));
    for gap in &insights.gaps {
        println!(
            "{:<24} | {:>12.2} | {:>12.2} | {:>9.2} | {:>6.1}%",
            gap.metric.label(),
            gap.top_performer_avg,
            gap.underperformer_avg,
            gap.gap_absolute,
            gap.gap_percent,
        );
    }
}

fn print_run_table(summaries: &[PipelineSummary], start_seed: u64) {
    const USD_PER_MUSD: f64 = 1_000_000.0;

    println!("\n=== Per-Run Summary ===");
    println!(
        "{:>6} | {:>6} | {:>10} | {:>12} | {:>5} | {:>7}",
        "Seed", "Count", "Value(M)", "Weighted(M)", "Hot#", "WinR%"
    );
    println!("{}", "-".repeat(60));
    for (i, s) in summaries.iter().enumerate() {
        println!(
            "{:>6} | {:>6} | {:>10.2} | {:>12.2} | {:>5} | {:>6.1}%",
            start_seed + i as u64,
            s.count,
            s.total_value as f64 / USD_PER_MUSD,
            s.weighted_value as f64 / USD_PER_MUSD,
            s.hot_count,
            s.win_rate() * 100.0,
        );
    }
}

fn print_run_distributions(summaries: &[PipelineSummary], n_runs: u64) {
    println!("\n=== Multi-Run Distribution (N={n_runs} runs) ===");

    let sections: [(&str, f64, Vec<f64>); 3] = [
        (
            "Total value (M USD)",
            1e-6,
            summaries.iter().map(|s| s.total_value as f64).collect(),
        ),
        (
            "Weighted value (M USD)",
            1e-6,
            summaries.iter().map(|s| s.weighted_value as f64).collect(),
        ),
        ("Win rate %", 100.0, summaries.iter().map(|s| s.win_rate()).collect()),
    ];

    for (title, scale, samples) in &sections {
        if let Some(dist) = analysis::run_distribution(samples) {
            println!("\n--- {title} ---");
            print_dist_row(&dist, *scale);
        }
    }
}

fn print_dist_row(ds: &DistStats, scale: f64) {
    println!(
        "{:>7} | {:>7} | {:>7} | {:>7} | {:>7} | {:>7} | {:>7} | {:>7} | {:>7}",
        "min", "p5", "p25", "p50", "p75", "p95", "max", "mean", "stddev"
    );
    println!(
        "{:>7.1} | {:>7.1} | {:>7.1} | {:>7.1} | {:>7.1} | {:>7.1} | {:>7.1} | {:>7.1} | {:>7.1}",
        ds.min * scale,
        ds.p5 * scale,
        ds.p25 * scale,
        ds.p50 * scale,
        ds.p75 * scale,
        ds.p95 * scale,
        ds.max * scale,
        ds.mean * scale,
        ds.std_dev * scale,
    );
}
