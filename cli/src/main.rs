//! Vogel Transport CLI
//!
//! Reads a problem file, runs the allocator and prints the plan.
//!
//! ```text
//! vogel-transport problem.json --currency €
//! vogel-transport problem.json --tolerance 0.001 --json
//! ```
//!
//! Problem file:
//!
//! ```json
//! { "supply": [20, 30], "demand": [25, 25], "cost": [[4, 6], [5, 3]], "currency": "€" }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use vogel_transport_core_rs::{Allocator, AllocatorConfig, PlanReport, TransportProblem};

#[derive(Parser, Debug)]
#[command(author, version, about = "Initial transport plan by Vogel's Approximation Method", long_about = None)]
struct Args {
    /// JSON file with `supply`, `demand` and `cost`
    #[arg(required = true)]
    problem: PathBuf,

    /// Override the exhaustion tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Currency symbol shown next to costs
    #[arg(long)]
    currency: Option<String>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Problem file contents: the problem plus optional run settings
#[derive(Deserialize, Debug)]
struct ProblemFile {
    #[serde(flatten)]
    problem: TransportProblem,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    tolerance: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.problem)
        .with_context(|| format!("reading {}", args.problem.display()))?;
    let file: ProblemFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.problem.display()))?;

    let mut config = AllocatorConfig::default();
    if let Some(tolerance) = args.tolerance.or(file.tolerance) {
        config.tolerance = tolerance;
    }
    let currency = args.currency.or(file.currency).unwrap_or_default();

    log::info!(
        "{:<32}{} origins x {} destinations",
        "allocating",
        file.problem.num_origins(),
        file.problem.num_destinations()
    );
    if !file.problem.is_balanced(config.tolerance) {
        log::warn!(
            "supply ({}) and demand ({}) differ; the remainder will stay unallocated",
            file.problem.total_supply(),
            file.problem.total_demand()
        );
    }

    let allocator = Allocator::new(config)?;
    let result = allocator.run(&file.problem)?;
    let report = PlanReport::build(&file.problem, allocator.config(), &result, currency)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", render_table(&report, allocator.tolerance()));
    }
    Ok(())
}

/// Plain-text allocation table followed by the headline figures.
/// Leftovers at or below `tolerance` count as shipped.
fn render_table(report: &PlanReport, tolerance: f64) -> String {
    let cells: Vec<Vec<String>> = report
        .allocation
        .rows()
        .iter()
        .map(|row| row.iter().map(|q| format_quantity(*q)).collect())
        .collect();

    let label_width = report
        .origin_labels
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0);
    let col_widths: Vec<usize> = report
        .destination_labels
        .iter()
        .enumerate()
        .map(|(j, label)| {
            cells
                .iter()
                .map(|row| row[j].len())
                .chain(std::iter::once(label.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(label_width));
    for (label, width) in report.destination_labels.iter().zip(&col_widths) {
        out.push_str(&format!("  {:>width$}", label, width = width));
    }
    out.push('\n');

    for (label, row) in report.origin_labels.iter().zip(&cells) {
        out.push_str(&format!("{:<width$}", label, width = label_width));
        for (cell, width) in row.iter().zip(&col_widths) {
            out.push_str(&format!("  {:>width$}", cell, width = width));
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("Total cost:   {}\n", report.formatted_total_cost()));
    out.push_str(&format!("Total volume: {} units\n", format_quantity(report.total_volume)));
    if report.has_leftover(tolerance) {
        let unallocated: f64 = report.unallocated_supply.iter().sum();
        let unmet: f64 = report.unmet_demand.iter().sum();
        out.push_str(&format!(
            "Unallocated supply: {}, unmet demand: {}\n",
            format_quantity(unallocated),
            format_quantity(unmet)
        ));
    }
    out
}

/// Whole numbers without decimals, everything else with two
fn format_quantity(q: f64) -> String {
    if q.fract() == 0.0 {
        format!("{:.0}", q)
    } else {
        format!("{:.2}", q)
    }
}
