//! driftwatch — weekly control-chart analysis of a daily amount ledger.
//!
//! Pipeline: read the daily CSV → split off the training prefix → fit the
//! baseline (mean + sample sigma) → aggregate the test rows to weekly means
//! → evaluate the eight control-chart rules → export the per-week flag
//! table as CSV.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use driftwatch_core::{config, Baseline, Config};
use driftwatch_dataset::{train_test_split, weekly_means, CsvExporter, CsvImporter};
use driftwatch_rules::{Rule, RuleEngine, WeeklyReport};

// ── CLI ─────────────────────────────────────────────────────────────

/// Flag anomalous weeks in a daily amount ledger using the eight classic
/// control-chart rules.
#[derive(Parser, Debug)]
#[command(name = "driftwatch", version, about)]
struct Cli {
    /// Path to the daily `day,week,amount` CSV ledger.
    #[arg(long, env = "DRIFTWATCH_INPUT")]
    input: Option<PathBuf>,

    /// Path the result table is written to.
    #[arg(long, env = "DRIFTWATCH_OUTPUT")]
    output: Option<PathBuf>,

    /// Number of leading daily rows used to fit the baseline.
    #[arg(long, env = "DRIFTWATCH_TRAIN_ROWS")]
    train_rows: Option<usize>,
}

impl Cli {
    /// Env/.env config with CLI flags taking precedence.
    fn into_config(self) -> Config {
        let mut cfg = Config::from_env();
        if let Some(input) = self.input {
            cfg.input = input;
        }
        if let Some(output) = self.output {
            cfg.output = output;
        }
        if let Some(train_rows) = self.train_rows {
            cfg.train_rows = train_rows;
        }
        cfg
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    config::load_dotenv();
    let cfg = Cli::parse().into_config();
    cfg.log_summary();

    let records = CsvImporter::import(&cfg.input)?;

    let (train, test) = train_test_split(&records, cfg.train_rows);
    let train_amounts: Vec<f64> = train.iter().map(|r| r.amount).collect();
    let baseline = Baseline::fit(&train_amounts)?;
    info!(
        train_rows = train.len(),
        test_rows = test.len(),
        mean = baseline.mean,
        sigma = baseline.sigma,
        "baseline fitted"
    );

    let points = weekly_means(test);
    let amounts: Vec<f64> = points.iter().map(|p| p.amount).collect();

    let matrix = RuleEngine::evaluate_all(&amounts, &baseline)?;
    let report = WeeklyReport::assemble(&points, &matrix, baseline)?;

    info!(run_id = %report.run_id, weeks = report.rows.len(), "rules applied");
    for rule in Rule::ALL {
        info!(
            rule = rule.label(),
            flagged = report.flagged_weeks(rule),
            "rule summary"
        );
    }

    CsvExporter::export(&cfg.output, &report)?;
    info!(output = %cfg.output.display(), "analysis complete");

    Ok(())
}
