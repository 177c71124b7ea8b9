use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;

use headcount::error::AppError;
use headcount::workflows::roster::{RosterImportError, RosterImporter};
use headcount::workflows::scenario::domain::CapTable;
use headcount::workflows::scenario::report::selection_csv;
use headcount::workflows::scenario::{ScenarioEngine, ScenarioOutcome, ScoreWeights};

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Roster CSV export to score
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Target headcount to retain
    #[arg(long)]
    pub(crate) target: usize,
    /// Compensation weight (defaults to 1.0)
    #[arg(long)]
    pub(crate) comp_weight: Option<f64>,
    /// Tenure weight (defaults to 0.5)
    #[arg(long)]
    pub(crate) tenure_weight: Option<f64>,
    /// Seniority (level) weight (defaults to 1.0)
    #[arg(long)]
    pub(crate) level_weight: Option<f64>,
    /// Direct-reports weight (defaults to 0.5)
    #[arg(long)]
    pub(crate) reports_weight: Option<f64>,
    /// Equity weight (defaults to 0.2)
    #[arg(long)]
    pub(crate) equity_weight: Option<f64>,
    /// Cap table JSON with total_shares_outstanding, for share grants
    #[arg(long)]
    pub(crate) cap_table: Option<PathBuf>,
    /// Reporting date anchoring tenure (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Write the selection as CSV to this path
    #[arg(long)]
    pub(crate) csv_out: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Target headcount for the sample roster (defaults to 5)
    #[arg(long)]
    pub(crate) target: Option<usize>,
    /// Reporting date anchoring tenure (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        roster,
        target,
        comp_weight,
        tenure_weight,
        level_weight,
        reports_weight,
        equity_weight,
        cap_table,
        today,
        csv_out,
    } = args;

    let defaults = ScoreWeights::default();
    let weights = ScoreWeights {
        compensation: comp_weight.unwrap_or(defaults.compensation),
        tenure: tenure_weight.unwrap_or(defaults.tenure),
        seniority: level_weight.unwrap_or(defaults.seniority),
        direct_reports: reports_weight.unwrap_or(defaults.direct_reports),
        equity: equity_weight.unwrap_or(defaults.equity),
    };

    let snapshot = RosterImporter::from_path(&roster)?;
    let cap_table = cap_table
        .as_deref()
        .and_then(crate::infra::load_cap_table_from_path);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let outcome = ScenarioEngine::new(weights).plan(&snapshot, target, cap_table.as_ref(), today);
    render_scenario(&outcome, today);

    if let Some(path) = csv_out {
        let exported = selection_csv(&outcome).map_err(RosterImportError::from)?;
        std::fs::write(&path, exported)?;
        println!("\nSelection written to {}.", path.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let target = args.target.unwrap_or(5);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("Headcount scenario demo (sample roster)");
    let snapshot = RosterImporter::from_reader(SAMPLE_ROSTER.as_bytes())?;
    let outcome =
        ScenarioEngine::with_default_weights().plan(&snapshot, target, None, today);
    render_scenario(&outcome, today);

    Ok(())
}

fn render_scenario(outcome: &ScenarioOutcome, today: NaiveDate) {
    let summary = &outcome.summary;
    println!("\nScenario as of {today}");
    println!(
        "  Selected headcount:   {}/{}",
        summary.selected, summary.total_available
    );
    println!("  Total compensation:   {}", fmt_usd(summary.total_comp_usd));
    println!("  Average compensation: {}", fmt_usd(summary.average_comp_usd));
    println!("  Median compensation:  {}", fmt_usd(summary.median_comp_usd));
    println!(
        "  Equity basis:         {} ({})",
        outcome.equity.classification.label(),
        outcome.equity.scale_label
    );

    if outcome.selection.is_empty() {
        println!("\nNo employees selected for this target headcount.");
        return;
    }

    println!("\nSelected employees:");
    for (rank, scored) in outcome.selection.iter().enumerate() {
        let person = &scored.person;
        println!(
            "  {:>2}. {} {} ({}) {} equity {:.2} score {:.3}",
            rank + 1,
            person.employee_id,
            if person.name.is_empty() { "-" } else { person.name.as_str() },
            if person.role.is_empty() { "-" } else { person.role.as_str() },
            fmt_usd(person.comp_usd),
            scored.equity_pct,
            scored.impact_score
        );
    }
}

/// `$1,234,567` style formatting, negatives included.
fn fmt_usd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

const SAMPLE_ROSTER: &str = "\
employee_id,name,role,department,location,comp_usd,reports_to,start_date,level,equity_pct
E001,Morgan Reyes,CEO,Executive,NYC,320000,,2015-02-01,C-Level,8.0
E002,Priya Natarajan,VP Engineering,Engineering,NYC,265000,E001,2016-07-18,VP,2.5
E003,Daniel Okafor,Director of Sales,Sales,Austin,210000,E001,2018-03-05,Director,1.2
E004,Sofia Lindqvist,Staff Engineer,Engineering,Remote,195000,E002,2017-10-09,Staff,0.9
E005,Jonas Weber,Senior Engineer,Engineering,Berlin,150000,E004,2020-01-13,Senior,0.4
E006,Amara Diallo,Engineering Manager,Engineering,NYC,175000,E002,2019-05-27,Manager,0.5
E007,Lucas Meyer,Account Executive,Sales,Austin,120000,E003,2022-08-15,Mid,0.1
E008,Hannah Cho,Senior Designer,Design,Remote,140000,E002,2021-04-19,Senior,0.2
E009,Mateo Alvarez,Support Engineer,Support,Austin,95000,E006,2023-06-01,Junior,0.05
E010,Ella Novak,Recruiter,People,NYC,105000,E001,2024-02-12,Mid,0.05
";
