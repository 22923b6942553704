use clap::{Args, Parser, Subcommand};
use formguard::fit::{project_rates, FitReport, FitRequest, Sweep};
use formguard::{Decision, FormGuard, FormSnapshot, GuardConfig, LogisticCurve};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(
    about = "Form Guard CLI - Check logistic projection inputs the way the page guard does"
)]
struct Cli {
    /// JSON guard configuration (alert message, form selector, peak year range)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Raw field texts, exactly as typed into the form
#[derive(Args)]
struct FieldArgs {
    /// Initial cumulative quantity (Q0)
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    q0: String,

    /// Ultimate cumulative quantity (Qmax)
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    qmax: String,

    /// Growth rate (r)
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    r: String,

    /// Peak year (tp)
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    tp: String,
}

impl FieldArgs {
    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::from_texts(&self.q0, &self.qmax, &self.r, &self.tp)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a submission would be allowed
    Check {
        #[command(flatten)]
        fields: FieldArgs,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the logistic curve for valid inputs
    Curve {
        #[command(flatten)]
        fields: FieldArgs,

        /// First sampled year
        #[arg(long, default_value_t = 2000, allow_hyphen_values = true)]
        from: i32,

        /// Last sampled year
        #[arg(long, default_value_t = 2100, allow_hyphen_values = true)]
        to: i32,
    },
    /// Fit peak year and total storage to a target storage rate
    Fit(FitArgs),
}

#[derive(Args)]
struct FitArgs {
    /// Year the starting storage was observed
    #[arg(long)]
    start_year: f64,

    /// Cumulative storage in the starting year
    #[arg(long)]
    start_q: f64,

    /// Year the target rate must be met
    #[arg(long)]
    target_year: f64,

    /// Storage rate required in the target year
    #[arg(long)]
    target_s: f64,

    /// Peak year grid (format: start,stop,count)
    #[arg(long)]
    peak_years: Sweep,

    /// Total storage grid, log-spaced (format: start,stop,count)
    #[arg(long)]
    totals: Sweep,

    /// Growth rates to fit (format: r1,r2,...)
    #[arg(long)]
    rates: String,

    /// Slope of the historical cumulative storage trend
    #[arg(long)]
    w: f64,

    /// Year the projected storage rates start
    #[arg(long)]
    year_rate_change: i32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => GuardConfig::from_path(path)?,
        None => GuardConfig::default(),
    };
    let guard = FormGuard::with_config(config)?;

    match &cli.command {
        Commands::Check { fields, json } => handle_check(&guard, fields, *json),
        Commands::Curve { fields, from, to } => handle_curve(&guard, fields, *from, *to),
        Commands::Fit(args) => handle_fit(args),
    }
}

fn handle_check(
    guard: &FormGuard,
    fields: &FieldArgs,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let decision = guard.check(&fields.snapshot());

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        match &decision {
            Decision::Allow { values } => {
                println!(
                    "allowed: Q0={} Qmax={} r={} tp={}",
                    values.q0, values.qmax, values.r, values.tp
                );
            }
            Decision::Block { violations } => {
                println!("blocked: {}", guard.config().alert_message);
                for violation in violations.iter() {
                    println!("  - {violation}");
                }
            }
        }
    }

    Ok(if decision.is_allowed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn handle_curve(
    guard: &FormGuard,
    fields: &FieldArgs,
    from: i32,
    to: i32,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let values = guard.require_valid(&fields.snapshot())?;
    let curve = LogisticCurve::with_rules(values, &guard.config().rules())?;

    let output = serde_json::json!({
        "summary": curve.summary(),
        "points": curve.sample(from, to),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(ExitCode::SUCCESS)
}

fn handle_fit(args: &FitArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let request = FitRequest {
        start_year: args.start_year,
        start_q: args.start_q,
        target_year: args.target_year,
        target_s: args.target_s,
        peak_years: args.peak_years,
        totals: args.totals,
        rates: formguard::fit::parse_list(&args.rates)?,
    };

    let results = request.fit()?;
    let projections = project_rates(&results, args.w, args.year_rate_change);
    let report = FitReport::new(&results, &projections);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::SUCCESS)
}
