//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sample_data::SampleDataGenerator;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::config_validation::validate_simulation_config;
use crate::domain::error::DcasimError;
use crate::domain::price::BasisSelection;
use crate::domain::simulation::{resolve_window, simulate, SimulationParams};
use crate::domain::summary::{summarize, Summary};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "dcasim", about = "Dollar-cost-averaging Bitcoin investment simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a daily-investment simulation
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override [simulation] daily_amount
        #[arg(long)]
        amount: Option<f64>,
        /// Override [simulation] start_date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Override [simulation] end_date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Override [simulation] days
        #[arg(long)]
        days: Option<i64>,
        /// Override [data] path
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Show information about a price data file
    Info {
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a simulation configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Generate a sample price data CSV
    SampleData {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 365)]
        days: i64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            output,
            amount,
            start,
            end,
            days,
            data,
            dry_run,
        } => run_simulate(
            &config,
            output.as_deref(),
            amount,
            start,
            end,
            days,
            data.as_ref(),
            dry_run,
        ),
        Command::Info { data, config } => run_info(data.as_ref(), config.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::SampleData { output, days, seed } => run_sample_data(&output, days, seed),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DcasimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_simulation_params(adapter: &dyn ConfigPort) -> Result<SimulationParams, DcasimError> {
    let amount_str = adapter.get_string("simulation", "daily_amount").ok_or_else(|| {
        DcasimError::ConfigMissing {
            section: "simulation".into(),
            key: "daily_amount".into(),
        }
    })?;
    let daily_amount: f64 = amount_str.parse().map_err(|_| DcasimError::ConfigInvalid {
        section: "simulation".into(),
        key: "daily_amount".into(),
        reason: "daily_amount must be a number".into(),
    })?;

    let start_date = parse_config_date(adapter, "start_date")?;
    let end_date = parse_config_date(adapter, "end_date")?;

    let days = match adapter.get_string("simulation", "days") {
        None => None,
        Some(s) => Some(s.parse::<i64>().map_err(|_| DcasimError::ConfigInvalid {
            section: "simulation".into(),
            key: "days".into(),
            reason: "days must be an integer".into(),
        })?),
    };

    Ok(SimulationParams {
        daily_amount,
        start_date,
        end_date,
        days,
    })
}

fn parse_config_date(
    adapter: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, DcasimError> {
    match adapter.get_string("simulation", key) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map(Some).map_err(|_| {
            DcasimError::ConfigInvalid {
                section: "simulation".into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }
        }),
    }
}

pub fn build_basis_selection(adapter: &dyn ConfigPort) -> Result<BasisSelection, DcasimError> {
    match adapter.get_string("data", "price_basis").as_deref() {
        None => Ok(BasisSelection::Auto),
        Some(s) => match s.to_lowercase().as_str() {
            "auto" => Ok(BasisSelection::Auto),
            "adjusted" => Ok(BasisSelection::AdjustedClose),
            "close" => Ok(BasisSelection::Close),
            _ => Err(DcasimError::ConfigInvalid {
                section: "data".into(),
                key: "price_basis".into(),
                reason: "price_basis must be one of auto, adjusted, close".into(),
            }),
        },
    }
}

/// Resolve the price data file: an explicit CLI path wins, then
/// `[data] path`, then the first existing entry of `[data] candidates`.
pub fn resolve_data_adapter(
    data_override: Option<&PathBuf>,
    adapter: &dyn ConfigPort,
) -> Result<CsvDataAdapter, DcasimError> {
    if let Some(path) = data_override {
        return Ok(CsvDataAdapter::new(path.clone()));
    }
    if let Some(path) = adapter.get_string("data", "path") {
        let path = path.trim();
        if !path.is_empty() {
            return Ok(CsvDataAdapter::new(PathBuf::from(path)));
        }
    }
    let candidates: Vec<PathBuf> = adapter
        .get_list("data", "candidates")
        .into_iter()
        .map(PathBuf::from)
        .collect();
    if candidates.is_empty() {
        return Err(DcasimError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        });
    }
    CsvDataAdapter::discover(&candidates)
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    config_path: &PathBuf,
    output_path: Option<&std::path::Path>,
    amount_override: Option<f64>,
    start_override: Option<NaiveDate>,
    end_override: Option<NaiveDate>,
    days_override: Option<i64>,
    data_override: Option<&PathBuf>,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate config
    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build params, apply CLI overrides
    let mut params = match build_simulation_params(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Some(amount) = amount_override {
        params.daily_amount = amount;
    }
    if let Some(start) = start_override {
        params.start_date = Some(start);
    }
    if let Some(end) = end_override {
        params.end_date = Some(end);
    }
    if let Some(days) = days_override {
        params.days = Some(days);
    }

    let selection = match build_basis_selection(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if dry_run {
        eprintln!("Config validated successfully");
        eprintln!("\nSimulation parameters:");
        eprintln!("  daily_amount: ${:.2}", params.daily_amount);
        match params.start_date {
            Some(d) => eprintln!("  start_date:   {}", d),
            None => eprintln!("  start_date:   (first date in series)"),
        }
        match (params.days, params.end_date) {
            (Some(days), _) => eprintln!("  window:       {} days from start", days),
            (None, Some(d)) => eprintln!("  end_date:     {}", d),
            (None, None) => eprintln!("  end_date:     (last date in series)"),
        }
        return ExitCode::SUCCESS;
    }

    // Stage 4: Load price data
    let data_port = match resolve_data_adapter(data_override, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loading price data from {}", data_port.path().display());

    let series = match data_port.load_series(selection) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => {
            eprintln!(
                "Loaded {} records, {} to {}, using {} prices",
                series.len(),
                first,
                last,
                series.basis(),
            );
        }
        _ => {
            let e = DcasimError::Data {
                reason: format!("{} holds no price rows", data_port.path().display()),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    // Stage 5: Simulate
    if let Ok((start, end)) = resolve_window(&series, &params) {
        eprintln!(
            "Simulating ${:.2} daily, {} to {}",
            params.daily_amount, start, end
        );
    }
    let history = match simulate(&series, &params) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Summarize and print to stderr
    let summary = match summarize(&history) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    print_summary(&summary);

    // Stage 7: Write report
    let output = output_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("report.typ"));
    let template_path = adapter
        .get_string("report", "template_path")
        .map(PathBuf::from);

    let report = TypstReportAdapter::new(template_path);
    match report.write(&history, &summary, &output) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn print_summary(summary: &Summary) {
    eprintln!("\n=== Simulation Results ===");
    eprintln!(
        "Investment Period:  {} to {} ({} days)",
        summary.start_date, summary.end_date, summary.investment_days
    );
    eprintln!("Price Basis:        {}", summary.price_basis);
    eprintln!("Total Invested:     ${:.2}", summary.total_invested);
    eprintln!("Bitcoin Acquired:   {:.6} BTC", summary.total_btc_acquired);
    eprintln!("Average BTC Price:  ${:.2}", summary.average_btc_price);
    eprintln!("Portfolio Value:    ${:.2}", summary.final_portfolio_value);
    eprintln!("Total Return:       ${:.2}", summary.total_return);
    eprintln!("Return Percentage:  {:.2}%", summary.return_pct);
    eprintln!("Final BTC Price:    ${:.2}", summary.final_btc_price);
    eprintln!("\n=== Additional Insights ===");
    eprintln!(
        "Avg Daily Return:   {:.4}%",
        summary.average_daily_return_pct()
    );
    eprintln!(
        "Annualized Return:  {:.2}%",
        summary.annualized_return_pct()
    );
}

fn run_info(data: Option<&PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => a,
            Err(code) => return code,
        },
        None => match FileConfigAdapter::from_string("") {
            Ok(a) => a,
            Err(_) => return ExitCode::from(2),
        },
    };

    if data.is_none() && config_path.is_none() {
        eprintln!("error: provide --data or --config");
        return ExitCode::from(2);
    }

    let data_port = match resolve_data_adapter(data, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let selection = match build_basis_selection(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match data_port.load_series(selection) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Data file: {}", data_port.path().display());
    match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => {
            eprintln!("  Records:      {}", series.len());
            eprintln!("  Date range:   {} to {}", first, last);
            eprintln!("  Price basis:  {}", series.basis());
            if let Some(latest) = series.latest_close() {
                eprintln!("  Latest close: ${:.2}", latest);
            }
            if let Some((min, max)) = series.close_range() {
                eprintln!("  Close range:  ${:.2} to ${:.2}", min, max);
            }
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("  No price rows.");
            ExitCode::from(5)
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");
    ExitCode::SUCCESS
}

fn run_sample_data(output: &PathBuf, days: i64, seed: Option<u64>) -> ExitCode {
    let mut generator = SampleDataGenerator::new(days);
    if let Some(seed) = seed {
        generator = generator.with_seed(seed);
    }

    eprintln!("Creating sample Bitcoin data for {} days...", days);
    let end_date = chrono::Local::now().date_naive();

    match generator.write_csv(output, end_date) {
        Ok(points) => {
            let low = points.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);
            let high = points
                .iter()
                .map(|p| p.high)
                .fold(f64::NEG_INFINITY, f64::max);
            eprintln!("Sample data saved to {}", output.display());
            eprintln!("  Records:     {}", points.len());
            eprintln!("  Price range: ${:.2} to ${:.2}", low, high);
            if let Some(last) = points.last() {
                eprintln!("  Final close: ${:.2}", last.close);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
