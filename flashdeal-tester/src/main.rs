mod common;
mod live;
mod logic;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use common::{report_timestamp, split_csv};
use flashdeal_engine::{DealCatalog, DealSession, EngineConfig, GeoPoint, InsightError};
use live::{LiveOptions, live_client, run_live_checks};
use logic::{LogicTester, ScenarioCtx, all_scenario_keys, get_scenario, list_scenarios};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Pure engine scenarios (fast, offline)
    Logic,
    /// Ask the hosted AI service a real question
    Live,
    /// Run both logic scenarios and live checks
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "flashdeal-tester", version)]
#[command(about = "Headless QA for the flash deal engine - logic scenarios and live AI checks")]
struct Args {
    /// Test mode: logic (offline), live (hosted AI), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format; csv writes a per-tick walk trace
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Engine configuration JSON (defaults to the bundled one)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Question for the live check (defaults to the page's canned question)
    #[arg(long)]
    question: Option<String>,

    /// Latitude for a location-grounded live question
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude for a location-grounded live question
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Also request a generated image with this prompt in live mode
    #[arg(long)]
    image_prompt: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn location(&self) -> Result<Option<GeoPoint>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => GeoPoint::checked(lat, lng)
                .map(Some)
                .with_context(|| format!("location {lat},{lng} is out of range")),
            _ => Ok(None),
        }
    }

    fn live_options(&self) -> Result<LiveOptions> {
        Ok(LiveOptions {
            question: self.question.clone(),
            location: self.location()?,
            image_prompt: self.image_prompt.clone(),
            verbose: self.verbose,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let ctx = ScenarioCtx {
        catalog: DealCatalog::load_from_static().context("loading bundled deal catalog")?,
        config: load_config(args.config.as_deref())?,
    };
    let scenarios = expand_scenarios(&args.scenarios);

    let mut all_results = run_logic_scenarios(&args, &scenarios, &ctx);
    all_results.extend(run_live(&args, &ctx).await?);

    write_reports(&args, &all_results, &ctx, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "⚡ Flash Deal Automated Tester".bright_cyan().bold());
    println!("{}", "==============================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return EngineConfig::try_load_from_static().context("invalid bundled config");
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    EngineConfig::from_json(&raw).with_context(|| format!("invalid config in {}", path.display()))
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_scenario_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    ctx: &ScenarioCtx,
) -> Vec<logic::ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(ctx.clone(), args.verbose);
    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.push(tester.run_scenario(&scenario, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }
    results
}

async fn run_live(args: &Args, ctx: &ScenarioCtx) -> Result<Vec<logic::ScenarioResult>> {
    if !matches!(args.mode, TestMode::Live | TestMode::Both) {
        return Ok(Vec::new());
    }

    println!("{}", "🌐 Running Live Checks".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let opts = args.live_options()?;
    match live_client(ctx) {
        Ok(client) => Ok(run_live_checks(&client, ctx, &opts).await),
        Err(InsightError::MissingApiKey) => {
            eprintln!(
                "⚠️  {} not set; skipping live checks",
                "GEMINI_API_KEY".yellow()
            );
            Ok(Vec::new())
        }
        Err(err) => Err(err).context("building live client"),
    }
}

fn write_reports(
    args: &Args,
    results: &[logic::ScenarioResult],
    ctx: &ScenarioCtx,
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Flash Deal Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                let generated_at = report_timestamp(Utc::now());
                logic::reports::generate_markdown_report(
                    &mut output_target,
                    results,
                    &generated_at,
                )?;
            }
        }
        ReportFormat::Csv => {
            let rows = logic::walk_trace(DealSession::new(
                ctx.catalog.product.clone(),
                ctx.config.clone(),
            ));
            logic::reports::generate_csv_report(&mut output_target, &rows)?;
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
