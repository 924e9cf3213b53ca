mod browser;
mod common;
mod http;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use browser::{AppPage, BrowserConfig, BrowserKind, new_session};
use common::reports::{generate_console_report, generate_json_report, generate_markdown_report};
use common::scenario::{ALL_SCENARIOS, ScenarioCtx, get_scenario, list_scenarios};
use common::{ApiRunner, ApiTarget, ScenarioResult, artifacts_dir, capture_artifacts, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TestMode {
    /// In-memory sandbox backend, no network
    Logic,
    /// A running gateway reached over HTTP
    Api,
    /// The deployed web app driven through WebDriver
    Browser,
    All,
}

impl TestMode {
    const fn includes(self, other: Self) -> bool {
        matches!(self, Self::All) || self as u8 == other as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Console,
    Json,
    Markdown,
}

impl ReportFormat {
    fn write(self, out: &mut dyn Write, results: &[ScenarioResult], elapsed: Duration) -> Result<()> {
        match (self, results.is_empty()) {
            (Self::Json, true) => writeln!(out, "[]")?,
            (Self::Json, false) => generate_json_report(out, results)?,
            (Self::Markdown, true) => {
                writeln!(out, "# Maushold Test Results\n\n_No scenarios executed._")?;
            }
            (Self::Markdown, false) => generate_markdown_report(out, results)?,
            (Self::Console, empty) => {
                if empty {
                    writeln!(out, "No scenarios executed.")?;
                } else {
                    generate_console_report(out, results, elapsed)?;
                }
                writeln!(out, "\n🏁 Total time: {elapsed:?}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(name = "maushold-tester", version)]
#[command(about = "Automated QA for the Maushold portal - sandbox, live API and browser scenarios")]
struct Args {
    /// Where scenarios run
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Comma-separated scenario names, or `all`
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// Print the scenario catalogue and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Comma-separated seeds for the sandbox backend
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Repetitions per scenario and seed (logic and api modes)
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    #[arg(short, long)]
    verbose: bool,

    /// Write the report to this file rather than stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Gateway base URL for api mode
    #[arg(long, env = "MAUSHOLD_API_BASE_URL", default_value = "http://localhost:8000")]
    api_base_url: String,

    /// Comma-separated browsers: chrome, edge, firefox, safari
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Base URL of the deployed web app
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Where failing browser runs drop screenshots and page dumps
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Remote WebDriver hub (Selenium Grid) instead of a local driver
    #[arg(long)]
    hub: Option<String>,

    /// Show browser windows
    #[arg(long)]
    headed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }
    announce_banner();

    let started = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;

    let mut results = Vec::new();
    for target in api_targets(&args) {
        results.extend(run_api_scenarios(&args, &scenarios, &seeds, target).await);
    }
    results.extend(run_browser_scenarios(&args, &scenarios).await?);

    write_reports(&args, &results, started)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::BufWriter::new(std::io::stdout())),
    })
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut out = open_output(args.output.as_deref())?;
    writeln!(out, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(out, "  {key:20} - {description}")?;
    }
    out.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🐭 Maushold Automated Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
}

fn expand_scenarios(raw: &str) -> Vec<String> {
    let mut names = split_csv(raw);
    if names.iter().any(|s| s == "all") {
        names.retain(|s| s != "all");
        for name in ALL_SCENARIOS {
            if !names.iter().any(|s| s == name) {
                names.push((*name).to_string());
            }
        }
    }
    names
}

fn parse_seeds(seeds_arg: &str) -> Result<Vec<u64>> {
    split_csv(seeds_arg)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect()
}

fn api_targets(args: &Args) -> Vec<ApiTarget> {
    let mut targets = Vec::new();
    if args.mode.includes(TestMode::Logic) {
        targets.push(ApiTarget::Sandbox);
    }
    if args.mode.includes(TestMode::Api) {
        targets.push(ApiTarget::Gateway {
            base_url: args.api_base_url.clone(),
        });
    }
    targets
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: !args.headed,
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

async fn run_api_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    target: ApiTarget,
) -> Vec<ScenarioResult> {
    let heading = match target {
        ApiTarget::Sandbox => "🧠 Running Sandbox Scenarios".bright_yellow().bold(),
        ApiTarget::Gateway { ref base_url } => {
            format!("🔌 Running API Scenarios against {base_url}").bright_magenta().bold()
        }
    };
    println!("{heading}");
    println!("{}", "-".repeat(30).yellow());

    let runner = ApiRunner::new(target, args.verbose);
    let mut results = Vec::new();
    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(
                runner
                    .run_scenario(scenario.as_ref(), seeds, args.iterations)
                    .await,
            );
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }
    results
}

async fn run_browser_scenarios(args: &Args, scenarios: &[String]) -> Result<Vec<ScenarioResult>> {
    let mut results = Vec::new();
    if !args.mode.includes(TestMode::Browser) {
        return Ok(results);
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let cfg = build_browser_config(args);
    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {}: {e}", kind.label());
                continue;
            }
        };

        results.extend(run_browser_scenarios_for_driver(args, scenarios, kind, &driver).await);
        let _ = driver.quit().await;
    }

    Ok(results)
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> Vec<ScenarioResult> {
    let label = kind.label();
    let page = AppPage::new(driver, &args.base_url);
    let mut results = Vec::new();

    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        if !scenario.has_browser_steps() {
            eprintln!(
                "⚠️  Scenario {} has no browser test implementation",
                scenario_name.yellow()
            );
            continue;
        }

        let ctx = ScenarioCtx {
            seed: 0,
            run_tag: chrono::Utc::now().format("%m%d%H%M%S%3f").to_string(),
            verbose: args.verbose,
        };
        let scenario_start = Instant::now();
        let outcome = scenario.run_browser(&page, &ctx).await;
        let duration = scenario_start.elapsed();
        match &outcome {
            Ok(()) => println!("✅ [{}] {} - {:?}", label.green(), scenario_name, duration),
            Err(e) => {
                eprintln!("❌ [{}] {} - {:?}: {:#}", label.red(), scenario_name, duration, e);
                let dir = artifacts_dir(&args.artifacts_dir, label, scenario_name, ctx.seed);
                if let Err(capture_err) = capture_artifacts(driver, &dir, e).await {
                    log::warn!("could not capture artifacts: {capture_err:#}");
                }
            }
        }

        let (failures, timings) = match outcome {
            Ok(()) => (Vec::new(), vec![duration]),
            Err(e) => (vec![format!("{e:#}")], Vec::new()),
        };
        results.push(ScenarioResult::from_runs(
            scenario.name(),
            label,
            ctx.seed,
            1,
            failures,
            timings,
        ));
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], started: Instant) -> Result<()> {
    let mut out = open_output(args.output.as_deref())?;
    args.report.write(&mut *out, results, started.elapsed())?;
    out.flush()?;
    Ok(())
}
