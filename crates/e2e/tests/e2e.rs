//! Scenario harness entry point
//!
//! Runs the YAML scenarios in `scenarios/`. By default they run against the
//! in-memory app; `--live` drives a real browser through Playwright.
//! Run with: cargo test --package ngx-e2e --test e2e -- [--live] [--tag smoke]

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ngx_e2e::playwright::check_playwright_installed;
use ngx_e2e::{
    AppServer, E2eResult, PlaywrightConfig, PlaywrightLauncher, ScenarioRunner, SimLauncher,
    SuiteConfig, TestSuiteResult,
};

#[derive(Parser, Debug)]
#[command(name = "ngx-e2e")]
#[command(about = "Scenario runner for the ngx-admin page objects")]
#[command(ignore_errors = true)]
struct Args {
    /// Suite configuration (TOML); a missing file means defaults
    #[arg(short, long, default_value = "ngx-e2e.toml")]
    config: PathBuf,

    /// Path to scenarios directory
    #[arg(short, long)]
    scenarios: Option<PathBuf>,

    /// Run only scenarios carrying this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only the scenario with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Drive a real browser through Playwright instead of the simulated app
    #[arg(long)]
    live: bool,

    /// Base URL of the running app
    #[arg(long)]
    base_url: Option<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long)]
    browser: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(2);
        }
    };

    match rt.block_on(async_main(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn suite_config(args: &Args) -> E2eResult<SuiteConfig> {
    let mut config = SuiteConfig::load(&args.config)?;
    config.apply_env()?;

    config.scenarios_dir = args
        .scenarios
        .clone()
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios"));
    config.output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("ngx-e2e"));
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(browser) = &args.browser {
        config.browser = browser.parse()?;
    }
    if args.headed {
        config.headless = false;
    }
    Ok(config)
}

async fn run<L: ngx_e2e::Launcher>(runner: &ScenarioRunner<L>, args: &Args) -> E2eResult<TestSuiteResult> {
    if let Some(name) = &args.name {
        runner.run_named(name).await
    } else if let Some(tag) = &args.tag {
        runner.run_tagged(tag).await
    } else {
        runner.run_all().await
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let config = suite_config(&args)?;

    let results = if args.live {
        check_playwright_installed().await?;
        // Kept alive until the run finishes; stops a spawned app on drop
        let _server = match &config.app_server {
            Some(server) => Some(AppServer::start(&config.base_url, server).await?),
            None => None,
        };
        let launcher = PlaywrightLauncher::new(PlaywrightConfig::from_suite(&config));
        let runner = ScenarioRunner::new(launcher, &config);
        let results = run(&runner, &args).await?;
        runner.write_results(&results)?;
        results
    } else {
        info!("Running against the simulated app (pass --live for a browser)");
        let launcher = SimLauncher::new().with_wait(config.wait_config());
        let runner = ScenarioRunner::new(launcher, &config);
        let results = run(&runner, &args).await?;
        runner.write_results(&results)?;
        results
    };

    Ok(results.success())
}
