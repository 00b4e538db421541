//! E2E harness entry point
//!
//! Drives the registration and login scenarios against the live site.
//! Run with: cargo test --package storefront-e2e --test register
//!
//! Requires `node` with the `playwright` package installed.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront_e2e::browser::{BrowserConfig, BrowserKind};
use storefront_e2e::runner::{RunnerConfig, ScenarioRunner};
use storefront_e2e::visual::VisualConfig;
use storefront_e2e::{scenarios, E2eResult};

#[derive(Parser, Debug)]
#[command(name = "storefront-e2e")]
#[command(about = "E2E suite for the storefront registration and login flows")]
struct Args {
    /// Base URL of the site under test
    #[arg(long, default_value = "https://automationexercise.com")]
    base_url: String,

    /// Run only scenarios matching this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only a specific scenario by name
    #[arg(short, long)]
    name: Option<String>,

    /// Include scenarios that need pre-existing site state
    #[arg(long)]
    include_unreliable: bool,

    /// Update visual baselines from this run's screenshots
    #[arg(long)]
    update_baselines: bool,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Run in headless mode
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    viewport_height: u32,

    /// Visual diff threshold (percentage)
    #[arg(long, default_value = "0.5")]
    visual_threshold: f64,

    /// Output directory for results and screenshots
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();

    if !storefront_e2e::browser::playwright_available() {
        eprintln!("skipping: node with the playwright package is not available");
        std::process::exit(0);
    }

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
    match rt.block_on(run(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}

async fn run(args: Args) -> E2eResult<bool> {
    let config = RunnerConfig {
        browser: BrowserConfig {
            base_url: args.base_url,
            screenshot_dir: args.output.join("screenshots"),
            viewport_width: args.viewport_width,
            viewport_height: args.viewport_height,
            browser: BrowserKind::from_name(&args.browser),
            headless: args.headless,
            ..Default::default()
        },
        visual: VisualConfig {
            baseline_dir: args.output.join("baselines"),
            actual_dir: args.output.join("screenshots"),
            diff_dir: args.output.join("diffs"),
            threshold: args.visual_threshold,
            auto_update: args.update_baselines,
        },
        output_dir: args.output,
    };

    let runner = ScenarioRunner::new(config);
    let scenarios = scenarios::all(args.include_unreliable);

    let results = if let Some(name) = args.name {
        runner.run_named(&scenarios, &name).await?
    } else if let Some(tag) = args.tag {
        runner.run_tagged(&scenarios, &tag).await?
    } else {
        runner.run_all(&scenarios).await?
    };

    if args.update_baselines {
        runner.update_baselines()?;
    }

    runner.write_results(&results)?;

    Ok(results.all_passed())
}
