//! Scenario orchestration: sequential execution, accounting, results file

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::browser::{BrowserConfig, PageSession};
use crate::error::{E2eError, E2eResult};
use crate::step::Step;
use crate::visual::{VisualConfig, VisualTester};

/// A named sequence of steps with a pass/fail outcome.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub steps: Vec<Step>,
    /// Compare captured screenshots against baselines after a passing run
    pub visual_regression: bool,
}

impl Scenario {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            steps: Vec::new(),
            visual_regression: false,
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn with_visual_regression(mut self) -> Self {
        self.visual_regression = true;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Names of screenshots this scenario captures.
    pub fn screenshot_names(&self) -> Vec<&str> {
        self.steps.iter().filter_map(Step::screenshot_name).collect()
    }
}

/// Outcome of one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub failed_step: Option<String>,
    pub error: Option<String>,
    pub visual_diffs: Vec<VisualDiffResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualDiffResult {
    pub name: String,
    pub matches: bool,
    pub diff_percent: f64,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for [`ScenarioRunner`].
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub browser: BrowserConfig,
    pub visual: VisualConfig,
    pub output_dir: PathBuf,
}

/// Runs scenarios one at a time, each in its own browser lifetime.
pub struct ScenarioRunner {
    browser_config: BrowserConfig,
    visual_config: VisualConfig,
    output_dir: PathBuf,
}

impl ScenarioRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let output_dir = if config.output_dir.as_os_str().is_empty() {
            PathBuf::from("test-results")
        } else {
            config.output_dir
        };
        Self {
            browser_config: config.browser,
            visual_config: config.visual,
            output_dir,
        }
    }

    /// Run every scenario in order, never stopping early.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> E2eResult<SuiteResult> {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        info!("running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            let result = self.run_scenario(scenario).await?;
            if result.success {
                passed += 1;
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!(
                    "✗ {} at {} - {}",
                    result.name,
                    result.failed_step.as_deref().unwrap_or("?"),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!("");
        info!(
            "results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteResult {
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    /// Run scenarios carrying a tag.
    pub async fn run_tagged(&self, scenarios: &[Scenario], tag: &str) -> E2eResult<SuiteResult> {
        let filtered: Vec<Scenario> = scenarios
            .iter()
            .filter(|s| s.has_tag(tag))
            .cloned()
            .collect();
        self.run_all(&filtered).await
    }

    /// Run one scenario by name.
    pub async fn run_named(&self, scenarios: &[Scenario], name: &str) -> E2eResult<SuiteResult> {
        let scenario = scenarios
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| E2eError::ScenarioNotFound(name.to_string()))?;
        self.run_all(std::slice::from_ref(&scenario)).await
    }

    async fn run_scenario(&self, scenario: &Scenario) -> E2eResult<ScenarioResult> {
        let start = Instant::now();
        debug!("scenario: {} - {}", scenario.name, scenario.description);

        let session = PageSession::new(self.browser_config.clone())?;

        let (mut success, mut failed_step, mut error) = match session.run(&scenario.steps).await {
            Ok(()) => (true, None, None),
            Err(E2eError::Script { step, message }) => (false, Some(step), Some(message)),
            Err(other) => (false, None, Some(other.to_string())),
        };

        let mut visual_diffs = Vec::new();
        if scenario.visual_regression && success {
            let tester = VisualTester::new(self.visual_config.clone())?;
            for name in scenario.screenshot_names() {
                match tester.compare(name) {
                    Ok(diff) => {
                        if !diff.matches {
                            success = false;
                            error = Some(
                                E2eError::ScreenshotMismatch {
                                    name: name.to_string(),
                                    diff_percent: diff.diff_percent,
                                    threshold: tester.threshold(),
                                }
                                .to_string(),
                            );
                        }
                        visual_diffs.push(VisualDiffResult {
                            name: name.to_string(),
                            matches: diff.matches,
                            diff_percent: diff.diff_percent,
                        });
                    }
                    Err(E2eError::BaselineNotFound(_)) => {
                        info!("no baseline for '{name}' yet; rerun with --update-baselines");
                    }
                    Err(e) => {
                        success = false;
                        error = Some(format!("visual comparison failed: {e}"));
                    }
                }
            }
        }

        if !success && failed_step.is_none() {
            failed_step = Some("post-run".to_string());
        }

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            success,
            duration_ms: start.elapsed().as_millis() as u64,
            failed_step: if success { None } else { failed_step },
            error,
            visual_diffs,
        })
    }

    /// Promote captured screenshots to baselines.
    pub fn update_baselines(&self) -> E2eResult<()> {
        VisualTester::new(self.visual_config.clone())?.update_all_baselines()
    }

    /// Write the suite result as JSON under the output directory.
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join("test-results.json");
        std::fs::write(&path, serde_json::to_string_pretty(results)?)?;
        info!("results written to {}", path.display());
        Ok(path)
    }
}
