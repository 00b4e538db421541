//! Playwright script generation and execution
//!
//! A [`PageSession`] turns a scenario's steps into one self-contained Node
//! script and runs it with `node`. The script owns the whole browser lifetime,
//! so cookies and session state cannot leak between scenarios.
//!
//! The plain `playwright` npm library is loaded (not `@playwright/test`), so
//! assertions are rendered as explicit `throw`s and the script reports its
//! verdict as a single JSON line on stdout.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::step::Step;

/// Browser engine to launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }

    /// Parse a browser name, defaulting to chromium for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name {
            "firefox" => BrowserKind::Firefox,
            "webkit" => BrowserKind::Webkit,
            _ => BrowserKind::Chromium,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Root URL of the site under test
    pub base_url: String,

    /// Directory screenshots are written to
    pub screenshot_dir: PathBuf,

    /// Viewport dimensions
    pub viewport_width: u32,
    pub viewport_height: u32,

    pub browser: BrowserKind,
    pub headless: bool,

    /// Timeout applied to clicks, waits, and assertions
    pub default_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: "https://automationexercise.com".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: BrowserKind::Chromium,
            headless: true,
            default_timeout_ms: 10_000,
        }
    }
}

/// Whether `node` can load the `playwright` package. The harness skips the
/// live scenarios when it cannot.
pub fn playwright_available() -> bool {
    Command::new("node")
        .args(["-e", "require('playwright')"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Verdict line emitted by a generated script.
#[derive(Debug, Deserialize)]
struct Verdict {
    success: bool,
    #[serde(default)]
    step: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Renders steps to a Playwright script and runs it under `node`.
pub struct PageSession {
    config: BrowserConfig,
}

impl PageSession {
    pub fn new(config: BrowserConfig) -> E2eResult<Self> {
        Self::check_node_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;
        Ok(Self { config })
    }

    fn check_node_installed() -> E2eResult<()> {
        let status = Command::new("node")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::NodeNotFound),
        }
    }

    /// Execute a scenario's steps in one browser lifetime.
    pub async fn run(&self, steps: &[Step]) -> E2eResult<()> {
        let script = self.build_script(steps);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, &script)?;

        debug!("running browser script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        match parse_verdict(&stdout) {
            Some(verdict) if verdict.success => Ok(()),
            Some(verdict) => Err(E2eError::Script {
                step: verdict.step.unwrap_or_else(|| "start".to_string()),
                message: verdict.error.unwrap_or_else(|| "unknown error".to_string()),
            }),
            None => Err(E2eError::NoVerdict(format!(
                "stdout: {stdout}\nstderr: {stderr}"
            ))),
        }
    }

    /// Render the full script for a list of steps.
    pub fn build_script(&self, steps: &[Step]) -> String {
        let mut script = format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  // The site under test throws uncaught in-page exceptions of its own;
  // they must never fail a run.
  page.on('pageerror', () => {{}});
  const baseUrl = {base_url};
  let currentStep = 'start';

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            base_url = js_str(&self.config.base_url),
        );

        for (i, step) in steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.label()));
            script.push_str(&format!("    currentStep = {};\n", js_str(&step.label())));
            script.push_str(&self.step_to_js(step));
            script.push('\n');
        }

        script.push_str(
            r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.log(JSON.stringify({ success: false, step: currentStep, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    fn step_to_js(&self, step: &Step) -> String {
        let timeout = self.config.default_timeout_ms;
        match step {
            Step::Visit { path } => format!(
                "    await page.goto(baseUrl + {}, {{ waitUntil: 'domcontentloaded' }});",
                js_str(path)
            ),
            Step::TypeText { selector, text } => {
                format!("    await page.fill({}, {});", js_str(selector), js_str(text))
            }
            Step::Click { selector } => format!(
                "    await page.click({}, {{ timeout: {timeout} }});",
                js_str(selector)
            ),
            Step::Select { selector, value } => format!(
                "    await page.selectOption({}, {});",
                js_str(selector),
                js_str(value)
            ),
            Step::Check { selector } => {
                format!("    await page.check({});", js_str(selector))
            }
            Step::ExpectUrlContains { fragment } => format!(
                "    await page.waitForURL(url => url.href.includes({}), {{ timeout: {timeout} }});",
                js_str(fragment)
            ),
            Step::ExpectUrlExcludes { fragment } => format!(
                "    await page.waitForURL(url => !url.href.includes({}), {{ timeout: {timeout} }});",
                js_str(fragment)
            ),
            Step::ExpectVisible { selector } => format!(
                "    await page.waitForSelector({}, {{ state: 'visible', timeout: {timeout} }});",
                js_str(selector)
            ),
            Step::ExpectTextContains { selector, text } => format!(
                r#"    {{
      const el = await page.waitForSelector({sel}, {{ timeout: {timeout} }});
      const actual = (await el.textContent()) || '';
      if (!actual.includes({text})) {{
        throw new Error('text of ' + {sel} + ' is ' + JSON.stringify(actual) + ', expected it to contain ' + {text});
      }}
    }}"#,
                sel = js_str(selector),
                text = js_str(text),
            ),
            Step::ExpectInvalid { selector } => format!(
                r#"    {{
      const invalid = await page.$eval({sel}, el => el.matches(':invalid'));
      if (!invalid) {{
        throw new Error('expected ' + {sel} + ' to be in the :invalid state');
      }}
    }}"#,
                sel = js_str(selector),
            ),
            Step::Screenshot { name } => {
                let path = self.config.screenshot_dir.join(format!("{name}.png"));
                format!(
                    "    await page.screenshot({{ path: {}, fullPage: true }});",
                    js_str(&path.to_string_lossy())
                )
            }
            Step::Log { message } => {
                format!("    console.log('[scenario] ' + {});", js_str(message))
            }
        }
    }
}

/// Find the verdict line in script output. The script logs exactly one JSON
/// object; anything else on stdout is scenario logging.
fn parse_verdict(stdout: &str) -> Option<Verdict> {
    stdout
        .lines()
        .rev()
        .find_map(|line| serde_json::from_str::<Verdict>(line.trim()).ok())
}

/// Quote a Rust string as a single-quoted JS string literal.
fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn session() -> PageSession {
        // Bypass the node check in unit tests
        PageSession {
            config: BrowserConfig::default(),
        }
    }

    #[test_case("plain", "'plain'" ; "plain text")]
    #[test_case("O'Conner", "'O\\'Conner'" ; "single quote")]
    #[test_case("a\\b", "'a\\\\b'" ; "backslash")]
    #[test_case("line\nbreak", "'line\\nbreak'" ; "newline")]
    fn js_str_escapes(input: &str, expected: &str) {
        assert_eq!(js_str(input), expected);
    }

    #[test]
    fn script_prologue_suppresses_page_errors() {
        let script = session().build_script(&[]);
        assert!(script.contains("page.on('pageerror', () => {});"));
        assert!(script.contains("chromium.launch({ headless: true })"));
    }

    #[test]
    fn fill_step_renders_escaped_values() {
        let script = session().build_script(&[Step::TypeText {
            selector: "[data-qa=\"signup-name\"]".into(),
            text: "O'Conner".into(),
        }]);
        assert!(script.contains(r#"await page.fill('[data-qa="signup-name"]', 'O\'Conner');"#));
    }

    #[test]
    fn invalid_assertion_checks_the_pseudo_class() {
        let script = session().build_script(&[Step::ExpectInvalid {
            selector: "[data-qa=\"password\"]".into(),
        }]);
        assert!(script.contains("el.matches(':invalid')"));
    }

    #[test]
    fn screenshot_lands_in_the_configured_directory() {
        let script = session().build_script(&[Step::Screenshot {
            name: "account-created".into(),
        }]);
        assert!(script.contains("account-created.png"));
        assert!(script.contains("fullPage: true"));
    }

    #[test]
    fn each_step_updates_the_current_step_marker() {
        let script = session().build_script(&[
            Step::Visit { path: "/login".into() },
            Step::Click { selector: "#x".into() },
        ]);
        assert!(script.contains("currentStep = 'visit:/login';"));
        assert!(script.contains("currentStep = 'click:#x';"));
    }

    #[test]
    fn verdict_parsing_skips_scenario_logging() {
        let stdout = "[scenario] filling form\n{\"success\":false,\"step\":\"click:#x\",\"error\":\"timeout\"}\n";
        let verdict = parse_verdict(stdout).unwrap();
        assert!(!verdict.success);
        assert_eq!(verdict.step.as_deref(), Some("click:#x"));
        assert_eq!(verdict.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn missing_verdict_is_detected() {
        assert!(parse_verdict("garbage output\nmore garbage\n").is_none());
    }
}
