//! Browser steps, the intermediate form between commands and generated scripts

use serde::{Deserialize, Serialize};

/// A single browser action or assertion within a scenario.
///
/// Steps are pure data; [`crate::browser::PageSession`] renders them into
/// Playwright calls. Keeping them as data lets command builders be unit-tested
/// without a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to a path relative to the base URL
    Visit { path: String },

    /// Fill an input field
    TypeText { selector: String, text: String },

    /// Click an element
    Click { selector: String },

    /// Select a dropdown option by value
    Select { selector: String, value: String },

    /// Check a checkbox or radio button
    Check { selector: String },

    /// Block until the URL contains a fragment
    ExpectUrlContains { fragment: String },

    /// Block until the URL no longer contains a fragment
    ExpectUrlExcludes { fragment: String },

    /// Assert an element is visible
    ExpectVisible { selector: String },

    /// Assert an element's text contains a substring
    ExpectTextContains { selector: String, text: String },

    /// Assert an input is in the browser-native `:invalid` state
    ExpectInvalid { selector: String },

    /// Capture a full-page screenshot under the given name
    Screenshot { name: String },

    /// Emit a message into the script output
    Log { message: String },
}

impl Step {
    /// Short label used in logs and failure reports.
    pub fn label(&self) -> String {
        match self {
            Step::Visit { path } => format!("visit:{path}"),
            Step::TypeText { selector, .. } => format!("type:{selector}"),
            Step::Click { selector } => format!("click:{selector}"),
            Step::Select { selector, .. } => format!("select:{selector}"),
            Step::Check { selector } => format!("check:{selector}"),
            Step::ExpectUrlContains { fragment } => format!("expect_url_contains:{fragment}"),
            Step::ExpectUrlExcludes { fragment } => format!("expect_url_excludes:{fragment}"),
            Step::ExpectVisible { selector } => format!("expect_visible:{selector}"),
            Step::ExpectTextContains { selector, .. } => {
                format!("expect_text_contains:{selector}")
            }
            Step::ExpectInvalid { selector } => format!("expect_invalid:{selector}"),
            Step::Screenshot { name } => format!("screenshot:{name}"),
            Step::Log { message } => format!("log:{}", &message[..message.len().min(30)]),
        }
    }

    /// Screenshot name, if this step captures one.
    pub fn screenshot_name(&self) -> Option<&str> {
        match self {
            Step::Screenshot { name } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_serializes_with_action_tag() {
        let step = Step::TypeText {
            selector: "[data-qa=\"signup-email\"]".into(),
            text: "a@b.test".into(),
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["action"], "type_text");
        assert_eq!(json["selector"], "[data-qa=\"signup-email\"]");
    }

    #[test]
    fn label_truncates_long_log_messages() {
        let step = Step::Log {
            message: "x".repeat(100),
        };
        assert!(step.label().len() <= "log:".len() + 30);
    }
}
