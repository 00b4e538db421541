//! Storefront E2E Test Suite
//!
//! This crate drives the storefront's registration and login flows end to end:
//! - Generates schema-valid random user records with `fake`
//! - Builds scenarios as sequences of browser steps (visit, fill, click, assert)
//! - Renders each scenario into a Playwright script and runs it under `node`
//! - Performs visual regression on captured screenshots against baselines
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Scenario Runner (Rust)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── run_all(scenarios) -> SuiteResult                    │
//! │    ├── PageSession::run(steps) -> verdict                   │
//! │    └── VisualTester::compare(name) -> VisualDiff            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario                                                   │
//! │    ├── commands: submit_initial_signup / fill_personal_data │
//! │    │             fill_shipping_data / create_account / login│
//! │    └── steps: [Step]                                        │
//! │          ├── visit { path }                                 │
//! │          ├── type_text / click / select / check             │
//! │          ├── expect_visible / expect_text_contains          │
//! │          ├── expect_invalid (native :invalid pseudo-class)  │
//! │          └── expect_url_contains / expect_url_excludes      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! One scenario maps to one browser lifetime; cookies and session state never
//! leak between scenarios.

pub mod browser;
pub mod commands;
pub mod data;
pub mod elements;
pub mod error;
pub mod runner;
pub mod scenarios;
pub mod step;
pub mod visual;

pub use browser::{BrowserConfig, BrowserKind, PageSession};
pub use data::UserRecord;
pub use error::{E2eError, E2eResult};
pub use runner::{Scenario, ScenarioRunner, SuiteResult};
pub use step::Step;
