//! ngx-admin scenario runner
//!
//! This crate drives the `ngx-pages` page objects from declarative YAML
//! scenarios:
//! - Spawns (or reuses) the ngx-admin dev server
//! - Controls Playwright through a long-lived node bridge
//! - Falls back to the in-memory `SimulatedApp` when no browser is wanted
//! - Writes JSON results and failure screenshots
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ScenarioRunner<L: Launcher>                │
//! ├─────────────────────────────────────────────────────────────┤
//! │    ├── launcher.launch() -> impl Automation (per scenario)  │
//! │    ├── run_scenario(spec) -> TestResult                     │
//! │    └── write_results(suite) -> test-results.json            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioSpec (YAML)                                        │
//! │    ├── name, description, tags, skip                        │
//! │    └── steps: [ScenarioStep]                                │
//! │          ├── open_home / navigate { page }                  │
//! │          ├── submit_inline_form { name, email }             │
//! │          ├── add_record / update_age / delete_row           │
//! │          ├── record_row_count / assert_row_count { delta }  │
//! │          └── screenshot { name }                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SimLauncher (SimulatedApp) │ PlaywrightLauncher (bridge)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod playwright;
pub mod runner;
pub mod server;
pub mod spec;

pub use config::SuiteConfig;
pub use error::{E2eError, E2eResult};
pub use playwright::{Browser, PlaywrightConfig, PlaywrightDriver, PlaywrightLauncher};
pub use runner::{Launcher, ScenarioRunner, SimLauncher, TestResult, TestSuiteResult};
pub use server::{AppServer, AppServerConfig};
pub use spec::{ScenarioSpec, ScenarioStep};
