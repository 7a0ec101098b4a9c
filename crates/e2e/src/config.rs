//! Suite configuration: TOML file, then environment, then CLI flags

use std::path::{Path, PathBuf};

use ngx_pages::WaitConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::playwright::Browser;
use crate::server::AppServerConfig;

pub const ENV_BASE_URL: &str = "NGX_E2E_BASE_URL";
pub const ENV_BROWSER: &str = "NGX_E2E_BROWSER";
pub const ENV_HEADLESS: &str = "NGX_E2E_HEADLESS";
pub const ENV_TIMEOUT_MS: &str = "NGX_E2E_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Where the ngx-admin app is served
    pub base_url: String,

    pub browser: Browser,

    pub headless: bool,

    pub viewport: Viewport,

    /// Bound on every implicit element wait
    pub timeout_ms: u64,

    pub poll_interval_ms: u64,

    /// Capture the page when a step fails
    pub screenshot_on_failure: bool,

    pub scenarios_dir: PathBuf,

    /// Results and screenshots land here
    pub output_dir: PathBuf,

    /// Spawn (or reuse) the app before running; absent means it is already up
    pub app_server: Option<AppServerConfig>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4200".to_string(),
            browser: Browser::default(),
            headless: true,
            viewport: Viewport::default(),
            timeout_ms: ngx_pages::driver::DEFAULT_TIMEOUT_MS,
            poll_interval_ms: ngx_pages::driver::DEFAULT_POLL_INTERVAL_MS,
            screenshot_on_failure: true,
            scenarios_dir: PathBuf::from("scenarios"),
            output_dir: PathBuf::from("test-results"),
            app_server: None,
        }
    }
}

impl SuiteConfig {
    pub fn from_toml(text: &str) -> E2eResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> E2eResult<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Apply `NGX_E2E_*` overrides from the process environment
    pub fn apply_env(&mut self) -> E2eResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> E2eResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            self.browser = browser.parse()?;
        }
        if let Some(headless) = lookup(ENV_HEADLESS) {
            self.headless = parse_bool(ENV_HEADLESS, &headless)?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = timeout.trim().parse().map_err(|_| {
                E2eError::Config(format!("{} must be milliseconds, got '{}'", ENV_TIMEOUT_MS, timeout))
            })?;
        }
        Ok(())
    }

    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig::from_millis(self.timeout_ms, self.poll_interval_ms)
    }
}

fn parse_bool(key: &str, value: &str) -> E2eResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(E2eError::Config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = SuiteConfig::load(Path::new("/nonexistent/ngx-e2e.toml")).unwrap();
        assert_eq!(config, SuiteConfig::default());
        assert_eq!(config.wait_config(), WaitConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = SuiteConfig::from_toml(
            r#"
base_url = "http://127.0.0.1:4300"
browser = "firefox"
timeout_ms = 10000

[viewport]
width = 1920
height = 1080

[app_server]
command = "npx"
args = ["ng", "serve"]
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:4300");
        assert_eq!(config.browser, Browser::Firefox);
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.viewport.width, 1920);
        assert!(config.headless);
        let server = config.app_server.unwrap();
        assert_eq!(server.args, vec!["ng", "serve"]);
        assert!(server.reuse_existing);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://ci:4200"),
            (ENV_BROWSER, "webkit"),
            (ENV_HEADLESS, "no"),
            (ENV_TIMEOUT_MS, "750"),
        ]
        .into_iter()
        .collect();

        let mut config = SuiteConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://ci:4200");
        assert_eq!(config.browser, Browser::Webkit);
        assert!(!config.headless);
        assert_eq!(config.timeout_ms, 750);
    }

    #[test]
    fn test_bad_override_is_a_config_error() {
        let mut config = SuiteConfig::default();
        let err = config
            .apply_overrides(|k| (k == ENV_TIMEOUT_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, E2eError::Config(_)));
    }
}
