//! Playwright browser automation
//!
//! A long-lived `node` process runs the embedded bridge script and speaks
//! newline-delimited JSON over stdin/stdout. Element handles stay on the
//! JavaScript side; Rust only sees their integer ids.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use ngx_pages::{Automation, ElementHandle, InteractOptions, Locator, PageError, PageResult, WaitConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tempfile::TempDir;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use crate::config::SuiteConfig;
use crate::error::{E2eError, E2eResult};
use crate::runner::Launcher;

/// Source of the node-side bridge, written to a temp dir at launch
pub const BRIDGE_SCRIPT: &str = include_str!("bridge.js");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" | "safari" => Ok(Browser::Webkit),
            other => Err(E2eError::Config(format!("unknown browser '{}'", other))),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Implicit element wait used by page objects
    pub wait: WaitConfig,
    /// Upper bound on a single bridge round trip
    pub command_timeout: Duration,
    /// `node` executable
    pub node: PathBuf,
    /// Directory holding the `playwright` package; defaults to `./node_modules`
    pub node_modules: Option<PathBuf>,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4200".to_string(),
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            wait: WaitConfig::default(),
            command_timeout: Duration::from_secs(30),
            node: PathBuf::from("node"),
            node_modules: None,
        }
    }
}

impl PlaywrightConfig {
    pub fn from_suite(suite: &SuiteConfig) -> Self {
        Self {
            base_url: suite.base_url.clone(),
            browser: suite.browser,
            headless: suite.headless,
            viewport_width: suite.viewport.width,
            viewport_height: suite.viewport.height,
            wait: suite.wait_config(),
            ..Default::default()
        }
    }
}

/// Check that the Playwright CLI is reachable; returns its version
pub async fn check_playwright_installed() -> E2eResult<String> {
    let output = Command::new("npx")
        .args(["playwright", "--version"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|_| E2eError::PlaywrightNotFound)?;

    if !output.status.success() {
        return Err(E2eError::PlaywrightNotFound);
    }
    let version = parse_version(&String::from_utf8_lossy(&output.stdout))
        .ok_or(E2eError::PlaywrightNotFound)?;
    info!("Using Playwright {}", version);
    Ok(version)
}

/// Extract `1.44.0` from `Version 1.44.0`
pub fn parse_version(output: &str) -> Option<String> {
    let re = Regex::new(r"Version (\d+\.\d+\.\d+)").ok()?;
    re.captures(output).map(|c| c[1].to_string())
}

#[derive(Debug, Deserialize)]
struct BridgeResponse {
    id: u64,
    ok: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HandleRecord {
    id: u64,
    description: String,
}

fn encode_request(id: u64, op: &str, args: Value) -> E2eResult<String> {
    let mut message = match args {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(E2eError::Playwright(format!(
                "bridge arguments must be an object, got {}",
                other
            )))
        }
    };
    message.insert("id".to_string(), id.into());
    message.insert("op".to_string(), op.into());

    let mut line = serde_json::to_string(&Value::Object(message))?;
    line.push('\n');
    Ok(line)
}

fn decode_response(response: BridgeResponse, expected_id: u64) -> E2eResult<Value> {
    if response.id != expected_id {
        return Err(E2eError::Playwright(format!(
            "response id {} does not match request {}",
            response.id, expected_id
        )));
    }
    if response.ok {
        Ok(response.result.unwrap_or(Value::Null))
    } else {
        Err(E2eError::Playwright(
            response.error.unwrap_or_else(|| "unknown bridge error".to_string()),
        ))
    }
}

/// Read until the reply to `expected_id` arrives.
///
/// Replies to earlier ids belong to requests that timed out and are dropped.
async fn read_reply<R>(lines: &mut Lines<R>, expected_id: u64) -> E2eResult<Value>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let line = lines
            .next_line()
            .await?
            .ok_or_else(|| E2eError::Playwright("bridge exited".to_string()))?;
        let response: BridgeResponse = serde_json::from_str(&line)?;
        if response.id < expected_id {
            debug!(id = response.id, expected_id, "dropping late bridge reply");
            continue;
        }
        return decode_response(response, expected_id);
    }
}

/// Map bridge failures onto the page-object error taxonomy
fn into_page_error(err: E2eError) -> PageError {
    match err {
        E2eError::Timeout(what) => PageError::Timeout(what),
        E2eError::Playwright(msg) => {
            if let Some(rest) = msg.strip_prefix("stale: ") {
                PageError::StaleElement(rest.to_string())
            } else if let Some(rest) = msg.strip_prefix("not-interactable: ") {
                PageError::NotInteractable(rest.to_string())
            } else {
                PageError::Driver(msg)
            }
        }
        other => PageError::Driver(other.to_string()),
    }
}

fn from_result<T: serde::de::DeserializeOwned>(op: &str, value: Value) -> PageResult<T> {
    serde_json::from_value(value)
        .map_err(|e| PageError::Driver(format!("unexpected '{}' result: {}", op, e)))
}

/// One browser session behind the node bridge
pub struct PlaywrightDriver {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    config: PlaywrightConfig,
    _bridge_dir: TempDir,
}

impl PlaywrightDriver {
    /// Spawn the bridge and open a fresh browser context
    pub async fn launch(config: PlaywrightConfig) -> E2eResult<Self> {
        let bridge_dir = tempfile::tempdir()?;
        let script = bridge_dir.path().join("bridge.js");
        std::fs::write(&script, BRIDGE_SCRIPT)?;

        let node_modules = match &config.node_modules {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?.join("node_modules"),
        };

        debug!("Starting Playwright bridge: {}", script.display());
        let mut child = Command::new(&config.node)
            .arg(&script)
            .env("NODE_PATH", &node_modules)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| E2eError::Playwright(format!("failed to start {}: {}", config.node.display(), e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| E2eError::Playwright("bridge stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| E2eError::Playwright("bridge stdout unavailable".to_string()))?;

        let mut driver = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            next_id: 0,
            config,
            _bridge_dir: bridge_dir,
        };

        let launch = json!({
            "browser": driver.config.browser.as_str(),
            "headless": driver.config.headless,
            "viewport": {
                "width": driver.config.viewport_width,
                "height": driver.config.viewport_height,
            },
            "baseUrl": driver.config.base_url,
            "timeout": driver.config.command_timeout.as_millis() as u64,
        });
        driver.request("launch", launch).await?;
        info!(browser = driver.config.browser.as_str(), "Browser launched");
        Ok(driver)
    }

    async fn request(&mut self, op: &str, args: Value) -> E2eResult<Value> {
        self.next_id += 1;
        let id = self.next_id;
        let line = encode_request(id, op, args)?;
        trace!(id, op, "bridge request");

        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.flush().await?;

        let limit = self.config.command_timeout;
        timeout(limit, read_reply(&mut self.stdout, id))
            .await
            .map_err(|_| E2eError::Timeout(format!("bridge op '{}' after {:?}", op, limit)))?
    }

    async fn call(&mut self, op: &str, args: Value) -> PageResult<Value> {
        self.request(op, args).await.map_err(into_page_error)
    }
}

#[async_trait]
impl Automation for PlaywrightDriver {
    fn wait_config(&self) -> WaitConfig {
        self.config.wait
    }

    async fn visit(&mut self, path: &str) -> PageResult<()> {
        self.call("visit", json!({ "path": path })).await.map(drop)
    }

    async fn query_all(
        &mut self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
    ) -> PageResult<Vec<ElementHandle>> {
        let args = json!({
            "scope": scope.map(|s| s.id()),
            "selector": locator.to_selector(),
        });
        let records: Vec<HandleRecord> = from_result("query", self.call("query", args).await?)?;
        Ok(records
            .into_iter()
            .map(|r| ElementHandle::new(r.id, r.description))
            .collect())
    }

    async fn click(&mut self, element: &ElementHandle, options: InteractOptions) -> PageResult<()> {
        let args = json!({ "id": element.id(), "force": options.force });
        self.call("click", args).await.map(drop)
    }

    async fn type_text(&mut self, element: &ElementHandle, text: &str) -> PageResult<()> {
        let args = json!({ "id": element.id(), "text": text });
        self.call("type", args).await.map(drop)
    }

    async fn clear(&mut self, element: &ElementHandle) -> PageResult<()> {
        self.call("clear", json!({ "id": element.id() })).await.map(drop)
    }

    async fn check(&mut self, element: &ElementHandle, options: InteractOptions) -> PageResult<()> {
        let args = json!({ "id": element.id(), "force": options.force });
        self.call("check", args).await.map(drop)
    }

    async fn submit(&mut self, form: &ElementHandle) -> PageResult<()> {
        self.call("submit", json!({ "id": form.id() })).await.map(drop)
    }

    async fn confirm_dialog(&mut self, accept: bool) -> PageResult<()> {
        self.call("dialog", json!({ "accept": accept })).await.map(drop)
    }

    async fn dialog_messages(&mut self) -> PageResult<Vec<String>> {
        from_result("dialogs", self.call("dialogs", Value::Null).await?)
    }

    async fn text(&mut self, element: &ElementHandle) -> PageResult<String> {
        from_result("text", self.call("text", json!({ "id": element.id() })).await?)
    }

    async fn attribute(&mut self, element: &ElementHandle, name: &str) -> PageResult<Option<String>> {
        let args = json!({ "id": element.id(), "name": name });
        from_result("attribute", self.call("attribute", args).await?)
    }

    async fn input_value(&mut self, element: &ElementHandle) -> PageResult<String> {
        from_result("value", self.call("value", json!({ "id": element.id() })).await?)
    }

    async fn is_checked(&mut self, element: &ElementHandle) -> PageResult<bool> {
        from_result("checked", self.call("checked", json!({ "id": element.id() })).await?)
    }

    async fn screenshot(&mut self, path: &Path) -> PageResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PageError::Driver(e.to_string()))?;
        }
        let args = json!({ "path": path.to_string_lossy() });
        self.call("screenshot", args).await.map(drop)
    }

    async fn release_handles(&mut self) -> PageResult<()> {
        self.call("release", Value::Null).await.map(drop)
    }

    async fn close(&mut self) -> PageResult<()> {
        self.call("close", Value::Null).await?;
        match timeout(Duration::from_secs(5), self.child.wait()).await {
            Ok(Ok(status)) => debug!("Bridge exited with {}", status),
            Ok(Err(e)) => warn!("Waiting for bridge failed: {}", e),
            Err(_) => warn!("Bridge did not exit; it is killed on drop"),
        }
        Ok(())
    }
}

/// Launches a fresh Playwright session per scenario
pub struct PlaywrightLauncher {
    config: PlaywrightConfig,
}

impl PlaywrightLauncher {
    pub fn new(config: PlaywrightConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Launcher for PlaywrightLauncher {
    type Driver = PlaywrightDriver;

    async fn launch(&self) -> E2eResult<PlaywrightDriver> {
        PlaywrightDriver::launch(self.config.clone()).await
    }
}
