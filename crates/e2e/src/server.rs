//! App server fixture - spawning or reusing the ngx-admin dev server

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// How to bring up the application under test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppServerConfig {
    /// Program to run, e.g. `npm`
    pub command: String,

    pub args: Vec<String>,

    /// Working directory for the command (the ngx-admin checkout)
    pub working_dir: Option<PathBuf>,

    /// How long to wait for the base URL to answer
    pub startup_timeout_ms: u64,

    /// Use an app that already answers on the base URL instead of spawning
    pub reuse_existing: bool,
}

impl Default for AppServerConfig {
    fn default() -> Self {
        Self {
            command: "npm".to_string(),
            args: vec!["start".to_string()],
            working_dir: None,
            startup_timeout_ms: 120_000,
            reuse_existing: true,
        }
    }
}

/// Handle to the application server; stops a spawned process on drop
pub struct AppServer {
    child: Option<Child>,
    base_url: String,
}

impl AppServer {
    /// Start the app, or attach to one already serving `base_url`
    pub async fn start(base_url: &str, config: &AppServerConfig) -> E2eResult<Self> {
        let client = http_client()?;

        if config.reuse_existing && is_ready(&client, base_url).await {
            info!("Reusing app already serving {}", base_url);
            return Ok(Self {
                child: None,
                base_url: base_url.to_string(),
            });
        }

        info!("Spawning app server: {} {}", config.command, config.args.join(" "));
        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        if let Some(dir) = &config.working_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(|e| {
            E2eError::ServerStartup(format!("Failed to spawn {}: {}", config.command, e))
        })?;

        let mut server = Self {
            child: Some(child),
            base_url: base_url.to_string(),
        };

        if let Err(e) = server
            .wait_for_ready(&client, Duration::from_millis(config.startup_timeout_ms))
            .await
        {
            server.stop();
            return Err(e);
        }

        info!("App is ready at {}", base_url);
        Ok(server)
    }

    /// Poll the base URL until it answers with a success status
    async fn wait_for_ready(&mut self, client: &reqwest::Client, timeout: Duration) -> E2eResult<()> {
        let start = Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout {
            attempts += 1;

            if let Some(child) = self.child.as_mut() {
                if let Ok(Some(status)) = child.try_wait() {
                    return Err(E2eError::ServerStartup(format!(
                        "app server exited early with {}",
                        status
                    )));
                }
            }

            match client.get(&self.base_url).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => warn!("Readiness check returned {}", resp.status()),
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for app to start...");
                    }
                    // Connection refused is expected while the app is compiling
                    if !e.is_connect() {
                        warn!("Readiness check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(250)).await;
        }

        Err(E2eError::ServerHealthCheck(attempts))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether this fixture owns a spawned process
    pub fn is_managed(&self) -> bool {
        self.child.is_some()
    }

    /// Stop a spawned server: SIGTERM first, then kill
    pub fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        info!("Stopping app server (pid: {})", child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        let _ = child.kill();
        let _ = child.wait();
    }
}

impl Drop for AppServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn http_client() -> E2eResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?)
}

async fn is_ready(client: &reqwest::Client, url: &str) -> bool {
    matches!(client.get(url).send().await, Ok(resp) if resp.status().is_success())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) is never served in test environments
    const DEAD_URL: &str = "http://127.0.0.1:9/";

    #[tokio::test]
    async fn test_missing_command_fails_to_start() {
        let config = AppServerConfig {
            command: "ngx-e2e-no-such-command".to_string(),
            args: Vec::new(),
            ..Default::default()
        };
        let err = AppServer::start(DEAD_URL, &config).await.err().unwrap();
        assert!(matches!(err, E2eError::ServerStartup(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unresponsive_app_times_out_and_is_stopped() {
        let config = AppServerConfig {
            command: "sleep".to_string(),
            args: vec!["30".to_string()],
            startup_timeout_ms: 600,
            reuse_existing: false,
            ..Default::default()
        };
        let err = AppServer::start(DEAD_URL, &config).await.err().unwrap();
        assert!(matches!(err, E2eError::ServerHealthCheck(n) if n >= 1));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_early_exit_is_reported() {
        let config = AppServerConfig {
            command: "true".to_string(),
            args: Vec::new(),
            startup_timeout_ms: 5_000,
            reuse_existing: false,
            ..Default::default()
        };
        let err = AppServer::start(DEAD_URL, &config).await.err().unwrap();
        assert!(matches!(err, E2eError::ServerStartup(_)));
    }
}
