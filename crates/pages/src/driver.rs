//! Automation capability surface consumed by page objects
//!
//! Page objects never talk to a browser directly. They drive an
//! [`Automation`] implementation through a handful of primitives: query,
//! click, type, clear, check, submit and dialog control. The bounded wait
//! lives here, once, as the provided [`Automation::locate`] method.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::error::{PageError, PageResult};

/// Default bound for implicit waits (4 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 4000;

/// Default polling interval for implicit waits
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// How elements are located.
///
/// `Text` matches elements whose own text contains the string;
/// `TagWithText` matches a tag whose whole subtree text contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Tag(String),
    Class(String),
    Attribute { name: String, value: String },
    Text(String),
    TagWithText { tag: String, text: String },
}

impl Locator {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Shorthand for `[placeholder="..."]`
    pub fn placeholder(value: impl Into<String>) -> Self {
        Self::attribute("placeholder", value)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn tag_with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::TagWithText {
            tag: tag.into(),
            text: text.into(),
        }
    }

    /// Render as a Playwright selector string
    pub fn to_selector(&self) -> String {
        match self {
            Locator::Tag(tag) => tag.clone(),
            Locator::Class(class) => format!(".{}", class),
            Locator::Attribute { name, value } => {
                format!("[{}={}]", name, quote(value))
            }
            Locator::Text(text) => format!(":text({})", quote(text)),
            Locator::TagWithText { tag, text } => {
                format!("{}:has-text({})", tag, quote(text))
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_selector())
    }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Opaque reference to a located element.
///
/// Only valid within the page-object call that produced it; the page may
/// re-render at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    id: u64,
    description: String,
}

impl ElementHandle {
    pub fn new(id: u64, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.description, self.id)
    }
}

/// Options for click and check.
///
/// `force` bypasses the visibility precondition, for controls whose native
/// input is hidden behind custom styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractOptions {
    pub force: bool,
}

impl InteractOptions {
    pub fn forced() -> Self {
        Self { force: true }
    }
}

/// Bounds for the implicit wait in [`Automation::locate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitConfig {
    pub fn from_millis(timeout_ms: u64, poll_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(poll_ms.max(1)),
        }
    }
}

/// Browser automation primitives.
///
/// Implementations: the Playwright bridge in `ngx-e2e` and
/// [`crate::sim::SimulatedApp`].
#[async_trait]
pub trait Automation: Send {
    /// Bounds used by [`Automation::locate`]
    fn wait_config(&self) -> WaitConfig {
        WaitConfig::default()
    }

    /// Load `path` relative to the application's base URL
    async fn visit(&mut self, path: &str) -> PageResult<()>;

    /// Every element currently matching `locator` below `scope` (or the
    /// document), in document order. Never waits.
    async fn query_all(
        &mut self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
    ) -> PageResult<Vec<ElementHandle>>;

    async fn click(&mut self, element: &ElementHandle, options: InteractOptions) -> PageResult<()>;

    async fn type_text(&mut self, element: &ElementHandle, text: &str) -> PageResult<()>;

    async fn clear(&mut self, element: &ElementHandle) -> PageResult<()>;

    async fn check(&mut self, element: &ElementHandle, options: InteractOptions) -> PageResult<()>;

    /// Submit a form element as a unit
    async fn submit(&mut self, form: &ElementHandle) -> PageResult<()>;

    /// Accept (`true`) or dismiss (`false`) every following confirm dialog
    async fn confirm_dialog(&mut self, accept: bool) -> PageResult<()>;

    /// Messages of every dialog raised so far in this session
    async fn dialog_messages(&mut self) -> PageResult<Vec<String>>;

    async fn text(&mut self, element: &ElementHandle) -> PageResult<String>;

    async fn attribute(&mut self, element: &ElementHandle, name: &str) -> PageResult<Option<String>>;

    async fn input_value(&mut self, element: &ElementHandle) -> PageResult<String>;

    async fn is_checked(&mut self, element: &ElementHandle) -> PageResult<bool>;

    async fn screenshot(&mut self, path: &Path) -> PageResult<()>;

    async fn close(&mut self) -> PageResult<()> {
        Ok(())
    }

    /// Free per-handle resources held by the driver.
    ///
    /// A released handle may fail with [`PageError::StaleElement`] afterwards.
    /// Called between page-object operations, never inside one.
    async fn release_handles(&mut self) -> PageResult<()> {
        Ok(())
    }

    /// First element matching `locator`, retrying until the wait bound.
    ///
    /// Fails with [`PageError::ElementNotFound`] once the bound elapses.
    async fn locate(
        &mut self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
    ) -> PageResult<ElementHandle> {
        self.locate_nth(scope, locator, 0).await
    }

    /// The `index`-th match (zero-based), waiting until that many exist
    async fn locate_nth(
        &mut self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
        index: usize,
    ) -> PageResult<ElementHandle> {
        let mut found = self.locate_at_least(scope, locator, index + 1).await?;
        Ok(found.swap_remove(index))
    }

    /// All elements matching `locator`, waiting until at least one is present
    async fn locate_all(
        &mut self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
    ) -> PageResult<Vec<ElementHandle>> {
        self.locate_at_least(scope, locator, 1).await
    }

    /// Poll [`Automation::query_all`] until `count` matches exist
    async fn locate_at_least(
        &mut self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
        count: usize,
    ) -> PageResult<Vec<ElementHandle>> {
        let wait = self.wait_config();
        let deadline = Instant::now() + wait.timeout;
        let mut attempts = 0usize;

        loop {
            attempts += 1;
            let found = self.query_all(scope, locator).await?;
            if found.len() >= count {
                trace!(%locator, attempts, "located {} element(s)", found.len());
                return Ok(found);
            }

            if Instant::now() >= deadline {
                debug!(%locator, attempts, "gave up after {:?}", wait.timeout);
                let locator = if count > 1 {
                    format!("{} (index {})", locator, count - 1)
                } else {
                    locator.to_string()
                };
                return Err(PageError::ElementNotFound {
                    locator,
                    scope: scope
                        .map(|s| s.description().to_string())
                        .unwrap_or_else(|| "document".to_string()),
                });
            }

            sleep(wait.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_selectors() {
        assert_eq!(Locator::tag("nb-card").to_selector(), "nb-card");
        assert_eq!(Locator::class("nb-plus").to_selector(), ".nb-plus");
        assert_eq!(
            Locator::placeholder("Jane Doe").to_selector(),
            r#"[placeholder="Jane Doe"]"#
        );
        assert_eq!(
            Locator::tag_with_text("nb-card", "Inline form").to_selector(),
            r#"nb-card:has-text("Inline form")"#
        );
        assert_eq!(Locator::text("Forms").to_selector(), r#":text("Forms")"#);
    }

    #[test]
    fn test_locator_quotes_are_escaped() {
        assert_eq!(
            Locator::text(r#"say "hi""#).to_selector(),
            r#":text("say \"hi\"")"#
        );
    }

    #[test]
    fn test_wait_config_poll_never_zero() {
        let wait = WaitConfig::from_millis(100, 0);
        assert_eq!(wait.poll_interval, Duration::from_millis(1));
    }
}
