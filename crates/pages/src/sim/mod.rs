//! In-memory stand-in for the ngx-admin application
//!
//! `SimulatedApp` implements [`Automation`] over a model of the screens the
//! page objects touch: the side menu, form layouts, datepicker, smart table,
//! toastr and tooltip pages, plus browser confirm dialogs. It lets page
//! objects and scenarios run without a browser.
//!
//! Locators match structurally (tag, class, attribute, own text, subtree
//! text) and are case-sensitive. Elements keep their identity across
//! re-renders while their component survives; a handle to a removed element
//! fails with [`PageError::StaleElement`].

mod app;
mod dom;

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::{debug, trace};

use crate::driver::{Automation, ElementHandle, InteractOptions, Locator, WaitConfig};
use crate::error::{PageError, PageResult};

use app::{Action, AppState};
use dom::Dom;

pub use app::{FormSubmission, DELETE_CONFIRM_MESSAGE};

/// Wait bound used by the simulated app unless overridden
pub const SIM_TIMEOUT_MS: u64 = 250;
pub const SIM_POLL_INTERVAL_MS: u64 = 5;

pub struct SimulatedApp {
    state: Option<AppState>,
    dom: Dom,
    wait: WaitConfig,
    today: NaiveDate,
    render_lag: u32,
    pending_polls: u32,
    accept_dialogs: bool,
    dialogs: Vec<String>,
    submissions: Vec<FormSubmission>,
    handle_keys: Vec<String>,
    handle_ids: HashMap<String, u64>,
}

impl Default for SimulatedApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedApp {
    /// A blank session; call [`Automation::visit`] to load the app
    pub fn new() -> Self {
        Self {
            state: None,
            dom: Dom::default(),
            wait: WaitConfig::from_millis(SIM_TIMEOUT_MS, SIM_POLL_INTERVAL_MS),
            today: Local::now().date_naive(),
            render_lag: 0,
            pending_polls: 0,
            accept_dialogs: false,
            dialogs: Vec::new(),
            submissions: Vec::new(),
            handle_keys: Vec::new(),
            handle_ids: HashMap::new(),
        }
    }

    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Date the datepicker treats as today
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Page content stays invisible for this many queries after each page load
    pub fn with_render_lag(mut self, polls: u32) -> Self {
        self.render_lag = polls;
        self
    }

    /// Every form submit the app has received, oldest first
    pub fn submissions(&self) -> &[FormSubmission] {
        &self.submissions
    }

    /// Route of the current screen, `None` before the first visit
    pub fn current_route(&self) -> Option<String> {
        self.state.as_ref().map(|s| s.screen.route())
    }

    fn rerender(&mut self) {
        self.dom = match &self.state {
            Some(state) => Dom::build(state.render()),
            None => Dom::default(),
        };
    }

    fn handle_for(&mut self, index: usize) -> ElementHandle {
        let node = self.dom.node(index);
        let id = match self.handle_ids.get(&node.key) {
            Some(id) => *id,
            None => {
                let id = self.handle_keys.len() as u64;
                self.handle_keys.push(node.key.clone());
                self.handle_ids.insert(node.key.clone(), id);
                id
            }
        };
        ElementHandle::new(id, node.describe())
    }

    /// Current DOM index behind `handle`
    fn resolve(&self, handle: &ElementHandle) -> PageResult<usize> {
        self.handle_keys
            .get(handle.id() as usize)
            .and_then(|key| self.dom.find(key))
            .ok_or_else(|| PageError::StaleElement(handle.description().to_string()))
    }

    /// Disabled controls refuse input even when forced
    fn ensure_interactable(&self, index: usize, force: bool, handle: &ElementHandle) -> PageResult<()> {
        if self.dom.node(index).attrs.contains_key("disabled") {
            return Err(PageError::NotInteractable(format!("{} (disabled)", handle.description())));
        }
        if self.dom.is_hidden(index) && !force {
            return Err(PageError::NotInteractable(format!(
                "{} (hidden; retry with force)",
                handle.description()
            )));
        }
        Ok(())
    }

    fn resolve_input(&self, handle: &ElementHandle) -> PageResult<usize> {
        let index = self.resolve(handle)?;
        if self.dom.node(index).tag != "input" {
            return Err(PageError::Driver(format!(
                "{} is not an input element",
                handle.description()
            )));
        }
        Ok(index)
    }

    fn state_mut(&mut self) -> PageResult<&mut AppState> {
        self.state
            .as_mut()
            .ok_or_else(|| PageError::Driver("no page loaded".to_string()))
    }

    fn run(&mut self, action: Action) -> PageResult<()> {
        let accept = self.accept_dialogs;
        let outcome = self.state_mut()?.apply(action, accept);

        if let Some(message) = outcome.dialog {
            debug!(accept, "confirm dialog: {}", message);
            self.dialogs.push(message);
        }
        if let Some(submission) = outcome.submission {
            debug!(form = %submission.form, "form submitted");
            self.submissions.push(submission);
        }
        if outcome.navigated {
            self.pending_polls = self.render_lag;
        }
        self.rerender();
        Ok(())
    }

    fn select_radio(&mut self, index: usize) -> PageResult<()> {
        let key = self.dom.node(index).key.clone();
        self.state_mut()?.select_radio(&key);
        self.rerender();
        Ok(())
    }

    fn toggle_checkbox(&mut self, index: usize, value: Option<bool>) -> PageResult<()> {
        let key = self.dom.node(index).key.clone();
        let state = self.state_mut()?;
        let checked = value.unwrap_or(!state.is_checked(&key));
        state.set_checked(&key, checked);
        self.rerender();
        Ok(())
    }
}

#[async_trait]
impl Automation for SimulatedApp {
    fn wait_config(&self) -> WaitConfig {
        self.wait
    }

    async fn visit(&mut self, path: &str) -> PageResult<()> {
        debug!(path, "simulated visit");
        self.state = Some(AppState::load(path, self.today));
        self.pending_polls = self.render_lag;
        self.rerender();
        Ok(())
    }

    async fn query_all(
        &mut self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
    ) -> PageResult<Vec<ElementHandle>> {
        if self.pending_polls > 0 {
            self.pending_polls -= 1;
            trace!(remaining = self.pending_polls, "page still rendering");
            return Ok(Vec::new());
        }
        if self.dom.is_empty() {
            return Ok(Vec::new());
        }

        let scope = match scope {
            Some(handle) => self.resolve(handle)?,
            None => 0,
        };
        let matches: Vec<usize> = self
            .dom
            .descendants(scope)
            .into_iter()
            .filter(|&i| self.dom.matches(i, locator))
            .collect();

        Ok(matches.into_iter().map(|i| self.handle_for(i)).collect())
    }

    async fn click(&mut self, element: &ElementHandle, options: InteractOptions) -> PageResult<()> {
        let index = self.resolve(element)?;
        self.ensure_interactable(index, options.force, element)?;

        match self.dom.click_target(index) {
            Some(Action::ToggleCheckbox) => self.toggle_checkbox(index, None),
            Some(Action::SelectRadio) => self.select_radio(index),
            Some(action) => self.run(action),
            None => Ok(()),
        }
    }

    async fn type_text(&mut self, element: &ElementHandle, text: &str) -> PageResult<()> {
        let index = self.resolve_input(element)?;
        self.ensure_interactable(index, false, element)?;
        let key = self.dom.node(index).key.clone();
        let state = self.state_mut()?;
        let value = state.value(&key) + text;
        state.set_value(&key, value);
        self.rerender();
        Ok(())
    }

    async fn clear(&mut self, element: &ElementHandle) -> PageResult<()> {
        let index = self.resolve_input(element)?;
        self.ensure_interactable(index, false, element)?;
        let key = self.dom.node(index).key.clone();
        self.state_mut()?.set_value(&key, String::new());
        self.rerender();
        Ok(())
    }

    async fn check(&mut self, element: &ElementHandle, options: InteractOptions) -> PageResult<()> {
        let index = self.resolve_input(element)?;
        let kind = self.dom.node(index).attrs.get("type").cloned().unwrap_or_default();
        if kind != "checkbox" && kind != "radio" {
            return Err(PageError::Driver(format!(
                "{} is not a checkbox or radio",
                element.description()
            )));
        }
        self.ensure_interactable(index, options.force, element)?;
        if kind == "radio" {
            self.select_radio(index)
        } else {
            self.toggle_checkbox(index, Some(true))
        }
    }

    async fn submit(&mut self, form: &ElementHandle) -> PageResult<()> {
        let index = self.resolve(form)?;
        if self.dom.node(index).tag != "form" {
            return Err(PageError::Driver(format!("{} is not a form", form.description())));
        }

        let action = self
            .dom
            .descendants(index)
            .into_iter()
            .find(|&i| self.dom.node(i).attrs.get("type").map(String::as_str) == Some("submit"))
            .and_then(|i| self.dom.click_target(i))
            .ok_or_else(|| PageError::Driver(format!("{} has no submit button", form.description())))?;
        self.run(action)
    }

    async fn confirm_dialog(&mut self, accept: bool) -> PageResult<()> {
        self.accept_dialogs = accept;
        Ok(())
    }

    async fn dialog_messages(&mut self) -> PageResult<Vec<String>> {
        Ok(self.dialogs.clone())
    }

    async fn text(&mut self, element: &ElementHandle) -> PageResult<String> {
        let index = self.resolve(element)?;
        Ok(self.dom.subtree_text(index))
    }

    async fn attribute(&mut self, element: &ElementHandle, name: &str) -> PageResult<Option<String>> {
        let index = self.resolve(element)?;
        Ok(self.dom.node(index).attrs.get(name).cloned())
    }

    async fn input_value(&mut self, element: &ElementHandle) -> PageResult<String> {
        let index = self.resolve_input(element)?;
        let key = &self.dom.node(index).key;
        Ok(self.state.as_ref().map(|s| s.value(key)).unwrap_or_default())
    }

    async fn is_checked(&mut self, element: &ElementHandle) -> PageResult<bool> {
        let index = self.resolve_input(element)?;
        let key = &self.dom.node(index).key;
        Ok(self.state.as_ref().map(|s| s.is_checked(key)).unwrap_or(false))
    }

    /// Writes an outline of the current element tree; there are no pixels
    async fn screenshot(&mut self, path: &Path) -> PageResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PageError::Driver(e.to_string()))?;
        }
        std::fs::write(path, self.dom.outline()).map_err(|e| PageError::Driver(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_queries_before_visit_find_nothing() {
        let mut app = SimulatedApp::new();
        let found = app.query_all(None, &Locator::tag("nb-menu")).await.unwrap();
        assert!(found.is_empty());
        assert_eq!(app.current_route(), None);
    }

    #[tokio::test]
    async fn test_handles_survive_rerender_but_not_removal() {
        let mut app = SimulatedApp::new();
        app.visit("/pages/tables/smart-table").await.unwrap();

        let trash = app.locate(None, &Locator::class("nb-trash")).await.unwrap();
        let plus = app.locate(None, &Locator::class("nb-plus")).await.unwrap();
        app.click(&plus, InteractOptions::default()).await.unwrap();
        assert!(app.attribute(&plus, "class").await.is_ok());

        app.confirm_dialog(true).await.unwrap();
        app.click(&trash, InteractOptions::default()).await.unwrap();
        assert!(matches!(
            app.attribute(&trash, "class").await,
            Err(PageError::StaleElement(_))
        ));
    }

    #[tokio::test]
    async fn test_hidden_checkbox_needs_force() {
        let mut app = SimulatedApp::new();
        app.visit("/pages/forms/layouts").await.unwrap();
        let checkbox = app
            .locate(None, &Locator::attribute("type", "checkbox"))
            .await
            .unwrap();

        let err = app.check(&checkbox, InteractOptions::default()).await.unwrap_err();
        assert!(matches!(err, PageError::NotInteractable(_)));

        app.check(&checkbox, InteractOptions::forced()).await.unwrap();
        assert!(app.is_checked(&checkbox).await.unwrap());
    }

    #[tokio::test]
    async fn test_disabled_radio_refuses_forced_check() {
        let mut app = SimulatedApp::new();
        app.visit("/pages/forms/layouts").await.unwrap();
        let radios = app
            .locate_at_least(None, &Locator::attribute("type", "radio"), 3)
            .await
            .unwrap();

        let err = app.check(&radios[2], InteractOptions::forced()).await.unwrap_err();
        assert!(matches!(err, PageError::NotInteractable(ref what) if what.contains("disabled")));
        assert!(!app.is_checked(&radios[2]).await.unwrap());
    }

    #[tokio::test]
    async fn test_screenshot_writes_outline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shots").join("home.txt");
        let mut app = SimulatedApp::new();
        app.visit("/").await.unwrap();
        app.screenshot(&path).await.unwrap();

        let outline = std::fs::read_to_string(&path).unwrap();
        assert!(outline.contains("<nb-menu>"));
    }
}
