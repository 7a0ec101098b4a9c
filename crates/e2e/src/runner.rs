//! Scenario runner: one fresh session per scenario, stop at the first failing step

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use ngx_pages::{
    Automation, DatepickerPage, FormLayoutsPage, HomePage, Locator, NavigationPage, SimulatedApp,
    SmartTablePage, ToastrPage, TooltipPage, WaitConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SuiteConfig;
use crate::error::{E2eError, E2eResult};
use crate::spec::{ScenarioSpec, ScenarioStep};

/// Produces a fresh automation session for each scenario
#[async_trait]
pub trait Launcher: Send + Sync {
    type Driver: Automation + Send;

    async fn launch(&self) -> E2eResult<Self::Driver>;
}

/// Runs scenarios against the in-memory app
#[derive(Debug, Clone, Default)]
pub struct SimLauncher {
    wait: Option<WaitConfig>,
}

impl SimLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = Some(wait);
        self
    }
}

#[async_trait]
impl Launcher for SimLauncher {
    type Driver = SimulatedApp;

    async fn launch(&self) -> E2eResult<SimulatedApp> {
        let mut app = SimulatedApp::new();
        if let Some(wait) = self.wait {
            app = app.with_wait(wait);
        }
        Ok(app)
    }
}

/// Result of executing one step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot_path: Option<PathBuf>,
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub skipped: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub error: Option<String>,
    pub failure_screenshot: Option<PathBuf>,
}

impl TestResult {
    fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            skipped: true,
            duration_ms: 0,
            steps: Vec::new(),
            error: None,
            failure_screenshot: None,
        }
    }

    /// The step that stopped this scenario, if any
    pub fn failed_step(&self) -> Option<&StepResult> {
        self.steps.iter().find(|s| !s.success)
    }
}

/// Result of running a batch of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// State carried between the steps of one scenario
#[derive(Debug, Default)]
struct ScenarioContext {
    recorded_rows: Option<usize>,
}

pub struct ScenarioRunner<L: Launcher> {
    launcher: L,
    scenarios_dir: PathBuf,
    output_dir: PathBuf,
    screenshot_on_failure: bool,
}

impl<L: Launcher> ScenarioRunner<L> {
    pub fn new(launcher: L, config: &SuiteConfig) -> Self {
        Self {
            launcher,
            scenarios_dir: config.scenarios_dir.clone(),
            output_dir: config.output_dir.clone(),
            screenshot_on_failure: config.screenshot_on_failure,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn screenshot_dir(&self) -> PathBuf {
        self.output_dir.join("screenshots")
    }

    /// Run every scenario in the scenarios directory
    pub async fn run_all(&self) -> E2eResult<TestSuiteResult> {
        let specs = ScenarioSpec::load_all(&self.scenarios_dir)?;
        Ok(self.run_scenarios(&specs).await)
    }

    /// Run scenarios carrying `tag`
    pub async fn run_tagged(&self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = ScenarioSpec::load_all(&self.scenarios_dir)?;
        let filtered: Vec<ScenarioSpec> = ScenarioSpec::filter_by_tag(&specs, tag)
            .into_iter()
            .cloned()
            .collect();
        Ok(self.run_scenarios(&filtered).await)
    }

    /// Run the scenario called `name`
    pub async fn run_named(&self, name: &str) -> E2eResult<TestSuiteResult> {
        let specs = ScenarioSpec::load_all(&self.scenarios_dir)?;
        let spec = specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("Scenario not found: {}", name)))?;
        Ok(self.run_scenarios(std::slice::from_ref(&spec)).await)
    }

    pub async fn run_scenarios(&self, specs: &[ScenarioSpec]) -> TestSuiteResult {
        let start = Instant::now();
        let mut results = Vec::with_capacity(specs.len());
        let (mut passed, mut failed, mut skipped) = (0, 0, 0);

        info!("Running {} scenario(s)...", specs.len());

        for spec in specs {
            if spec.skip {
                skipped += 1;
                info!("- {} (skipped)", spec.name);
                results.push(TestResult::skipped(&spec.name));
                continue;
            }

            let result = self.run_scenario(spec).await;
            if result.success {
                passed += 1;
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scenario results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        TestSuiteResult {
            total: specs.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }

    /// Run one scenario in its own session
    pub async fn run_scenario(&self, spec: &ScenarioSpec) -> TestResult {
        let start = Instant::now();
        debug!("Running scenario: {}", spec.name);

        let mut result = TestResult {
            name: spec.name.clone(),
            success: false,
            skipped: false,
            duration_ms: 0,
            steps: Vec::new(),
            error: None,
            failure_screenshot: None,
        };

        let mut driver = match self.launcher.launch().await {
            Ok(driver) => driver,
            Err(e) => {
                result.error = Some(format!("launch failed: {}", e));
                result.duration_ms = start.elapsed().as_millis() as u64;
                return result;
            }
        };

        let mut ctx = ScenarioContext::default();
        for step in &spec.steps {
            let step_result = self.execute_step(&mut driver, &mut ctx, step).await;
            let ok = step_result.success;
            if !ok {
                let failure = E2eError::StepFailed {
                    step: step_result.step_name.clone(),
                    reason: step_result.error.clone().unwrap_or_default(),
                };
                result.error = Some(failure.to_string());
            }
            result.steps.push(step_result);
            if !ok {
                break;
            }
        }

        if result.error.is_some() && self.screenshot_on_failure {
            let path = self
                .screenshot_dir()
                .join(format!("{}-failure.png", spec.name));
            match driver.screenshot(&path).await {
                Ok(()) => result.failure_screenshot = Some(path),
                Err(e) => warn!("Failure screenshot for '{}' not taken: {}", spec.name, e),
            }
        }

        if let Err(e) = driver.close().await {
            warn!("Closing session for '{}' failed: {}", spec.name, e);
        }

        result.success = result.error.is_none();
        result.duration_ms = start.elapsed().as_millis() as u64;
        result
    }

    async fn execute_step(
        &self,
        driver: &mut L::Driver,
        ctx: &mut ScenarioContext,
        step: &ScenarioStep,
    ) -> StepResult {
        let start = Instant::now();
        let step_name = step.name();
        debug!("Executing step: {}", step_name);

        let outcome = self.perform(driver, ctx, step).await;
        if let Err(e) = driver.release_handles().await {
            warn!("Releasing handles after '{}' failed: {}", step_name, e);
        }
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(screenshot_path) => StepResult {
                success: true,
                step_name,
                duration_ms,
                error: None,
                screenshot_path,
            },
            Err(e) => StepResult {
                success: false,
                step_name,
                duration_ms,
                error: Some(e.to_string()),
                screenshot_path: None,
            },
        }
    }

    /// Map a step onto page-object calls; returns a screenshot path if one was taken
    async fn perform(
        &self,
        driver: &mut L::Driver,
        ctx: &mut ScenarioContext,
        step: &ScenarioStep,
    ) -> E2eResult<Option<PathBuf>> {
        match step {
            ScenarioStep::OpenHome => HomePage::new(driver).open().await?,
            ScenarioStep::Navigate { page } => NavigationPage::new(driver).go_to(*page).await?,
            ScenarioStep::NavigateMenu { group, item } => {
                NavigationPage::new(driver).go_to_menu_item(group, item).await?
            }
            ScenarioStep::SubmitInlineForm { name, email } => {
                FormLayoutsPage::new(driver)
                    .submit_inline_form_with_name_and_email(name, email)
                    .await?
            }
            ScenarioStep::SubmitBasicForm { email, password } => {
                FormLayoutsPage::new(driver)
                    .submit_basic_form_with_email_and_password(email, password)
                    .await?
            }
            ScenarioStep::AddRecord { first_name, last_name } => {
                SmartTablePage::new(driver)
                    .add_new_record(first_name, last_name)
                    .await?
            }
            ScenarioStep::UpdateAge { first_name, age } => {
                SmartTablePage::new(driver)
                    .update_age_by_first_name(first_name, age)
                    .await?
            }
            ScenarioStep::DeleteRow { index } => {
                SmartTablePage::new(driver).delete_row_by_index(*index).await?
            }
            ScenarioStep::CancelDeleteRow { index } => {
                SmartTablePage::new(driver)
                    .cancel_delete_row_by_index(*index)
                    .await?
            }
            ScenarioStep::AssertDialog { message } => {
                let messages = driver.dialog_messages().await?;
                match messages.last() {
                    Some(last) if last == message => {}
                    Some(last) => {
                        return Err(E2eError::AssertionFailed(format!(
                            "last dialog said '{}', expected '{}'",
                            last, message
                        )))
                    }
                    None => {
                        return Err(E2eError::AssertionFailed(format!(
                            "no dialog raised, expected '{}'",
                            message
                        )))
                    }
                }
            }
            ScenarioStep::FilterByAge { age } => SmartTablePage::new(driver).filter_by_age(age).await?,
            ScenarioStep::AssertAgesContain { age } => {
                let rows = SmartTablePage::new(driver).rows().await?;
                if rows.is_empty() {
                    return Err(E2eError::AssertionFailed(format!(
                        "no rows shown for age '{}'",
                        age
                    )));
                }
                if let Some(row) = rows.iter().find(|r| !r.age.contains(age.as_str())) {
                    return Err(E2eError::AssertionFailed(format!(
                        "row '{}' has age '{}', expected it to contain '{}'",
                        row.first_name, row.age, age
                    )));
                }
            }
            ScenarioStep::AssertNoData => {
                if !SmartTablePage::new(driver).has_no_data().await? {
                    return Err(E2eError::AssertionFailed(
                        "table does not show its empty-result row".to_string(),
                    ));
                }
            }
            ScenarioStep::ShowTooltip { button, text } => {
                let shown = TooltipPage::new(driver).show_colored_tooltip(button).await?;
                if let Some(text) = text {
                    if shown != *text {
                        return Err(E2eError::AssertionFailed(format!(
                            "tooltip says '{}', expected '{}'",
                            shown, text
                        )));
                    }
                }
            }
            ScenarioStep::CheckGridRadio { index } => {
                FormLayoutsPage::new(driver).check_grid_radio(*index).await?
            }
            ScenarioStep::AssertGridRadio {
                index,
                checked,
                disabled,
            } => {
                let states = FormLayoutsPage::new(driver).grid_radio_states().await?;
                let state = states.get(*index).ok_or_else(|| {
                    E2eError::AssertionFailed(format!(
                        "radio {} not found, {} available",
                        index,
                        states.len()
                    ))
                })?;
                let checks = [("checked", checked, state.checked), ("disabled", disabled, state.disabled)];
                for (field, wanted, actual) in checks {
                    if let Some(wanted) = wanted {
                        if *wanted != actual {
                            return Err(E2eError::AssertionFailed(format!(
                                "radio '{}' {} is {}, expected {}",
                                state.label, field, actual, wanted
                            )));
                        }
                    }
                }
            }
            ScenarioStep::CheckAllToastrOptions => ToastrPage::new(driver).check_all_options().await?,
            ScenarioStep::ToggleToastrOption { index } => {
                ToastrPage::new(driver).toggle_option(*index).await?
            }
            ScenarioStep::AssertToastrOptions { checked } => {
                let states = ToastrPage::new(driver).option_states().await?;
                if states != *checked {
                    return Err(E2eError::AssertionFailed(format!(
                        "toaster options are {:?}, expected {:?}",
                        states, checked
                    )));
                }
            }
            ScenarioStep::SelectDate { days_from_today } => {
                let mut picker = DatepickerPage::new(driver);
                let expected = picker.select_day_from_today(*days_from_today).await?;
                let shown = picker.selected_date().await?;
                if shown != expected {
                    return Err(E2eError::AssertionFailed(format!(
                        "datepicker shows '{}', expected '{}'",
                        shown, expected
                    )));
                }
            }
            ScenarioStep::RecordRowCount => {
                let count = SmartTablePage::new(driver).row_count().await?;
                debug!(count, "recorded row count");
                ctx.recorded_rows = Some(count);
            }
            ScenarioStep::AssertRowCount { delta } => {
                let recorded = ctx.recorded_rows.ok_or_else(|| {
                    E2eError::AssertionFailed("no row count recorded earlier in this scenario".to_string())
                })?;
                let expected = (recorded as i64).checked_add(*delta).ok_or_else(|| {
                    E2eError::AssertionFailed(format!(
                        "recorded {} row(s) plus delta {} overflows",
                        recorded, delta
                    ))
                })?;
                let actual = SmartTablePage::new(driver).row_count().await? as i64;
                if actual != expected {
                    return Err(E2eError::AssertionFailed(format!(
                        "expected {} row(s), found {}",
                        expected, actual
                    )));
                }
            }
            ScenarioStep::AssertRow {
                index,
                first_name,
                last_name,
                age,
            } => {
                let row = SmartTablePage::new(driver).row(*index).await?;
                let checks = [
                    ("first name", first_name, &row.first_name),
                    ("last name", last_name, &row.last_name),
                    ("age", age, &row.age),
                ];
                for (field, wanted, actual) in checks {
                    if let Some(wanted) = wanted {
                        if wanted != actual {
                            return Err(E2eError::AssertionFailed(format!(
                                "row {} {} is '{}', expected '{}'",
                                index, field, actual, wanted
                            )));
                        }
                    }
                }
            }
            ScenarioStep::AssertNoRow { first_name } => {
                let found = SmartTablePage::new(driver)
                    .find_rows_by_first_name(first_name)
                    .await?;
                if !found.is_empty() {
                    return Err(E2eError::AssertionFailed(format!(
                        "'{}' still present at row(s) {:?}",
                        first_name, found
                    )));
                }
            }
            ScenarioStep::AssertVisible { tag, text } => {
                let locator = match tag {
                    Some(tag) => Locator::tag_with_text(tag.as_str(), text.as_str()),
                    None => Locator::text(text.as_str()),
                };
                if let Err(e) = driver.locate(None, &locator).await {
                    return Err(E2eError::AssertionFailed(format!("{} is not visible: {}", locator, e)));
                }
            }
            ScenarioStep::Screenshot { name } => {
                let path = self.screenshot_dir().join(format!("{}.png", name));
                driver.screenshot(&path).await?;
                return Ok(Some(path));
            }
            ScenarioStep::Log { message } => info!("[SCENARIO LOG] {}", message),
        }
        Ok(None)
    }

    /// Write results to `test-results.json` in the output directory
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
