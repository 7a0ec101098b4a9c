//! Declarative YAML scenarios

use std::path::Path;

use ngx_pages::Destination;
use serde::{Deserialize, Serialize};

use crate::error::{E2eError, E2eResult};

/// A complete scenario parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering scenarios
    #[serde(default)]
    pub tags: Vec<String>,

    /// Skipped scenarios are reported but never launched
    #[serde(default)]
    pub skip: bool,

    /// Steps to execute in order
    pub steps: Vec<ScenarioStep>,
}

/// A single step, expressed in page-object terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Load the application shell
    OpenHome,

    /// Go to a known page through the side menu
    Navigate { page: Destination },

    /// Click through arbitrary menu labels
    NavigateMenu { group: String, item: String },

    SubmitInlineForm { name: String, email: String },

    SubmitBasicForm { email: String, password: String },

    AddRecord { first_name: String, last_name: String },

    UpdateAge { first_name: String, age: String },

    DeleteRow { index: usize },

    /// Click a row's trash icon and dismiss the confirm dialog
    CancelDeleteRow { index: usize },

    /// The most recent browser dialog showed `message`
    AssertDialog { message: String },

    /// Type into the Age filter and wait for the rows to follow
    FilterByAge { age: String },

    /// At least one row is shown and every age contains `age`
    AssertAgesContain { age: String },

    /// The table shows its empty-result row
    AssertNoData,

    /// Open a colored tooltip, optionally checking its text
    ShowTooltip {
        button: String,
        #[serde(default)]
        text: Option<String>,
    },

    CheckGridRadio { index: usize },

    AssertGridRadio {
        index: usize,
        #[serde(default)]
        checked: Option<bool>,
        #[serde(default)]
        disabled: Option<bool>,
    },

    CheckAllToastrOptions,

    ToggleToastrOption { index: usize },

    AssertToastrOptions { checked: Vec<bool> },

    /// Pick `today + days_from_today` and check the input shows it
    SelectDate { days_from_today: i64 },

    /// Remember the current row count for a later `assert_row_count`
    RecordRowCount,

    /// Row count must equal the recorded count plus `delta`
    AssertRowCount {
        #[serde(default)]
        delta: i64,
    },

    AssertRow {
        index: usize,
        #[serde(default)]
        first_name: Option<String>,
        #[serde(default)]
        last_name: Option<String>,
        #[serde(default)]
        age: Option<String>,
    },

    AssertNoRow { first_name: String },

    /// Some element shows `text`, optionally restricted to a tag
    AssertVisible {
        #[serde(default)]
        tag: Option<String>,
        text: String,
    },

    Screenshot { name: String },

    /// Log a message (for debugging)
    Log { message: String },
}

impl ScenarioStep {
    /// Short label used in results and logs
    pub fn name(&self) -> String {
        match self {
            ScenarioStep::OpenHome => "open_home".to_string(),
            ScenarioStep::Navigate { page } => format!("navigate:{}", page),
            ScenarioStep::NavigateMenu { group, item } => format!("navigate_menu:{}/{}", group, item),
            ScenarioStep::SubmitInlineForm { name, .. } => format!("submit_inline_form:{}", name),
            ScenarioStep::SubmitBasicForm { email, .. } => format!("submit_basic_form:{}", email),
            ScenarioStep::AddRecord { first_name, last_name } => {
                format!("add_record:{} {}", first_name, last_name)
            }
            ScenarioStep::UpdateAge { first_name, age } => format!("update_age:{}={}", first_name, age),
            ScenarioStep::DeleteRow { index } => format!("delete_row:{}", index),
            ScenarioStep::CancelDeleteRow { index } => format!("cancel_delete_row:{}", index),
            ScenarioStep::AssertDialog { message } => format!("assert_dialog:{}", message),
            ScenarioStep::FilterByAge { age } => format!("filter_by_age:{}", age),
            ScenarioStep::AssertAgesContain { age } => format!("assert_ages_contain:{}", age),
            ScenarioStep::AssertNoData => "assert_no_data".to_string(),
            ScenarioStep::ShowTooltip { button, .. } => format!("show_tooltip:{}", button),
            ScenarioStep::CheckGridRadio { index } => format!("check_grid_radio:{}", index),
            ScenarioStep::AssertGridRadio { index, .. } => format!("assert_grid_radio:{}", index),
            ScenarioStep::CheckAllToastrOptions => "check_all_toastr_options".to_string(),
            ScenarioStep::ToggleToastrOption { index } => format!("toggle_toastr_option:{}", index),
            ScenarioStep::AssertToastrOptions { checked } => {
                format!("assert_toastr_options:{:?}", checked)
            }
            ScenarioStep::SelectDate { days_from_today } => format!("select_date:{:+}d", days_from_today),
            ScenarioStep::RecordRowCount => "record_row_count".to_string(),
            ScenarioStep::AssertRowCount { delta } => format!("assert_row_count:{:+}", delta),
            ScenarioStep::AssertRow { index, .. } => format!("assert_row:{}", index),
            ScenarioStep::AssertNoRow { first_name } => format!("assert_no_row:{}", first_name),
            ScenarioStep::AssertVisible { text, .. } => format!("assert_visible:{}", text),
            ScenarioStep::Screenshot { name } => format!("screenshot:{}", name),
            ScenarioStep::Log { message } => {
                format!("log:{}", message.chars().take(30).collect::<String>())
            }
        }
    }
}

impl ScenarioSpec {
    /// Parse a scenario from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| E2eError::SpecParse(format!("{}: {}", path.display(), e)))
    }

    /// Load all scenarios under a directory, ordered by file name
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        if !dir.is_dir() {
            return Err(E2eError::SpecParse(format!(
                "scenario directory not found: {}",
                dir.display()
            )));
        }

        let mut specs = Vec::new();
        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            specs.push(Self::from_file(entry.path())?);
        }

        Ok(specs)
    }

    /// Filter scenarios by tag
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs.iter().filter(|s| s.tags.iter().any(|t| t == tag)).collect()
    }
}
