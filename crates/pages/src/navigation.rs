//! Side-menu navigation between application pages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::driver::{Automation, InteractOptions, Locator};
use crate::error::{PageError, PageResult};

/// Pages reachable from the application shell's side menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    FormLayouts,
    Datepicker,
    SmartTable,
    Toaster,
    Tooltip,
}

impl Destination {
    pub const ALL: [Destination; 5] = [
        Destination::FormLayouts,
        Destination::Datepicker,
        Destination::SmartTable,
        Destination::Toaster,
        Destination::Tooltip,
    ];

    /// Menu group label that holds this page
    pub fn group(&self) -> &'static str {
        match self {
            Destination::FormLayouts | Destination::Datepicker => "Forms",
            Destination::SmartTable => "Tables & Data",
            Destination::Toaster | Destination::Tooltip => "Modal & Overlays",
        }
    }

    /// Link label inside the group
    pub fn item(&self) -> &'static str {
        match self {
            Destination::FormLayouts => "Form Layouts",
            Destination::Datepicker => "Datepicker",
            Destination::SmartTable => "Smart Table",
            Destination::Toaster => "Toastr",
            Destination::Tooltip => "Tooltip",
        }
    }

    /// Card heading that identifies the loaded page
    pub fn landmark(&self) -> &'static str {
        match self {
            Destination::FormLayouts => "Inline form",
            Destination::Datepicker => "Common Datepicker",
            Destination::SmartTable => "Smart Table",
            Destination::Toaster => "Toaster configuration",
            Destination::Tooltip => "Tooltip With Icon",
        }
    }

    pub fn landmark_locator(&self) -> Locator {
        Locator::tag_with_text("nb-card", self.landmark())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::FormLayouts => "form-layouts",
            Destination::Datepicker => "datepicker",
            Destination::SmartTable => "smart-table",
            Destination::Toaster => "toaster",
            Destination::Tooltip => "tooltip",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Destination {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "form-layouts" => Ok(Destination::FormLayouts),
            "datepicker" => Ok(Destination::Datepicker),
            "smart-table" => Ok(Destination::SmartTable),
            "toaster" | "toastr" => Ok(Destination::Toaster),
            "tooltip" => Ok(Destination::Tooltip),
            _ => Err(PageError::Navigation {
                label: s.to_string(),
            }),
        }
    }
}

/// Drives the side menu; hides the menu hierarchy from scenarios
pub struct NavigationPage<'a, A: Automation + ?Sized> {
    driver: &'a mut A,
}

impl<'a, A: Automation + ?Sized> NavigationPage<'a, A> {
    pub fn new(driver: &'a mut A) -> Self {
        Self { driver }
    }

    pub async fn go_to_form_layouts(&mut self) -> PageResult<()> {
        self.go_to(Destination::FormLayouts).await
    }

    pub async fn go_to_datepicker(&mut self) -> PageResult<()> {
        self.go_to(Destination::Datepicker).await
    }

    pub async fn go_to_smart_table(&mut self) -> PageResult<()> {
        self.go_to(Destination::SmartTable).await
    }

    pub async fn go_to_toaster(&mut self) -> PageResult<()> {
        self.go_to(Destination::Toaster).await
    }

    pub async fn go_to_tooltip(&mut self) -> PageResult<()> {
        self.go_to(Destination::Tooltip).await
    }

    /// Navigate to `destination` and wait for its landmark card
    pub async fn go_to(&mut self, destination: Destination) -> PageResult<()> {
        info!("Navigating to {}", destination);
        self.go_to_menu_item(destination.group(), destination.item())
            .await?;

        self.driver
            .locate(None, &destination.landmark_locator())
            .await
            .map_err(|e| e.into_navigation(destination.landmark()))?;
        Ok(())
    }

    /// Expand menu group `group` (when collapsed) and follow link `item`
    pub async fn go_to_menu_item(&mut self, group: &str, item: &str) -> PageResult<()> {
        let menu = self
            .driver
            .locate(None, &Locator::tag("nb-menu"))
            .await
            .map_err(|e| e.into_navigation("nb-menu"))?;

        let group_link = self
            .driver
            .locate(Some(&menu), &Locator::tag_with_text("a", group))
            .await
            .map_err(|e| e.into_navigation(group))?;

        let expanded = self.driver.attribute(&group_link, "aria-expanded").await?;
        if expanded.as_deref() != Some("true") {
            debug!(group, "expanding menu group");
            self.driver
                .click(&group_link, InteractOptions::default())
                .await?;
        }

        let group_item = self
            .driver
            .locate(Some(&menu), &Locator::tag_with_text("li", group))
            .await
            .map_err(|e| e.into_navigation(group))?;

        let link = self
            .driver
            .locate(Some(&group_item), &Locator::attribute("title", item))
            .await
            .map_err(|e| e.into_navigation(item))?;

        self.driver.click(&link, InteractOptions::default()).await
    }
}
