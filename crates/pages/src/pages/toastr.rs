//! Toastr page: the toaster configuration checkboxes

use tracing::{debug, info};

use crate::driver::{Automation, ElementHandle, InteractOptions, Locator};
use crate::error::{PageError, PageResult};

const CONFIG_CARD: &str = "Toaster configuration";

pub struct ToastrPage<'a, A: Automation + ?Sized> {
    driver: &'a mut A,
}

impl<'a, A: Automation + ?Sized> ToastrPage<'a, A> {
    pub fn new(driver: &'a mut A) -> Self {
        Self { driver }
    }

    /// Check every configuration option; already checked ones stay checked
    pub async fn check_all_options(&mut self) -> PageResult<()> {
        info!("Checking all toaster options");
        for checkbox in self.checkboxes().await? {
            self.driver.check(&checkbox, InteractOptions::forced()).await?;
        }
        Ok(())
    }

    /// Flip option `index` with a forced click on its hidden input
    pub async fn toggle_option(&mut self, index: usize) -> PageResult<()> {
        info!(index, "Toggling toaster option");
        let checkboxes = self.checkboxes().await?;
        let checkbox = checkboxes.get(index).ok_or(PageError::IndexOutOfRange {
            index,
            len: checkboxes.len(),
        })?;
        self.driver.click(checkbox, InteractOptions::forced()).await
    }

    /// Checked state of each option, in page order
    pub async fn option_states(&mut self) -> PageResult<Vec<bool>> {
        let mut states = Vec::new();
        for checkbox in self.checkboxes().await? {
            states.push(self.driver.is_checked(&checkbox).await?);
        }
        debug!(?states, "toaster options");
        Ok(states)
    }

    async fn checkboxes(&mut self) -> PageResult<Vec<ElementHandle>> {
        let card = self
            .driver
            .locate(None, &Locator::tag_with_text("nb-card", CONFIG_CARD))
            .await?;
        self.driver
            .locate_all(Some(&card), &Locator::attribute("type", "checkbox"))
            .await
    }
}
