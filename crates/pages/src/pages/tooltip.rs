//! Tooltip page

use tracing::info;

use crate::driver::{Automation, InteractOptions, Locator};
use crate::error::PageResult;

const COLORED_CARD: &str = "Colored Tooltips";

pub struct TooltipPage<'a, A: Automation + ?Sized> {
    driver: &'a mut A,
}

impl<'a, A: Automation + ?Sized> TooltipPage<'a, A> {
    pub fn new(driver: &'a mut A) -> Self {
        Self { driver }
    }

    /// Click `button` in the "Colored Tooltips" card and return the text of
    /// the tooltip that opens
    pub async fn show_colored_tooltip(&mut self, button: &str) -> PageResult<String> {
        info!(button, "Opening colored tooltip");
        let card = self
            .driver
            .locate(None, &Locator::tag_with_text("nb-card", COLORED_CARD))
            .await?;
        let trigger = self
            .driver
            .locate(Some(&card), &Locator::tag_with_text("button", button))
            .await?;
        self.driver.click(&trigger, InteractOptions::default()).await?;

        let tooltip = self.driver.locate(None, &Locator::tag("nb-tooltip")).await?;
        Ok(self.driver.text(&tooltip).await?.trim().to_string())
    }
}
