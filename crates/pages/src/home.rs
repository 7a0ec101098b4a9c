//! Application entry point shared by every scenario

use tracing::info;

use crate::driver::{Automation, Locator};
use crate::error::PageResult;

/// Route of the landing page
pub const HOME_PATH: &str = "/";

/// Element that marks the application shell as loaded
pub const HOME_LANDMARK: &str = "nb-menu";

pub struct HomePage<'a, A: Automation + ?Sized> {
    driver: &'a mut A,
}

impl<'a, A: Automation + ?Sized> HomePage<'a, A> {
    pub fn new(driver: &'a mut A) -> Self {
        Self { driver }
    }

    /// Load the landing page and wait for the shell menu.
    ///
    /// Safe to call repeatedly; each call reloads the application.
    pub async fn open(&mut self) -> PageResult<()> {
        info!("Opening home page");
        self.driver.visit(HOME_PATH).await?;
        self.driver
            .locate(None, &Locator::tag(HOME_LANDMARK))
            .await
            .map_err(|e| e.into_navigation(HOME_LANDMARK))?;
        Ok(())
    }
}
