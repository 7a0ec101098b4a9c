//! Form Layouts page

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::driver::{Automation, ElementHandle, InteractOptions, Locator};
use crate::error::{PageError, PageResult};

const GRID_CARD: &str = "Using the Grid";

/// One radio button of the "Using the Grid" card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioState {
    pub label: String,
    pub checked: bool,
    pub disabled: bool,
}

pub struct FormLayoutsPage<'a, A: Automation + ?Sized> {
    driver: &'a mut A,
}

impl<'a, A: Automation + ?Sized> FormLayoutsPage<'a, A> {
    pub fn new(driver: &'a mut A) -> Self {
        Self { driver }
    }

    /// Fill and submit the "Inline form" card.
    ///
    /// The agreement checkbox is checked with `force` since its native input
    /// is hidden behind the styled box.
    pub async fn submit_inline_form_with_name_and_email(
        &mut self,
        name: &str,
        email: &str,
    ) -> PageResult<()> {
        info!(name, email, "Submitting inline form");
        let form = self.form_in_card("Inline form").await?;
        self.replace_field(&form, "Jane Doe", name).await?;
        self.replace_field(&form, "Email", email).await?;
        self.check_agreement(&form).await?;
        self.driver.submit(&form).await
    }

    /// Fill and submit the "Basic form" card
    pub async fn submit_basic_form_with_email_and_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> PageResult<()> {
        info!(email, "Submitting basic form");
        let form = self.form_in_card("Basic form").await?;
        self.replace_field(&form, "Email", email).await?;
        self.replace_field(&form, "Password", password).await?;
        self.check_agreement(&form).await?;
        self.driver.submit(&form).await
    }

    /// Select radio `index` of the "Using the Grid" card.
    ///
    /// Checked with `force` like the agreement box; a disabled option still
    /// refuses with [`PageError::NotInteractable`].
    pub async fn check_grid_radio(&mut self, index: usize) -> PageResult<()> {
        info!(index, "Checking grid radio");
        let form = self.form_in_card(GRID_CARD).await?;
        let radios = self
            .driver
            .locate_all(Some(&form), &Locator::attribute("type", "radio"))
            .await?;
        let radio = radios.get(index).ok_or(PageError::IndexOutOfRange {
            index,
            len: radios.len(),
        })?;
        self.driver.check(radio, InteractOptions::forced()).await
    }

    pub async fn grid_radio_states(&mut self) -> PageResult<Vec<RadioState>> {
        let form = self.form_in_card(GRID_CARD).await?;
        let mut states = Vec::new();
        for radio in self.driver.locate_all(Some(&form), &Locator::tag("nb-radio")).await? {
            let input = self
                .driver
                .locate(Some(&radio), &Locator::attribute("type", "radio"))
                .await?;
            states.push(RadioState {
                label: self.driver.text(&radio).await?.trim().to_string(),
                checked: self.driver.is_checked(&input).await?,
                disabled: self.driver.attribute(&input, "disabled").await?.is_some(),
            });
        }
        Ok(states)
    }

    async fn form_in_card(&mut self, heading: &str) -> PageResult<ElementHandle> {
        let card = self
            .driver
            .locate(None, &Locator::tag_with_text("nb-card", heading))
            .await?;
        self.driver.locate(Some(&card), &Locator::tag("form")).await
    }

    async fn replace_field(
        &mut self,
        form: &ElementHandle,
        placeholder: &str,
        value: &str,
    ) -> PageResult<()> {
        let field = self
            .driver
            .locate(Some(form), &Locator::placeholder(placeholder))
            .await?;
        self.driver.clear(&field).await?;
        self.driver.type_text(&field, value).await
    }

    async fn check_agreement(&mut self, form: &ElementHandle) -> PageResult<()> {
        let checkbox = self
            .driver
            .locate(Some(form), &Locator::attribute("type", "checkbox"))
            .await?;
        self.driver.check(&checkbox, InteractOptions::forced()).await
    }
}
