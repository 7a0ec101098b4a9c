//! Smart Table page: add, edit, delete and filter rows

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::driver::{Automation, ElementHandle, InteractOptions, Locator};
use crate::error::{PageError, PageResult};

/// Position of the new-row editor among `thead` rows (titles, filters, editor)
const NEW_ROW_INDEX: usize = 2;

/// Cell positions within a body row; cell 0 holds the row actions
const ID_CELL: usize = 1;
const FIRST_NAME_CELL: usize = 2;
const LAST_NAME_CELL: usize = 3;
const USERNAME_CELL: usize = 4;
const EMAIL_CELL: usize = 5;
const AGE_CELL: usize = 6;

const ROW_CLASS: &str = "ng2-smart-row";
const FILTER_ROW_CLASS: &str = "ng2-smart-filters";

/// Body text the table shows when no row passes the filters
pub const NO_DATA_TEXT: &str = "No data found";

/// Displayed values of one table row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub age: String,
}

pub struct SmartTablePage<'a, A: Automation + ?Sized> {
    driver: &'a mut A,
}

impl<'a, A: Automation + ?Sized> SmartTablePage<'a, A> {
    pub fn new(driver: &'a mut A) -> Self {
        Self { driver }
    }

    /// Open the new-row editor, fill both names and commit
    pub async fn add_new_record(&mut self, first_name: &str, last_name: &str) -> PageResult<()> {
        info!(first_name, last_name, "Adding table record");
        let thead = self.driver.locate(None, &Locator::tag("thead")).await?;
        let add = self
            .driver
            .locate(Some(&thead), &Locator::class("nb-plus"))
            .await?;
        self.driver.click(&add, InteractOptions::default()).await?;

        let editor = self
            .driver
            .locate_nth(Some(&thead), &Locator::tag("tr"), NEW_ROW_INDEX)
            .await?;
        self.type_into(&editor, "First Name", first_name).await?;
        self.type_into(&editor, "Last Name", last_name).await?;
        self.commit(&editor).await
    }

    /// Edit the age of the single row whose first name equals `first_name`.
    ///
    /// Zero or several matching rows fail with [`PageError::AmbiguousMatch`].
    pub async fn update_age_by_first_name(&mut self, first_name: &str, age: &str) -> PageResult<()> {
        info!(first_name, age, "Updating age");
        let mut matches = Vec::new();
        for row in self.row_handles().await? {
            if self.cell_text(&row, FIRST_NAME_CELL).await? == first_name {
                matches.push(row);
            }
        }

        if matches.len() != 1 {
            return Err(PageError::AmbiguousMatch {
                name: first_name.to_string(),
                matches: matches.len(),
            });
        }
        let row = matches.swap_remove(0);

        let edit = self
            .driver
            .locate(Some(&row), &Locator::class("nb-edit"))
            .await?;
        self.driver.click(&edit, InteractOptions::default()).await?;

        let field = self
            .driver
            .locate(Some(&row), &Locator::placeholder("Age"))
            .await?;
        self.driver.clear(&field).await?;
        self.driver.type_text(&field, age).await?;
        self.commit(&row).await
    }

    /// Delete the row at zero-based `index`, accepting the confirm dialog
    pub async fn delete_row_by_index(&mut self, index: usize) -> PageResult<()> {
        info!(index, "Deleting row");
        self.click_trash(index, true).await
    }

    /// Click the trash icon of row `index` and dismiss the confirm dialog.
    ///
    /// The row stays; the dialog message is still recorded by the driver.
    pub async fn cancel_delete_row_by_index(&mut self, index: usize) -> PageResult<()> {
        info!(index, "Cancelling row delete");
        self.click_trash(index, false).await
    }

    /// Type `age` into the Age filter and wait until the body reflects it.
    ///
    /// The table filters by substring, so `"20"` also keeps `"120"`. An
    /// empty result renders a single "No data found" row.
    pub async fn filter_by_age(&mut self, age: &str) -> PageResult<()> {
        info!(age, "Filtering by age");
        let filters = self.driver.locate(None, &Locator::class(FILTER_ROW_CLASS)).await?;
        let field = self
            .driver
            .locate(Some(&filters), &Locator::placeholder("Age"))
            .await?;
        self.driver.clear(&field).await?;
        self.driver.type_text(&field, age).await?;

        // The live table debounces filter input
        let wait = self.driver.wait_config();
        let deadline = Instant::now() + wait.timeout;
        loop {
            let rows = self.rows().await?;
            if rows.iter().all(|row| row.age.contains(age)) {
                debug!(age, shown = rows.len(), "filter applied");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PageError::Timeout(format!("table filter Age = '{}'", age)));
            }
            sleep(wait.poll_interval).await;
        }
    }

    /// Whether the body shows the "No data found" placeholder row
    pub async fn has_no_data(&mut self) -> PageResult<bool> {
        let tbody = self.driver.locate(None, &Locator::tag("tbody")).await?;
        let placeholder = self
            .driver
            .query_all(Some(&tbody), &Locator::tag_with_text("td", NO_DATA_TEXT))
            .await?;
        Ok(!placeholder.is_empty())
    }

    pub async fn row_count(&mut self) -> PageResult<usize> {
        Ok(self.row_handles().await?.len())
    }

    pub async fn row(&mut self, index: usize) -> PageResult<TableRow> {
        let rows = self.row_handles().await?;
        let row = rows.get(index).ok_or(PageError::IndexOutOfRange {
            index,
            len: rows.len(),
        })?;
        self.read_row(row).await
    }

    pub async fn rows(&mut self) -> PageResult<Vec<TableRow>> {
        let mut rows = Vec::new();
        for handle in self.row_handles().await? {
            rows.push(self.read_row(&handle).await?);
        }
        Ok(rows)
    }

    /// Indices of rows whose first name equals `first_name`
    pub async fn find_rows_by_first_name(&mut self, first_name: &str) -> PageResult<Vec<usize>> {
        Ok(self
            .rows()
            .await?
            .iter()
            .enumerate()
            .filter(|(_, row)| row.first_name == first_name)
            .map(|(i, _)| i)
            .collect())
    }

    async fn click_trash(&mut self, index: usize, accept: bool) -> PageResult<()> {
        let rows = self.row_handles().await?;
        let row = rows.get(index).ok_or(PageError::IndexOutOfRange {
            index,
            len: rows.len(),
        })?;

        self.driver.confirm_dialog(accept).await?;
        let trash = self
            .driver
            .locate(Some(row), &Locator::class("nb-trash"))
            .await?;
        self.driver.click(&trash, InteractOptions::default()).await
    }

    async fn row_handles(&mut self) -> PageResult<Vec<ElementHandle>> {
        let tbody = self.driver.locate(None, &Locator::tag("tbody")).await?;
        let rows = self
            .driver
            .query_all(Some(&tbody), &Locator::class(ROW_CLASS))
            .await?;
        debug!("table shows {} row(s)", rows.len());
        Ok(rows)
    }

    async fn read_row(&mut self, row: &ElementHandle) -> PageResult<TableRow> {
        let cells = self
            .driver
            .locate_at_least(Some(row), &Locator::tag("td"), AGE_CELL + 1)
            .await?;

        let mut values = Vec::with_capacity(cells.len());
        for cell in &cells {
            values.push(self.driver.text(cell).await?.trim().to_string());
        }

        Ok(TableRow {
            id: values[ID_CELL].clone(),
            first_name: values[FIRST_NAME_CELL].clone(),
            last_name: values[LAST_NAME_CELL].clone(),
            username: values[USERNAME_CELL].clone(),
            email: values[EMAIL_CELL].clone(),
            age: values[AGE_CELL].clone(),
        })
    }

    async fn cell_text(&mut self, row: &ElementHandle, cell: usize) -> PageResult<String> {
        let cell = self
            .driver
            .locate_nth(Some(row), &Locator::tag("td"), cell)
            .await?;
        Ok(self.driver.text(&cell).await?.trim().to_string())
    }

    async fn type_into(&mut self, row: &ElementHandle, placeholder: &str, value: &str) -> PageResult<()> {
        let field = self
            .driver
            .locate(Some(row), &Locator::placeholder(placeholder))
            .await?;
        self.driver.type_text(&field, value).await
    }

    async fn commit(&mut self, row: &ElementHandle) -> PageResult<()> {
        let confirm = self
            .driver
            .locate(Some(row), &Locator::class("nb-checkmark"))
            .await?;
        self.driver.click(&confirm, InteractOptions::default()).await
    }
}
