//! Datepicker page

use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::{debug, info};

use crate::driver::{Automation, ElementHandle, InteractOptions, Locator};
use crate::error::{PageError, PageResult};

/// Upper bound on "next month" clicks while searching for a target month
pub const MAX_MONTH_STEPS: usize = 36;

/// Format the calendar uses in its month/year header
pub const VIEW_LABEL_FORMAT: &str = "%b %Y";

/// Format the datepicker writes into its input
pub const INPUT_DATE_FORMAT: &str = "%b %-d, %Y";

const CARD_HEADING: &str = "Common Datepicker";

pub struct DatepickerPage<'a, A: Automation + ?Sized> {
    driver: &'a mut A,
}

impl<'a, A: Automation + ?Sized> DatepickerPage<'a, A> {
    pub fn new(driver: &'a mut A) -> Self {
        Self { driver }
    }

    pub async fn select_day_from_today(&mut self, offset_days: i64) -> PageResult<String> {
        self.select_day_from(Local::now().date_naive(), offset_days).await
    }

    /// Pick `today + offset_days` in the common datepicker.
    ///
    /// Returns the text the input is expected to show afterwards.
    /// Offsets past chrono's date range fail with [`PageError::DateOutOfReach`]
    /// before the page is touched.
    pub async fn select_day_from(&mut self, today: NaiveDate, offset_days: i64) -> PageResult<String> {
        let target = Duration::try_days(offset_days)
            .and_then(|delta| today.checked_add_signed(delta))
            .ok_or_else(|| PageError::DateOutOfReach {
                target: format!("{} {:+} days", today, offset_days),
                steps: 0,
            })?;
        let expected = target.format(INPUT_DATE_FORMAT).to_string();
        info!(%target, "Selecting date");

        let input = self.input().await?;
        self.driver.click(&input, InteractOptions::default()).await?;
        let calendar = self.driver.locate(None, &Locator::tag("nb-calendar")).await?;

        self.walk_to_month(&calendar, target).await?;
        self.click_day(&calendar, target.day()).await?;
        Ok(expected)
    }

    /// Current value of the datepicker input
    pub async fn selected_date(&mut self) -> PageResult<String> {
        let input = self.input().await?;
        self.driver.input_value(&input).await
    }

    async fn input(&mut self) -> PageResult<ElementHandle> {
        let card = self
            .driver
            .locate(None, &Locator::tag_with_text("nb-card", CARD_HEADING))
            .await?;
        self.driver.locate(Some(&card), &Locator::tag("input")).await
    }

    async fn walk_to_month(&mut self, calendar: &ElementHandle, target: NaiveDate) -> PageResult<()> {
        let wanted = (target.year(), target.month());
        let out_of_reach = || PageError::DateOutOfReach {
            target: target.to_string(),
            steps: MAX_MONTH_STEPS,
        };

        for step in 0..=MAX_MONTH_STEPS {
            let shown = self.shown_month(calendar).await?;
            if shown == wanted {
                debug!(steps = step, "reached target month");
                return Ok(());
            }
            if shown > wanted || step == MAX_MONTH_STEPS {
                return Err(out_of_reach());
            }

            let next = self
                .driver
                .locate(Some(calendar), &Locator::attribute("data-name", "chevron-right"))
                .await?;
            self.driver.click(&next, InteractOptions::default()).await?;
        }

        Err(out_of_reach())
    }

    async fn shown_month(&mut self, calendar: &ElementHandle) -> PageResult<(i32, u32)> {
        let view = self
            .driver
            .locate(Some(calendar), &Locator::tag("nb-calendar-view-mode"))
            .await?;
        let label = self.driver.text(&view).await?;
        parse_view_label(label.trim())
    }

    async fn click_day(&mut self, calendar: &ElementHandle, day: u32) -> PageResult<()> {
        let picker = self
            .driver
            .locate(Some(calendar), &Locator::tag("nb-calendar-day-picker"))
            .await?;
        let wanted = day.to_string();

        for cell in self
            .driver
            .locate_all(Some(&picker), &Locator::class("day-cell"))
            .await?
        {
            let class = self.driver.attribute(&cell, "class").await?.unwrap_or_default();
            if class.split_whitespace().any(|c| c == "bounding-month") {
                continue;
            }
            if self.driver.text(&cell).await?.trim() == wanted {
                return self.driver.click(&cell, InteractOptions::default()).await;
            }
        }

        Err(PageError::ElementNotFound {
            locator: format!(".day-cell:has-text(\"{}\")", wanted),
            scope: picker.description().to_string(),
        })
    }
}

/// Parse a `"Aug 2025"` header into `(year, month)`
pub fn parse_view_label(label: &str) -> PageResult<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("1 {}", label), "%d %b %Y")
        .map_err(|e| PageError::Driver(format!("unreadable calendar header '{}': {}", label, e)))?;
    Ok((date.year(), date.month()))
}
