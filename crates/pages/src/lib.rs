//! ngx-admin page objects
//!
//! Business-level operations over the ngx-admin sample application, written
//! against the [`Automation`] capability trait rather than a concrete browser.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  scenario                                                    │
//! │    ├── HomePage::open()                                      │
//! │    ├── NavigationPage::go_to(Destination)                    │
//! │    ├── FormLayoutsPage / SmartTablePage / DatepickerPage     │
//! │    └── TooltipPage / ToastrPage                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Automation (trait)                                          │
//! │    ├── query_all / locate (bounded wait)                     │
//! │    ├── click / type_text / clear / check{force} / submit     │
//! │    ├── confirm_dialog(accept)                                │
//! │    └── release_handles()                                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  SimulatedApp (in-memory)   │   PlaywrightDriver (ngx-e2e)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod driver;
pub mod error;
pub mod home;
pub mod navigation;
pub mod pages;
pub mod sim;

pub use driver::{Automation, ElementHandle, InteractOptions, Locator, WaitConfig};
pub use error::{PageError, PageResult};
pub use home::HomePage;
pub use navigation::{Destination, NavigationPage};
pub use pages::{
    DatepickerPage, FormLayoutsPage, RadioState, SmartTablePage, TableRow, ToastrPage, TooltipPage,
};
pub use sim::{FormSubmission, SimulatedApp};
