//! Page objects, one per application screen

pub mod datepicker;
pub mod form_layouts;
pub mod smart_table;
pub mod toastr;
pub mod tooltip;

pub use datepicker::DatepickerPage;
pub use form_layouts::{FormLayoutsPage, RadioState};
pub use smart_table::{SmartTablePage, TableRow};
pub use toastr::ToastrPage;
pub use tooltip::TooltipPage;
