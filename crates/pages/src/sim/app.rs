//! Screens and behaviour of the simulated ngx-admin application

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pages::datepicker::{INPUT_DATE_FORMAT, VIEW_LABEL_FORMAT};

use super::dom::El;

/// Message shown by the smart table's delete confirmation
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete?";

pub(crate) const COLUMNS: [&str; 6] = ["ID", "First Name", "Last Name", "Username", "E-mail", "Age"];

const SEED_ROWS: [[&str; 6]; 11] = [
    ["1", "Mark", "Otto", "@mdo", "mdo@gmail.com", "28"],
    ["2", "Jacob", "Thornton", "@fat", "fat@yandex.ru", "45"],
    ["3", "Larry", "Bird", "@twitter", "twitter@outlook.com", "18"],
    ["4", "John", "Snow", "@snow", "snow@gmail.com", "20"],
    ["5", "Jack", "Sparrow", "@jack", "jack@yandex.ru", "30"],
    ["6", "Ann", "Smith", "@ann", "ann@gmail.com", "21"],
    ["7", "Barbara", "Black", "@barbara", "barbara@yandex.ru", "43"],
    ["8", "Sevan", "Bagrat", "@sevan", "sevan@outlook.com", "13"],
    ["9", "Ruben", "Vardan", "@ruben", "ruben@gmail.com", "22"],
    ["10", "Karen", "Sevan", "@karen", "karen@yandex.ru", "40"],
    ["11", "Mark", "Otto", "@mark", "mark@gmail.com", "38"],
];

/// Screens the simulated app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    FormLayouts,
    Datepicker,
    SmartTable,
    Toastr,
    Tooltip,
    Stub(&'static str),
}

impl Screen {
    pub fn route(&self) -> String {
        match self {
            Screen::Dashboard => "/pages/dashboard".to_string(),
            Screen::FormLayouts => "/pages/forms/layouts".to_string(),
            Screen::Datepicker => "/pages/forms/datepicker".to_string(),
            Screen::SmartTable => "/pages/tables/smart-table".to_string(),
            Screen::Toastr => "/pages/modal-overlays/toastr".to_string(),
            Screen::Tooltip => "/pages/modal-overlays/tooltip".to_string(),
            Screen::Stub(title) => format!("/pages/{}", slug(title)),
        }
    }

    /// Unknown routes fall back to the dashboard
    pub fn from_route(path: &str) -> Screen {
        let path = path.trim_end_matches('/');
        let all = MENU
            .iter()
            .flat_map(|(_, items)| items.iter().map(|(_, screen)| *screen));
        all.into_iter()
            .find(|screen| screen.route() == path)
            .unwrap_or(Screen::Dashboard)
    }
}

type MenuGroup = (&'static str, &'static [(&'static str, Screen)]);

const MENU: &[MenuGroup] = &[
    (
        "Forms",
        &[
            ("Form Inputs", Screen::Stub("Form Inputs")),
            ("Form Layouts", Screen::FormLayouts),
            ("Buttons", Screen::Stub("Buttons")),
            ("Datepicker", Screen::Datepicker),
        ],
    ),
    (
        "Modal & Overlays",
        &[
            ("Dialog", Screen::Stub("Dialog")),
            ("Window", Screen::Stub("Window")),
            ("Popover", Screen::Stub("Popover")),
            ("Toastr", Screen::Toastr),
            ("Tooltip", Screen::Tooltip),
        ],
    ),
    (
        "Tables & Data",
        &[
            ("Smart Table", Screen::SmartTable),
            ("Tree Grid", Screen::Stub("Tree Grid")),
        ],
    ),
];

fn slug(label: &str) -> String {
    label
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn group_of(screen: Screen) -> Option<&'static str> {
    MENU.iter()
        .find(|(_, items)| items.iter().any(|(_, s)| *s == screen))
        .map(|(group, _)| *group)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    Inline,
    Basic,
}

impl FormKind {
    fn title(&self) -> &'static str {
        match self {
            FormKind::Inline => "Inline form",
            FormKind::Basic => "Basic form",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            FormKind::Inline => "form/inline",
            FormKind::Basic => "form/basic",
        }
    }

    /// (key suffix, placeholder, input type)
    fn fields(&self) -> &'static [(&'static str, &'static str, &'static str)] {
        match self {
            FormKind::Inline => &[("name", "Jane Doe", "text"), ("email", "Email", "email")],
            FormKind::Basic => &[("email", "Email", "email"), ("password", "Password", "password")],
        }
    }

    fn checkbox_label(&self) -> &'static str {
        match self {
            FormKind::Inline => "Remember me",
            FormKind::Basic => "Check me out",
        }
    }
}

/// Click behaviour attached to an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    ToggleGroup(&'static str),
    Open(Screen),
    AddRow,
    CreateRow,
    EditRow(u64),
    SaveRow(u64),
    DeleteRow(u64),
    SubmitForm(FormKind),
    ToggleCheckbox,
    SelectRadio,
    OpenCalendar,
    NextMonth,
    PickDay(NaiveDate),
    ShowTooltip,
}

/// A form submit observed by the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub form: String,
    /// Field values keyed by placeholder
    pub fields: BTreeMap<String, String>,
    pub checked: bool,
}

#[derive(Debug, Clone)]
struct Row {
    serial: u64,
    cells: [String; 6],
}

/// What the side effects of a click were
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub navigated: bool,
    pub dialog: Option<String>,
    pub submission: Option<FormSubmission>,
}

/// Everything the simulated page shows; rebuilt into a DOM after each change
#[derive(Debug)]
pub(crate) struct AppState {
    pub screen: Screen,
    today: NaiveDate,
    expanded: BTreeSet<&'static str>,
    values: HashMap<String, String>,
    checked: BTreeSet<String>,
    rows: Vec<Row>,
    next_serial: u64,
    adding: bool,
    editing: Option<u64>,
    calendar_view: Option<NaiveDate>,
    tooltip: bool,
}

impl AppState {
    pub fn load(route: &str, today: NaiveDate) -> Self {
        let mut state = Self {
            screen: Screen::Dashboard,
            today,
            expanded: BTreeSet::new(),
            values: HashMap::new(),
            checked: BTreeSet::new(),
            rows: Vec::new(),
            next_serial: 0,
            adding: false,
            editing: None,
            calendar_view: None,
            tooltip: false,
        };
        state.open(Screen::from_route(route));
        state
    }

    pub fn value(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    pub fn set_value(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.checked.contains(key)
    }

    pub fn set_checked(&mut self, key: &str, checked: bool) {
        if checked {
            self.checked.insert(key.to_string());
        } else {
            self.checked.remove(key);
        }
    }

    /// Check the radio `key` and clear the other radios of its group
    pub fn select_radio(&mut self, key: &str) {
        if let Some((group, _)) = key.rsplit_once('/') {
            let prefix = format!("{}/", group);
            self.checked.retain(|k| !k.starts_with(&prefix));
        }
        self.checked.insert(key.to_string());
    }

    /// Show `screen` with freshly initialised content
    fn open(&mut self, screen: Screen) {
        self.screen = screen;
        self.values.clear();
        self.checked.clear();
        self.adding = false;
        self.editing = None;
        self.calendar_view = None;
        self.tooltip = false;
        if let Some(group) = group_of(screen) {
            self.expanded.insert(group);
        }

        match screen {
            Screen::SmartTable => {
                self.rows = SEED_ROWS
                    .iter()
                    .enumerate()
                    .map(|(i, cells)| Row {
                        serial: i as u64,
                        cells: (*cells).map(|c| c.to_string()),
                    })
                    .collect();
                self.next_serial = self.rows.len() as u64;
            }
            Screen::Toastr => {
                self.checked.insert("toastr/check/0".to_string());
                self.checked.insert("toastr/check/2".to_string());
            }
            _ => {}
        }
    }

    pub fn apply(&mut self, action: Action, accept_dialogs: bool) -> Outcome {
        let mut outcome = Outcome::default();
        match action {
            Action::ToggleGroup(group) => {
                if !self.expanded.remove(group) {
                    self.expanded.insert(group);
                }
            }
            Action::Open(screen) => {
                self.open(screen);
                outcome.navigated = true;
            }
            Action::AddRow => {
                self.adding = true;
                for column in 0..COLUMNS.len() {
                    self.values.remove(&new_row_input_key(column));
                }
            }
            Action::CreateRow => {
                let cells = std::array::from_fn(|column| self.value(&new_row_input_key(column)));
                self.rows.insert(
                    0,
                    Row {
                        serial: self.next_serial,
                        cells,
                    },
                );
                self.next_serial += 1;
                self.adding = false;
            }
            Action::EditRow(serial) => {
                if let Some(row) = self.rows.iter().find(|r| r.serial == serial) {
                    let cells = row.cells.clone();
                    for (column, value) in cells.into_iter().enumerate() {
                        self.values.insert(row_input_key(serial, column), value);
                    }
                    self.editing = Some(serial);
                }
            }
            Action::SaveRow(serial) => {
                let cells: [String; 6] =
                    std::array::from_fn(|column| self.value(&row_input_key(serial, column)));
                if let Some(row) = self.rows.iter_mut().find(|r| r.serial == serial) {
                    row.cells = cells;
                }
                self.editing = None;
            }
            Action::DeleteRow(serial) => {
                outcome.dialog = Some(DELETE_CONFIRM_MESSAGE.to_string());
                if accept_dialogs {
                    self.rows.retain(|r| r.serial != serial);
                    if self.editing == Some(serial) {
                        self.editing = None;
                    }
                }
            }
            Action::SubmitForm(kind) => {
                let fields = kind
                    .fields()
                    .iter()
                    .map(|(suffix, placeholder, _)| {
                        let key = format!("{}/{}", kind.key(), suffix);
                        (placeholder.to_string(), self.value(&key))
                    })
                    .collect();
                outcome.submission = Some(FormSubmission {
                    form: kind.title().to_string(),
                    fields,
                    checked: self.is_checked(&format!("{}/check", kind.key())),
                });
            }
            // Checkbox and radio state needs the element key; handled by the caller.
            Action::ToggleCheckbox | Action::SelectRadio => {}
            Action::OpenCalendar => {
                let anchor = self.selected_date().unwrap_or(self.today);
                self.calendar_view = Some(first_of_month(anchor));
            }
            Action::NextMonth => {
                self.calendar_view = self.calendar_view.map(|view| shift_month(view, 1));
            }
            Action::PickDay(date) => {
                self.values.insert(
                    DATEPICKER_INPUT_KEY.to_string(),
                    date.format(INPUT_DATE_FORMAT).to_string(),
                );
                self.calendar_view = None;
            }
            Action::ShowTooltip => self.tooltip = true,
        }
        outcome
    }

    fn selected_date(&self) -> Option<NaiveDate> {
        let value = self.values.get(DATEPICKER_INPUT_KEY)?;
        NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT).ok()
    }

    pub fn render(&self) -> El {
        let content = match self.screen {
            Screen::Dashboard => self.render_dashboard(),
            Screen::FormLayouts => self.render_form_layouts(),
            Screen::Datepicker => self.render_datepicker(),
            Screen::SmartTable => self.render_smart_table(),
            Screen::Toastr => self.render_toastr(),
            Screen::Tooltip => self.render_tooltip(),
            Screen::Stub(title) => vec![card("stub", title, Vec::new())],
        };

        let mut overlay = El::new("overlay", "div").class("cdk-overlay-container");
        if let Some(view) = self.calendar_view {
            overlay = overlay.child(self.render_calendar(view));
        }
        if self.tooltip {
            overlay = overlay.child(El::new("overlay/tooltip", "nb-tooltip").text("This is a tooltip"));
        }

        El::new("root", "ngx-app")
            .attr("data-route", self.screen.route())
            .child(El::new("header", "nb-layout-header").text("ngx-admin"))
            .child(El::new("sidebar", "nb-sidebar").child(self.render_menu()))
            .child(El::new("content", "div").class("layout-content").children(content))
            .child(overlay)
    }

    fn render_menu(&self) -> El {
        let dashboard = El::new("menu/dashboard", "li").class("menu-item").child(
            El::new("menu/dashboard/link", "a")
                .attr("title", "IoT Dashboard")
                .text("IoT Dashboard")
                .on_click(Action::Open(Screen::Dashboard)),
        );

        let groups = MENU.iter().map(|(group, items)| {
            let key = format!("menu/{}", slug(group));
            let expanded = self.expanded.contains(group);
            let mut li = El::new(key.clone(), "li").class("menu-item").child(
                El::new(format!("{}/link", key), "a")
                    .attr("title", *group)
                    .attr("aria-expanded", expanded.to_string())
                    .text(*group)
                    .on_click(Action::ToggleGroup(*group)),
            );
            if expanded {
                let links = items.iter().map(|(item, screen)| {
                    let item_key = format!("{}/{}", key, slug(item));
                    let mut link = El::new(format!("{}/link", item_key), "a")
                        .attr("title", *item)
                        .text(*item)
                        .on_click(Action::Open(*screen));
                    if *screen == self.screen {
                        link = link.class("active");
                    }
                    El::new(item_key, "li").class("menu-item").child(link)
                });
                li = li.child(El::new(format!("{}/items", key), "ul").class("menu-items").children(links));
            }
            li
        });

        El::new("menu", "nb-menu").child(
            El::new("menu/list", "ul")
                .class("menu-items")
                .child(dashboard)
                .children(groups),
        )
    }

    fn render_dashboard(&self) -> Vec<El> {
        ["Light", "Roller Shades", "Wireless Audio", "Coffee Maker"]
            .iter()
            .map(|title| {
                let key = format!("dashboard/{}", slug(title));
                El::new(key.clone(), "nb-card")
                    .class("status-card")
                    .child(El::new(format!("{}/title", key), "div").class("title").text(*title))
                    .child(El::new(format!("{}/status", key), "div").class("status").text("ON"))
            })
            .collect()
    }

    fn render_form_layouts(&self) -> Vec<El> {
        let mut cards: Vec<El> = [FormKind::Inline, FormKind::Basic]
            .iter()
            .map(|kind| {
                let key = kind.key();
                let inputs = kind.fields().iter().map(|(suffix, placeholder, kind_attr)| {
                    El::new(format!("{}/{}", key, suffix), "input")
                        .attr("placeholder", *placeholder)
                        .attr("type", *kind_attr)
                        .class("input-full-width size-medium shape-rectangle")
                });
                let form = El::new(key, "form")
                    .children(inputs)
                    .child(self.checkbox(&format!("{}/check", key), kind.checkbox_label()))
                    .child(
                        El::new(format!("{}/submit", key), "button")
                            .attr("type", "submit")
                            .attr("status", "primary")
                            .text("Submit")
                            .on_click(Action::SubmitForm(*kind)),
                    );
                card(&format!("card/{}", slug(kind.title())), kind.title(), vec![form])
            })
            .collect();
        cards.insert(1, self.render_grid_form());
        cards
    }

    fn render_grid_form(&self) -> El {
        let radios = GRID_RADIOS.iter().enumerate().map(|(i, label)| {
            let key = grid_radio_key(i);
            let mut input = El::new(key.clone(), "input")
                .attr("type", "radio")
                .attr("name", "radioOptions")
                .attr("value", format!("option{}", i + 1))
                .class("native-input visually-hidden")
                .hidden()
                .on_click(Action::SelectRadio);
            if i == GRID_DISABLED_RADIO {
                input = input.attr("disabled", "");
            }
            let circle = if self.is_checked(&key) { "inner-circle checked" } else { "inner-circle" };
            El::new(format!("{}/wrapper", key), "nb-radio").child(
                El::new(format!("{}/label", key), "label")
                    .child(input)
                    .child(El::new(format!("{}/circle", key), "span").class(circle))
                    .child(El::new(format!("{}/text", key), "span").class("text").text(*label)),
            )
        });

        let field = |id: &str, label: &str, kind: &str| {
            El::new(format!("form/grid/{}", id), "div")
                .class("form-group")
                .child(
                    El::new(format!("form/grid/{}/label", id), "label")
                        .attr("for", id)
                        .class("label")
                        .text(label),
                )
                .child(
                    El::new(format!("form/grid/{}/input", id), "input")
                        .attr("id", id)
                        .attr("placeholder", label)
                        .attr("type", kind)
                        .class("input-full-width size-medium shape-rectangle"),
                )
        };

        let form = El::new("form/grid", "form")
            .child(field("inputEmail1", "Email", "email"))
            .child(field("inputPassword2", "Password", "password"))
            .child(El::new("form/grid/radios", "fieldset").children(radios))
            .child(
                El::new("form/grid/sign-in", "button")
                    .attr("status", "primary")
                    .text("Sign in"),
            );
        card("card/using-the-grid", "Using the Grid", vec![form])
    }

    /// Styled checkbox whose native input is visually hidden
    fn checkbox(&self, key: &str, label: &str) -> El {
        let checked = self.is_checked(key);
        let box_class = if checked { "custom-checkbox checked" } else { "custom-checkbox" };
        El::new(format!("{}/wrapper", key), "nb-checkbox").child(
            El::new(format!("{}/label", key), "label")
                .class("label")
                .child(
                    El::new(key, "input")
                        .attr("type", "checkbox")
                        .class("native-input visually-hidden")
                        .hidden()
                        .on_click(Action::ToggleCheckbox),
                )
                .child(El::new(format!("{}/box", key), "span").class(box_class))
                .child(El::new(format!("{}/text", key), "span").class("text").text(label)),
        )
    }

    fn render_datepicker(&self) -> Vec<El> {
        let input = El::new(DATEPICKER_INPUT_KEY, "input")
            .attr("placeholder", "Form Picker")
            .attr("type", "text")
            .on_click(Action::OpenCalendar);
        vec![card("card/common-datepicker", "Common Datepicker", vec![input])]
    }

    fn render_calendar(&self, view: NaiveDate) -> El {
        let month_key = format!("calendar/{}", view.format("%Y-%m"));
        let navigation = El::new(format!("{}/navigation", month_key), "nb-calendar-navigation")
            .attr("ng-reflect-date", view.format("%a %b %d %Y").to_string())
            .child(
                El::new(format!("{}/view-mode", month_key), "nb-calendar-view-mode")
                    .text(view.format(VIEW_LABEL_FORMAT).to_string()),
            );
        let pager = El::new(format!("{}/pager", month_key), "nb-calendar-pageable-navigation")
            .child(
                El::new(format!("{}/next", month_key), "nb-icon")
                    .attr("data-name", "chevron-right")
                    .on_click(Action::NextMonth),
            );

        let grid_start = view - Duration::days(i64::from(view.weekday().num_days_from_sunday()));
        let days = (0..42).map(|offset| {
            let day = grid_start + Duration::days(offset);
            let class = if day.month() == view.month() {
                "day-cell"
            } else {
                "day-cell bounding-month"
            };
            El::new(format!("{}/day/{}", month_key, day), "nb-calendar-day-cell")
                .class(class)
                .text(day.day().to_string())
                .on_click(Action::PickDay(day))
        });

        El::new("calendar", "nb-calendar")
            .child(navigation)
            .child(pager)
            .child(El::new(format!("{}/days", month_key), "nb-calendar-day-picker").children(days))
    }

    fn render_smart_table(&self) -> Vec<El> {
        let titles = El::new("table/titles", "tr")
            .class("ng2-smart-titles")
            .child(
                El::new("table/titles/actions", "th").child(
                    El::new("table/titles/add", "a")
                        .class("ng2-smart-action-add-add")
                        .child(El::new("table/titles/add/icon", "i").class("nb-plus").on_click(Action::AddRow)),
                ),
            )
            .children(COLUMNS.iter().enumerate().map(|(i, title)| {
                El::new(format!("table/titles/{}", i), "th").text(*title)
            }));

        let filters = El::new("table/filters", "tr")
            .class("ng2-smart-filters")
            .child(El::new("table/filters/actions", "th"))
            .children(COLUMNS.iter().enumerate().map(|(i, title)| {
                El::new(format!("table/filters/{}", i), "th").child(
                    El::new(filter_input_key(i), "input")
                        .attr("placeholder", *title)
                        .attr("type", "text"),
                )
            }));

        let mut thead = El::new("table/head", "thead").child(titles).child(filters);
        if self.adding {
            let editor = El::new("table/new", "tr")
                .child(
                    El::new("table/new/actions", "td")
                        .child(El::new("table/new/create", "i").class("nb-checkmark").on_click(Action::CreateRow)),
                )
                .children(COLUMNS.iter().enumerate().map(|(i, title)| {
                    El::new(format!("table/new/cell/{}", i), "td").child(
                        El::new(new_row_input_key(i), "input")
                            .attr("placeholder", *title)
                            .attr("type", "text"),
                    )
                }));
            thead = thead.child(editor);
        }

        let filters: Vec<(usize, String)> = (0..COLUMNS.len())
            .map(|column| (column, self.value(&filter_input_key(column)).to_lowercase()))
            .filter(|(_, needle)| !needle.is_empty())
            .collect();
        let body_rows: Vec<El> = self
            .rows
            .iter()
            .filter(|row| {
                filters
                    .iter()
                    .all(|(column, needle)| row.cells[*column].to_lowercase().contains(needle.as_str()))
            })
            .map(|row| self.render_row(row))
            .collect();
        let body_rows = if body_rows.is_empty() {
            vec![El::new("table/empty", "tr").child(El::new("table/empty/cell", "td").text("No data found"))]
        } else {
            body_rows
        };

        let table = El::new("table", "ng2-smart-table").child(
            El::new("table/table", "table")
                .child(thead)
                .child(El::new("table/body", "tbody").children(body_rows)),
        );
        vec![card("card/smart-table", "Smart Table", vec![table])]
    }

    fn render_row(&self, row: &Row) -> El {
        let key = format!("table/row/{}", row.serial);
        let editing = self.editing == Some(row.serial);

        let actions = if editing {
            El::new(format!("{}/actions", key), "td")
                .class("ng2-smart-actions")
                .child(El::new(format!("{}/save", key), "i").class("nb-checkmark").on_click(Action::SaveRow(row.serial)))
        } else {
            El::new(format!("{}/actions", key), "td")
                .class("ng2-smart-actions")
                .child(El::new(format!("{}/edit", key), "i").class("nb-edit").on_click(Action::EditRow(row.serial)))
                .child(El::new(format!("{}/delete", key), "i").class("nb-trash").on_click(Action::DeleteRow(row.serial)))
        };

        let cells: Vec<El> = row.cells.iter().enumerate().map(|(i, value)| {
            let cell = El::new(format!("{}/cell/{}", key, i), "td");
            if editing {
                cell.child(
                    El::new(row_input_key(row.serial, i), "input")
                        .attr("placeholder", COLUMNS[i])
                        .attr("type", "text"),
                )
            } else {
                cell.child(El::new(format!("{}/cell/{}/value", key, i), "div").text(value.clone()))
            }
        }).collect();

        El::new(key, "tr").class("ng2-smart-row").child(actions).children(cells)
    }

    fn render_toastr(&self) -> Vec<El> {
        let labels = ["Hide on click", "Prevent arising of duplicate toast", "Show toast with icon"];
        let checkboxes = labels
            .iter()
            .enumerate()
            .map(|(i, label)| self.checkbox(&format!("toastr/check/{}", i), label))
            .collect();
        vec![card("card/toaster-configuration", "Toaster configuration", checkboxes)]
    }

    fn render_tooltip(&self) -> Vec<El> {
        let icons = El::new("tooltip/icon", "button").text("Show Tooltip");
        let colored = ["Default", "Primary", "Success"].iter().map(|label| {
            El::new(format!("tooltip/colored/{}", slug(label)), "button")
                .attr("status", label.to_ascii_lowercase())
                .text(*label)
                .on_click(Action::ShowTooltip)
        });
        vec![
            card("card/tooltip-with-icon", "Tooltip With Icon", vec![icons]),
            card("card/colored-tooltips", "Colored Tooltips", colored.collect()),
        ]
    }
}

pub(crate) const DATEPICKER_INPUT_KEY: &str = "datepicker/common/input";

const GRID_RADIOS: [&str; 3] = ["Option 1", "Option 2", "Disabled Option"];
const GRID_DISABLED_RADIO: usize = 2;

fn grid_radio_key(index: usize) -> String {
    format!("form/grid/radio/{}", index)
}

fn filter_input_key(column: usize) -> String {
    format!("table/filter/{}", column)
}

fn card(key: &str, title: &str, body: Vec<El>) -> El {
    El::new(key, "nb-card")
        .child(El::new(format!("{}/header", key), "nb-card-header").text(title))
        .child(El::new(format!("{}/body", key), "nb-card-body").children(body))
}

fn new_row_input_key(column: usize) -> String {
    format!("table/new/input/{}", column)
}

fn row_input_key(serial: u64, column: usize) -> String {
    format!("table/row/{}/input/{}", serial, column)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn shift_month(first: NaiveDate, months: i32) -> NaiveDate {
    let index = first.year() * 12 + first.month0() as i32 + months;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1).unwrap_or(first)
}
