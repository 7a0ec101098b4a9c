use chrono::NaiveDate;
use ngx_pages::{
    Automation, DatepickerPage, FormLayoutsPage, HomePage, Locator, NavigationPage, PageError,
    RadioState, SimulatedApp,
};

async fn open_at(today: NaiveDate, page: ngx_pages::Destination) -> SimulatedApp {
    let mut app = SimulatedApp::new().with_today(today);
    HomePage::new(&mut app).open().await.unwrap();
    NavigationPage::new(&mut app).go_to(page).await.unwrap();
    app
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn inline_form_submits_name_email_and_agreement() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::FormLayouts).await;
    FormLayoutsPage::new(&mut app)
        .submit_inline_form_with_name_and_email("Artem", "test@test.com")
        .await
        .unwrap();

    let submissions = app.submissions();
    assert_eq!(submissions.len(), 1);
    let inline = &submissions[0];
    assert_eq!(inline.form, "Inline form");
    assert_eq!(inline.fields["Jane Doe"], "Artem");
    assert_eq!(inline.fields["Email"], "test@test.com");
    assert!(inline.checked);
}

#[tokio::test]
async fn inline_form_replaces_previous_values() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::FormLayouts).await;
    let mut form = FormLayoutsPage::new(&mut app);
    form.submit_inline_form_with_name_and_email("Someone", "old@test.com")
        .await
        .unwrap();
    form.submit_inline_form_with_name_and_email("Artem", "test@test.com")
        .await
        .unwrap();

    let last = app.submissions().last().unwrap();
    assert_eq!(last.fields["Jane Doe"], "Artem");
    assert_eq!(last.fields["Email"], "test@test.com");
}

#[tokio::test]
async fn basic_form_is_independent_of_inline_form() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::FormLayouts).await;
    FormLayoutsPage::new(&mut app)
        .submit_basic_form_with_email_and_password("test@test.com", "secret")
        .await
        .unwrap();

    let basic = &app.submissions()[0];
    assert_eq!(basic.form, "Basic form");
    assert_eq!(basic.fields["Email"], "test@test.com");
    assert_eq!(basic.fields["Password"], "secret");

    let inline = app.locate(None, &Locator::placeholder("Jane Doe")).await.unwrap();
    assert_eq!(app.input_value(&inline).await.unwrap(), "");
}

#[tokio::test]
async fn inline_form_outside_form_layouts_is_not_found() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::SmartTable).await;
    let err = FormLayoutsPage::new(&mut app)
        .submit_inline_form_with_name_and_email("Artem", "test@test.com")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::ElementNotFound { .. }));
    assert!(app.submissions().is_empty());
}

#[tokio::test]
async fn datepicker_selects_a_day_months_ahead() {
    let today = date(2025, 11, 20);
    let mut app = open_at(today, ngx_pages::Destination::Datepicker).await;
    let mut picker = DatepickerPage::new(&mut app);

    let expected = picker.select_day_from(today, 300).await.unwrap();

    assert_eq!(expected, "Sep 16, 2026");
    assert_eq!(picker.selected_date().await.unwrap(), expected);
}

#[tokio::test]
async fn datepicker_selects_within_the_current_month() {
    let today = date(2025, 11, 20);
    let mut app = open_at(today, ngx_pages::Destination::Datepicker).await;
    let mut picker = DatepickerPage::new(&mut app);

    let expected = picker.select_day_from(today, 1).await.unwrap();

    assert_eq!(expected, "Nov 21, 2025");
    assert_eq!(picker.selected_date().await.unwrap(), expected);
}

#[tokio::test]
async fn datepicker_cannot_walk_backwards() {
    let today = date(2025, 11, 20);
    let mut app = open_at(today, ngx_pages::Destination::Datepicker).await;
    let err = DatepickerPage::new(&mut app)
        .select_day_from(today, -40)
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::DateOutOfReach { .. }));
}

#[tokio::test]
async fn datepicker_search_is_bounded() {
    let today = date(2025, 11, 20);
    let mut app = open_at(today, ngx_pages::Destination::Datepicker).await;
    let err = DatepickerPage::new(&mut app)
        .select_day_from(today, 365 * 5)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PageError::DateOutOfReach {
            target: "2030-11-19".into(),
            steps: ngx_pages::pages::datepicker::MAX_MONTH_STEPS,
        }
    );
}

#[tokio::test]
async fn datepicker_offset_beyond_the_calendar_is_out_of_reach() {
    let today = date(2025, 11, 20);
    let mut app = open_at(today, ngx_pages::Destination::Datepicker).await;
    let mut picker = DatepickerPage::new(&mut app);

    let err = picker.select_day_from(today, 10_000_000_000).await.unwrap_err();

    assert!(matches!(err, PageError::DateOutOfReach { .. }), "{err}");
    assert_eq!(picker.selected_date().await.unwrap(), "");
}

fn radio(label: &str, checked: bool, disabled: bool) -> RadioState {
    RadioState {
        label: label.to_string(),
        checked,
        disabled,
    }
}

#[tokio::test]
async fn grid_radios_start_unchecked_with_the_third_disabled() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::FormLayouts).await;
    let states = FormLayoutsPage::new(&mut app).grid_radio_states().await.unwrap();
    assert_eq!(
        states,
        vec![
            radio("Option 1", false, false),
            radio("Option 2", false, false),
            radio("Disabled Option", false, true),
        ]
    );
}

#[tokio::test]
async fn checking_a_grid_radio_unchecks_the_other() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::FormLayouts).await;
    let mut form = FormLayoutsPage::new(&mut app);

    form.check_grid_radio(0).await.unwrap();
    let first = form.grid_radio_states().await.unwrap();
    assert!(first[0].checked);

    form.check_grid_radio(1).await.unwrap();
    let second = form.grid_radio_states().await.unwrap();
    assert!(!second[0].checked);
    assert!(second[1].checked);
}

#[tokio::test]
async fn disabled_grid_radio_cannot_be_checked() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::FormLayouts).await;
    let mut form = FormLayoutsPage::new(&mut app);

    let err = form.check_grid_radio(2).await.unwrap_err();
    assert!(matches!(err, PageError::NotInteractable(_)), "{err}");

    let err = form.check_grid_radio(3).await.unwrap_err();
    assert_eq!(err, PageError::IndexOutOfRange { index: 3, len: 3 });
}

#[tokio::test]
async fn grid_radios_do_not_touch_the_form_checkboxes() {
    let mut app = open_at(date(2025, 1, 1), ngx_pages::Destination::FormLayouts).await;
    FormLayoutsPage::new(&mut app).check_grid_radio(1).await.unwrap();

    let checkbox = app
        .locate(None, &Locator::attribute("type", "checkbox"))
        .await
        .unwrap();
    assert!(!app.is_checked(&checkbox).await.unwrap());
}
