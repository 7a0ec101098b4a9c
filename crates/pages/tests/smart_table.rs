use ngx_pages::sim::DELETE_CONFIRM_MESSAGE;
use ngx_pages::{
    Automation, Destination, HomePage, InteractOptions, Locator, NavigationPage, PageError,
    SimulatedApp, SmartTablePage,
};
use test_case::test_case;

async fn smart_table() -> SimulatedApp {
    let mut app = SimulatedApp::new();
    HomePage::new(&mut app).open().await.unwrap();
    NavigationPage::new(&mut app).go_to_smart_table().await.unwrap();
    app
}

#[tokio::test]
async fn add_new_record_prepends_exactly_one_row() {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);
    let before = table.row_count().await.unwrap();

    table.add_new_record("Artem", "Bondar").await.unwrap();

    assert_eq!(table.row_count().await.unwrap(), before + 1);
    let first = table.row(0).await.unwrap();
    assert_eq!(first.first_name, "Artem");
    assert_eq!(first.last_name, "Bondar");
    assert_eq!(table.find_rows_by_first_name("Artem").await.unwrap(), vec![0]);
}

#[tokio::test]
async fn add_new_record_on_an_empty_table() {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);
    while table.row_count().await.unwrap() > 0 {
        table.delete_row_by_index(0).await.unwrap();
    }

    table.add_new_record("Artem", "Bondar").await.unwrap();
    assert_eq!(table.row_count().await.unwrap(), 1);
}

#[tokio::test]
async fn update_age_by_first_name_changes_only_that_row() {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);
    let before = table.rows().await.unwrap();

    table.update_age_by_first_name("Larry", "25").await.unwrap();

    let after = table.rows().await.unwrap();
    let larry = after.iter().find(|r| r.first_name == "Larry").unwrap();
    assert_eq!(larry.age, "25");
    assert_eq!(larry.last_name, "Bird");
    let untouched: Vec<_> = after.iter().filter(|r| r.first_name != "Larry").collect();
    let original: Vec<_> = before.iter().filter(|r| r.first_name != "Larry").collect();
    assert_eq!(untouched, original);
}

#[tokio::test]
async fn repeating_an_age_update_is_a_no_op() {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);
    table.add_new_record("Artem", "Bondar").await.unwrap();

    table.update_age_by_first_name("Artem", "35").await.unwrap();
    let once = table.rows().await.unwrap();
    table.update_age_by_first_name("Artem", "35").await.unwrap();
    let twice = table.rows().await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(once[0].age, "35");
}

#[tokio::test]
async fn update_age_for_missing_name_is_ambiguous() {
    let mut app = smart_table().await;
    let err = SmartTablePage::new(&mut app)
        .update_age_by_first_name("Artem", "35")
        .await
        .unwrap_err();
    assert_eq!(err, PageError::AmbiguousMatch { name: "Artem".into(), matches: 0 });
}

#[tokio::test]
async fn update_age_for_duplicated_name_is_ambiguous() {
    let mut app = smart_table().await;
    let err = SmartTablePage::new(&mut app)
        .update_age_by_first_name("Mark", "35")
        .await
        .unwrap_err();
    assert_eq!(err, PageError::AmbiguousMatch { name: "Mark".into(), matches: 2 });
}

#[tokio::test]
async fn name_lookup_is_exact() {
    let mut app = smart_table().await;
    let err = SmartTablePage::new(&mut app)
        .update_age_by_first_name("Lar", "35")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::AmbiguousMatch { matches: 0, .. }));
}

#[test_case(0 ; "first row")]
#[test_case(1 ; "second row")]
#[test_case(10 ; "last row")]
#[tokio::test]
async fn delete_row_by_index_removes_that_row(index: usize) {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);
    let before = table.rows().await.unwrap();

    table.delete_row_by_index(index).await.unwrap();

    let after = table.rows().await.unwrap();
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.contains(&before[index]));
    assert_eq!(app.dialog_messages().await.unwrap(), vec![DELETE_CONFIRM_MESSAGE]);
}

#[test_case(0 ; "at row count")]
#[test_case(5 ; "past row count")]
#[tokio::test]
async fn delete_row_out_of_range_fails(past_end: usize) {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);
    let len = table.row_count().await.unwrap();

    let err = table.delete_row_by_index(len + past_end).await.unwrap_err();

    assert_eq!(err, PageError::IndexOutOfRange { index: len + past_end, len });
    assert_eq!(table.row_count().await.unwrap(), len);
}

/// Without an accepting dialog policy the browser dismisses the confirm
#[tokio::test]
async fn trash_without_dialog_acceptance_keeps_the_row() {
    let mut app = smart_table().await;
    let row = app.locate(None, &Locator::class("ng2-smart-row")).await.unwrap();
    let trash = app.locate(Some(&row), &Locator::class("nb-trash")).await.unwrap();
    app.click(&trash, InteractOptions::default()).await.unwrap();

    assert_eq!(app.dialog_messages().await.unwrap(), vec![DELETE_CONFIRM_MESSAGE]);
    assert_eq!(SmartTablePage::new(&mut app).row_count().await.unwrap(), 11);
}

#[tokio::test]
async fn cancelled_delete_keeps_the_row_and_records_the_dialog() {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);
    let before = table.rows().await.unwrap();

    table.cancel_delete_row_by_index(0).await.unwrap();
    assert_eq!(table.rows().await.unwrap(), before);

    table.delete_row_by_index(0).await.unwrap();
    assert_eq!(table.row_count().await.unwrap(), before.len() - 1);
    assert_eq!(
        app.dialog_messages().await.unwrap(),
        vec![DELETE_CONFIRM_MESSAGE, DELETE_CONFIRM_MESSAGE]
    );
}

#[test_case("20" ; "single match")]
#[test_case("30" ; "exact age")]
#[test_case("40" ; "another exact age")]
#[test_case("2" ; "substring")]
#[tokio::test]
async fn age_filter_keeps_only_matching_rows(age: &str) {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);

    table.filter_by_age(age).await.unwrap();

    let rows = table.rows().await.unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r.age.contains(age)), "{rows:?}");
    assert!(!table.has_no_data().await.unwrap());
}

#[tokio::test]
async fn age_filter_without_matches_shows_no_data() {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);

    table.filter_by_age("200").await.unwrap();

    assert_eq!(table.row_count().await.unwrap(), 0);
    assert!(table.has_no_data().await.unwrap());
}

#[tokio::test]
async fn changing_the_age_filter_replaces_the_previous_one() {
    let mut app = smart_table().await;
    let mut table = SmartTablePage::new(&mut app);

    table.filter_by_age("200").await.unwrap();
    table.filter_by_age("20").await.unwrap();

    let rows = table.rows().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].first_name, "John");
}

async fn form_layouts() -> SimulatedApp {
    let mut app = SimulatedApp::new();
    HomePage::new(&mut app).open().await.unwrap();
    NavigationPage::new(&mut app).go_to(Destination::FormLayouts).await.unwrap();
    app
}

#[tokio::test]
async fn add_new_record_off_the_table_page_is_not_found() {
    let mut app = form_layouts().await;
    let err = SmartTablePage::new(&mut app)
        .add_new_record("Artem", "Bondar")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::ElementNotFound { ref locator, .. } if locator == "thead"), "{err}");
}

#[tokio::test]
async fn update_age_off_the_table_page_is_not_found() {
    let mut app = form_layouts().await;
    let err = SmartTablePage::new(&mut app)
        .update_age_by_first_name("Larry", "25")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::ElementNotFound { .. }), "{err}");
}
