//! End-to-end flows through the page objects, each on a fresh session

use ngx_pages::{FormLayoutsPage, HomePage, NavigationPage, SimulatedApp, SmartTablePage};

async fn fresh_home() -> SimulatedApp {
    let mut app = SimulatedApp::new();
    HomePage::new(&mut app).open().await.unwrap();
    app
}

#[tokio::test]
async fn inline_form_submission_reaches_the_app() {
    let mut app = fresh_home().await;
    NavigationPage::new(&mut app).go_to_form_layouts().await.unwrap();
    FormLayoutsPage::new(&mut app)
        .submit_inline_form_with_name_and_email("Artem", "test@test.com")
        .await
        .unwrap();

    let submitted = &app.submissions()[0];
    assert_eq!(submitted.fields["Jane Doe"], "Artem");
    assert_eq!(submitted.fields["Email"], "test@test.com");
    assert!(submitted.checked);
}

/// Add, edit and delete in one session. Rows are prepended, so the new row
/// sits at index 0 and deleting index 1 removes the row below it.
#[tokio::test]
async fn add_update_delete_restores_row_count() {
    let mut app = fresh_home().await;
    NavigationPage::new(&mut app).go_to_smart_table().await.unwrap();
    let mut table = SmartTablePage::new(&mut app);
    let initial = table.row_count().await.unwrap();

    table.add_new_record("Artem", "Bondar").await.unwrap();
    table.update_age_by_first_name("Artem", "35").await.unwrap();
    let below_new_row = table.row(1).await.unwrap();
    table.delete_row_by_index(1).await.unwrap();

    assert_eq!(table.row_count().await.unwrap(), initial);
    let rows = table.rows().await.unwrap();
    assert!(!rows.contains(&below_new_row));
    assert_eq!(rows[0].first_name, "Artem");
    assert_eq!(rows[0].age, "35");
}

#[tokio::test]
async fn deleting_the_new_row_leaves_no_artem() {
    let mut app = fresh_home().await;
    NavigationPage::new(&mut app).go_to_smart_table().await.unwrap();
    let mut table = SmartTablePage::new(&mut app);
    let initial = table.row_count().await.unwrap();

    table.add_new_record("Artem", "Bondar").await.unwrap();
    table.update_age_by_first_name("Artem", "35").await.unwrap();
    table.delete_row_by_index(0).await.unwrap();

    assert_eq!(table.row_count().await.unwrap(), initial);
    assert!(table.find_rows_by_first_name("Artem").await.unwrap().is_empty());
}

#[tokio::test]
async fn each_session_starts_from_seed_data() {
    let mut first = fresh_home().await;
    NavigationPage::new(&mut first).go_to_smart_table().await.unwrap();
    SmartTablePage::new(&mut first)
        .add_new_record("Artem", "Bondar")
        .await
        .unwrap();

    let mut second = fresh_home().await;
    NavigationPage::new(&mut second).go_to_smart_table().await.unwrap();
    let rows = SmartTablePage::new(&mut second)
        .find_rows_by_first_name("Artem")
        .await
        .unwrap();
    assert!(rows.is_empty());
}
