use anyhow::Result;
use chrono::NaiveDate;
use planner_bot::bot::conversation::draft::{EventDraft, FieldKind};
use planner_bot::database::{connection::DatabaseManager, models::*};
use planner_bot::utils::validation::{validate_and_format_event, ValidatedEvent};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(name: &str, start: (&str, &str), end: (&str, &str)) -> ValidatedEvent {
    let mut draft = EventDraft::default();
    draft.set(FieldKind::Name, name.to_string());
    draft.set(FieldKind::StartDate, start.0.to_string());
    draft.set(FieldKind::StartTime, start.1.to_string());
    draft.set(FieldKind::EndDate, end.0.to_string());
    draft.set(FieldKind::EndTime, end.1.to_string());
    validate_and_format_event(&mut draft, date(2024, 1, 1)).unwrap()
}

#[tokio::test]
async fn test_user_registration_is_idempotent() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    assert!(User::register(&db.pool, 42).await?);
    assert!(!User::register(&db.pool, 42).await?);

    let user = User::find_by_id(&db.pool, 42).await?.unwrap();
    assert_eq!(user.id, 42);
    assert!(!user.authorized);

    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_not_authorized() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    assert!(!User::is_authorized(&db.pool, 99999).await?);
    assert!(User::find_by_id(&db.pool, 99999).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_authorize_and_revoke_user() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    User::register(&db.pool, 7).await?;
    assert!(!User::is_authorized(&db.pool, 7).await?);

    User::set_authorized(&db.pool, 7, true).await?;
    assert!(User::is_authorized(&db.pool, 7).await?);

    // Registering again must not reset the flag
    assert!(!User::register(&db.pool, 7).await?);
    assert!(User::is_authorized(&db.pool, 7).await?);

    User::set_authorized(&db.pool, 7, false).await?;
    assert!(!User::is_authorized(&db.pool, 7).await?);

    Ok(())
}

#[tokio::test]
async fn test_authorize_creates_missing_user() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    User::set_authorized(&db.pool, 1234, true).await?;
    assert!(User::is_authorized(&db.pool, 1234).await?);

    Ok(())
}

#[tokio::test]
async fn test_event_is_stored_in_padded_year_first_form() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let stored = Event::create(&db.pool, &event("Dentist", ("5.3.2024", "09:30"), ("5.3.2024", "10:00"))).await?;
    assert_eq!(stored.startdate, "2024.03.05");
    assert_eq!(stored.enddate, "2024.03.05");
    assert_eq!(stored.starttime, "09:30");
    assert_eq!(stored.endtime, "10:00");

    let row: (String, String) = sqlx::query_as("SELECT name, startdate FROM single WHERE id = ?")
        .bind(stored.id)
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(row, ("Dentist".to_string(), "2024.03.05".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_full_day_query() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Event::create(&db.pool, &event("Lunch", ("5.3.2024", "12:00"), ("5.3.2024", "13:00"))).await?;
    Event::create(&db.pool, &event("Breakfast", ("5.3.2024", "08:00"), ("5.3.2024", "08:30"))).await?;
    Event::create(&db.pool, &event("Other day", ("6.3.2024", "12:00"), ("6.3.2024", "13:00"))).await?;
    Event::create(&db.pool, &event("Trip", ("5.3.2024", "18:00"), ("6.3.2024", "10:00"))).await?;

    let events = Event::find_in_window(&db.pool, &QueryWindow::full_day(date(2024, 3, 5))).await?;
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();

    // Ordered by start time; the event ending the next day is left out
    assert_eq!(names, vec!["Breakfast", "Lunch"]);

    Ok(())
}

#[tokio::test]
async fn test_query_within_day_respects_times() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Event::create(&db.pool, &event("Standup", ("5.3.2024", "09:00"), ("5.3.2024", "09:15"))).await?;
    Event::create(&db.pool, &event("Review", ("5.3.2024", "15:00"), ("5.3.2024", "16:00"))).await?;

    let window = QueryWindow::within_day(date(2024, 3, 5), "08:00", "12:00");
    let events = Event::find_in_window(&db.pool, &window).await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Standup");

    Ok(())
}

#[tokio::test]
async fn test_storage_dates_compare_chronologically() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    // Unpadded forms would order "2024.10.1" before "2024.9.30"
    Event::create(&db.pool, &event("October", ("1.10.2024", "10:00"), ("1.10.2024", "11:00"))).await?;
    Event::create(&db.pool, &event("September", ("30.9.2024", "10:00"), ("30.9.2024", "11:00"))).await?;

    let window = QueryWindow {
        start_date: date(2024, 9, 1),
        start_time: "00:00".to_string(),
        end_date: date(2024, 9, 30),
        end_time: "23:59".to_string(),
    };
    let events = Event::find_in_window(&db.pool, &window).await?;
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["September"]);

    Ok(())
}

#[tokio::test]
async fn test_no_events_found() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let events = Event::find_in_window(&db.pool, &QueryWindow::full_day(date(2024, 3, 5))).await?;
    assert!(events.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_event_message_matches_creation_summary() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let validated = event("Game night", ("5.3.2024", "19:00"), ("5.3.2024", "23:00"));
    let stored = Event::create(&db.pool, &validated).await?;

    assert_eq!(stored.as_message(), validated.summary());
    assert_eq!(
        stored.as_message(),
        "*Game night*\n From 05\\.03\\.2024 19:00\n To 05\\.03\\.2024 23:00\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_migrations_can_run_twice() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    db.run_migrations().await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM single")
        .fetch_one(&db.pool)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}
