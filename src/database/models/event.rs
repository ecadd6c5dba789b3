use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use teloxide::utils::markdown::escape;

use crate::utils::datetime::{compose_timestamp, parse_storage_date, to_storage_date};
use crate::utils::logging::log_database_operation;
use crate::utils::validation::{format_event_summary, ValidatedEvent, DEFAULT_END_TIME, DEFAULT_START_TIME};

/// A stored event. Dates are kept in storage form (`YYYY.MM.DD`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub startdate: String,
    pub enddate: String,
    pub starttime: String,
    pub endtime: String,
}

/// Bounds for an event search. An event matches when it starts on or after
/// `start_date` at or after `start_time`, and ends on or before `end_date`
/// at or before `end_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub start_date: NaiveDate,
    pub start_time: String,
    pub end_date: NaiveDate,
    pub end_time: String,
}

impl QueryWindow {
    pub fn full_day(date: NaiveDate) -> Self {
        Self::within_day(date, DEFAULT_START_TIME, DEFAULT_END_TIME)
    }

    pub fn within_day(date: NaiveDate, start_time: &str, end_time: &str) -> Self {
        Self {
            start_date: date,
            start_time: start_time.to_string(),
            end_date: date,
            end_time: end_time.to_string(),
        }
    }
}

impl Event {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        event: &ValidatedEvent,
    ) -> Result<Self, sqlx::Error> {
        let startdate = to_storage_date(event.start_date);
        let enddate = to_storage_date(event.end_date);
        log_database_operation(
            "INSERT",
            "single",
            Some(&format!("'{}' {} {} - {} {}", event.name, startdate, event.start_time, enddate, event.end_time)),
        );

        let result = sqlx::query(
            r#"
            INSERT INTO single (name, startdate, enddate, starttime, endtime)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.name)
        .bind(&startdate)
        .bind(&enddate)
        .bind(&event.start_time)
        .bind(&event.end_time)
        .execute(pool)
        .await?;

        Ok(Event {
            id: result.last_insert_rowid(),
            name: event.name.clone(),
            startdate,
            enddate,
            starttime: event.start_time.clone(),
            endtime: event.end_time.clone(),
        })
    }

    pub async fn find_in_window(
        pool: &sqlx::SqlitePool,
        window: &QueryWindow,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let startdate = to_storage_date(window.start_date);
        let enddate = to_storage_date(window.end_date);
        log_database_operation(
            "SELECT",
            "single",
            Some(&format!("{} {} - {} {}", startdate, window.start_time, enddate, window.end_time)),
        );

        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, startdate, enddate, starttime, endtime FROM single
            WHERE startdate >= ? AND enddate <= ? AND starttime >= ? AND endtime <= ?
            ORDER BY startdate, starttime, id
            "#,
        )
        .bind(startdate)
        .bind(enddate)
        .bind(&window.start_time)
        .bind(&window.end_time)
        .fetch_all(pool)
        .await
    }

    /// Renders the event as MarkdownV2, the same way the creation summary is.
    pub fn as_message(&self) -> String {
        let start = parse_storage_date(&self.startdate)
            .and_then(|date| compose_timestamp(date, &self.starttime));
        let end = parse_storage_date(&self.enddate)
            .and_then(|date| compose_timestamp(date, &self.endtime));

        match (start, end) {
            (Some(start), Some(end)) => format_event_summary(&self.name, &start, &end),
            _ => escape(&format!(
                "{}\n From {} {}\n To {} {}\n",
                self.name, self.startdate, self.starttime, self.enddate, self.endtime
            )),
        }
    }
}
