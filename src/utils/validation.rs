use chrono::{NaiveDate, NaiveDateTime};
use teloxide::utils::markdown::{bold, escape};
use thiserror::Error;

use crate::bot::conversation::draft::{EventDraft, FieldKind};
use crate::utils::datetime::{
    compose_timestamp, format_canonical_date, format_timestamp, parse_canonical_date,
};

pub const DEFAULT_START_TIME: &str = "00:00";
pub const DEFAULT_END_TIME: &str = "23:59";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Name is required")]
    NameRequired,
    #[error("Event start must be earlier than event end")]
    StartAfterEnd,
    #[error("Invalid {0}")]
    InvalidTimestamp(&'static str),
}

/// A draft that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEvent {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `HH:MM`, as entered.
    pub start_time: String,
    pub end_time: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ValidatedEvent {
    pub fn summary(&self) -> String {
        format_event_summary(&self.name, &self.start, &self.end)
    }
}

/// Renders an event as MarkdownV2: bold name, then start and end lines.
pub fn format_event_summary(name: &str, start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!(
        "{}\n From {}\n To {}\n",
        bold(&escape(name)),
        escape(&format_timestamp(start)),
        escape(&format_timestamp(end)),
    )
}

/// Checks a draft and fills in its missing fields.
///
/// Dates default to `today`, the start time to `00:00` and the end time to
/// `23:59`. The defaults are written back into the draft, so the menu shows
/// them afterwards.
pub fn validate_and_format_event(
    draft: &mut EventDraft,
    today: NaiveDate,
) -> Result<ValidatedEvent, EventError> {
    let name = draft.name.clone().ok_or(EventError::NameRequired)?;

    let today_text = format_canonical_date(today);
    draft.set_default(FieldKind::StartDate, today_text.clone());
    draft.set_default(FieldKind::EndDate, today_text);
    draft.set_default(FieldKind::StartTime, DEFAULT_START_TIME.to_string());
    draft.set_default(FieldKind::EndTime, DEFAULT_END_TIME.to_string());

    let start_date = field_date(draft, FieldKind::StartDate)?;
    let end_date = field_date(draft, FieldKind::EndDate)?;
    let start_time = draft.get(FieldKind::StartTime).unwrap_or(DEFAULT_START_TIME).to_string();
    let end_time = draft.get(FieldKind::EndTime).unwrap_or(DEFAULT_END_TIME).to_string();

    let start = compose_timestamp(start_date, &start_time)
        .ok_or(EventError::InvalidTimestamp("start time"))?;
    let end = compose_timestamp(end_date, &end_time)
        .ok_or(EventError::InvalidTimestamp("end time"))?;

    if start > end {
        return Err(EventError::StartAfterEnd);
    }

    Ok(ValidatedEvent {
        name,
        start_date,
        end_date,
        start_time,
        end_time,
        start,
        end,
    })
}

fn field_date(draft: &EventDraft, kind: FieldKind) -> Result<NaiveDate, EventError> {
    let invalid = match kind {
        FieldKind::EndDate => "end date",
        _ => "start date",
    };
    draft
        .get(kind)
        .and_then(parse_canonical_date)
        .ok_or(EventError::InvalidTimestamp(invalid))
}
