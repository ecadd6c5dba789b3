use chrono::NaiveDate;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::conversation::draft::FieldKind;
use crate::bot::handlers::HandlerResult;
use crate::database::{connection::DatabaseManager, models::{Event, QueryWindow}};
use crate::utils::datetime::{format_canonical_date, parse_canonical_date};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_database_error, log_system_event};
use crate::utils::validation::{DEFAULT_END_TIME, DEFAULT_START_TIME};

pub const NO_EVENTS: &str = "No events";

/// What a bare text message asks for, if it is a query at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayQuery {
    Day(NaiveDate),
    /// Looked like a date but does not resolve to a valid upcoming one.
    InvalidDate,
}

/// `today` or `tomorrow`, in any letter case.
pub fn resolve_day_keyword(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if text.eq_ignore_ascii_case("today") {
        Some(today)
    } else if text.eq_ignore_ascii_case("tomorrow") {
        today.succ_opt()
    } else {
        None
    }
}

/// Recognizes `today`, `tomorrow` and bare dates such as `5.3`.
pub fn parse_day_query(text: &str, today: NaiveDate) -> Option<DayQuery> {
    if let Some(day) = resolve_day_keyword(text, today) {
        return Some(DayQuery::Day(day));
    }

    let kind = FieldKind::StartDate;
    if !kind.pattern().is_match(text) {
        return None;
    }
    let day = kind
        .parse(text, today)
        .ok()
        .and_then(|canonical| parse_canonical_date(&canonical));
    Some(day.map_or(DayQuery::InvalidDate, DayQuery::Day))
}

/// Parses `/info <date> [<start_time>] [<end_time>]` arguments.
pub fn parse_info_args(args: &str, today: NaiveDate) -> Result<QueryWindow, String> {
    let mut tokens = args.split_whitespace();
    let date_token = tokens.next().ok_or_else(|| "A date is required".to_string())?;

    let date = match parse_day_query(date_token, today) {
        Some(DayQuery::Day(date)) => date,
        _ => return Err(format!("Invalid date '{date_token}'")),
    };

    let start_time = match tokens.next() {
        Some(token) => FieldKind::StartTime
            .parse(token, today)
            .map_err(|e| format!("Start time '{token}': {e}"))?,
        None => DEFAULT_START_TIME.to_string(),
    };
    let end_time = match tokens.next() {
        Some(token) => FieldKind::EndTime
            .parse(token, today)
            .map_err(|e| format!("End time '{token}': {e}"))?,
        None => DEFAULT_END_TIME.to_string(),
    };

    if start_time > end_time {
        return Err("Start time must be earlier than end time".to_string());
    }

    Ok(QueryWindow::within_day(date, &start_time, &end_time))
}

/// Sends every event inside `window`, one message each.
pub async fn handle_window_query(
    bot: &Bot,
    chat_id: ChatId,
    window: &QueryWindow,
    db: &DatabaseManager,
) -> HandlerResult {
    let events = Event::find_in_window(&db.pool, window).await.map_err(|e| {
        log_database_error("SELECT", "single", &e.to_string());
        e
    })?;

    log_system_event(
        "Event query",
        Some(&format!(
            "{} events on {} in chat {}",
            events.len(),
            format_canonical_date(window.start_date),
            chat_id.0
        )),
    );

    if events.is_empty() {
        CommandFeedback::new(bot.clone(), chat_id).info(NO_EVENTS).await?;
        return Ok(());
    }

    for event in &events {
        bot.send_message(chat_id, event.as_message())
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_keywords_ignore_case() {
        let tomorrow = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(parse_day_query("today", today()), Some(DayQuery::Day(today())));
        assert_eq!(parse_day_query("ToDay", today()), Some(DayQuery::Day(today())));
        assert_eq!(parse_day_query("TOMORROW", today()), Some(DayQuery::Day(tomorrow)));
        assert_eq!(parse_day_query("today please", today()), None);
    }

    #[test]
    fn test_bare_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_day_query("15.3", today()), Some(DayQuery::Day(date)));
        assert_eq!(parse_day_query("1.3.2024", today()), Some(DayQuery::InvalidDate));
        assert_eq!(parse_day_query("hello", today()), None);
    }

    #[test]
    fn test_info_args() {
        let window = parse_info_args("15.3 9 1730", today()).unwrap();
        assert_eq!(window.start_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(window.end_date, window.start_date);
        assert_eq!(window.start_time, "09:00");
        assert_eq!(window.end_time, "17:30");

        let window = parse_info_args("tomorrow", today()).unwrap();
        assert_eq!(window, QueryWindow::full_day(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));

        assert!(parse_info_args("", today()).is_err());
        assert!(parse_info_args("soon", today()).is_err());
        assert!(parse_info_args("15.3 18 9", today()).is_err());
        assert!(parse_info_args("15.3 99", today()).is_err());
    }
}
