use chrono::NaiveDate;
use planner_bot::bot::conversation::draft::{EventDraft, FieldKind};
use planner_bot::utils::validation::*;

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn named(name: &str) -> EventDraft {
        let mut draft = EventDraft::default();
        draft.set(FieldKind::Name, name.to_string());
        draft
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let mut draft = EventDraft::default();
        draft.set(FieldKind::StartDate, "6.3.2024".to_string());

        let result = validate_and_format_event(&mut draft, today());
        assert_eq!(result, Err(EventError::NameRequired));
        assert_eq!(EventError::NameRequired.to_string(), "Name is required");
    }

    #[test]
    fn test_defaults_are_written_back_into_the_draft() {
        let mut draft = named("Birthday");

        let event = validate_and_format_event(&mut draft, today()).unwrap();

        assert_eq!(draft.get(FieldKind::StartDate), Some("5.3.2024"));
        assert_eq!(draft.get(FieldKind::EndDate), Some("5.3.2024"));
        assert_eq!(draft.get(FieldKind::StartTime), Some(DEFAULT_START_TIME));
        assert_eq!(draft.get(FieldKind::EndTime), Some(DEFAULT_END_TIME));

        assert_eq!(event.start_date, today());
        assert_eq!(event.end_date, today());
        assert_eq!(event.start_time, "00:00");
        assert_eq!(event.end_time, "23:59");
    }

    #[test]
    fn test_existing_values_are_kept() {
        let mut draft = named("Meeting");
        draft.set(FieldKind::StartDate, "7.3.2024".to_string());
        draft.set(FieldKind::EndDate, "8.3.2024".to_string());
        draft.set(FieldKind::StartTime, "09:00".to_string());

        let event = validate_and_format_event(&mut draft, today()).unwrap();

        assert_eq!(event.start_date, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(event.end_date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(event.start_time, "09:00");
        assert_eq!(event.end_time, DEFAULT_END_TIME);
    }

    #[test]
    fn test_defaulted_end_date_can_precede_start() {
        let mut draft = named("Meeting");
        draft.set(FieldKind::StartDate, "7.3.2024".to_string());

        // End date falls back to today, which is before the start
        let result = validate_and_format_event(&mut draft, today());
        assert_eq!(result, Err(EventError::StartAfterEnd));
        assert_eq!(draft.get(FieldKind::EndDate), Some("5.3.2024"));
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let mut draft = named("Backwards");
        draft.set(FieldKind::StartDate, "2.1.2030".to_string());
        draft.set(FieldKind::StartTime, "10:00".to_string());
        draft.set(FieldKind::EndDate, "1.1.2030".to_string());
        draft.set(FieldKind::EndTime, "09:00".to_string());

        let result = validate_and_format_event(&mut draft, today());
        assert_eq!(result, Err(EventError::StartAfterEnd));
    }

    #[test]
    fn test_start_after_end_on_the_same_day() {
        let mut draft = named("Backwards");
        draft.set(FieldKind::StartTime, "18:00".to_string());
        draft.set(FieldKind::EndTime, "08:00".to_string());

        let result = validate_and_format_event(&mut draft, today());
        assert_eq!(result, Err(EventError::StartAfterEnd));
    }

    #[test]
    fn test_equal_start_and_end_is_accepted() {
        let mut draft = named("Instant");
        draft.set(FieldKind::StartTime, "12:00".to_string());
        draft.set(FieldKind::EndTime, "12:00".to_string());

        assert!(validate_and_format_event(&mut draft, today()).is_ok());
    }

    #[test]
    fn test_end_at_24_rolls_into_next_day() {
        let mut draft = named("Late shift");
        draft.set(FieldKind::StartTime, "22:00".to_string());
        draft.set(FieldKind::EndTime, "24:00".to_string());

        let event = validate_and_format_event(&mut draft, today()).unwrap();
        assert_eq!(event.end.date(), NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn test_summary_format() {
        let mut draft = named("Team lunch");
        draft.set(FieldKind::StartTime, "12:30".to_string());
        draft.set(FieldKind::EndTime, "13:30".to_string());

        let event = validate_and_format_event(&mut draft, today()).unwrap();
        assert_eq!(
            event.summary(),
            "*Team lunch*\n From 05\\.03\\.2024 12:30\n To 05\\.03\\.2024 13:30\n"
        );
    }

    #[test]
    fn test_summary_escapes_markdown_in_name() {
        let mut draft = named("v1.2 release (final)");

        let event = validate_and_format_event(&mut draft, today()).unwrap();
        assert!(event.summary().starts_with("*v1\\.2 release \\(final\\)*\n"));
    }

    #[test]
    fn test_unparseable_draft_values_are_reported() {
        let mut draft = named("Broken");
        draft.set(FieldKind::EndTime, "noon".to_string());

        let result = validate_and_format_event(&mut draft, today());
        assert_eq!(result, Err(EventError::InvalidTimestamp("end time")));
        assert_eq!(EventError::InvalidTimestamp("end time").to_string(), "Invalid end time");
    }
}
