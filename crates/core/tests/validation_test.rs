use agenda_core::errors::AgendaError;
use agenda_core::validation::{day_bounds, parse_id, parse_timestamp, validate_user_data};
use chrono::{Datelike, Timelike};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("1", 1)]
#[case("42", 42)]
#[case(" 7 ", 7)]
fn parse_id_accepts_positive_integers(#[case] raw: &str, #[case] expected: i64) {
    assert_eq!(parse_id(raw).unwrap(), expected);
}

#[rstest]
#[case("abc")]
#[case("12abc")]
#[case("0")]
#[case("-3")]
#[case("")]
#[case("1.5")]
fn parse_id_rejects_non_positive_literals(#[case] raw: &str) {
    assert!(matches!(parse_id(raw), Err(AgendaError::InvalidId(_))));
}

#[test]
fn parse_timestamp_accepts_rfc3339() {
    let ts = parse_timestamp("startTime", "2024-06-10T10:30:00Z").unwrap();
    assert_eq!(ts.hour(), 10);
    assert_eq!(ts.minute(), 30);
}

#[test]
fn parse_timestamp_accepts_naive_as_utc() {
    let ts = parse_timestamp("endTime", "2024-06-10T18:00:00").unwrap();
    assert_eq!(ts.hour(), 18);
}

#[test]
fn parse_timestamp_rejects_garbage() {
    let err = parse_timestamp("startTime", "not-a-date").unwrap_err();
    assert!(matches!(err, AgendaError::InvalidDate(_)));
    assert!(err.to_string().contains("startTime"));
}

#[test]
fn day_bounds_covers_whole_day() {
    let (start, end) = day_bounds("2024-06-10").unwrap();
    assert_eq!(start.day(), 10);
    assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
    assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    assert!(start < end);
}

#[test]
fn day_bounds_rejects_bad_date() {
    assert!(matches!(
        day_bounds("2024-13-40"),
        Err(AgendaError::InvalidDate(_))
    ));
    assert!(matches!(day_bounds("soon"), Err(AgendaError::InvalidDate(_))));
}

#[test]
fn user_data_collects_all_field_errors() {
    let errors = validate_user_data("  ", "no-at-sign");
    assert_eq!(errors.len(), 2);

    let errors = validate_user_data("Ana", "ana@example.com");
    assert!(errors.is_empty());

    let errors = validate_user_data("", "ana@example.com");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("name"));
}
