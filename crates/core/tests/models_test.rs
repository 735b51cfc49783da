use agenda_core::models::time_block::{CreateTimeBlockRequest, PageInfo, TimeBlock};
use agenda_core::models::user::{Role, User};
use agenda_core::stats::{general_stats, occupancy_rate, upcoming_week_stats};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

fn block(id: i64, count: i64) -> TimeBlock {
    TimeBlock {
        id,
        start_time: Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2024, 6, 10, 11, 0, 0).unwrap(),
        appointment_count: count,
    }
}

#[test]
fn time_block_serializes_camel_case() {
    let json = serde_json::to_value(block(1, 0)).unwrap();
    assert!(json.get("startTime").is_some());
    assert!(json.get("endTime").is_some());
    assert_eq!(json["appointmentCount"], 0);
}

#[test]
fn create_request_fields_are_optional() {
    let req: CreateTimeBlockRequest = serde_json::from_str("{}").unwrap();
    assert!(req.start_time.is_none());
    assert!(req.end_time.is_none());

    let req: CreateTimeBlockRequest =
        serde_json::from_str(r#"{"startTime": "2024-06-10T10:00:00Z"}"#).unwrap();
    assert_eq!(req.start_time.as_deref(), Some("2024-06-10T10:00:00Z"));
}

#[test]
fn role_round_trips_as_uppercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    assert_eq!(serde_json::from_str::<Role>("\"USER\"").unwrap(), Role::User);
    assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    assert!("ROOT".parse::<Role>().is_err());
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn user_never_carries_a_password_field() {
    let user = User {
        id: 1,
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        role: Role::User,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[test]
fn page_info_rounds_pages_up() {
    assert_eq!(PageInfo::new(1, 10, 0).pages, 0);
    assert_eq!(PageInfo::new(1, 10, 10).pages, 1);
    assert_eq!(PageInfo::new(1, 10, 11).pages, 2);
    assert_eq!(PageInfo::new(2, 5, 21).pages, 5);
}

#[test]
fn occupancy_rate_rounds_to_one_decimal() {
    assert_eq!(occupancy_rate(0, 0), 0.0);
    assert_eq!(occupancy_rate(1, 3), 33.3);
    assert_eq!(occupancy_rate(2, 3), 66.7);
    assert_eq!(occupancy_rate(5, 10), 50.0);
    assert_eq!(occupancy_rate(10, 10), 100.0);
}

#[test]
fn general_stats_partition_blocks() {
    let stats = general_stats(10, 4);
    assert_eq!(stats.total, stats.occupied + stats.available);
    assert_eq!(stats.available, 6);
    assert_eq!(stats.occupancy_rate, 40.0);

    let empty = general_stats(0, 0);
    assert_eq!(empty.occupancy_rate, 0.0);
}

#[test]
fn upcoming_week_stats_split_by_count() {
    let blocks = vec![block(1, 0), block(2, 2), block(3, 0)];
    let stats = upcoming_week_stats(&blocks);
    assert_eq!(stats.total_blocks, 3);
    assert_eq!(stats.available_blocks, 2);
    assert_eq!(stats.occupied_blocks, 1);
    assert_eq!(
        stats.total_blocks,
        stats.available_blocks + stats.occupied_blocks
    );
}
