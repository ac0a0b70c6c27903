use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization. Hyphens and
/// case are normalized, so `Monday` and `recurring-event` both work.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_").to_ascii_lowercase();
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse `HH:MM` or `HH:MM:SS` (24-hour).
pub fn parse_time(raw: &str, field: &str) -> anyhow::Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| anyhow::anyhow!("invalid {field} '{raw}': expected HH:MM"))
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid {field} '{raw}': expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use af_core::enums::{DayOfWeek, EntityType, OperationStatus};
    use chrono::{NaiveDate, NaiveTime};

    use super::{parse_date, parse_enum, parse_time};

    #[test]
    fn parses_snake_case_enum() {
        let status: OperationStatus = parse_enum("active", "status").expect("status should parse");
        assert_eq!(status, OperationStatus::Active);
    }

    #[test]
    fn parses_hyphenated_and_capitalised_values() {
        let entity: EntityType =
            parse_enum("recurring-event", "entity-type").expect("entity should parse");
        assert_eq!(entity, EntityType::RecurringEvent);
        let day: DayOfWeek = parse_enum("Friday", "day").expect("day should parse");
        assert_eq!(day, DayOfWeek::Friday);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<OperationStatus>("done", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'done'"));
    }

    #[test]
    fn parses_times_with_and_without_seconds() {
        assert_eq!(
            parse_time("09:05", "start").expect("time"),
            NaiveTime::from_hms_opt(9, 5, 0).expect("valid")
        );
        assert_eq!(
            parse_time("13:55:30", "end").expect("time"),
            NaiveTime::from_hms_opt(13, 55, 30).expect("valid")
        );
        let err = parse_time("9am", "start").expect_err("should fail");
        assert!(err.to_string().contains("expected HH:MM"));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2026-12-20", "start").expect("date"),
            NaiveDate::from_ymd_opt(2026, 12, 20).expect("valid")
        );
        assert!(parse_date("20/12/2026", "start").is_err());
    }
}
