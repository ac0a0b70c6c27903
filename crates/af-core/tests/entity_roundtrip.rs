//! Serde roundtrip and JsonSchema validation tests for all entity types.

use af_core::entities::*;
use af_core::enums::*;
use af_core::identity::SessionContext;
use af_core::responses::*;
use chrono::{NaiveDate, NaiveTime, Utc};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    slot_roundtrip,
    Slot,
    Slot {
        id: "slt-a3f8b2c1".into(),
        operation_id: "opr-00000001".into(),
        serial_no: 1,
        name: "First period".into(),
        start: time(9, 0),
        end: time(9, 50),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    recurring_event_roundtrip,
    RecurringEvent,
    RecurringEvent {
        id: "evt-1b2c3d4e".into(),
        routine_id: "rtn-00000001".into(),
        institute_id: "ins-00000001".into(),
        title: "Lecture".into(),
        course_id: Some("crs-00000001".into()),
        start_slot_id: "slt-00000001".into(),
        end_slot_id: "slt-00000003".into(),
        day_of_week: DayOfWeek::Monday,
        repeat_every: 1,
        start_week: 1,
        is_reschedulable: true,
        description: Some("Room 204".into()),
        scope: AudienceScope::group("grp-00000001"),
        created_by: Some("usr-00000001".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    subgroup_roundtrip,
    Subgroup,
    Subgroup {
        id: "sgp-00000001".into(),
        group_id: "grp-00000001".into(),
        name: "Lab A".into(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    operation_roundtrip,
    Operation,
    Operation {
        id: "opr-00000001".into(),
        program_id: "prg-00000001".into(),
        name: "Spring 2026".into(),
        status: OperationStatus::Active,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    vacation_roundtrip,
    Vacation,
    Vacation {
        id: "vac-00000001".into(),
        institute_id: "ins-00000001".into(),
        start_day: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
        end_day: NaiveDate::from_ymd_opt(2027, 1, 3).unwrap(),
        description: Some("Winter break".into()),
        scope: VacationScope::All,
        target_id: "ins-00000001".into(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    user_roundtrip,
    User,
    User {
        id: "usr-00000001".into(),
        institute_id: "ins-00000001".into(),
        name: "Rafi Ahmed".into(),
        email: "rafi@example.edu".into(),
        role: Role::Student,
        program_id: Some("prg-00000001".into()),
        is_representative: true,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    audit_roundtrip,
    AuditEntry,
    AuditEntry {
        id: "aud-00000001".into(),
        institute_id: "ins-00000001".into(),
        actor_id: None,
        entity_type: EntityType::RecurringEvent,
        entity_id: "evt-00000001".into(),
        action: AuditAction::Updated,
        detail: Some(serde_json::json!({"title": "Lab"})),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    delete_response_roundtrip,
    DeleteResponse,
    DeleteResponse {
        entity_type: EntityType::Slot,
        id: "slt-00000001".into(),
        deleted: true,
    }
);

roundtrip_and_validate!(
    session_context_roundtrip,
    SessionContext,
    SessionContext::new("ins-00000001", Some("usr-00000001".into()))
);

#[test]
fn vacation_range_is_inclusive() {
    let vacation = Vacation {
        id: "vac-1".into(),
        institute_id: "ins-1".into(),
        start_day: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_day: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
        description: None,
        scope: VacationScope::Program,
        target_id: "prg-1".into(),
        created_at: Utc::now(),
    };
    assert!(vacation.covers(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
    assert!(vacation.covers(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()));
    assert!(!vacation.covers(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()));
}

#[test]
fn audience_scope_matches_exact_kind_and_id() {
    let scope = AudienceScope::subgroup("sgp-1");
    assert!(scope.is(ScopeKind::Subgroup, "sgp-1"));
    assert!(!scope.is(ScopeKind::Group, "sgp-1"));
    assert!(!scope.is(ScopeKind::Subgroup, "sgp-2"));
}
