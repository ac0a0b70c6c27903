//! Shared fixtures for af-db tests.

use af_core::entities::{Group, Operation, Routine, Slot, Subgroup};
use af_core::enums::OperationStatus;
use af_core::identity::SessionContext;
use chrono::NaiveTime;

use crate::service::AcademyService;

/// In-memory service.
pub async fn test_service() -> AcademyService {
    AcademyService::new_local(":memory:").await.unwrap()
}

/// In-memory service with one institute; returns the session for it.
pub async fn test_service_with_institute() -> (AcademyService, SessionContext) {
    let svc = test_service().await;
    let institute = svc
        .create_institute("North Campus", Some("usr-admin"))
        .await
        .unwrap();
    let ctx = SessionContext::new(institute.id, Some("usr-admin".into()));
    (svc, ctx)
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A program with one active term.
pub async fn seed_operation(svc: &AcademyService, ctx: &SessionContext) -> Operation {
    let program = svc.create_program(ctx, "BSc Physics", None).await.unwrap();
    svc.create_operation(ctx, &program.id, "Spring 2026", OperationStatus::Active)
        .await
        .unwrap()
}

/// Three consecutive slots `P1..P3` with serials 1..3.
pub async fn seed_slots(svc: &AcademyService, ctx: &SessionContext, operation_id: &str) -> Vec<Slot> {
    let mut slots = Vec::new();
    for (serial, hour) in [(1, 9), (2, 10), (3, 11)] {
        slots.push(
            svc.create_slot(
                ctx,
                operation_id,
                serial,
                &format!("P{serial}"),
                time(hour, 0),
                time(hour, 50),
            )
            .await
            .unwrap(),
        );
    }
    slots
}

/// Everything needed to place events: term, slots, routine, one group with
/// two subgroups.
pub struct TimetableFixture {
    pub operation: Operation,
    pub slots: Vec<Slot>,
    pub routine: Routine,
    pub group: Group,
    pub subgroups: Vec<Subgroup>,
}

pub async fn seed_timetable(svc: &AcademyService, ctx: &SessionContext) -> TimetableFixture {
    let operation = seed_operation(svc, ctx).await;
    let slots = seed_slots(svc, ctx, &operation.id).await;
    let routine = svc
        .create_routine(ctx, &operation.id, "Weekly")
        .await
        .unwrap();
    let group = svc
        .create_group(ctx, &operation.program_id, "Batch 21")
        .await
        .unwrap();
    let mut subgroups = Vec::new();
    for name in ["Lab A", "Lab B"] {
        subgroups.push(svc.create_subgroup(ctx, &group.id, name).await.unwrap());
    }
    TimetableFixture {
        operation,
        slots,
        routine,
        group,
        subgroups,
    }
}
