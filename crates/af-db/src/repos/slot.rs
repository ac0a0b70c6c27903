//! Slot catalog repository.
//!
//! Slots are the columns of a term's timetable. Serial order is the only
//! ordering key; times are display data.

use chrono::{NaiveTime, Utc};

use af_core::entities::Slot;
use af_core::enums::{AuditAction, EntityType};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_SLOT;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, format_time, parse_datetime, parse_time, to_detail};
use crate::service::AcademyService;
use crate::updates::slot::SlotUpdate;

const SELECT_COLS: &str = "id, operation_id, serial_no, name, start_time, end_time, created_at";

fn row_to_slot(row: &libsql::Row) -> Result<Slot, DatabaseError> {
    Ok(Slot {
        id: row.get(0)?,
        operation_id: row.get(1)?,
        serial_no: row.get(2)?,
        name: row.get(3)?,
        start: parse_time(&row.get::<String>(4)?)?,
        end: parse_time(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn check_times(start: NaiveTime, end: NaiveTime) -> Result<(), DatabaseError> {
    if start >= end {
        return Err(DatabaseError::Validation(format!(
            "slot must start before it ends ({start} >= {end})"
        )));
    }
    Ok(())
}

impl AcademyService {
    /// Add a slot to a term's catalog.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the operation is unknown, the
    /// times are inverted, or the serial is already taken in this term.
    pub async fn create_slot(
        &self,
        ctx: &SessionContext,
        operation_id: &str,
        serial_no: i64,
        name: &str,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Slot, DatabaseError> {
        check_times(start, end)?;
        self.get_operation(ctx, operation_id)
            .await
            .map_err(|e| e.missing("operation", operation_id))?;
        self.ensure_serial_free(ctx, operation_id, serial_no, None)
            .await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SLOT).await?;
        self.db()
            .execute_with(
                "INSERT INTO slots (id, institute_id, operation_id, serial_no, name, start_time, end_time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        operation_id,
                        serial_no,
                        name,
                        format_time(start),
                        format_time(end),
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Slot, &id, AuditAction::Created, None)
            .await?;

        Ok(Slot {
            id,
            operation_id: operation_id.to_string(),
            serial_no,
            name: name.to_string(),
            start,
            end,
            created_at: now,
        })
    }

    async fn ensure_serial_free(
        &self,
        ctx: &SessionContext,
        operation_id: &str,
        serial_no: i64,
        except_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                "SELECT id FROM slots
                 WHERE institute_id = ?1 AND operation_id = ?2 AND serial_no = ?3",
                || libsql::params![ctx.institute_id.as_str(), operation_id, serial_no],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let id: String = row.get(0)?;
            if except_id != Some(id.as_str()) {
                return Err(DatabaseError::Validation(format!(
                    "serial {serial_no} is already used by slot {id}"
                )));
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the slot does not exist.
    pub async fn get_slot(&self, ctx: &SessionContext, id: &str) -> Result<Slot, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM slots WHERE id = ?1 AND institute_id = ?2"),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_slot(&row)
    }

    /// The term's slot catalog, ascending by serial. Empty for a term
    /// without slots.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_slots(
        &self,
        ctx: &SessionContext,
        operation_id: &str,
    ) -> Result<Vec<Slot>, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM slots
                     WHERE operation_id = ?1 AND institute_id = ?2
                     ORDER BY serial_no ASC"
                ),
                || [operation_id, ctx.institute_id.as_str()],
            )
            .await?;
        let mut slots = Vec::new();
        while let Some(row) = rows.next().await? {
            slots.push(row_to_slot(&row)?);
        }
        Ok(slots)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the result would have inverted
    /// times or a serial already used in the term.
    pub async fn update_slot(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: SlotUpdate,
    ) -> Result<Slot, DatabaseError> {
        let current = self.get_slot(ctx, id).await?;
        check_times(
            update.start.unwrap_or(current.start),
            update.end.unwrap_or(current.end),
        )?;

        let mut set = SetClause::new();
        if let Some(serial_no) = update.serial_no {
            if serial_no != current.serial_no {
                self.ensure_serial_free(ctx, &current.operation_id, serial_no, Some(id))
                    .await?;
            }
            set.push("serial_no", serial_no);
        }
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if let Some(start) = update.start {
            set.push("start_time", format_time(start));
        }
        if let Some(end) = update.end {
            set.push("end_time", format_time(end));
        }
        if set.is_empty() {
            return Ok(current);
        }

        let (sql, params) = set.into_sql("slots", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Slot,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_slot(ctx, id).await
    }

    /// Delete a slot. Events starting or ending on it go with it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the slot does not exist.
    pub async fn delete_slot(&self, ctx: &SessionContext, id: &str) -> Result<(), DatabaseError> {
        self.get_slot(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM slots WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Slot, id, AuditAction::Deleted, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{seed_operation, seed_slots, test_service_with_institute, time};
    use crate::updates::slot::SlotUpdateBuilder;

    #[tokio::test]
    async fn catalog_is_sorted_by_serial() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        svc.create_slot(&ctx, &op.id, 3, "P3", time(11, 0), time(11, 50))
            .await
            .unwrap();
        svc.create_slot(&ctx, &op.id, 1, "P1", time(9, 0), time(9, 50))
            .await
            .unwrap();
        svc.create_slot(&ctx, &op.id, 2, "P2", time(10, 0), time(10, 50))
            .await
            .unwrap();

        let serials: Vec<i64> = svc
            .list_slots(&ctx, &op.id)
            .await
            .unwrap()
            .iter()
            .map(|s| s.serial_no)
            .collect();
        assert_eq!(serials, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn empty_catalog_is_valid() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        assert!(svc.list_slots(&ctx, &op.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_serial_rejected() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        seed_slots(&svc, &ctx, &op.id).await;
        let err = svc
            .create_slot(&ctx, &op.id, 2, "Dup", time(14, 0), time(14, 50))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn inverted_times_rejected() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        assert!(
            svc.create_slot(&ctx, &op.id, 1, "Bad", time(10, 0), time(9, 0))
                .await
                .is_err()
        );

        let slot = svc
            .create_slot(&ctx, &op.id, 1, "P1", time(9, 0), time(9, 50))
            .await
            .unwrap();
        let err = svc
            .update_slot(&ctx, &slot.id, SlotUpdateBuilder::new().end(time(8, 0)).build())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn renumber_onto_taken_serial_rejected() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        let slots = seed_slots(&svc, &ctx, &op.id).await;

        assert!(
            svc.update_slot(&ctx, &slots[0].id, SlotUpdateBuilder::new().serial_no(3).build())
                .await
                .is_err()
        );
        let moved = svc
            .update_slot(&ctx, &slots[0].id, SlotUpdateBuilder::new().serial_no(10).build())
            .await
            .unwrap();
        assert_eq!(moved.serial_no, 10);
        assert_eq!(
            svc.list_slots(&ctx, &op.id).await.unwrap().last().unwrap().id,
            slots[0].id
        );
    }
}
