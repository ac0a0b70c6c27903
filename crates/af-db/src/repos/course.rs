//! Course repository.

use chrono::Utc;

use af_core::entities::Course;
use af_core::enums::{AuditAction, EntityType};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_COURSE;

use crate::error::DatabaseError;
use crate::helpers::{SetClause, like_pattern, parse_datetime, to_detail};
use crate::service::AcademyService;
use crate::updates::course::CourseUpdate;

const SELECT_COLS: &str = "id, operation_id, name, created_at";

fn row_to_course(row: &libsql::Row) -> Result<Course, DatabaseError> {
    Ok(Course {
        id: row.get(0)?,
        operation_id: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl AcademyService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if the operation is unknown.
    pub async fn create_course(
        &self,
        ctx: &SessionContext,
        operation_id: &str,
        name: &str,
    ) -> Result<Course, DatabaseError> {
        self.get_operation(ctx, operation_id)
            .await
            .map_err(|e| e.missing("operation", operation_id))?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_COURSE).await?;
        self.db()
            .execute_with(
                "INSERT INTO courses (id, institute_id, operation_id, name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        operation_id,
                        name,
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::Course, &id, AuditAction::Created, None)
            .await?;

        Ok(Course {
            id,
            operation_id: operation_id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the course does not exist.
    pub async fn get_course(&self, ctx: &SessionContext, id: &str) -> Result<Course, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM courses WHERE id = ?1 AND institute_id = ?2"),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_course(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_courses(
        &self,
        ctx: &SessionContext,
        operation_id: Option<&str>,
        search: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Course>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(op) = operation_id {
            params.push(op.into());
            conditions.push(format!("operation_id = ?{}", params.len()));
        }
        if let Some(q) = search {
            params.push(like_pattern(q).into());
            conditions.push(format!("name LIKE ?{}", params.len()));
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM courses WHERE {} ORDER BY name LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next().await? {
            courses.push(row_to_course(&row)?);
        }
        Ok(courses)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the course does not exist.
    pub async fn update_course(
        &self,
        ctx: &SessionContext,
        id: &str,
        update: CourseUpdate,
    ) -> Result<Course, DatabaseError> {
        let current = self.get_course(ctx, id).await?;
        let mut set = SetClause::new();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if set.is_empty() {
            return Ok(current);
        }
        let (sql, params) = set.into_sql("courses", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::Course,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_course(ctx, id).await
    }

    /// Events of the course keep their slot but lose the course reference.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the course does not exist.
    pub async fn delete_course(&self, ctx: &SessionContext, id: &str) -> Result<(), DatabaseError> {
        self.get_course(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM courses WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::Course, id, AuditAction::Deleted, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_operation, test_service_with_institute};
    use crate::updates::course::CourseUpdateBuilder;

    #[tokio::test]
    async fn list_by_operation_and_search() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        svc.create_course(&ctx, &op.id, "Mechanics").await.unwrap();
        svc.create_course(&ctx, &op.id, "Optics").await.unwrap();

        let all = svc.list_courses(&ctx, Some(&op.id), None, 10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Mechanics");

        let hits = svc.list_courses(&ctx, None, Some("opt"), 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(svc.list_courses(&ctx, Some("opr-x"), None, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rename_and_delete() {
        let (svc, ctx) = test_service_with_institute().await;
        let op = seed_operation(&svc, &ctx).await;
        let course = svc.create_course(&ctx, &op.id, "Waves").await.unwrap();
        let renamed = svc
            .update_course(&ctx, &course.id, CourseUpdateBuilder::new().name("Waves I").build())
            .await
            .unwrap();
        assert_eq!(renamed.name, "Waves I");
        svc.delete_course(&ctx, &course.id).await.unwrap();
        assert!(svc.get_course(&ctx, &course.id).await.is_err());
    }
}
