//! User repository.

use chrono::Utc;

use af_core::entities::User;
use af_core::enums::{AuditAction, EntityType, Role};
use af_core::identity::SessionContext;
use af_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{
    SetClause, get_bool, get_opt_string, like_pattern, parse_datetime, parse_enum, to_detail,
};
use crate::service::AcademyService;
use crate::updates::user::UserUpdate;

const SELECT_COLS: &str =
    "id, institute_id, name, email, role, program_id, is_representative, created_at";

/// Input for [`AcademyService::create_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub program_id: Option<String>,
    pub is_representative: bool,
}

#[derive(Debug, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub program_id: Option<String>,
    pub search: Option<String>,
}

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        institute_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        role: parse_enum(&row.get::<String>(4)?)?,
        program_id: get_opt_string(row, 5)?,
        is_representative: get_bool(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Students belong to a program; only students can be class representatives.
fn check_membership(
    role: Role,
    program_id: Option<&str>,
    is_representative: bool,
) -> Result<(), DatabaseError> {
    if role == Role::Student && program_id.is_none() {
        return Err(DatabaseError::Validation(
            "students must be enrolled in a program".into(),
        ));
    }
    if is_representative && role != Role::Student {
        return Err(DatabaseError::Validation(format!(
            "only students can be representatives, not {role}"
        )));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), DatabaseError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(DatabaseError::Validation(format!("invalid email: {email}")))
    }
}

impl AcademyService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a malformed or duplicate
    /// email, an unknown program, or an inconsistent student membership.
    pub async fn create_user(
        &self,
        ctx: &SessionContext,
        input: &NewUser,
    ) -> Result<User, DatabaseError> {
        let email = input.email.trim().to_lowercase();
        check_email(&email)?;
        check_membership(input.role, input.program_id.as_deref(), input.is_representative)?;
        if let Some(ref program_id) = input.program_id {
            self.get_program(ctx, program_id)
                .await
                .map_err(|e| e.missing("program", program_id))?;
        }
        self.ensure_email_free(ctx, &email, None).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;
        self.db()
            .execute_with(
                "INSERT INTO users (id, institute_id, name, email, role, program_id, is_representative, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                || {
                    libsql::params![
                        id.as_str(),
                        ctx.institute_id.as_str(),
                        input.name.as_str(),
                        email.as_str(),
                        input.role.as_str(),
                        input.program_id.as_deref(),
                        i64::from(input.is_representative),
                        now.to_rfc3339()
                    ]
                },
            )
            .await?;
        self.record(ctx, EntityType::User, &id, AuditAction::Created, None)
            .await?;

        Ok(User {
            id,
            institute_id: ctx.institute_id.clone(),
            name: input.name.clone(),
            email,
            role: input.role,
            program_id: input.program_id.clone(),
            is_representative: input.is_representative,
            created_at: now,
        })
    }

    async fn ensure_email_free(
        &self,
        ctx: &SessionContext,
        email: &str,
        except_id: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                "SELECT id FROM users WHERE institute_id = ?1 AND email = ?2",
                || [ctx.institute_id.as_str(), email],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let id: String = row.get(0)?;
            if except_id != Some(id.as_str()) {
                return Err(DatabaseError::Validation(format!(
                    "email {email} is already registered"
                )));
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user does not exist.
    pub async fn get_user(&self, ctx: &SessionContext, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1 AND institute_id = ?2"),
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_user(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_users(
        &self,
        ctx: &SessionContext,
        filter: &UserFilter,
        limit: u32,
    ) -> Result<Vec<User>, DatabaseError> {
        let mut params: Vec<libsql::Value> = vec![ctx.institute_id.as_str().into()];
        let mut conditions = vec!["institute_id = ?1".to_string()];
        if let Some(role) = filter.role {
            params.push(role.as_str().into());
            conditions.push(format!("role = ?{}", params.len()));
        }
        if let Some(ref program_id) = filter.program_id {
            params.push(program_id.as_str().into());
            conditions.push(format!("program_id = ?{}", params.len()));
        }
        if let Some(ref q) = filter.search {
            params.push(like_pattern(q).into());
            let idx = params.len();
            conditions.push(format!("(name LIKE ?{idx} OR email LIKE ?{idx})"));
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM users WHERE {} ORDER BY name LIMIT {limit}",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Apply an update; membership rules are checked against the merged
    /// result.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` under the same rules as
    /// [`AcademyService::create_user`].
    pub async fn update_user(
        &self,
        ctx: &SessionContext,
        id: &str,
        mut update: UserUpdate,
    ) -> Result<User, DatabaseError> {
        let current = self.get_user(ctx, id).await?;
        let role = update.role.unwrap_or(current.role);
        let program_id = match update.program_id {
            Some(ref next) => next.clone(),
            None => current.program_id.clone(),
        };
        let is_representative = update
            .is_representative
            .unwrap_or(current.is_representative);
        check_membership(role, program_id.as_deref(), is_representative)?;

        let mut set = SetClause::new();
        if let Some(ref name) = update.name {
            set.push("name", name.as_str());
        }
        if let Some(ref mut email) = update.email {
            *email = email.trim().to_lowercase();
            check_email(email)?;
            self.ensure_email_free(ctx, email, Some(id)).await?;
            set.push("email", email.as_str());
        }
        if let Some(role) = update.role {
            set.push("role", role.as_str());
        }
        if let Some(ref next) = update.program_id {
            if let Some(program_id) = next {
                self.get_program(ctx, program_id)
                    .await
                    .map_err(|e| e.missing("program", program_id))?;
            }
            set.push_opt("program_id", next.clone());
        }
        if let Some(flag) = update.is_representative {
            set.push("is_representative", i64::from(flag));
        }
        if set.is_empty() {
            return Ok(current);
        }

        let (sql, params) = set.into_sql("users", id, &ctx.institute_id);
        self.db()
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        self.record(
            ctx,
            EntityType::User,
            id,
            AuditAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;
        self.get_user(ctx, id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the user does not exist.
    pub async fn delete_user(&self, ctx: &SessionContext, id: &str) -> Result<(), DatabaseError> {
        self.get_user(ctx, id).await?;
        self.db()
            .execute_with(
                "DELETE FROM users WHERE id = ?1 AND institute_id = ?2",
                || [id, ctx.institute_id.as_str()],
            )
            .await?;
        self.record(ctx, EntityType::User, id, AuditAction::Deleted, None)
            .await
    }
}
