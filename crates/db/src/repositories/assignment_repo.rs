//! Repository for the `assignments` table and the deploy/return lifecycle.
//!
//! Deploy and return are single transactions: the asset row is locked with
//! `SELECT ... FOR UPDATE` so concurrent deployments of the same asset
//! serialize, the pure lifecycle checks from `assetdesk_core` run against
//! the locked state, and the assignment insert/update and the cached asset
//! status change commit together or not at all.

use chrono::Utc;
use sqlx::PgPool;

use assetdesk_core::lifecycle::{self, ActiveHolder, AssetStatus};
use assetdesk_core::types::DbId;

use crate::models::assignment::{
    Assignment, AssignmentRow, AssignmentSearchParams, CreateAssignment, DeployOutcome,
    ReturnAssignment, ReturnOutcome, UpdateAssignment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, asset_id, employee_id, assigned_date, return_expected_date, \
    actual_return_date, notes, created_at, updated_at";

/// Joined select list for [`AssignmentRow`] queries (aliases `a`, `ast`, `e`).
const ROW_COLUMNS: &str = "\
    a.id, a.asset_id, a.employee_id, \
    ast.serial_number AS asset_serial_number, \
    ast.model AS asset_model, \
    e.employee_id AS employee_code, \
    e.full_name AS employee_name, \
    a.assigned_date, a.return_expected_date, a.actual_return_date, \
    (a.actual_return_date IS NULL) AS is_active, \
    a.notes";

/// Shared FROM/JOIN snippet for [`AssignmentRow`] queries.
const ROW_FROM: &str = "\
    FROM assignments a \
    JOIN assets ast ON ast.id = a.asset_id \
    JOIN employees e ON e.id = a.employee_id";

/// Default page size for assignment listing.
const DEFAULT_LIMIT: i64 = 25;

/// Maximum page size for assignment listing.
const MAX_LIMIT: i64 = 100;

/// Asset fields read under the row lock inside the deploy transaction.
#[derive(sqlx::FromRow)]
struct LockedAsset {
    serial_number: String,
    model: String,
    #[sqlx(try_from = "String")]
    status: AssetStatus,
}

/// Provides lifecycle operations and CRUD for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    // -----------------------------------------------------------------------
    // Lifecycle operations
    // -----------------------------------------------------------------------

    /// Deploy an asset to an employee.
    ///
    /// Runs as one transaction: lock the asset row, check the
    /// single-active-assignment invariant against the locked state, insert
    /// the assignment and flip the cached asset status to DEPLOYED.
    /// `assigned_date` defaults to today.
    pub async fn deploy(
        pool: &PgPool,
        input: &CreateAssignment,
    ) -> Result<DeployOutcome, sqlx::Error> {
        let assigned_date = input
            .assigned_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = pool.begin().await?;

        // Serialize concurrent deployments of the same asset on its row lock.
        let asset: Option<LockedAsset> = sqlx::query_as(
            "SELECT serial_number, model, status FROM assets WHERE id = $1 FOR UPDATE",
        )
        .bind(input.asset_id)
        .fetch_optional(&mut *tx)
        .await?;

        let asset = match asset {
            Some(asset) => asset,
            None => return Ok(DeployOutcome::AssetNotFound),
        };

        // The most recent open assignment identifies the current holder.
        let active: Option<(DbId, String, String)> = sqlx::query_as(
            "SELECT a.id, e.full_name, e.employee_id \
             FROM assignments a \
             JOIN employees e ON e.id = a.employee_id \
             WHERE a.asset_id = $1 AND a.actual_return_date IS NULL \
             ORDER BY a.assigned_date DESC, a.id DESC \
             LIMIT 1",
        )
        .bind(input.asset_id)
        .fetch_optional(&mut *tx)
        .await?;

        let holder = active.map(|(assignment_id, full_name, employee_code)| ActiveHolder {
            assignment_id,
            employee_label: lifecycle::employee_label(&full_name, &employee_code),
        });

        let label = lifecycle::asset_label(&asset.model, &asset.serial_number);
        if let Err(conflict) = lifecycle::check_deployment(&label, asset.status, holder.as_ref()) {
            tracing::debug!(asset_id = input.asset_id, holder = %conflict.holder, "Deployment refused");
            return Ok(DeployOutcome::Conflict(conflict));
        }

        let employee_count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM employees WHERE id = $1")
                .bind(input.employee_id)
                .fetch_one(&mut *tx)
                .await?;
        if employee_count.0 == 0 {
            return Ok(DeployOutcome::EmployeeNotFound);
        }

        let query = format!(
            "INSERT INTO assignments (\
                asset_id, employee_id, assigned_date, return_expected_date, notes\
             ) VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, Assignment>(&query)
            .bind(input.asset_id)
            .bind(input.employee_id)
            .bind(assigned_date)
            .bind(input.return_expected_date)
            .bind(input.notes.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE assets SET status = 'DEPLOYED' WHERE id = $1")
            .bind(input.asset_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            assignment_id = assignment.id,
            asset_id = assignment.asset_id,
            employee_id = assignment.employee_id,
            "Asset deployed"
        );
        Ok(DeployOutcome::Deployed(assignment))
    }

    /// Record the return of a deployed asset.
    ///
    /// Runs as one transaction: lock the assignment row, refuse if it is
    /// already closed (returns are terminal), set the actual return date and
    /// flip the cached asset status back to AVAILABLE. The return date
    /// defaults to today.
    pub async fn record_return(
        pool: &PgPool,
        id: DbId,
        input: &ReturnAssignment,
    ) -> Result<ReturnOutcome, sqlx::Error> {
        let return_date = input
            .actual_return_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = pool.begin().await?;

        // Serialize concurrent returns of the same assignment on its row lock.
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let current = match current {
            Some(assignment) => assignment,
            None => return Ok(ReturnOutcome::NotFound),
        };
        if let Some(actual_return_date) = current.actual_return_date {
            return Ok(ReturnOutcome::AlreadyReturned { actual_return_date });
        }

        let query = format!(
            "UPDATE assignments SET actual_return_date = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(return_date)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE assets SET status = 'AVAILABLE' WHERE id = $1")
            .bind(current.asset_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            assignment_id = updated.id,
            asset_id = updated.asset_id,
            "Asset returned"
        );
        Ok(ReturnOutcome::Returned(updated))
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Find an assignment by ID, with joined asset/employee display fields.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!("SELECT {ROW_COLUMNS} {ROW_FROM} WHERE a.id = $1");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search assignments with optional filters and pagination, newest
    /// assignments first.
    pub async fn search(
        pool: &PgPool,
        params: &AssignmentSearchParams,
    ) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.q.is_some() {
            conditions.push(format!(
                "(ast.serial_number ILIKE ${bind_idx} OR ast.model ILIKE ${bind_idx} \
                  OR e.employee_id ILIKE ${bind_idx} OR e.full_name ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if let Some(active) = params.active {
            conditions.push(if active {
                "a.actual_return_date IS NULL".to_string()
            } else {
                "a.actual_return_date IS NOT NULL".to_string()
            });
        }
        if params.assigned_from.is_some() {
            conditions.push(format!("a.assigned_date >= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.assigned_to.is_some() {
            conditions.push(format!("a.assigned_date <= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.expected_from.is_some() {
            conditions.push(format!("a.return_expected_date >= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.expected_to.is_some() {
            conditions.push(format!("a.return_expected_date <= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.returned_from.is_some() {
            conditions.push(format!("a.actual_return_date >= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.returned_to.is_some() {
            conditions.push(format!("a.actual_return_date <= ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {ROW_COLUMNS} {ROW_FROM} \
             {where_clause} \
             ORDER BY a.assigned_date DESC, a.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, AssignmentRow>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref term) = params.q {
            q = q.bind(format!("%{term}%"));
        }
        if let Some(from) = params.assigned_from {
            q = q.bind(from);
        }
        if let Some(to) = params.assigned_to {
            q = q.bind(to);
        }
        if let Some(from) = params.expected_from {
            q = q.bind(from);
        }
        if let Some(to) = params.expected_to {
            q = q.bind(to);
        }
        if let Some(from) = params.returned_from {
            q = q.bind(from);
        }
        if let Some(to) = params.returned_to {
            q = q.bind(to);
        }

        q = q.bind(limit).bind(offset);
        q.fetch_all(pool).await
    }

    /// List the full assignment history of an asset, newest first.
    pub async fn list_for_asset(
        pool: &PgPool,
        asset_id: DbId,
    ) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ROW_COLUMNS} {ROW_FROM} \
             WHERE a.asset_id = $1 \
             ORDER BY a.assigned_date DESC, a.id DESC"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }

    /// Update an assignment's non-lifecycle fields. Only non-`None` fields
    /// in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssignment,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments SET \
                return_expected_date = COALESCE($2, return_expected_date), \
                notes = COALESCE($3, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(input.return_expected_date)
            .bind(input.notes.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete an assignment by ID. Returns `true` if a row was deleted.
    ///
    /// Deleting an open assignment does not touch the cached asset status;
    /// the next deploy sees the assignment set as the source of truth.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
