//! Repository for the `employees` table.

use sqlx::PgPool;

use assetdesk_core::types::DbId;

use crate::models::employee::{CreateEmployee, Employee, EmployeeSearchParams, UpdateEmployee};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, employee_id, full_name, email, department, created_at, updated_at";

/// Default page size for employee listing.
const DEFAULT_LIMIT: i64 = 25;

/// Maximum page size for employee listing.
const MAX_LIMIT: i64 = 100;

/// Provides CRUD operations for the employee directory.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (employee_id, full_name, email, department) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.employee_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.department)
            .fetch_one(pool)
            .await
    }

    /// Find an employee by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an employee by their unique badge/HR code.
    pub async fn find_by_employee_id(
        pool: &PgPool,
        employee_id: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE employee_id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }

    /// Search employees with optional filters and pagination, ordered by
    /// full name.
    pub async fn search(
        pool: &PgPool,
        params: &EmployeeSearchParams,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.q.is_some() {
            conditions.push(format!(
                "(employee_id ILIKE ${bind_idx} OR full_name ILIKE ${bind_idx} \
                  OR email ILIKE ${bind_idx} OR department ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if params.department.is_some() {
            conditions.push(format!("department = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM employees {where_clause} \
             ORDER BY full_name LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Employee>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref term) = params.q {
            q = q.bind(format!("%{term}%"));
        }
        if let Some(ref department) = params.department {
            q = q.bind(department);
        }

        q = q.bind(limit).bind(offset);
        q.fetch_all(pool).await
    }

    /// List the distinct departments present in the directory.
    pub async fn list_departments(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT department FROM employees ORDER BY department")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(d,)| d).collect())
    }

    /// Update an employee. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET \
                employee_id = COALESCE($2, employee_id), \
                full_name = COALESCE($3, full_name), \
                email = COALESCE($4, email), \
                department = COALESCE($5, department) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(input.employee_id.as_deref())
            .bind(input.full_name.as_deref())
            .bind(input.email.as_deref())
            .bind(input.department.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete an employee by ID. Returns `true` if a row was deleted.
    ///
    /// Assignment history rows cascade away with the employee.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
