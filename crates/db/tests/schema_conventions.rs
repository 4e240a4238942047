//! Schema convention checks for the asset management tables.

use sqlx::PgPool;

const TABLES: [&str; 4] = ["categories", "assets", "employees", "assignments"];

/// The four entity tables must exist after migrations.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expected_tables_present(pool: PgPool) {
    for table in TABLES {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists.0, "Table {table} is missing");
    }
}

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), TABLES.len());
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every table must carry timestamptz created_at/updated_at.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    for table in TABLES {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// No character varying columns should exist; TEXT is preferred.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Every foreign key column must have a corresponding index.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT
             tc.table_name,
             kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_columns.is_empty(), "Expected FK columns in the schema");
    for (table, column) in &fk_columns {
        let has_index: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = '{table}'
                  AND indexdef LIKE '%({column})%'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index.0, "FK column {table}.{column} has no index");
    }
}

/// Deletion rules are load-bearing here: categories are protected while
/// referenced, assignment history follows its asset/employee.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fk_delete_rules(pool: PgPool) {
    let fk_rules: Vec<(String, String)> = sqlx::query_as(
        "SELECT rc.constraint_name, rc.delete_rule
         FROM information_schema.referential_constraints rc
         WHERE rc.constraint_schema = 'public'
         ORDER BY rc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let expected = [
        ("fk_assets_category", "RESTRICT"),
        ("fk_assignments_asset", "CASCADE"),
        ("fk_assignments_employee", "CASCADE"),
    ];
    assert_eq!(fk_rules.len(), expected.len());
    for (constraint, rule) in expected {
        let found = fk_rules
            .iter()
            .find(|(name, _)| name == constraint)
            .unwrap_or_else(|| panic!("FK constraint {constraint} is missing"));
        assert_eq!(
            found.1, rule,
            "FK {constraint} should be ON DELETE {rule}, got {}",
            found.1
        );
    }
}

/// The partial unique index enforcing one open assignment per asset must
/// be present.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_assignment_unique_index_present(pool: PgPool) {
    let indexdef: Option<(String,)> = sqlx::query_as(
        "SELECT indexdef FROM pg_indexes
         WHERE schemaname = 'public'
           AND tablename = 'assignments'
           AND indexname = 'uq_assignments_active_asset'",
    )
    .fetch_optional(&pool)
    .await
    .unwrap();

    let (indexdef,) = indexdef.expect("uq_assignments_active_asset is missing");
    assert!(indexdef.contains("UNIQUE"), "index should be unique: {indexdef}");
    assert!(
        indexdef.contains("actual_return_date IS NULL"),
        "index should be partial over open assignments: {indexdef}"
    );
}

/// Unknown status values are refused by the CHECK constraint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_check_constraint_rejects_unknown(pool: PgPool) {
    sqlx::query("INSERT INTO categories (name) VALUES ('Laptop')")
        .execute(&pool)
        .await
        .unwrap();

    let result = sqlx::query(
        "INSERT INTO assets (serial_number, model, category_id, purchase_date, warranty_expiry, status)
         SELECT 'SN-CK-1', 'ThinkPad', id, '2023-01-01', '2026-01-01', 'LOST'
         FROM categories WHERE name = 'Laptop'",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err(), "Unknown status should violate the CHECK");
}

/// updated_at must advance on UPDATE via the touch trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_touch_trigger_advances_updated_at(pool: PgPool) {
    sqlx::query("INSERT INTO categories (name) VALUES ('Dock')")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("UPDATE categories SET description = 'USB-C docks' WHERE name = 'Dock'")
        .execute(&pool)
        .await
        .unwrap();

    let (advanced,): (bool,) = sqlx::query_as(
        "SELECT updated_at > created_at FROM categories WHERE name = 'Dock'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(advanced, "updated_at should advance past created_at");
}
