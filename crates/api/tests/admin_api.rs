//! HTTP-level integration tests for the admin CRUD surface: portal
//! metadata, categories, assets, and employees.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

async fn seed_category(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/admin/categories",
        serde_json::json!({"name": name, "description": "Seeded for tests"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn seed_asset(pool: &PgPool, category_id: i64, serial: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/admin/assets",
        serde_json::json!({
            "serial_number": serial,
            "model": "Dell Latitude 5420",
            "category_id": category_id,
            "purchase_date": "2024-01-15",
            "warranty_expiry": "2099-01-15"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn seed_employee(pool: &PgPool, code: &str, department: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/admin/employees",
        serde_json::json!({
            "employee_id": code,
            "full_name": "John Doe",
            "email": format!("{}@example.com", code.to_lowercase()),
            "department": department
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Portal metadata
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portal_meta_reports_site_branding(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/admin").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["header"], "IT Asset Management Admin");
    assert_eq!(json["data"]["title"], "ITAM Admin Portal");
    assert_eq!(json["data"]["index_title"], "Welcome to the ITAM Portal.");

    let entities = json["data"]["entities"].as_array().unwrap();
    assert_eq!(entities.len(), 4);
    assert_eq!(entities[0], "categories");
    assert_eq!(entities[3], "assignments");
}

// ---------------------------------------------------------------------------
// Category CRUD and deletion protection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_category_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/categories",
        serde_json::json!({"name": "Laptop", "description": "Portable computers"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Laptop");
    assert_eq!(json["data"]["description"], "Portable computers");
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_category_name_returns_409(pool: PgPool) {
    seed_category(&pool, "Laptop").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/categories",
        serde_json::json!({"name": "Laptop"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("uq_categories_name"),
        "conflict should name the violated constraint: {json}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/admin/categories/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Error responses carry the {"error", "code"} shape.
    let json = body_json(response).await;
    assert_matches!(json["error"], serde_json::Value::String(_));
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_category_leaves_omitted_fields(pool: PgPool) {
    let id = seed_category(&pool, "Laptop").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/admin/categories/{id}"),
        serde_json::json!({"description": "Movable machines"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Laptop");
    assert_eq!(json["data"]["description"], "Movable machines");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unused_category_returns_204(pool: PgPool) {
    let id = seed_category(&pool, "Laptop").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/admin/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/admin/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_referenced_category_returns_409(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;
    let asset_id = seed_asset(&pool, category_id, "SN-1001").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/admin/categories/{category_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(
        json["error"].as_str().unwrap().contains("still reference it"),
        "expected deletion protection message, got: {json}"
    );

    // Once the referencing asset is gone the category can be deleted.
    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/admin/assets/{asset_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/admin/categories/{category_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_categories_filters_by_q(pool: PgPool) {
    seed_category(&pool, "Laptop").await;
    seed_category(&pool, "Monitor").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/admin/categories?q=lap").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Laptop");
}

// ---------------------------------------------------------------------------
// Asset CRUD, detail view, and list filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_asset_defaults_to_available(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/assets",
        serde_json::json!({
            "serial_number": "SN-1001",
            "model": "Dell Latitude 5420",
            "category_id": category_id,
            "purchase_date": "2024-01-15",
            "warranty_expiry": "2027-01-15"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "AVAILABLE");
    assert_eq!(json["data"]["qr_code"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_asset_with_unknown_category_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/assets",
        serde_json::json!({
            "serial_number": "SN-1001",
            "model": "Dell Latitude 5420",
            "category_id": 999999,
            "purchase_date": "2024-01-15",
            "warranty_expiry": "2027-01-15"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("fk_assets_category"),
        "expected foreign key violation, got: {json}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_serial_number_returns_409(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;
    seed_asset(&pool, category_id, "SN-1001").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/assets",
        serde_json::json!({
            "serial_number": "SN-1001",
            "model": "Dell Latitude 7420",
            "category_id": category_id,
            "purchase_date": "2024-03-01",
            "warranty_expiry": "2027-03-01"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("uq_assets_serial_number"),
        "conflict should name the violated constraint: {json}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_detail_includes_derived_fields(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;
    let asset_id = seed_asset(&pool, category_id, "SN-1001").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/admin/assets/{asset_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["serial_number"], "SN-1001");
    assert_eq!(json["data"]["category_name"], "Laptop");
    assert_eq!(json["data"]["warranty"], "Active");
    // No base domain configured in tests, so the payload is the relative path.
    assert_eq!(
        json["data"]["qr_payload"],
        format!("/admin/assets/{asset_id}")
    );
    assert_eq!(json["data"]["assignments"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_warranty_is_flagged(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/admin/assets",
        serde_json::json!({
            "serial_number": "SN-OLD",
            "model": "ThinkPad T450",
            "category_id": category_id,
            "purchase_date": "2015-01-15",
            "warranty_expiry": "2018-01-15"
        }),
    )
    .await;
    let asset_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let detail = body_json(get(app, &format!("/admin/assets/{asset_id}")).await).await;
    assert_eq!(detail["data"]["warranty"], "Expired");

    let app = common::build_test_app(pool);
    let list = body_json(get(app, "/admin/assets").await).await;
    let row = &list["data"].as_array().unwrap()[0];
    assert_eq!(row["warranty_expired"], true);
    assert_eq!(row["has_qr_code"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_asset_status_manually(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;
    let asset_id = seed_asset(&pool, category_id, "SN-1001").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/admin/assets/{asset_id}"),
        serde_json::json!({"status": "BROKEN"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "BROKEN");
    assert_eq!(json["data"]["serial_number"], "SN-1001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_list_filters(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;
    let other_category = seed_category(&pool, "Monitor").await;
    seed_asset(&pool, category_id, "SN-1001").await;
    seed_asset(&pool, other_category, "SN-2001").await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/admin/assets?q=SN-1001").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get(app, &format!("/admin/assets?category_id={category_id}")).await,
    )
    .await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category_name"], "Laptop");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/admin/assets?status=AVAILABLE").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_asset_returns_204(pool: PgPool) {
    let category_id = seed_category(&pool, "Laptop").await;
    let asset_id = seed_asset(&pool, category_id, "SN-1001").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/admin/assets/{asset_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/admin/assets/{asset_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Employee CRUD and validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_employee_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/employees",
        serde_json::json!({
            "employee_id": "EMP-001",
            "full_name": "John Doe",
            "email": "john.doe@example.com",
            "department": "Engineering"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["employee_id"], "EMP-001");
    assert_eq!(json["data"]["full_name"], "John Doe");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_employee_email_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/employees",
        serde_json::json!({
            "employee_id": "EMP-001",
            "full_name": "John Doe",
            "email": "not-an-email",
            "department": "Engineering"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_employee_code_returns_409(pool: PgPool) {
    seed_employee(&pool, "EMP-001", "Engineering").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/admin/employees",
        serde_json::json!({
            "employee_id": "EMP-001",
            "full_name": "Jane Smith",
            "email": "jane.smith@example.com",
            "department": "Finance"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("uq_employees_employee_id"),
        "conflict should name the violated constraint: {json}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_departments_lists_distinct_sorted(pool: PgPool) {
    seed_employee(&pool, "EMP-001", "Engineering").await;
    seed_employee(&pool, "EMP-002", "Finance").await;
    seed_employee(&pool, "EMP-003", "Engineering").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/admin/employees/departments").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let departments = json["data"].as_array().unwrap();
    assert_eq!(departments.len(), 2);
    assert_eq!(departments[0], "Engineering");
    assert_eq!(departments[1], "Finance");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_employee_validates_email(pool: PgPool) {
    let id = seed_employee(&pool, "EMP-001", "Engineering").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/admin/employees/{id}"),
        serde_json::json!({"email": "broken@"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Partial update without the email leaves it untouched.
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/admin/employees/{id}"),
        serde_json::json!({"department": "Finance"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["department"], "Finance");
    assert_eq!(json["data"]["email"], "emp-001@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_employee_returns_204(pool: PgPool) {
    let id = seed_employee(&pool, "EMP-001", "Engineering").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/admin/employees/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/admin/employees/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
