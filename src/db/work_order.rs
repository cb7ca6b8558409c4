use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(
    pool: &PgPool,
    tenant_id: &str,
    id: i32,
) -> Result<Option<models::WorkOrder>, String> {
    tracing::info!("Fetch work order {}", id);
    sqlx::query_as::<_, models::WorkOrder>(
        r#"
        SELECT
            *
        FROM work_order
        WHERE tenant_id = $1
        AND id = $2
        LIMIT 1
        "#,
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch work order, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_tracking_code(
    pool: &PgPool,
    tracking_code: &str,
) -> Result<Option<models::WorkOrder>, String> {
    let query_span = tracing::info_span!("Fetch work order by tracking code.");
    sqlx::query_as::<_, models::WorkOrder>(
        r#"
        SELECT
            *
        FROM work_order
        WHERE tracking_code = $1
        LIMIT 1
        "#,
    )
    .bind(tracking_code)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch work order by tracking code, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_tenant(
    pool: &PgPool,
    tenant_id: &str,
) -> Result<Vec<models::WorkOrder>, String> {
    let query_span = tracing::info_span!("Fetch work orders by tenant id.");
    sqlx::query_as::<_, models::WorkOrder>(
        r#"
        SELECT
            *
        FROM work_order
        WHERE tenant_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch work orders, error: {:?}", err);
        "".to_string()
    })
}

pub async fn insert(
    pool: &PgPool,
    mut work_order: models::WorkOrder,
) -> Result<models::WorkOrder, String> {
    let query_span = tracing::info_span!("Saving new work order into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO work_order (tenant_id, client_id, tracking_code, device, problem, status,
            estimated_cost_cents, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&work_order.tenant_id)
    .bind(work_order.client_id)
    .bind(&work_order.tracking_code)
    .bind(&work_order.device)
    .bind(&work_order.problem)
    .bind(work_order.status)
    .bind(work_order.estimated_cost_cents)
    .bind(work_order.created_at)
    .bind(work_order.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        tracing::info!("New work order {} has been saved to database", id);
        work_order.id = id;
        work_order
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update_status(
    pool: &PgPool,
    work_order: models::WorkOrder,
) -> Result<models::WorkOrder, String> {
    let query_span = tracing::info_span!("Updating work order status");
    sqlx::query_as::<_, models::WorkOrder>(
        r#"
        UPDATE work_order
        SET
            status = $3,
            updated_at = NOW()
        WHERE tenant_id = $1
        AND id = $2
        RETURNING *
        "#,
    )
    .bind(&work_order.tenant_id)
    .bind(work_order.id)
    .bind(work_order.status)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}
