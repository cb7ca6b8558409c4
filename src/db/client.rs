use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, tenant_id: &str, id: i32) -> Result<Option<models::Client>, String> {
    let query_span = tracing::info_span!("Fetching the client by ID");
    sqlx::query_as::<_, models::Client>(
        r#"
        SELECT
            *
        FROM client
        WHERE tenant_id = $1
        AND id = $2
        LIMIT 1
        "#,
    )
    .bind(tenant_id)
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute fetch query: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_tenant(pool: &PgPool, tenant_id: &str) -> Result<Vec<models::Client>, String> {
    let query_span = tracing::info_span!("Fetch clients by tenant id.");
    sqlx::query_as::<_, models::Client>(
        r#"
        SELECT
            *
        FROM client
        WHERE tenant_id = $1
        ORDER BY name
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch clients, error: {:?}", err);
        "".to_string()
    })
}

pub async fn insert(pool: &PgPool, mut client: models::Client) -> Result<models::Client, String> {
    let query_span = tracing::info_span!("Saving new client into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO client (tenant_id, name, phone, email, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&client.tenant_id)
    .bind(&client.name)
    .bind(&client.phone)
    .bind(&client.email)
    .bind(&client.notes)
    .bind(client.created_at)
    .bind(client.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        tracing::info!("New client {} has been saved to database", id);
        client.id = id;
        client
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, client: models::Client) -> Result<models::Client, String> {
    let query_span = tracing::info_span!("Updating client into the database");
    sqlx::query_as::<_, models::Client>(
        r#"
        UPDATE client
        SET
            name = $3,
            phone = $4,
            email = $5,
            notes = $6,
            updated_at = NOW()
        WHERE tenant_id = $1
        AND id = $2
        RETURNING *
        "#,
    )
    .bind(&client.tenant_id)
    .bind(client.id)
    .bind(&client.name)
    .bind(&client.phone)
    .bind(&client.email)
    .bind(&client.notes)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|client| {
        tracing::info!("Client {} has been saved to the database", client.id);
        client
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

/// Returns false when nothing matched.
pub async fn delete(pool: &PgPool, tenant_id: &str, id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Deleting client");
    sqlx::query("DELETE FROM client WHERE tenant_id = $1 AND id = $2")
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete client: {:?}", err);
            "Failed to delete".to_string()
        })
}
