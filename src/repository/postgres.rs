use super::{RepositoryError, TenantRepository};
use crate::models::{Tenant, TenantPlan};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::Instrument;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn load(&self, tenant_id: &str) -> Result<Option<Tenant>, RepositoryError> {
        let query_span = tracing::info_span!("Fetching the tenant by ID", tenant_id);
        sqlx::query_as::<_, Tenant>(
            r#"
            SELECT
                id,
                name,
                plan,
                plan_expires_at,
                maps_url,
                latitude,
                longitude,
                created_at,
                updated_at
            FROM tenant
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch tenant, error: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn save(&self, tenant: &Tenant) -> Result<(), RepositoryError> {
        let query_span = tracing::info_span!("Saving the tenant into the database", tenant_id = %tenant.id);
        sqlx::query(
            r#"
            INSERT INTO tenant (id, name, plan, plan_expires_at, maps_url, latitude, longitude, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET
                name = EXCLUDED.name,
                plan = EXCLUDED.plan,
                plan_expires_at = EXCLUDED.plan_expires_at,
                maps_url = EXCLUDED.maps_url,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&tenant.id)
        .bind(&tenant.name)
        .bind(tenant.plan)
        .bind(tenant.plan_expires_at)
        .bind(&tenant.maps_url)
        .bind(tenant.latitude)
        .bind(tenant.longitude)
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .execute(&self.pool)
        .instrument(query_span)
        .await
        .map(|_| {
            tracing::info!("Tenant {} has been saved to the database", tenant.id);
        })
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn update_plan(
        &self,
        tenant_id: &str,
        plan: TenantPlan,
        plan_expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool, RepositoryError> {
        let query_span = tracing::info_span!("Updating tenant plan", tenant_id);
        sqlx::query(
            r#"
            UPDATE tenant
            SET
                plan = $2,
                plan_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(tenant_id)
        .bind(plan)
        .bind(plan_expires_at)
        .execute(&self.pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to update tenant plan: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn downgrade_expired_trial(
        &self,
        tenant_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let query_span = tracing::info_span!("Downgrading expired trial", tenant_id);
        sqlx::query(
            r#"
            UPDATE tenant
            SET
                plan = 'FREE',
                plan_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            AND plan = 'DEMO'
            AND plan_expires_at IS NOT NULL
            AND plan_expires_at < $2
            "#,
        )
        .bind(tenant_id)
        .bind(now)
        .execute(&self.pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to downgrade tenant: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn update_location(
        &self,
        tenant_id: &str,
        maps_url: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool, RepositoryError> {
        let query_span = tracing::info_span!("Updating tenant location", tenant_id);
        sqlx::query(
            r#"
            UPDATE tenant
            SET
                maps_url = $2,
                latitude = $3,
                longitude = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(tenant_id)
        .bind(maps_url)
        .bind(latitude)
        .bind(longitude)
        .execute(&self.pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to update tenant location: {:?}", err);
            RepositoryError::from(err)
        })
    }
}
