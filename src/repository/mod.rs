//! Access to tenant records, the source of truth for plan state.
//!
//! Only `save` writes a whole row and it is reserved for creating a tenant.
//! Every later change goes through a targeted update so a slow request never
//! writes back columns that another writer changed in the meantime.

mod memory;
mod postgres;

pub use memory::InMemoryTenantRepository;
pub use postgres::PgTenantRepository;

use crate::models::{Tenant, TenantPlan};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn load(&self, tenant_id: &str) -> Result<Option<Tenant>, RepositoryError>;

    /// Insert or fully overwrite the tenant row.
    async fn save(&self, tenant: &Tenant) -> Result<(), RepositoryError>;

    /// Plan change issued by billing. `false` when the tenant does not exist.
    async fn update_plan(
        &self,
        tenant_id: &str,
        plan: TenantPlan,
        plan_expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool, RepositoryError>;

    /// Moves a `DEMO` tenant whose trial ended before `now` to `FREE`, leaving
    /// every other column alone. `false` when the row no longer qualifies.
    async fn downgrade_expired_trial(
        &self,
        tenant_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    async fn update_location(
        &self,
        tenant_id: &str,
        maps_url: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool, RepositoryError>;
}
