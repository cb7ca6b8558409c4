use super::{RepositoryError, TenantRepository};
use crate::models::{Tenant, TenantPlan};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockWriteGuard};

/// Process-local tenant store. Counts write calls so callers can assert on them.
#[derive(Default)]
pub struct InMemoryTenantRepository {
    tenants: RwLock<HashMap<String, Tenant>>,
    writes: AtomicUsize,
}

impl InMemoryTenantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenants(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        let tenants = tenants
            .into_iter()
            .map(|tenant| (tenant.id.clone(), tenant))
            .collect();

        Self {
            tenants: RwLock::new(tenants),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Tenant>>, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.tenants
            .write()
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))
    }
}

#[async_trait]
impl TenantRepository for InMemoryTenantRepository {
    async fn load(&self, tenant_id: &str) -> Result<Option<Tenant>, RepositoryError> {
        let tenants = self
            .tenants
            .read()
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;

        Ok(tenants.get(tenant_id).cloned())
    }

    async fn save(&self, tenant: &Tenant) -> Result<(), RepositoryError> {
        self.write()?.insert(tenant.id.clone(), tenant.clone());
        Ok(())
    }

    async fn update_plan(
        &self,
        tenant_id: &str,
        plan: TenantPlan,
        plan_expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool, RepositoryError> {
        let mut tenants = self.write()?;
        Ok(tenants
            .get_mut(tenant_id)
            .map(|tenant| {
                tenant.plan = plan;
                tenant.plan_expires_at = plan_expires_at;
                tenant.updated_at = Utc::now();
            })
            .is_some())
    }

    async fn downgrade_expired_trial(
        &self,
        tenant_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut tenants = self.write()?;
        match tenants.get_mut(tenant_id) {
            Some(tenant) if tenant.is_trial_expired(now) => {
                tenant.downgrade_to_free();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_location(
        &self,
        tenant_id: &str,
        maps_url: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool, RepositoryError> {
        let mut tenants = self.write()?;
        Ok(tenants
            .get_mut(tenant_id)
            .map(|tenant| {
                tenant.maps_url = Some(maps_url.to_string());
                tenant.latitude = Some(latitude);
                tenant.longitude = Some(longitude);
                tenant.updated_at = Utc::now();
            })
            .is_some())
    }
}
