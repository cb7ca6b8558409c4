//! Plan checks that run before a handler touches tenant data.
//!
//! `check_read_only` must be called before every mutating operation. It is the
//! only place outside billing where plan state is written: a `DEMO` trial that
//! has expired is moved to `FREE` on the first check after expiry.

use crate::helpers::JsonResponse;
use crate::models::{Tenant, TenantPlan};
use crate::plans::{minimum_plan_for_feature, plan_has_feature, Feature};
use crate::repository::{RepositoryError, TenantRepository};
use actix_web::Error;
use chrono::{DateTime, Utc};

pub const READ_ONLY_MESSAGE: &str =
    "This store is in read-only mode. Upgrade your plan to make changes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TenantNotFound,
    ReadOnly,
    FeatureUnavailable(Feature),
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::TenantNotFound => "Store not found".to_string(),
            Rejection::ReadOnly => READ_ONLY_MESSAGE.to_string(),
            Rejection::FeatureUnavailable(feature) => format!(
                "{} is not included in your plan. Upgrade to {} or higher.",
                feature,
                minimum_plan_for_feature(*feature)
            ),
        }
    }

    pub fn into_error(self) -> Error {
        let builder = JsonResponse::<Tenant>::build();
        match self {
            Rejection::TenantNotFound => builder.not_found(self.message()),
            Rejection::ReadOnly | Rejection::FeatureUnavailable(_) => {
                builder.forbidden(self.message())
            }
        }
    }
}

pub async fn check_read_only(
    repo: &dyn TenantRepository,
    tenant_id: &str,
) -> Result<Option<Rejection>, RepositoryError> {
    check_read_only_at(repo, tenant_id, Utc::now()).await
}

/// `None` means the request may proceed.
pub async fn check_read_only_at(
    repo: &dyn TenantRepository,
    tenant_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<Rejection>, RepositoryError> {
    Ok(writable_tenant_at(repo, tenant_id, now).await?.err())
}

/// Loads the tenant a mutation is about to act on, or the reason it may not.
#[tracing::instrument(name = "Check read-only plan.", skip(repo))]
pub async fn writable_tenant_at(
    repo: &dyn TenantRepository,
    tenant_id: &str,
    now: DateTime<Utc>,
) -> Result<Result<Tenant, Rejection>, RepositoryError> {
    let tenant = match repo.load(tenant_id).await? {
        Some(tenant) => tenant,
        None => return Ok(Err(Rejection::TenantNotFound)),
    };

    if tenant.is_trial_expired(now) {
        tracing::info!("Trial of tenant {} expired, downgrading to FREE", tenant_id);
        // the trial is over whether or not the write lands
        match repo.downgrade_expired_trial(tenant_id, now).await {
            Ok(true) => {}
            Ok(false) => tracing::info!("Tenant {} changed plan before the downgrade", tenant_id),
            Err(err) => tracing::error!("Failed to downgrade tenant {}: {:?}", tenant_id, err),
        }
        return Ok(Err(Rejection::ReadOnly));
    }

    if tenant.plan == TenantPlan::Free {
        return Ok(Err(Rejection::ReadOnly));
    }

    Ok(Ok(tenant))
}

/// Judges `feature` against the tenant's effective tier at `now`.
pub fn require_feature(
    tenant: &Tenant,
    feature: Feature,
    now: DateTime<Utc>,
) -> Result<(), Rejection> {
    if plan_has_feature(tenant.effective_tier(now), feature) {
        Ok(())
    } else {
        Err(Rejection::FeatureUnavailable(feature))
    }
}

/// Loads the tenant and checks its effective tier. Never writes.
#[tracing::instrument(name = "Check plan feature.", skip(repo))]
pub async fn check_feature(
    repo: &dyn TenantRepository,
    tenant_id: &str,
    feature: Feature,
) -> Result<Result<Tenant, Rejection>, RepositoryError> {
    let tenant = match repo.load(tenant_id).await? {
        Some(tenant) => tenant,
        None => return Ok(Err(Rejection::TenantNotFound)),
    };

    Ok(require_feature(&tenant, feature, Utc::now()).map(|_| tenant))
}

fn storage_error(tenant_id: &str, err: RepositoryError) -> Error {
    tracing::error!("Failed to read plan of tenant {}: {:?}", tenant_id, err);
    JsonResponse::<Tenant>::build().internal_server_error("")
}

/// Handler-side read-only guard, returning the loaded tenant.
pub async fn ensure_writable(repo: &dyn TenantRepository, tenant_id: &str) -> Result<Tenant, Error> {
    match writable_tenant_at(repo, tenant_id, Utc::now()).await {
        Ok(Ok(tenant)) => Ok(tenant),
        Ok(Err(rejection)) => Err(rejection.into_error()),
        Err(err) => Err(storage_error(tenant_id, err)),
    }
}

/// Guard for mutations on a feature-scoped resource. Loads the tenant once.
pub async fn ensure_writable_feature(
    repo: &dyn TenantRepository,
    tenant_id: &str,
    feature: Feature,
) -> Result<Tenant, Error> {
    let tenant = ensure_writable(repo, tenant_id).await?;
    require_feature(&tenant, feature, Utc::now()).map_err(Rejection::into_error)?;

    Ok(tenant)
}

/// Handler-side wrapper around `check_feature`, returning the loaded tenant.
pub async fn ensure_feature(
    repo: &dyn TenantRepository,
    tenant_id: &str,
    feature: Feature,
) -> Result<Tenant, Error> {
    match check_feature(repo, tenant_id, feature).await {
        Ok(Ok(tenant)) => Ok(tenant),
        Ok(Err(rejection)) => Err(rejection.into_error()),
        Err(err) => Err(storage_error(tenant_id, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTenantRepository;
    use async_trait::async_trait;
    use chrono::Duration;

    fn tenant(id: &str, plan: TenantPlan, plan_expires_at: Option<DateTime<Utc>>) -> Tenant {
        Tenant {
            id: id.to_string(),
            name: format!("shop {id}"),
            plan,
            plan_expires_at,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_free_tenant_is_rejected_without_write() {
        let repo = InMemoryTenantRepository::with_tenants([tenant("t1", TenantPlan::Free, None)]);

        let result = check_read_only(&repo, "t1").await.unwrap();

        assert_eq!(result, Some(Rejection::ReadOnly));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_expired_demo_is_downgraded_and_rejected() {
        let yesterday = Utc::now() - Duration::days(1);
        let repo = InMemoryTenantRepository::with_tenants([tenant(
            "t1",
            TenantPlan::Demo,
            Some(yesterday),
        )]);

        let result = check_read_only(&repo, "t1").await.unwrap();

        assert_eq!(result, Some(Rejection::ReadOnly));
        assert_eq!(repo.write_count(), 1);
        let stored = repo.load("t1").await.unwrap().unwrap();
        assert_eq!(stored.plan, TenantPlan::Free);
        assert_eq!(stored.plan_expires_at, None);
    }

    #[tokio::test]
    async fn test_downgrade_is_idempotent() {
        let yesterday = Utc::now() - Duration::days(1);
        let repo = InMemoryTenantRepository::with_tenants([tenant(
            "t1",
            TenantPlan::Demo,
            Some(yesterday),
        )]);

        let first = check_read_only(&repo, "t1").await.unwrap();
        let second = check_read_only(&repo, "t1").await.unwrap();

        assert_eq!(first, Some(Rejection::ReadOnly));
        assert_eq!(second, Some(Rejection::ReadOnly));
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn test_running_demo_proceeds() {
        let tomorrow = Utc::now() + Duration::days(1);
        let repo = InMemoryTenantRepository::with_tenants([tenant(
            "t1",
            TenantPlan::Demo,
            Some(tomorrow),
        )]);

        assert_eq!(check_read_only(&repo, "t1").await.unwrap(), None);
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_enterprise_proceeds() {
        let repo =
            InMemoryTenantRepository::with_tenants([tenant("t1", TenantPlan::Enterprise, None)]);

        assert_eq!(check_read_only(&repo, "t1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_paid_plan_expiry_is_not_enforced() {
        let last_month = Utc::now() - Duration::days(30);
        let repo = InMemoryTenantRepository::with_tenants([tenant(
            "t1",
            TenantPlan::Pro,
            Some(last_month),
        )]);

        assert_eq!(check_read_only(&repo, "t1").await.unwrap(), None);
        assert_eq!(repo.write_count(), 0);
        let stored = repo.load("t1").await.unwrap().unwrap();
        assert_eq!(stored.plan, TenantPlan::Pro);
    }

    #[tokio::test]
    async fn test_unknown_tenant_is_not_found_without_write() {
        let repo = InMemoryTenantRepository::new();

        let result = check_read_only(&repo, "missing").await.unwrap();

        assert_eq!(result, Some(Rejection::TenantNotFound));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_expiry_is_judged_against_given_time() {
        let expires = Utc::now();
        let repo =
            InMemoryTenantRepository::with_tenants([tenant("t1", TenantPlan::Demo, Some(expires))]);

        let before = check_read_only_at(&repo, "t1", expires - Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(before, None);

        let after = check_read_only_at(&repo, "t1", expires + Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(after, Some(Rejection::ReadOnly));
    }

    fn unavailable<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    struct FailingWrites(InMemoryTenantRepository);

    #[async_trait]
    impl TenantRepository for FailingWrites {
        async fn load(&self, tenant_id: &str) -> Result<Option<Tenant>, RepositoryError> {
            self.0.load(tenant_id).await
        }

        async fn save(&self, _tenant: &Tenant) -> Result<(), RepositoryError> {
            unavailable()
        }

        async fn update_plan(
            &self,
            _tenant_id: &str,
            _plan: TenantPlan,
            _plan_expires_at: Option<DateTime<Utc>>,
        ) -> Result<bool, RepositoryError> {
            unavailable()
        }

        async fn downgrade_expired_trial(
            &self,
            _tenant_id: &str,
            _now: DateTime<Utc>,
        ) -> Result<bool, RepositoryError> {
            unavailable()
        }

        async fn update_location(
            &self,
            _tenant_id: &str,
            _maps_url: &str,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<bool, RepositoryError> {
            unavailable()
        }
    }

    #[tokio::test]
    async fn test_failed_downgrade_still_rejects() {
        let yesterday = Utc::now() - Duration::days(1);
        let repo = FailingWrites(InMemoryTenantRepository::with_tenants([tenant(
            "t1",
            TenantPlan::Demo,
            Some(yesterday),
        )]));

        let result = check_read_only(&repo, "t1").await.unwrap();

        assert_eq!(result, Some(Rejection::ReadOnly));
    }

    /// Serves a snapshot taken before billing upgraded the tenant; writes go
    /// to the live store.
    struct StaleReads {
        snapshot: Tenant,
        live: InMemoryTenantRepository,
    }

    #[async_trait]
    impl TenantRepository for StaleReads {
        async fn load(&self, _tenant_id: &str) -> Result<Option<Tenant>, RepositoryError> {
            Ok(Some(self.snapshot.clone()))
        }

        async fn save(&self, tenant: &Tenant) -> Result<(), RepositoryError> {
            self.live.save(tenant).await
        }

        async fn update_plan(
            &self,
            tenant_id: &str,
            plan: TenantPlan,
            plan_expires_at: Option<DateTime<Utc>>,
        ) -> Result<bool, RepositoryError> {
            self.live.update_plan(tenant_id, plan, plan_expires_at).await
        }

        async fn downgrade_expired_trial(
            &self,
            tenant_id: &str,
            now: DateTime<Utc>,
        ) -> Result<bool, RepositoryError> {
            self.live.downgrade_expired_trial(tenant_id, now).await
        }

        async fn update_location(
            &self,
            tenant_id: &str,
            maps_url: &str,
            latitude: f64,
            longitude: f64,
        ) -> Result<bool, RepositoryError> {
            self.live
                .update_location(tenant_id, maps_url, latitude, longitude)
                .await
        }
    }

    #[tokio::test]
    async fn test_downgrade_never_reverts_a_concurrent_upgrade() {
        let yesterday = Utc::now() - Duration::days(1);
        let snapshot = tenant("t1", TenantPlan::Demo, Some(yesterday));
        let mut upgraded = tenant("t1", TenantPlan::Pro, None);
        upgraded.maps_url = Some("https://maps.app.goo.gl/AbCdEf".to_string());
        let repo = StaleReads {
            snapshot,
            live: InMemoryTenantRepository::with_tenants([upgraded]),
        };

        let result = check_read_only(&repo, "t1").await.unwrap();

        assert_eq!(result, Some(Rejection::ReadOnly));
        let stored = repo.live.load("t1").await.unwrap().unwrap();
        assert_eq!(stored.plan, TenantPlan::Pro);
        assert_eq!(stored.maps_url.as_deref(), Some("https://maps.app.goo.gl/AbCdEf"));
    }

    struct FailingReads;

    #[async_trait]
    impl TenantRepository for FailingReads {
        async fn load(&self, _tenant_id: &str) -> Result<Option<Tenant>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".to_string()))
        }

        async fn save(&self, _tenant: &Tenant) -> Result<(), RepositoryError> {
            unreachable!("no write after a failed read")
        }

        async fn update_plan(
            &self,
            _tenant_id: &str,
            _plan: TenantPlan,
            _plan_expires_at: Option<DateTime<Utc>>,
        ) -> Result<bool, RepositoryError> {
            unreachable!("no write after a failed read")
        }

        async fn downgrade_expired_trial(
            &self,
            _tenant_id: &str,
            _now: DateTime<Utc>,
        ) -> Result<bool, RepositoryError> {
            unreachable!("no write after a failed read")
        }

        async fn update_location(
            &self,
            _tenant_id: &str,
            _maps_url: &str,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<bool, RepositoryError> {
            unreachable!("no write after a failed read")
        }
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        assert!(check_read_only(&FailingReads, "t1").await.is_err());
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_error() {
        let err = ensure_feature(&FailingReads, "t1", Feature::Clients)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_writable_feature_returns_tenant() {
        let repo = InMemoryTenantRepository::with_tenants([
            tenant("basic", TenantPlan::Basic, None),
            tenant("free", TenantPlan::Free, None),
        ]);

        let loaded = ensure_writable_feature(&repo, "basic", Feature::ExportData)
            .await
            .unwrap();
        assert_eq!(loaded.plan, TenantPlan::Basic);

        let err = ensure_writable_feature(&repo, "basic", Feature::Chatbot)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::FORBIDDEN
        );

        assert!(ensure_writable_feature(&repo, "free", Feature::Clients)
            .await
            .is_err());
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_feature_check_uses_effective_tier() {
        let now = Utc::now();
        let repo = InMemoryTenantRepository::with_tenants([
            tenant("trial", TenantPlan::Demo, Some(now + Duration::days(3))),
            tenant("lapsed", TenantPlan::Demo, Some(now - Duration::days(3))),
            tenant("basic", TenantPlan::Basic, None),
        ]);

        assert!(check_feature(&repo, "trial", Feature::Chatbot)
            .await
            .unwrap()
            .is_ok());
        assert_eq!(
            check_feature(&repo, "lapsed", Feature::Ecommerce)
                .await
                .unwrap()
                .unwrap_err(),
            Rejection::FeatureUnavailable(Feature::Ecommerce)
        );
        assert!(check_feature(&repo, "lapsed", Feature::Clients)
            .await
            .unwrap()
            .is_ok());
        assert!(check_feature(&repo, "basic", Feature::ExportData)
            .await
            .unwrap()
            .is_ok());
        assert_eq!(
            check_feature(&repo, "nobody", Feature::Clients)
                .await
                .unwrap()
                .unwrap_err(),
            Rejection::TenantNotFound
        );
        assert_eq!(repo.write_count(), 0);
    }

    #[test]
    fn test_feature_rejection_names_minimum_plan() {
        let message = Rejection::FeatureUnavailable(Feature::ExportData).message();
        assert_eq!(
            message,
            "EXPORT_DATA is not included in your plan. Upgrade to BASIC or higher."
        );
    }
}
