use crate::models;
use crate::plans::{plan_features, Feature, Plan};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub plan: models::TenantPlan,
    pub plan_expires_at: Option<DateTime<Utc>>,
    pub effective_plan: Plan,
    pub read_only: bool,
    pub features: Vec<Feature>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Tenant {
    /// Stored plan next to what the guards will treat it as at `now`.
    pub fn at(tenant: models::Tenant, now: DateTime<Utc>) -> Self {
        let effective_plan = tenant.effective_tier(now);
        let read_only = tenant.plan == models::TenantPlan::Free || tenant.is_trial_expired(now);

        Self {
            id: tenant.id,
            name: tenant.name,
            plan: tenant.plan,
            plan_expires_at: tenant.plan_expires_at,
            effective_plan,
            read_only,
            features: plan_features(effective_plan).to_vec(),
            latitude: tenant.latitude,
            longitude: tenant.longitude,
        }
    }
}

impl From<models::Tenant> for Tenant {
    fn from(tenant: models::Tenant) -> Self {
        Tenant::at(tenant, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expired_trial_shows_as_read_only_free() {
        let now = Utc::now();
        let mut tenant = models::Tenant::new_trial("shop".to_string(), 14);
        tenant.plan_expires_at = Some(now - Duration::minutes(5));

        let view = Tenant::at(tenant, now);

        assert_eq!(view.plan, models::TenantPlan::Demo);
        assert_eq!(view.effective_plan, Plan::Free);
        assert!(view.read_only);
        assert!(!view.features.contains(&Feature::Ecommerce));
    }

    #[test]
    fn test_running_trial_has_pro_features() {
        let view: Tenant = models::Tenant::new_trial("shop".to_string(), 14).into();

        assert_eq!(view.effective_plan, Plan::Pro);
        assert!(!view.read_only);
        assert!(view.features.contains(&Feature::Chatbot));
    }
}
