use crate::models::TenantPlan;
use crate::plans::Plan;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A subscribing shop. Owns its plan state; nothing else caches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub plan: TenantPlan,
    pub plan_expires_at: Option<DateTime<Utc>>,
    pub maps_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// New shop on a `DEMO` trial lasting `trial_days`.
    pub fn new_trial(name: String, trial_days: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            plan: TenantPlan::Demo,
            plan_expires_at: Some(now + Duration::days(trial_days)),
            maps_url: None,
            latitude: None,
            longitude: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_trial_expired(&self, now: DateTime<Utc>) -> bool {
        self.plan == TenantPlan::Demo && self.plan_expires_at.map_or(false, |at| at < now)
    }

    /// Tier used for feature checks. An expired trial counts as FREE even
    /// before the downgrade has been written.
    pub fn effective_tier(&self, now: DateTime<Utc>) -> Plan {
        if self.is_trial_expired(now) {
            Plan::Free
        } else {
            self.plan.feature_tier()
        }
    }

    pub fn downgrade_to_free(&mut self) {
        self.plan = TenantPlan::Free;
        self.plan_expires_at = None;
        self.updated_at = Utc::now();
    }
}

impl Default for Tenant {
    fn default() -> Self {
        Tenant {
            id: "".to_string(),
            name: "".to_string(),
            plan: TenantPlan::default(),
            plan_expires_at: None,
            maps_url: None,
            latitude: None,
            longitude: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }
}
