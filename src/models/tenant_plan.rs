use crate::plans::Plan;
use serde::{Deserialize, Serialize};

/// Plan value as stored on the tenant row. `Demo` is a trial that expires into `Free`.
#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "UPPERCASE", type_name = "varchar")]
#[serde(rename_all = "UPPERCASE")]
pub enum TenantPlan {
    Demo,
    Free,
    Basic,
    Pro,
    Enterprise,
}

impl TenantPlan {
    /// Tier consulted for feature checks. A running trial unlocks PRO.
    pub fn feature_tier(&self) -> Plan {
        match self {
            TenantPlan::Demo => Plan::Pro,
            TenantPlan::Free => Plan::Free,
            TenantPlan::Basic => Plan::Basic,
            TenantPlan::Pro => Plan::Pro,
            TenantPlan::Enterprise => Plan::Enterprise,
        }
    }
}

impl From<Plan> for TenantPlan {
    fn from(plan: Plan) -> Self {
        match plan {
            Plan::Free => TenantPlan::Free,
            Plan::Basic => TenantPlan::Basic,
            Plan::Pro => TenantPlan::Pro,
            Plan::Enterprise => TenantPlan::Enterprise,
        }
    }
}

impl Default for TenantPlan {
    fn default() -> Self {
        TenantPlan::Demo
    }
}
