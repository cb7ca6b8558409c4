use crate::models::WorkOrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A repair ticket. `tracking_code` is what the shop hands to its customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkOrder {
    pub id: i32,
    pub tenant_id: String,
    pub client_id: i32,
    pub tracking_code: String,
    pub device: String,
    pub problem: String,
    pub status: WorkOrderStatus,
    pub estimated_cost_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkOrder {
    pub fn new(tenant_id: String, client_id: i32, device: String, problem: String) -> Self {
        Self {
            tenant_id,
            client_id,
            tracking_code: generate_tracking_code(),
            device,
            problem,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..Default::default()
        }
    }
}

fn generate_tracking_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}
