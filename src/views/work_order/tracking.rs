use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What an anonymous customer sees on the tracking page.
#[derive(Debug, Serialize)]
pub struct Tracking {
    pub tracking_code: String,
    pub store: String,
    pub device: String,
    pub status: models::WorkOrderStatus,
    pub updated_at: DateTime<Utc>,
}

impl Tracking {
    pub fn new(work_order: models::WorkOrder, tenant: &models::Tenant) -> Self {
        Self {
            tracking_code: work_order.tracking_code,
            store: tenant.name.clone(),
            device: work_order.device,
            status: work_order.status,
            updated_at: work_order.updated_at,
        }
    }
}
