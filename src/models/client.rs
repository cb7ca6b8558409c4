use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shop's customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    pub id: i32,
    pub tenant_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(tenant_id: String, name: String) -> Self {
        Self {
            tenant_id,
            name,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..Default::default()
        }
    }
}
