use crate::plans::Plan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct AddTenant {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
}

/// Plan change issued by billing. `expires_at` is kept as given; only DEMO expiry is enforced.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct ChangePlan {
    pub plan: Plan,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Location {
    #[validate(min_length = 1)]
    #[validate(max_length = 2048)]
    pub maps_url: String,
}
