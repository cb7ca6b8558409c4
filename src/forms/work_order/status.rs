use crate::models::WorkOrderStatus;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct ChangeStatus {
    pub status: WorkOrderStatus,
}
