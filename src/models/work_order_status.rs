use serde::{Deserialize, Serialize};

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE", type_name = "varchar")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Received,
    Diagnosing,
    WaitingParts,
    Repairing,
    Ready,
    Delivered,
    Cancelled,
}

impl WorkOrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkOrderStatus::Delivered | WorkOrderStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: WorkOrderStatus) -> bool {
        !self.is_terminal() && *self != next
    }
}

impl Default for WorkOrderStatus {
    fn default() -> Self {
        WorkOrderStatus::Received
    }
}
