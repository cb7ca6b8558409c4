use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct AddWorkOrder {
    pub client_id: i32,
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub device: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 4000)]
    pub problem: String,
    #[validate(minimum = 0)]
    pub estimated_cost_cents: Option<i64>,
}

impl AddWorkOrder {
    pub fn into_work_order(self, tenant_id: String) -> models::WorkOrder {
        let mut work_order =
            models::WorkOrder::new(tenant_id, self.client_id, self.device, self.problem);
        work_order.estimated_cost_cents = self.estimated_cost_cents;

        work_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_cost_is_rejected() {
        let form: AddWorkOrder = serde_json::from_value(serde_json::json!({
            "client_id": 1,
            "device": "Galaxy S21",
            "problem": "does not charge",
            "estimated_cost_cents": -100
        }))
        .unwrap();

        assert!(form.validate().is_err());
    }
}
