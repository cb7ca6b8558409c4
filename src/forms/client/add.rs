use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct AddClient {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(max_length = 50)]
    pub phone: Option<String>,
    #[validate(max_length = 255)]
    pub email: Option<String>,
    #[validate(max_length = 2000)]
    pub notes: Option<String>,
}

impl AddClient {
    pub fn into_client(self, tenant_id: String) -> models::Client {
        let mut client = models::Client::new(tenant_id, self.name);
        client.phone = self.phone;
        client.email = self.email;
        client.notes = self.notes;

        client
    }
}
