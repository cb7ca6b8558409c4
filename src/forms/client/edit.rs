use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Partial update; absent fields keep their stored value.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct EditClient {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(max_length = 50)]
    pub phone: Option<String>,
    #[validate(max_length = 255)]
    pub email: Option<String>,
    #[validate(max_length = 2000)]
    pub notes: Option<String>,
}

impl EditClient {
    pub fn update(self, client: &mut models::Client) {
        if let Some(name) = self.name {
            client.name = name;
        }

        if let Some(phone) = self.phone {
            client.phone = Some(phone);
        }

        if let Some(email) = self.email {
            client.email = Some(email);
        }

        if let Some(notes) = self.notes {
            client.notes = Some(notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_absent_fields() {
        let mut client = models::Client::new("t1".to_string(), "Ana".to_string());
        client.phone = Some("555-0100".to_string());

        EditClient {
            name: None,
            phone: None,
            email: Some("ana@example.com".to_string()),
            notes: None,
        }
        .update(&mut client);

        assert_eq!(client.name, "Ana");
        assert_eq!(client.phone.as_deref(), Some("555-0100"));
        assert_eq!(client.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let form = EditClient {
            name: Some("".to_string()),
            phone: None,
            email: None,
            notes: None,
        };
        assert!(form.validate().is_err());
    }
}
