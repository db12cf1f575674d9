//! Client registry payloads.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::UpsertClient;

#[derive(Debug, Deserialize, Validate)]
pub struct ClientPayload {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 20))]
    pub zip_code: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(max = 50))]
    pub tax_id: Option<String>,
}

impl From<ClientPayload> for UpsertClient {
    fn from(payload: ClientPayload) -> Self {
        UpsertClient {
            id: payload.id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            zip_code: payload.zip_code,
            country: payload.country,
            tax_id: payload.tax_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_fails_validation() {
        let payload = ClientPayload {
            id: None,
            name: String::new(),
            email: "client@example.com".to_string(),
            phone: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            tax_id: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn malformed_email_fails_validation() {
        let payload = ClientPayload {
            id: None,
            name: "Acme".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            tax_id: None,
        };
        assert!(payload.validate().is_err());
    }
}
