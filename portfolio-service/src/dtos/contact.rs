//! Contact form payload.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactPayload {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(
        min = 10,
        max = 5000,
        message = "message must be between 10 and 5000 characters"
    ))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_fails_validation() {
        let payload = ContactPayload {
            name: "Jordan".to_string(),
            email: "jordan@example.com".to_string(),
            subject: None,
            message: "hi".to_string(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("message"));
    }

    #[test]
    fn valid_payload_passes() {
        let payload = ContactPayload {
            name: "Jordan".to_string(),
            email: "jordan@example.com".to_string(),
            subject: Some("Project inquiry".to_string()),
            message: "I would like to discuss a project.".to_string(),
        };
        assert!(payload.validate().is_ok());
    }
}
