//! Contact-form intake. Messages are validated and acknowledged; the site
//! follows up by hand, so nothing is persisted.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("message must be at least 10 characters")]
    MessageTooShort,
}

impl ContactValidationError {
    pub const fn field(&self) -> &'static str {
        match self {
            ContactValidationError::NameTooShort => "name",
            ContactValidationError::InvalidEmail => "email",
            ContactValidationError::MessageTooShort => "message",
        }
    }
}

pub fn validate_contact(message: &ContactMessage) -> Result<(), ContactValidationError> {
    if message.name.trim().chars().count() < 2 {
        return Err(ContactValidationError::NameTooShort);
    }

    let email = message.email.trim();
    let valid_email = email
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'))
        .unwrap_or(false);
    if !valid_email {
        return Err(ContactValidationError::InvalidEmail);
    }

    if message.message.trim().chars().count() < 10 {
        return Err(ContactValidationError::MessageTooShort);
    }

    Ok(())
}

pub fn contact_router() -> Router {
    Router::new().route("/api/v1/contact", post(contact_handler))
}

pub(crate) async fn contact_handler(
    axum::Json(message): axum::Json<ContactMessage>,
) -> Response {
    match validate_contact(&message) {
        Ok(()) => {
            info!(
                name = %message.name,
                email = %message.email,
                service = message.service.as_deref().unwrap_or("unspecified"),
                "contact enquiry received"
            );
            let payload = json!({ "status": "received" });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Priya Shah".to_string(),
            email: "priya@example.com".to_string(),
            service: Some("web-development".to_string()),
            message: "We need a new storefront for our bakery.".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_messages() {
        assert_eq!(validate_contact(&message()), Ok(()));
    }

    #[test]
    fn rejects_one_character_names() {
        let mut bad = message();
        bad.name = "P".to_string();
        assert_eq!(validate_contact(&bad), Err(ContactValidationError::NameTooShort));
    }

    #[test]
    fn rejects_addresses_without_domain_dot() {
        let mut bad = message();
        bad.email = "priya@localhost".to_string();
        assert_eq!(validate_contact(&bad), Err(ContactValidationError::InvalidEmail));
    }

    #[test]
    fn rejects_nine_character_messages() {
        let mut bad = message();
        bad.message = "too short".to_string();
        assert_eq!(validate_contact(&bad), Err(ContactValidationError::MessageTooShort));
    }

    #[tokio::test]
    async fn handler_acknowledges_valid_messages() {
        let response = contact_handler(axum::Json(message())).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn handler_rejects_invalid_messages_with_field() {
        let mut bad = message();
        bad.message = "hi".to_string();
        let response = contact_handler(axum::Json(bad)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
