//! Contact form route handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use cornershop_core::Email;

use crate::services::ContactMessage;
use crate::state::AppState;

const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
}

impl ContactResponse {
    fn rejected(message: &str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                success: false,
                message: message.to_string(),
                reference: None,
                received_at: None,
            }),
        )
    }
}

impl ContactForm {
    /// Trim fields and check the required ones.
    fn validate(self) -> Result<ContactMessage, &'static str> {
        let email =
            Email::parse(&self.email).map_err(|_| "Please enter a valid email address.")?;

        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            return Err("Name and message are required.");
        }

        Ok(ContactMessage {
            name: name.to_string(),
            email,
            subject: self.subject.trim().to_string(),
            message: message.to_string(),
        })
    }
}

/// Submit the contact form.
///
/// POST /contact
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> (StatusCode, Json<ContactResponse>) {
    let message = match form.validate() {
        Ok(message) => message,
        Err(reason) => {
            tracing::debug!(reason, "Contact form rejected");
            return ContactResponse::rejected(reason);
        }
    };

    let receipt = state.contact().submit(message).await;

    (
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            reference: Some(receipt.reference),
            received_at: Some(receipt.received_at),
        }),
    )
}
