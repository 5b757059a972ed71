//! Contact form delivery.
//!
//! There is no mail backend. Submissions wait for the configured delay, are
//! logged, and always succeed.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use cornershop_core::Email;

/// A validated contact form submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
}

/// Acknowledgement returned to the shopper.
#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
}

/// Simulated contact form backend.
#[derive(Debug, Clone)]
pub struct ContactService {
    delay: Duration,
}

impl ContactService {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Deliver a message.
    #[tracing::instrument(skip_all, fields(email_domain = %message.email.domain()))]
    pub async fn submit(&self, message: ContactMessage) -> ContactReceipt {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let receipt = ContactReceipt {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
        };

        tracing::info!(
            reference = %receipt.reference,
            subject = %message.subject,
            length = message.message.len(),
            "Contact message received"
        );

        receipt
    }
}
