// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Email notifications over authenticated SMTP.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::{Category, Code, Detail, Severity};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::NotifyError;
use crate::notifier::Notifier;

/// Sends plain-text notification emails.
///
/// Every call opens its own SMTP session: connect, STARTTLS, login, send,
/// quit. Nothing is pooled between notifications.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    config: SmtpConfig,
}

impl EmailNotifier {
    /// Creates a notifier for the given SMTP settings.
    #[must_use]
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Returns the SMTP settings.
    #[must_use]
    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }

    /// Builds the message sent for a notification.
    ///
    /// # Errors
    ///
    /// Returns error if the sender or recipient is not a valid address.
    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.config.username.parse()?)
            .to(self.config.recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotifyError::Build(e.to_string()))
    }

    /// Sends one email and reports the classified failure.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Authentication`] if the server rejects the
    /// login, and another [`NotifyError`] for any other failure.
    pub async fn try_send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let email = self.build_message(subject, body)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer.send(email).await.map_err(|e| match e.status() {
            Some(code) if is_auth_failure(&code) => NotifyError::Authentication(e.to_string()),
            _ => NotifyError::Transport(e),
        })?;

        Ok(())
    }
}

impl Notifier for EmailNotifier {
    async fn notify(&self, subject: &str, body: &str) {
        match self.try_send(subject, body).await {
            Ok(()) => tracing::info!("Sent email: {subject}"),
            Err(NotifyError::Authentication(detail)) => {
                tracing::debug!(detail = %detail, "SMTP login rejected");
                tracing::error!("Failed to send email: Gmail user or app password not accepted.");
            }
            Err(e) => tracing::error!("Failed to send email: {e}"),
        }
    }
}

/// Returns `true` for the SMTP replies servers use to reject a login
/// (`534` and `535`).
#[must_use]
pub fn is_auth_failure(code: &Code) -> bool {
    code.severity == Severity::PermanentNegativeCompletion
        && code.category == Category::Unspecified3
        && matches!(code.detail, Detail::Four | Detail::Five)
}
