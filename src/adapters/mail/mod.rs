//! Mail delivery
//!
//! Composes the report message (fixed sender and recipients, subject and body
//! both `"<prefix> <report date>"`, the staged file attached under its base
//! name) and submits it over STARTTLS-authenticated SMTP. Composition is
//! separated from transport so the message can be verified without a server.

use crate::config::MailConfig;
use crate::domain::errors::DeliveryError;
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use std::path::Path;

/// Send the staged report as an email attachment.
///
/// # Errors
///
/// Returns [`DeliveryError`] on address, composition, attachment-read, or
/// transport failures. The caller treats all of these as non-fatal: the report
/// stays staged for a manual resend.
pub fn send_report(
    config: &MailConfig,
    file_path: &Path,
    report_date: &str,
) -> Result<(), DeliveryError> {
    let filename = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.xlsx".to_string());

    let payload = std::fs::read(file_path).map_err(|e| DeliveryError::Attachment {
        path: file_path.display().to_string(),
        reason: e.to_string(),
    })?;

    let message = compose(config, &filename, payload, report_date)?;

    let username = config
        .username
        .as_ref()
        .ok_or_else(|| DeliveryError::Compose("mail.username is not configured".to_string()))?;
    let password = config
        .password
        .as_ref()
        .ok_or_else(|| DeliveryError::Compose("mail.password is not configured".to_string()))?;

    let mailer = SmtpTransport::starttls_relay(&config.smtp_host)
        .map_err(|e| DeliveryError::Transport(e.to_string()))?
        .port(config.smtp_port)
        .credentials(Credentials::new(
            username.clone(),
            password.expose_secret().as_ref().to_string(),
        ))
        .build();

    tracing::info!(
        host = %config.smtp_host,
        port = config.smtp_port,
        recipients = config.to.len(),
        "Submitting report email"
    );

    mailer
        .send(&message)
        .map_err(|e| DeliveryError::Transport(e.to_string()))?;

    tracing::info!("Report email accepted by submission server");
    Ok(())
}

/// Build the report message: plain-text body plus one binary attachment.
pub fn compose(
    config: &MailConfig,
    filename: &str,
    payload: Vec<u8>,
    report_date: &str,
) -> Result<Message, DeliveryError> {
    let subject_and_body = format!("{} {}", config.subject_prefix, report_date);

    let mut builder = Message::builder()
        .from(parse_mailbox(&config.from)?)
        .subject(subject_and_body.clone());

    for recipient in &config.to {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    let content_type = ContentType::parse("application/octet-stream")
        .map_err(|e| DeliveryError::Compose(e.to_string()))?;

    let body = Body::new_with_encoding(payload, ContentTransferEncoding::Base64)
        .map_err(|_| DeliveryError::Compose("failed to base64-encode attachment".to_string()))?;

    builder
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(subject_and_body))
                .singlepart(Attachment::new(filename.to_string()).body(body, content_type)),
        )
        .map_err(|e| DeliveryError::Compose(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| DeliveryError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}
