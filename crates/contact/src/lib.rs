//! Contact-form submission pipeline: one request in, one verdict out.
//!
//! [`Validator::evaluate`] walks the ordered stages (honeypot, required
//! fields, email syntax, spam heuristics), accumulating human-readable
//! errors instead of bailing on the first, then sanitizes every field and
//! assembles the exact outbound message. Delivery sits behind the
//! [`Mailer`] trait.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared::error::{RejectReason, Rejection};
use tracing::debug;

pub mod sanitize;

use sanitize::{sanitize_input, sanitize_phone};

const EMAIL_FORMAT: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const URL_IN_MESSAGE: &str = r"(?i)https?://";
const EMAIL_IN_MESSAGE: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Fixed recipient/sender identity plus the spam-heuristic knobs. The
/// thresholds have no principled value; they are configuration precisely
/// so deployments can tune them.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub to_email: String,
    pub company: String,
    pub max_message_links: usize,
    pub max_message_addresses: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            to_email: "info@example.com".into(),
            company: "Example Productions LLC".into(),
            max_message_links: 2,
            max_message_addresses: 2,
        }
    }
}

/// Raw form fields, one per request. `website` is the honeypot: humans
/// never see the input, so any value there marks the submission as
/// automated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub website: String,
}

/// Fully sanitized, ready-to-send message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl PreparedEmail {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

pub struct Validator {
    config: ContactConfig,
    email_format: Regex,
    url_in_message: Regex,
    email_in_message: Regex,
}

impl Validator {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            email_format: Regex::new(EMAIL_FORMAT).expect("email format pattern"),
            url_in_message: Regex::new(URL_IN_MESSAGE).expect("url pattern"),
            email_in_message: Regex::new(EMAIL_IN_MESSAGE).expect("email pattern"),
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Runs the pipeline stages in order. The honeypot short-circuits;
    /// field errors accumulate so a caller could surface all of them at
    /// once.
    pub fn evaluate(&self, submission: &Submission) -> Result<PreparedEmail, Rejection> {
        if !submission.website.trim().is_empty() {
            // Same outward reason as a bad request on purpose; bots get
            // nothing to learn from.
            debug!("honeypot field populated, dropping submission");
            return Err(Rejection::new(RejectReason::Invalid));
        }

        let mut errors = Vec::new();
        for (label, value) in [
            ("Name", &submission.name),
            ("Email", &submission.email),
            ("Message", &submission.message),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{label} is required."));
            }
        }

        let email = submission.email.trim();
        if !email.is_empty() && !self.email_format.is_match(email) {
            errors.push("Invalid email format.".into());
        }

        let link_count = self.url_in_message.find_iter(&submission.message).count();
        let address_count = self
            .email_in_message
            .find_iter(&submission.message)
            .count();
        if link_count > self.config.max_message_links
            || address_count > self.config.max_message_addresses
        {
            errors.push("Message contains suspicious content.".into());
        }

        if !errors.is_empty() {
            return Err(Rejection::with_errors(RejectReason::Validation, errors));
        }

        Ok(self.prepare(submission))
    }

    fn prepare(&self, submission: &Submission) -> PreparedEmail {
        let name = sanitize_input(&submission.name);
        let company = sanitize_input(&submission.company);
        let email = sanitize_input(&submission.email);
        let phone = sanitize_phone(&submission.phone);
        let event_type = sanitize_input(&submission.event_type);
        let budget = sanitize_input(&submission.budget);
        let message = sanitize_input(&submission.message);

        let subject = format!("New Contact Form Submission from {name}");

        let mut body = String::from("Contact Form Submission\n");
        body.push_str("========================\n\n");
        body.push_str(&format!("Name: {name}\n"));
        body.push_str(&format!("Company: {company}\n"));
        body.push_str(&format!("Email: {email}\n"));
        body.push_str(&format!("Phone: {phone}\n"));
        body.push_str(&format!("Event Type: {event_type}\n"));
        body.push_str(&format!("Budget: {budget}\n\n"));
        body.push_str(&format!("Message:\n{message}\n"));

        let headers = vec![
            ("From".to_string(), format!("{name} <{email}>")),
            ("Reply-To".to_string(), email),
            ("Date".to_string(), Utc::now().to_rfc2822()),
            (
                "X-Mailer".to_string(),
                format!("contact-relay/{}", env!("CARGO_PKG_VERSION")),
            ),
            ("Organization".to_string(), self.config.company.clone()),
            ("MIME-Version".to_string(), "1.0".to_string()),
            (
                "Content-Type".to_string(),
                "text/plain; charset=UTF-8".to_string(),
            ),
        ];

        PreparedEmail {
            to: self.config.to_email.clone(),
            subject,
            body,
            headers,
        }
    }
}

/// Outbound delivery seam. Implementations report failure as an error;
/// the caller maps it to the `server` outcome, nothing retries.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, email: &PreparedEmail) -> anyhow::Result<()>;
}

/// Delivers by POSTing the prepared message as JSON to an HTTP relay.
pub struct HttpRelayMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayMailer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn deliver(&self, email: &PreparedEmail) -> anyhow::Result<()> {
        self.client
            .post(&self.endpoint)
            .json(email)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// In-memory mailer for tests and offline runs. `failing()` simulates a
/// downstream outage.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<PreparedEmail>>,
    fail: AtomicBool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(true),
        }
    }

    pub fn sent(&self) -> Vec<PreparedEmail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn deliver(&self, email: &PreparedEmail) -> anyhow::Result<()> {
        if self.fail.load(Ordering::Relaxed) {
            anyhow::bail!("simulated delivery failure");
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email.clone());
        }
        Ok(())
    }
}
