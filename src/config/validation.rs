//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts > 0, timeouts > 0, statuses in 100..=599)
//! - Check that every target is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SmokeConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::SmokeConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} is not a valid http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("health.accepted_statuses must not be empty")]
    NoAcceptedStatuses,

    #[error("health.accepted_statuses contains {0}, which is not an HTTP status code")]
    InvalidStatus(u16),

    #[error("ui.input_selector must not be empty")]
    EmptySelector,
}

/// Check a parsed configuration for values the checks cannot run with.
pub fn validate_config(config: &SmokeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let health = &config.health;
    let ui = &config.ui;

    if health.attempts == 0 {
        errors.push(ValidationError::Zero { field: "health.attempts" });
    }
    if health.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "health.timeout_secs" });
    }
    if ui.browser.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "ui.browser.request_timeout_secs" });
    }

    match health.target_url() {
        Ok(url) if is_http(&url) => {}
        _ => errors.push(ValidationError::InvalidUrl {
            field: "health.base_url",
            value: format!("{}{}", health.base_url, health.path),
        }),
    }
    if !Url::parse(&ui.url).map(|u| is_http(&u)).unwrap_or(false) {
        errors.push(ValidationError::InvalidUrl {
            field: "ui.url",
            value: ui.url.clone(),
        });
    }

    if health.accepted_statuses.is_empty() {
        errors.push(ValidationError::NoAcceptedStatuses);
    }
    for &status in &health.accepted_statuses {
        if !(100..=599).contains(&status) {
            errors.push(ValidationError::InvalidStatus(status));
        }
    }

    if ui.input_selector.trim().is_empty() {
        errors.push(ValidationError::EmptySelector);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
