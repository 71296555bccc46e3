//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the smoke checks.
//! All types derive Serde traits for deserialization from config files, and every
//! field has a default so the checks run without any file at all.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the smoke checks.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SmokeConfig {
    /// Status API liveness polling.
    pub health: HealthCheckConfig,

    /// Login page rendering check.
    pub ui: UiCheckConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Health poll configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Dashboard origin (e.g., "https://localhost").
    pub base_url: String,

    /// Path of the status endpoint, joined onto `base_url`.
    pub path: String,

    /// Maximum number of probe attempts.
    pub attempts: u32,

    /// Pause after each failed attempt, in seconds.
    pub interval_secs: u64,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Status codes treated as proof of liveness.
    ///
    /// Redirects are only followed when `follow_redirects` is set; otherwise a
    /// 301/307/308 answer is retried like any other status outside this set.
    pub accepted_statuses: Vec<u16>,

    /// Follow redirects and judge the final response instead of the first one.
    pub follow_redirects: bool,

    /// Skip certificate validation (self-signed dashboards).
    pub accept_invalid_certs: bool,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            path: "/api/status".to_string(),
            attempts: 30,
            interval_secs: 5,
            timeout_secs: 5,
            // 401 means an auth wall answered, which is still a live endpoint
            accepted_statuses: vec![200, 302, 401],
            follow_redirects: false,
            accept_invalid_certs: true,
        }
    }
}

impl HealthCheckConfig {
    /// Full URL of the status endpoint; `path` is appended to any path prefix of `base_url`.
    pub fn target_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        url.set_path(&path);
        Ok(url)
    }
}

/// UI smoke check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiCheckConfig {
    /// Dashboard page to load.
    pub url: String,

    /// Time to let client-side rendering settle, in seconds.
    pub settle_secs: u64,

    /// Product name the title is loosely compared against.
    pub expected_title: String,

    /// CSS selector counted as form inputs.
    pub input_selector: String,

    /// Minimum number of matching elements for a login form.
    pub min_inputs: usize,

    /// Browser launch options.
    pub browser: BrowserOptions,
}

impl Default for UiCheckConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost/".to_string(),
            settle_secs: 5,
            expected_title: "Wazuh".to_string(),
            input_selector: "input".to_string(),
            min_inputs: 2,
            browser: BrowserOptions::default(),
        }
    }
}

/// Chromium launch options suited to containers and CI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowserOptions {
    /// Run without a display.
    pub headless: bool,

    /// Disable the Chromium sandbox (required as root in containers).
    pub no_sandbox: bool,

    /// Avoid /dev/shm, which is tiny in most containers.
    pub disable_dev_shm_usage: bool,

    /// Accept self-signed certificates.
    pub ignore_certificate_errors: bool,

    /// Explicit Chromium binary; auto-detected when unset.
    pub executable: Option<PathBuf>,

    /// CDP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Additional command-line switches.
    pub extra_args: Vec<String>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            no_sandbox: true,
            disable_dev_shm_usage: true,
            ignore_certificate_errors: true,
            executable: None,
            request_timeout_secs: 30,
            extra_args: Vec::new(),
        }
    }
}

impl BrowserOptions {
    /// Command-line switches derived from the flags above.
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.headless {
            args.push("--headless=new".to_string());
        }
        if self.no_sandbox {
            args.push("--no-sandbox".to_string());
        }
        if self.disable_dev_shm_usage {
            args.push("--disable-dev-shm-usage".to_string());
        }
        if self.ignore_certificate_errors {
            args.push("--ignore-certificate-errors".to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
