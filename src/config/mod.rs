//! Everything needed to reach the router, resolved once before fetching.

use std::time::Duration;

use anyhow::Context;

mod router;
pub use router::{guess_router, router_for, FALLBACK_ROUTER};

/// How often a `401 Unauthorized` is retried before giving up.
pub const DEFAULT_AUTH_RETRIES: u32 = 10;
pub const DEFAULT_USERNAME: &str = "";
pub const DEFAULT_PASSWORD: &str = "admin";

pub const ENV_HOST: &str = "WRT_HOST";
pub const ENV_USERNAME: &str = "WRT_USERNAME";
pub const ENV_PASSWORD: &str = "WRT_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Example: `192.168.1.1`
    host: String,
    /// Username for basic auth, the router usually ignores it
    username: String,
    /// Password for basic auth
    password: String,
    /// The router ships with a self-signed certificate, so this has to be
    /// `true` for stock firmware.
    accept_invalid_certs: bool,
    /// Retries after a `401 Unauthorized`
    auth_retries: u32,
    /// Per request, `None` waits as long as the connection allows
    timeout: Option<Duration>,
}

impl RouterConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> anyhow::Result<RouterConfig> {
        let host = host.into();
        if host.trim().is_empty() {
            anyhow::bail!("router host must not be empty");
        }

        Ok(RouterConfig {
            host,
            username: username.into(),
            password: password.into(),
            accept_invalid_certs: true,
            auth_retries: DEFAULT_AUTH_RETRIES,
            timeout: None,
        })
    }

    /// Create a config from explicit values, falling back to the environment
    /// (including `.env`) and then to the defaults.
    ///
    /// The host default is guessed from the local interfaces.
    pub fn resolve(
        host: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> anyhow::Result<RouterConfig> {
        fn resolve_var(key: &str, value: Option<&str>) -> Option<String> {
            match value {
                Some(s) => Some(s.to_string()),
                None => dotenv::var(key).ok(),
            }
        }

        let host = match resolve_var(ENV_HOST, host) {
            Some(host) => host,
            None => guess_router().to_string(),
        };
        let username = resolve_var(ENV_USERNAME, username)
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = resolve_var(ENV_PASSWORD, password)
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        RouterConfig::new(host, username, password).context("invalid router config")
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> RouterConfig {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_auth_retries(mut self, retries: u32) -> RouterConfig {
        self.auth_retries = retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> RouterConfig {
        self.timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn password(&self) -> &str {
        &self.password
    }
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
    pub fn auth_retries(&self) -> u32 {
        self.auth_retries
    }
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
