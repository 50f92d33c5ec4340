//! Client configuration and endpoint resolution.
//!
//! # Design
//! `Environment` parsing is lenient: only the exact string `"mainnet"`
//! selects mainnet, anything else (including an empty string) resolves to
//! devnet rather than failing. Construction of a client therefore never
//! fails on a bad environment name.

use std::fmt;

pub const DEVNET_URL: &str = "https://devnet.overlay.fun";
pub const MAINNET_URL: &str = "https://mainnet.overlay.fun";

/// The Overlay deployment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Devnet,
    Mainnet,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Devnet => "devnet",
            Environment::Mainnet => "mainnet",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Devnet => DEVNET_URL,
            Environment::Mainnet => MAINNET_URL,
        }
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        match value {
            "mainnet" => Environment::Mainnet,
            _ => Environment::Devnet,
        }
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        Environment::from(value.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and deployment selection for an `OverlayClient`.
///
/// Empty keys are allowed; an empty key simply means the matching header is
/// never sent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub auth_key: String,
    pub environment: Environment,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn auth_key(mut self, auth_key: impl Into<String>) -> Self {
        self.auth_key = auth_key.into();
        self
    }

    pub fn environment(mut self, environment: impl Into<Environment>) -> Self {
        self.environment = environment.into();
        self
    }
}

// Keys are redacted so a logged config never leaks credentials.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &redact(&self.api_key))
            .field("auth_key", &redact(&self.auth_key))
            .field("environment", &self.environment)
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
