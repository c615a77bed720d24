//! Connection parameters for a Vexata array

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// How the server certificate is verified
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TlsVerification {
    /// Verify against the bundled webpki root store
    #[default]
    Verify,
    /// Verify against the PEM certificate(s) found at this path.
    /// The path may be a single PEM file or a directory of PEM files.
    VerifyWith(PathBuf),
    /// Accept any certificate (self-signed arrays)
    Disabled,
}

/// Configuration options for the Vexata API client
#[derive(Clone)]
pub struct ClientConfig {
    /// Hostname or IP of the array management interface
    pub host: String,
    /// HTTPS port, `None` for the default (443)
    pub port: Option<u16>,
    /// Array management username
    pub username: String,
    /// Array management password
    pub password: String,
    /// Certificate verification policy (default: [`TlsVerification::Verify`])
    pub tls: TlsVerification,
    /// Request timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            tls: TlsVerification::Verify,
            timeout_ms: 30000,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls", &self.tls)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Load the configuration from `VEXATA_*` environment variables.
    ///
    /// `VEXATA_HOST`, `VEXATA_USER` and `VEXATA_PASSWORD` are required.
    /// `VEXATA_PORT`, `VEXATA_TIMEOUT_MS`, `VEXATA_CERT_PATH` and
    /// `VEXATA_VERIFY_CERT` are optional; unparsable values fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let host = required_var("VEXATA_HOST")?;
        let username = required_var("VEXATA_USER")?;
        let password = required_var("VEXATA_PASSWORD")?;

        let port = env::var("VEXATA_PORT")
            .ok()
            .and_then(|s| s.trim().parse::<u16>().ok());

        let timeout_ms = env::var("VEXATA_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(30000);

        let verify = env::var("VEXATA_VERIFY_CERT")
            .map(|s| parse_bool(&s).unwrap_or(true))
            .unwrap_or(true);

        let tls = if !verify {
            TlsVerification::Disabled
        } else {
            match env::var("VEXATA_CERT_PATH") {
                Ok(path) if !path.trim().is_empty() => {
                    TlsVerification::VerifyWith(PathBuf::from(path))
                }
                _ => TlsVerification::Verify,
            }
        };

        Ok(ClientConfig {
            host,
            port,
            username,
            password,
            tls,
            timeout_ms,
        })
    }

    /// Reject descriptors without host or credentials
    pub(crate) fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("host must be set".to_string()));
        }
        if self.username.is_empty() {
            return Err(Error::Config("username must be set".to_string()));
        }
        if self.password.is_empty() {
            return Err(Error::Config("password must be set".to_string()));
        }
        Ok(())
    }
}

fn required_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "{} environment variable must be set",
            name
        ))),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
