//! Server identity and client configuration.

use std::fmt;
use std::str::FromStr;

use spring83_core::protocol::DEFAULT_SERVER;
use spring83_core::PublicKey;

/// URL scheme used to reach a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Https,
    /// Plain HTTP, for local and mock servers only.
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// A Spring '83 server, identified by its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    host: String,
    scheme: Scheme,
}

impl Server {
    /// A server reached over HTTPS.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            scheme: Scheme::Https,
        }
    }

    /// A server reached over plain HTTP.
    pub fn plaintext(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            scheme: Scheme::Http,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The board URL for a key: `{scheme}://{host}/{lowercase hex key}`.
    pub fn board_url(&self, key: &PublicKey) -> String {
        format!("{}://{}/{}", self.scheme.as_str(), self.host, key.to_hex())
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme.as_str(), self.host)
    }
}

impl FromStr for Server {
    type Err = std::convert::Infallible;

    /// A bare hostname is an HTTPS server. An explicit `http://` or
    /// `https://` prefix selects the scheme.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_end_matches('/');
        Ok(if let Some(host) = s.strip_prefix("http://") {
            Self::plaintext(host)
        } else if let Some(host) = s.strip_prefix("https://") {
            Self::new(host)
        } else {
            Self::new(s)
        })
    }
}

/// Configuration for [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent as `User-Agent` on every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("spring83/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
