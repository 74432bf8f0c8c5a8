//! HTTP client construction.
//!
//! Wraps reqwest's builder with:
//! - A bounded request timeout
//! - A small fixed redirect limit
//! - The webdock user agent

use crate::config::{AppConfig, NetworkConfig};
use crate::error::{Result, WebdockError};
use reqwest::{redirect, Client, ClientBuilder};
use std::time::Duration;

/// A client builder with webdock's timeout, redirect and user-agent settings.
///
/// Callers may layer further settings (proxies, for instance) before building.
pub fn client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(redirect::Policy::limited(NetworkConfig::MAX_REDIRECTS))
        .user_agent(AppConfig::USER_AGENT)
}

/// Build the default HTTP client.
pub fn build_client(timeout: Duration) -> Result<Client> {
    client_builder(timeout).build().map_err(|e| WebdockError::Config {
        message: format!("Failed to create HTTP client: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        assert!(build_client(NetworkConfig::FAVICON_TIMEOUT).is_ok());
    }

    #[test]
    fn test_builder_accepts_extra_settings() {
        let client = client_builder(Duration::from_secs(1)).no_proxy().build();
        assert!(client.is_ok());
    }
}
