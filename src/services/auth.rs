//! Auth service client
//!
//! The identity provider is an external collaborator consumed over HTTP:
//! it resolves a bearer token to an identity and handles sign-out. No auth
//! logic lives here beyond request/response plumbing.

use std::time::Duration;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::AuthConfig;
use crate::utils::errors::{AuthError, CampusHubError, Result};
use crate::utils::logging::log_api_error;

/// Identity returned by the auth service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthIdentity {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthIdentity {
    /// Display name falls back to the email local part
    pub fn resolved_name(&self) -> String {
        if let Some(name) = &self.display_name {
            if !name.is_empty() {
                return name.clone();
            }
        }
        self.email
            .split('@')
            .next()
            .unwrap_or(&self.email)
            .to_string()
    }
}

/// HTTP client for the external auth service
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    config: AuthConfig,
}

impl AuthClient {
    /// Create a new AuthClient instance
    pub fn new(config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("CampusHub/1.0")
            .build()
            .map_err(CampusHubError::Http)?;

        Ok(Self { client, config })
    }

    /// Resolve the current identity for a bearer token
    pub async fn current_user(&self, token: &str) -> Result<AuthIdentity> {
        let url = format!("{}/user", self.config.api_url);
        debug!(url = %url, "Resolving identity");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CampusHubError::AuthService(AuthError::Timeout)
                } else {
                    CampusHubError::AuthService(AuthError::RequestFailed(e.to_string()))
                }
            })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(CampusHubError::AuthService(AuthError::NoSession));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log_api_error("auth", &format!("HTTP {}", status), Some("current_user"));
            return Err(CampusHubError::AuthService(AuthError::RequestFailed(
                format!("HTTP {}: {}", status, body),
            )));
        }

        let identity: AuthIdentity = response
            .json()
            .await
            .map_err(|e| CampusHubError::AuthService(AuthError::InvalidResponse(e.to_string())))?;

        debug!(user_id = identity.id, "Identity resolved");
        Ok(identity)
    }

    /// Sign the token out on the auth service
    pub async fn sign_out(&self, token: &str) -> Result<()> {
        let url = format!("{}/signout", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CampusHubError::AuthService(AuthError::RequestFailed(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(CampusHubError::AuthService(AuthError::RequestFailed(
                format!("HTTP {}", status),
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_deserialization() {
        let json = r#"{"id": 7, "email": "sam@campus.edu", "display_name": "Sam"}"#;
        let identity: AuthIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, 7);
        assert_eq!(identity.resolved_name(), "Sam");
    }

    #[test]
    fn test_resolved_name_falls_back_to_email_local_part() {
        let identity = AuthIdentity {
            id: 7,
            email: "sam@campus.edu".to_string(),
            display_name: None,
        };
        assert_eq!(identity.resolved_name(), "sam");

        let identity = AuthIdentity {
            id: 7,
            email: "sam@campus.edu".to_string(),
            display_name: Some(String::new()),
        };
        assert_eq!(identity.resolved_name(), "sam");
    }
}
