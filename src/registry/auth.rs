//! Authentication module for Docker Hub access

use crate::error::{PrunerError, Result};
use crate::output::OutputManager;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Clone)]
pub struct Auth {
    client: Client,
    base: Url,
}

impl Auth {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Establish an authenticated session against the Hub account API.
    ///
    /// Returns the session token (a JWT) attached to subsequent requests.
    /// Rejected or missing credentials are fatal; there is no retry.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        output: &OutputManager,
    ) -> Result<String> {
        output.verbose(&format!("Attempting authentication for user: {}", username));

        let url = self.base.join("v2/users/login/")?;
        let body = LoginRequest { username, password };

        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        if status.is_success() {
            let login: LoginResponse = response.json().await.map_err(|e| {
                PrunerError::Parse(format!("Failed to parse login response: {}", e))
            })?;

            output.detail(&format!("Token obtained (length: {} chars)", login.token.len()));
            output.success("Authentication token obtained successfully");
            Ok(login.token)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            output.error(&format!(
                "Login request failed with status {}: {}",
                status, error_text
            ));

            Err(PrunerError::Authentication(format!(
                "Authentication failed with status: {}",
                status
            )))
        }
    }
}
