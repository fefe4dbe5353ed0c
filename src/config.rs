//! Configuration management module

use crate::error::{PrunerError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(PrunerError::Configuration(
                "Username cannot be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(PrunerError::Configuration(
                "Password cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Registry endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub address: String,
    pub timeout: u64,
    pub page_size: u32,
}

impl RegistryConfig {
    pub fn new(address: String) -> Self {
        Self {
            address,
            timeout: 300,
            page_size: 100,
        }
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.address.is_empty() {
            return Err(PrunerError::Configuration(
                "Registry address cannot be empty".to_string(),
            ));
        }

        let url = Url::parse(&self.address).map_err(|e| {
            PrunerError::Configuration(format!("Invalid registry address: {}", e))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(PrunerError::Configuration(format!(
                    "Invalid registry address scheme: {}. Must be http or https",
                    other
                )));
            }
        }

        if self.timeout == 0 {
            return Err(PrunerError::Configuration(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(PrunerError::Configuration(
                "Page size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Prune target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneConfig {
    /// Target repository in `owner/name` form
    pub repository: String,
    /// Number of most recently updated tags to retain
    pub keep: usize,
}

impl PruneConfig {
    pub fn new(repository: String, keep: usize) -> Self {
        Self { repository, keep }
    }

    pub fn validate(&self) -> Result<()> {
        if self.repository.is_empty() {
            return Err(PrunerError::Configuration(
                "Repository cannot be empty".to_string(),
            ));
        }

        let mut parts = self.repository.split('/');
        let owner = parts.next().unwrap_or("");
        let name = parts.next().unwrap_or("");
        if owner.is_empty() || name.is_empty() || parts.next().is_some() {
            return Err(PrunerError::Configuration(format!(
                "Invalid repository: {}. Must be in owner/name form",
                self.repository
            )));
        }

        if self.keep == 0 {
            return Err(PrunerError::Configuration(
                "Retention count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
