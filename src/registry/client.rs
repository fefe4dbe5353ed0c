//! Registry client for the Docker Hub repository API
//!
//! Handles communication with the Hub v2 repository endpoints: session
//! login, tag listing, and tag deletion. Listing follows pagination links
//! until the full tag set has been observed.

use crate::config::{AuthConfig, RegistryConfig};
use crate::error::{PrunerError, Result};
use crate::output::OutputManager;
use crate::registry::auth::Auth;
use crate::registry::tag::Tag;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// One page of the tag-listing endpoint
#[derive(Debug, Deserialize)]
struct TagPage {
    next: Option<String>,
    results: Vec<Tag>,
}

pub struct RegistryClientBuilder {
    address: String,
    timeout: u64,
    page_size: u32,
}

impl RegistryClientBuilder {
    pub fn new(address: String) -> Self {
        Self {
            address,
            timeout: 300,
            page_size: 100,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.address.clone())
            .with_timeout(config.timeout)
            .with_page_size(config.page_size)
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn build(self) -> Result<RegistryClient> {
        let base = Url::parse(&self.address)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()
            .map_err(|e| PrunerError::Registry(format!("Failed to create HTTP client: {}", e)))?;

        let auth = Auth::new(client.clone(), base.clone());

        Ok(RegistryClient {
            client,
            base,
            page_size: self.page_size,
            auth,
            token: None,
        })
    }
}

pub struct RegistryClient {
    client: Client,
    base: Url,
    page_size: u32,
    auth: Auth,
    token: Option<String>,
}

impl RegistryClient {
    /// Log in with the given credentials and keep the session token for
    /// subsequent requests.
    pub async fn authenticate(
        &mut self,
        auth_config: &AuthConfig,
        output: &OutputManager,
    ) -> Result<()> {
        let token = self
            .auth
            .login(&auth_config.username, &auth_config.password, output)
            .await?;
        self.token = Some(token);
        Ok(())
    }

    /// Fetch every tag of the repository, following `next` links until the
    /// listing is exhausted.
    pub async fn list_tags(&self, repository: &str, output: &OutputManager) -> Result<Vec<Tag>> {
        let mut url = self
            .base
            .join(&format!("v2/repositories/{}/tags/", repository))?;
        url.query_pairs_mut()
            .append_pair("page_size", &self.page_size.to_string());

        let mut tags = Vec::new();
        let mut next = Some(url);
        let mut page_number = 0usize;

        while let Some(page_url) = next {
            page_number += 1;
            output.detail(&format!("Fetching tag page {}: {}", page_number, page_url));

            let response = self.authorized(self.client.get(page_url)).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(self.listing_error(repository, status, response).await);
            }

            let page: TagPage = response.json().await.map_err(|e| {
                PrunerError::Parse(format!("Failed to parse tag list response: {}", e))
            })?;

            tags.extend(page.results);
            next = match page.next {
                Some(link) => Some(Url::parse(&link)?),
                None => None,
            };
        }

        output.verbose(&format!(
            "Listed {} tags in {} page(s) for {}",
            tags.len(),
            page_number,
            repository
        ));

        Ok(tags)
    }

    /// Issue a delete request for one tag. Each deletion is independent;
    /// there is no transactional grouping or rollback.
    pub async fn delete_tag(
        &self,
        repository: &str,
        tag_name: &str,
        output: &OutputManager,
    ) -> Result<()> {
        let url = self
            .base
            .join(&format!("v2/repositories/{}/tags/{}/", repository, tag_name))?;

        output.detail(&format!("Deleting tag: {}", url));

        let response = self.authorized(self.client.delete(url)).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match status {
            StatusCode::UNAUTHORIZED => "session token rejected".to_string(),
            StatusCode::FORBIDDEN => "insufficient permissions".to_string(),
            StatusCode::NOT_FOUND => "tag not found (already deleted?)".to_string(),
            _ => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error response".to_string());
                format!("status {}: {}", status, error_text)
            }
        };

        Err(PrunerError::Deletion {
            tag: tag_name.to_string(),
            message,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, format!("JWT {}", token)),
            None => request,
        }
    }

    async fn listing_error(
        &self,
        repository: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> PrunerError {
        match status {
            StatusCode::UNAUTHORIZED => PrunerError::Authentication(format!(
                "Session token rejected while listing tags for {}",
                repository
            )),
            StatusCode::NOT_FOUND => {
                PrunerError::Registry(format!("Repository not found: {}", repository))
            }
            _ => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error response".to_string());
                PrunerError::Registry(format!(
                    "Failed to list tags for {} with status {}: {}",
                    repository, status, error_text
                ))
            }
        }
    }
}
