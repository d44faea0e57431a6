use crate::api::error::{ApiError, GENERIC_SUBMIT_FAILURE};
use crate::api::traits::ListingSource;
use crate::api::types::{ProjectQuery, PropertyQuery};
use crate::config::ApiConfig;
use crate::models::{ContactFormData, ContactResponse, PropertiesResponse, Project};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct ProjectsEnvelope {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the brokerage REST API
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Client against the built-in production hosts
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn projects_url(&self, query: ProjectQuery) -> Result<Url, ApiError> {
        self.endpoint("projects", &query.to_query_pairs())
    }

    pub fn properties_url(&self, query: &PropertyQuery) -> Result<Url, ApiError> {
        self.endpoint("properties/all", &query.to_query_pairs())
    }

    pub fn contact_url(&self) -> Result<Url, ApiError> {
        self.endpoint("contact", &[])
    }

    fn endpoint(&self, path: &str, pairs: &[(&'static str, String)]) -> Result<Url, ApiError> {
        let base = self.config.api_base_url.trim_end_matches('/');
        let raw = format!("{base}/{path}");
        let url = if pairs.is_empty() {
            Url::parse(&raw)?
        } else {
            Url::parse_with_params(&raw, pairs.iter().map(|(k, v)| (*k, v.as_str())))?
        };
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
    ) -> Result<T, ApiError> {
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            warn!("{} returned status: {}", endpoint, response.status());
            return Err(ApiError::Status {
                endpoint,
                status: response.status(),
            });
        }

        decode(endpoint, response).await
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await?;
    debug!("Downloaded {} bytes from {}", body.len(), endpoint);
    serde_json::from_slice(&body).map_err(|source| ApiError::Decode { endpoint, source })
}

#[async_trait]
impl ListingSource for ApiClient {
    async fn try_fetch_projects(&self, query: ProjectQuery) -> Result<Vec<Project>, ApiError> {
        let url = self.projects_url(query)?;
        let envelope: ProjectsEnvelope = self.get_json("projects", url).await?;
        info!("Fetched {} projects (page {})", envelope.projects.len(), query.page);
        Ok(envelope.projects)
    }

    async fn try_fetch_all_properties(
        &self,
        query: &PropertyQuery,
    ) -> Result<PropertiesResponse, ApiError> {
        let url = self.properties_url(query)?;
        let response: PropertiesResponse = self.get_json("properties", url).await?;
        info!(
            "Fetched {} of {} properties (page {})",
            response.properties.len(),
            response.total,
            response.page
        );
        Ok(response)
    }

    async fn submit_contact_form(
        &self,
        form: &ContactFormData,
    ) -> Result<ContactResponse, ApiError> {
        let url = self.contact_url()?;
        debug!("Posting contact form to {}", url);

        let response = self.client.post(url).json(form).send().await.map_err(|err| {
            warn!("Error submitting contact form: {}", err);
            ApiError::from(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string());
            warn!("Contact form rejected ({}): {}", status, message);
            return Err(ApiError::Rejected { status, message });
        }

        let accepted: ContactResponse = decode("contact", response).await?;
        info!("Contact form accepted: {}", accepted.message);
        Ok(accepted)
    }

    fn source_name(&self) -> &str {
        "brokerage-api"
    }
}
