use crate::api::error::ApiError;
use crate::api::types::{ProjectQuery, PropertyQuery};
use crate::models::{ContactFormData, ContactResponse, PropertiesResponse, Project};
use async_trait::async_trait;
use tracing::warn;

/// Backend the listing pages and lead forms talk to.
///
/// The `try_` methods surface every failure. `fetch_projects` and
/// `fetch_all_properties` degrade instead: a failed request is logged and
/// turned into an empty result, so callers cannot tell "nothing listed"
/// apart from "request failed".
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn try_fetch_projects(&self, query: ProjectQuery) -> Result<Vec<Project>, ApiError>;

    async fn try_fetch_all_properties(
        &self,
        query: &PropertyQuery,
    ) -> Result<PropertiesResponse, ApiError>;

    /// Post a lead. Rejections carry the server's message.
    async fn submit_contact_form(
        &self,
        form: &ContactFormData,
    ) -> Result<ContactResponse, ApiError>;

    /// Name of the backend, for logs
    fn source_name(&self) -> &str;

    async fn fetch_projects(&self, query: ProjectQuery) -> Vec<Project> {
        match self.try_fetch_projects(query).await {
            Ok(projects) => projects,
            Err(err) => {
                warn!(source = self.source_name(), error = %err, "Error fetching projects");
                Vec::new()
            }
        }
    }

    async fn fetch_all_properties(&self, query: &PropertyQuery) -> PropertiesResponse {
        match self.try_fetch_all_properties(query).await {
            Ok(response) => response,
            Err(err) => {
                warn!(source = self.source_name(), error = %err, "Error fetching properties");
                PropertiesResponse::empty()
            }
        }
    }
}
