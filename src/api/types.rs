use crate::models::PropertyCategory;
use serde::{Deserialize, Serialize};

/// Page size used by every property listing
pub const PROPERTY_PAGE_SIZE: u32 = 10;

/// Parameters for the paginated project listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectQuery {
    pub page: u32,
    pub limit: u32,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self { page: 1, limit: 3 }
    }
}

impl ProjectQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("limit", self.limit.to_string())]
    }
}

/// Parameters for the paginated property listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyQuery {
    pub page: u32,
    pub limit: u32,
    pub category: Option<PropertyCategory>,
    /// Restrict to one project; an empty id counts as no filter
    pub project_id: Option<String>,
}

impl Default for PropertyQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PROPERTY_PAGE_SIZE,
            category: None,
            project_id: None,
        }
    }
}

impl PropertyQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Option<PropertyCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_project(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id;
        self
    }

    /// Project filter, if one is actually set.
    pub fn project_filter(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.is_empty())
    }

    /// `page` and `limit` always; `category` and `projectId` only when set.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(project_id) = self.project_filter() {
            pairs.push(("projectId", project_id.to_string()));
        }
        pairs
    }
}
