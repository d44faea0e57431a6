use crate::models::{Project, Property};

/// Image shown when a record carries none
pub const PLACEHOLDER_IMAGE: &str = "/banner.jpg";

/// Rupee amount with Indian digit grouping and no decimals.
///
/// `1500000` becomes `₹15,00,000`.
pub fn format_budget(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits, then pairs: 12345678 -> 1,23,45,678
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Resolves the two image conventions the API uses: absolute gallery URLs on
/// projects, and host-relative paths on properties and project covers.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    asset_base_url: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(asset_base_url: impl Into<String>) -> Self {
        Self {
            asset_base_url: asset_base_url.into().trim_end_matches('/').to_string(),
            placeholder: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn property_image(&self, property: &Property) -> String {
        self.relative(property.image_url.as_deref())
    }

    pub fn project_cover(&self, project: &Project) -> String {
        self.relative(project.image_url.as_deref())
    }

    /// First gallery image, used as-is.
    pub fn project_gallery(&self, project: &Project) -> String {
        project
            .images
            .first()
            .map(|image| image.url.clone())
            .unwrap_or_else(|| self.placeholder.clone())
    }

    fn relative(&self, path: Option<&str>) -> String {
        match path.filter(|path| !path.is_empty()) {
            Some(path) => format!("{}{}", self.asset_base_url, path),
            None => self.placeholder.clone(),
        }
    }
}
