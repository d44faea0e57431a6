use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gallery image attached to a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectImage {
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(rename = "_id", default)]
    pub id: String,
}

/// A real-estate development grouping multiple properties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_budget")]
    pub budget: i64,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_type: String,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
    #[serde(default)]
    pub is_active: bool,
}

/// Category a property is listed under
///
/// Labels the API sends outside the four known ones decode as `Other`, which
/// is never offered as a filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub enum PropertyCategory {
    Residential,
    Commercial,
    Industrial,
    Agricultural,
    Other,
}

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 4] = [
        PropertyCategory::Residential,
        PropertyCategory::Commercial,
        PropertyCategory::Industrial,
        PropertyCategory::Agricultural,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Residential => "Residential",
            PropertyCategory::Commercial => "Commercial",
            PropertyCategory::Industrial => "Industrial",
            PropertyCategory::Agricultural => "Agricultural",
            PropertyCategory::Other => "Other",
        }
    }

    /// Parse a filter label; "All" (or blank) means no category filter.
    pub fn from_filter(label: &str) -> Result<Option<Self>, UnknownCategory> {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        label.parse().map(Some)
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PropertyCategory {
    fn from(label: String) -> Self {
        label.parse().unwrap_or(PropertyCategory::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for PropertyCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Back-reference from a property to its owning project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub project_name: String,
}

/// An individual listed unit or parcel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    pub property_name: String,
    #[serde(default, deserialize_with = "lenient_budget")]
    pub budget: i64,
    #[serde(default)]
    pub location: String,
    pub category: PropertyCategory,
    /// Value and unit together, e.g. "1500 sqft"
    #[serde(default)]
    pub property_area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Budgets arrive as integers, but fractional numbers, numeric strings and
/// nulls are accepted too. Fractions round; anything unreadable becomes 0.
fn lenient_budget<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBudget {
        Whole(i64),
        Fraction(f64),
        Text(String),
    }

    Ok(match Option::<RawBudget>::deserialize(deserializer)? {
        Some(RawBudget::Whole(value)) => value,
        Some(RawBudget::Fraction(value)) => value.round() as i64,
        Some(RawBudget::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(|value| value.round() as i64)
            .unwrap_or(0),
        None => 0,
    })
}

/// Paginated envelope returned by the property listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertiesResponse {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub count: u64,
    pub properties: Vec<Property>,
}

impl PropertiesResponse {
    /// Zeroed envelope used when a listing request fails.
    pub fn empty() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: 10,
            count: 0,
            properties: Vec::new(),
        }
    }
}

/// Lead payload shared by the contact and enquiry forms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub budget: i64,
    pub location: String,
}

/// Contact record as persisted by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub budget: i64,
    pub location: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "__v", default)]
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactResponse {
    pub message: String,
    pub contact: ContactRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn property_decodes_api_field_names() {
        let property: Property = serde_json::from_value(json!({
            "_id": "p1",
            "propertyName": "Sea View 2BHK",
            "budget": 4500000,
            "location": "Vadodara",
            "category": "Residential",
            "propertyArea": "1200 sqft",
            "projectId": { "_id": "prj1", "projectName": "Skyline" },
            "imageUrl": "/uploads/properties/p1.jpg",
            "isActive": true,
            "createdAt": "2024-05-01T10:00:00.000Z"
        }))
        .expect("property decodes");

        assert_eq!(property.property_name, "Sea View 2BHK");
        assert_eq!(property.category, PropertyCategory::Residential);
        assert_eq!(
            property.project_id.as_ref().map(|p| p.project_name.as_str()),
            Some("Skyline")
        );
        assert_eq!(property.measurement_unit, None);
        assert!(property.created_at.is_some());
        assert!(property.updated_at.is_none());
    }

    #[test]
    fn project_without_images_decodes_to_empty_gallery() {
        let project: Project = serde_json::from_value(json!({
            "_id": "prj1",
            "projectName": "Skyline",
            "budget": 9000000,
            "city": "Surat",
            "category": "Residential",
            "subType": "Apartments",
            "isActive": true
        }))
        .expect("project decodes");

        assert!(project.images.is_empty());
        assert_eq!(project.sub_type, "Apartments");
        assert_eq!(project.image_url, None);
    }

    #[test]
    fn category_filter_labels() {
        assert_eq!(PropertyCategory::from_filter("All"), Ok(None));
        assert_eq!(PropertyCategory::from_filter(""), Ok(None));
        assert_eq!(
            PropertyCategory::from_filter("commercial"),
            Ok(Some(PropertyCategory::Commercial))
        );
        assert!(PropertyCategory::from_filter("Castle").is_err());
    }

    #[test]
    fn odd_records_do_not_sink_the_page() {
        let page: PropertiesResponse = serde_json::from_value(json!({
            "total": 3,
            "page": 1,
            "limit": 10,
            "count": 3,
            "properties": [
                { "_id": "a", "propertyName": "Plot 7", "budget": 1250000.6, "category": "Plot" },
                { "_id": "b", "propertyName": "Shop 2", "budget": "3400000", "category": "commercial" },
                { "_id": "c", "propertyName": "Barn", "budget": null, "category": "Agricultural" }
            ]
        }))
        .expect("page decodes");

        let decoded: Vec<_> = page
            .properties
            .iter()
            .map(|p| (p.budget, p.category))
            .collect();
        assert_eq!(
            decoded,
            vec![
                (1_250_001, PropertyCategory::Other),
                (3_400_000, PropertyCategory::Commercial),
                (0, PropertyCategory::Agricultural),
            ]
        );
    }

    #[test]
    fn other_category_is_not_a_filter() {
        assert!(!PropertyCategory::ALL.contains(&PropertyCategory::Other));
        assert!(PropertyCategory::from_filter("Other").is_err());
    }

    #[test]
    fn empty_envelope_is_zeroed() {
        let empty = PropertiesResponse::empty();
        assert_eq!(
            serde_json::to_value(&empty).expect("serializes"),
            json!({ "total": 0, "page": 1, "limit": 10, "count": 0, "properties": [] })
        );
    }
}
