use crate::models::{Project, Property};
use crate::view::format::{format_budget, ImageResolver};
use std::fmt::Write;

/// Which project image convention a grid uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectImageStyle {
    /// First absolute gallery URL; cards link to the project's property list
    Gallery,
    /// Host-relative cover image; cards link to the project page
    Cover,
}

pub fn property_card(property: &Property, images: &ImageResolver) -> String {
    let mut card = String::new();
    let _ = writeln!(card, "{}", property.property_name);
    let _ = writeln!(card, "  Location: {}", property.location);
    let _ = writeln!(card, "  Budget:   {}", format_budget(property.budget));
    let _ = writeln!(card, "  Area:     {}", property.property_area);
    let _ = writeln!(card, "  Category: {}", property.category);
    if let Some(project) = &property.project_id {
        let name = if project.project_name.is_empty() {
            "N/A"
        } else {
            project.project_name.as_str()
        };
        let _ = writeln!(card, "  Project:  {}", name);
    }
    let _ = writeln!(card, "  Image:    {}", images.property_image(property));
    let _ = write!(card, "  Enquire:  /enquirenow");
    card
}

pub fn project_card(project: &Project, images: &ImageResolver, style: ProjectImageStyle) -> String {
    let (image, link) = match style {
        ProjectImageStyle::Gallery => (
            images.project_gallery(project),
            format!("/propertylist?projectId={}", project.id),
        ),
        ProjectImageStyle::Cover => (
            images.project_cover(project),
            format!("/projects/{}", project.id),
        ),
    };

    let mut card = String::new();
    let _ = writeln!(card, "{}", project.project_name);
    let _ = writeln!(card, "  City:     {}", project.city);
    let _ = writeln!(card, "  Category: {}", project.category);
    let _ = writeln!(card, "  Image:    {}", image);
    let _ = write!(card, "  Link:     {}", link);
    card
}

/// Cards separated by blank lines
pub fn grid<I: IntoIterator<Item = String>>(cards: I) -> String {
    cards.into_iter().collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectRef, PropertyCategory};

    fn property(project: Option<ProjectRef>) -> Property {
        Property {
            id: "p1".into(),
            property_name: "Corner Shop".into(),
            budget: 2_500_000,
            location: "Alkapuri".into(),
            category: PropertyCategory::Commercial,
            property_area: "450 sqft".into(),
            measurement_unit: Some("sqft".into()),
            project_id: project,
            image_url: Some("/uploads/properties/shop.jpg".into()),
            is_active: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn property_card_layout() {
        let images = ImageResolver::new("https://assets.example");
        let card = property_card(
            &property(Some(ProjectRef {
                id: "prj1".into(),
                project_name: "Market Square".into(),
            })),
            &images,
        );

        assert!(card.starts_with("Corner Shop\n"));
        assert!(card.contains("Budget:   ₹25,00,000"));
        assert!(card.contains("Category: Commercial"));
        assert!(card.contains("Project:  Market Square"));
        assert!(card.contains("Image:    https://assets.example/uploads/properties/shop.jpg"));
    }

    #[test]
    fn project_badge_omitted_without_project() {
        let images = ImageResolver::new("https://assets.example");
        assert!(!property_card(&property(None), &images).contains("Project:"));
    }
}
