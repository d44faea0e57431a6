use crate::api::{ListingSource, ProjectQuery, PropertyQuery, PROPERTY_PAGE_SIZE};
use crate::models::{PropertiesResponse, PropertyCategory};
use crate::view::cards::{grid, project_card, property_card, ProjectImageStyle};
use crate::view::form::{ContactForm, FormKind};
use crate::view::format::ImageResolver;
use crate::view::list_state::{ListController, ListState, ListView, ProjectList, PropertyList, StalePolicy};
use crate::view::pagination::Pagination;
use std::fmt::Write;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

pub const PROJECTS_FAILED: &str = "Failed to load projects. Please try again later.";
pub const PROPERTIES_FAILED: &str = "Failed to load properties. Please try again later.";

/// Grid of project cards (home page teaser and the products page)
pub struct ProjectsSection {
    query: ProjectQuery,
    style: ProjectImageStyle,
    images: ImageResolver,
    list: ProjectList,
}

impl ProjectsSection {
    pub fn new(query: ProjectQuery, style: ProjectImageStyle, images: ImageResolver) -> Self {
        Self {
            query,
            style,
            images,
            list: ListController::new(ListState::new(PROJECTS_FAILED)),
        }
    }

    /// Three projects, gallery images, linking to their property lists
    pub fn home(images: ImageResolver) -> Self {
        Self::new(ProjectQuery::default(), ProjectImageStyle::Gallery, images)
    }

    /// Six projects, cover images, linking to the project pages
    pub fn products(images: ImageResolver) -> Self {
        Self::new(ProjectQuery { page: 1, limit: 6 }, ProjectImageStyle::Cover, images)
    }

    pub fn list(&self) -> &ProjectList {
        &self.list
    }

    pub async fn refresh<S: ListingSource + ?Sized>(&self, source: &S) -> bool {
        self.list.load(source.try_fetch_projects(self.query)).await
    }

    pub fn render(&self) -> String {
        self.list.with(|state| match state.view() {
            ListView::Loading => "Loading projects...".to_string(),
            ListView::Failed(message) => message.to_string(),
            ListView::Empty => "No Projects Found".to_string(),
            ListView::Ready(projects) => grid(
                projects
                    .iter()
                    .map(|project| project_card(project, &self.images, self.style)),
            ),
        })
    }
}

/// Filters driving a property listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFilters {
    pub category: Option<PropertyCategory>,
    pub page: u32,
    pub project_id: Option<String>,
}

impl PropertyFilters {
    fn project(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Filterable, paginated property listing.
pub struct PropertyListPage {
    filters: PropertyFilters,
    limit: u32,
    /// Cards shown at most; the home page teaser only shows three.
    max_cards: Option<usize>,
    paginated: bool,
    images: ImageResolver,
    list: PropertyList,
}

impl PropertyListPage {
    pub fn new(images: ImageResolver, project_id: Option<String>) -> Self {
        Self {
            filters: PropertyFilters {
                category: None,
                page: 1,
                project_id,
            },
            limit: PROPERTY_PAGE_SIZE,
            max_cards: None,
            paginated: true,
            images,
            list: ListController::new(ListState::new(PROPERTIES_FAILED)),
        }
    }

    /// First page only, three cards, no pagination controls
    pub fn featured(images: ImageResolver) -> Self {
        Self {
            max_cards: Some(3),
            paginated: false,
            ..Self::new(images, None)
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.list = ListController::new(ListState::new(PROPERTIES_FAILED).with_policy(policy));
        self
    }

    pub fn filters(&self) -> &PropertyFilters {
        &self.filters
    }

    pub fn list(&self) -> &PropertyList {
        &self.list
    }

    /// Change the category filter; always returns to page one.
    pub fn select_category(&mut self, category: Option<PropertyCategory>) {
        self.filters.category = category;
        self.filters.page = 1;
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.filters.page = page.max(1);
    }

    pub fn next_page(&mut self) -> bool {
        match self.pagination().and_then(|p| p.next_page()) {
            Some(page) => {
                self.filters.page = page;
                true
            }
            None => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        match self.pagination().and_then(|p| p.previous_page()) {
            Some(page) => {
                self.filters.page = page;
                true
            }
            None => false,
        }
    }

    pub fn query(&self) -> PropertyQuery {
        PropertyQuery::page(self.filters.page, self.limit)
            .with_category(self.filters.category)
            .with_project(self.filters.project().map(str::to_string))
    }

    pub async fn refresh<S: ListingSource + ?Sized>(&self, source: &S) -> bool {
        let query = self.query();
        debug!(?query, "Loading properties");
        self.list.load(source.try_fetch_all_properties(&query)).await
    }

    /// Start a load now and finish it on the runtime, the way a UI event
    /// handler fires a fetch without waiting for it.
    pub fn spawn_refresh<S>(&self, source: Arc<S>) -> JoinHandle<bool>
    where
        S: ListingSource + ?Sized + 'static,
    {
        let query = self.query();
        let list = self.list.clone();
        let ticket = list.begin();
        debug!(?query, ticket = ticket.sequence(), "Spawning property load");
        tokio::spawn(async move {
            let result = source.try_fetch_all_properties(&query).await;
            list.resolve(ticket, result)
        })
    }

    fn total(&self) -> Option<u64> {
        self.list.with(|state| state.data().map(|data| data.total))
    }

    pub fn pagination(&self) -> Option<Pagination> {
        if !self.paginated {
            return None;
        }
        self.total()
            .map(|total| Pagination::new(self.filters.page, self.limit, total))
    }

    pub fn title(&self) -> String {
        self.list.with(|state| page_title(&self.filters, state.data()))
    }

    pub fn empty_message(&self) -> String {
        match (self.filters.category, self.filters.project()) {
            (Some(category), _) => format!("No {category} Properties Found"),
            (None, Some(_)) => "No Properties Found for Project".to_string(),
            (None, None) => "No Properties Found".to_string(),
        }
    }

    /// Listing body: loading line, error, empty message or the card grid.
    pub fn render_body(&self) -> String {
        self.list.with(|state| match state.view() {
            ListView::Loading => "Loading properties...".to_string(),
            ListView::Failed(message) => message.to_string(),
            ListView::Empty => self.empty_message(),
            ListView::Ready(response) => grid(
                response
                    .properties
                    .iter()
                    .take(self.max_cards.unwrap_or(usize::MAX))
                    .map(|property| property_card(property, &self.images)),
            ),
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title());
        if self.paginated {
            let _ = writeln!(out, "{} properties found", self.total().unwrap_or(0));
        }
        let _ = writeln!(out);
        out.push_str(&self.render_body());
        if let Some(pagination) = self.pagination().filter(Pagination::is_visible) {
            let _ = write!(out, "\n\n{}", pagination.render());
        }
        out
    }
}

fn page_title(filters: &PropertyFilters, data: Option<&PropertiesResponse>) -> String {
    let Some(data) = data else {
        return "Property List".to_string();
    };
    let empty = data.properties.is_empty();
    match (filters.project(), filters.category) {
        (Some(_), _) if !empty => {
            let name = data
                .properties
                .first()
                .and_then(|p| p.project_id.as_ref())
                .map(|p| p.project_name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or("Project");
            format!("Properties in {name}")
        }
        (Some(_), _) => "No Properties Found for Project".to_string(),
        (None, Some(category)) if empty => format!("No {category} Properties Found"),
        (None, Some(category)) => format!("{category} Properties"),
        (None, None) => "Property List".to_string(),
    }
}

/// Category buttons; the active one is bracketed.
pub fn render_category_filter(selected: Option<PropertyCategory>) -> String {
    let mut labels = vec![if selected.is_none() { "[All]".to_string() } else { "All".to_string() }];
    labels.extend(PropertyCategory::ALL.iter().map(|category| {
        if Some(*category) == selected {
            format!("[{category}]")
        } else {
            category.to_string()
        }
    }));
    labels.join("  ")
}

/// Landing page: project teaser, featured properties and the enquiry form
pub struct HomePage {
    pub projects: ProjectsSection,
    pub properties: PropertyListPage,
    pub form: ContactForm,
}

impl HomePage {
    pub fn new(images: ImageResolver) -> Self {
        Self {
            projects: ProjectsSection::home(images.clone()),
            properties: PropertyListPage::featured(images),
            form: ContactForm::new(FormKind::Home),
        }
    }

    /// Load both sections side by side.
    pub async fn refresh<S: ListingSource + ?Sized>(&self, source: &S) {
        tokio::join!(self.projects.refresh(source), self.properties.refresh(source));
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== Our Projects ==");
        let _ = writeln!(out, "{}", self.projects.render());
        let _ = writeln!(out);
        let _ = writeln!(out, "== Find the Right Properties ==");
        let _ = writeln!(
            out,
            "{}",
            render_category_filter(self.properties.filters().category)
        );
        let _ = writeln!(out);
        out.push_str(&self.properties.render_body());
        if let Some(status) = self.form.render_status() {
            let _ = write!(out, "\n\n{status}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Property, ProjectRef};

    fn resolver() -> ImageResolver {
        ImageResolver::new("https://assets.example")
    }

    fn property(id: &str, project: Option<&str>) -> Property {
        Property {
            id: id.into(),
            property_name: format!("Unit {id}"),
            budget: 1_500_000,
            location: "Vadodara".into(),
            category: PropertyCategory::Residential,
            property_area: "900 sqft".into(),
            measurement_unit: None,
            project_id: project.map(|name| ProjectRef {
                id: "prj1".into(),
                project_name: name.into(),
            }),
            image_url: None,
            is_active: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    fn envelope(total: u64, properties: Vec<Property>) -> PropertiesResponse {
        PropertiesResponse {
            total,
            page: 1,
            limit: 10,
            count: properties.len() as u64,
            properties,
        }
    }

    async fn settle(page: &PropertyListPage, data: PropertiesResponse) {
        page.list()
            .load(async move { Ok::<_, String>(data) })
            .await;
    }

    #[tokio::test]
    async fn empty_commercial_listing_message() {
        let mut page = PropertyListPage::new(resolver(), None);
        page.select_category(Some(PropertyCategory::Commercial));
        settle(&page, envelope(0, vec![])).await;

        assert_eq!(page.render_body(), "No Commercial Properties Found");
        assert_eq!(page.title(), "No Commercial Properties Found");
    }

    #[tokio::test]
    async fn project_titles() {
        let page = PropertyListPage::new(resolver(), Some("prj1".into()));
        settle(&page, envelope(1, vec![property("a", Some("Skyline"))])).await;
        assert_eq!(page.title(), "Properties in Skyline");

        let page = PropertyListPage::new(resolver(), Some("prj1".into()));
        settle(&page, envelope(0, vec![])).await;
        assert_eq!(page.title(), "No Properties Found for Project");
        assert_eq!(page.render_body(), "No Properties Found for Project");
    }

    #[tokio::test]
    async fn default_and_category_titles() {
        let mut page = PropertyListPage::new(resolver(), None);
        assert_eq!(page.title(), "Property List");
        assert_eq!(page.render_body(), "Loading properties...");

        page.select_category(Some(PropertyCategory::Residential));
        settle(&page, envelope(1, vec![property("a", None)])).await;
        assert_eq!(page.title(), "Residential Properties");
    }

    #[tokio::test]
    async fn failed_load_shows_page_error() {
        let page = PropertyListPage::new(resolver(), None);
        page.list()
            .load(async { Err::<PropertiesResponse, _>("timed out") })
            .await;
        assert_eq!(page.render_body(), PROPERTIES_FAILED);
    }

    #[tokio::test]
    async fn paging_follows_total() {
        let mut page = PropertyListPage::new(resolver(), None);
        settle(&page, envelope(25, (0..10).map(|i| property(&i.to_string(), None)).collect())).await;

        assert!(!page.previous_page());
        assert!(page.next_page());
        assert!(page.next_page());
        assert_eq!(page.filters().page, 3);
        assert!(!page.next_page());
        assert!(page.render().contains("[Previous]  Page 3 of 3  (Next)"));

        page.select_category(Some(PropertyCategory::Industrial));
        assert_eq!(page.filters().page, 1);
    }

    #[tokio::test]
    async fn featured_section_shows_three_cards_without_controls() {
        let page = PropertyListPage::featured(resolver());
        settle(&page, envelope(25, (0..10).map(|i| property(&i.to_string(), None)).collect())).await;

        let body = page.render_body();
        assert_eq!(body.matches("Enquire:").count(), 3);
        assert!(page.pagination().is_none());
    }

    #[test]
    fn query_reflects_filters() {
        let mut page = PropertyListPage::new(resolver(), Some(String::new()));
        page.select_category(Some(PropertyCategory::Agricultural));
        page.go_to_page(0);

        let query = page.query();
        assert_eq!(query.page, 1);
        assert_eq!(query.category, Some(PropertyCategory::Agricultural));
        assert_eq!(query.project_id, None);
    }

    #[test]
    fn category_filter_marks_selection() {
        assert_eq!(
            render_category_filter(None),
            "[All]  Residential  Commercial  Industrial  Agricultural"
        );
        assert!(render_category_filter(Some(PropertyCategory::Commercial)).contains("[Commercial]"));
    }

    #[tokio::test]
    async fn empty_projects_section() {
        let section = ProjectsSection::products(resolver());
        section.list().load(async { Ok::<_, String>(vec![]) }).await;
        assert_eq!(section.render(), "No Projects Found");
    }
}
