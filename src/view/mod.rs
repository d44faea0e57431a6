pub mod cards;
pub mod form;
pub mod format;
pub mod list_state;
pub mod pages;
pub mod pagination;
pub mod whatsapp;

pub use form::{ContactForm, FormError, FormField, FormKind, SubmitStatus};
pub use format::{format_budget, ImageResolver};
pub use list_state::{ListController, ListState, ListView, Listing, StalePolicy, Ticket};
pub use pages::{HomePage, ProjectsSection, PropertyListPage};
pub use pagination::Pagination;
