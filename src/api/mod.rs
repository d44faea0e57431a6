pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use traits::ListingSource;
pub use types::{ProjectQuery, PropertyQuery, PROPERTY_PAGE_SIZE};
