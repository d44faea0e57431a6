//! Client for a real-estate brokerage's listing and lead-capture API,
//! plus the view models its listing pages and enquiry forms are built on.

pub mod api;
pub mod config;
pub mod models;
pub mod view;
