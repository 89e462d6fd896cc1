// Catalog library crate.
// JSON-file item API with cached stats, its HTTP client, and a terminal browser.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod server;
pub mod state;
pub mod stats;
pub mod store;
pub mod ui;

pub use error::{CatalogError, Result};
