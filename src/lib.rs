//! cafe-api: REST API for a cafe directory
//!
//! Serves and mutates records of a single `cafe` table in SQLite: random
//! pick, location search, full listing, form-based creation, coffee-price
//! updates and key-protected deletion.

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use db::Database;
pub use error::{ApiError, ApiResult};
pub use server::{create_router, run_server, ServerArgs};
pub use state::AppState;
