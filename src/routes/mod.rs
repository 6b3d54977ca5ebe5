//! Route handlers for the cafe API
//!
//! Organized by resource type:
//! - cafes: The cafe table (random pick, listing, search, add, price update, delete)
//! - health: Health check endpoint
//! - home: Static landing page

pub mod cafes;
pub mod health;
pub mod home;

pub use cafes::*;
pub use health::*;
pub use home::*;
