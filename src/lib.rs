//! mypets - client core for a pet-management app
//!
//! Remote pet client, favorites and theme stores, and the view-models the
//! screens render from. This library exposes modules for use in the binary
//! and integration tests.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod traits;
pub mod view_model;
