//! Registry module for Docker Hub interactions
//!
//! This module provides authentication and client logic for the Hub v2
//! repository API: session login, paginated tag listing, and tag deletion.

pub mod auth;
pub mod client;
pub mod tag;

pub use auth::Auth;
pub use client::{RegistryClient, RegistryClientBuilder};
pub use tag::Tag;
