//! Configuration modules for the Acadex API.
//!
//! Each submodule wraps one configuration concern, loaded from environment
//! variables with sensible development defaults.
//!
//! - [`cors`]: allowed origins for browser clients
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: bearer-token signing configuration

pub mod cors;
pub mod database;
pub mod jwt;
