//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelCapabilities`]: what a model is called and how capable it is
//! - [`error::ValidationError`]: payload validation failures
//! - [`string::truncate`]: UTF-8 safe truncation

pub mod error;
pub mod model;
pub mod string;
