//! # ib-core
//!
//! Core types, traits, and utilities for the infobase query layer.
//!
//! This crate provides the foundational building blocks used by the other crates:
//! - Common error types
//! - Result type aliases
//! - The raw value model and datatype names
//! - Collaborator traits (schema store, schema type, type mapping)
//! - An in-memory schema store
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod types;
pub mod store;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use types::*;
pub use store::*;
pub use config::QueryConfig;
