//! Shared types and models for the Jos Marketplace Platform
//!
//! This crate contains types shared between the backend and other
//! components of the system.

pub mod cart;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
