//! HTTP request handlers for the Jos Marketplace Platform

pub mod order;
pub mod product;
pub mod reporting;
pub mod vendor;
