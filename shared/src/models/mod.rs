//! Domain models for the Jos Marketplace Platform

mod order;
mod product;
mod vendor;

pub use order::*;
pub use product::*;
pub use vendor::*;
