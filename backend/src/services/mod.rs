//! Business logic services for the Jos Marketplace Platform

pub mod order;
pub mod product;
pub mod reporting;
pub mod vendor;

pub use order::OrderService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use vendor::VendorService;
