//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product listed by a vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub vendor_id: Uuid,
    /// Denormalized for listing cards
    pub vendor_name: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: ProductCategory,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<String>,
    pub dimensions: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub tags: Option<String>,
    /// Embedded data URI or plain URL
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fixed product category list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Clothing,
    Jewelry,
    Accessories,
    HomeDecor,
    Electronics,
    FoodAndBeverages,
    BeautyAndHealth,
    SportsAndFitness,
    BooksAndMedia,
    ToysAndGames,
    Other,
}

impl ProductCategory {
    pub const ALL: &'static [ProductCategory] = &[
        ProductCategory::Clothing,
        ProductCategory::Jewelry,
        ProductCategory::Accessories,
        ProductCategory::HomeDecor,
        ProductCategory::Electronics,
        ProductCategory::FoodAndBeverages,
        ProductCategory::BeautyAndHealth,
        ProductCategory::SportsAndFitness,
        ProductCategory::BooksAndMedia,
        ProductCategory::ToysAndGames,
        ProductCategory::Other,
    ];
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProductCategory::Clothing => "Clothing",
            ProductCategory::Jewelry => "Jewelry",
            ProductCategory::Accessories => "Accessories",
            ProductCategory::HomeDecor => "Home Decor",
            ProductCategory::Electronics => "Electronics",
            ProductCategory::FoodAndBeverages => "Food & Beverages",
            ProductCategory::BeautyAndHealth => "Beauty & Health",
            ProductCategory::SportsAndFitness => "Sports & Fitness",
            ProductCategory::BooksAndMedia => "Books & Media",
            ProductCategory::ToysAndGames => "Toys & Games",
            ProductCategory::Other => "Other",
        };
        write!(f, "{}", label)
    }
}
