//! Product catalog service
//!
//! Vendor-scoped CRUD plus the in-process search/filter/sort the storefront
//! pages apply over a full listing.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{Product, ProductCategory};
use shared::types::ProductSort;
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::store::DocStore;

/// Product service for managing vendor catalogs
#[derive(Clone)]
pub struct ProductService {
    store: DocStore,
}

/// Input for listing a new product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
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
    pub image_url: Option<String>,
}

/// Input for editing a product; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub category: Option<ProductCategory>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub weight: Option<String>,
    pub dimensions: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub tags: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Listing query: in-process search over the vendor's full set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub sort: ProductSort,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// List a new product for a vendor
    pub async fn create_product(
        &self,
        vendor_id: Uuid,
        input: CreateProductInput,
    ) -> AppResult<Product> {
        validation::validate_required_text(&input.name)
            .map_err(|_| AppError::validation("name", "Product name is required"))?;
        validation::validate_required_text(&input.description)
            .map_err(|_| AppError::validation("description", "Product description is required"))?;
        if input.price < Decimal::ZERO {
            return Err(AppError::validation("price", "Price cannot be negative"));
        }
        if let Some(image) = &input.image_url {
            validation::validate_product_image(image)
                .map_err(|msg| AppError::validation("image_url", msg))?;
        }

        let vendor = self
            .store
            .vendors
            .get(vendor_id)
            .await
            .ok_or_else(|| AppError::NotFound("Vendor".to_string()))?;

        let product = self
            .store
            .products
            .create(|id, now| Product {
                id,
                vendor_id: vendor.uid,
                vendor_name: vendor.display_name().to_string(),
                name: input.name.trim().to_string(),
                description: input.description.trim().to_string(),
                price: input.price,
                stock: input.stock,
                category: input.category,
                brand: input.brand.clone(),
                sku: input.sku.clone(),
                weight: input.weight.clone(),
                dimensions: input.dimensions.clone(),
                color: input.color.clone(),
                material: input.material.clone(),
                tags: input.tags.clone(),
                image_url: input.image_url.clone(),
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(product_id = %product.id, vendor_id = %product.vendor_id, "product listed");
        Ok(product)
    }

    /// Point read of one product
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        self.store
            .products
            .get(product_id)
            .await
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Edit a product. Only the owning vendor may do this.
    pub async fn update_product(
        &self,
        acting_vendor_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(product_id).await?;
        if existing.vendor_id != acting_vendor_id {
            return Err(AppError::Forbidden(
                "Products can only be edited by their vendor".to_string(),
            ));
        }

        if let Some(name) = &input.name {
            validation::validate_required_text(name)
                .map_err(|_| AppError::validation("name", "Product name is required"))?;
        }
        if let Some(price) = input.price {
            if price < Decimal::ZERO {
                return Err(AppError::validation("price", "Price cannot be negative"));
            }
        }
        if let Some(image) = &input.image_url {
            validation::validate_product_image(image)
                .map_err(|msg| AppError::validation("image_url", msg))?;
        }

        let updated = self
            .store
            .products
            .update_with(product_id, |product| {
                if let Some(name) = input.name {
                    product.name = name.trim().to_string();
                }
                if let Some(description) = input.description {
                    product.description = description.trim().to_string();
                }
                if let Some(price) = input.price {
                    product.price = price;
                }
                if let Some(stock) = input.stock {
                    product.stock = stock;
                }
                if let Some(category) = input.category {
                    product.category = category;
                }
                if input.brand.is_some() {
                    product.brand = input.brand;
                }
                if input.sku.is_some() {
                    product.sku = input.sku;
                }
                if input.weight.is_some() {
                    product.weight = input.weight;
                }
                if input.dimensions.is_some() {
                    product.dimensions = input.dimensions;
                }
                if input.color.is_some() {
                    product.color = input.color;
                }
                if input.material.is_some() {
                    product.material = input.material;
                }
                if input.tags.is_some() {
                    product.tags = input.tags;
                }
                if input.image_url.is_some() {
                    product.image_url = input.image_url;
                }
                if let Some(is_active) = input.is_active {
                    product.is_active = is_active;
                }
                product.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(updated)
    }

    /// Delete a product. Only the owning vendor may do this.
    pub async fn delete_product(&self, acting_vendor_id: Uuid, product_id: Uuid) -> AppResult<()> {
        let existing = self.get_product(product_id).await?;
        if existing.vendor_id != acting_vendor_id {
            return Err(AppError::Forbidden(
                "Products can only be deleted by their vendor".to_string(),
            ));
        }
        self.store.products.delete(product_id).await;
        tracing::info!(product_id = %product_id, "product deleted");
        Ok(())
    }

    /// A vendor's products with search, category filter, and sort applied
    /// over the full set
    pub async fn list_for_vendor(&self, vendor_id: Uuid, query: ProductQuery) -> Vec<Product> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut products = self
            .store
            .products
            .find(|p| {
                p.vendor_id == vendor_id
                    && query.category.map_or(true, |c| p.category == c)
                    && search.as_deref().map_or(true, |term| matches_search(p, term))
            })
            .await;

        sort_products(&mut products, query.sort);
        products
    }
}

fn matches_search(product: &Product, term: &str) -> bool {
    let hay = |value: &str| value.to_lowercase().contains(term);
    hay(&product.name)
        || hay(&product.description)
        || product.brand.as_deref().map_or(false, hay)
        || product.tags.as_deref().map_or(false, hay)
}

fn sort_products(products: &mut [Product], sort: ProductSort) {
    match sort {
        ProductSort::Name => products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        ProductSort::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        ProductSort::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        ProductSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}
