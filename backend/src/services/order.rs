//! Inquiry lifecycle service
//!
//! Owns the order status state machine and the filtered views vendors and
//! customers read. Transitions are checked against the explicit table on
//! `OrderStatus` rather than left to whichever buttons a UI renders.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{Order, OrderStatus, PaymentProof, ProductSnapshot, VendorSnapshot};
use shared::types::ContactMethod;
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::store::{DocStore, Subscription};

/// Order service for managing the inquiry lifecycle
#[derive(Clone)]
pub struct OrderService {
    store: DocStore,
}

/// Input for creating an inquiry
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInquiryInput {
    pub product_id: Uuid,
    /// Absent for anonymous inquiries
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub message: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub preferred_contact_method: ContactMethod,
    pub payment_proof: Option<PaymentProofInput>,
}

fn default_quantity() -> u32 {
    1
}

/// Payment proof attachment as submitted
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentProofInput {
    /// `data:<mime>;base64,...`
    pub data: String,
    pub file_name: String,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// Create a new inquiry in `inquiry_sent` state.
    ///
    /// Product and vendor details are copied into the order at this moment;
    /// later catalog or profile edits never touch existing orders. All
    /// validation happens before the store write, so a rejected inquiry
    /// leaves no partial state.
    pub async fn create_inquiry(&self, input: CreateInquiryInput) -> AppResult<Order> {
        validation::validate_required_text(&input.customer_name)
            .map_err(|_| AppError::validation("customer_name", "Please fill in your contact information"))?;
        validation::validate_required_text(&input.customer_email)
            .map_err(|_| AppError::validation("customer_email", "Please fill in your contact information"))?;
        validation::validate_email(input.customer_email.trim())
            .map_err(|msg| AppError::validation("customer_email", msg))?;
        validation::validate_required_text(&input.message)
            .map_err(|_| AppError::validation("message", "Please add a message about your inquiry"))?;
        validation::validate_quantity(input.quantity)
            .map_err(|msg| AppError::validation("quantity", msg))?;

        if let Some(proof) = &input.payment_proof {
            validation::validate_payment_proof(&proof.data)
                .map_err(|msg| AppError::validation("payment_proof", msg))?;
        }

        let product = self
            .store
            .products
            .get(input.product_id)
            .await
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
        let vendor = self
            .store
            .vendors
            .get(product.vendor_id)
            .await
            .ok_or_else(|| AppError::NotFound("Vendor".to_string()))?;

        let product_snapshot = ProductSnapshot {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image_url.clone(),
            category: product.category.to_string(),
        };
        let vendor_snapshot = VendorSnapshot {
            id: vendor.uid,
            name: vendor.display_name().to_string(),
            email: vendor.email.clone(),
            phone: vendor.phone.clone(),
        };

        let order = self
            .store
            .orders
            .create(|id, now| Order {
                id,
                status: OrderStatus::InquirySent,
                customer_id: input.customer_id,
                customer_name: input.customer_name.trim().to_string(),
                customer_email: input.customer_email.trim().to_string(),
                customer_phone: input.customer_phone.clone(),
                message: input.message.trim().to_string(),
                quantity: input.quantity,
                delivery_address: input.delivery_address.clone(),
                preferred_contact_method: input.preferred_contact_method,
                payment_proof: input.payment_proof.as_ref().map(|p| PaymentProof {
                    data: p.data.clone(),
                    file_name: p.file_name.clone(),
                }),
                product: product_snapshot,
                vendor: vendor_snapshot,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(
            order_id = %order.id,
            vendor_id = %order.vendor.id,
            "inquiry created"
        );
        Ok(order)
    }

    /// Point read of one order
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<Order> {
        self.store
            .orders
            .get(order_id)
            .await
            .ok_or_else(|| AppError::NotFound("Order".to_string()))
    }

    /// Move an order to `next_status`.
    ///
    /// Re-applying the current status is accepted as a no-op and does not
    /// refresh `updated_at`. Anything outside the transition table is a
    /// typed error; no move ever re-enters `inquiry_sent`.
    pub async fn transition(&self, order_id: Uuid, next_status: OrderStatus) -> AppResult<Order> {
        let current = self.get_order(order_id).await?;

        if current.status == next_status {
            return Ok(current);
        }
        if !current.status.can_transition_to(next_status) {
            return Err(AppError::InvalidStatusTransition(format!(
                "Cannot move order from {} to {}",
                current.status, next_status
            )));
        }

        let updated = self
            .store
            .orders
            .update_with(order_id, |order| {
                order.status = next_status;
                order.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        tracing::info!(order_id = %order_id, status = %next_status, "order status updated");
        Ok(updated)
    }

    /// All orders for a vendor, newest first, optionally narrowed to one status
    pub async fn list_for_vendor(
        &self,
        vendor_id: Uuid,
        status_filter: Option<OrderStatus>,
    ) -> Vec<Order> {
        let mut orders = self
            .store
            .orders
            .find(|o| o.vendor.id == vendor_id && status_filter.map_or(true, |s| o.status == s))
            .await;
        sort_newest_first(&mut orders);
        orders
    }

    /// All orders created by a customer, newest first
    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
        status_filter: Option<OrderStatus>,
    ) -> Vec<Order> {
        let mut orders = self
            .store
            .orders
            .find(|o| {
                o.customer_id == Some(customer_id)
                    && status_filter.map_or(true, |s| o.status == s)
            })
            .await;
        sort_newest_first(&mut orders);
        orders
    }

    /// Live view of a vendor's orders
    pub async fn watch_for_vendor(&self, vendor_id: Uuid) -> OrderFeed {
        let sub = self
            .store
            .orders
            .watch_where(move |o| o.vendor.id == vendor_id)
            .await;
        OrderFeed { sub }
    }

    /// Live view of a customer's orders
    pub async fn watch_for_customer(&self, customer_id: Uuid) -> OrderFeed {
        let sub = self
            .store
            .orders
            .watch_where(move |o| o.customer_id == Some(customer_id))
            .await;
        OrderFeed { sub }
    }
}

/// A live, sorted order list: initial snapshot, then a fresh list after
/// every change to the orders collection
pub struct OrderFeed {
    sub: Subscription<Order>,
}

impl OrderFeed {
    pub async fn next(&mut self) -> Option<Vec<Order>> {
        let mut orders = self.sub.next().await?;
        sort_newest_first(&mut orders);
        Some(orders)
    }
}

/// Newest first; ids break timestamp ties so equal-instant orders keep a
/// stable relative position
fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::product::{CreateProductInput, ProductService};
    use crate::services::vendor::{RegisterVendorInput, VendorService};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use shared::models::{Product, ProductCategory};

    async fn seeded_store() -> (DocStore, Uuid, Product) {
        let store = DocStore::new();
        let vendor = VendorService::new(store.clone())
            .register(RegisterVendorInput {
                vendor_name: "Amina".to_string(),
                business_name: "Amina Crafts".to_string(),
                email: "amina@example.com".to_string(),
                phone: Some("+234 800 000 0000".to_string()),
                business_location: None,
                business_category: None,
                business_description: None,
            })
            .await
            .unwrap();
        let product = ProductService::new(store.clone())
            .create_product(
                vendor.uid,
                CreateProductInput {
                    name: "Ankara Gown".to_string(),
                    description: "Hand-sewn".to_string(),
                    price: Decimal::from(4500),
                    stock: 3,
                    category: ProductCategory::Clothing,
                    brand: None,
                    sku: None,
                    weight: None,
                    dimensions: None,
                    color: None,
                    material: None,
                    tags: None,
                    image_url: None,
                },
            )
            .await
            .unwrap();
        (store, vendor.uid, product)
    }

    fn inquiry_input(product_id: Uuid) -> CreateInquiryInput {
        CreateInquiryInput {
            product_id,
            customer_id: Some(Uuid::new_v4()),
            customer_name: "Chidi".to_string(),
            customer_email: "chidi@example.com".to_string(),
            customer_phone: None,
            message: "Is this available in blue?".to_string(),
            quantity: 2,
            delivery_address: Some("Rayfield, Jos".to_string()),
            preferred_contact_method: ContactMethod::Email,
            payment_proof: None,
        }
    }

    #[tokio::test]
    async fn test_create_inquiry_snapshots_product_and_vendor() {
        let (store, vendor_id, product) = seeded_store().await;
        let service = OrderService::new(store);

        let order = service.create_inquiry(inquiry_input(product.id)).await.unwrap();

        assert_eq!(order.status, OrderStatus::InquirySent);
        assert_eq!(order.product.id, product.id);
        assert_eq!(order.product.name, "Ankara Gown");
        assert_eq!(order.product.price, Decimal::from(4500));
        assert_eq!(order.vendor.id, vendor_id);
        assert_eq!(order.vendor.name, "Amina Crafts");
        assert_eq!(order.created_at, order.updated_at);
    }

    #[tokio::test]
    async fn test_create_inquiry_requires_message() {
        let (store, _, product) = seeded_store().await;
        let service = OrderService::new(store);

        let mut input = inquiry_input(product.id);
        input.message = "   ".to_string();
        let err = service.create_inquiry(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "message"));
    }

    #[tokio::test]
    async fn test_create_inquiry_unknown_product() {
        let (store, _, _) = seeded_store().await;
        let service = OrderService::new(store);

        let err = service
            .create_inquiry(inquiry_input(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_snapshot_survives_product_edit() {
        let (store, vendor_id, product) = seeded_store().await;
        let orders = OrderService::new(store.clone());
        let products = ProductService::new(store);

        let order = orders.create_inquiry(inquiry_input(product.id)).await.unwrap();

        products
            .update_product(
                vendor_id,
                product.id,
                crate::services::product::UpdateProductInput {
                    price: Some(Decimal::from(9999)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let reread = orders.get_order(order.id).await.unwrap();
        assert_eq!(reread.product.price, Decimal::from(4500));
    }

    #[tokio::test]
    async fn test_transition_walks_the_table() {
        let (store, _, product) = seeded_store().await;
        let service = OrderService::new(store);
        let order = service.create_inquiry(inquiry_input(product.id)).await.unwrap();

        let order = service
            .transition(order.id, OrderStatus::Responded)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Responded);

        let order = service
            .transition(order.id, OrderStatus::InProgress)
            .await
            .unwrap();
        let order = service
            .transition(order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_transition_rejects_backward_and_skip() {
        let (store, _, product) = seeded_store().await;
        let service = OrderService::new(store);
        let order = service.create_inquiry(inquiry_input(product.id)).await.unwrap();

        let err = service
            .transition(order.id, OrderStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition(_)));

        service.transition(order.id, OrderStatus::Responded).await.unwrap();
        let err = service
            .transition(order.id, OrderStatus::InquirySent)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition(_)));
    }

    #[tokio::test]
    async fn test_reapplying_current_status_is_a_noop() {
        let (store, _, product) = seeded_store().await;
        let service = OrderService::new(store);
        let order = service.create_inquiry(inquiry_input(product.id)).await.unwrap();
        let order = service
            .transition(order.id, OrderStatus::Responded)
            .await
            .unwrap();
        let stamped = order.updated_at;

        let again = service
            .transition(order.id, OrderStatus::Responded)
            .await
            .unwrap();
        assert_eq!(again.status, OrderStatus::Responded);
        assert_eq!(again.updated_at, stamped);
    }

    #[tokio::test]
    async fn test_vendor_list_filters_by_status() {
        let (store, vendor_id, product) = seeded_store().await;
        let service = OrderService::new(store);
        let a = service.create_inquiry(inquiry_input(product.id)).await.unwrap();
        service.create_inquiry(inquiry_input(product.id)).await.unwrap();
        service.transition(a.id, OrderStatus::Responded).await.unwrap();

        let all = service.list_for_vendor(vendor_id, None).await;
        assert_eq!(all.len(), 2);

        let responded = service
            .list_for_vendor(vendor_id, Some(OrderStatus::Responded))
            .await;
        assert_eq!(responded.len(), 1);
        assert_eq!(responded[0].id, a.id);

        let other_vendor = service.list_for_vendor(Uuid::new_v4(), None).await;
        assert!(other_vendor.is_empty());
    }

    #[tokio::test]
    async fn test_watch_sees_initial_set_then_changes() {
        let (store, vendor_id, product) = seeded_store().await;
        let service = OrderService::new(store);
        let order = service.create_inquiry(inquiry_input(product.id)).await.unwrap();

        let mut feed = service.watch_for_vendor(vendor_id).await;
        let initial = feed.next().await.unwrap();
        assert_eq!(initial.len(), 1);
        assert_eq!(initial[0].status, OrderStatus::InquirySent);

        service.transition(order.id, OrderStatus::Responded).await.unwrap();
        let after = feed.next().await.unwrap();
        assert_eq!(after[0].status, OrderStatus::Responded);
    }

    fn order_at(minutes_ago: i64) -> Order {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Order {
            id: Uuid::new_v4(),
            status: OrderStatus::InquirySent,
            customer_id: None,
            customer_name: "Test".to_string(),
            customer_email: "t@example.com".to_string(),
            customer_phone: None,
            message: "hi".to_string(),
            quantity: 1,
            delivery_address: None,
            preferred_contact_method: ContactMethod::Message,
            payment_proof: None,
            product: ProductSnapshot {
                id: Uuid::new_v4(),
                name: "p".to_string(),
                price: Decimal::ONE,
                image: None,
                category: "Other".to_string(),
            },
            vendor: VendorSnapshot {
                id: Uuid::new_v4(),
                name: "v".to_string(),
                email: "v@example.com".to_string(),
                phone: None,
            },
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut orders = vec![order_at(30), order_at(5), order_at(60)];
        sort_newest_first(&mut orders);
        assert!(orders[0].created_at >= orders[1].created_at);
        assert!(orders[1].created_at >= orders[2].created_at);
    }

    #[test]
    fn test_sort_tie_break_is_deterministic() {
        let a = order_at(10);
        let mut b = order_at(10);
        b.created_at = a.created_at;
        let expected_first = if b.id > a.id { b.id } else { a.id };
        let mut orders = vec![a.clone(), b.clone()];
        sort_newest_first(&mut orders);
        assert_eq!(orders[0].id, expected_first);
        let mut reversed = vec![b, a];
        sort_newest_first(&mut reversed);
        assert_eq!(reversed[0].id, expected_first);
    }
}
