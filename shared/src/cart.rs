//! Client-side cart and favorites state
//!
//! The browser app kept these as plain arrays in page scope with ad-hoc
//! local-storage writes. Here they are explicit stores with an injected
//! persistence boundary: state is loaded once at construction and saved
//! after every mutation.

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::ProductSnapshot;

/// Where cart/favorites state is kept between sessions.
/// Implementations are expected to swallow their own I/O failures the way
/// a local-storage wrapper would; a failed save loses persistence, not state.
pub trait StatePersistence {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

impl<T: StatePersistence + ?Sized> StatePersistence for &T {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) {
        (**self).save(key, value)
    }
}

/// In-memory persistence for tests and embedding
#[derive(Default)]
pub struct MemoryPersistence {
    entries: Mutex<HashMap<String, String>>,
}

impl StatePersistence for MemoryPersistence {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

fn load_state<T: DeserializeOwned + Default>(persistence: &dyn StatePersistence, key: &str) -> T {
    persistence
        .load(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

fn save_state<T: Serialize>(persistence: &dyn StatePersistence, key: &str, state: &T) {
    if let Ok(raw) = serde_json::to_string(state) {
        persistence.save(key, &raw);
    }
}

/// One line in the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

const CART_KEY: &str = "cart:items";
const FAVORITES_KEY: &str = "favorites:vendors";

/// Shopping cart over an injected persistence boundary
pub struct CartStore<P: StatePersistence> {
    items: Vec<CartItem>,
    persistence: P,
}

impl<P: StatePersistence> CartStore<P> {
    pub fn new(persistence: P) -> Self {
        let items = load_state(&persistence, CART_KEY);
        Self { items, persistence }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add a product; an existing line for the same product merges quantities
    pub fn add(&mut self, product: ProductSnapshot, quantity: u32) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(existing) => existing.quantity += quantity,
            None => self.items.push(CartItem { product, quantity }),
        }
        self.persist();
    }

    pub fn remove(&mut self, product_id: Uuid) {
        self.items.retain(|i| i.product.id != product_id);
        self.persist();
    }

    /// Set the quantity of an existing line; zero removes the line
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.product.price * Decimal::from(i.quantity))
            .sum()
    }

    fn persist(&self) {
        save_state(&self.persistence, CART_KEY, &self.items);
    }
}

/// Favorited vendor ids over an injected persistence boundary
pub struct FavoritesStore<P: StatePersistence> {
    vendor_ids: Vec<Uuid>,
    persistence: P,
}

impl<P: StatePersistence> FavoritesStore<P> {
    pub fn new(persistence: P) -> Self {
        let vendor_ids = load_state(&persistence, FAVORITES_KEY);
        Self {
            vendor_ids,
            persistence,
        }
    }

    pub fn contains(&self, vendor_id: Uuid) -> bool {
        self.vendor_ids.contains(&vendor_id)
    }

    pub fn add(&mut self, vendor_id: Uuid) {
        if !self.contains(vendor_id) {
            self.vendor_ids.push(vendor_id);
            self.persist();
        }
    }

    pub fn remove(&mut self, vendor_id: Uuid) {
        self.vendor_ids.retain(|id| *id != vendor_id);
        self.persist();
    }

    /// Returns whether the vendor is favorited after the toggle
    pub fn toggle(&mut self, vendor_id: Uuid) -> bool {
        if self.contains(vendor_id) {
            self.remove(vendor_id);
            false
        } else {
            self.add(vendor_id);
            true
        }
    }

    pub fn vendor_ids(&self) -> &[Uuid] {
        &self.vendor_ids
    }

    fn persist(&self) {
        save_state(&self.persistence, FAVORITES_KEY, &self.vendor_ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn snapshot(price: u32) -> ProductSnapshot {
        ProductSnapshot {
            id: Uuid::new_v4(),
            name: "Woven basket".to_string(),
            price: Decimal::from(price),
            image: None,
            category: "Home Decor".to_string(),
        }
    }

    #[test]
    fn test_add_merges_duplicate_lines() {
        let mut cart = CartStore::new(MemoryPersistence::default());
        let product = snapshot(500);
        cart.add(product.clone(), 1);
        cart.add(product, 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_total_sums_lines() {
        let mut cart = CartStore::new(MemoryPersistence::default());
        cart.add(snapshot(500), 2);
        cart.add(snapshot(250), 1);
        assert_eq!(cart.total(), Decimal::from(1250));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = CartStore::new(MemoryPersistence::default());
        let product = snapshot(100);
        let id = product.id;
        cart.add(product, 2);
        cart.set_quantity(id, 0);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_cart_survives_reload() {
        let persistence = MemoryPersistence::default();
        {
            let mut cart = CartStore::new(&persistence);
            cart.add(snapshot(100), 1);
        }
        let cart = CartStore::new(&persistence);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_favorites_toggle() {
        let mut favorites = FavoritesStore::new(MemoryPersistence::default());
        let vendor = Uuid::new_v4();
        assert!(favorites.toggle(vendor));
        assert!(favorites.contains(vendor));
        assert!(!favorites.toggle(vendor));
        assert!(!favorites.contains(vendor));
    }

    #[test]
    fn test_favorites_survive_reload() {
        let persistence = MemoryPersistence::default();
        let vendor = Uuid::new_v4();
        {
            let mut favorites = FavoritesStore::new(&persistence);
            favorites.add(vendor);
        }
        let favorites = FavoritesStore::new(&persistence);
        assert!(favorites.contains(vendor));
    }
}
