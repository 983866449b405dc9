//! In-process document store
//!
//! Exposes the same contract the hosted document database offered the
//! browser app: create with server-assigned id and timestamp, point read,
//! atomic merge update, delete, and filtered live reads that deliver an
//! initial snapshot plus a fresh snapshot after every change.
//!
//! Concurrency model: each mutation holds the collection write lock for the
//! duration of the closure, so a single update is atomic; across updates the
//! store is last-write-wins with no version check. No operation here reads a
//! value and writes a dependent value back outside one `update_with` call.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use shared::models::{Order, Product, VendorProfile};

/// Capacity of the per-collection change channel. Subscribers that lag
/// behind recompute a full snapshot, so dropped notifications only coalesce
/// updates, they never lose data.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// A value that can live in a collection
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

impl Document for Order {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for VendorProfile {
    fn id(&self) -> Uuid {
        self.uid
    }
}

/// A named collection of documents with live-read support
pub struct Collection<T: Document> {
    name: &'static str,
    docs: Arc<RwLock<HashMap<Uuid, T>>>,
    changes: broadcast::Sender<()>,
}

impl<T: Document> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            docs: Arc::clone(&self.docs),
            changes: self.changes.clone(),
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(name: &'static str) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            name,
            docs: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }

    /// Create a document. The store assigns the id and the creation
    /// timestamp, so no document is ever visible without one.
    pub async fn create<F>(&self, build: F) -> T
    where
        F: FnOnce(Uuid, DateTime<Utc>) -> T,
    {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let doc = build(id, now);
        debug_assert_eq!(doc.id(), id);
        self.docs.write().await.insert(id, doc.clone());
        tracing::debug!(collection = self.name, %id, "document created");
        self.notify();
        doc
    }

    /// Point read by id
    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.docs.read().await.get(&id).cloned()
    }

    /// Apply a mutation as a single atomic write. Returns the updated
    /// document, or None when the id is unknown.
    pub async fn update_with<F>(&self, id: Uuid, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let updated = {
            let mut docs = self.docs.write().await;
            let doc = docs.get_mut(&id)?;
            apply(doc);
            doc.clone()
        };
        self.notify();
        Some(updated)
    }

    /// Remove a document. Returns whether it existed.
    pub async fn delete(&self, id: Uuid) -> bool {
        let removed = self.docs.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(collection = self.name, %id, "document deleted");
            self.notify();
        }
        removed
    }

    /// One-shot filtered read of the full current set
    pub async fn find<P>(&self, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.docs
            .read()
            .await
            .values()
            .filter(|doc| pred(doc))
            .cloned()
            .collect()
    }

    pub async fn count<P>(&self, pred: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.docs.read().await.values().filter(|doc| pred(doc)).count()
    }

    /// Filtered live read: delivers the current matching set immediately,
    /// then a fresh set after every mutation of the collection, until the
    /// subscription is dropped. A new subscription always starts from a full
    /// snapshot rather than resuming a cursor.
    pub async fn watch_where<P>(&self, pred: P) -> Subscription<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let rx = self.changes.subscribe();
        let pred: Arc<dyn Fn(&T) -> bool + Send + Sync> = Arc::new(pred);
        let initial = self.find(|doc| pred(doc)).await;
        Subscription {
            collection: self.clone(),
            pred,
            rx,
            initial: Some(initial),
        }
    }

    fn notify(&self) {
        // Send fails only when no subscriber is listening
        let _ = self.changes.send(());
    }
}

/// A live filtered view over one collection
pub struct Subscription<T: Document> {
    collection: Collection<T>,
    pred: Arc<dyn Fn(&T) -> bool + Send + Sync>,
    rx: broadcast::Receiver<()>,
    initial: Option<Vec<T>>,
}

impl<T: Document> Subscription<T> {
    /// Wait for the next snapshot. The first call resolves immediately with
    /// the set captured at subscribe time; later calls resolve after the
    /// next collection change. Returns None once the collection is gone.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        if let Some(initial) = self.initial.take() {
            return Some(initial);
        }
        loop {
            match self.rx.recv().await {
                Ok(()) => break,
                // Lagging coalesces missed changes into one recompute
                Err(broadcast::error::RecvError::Lagged(_)) => break,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
        let pred = Arc::clone(&self.pred);
        Some(self.collection.find(|doc| pred(doc)).await)
    }
}

/// The application's collections, shared across handlers
#[derive(Clone)]
pub struct DocStore {
    pub orders: Collection<Order>,
    pub products: Collection<Product>,
    pub vendors: Collection<VendorProfile>,
}

impl DocStore {
    pub fn new() -> Self {
        Self {
            orders: Collection::new("orders"),
            products: Collection::new("products"),
            vendors: Collection::new("vendors"),
        }
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
