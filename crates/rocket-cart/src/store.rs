//! The cart state container.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rocket_cache::{CacheError, KeyValueStore};
use rocket_commerce::{Cart, ProductId};
use rocket_data::Catalog;
use tokio::sync::{watch, Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::notify::Notifier;
use crate::snapshot::CartSnapshot;
use crate::CartError;

/// Request to set a line item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    /// Product whose line item changes.
    pub product_id: ProductId,
    /// New quantity. Values of zero or below are ignored.
    pub amount: i64,
}

impl UpdateProductAmount {
    /// Create an update request.
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// In-memory cart mirrored to a key-value store.
///
/// Operations on the same product run one at a time; operations on
/// different products may interleave at their remote lookups, and each
/// commit applies to the cart as it is at that moment.
pub struct CartStore {
    catalog: Arc<dyn Catalog>,
    snapshot: CartSnapshot,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Cart>,
    commit_lock: Mutex<()>,
    locks: Mutex<HashMap<ProductId, Arc<AsyncMutex<()>>>>,
}

impl CartStore {
    /// Create a store, restoring the cart persisted under `key`.
    pub fn load(
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        key: impl Into<String>,
    ) -> Self {
        let snapshot = CartSnapshot::new(storage, key);
        let (state, _) = watch::channel(snapshot.load());

        Self {
            catalog,
            snapshot,
            notifier,
            state,
            commit_lock: Mutex::new(()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The current cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Watch the cart; the receiver is marked changed on every commit.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart goes through the stock-checked
    /// [`update_product_amount`](Self::update_product_amount) path with its
    /// amount plus one. A new product is looked up and appended with
    /// amount 1; the first unit is not checked against stock.
    pub async fn add_product(&self, product_id: ProductId) {
        let _guard = self.lock_product(product_id).await;
        if let Err(e) = self.try_add(product_id).await {
            self.report(e);
        }
    }

    /// Remove a product's line item.
    pub async fn remove_product(&self, product_id: ProductId) {
        let _guard = self.lock_product(product_id).await;
        if let Err(e) = self.try_remove(product_id) {
            self.report(e);
        }
    }

    /// Set a line item's amount after checking stock.
    ///
    /// Amounts of zero or below are ignored; removal goes through
    /// [`remove_product`](Self::remove_product). A product with no line item
    /// is left out of the cart.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        let _guard = self.lock_product(update.product_id).await;
        if let Err(e) = self.try_update(update.product_id, update.amount).await {
            self.report(e);
        }
    }

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let existing = self.state.borrow().get(product_id).map(|item| item.amount);
        if let Some(amount) = existing {
            let next = amount.checked_add(1).ok_or_else(|| CartError::UpdateFailed {
                product_id,
                reason: format!("amount {} cannot grow further", amount),
            })?;
            return self.try_update(product_id, next).await;
        }

        let product = self
            .catalog
            .product(product_id)
            .await
            .map_err(|e| CartError::AddFailed {
                product_id,
                reason: e.to_string(),
            })?;

        if product.id != product_id {
            return Err(CartError::AddFailed {
                product_id,
                reason: format!("catalog answered with product {}", product.id),
            });
        }

        self.commit(
            |cart| {
                cart.with_appended(product)
                    .map(Some)
                    .map_err(|e| CartError::AddFailed {
                        product_id,
                        reason: e.to_string(),
                    })
            },
            |e| CartError::AddFailed {
                product_id,
                reason: e.to_string(),
            },
        )?;

        debug!(%product_id, "product added");
        Ok(())
    }

    fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        self.commit(
            |cart| {
                cart.without(product_id)
                    .map(Some)
                    .map_err(|e| CartError::RemoveFailed {
                        product_id,
                        reason: e.to_string(),
                    })
            },
            |e| CartError::RemoveFailed {
                product_id,
                reason: e.to_string(),
            },
        )?;

        debug!(%product_id, "product removed");
        Ok(())
    }

    async fn try_update(&self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount <= 0 {
            debug!(%product_id, amount, "ignoring non-positive amount");
            return Ok(());
        }

        let stock = self
            .catalog
            .stock(product_id)
            .await
            .map_err(|e| CartError::UpdateFailed {
                product_id,
                reason: e.to_string(),
            })?;

        if !stock.can_fulfill(amount) {
            return Err(CartError::StockInsufficient {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        self.commit(
            |cart| {
                let (next, matched) = cart.with_amount(product_id, amount).map_err(|e| {
                    CartError::UpdateFailed {
                        product_id,
                        reason: e.to_string(),
                    }
                })?;
                if !matched {
                    debug!(%product_id, amount, "no line item to update");
                    return Ok(None);
                }
                Ok(Some(next))
            },
            |e| CartError::UpdateFailed {
                product_id,
                reason: e.to_string(),
            },
        )?;

        debug!(%product_id, amount, available = stock.amount, "amount updated");
        Ok(())
    }

    /// Derive the next cart from the current one, persist it, then publish.
    ///
    /// `mutate` returning `Ok(None)` leaves everything untouched. Nothing is
    /// published unless the write succeeded. Commits are serialized by
    /// `commit_lock`; the snapshot is written outside the watch lock, so
    /// readers keep seeing the previous cart until the new one is published.
    /// The write itself is synchronous and runs on the calling task.
    fn commit<F, E>(&self, mutate: F, on_storage: E) -> Result<(), CartError>
    where
        F: FnOnce(&Cart) -> Result<Option<Cart>, CartError>,
        E: FnOnce(CacheError) -> CartError,
    {
        let _commit = self.commit_lock.lock();

        let next = match mutate(&self.state.borrow())? {
            Some(next) => next,
            None => return Ok(()),
        };

        self.snapshot.save(&next).map_err(on_storage)?;
        self.state.send_replace(next);
        Ok(())
    }

    async fn lock_product(&self, product_id: ProductId) -> OwnedMutexGuard<()> {
        let lock = self.locks.lock().entry(product_id).or_default().clone();
        lock.lock_owned().await
    }

    fn report(&self, error: CartError) {
        warn!(
            product_id = %error.product_id(),
            detail = %error.detail(),
            "cart operation failed: {}",
            error
        );
        self.notifier.notify(&error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::DEFAULT_CART_KEY;
    use async_trait::async_trait;
    use rocket_cache::{FileStore, MemoryStore};
    use rocket_commerce::{Product, StockRecord};
    use rocket_data::FetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeCatalog {
        products: Mutex<HashMap<ProductId, Product>>,
        stock: Mutex<HashMap<ProductId, i64>>,
        stock_calls: AtomicUsize,
    }

    impl FakeCatalog {
        fn with_stock(entries: &[(u64, i64)]) -> Arc<Self> {
            let catalog = Self::default();
            for (id, amount) in entries {
                let id = ProductId::new(*id);
                catalog.products.lock().insert(
                    id,
                    Product::new(id, format!("Shoe {}", id), 99.9, format!("{}.jpg", id)),
                );
                catalog.stock.lock().insert(id, *amount);
            }
            Arc::new(catalog)
        }

        fn set_stock(&self, id: u64, amount: i64) {
            self.stock.lock().insert(ProductId::new(id), amount);
        }

        fn forget_stock(&self, id: u64) {
            self.stock.lock().remove(&ProductId::new(id));
        }

        fn stock_calls(&self) -> usize {
            self.stock_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
            tokio::task::yield_now().await;
            self.products
                .lock()
                .get(&id)
                .cloned()
                .ok_or_else(|| FetchError::NotFound {
                    url: format!("/products/{}", id),
                })
        }

        async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
            self.stock_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.stock
                .lock()
                .get(&id)
                .map(|amount| StockRecord {
                    id,
                    amount: *amount,
                })
                .ok_or_else(|| FetchError::Connection("connection refused".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        errors: Mutex<Vec<CartError>>,
    }

    impl RecordingNotifier {
        fn take(&self) -> Vec<CartError> {
            std::mem::take(&mut *self.errors.lock())
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, error: &CartError) {
            self.errors.lock().push(error.clone());
        }
    }

    struct QuotaExceededStore;

    impl KeyValueStore for QuotaExceededStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("quota exceeded".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }
    }

    /// Records the cart a subscriber sees while a write is in flight.
    #[derive(Default)]
    struct ObservedStore {
        inner: MemoryStore,
        watcher: Mutex<Option<watch::Receiver<Cart>>>,
        seen_during_write: Mutex<Vec<usize>>,
    }

    impl KeyValueStore for ObservedStore {
        fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
            if let Some(rx) = self.watcher.lock().as_ref() {
                self.seen_during_write.lock().push(rx.borrow().len());
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), CacheError> {
            self.inner.delete(key)
        }
    }

    struct Harness {
        store: CartStore,
        catalog: Arc<FakeCatalog>,
        storage: Arc<MemoryStore>,
        notices: Arc<RecordingNotifier>,
    }

    impl Harness {
        fn new(stock: &[(u64, i64)]) -> Self {
            let catalog = FakeCatalog::with_stock(stock);
            let storage = Arc::new(MemoryStore::new());
            let notices = Arc::new(RecordingNotifier::default());
            let store = CartStore::load(
                catalog.clone(),
                storage.clone(),
                notices.clone(),
                DEFAULT_CART_KEY,
            );
            Self {
                store,
                catalog,
                storage,
                notices,
            }
        }

        fn persisted(&self) -> Option<String> {
            self.storage.get(DEFAULT_CART_KEY).unwrap()
        }

        fn reload(&self) -> Cart {
            CartSnapshot::new(self.storage.clone(), DEFAULT_CART_KEY).load()
        }
    }

    fn ids(cart: &Cart) -> Vec<u64> {
        cart.iter().map(|item| item.id.get()).collect()
    }

    fn amount(cart: &Cart, id: u64) -> Option<i64> {
        cart.get(ProductId::new(id)).map(|item| item.amount)
    }

    #[tokio::test]
    async fn test_add_new_product_appends() {
        let h = Harness::new(&[(1, 5), (2, 5)]);

        h.store.add_product(ProductId::new(2)).await;
        h.store.add_product(ProductId::new(1)).await;

        let cart = h.store.cart();
        assert_eq!(ids(&cart), vec![2, 1]);
        assert_eq!(amount(&cart, 1), Some(1));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().title, "Shoe 1");
        assert_eq!(h.reload(), cart);
        assert!(h.notices.take().is_empty());
    }

    #[tokio::test]
    async fn test_first_unit_skips_stock_check() {
        let h = Harness::new(&[(1, 0)]);

        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(amount(&h.store.cart(), 1), Some(1));
        assert_eq!(h.catalog.stock_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_existing_increments() {
        let h = Harness::new(&[(1, 2)]);

        h.store.add_product(ProductId::new(1)).await;
        h.store.add_product(ProductId::new(1)).await;

        let cart = h.store.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(amount(&cart, 1), Some(2));
        assert_eq!(h.reload(), cart);
    }

    #[tokio::test]
    async fn test_add_existing_beyond_stock() {
        let h = Harness::new(&[(1, 1)]);

        h.store.add_product(ProductId::new(1)).await;
        let before = h.persisted();
        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(amount(&h.store.cart(), 1), Some(1));
        assert_eq!(h.persisted(), before);
        assert_eq!(
            h.notices.take(),
            vec![CartError::StockInsufficient {
                product_id: ProductId::new(1),
                requested: 2,
                available: 1,
            }]
        );
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let h = Harness::new(&[(1, 5)]);
        h.store.add_product(ProductId::new(1)).await;
        let before = h.persisted();

        h.store.add_product(ProductId::new(404)).await;

        assert_eq!(ids(&h.store.cart()), vec![1]);
        assert_eq!(h.persisted(), before);

        let notices = h.notices.take();
        assert_eq!(notices.len(), 1);
        assert!(matches!(notices[0], CartError::AddFailed { .. }));
        assert_eq!(notices[0].to_string(), "Failed to add product");
    }

    #[tokio::test]
    async fn test_remove_present_product() {
        let h = Harness::new(&[(1, 5), (2, 5), (3, 5)]);
        for id in [1, 2, 3] {
            h.store.add_product(ProductId::new(id)).await;
        }

        h.store.remove_product(ProductId::new(2)).await;

        let cart = h.store.cart();
        assert_eq!(ids(&cart), vec![1, 3]);
        assert_eq!(h.reload(), cart);
        assert!(h.notices.take().is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_product() {
        let h = Harness::new(&[(1, 5)]);
        h.store.add_product(ProductId::new(1)).await;
        let before = h.persisted();

        h.store.remove_product(ProductId::new(7)).await;

        assert_eq!(ids(&h.store.cart()), vec![1]);
        assert_eq!(h.persisted(), before);

        let notices = h.notices.take();
        assert_eq!(notices.len(), 1);
        assert!(matches!(
            notices[0],
            CartError::RemoveFailed { product_id, .. } if product_id == ProductId::new(7)
        ));
    }

    #[tokio::test]
    async fn test_update_non_positive_is_ignored() {
        let h = Harness::new(&[(1, 5)]);
        h.store.add_product(ProductId::new(1)).await;
        let before = h.store.cart();

        for amount in [0, -1, i64::MIN] {
            h.store
                .update_product_amount(UpdateProductAmount::new(ProductId::new(1), amount))
                .await;
        }

        assert_eq!(h.store.cart(), before);
        assert_eq!(h.catalog.stock_calls(), 0);
        assert!(h.notices.take().is_empty());
    }

    #[tokio::test]
    async fn test_update_beyond_stock() {
        let h = Harness::new(&[(1, 3)]);
        h.store.add_product(ProductId::new(1)).await;

        h.store
            .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 4))
            .await;

        assert_eq!(amount(&h.store.cart(), 1), Some(1));
        assert!(matches!(
            h.notices.take().as_slice(),
            [CartError::StockInsufficient { requested: 4, available: 3, .. }]
        ));
    }

    #[tokio::test]
    async fn test_update_within_stock_touches_only_target() {
        let h = Harness::new(&[(1, 5), (2, 5)]);
        h.store.add_product(ProductId::new(1)).await;
        h.store.add_product(ProductId::new(2)).await;
        let before = h.store.cart();

        h.store
            .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 5))
            .await;

        let cart = h.store.cart();
        assert_eq!(ids(&cart), vec![1, 2]);
        assert_eq!(amount(&cart, 1), Some(5));
        assert_eq!(cart.get(ProductId::new(2)), before.get(ProductId::new(2)));
        assert_eq!(
            cart.get(ProductId::new(1)).unwrap().title,
            before.get(ProductId::new(1)).unwrap().title
        );
        assert_eq!(h.reload(), cart);
    }

    #[tokio::test]
    async fn test_update_stock_lookup_failure() {
        let h = Harness::new(&[(1, 5)]);
        h.store.add_product(ProductId::new(1)).await;
        h.catalog.forget_stock(1);

        h.store
            .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 2))
            .await;

        assert_eq!(amount(&h.store.cart(), 1), Some(1));
        let notices = h.notices.take();
        assert!(matches!(notices.as_slice(), [CartError::UpdateFailed { .. }]));
        assert_eq!(notices[0].to_string(), "Failed to change product quantity");
    }

    #[tokio::test]
    async fn test_update_absent_product_is_noop() {
        let h = Harness::new(&[(1, 5), (2, 5)]);
        h.store.add_product(ProductId::new(1)).await;
        let before = h.persisted();

        h.store
            .update_product_amount(UpdateProductAmount::new(ProductId::new(2), 3))
            .await;

        assert_eq!(ids(&h.store.cart()), vec![1]);
        assert_eq!(h.persisted(), before);
        assert!(h.notices.take().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cart_unchanged() {
        let notices = Arc::new(RecordingNotifier::default());
        let store = CartStore::load(
            FakeCatalog::with_stock(&[(1, 5)]),
            Arc::new(QuotaExceededStore),
            notices.clone(),
            DEFAULT_CART_KEY,
        );
        let rx = store.subscribe();

        store.add_product(ProductId::new(1)).await;

        assert!(store.cart().is_empty());
        assert!(!rx.has_changed().unwrap());
        assert!(matches!(
            notices.take().as_slice(),
            [CartError::AddFailed { reason, .. }] if reason.contains("quota exceeded")
        ));
    }

    #[tokio::test]
    async fn test_restores_persisted_cart() {
        let h = Harness::new(&[(1, 5), (2, 5)]);
        h.store.add_product(ProductId::new(2)).await;
        h.store.add_product(ProductId::new(1)).await;
        h.store.add_product(ProductId::new(1)).await;

        let restored = CartStore::load(
            h.catalog.clone(),
            h.storage.clone(),
            h.notices.clone(),
            DEFAULT_CART_KEY,
        );

        assert_eq!(restored.cart(), h.store.cart());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_starts_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(DEFAULT_CART_KEY, "[{\"id\":1,\"ti").unwrap();

        let store = CartStore::load(
            FakeCatalog::with_stock(&[(1, 5)]),
            storage.clone(),
            Arc::new(RecordingNotifier::default()),
            DEFAULT_CART_KEY,
        );
        assert!(store.cart().is_empty());

        store.add_product(ProductId::new(1)).await;
        assert_eq!(ids(&store.cart()), vec![1]);
    }

    #[tokio::test]
    async fn test_concurrent_adds_of_same_product() {
        let h = Harness::new(&[(1, 5)]);

        tokio::join!(
            h.store.add_product(ProductId::new(1)),
            h.store.add_product(ProductId::new(1)),
        );

        let cart = h.store.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(amount(&cart, 1), Some(2));
        assert_eq!(h.reload(), cart);
    }

    #[tokio::test]
    async fn test_concurrent_adds_of_different_products() {
        let h = Harness::new(&[(1, 5), (2, 5)]);

        tokio::join!(
            h.store.add_product(ProductId::new(1)),
            h.store.add_product(ProductId::new(2)),
        );

        let cart = h.store.cart();
        assert_eq!(cart.len(), 2);
        assert_eq!(h.reload(), cart);
    }

    #[tokio::test]
    async fn test_subscribers_see_commits() {
        let h = Harness::new(&[(1, 5)]);
        let mut rx = h.store.subscribe();

        h.store.add_product(ProductId::new(1)).await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        h.store.remove_product(ProductId::new(9)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_cart_walkthrough() {
        let h = Harness::new(&[(1, 2)]);

        h.store.add_product(ProductId::new(1)).await;
        assert_eq!(amount(&h.store.cart(), 1), Some(1));

        h.store.add_product(ProductId::new(1)).await;
        assert_eq!(amount(&h.store.cart(), 1), Some(2));

        h.catalog.set_stock(1, 3);
        h.store
            .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 5))
            .await;
        assert_eq!(amount(&h.store.cart(), 1), Some(2));
        assert_eq!(h.notices.take().len(), 1);

        h.store.remove_product(ProductId::new(1)).await;
        assert!(h.store.cart().is_empty());
        assert_eq!(h.persisted().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_add_at_max_amount_is_reported() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                DEFAULT_CART_KEY,
                r#"[{"id":1,"title":"Shoe 1","price":99.9,"image":"1.jpg","amount":9223372036854775807}]"#,
            )
            .unwrap();
        let catalog = FakeCatalog::with_stock(&[(1, i64::MAX)]);
        let notices = Arc::new(RecordingNotifier::default());
        let store = CartStore::load(
            catalog.clone(),
            storage.clone(),
            notices.clone(),
            DEFAULT_CART_KEY,
        );
        let before = storage.get(DEFAULT_CART_KEY).unwrap();

        store.add_product(ProductId::new(1)).await;

        assert_eq!(amount(&store.cart(), 1), Some(i64::MAX));
        assert_eq!(storage.get(DEFAULT_CART_KEY).unwrap(), before);
        assert_eq!(catalog.stock_calls(), 0);
        assert!(matches!(
            notices.take().as_slice(),
            [CartError::UpdateFailed { product_id, .. }] if *product_id == ProductId::new(1)
        ));
    }

    #[tokio::test]
    async fn test_corrupt_file_store_accepts_new_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "{\"@RocketShoes:cart\": \"[").unwrap();

        let notices = Arc::new(RecordingNotifier::default());
        let store = CartStore::load(
            FakeCatalog::with_stock(&[(1, 5)]),
            Arc::new(FileStore::open(&path).unwrap()),
            notices.clone(),
            DEFAULT_CART_KEY,
        );
        assert!(store.cart().is_empty());

        for _ in 0..3 {
            store.add_product(ProductId::new(1)).await;
        }

        assert_eq!(amount(&store.cart(), 1), Some(3));
        assert!(notices.take().is_empty());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            CartSnapshot::new(Arc::new(reopened), DEFAULT_CART_KEY).load(),
            store.cart()
        );
    }

    #[tokio::test]
    async fn test_readers_see_previous_cart_during_write() {
        let storage = Arc::new(ObservedStore::default());
        let store = CartStore::load(
            FakeCatalog::with_stock(&[(1, 5), (2, 5)]),
            storage.clone(),
            Arc::new(RecordingNotifier::default()),
            DEFAULT_CART_KEY,
        );
        *storage.watcher.lock() = Some(store.subscribe());

        store.add_product(ProductId::new(1)).await;
        store.add_product(ProductId::new(2)).await;

        assert_eq!(*storage.seen_during_write.lock(), vec![0, 1]);
        assert_eq!(store.cart().len(), 2);
    }
}
