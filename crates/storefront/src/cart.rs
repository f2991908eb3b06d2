//! Persisted cart store.
//!
//! The cart is a single aggregate stored under [`CART_STORAGE_KEY`] as
//! `{"state":{"items":[...]},"version":0}`. It is hydrated once when the
//! store is opened and written back after every mutation.
//!
//! Quantities are held as [`Quantity`], so the "at least one" rule is
//! enforced here for every mutation rather than at each call site.

use saho_core::{CartLineItem, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::storage::{CartStorage, MemoryStorage};

/// Storage key of the cart aggregate.
pub const CART_STORAGE_KEY: &str = "saho-cart-storage";

/// Schema version written alongside the cart.
const CART_STORAGE_VERSION: u32 = 0;

/// Written with `T = CartLineItem`; read back with raw JSON lines so one
/// bad line cannot take the rest of the cart with it.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCart<T> {
    state: CartState<T>,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct CartState<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// A persisted line before its quantity is validated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLine {
    product_id: ProductId,
    quantity: i64,
    #[serde(default)]
    selected_color: Option<String>,
}

impl From<StoredLine> for CartLineItem {
    fn from(line: StoredLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: Quantity::clamped(line.quantity),
            selected_color: line.selected_color,
        }
    }
}

/// The shopping cart.
///
/// Mutations always apply in memory. A returned `StorageError` only means
/// the write-through failed and the change may not survive a restart.
pub struct CartStore {
    items: Vec<CartLineItem>,
    storage: Box<dyn CartStorage>,
}

impl CartStore {
    /// Open the cart persisted in `storage`.
    ///
    /// Missing, unreadable or corrupt data yields an empty cart. Within a
    /// readable envelope, bad lines are repaired or dropped one at a time.
    pub fn open(storage: impl CartStorage + 'static) -> Self {
        let items = hydrate(&storage);
        debug!(items = items.len(), "cart hydrated");
        Self {
            items,
            storage: Box::new(storage),
        }
    }

    /// An empty cart that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// An existing line for the product is incremented and keeps its
    /// colour; otherwise a new line with quantity one is appended.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        selected_color: Option<String>,
    ) -> Result<(), StorageError> {
        if let Some(line) = self.line_mut(&product_id) {
            line.quantity = line.quantity.incremented();
        } else {
            self.items.push(CartLineItem::new(product_id, selected_color));
        }
        self.persist()
    }

    /// Remove a product's line. Absent products are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), StorageError> {
        self.items.retain(|line| &line.product_id != product_id);
        self.persist()
    }

    /// Overwrite a line's quantity. Values below one are raised to one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StorageError> {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = Quantity::clamped(quantity);
        }
        self.persist()
    }

    /// Add one to a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn increment(&mut self, product_id: &ProductId) -> Result<(), StorageError> {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.incremented();
        }
        self.persist()
    }

    /// Take one from a line's quantity, stopping at one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn decrement(&mut self, product_id: &ProductId) -> Result<(), StorageError> {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.decremented();
        }
        self.persist()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart could not be persisted.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.product_id == product_id)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let envelope = PersistedCart {
            state: CartState {
                items: self.items.clone(),
            },
            version: CART_STORAGE_VERSION,
        };
        let json = serde_json::to_string(&envelope)?;
        self.storage.set(CART_STORAGE_KEY, &json).inspect_err(|e| {
            warn!(error = %e, "failed to persist cart");
        })
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

/// Load the persisted cart, falling back to empty on any problem.
fn hydrate(storage: &dyn CartStorage) -> Vec<CartLineItem> {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, "failed to read persisted cart, starting empty");
            return Vec::new();
        }
    };

    let persisted: PersistedCart<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(persisted) => persisted,
        Err(e) => {
            warn!(error = %e, "persisted cart is corrupt, starting empty");
            return Vec::new();
        }
    };

    if persisted.version != CART_STORAGE_VERSION {
        warn!(
            version = persisted.version,
            "persisted cart has an unknown version, starting empty"
        );
        return Vec::new();
    }

    let lines = persisted
        .state
        .items
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<StoredLine>(value) {
            Ok(line) => Some(CartLineItem::from(line)),
            Err(e) => {
                warn!(error = %e, "dropping unreadable cart line");
                None
            }
        })
        .collect();

    merge_duplicates(lines)
}

/// Fold repeated product ids into the first line, summing quantities.
fn merge_duplicates(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(existing) = merged
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            let sum = i64::from(existing.quantity.get()) + i64::from(item.quantity.get());
            existing.quantity = Quantity::clamped(sum);
        } else {
            merged.push(item);
        }
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::FileStorage;

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl CartStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let mut cart = CartStore::in_memory();
        for _ in 0..5 {
            cart.add_item(pid("p"), None).unwrap();
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity.get(), 5);
    }

    #[test]
    fn test_add_existing_keeps_original_color() {
        let mut cart = CartStore::in_memory();
        cart.add_item(pid("42"), None).unwrap();
        cart.add_item(pid("42"), Some("Noyer".to_string())).unwrap();

        assert_eq!(
            cart.items(),
            &[CartLineItem {
                product_id: pid("42"),
                quantity: Quantity::new(2).unwrap(),
                selected_color: None,
            }]
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartStore::in_memory();
        cart.add_item(pid("a"), None).unwrap();
        cart.add_item(pid("b"), None).unwrap();

        cart.remove_item(&pid("a")).unwrap();
        cart.remove_item(&pid("a")).unwrap();

        assert_eq!(cart.len(), 1);
        assert!(cart.get(&pid("a")).is_none());
        assert!(cart.get(&pid("b")).is_some());
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let mut cart = CartStore::in_memory();
        cart.add_item(pid("a"), None).unwrap();

        cart.update_quantity(&pid("a"), 7).unwrap();
        assert_eq!(cart.get(&pid("a")).unwrap().quantity.get(), 7);

        cart.update_quantity(&pid("a"), 0).unwrap();
        assert_eq!(cart.get(&pid("a")).unwrap().quantity.get(), 1);

        cart.update_quantity(&pid("a"), -3).unwrap();
        assert_eq!(cart.get(&pid("a")).unwrap().quantity.get(), 1);

        // Unknown ids are ignored rather than inserted.
        cart.update_quantity(&pid("zz"), 4).unwrap();
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = CartStore::in_memory();
        cart.add_item(pid("a"), None).unwrap();

        cart.increment(&pid("a")).unwrap();
        cart.increment(&pid("a")).unwrap();
        assert_eq!(cart.total_quantity(), 3);

        for _ in 0..5 {
            cart.decrement(&pid("a")).unwrap();
        }
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = CartStore::in_memory();
        cart.add_item(pid("a"), None).unwrap();
        cart.add_item(pid("b"), Some("Blanc".to_string())).unwrap();

        cart.clear().unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);

        cart.clear().unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();

        let mut cart = CartStore::open(FileStorage::open(dir.path()).unwrap());
        cart.add_item(pid("c"), None).unwrap();
        cart.add_item(pid("a"), Some("Rouge".to_string())).unwrap();
        cart.add_item(pid("b"), None).unwrap();
        cart.update_quantity(&pid("a"), 3).unwrap();
        let before = cart.items().to_vec();
        drop(cart);

        let reopened = CartStore::open(FileStorage::open(dir.path()).unwrap());
        assert_eq!(reopened.items(), before.as_slice());
    }

    #[test]
    fn test_persisted_envelope_format() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());
        cart.add_item(pid("42"), None).unwrap();
        cart.add_item(pid("42"), None).unwrap();

        let raw = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "state": {"items": [{"productId": "42", "quantity": 2}]},
                "version": 0
            })
        );
    }

    #[test]
    fn test_corrupt_data_yields_empty_cart() {
        for raw in [
            "not json",
            r#"{"state":{"items":"a"},"version":0}"#,
            r#"{"state":{"items":[]},"version":3}"#,
        ] {
            let storage = MemoryStorage::new();
            storage.set(CART_STORAGE_KEY, raw).unwrap();
            assert!(CartStore::open(storage).is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_bad_lines_do_not_discard_good_ones() {
        let storage = MemoryStorage::new();
        storage
            .set(
                CART_STORAGE_KEY,
                r#"{"state":{"items":[
                    {"productId":"a","quantity":3},
                    {"productId":"b","quantity":0},
                    {"productId":"c","quantity":-4},
                    {"quantity":2},
                    {"productId":"d","quantity":"deux"}
                ]},"version":0}"#,
            )
            .unwrap();

        let cart = CartStore::open(storage);
        let kept: Vec<_> = cart
            .items()
            .iter()
            .map(|line| (line.product_id.to_string(), line.quantity.get()))
            .collect();
        assert_eq!(
            kept,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 1),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_hydrate_merges_duplicate_lines() {
        let storage = MemoryStorage::new();
        storage
            .set(
                CART_STORAGE_KEY,
                r#"{"state":{"items":[
                    {"productId":"a","quantity":2,"selectedColor":"Gris"},
                    {"productId":"b","quantity":1},
                    {"productId":"a","quantity":3}
                ]},"version":0}"#,
            )
            .unwrap();

        let cart = CartStore::open(storage);
        assert_eq!(cart.len(), 2);
        let a = cart.get(&pid("a")).unwrap();
        assert_eq!(a.quantity.get(), 5);
        assert_eq!(a.selected_color.as_deref(), Some("Gris"));
    }

    #[test]
    fn test_failed_write_keeps_in_memory_change() {
        let mut cart = CartStore::open(ReadOnlyStorage);
        assert!(cart.add_item(pid("a"), None).is_err());
        assert_eq!(cart.len(), 1);
    }
}
