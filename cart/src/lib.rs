//! # Bookshop Cart
//!
//! The storefront's client-side state containers, built on the Bookshop
//! reducer architecture.
//!
//! This crate provides:
//! - The shopping cart: line items keyed by book id, derived subtotal and
//!   count, persisted as whole-state JSON under `"cart_v1"`
//! - The favorites bookshelf: a toggle-per-book list persisted under
//!   `"favorites_v1"`
//! - The catalog provider interface the cart's callers resolve books through
//!
//! ## Architecture
//!
//! Each container is a **pure reducer** applied by the synchronous store
//! runtime. Reducers clamp or no-op invalid input (there is no user-visible
//! failure path), and every state-changing transition asks the runtime to
//! rewrite the persisted state. A missing, corrupt, or unwritable backing
//! store degrades silently: the in-memory state stays authoritative for the
//! session.
//!
//! ## Example
//!
//! ```
//! use bookshop_cart::{BookRef, CartAction, CartState, cart_store};
//! use bookshop_core::environment::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut store = cart_store(storage.clone());
//!
//! let book = BookRef::new("b1").with_price(100_000);
//! store.send(CartAction::Add { book, qty: 1 });
//!
//! assert_eq!(store.state(CartState::count), 1);
//! assert_eq!(store.state(CartState::subtotal), 100_000);
//!
//! // A later session rehydrates from the same storage
//! let next_session = cart_store(storage);
//! assert_eq!(next_session.state(CartState::count), 1);
//! ```

use bookshop_core::environment::Storage;
use bookshop_runtime::Store;

pub mod catalog;
pub mod favorites;
pub mod reducer;
pub mod types;

pub use catalog::{Catalog, CatalogError, StaticCatalog};
pub use favorites::{
    FAVORITES_STORAGE_KEY, FavoritesAction, FavoritesEnvironment, FavoritesReducer, FavoritesState,
};
pub use reducer::{CartEnvironment, CartReducer};
pub use types::{BookRef, CART_STORAGE_KEY, CartAction, CartLine, CartState, DEFAULT_UNIT_PRICE};

/// Store type for the shopping cart
pub type CartStore<S> = Store<CartState, CartAction, CartEnvironment<S>, CartReducer<S>>;

/// Store type for the favorites bookshelf
pub type FavoritesStore<S> =
    Store<FavoritesState, FavoritesAction, FavoritesEnvironment<S>, FavoritesReducer<S>>;

/// Build a cart store rehydrated from `storage`
///
/// Reads `"cart_v1"`; an absent or unreadable value falls back to the empty
/// cart. Construction never fails.
#[must_use]
pub fn cart_store<S: Storage>(storage: S) -> CartStore<S> {
    Store::restore(CartReducer::new(), CartEnvironment::new(storage))
}

/// Build a favorites store rehydrated from `storage`
///
/// Reads `"favorites_v1"`; an absent or unreadable value falls back to the
/// empty shelf. Construction never fails.
#[must_use]
pub fn favorites_store<S: Storage>(storage: S) -> FavoritesStore<S> {
    Store::restore(FavoritesReducer::new(), FavoritesEnvironment::new(storage))
}
