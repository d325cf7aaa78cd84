//! Reducer logic for the shopping cart.
//!
//! Pure state transitions only: the reducer clamps or no-ops invalid input,
//! updates the cart in place, and describes the persistence side effect for
//! the store runtime to execute. Nothing here can fail.

use std::marker::PhantomData;

use bookshop_core::environment::{Storage, StorageEnvironment};
use bookshop_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

use crate::types::{CART_STORAGE_KEY, CartAction, CartLine, CartState};

/// Environment dependencies for the cart reducer
///
/// The cart's only dependency is the persistence substrate. The reducer never
/// touches it; the store runtime uses it to execute `Effect::Persist` and to
/// rehydrate on startup.
#[derive(Clone, Debug)]
pub struct CartEnvironment<S: Storage> {
    /// Key-value backend the cart state is persisted to
    pub storage: S,
}

impl<S: Storage> CartEnvironment<S> {
    /// Creates a new `CartEnvironment`
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: Storage> StorageEnvironment for CartEnvironment<S> {
    fn storage(&self) -> &dyn Storage {
        &self.storage
    }

    fn storage_key(&self) -> &str {
        CART_STORAGE_KEY
    }
}

/// Reducer for the shopping cart
///
/// Generic over the storage type S so it pairs with any `CartEnvironment`.
#[derive(Clone, Copy, Debug)]
pub struct CartReducer<S> {
    _phantom: PhantomData<S>,
}

impl<S> CartReducer<S> {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S> Default for CartReducer<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a requested quantity to the `qty >= 1` invariant
fn clamp_qty(qty: i64) -> u32 {
    u32::try_from(qty.clamp(1, i64::from(u32::MAX))).unwrap_or(1)
}

impl<S: Storage> Reducer for CartReducer<S> {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment<S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        match action {
            CartAction::Add { book, qty } => {
                let qty = clamp_qty(qty);
                if let Some(line) = state
                    .lines
                    .iter_mut()
                    .find(|line| line.book.book_id == book.book_id)
                {
                    // Existing book keeps its position, quantity accumulates
                    line.qty = line.qty.saturating_add(qty);
                } else {
                    state.lines.push(CartLine { book, qty });
                }
                smallvec![Effect::Persist]
            }

            CartAction::Remove { book_id } => {
                let before = state.lines.len();
                state.lines.retain(|line| line.book.book_id != book_id);
                if state.lines.len() == before {
                    // Unknown book id: defined as a no-op, not an error
                    smallvec![Effect::None]
                } else {
                    smallvec![Effect::Persist]
                }
            }

            CartAction::SetQty { book_id, qty } => {
                if !state.contains(&book_id) {
                    return smallvec![Effect::None];
                }

                // Zero or negative quantity is a removal request
                if qty <= 0 {
                    state.lines.retain(|line| line.book.book_id != book_id);
                } else if let Some(line) = state
                    .lines
                    .iter_mut()
                    .find(|line| line.book.book_id == book_id)
                {
                    line.qty = clamp_qty(qty);
                }
                smallvec![Effect::Persist]
            }

            CartAction::Clear => {
                if state.lines.is_empty() {
                    smallvec![Effect::None]
                } else {
                    state.lines.clear();
                    smallvec![Effect::Persist]
                }
            }
        }
    }
}
