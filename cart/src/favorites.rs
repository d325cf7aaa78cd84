//! Favorites (bookshelf) state container.
//!
//! A second, much simpler reducer in the same shape as the cart: toggling a
//! book adds it to the shelf if absent and removes it if present. Order of
//! insertion is preserved and each book appears at most once.

use std::marker::PhantomData;

use bookshop_core::environment::{Storage, StorageEnvironment};
use bookshop_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use serde::{Deserialize, Serialize};

use crate::types::BookRef;

/// Storage key the favorites state is persisted under
pub const FAVORITES_STORAGE_KEY: &str = "favorites_v1";

/// The bookshelf: books the user marked as favorites, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesState {
    /// Favorited books, at most one entry per book id
    pub books: Vec<BookRef>,
}

impl FavoritesState {
    /// Create an empty bookshelf
    #[must_use]
    pub const fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Whether a book is on the shelf
    #[must_use]
    pub fn is_favorite(&self, book_id: &str) -> bool {
        self.books.iter().any(|book| book.book_id == book_id)
    }

    /// Number of favorited books
    #[must_use]
    pub fn count(&self) -> usize {
        self.books.len()
    }

    /// Whether the shelf is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Mutations for the bookshelf
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FavoritesAction {
    /// Add the book if absent, remove it if present
    Toggle {
        /// Resolved catalog reference
        book: BookRef,
    },
}

/// Environment dependencies for the favorites reducer
#[derive(Clone, Debug)]
pub struct FavoritesEnvironment<S: Storage> {
    /// Key-value backend the favorites state is persisted to
    pub storage: S,
}

impl<S: Storage> FavoritesEnvironment<S> {
    /// Creates a new `FavoritesEnvironment`
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: Storage> StorageEnvironment for FavoritesEnvironment<S> {
    fn storage(&self) -> &dyn Storage {
        &self.storage
    }

    fn storage_key(&self) -> &str {
        FAVORITES_STORAGE_KEY
    }
}

/// Reducer for the bookshelf
#[derive(Clone, Copy, Debug)]
pub struct FavoritesReducer<S> {
    _phantom: PhantomData<S>,
}

impl<S> FavoritesReducer<S> {
    /// Creates a new `FavoritesReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S> Default for FavoritesReducer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage> Reducer for FavoritesReducer<S> {
    type State = FavoritesState;
    type Action = FavoritesAction;
    type Environment = FavoritesEnvironment<S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        match action {
            FavoritesAction::Toggle { book } => {
                if state.is_favorite(&book.book_id) {
                    state.books.retain(|b| b.book_id != book.book_id);
                } else {
                    state.books.push(book);
                }
                smallvec![Effect::Persist]
            }
        }
    }
}
