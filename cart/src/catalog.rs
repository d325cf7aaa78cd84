//! Catalog provider.
//!
//! The cart never fetches catalog data itself: callers resolve a [`BookRef`]
//! through a [`Catalog`] and pass it into `CartAction::Add`. The bundled
//! storefront ships its catalog as a static JSON array, modeled here by
//! [`StaticCatalog`].

use thiserror::Error;

use crate::types::BookRef;

/// Errors loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog payload is not a valid JSON array of book records
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Lookup interface the cart's callers consume
pub trait Catalog {
    /// The book with the given id, or `None` if the catalog has no such entry
    fn book(&self, book_id: &str) -> Option<BookRef>;
}

/// Catalog built from a bundled JSON array of book records
///
/// Records without prices are tolerated (the cart prices them with its
/// fallback); fields beyond the ones the cart needs are ignored.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    books: Vec<BookRef>,
}

impl StaticCatalog {
    /// Parse a catalog from its bundled JSON form
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the payload is not a JSON
    /// array of book records.
    pub fn from_json(payload: &str) -> Result<Self, CatalogError> {
        let books = serde_json::from_str(payload)?;
        Ok(Self { books })
    }

    /// All books, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &BookRef> {
        self.books.iter()
    }

    /// Number of catalog entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn book(&self, book_id: &str) -> Option<BookRef> {
        self.books.iter().find(|b| b.book_id == book_id).cloned()
    }
}
