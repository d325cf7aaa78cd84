//! Domain types for the shopping cart.
//!
//! The cart references immutable catalog entries ([`BookRef`]) and keeps one
//! line per distinct book id, in insertion order. All monetary amounts are
//! non-negative integers in VND, so there is no fractional unit to model.

use serde::{Deserialize, Serialize};

/// Fallback unit price (VND) for catalog entries that carry no price at all
pub const DEFAULT_UNIT_PRICE: u64 = 150_000;

/// Storage key the cart state is persisted under
///
/// A schema change bumps the suffix (`cart_v2`) and discards old data; there
/// is no migrator.
pub const CART_STORAGE_KEY: &str = "cart_v1";

/// Immutable reference to a catalog entry
///
/// Owned by the catalog provider; the cart holds a read-only copy and only
/// the fields it needs for pricing. Unknown catalog fields are ignored when
/// deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    /// Unique catalog identifier
    pub book_id: String,
    /// List price, if the catalog carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    /// Discounted price; wins over `price` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<u64>,
}

impl BookRef {
    /// Create a reference with no pricing information
    #[must_use]
    pub fn new(book_id: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            price: None,
            sale_price: None,
        }
    }

    /// Set the list price
    #[must_use]
    pub const fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the sale price
    #[must_use]
    pub const fn with_sale_price(mut self, sale_price: u64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// The effective unit price: sale price, else list price, else the
    /// [`DEFAULT_UNIT_PRICE`] fallback
    #[must_use]
    pub const fn unit_price(&self) -> u64 {
        match (self.sale_price, self.price) {
            (Some(sale), _) => sale,
            (None, Some(price)) => price,
            (None, None) => DEFAULT_UNIT_PRICE,
        }
    }
}

/// One entry in the cart: a book and how many copies of it
///
/// Invariant: `qty >= 1` at all times. A line whose quantity would drop to
/// zero is removed instead, so a `CartLine` never represents "nothing".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The catalog entry this line refers to
    pub book: BookRef,
    /// Number of copies, always >= 1
    pub qty: u32,
}

impl CartLine {
    /// Price contribution of this line: unit price × quantity
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.book.unit_price() * u64::from(self.qty)
    }
}

/// The cart: an ordered sequence of lines, one per distinct book id
///
/// Created empty on first load or rehydrated from storage; mutated only
/// through [`CartAction`](crate::CartAction)s applied by the store. New books
/// append to the end; a book already in the cart keeps its position when its
/// quantity changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    /// Lines in insertion order
    pub lines: Vec<CartLine>,
}

impl CartState {
    /// Create an empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Sum of unit price × quantity over all lines
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of copies across all lines
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    /// Number of distinct books in the cart
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a book, if it is in the cart
    #[must_use]
    pub fn line(&self, book_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.book.book_id == book_id)
    }

    /// Whether a book is in the cart
    #[must_use]
    pub fn contains(&self, book_id: &str) -> bool {
        self.line(book_id).is_some()
    }
}

/// Mutations the presentation layer can request
///
/// None of these can fail: invalid input (non-positive quantities, unknown
/// book ids) is absorbed by clamping or treated as a no-op. Quantities are
/// taken as `i64` so that zero and negative requests are representable and
/// handled by policy rather than by the type system rejecting them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartAction {
    /// Add `qty` copies of a book (clamped to at least 1); merges into the
    /// existing line if the book is already in the cart
    Add {
        /// Resolved catalog reference, supplied by the caller
        book: BookRef,
        /// Requested number of copies
        qty: i64,
    },
    /// Remove a book's line entirely; no-op if absent
    Remove {
        /// Book to remove
        book_id: String,
    },
    /// Set a line's quantity; `qty <= 0` removes the line, absent id is a
    /// no-op
    SetQty {
        /// Book whose line is updated
        book_id: String,
        /// Requested quantity
        qty: i64,
    },
    /// Empty the cart
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_prefers_sale_price() {
        let book = BookRef::new("b1").with_price(100_000).with_sale_price(80_000);
        assert_eq!(book.unit_price(), 80_000);
    }

    #[test]
    fn unit_price_falls_back_to_list_price() {
        let book = BookRef::new("b1").with_price(100_000);
        assert_eq!(book.unit_price(), 100_000);
    }

    #[test]
    fn unit_price_falls_back_to_default() {
        let book = BookRef::new("b1");
        assert_eq!(book.unit_price(), DEFAULT_UNIT_PRICE);
    }

    #[test]
    fn line_total_multiplies_by_qty() {
        let line = CartLine {
            book: BookRef::new("b1").with_price(100_000),
            qty: 3,
        };
        assert_eq!(line.line_total(), 300_000);
    }

    #[test]
    fn empty_cart_derives_to_zero() {
        let state = CartState::new();
        assert!(state.is_empty());
        assert_eq!(state.count(), 0);
        assert_eq!(state.subtotal(), 0);
    }

    #[test]
    fn subtotal_sums_lines() {
        let state = CartState {
            lines: vec![
                CartLine {
                    book: BookRef::new("b1").with_price(100_000),
                    qty: 2,
                },
                CartLine {
                    book: BookRef::new("b2").with_sale_price(80_000),
                    qty: 1,
                },
            ],
        };
        assert_eq!(state.subtotal(), 280_000);
        assert_eq!(state.count(), 3);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = CartState {
            lines: vec![
                CartLine {
                    book: BookRef::new("b1").with_price(100_000),
                    qty: 2,
                },
                CartLine {
                    book: BookRef::new("b2"),
                    qty: 1,
                },
            ],
        };

        let payload = serde_json::to_string(&state).unwrap();
        let restored: CartState = serde_json::from_str(&payload).unwrap();

        // Same lines, same order, same quantities
        assert_eq!(restored, state);
    }

    #[test]
    fn book_ref_ignores_unknown_catalog_fields() {
        let payload = r#"{
            "book_id": "b1",
            "book_name": "The Alchemist",
            "cover_url": "https://example.com/b1.jpg",
            "price": 120000
        }"#;

        let book: BookRef = serde_json::from_str(payload).unwrap();
        assert_eq!(book.book_id, "b1");
        assert_eq!(book.price, Some(120_000));
        assert_eq!(book.sale_price, None);
    }
}
