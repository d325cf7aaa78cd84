//! # Bookshop Testing
//!
//! Testing utilities and helpers for the Bookshop storefront architecture.
//!
//! This crate provides:
//! - Mock implementations of the storage environment trait
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use bookshop_testing::{ReducerTest, assertions, test_storage};
//!
//! ReducerTest::new(CartReducer::new())
//!     .with_env(CartEnvironment::new(test_storage()))
//!     .given_state(CartState::new())
//!     .when_action(CartAction::Clear)
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
///
/// Mock implementations for testing:
/// - [`FailingStorage`](mocks::FailingStorage): every write fails, for the
///   degraded-persistence path
/// - [`test_storage`](mocks::test_storage): a fresh shared in-memory storage
pub mod mocks {
    use bookshop_core::environment::{MemoryStorage, Storage, StorageError};

    /// Storage whose writes always fail
    ///
    /// Simulates quota exhaustion or disabled browser storage. Reads behave
    /// as if nothing was ever stored.
    ///
    /// # Example
    ///
    /// ```
    /// use bookshop_core::environment::{Storage, StorageError};
    /// use bookshop_testing::mocks::FailingStorage;
    ///
    /// let storage = FailingStorage::default();
    /// assert_eq!(storage.get("cart_v1"), None);
    /// assert_eq!(storage.put("cart_v1", "{}"), Err(StorageError::QuotaExceeded));
    /// ```
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }
    }

    /// Create a fresh in-memory storage for a test
    ///
    /// Clones share the underlying map, so keep a clone to assert on what
    /// the store wrote.
    #[must_use]
    pub fn test_storage() -> MemoryStorage {
        MemoryStorage::new()
    }
}

// Re-export commonly used items
pub use mocks::{FailingStorage, test_storage};
