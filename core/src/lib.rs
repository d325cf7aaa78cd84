//! # Bookshop Core
//!
//! Core traits and types for the Bookshop storefront architecture.
//!
//! This crate provides the fundamental abstractions for building the
//! client-side state containers of the storefront (shopping cart,
//! favorites) using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature (e.g. the cart's line items)
//! - **Action**: All possible inputs to a reducer (mutations requested by the UI)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits (the persistence substrate)
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use bookshop_core::*;
//!
//! // Define your state
//! #[derive(Clone, Debug, Default)]
//! struct CartState {
//!     lines: Vec<CartLine>,
//! }
//!
//! // Define your actions
//! #[derive(Clone, Debug)]
//! enum CartAction {
//!     Add { book: BookRef, qty: i64 },
//!     Remove { book_id: String },
//! }
//!
//! // Implement the reducer
//! impl Reducer for CartReducer {
//!     type State = CartState;
//!     type Action = CartAction;
//!     type Environment = CartEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CartState,
//!         action: CartAction,
//!         env: &CartEnvironment,
//!     ) -> SmallVec<[Effect; 4]> {
//!         // Business logic goes here
//!         smallvec![Effect::Persist]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
/// The store runtime applies them and executes the effects they return.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for CartReducer {
    ///     type State = CartState;
    ///     type Action = CartAction;
    ///     type Environment = CartEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut CartState,
    ///         action: CartAction,
    ///         env: &CartEnvironment,
    ///     ) -> SmallVec<[Effect; 4]> {
    ///         match action {
    ///             CartAction::Clear => {
    ///                 state.lines.clear();
    ///                 smallvec![Effect::Persist]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates (clamps / no-ops) the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// A vector of effects to be executed by the store runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the store runtime.
/// They are values (not execution) and are inspectable in tests.
pub mod effect {
    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed by the reducer. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store runtime.
    ///
    /// The storefront state containers have exactly one real side effect:
    /// writing the whole state to the persistence substrate after a mutation.
    /// Transitions that leave state untouched return [`Effect::None`], which
    /// lets tests distinguish a no-op from a state change.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Effect {
        /// No-op effect
        None,

        /// Serialize the entire current state to the environment's storage,
        /// overwriting any previous value under the environment's key
        Persist,
    }

    impl Effect {
        /// Whether this effect asks the runtime to persist state
        #[must_use]
        pub const fn is_persist(self) -> bool {
            matches!(self, Self::Persist)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter. The storefront's only dependency is the
/// browser-scoped key-value persistence substrate, modeled by [`Storage`].
pub mod environment {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use thiserror::Error;

    /// Errors a storage backend can signal on write
    ///
    /// These never propagate out of the store runtime: a failed write leaves
    /// the in-memory state authoritative for the session and is recorded as a
    /// recoverable degradation, not surfaced to callers.
    #[derive(Clone, Debug, Error, PartialEq, Eq)]
    pub enum StorageError {
        /// The backend rejected the write for lack of space
        #[error("storage quota exceeded")]
        QuotaExceeded,

        /// The backend is disabled or otherwise unusable
        #[error("storage unavailable: {0}")]
        Unavailable(String),
    }

    /// Storage trait - abstracts the key-value persistence substrate
    ///
    /// Models browser-local storage: string keys, string values, durable
    /// across sessions but not across devices or cleared storage. Reads are
    /// infallible (an unreadable value is indistinguishable from an absent
    /// one); writes can fail and the failure is recoverable.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshop_core::environment::{MemoryStorage, Storage};
    ///
    /// let storage = MemoryStorage::new();
    /// assert_eq!(storage.get("cart_v1"), None);
    /// storage.put("cart_v1", "{\"lines\":[]}").unwrap();
    /// assert_eq!(storage.get("cart_v1").as_deref(), Some("{\"lines\":[]}"));
    /// ```
    pub trait Storage {
        /// Read the value stored under `key`, if any
        fn get(&self, key: &str) -> Option<String>;

        /// Write `value` under `key`, overwriting any previous value
        ///
        /// # Errors
        ///
        /// Returns a [`StorageError`] when the backend cannot complete the
        /// write (quota exceeded, storage disabled).
        fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
    }

    /// Environments that carry a storage handle and a fixed key
    ///
    /// The store runtime uses this to execute `Effect::Persist` and to
    /// rehydrate state on startup. Each state container owns one key
    /// (`"cart_v1"`, `"favorites_v1"`); a schema change bumps the key suffix
    /// and discards old data, there is no migrator.
    pub trait StorageEnvironment {
        /// The storage backend state is persisted to
        fn storage(&self) -> &dyn Storage;

        /// The fixed key this environment's state lives under
        fn storage_key(&self) -> &str;
    }

    /// In-process storage backed by a shared hash map
    ///
    /// The production stand-in for browser-local storage: clones share the
    /// underlying map, so a second consumer (or a test) can observe what the
    /// store wrote.
    #[derive(Clone, Debug, Default)]
    pub struct MemoryStorage {
        cells: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        /// Create an empty storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a storage pre-seeded with a single key-value pair
        ///
        /// Useful for rehydration tests and for simulating a previous session.
        #[must_use]
        pub fn seeded(key: impl Into<String>, value: impl Into<String>) -> Self {
            let storage = Self::new();
            if let Ok(mut cells) = storage.cells.lock() {
                cells.insert(key.into(), value.into());
            }
            storage
        }
    }

    impl Storage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.cells.lock().ok()?.get(key).cloned()
        }

        fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let mut cells = self
                .cells
                .lock()
                .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
            cells.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{MemoryStorage, Storage};

    #[test]
    fn effect_is_persist() {
        assert!(Effect::Persist.is_persist());
        assert!(!Effect::None.is_persist());
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);

        storage.put("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));

        storage.put("k", "v2").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v2"));
    }

    #[test]
    fn memory_storage_clones_share_cells() {
        let storage = MemoryStorage::new();
        let view = storage.clone();

        storage.put("k", "v").unwrap();
        assert_eq!(view.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn seeded_storage_contains_value() {
        let storage = MemoryStorage::seeded("cart_v1", "{\"lines\":[]}");
        assert_eq!(storage.get("cart_v1").as_deref(), Some("{\"lines\":[]}"));
    }
}
