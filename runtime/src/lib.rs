//! # Bookshop Runtime
//!
//! Runtime implementation for the Bookshop storefront architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling for the storefront's state containers.
//!
//! ## Core Components
//!
//! - **Store**: owns state, applies the reducer, executes effects
//! - **Effect execution**: `Effect::Persist` serializes the whole state to the
//!   environment's storage under the environment's key
//! - **Observers**: callbacks notified after every dispatch, so every consumer
//!   reads the post-mutation state once `send` returns
//!
//! The runtime is deliberately synchronous and single-threaded: every
//! dispatch runs to completion on the caller's thread, state is replaced
//! atomically before any observer runs, and the only I/O is the synchronous
//! persistence write.
//!
//! ## Example
//!
//! ```ignore
//! use bookshop_runtime::Store;
//!
//! let mut store = Store::restore(CartReducer::new(), environment);
//!
//! // Send an action
//! store.send(CartAction::Clear);
//!
//! // Read state
//! let count = store.state(|s| s.count());
//! ```

use std::marker::PhantomData;

use bookshop_core::effect::Effect;
use bookshop_core::environment::StorageEnvironment;
use bookshop_core::reducer::Reducer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub use error::StoreError;

/// Error types for the Store runtime
pub mod error {
    use bookshop_core::environment::StorageError;
    use thiserror::Error;

    /// Errors that can occur while persisting state
    ///
    /// These are never returned from `send`: the in-memory state stays
    /// authoritative for the session and the error is recorded on the store,
    /// where [`Store::last_persist_error`](crate::Store::last_persist_error)
    /// exposes it for inspection.
    #[derive(Clone, Debug, Error, PartialEq, Eq)]
    pub enum StoreError {
        /// The state could not be serialized
        #[error("failed to serialize state: {0}")]
        Serialize(String),

        /// The storage backend rejected the write
        #[error(transparent)]
        Storage(#[from] StorageError),
    }
}

/// Observer callback invoked with the state after every dispatch
type Observer<S> = Box<dyn Fn(&S)>;

/// The Store - the runtime that owns state and coordinates everything
///
/// The store is an explicitly constructed value: consumers receive a handle
/// to it rather than reaching for ambient global state. All mutations go
/// through [`send`](Store::send); reads go through [`state`](Store::state).
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let mut store = Store::new(
///     CartState::default(),
///     CartReducer::new(),
///     environment,
/// );
///
/// store.send(CartAction::Add { book, qty: 1 });
/// let subtotal = store.state(CartState::subtotal);
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: S,
    reducer: R,
    environment: E,
    observers: Vec<Observer<S>>,
    last_persist_error: Option<StoreError>,
    _action: PhantomData<fn(A)>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// # Arguments
    ///
    /// - `initial_state`: The starting state for the store
    /// - `reducer`: The reducer implementation (business logic)
    /// - `environment`: Injected dependencies
    #[must_use]
    pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: initial_state,
            reducer,
            environment,
            observers: Vec::new(),
            last_persist_error: None,
            _action: PhantomData,
        }
    }

    /// Query the current state through a closure
    ///
    /// # Example
    ///
    /// ```ignore
    /// let count = store.state(|s| s.count());
    /// ```
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        f(&self.state)
    }

    /// Register an observer invoked with the new state after every dispatch
    ///
    /// Observers run synchronously at the end of [`send`](Store::send), after
    /// effects have executed, so every consumer observes the post-mutation
    /// state as soon as `send` returns.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&S) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// The most recent persistence failure, if the last persist attempt failed
    ///
    /// Cleared by the next successful persist. Persistence is a convenience,
    /// not a correctness requirement: a set error means the cart behaves
    /// normally for this session but will not survive a reload.
    #[must_use]
    pub const fn last_persist_error(&self) -> Option<&StoreError> {
        self.last_persist_error.as_ref()
    }

    /// The environment this store was built with
    #[must_use]
    pub const fn environment(&self) -> &E {
        &self.environment
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Serialize + DeserializeOwned + Default,
    A: std::fmt::Debug,
    E: StorageEnvironment,
{
    /// Create a store by rehydrating persisted state from the environment
    ///
    /// Reads the environment's storage key and deserializes the value into
    /// `S`. An absent or unreadable value falls back to `S::default()`;
    /// rehydration never fails outward.
    #[must_use]
    pub fn restore(reducer: R, environment: E) -> Self {
        let key = environment.storage_key();
        let state = match environment.storage().get(key) {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(state) => {
                    debug!(key, "rehydrated persisted state");
                    state
                }
                Err(error) => {
                    debug!(key, %error, "discarding unreadable persisted state");
                    S::default()
                }
            },
            None => {
                debug!(key, "no persisted state, starting empty");
                S::default()
            }
        };
        Self::new(state, reducer, environment)
    }

    /// Send an action to the store
    ///
    /// Applies the reducer, executes the returned effects, then notifies all
    /// observers with the new state. Runs to completion synchronously; state
    /// is fully updated before any observer or subsequent read sees it.
    ///
    /// Persistence failures are swallowed: they are logged, recorded in
    /// [`last_persist_error`](Store::last_persist_error), and the in-memory
    /// state remains authoritative for the session.
    pub fn send(&mut self, action: A) {
        debug!(action = ?action, "dispatching action");
        let effects = self
            .reducer
            .reduce(&mut self.state, action, &self.environment);

        for effect in effects {
            match effect {
                Effect::None => {}
                Effect::Persist => self.persist(),
            }
        }

        for observer in &self.observers {
            observer(&self.state);
        }
    }

    /// Serialize the entire current state to storage, overwriting the
    /// previous value
    ///
    /// Full-state rewrite, not an incremental patch: state size is bounded by
    /// basket size.
    fn persist(&mut self) {
        let key = self.environment.storage_key();
        let result = serde_json::to_string(&self.state)
            .map_err(|error| StoreError::Serialize(error.to_string()))
            .and_then(|payload| {
                self.environment
                    .storage()
                    .put(key, &payload)
                    .map_err(StoreError::from)
            });

        match result {
            Ok(()) => {
                self.last_persist_error = None;
            }
            Err(error) => {
                warn!(key, %error, "state persistence failed, in-memory state remains authoritative");
                self.last_persist_error = Some(error);
            }
        }
    }
}
