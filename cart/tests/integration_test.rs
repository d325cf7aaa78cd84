//! Integration tests for the cart and favorites stores
//!
//! These exercise the full flow: dispatch through the store runtime,
//! persistence to storage, rehydration in a later session, and the silent
//! degradation paths.

use std::cell::RefCell;
use std::rc::Rc;

use bookshop_cart::{
    BookRef, CART_STORAGE_KEY, CartAction, CartState, FAVORITES_STORAGE_KEY, FavoritesAction,
    FavoritesState, cart_store, favorites_store,
};
use bookshop_core::environment::{MemoryStorage, Storage};
use bookshop_testing::FailingStorage;

fn book(id: &str, price: u64) -> BookRef {
    BookRef::new(id).with_price(price)
}

#[test]
fn add_then_read_totals() {
    let mut store = cart_store(MemoryStorage::new());

    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 1,
    });

    assert_eq!(store.state(CartState::count), 1);
    assert_eq!(store.state(CartState::subtotal), 100_000);

    // Adding the same book again accumulates into one line
    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 2,
    });

    assert_eq!(store.state(|s| s.len()), 1);
    assert_eq!(store.state(CartState::count), 3);
    assert_eq!(store.state(CartState::subtotal), 300_000);
}

#[test]
fn remove_then_cart_is_empty() {
    let mut store = cart_store(MemoryStorage::new());
    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 3,
    });

    store.send(CartAction::Remove {
        book_id: "b1".to_string(),
    });

    assert!(store.state(CartState::is_empty));
    assert_eq!(store.state(CartState::count), 0);
}

#[test]
fn sale_price_wins_over_list_price() {
    let mut store = cart_store(MemoryStorage::new());

    store.send(CartAction::Add {
        book: BookRef::new("b2").with_price(100_000).with_sale_price(80_000),
        qty: 1,
    });

    assert_eq!(store.state(CartState::subtotal), 80_000);
}

#[test]
fn cart_survives_a_reload() {
    let storage = MemoryStorage::new();

    {
        let mut store = cart_store(storage.clone());
        store.send(CartAction::Add {
            book: book("b1", 100_000),
            qty: 2,
        });
        store.send(CartAction::Add {
            book: book("b2", 90_000),
            qty: 1,
        });
    }

    // New store over the same storage plays the role of the next session
    let store = cart_store(storage);
    assert_eq!(store.state(|s| s.len()), 2);
    assert_eq!(store.state(CartState::count), 3);
    assert_eq!(store.state(CartState::subtotal), 290_000);
    // Insertion order survived the round trip
    assert_eq!(
        store.state(|s| s.lines[0].book.book_id.clone()),
        "b1".to_string()
    );
}

#[test]
fn corrupt_persisted_cart_falls_back_to_empty() {
    let storage = MemoryStorage::seeded(CART_STORAGE_KEY, "{\"lines\": not json");

    let store = cart_store(storage);

    assert!(store.state(CartState::is_empty));
    assert_eq!(store.state(CartState::count), 0);
    assert_eq!(store.state(CartState::subtotal), 0);
}

#[test]
fn failing_storage_degrades_silently() {
    let mut store = cart_store(FailingStorage);

    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 1,
    });

    // In-memory state is authoritative for the session
    assert_eq!(store.state(CartState::count), 1);
    // The degradation is recorded, not surfaced
    assert!(store.last_persist_error().is_some());
}

#[test]
fn noop_dispatch_keeps_recorded_degradation() {
    // Only a successful persist clears the recorded error; a no-op dispatch
    // leaves it in place.
    let mut store = cart_store(FailingStorage);
    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 1,
    });
    assert!(store.last_persist_error().is_some());

    store.send(CartAction::Remove {
        book_id: "missing".to_string(),
    });
    assert!(store.last_persist_error().is_some());
}

#[test]
fn observers_read_their_own_writes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_by_badge = Rc::clone(&seen);

    let mut store = cart_store(MemoryStorage::new());
    store.subscribe(move |state: &CartState| {
        seen_by_badge.borrow_mut().push(state.count());
    });

    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 1,
    });
    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 2,
    });
    store.send(CartAction::Clear);

    assert_eq!(*seen.borrow(), vec![1, 3, 0]);
}

#[test]
fn persisted_payload_is_the_whole_state() {
    let storage = MemoryStorage::new();
    let mut store = cart_store(storage.clone());

    store.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 2,
    });

    let payload = storage.get(CART_STORAGE_KEY).unwrap();
    let persisted: CartState = serde_json::from_str(&payload).unwrap();
    assert_eq!(persisted, store.state(Clone::clone));
}

#[test]
fn favorites_toggle_and_reload() {
    let storage = MemoryStorage::new();

    {
        let mut store = favorites_store(storage.clone());
        store.send(FavoritesAction::Toggle {
            book: BookRef::new("b1"),
        });
        store.send(FavoritesAction::Toggle {
            book: BookRef::new("b2"),
        });
        store.send(FavoritesAction::Toggle {
            book: BookRef::new("b1"),
        });
    }

    let store = favorites_store(storage);
    assert!(!store.state(|s| s.is_favorite("b1")));
    assert!(store.state(|s| s.is_favorite("b2")));
    assert_eq!(store.state(FavoritesState::count), 1);
}

#[test]
fn cart_and_favorites_keys_do_not_collide() {
    let storage = MemoryStorage::new();

    let mut cart = cart_store(storage.clone());
    let mut favorites = favorites_store(storage.clone());

    cart.send(CartAction::Add {
        book: book("b1", 100_000),
        qty: 1,
    });
    favorites.send(FavoritesAction::Toggle {
        book: BookRef::new("b2"),
    });

    assert!(storage.get(CART_STORAGE_KEY).is_some());
    assert!(storage.get(FAVORITES_STORAGE_KEY).is_some());
    assert_ne!(CART_STORAGE_KEY, FAVORITES_STORAGE_KEY);
}
