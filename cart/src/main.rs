//! Storefront demo binary
//!
//! Drives the cart and favorites stores against an in-process storage, the
//! way the storefront UI would, and shows rehydration across "sessions".

use bookshop_cart::{
    BookRef, CartAction, CartState, Catalog, FavoritesAction, FavoritesState, StaticCatalog,
    cart_store, favorites_store,
};
use bookshop_core::environment::MemoryStorage;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CATALOG_JSON: &str = r#"[
    { "book_id": "b1", "book_name": "The Alchemist", "price": 120000 },
    { "book_id": "b2", "book_name": "Norwegian Wood", "price": 100000, "sale_price": 80000 },
    { "book_id": "b3", "book_name": "Unpriced Galley" }
]"#;

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshop_cart=debug,bookshop_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Bookshop Cart: storefront state containers ===\n");

    let catalog = match StaticCatalog::from_json(CATALOG_JSON) {
        Ok(catalog) => catalog,
        Err(error) => {
            eprintln!("bundled catalog is unreadable: {error}");
            return;
        }
    };

    // One storage shared by both containers, standing in for browser-local
    // storage
    let storage = MemoryStorage::new();

    let mut cart = cart_store(storage.clone());
    cart.subscribe(|state: &CartState| {
        println!(
            "  [cart badge updated] {} items, subtotal {} VND",
            state.count(),
            state.subtotal()
        );
    });

    for (id, qty) in [("b1", 1), ("b2", 2), ("b3", 1), ("b1", 1)] {
        match catalog.book(id) {
            Some(book) => {
                println!(">>> Add {qty} × {id}");
                cart.send(CartAction::Add { book, qty });
            }
            None => println!(">>> {id} not in catalog, skipped"),
        }
    }

    println!("\n>>> SetQty b2 → 1");
    cart.send(CartAction::SetQty {
        book_id: "b2".to_string(),
        qty: 1,
    });

    println!(">>> Remove b3");
    cart.send(CartAction::Remove {
        book_id: "b3".to_string(),
    });

    let mut favorites = favorites_store(storage.clone());
    println!("\n>>> Toggle favorite b2, twice");
    for _ in 0..2 {
        favorites.send(FavoritesAction::Toggle {
            book: BookRef::new("b2"),
        });
    }
    println!(
        "Favorites count: {}",
        favorites.state(FavoritesState::count)
    );

    // A new store over the same storage plays the role of the next session
    let next_session = cart_store(storage);
    println!(
        "\nNext session rehydrated: {} items, subtotal {} VND",
        next_session.state(CartState::count),
        next_session.state(CartState::subtotal)
    );
}
