//! Storefront demo binary
//!
//! Rehydrates the cart from the storage directory, adds a couple of courses
//! and runs a debounced suggestion search against the configured services.
//!
//! ```text
//! STOREFRONT_STORAGE_DIR=/tmp/shop cargo run -p storefront -- rust
//! ```

use anyhow::Context;
use std::time::Duration;
use storefront::{CartItem, Storefront, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,storefront_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env().context("invalid configuration")?;
    tracing::info!(storage = %config.storage_dir.display(), "Loaded configuration");

    let storefront = Storefront::from_config(&config).context("failed to set up storefront")?;
    storefront.start().await?;

    let cart = storefront.cart();
    println!("Rehydrated cart: {} items, total {:.2}", cart.item_count().await, cart.total().await);

    for item in [
        CartItem::new("demo-rust", "Rust for Backend Developers", 49.99).with_instructor("Ferris"),
        CartItem::new("demo-async", "Async Rust in Practice", 29.5),
        CartItem::new("demo-rust", "Rust for Backend Developers", 49.99),
    ] {
        cart.add_item(item).await?.wait().await;
    }
    println!("Cart now: {} items, total {:.2}", cart.item_count().await, cart.total().await);

    let query = std::env::args().nth(1).unwrap_or_else(|| "rust".to_string());
    let suggestions = storefront.suggestions();
    suggestions.search_suggestions(query.as_str()).await?;

    // Let the debounce elapse and the request come back.
    tokio::time::sleep(config.debounce() + Duration::from_millis(50)).await;
    while suggestions.is_loading().await {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    match suggestions.error().await {
        Some(error) => println!("Suggestions for {query:?} failed: {error}"),
        None => {
            for suggestion in suggestions.suggestions().await {
                println!("  {} ({})", suggestion.name, suggestion.course_id);
            }
        },
    }

    let owned = storefront.purchased_courses().await;
    println!("Purchased courses: {}", owned.len());

    storefront.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
