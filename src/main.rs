use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use chrono::{Duration, Utc};
use recipe_catalog::catalog::memory::MemoryCatalog;
use recipe_catalog::catalog::store::RatingStore;
use recipe_catalog::catalog::types::*;
use recipe_catalog::discovery::config::DiscoveryConfig;
use recipe_catalog::discovery::handlers::*;
use recipe_catalog::discovery::service::CatalogService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = DEFAULT_BIND.parse()?;
    let mut demo = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                let value = args.get(i + 1).ok_or_else(|| {
                    anyhow::anyhow!("Usage: {} [--bind <addr:port>] [--demo]", args[0])
                })?;
                bind_addr = value.parse()?;
                i += 2;
            }
            "--demo" => {
                demo = true;
                i += 1;
            }
            other => {
                tracing::warn!("Ignoring unknown argument {}", other);
                i += 1;
            }
        }
    }

    // 1. Configuration:
    let config = DiscoveryConfig::from_env();
    tracing::info!(
        "Discovery config: cheap <= {}, quick <= {} min, max page size {}",
        config.cheap_price_threshold,
        config.quick_duration_threshold,
        config.max_page_size
    );

    // 2. Storage layer:
    let catalog = Arc::new(MemoryCatalog::new());
    if demo {
        seed_demo(&catalog)?;
        tracing::info!(
            "Seeded {} demo recipes with {} ratings",
            catalog.recipe_count(),
            catalog.rating_count()
        );
    }

    let service = CatalogService::in_memory(catalog, config);

    // 3. HTTP Router:
    let app = Router::new()
        .route("/api/recipes/filtered", get(handle_filtered))
        .route("/api/recipes/latest", get(handle_latest))
        .route("/api/recipes/user", get(handle_own_recipes))
        .route("/api/recipes", post(handle_create_recipe))
        .route(
            "/api/recipes/:id",
            get(handle_get_recipe)
                .put(handle_update_recipe)
                .delete(handle_delete_recipe),
        )
        .route("/api/recipes/:id/rating", put(handle_rate_recipe))
        .route(
            "/api/recipes/:id/favorite",
            post(handle_add_favorite).delete(handle_remove_favorite),
        )
        .route("/api/favorites", get(handle_favorites))
        .layer(Extension(service));

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// A small fixed catalog for trying the endpoints by hand.
fn seed_demo(catalog: &MemoryCatalog) -> anyhow::Result<()> {
    let now = Utc::now();
    let recipes = [
        ("Spaghetti Carbonara", 8.5, 25, DifficultyLevel::Easy, Category::Pasta, 120, 2),
        ("Lasagne", 14.0, 90, DifficultyLevel::Medium, Category::Pasta, 340, 20),
        ("Mushroom Risotto", 9.0, 40, DifficultyLevel::Medium, Category::Rice, 75, 6),
        ("Cheesecake", 11.0, 80, DifficultyLevel::Hard, Category::Cake, 210, 45),
        ("Beef Stir Fry", 12.5, 20, DifficultyLevel::Easy, Category::Meat, 60, 1),
        ("Vegetable Curry", 7.0, 35, DifficultyLevel::Easy, Category::Vegetarian, 15, 0),
    ];

    for (n, (name, price, duration, difficulty_level, category, views, age)) in
        recipes.into_iter().enumerate()
    {
        catalog.load(Recipe {
            id: RecipeId(n as u64 + 1),
            name: name.to_string(),
            price,
            duration,
            difficulty_level,
            category,
            view_count: views,
            created_at: now - Duration::days(age),
            owner_id: UserId::new("demo-chef"),
        });
    }

    let ratings: [(u64, &[u8]); 5] = [
        (1, &[5, 4, 5, 4]),
        (2, &[5, 5, 4, 5, 3, 4]),
        (3, &[4]),
        (4, &[3, 4, 5]),
        (5, &[2, 3]),
    ];
    for (id, values) in ratings {
        for (n, value) in values.iter().enumerate() {
            let user = UserId::new(format!("demo-user-{n}"));
            catalog.upsert_rating(&user, RecipeId(id), *value)?;
        }
    }

    Ok(())
}
