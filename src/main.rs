use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::env;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use goldsmith_backend::AppState;
use goldsmith_backend::handlers::{currency, metal, quote, variant};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,goldsmith_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Connect to database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let state = AppState { db };

    // Build router
    let app = Router::new()
        .route(
            "/api/currencies",
            get(currency::list_currencies).post(currency::create_currency),
        )
        .route("/api/currencies/{id}", delete(currency::delete_currency))
        .route("/api/currencies/{id}/base", post(currency::set_base_currency))
        .route(
            "/api/currencies/{id}/active",
            patch(currency::toggle_currency_active),
        )
        .route(
            "/api/currencies/{id}/rates",
            get(currency::get_currency_rates).post(currency::add_currency_rate),
        )
        .route("/api/metals", get(metal::list_metals).post(metal::create_metal))
        .route(
            "/api/metals/{id}",
            patch(metal::update_metal).delete(metal::delete_metal),
        )
        .route("/api/metals/{id}/move", post(metal::move_metal))
        .route("/api/metals/{id}/active", patch(metal::toggle_metal_active))
        .route(
            "/api/metals/{id}/reference-history",
            get(metal::get_metal_reference_history),
        )
        .route(
            "/api/metals/{id}/variants",
            get(variant::get_metal_variants).post(variant::create_variant),
        )
        .route(
            "/api/metals/{id}/favorite",
            delete(variant::clear_favorite_variant),
        )
        .route(
            "/api/variants/{id}",
            patch(variant::update_variant).delete(variant::delete_variant),
        )
        .route(
            "/api/variants/{id}/pricing",
            patch(variant::update_variant_pricing),
        )
        .route(
            "/api/variants/{id}/active",
            patch(variant::toggle_variant_active),
        )
        .route(
            "/api/variants/{id}/favorite",
            post(variant::set_favorite_variant),
        )
        .route(
            "/api/variants/{id}/quotes",
            get(quote::get_quote_history).post(quote::add_quote),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
