// src/lib.rs

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod currencies;
    pub mod currency_rates;
    pub mod metal_reference_history;
    pub mod metals;
    pub mod quotes;
    pub mod variants;
}

pub mod services {
    pub mod currency_registry;
    pub mod error;
    pub mod favorites;
    pub mod metal_registry;
    pub mod quote_book;
    pub mod rate_store;
    pub mod variant_pricing;
}

pub mod models;
pub mod handlers;
