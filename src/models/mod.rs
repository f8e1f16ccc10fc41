pub mod common;
pub mod currency;
pub mod metal;
pub mod quote;
pub mod variant;
