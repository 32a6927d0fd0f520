pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod nutrients;
pub mod panel;
pub mod utils;

pub use api::OpenFoodFactsClient;
pub use config::ApiConfig;
pub use error::ApiError;
