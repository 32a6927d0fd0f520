// Product database API modules
pub mod client;
pub mod products;

// Re-export commonly used items
pub use client::{set_trace_requests, OpenFoodFactsClient};
pub use products::{BarcodeLookup, SearchQuery};
