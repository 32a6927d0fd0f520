pub mod product;
pub mod product_response;
pub mod search_response;

pub use product::Product;
pub use product_response::ProductResponse;
pub use search_response::SearchResponse;
