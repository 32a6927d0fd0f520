// URL handling utilities
pub mod url_builder;
pub mod query_string;

pub use url_builder::{absolute_url, path_segment};
pub use query_string::build_query_string;
