use serde::{Deserialize, Serialize};

use super::Product;

/// Body of `GET /api/v2/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}
