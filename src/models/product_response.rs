use serde::{Deserialize, Serialize};

use super::Product;

/// Body of `GET /api/v2/product/{barcode}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    pub product: Option<Product>,
    /// Server's explanation when `product` is missing, e.g. "product not found"
    #[serde(default)]
    pub status_verbose: Option<String>,
}

impl ProductResponse {
    /// The product, unless the lookup came back empty.
    pub fn found(&self) -> Option<&Product> {
        self.product.as_ref().filter(|p| !p.is_blank())
    }
}
