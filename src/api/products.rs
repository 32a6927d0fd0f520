use super::client::OpenFoodFactsClient;
use crate::config::{ApiConfig, DEFAULT_PAGE_SIZE};
use crate::error::ApiError;
use crate::models::{ProductResponse, SearchResponse};
use crate::utils::path_segment;

/// Parameters of a single product lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeLookup {
    pub barcode: String,
    /// Overrides [`ApiConfig::product_fields`] when set
    pub fields: Option<String>,
    pub lang: String,
    pub country: String,
}

impl BarcodeLookup {
    pub fn new(barcode: &str, config: &ApiConfig) -> Self {
        Self {
            barcode: barcode.trim().to_string(),
            fields: None,
            lang: config.lang.clone(),
            country: config.country.clone(),
        }
    }

    pub fn fields(mut self, fields: &str) -> Self {
        self.fields = Some(fields.to_string());
        self
    }
}

/// Parameters of a full-text search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub term: String,
    pub page_size: u32,
    /// Overrides [`ApiConfig::search_fields`] when set
    pub fields: Option<String>,
    pub lang: String,
    pub country: String,
}

impl SearchQuery {
    pub fn new(term: &str, config: &ApiConfig) -> Self {
        Self {
            term: term.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            fields: None,
            lang: config.lang.clone(),
            country: config.country.clone(),
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn fields(mut self, fields: &str) -> Self {
        self.fields = Some(fields.to_string());
        self
    }
}

impl OpenFoodFactsClient {
    /// `GET /api/v2/product/{barcode}`
    ///
    /// A missing product is `Ok` with `product: None`, not an error.
    pub async fn fetch_by_barcode(&self, lookup: &BarcodeLookup) -> Result<ProductResponse, ApiError> {
        let endpoint = format!("/api/v2/product/{}", path_segment(&lookup.barcode));
        let fields = lookup
            .fields
            .clone()
            .unwrap_or_else(|| self.config().product_fields.clone());
        let params = [
            ("fields", fields),
            ("lc", lookup.lang.clone()),
            ("cc", lookup.country.clone()),
        ];
        self.get_json(&endpoint, &params).await
    }

    /// `GET /api/v2/search`
    pub async fn search_products(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        let fields = query
            .fields
            .clone()
            .unwrap_or_else(|| self.config().search_fields.clone());
        let params = [
            ("search_terms", query.term.clone()),
            ("fields", fields),
            ("page_size", query.page_size.to_string()),
            ("lc", query.lang.clone()),
            ("cc", query.country.clone()),
        ];
        let response: SearchResponse = self.get_json("/api/v2/search", &params).await?;
        tracing::debug!(term = %query.term, count = response.products.len(), "search returned");
        Ok(response)
    }
}
