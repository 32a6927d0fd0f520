use crate::models::Product;
use crate::nutrients::{extract_nutrients, NutrientSummary};

/// A search result that passed [`filter_products`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub product: Product,
    pub summary: NutrientSummary,
    /// Lowercased `categories`
    pub categories: String,
    /// Lowercased `categories_tags`
    pub tags: Vec<String>,
}

/// Keep products that carry nutrient data and mention `query` in their name,
/// category string or one of their category tags. Response order is kept.
pub fn filter_products(products: &[Product], query: &str) -> Vec<SearchHit> {
    let query = query.to_lowercase();
    products
        .iter()
        .filter_map(|product| {
            let title = product.product_name.as_deref().unwrap_or_default().to_lowercase();
            let categories = product.categories.as_deref().unwrap_or_default().to_lowercase();
            let tags: Vec<String> = product.categories_tags.iter().map(|t| t.to_lowercase()).collect();
            let summary = extract_nutrients(&product.nutriments);

            if summary.is_empty() {
                return None;
            }
            let matches = (!title.is_empty() && title.contains(&query))
                || (!categories.is_empty() && categories.contains(&query))
                || tags.iter().any(|tag| tag.contains(&query));
            matches.then(|| SearchHit {
                product: product.clone(),
                summary,
                categories,
                tags,
            })
        })
        .collect()
}
