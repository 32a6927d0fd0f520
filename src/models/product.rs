use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A product record as returned by the product database.
///
/// Every field is optional on the wire; only the fields requested through
/// `fields=` are present. Decoding is lenient per field so one odd record
/// cannot fail a whole search page: scalars become strings, anything else
/// is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brands: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub serving_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub categories: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub categories_tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub nutriments: Map<String, Value>,
}

impl Product {
    /// An empty `product` object carries nothing worth rendering.
    pub fn is_blank(&self) -> bool {
        [
            &self.code,
            &self.product_name,
            &self.brands,
            &self.quantity,
            &self.serving_size,
            &self.categories,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, str::is_empty))
            && self.categories_tags.is_empty()
            && self.nutriments.is_empty()
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}
