use serde_json::{Map, Value};
use std::fmt;

/// The nutrient fields we surface, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NutrientKey {
    Kcal100g,
    Protein100g,
    Fat100g,
    Carbs100g,
    KcalServing,
    ProteinServing,
    FatServing,
    CarbsServing,
}

impl NutrientKey {
    pub const ALL: [NutrientKey; 8] = [
        NutrientKey::Kcal100g,
        NutrientKey::Protein100g,
        NutrientKey::Fat100g,
        NutrientKey::Carbs100g,
        NutrientKey::KcalServing,
        NutrientKey::ProteinServing,
        NutrientKey::FatServing,
        NutrientKey::CarbsServing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::Kcal100g => "kcal_100g",
            NutrientKey::Protein100g => "protein_100g",
            NutrientKey::Fat100g => "fat_100g",
            NutrientKey::Carbs100g => "carbs_100g",
            NutrientKey::KcalServing => "kcal_serving",
            NutrientKey::ProteinServing => "protein_serving",
            NutrientKey::FatServing => "fat_serving",
            NutrientKey::CarbsServing => "carbs_serving",
        }
    }

    /// Source keys in `nutriments`, first present wins.
    fn sources(&self) -> &'static [&'static str] {
        match self {
            NutrientKey::Kcal100g => &["energy-kcal_100g", "energy-kcal_value"],
            NutrientKey::Protein100g => &["proteins_100g"],
            NutrientKey::Fat100g => &["fat_100g"],
            NutrientKey::Carbs100g => &["carbohydrates_100g"],
            NutrientKey::KcalServing => &["energy-kcal_serving"],
            NutrientKey::ProteinServing => &["proteins_serving"],
            NutrientKey::FatServing => &["fat_serving"],
            NutrientKey::CarbsServing => &["carbohydrates_serving"],
        }
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized subset of a product's nutrient facts.
///
/// Holds only the keys that resolved to a value; an absent upstream field
/// never shows up here, not even as a placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientSummary {
    entries: Vec<(NutrientKey, f64)>,
}

impl NutrientSummary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: NutrientKey) -> Option<f64> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn contains_key(&self, key: NutrientKey) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        self.entries.iter().copied()
    }
}

impl fmt::Display for NutrientSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Map a `nutriments` object to a [`NutrientSummary`].
pub fn extract_nutrients(nutriments: &Map<String, Value>) -> NutrientSummary {
    let entries = NutrientKey::ALL
        .iter()
        .filter_map(|key| {
            key.sources()
                .iter()
                .find_map(|src| nutriments.get(*src).and_then(numeric_value))
                .map(|v| (*key, v))
        })
        .collect();
    NutrientSummary { entries }
}

// Numbers pass through; the database occasionally ships numeric strings.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
