//! The search panel: two input rows, two actions and a read-only output area.
//!
//! The panel knows nothing about the terminal. The front-end copies user text
//! into [`SearchPanel::barcode_input`] / [`SearchPanel::name_input`], fires the
//! matching action and draws [`SearchPanel::output`].

use crate::api::{BarcodeLookup, OpenFoodFactsClient, SearchQuery};
use crate::config::PANEL_PAGE_SIZE;
use crate::filter::{filter_products, SearchHit};
use crate::models::Product;
use crate::nutrients::extract_nutrients;

pub const WINDOW_TITLE: &str = "Поиск калорийности продуктов";
pub const BARCODE_PLACEHOLDER: &str = "Введите штрихкод";
pub const BARCODE_BUTTON: &str = "Поиск по штрихкоду";
pub const NAME_PLACEHOLDER: &str = "Введите название";
pub const NAME_BUTTON: &str = "Поиск по названию или категории";

pub const EMPTY_BARCODE_PROMPT: &str = "Введите штрихкод!";
pub const EMPTY_NAME_PROMPT: &str = "Введите название";
pub const PRODUCT_NOT_FOUND: &str = "Продукт не найден";
pub const NO_MATCHING_PRODUCTS: &str = "Нет продуктов с подходящим названием или категорией.";
pub const REQUEST_ERROR_PREFIX: &str = "Ошибка запроса";

/// `AwaitingResponse` only spans the request inside an action handler. The
/// handler holds `&mut SearchPanel` across the await, so callers always see
/// `Idle` once the action returns, whatever its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    AwaitingResponse,
}

/// What an action ended with. The rendered text is in [`SearchPanel::output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Input was blank; no request was made
    EmptyInput,
    /// At least one product was rendered
    Found(usize),
    /// The request succeeded but nothing matched
    NotFound,
    /// The request failed; carries the failure description
    Failed(String),
}

/// Identifies which action a UI event should trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    BarcodeSearch,
    NameSearch,
}

pub struct SearchPanel {
    client: OpenFoodFactsClient,
    pub barcode_input: String,
    pub name_input: String,
    output: String,
    state: PanelState,
}

impl SearchPanel {
    pub fn new(client: OpenFoodFactsClient) -> Self {
        Self {
            client,
            barcode_input: String::new(),
            name_input: String::new(),
            output: String::new(),
            state: PanelState::Idle,
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Dispatch a UI event to its handler.
    pub async fn trigger(&mut self, action: PanelAction) -> ActionOutcome {
        match action {
            PanelAction::BarcodeSearch => self.on_barcode_search().await,
            PanelAction::NameSearch => self.on_name_search().await,
        }
    }

    pub async fn on_barcode_search(&mut self) -> ActionOutcome {
        let barcode = self.barcode_input.trim().to_string();
        if barcode.is_empty() {
            return self.finish(ActionOutcome::EmptyInput, EMPTY_BARCODE_PROMPT.to_string());
        }

        self.state = PanelState::AwaitingResponse;
        let lookup = BarcodeLookup::new(&barcode, self.client.config());
        match self.client.fetch_by_barcode(&lookup).await {
            Ok(response) => match response.found() {
                Some(product) => {
                    let text = format_product(product);
                    self.finish(ActionOutcome::Found(1), text)
                }
                None => {
                    tracing::debug!(%barcode, status = ?response.status_verbose, "product not found");
                    self.finish(ActionOutcome::NotFound, PRODUCT_NOT_FOUND.to_string())
                }
            },
            Err(e) => {
                tracing::warn!(%barcode, error = %e, "barcode lookup failed");
                let description = e.to_string();
                let text = format!("{}: {}", REQUEST_ERROR_PREFIX, description);
                self.finish(ActionOutcome::Failed(description), text)
            }
        }
    }

    pub async fn on_name_search(&mut self) -> ActionOutcome {
        let term = self.name_input.trim().to_lowercase();
        if term.is_empty() {
            return self.finish(ActionOutcome::EmptyInput, EMPTY_NAME_PROMPT.to_string());
        }

        self.state = PanelState::AwaitingResponse;
        let query = SearchQuery::new(&term, self.client.config()).page_size(PANEL_PAGE_SIZE);
        match self.client.search_products(&query).await {
            Ok(response) => {
                let hits = filter_products(&response.products, &term);
                tracing::debug!(%term, received = response.products.len(), kept = hits.len(), "search filtered");
                if hits.is_empty() {
                    self.finish(ActionOutcome::NotFound, NO_MATCHING_PRODUCTS.to_string())
                } else {
                    let text = format_hits(&hits);
                    self.finish(ActionOutcome::Found(hits.len()), text)
                }
            }
            Err(e) => {
                tracing::warn!(%term, error = %e, "search failed");
                let description = e.to_string();
                let text = format!("{}: {}", REQUEST_ERROR_PREFIX, description);
                self.finish(ActionOutcome::Failed(description), text)
            }
        }
    }

    fn finish(&mut self, outcome: ActionOutcome, text: String) -> ActionOutcome {
        self.output = text;
        self.state = PanelState::Idle;
        outcome
    }
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}

/// Detail view for a single product.
pub fn format_product(product: &Product) -> String {
    let summary = extract_nutrients(&product.nutriments);
    format!(
        "Название: {}\nБренд: {}\nУпаковка: {}\nПорция: {}\nКатегории: {}\nНутриенты: {}\n",
        or_dash(product.product_name.as_deref()),
        or_dash(product.brands.as_deref()),
        or_dash(product.quantity.as_deref()),
        or_dash(product.serving_size.as_deref()),
        or_dash(product.categories.as_deref()),
        summary,
    )
}

/// Numbered blocks, one per hit, separated by a blank line.
pub fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "Результат {}:\nШтрихкод: {}\nНазвание: {}\nКатегории: {}\nКатегории-теги: {}\nБренд: {}\nНутриенты: {}\n",
                i + 1,
                or_dash(hit.product.code.as_deref()),
                or_dash(hit.product.product_name.as_deref()),
                hit.categories,
                hit.tags.join(", "),
                or_dash(hit.product.brands.as_deref()),
                hit.summary,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
