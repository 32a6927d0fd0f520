use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_USER_AGENT: &str = concat!("kcal/", env!("CARGO_PKG_VERSION"), " (+https://github.com/openfoodfacts)");
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_LANG: &str = "ru";
pub const DEFAULT_COUNTRY: &str = "ru";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PANEL_PAGE_SIZE: u32 = 20;
pub const DEFAULT_PRODUCT_FIELDS: &str = "code,product_name,nutriments,brands,quantity,serving_size,language,lang,lc";
pub const DEFAULT_SEARCH_FIELDS: &str = "code,product_name,brands,nutriments,quantity,serving_size,ecoscore_grade,categories,categories_tags";

/// Everything the query client needs to talk to the product database.
///
/// Built from the environment by [`ApiConfig::from_env`], or by hand in tests
/// to point the client at a mock server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub lang: String,
    pub country: String,
    pub product_fields: String,
    pub search_fields: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            lang: DEFAULT_LANG.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            product_fields: DEFAULT_PRODUCT_FIELDS.to_string(),
            search_fields: DEFAULT_SEARCH_FIELDS.to_string(),
        }
    }
}

impl ApiConfig {
    /// Read `OFF_*` variables, falling back to the defaults above.
    pub fn from_env() -> Self {
        Self {
            base_url: get_base_url(),
            user_agent: env_or("OFF_USER_AGENT", DEFAULT_USER_AGENT),
            timeout: get_timeout(),
            lang: env_or("OFF_LANG", DEFAULT_LANG),
            country: env_or("OFF_COUNTRY", DEFAULT_COUNTRY),
            ..Self::default()
        }
    }

    /// Same defaults, different host. Used by tests against a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: sanitize_base_url(base_url),
            ..Self::default()
        }
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_base_url() -> String {
    sanitize_base_url(&env::var("OFF_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
}

pub fn get_timeout() -> Duration {
    let secs = env::var("OFF_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
