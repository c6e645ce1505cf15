use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Storage
    pub database_path: String,

    // Admin auth (admin surface is open when unset)
    pub admin_api_key: Option<String>,

    // Translation provider
    pub translate_api_url: String,
    pub translate_api_key: Option<String>,
    pub translate_timeout_secs: u64,

    // Caching
    pub translation_cache_ttl_secs: u64,
    pub response_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/faq.db".to_string()),

            admin_api_key: std::env::var("ADMIN_API_KEY").ok(),

            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "https://libretranslate.com/translate".to_string()),
            translate_api_key: std::env::var("TRANSLATE_API_KEY").ok(),
            translate_timeout_secs: std::env::var("TRANSLATE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            translation_cache_ttl_secs: std::env::var("TRANSLATION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            response_cache_ttl_secs: std::env::var("RESPONSE_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        })
    }
}
