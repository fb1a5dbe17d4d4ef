use std::env;

/// Origins allowed to call the API from a browser.
///
/// `CORS_ALLOWED_ORIGINS` is a comma-separated list. When unset the layer
/// mirrors the request origin, which matches the permissive setup the
/// front end expects during development.
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self { allowed_origins }
    }
}
