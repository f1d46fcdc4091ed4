/// Connection settings for the carousel API.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Base URL including the version prefix, without a trailing slash.
    pub api_url: String,
    /// Bearer token sent with every request.
    pub access_token: String,
}

const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

impl EditorConfig {
    /// Load configuration from the environment (`.env` is honoured).
    ///
    /// | Env Var                 | Required | Default                         |
    /// |-------------------------|----------|---------------------------------|
    /// | `CAROUSEL_API_URL`      | no       | `http://localhost:3000/api/v1`  |
    /// | `CAROUSEL_ACCESS_TOKEN` | **yes**  | --                              |
    ///
    /// # Panics
    ///
    /// Panics if `CAROUSEL_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("CAROUSEL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let access_token = std::env::var("CAROUSEL_ACCESS_TOKEN")
            .expect("CAROUSEL_ACCESS_TOKEN must be set in the environment");

        Self::new(api_url, access_token)
    }

    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }
}
