// Proxy configuration

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub model: String,
    /// Provider credential. When absent the server still starts and every
    /// request fails with a server error.
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ProxyConfig {
    /// Empty strings from the environment count as no credential
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }
}
