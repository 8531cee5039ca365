//! Client configuration.

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Path prefix every backend endpoint lives under.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "CHECKLIST_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend, e.g. `http://localhost:8080`.
    pub server_url: String,
    /// Path prefix joined onto `server_url`, e.g. `/api`.
    pub api_prefix: String,
}

impl ClientConfig {
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }

    /// Read the server URL from `CHECKLIST_API_URL`, falling back to the default.
    pub fn from_env() -> Self {
        let server_url =
            std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::new(&server_url)
    }

    /// `server_url` and `api_prefix` joined with exactly one slash between
    /// them and no trailing slash.
    pub fn base_url(&self) -> String {
        let server = self.server_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            server.to_string()
        } else {
            format!("{}/{}", server, prefix)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ClientConfig::default().base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_base_url_trims_slashes() {
        let config = ClientConfig {
            server_url: "https://checklist.example.com/".into(),
            api_prefix: "/api/".into(),
        };
        assert_eq!(config.base_url(), "https://checklist.example.com/api");
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(SERVER_URL_ENV, "http://checklist.internal:9090/");
        let config = ClientConfig::from_env();
        std::env::remove_var(SERVER_URL_ENV);
        assert_eq!(config.base_url(), "http://checklist.internal:9090/api");

        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn test_empty_prefix() {
        let config = ClientConfig {
            server_url: "http://127.0.0.1:9000".into(),
            api_prefix: String::new(),
        };
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
    }
}
