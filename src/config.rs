//! Configuration options for the admin client

use std::time::Duration;

/// Configuration options for the admin client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Path segment every resource lives under
    pub api_prefix: String,

    /// Page size used when a list request does not name one
    pub page_size: u32,

    /// Sort applied to the background re-fetch after a mutation
    pub default_sort: Option<String>,

    /// Application name used in the `X-<app>-alert` response headers
    pub application_name: String,

    /// Whether list requests carry a `cacheBuster` parameter
    pub cache_buster: bool,

    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            api_prefix: "api".to_string(),
            page_size: 20,
            default_sort: Some("id,asc".to_string()),
            application_name: "shoesApp".to_string(),
            cache_buster: true,
            token: None,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the API prefix
    pub fn with_api_prefix(mut self, value: &str) -> Self {
        self.api_prefix = value.trim_matches('/').to_string();
        self
    }

    /// Set the default page size
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value;
        self
    }

    /// Set the sort used by background re-fetches
    pub fn with_default_sort(mut self, value: Option<&str>) -> Self {
        self.default_sort = value.map(str::to_string);
        self
    }

    /// Set the application name
    pub fn with_application_name(mut self, value: &str) -> Self {
        self.application_name = value.to_string();
        self
    }

    /// Enable or disable the cache busting parameter
    pub fn with_cache_buster(mut self, value: bool) -> Self {
        self.cache_buster = value;
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, value: &str) -> Self {
        self.token = Some(value.to_string());
        self
    }

    /// Name of the header carrying the alert key on successful mutations
    pub fn alert_header(&self) -> String {
        format!("x-{}-alert", self.application_name.to_ascii_lowercase())
    }

    /// Name of the header carrying the alert parameter
    pub fn alert_params_header(&self) -> String {
        format!("x-{}-params", self.application_name.to_ascii_lowercase())
    }
}
