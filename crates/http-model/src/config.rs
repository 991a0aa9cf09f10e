use std::fmt::Debug;

const DEFAULT_ENDPOINT: &str = "/predict";

/// Builder for [`HttpConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpConfigBuilder {
    base_url: String,
    endpoint: Option<String>,
}

impl HttpConfigBuilder {
    /// Creates a builder with the given base URL of the service.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: None,
        }
    }

    /// Sets a custom endpoint path, `/predict` by default.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpConfig {
        HttpConfig {
            base_url: self.base_url,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

impl Debug for HttpConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfigBuilder")
            .field("base_url", &self.base_url)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Configuration for the HTTP prediction provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpConfig {
    pub(crate) base_url: String,
    pub(crate) endpoint: String,
}

impl HttpConfig {
    /// Returns the full URL requests are posted to.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            return base.to_owned();
        }
        format!("{base}/{endpoint}")
    }
}

impl Debug for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfig")
            .field("base_url", &self.base_url)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
