//! Configuration read from the environment.

use std::env;
use std::error::Error;
use std::fmt::{self, Display};

use vroomy_http_model::{HttpConfig, HttpConfigBuilder};

/// Variable holding the base URL of the prediction service.
pub const BASE_URL_VAR: &str = "VROOMY_BASE_URL";
/// Variable holding the endpoint path, `/predict` when unset.
pub const ENDPOINT_VAR: &str = "VROOMY_ENDPOINT";
/// Base URL used by development builds when none is configured.
pub const DEV_BASE_URL: &str = "http://127.0.0.1:8000";

/// The error returned when the environment lacks a required setting.
#[derive(Debug, PartialEq, Eq)]
pub struct MissingVar(pub &'static str);

impl Display for MissingVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} environment variable is not set", self.0)
    }
}

impl Error for MissingVar {}

/// Reads the service configuration from the process environment.
///
/// Debug builds fall back to [`DEV_BASE_URL`], release builds require
/// [`BASE_URL_VAR`].
pub fn from_env() -> Result<HttpConfig, MissingVar> {
    from_lookup(|name| env::var(name).ok(), !cfg!(debug_assertions))
}

/// Builds the service configuration from an arbitrary variable lookup.
pub fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
    release: bool,
) -> Result<HttpConfig, MissingVar> {
    let base_url = match lookup(BASE_URL_VAR).filter(|v| !v.is_empty()) {
        Some(base_url) => base_url,
        None if release => return Err(MissingVar(BASE_URL_VAR)),
        None => {
            debug!("{BASE_URL_VAR} is not set, using {DEV_BASE_URL}");
            DEV_BASE_URL.to_owned()
        }
    };

    let mut builder = HttpConfigBuilder::with_base_url(base_url);
    if let Some(endpoint) = lookup(ENDPOINT_VAR) {
        builder = builder.with_endpoint(endpoint);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_configured_url() {
        let lookup = lookup_in(&[
            (BASE_URL_VAR, "https://estimator.example.com"),
            (ENDPOINT_VAR, "/v2/predict"),
        ]);
        let config = from_lookup(lookup, true).unwrap();
        assert_eq!(
            config.endpoint_url(),
            "https://estimator.example.com/v2/predict"
        );
    }

    #[test]
    fn test_dev_fallback() {
        let config = from_lookup(lookup_in(&[]), false).unwrap();
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:8000/predict");
    }

    #[test]
    fn test_release_requires_url() {
        let err = from_lookup(lookup_in(&[(BASE_URL_VAR, "")]), true)
            .unwrap_err();
        assert_eq!(err, MissingVar(BASE_URL_VAR));
        assert_eq!(
            err.to_string(),
            "VROOMY_BASE_URL environment variable is not set"
        );
    }
}
