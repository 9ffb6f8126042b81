//! Page query string parsing for engine configuration overrides.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::HashMap;

use canvas::config::{ConfigError, EngineConfig};

/// Decode `?a=1&b=2` (`application/x-www-form-urlencoded`) into a map.
/// Later duplicates win; keys without `=` map to an empty string.
pub fn parse_query(search: &str) -> HashMap<String, String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

/// Engine configuration from the page query string.
///
/// # Errors
///
/// Returns the first [`ConfigError`] for a value that does not parse.
pub fn config_from_query(search: &str) -> Result<EngineConfig, ConfigError> {
    let params = parse_query(search);
    EngineConfig::from_lookup(|key| params.get(key).cloned())
}
