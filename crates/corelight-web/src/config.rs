//! Site configuration from the host document and URL

use corelight_core::{ConfigError, SiteConfig};
use tracing::Level;
use web_sys::{Document, Location};

/// Id of the optional inline configuration element:
/// `<script type="application/toml" id="corelight-config">...</script>`
pub const CONFIG_ELEMENT_ID: &str = "corelight-config";

/// Read the inline configuration, `None` when the page does not carry one
pub fn load_from_document(document: &Document) -> Result<Option<SiteConfig>, ConfigError> {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(None);
    };
    let content = element.text_content().unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(None);
    }
    SiteConfig::from_toml(&content).map(Some)
}

/// Page requested through `?page=<id>`, if any
pub fn initial_page(location: &Location) -> Option<String> {
    let search = location.search().ok()?;
    parse_query_param(&search, "page").filter(|page| !page.is_empty())
}

/// Parse a query parameter from a search string
fn parse_query_param(search: &str, param: &str) -> Option<String> {
    let search = search.trim_start_matches('?');
    for pair in search.split('&') {
        let mut parts = pair.splitn(2, '=');
        if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            if key == param {
                return Some(value.replace("%2D", "-").replace("%5F", "_"));
            }
        }
    }
    None
}

/// Map a configured level name, defaulting to WARN to keep wgpu quiet
pub fn log_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_param() {
        assert_eq!(parse_query_param("?page=about", "page"), Some("about".to_string()));
        assert_eq!(
            parse_query_param("?utm=x&page=contact-us", "page"),
            Some("contact-us".to_string())
        );
        assert_eq!(parse_query_param("?page=my%2Dwork", "page"), Some("my-work".to_string()));
        assert_eq!(parse_query_param("?other=1", "page"), None);
        assert_eq!(parse_query_param("", "page"), None);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level("debug"), Level::DEBUG);
        assert_eq!(log_level("INFO"), Level::INFO);
        assert_eq!(log_level("warn"), Level::WARN);
        assert_eq!(log_level("verbose"), Level::WARN);
        assert_eq!(log_level(""), Level::WARN);
    }
}
