//! `[serve]` section configuration.
//!
//! Contains endpoint server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in postern.toml - endpoint server settings.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # Listen on all interfaces
/// port = 8080
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeSection {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 9473).
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::super::Config;

    #[test]
    fn test_serve_section() {
        let config = r#"
            [site]
            url = "https://example.com"

            [serve]
            interface = "0.0.0.0"
            port = 8080
        "#;
        let config: Config = toml::from_str(config).unwrap();

        assert_eq!(config.serve.interface, "0.0.0.0");
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn test_serve_section_defaults() {
        let config = r#"
            [site]
            url = "https://example.com"
        "#;
        let config: Config = toml::from_str(config).unwrap();

        assert_eq!(config.serve.interface, "127.0.0.1");
        assert_eq!(config.serve.port, 9473);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [site]
            url = "https://example.com"

            [serve]
            unknown_field = "should_fail"
        "#;
        let result: Result<Config, _> = toml::from_str(config);

        assert!(result.is_err());
    }
}
