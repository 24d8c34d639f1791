//! Runtime configuration of the API server.
//!
//! Every setting can be given as a command-line flag or through the matching
//! `INVOICEBUDDY_*` environment variable; flags win.

use clap::Parser;
use std::path::PathBuf;

/// Default request body limit for JSON payloads (1 MiB).
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "invoicebuddy", about = "InvoiceBuddy invoicing API server")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "INVOICEBUDDY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "INVOICEBUDDY_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Directory holding `customers.json`, `products.json` and `invoices.json`.
    /// Created on startup if absent.
    #[arg(long, env = "INVOICEBUDDY_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory with the TTF files used for PDF exports.
    #[arg(long, env = "INVOICEBUDDY_FONTS_DIR", default_value = "./fonts")]
    pub fonts_dir: PathBuf,

    /// Maximum accepted JSON body size in bytes.
    #[arg(long, env = "INVOICEBUDDY_JSON_LIMIT", default_value_t = DEFAULT_JSON_LIMIT)]
    pub json_limit: usize,
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "invoicebuddy",
            "--port",
            "8080",
            "--data-dir",
            "/tmp/invoices",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/invoices"));
        assert_eq!(config.url(), format!("http://{}:8080", config.host));
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Config::try_parse_from(["invoicebuddy", "--port", "abc"]).is_err());
    }
}
