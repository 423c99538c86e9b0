//! Spreadsheet Endpoint Client
//!
//! HTTP client for the opensheet-style spreadsheet-to-JSON endpoint.
//! A single GET returns the entire tab as a JSON array of row objects;
//! there is no pagination contract and no authentication.

use reqwest::Client;
use thiserror::Error;

use crate::sheet::row::Row;

/// Client for fetching rows from the spreadsheet endpoint
pub struct SheetClient {
    client: Client,
    config: SheetConfig,
}

/// Configuration for the sheet client
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Base URL of the spreadsheet-to-JSON service
    pub base_url: String,
    /// Spreadsheet document ID
    pub spreadsheet_id: String,
    /// Sheet tab name (percent-encoded into the URL)
    pub tab: String,
    /// Column header used as the diagnosis grouping key
    pub diagnosis_key: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensheet.elk.sh".to_string(),
            spreadsheet_id: "1zHDxblHaHrcCrmTteVhij-3yfrl7bM9kYk-8dGiJuxE".to_string(),
            tab: "ตุลาคม 67".to_string(),
            diagnosis_key: "การวินิจฉัย".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl SheetClient {
    /// Create a new sheet client with the given configuration
    pub fn new(config: SheetConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// The column header used as the grouping key
    pub fn diagnosis_key(&self) -> &str {
        &self.config.diagnosis_key
    }

    /// Full URL for the configured tab
    pub fn sheet_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.spreadsheet_id,
            urlencoding::encode(&self.config.tab)
        )
    }

    /// Fetch all rows of the configured tab.
    ///
    /// Single attempt, no retry: a failed fetch is reported to the caller,
    /// which logs it and continues with empty data.
    pub async fn fetch_rows(&self) -> Result<Vec<Row>, SheetError> {
        let url = self.sheet_url();

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SheetError::Timeout
            } else if e.is_connect() {
                SheetError::Unavailable
            } else {
                SheetError::Request(e)
            }
        })?;

        if response.status().is_success() {
            let rows: Vec<Row> = response.json().await.map_err(SheetError::Request)?;
            Ok(rows)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(SheetError::ApiError {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

/// Errors that can occur when fetching from the spreadsheet endpoint
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet endpoint unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Sheet endpoint error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SheetConfig::default();
        assert_eq!(config.base_url, "https://opensheet.elk.sh");
        assert_eq!(config.diagnosis_key, "การวินิจฉัย");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_sheet_url_encodes_tab() {
        let config = SheetConfig {
            base_url: "https://opensheet.elk.sh".to_string(),
            spreadsheet_id: "abc123".to_string(),
            tab: "ตุลาคม 67".to_string(),
            ..Default::default()
        };
        let client = SheetClient::new(config);

        assert_eq!(
            client.sheet_url(),
            "https://opensheet.elk.sh/abc123/%E0%B8%95%E0%B8%B8%E0%B8%A5%E0%B8%B2%E0%B8%84%E0%B8%A1%2067"
        );
    }

    #[test]
    fn test_sheet_url_trims_trailing_slash() {
        let config = SheetConfig {
            base_url: "https://opensheet.elk.sh/".to_string(),
            spreadsheet_id: "abc".to_string(),
            tab: "data".to_string(),
            ..Default::default()
        };
        let client = SheetClient::new(config);

        assert_eq!(client.sheet_url(), "https://opensheet.elk.sh/abc/data");
    }
}
