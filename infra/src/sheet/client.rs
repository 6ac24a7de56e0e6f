//! HTTP client for the external sheet store

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use otp_shared::config::SheetConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct CellWrite<'a> {
    value: &'a str,
}

#[derive(Debug, Deserialize)]
struct CellRead {
    value: Option<String>,
}

/// Low-level client for single-cell reads and writes against the sheet
/// store's HTTP API.
pub struct SheetClient {
    client: reqwest::Client,
    config: SheetConfig,
}

impl SheetClient {
    /// Create a new sheet client
    pub fn new(config: SheetConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "SHEET_BASE_URL not set".to_string(),
            ));
        }
        if config.sheet_id.is_empty() {
            return Err(InfrastructureError::Config("SHEET_ID not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SheetConfig::from_env())
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    fn cell_url(&self, tab: &str, cell: &str) -> String {
        format!(
            "{}/v1/sheets/{}/values/{}!{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.sheet_id,
            tab,
            cell
        )
    }

    fn tab_url(&self, tab: &str) -> String {
        format!(
            "{}/v1/sheets/{}/tabs/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.sheet_id,
            tab
        )
    }

    /// Write a value into a single cell on the given tab
    pub async fn write_cell(
        &self,
        tab: &str,
        cell: &str,
        value: &str,
    ) -> Result<(), InfrastructureError> {
        let url = self.cell_url(tab, cell);
        debug!(tab = %tab, cell = %cell, "Writing sheet cell");

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.config.api_token)
            .json(&CellWrite { value })
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(InfrastructureError::NotFound(format!(
                "sheet tab '{}' does not exist",
                tab
            ))),
            status if status.is_success() => Ok(()),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(InfrastructureError::Sheet(format!(
                    "cell write returned {}: {}",
                    status, detail
                )))
            }
        }
    }

    /// Read a single cell on the given tab. Returns `None` when the cell
    /// is present but empty.
    pub async fn read_cell(
        &self,
        tab: &str,
        cell: &str,
    ) -> Result<Option<String>, InfrastructureError> {
        let url = self.cell_url(tab, cell);
        debug!(tab = %tab, cell = %cell, "Reading sheet cell");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(InfrastructureError::NotFound(format!(
                "sheet tab '{}' does not exist",
                tab
            ))),
            status if status.is_success() => {
                let parsed: CellRead = response.json().await?;
                Ok(parsed.value.filter(|v| !v.is_empty()))
            }
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(InfrastructureError::Sheet(format!(
                    "cell read returned {}: {}",
                    status, detail
                )))
            }
        }
    }

    /// Check whether a tab exists in the sheet document
    pub async fn tab_exists(&self, tab: &str) -> Result<bool, InfrastructureError> {
        let url = self.tab_url(tab);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(InfrastructureError::Sheet(format!(
                    "tab lookup returned {}: {}",
                    status, detail
                )))
            }
        }
    }
}
