//! REST client for the Sheets v4 API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::auth::AccessTokenSource;
use crate::error::SheetsError;
use crate::models::{
    BatchUpdateRequest, Request, Spreadsheet, UpdateValuesResponse, ValueInputOption, ValueRange,
};

/// Sheets API endpoint.
const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The spreadsheet RPC surface the relay depends on.
#[async_trait]
pub trait SpreadsheetApi: Send + Sync {
    /// Fetch spreadsheet metadata, including the list of sheets.
    async fn get_metadata(&self, spreadsheet_id: &str) -> Result<Spreadsheet, SheetsError>;

    /// Read a range as display strings. Trailing empty rows and cells are absent.
    async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError>;

    /// Write values into a range, interpreted as user-entered input.
    async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<UpdateValuesResponse, SheetsError>;

    /// Apply structural edits (row deletion and the like).
    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<Request>,
    ) -> Result<(), SheetsError>;
}

/// Sheets REST client.
#[derive(Clone)]
pub struct SheetsClient {
    client: reqwest::Client,
    api_url: String,
    auth: Arc<dyn AccessTokenSource>,
}

impl SheetsClient {
    /// Create a client that authorises every request through `auth`.
    pub fn new(auth: Arc<dyn AccessTokenSource>) -> Result<Self, SheetsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_url: SHEETS_API_URL.to_string(),
            auth,
        })
    }

    /// Point the client at a different API root (mock servers, proxies).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Build `{api_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| SheetsError::Config(format!("invalid API URL {}: {e}", self.api_url)))?;

        url.path_segments_mut()
            .map_err(|()| SheetsError::Config(format!("API URL cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SheetsError> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, SheetsError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            let text = response.text().await.unwrap_or_default();
            return Err(SheetsError::NotFound(text));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, SheetsError> {
        debug!(url = %url, "POST request");
        self.send(self.client.post(url).json(body)).await
    }
}

#[async_trait]
impl SpreadsheetApi for SheetsClient {
    #[instrument(skip(self))]
    async fn get_metadata(&self, spreadsheet_id: &str) -> Result<Spreadsheet, SheetsError> {
        let url = self.endpoint(&[spreadsheet_id])?;
        debug!(url = %url, "GET request");

        self.send(
            self.client
                .get(url)
                .query(&[("fields", "spreadsheetId,sheets.properties")]),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.endpoint(&[spreadsheet_id, "values", range])?;
        debug!(url = %url, "GET request");

        let values: ValueRange = self.send(self.client.get(url)).await?;
        Ok(values.into_text_rows())
    }

    #[instrument(skip(self, values), fields(rows = values.len()))]
    async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<UpdateValuesResponse, SheetsError> {
        let url = self.endpoint(&[spreadsheet_id, "values", range])?;
        debug!(url = %url, "PUT request");

        let body = ValueRange {
            range: range.to_string(),
            major_dimension: Some("ROWS".to_string()),
            values: values
                .into_iter()
                .map(|row| row.into_iter().map(serde_json::Value::String).collect())
                .collect(),
        };

        self.send(
            self.client
                .put(url)
                .query(&[("valueInputOption", ValueInputOption::UserEntered.as_str())])
                .json(&body),
        )
        .await
    }

    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<Request>,
    ) -> Result<(), SheetsError> {
        let segment = format!("{spreadsheet_id}:batchUpdate");
        let url = self.endpoint(&[segment.as_str()])?;

        let _: serde_json::Value = self
            .post_json(url, &BatchUpdateRequest { requests })
            .await?;
        Ok(())
    }
}
