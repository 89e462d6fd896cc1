// HTTP client for the catalog API.
// Handles request construction, status mapping, and JSON decoding.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Serialize;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::model::{Item, ItemCount, NewItem, Query, Stats};
use crate::server::ErrorBody;

use super::ItemSource;

/// Default backend address used by the front end.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Catalog API client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("catalog-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CatalogError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Make a GET request to the catalog API.
    async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = self.url(endpoint);
        debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await?;
        check_response(response).await
    }

    /// Make a GET request with query parameters.
    async fn get_with_params<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = self.url(endpoint);
        debug!(url = %url, "GET");
        let response = self.client.get(&url).query(params).send().await?;
        check_response(response).await
    }

    /// Create an item. Not retried: creates are not idempotent.
    pub async fn create_item(&self, new: &NewItem) -> Result<Item> {
        let url = self.url("/api/items");
        debug!(url = %url, "POST");
        let response = self.client.post(&url).json(new).send().await?;
        let item = check_response(response).await?.json().await?;
        Ok(item)
    }
}

/// Check response status and convert errors, preferring the server's message.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    match status {
        StatusCode::NOT_FOUND => Err(CatalogError::NotFound(if message.is_empty() {
            url
        } else {
            message
        })),
        StatusCode::BAD_REQUEST => Err(CatalogError::InvalidArgument(message)),
        status => Err(CatalogError::Http {
            status: status.as_u16(),
            message,
        }),
    }
}

impl ItemSource for CatalogClient {
    async fn list_items(&self, query: &Query) -> Result<Vec<Item>> {
        let params = [
            ("q", query.search.clone()),
            ("limit", query.page_size.to_string()),
            ("page", query.page.to_string()),
        ];
        let response = self.get_with_params("/api/items", &params).await?;
        let items: Vec<Item> = response.json().await?;
        Ok(items)
    }

    async fn count_items(&self, search: &str) -> Result<u64> {
        let response = self
            .get_with_params("/api/items/count", &[("q", search)])
            .await?;
        let count: ItemCount = response.json().await?;
        Ok(count.total)
    }

    async fn get_item(&self, id: u64) -> Result<Item> {
        let response = self.get(&format!("/api/items/{}", id)).await?;
        let item: Item = response.json().await?;
        Ok(item)
    }

    async fn stats(&self) -> Result<Stats> {
        let response = self.get("/api/stats").await?;
        let stats: Stats = response.json().await?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = CatalogClient::new("http://localhost:3001/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.url("/api/stats"), "http://localhost:3001/api/stats");
    }
}
