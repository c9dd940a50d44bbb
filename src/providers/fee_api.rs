use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::EndpointConfig;
use crate::core::currency::CurrencyRateProvider;
use crate::core::error::FetchError;
use crate::core::listing::{FeeListing, FeeListingProvider};

const USER_AGENT: &str = "feecalc/1.0";

async fn fetch_json(url: &str, timeout: Duration) -> Result<Value> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Request(format!("{e} for URL: {url}")))?;

    debug!(response = ?response, "Received response");

    if !response.status().is_success() {
        return Err(FetchError::Status(format!("{} for URL: {}", response.status(), url)).into());
    }

    let text = response
        .text()
        .await
        .map_err(|e| FetchError::Request(format!("{e} for URL: {url}")))?;

    let value = serde_json::from_str::<Value>(&text)
        .map_err(|e| FetchError::Parse(format!("{e} for URL: {url}")))?;
    Ok(value)
}

// HttpFeeListingProvider implementation for FeeListingProvider
pub struct HttpFeeListingProvider {
    url: String,
    timeout: Duration,
}

impl HttpFeeListingProvider {
    pub fn new(endpoint: &EndpointConfig, timeout: Duration) -> Self {
        HttpFeeListingProvider {
            url: format!("{}{}", endpoint.base_url.trim_end_matches('/'), endpoint.path),
            timeout,
        }
    }
}

#[async_trait]
impl FeeListingProvider for HttpFeeListingProvider {
    #[instrument(name = "FeeListingFetch", skip(self), fields(url = %self.url))]
    async fn fetch_listing(&self) -> Result<FeeListing> {
        debug!("Requesting fee listing from {}", self.url);
        let value = fetch_json(&self.url, self.timeout).await?;
        let listing = FeeListing::from_json(&value);
        debug!(
            customer = listing.customer.len(),
            business = listing.business.len(),
            "Parsed fee listing"
        );
        Ok(listing)
    }
}

// HttpRateProvider implementation for CurrencyRateProvider
pub struct HttpRateProvider {
    url: String,
    timeout: Duration,
}

impl HttpRateProvider {
    pub fn new(endpoint: &EndpointConfig, timeout: Duration) -> Self {
        HttpRateProvider {
            url: format!("{}{}", endpoint.base_url.trim_end_matches('/'), endpoint.path),
            timeout,
        }
    }
}

#[async_trait]
impl CurrencyRateProvider for HttpRateProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<Option<f64>> {
        let url = format!(
            "{}?from={}&to={}",
            self.url,
            from.to_uppercase(),
            to.to_uppercase()
        );
        debug!("Requesting exchange rate from {}", url);

        let value = fetch_json(&url, self.timeout).await?;
        Ok(value.get("rate").and_then(Value::as_f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(server: &MockServer, path: &str) -> EndpointConfig {
        EndpointConfig {
            base_url: server.uri(),
            path: path.to_string(),
        }
    }

    pub async fn create_mock_server(request_path: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_listing_fetch() {
        let mock_response = r#"{
            "Customer": {
                "Transfers": [
                    {"Service": "Local Transfer", "Fee": "FREE", "Description": "Same day"},
                    {"Service": "Wire", "Fee": "0.3%"}
                ]
            },
            "Business": {
                "Payouts": [{"Service": "Bulk", "Fee": "$4", "Description": "Batch"}]
            }
        }"#;
        let mock_server = create_mock_server("/fees", 200, mock_response).await;

        let provider =
            HttpFeeListingProvider::new(&endpoint(&mock_server, "/fees"), Duration::from_secs(5));
        let listing = provider.fetch_listing().await.unwrap();

        assert_eq!(listing.customer.len(), 2);
        assert_eq!(listing.customer[1].fee, "0.3%");
        assert_eq!(listing.customer[1].description, "");
        assert_eq!(listing.business[0].service, "Bulk");
    }

    #[tokio::test]
    async fn test_listing_server_error() {
        let mock_server = create_mock_server("/fees", 500, "").await;

        let provider =
            HttpFeeListingProvider::new(&endpoint(&mock_server, "/fees"), Duration::from_secs(5));
        let err = provider.fetch_listing().await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Status(_))
        ));
        assert!(err.to_string().starts_with("HTTP error: 500 Internal Server Error"));
    }

    #[tokio::test]
    async fn test_listing_malformed_body() {
        let mock_server = create_mock_server("/fees", 200, "<html>oops</html>").await;

        let provider =
            HttpFeeListingProvider::new(&endpoint(&mock_server, "/fees"), Duration::from_secs(5));
        let err = provider.fetch_listing().await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchange-rate"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "NGN"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rate": 1500}"#))
            .mount(&mock_server)
            .await;

        let provider = HttpRateProvider::new(
            &endpoint(&mock_server, "/exchange-rate"),
            Duration::from_secs(5),
        );
        let rate = provider.get_rate("usd", "ngn").await.unwrap();
        assert_eq!(rate, Some(1500.0));
    }

    #[tokio::test]
    async fn test_rate_missing_from_response() {
        let mock_server =
            create_mock_server("/exchange-rate", 200, r#"{"rate": "high", "from": "USD"}"#).await;

        let provider = HttpRateProvider::new(
            &endpoint(&mock_server, "/exchange-rate"),
            Duration::from_secs(5),
        );
        assert_eq!(provider.get_rate("USD", "NGN").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rate_request_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchange-rate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"rate": 1500}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let provider = HttpRateProvider::new(
            &endpoint(&mock_server, "/exchange-rate"),
            Duration::from_millis(50),
        );
        let err = provider.get_rate("USD", "NGN").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Request(_))
        ));
    }
}
