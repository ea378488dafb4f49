use super::domain::{AbsentReason, CompanyRecord, CompanySearch, RegistryLookup};
use crate::config::RegistryConfig;
use chrono::NaiveDate;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Company registry seam so report generation can run against a stub.
pub trait CompanyRegistry: Send + Sync {
    fn lookup(&self, postcode: &str) -> impl Future<Output = RegistryLookup> + Send;
}

/// Errors raised while constructing a registry client.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to build registry HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Companies House search client. One request per lookup, no retries.
#[derive(Debug, Clone)]
pub struct CompaniesHouseClient {
    http: Client,
    base_url: String,
    api_key: String,
    page_size: u16,
}

impl CompaniesHouseClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        page_size: u16,
    ) -> Result<Self, RegistryError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            page_size,
        })
    }

    async fn search(&self, postcode: &str) -> Result<CompanySearch, reqwest::Error> {
        let url = format!("{}/search/companies", self.base_url);
        let page_size = self.page_size.to_string();
        let response = self
            .http
            .get(url)
            .basic_auth(&self.api_key, Some(""))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .query(&[("q", postcode), ("items_per_page", page_size.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let payload: SearchResponse = response.json().await?;
        Ok(payload.into())
    }
}

impl CompanyRegistry for CompaniesHouseClient {
    async fn lookup(&self, postcode: &str) -> RegistryLookup {
        let postcode = postcode.trim();
        if postcode.is_empty() {
            return RegistryLookup::Absent(AbsentReason::NoPostcode);
        }

        match self.search(postcode).await {
            Ok(search) => {
                debug!(
                    %postcode,
                    total_results = search.total_results,
                    returned = search.companies.len(),
                    "registry lookup succeeded"
                );
                RegistryLookup::Found(search)
            }
            Err(err) => {
                debug!(
                    %postcode,
                    status = err.status().map(|status| status.as_u16()),
                    timeout = err.is_timeout(),
                    %err,
                    "registry lookup failed; continuing without company data"
                );
                RegistryLookup::Absent(AbsentReason::Failed)
            }
        }
    }
}

/// Registry stand-in used when no credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRegistry;

impl CompanyRegistry for DisabledRegistry {
    async fn lookup(&self, _postcode: &str) -> RegistryLookup {
        RegistryLookup::Absent(AbsentReason::NoCredential)
    }
}

/// Registry chosen at startup from configuration.
#[derive(Debug, Clone)]
pub enum RegistryClient {
    CompaniesHouse(CompaniesHouseClient),
    Disabled(DisabledRegistry),
}

impl RegistryClient {
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        match &config.api_key {
            Some(key) => {
                let client = CompaniesHouseClient::new(
                    key.clone(),
                    config.base_url.clone(),
                    config.timeout,
                    config.page_size,
                )?;
                Ok(Self::CompaniesHouse(client))
            }
            None => Ok(Self::Disabled(DisabledRegistry)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::CompaniesHouse(_))
    }
}

impl CompanyRegistry for RegistryClient {
    async fn lookup(&self, postcode: &str) -> RegistryLookup {
        match self {
            Self::CompaniesHouse(client) => client.lookup(postcode).await,
            Self::Disabled(disabled) => disabled.lookup(postcode).await,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_status: String,
    #[serde(default)]
    date_of_creation: Option<String>,
    #[serde(default)]
    sic_codes: Vec<String>,
    #[serde(default)]
    company_number: Option<String>,
    #[serde(default)]
    address_snippet: Option<String>,
}

impl From<SearchResponse> for CompanySearch {
    fn from(response: SearchResponse) -> Self {
        Self {
            total_results: response.total_results,
            companies: response.items.into_iter().map(CompanyRecord::from).collect(),
        }
    }
}

impl From<SearchItem> for CompanyRecord {
    fn from(item: SearchItem) -> Self {
        Self {
            name: item.title.trim().to_string(),
            status: item.company_status,
            incorporated_on: item
                .date_of_creation
                .as_deref()
                .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()),
            industry_codes: item.sic_codes,
            company_number: item.company_number,
            address_snippet: item.address_snippet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::net::SocketAddr;

    async fn spawn_stub(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });
        addr
    }

    fn client_for(addr: SocketAddr, timeout: Duration) -> CompaniesHouseClient {
        CompaniesHouseClient::new("test-key", format!("http://{addr}/"), timeout, 20)
            .expect("client builds")
    }

    async fn search_handler(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        if !headers.contains_key("authorization") {
            return Err(StatusCode::UNAUTHORIZED);
        }
        if params.get("q").map(String::as_str) != Some("OX11 0QX")
            || params.get("items_per_page").map(String::as_str) != Some("20")
        {
            return Err(StatusCode::BAD_REQUEST);
        }

        Ok(Json(json!({
            "total_results": 42,
            "items": [
                {
                    "title": "Helix Sequencing Ltd",
                    "company_status": "active",
                    "date_of_creation": "2019-04-02",
                    "sic_codes": ["72110"],
                    "company_number": "11900001",
                    "address_snippet": "Harwell Campus, Didcot, OX11 0QX"
                },
                {
                    "title": "Dormant Widgets Ltd",
                    "company_status": "dissolved",
                    "date_of_creation": "not-a-date"
                }
            ]
        })))
    }

    #[tokio::test]
    async fn lookup_maps_search_results() {
        let addr = spawn_stub(Router::new().route("/search/companies", get(search_handler))).await;
        let client = client_for(addr, Duration::from_secs(5));

        let lookup = client.lookup(" OX11 0QX ").await;
        let search = lookup.search().expect("companies found");
        assert_eq!(search.total_results, 42);
        assert_eq!(search.companies.len(), 2);
        assert_eq!(search.active_count(), 1);

        let first = &search.companies[0];
        assert_eq!(first.name, "Helix Sequencing Ltd");
        assert_eq!(first.incorporated_on, NaiveDate::from_ymd_opt(2019, 4, 2));
        assert_eq!(first.industry_codes, vec!["72110".to_string()]);
        assert_eq!(search.companies[1].incorporated_on, None);
    }

    #[tokio::test]
    async fn non_success_status_is_absent() {
        let router = Router::new().route(
            "/search/companies",
            get(|| async { StatusCode::TOO_MANY_REQUESTS }),
        );
        let addr = spawn_stub(router).await;
        let client = client_for(addr, Duration::from_secs(5));

        assert_eq!(
            client.lookup("CB4 0WS").await,
            RegistryLookup::Absent(AbsentReason::Failed)
        );
    }

    #[tokio::test]
    async fn timeout_is_absent() {
        let router = Router::new().route(
            "/search/companies",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"total_results": 0, "items": []}))
            }),
        );
        let addr = spawn_stub(router).await;
        let client = client_for(addr, Duration::from_millis(100));

        assert_eq!(
            client.lookup("CB4 0WS").await,
            RegistryLookup::Absent(AbsentReason::Failed)
        );
    }

    #[tokio::test]
    async fn blank_postcode_skips_the_request() {
        let client = CompaniesHouseClient::new(
            "test-key",
            "http://127.0.0.1:9",
            Duration::from_millis(100),
            20,
        )
        .expect("client builds");
        assert_eq!(
            client.lookup("   ").await,
            RegistryLookup::Absent(AbsentReason::NoPostcode)
        );
    }

    #[tokio::test]
    async fn missing_credential_disables_the_registry() {
        let config = RegistryConfig {
            api_key: None,
            base_url: "https://example.invalid".to_string(),
            timeout: Duration::from_secs(1),
            page_size: 20,
        };
        let registry = RegistryClient::from_config(&config).expect("registry builds");
        assert!(!registry.is_enabled());
        assert_eq!(
            registry.lookup("OX11 0QX").await,
            RegistryLookup::Absent(AbsentReason::NoCredential)
        );
    }
}
