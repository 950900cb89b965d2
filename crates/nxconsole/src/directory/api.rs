//! Company directory backed by the dashboard REST API.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{cities_of, city_from_address, Company, Directory};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Body of `POST /api/companies`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub city: String,
}

impl NewCompany {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        let city = city_from_address(&address).to_string();
        Self {
            name: name.into(),
            address,
            city,
        }
    }
}

pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ApiError::Request {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { base_url, client })
    }

    pub fn companies(&self) -> Result<Vec<Company>, ApiError> {
        self.get(&self.url("/api/companies"))
    }

    pub fn company(&self, id: &str) -> Result<Company, ApiError> {
        self.get(&self.url(&format!("/api/companies/{id}")))
    }

    pub fn cities(&self) -> Result<Vec<String>, ApiError> {
        self.get(&self.url("/api/cities"))
    }

    pub fn create_company(&self, company: &NewCompany) -> Result<Company, ApiError> {
        let url = self.url("/api/companies");
        debug!(url = %url, name = %company.name, "creating company");
        let response = self
            .client
            .post(&url)
            .json(company)
            .send()
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;
        decode(url, response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        decode(url.to_string(), response)
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    url: String,
    response: reqwest::blocking::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url,
            status: status.as_u16(),
        });
    }
    response
        .json()
        .map_err(|source| ApiError::Decode { url, source })
}

/// Directory loaded once from the REST API.
#[derive(Debug, Clone)]
pub struct ApiDirectory {
    companies: Vec<Company>,
    cities: Vec<String>,
}

impl ApiDirectory {
    pub fn load(client: &ApiClient) -> Result<Self, ApiError> {
        let companies = client.companies()?;
        let cities = match client.cities() {
            Ok(cities) if !cities.is_empty() => cities,
            Ok(_) => cities_of(&companies),
            Err(err) => {
                warn!("city list unavailable, deriving from companies: {err}");
                cities_of(&companies)
            }
        };
        Ok(Self::from_parts(companies, cities))
    }

    fn from_parts(companies: Vec<Company>, mut cities: Vec<String>) -> Self {
        cities.sort();
        cities.dedup();
        Self { companies, cities }
    }
}

impl Directory for ApiDirectory {
    fn companies(&self) -> &[Company] {
        &self.companies
    }

    fn cities(&self) -> Vec<String> {
        self.cities.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash_and_builds_urls() {
        let client = ApiClient::new("http://localhost:8000/").expect("client");
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.url("/api/cities"), "http://localhost:8000/api/cities");
    }

    #[test]
    fn new_company_derives_city() {
        let company = NewCompany::new("부산시청", "부산광역시 연제구 중앙대로 1001");
        assert_eq!(company.city, "부산");
        let json = serde_json::to_value(&company).expect("serialize");
        assert_eq!(json["name"], "부산시청");
        assert_eq!(json["city"], "부산");
    }

    #[test]
    fn company_payload_decodes() {
        let raw = r#"[{"id":"company-1","name":"GKL","address":"서울특별시 강남구","city":"서울"}]"#;
        let companies: Vec<Company> = serde_json::from_str(raw).expect("decode");
        assert_eq!(companies[0].id, "company-1");
        assert_eq!(companies[0].city, "서울");
    }

    #[test]
    fn api_directory_sorts_cities() {
        let directory = ApiDirectory::from_parts(
            Vec::new(),
            vec!["서울".to_string(), "경기".to_string(), "서울".to_string()],
        );
        assert_eq!(directory.cities(), vec!["경기".to_string(), "서울".to_string()]);
    }

    #[test]
    fn unreachable_api_reports_request_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let client = ApiClient::new(&format!("http://{addr}")).expect("client");
        let err = ApiDirectory::load(&client).expect_err("no server");
        assert!(matches!(err, ApiError::Request { .. }));
    }
}
