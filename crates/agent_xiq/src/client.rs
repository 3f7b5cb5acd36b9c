//! ExtremeCloud IQ REST client.
//!
//! [`XiqApi`] is the seam the collector talks to; [`HttpXiqClient`] is the
//! blocking reqwest implementation. Tests use an in-memory fake.

use crate::error::XiqError;
use crate::models::{Device, LoginResponse, Page, RateLimitInfo};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.extremecloudiq.com";

/// Page size for paged listings.
pub const PAGE_LIMIT: u32 = 100;

/// Upper bound on pages fetched per listing.
const MAX_PAGES: u32 = 1000;

/// Device ids per `deviceIds=` query.
pub const ID_CHUNK: usize = 100;

/// Operations the collector needs from XIQ.
pub trait XiqApi {
    /// Authenticate; returns the HTTP status of the login call.
    fn login(&mut self) -> Result<u16, XiqError>;

    fn devices(&mut self) -> Result<Vec<Device>, XiqError>;

    /// Raw radio records (one per device) for the given ids.
    fn radio_information(&mut self, device_ids: &[i64]) -> Result<Vec<Value>, XiqError>;

    /// Raw active client records for the given device ids.
    fn active_clients(&mut self, device_ids: &[i64]) -> Result<Vec<Value>, XiqError>;

    /// Rate limit headers of the most recent response.
    fn rate_limits(&self) -> RateLimitInfo;
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
    pub verify_tls: bool,
    pub proxy: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            password: String::new(),
            timeout: Duration::from_secs(30),
            verify_tls: true,
            proxy: None,
        }
    }
}

pub struct HttpXiqClient {
    options: ClientOptions,
    client: Client,
    token: Option<String>,
    last_limits: RateLimitInfo,
}

impl HttpXiqClient {
    pub fn new(options: ClientOptions) -> Result<Self, XiqError> {
        let mut builder = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_tls);
        if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.is_empty()) {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        let client = builder.build()?;

        Ok(Self {
            options,
            client,
            token: None,
            last_limits: RateLimitInfo::default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.options.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, XiqError> {
        let token = self.token.as_deref().ok_or(XiqError::NotLoggedIn)?;
        Ok(builder.bearer_auth(token))
    }

    /// Send, remember rate limit headers and map non-2xx to an error.
    fn send(&mut self, builder: RequestBuilder) -> Result<Response, XiqError> {
        let response = builder.send()?;
        self.last_limits = rate_limits_from(&response);

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(XiqError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&mut self, path: &str, query: &[(&str, String)]) -> Result<T, XiqError> {
        let builder = self.authorized(self.client.get(self.url(path)).query(query))?;
        let response = self.send(builder)?;
        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Walk a paged listing until the last page is reached.
    fn get_paged<T: DeserializeOwned>(&mut self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>, XiqError> {
        let mut items = Vec::new();
        for page in 1..=MAX_PAGES {
            let mut q = query.to_vec();
            q.push(("page", page.to_string()));
            q.push(("limit", PAGE_LIMIT.to_string()));

            let data: Page<T> = self.get_json(path, &q)?;
            let fetched = data.data.len();
            items.extend(data.data);
            debug!(path, page, fetched, total_pages = data.total_pages, "fetched page");

            if is_last_page(page, data.total_pages, fetched) {
                break;
            }
        }
        Ok(items)
    }
}

/// A short page always ends the listing. `total_pages` of 0 means XIQ did
/// not send it.
fn is_last_page(page: u32, total_pages: u32, fetched: usize) -> bool {
    fetched < PAGE_LIMIT as usize || (total_pages > 0 && page >= total_pages)
}

fn ids_param(ids: &[i64]) -> String {
    ids.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}

/// Collect every `RateLimit-*` header of a response.
fn rate_limits_from(response: &Response) -> RateLimitInfo {
    let headers = response.headers();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
    };

    let mut lines: Vec<String> = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with("ratelimit"))
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some(format!("{}:{}", name.as_str(), value.split_whitespace().collect::<String>()))
        })
        .collect();
    lines.sort();

    RateLimitInfo {
        responded: true,
        status_code: Some(response.status().as_u16()),
        limit: header("ratelimit-limit"),
        remaining: header("ratelimit-remaining"),
        reset: header("ratelimit-reset"),
        policy: header("ratelimit-policy"),
        headers: lines,
    }
}

impl XiqApi for HttpXiqClient {
    fn login(&mut self) -> Result<u16, XiqError> {
        let body = json!({
            "username": self.options.username,
            "password": self.options.password,
        });
        let builder = self.client.post(self.url("/login")).json(&body);
        let response = self.send(builder)?;
        let code = response.status().as_u16();

        let login: LoginResponse = serde_json::from_str(&response.text()?)?;
        let token = login
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(XiqError::MissingToken)?;
        debug!(expires_in = ?login.expires_in, "logged in");
        self.token = Some(token);
        Ok(code)
    }

    fn devices(&mut self) -> Result<Vec<Device>, XiqError> {
        self.get_paged("/devices", &[("views", "FULL".to_string())])
    }

    fn radio_information(&mut self, device_ids: &[i64]) -> Result<Vec<Value>, XiqError> {
        let mut radios = Vec::new();
        for chunk in device_ids.chunks(ID_CHUNK) {
            let value: Value = self.get_json(
                "/devices/radio-information",
                &[("deviceIds", ids_param(chunk))],
            )?;
            match value {
                Value::Array(list) => radios.extend(list),
                Value::Object(ref map) if map.contains_key("data") => {
                    if let Some(list) = map.get("data").and_then(Value::as_array) {
                        radios.extend(list.iter().cloned());
                    }
                }
                other => warn!(kind = ?other, "unexpected radio information payload"),
            }
        }
        Ok(radios)
    }

    fn active_clients(&mut self, device_ids: &[i64]) -> Result<Vec<Value>, XiqError> {
        let mut clients = Vec::new();
        for chunk in device_ids.chunks(ID_CHUNK) {
            let page: Vec<Value> = self.get_paged(
                "/clients/active",
                &[("deviceIds", ids_param(chunk)), ("views", "FULL".to_string())],
            )?;
            clients.extend(page);
        }
        Ok(clients)
    }

    fn rate_limits(&self) -> RateLimitInfo {
        self.last_limits.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = HttpXiqClient::new(ClientOptions {
            base_url: "https://xiq.example/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.url("/login"), "https://xiq.example/login");
    }

    #[test]
    fn test_requests_need_login() {
        let mut client = HttpXiqClient::new(ClientOptions::default()).unwrap();
        let err = client.devices().unwrap_err();
        assert!(matches!(err, XiqError::NotLoggedIn));
        assert_eq!(err.status_code(), 0);
    }

    #[test]
    fn test_last_page_detection() {
        assert!(is_last_page(1, 1, 100));
        assert!(!is_last_page(1, 3, 100));
        assert!(is_last_page(2, 3, 40));
        // Without total_pages only a short page stops the walk.
        assert!(!is_last_page(1, 0, 100));
        assert!(!is_last_page(7, 0, 100));
        assert!(is_last_page(2, 0, 99));
        assert!(is_last_page(1, 0, 0));
    }

    #[test]
    fn test_ids_param() {
        assert_eq!(ids_param(&[1, 22, 333]), "1,22,333");
    }
}
