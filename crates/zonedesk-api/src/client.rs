// zonedesk API HTTP client
//
// Wraps `reqwest::Client` with URL construction, status mapping, and
// acknowledgement unwrapping. Endpoint groups (auth, domains, records,
// nsd) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::Ack;
use crate::transport::TransportConfig;

const BODY_PREVIEW: usize = 200;

/// HTTP client for the DNS administration API.
///
/// Session-based: `login` stores the session cookie in the client's jar
/// and every subsequent request carries it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Cookie jar reference for inspecting the session cookie.
    cookie_jar: Option<Arc<Jar>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the API is cookie-authenticated).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the jar currently holds a cookie for the server.
    pub fn has_session_cookie(&self) -> bool {
        self.cookie_jar
            .as_ref()
            .and_then(|jar| jar.cookies(&self.base_url))
            .is_some()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        decode(check_status(resp).await?).await
    }

    /// Send a POST request with a JSON body and unwrap the acknowledgement.
    pub(crate) async fn post(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<Ack, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        parse_ack(check_status(resp).await?).await
    }

    /// Send a body-less POST request and unwrap the acknowledgement.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<Ack, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).send().await?;
        parse_ack(check_status(resp).await?).await
    }

    /// Send a PUT request with a JSON body and unwrap the acknowledgement.
    pub(crate) async fn put(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<Ack, Error> {
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(body).send().await?;
        parse_ack(check_status(resp).await?).await
    }

    /// Send a DELETE request and unwrap the acknowledgement.
    pub(crate) async fn delete(&self, url: Url) -> Result<Ack, Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        parse_ack(check_status(resp).await?).await
    }

    /// Send a POST and return the raw acknowledgement without treating
    /// `success: false` as an error. Login needs to map it differently.
    pub(crate) async fn post_raw(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Ack, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        decode(check_status(resp).await?).await
    }
}

/// Map auth failures and other non-2xx statuses into errors.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::SessionExpired);
    }

    if status == reqwest::StatusCode::FORBIDDEN {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Forbidden {
            message: preview(body.trim()).to_owned(),
        });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Http {
            status: status.as_u16(),
            body: preview(body.trim()).to_owned(),
        });
    }

    Ok(resp)
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await?;
    trace!(len = body.len(), "decoding response body");
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })
}

/// Decode `{success, message?}`, turning `success: false` into
/// [`Error::Rejected`] with the server message passed through verbatim.
async fn parse_ack(resp: reqwest::Response) -> Result<Ack, Error> {
    let ack: Ack = decode(resp).await?;
    if ack.success {
        Ok(ack)
    } else {
        Err(Error::Rejected {
            message: ack.message,
        })
    }
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(BODY_PREVIEW);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn api_url_joins_without_double_slash() {
        let c = client("https://dns.example.net/");
        assert_eq!(
            c.api_url("domains/7/records").unwrap().as_str(),
            "https://dns.example.net/api/domains/7/records"
        );
    }

    #[test]
    fn api_url_keeps_base_path_prefix() {
        let c = client("https://example.net/dns-manager");
        assert_eq!(
            c.api_url("/login").unwrap().as_str(),
            "https://example.net/dns-manager/api/login"
        );
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "ж".repeat(150);
        let cut = preview(&body);
        assert!(cut.len() <= BODY_PREVIEW);
        assert!(body.starts_with(cut));
    }
}
