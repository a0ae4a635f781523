use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::from_str;

use crate::config::Config;
use crate::error::RagError;

/// Status and raw body of a completed request.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Headers for the Supabase data API. `prefer` selects the PostgREST return mode.
pub fn supabase_headers(cfg: &Config, prefer: Option<&'static str>) -> Result<HeaderMap, RagError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("apikey"),
        HeaderValue::from_str(&cfg.supabase_key).map_err(|_| RagError::InvalidHeader("apikey"))?,
    );
    headers.insert(AUTHORIZATION, bearer(&cfg.supabase_key)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(prefer) = prefer {
        headers.insert(HeaderName::from_static("prefer"), HeaderValue::from_static(prefer));
    }
    Ok(headers)
}

pub fn openai_headers(cfg: &Config) -> Result<HeaderMap, RagError> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer(&cfg.openai_api_key)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn bearer(token: &str) -> Result<HeaderValue, RagError> {
    HeaderValue::from_str(&format!("Bearer {}", token.trim()))
        .map_err(|_| RagError::InvalidHeader("authorization"))
}

fn client(cfg: &Config) -> Result<Client, RagError> {
    Ok(Client::builder().timeout(cfg.http_timeout).build()?)
}

/// POST a JSON body and hand back whatever the server said, success or not.
pub fn send_json<B: Serialize + ?Sized>(
    cfg: &Config,
    url: &str,
    headers: HeaderMap,
    body: &B,
) -> Result<RawResponse, RagError> {
    let resp = client(cfg)?.post(url).headers(headers).json(body).send()?;
    let status = resp.status();
    let body = resp.text()?;
    tracing::debug!(url, status = %status, bytes = body.len(), "POST completed");
    Ok(RawResponse { status, body })
}

/// POST a JSON body, require a 2xx and decode the response.
pub fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
    cfg: &Config,
    url: &str,
    headers: HeaderMap,
    body: &B,
) -> Result<T, RagError> {
    let resp = send_json(cfg, url, headers, body)?;
    if !resp.status.is_success() {
        return Err(unexpected(url, resp));
    }
    decode(url, resp.body)
}

pub fn decode<T: DeserializeOwned>(url: &str, body: String) -> Result<T, RagError> {
    from_str::<T>(&body).map_err(|source| RagError::Decode {
        url: url.to_string(),
        body,
        source,
    })
}

pub fn unexpected(url: &str, resp: RawResponse) -> RagError {
    RagError::UnexpectedStatus {
        method: "POST",
        url: url.to_string(),
        status: resp.status,
        body: resp.body,
    }
}
