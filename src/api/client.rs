//! Typed request/response helpers on top of a `Transport`.

use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Error body sent by the backend.
#[derive(serde::Deserialize, Default)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<u16>,
}

/// Human-readable message for when the server sends none.
pub fn fallback_message(status: u16) -> &'static str {
    match status {
        400 => "The request was rejected by the server",
        401 | 403 => "You are not allowed to perform this action",
        404 => "Resource not found",
        409 => "The resource already exists or is in conflict",
        500..=599 => "The booking service is unavailable, try again later",
        _ => "Unexpected error from the booking service",
    }
}

pub fn map_error(resp: &ApiResponse, path: &str) -> AppError {
    let parsed: ApiErrorBody = serde_json::from_str(&resp.body).unwrap_or_default();
    let status = parsed.status.unwrap_or(resp.status);
    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            let raw = resp.body.trim();
            (!raw.is_empty() && !raw.starts_with('{') && raw.len() < 200).then(|| raw.to_string())
        })
        .unwrap_or_else(|| fallback_message(status).to_string());

    if resp.status == 404 {
        AppError::NotFound(format!("{message} ({path})"))
    } else {
        AppError::Api { status, message }
    }
}

/// Empty bodies decode as JSON `null`, so `()` and `Option<T>` work for 204s.
fn decode<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

pub struct ApiClient {
    transport: Box<dyn Transport>,
    read_retries: u32,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>, read_retries: u32) -> Self {
        Self {
            transport,
            read_retries,
        }
    }

    fn send(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> AppResult<ApiResponse> {
        let req = ApiRequest {
            method,
            path: path.to_string(),
            body,
        };
        debug!(%method, path, "api request");
        let resp = self.transport.execute(&req)?;
        debug!(%method, path, status = resp.status, "api response");
        if resp.is_success() {
            Ok(resp)
        } else {
            Err(map_error(&resp, path))
        }
    }

    /// GET with the configured number of retries on transport errors and 5xx.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let mut attempt = 0;
        loop {
            match self.send(Method::Get, path, None) {
                Ok(resp) => return decode(&resp.body),
                Err(e) if e.is_retryable() && attempt < self.read_retries => {
                    attempt += 1;
                    warn!(path, attempt, error = %e, "read failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// GET where 404 means "absent" rather than failure.
    pub fn get_optional<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        match self.get::<T>(path) {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        let resp = self.send(Method::Post, path, Some(serde_json::to_value(body)?))?;
        decode(&resp.body)
    }

    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let resp = self.send(Method::Post, path, None)?;
        decode(&resp.body)
    }

    pub fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        let resp = self.send(Method::Put, path, Some(serde_json::to_value(body)?))?;
        decode(&resp.body)
    }

    pub fn delete(&self, path: &str) -> AppResult<()> {
        self.send(Method::Delete, path, None)?;
        Ok(())
    }
}
