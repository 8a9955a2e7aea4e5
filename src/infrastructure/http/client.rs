//! Thin JSON client over `reqwest` for the invitation API.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use url::Url;

use super::endpoints::Endpoint;
use crate::error::AppError;

/// Shared HTTP client bound to the API base URL.
///
/// Cheap to clone; every clone shares the same connection pool. Requests are
/// sent once with no timeout and no retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            AppError::internal(
                "Invalid API base URL",
                json!({ "base_url": base_url, "reason": e.to_string() }),
            )
        })?;

        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::internal(
                "API base URL must be an http(s) URL",
                json!({ "base_url": base_url }),
            ));
        }

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint, keeping any path prefix of the base URL.
    pub fn url(&self, endpoint: &Endpoint<'_>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        token: Option<&str>,
    ) -> Result<T, AppError> {
        let request = self.request(Method::GET, &endpoint, token);
        let response = self.send(request, &endpoint).await?;
        Ok(response.json().await?)
    }

    /// Sends `body` as JSON and decodes the JSON answer.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, &endpoint, token).json(body);
        let response = self.send(request, &endpoint).await?;
        Ok(response.json().await?)
    }

    /// Sends a DELETE and ignores the response body.
    pub async fn delete(&self, endpoint: Endpoint<'_>, token: Option<&str>) -> Result<(), AppError> {
        let request = self.request(Method::DELETE, &endpoint, token);
        self.send(request, &endpoint).await?;
        Ok(())
    }

    fn request(&self, method: Method, endpoint: &Endpoint<'_>, token: Option<&str>) -> RequestBuilder {
        let request = self.http.request(method, self.url(endpoint));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, endpoint: &Endpoint<'_>) -> Result<Response, AppError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Invitation API unreachable");
            AppError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(endpoint = %endpoint, status = status.as_u16(), "Invitation API call succeeded");
            return Ok(response);
        }

        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        tracing::debug!(endpoint = %endpoint, status = status.as_u16(), body = %body, "Invitation API call failed");

        Err(error_for_status(status, endpoint, &body))
    }
}

/// Maps a non-success API answer to an [`AppError`].
///
/// The API reports errors as `{"detail": ...}`; the detail is kept in the
/// error's `details` so the UI can show it verbatim.
pub fn error_for_status(status: StatusCode, endpoint: &Endpoint<'_>, body: &Value) -> AppError {
    let detail = body.get("detail").cloned().unwrap_or(Value::Null);
    let details = json!({
        "status": status.as_u16(),
        "endpoint": endpoint.to_string(),
        "detail": detail,
    });

    match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized("Admin session expired or invalid", details),
        StatusCode::NOT_FOUND => AppError::not_found("Resource not found", details),
        StatusCode::CONFLICT => AppError::conflict("Conflicting change rejected", details),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::bad_request("Request rejected by the invitation API", details)
        }
        status => AppError::upstream(status.as_u16(), "Invitation API returned an error", details),
    }
}
