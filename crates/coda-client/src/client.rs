//! The device session and its generic dispatch path.

use std::fmt;

use reqwest::{Method, StatusCode, header, redirect};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::ApiError,
    http::{DebugDumpMiddleware, DebugSink},
};

/// The body of an outgoing request.
///
/// Call sites pick the shape explicitly; there is no dynamic inspection of
/// body values.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body (GET requests).
    Empty,
    /// Pre-encoded bytes, content type left to the device's defaults.
    Raw(Vec<u8>),
    /// Flat key/value pairs, URL-encoded and sent as
    /// `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A session against a single Hitron CODA cable modem/router.
///
/// Holds the base URL (`http://<host>/1/Device/`), the login credentials and
/// an in-memory cookie jar. The cookie jar is the only mutable session state;
/// everything else is fixed at construction. Responses that set cookies
/// update the jar implicitly, which is how the authenticated session is
/// carried across calls.
///
/// The client never follows redirects: a 3xx answer is handed back to the
/// caller as a status error rather than chased.
#[derive(Debug, Clone)]
pub struct CableModem {
    base: Url,
    http: reqwest_middleware::ClientWithMiddleware,
    credentials: Credentials,
    debug_sink: Option<DebugSink>,
}

impl CableModem {
    /// Create a session for the device at `host`.
    ///
    /// Fails if `host` cannot form a valid base URL. No network traffic is
    /// performed here.
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, ApiError> {
        let base = Url::parse(&format!("http://{host}/1/Device/")).map_err(|source| {
            ApiError::InvalidHost {
                host: host.to_string(),
                source,
            }
        })?;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("HTTP client build should not fail");

        let http = reqwest_middleware::ClientBuilder::new(client)
            .with(DebugDumpMiddleware)
            .build();

        Ok(Self {
            base,
            http,
            credentials: Credentials {
                username: username.to_string(),
                password: password.to_string(),
            },
            debug_sink: None,
        })
    }

    /// Attach a diagnostic sink that receives a full request dump and a full
    /// response dump for every call made through this session.
    ///
    /// Without a sink the diagnostic layer is a passthrough; with one, only
    /// the log side channel changes, never the outcome of a call.
    #[must_use]
    pub fn with_debug_sink(mut self, sink: DebugSink) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolves `path` against the base URL.
    ///
    /// An empty path yields the base URL itself. A leading `/` is stripped so
    /// resolution is always relative to the base, never replacing it.
    ///
    /// # Panics
    ///
    /// Panics on a malformed path. Paths come from call sites, not from user
    /// input, so this is a programming error rather than a recoverable one.
    fn resource_url(&self, path: &str) -> Url {
        if path.is_empty() {
            return self.base.clone();
        }

        let path = path.strip_prefix('/').unwrap_or(path);

        self.base
            .join(path)
            .expect("resource path must form a valid URL")
    }

    /// Fetch `path` and decode the JSON response into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_request(Method::GET, path, RequestBody::Empty)
            .await
    }

    /// POST a URL-encoded form to `path` and decode the JSON response into
    /// `T`.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        self.send_request(Method::POST, path, RequestBody::Form(fields))
            .await
    }

    /// The single generic dispatch primitive every operation goes through.
    ///
    /// Resolves the URL, encodes the body, performs the call, reads the whole
    /// response body, and classifies the result: transport failures are
    /// returned as-is, a non-200 status becomes [`ApiError::Response`]
    /// carrying status, raw body and headers, and a 200 body is decoded as
    /// JSON into `T`.
    ///
    /// Dropping the returned future (e.g. via `tokio::time::timeout` or
    /// `select!`) aborts the in-flight network operation; there are no
    /// retries at any layer.
    pub async fn send_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T, ApiError> {
        let url = self.resource_url(path);

        let mut request = self.http.request(method, url);

        match body {
            RequestBody::Empty => {}
            RequestBody::Raw(bytes) => request = request.body(bytes),
            RequestBody::Form(fields) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish();

                request = request
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(encoded);
            }
        }

        if let Some(sink) = &self.debug_sink {
            request = request.with_extension(sink.clone());
        }

        let response = request.send().await?;

        let status = response.status();
        let headers = response.headers().clone();

        // Read the whole body before inspecting the status, so a read failure
        // is reported distinctly and error responses keep their payload.
        let body = response.bytes().await.map_err(ApiError::BodyRead)?;

        if status != StatusCode::OK {
            return Err(ApiError::Response {
                status,
                content: String::from_utf8_lossy(&body).into_owned(),
                headers,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
