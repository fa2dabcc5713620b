//! Request/response dumping middleware.
//!
//! When a [`DebugSink`] is attached to a request (via its extensions), the
//! middleware logs a full textual dump of the outgoing request and, if the
//! exchange succeeds, of the incoming response. Without a sink it delegates
//! directly. The middleware is transparent either way: the caller observes
//! the same outcome with and without a sink attached, the dumps are purely a
//! side channel.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// Receiver for request/response dumps.
///
/// Implemented for any `Fn(&str)` closure, so a sink can be as simple as
/// `DebugSink::new(|entry: &str| eprintln!("{entry}"))`.
pub trait DebugLog: Send + Sync {
    /// Record a single formatted dump entry.
    fn log(&self, entry: &str);
}

impl<F> DebugLog for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, entry: &str) {
        self(entry);
    }
}

/// A sink that forwards dump entries to `tracing::debug!`.
pub struct TracingSink;

impl DebugLog for TracingSink {
    fn log(&self, entry: &str) {
        tracing::debug!("{entry}");
    }
}

/// Cloneable handle to a [`DebugLog`], attached per-request as an extension.
#[derive(Clone)]
pub struct DebugSink(Arc<dyn DebugLog>);

impl DebugSink {
    /// Wrap a [`DebugLog`] implementation into an attachable sink.
    pub fn new(log: impl DebugLog + 'static) -> Self {
        Self(Arc::new(log))
    }

    fn log(&self, entry: &str) {
        self.0.log(entry);
    }
}

impl fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DebugSink")
    }
}

/// Middleware that dumps the full request and response when the request
/// carries a [`DebugSink`] extension, and is a passthrough otherwise.
pub(crate) struct DebugDumpMiddleware;

#[async_trait]
impl Middleware for DebugDumpMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let Some(sink) = extensions.get::<DebugSink>().cloned() else {
            return next.run(req, extensions).await;
        };

        sink.log(&format!("request: {}", dump_request(&req)));

        let response = next.run(req, extensions).await?;
        let (response, dump) = buffer_response(response).await?;
        sink.log(&format!("response: {dump}"));

        Ok(response)
    }
}

fn dump_request(req: &Request) -> String {
    let mut dump = format!("{} {} {:?}\r\n", req.method(), req.url(), req.version());

    for (name, value) in req.headers() {
        dump.push_str(&format!(
            "{}: {}\r\n",
            name,
            value.to_str().unwrap_or("<binary>")
        ));
    }

    dump.push_str("\r\n");

    // Streaming bodies cannot be rendered without consuming them; the dump
    // simply omits the body in that case.
    if let Some(body) = req.body().and_then(|b| b.as_bytes()) {
        dump.push_str(&String::from_utf8_lossy(body));
    }

    dump
}

/// Reads the whole response body to render the dump, then rebuilds an
/// equivalent response for the caller.
async fn buffer_response(response: Response) -> Result<(Response, String)> {
    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();

    let body = response
        .bytes()
        .await
        .map_err(reqwest_middleware::Error::Reqwest)?;

    let mut dump = format!("{version:?} {status}\r\n");

    for (name, value) in &headers {
        dump.push_str(&format!(
            "{}: {}\r\n",
            name,
            value.to_str().unwrap_or("<binary>")
        ));
    }

    dump.push_str("\r\n");
    dump.push_str(&String::from_utf8_lossy(&body));

    let mut rebuilt = http::Response::new(body.to_vec());
    *rebuilt.status_mut() = status;
    *rebuilt.version_mut() = version;
    *rebuilt.headers_mut() = headers;

    Ok((rebuilt.into(), dump))
}
