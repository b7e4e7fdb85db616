//! Request handler module
//!
//! A request is answered by a [`Serve`] implementation. The file server is
//! [`StaticFiles`] wrapped in [`NoCache`], which stamps the no-cache headers
//! on whatever the inner service returns.

pub mod listing;
pub mod no_cache;
pub mod router;
pub mod static_files;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::future::Future;

pub use no_cache::NoCache;
pub use router::handle_request;
pub use static_files::StaticFiles;

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    pub method: &'a Method,
    /// Path and query exactly as requested
    pub target: &'a str,
    /// Path component only, still percent-encoded
    pub path: &'a str,
    pub if_modified_since: Option<&'a str>,
    pub has_if_none_match: bool,
}

impl<'a> RequestContext<'a> {
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        let uri = req.uri();
        let path = uri.path();
        Self {
            method: req.method(),
            target: uri.path_and_query().map_or(path, |pq| pq.as_str()),
            path,
            if_modified_since: req
                .headers()
                .get("if-modified-since")
                .and_then(|v| v.to_str().ok()),
            has_if_none_match: req.headers().contains_key("if-none-match"),
        }
    }

    /// Context for a plain request without conditional headers
    pub const fn new(method: &'a Method, target: &'a str, path: &'a str) -> Self {
        Self {
            method,
            target,
            path,
            if_modified_since: None,
            has_if_none_match: false,
        }
    }

    pub fn is_head(&self) -> bool {
        *self.method == Method::HEAD
    }
}

/// Given a request, produce a complete response
pub trait Serve {
    fn serve(&self, ctx: &RequestContext<'_>) -> impl Future<Output = Response<Full<Bytes>>>;
}
