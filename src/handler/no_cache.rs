//! No-cache decorator
//!
//! Wraps any [`Serve`] and sets the no-cache header triplet on every response
//! it produces, whatever the status or content type.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::{RequestContext, Serve};
use crate::http::cache;

#[derive(Debug, Clone)]
pub struct NoCache<S> {
    inner: S,
}

impl<S> NoCache<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Serve> Serve for NoCache<S> {
    async fn serve(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        let mut response = self.inner.serve(ctx).await;
        cache::apply_no_cache(response.headers_mut());
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cache::NO_CACHE_HEADERS;
    use hyper::{Method, StatusCode};

    /// Returns a fixed status with a queued content type and caching header
    struct Fixed(StatusCode);

    impl Serve for Fixed {
        async fn serve(&self, _ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
            Response::builder()
                .status(self.0)
                .header("Content-Type", "application/json")
                .header("Cache-Control", "public, max-age=86400")
                .body(Full::new(Bytes::from_static(b"{}")))
                .unwrap()
        }
    }

    fn assert_no_cache(resp: &Response<Full<Bytes>>) {
        for (name, value) in NO_CACHE_HEADERS {
            let values: Vec<_> = resp.headers().get_all(name).iter().collect();
            assert_eq!(values, vec![value], "header {name} on {}", resp.status());
        }
    }

    #[tokio::test]
    async fn test_headers_on_every_status() {
        let ctx = RequestContext::new(&Method::GET, "/x", "/x");
        for status in [
            StatusCode::OK,
            StatusCode::MOVED_PERMANENTLY,
            StatusCode::NOT_MODIFIED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::NOT_IMPLEMENTED,
        ] {
            let resp = NoCache::new(Fixed(status)).serve(&ctx).await;
            assert_eq!(resp.status(), status);
            assert_no_cache(&resp);
        }
    }

    #[tokio::test]
    async fn test_base_headers_kept() {
        let ctx = RequestContext::new(&Method::GET, "/x", "/x");
        let resp = NoCache::new(Fixed(StatusCode::OK)).serve(&ctx).await;
        assert_eq!(resp.headers()["content-type"], "application/json");
    }
}
