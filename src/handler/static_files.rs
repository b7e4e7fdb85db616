//! Static file serving module
//!
//! Resolves request paths under the document root and builds file, index,
//! listing, redirect and error responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{listing, RequestContext, Serve};
use crate::config::HttpConfig;
use crate::http::{self, cache, mime, path};
use crate::logger;

/// Serves files below a canonical document root
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    index_files: Vec<String>,
    directory_listing: bool,
    server_name: String,
}

impl StaticFiles {
    /// Create a file service for `root`
    ///
    /// Fails if the root does not exist or cannot be canonicalized.
    pub fn new(root: impl AsRef<Path>, http: &HttpConfig) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self {
            root,
            index_files: http.index_files.clone(),
            directory_listing: http.directory_listing,
            server_name: http.server_name.clone(),
        })
    }

    /// Canonicalize `candidate` and make sure it is still under the root
    async fn resolve(&self, ctx: &RequestContext<'_>, candidate: &Path) -> Result<PathBuf, Response<Full<Bytes>>> {
        let canonical = fs::canonicalize(candidate)
            .await
            .map_err(|e| self.io_error_response(ctx, &e))?;
        if canonical.starts_with(&self.root) {
            Ok(canonical)
        } else {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {} -> {}",
                ctx.path,
                canonical.display()
            ));
            Err(self.error(ctx, StatusCode::NOT_FOUND, Some("File not found")))
        }
    }

    async fn serve_directory(&self, ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
        for index_file in &self.index_files {
            let candidate = dir.join(index_file);
            if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
                return match self.resolve(ctx, &candidate).await {
                    Ok(index_path) => self.serve_file(ctx, &index_path).await,
                    Err(resp) => resp,
                };
            }
        }

        if !self.directory_listing {
            return self.error(ctx, StatusCode::FORBIDDEN, Some("Directory listing disabled"));
        }

        let display_path = urlencoding::decode_binary(ctx.path.as_bytes());
        match listing::render_listing(dir, &String::from_utf8_lossy(&display_path)).await {
            Ok(html) => http::build_html_response(html, &self.server_name, ctx.is_head()),
            Err(e) => {
                logger::log_warning(&format!(
                    "Failed to list directory '{}': {e}",
                    dir.display()
                ));
                self.error(ctx, StatusCode::NOT_FOUND, Some("No permission to list directory"))
            }
        }
    }

    async fn serve_file(&self, ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
        let modified = match fs::metadata(file_path).await {
            Ok(meta) => meta.modified().ok(),
            Err(e) => return self.io_error_response(ctx, &e),
        };
        let last_modified = modified.map(cache::format_last_modified);

        if let (Some(mtime), Some(header)) = (modified, last_modified.as_deref()) {
            if cache::is_not_modified(ctx.if_modified_since, ctx.has_if_none_match, mtime) {
                return http::build_304_response(header, &self.server_name);
            }
        }

        let content = match fs::read(file_path).await {
            Ok(c) => c,
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read file '{}': {e}",
                    file_path.display()
                ));
                return self.io_error_response(ctx, &e);
            }
        };

        http::build_file_response(
            Bytes::from(content),
            mime::content_type_for(file_path),
            last_modified.as_deref(),
            &self.server_name,
            ctx.is_head(),
        )
    }

    fn io_error_response(&self, ctx: &RequestContext<'_>, err: &io::Error) -> Response<Full<Bytes>> {
        match err.kind() {
            io::ErrorKind::PermissionDenied => self.error(ctx, StatusCode::FORBIDDEN, None),
            _ => self.error(ctx, StatusCode::NOT_FOUND, Some("File not found")),
        }
    }

    fn error(
        &self,
        ctx: &RequestContext<'_>,
        status: StatusCode,
        message: Option<&str>,
    ) -> Response<Full<Bytes>> {
        http::build_error_response(status, message, &self.server_name, ctx.is_head())
    }
}

impl Serve for StaticFiles {
    async fn serve(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        if !matches!(*ctx.method, Method::GET | Method::HEAD) {
            let message = format!("Unsupported method ('{}')", ctx.method);
            return self.error(ctx, StatusCode::NOT_IMPLEMENTED, Some(&message));
        }

        let translated = path::translate_path(ctx.path);
        let target = match self.resolve(ctx, &self.root.join(&translated.relative)).await {
            Ok(p) => p,
            Err(resp) => return resp,
        };

        let is_dir = match fs::metadata(&target).await {
            Ok(meta) => meta.is_dir(),
            Err(e) => return self.io_error_response(ctx, &e),
        };

        if is_dir {
            if !translated.trailing_slash {
                let location = path::with_trailing_slash(ctx.target);
                return http::build_directory_redirect(&location, &self.server_name);
            }
            return self.serve_directory(ctx, &target).await;
        }

        if translated.trailing_slash {
            return self.error(ctx, StatusCode::NOT_FOUND, Some("File not found"));
        }

        self.serve_file(ctx, &target).await
    }
}
