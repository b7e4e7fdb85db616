//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! file-serving logic: response builders, MIME detection, cache headers and
//! request path translation.

pub mod cache;
pub mod mime;
pub mod path;
pub mod response;

pub use response::{
    build_304_response, build_directory_redirect, build_error_response, build_file_response,
    build_html_response,
};
