//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Resource bindings describe requests as plain data (`HttpRequest`) with a
//! path relative to the service root. The `Transport` resolves the path
//! against the configured base address, merges headers, and hands the result
//! to an `HttpExecutor`, which performs the actual network round trip and
//! returns an `HttpResponse`. Swapping the executor is how tests run the
//! whole stack without a socket.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by the resource bindings. Before `Transport` resolves it, `path` is
/// relative to the service root (`/api/levels`); afterwards it is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            ..Self::get(path)
        }
    }

    /// Request carrying an already-encoded JSON body.
    pub fn with_body(method: HttpMethod, path: impl Into<String>, body: String) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    /// Add or replace a header. Header names compare case-insensitively.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&key));
        self.headers.push((key, value.into()));
        self
    }
}

/// An HTTP response described as plain data.
///
/// Produced by an `HttpExecutor` and interpreted by `Transport`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_replaces_existing_key_case_insensitively() {
        let req = HttpRequest::get("/api/levels")
            .header("Content-Type", "application/json")
            .header("content-type", "text/plain");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "text/plain".to_string())]
        );
    }

    #[test]
    fn delete_has_no_body() {
        let req = HttpRequest::delete("/api/mistakes/m1");
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn success_range_is_2xx() {
        let ok = HttpResponse { status: 204, headers: Vec::new(), body: String::new() };
        let redirect = HttpResponse { status: 304, headers: Vec::new(), body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
