//! The response representation exchanged with the caching layer
//!
//! A `Resource` carries a status, a header map and a readable body. Resources
//! handed out by the cache additionally carry a stale flag that the caller
//! inspects to decide whether to revalidate.

use std::fmt;
use std::io::{self, Cursor, Read};
use std::time::SystemTime;

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode, header};

use crate::cache::http_date::parse_http_date;

/// Upper bound on the buffer preallocated from a declared `Content-Length`
const MAX_PREALLOC: u64 = 64 * 1024;

/// An HTTP response whose body can be read as a byte stream
pub struct Resource {
    status: StatusCode,
    headers: HeaderMap,
    body: Box<dyn Read + Send>,
    stale: bool,
}

impl Resource {
    /// Create a resource over an arbitrary body reader
    pub fn new<R>(status: StatusCode, headers: HeaderMap, body: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            status,
            headers,
            body: Box::new(body),
            stale: false,
        }
    }

    /// Create a resource over an in-memory body
    pub fn from_bytes(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self::new(status, headers, Cursor::new(body.into()))
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Declared `Content-Length`, if present and parseable
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(header::CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }

    /// Value of the `Date` header, if present and parseable
    #[must_use]
    pub fn date(&self) -> Option<SystemTime> {
        let value = self.headers.get(header::DATE)?.to_str().ok()?;
        match parse_http_date(value) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::trace!(
                    target: "respcache::resource",
                    error = %err,
                    "Ignoring unparseable Date header"
                );
                None
            }
        }
    }

    /// True only if the `Date` header is strictly after `time`.
    ///
    /// A missing or unparseable date is never "after" anything.
    #[must_use]
    pub fn date_after(&self, time: SystemTime) -> bool {
        self.date().is_some_and(|date| date > time)
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Drain the remaining body into memory
    ///
    /// A declared `Content-Length` only sizes the initial buffer, up to
    /// `MAX_PREALLOC`; the body is read until exhaustion either way.
    pub fn read_body(&mut self) -> io::Result<Bytes> {
        let hint = self
            .content_length()
            .map_or(0, |len| usize::try_from(len.min(MAX_PREALLOC)).unwrap_or(0));
        let mut buf = Vec::with_capacity(hint);
        self.body.read_to_end(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Give up the resource, keeping only the body reader
    #[must_use]
    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }

    /// Convert into an `http::Response` with a materialized body
    pub fn into_response(mut self) -> io::Result<Response<Bytes>> {
        let body = self.read_body()?;
        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        Ok(response)
    }
}

impl Read for Resource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl<B> From<Response<B>> for Resource
where
    B: Into<Bytes>,
{
    fn from(response: Response<B>) -> Self {
        let (parts, body) = response.into_parts();
        Self::from_bytes(parts.status, parts.headers, body)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("stale", &self.stale)
            .finish_non_exhaustive()
    }
}
