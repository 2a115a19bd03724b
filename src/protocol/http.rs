use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A parsed HTTP/1.1 request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    /// Request path with any query string stripped
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as a typed JSON payload.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// An HTTP/1.1 response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    /// A JSON response with the given status.
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: serde_json::to_vec(body).unwrap_or_default(),
        }
    }

    /// The `{message}` payload every non-binary endpoint speaks.
    pub fn message(status: u16, message: &str) -> Self {
        Self::json(status, &serde_json::json!({ "message": message }))
    }

    /// A raw binary response, used for stored uploads.
    pub fn binary(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    /// The empty response to a CORS preflight.
    pub fn no_content() -> Self {
        Self {
            status: 204,
            content_type: "",
            body: Vec::new(),
        }
    }

    /// Encode the response to wire bytes. Every response carries a
    /// permissive CORS origin, matching the cors() layer the browser client
    /// was written against.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(
            format!("HTTP/1.1 {} {}\r\n", self.status, reason(self.status)).as_bytes(),
        );
        if !self.content_type.is_empty() {
            buf.extend_from_slice(format!("Content-Type: {}\r\n", self.content_type).as_bytes());
        }
        buf.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        buf.extend_from_slice(b"Access-Control-Allow-Origin: *\r\n");
        if self.status == 204 {
            buf.extend_from_slice(b"Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n");
            buf.extend_from_slice(b"Access-Control-Allow-Headers: Content-Type\r\n");
        }
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&self.body);
        buf
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        Response::message(err.status(), &err.to_string())
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

/// Incremental parser for HTTP/1.1 requests
pub struct Parser;

impl Parser {
    /// Parse one request from the buffer, returning (request, consumed
    /// bytes) once a complete head and body are available.
    pub fn parse(buffer: &[u8]) -> Option<(Request, usize)> {
        if buffer.is_empty() {
            return None;
        }

        let mut pos = 0;
        let request_line = Self::read_line(buffer, &mut pos)?;
        let (method, path) = Self::parse_request_line(request_line)?;

        let mut headers = Vec::new();
        loop {
            let line = Self::read_line(buffer, &mut pos)?;
            if line.is_empty() {
                break;
            }
            if let Some(header) = Self::parse_header(line) {
                headers.push(header);
            }
        }

        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| atoi::atoi::<usize>(v.as_bytes()))
            .unwrap_or(0);

        // Check if the full body has arrived
        if buffer.len() - pos < content_length {
            return None;
        }

        let body = buffer[pos..pos + content_length].to_vec();
        pos += content_length;

        Some((
            Request {
                method,
                path,
                headers,
                body,
            },
            pos,
        ))
    }

    fn parse_request_line(line: &[u8]) -> Option<(String, String)> {
        let line = std::str::from_utf8(line).ok()?;
        let mut parts = line.split_whitespace();
        let method = parts.next()?.to_string();
        let target = parts.next()?;
        let path = target.split('?').next().unwrap_or(target).to_string();
        Some((method, path))
    }

    fn parse_header(line: &[u8]) -> Option<(String, String)> {
        let line = String::from_utf8_lossy(line);
        let (name, value) = line.split_once(':')?;
        Some((name.trim().to_string(), value.trim().to_string()))
    }

    fn read_line<'a>(buffer: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
        let start = *pos;

        // Find \r\n
        for i in start..buffer.len().saturating_sub(1) {
            if buffer[i] == b'\r' && buffer[i + 1] == b'\n' {
                *pos = i + 2;
                return Some(&buffer[start..i]);
            }
        }

        None
    }
}
