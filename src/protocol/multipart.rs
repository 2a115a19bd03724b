//! `multipart/form-data` decoding for listing creation: text fields plus at
//! most one file part per request.

/// One uploaded file part.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// The form field the part arrived under
    pub name: String,
    /// The client-side filename, kept for its extension
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A decoded multipart body.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Form {
    fields: Vec<(String, String)>,
    /// The first file part, if the request carried one
    pub file: Option<FilePart>,
}

impl Form {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Extract the boundary token from a Content-Type header value.
pub fn boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_string())
}

/// Parse a multipart body against its boundary. Returns None when the body
/// is not well-formed multipart data.
pub fn parse(body: &[u8], boundary: &str) -> Option<Form> {
    let delimiter = format!("--{}", boundary).into_bytes();
    let mut form = Form::default();

    let mut pos = find(body, &delimiter, 0)? + delimiter.len();
    loop {
        // The closing delimiter carries a trailing "--"
        if body[pos..].starts_with(b"--") {
            break;
        }
        pos = expect_crlf(body, pos)?;

        // Part headers up to a blank line
        let mut name = None;
        let mut filename = None;
        let mut content_type = String::new();
        loop {
            let line_end = find(body, b"\r\n", pos)?;
            let line = String::from_utf8_lossy(&body[pos..line_end]).to_string();
            pos = line_end + 2;
            if line.is_empty() {
                break;
            }
            if let Some(rest) = strip_prefix_ignore_case(&line, "content-disposition:") {
                for param in rest.split(';').map(str::trim) {
                    if let Some(v) = param.strip_prefix("name=") {
                        name = Some(trim_quotes(v));
                    } else if let Some(v) = param.strip_prefix("filename=") {
                        filename = Some(trim_quotes(v));
                    }
                }
            } else if let Some(rest) = strip_prefix_ignore_case(&line, "content-type:") {
                content_type = rest.trim().to_string();
            }
        }

        // Content runs to the CRLF preceding the next delimiter
        let next = find(body, &delimiter, pos)?;
        let content_end = next.checked_sub(2)?;
        let data = &body[pos..content_end];
        let name = name?;

        match filename {
            Some(filename) => {
                // Keep only the first file part
                if form.file.is_none() {
                    form.file = Some(FilePart {
                        name,
                        filename,
                        content_type: content_type.clone(),
                        data: data.to_vec(),
                    });
                }
            }
            None => form
                .fields
                .push((name, String::from_utf8_lossy(data).to_string())),
        }

        pos = next + delimiter.len();
    }

    Some(form)
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| i + from)
}

fn expect_crlf(body: &[u8], pos: usize) -> Option<usize> {
    body[pos..].starts_with(b"\r\n").then_some(pos + 2)
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    if line.len() >= prefix.len() && line[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

fn trim_quotes(value: &str) -> String {
    value.trim().trim_matches('"').to_string()
}
