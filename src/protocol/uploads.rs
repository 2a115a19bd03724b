use std::path::Path;

use crate::error::ApiError;
use crate::protocol::command::Command;
use crate::protocol::http::Response;
use crate::upload::UploadStore;

/// GET /uploads/<file>: raw bytes of a stored image
#[derive(Debug, Clone, PartialEq)]
pub struct ServeUploadCmd {
    pub name: String,
}

impl ServeUploadCmd {
    /// Parse the stored-file name out of the request path
    pub fn parse(path: &str) -> Command {
        match path.strip_prefix("/uploads/") {
            Some(name) if !name.is_empty() => Command::ServeUpload(ServeUploadCmd {
                name: name.to_string(),
            }),
            _ => Command::Rejected(ApiError::NotFound("Not found".to_string())),
        }
    }

    /// Serve the stored file from the upload store
    pub fn execute(&self, uploads: &UploadStore) -> Response {
        match uploads.read(&self.name) {
            Some(data) => Response::binary(content_type_for(&self.name), data),
            None => ApiError::NotFound("File not found".to_string()).into(),
        }
    }
}

/// Content type from the stored file's extension
fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::multipart::FilePart;
    use crate::store::testutil;

    #[test]
    fn test_parse_upload_path() {
        match ServeUploadCmd::parse("/uploads/abc.png") {
            Command::ServeUpload(cmd) => assert_eq!(cmd.name, "abc.png"),
            other => panic!("Expected ServeUpload, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bare_uploads_path_rejected() {
        assert_eq!(
            ServeUploadCmd::parse("/uploads/"),
            Command::Rejected(ApiError::NotFound("Not found".to_string()))
        );
    }

    #[test]
    fn test_serve_stored_file() {
        let stores = testutil::stores("serve-ok");
        let url = stores
            .uploads
            .store(&FilePart {
                name: "image".to_string(),
                filename: "rex.png".to_string(),
                content_type: "image/png".to_string(),
                data: b"png bytes".to_vec(),
            })
            .unwrap();

        let cmd = ServeUploadCmd {
            name: url.strip_prefix("/uploads/").unwrap().to_string(),
        };
        let response = cmd.execute(&stores.uploads);

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "image/png");
        assert_eq!(response.body, b"png bytes");
    }

    #[test]
    fn test_serve_missing_file_not_found() {
        let stores = testutil::stores("serve-missing");
        let cmd = ServeUploadCmd {
            name: "nope.png".to_string(),
        };
        assert_eq!(cmd.execute(&stores.uploads).status, 404);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("a"), "application/octet-stream");
    }
}
