//! Request descriptors.
//!
//! An [`ApiRequest`] is a plain description of a call (method, path, query,
//! body) that the client turns into a `reqwest` request on every dispatch.
//! Rebuilding from the description is what makes the post-refresh retry
//! possible for multipart uploads.

use std::fmt::Display;
use std::path::Path;

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::ApiError;

/// Name of the JSON metadata part in multipart uploads.
const DATA_PART: &str = "data";

/// A file to upload alongside a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create an attachment from in-memory bytes.
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an attachment from disk, guessing the MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Attachment` if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Attachment(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let mime_type = mime_for_extension(path).to_string();

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    fn to_part(&self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)
            .map_err(|e| ApiError::Attachment(format!("{}: {e}", self.file_name)))
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// MIME types for the uploads the back-office accepts (images and PDFs).
fn mime_for_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Body of an [`ApiRequest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// JSON metadata in a `data` part, followed by named file parts.
    Multipart {
        data: String,
        files: Vec<(String, Attachment)>,
    },
}

/// A request to the remote service, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
    refresh_on_unauthorized: bool,
}

impl ApiRequest {
    /// Create a request with an empty body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            refresh_on_unauthorized: true,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl Display) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter when the value is present.
    #[must_use]
    pub fn query_opt(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the body cannot be serialized.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set a multipart body whose `data` part is `metadata` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the metadata cannot be serialized.
    pub fn multipart(mut self, metadata: &impl Serialize) -> Result<Self, ApiError> {
        self.body = RequestBody::Multipart {
            data: serde_json::to_string(metadata)?,
            files: Vec::new(),
        };
        Ok(self)
    }

    /// Add a file part to a multipart body. Ignored for other body kinds.
    #[must_use]
    pub fn file(mut self, field: &str, attachment: Attachment) -> Self {
        if let RequestBody::Multipart { files, .. } = &mut self.body {
            files.push((field.to_string(), attachment));
        }
        self
    }

    /// Add an optional file part to a multipart body.
    #[must_use]
    pub fn file_opt(self, field: &str, attachment: Option<Attachment>) -> Self {
        match attachment {
            Some(attachment) => self.file(field, attachment),
            None => self,
        }
    }

    /// Do not attempt a token refresh if this request is rejected with 401.
    ///
    /// Used for the login call, where a 401 means bad credentials.
    #[must_use]
    pub const fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    #[must_use]
    pub const fn refreshes_on_unauthorized(&self) -> bool {
        self.refresh_on_unauthorized
    }

    /// Attach the body to a `reqwest` builder.
    pub(crate) fn apply_body(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(match &self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart { data, files } => {
                let mut form = Form::new().text(DATA_PART, data.clone());
                for (field, attachment) in files {
                    form = form.part(field.clone(), attachment.to_part()?);
                }
                builder.multipart(form)
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_opt_skips_missing_values() {
        let request = ApiRequest::get("/products")
            .query("page", 2)
            .query_opt("category", None::<&str>)
            .query_opt("isTrending", Some(true));

        assert_eq!(
            request.query_pairs(),
            &[
                ("page".to_string(), "2".to_string()),
                ("isTrending".to_string(), "true".to_string())
            ]
        );
    }

    #[test]
    fn test_multipart_collects_files() {
        let request = ApiRequest::post("/admin/products/add")
            .multipart(&serde_json::json!({"name": "Table"}))
            .unwrap()
            .file("images", Attachment::new("a.png", "image/png", vec![1]))
            .file_opt("images", None)
            .file("images", Attachment::new("b.png", "image/png", vec![2]));

        let RequestBody::Multipart { data, files } = request.body() else {
            panic!("expected multipart body");
        };
        assert_eq!(data, r#"{"name":"Table"}"#);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_file_on_json_body_is_ignored() {
        let request = ApiRequest::post("/quote-requests")
            .json(&serde_json::json!({}))
            .unwrap()
            .file("pdf", Attachment::new("q.pdf", "application/pdf", vec![]));

        assert!(matches!(request.body(), RequestBody::Json(_)));
    }

    #[test]
    fn test_without_refresh() {
        let request = ApiRequest::post("/auth/login");
        assert!(request.refreshes_on_unauthorized());
        assert!(!request.without_refresh().refreshes_on_unauthorized());
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension(Path::new("devis.PDF")), "application/pdf");
        assert_eq!(mime_for_extension(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(
            mime_for_extension(Path::new("notes")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_attachment_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("croquis.png");
        tokio::fs::write(&path, b"png-bytes").await.unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();
        assert_eq!(attachment.file_name, "croquis.png");
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.bytes, b"png-bytes");
    }
}
